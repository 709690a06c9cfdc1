//! Rendering errors for the terminal.
//!
//! Syntax errors carry a byte range and are shown against their source.
//! Everything else is a single `error:` line.

use std::fmt::Display;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};
use costql_lib::Error;
use costql_syntax::SyntaxError;

use super::schema_loader::SourceFile;

pub fn render_error(error: &dyn Display) -> String {
    format!("error: {error}\n")
}

pub fn render_syntax_error(error: &SyntaxError, source: &SourceFile, colored: bool) -> String {
    let renderer = if colored {
        Renderer::styled()
    } else {
        Renderer::plain()
    };

    let range = adjust_range(error.range.start().into(), error.range.end().into(), source.text.len());
    let snippet = Snippet::source(&source.text)
        .line_start(1)
        .path(&source.name)
        .annotation(AnnotationKind::Primary.span(range).label(&error.message));
    let report = [Level::ERROR.primary_title(&error.message).element(snippet)];

    format!("{}\n", renderer.render(&report))
}

/// Errors from pricing `request`; only syntax errors point into it.
pub fn render_request_error(error: &Error, request: &SourceFile, colored: bool) -> String {
    match error {
        Error::Syntax(e) => render_syntax_error(e, request, colored),
        other => render_error(other),
    }
}

/// Widens empty ranges to one byte so the caret has something to point at.
fn adjust_range(start: usize, end: usize, limit: usize) -> Range<usize> {
    if start == end {
        return start..(start + 1).min(limit);
    }
    start..end
}
