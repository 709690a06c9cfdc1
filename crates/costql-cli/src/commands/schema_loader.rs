use std::fs;
use std::io::{self, Read};
use std::path::Path;

use costql_lib::{DIRECTIVES_SDL, Environment, EnvironmentBuilder, EnvironmentConfig};

use super::diagnostics::{render_error, render_syntax_error};

/// One loaded document and the name diagnostics refer to it by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// A file, every schema file of a directory (sorted), or stdin for `-`.
pub fn load_schema_sources(path: &Path) -> Result<Vec<SourceFile>, String> {
    if path.as_os_str() == "-" {
        return Ok(vec![load_stdin()?]);
    }
    if path.is_dir() {
        return load_directory(path);
    }
    Ok(vec![load_file(path)?])
}

pub fn load_request(path: Option<&Path>, text: Option<&str>) -> Result<SourceFile, String> {
    if let Some(text) = text {
        return Ok(SourceFile::new("<request>", text));
    }
    match path {
        Some(path) if path.as_os_str() == "-" => load_stdin(),
        Some(path) => load_file(path),
        None => Err("request is required: use positional argument or -r/--request".to_owned()),
    }
}

/// Parses every source, then builds. The error is ready to print.
pub fn build_environment(
    sources: &[SourceFile],
    directives: bool,
    config: EnvironmentConfig,
    colored: bool,
) -> Result<Environment, String> {
    let mut documents = Vec::with_capacity(sources.len() + 1);
    if directives {
        let builtin = SourceFile::new("<directives>", DIRECTIVES_SDL);
        let document = costql_syntax::parse_schema(&builtin.text)
            .map_err(|e| render_syntax_error(&e, &builtin, colored))?;
        documents.push(document);
    }
    for source in sources {
        let document = costql_syntax::parse_schema(&source.text)
            .map_err(|e| render_syntax_error(&e, source, colored))?;
        documents.push(document);
    }

    let mut documents = documents.into_iter();
    let Some(first) = documents.next() else {
        return Err(render_error(&"schema cannot be empty"));
    };
    let builder = documents.fold(EnvironmentBuilder::new(first), EnvironmentBuilder::with_document);
    builder
        .with_config(config)
        .build()
        .map_err(|e| render_error(&e))
}

pub(crate) fn is_schema_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "graphql" || ext == "graphqls")
}

fn load_stdin() -> Result<SourceFile, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {}", e))?;
    Ok(SourceFile::new("<stdin>", buf))
}

fn load_file(path: &Path) -> Result<SourceFile, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
    Ok(SourceFile::new(path.to_string_lossy(), content))
}

fn load_directory(dir: &Path) -> Result<Vec<SourceFile>, String> {
    let mut paths: Vec<_> = fs::read_dir(dir)
        .map_err(|e| format!("failed to read directory '{}': {}", dir.display(), e))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && is_schema_file(p))
        .collect();

    if paths.is_empty() {
        return Err(format!(
            "no .graphql or .graphqls files found in '{}'",
            dir.display()
        ));
    }

    // Sort for deterministic ordering
    paths.sort();
    tracing::debug!(dir = %dir.display(), files = paths.len(), "loading schema directory");

    paths.iter().map(|p| load_file(p)).collect()
}
