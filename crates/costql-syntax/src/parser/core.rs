//! Parser state and low-level token operations.

use rowan::{TextRange, TextSize};

use crate::lexer::{SyntaxKind, Token, lex, token_text};
use crate::{Result, SyntaxError};

const DEFAULT_RECURSION_LIMIT: u32 = 512;

pub struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    depth: u32,
    recursion_limit: u32,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        let tokens = lex(source)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .collect();
        Self {
            source,
            tokens,
            pos: 0,
            depth: 0,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Maximum nesting of selection sets, values and type wrappers.
    pub fn with_recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub(super) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn current(&self) -> Option<SyntaxKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    pub(super) fn current_span(&self) -> TextRange {
        self.tokens
            .get(self.pos)
            .map_or_else(|| TextRange::empty(self.eof_offset()), |t| t.span)
    }

    pub(super) fn current_text(&self) -> &'src str {
        self.tokens
            .get(self.pos)
            .map_or("", |t| token_text(self.source, t))
    }

    fn eof_offset(&self) -> TextSize {
        TextSize::from(self.source.len() as u32)
    }

    /// Start of the current token, for building node ranges.
    pub(super) fn start(&self) -> TextSize {
        self.current_span().start()
    }

    /// Range from `start` to the end of the last consumed token.
    pub(super) fn range_from(&self, start: TextSize) -> TextRange {
        let end = self
            .pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(start, |t| t.span.end());
        TextRange::new(start, end.max(start))
    }

    pub(super) fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == Some(kind)
    }

    pub(super) fn at_keyword(&self, keyword: &str) -> bool {
        self.at(SyntaxKind::Name) && self.current_text() == keyword
    }

    pub(super) fn bump(&mut self) -> Token {
        self.ensure_not_eof();
        let token = self.tokens[self.pos];
        self.pos += 1;
        token
    }

    pub(super) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(keyword) {
            self.bump();
            true
        } else {
            false
        }
    }

    pub(super) fn expect(&mut self, kind: SyntaxKind, what: &str) -> Result<Token> {
        if self.at(kind) {
            return Ok(self.bump());
        }
        Err(self.unexpected(what))
    }

    pub(super) fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        if self.eat_keyword(keyword) {
            return Ok(());
        }
        Err(self.unexpected(&format!("`{keyword}`")))
    }

    pub(super) fn name(&mut self, what: &str) -> Result<String> {
        let token = self.expect(SyntaxKind::Name, what)?;
        Ok(token_text(self.source, &token).to_string())
    }

    pub(super) fn text(&self, token: &Token) -> &'src str {
        token_text(self.source, token)
    }

    pub(super) fn error(&self, range: TextRange, message: impl Into<String>) -> SyntaxError {
        SyntaxError {
            range,
            message: message.into(),
        }
    }

    /// Error for the current token not being what the grammar requires.
    pub(super) fn unexpected(&self, expected: &str) -> SyntaxError {
        let found = match self.current() {
            None => "end of input".to_string(),
            Some(SyntaxKind::Garbage) => format!("unrecognized input `{}`", self.current_text()),
            Some(_) => format!("`{}`", self.current_text()),
        };
        self.error(
            self.current_span(),
            format!("expected {expected}, found {found}"),
        )
    }

    pub(super) fn enter(&mut self) -> Result<()> {
        if self.depth >= self.recursion_limit {
            return Err(self.error(self.current_span(), "recursion limit exceeded"));
        }
        self.depth += 1;
        Ok(())
    }

    pub(super) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
