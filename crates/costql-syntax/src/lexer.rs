//! Lexer for GraphQL documents.
//!
//! Produces span-based tokens without storing text. Trivia (whitespace, line
//! terminators, commas and comments) is kept in the stream and skipped by the
//! parser.
//!
//! Consecutive unrecognized characters are coalesced into a single `Garbage`
//! token.

use logos::{Lexer, Logos};
use rowan::TextRange;
use std::ops::Range;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    #[token("!")]
    Bang,

    #[token("$")]
    Dollar,

    #[token("&")]
    Amp,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("...")]
    Spread,

    #[token(":")]
    Colon,

    #[token("=")]
    Equals,

    #[token("@")]
    At,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("|")]
    Pipe,

    #[token("}")]
    BraceClose,

    /// Keywords are contextual in GraphQL, so they lex as names.
    #[regex(r"[_A-Za-z][_0-9A-Za-z]*")]
    Name,

    #[regex(r"-?(0|[1-9][0-9]*)")]
    IntValue,

    #[regex(r"-?(0|[1-9][0-9]*)(\.[0-9]+[eE][+-]?[0-9]+|\.[0-9]+|[eE][+-]?[0-9]+)")]
    FloatValue,

    #[regex(r#""([^"\\\r\n]|\\["\\/bfnrt]|\\u[0-9A-Fa-f]{4})*""#)]
    StringValue,

    #[token(r#"""""#, block_string)]
    BlockStringValue,

    #[regex(r"[ \t\u{FEFF}]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    #[token("\r")]
    Newline,

    /// Commas are insignificant in GraphQL.
    #[token(",")]
    Comma,

    #[regex(r"#[^\r\n]*", allow_greedy = true)]
    Comment,

    /// Coalesced unrecognized characters
    Garbage,
}

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::Whitespace | SyntaxKind::Newline | SyntaxKind::Comma | SyntaxKind::Comment
        )
    }
}

/// Consumes a block string body up to the closing `"""`; `\"""` does not close it.
fn block_string(lex: &mut Lexer<'_, SyntaxKind>) -> bool {
    let rest = lex.remainder();
    let mut offset = 0;
    while offset < rest.len() {
        let tail = &rest[offset..];
        if tail.starts_with(r#"\""""#) {
            offset += 4;
        } else if tail.starts_with(r#"""""#) {
            lex.bump(offset + 3);
            return true;
        } else {
            offset += tail.chars().next().map_or(1, char::len_utf8);
        }
    }
    lex.bump(rest.len());
    false
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

pub(crate) fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes source into a vector of span-based tokens.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = SyntaxKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(
                        SyntaxKind::Garbage,
                        range_to_text_range(start..end),
                    ));
                }
                tokens.push(Token::new(kind, range_to_text_range(lexer.span())));
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        SyntaxKind::Garbage,
                        range_to_text_range(start..source.len()),
                    ));
                }
                break;
            }
        }
    }

    tokens
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'q>(source: &'q str, token: &Token) -> &'q str {
    &source[std::ops::Range::<usize>::from(token.span)]
}
