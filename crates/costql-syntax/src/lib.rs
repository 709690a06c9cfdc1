#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! GraphQL syntax for costql.
//!
//! Parses type system documents (schemas) and executable documents
//! (requests) into the owned trees of [`ast`].
//!
//! ```
//! let schema = costql_syntax::parse_schema("type Query { hello: String }").unwrap();
//! assert_eq!(schema.definitions.len(), 1);
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;

mod strings;


use rowan::TextRange;

pub use parser::Parser;

/// First error encountered while lexing or parsing a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub range: TextRange,
    pub message: String,
}

pub type Result<T> = std::result::Result<T, SyntaxError>;

pub fn parse_schema(source: &str) -> Result<ast::SchemaDocument> {
    Parser::new(source).parse_schema()
}

pub fn parse_executable(source: &str) -> Result<ast::ExecutableDocument> {
    Parser::new(source).parse_executable()
}
