//! Recursive-descent parsers for type system and executable documents.
//!
//! Parsing stops at the first error. Trivia is dropped before parsing starts.

mod common;
mod core;
mod executable;
mod invariants;
mod schema;


pub use core::Parser;
