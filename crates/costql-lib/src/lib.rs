//! costql: estimate what a GraphQL request will cost before running it.
//!
//! A schema annotated with cost directives is compiled once into an
//! [`Environment`]. Requests are then priced against it, producing an
//! [`Invoice`] that breaks the expected work down by resource type, part
//! type and field.
//!
//! # Example
//!
//! ```
//! use costql_lib::Environment;
//!
//! let env = Environment::from_sdl("type Query { a: A } type A { b: String }").unwrap();
//! let invoice = env.invoice_str("{ a { b } }").unwrap();
//! assert!(!invoice.is_empty());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod environment;
pub mod graph;
pub mod invoice;
pub mod join;
pub mod printer;
pub mod report;
pub mod request;

mod cost;

#[cfg(test)]
mod cost_tests;
#[cfg(test)]
mod invoice_tests;
#[cfg(test)]
mod printer_tests;
#[cfg(test)]
mod request_tests;

pub use config::{DIRECTIVES_SDL, EnvironmentConfig};
pub use costql_core::{Bounds, BoundsError, Price, Pricer, StepPricer, WorkType};
pub use environment::{Environment, EnvironmentBuilder};
pub use graph::{ElementCost, FieldId, FieldModel, OutputType, TypeId, TypeKind};
pub use invoice::Invoice;
pub use join::Join;
pub use printer::InvoicePrinter;
pub use report::{InvoiceReport, ReportLine};
pub use request::Request;

use costql_syntax::SyntaxError;

/// Errors raised while building an environment or pricing a request.
///
/// `element` fields hold a qualified name: `Type` or `Type.field`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("`{element}` cannot carry both @{free} and @{cost}")]
    ConflictingDirectives {
        element: String,
        free: String,
        cost: String,
    },

    #[error("`{element}` carries more than one @{directive}")]
    DuplicateDirective { element: String, directive: String },

    /// `const` combined with explicit points.
    #[error("ambiguous bounds on `{element}`: `const` excludes min, avg, p95 and max")]
    AmbiguousBounds { element: String },

    #[error("invalid bounds on `{element}`: {source}")]
    InvalidBounds {
        element: String,
        #[source]
        source: BoundsError,
    },

    #[error("argument `{argument}` on `{element}` expects {expected}, found {found}")]
    InvalidArgument {
        element: String,
        argument: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("type `{0}` is defined more than once")]
    DuplicateType(String),

    #[error("cannot extend `{name}`: {reason}")]
    UnresolvedExtension { name: String, reason: String },

    #[error("unknown type `{name}` referenced by `{referrer}`")]
    UnknownType { name: String, referrer: String },

    #[error("`{0}` inherits from itself")]
    CyclicInheritance(String),

    #[error("{kind} root `{name}` is not an object type")]
    InvalidRootType { kind: &'static str, name: String },

    #[error("no root type for {0} operations")]
    UnrecognizedOperation(String),

    #[error("unsupported selection under `{0}`")]
    UnsupportedSelection(String),

    #[error("type `{type_name}` has no field `{field}`")]
    UnknownField { type_name: String, field: String },

    #[error("unknown fragment `{0}`")]
    UnknownFragment(String),

    #[error("fragment `{0}` spreads itself")]
    FragmentCycle(String),
}

impl Error {
    /// Attaches the element name to a bounds failure.
    pub(crate) fn bounds(element: &str, source: BoundsError) -> Self {
        match source {
            BoundsError::Ambiguous => Error::AmbiguousBounds {
                element: element.to_owned(),
            },
            source => Error::InvalidBounds {
                element: element.to_owned(),
                source,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
