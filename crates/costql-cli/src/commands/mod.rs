pub mod check;
pub mod diagnostics;
pub mod invoice;
pub mod schema_loader;

#[cfg(test)]
mod diagnostics_tests;
#[cfg(test)]
mod schema_loader_tests;
