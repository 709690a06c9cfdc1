//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so that commands compose the same
//! definitions.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};
use costql_lib::config::{DEFAULT_COST_DIRECTIVE, DEFAULT_FREE_DIRECTIVE, DEFAULT_RESOURCE_DIRECTIVE};

/// Schema file, directory or `-` (positional).
pub fn schema_path_arg() -> Arg {
    Arg::new("schema_path")
        .value_name("SCHEMA")
        .index(1)
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Schema file, directory of .graphql/.graphqls files, or - for stdin")
}

/// Request document file (positional).
pub fn request_path_arg() -> Arg {
    Arg::new("request_path")
        .value_name("REQUEST")
        .index(2)
        .value_parser(value_parser!(PathBuf))
        .conflicts_with("request_text")
        .help("Request document file, or - for stdin")
}

/// Inline request text (-r/--request).
pub fn request_text_arg() -> Arg {
    Arg::new("request_text")
        .short('r')
        .long("request")
        .value_name("TEXT")
        .help("Inline request text")
}

/// Output format (--format).
pub fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .default_value("table")
        .value_parser(["table", "json"])
        .help("Output format")
}

/// Skip the built-in directive definitions (--no-directives).
pub fn no_directives_arg() -> Arg {
    Arg::new("no_directives")
        .long("no-directives")
        .action(ArgAction::SetTrue)
        .help("Don't add the cost directive definitions to the schema")
}

/// Cost directive name (--cost-directive).
pub fn cost_directive_arg() -> Arg {
    Arg::new("cost_directive")
        .long("cost-directive")
        .value_name("NAME")
        .default_value(DEFAULT_COST_DIRECTIVE)
        .help("Name of the cost directive")
}

/// Free marker name (--free-directive).
pub fn free_directive_arg() -> Arg {
    Arg::new("free_directive")
        .long("free-directive")
        .value_name("NAME")
        .default_value(DEFAULT_FREE_DIRECTIVE)
        .help("Name of the free marker directive")
}

/// Resource marker name (--resource-directive).
pub fn resource_directive_arg() -> Arg {
    Arg::new("resource_directive")
        .long("resource-directive")
        .value_name("NAME")
        .default_value(DEFAULT_RESOURCE_DIRECTIVE)
        .help("Name of the resource marker directive")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize diagnostics")
}

/// Log verbosity (-v, -vv, -vvv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Verbosity level (-v info, -vv debug, -vvv trace)")
}
