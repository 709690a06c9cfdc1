//! Extract params from `ArgMatches` and convert them to command args.

use std::path::PathBuf;

use clap::ArgMatches;
use costql_lib::EnvironmentConfig;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::invoice::{InvoiceArgs, OutputFormat};

/// Options for loading and building the schema.
pub struct SchemaParams {
    pub schema_path: PathBuf,
    pub directives: bool,
    pub config: EnvironmentConfig,
    pub color: ColorChoice,
}

impl SchemaParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let name = |id: &str| m.get_one::<String>(id).cloned().unwrap_or_default();
        Self {
            schema_path: m
                .get_one::<PathBuf>("schema_path")
                .cloned()
                .unwrap_or_default(),
            directives: !m.get_flag("no_directives"),
            config: EnvironmentConfig {
                cost_directive: name("cost_directive"),
                free_directive: name("free_directive"),
                resource_directive: name("resource_directive"),
            },
            color: parse_color(m),
        }
    }
}

pub struct InvoiceParams {
    pub schema: SchemaParams,
    pub request_path: Option<PathBuf>,
    pub request_text: Option<String>,
    pub format: OutputFormat,
}

impl InvoiceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema: SchemaParams::from_matches(m),
            request_path: m.get_one::<PathBuf>("request_path").cloned(),
            request_text: m.get_one::<String>("request_text").cloned(),
            format: parse_format(m),
        }
    }
}

impl From<InvoiceParams> for InvoiceArgs {
    fn from(p: InvoiceParams) -> Self {
        Self {
            schema_path: p.schema.schema_path,
            directives: p.schema.directives,
            config: p.schema.config,
            request_path: p.request_path,
            request_text: p.request_text,
            format: p.format,
            color: p.schema.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub schema: SchemaParams,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            schema: SchemaParams::from_matches(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            schema_path: p.schema.schema_path,
            directives: p.schema.directives,
            config: p.schema.config,
            color: p.schema.color.should_colorize(),
        }
    }
}

/// Count of `-v` flags given.
pub fn verbosity(m: &ArgMatches) -> u8 {
    m.get_count("verbose")
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_format(m: &ArgMatches) -> OutputFormat {
    match m.get_one::<String>("format").map(|s| s.as_str()) {
        Some("json") => OutputFormat::Json,
        _ => OutputFormat::Table,
    }
}
