//! Tests for CLI dispatch logic.

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{check_command, invoice_command};
use crate::commands::invoice::OutputFormat;

#[test]
fn invoice_with_request_file() {
    let m = invoice_command()
        .try_get_matches_from(["invoice", "schema.graphql", "query.graphql"])
        .unwrap();
    let params = InvoiceParams::from_matches(&m);

    assert_eq!(params.schema.schema_path, PathBuf::from("schema.graphql"));
    assert_eq!(params.request_path, Some(PathBuf::from("query.graphql")));
    assert_eq!(params.request_text, None);
    assert!(params.schema.directives);
    assert_eq!(params.format, OutputFormat::Table);
    assert_eq!(params.schema.color, ColorChoice::Auto);
}

#[test]
fn invoice_with_inline_request() {
    let m = invoice_command()
        .try_get_matches_from(["invoice", "schema/", "-r", "{ a }", "--format", "json"])
        .unwrap();
    let params = InvoiceParams::from_matches(&m);

    assert_eq!(params.request_path, None);
    assert_eq!(params.request_text.as_deref(), Some("{ a }"));
    assert_eq!(params.format, OutputFormat::Json);
}

#[test]
fn request_file_and_text_conflict() {
    let result = invoice_command().try_get_matches_from(["invoice", "s.graphql", "q.graphql", "-r", "{ a }"]);
    assert!(result.is_err());
}

#[test]
fn unknown_format_is_rejected() {
    let result = invoice_command().try_get_matches_from(["invoice", "s.graphql", "--format", "xml"]);
    assert!(result.is_err());
}

#[test]
fn schema_is_required() {
    assert!(check_command().try_get_matches_from(["check"]).is_err());
}

#[test]
fn default_directive_names() {
    let m = check_command().try_get_matches_from(["check", "s.graphql"]).unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.schema.config, costql_lib::EnvironmentConfig::default());
}

#[test]
fn renamed_directives() {
    let m = check_command()
        .try_get_matches_from([
            "check",
            "s.graphql",
            "--no-directives",
            "--cost-directive",
            "cost",
            "--free-directive",
            "free",
            "--resource-directive",
            "resource",
            "--color",
            "never",
        ])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert!(!params.schema.directives);
    assert_eq!(params.schema.config.cost_directive, "cost");
    assert_eq!(params.schema.config.free_directive, "free");
    assert_eq!(params.schema.config.resource_directive, "resource");
    assert_eq!(params.schema.color, ColorChoice::Never);
}

#[test]
fn verbosity_reaches_subcommands() {
    let m = build_cli()
        .try_get_matches_from(["costql", "check", "s.graphql", "-vv"])
        .unwrap();
    let (_, sub) = m.subcommand().unwrap();
    assert_eq!(verbosity(sub), 2);
}

#[test]
fn subcommand_is_required() {
    assert!(build_cli().try_get_matches_from(["costql"]).is_err());
}

#[test]
fn help_lists_directive_flags() {
    let help = invoice_command().render_help().to_string();

    for flag in ["--no-directives", "--cost-directive", "--free-directive", "--resource-directive", "--format"] {
        assert!(help.contains(flag), "{flag} missing from help");
    }
}
