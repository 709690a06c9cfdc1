//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Directive naming flags shared by every command that builds a schema.
fn with_schema_args(cmd: Command) -> Command {
    cmd.arg(schema_path_arg())
        .arg(no_directives_arg())
        .arg(cost_directive_arg())
        .arg(free_directive_arg())
        .arg(resource_directive_arg())
        .arg(color_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("costql")
        .about("Estimate what a GraphQL request will cost before running it")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(invoice_command())
        .subcommand(check_command())
}

/// Price a request against a schema.
pub fn invoice_command() -> Command {
    let cmd = Command::new("invoice")
        .about("Price a request against an annotated schema")
        .override_usage(
            "\
  costql invoice <SCHEMA> <REQUEST>
  costql invoice <SCHEMA> -r <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  costql invoice schema.graphql query.graphql
  costql invoice schema/ -r '{ shop { items { price } } }'
  costql invoice schema.graphql query.graphql --format json
  cat query.graphql | costql invoice schema.graphql -"#,
        )
        .arg(request_path_arg())
        .arg(request_text_arg())
        .arg(format_arg());

    with_schema_args(cmd)
}

/// Build a schema and report the first error.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate an annotated schema")
        .after_help(
            r#"EXAMPLES:
  costql check schema.graphql
  costql check schema/ --cost-directive cost"#,
        );

    with_schema_args(cmd)
}
