mod cli;
mod commands;

use cli::{CheckParams, InvoiceParams, build_cli, verbosity};
use tracing_subscriber::EnvFilter;

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("invoice", m)) => {
            init_tracing(verbosity(m));
            let params = InvoiceParams::from_matches(m);
            commands::invoice::run(params.into());
        }
        Some(("check", m)) => {
            init_tracing(verbosity(m));
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// Logs go to stderr. `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
