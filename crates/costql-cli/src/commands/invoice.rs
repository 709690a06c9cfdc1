use std::path::PathBuf;

use costql_lib::{EnvironmentConfig, InvoicePrinter, InvoiceReport};

use super::diagnostics::render_request_error;
use super::schema_loader::{build_environment, load_request, load_schema_sources};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

pub struct InvoiceArgs {
    pub schema_path: PathBuf,
    pub directives: bool,
    pub config: EnvironmentConfig,
    pub request_path: Option<PathBuf>,
    pub request_text: Option<String>,
    pub format: OutputFormat,
    pub color: bool,
}

pub fn run(args: InvoiceArgs) {
    let sources = load_schema_sources(&args.schema_path).unwrap_or_else(|msg| fail(&msg));
    let request = load_request(args.request_path.as_deref(), args.request_text.as_deref())
        .unwrap_or_else(|msg| fail(&msg));

    let env = build_environment(&sources, args.directives, args.config, args.color)
        .unwrap_or_else(|rendered| {
            eprint!("{}", rendered);
            std::process::exit(1);
        });

    let invoice = match env.invoice_str(&request.text) {
        Ok(invoice) => invoice,
        Err(e) => {
            eprint!("{}", render_request_error(&e, &request, args.color));
            std::process::exit(1);
        }
    };

    match args.format {
        OutputFormat::Table => print!("{}", InvoicePrinter::new(&env, &invoice).render()),
        OutputFormat::Json => {
            let report = InvoiceReport::new(&env, &invoice);
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{}", json),
                Err(e) => fail(&format!("failed to serialize invoice: {}", e)),
            }
        }
    }
}

fn fail(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    std::process::exit(1);
}
