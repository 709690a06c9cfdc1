use std::path::PathBuf;

use costql_lib::EnvironmentConfig;

use super::schema_loader::{build_environment, load_schema_sources};

pub struct CheckArgs {
    pub schema_path: PathBuf,
    pub directives: bool,
    pub config: EnvironmentConfig,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let sources = match load_schema_sources(&args.schema_path) {
        Ok(sources) => sources,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };

    let env = match build_environment(&sources, args.directives, args.config, args.color) {
        Ok(env) => env,
        Err(rendered) => {
            eprint!("{}", rendered);
            std::process::exit(1);
        }
    };

    let own_types = env.types().filter(|t| !t.is_builtin()).count();
    tracing::info!(types = own_types, fields = env.fields().count(), "schema is valid");
    // Silent on success (like cargo check)
}
