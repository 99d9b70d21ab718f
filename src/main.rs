use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ndkfig::{Cli, handle};

fn init_logging() {
    // Logs go to stderr so stdout stays parseable.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    init_logging();

    let (action, options) = Cli::parse().into_request();
    match handle(&action, &options) {
        Ok(result) => {
            println!("{result}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ndkfig: {e}");
            if let ndkfig::NdkfigError::UnknownKeys(errors) = &e {
                for err in errors {
                    eprintln!("  {err}");
                }
            }
            ExitCode::FAILURE
        }
    }
}
