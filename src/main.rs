// SPDX-License-Identifier: MPL-2.0
use blob_lens::app::{self, Flags, Invocation, USAGE};
use std::process::ExitCode;
use std::str::FromStr;

/// Environment variable holding the `tracing` filter directives.
const LOG_ENV: &str = "BLOB_LENS_LOG";

fn init_tracing() {
    let env = std::env::var(LOG_ENV).unwrap_or_else(|_| "info".to_string());
    let filter = tracing_subscriber::EnvFilter::from_str(&env)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let args = std::env::args_os().skip(1).collect();
    let flags = match Flags::from_args(args) {
        Ok(Invocation::Run(flags)) => *flags,
        Ok(Invocation::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    match app::run(flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "application exited with an error");
            ExitCode::FAILURE
        }
    }
}
