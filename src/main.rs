use std::env;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod clipboard;
mod error;
mod pass;
mod rand;
mod settings;

use cli::CliFlags;

fn main() -> ExitCode {
    harden();

    let flags = CliFlags::parse();
    init_logging(flags.verbose);

    match cli::run(flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cli::error(&format!("Error: {e}"));
            ExitCode::FAILURE
        }
    }
}

/// Keep passwords out of core dumps and away from same-user ptrace.
fn harden() {
    #[cfg(target_os = "linux")]
    unsafe {
        libc::prctl(libc::PR_SET_DUMPABLE, 0)
    };
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = env::var("RUST_LOG").unwrap_or_else(|_| level.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "passgen starting");
}
