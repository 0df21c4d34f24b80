//! gh-actions-cache - manage GitHub Actions caches from the command line.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ghac_cmd::cache::{CacheCommand, CacheError};
use ghac_cmd::factory::Factory;
use ghac_core::cmdutil::{self, AuthError};
use ghac_core::ios_eprintln;

/// Process exit codes.
mod exit_codes {
    pub const OK: i32 = 0;
    pub const ERROR: i32 = 1;
    pub const CANCEL: i32 = 2;
    pub const AUTH: i32 = 4;
}

/// Works with GitHub Actions Cache.
#[derive(Debug, Parser)]
#[command(name = "gh-actions-cache", version, about = "Works with GitHub Actions Cache.")]
struct Cli {
    #[command(subcommand)]
    command: Option<CacheCommand>,
}

/// Log filter from `GH_DEBUG`: `1`/`true` mean debug, anything else is a
/// filter directive. Defaults to warnings only.
fn log_filter(value: Option<&str>) -> EnvFilter {
    match value.map(str::trim) {
        None | Some("") => EnvFilter::new("warn"),
        Some("1" | "true") => EnvFilter::new("debug"),
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn")),
    }
}

#[tokio::main]
async fn main() {
    let debug = std::env::var("GH_DEBUG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(debug.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let factory = Factory::new(env!("CARGO_PKG_VERSION"));

    let exit_code = if let Some(cmd) = cli.command {
        match cmd.run(&factory).await {
            Ok(()) => exit_codes::OK,
            Err(e) => {
                if cmdutil::is_user_cancellation(&e) {
                    exit_codes::CANCEL
                } else if let Some(auth) = e.downcast_ref::<AuthError>() {
                    ios_eprintln!(factory.io, "{auth}");
                    exit_codes::AUTH
                } else if let Some(cache) = e.downcast_ref::<CacheError>() {
                    ios_eprintln!(factory.io, "{cache}");
                    exit_codes::ERROR
                } else {
                    ios_eprintln!(factory.io, "{e:#}");
                    exit_codes::ERROR
                }
            }
        }
    } else {
        use clap::CommandFactory;
        Cli::command().print_help().ok();
        println!();
        exit_codes::OK
    };

    std::process::exit(exit_code);
}
