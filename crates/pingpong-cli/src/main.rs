//! Ping-pong MCP server.

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use clap::Parser;
use tracing::{debug, error};

mod logging;
mod serve;

use logging::LogFormat;

/// MCP server exposing the `ping_pong` tool over stdio.
#[derive(Debug, Parser)]
#[command(name = "pingpong-server", version, about)]
struct Cli {
    /// Configuration file path (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Console log format.
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match pingpong_config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[ERROR] {e}");
            return ExitCode::FAILURE;
        }
    };

    let _guards = match logging::init(&config, cli.verbose, cli.log_format) {
        Ok(guards) => guards,
        Err(e) => {
            eprintln!("[ERROR] {e:#}");
            return ExitCode::FAILURE;
        }
    };
    logging::install_panic_hook();
    debug!(config_file = ?cli.config, "configuration loaded");

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Fatal error starting server");
            return ExitCode::FAILURE;
        }
    };

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        runtime.block_on(serve::execute(&config))
    }));
    let code = exit_status(outcome);

    // A pending stdin read cannot be cancelled; do not wait for it.
    runtime.shutdown_background();
    ExitCode::from(code)
}

/// Maps the server outcome to a process status, logging failures.
/// Panics were already logged by the panic hook.
fn exit_status(outcome: thread::Result<anyhow::Result<()>>) -> u8 {
    match outcome {
        Ok(Ok(())) => 0,
        Ok(Err(e)) => {
            error!(error = %format!("{e:#}"), "Fatal error starting server");
            1
        }
        Err(_) => {
            error!("Server panicked, exiting");
            1
        }
    }
}
