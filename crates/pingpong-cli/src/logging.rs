//! Tracing subscriber setup.
//!
//! Console output always goes to stderr: stdout carries the protocol.
//! The environment picks the destinations, `-v` and `--log-format`
//! tune them.

use std::io;
use std::panic;

use anyhow::Context;
use clap::ValueEnum;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use pingpong_config::ServerConfig;

/// Console log format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Plain,
    /// One JSON object per line, for log aggregation.
    Json,
}

/// Target of the events emitted by the panic hook.
pub const PANIC_TARGET: &str = "panic";

/// A boxed output layer.
pub type Sink = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the file writers alive; dropping it flushes pending lines.
#[must_use = "dropping the guards stops file logging"]
pub struct LogGuards {
    _workers: Vec<WorkerGuard>,
}

/// Installs the global subscriber.
///
/// # Errors
///
/// Fails on an invalid log level, an unusable log directory, or if a
/// subscriber is already installed.
pub fn init(config: &ServerConfig, verbose: u8, format: LogFormat) -> anyhow::Result<LogGuards> {
    let directive = filter_directive(&config.log_level, verbose);
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log level '{directive}'"))?;
    let (sinks, guards) = build_sinks(config, format)?;

    tracing_subscriber::registry()
        .with(sinks)
        .with(filter)
        .try_init()
        .context("failed to install tracing subscriber")?;
    Ok(guards)
}

/// `-v` means debug, `-vv` and more mean trace; otherwise the configured level.
pub fn filter_directive(configured: &str, verbose: u8) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Builds the output layers selected by the environment.
pub fn build_sinks(
    config: &ServerConfig,
    format: LogFormat,
) -> anyhow::Result<(Vec<Sink>, LogGuards)> {
    let mut sinks: Vec<Sink> = Vec::new();
    let mut guards = Vec::new();

    if config.environment.logs_to_console() {
        let console: Sink = match format {
            LogFormat::Plain => fmt::layer().with_writer(io::stderr).boxed(),
            LogFormat::Json => fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .boxed(),
        };
        sinks.push(console);
    }

    if config.environment.logs_to_files() {
        let (combined, guard) = tracing_appender::non_blocking(log_file(config, "combined.log")?);
        guards.push(guard);
        sinks.push(fmt::layer().json().with_ansi(false).with_writer(combined).boxed());

        let (errors, guard) = NonBlockingBuilder::default()
            .lossy(false)
            .finish(log_file(config, "error.log")?);
        guards.push(guard);
        sinks.push(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(errors)
                .with_filter(LevelFilter::ERROR)
                .boxed(),
        );

        let (exceptions, guard) = NonBlockingBuilder::default()
            .lossy(false)
            .finish(log_file(config, "exceptions.log")?);
        guards.push(guard);
        sinks.push(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(exceptions)
                .with_filter(Targets::new().with_target(PANIC_TARGET, Level::ERROR))
                .boxed(),
        );
    }

    Ok((sinks, LogGuards { _workers: guards }))
}

/// Routes panics through `tracing` before the default hook prints them.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_default();
        tracing::error!(target: PANIC_TARGET, location = %location, "Uncaught panic: {payload}");
        default_hook(info);
    }));
}

fn log_file(config: &ServerConfig, name: &str) -> anyhow::Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(&config.log_dir)
        .with_context(|| format!("cannot open {name} in {}", config.log_dir.display()))
}
