//! Event Registry CLI
//!
//! Line-oriented driver around the registry: subscribes a logging handler to
//! each requested channel, then reads `<channel> <payload>` lines from stdin
//! and publishes each payload. Payloads are parsed as JSON when possible and
//! passed through as strings otherwise.

use clap::Parser;
use serde_json::Value;
use std::io::BufRead;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use event_registry::{EventRegistry, Handler, RegistryConfig, Result};

// =============================================================================
// CLI Arguments
// =============================================================================

/// Event Registry - publish stdin lines to in-process channel handlers
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML registry configuration
    #[arg(long, env = "EVENT_REGISTRY_CONFIG")]
    config: Option<PathBuf>,

    /// Channel to attach a logging handler to (repeatable)
    #[arg(long = "subscribe", value_name = "CHANNEL")]
    subscribe: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    let config = match &args.config {
        Some(path) => RegistryConfig::from_file(path)?,
        None => RegistryConfig::default(),
    };

    info!("Starting Event Registry");
    info!("  Version: {}", event_registry::VERSION);
    info!("  Default channel: {}", config.default_channel);
    info!("  Failure policy: {}", config.failure_policy);

    let registry: EventRegistry<Value> = EventRegistry::with_config(config)?;

    for channel in &args.subscribe {
        let name = channel.clone();
        registry.subscribe(
            channel,
            Handler::new(move |payload: &Value| {
                info!("[{}] received: {}", name, payload);
            }),
        );
    }
    info!("Channels: {:?}", registry.channels());

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let Some((channel, payload)) = parse_line(&line) else {
            continue;
        };

        let report = registry.publish(channel, &payload);
        if report.is_noop() {
            warn!("No handlers on channel '{}'", report.channel);
        }
    }

    let stats = registry.stats();
    info!(
        "Done: {} publishes, {} deliveries, {} failures",
        stats.publishes, stats.deliveries, stats.failures
    );
    Ok(())
}

/// Split `<channel> <payload>`; blank lines and `#` comments are skipped
fn parse_line(line: &str) -> Option<(&str, Value)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let (channel, raw) = match line.split_once(char::is_whitespace) {
        Some((channel, rest)) => (channel, rest.trim()),
        None => (line, ""),
    };
    let payload = if raw.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
    };
    Some((channel, payload))
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("# comment"), None);
        assert_eq!(parse_line("ping"), Some(("ping", Value::Null)));
        assert_eq!(
            parse_line("news Breaking news"),
            Some(("news", Value::String("Breaking news".into())))
        );
        assert_eq!(
            parse_line("login {\"user\": \"alice\"}"),
            Some(("login", serde_json::json!({ "user": "alice" })))
        );
    }
}
