use anyhow::{Context, anyhow};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt};

use crate::Config;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise only errors are shown unless
/// diagnostics are enabled. Output goes to the configured log file, or
/// stderr so stdout stays free for the print engine.
pub fn init_logging(config: &Config) -> anyhow::Result<()> {
    let default = if config.debug { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = fmt().with_env_filter(filter);
    let installed = match &config.log {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("error opening log file {path}"))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };
    installed.map_err(|e| anyhow!("failed to install logger: {e}"))
}
