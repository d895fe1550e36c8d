//! Line-oriented speech server for screen readers.
//!
//! Commands arrive one per line on stdin and are applied to a
//! [`processor::Interpreter`] driving the configured speech engine.

use anyhow::Context;
use processor::{Interpreter, SpeechEngine};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, warn};

pub mod config;
pub mod engine;
pub mod logging;

pub use config::{Config, EngineKind};
pub use engine::{PrintEngine, SayEngine};
pub use logging::init_logging;

/// Build the engine selected by `config`.
pub fn build_engine(config: &Config) -> Box<dyn SpeechEngine> {
    match config.engine {
        EngineKind::Say => Box::new(SayEngine::new(config.say_program.clone())),
        EngineKind::Print => Box::new(PrintEngine::stdout()),
    }
}

/// Feed every line of `input` to `interpreter` until end of input.
///
/// Failures of individual lines are logged and skipped. Only a read error
/// ends the loop early.
pub async fn run<R>(mut input: R, interpreter: &mut Interpreter) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = input
            .read_until(b'\n', &mut buf)
            .await
            .context("error reading input")?;
        if n == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(trim_line_ending(&buf));
        debug!("parsing: {}", line);
        if let Err(e) = interpreter.process_line(&line).await {
            warn!(error = %e, "failed to process line");
        }
    }
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Start the engine, serve stdin until it closes, then shut the engine down.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("starting fastmac server");
    let mut interpreter = Interpreter::new(config.settings(), build_engine(&config));
    interpreter
        .engine_mut()
        .init()
        .await
        .context("failed to start speech server")?;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let result = run(stdin, &mut interpreter).await;
    interpreter.engine_mut().shutdown().await;
    match &result {
        Ok(()) => info!("exiting fastmac server"),
        Err(e) => info!(error = %e, "exiting fastmac server with read error"),
    }
    result
}
