//! Concrete speech engines for the server binary.

use async_trait::async_trait;
use processor::{EngineError, SpeechEngine};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tracing::{debug, warn};

/// Engine that hands each utterance to an external program such as macOS
/// `say`, which understands the embedded `[[...]]` directives.
///
/// Text is written to the child's stdin. A new utterance interrupts the
/// previous one.
pub struct SayEngine {
    program: String,
    child: Option<Child>,
}

impl SayEngine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            child: None,
        }
    }

    /// Resolve the program the way a shell would: paths as-is, bare names
    /// through `PATH`.
    fn locate(&self) -> Option<PathBuf> {
        let program = Path::new(&self.program);
        if program.components().count() > 1 {
            return program.is_file().then(|| program.to_path_buf());
        }
        let paths = std::env::var_os("PATH")?;
        std::env::split_paths(&paths)
            .map(|dir| dir.join(program))
            .find(|candidate| candidate.is_file())
    }

    async fn spawn(&self, text: &str) -> std::io::Result<Child> {
        let mut child = Command::new(&self.program)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            stdin.shutdown().await?;
        }
        Ok(child)
    }
}

#[async_trait]
impl SpeechEngine for SayEngine {
    async fn init(&mut self) -> Result<(), EngineError> {
        match self.locate() {
            Some(path) => {
                debug!(path = %path.display(), "using speech program");
                Ok(())
            }
            None => Err(EngineError::Init(format!("{} not found", self.program))),
        }
    }

    async fn speak(&mut self, text: &str) -> Result<(), EngineError> {
        self.stop().await?;
        let child = self
            .spawn(text)
            .await
            .map_err(|e| EngineError::Speak(e.to_string()))?;
        self.child = Some(child);
        Ok(())
    }

    async fn is_speaking(&mut self) -> Result<bool, EngineError> {
        let Some(child) = self.child.as_mut() else {
            return Ok(false);
        };
        match child.try_wait() {
            Ok(Some(_)) => {
                self.child = None;
                Ok(false)
            }
            Ok(None) => Ok(true),
            Err(e) => Err(EngineError::Query(e.to_string())),
        }
    }

    async fn stop(&mut self) -> Result<(), EngineError> {
        if let Some(mut child) = self.child.take() {
            if child
                .try_wait()
                .map_err(|e| EngineError::Stop(e.to_string()))?
                .is_none()
            {
                child
                    .kill()
                    .await
                    .map_err(|e| EngineError::Stop(e.to_string()))?;
            }
        }
        Ok(())
    }

    async fn shutdown(&mut self) {
        if let Err(e) = self.stop().await {
            warn!(error = %e, "speech still running at shutdown");
        }
    }
}

/// Engine that writes each utterance as one line, for headless use.
pub struct PrintEngine<W> {
    out: W,
}

impl PrintEngine<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> PrintEngine<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[async_trait]
impl<W: Write + Send> SpeechEngine for PrintEngine<W> {
    async fn init(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    async fn speak(&mut self, text: &str) -> Result<(), EngineError> {
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }

    async fn is_speaking(&mut self) -> Result<bool, EngineError> {
        Ok(false)
    }

    async fn stop(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    async fn shutdown(&mut self) {
        if let Err(e) = self.out.flush() {
            warn!(error = %e, "failed to flush speech output at shutdown");
        }
    }
}
