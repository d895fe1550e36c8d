use thiserror::Error;

/// Failures reported by a [`SpeechEngine`](crate::SpeechEngine).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("speech engine failed to start: {0}")]
    Init(String),
    #[error("speech request failed: {0}")]
    Speak(String),
    #[error("could not query speech state: {0}")]
    Query(String),
    #[error("could not stop speech: {0}")]
    Stop(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Recoverable failures while processing a single input line.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
}
