use async_trait::async_trait;

use crate::EngineError;

/// A speech synthesizer driven by the [`Interpreter`](crate::Interpreter).
///
/// Text handed to [`speak`](SpeechEngine::speak) may carry embedded
/// `[[...]]` directives for rate, pitch and character mode.
/// Calls are made one at a time, in input order.
#[async_trait]
pub trait SpeechEngine: Send {
    /// Prepare the engine. A failure here is fatal to the server.
    async fn init(&mut self) -> Result<(), EngineError>;
    /// Start speaking `text`.
    async fn speak(&mut self, text: &str) -> Result<(), EngineError>;
    /// Whether speech is currently being produced.
    async fn is_speaking(&mut self) -> Result<bool, EngineError>;
    /// Halt any in-progress speech.
    async fn stop(&mut self) -> Result<(), EngineError>;
    /// Release engine resources.
    async fn shutdown(&mut self);
}
