use tracing::{debug, warn};
use unicode_general_category::{GeneralCategory, get_general_category};

use crate::decorator::{strip_embedded_commands, with_rate, wrap_character_spelling, wrap_pitch};
use crate::{Command, ProcessError, Result, SpeechEngine};

/// Spoken in reply to `version`. The placeholder is never filled in;
/// frontends expect this exact text.
pub const VERSION_MESSAGE: &str = "Version is $s";

pub const DEFAULT_SAY_RATE: u32 = 550;
pub const DEFAULT_SPEECH_RATE: u32 = 275;
pub const DEFAULT_UPPERCASE_PITCH: f32 = 0.8;

/// Speech parameters fixed at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Rate used when spelling letters.
    pub say_rate: u32,
    /// Rate used for direct and queued speech.
    pub speech_rate: u32,
    /// Pitch raise applied to uppercase letters.
    pub uppercase_pitch: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            say_rate: DEFAULT_SAY_RATE,
            speech_rate: DEFAULT_SPEECH_RATE,
            uppercase_pitch: DEFAULT_UPPERCASE_PITCH,
        }
    }
}

/// Applies protocol commands to a pending queue and a [`SpeechEngine`].
pub struct Interpreter {
    settings: Settings,
    queue: Vec<String>,
    engine: Box<dyn SpeechEngine>,
}

impl Interpreter {
    /// Create an interpreter with an empty queue.
    pub fn new(settings: Settings, engine: Box<dyn SpeechEngine>) -> Self {
        Self {
            settings,
            queue: Vec::new(),
            engine,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Fragments queued since the last dispatch or stop, oldest first.
    pub fn queue(&self) -> &[String] {
        &self.queue
    }

    /// Mutable access to the engine, e.g. for startup and shutdown.
    pub fn engine_mut(&mut self) -> &mut dyn SpeechEngine {
        self.engine.as_mut()
    }

    /// Parse and apply one input line.
    pub async fn process_line(&mut self, line: &str) -> Result<()> {
        debug!("processing: {}", line);
        self.apply(Command::parse(line)).await
    }

    /// Apply an already parsed command.
    pub async fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Version => self.version().await,
            Command::Say(body) => self.say(&body).await,
            Command::Letter(body) => self.letter(body).await,
            Command::Dispatch => self.dispatch().await,
            Command::Code(body) | Command::Text(body) => {
                self.queue.push(body);
                Ok(())
            }
            Command::Stop => self.stop().await,
            Command::Unknown(token) => Err(ProcessError::UnknownCommand(token)),
        }
    }

    async fn version(&mut self) -> Result<()> {
        let text = with_rate(VERSION_MESSAGE, self.settings.speech_rate);
        self.emit(&text).await
    }

    async fn say(&mut self, body: &str) -> Result<()> {
        let text = with_rate(body, self.settings.speech_rate);
        self.emit(&text).await
    }

    async fn letter(&mut self, mut body: String) -> Result<()> {
        if body.chars().next().is_some_and(is_uppercase_letter) {
            body = wrap_pitch(&body, self.settings.uppercase_pitch);
        }
        let text = with_rate(&wrap_character_spelling(&body), self.settings.say_rate);
        self.emit(&text).await
    }

    async fn dispatch(&mut self) -> Result<()> {
        if self.queue.is_empty() {
            return Ok(());
        }
        let text: String = self.queue.drain(..).collect();
        self.emit(&text).await
    }

    async fn stop(&mut self) -> Result<()> {
        self.queue.clear();
        let speaking = match self.engine.is_speaking().await {
            Ok(speaking) => speaking,
            Err(e) => {
                warn!(error = %e, "error checking if speaking");
                false
            }
        };
        if speaking {
            self.engine.stop().await?;
        }
        Ok(())
    }

    async fn emit(&mut self, text: &str) -> Result<()> {
        let text = strip_embedded_commands(text);
        self.engine.speak(&text).await?;
        Ok(())
    }
}

/// Category Lu only; circled letters and Roman numerals do not count.
fn is_uppercase_letter(c: char) -> bool {
    get_general_category(c) == GeneralCategory::UppercaseLetter
}
