use clap::{Parser, ValueEnum};
use processor::Settings;
use processor::interpreter::{DEFAULT_SAY_RATE, DEFAULT_SPEECH_RATE, DEFAULT_UPPERCASE_PITCH};

/// Which synthesizer receives the decorated text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EngineKind {
    /// Pipe each utterance to an external `say`-style program.
    Say,
    /// Print each utterance on stdout.
    Print,
}

/// Process configuration, read once at startup.
#[derive(Clone, Debug, Parser)]
#[command(author, version, about = "Speech server speaking a line-based screen-reader protocol")]
pub struct Config {
    /// Log diagnostics. Also enabled by a non-empty `DEBUG` variable.
    #[arg(long)]
    pub debug: bool,
    /// Append diagnostics to this file instead of stderr
    #[arg(long, env = "LOG")]
    pub log: Option<String>,
    /// Speech engine to drive
    #[arg(long, value_enum, env = "FASTMAC_ENGINE", default_value_t = EngineKind::Say)]
    pub engine: EngineKind,
    /// Program used by the `say` engine
    #[arg(long, env = "FASTMAC_SAY_PROGRAM", default_value = "say")]
    pub say_program: String,
    /// Rate used when spelling letters
    #[arg(long, env = "FASTMAC_SAY_RATE", default_value_t = DEFAULT_SAY_RATE)]
    pub say_rate: u32,
    /// Rate used for ordinary speech
    #[arg(long, env = "FASTMAC_SPEECH_RATE", default_value_t = DEFAULT_SPEECH_RATE)]
    pub speech_rate: u32,
    /// Pitch raise for uppercase letters
    #[arg(long, env = "FASTMAC_UPPERCASE_PITCH", default_value_t = DEFAULT_UPPERCASE_PITCH)]
    pub uppercase_pitch: f32,
}

impl Config {
    /// Parse the command line and fold in the `DEBUG` variable.
    pub fn load() -> Self {
        Self::parse().with_debug_var(std::env::var("DEBUG").ok().as_deref())
    }

    /// Enable diagnostics when `value` is non-empty, and drop an empty log path.
    pub fn with_debug_var(mut self, value: Option<&str>) -> Self {
        self.debug |= value.is_some_and(|v| !v.is_empty());
        self.log = self.log.filter(|p| !p.is_empty());
        self
    }

    pub fn settings(&self) -> Settings {
        Settings {
            say_rate: self.say_rate,
            speech_rate: self.speech_rate,
            uppercase_pitch: self.uppercase_pitch,
        }
    }
}
