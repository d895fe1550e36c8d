//! Command protocol for a screen-reader speech server.
//!
//! Lines such as `q hello` or `l A` are parsed into a [`Command`], applied to
//! an [`Interpreter`] and, when something should be heard, decorated with
//! synthesis directives before being handed to a [`SpeechEngine`].

pub mod command;
pub mod decorator;
pub mod engine;
pub mod error;
pub mod interpreter;
pub mod parser;

pub use command::Command;
pub use engine::SpeechEngine;
pub use error::{EngineError, ProcessError};
pub use interpreter::{Interpreter, Settings};

/// Convenience result type used throughout this crate.
pub type Result<T> = std::result::Result<T, ProcessError>;
