use crate::parser::split_line;

/// One line of the input protocol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `version`: announce the server version.
    Version,
    /// `tts_say <text>`: speak immediately.
    Say(String),
    /// `l <text>`: spell a letter.
    Letter(String),
    /// `d`: speak everything queued so far.
    Dispatch,
    /// `c <text>`: queue code.
    Code(String),
    /// `q <text>`: queue text.
    Text(String),
    /// `s`: drop the queue and silence the engine.
    Stop,
    /// Anything else, carrying the offending token.
    Unknown(String),
}

impl Command {
    /// Parse a raw input line.
    pub fn parse(line: &str) -> Self {
        let (token, body) = split_line(line);
        match token {
            "version" => Self::Version,
            "tts_say" => Self::Say(body),
            "l" => Self::Letter(body),
            "d" => Self::Dispatch,
            "c" => Self::Code(body),
            "q" => Self::Text(body),
            "s" => Self::Stop,
            other => Self::Unknown(other.to_string()),
        }
    }
}
