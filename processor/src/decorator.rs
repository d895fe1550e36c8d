//! Embedding of synthesis directives into spoken text.

use once_cell::sync::Lazy;
use regex::Regex;

static EMBEDDED_COMMAND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\{.*?\}\]").expect("valid embedded command pattern"));

/// Prefix `text` with a speaking rate directive.
pub fn with_rate(text: &str, rate: u32) -> String {
    format!("[[rate {rate}]]{text}")
}

/// Speak `text` letter by letter.
pub fn wrap_character_spelling(text: &str) -> String {
    format!("[[char ltr]]{text}[[char norm]]")
}

/// Raise the pitch base by `delta` for `text`, lowering it again afterwards.
pub fn wrap_pitch(text: &str, delta: f32) -> String {
    format!("[[pbas +{delta:.6}]]{text}[[pbas -{delta:.6}]]")
}

/// Remove every `[{...}]` span so user text cannot smuggle in directives.
///
/// Matching is non-greedy and does not cross line breaks.
pub fn strip_embedded_commands(text: &str) -> String {
    EMBEDDED_COMMAND.replace_all(text, "").into_owned()
}
