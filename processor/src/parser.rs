//! Splitting of raw input lines into a command token and its argument.

/// Directive substituted for every `[*]` morpheme token: a 50ms pause.
pub const PAUSE: &str = "[[slnc 50]]";

/// Split `line` into `(command, body)`.
///
/// Surrounding spaces are trimmed and the line is cut at its first space.
/// A non-empty body is brace-unwrapped and then has its morpheme tokens
/// replaced with [`PAUSE`].
pub fn split_line(line: &str) -> (&str, String) {
    let line = line.trim_matches(' ');
    match line.split_once(' ') {
        Some((command, body)) => (command, replace_morphemes(unwrap_braces(body))),
        None => (line, String::new()),
    }
}

/// Keep the text after the first `{`, stopping one character short of the
/// last `}`.
///
/// The character just before the closing brace is dropped too. Frontends rely
/// on this cut, so it stays. Bodies lacking either brace pass through, and an
/// empty or inverted range yields an empty string.
pub fn unwrap_braces(body: &str) -> &str {
    match (body.find('{'), body.rfind('}')) {
        (Some(open), Some(close)) => {
            let end = body[..close]
                .char_indices()
                .next_back()
                .map_or(0, |(i, _)| i);
            body.get(open + 1..end).unwrap_or("")
        }
        _ => body,
    }
}

/// Replace every `[*]` with [`PAUSE`].
pub fn replace_morphemes(body: &str) -> String {
    body.replace("[*]", PAUSE)
}
