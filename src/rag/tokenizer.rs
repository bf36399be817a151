//! Tokenizer: lowercase alphanumeric token scanning
//!
//! Token characters are ASCII letters, digits, and the apostrophe; every
//! other character is a separator. The scan is a pure left-to-right pass
//! over the input, so repeated calls on the same text yield the same
//! sequence.

/// Whether `c` is part of a token
fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '\''
}

/// Lazy iterator over the tokens of a text
pub struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        // Skip separators
        let start = self.rest.find(is_token_char)?;
        let rest = &self.rest[start..];

        let end = rest.find(|c| !is_token_char(c)).unwrap_or(rest.len());
        let token = rest[..end].to_ascii_lowercase();
        self.rest = &rest[end..];

        Some(token)
    }
}

/// Tokenize free text into lowercase terms, left to right
///
/// Empty input and input with no token characters both yield an empty
/// sequence, never an error.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { rest: text }
}
