use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Ticker typed by the user.
///
/// Unlike a validated symbol this is kept exactly as entered: no trimming,
/// no case folding, no character checks. It is substituted verbatim into
/// both endpoint URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Ticker loaded when a session starts.
    pub const INITIAL: &'static str = "AAPL";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SearchTerm {
    fn default() -> Self {
        Self::new(Self::INITIAL)
    }
}

impl Display for SearchTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for SearchTerm {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SearchTerm {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_input_verbatim() {
        let term = SearchTerm::from(" brk b ");
        assert_eq!(term.as_str(), " brk b ");
    }

    #[test]
    fn defaults_to_initial_ticker() {
        assert_eq!(SearchTerm::default().as_str(), "AAPL");
    }
}
