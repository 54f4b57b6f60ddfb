//! Recovery policies for malformed planner output.

use std::fmt;

/// Caller-supplied handler: raw model text in, observation text out.
pub type RecoveryHandler = Box<dyn Fn(&str) -> String + Send + Sync>;

/// What to do when the planner's output cannot be parsed.
///
/// Every policy except [`ParseRecovery::Raise`] keeps the run alive: the
/// chosen observation text is appended to the transcript behind a synthetic
/// recovery action, so the model sees its own mistake on the next planning
/// call.
pub enum ParseRecovery {
    /// Propagate the failure to the caller; the run terminates abnormally.
    Raise,
    /// The parse error text itself becomes the observation. Default.
    RawText,
    /// A fixed replacement observation.
    Replace(String),
    /// Ask a handler for the observation text.
    Handler(RecoveryHandler),
}

impl Default for ParseRecovery {
    fn default() -> Self {
        Self::RawText
    }
}

impl fmt::Debug for ParseRecovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raise => f.write_str("Raise"),
            Self::RawText => f.write_str("RawText"),
            Self::Replace(s) => f.debug_tuple("Replace").field(s).finish(),
            Self::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

impl ParseRecovery {
    /// The observation text for a given raw failure, or `None` when the
    /// policy is to re-raise.
    #[must_use]
    pub fn observation(&self, raw: &str) -> Option<String> {
        match self {
            Self::Raise => None,
            Self::RawText => Some(format!("Could not parse model output: {raw}")),
            Self::Replace(text) => Some(text.clone()),
            Self::Handler(handler) => Some(handler(raw)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_yields_none() {
        assert!(ParseRecovery::Raise.observation("junk").is_none());
    }

    #[test]
    fn raw_text_embeds_failure() {
        let obs = ParseRecovery::RawText.observation("Thought: ???").unwrap();
        assert_eq!(obs, "Could not parse model output: Thought: ???");
    }

    #[test]
    fn replace_ignores_raw() {
        let policy = ParseRecovery::Replace("try again".into());
        assert_eq!(policy.observation("anything").unwrap(), "try again");
    }

    #[test]
    fn handler_sees_raw() {
        let policy = ParseRecovery::Handler(Box::new(|raw| format!("saw: {raw}")));
        assert_eq!(policy.observation("xyz").unwrap(), "saw: xyz");
    }

    #[test]
    fn default_is_raw_text() {
        assert!(matches!(ParseRecovery::default(), ParseRecovery::RawText));
    }
}
