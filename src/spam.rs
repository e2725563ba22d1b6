//! Promotional / scam message screening.
//!
//! Transaction senders share short codes with promotional blasts. When the
//! spam filter is enabled, messages that hit one of these phrases are
//! dropped before any pattern runs.

use regex::Regex;

use crate::pattern::PatternError;

const SPAM_PHRASES: &[&str] = &[
    "won",
    "winner",
    "lottery",
    "prize",
    "congratulations",
    "lucky",
    "claim",
    "reward",
    "gift",
    "free",
    "bonus",
    "cashback",
    "offer expires",
    "limited time",
    "act now",
    "urgent",
    "verify",
    "suspended",
    "blocked",
    "update",
    "click here",
    "download app",
    "install now",
    "register",
    "subscribe",
];

/// Compiled spam phrase screen.
///
/// Phrases match on word boundaries, so "Wonderland" does not trip the
/// "won" phrase.
#[derive(Debug)]
pub struct SpamScreen {
    phrases: Regex,
}

impl SpamScreen {
    pub fn new() -> Result<Self, PatternError> {
        let alternation = SPAM_PHRASES.join("|");
        let phrases = Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))
            .map_err(|e| PatternError::InvalidRegex {
                name: "spam_screen".to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { phrases })
    }

    /// True when the text contains a known spam phrase.
    pub fn is_spam(&self, text: &str) -> bool {
        self.phrases.is_match(text)
    }
}
