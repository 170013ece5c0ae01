//! Consent Choice and State
//!
//! ```text
//! NoDecision --(accept all | reject all | save custom)--> Decided(prefs)
//! Decided    --(revoke)--> NoDecision
//! ```

use crate::domain::preferences::ConsentPreferences;

/// A visitor's answer to the consent banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentChoice {
    AcceptAll,
    RejectAll,
    Custom(ConsentPreferences),
}

impl ConsentChoice {
    /// Preferences to persist for this choice
    pub fn preferences(&self) -> ConsentPreferences {
        match self {
            ConsentChoice::AcceptAll => ConsentPreferences::accept_all(),
            ConsentChoice::RejectAll => ConsentPreferences::reject_all(),
            ConsentChoice::Custom(prefs) => prefs.normalized(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentState {
    /// No consent cookie; the banner should be shown
    NoDecision,
    Decided(ConsentPreferences),
}

impl ConsentState {
    pub fn is_decided(&self) -> bool {
        matches!(self, ConsentState::Decided(_))
    }

    pub fn preferences(&self) -> Option<ConsentPreferences> {
        match self {
            ConsentState::NoDecision => None,
            ConsentState::Decided(prefs) => Some(*prefs),
        }
    }
}
