//! Consent Preferences
//!
//! One flag per cookie category. `necessary` is forced to `true` whenever
//! preferences are written or read back; the user cannot opt out of it.

use serde::{Deserialize, Serialize};

use crate::domain::category::ConsentCategory;

/// Per-category consent flags
///
/// Missing fields deserialize as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsentPreferences {
    pub necessary: bool,
    pub analytics: bool,
    pub marketing: bool,
    pub functional: bool,
}

impl Default for ConsentPreferences {
    fn default() -> Self {
        Self::reject_all()
    }
}

impl ConsentPreferences {
    pub const fn new(analytics: bool, marketing: bool, functional: bool) -> Self {
        Self {
            necessary: true,
            analytics,
            marketing,
            functional,
        }
    }

    /// Every category allowed
    pub const fn accept_all() -> Self {
        Self::new(true, true, true)
    }

    /// Necessary cookies only
    pub const fn reject_all() -> Self {
        Self::new(false, false, false)
    }

    /// Same flags with `necessary` forced on
    pub fn normalized(self) -> Self {
        Self {
            necessary: true,
            ..self
        }
    }

    pub fn allows(&self, category: ConsentCategory) -> bool {
        match category {
            ConsentCategory::Necessary => true,
            ConsentCategory::Analytics => self.analytics,
            ConsentCategory::Marketing => self.marketing,
            ConsentCategory::Functional => self.functional,
        }
    }

    /// Cookie value: compact JSON with the keys in declaration order
    pub fn to_cookie_value(&self) -> String {
        format!(
            r#"{{"necessary":{},"analytics":{},"marketing":{},"functional":{}}}"#,
            self.necessary, self.analytics, self.marketing, self.functional
        )
    }

    /// Parse a cookie value and normalize it
    pub fn from_cookie_value(value: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(value).map(Self::normalized)
    }
}
