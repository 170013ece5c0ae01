//! User Profile Entity
//!
//! The signed-in user as the rest of the site shows them. One profile is
//! active at a time; the last sign-in wins.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Fallback display name when the email has no local part
pub const DEFAULT_DISPLAY_NAME: &str = "User";

const AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/initials/svg?seed=";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "camelCase")]
#[display("{display_name} <{email}>")]
pub struct UserProfile {
    /// Older persisted records call this field `name`
    #[serde(alias = "name")]
    pub display_name: String,
    pub email: String,
    pub avatar_url: String,
}

impl UserProfile {
    pub fn new(
        display_name: impl Into<String>,
        email: impl Into<String>,
        avatar_url: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
            avatar_url: avatar_url.into(),
        }
    }

    /// Profile for a mock sign-in: the local part of the email as the display
    /// name and an initials avatar seeded with the email
    pub fn from_email(email: &str) -> Self {
        let local_part = email.split('@').next().unwrap_or_default();
        let display_name = if local_part.is_empty() {
            DEFAULT_DISPLAY_NAME
        } else {
            local_part
        };

        Self::new(display_name, email, avatar_url_for(email))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn avatar_url_for(email: &str) -> String {
    format!("{}{}", AVATAR_BASE_URL, urlencoding::encode(email))
}
