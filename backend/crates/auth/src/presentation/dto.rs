//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::user_profile::UserProfile;

/// Sign in request
#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub email: String,
}

/// Profile response for sign-in and GET /me
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub display_name: String,
    pub email: String,
    pub avatar_url: String,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            display_name: profile.display_name,
            email: profile.email,
            avatar_url: profile.avatar_url,
        }
    }
}
