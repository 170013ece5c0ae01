//! API DTOs (Data Transfer Objects)

use serde::Serialize;

use crate::domain::choice::ConsentState;
use crate::domain::preferences::ConsentPreferences;

/// Response for GET /api/consent and the consent write endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentStatusResponse {
    pub decided: bool,
    pub show_banner: bool,
    pub preferences: Option<ConsentPreferences>,
}

impl From<ConsentState> for ConsentStatusResponse {
    fn from(state: ConsentState) -> Self {
        Self {
            decided: state.is_decided(),
            show_banner: !state.is_decided(),
            preferences: state.preferences(),
        }
    }
}

/// Response for DELETE /api/consent
#[derive(Debug, Clone, Serialize)]
pub struct RevokeResponse {
    pub removed: Vec<String>,
}
