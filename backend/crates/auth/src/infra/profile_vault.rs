//! Obfuscated Profile Storage
//!
//! Keeps the signed-in profile in client storage as an obfuscated JSON blob.
//! Records written before obfuscation (plain JSON) are still readable.

use std::sync::Arc;

use guard::GuardUtilities;
use kernel::storage::KeyValueStore;

use crate::domain::user_profile::UserProfile;
use crate::error::{AuthError, AuthResult};

pub struct ProfileVault<S>
where
    S: KeyValueStore,
{
    storage: Arc<S>,
    guard: Arc<GuardUtilities>,
    key: String,
}

impl<S> ProfileVault<S>
where
    S: KeyValueStore,
{
    pub fn new(storage: Arc<S>, guard: Arc<GuardUtilities>, key: impl Into<String>) -> Self {
        Self {
            storage,
            guard,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    pub fn save(&self, profile: &UserProfile) -> AuthResult<()> {
        let blob = self.guard.obfuscate(&profile.to_json()?);
        self.storage.set_item(&self.key, &blob)?;
        Ok(())
    }

    /// Read the stored profile
    ///
    /// Tries the obfuscated form first, then plain JSON. When both fail the
    /// error from the obfuscated form is returned.
    pub fn load(&self) -> AuthResult<Option<UserProfile>> {
        let Some(raw) = self.storage.get_item(&self.key) else {
            return Ok(None);
        };

        let obfuscated_err = match self.guard.deobfuscate(&raw) {
            Ok(json) => match UserProfile::from_json(&json) {
                Ok(profile) => return Ok(Some(profile)),
                Err(e) => AuthError::from(e),
            },
            Err(e) => AuthError::from(e),
        };

        match UserProfile::from_json(&raw) {
            Ok(profile) => {
                tracing::debug!(error = %obfuscated_err, "Read plain JSON profile record");
                Ok(Some(profile))
            }
            Err(_) => Err(obfuscated_err),
        }
    }

    pub fn clear(&self) {
        self.storage.remove_item(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guard::GuardConfig;
    use kernel::storage::MemoryStore;

    fn vault() -> ProfileVault<MemoryStore> {
        ProfileVault::new(
            Arc::new(MemoryStore::new()),
            Arc::new(GuardUtilities::new(GuardConfig::default())),
            "tm_user",
        )
    }

    #[test]
    fn test_save_load_clear() {
        let vault = vault();
        let profile = UserProfile::from_email("ada@example.com");

        vault.save(&profile).unwrap();
        let stored = vault.storage().get_item("tm_user").unwrap();
        assert!(!stored.contains("ada@example.com"));
        assert_eq!(vault.load().unwrap(), Some(profile));

        vault.clear();
        assert_eq!(vault.load().unwrap(), None);
    }

    #[test]
    fn test_plain_json_record_is_read() {
        let vault = vault();
        vault
            .storage()
            .set_item(
                "tm_user",
                r#"{"name":"Ada","email":"ada@example.com","avatarUrl":"https://a"}"#,
            )
            .unwrap();

        let profile = vault.load().unwrap().unwrap();
        assert_eq!(profile.display_name, "Ada");
    }

    #[test]
    fn test_garbage_record_is_an_error() {
        let vault = vault();
        vault.storage().set_item("tm_user", "garbage").unwrap();
        assert!(matches!(vault.load(), Err(AuthError::Obfuscation(_))));
    }

    #[test]
    fn test_save_over_quota_fails() {
        let vault = ProfileVault::new(
            Arc::new(MemoryStore::with_quota(8)),
            Arc::new(GuardUtilities::new(GuardConfig::default())),
            "tm_user",
        );
        let err = vault.save(&UserProfile::from_email("ada@example.com")).unwrap_err();
        assert!(matches!(err, AuthError::Storage(_)));
    }
}
