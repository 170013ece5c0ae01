//! Session/Identity Store
//!
//! Holds the signed-in profile in memory and persists it, obfuscated, in
//! client storage. Signing in also mints the session token cookie and, when
//! analytics consent allows it, marks the session active.
//!
//! Storage and cookie failures never reach the caller of `sign_in`,
//! `sign_out` or `restore_on_load`; they are logged instead.

use std::sync::{Arc, Mutex, MutexGuard};

use consent::{CookieManager, CookieStore};
use guard::GuardUtilities;
use kernel::storage::KeyValueStore;

use crate::application::config::AuthConfig;
use crate::domain::user_profile::UserProfile;
use crate::error::AuthResult;
use crate::infra::profile_vault::ProfileVault;

/// Value of the analytics cookie marking a signed-in session
pub const ACTIVE_SESSION_VALUE: &str = "active";

pub struct SessionStore<S, C>
where
    S: KeyValueStore,
    C: CookieStore,
{
    current: Mutex<Option<UserProfile>>,
    vault: ProfileVault<S>,
    cookies: CookieManager<C>,
    guard: Arc<GuardUtilities>,
    config: Arc<AuthConfig>,
}

impl<S, C> SessionStore<S, C>
where
    S: KeyValueStore,
    C: CookieStore,
{
    pub fn new(
        storage: Arc<S>,
        cookies: CookieManager<C>,
        guard: Arc<GuardUtilities>,
        config: Arc<AuthConfig>,
    ) -> Self {
        let vault = ProfileVault::new(storage, guard.clone(), config.profile_storage_key.clone());
        Self {
            current: Mutex::new(None),
            vault,
            cookies,
            guard,
            config,
        }
    }

    /// Client storage backing this store
    pub fn storage(&self) -> &S {
        self.vault.storage()
    }

    pub fn cookies(&self) -> &CookieManager<C> {
        &self.cookies
    }

    /// Make `profile` the signed-in user and return the new session token
    pub fn sign_in(&self, profile: UserProfile) -> String {
        if let Err(e) = self.vault.save(&profile) {
            tracing::warn!(error = %e, "Failed to persist profile, continuing in memory");
        }
        let email = profile.email.clone();
        *self.lock() = Some(profile);

        let token = self.guard.generate_random_token();
        self.cookies
            .set_secure_token(&self.config.session_cookie_name, &token);
        self.cookies
            .set_analytics_cookie(&self.config.active_session_cookie_name, ACTIVE_SESSION_VALUE);

        tracing::info!(email = %email, "User signed in");
        token
    }

    pub fn sign_out(&self) {
        *self.lock() = None;
        self.vault.clear();

        let domain = self.cookies.config().cookie_domain.clone();
        for name in [
            &self.config.session_cookie_name,
            &self.config.active_session_cookie_name,
        ] {
            self.cookies.delete_cookie(name, "/", domain.as_deref());
        }

        tracing::info!("User signed out");
    }

    /// Load the persisted profile into memory
    ///
    /// An unreadable record leaves the store signed out.
    pub fn restore_on_load(&self) -> Option<UserProfile> {
        match self.try_restore() {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(error = %e, "Stored profile could not be restored");
                None
            }
        }
    }

    pub fn try_restore(&self) -> AuthResult<Option<UserProfile>> {
        let profile = self.vault.load()?;
        if profile.is_some() {
            *self.lock() = profile.clone();
        }
        Ok(profile)
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.lock().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Option<UserProfile>> {
        self.current.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Session store mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
