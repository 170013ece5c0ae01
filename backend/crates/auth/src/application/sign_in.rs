//! Sign In Use Case
//!
//! Mock sign-in by email: no password, no server-side account. The email is
//! sanitized and validated, the advisory rate limiter is consulted, and a
//! profile is built from the email.

use std::sync::Arc;

use consent::CookieStore;
use guard::GuardUtilities;
use kernel::storage::KeyValueStore;

use crate::application::config::AuthConfig;
use crate::application::session_store::SessionStore;
use crate::domain::user_profile::UserProfile;
use crate::error::{AuthError, AuthResult};

/// Sign in output
pub struct SignInOutput {
    pub profile: UserProfile,
    /// Session token for cookie
    pub session_token: String,
}

/// Sign in use case
pub struct SignInUseCase {
    guard: Arc<GuardUtilities>,
    config: Arc<AuthConfig>,
}

impl SignInUseCase {
    pub fn new(guard: Arc<GuardUtilities>, config: Arc<AuthConfig>) -> Self {
        Self { guard, config }
    }

    pub fn execute<S, C>(&self, session: &SessionStore<S, C>, email: &str) -> AuthResult<SignInOutput>
    where
        S: KeyValueStore,
        C: CookieStore,
    {
        let email = self.guard.sanitize(email);
        if !self.guard.is_valid_email(&email) {
            return Err(AuthError::InvalidEmail);
        }

        let limit = self.guard.check_rate_limit(
            session.storage(),
            &self.config.sign_in_identifier(&email),
            &self.guard.config().rate_limit,
        );
        if !limit.allowed {
            return Err(AuthError::RateLimited {
                reset_at_ms: limit.reset_at_ms,
            });
        }

        let profile = UserProfile::from_email(&email);
        let session_token = session.sign_in(profile.clone());

        Ok(SignInOutput {
            profile,
            session_token,
        })
    }
}
