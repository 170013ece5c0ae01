//! Cookie Preference & Token Manager
//!
//! Reads and writes cookies through a [`CookieStore`], persists consent
//! preferences, gates analytics and marketing cookies on the live consent
//! state, and stores secure tokens.

use std::collections::BTreeMap;
use std::sync::Arc;

use kernel::clock::SharedClock;
use platform::cookie::{
    CookieOptions, SameSite, build_delete_cookie, decode_component, find_cookie,
    parse_cookie_header,
};

use crate::application::config::ConsentConfig;
use crate::domain::category::{CategoryInfo, ConsentCategory, cookie_categories};
use crate::domain::choice::{ConsentChoice, ConsentState};
use crate::domain::cookie_names::{
    ANALYTICS_BANNER_COOKIE, BANNER_COOKIE_ENABLED, CONSENT_COOKIE, MARKETING_BANNER_COOKIE,
    is_necessary_cookie,
};
use crate::domain::preferences::ConsentPreferences;
use crate::domain::repository::CookieStore;
use crate::error::ConsentResult;

/// Cookie manager bound to one cookie store
pub struct CookieManager<C>
where
    C: CookieStore,
{
    store: Arc<C>,
    clock: SharedClock,
    config: Arc<ConsentConfig>,
}

impl<C> Clone for CookieManager<C>
where
    C: CookieStore,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            clock: self.clock.clone(),
            config: self.config.clone(),
        }
    }
}

impl<C> CookieManager<C>
where
    C: CookieStore,
{
    pub fn new(store: Arc<C>, clock: SharedClock, config: Arc<ConsentConfig>) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    pub fn store(&self) -> &Arc<C> {
        &self.store
    }

    pub fn config(&self) -> &ConsentConfig {
        &self.config
    }

    /// Options for cookies the manager writes on its own behalf
    fn base_options(&self) -> CookieOptions {
        let options = CookieOptions::default().secure(self.config.cookie_secure);
        match &self.config.cookie_domain {
            Some(domain) => options.domain(domain.clone()),
            None => options,
        }
    }

    fn delete_own_cookie(&self, name: &str) {
        self.delete_cookie(name, "/", self.config.cookie_domain.as_deref());
    }

    // ========================================================================
    // Generic cookie access
    // ========================================================================

    pub fn set_cookie(&self, name: &str, value: &str, options: &CookieOptions) {
        let set_cookie = options.build_set_cookie(name, value, self.clock.now_ms());
        self.store.write(&set_cookie);
    }

    /// Decoded value of `name`
    ///
    /// A value that fails to decode is returned as stored.
    pub fn get_cookie(&self, name: &str) -> Option<String> {
        let raw = find_cookie(&self.store.cookie_header(), name)?;
        Some(decode_component(&raw).unwrap_or(raw))
    }

    /// Expire `name` at the epoch
    pub fn delete_cookie(&self, name: &str, path: &str, domain: Option<&str>) {
        self.store.write(&build_delete_cookie(name, path, domain));
    }

    pub fn has_cookie(&self, name: &str) -> bool {
        self.get_cookie(name).is_some()
    }

    /// Every cookie with a non-empty name and value, decoded
    pub fn get_all_cookies(&self) -> BTreeMap<String, String> {
        parse_cookie_header(&self.store.cookie_header())
            .into_iter()
            .filter(|(name, value)| !name.is_empty() && !value.is_empty())
            .map(|(name, value)| {
                (
                    decode_component(&name).unwrap_or(name),
                    decode_component(&value).unwrap_or(value),
                )
            })
            .collect()
    }

    pub fn clear_all_cookies(&self) {
        for name in self.get_all_cookies().keys() {
            self.delete_own_cookie(name);
        }
    }

    /// Cookie that lives until the browser closes
    pub fn set_session_cookie(&self, name: &str, value: &str, options: &CookieOptions) {
        let options = CookieOptions {
            expires: None,
            ..options.clone()
        };
        self.set_cookie(name, value, &options);
    }

    /// Cookie that expires `days` from now
    pub fn set_persistent_cookie(&self, name: &str, value: &str, days: i64, options: &CookieOptions) {
        let options = options.clone().expires_in_days(days);
        self.set_cookie(name, value, &options);
    }

    // ========================================================================
    // Consent
    // ========================================================================

    /// Persist `preferences` (with `necessary` forced on)
    pub fn set_consent_preferences(&self, preferences: ConsentPreferences) {
        let preferences = preferences.normalized();
        self.set_persistent_cookie(
            CONSENT_COOKIE,
            &preferences.to_cookie_value(),
            self.config.consent_days,
            &self.base_options(),
        );
        tracing::info!(
            analytics = preferences.analytics,
            marketing = preferences.marketing,
            functional = preferences.functional,
            "Consent preferences saved"
        );
    }

    /// Stored preferences, with decode and parse failures surfaced
    pub fn try_get_consent_preferences(&self) -> ConsentResult<Option<ConsentPreferences>> {
        let Some(raw) = find_cookie(&self.store.cookie_header(), CONSENT_COOKIE) else {
            return Ok(None);
        };
        let value = decode_component(&raw)?;
        Ok(Some(ConsentPreferences::from_cookie_value(&value)?))
    }

    /// Stored preferences; absent or unreadable counts as no preferences
    pub fn get_consent_preferences(&self) -> Option<ConsentPreferences> {
        match self.try_get_consent_preferences() {
            Ok(preferences) => preferences,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read consent preferences");
                None
            }
        }
    }

    /// Whether a consent cookie exists, readable or not
    pub fn is_consent_given(&self) -> bool {
        self.has_cookie(CONSENT_COOKIE)
    }

    /// A consent cookie that cannot be read counts as necessary-only
    pub fn consent_state(&self) -> ConsentState {
        if !self.is_consent_given() {
            return ConsentState::NoDecision;
        }
        ConsentState::Decided(
            self.get_consent_preferences()
                .unwrap_or_else(ConsentPreferences::reject_all),
        )
    }

    /// Record a banner choice and write the banner cookies it allows
    pub fn apply_choice(&self, choice: ConsentChoice) -> ConsentPreferences {
        let preferences = choice.preferences();
        self.set_consent_preferences(preferences);

        if preferences.analytics {
            self.set_analytics_cookie(ANALYTICS_BANNER_COOKIE, BANNER_COOKIE_ENABLED);
        }
        if preferences.marketing {
            self.set_marketing_cookie(MARKETING_BANNER_COOKIE, BANNER_COOKIE_ENABLED);
        }

        preferences
    }

    /// Delete the consent cookie and every cookie outside the necessary
    /// allow-list; returns the names swept
    pub fn revoke_consent(&self) -> Vec<String> {
        self.delete_own_cookie(CONSENT_COOKIE);

        let removed: Vec<String> = self
            .get_all_cookies()
            .into_keys()
            .filter(|name| !is_necessary_cookie(name))
            .collect();
        for name in &removed {
            self.delete_own_cookie(name);
        }

        tracing::info!(removed = removed.len(), "Consent revoked");
        removed
    }

    pub fn cookie_categories(&self) -> Vec<CategoryInfo> {
        cookie_categories()
    }

    // ========================================================================
    // Consent-gated cookies
    // ========================================================================

    /// Write `name` only if analytics consent is currently granted
    pub fn set_analytics_cookie(&self, name: &str, value: &str) -> bool {
        self.set_gated_cookie(ConsentCategory::Analytics, name, value)
    }

    /// Write `name` only if marketing consent is currently granted
    pub fn set_marketing_cookie(&self, name: &str, value: &str) -> bool {
        self.set_gated_cookie(ConsentCategory::Marketing, name, value)
    }

    fn set_gated_cookie(&self, category: ConsentCategory, name: &str, value: &str) -> bool {
        let allowed = self
            .get_consent_preferences()
            .is_some_and(|preferences| preferences.allows(category));

        if !allowed {
            tracing::debug!(%category, cookie = name, "Cookie skipped without consent");
            return false;
        }

        let options = self
            .base_options()
            .same_site(self.config.tracking_same_site);
        self.set_persistent_cookie(name, value, self.config.tracking_cookie_days, &options);
        true
    }

    // ========================================================================
    // Secure tokens
    // ========================================================================

    /// Store a token in a short-lived `httpOnly; sameSite=strict` cookie
    pub fn set_secure_token(&self, name: &str, token: &str) {
        let options = self
            .base_options()
            .http_only(true)
            .same_site(SameSite::Strict);
        self.set_persistent_cookie(name, token, self.config.secure_token_days, &options);
    }

    pub fn get_secure_token(&self, name: &str) -> Option<String> {
        self.get_cookie(name)
    }
}
