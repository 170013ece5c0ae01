//! Unit tests for the auth crate

#[cfg(test)]
mod support {
    use crate::application::config::AuthConfig;
    use crate::application::session_store::SessionStore;
    use consent::{ConsentConfig, ConsentPreferences, CookieManager, MemoryCookieJar};
    use guard::{GuardConfig, GuardUtilities, ObfuscationKey};
    use kernel::clock::ManualClock;
    use kernel::storage::MemoryStore;
    use std::sync::Arc;

    pub const NOW_MS: i64 = 1_700_000_000_000;

    pub struct Browser {
        pub clock: Arc<ManualClock>,
        pub storage: Arc<MemoryStore>,
        pub guard: Arc<GuardUtilities>,
    }

    impl Browser {
        pub fn new() -> Self {
            Self::with_storage(Arc::new(MemoryStore::new()))
        }

        pub fn with_storage(storage: Arc<MemoryStore>) -> Self {
            let clock = Arc::new(ManualClock::new(NOW_MS));
            let guard = GuardUtilities::with_key(
                ObfuscationKey::generate(),
                clock.clone(),
                GuardConfig::default(),
            );
            Self {
                clock,
                storage,
                guard: Arc::new(guard),
            }
        }

        pub fn cookies(&self) -> CookieManager<MemoryCookieJar> {
            CookieManager::new(
                Arc::new(MemoryCookieJar::new(self.clock.clone())),
                self.clock.clone(),
                Arc::new(ConsentConfig::default()),
            )
        }

        pub fn session(
            &self,
            cookies: CookieManager<MemoryCookieJar>,
        ) -> SessionStore<MemoryStore, MemoryCookieJar> {
            SessionStore::new(
                self.storage.clone(),
                cookies,
                self.guard.clone(),
                Arc::new(AuthConfig::default()),
            )
        }

        pub fn session_with_analytics(&self) -> SessionStore<MemoryStore, MemoryCookieJar> {
            let cookies = self.cookies();
            cookies.set_consent_preferences(ConsentPreferences::new(true, false, false));
            self.session(cookies)
        }
    }
}

#[cfg(test)]
mod session_tests {
    use super::support::*;
    use crate::domain::user_profile::UserProfile;
    use crate::error::AuthError;
    use guard::GuardError;
    use kernel::storage::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    #[test]
    fn test_sign_in_restore_sign_out_restore() {
        let browser = Browser::new();
        let cookies = browser.cookies();
        let session = browser.session(cookies.clone());
        let ada = UserProfile::from_email("ada@example.com");

        let token = session.sign_in(ada.clone());
        assert!(browser.guard.is_structurally_valid_token(&token));
        assert_eq!(cookies.get_secure_token("session_token"), Some(token));
        assert_eq!(session.current_user(), Some(ada.clone()));

        // Page reload: fresh in-memory state, same client storage
        let reloaded = browser.session(cookies.clone());
        assert!(!reloaded.is_signed_in());
        assert_eq!(reloaded.restore_on_load(), Some(ada));
        assert!(reloaded.is_signed_in());

        reloaded.sign_out();
        assert!(!reloaded.is_signed_in());
        assert_eq!(browser.storage.get_item("tm_user"), None);
        assert!(!cookies.has_cookie("session_token"));

        assert_eq!(browser.session(cookies).restore_on_load(), None);
    }

    #[test]
    fn test_profile_is_stored_obfuscated() {
        let browser = Browser::new();
        browser
            .session(browser.cookies())
            .sign_in(UserProfile::from_email("ada@example.com"));

        let stored = browser.storage.get_item("tm_user").unwrap();
        assert!(UserProfile::from_json(&stored).is_err());
        let json = browser.guard.deobfuscate(&stored).unwrap();
        assert!(json.contains(r#""displayName":"ada""#));
    }

    #[test]
    fn test_active_session_cookie_needs_analytics_consent() {
        let browser = Browser::new();

        let without = browser.session(browser.cookies());
        without.sign_in(UserProfile::from_email("ada@example.com"));
        assert!(!without.cookies().has_cookie("user_session"));

        let with = browser.session_with_analytics();
        with.sign_in(UserProfile::from_email("ada@example.com"));
        assert_eq!(
            with.cookies().get_cookie("user_session"),
            Some("active".to_string())
        );

        with.sign_out();
        assert!(!with.cookies().has_cookie("user_session"));
        assert!(with.cookies().is_consent_given());
    }

    #[test]
    fn test_last_sign_in_wins() {
        let browser = Browser::new();
        let session = browser.session(browser.cookies());

        session.sign_in(UserProfile::from_email("ada@example.com"));
        session.sign_in(UserProfile::from_email("grace@example.com"));

        let restored = browser.session(browser.cookies()).restore_on_load().unwrap();
        assert_eq!(restored.email, "grace@example.com");
    }

    #[test]
    fn test_restore_plain_json_record() {
        let browser = Browser::new();
        browser
            .storage
            .set_item(
                "tm_user",
                r#"{"name":"Ada","email":"ada@example.com","avatarUrl":"https://a"}"#,
            )
            .unwrap();

        let restored = browser.session(browser.cookies()).restore_on_load().unwrap();
        assert_eq!(restored.display_name, "Ada");
    }

    #[test]
    fn test_record_from_previous_key_is_not_restored() {
        let storage = Arc::new(MemoryStore::new());
        let before = Browser::with_storage(storage.clone());
        before
            .session(before.cookies())
            .sign_in(UserProfile::from_email("ada@example.com"));

        // New process, new key
        let after = Browser::with_storage(storage);
        let session = after.session(after.cookies());

        assert!(matches!(
            session.try_restore(),
            Err(AuthError::Obfuscation(GuardError::KeyMismatch))
        ));
        assert_eq!(session.restore_on_load(), None);
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_storage_full_still_signs_in() {
        let browser = Browser::with_storage(Arc::new(MemoryStore::with_quota(8)));
        let cookies = browser.cookies();
        let session = browser.session(cookies.clone());

        let token = session.sign_in(UserProfile::from_email("ada@example.com"));

        assert!(session.is_signed_in());
        assert_eq!(browser.storage.get_item("tm_user"), None);
        assert_eq!(cookies.get_secure_token("session_token"), Some(token));
    }
}

#[cfg(test)]
mod sign_in_tests {
    use super::support::*;
    use crate::application::config::AuthConfig;
    use crate::application::sign_in::SignInUseCase;
    use crate::error::AuthError;
    use kernel::storage::KeyValueStore;
    use std::sync::Arc;

    fn use_case(browser: &Browser) -> SignInUseCase {
        SignInUseCase::new(browser.guard.clone(), Arc::new(AuthConfig::default()))
    }

    #[test]
    fn test_sign_in_builds_profile_from_email() {
        let browser = Browser::new();
        let session = browser.session(browser.cookies());

        let output = use_case(&browser)
            .execute(&session, "  <ada@example.com>  ")
            .unwrap();

        assert_eq!(output.profile.email, "ada@example.com");
        assert_eq!(output.profile.display_name, "ada");
        assert_eq!(output.session_token.len(), 64);
        assert!(
            browser
                .storage
                .get_item("rate_limit_sign_in_ada@example.com")
                .is_some()
        );
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let browser = Browser::new();
        let session = browser.session(browser.cookies());

        let result = use_case(&browser).execute(&session, "not-an-email");
        assert!(matches!(result, Err(AuthError::InvalidEmail)));
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_sixth_attempt_is_rate_limited() {
        let browser = Browser::new();
        let session = browser.session(browser.cookies());
        let sign_in = use_case(&browser);

        for _ in 0..5 {
            assert!(sign_in.execute(&session, "ada@example.com").is_ok());
            browser.clock.advance_ms(1_000);
        }

        match sign_in.execute(&session, "ada@example.com") {
            Err(AuthError::RateLimited { reset_at_ms }) => {
                assert_eq!(reset_at_ms, NOW_MS + 900_000);
            }
            _ => panic!("expected the sixth attempt to be refused"),
        }

        // Another address has its own budget
        assert!(sign_in.execute(&session, "grace@example.com").is_ok());

        browser.clock.advance_ms(900_000);
        assert!(sign_in.execute(&session, "ada@example.com").is_ok());
    }
}

#[cfg(test)]
mod router_tests {
    use crate::application::config::AuthConfig;
    use crate::presentation::router::auth_router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use consent::{ConsentConfig, ConsentPreferences};
    use guard::{GuardConfig, GuardUtilities};
    use platform::cookie::encode_component;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> axum::Router {
        auth_router(
            Arc::new(GuardUtilities::new(GuardConfig::default())),
            ConsentConfig::default(),
            AuthConfig::default(),
        )
    }

    fn set_cookies(response: &Response) -> Vec<String> {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    /// `name=value` pair from the first Set-Cookie header for `name`
    fn cookie_pair(set_cookies: &[String], name: &str) -> String {
        set_cookies
            .iter()
            .find(|c| c.starts_with(&format!("{name}=")))
            .and_then(|c| c.split(';').next())
            .unwrap()
            .to_string()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn sign_in_request(email: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/sign-in")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
            .body(Body::from(format!(r#"{{"email":"{email}"}}"#)))
            .unwrap()
    }

    fn request(method: &str, uri: &str, cookie: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_sign_in_me_sign_out() {
        let app = app();

        let response = app
            .clone()
            .oneshot(sign_in_request("ada@example.com", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let written = set_cookies(&response);
        assert_eq!(written.len(), 2);
        assert!(written[0].starts_with("security_token="));
        assert!(written[1].starts_with("session_token="));
        assert!(written[1].contains("; secure; httpOnly; sameSite=strict"));

        let json = body_json(response).await;
        assert_eq!(json["displayName"], "ada");
        assert_eq!(json["email"], "ada@example.com");

        let browser = cookie_pair(&written, "security_token");
        let response = app
            .clone()
            .oneshot(request("GET", "/me", &browser))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookies(&response).is_empty());
        assert_eq!(body_json(response).await["displayName"], "ada");

        let response = app
            .clone()
            .oneshot(request("POST", "/sign-out", &browser))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let written = set_cookies(&response);
        assert!(written[0].starts_with("session_token=; expires=Thu, 01 Jan 1970 00:00:00 GMT"));

        let response = app.oneshot(request("GET", "/me", &browser)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_browsers_are_isolated() {
        let app = app();
        let response = app
            .clone()
            .oneshot(sign_in_request("ada@example.com", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let stranger = format!("security_token={}", "0".repeat(64));
        let response = app.oneshot(request("GET", "/me", &stranger)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_sign_in_with_analytics_consent_marks_session_active() {
        let consent = format!(
            "cookie_consent={}",
            encode_component(&ConsentPreferences::accept_all().to_cookie_value())
        );

        let response = app()
            .oneshot(sign_in_request("ada@example.com", Some(&consent)))
            .await
            .unwrap();

        let written = set_cookies(&response);
        assert_eq!(written.len(), 3);
        assert!(written[2].starts_with("user_session=active;"));
        assert!(written[2].ends_with("sameSite=lax"));
    }

    #[tokio::test]
    async fn test_invalid_email_is_bad_request() {
        let response = app()
            .oneshot(sign_in_request("nope", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["title"], "Invalid Input");
    }
}
