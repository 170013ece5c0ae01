//! Unit tests for the guard crate

#[cfg(test)]
mod obfuscation_tests {
    use crate::application::config::GuardConfig;
    use crate::application::guard::GuardUtilities;
    use crate::domain::obfuscation_key::{KEY_LEN, ObfuscationKey};
    use crate::error::GuardError;
    use kernel::clock::SystemClock;
    use platform::crypto::{from_base64, to_base64};

    fn guard_with(byte: u8) -> GuardUtilities {
        GuardUtilities::with_key(
            ObfuscationKey::from_bytes([byte; KEY_LEN]),
            SystemClock::shared(),
            GuardConfig::default(),
        )
    }

    #[test]
    fn test_round_trip_within_key_lifetime() {
        let guard = GuardUtilities::new(GuardConfig::default());
        let long = "x".repeat(1_000);
        for plaintext in [
            "",
            "a",
            r#"{"displayName":"ada","email":"ada@x.io","avatarUrl":"https://a"}"#,
            "ünïcödé ✓ テスト",
            long.as_str(),
        ] {
            let blob = guard.obfuscate(plaintext);
            assert_eq!(guard.deobfuscate(&blob).unwrap(), plaintext);
        }
    }

    #[test]
    fn test_obfuscate_is_deterministic_per_key() {
        let guard = guard_with(7);
        assert_eq!(guard.obfuscate("hello"), guard.obfuscate("hello"));
        assert_ne!(guard.obfuscate("hello"), guard_with(8).obfuscate("hello"));
    }

    #[test]
    fn test_blob_hides_plaintext() {
        let guard = GuardUtilities::new(GuardConfig::default());
        let blob = guard.obfuscate("ada@example.com");

        let raw = from_base64(&blob).unwrap();
        assert_eq!(raw.len(), 4 + "ada@example.com".len());
        assert_eq!(&raw[..4], &guard.key_id());
        assert_ne!(&raw[4..], b"ada@example.com");
    }

    #[test]
    fn test_key_rotation_is_detected() {
        let before = guard_with(1);
        let after = guard_with(2);

        let blob = before.obfuscate(r#"{"email":"ada@example.com"}"#);
        assert!(matches!(after.deobfuscate(&blob), Err(GuardError::KeyMismatch)));
        assert_eq!(after.deobfuscate_or_passthrough(&blob), blob);
    }

    #[test]
    fn test_deobfuscate_errors() {
        let guard = guard_with(3);

        assert!(matches!(
            guard.deobfuscate("not base64!"),
            Err(GuardError::Decode(_))
        ));
        assert!(matches!(
            guard.deobfuscate(&to_base64(&[1, 2])),
            Err(GuardError::Truncated)
        ));

        // Correct key id, masked bytes that unmask to invalid UTF-8
        let mut raw = guard.key_id().to_vec();
        raw.push(0xff ^ 3);
        assert!(matches!(
            guard.deobfuscate(&to_base64(&raw)),
            Err(GuardError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn test_passthrough_returns_input_on_failure() {
        let guard = guard_with(4);
        let plain_json = r#"{"displayName":"ada"}"#;
        assert_eq!(guard.deobfuscate_or_passthrough(plain_json), plain_json);
        assert_eq!(
            guard.deobfuscate_or_passthrough(&guard.obfuscate("x")),
            "x"
        );
    }
}

#[cfg(test)]
mod token_tests {
    use crate::application::config::GuardConfig;
    use crate::application::guard::GuardUtilities;
    use std::collections::HashSet;

    #[test]
    fn test_thousand_tokens_are_valid_and_distinct() {
        let guard = GuardUtilities::new(GuardConfig::default());
        let tokens: HashSet<String> = (0..1_000).map(|_| guard.generate_random_token()).collect();

        assert_eq!(tokens.len(), 1_000);
        for token in &tokens {
            assert_eq!(token.len(), 64);
            assert!(guard.is_structurally_valid_token(token));
        }
    }

    #[test]
    fn test_structural_validation() {
        let guard = GuardUtilities::new(GuardConfig::default());
        assert!(guard.is_structurally_valid_token(&"0".repeat(64)));
        assert!(!guard.is_structurally_valid_token(&"0".repeat(63)));
        assert!(!guard.is_structurally_valid_token(&"0".repeat(65)));
        assert!(!guard.is_structurally_valid_token(&"A".repeat(64)));
        assert!(!guard.is_structurally_valid_token(&"g".repeat(64)));
        assert!(!guard.is_structurally_valid_token(""));
    }
}

#[cfg(test)]
mod rate_limit_tests {
    use crate::application::config::{GuardConfig, RateLimitConfig};
    use crate::application::guard::GuardUtilities;
    use crate::domain::obfuscation_key::ObfuscationKey;
    use kernel::clock::ManualClock;
    use kernel::storage::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn test_five_ok_sixth_refused_then_ok_after_window() {
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let guard = GuardUtilities::with_key(
            ObfuscationKey::generate(),
            clock.clone(),
            GuardConfig::default(),
        );
        let storage = MemoryStore::new();

        for _ in 0..5 {
            assert!(guard.within_rate_limit(&storage, "x"));
            clock.advance_ms(1_000);
        }
        assert!(!guard.within_rate_limit(&storage, "x"));

        clock.advance_ms(900_000);
        assert!(guard.within_rate_limit(&storage, "x"));
    }

    #[test]
    fn test_custom_limits() {
        let clock = Arc::new(ManualClock::new(0));
        let guard =
            GuardUtilities::with_key(ObfuscationKey::generate(), clock, GuardConfig::default());
        let storage = MemoryStore::new();
        let strict = RateLimitConfig::new(2, 60);

        assert!(guard.within_rate_limit_with(&storage, "y", &strict));
        let result = guard.check_rate_limit(&storage, "y", &strict);
        assert!(result.allowed);
        assert_eq!(result.remaining, 0);
        assert_eq!(result.reset_at_ms, 60_000);
        assert!(!guard.within_rate_limit_with(&storage, "y", &strict));
    }
}

#[cfg(test)]
mod check_tests {
    use crate::application::config::GuardConfig;
    use crate::application::guard::GuardUtilities;
    use platform::password::PasswordViolation;

    #[test]
    fn test_password_rule_flips() {
        let guard = GuardUtilities::new(GuardConfig::default());
        assert!(guard.check_password_strength("Str0ng!pass").ok);

        let weak = guard.check_password_strength("weak");
        assert!(!weak.ok);
        assert_eq!(weak.violations.len(), 4);
        assert!(!weak.violations.contains(&PasswordViolation::MissingLowercase));
    }

    #[test]
    fn test_input_helpers() {
        let guard = GuardUtilities::new(GuardConfig::default());
        assert_eq!(guard.sanitize(" <b>hi</b>; "), "bhi/b");
        assert!(guard.is_valid_email("ada@example.com"));
        assert!(!guard.is_valid_email("ada@example"));
        assert!(guard.looks_automated("curl-bot/1.0"));
        assert!(guard.is_valid_card_number("4242424242424242"));
    }
}

#[cfg(test)]
mod router_tests {
    use crate::application::config::GuardConfig;
    use crate::application::guard::GuardUtilities;
    use crate::presentation::router::guard_router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> axum::Router {
        guard_router(Arc::new(GuardUtilities::new(GuardConfig::default())))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_status_secure_session() {
        let token = "ab".repeat(32);
        let request = Request::builder()
            .uri("/status")
            .header("x-forwarded-proto", "https")
            .header(header::COOKIE, format!("session_token={token}"))
            .header(header::USER_AGENT, "Mozilla/5.0")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["isSecure"], true);
        assert_eq!(json["hasValidSession"], true);
        assert_eq!(json["level"], "secure");
        assert_eq!(json["showBanner"], false);
    }

    #[tokio::test]
    async fn test_status_bot_is_critical() {
        let request = Request::builder()
            .uri("/status")
            .header(header::USER_AGENT, "SuperCrawler/3.0")
            .body(Body::empty())
            .unwrap();

        let json = body_json(app().oneshot(request).await.unwrap()).await;
        assert_eq!(json["suspiciousActivity"], true);
        assert_eq!(json["level"], "critical");
        assert_eq!(
            json["headline"],
            "Security Alert: Suspicious Activity Detected"
        );
        assert_eq!(json["recommendations"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_password_strength_endpoint() {
        let response = app()
            .oneshot(post_json("/password-strength", r#"{"password":"abcdefgh"}"#))
            .await
            .unwrap();
        let json = body_json(response).await;

        assert_eq!(json["ok"], false);
        assert_eq!(
            json["violations"][0],
            "Password must contain at least one uppercase letter"
        );
    }

    #[tokio::test]
    async fn test_email_and_sanitize_endpoints() {
        let json = body_json(
            app()
                .oneshot(post_json("/email", r#"{"email":"ada@example.com"}"#))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(json["valid"], true);

        let json = body_json(
            app()
                .oneshot(post_json("/sanitize", r#"{"input":" <i>x</i> "}"#))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(json["sanitized"], "ix/i");
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let response = app()
            .oneshot(post_json("/email", "{"))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(GuardError, StatusCode)> = vec![
            (GuardError::Truncated, StatusCode::UNPROCESSABLE_ENTITY),
            (GuardError::KeyMismatch, StatusCode::UNPROCESSABLE_ENTITY),
            (
                GuardError::InvalidKey("short".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.into_response().status(), expected_status);
        }
    }
}
