//! Server Configuration
//!
//! Read from the environment (and `.env`) once at startup. Debug builds
//! start from the development presets of each crate.

use anyhow::{Context, bail};
use auth::AuthConfig;
use axum::http::HeaderValue;
use consent::ConsentConfig;
use guard::{GuardConfig, ObfuscationKey};

const DEFAULT_PORT: u16 = 31113;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

pub struct ApiConfig {
    pub port: u16,
    pub frontend_origins: Vec<HeaderValue>,
    pub guard: GuardConfig,
    pub consent: ConsentConfig,
    pub auth: AuthConfig,
    /// Persisted obfuscation key; a fresh key per process when unset
    pub obfuscation_key: Option<ObfuscationKey>,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(cfg!(debug_assertions), |name| std::env::var(name).ok())
    }

    fn from_lookup(
        development: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let (mut guard, mut consent, auth) = if development {
            (
                GuardConfig::development(),
                ConsentConfig::development(),
                AuthConfig::development(),
            )
        } else {
            (
                GuardConfig::default(),
                ConsentConfig::default(),
                AuthConfig::default(),
            )
        };

        if let Some(raw) = lookup("TESTMIND_ASSUME_HTTPS") {
            guard.assume_https = parse_bool(&raw).context("TESTMIND_ASSUME_HTTPS")?;
        }
        if let Some(raw) = lookup("TESTMIND_COOKIE_SECURE") {
            consent.cookie_secure = parse_bool(&raw).context("TESTMIND_COOKIE_SECURE")?;
        }

        let port = match lookup("API_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("API_PORT is not a port number: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let frontend_origins: Vec<HeaderValue> = lookup("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();

        let obfuscation_key = lookup("TESTMIND_OBFUSCATION_KEY")
            .map(|hex_key| ObfuscationKey::from_hex(hex_key.trim()))
            .transpose()
            .context("TESTMIND_OBFUSCATION_KEY must be 64 hex characters")?;

        Ok(Self {
            port,
            frontend_origins,
            guard,
            consent,
            auth,
            obfuscation_key,
        })
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got {other:?}"),
    }
}
