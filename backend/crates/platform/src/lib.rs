//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random tokens, SHA-256, Base64, XOR pad)
//! - Cookie wire format (Set-Cookie strings, Cookie header parsing, HTTP dates)
//! - Input checks (sanitization, email format, card numbers)
//! - Password strength rules
//! - Client identification (user-agent heuristics, HTTPS detection)
//! - Sliding-window rate limiting over client-side storage

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod input;
pub mod password;
pub mod rate_limit;
