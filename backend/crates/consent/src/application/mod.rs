//! Application Layer - Use Cases
//!
//! The cookie preference and token manager.

pub mod config;
pub mod cookie_manager;
