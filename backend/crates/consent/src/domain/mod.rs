//! Domain Layer
//!
//! This layer contains:
//! - Consent preferences, categories, choices and state
//! - Well-known cookie names and the necessary allow-list
//! - The cookie store trait (interface to the browser cookie API)

pub mod category;
pub mod choice;
pub mod cookie_names;
pub mod preferences;
pub mod repository;
