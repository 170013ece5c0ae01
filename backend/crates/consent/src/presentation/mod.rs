//! Presentation Layer
//!
//! HTTP handlers and DTOs for the API.

pub mod cookies;
pub mod dto;
pub mod handlers;
pub mod router;
