//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Value records passed through the moderation pipeline
//! - `ports`: Trait definitions for external dependencies
//! - `username`: Mastodon account name normalization

pub mod entities;
pub mod ports;
pub mod username;
