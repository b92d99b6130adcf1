//! Mastodon adapter
//!
//! Provides the Mastodon REST API client.

mod client;

pub use client::MastodonClientImpl;
