//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod admin;
pub mod extract;
pub mod reports;
pub mod schema;
pub mod users;

pub use admin::{instances, measures, peers, reports_summary};
pub use reports::submit_report;
pub use schema::{capabilities, functions};
pub use users::{
    activity, activity_auto, evaluate, evaluate_auto, get_posts, get_profile,
};
