//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities, ports, and external systems.

pub mod activity_service;
pub mod admin_service;
pub mod gateway;
pub mod risk_service;
pub mod triage_service;

pub use activity_service::ActivityService;
pub use admin_service::AdminService;
pub use risk_service::RiskEvaluationService;
pub use triage_service::TriageService;
