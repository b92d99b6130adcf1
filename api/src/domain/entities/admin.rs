//! Admin/federation records
//!
//! Shapes returned by the read-through admin endpoints.

use serde::{Deserialize, Deserializer, Serialize};

/// Federated instance with basic metrics
///
/// Instances report missing metrics as either absent keys or `null`; both
/// fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceInfo {
    pub domain: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub users_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub statuses_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub software: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default = "unknown_uptime", deserialize_with = "null_as_unknown")]
    pub uptime: String,
}

fn unknown_uptime() -> String {
    "unknown".to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unknown_uptime))
}

/// Admin report as returned by the instance, only the fields we aggregate over
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdminReport {
    #[serde(default, deserialize_with = "null_as_default")]
    pub resolved: bool,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Aggregate view over the instance's report queue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub open_reports: usize,
    pub resolved_reports: usize,
    pub spam_related: usize,
    pub harassment_related: usize,
    pub latest_report_ts: Option<String>,
}

impl ReportSummary {
    pub fn from_reports(reports: &[AdminReport]) -> Self {
        let category_contains = |report: &AdminReport, needle: &str| {
            report
                .category
                .as_deref()
                .is_some_and(|c| c.contains(needle))
        };

        Self {
            open_reports: reports.iter().filter(|r| !r.resolved).count(),
            resolved_reports: reports.iter().filter(|r| r.resolved).count(),
            spam_related: reports
                .iter()
                .filter(|r| category_contains(r, "spam"))
                .count(),
            harassment_related: reports
                .iter()
                .filter(|r| category_contains(r, "harassment"))
                .count(),
            // RFC 3339 strings from a single instance order lexicographically
            latest_report_ts: reports
                .iter()
                .filter_map(|r| r.created_at.as_deref())
                .filter(|ts| !ts.is_empty())
                .max()
                .map(str::to_string),
        }
    }
}
