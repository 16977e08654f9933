//! Usage-report data model and the device-activity capability.
//!
//! Reports cross the runtime boundary as JSON, so every type serializes with
//! the boundary's camelCase field names. Reports are owned transiently by the
//! caller; nothing here is cached or persisted.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::availability::Availability;
use crate::error::CapabilityResult;
use crate::settings::ApplicationToken;

/// Usage totals for a single application within one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationUsage {
    pub bundle_identifier: String,
    pub display_name: String,
    /// Total foreground time in seconds.
    pub total_time: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_notifications: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_pickups: Option<u32>,
}

/// Usage totals for an application category within one report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUsage {
    pub identifier: String,
    pub display_name: String,
    /// Total time across the category's applications, in seconds.
    pub total_time: u64,
    pub applications: Vec<ApplicationUsage>,
}

/// Aggregate screen-time report for a date range.
///
/// # Examples
///
/// ```
/// use bridge_traits::usage::UsageReport;
///
/// let report = UsageReport::empty(1_700_000_000, 1_700_086_400);
/// assert_eq!(report.total_screen_time, 0);
/// assert!(report.applications.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    /// Total screen time in seconds.
    pub total_screen_time: u64,
    /// Start of the reporting window, Unix seconds.
    pub start_date: i64,
    /// End of the reporting window, Unix seconds.
    pub end_date: i64,
    pub applications: Vec<ApplicationUsage>,
    pub categories: Vec<CategoryUsage>,
}

impl UsageReport {
    /// Structurally valid zero aggregate for a window.
    ///
    /// This is what a host without a real aggregation pipeline returns.
    pub fn empty(start_date: i64, end_date: i64) -> Self {
        Self {
            total_screen_time: 0,
            start_date,
            end_date,
            applications: Vec::new(),
            categories: Vec::new(),
        }
    }
}

/// Screen-time report scoped to the current local calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayUsageReport {
    /// Total screen time in seconds.
    pub total_screen_time: u64,
    /// First instant of the local day, Unix seconds.
    pub date: i64,
    pub apps: Vec<ApplicationUsage>,
}

/// One installed application as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledApplication {
    pub bundle_identifier: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<ApplicationToken>,
}

/// Handle to the host's device-activity data.
///
/// Real aggregation (walking device activity into a [`UsageReport`]) is an
/// unspecified external capability; the bridge only calls through this seam.
/// Application enumeration likewise requires a user-driven picker on the
/// host, so implementations without one return an empty sequence.
#[async_trait]
pub trait DeviceActivitySource: Send + Sync {
    /// Availability of device-activity data on this host.
    fn availability(&self) -> Availability {
        Availability::Available
    }

    /// Aggregate usage between two Unix timestamps.
    ///
    /// `start_date <= end_date` is not enforced at this layer.
    async fn collect_report(&self, start_date: i64, end_date: i64)
        -> CapabilityResult<UsageReport>;

    /// Ordered sequence of installed applications.
    async fn installed_applications(&self) -> CapabilityResult<Vec<InstalledApplication>>;
}
