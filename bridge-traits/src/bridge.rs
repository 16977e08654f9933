//! The bridge operation surface.
//!
//! [`ScreenTimeBridge`] is the seam between calling code and a platform
//! implementation. The device-backed implementation and the
//! unsupported-platform fallback both implement it, so callers are written
//! once against this trait and wired with whichever implementation fits the
//! running platform. Implementations are substituted at this seam, never
//! composed.

use async_trait::async_trait;

use crate::authorization::AuthorizationStatus;
use crate::error::Result;
use crate::settings::{BundleId, TimeLimit};
use crate::usage::{InstalledApplication, TodayUsageReport, UsageReport};

/// Asynchronous call surface of the Screen Time capability.
///
/// Every privileged operation re-checks the current authorization status and
/// fails with [`ScreenTimeError::NotAuthorized`] before touching the host
/// when it is not approved. Each call is a single logical host operation; no
/// batching, no caching of host-owned state.
///
/// [`ScreenTimeError::NotAuthorized`]: crate::error::ScreenTimeError::NotAuthorized
#[async_trait]
pub trait ScreenTimeBridge: Send + Sync {
    /// Current authorization status. Synchronous and non-failing.
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Run the host's interactive consent flow.
    ///
    /// Fails with `AuthorizationDenied`, `AuthorizationNotDetermined`, or
    /// `Authorization` — callers branch on the distinction.
    async fn request_authorization(&self) -> Result<()>;

    /// Aggregate screen-time report between two Unix timestamps.
    ///
    /// `start_date <= end_date` is not enforced by this layer; the host may
    /// reject inverted windows.
    async fn screen_time_report(&self, start_date: i64, end_date: i64) -> Result<UsageReport>;

    /// Report scoped from the start of the current local calendar day to now.
    ///
    /// The day boundary uses the host-local calendar, not UTC.
    async fn today_screen_time(&self) -> Result<TodayUsageReport>;

    /// Set a time budget for an application.
    ///
    /// The budget is written to the managed-settings store as a true
    /// per-application limit; the blocked-applications set is not touched.
    /// (Some host implementations historically blocked the application
    /// outright under this operation's name — this bridge does not.)
    async fn set_app_time_limit(&self, bundle_id: &BundleId, limit: TimeLimit) -> Result<()>;

    /// Remove an application's time budget.
    ///
    /// Clears the limit entry and removes the application's token from the
    /// blocked set if present. Removing an absent token is a no-op, not an
    /// error.
    async fn remove_app_time_limit(&self, bundle_id: &BundleId) -> Result<()>;

    /// Add an application to the blocked set.
    ///
    /// Idempotent: blocking an already-blocked application succeeds without
    /// duplication.
    async fn block_application(&self, bundle_id: &BundleId) -> Result<()>;

    /// Remove an application from the blocked set.
    ///
    /// Idempotent; unblocking a never-blocked application is a no-op.
    async fn unblock_application(&self, bundle_id: &BundleId) -> Result<()>;

    /// Ordered sequence of installed applications.
    ///
    /// Hosts without a user-driven picker return an empty sequence.
    async fn installed_applications(&self) -> Result<Vec<InstalledApplication>>;
}
