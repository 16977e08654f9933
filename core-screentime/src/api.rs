//! High-level Screen Time facade.
//!
//! `ScreenTimeApi` wraps whichever [`ScreenTimeBridge`] implementation fits
//! the running platform and adds the derived conveniences: the authorization
//! boolean and the trailing-week / month-to-date report windows. All window
//! math is pure computation on the injected clock; the facade performs no
//! native calls of its own and holds no state.

use std::sync::Arc;

use tracing::debug;

use bridge_traits::authorization::AuthorizationStatus;
use bridge_traits::bridge::ScreenTimeBridge;
use bridge_traits::error::Result;
use bridge_traits::settings::{BundleId, TimeLimit};
use bridge_traits::time::{self, Clock, SystemClock, WEEK_SECONDS};
use bridge_traits::usage::{InstalledApplication, TodayUsageReport, UsageReport};

/// Facade over a [`ScreenTimeBridge`] implementation.
///
/// # Examples
///
/// ```
/// use bridge_device::{DeviceBridgeConfig, DeviceScreenTimeBridge};
/// use bridge_device::{InMemorySettingsStore, SimulatedAuthorization};
/// use core_screentime::ScreenTimeApi;
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> bridge_traits::error::Result<()> {
/// let config = DeviceBridgeConfig::builder()
///     .authorization(Arc::new(SimulatedAuthorization::undetermined()))
///     .settings_store(Arc::new(InMemorySettingsStore::new()))
///     .build()?;
/// let api = ScreenTimeApi::new(Arc::new(DeviceScreenTimeBridge::connect(config)?));
///
/// if !api.is_authorized() {
///     api.request_authorization().await?;
/// }
/// let report = api.weekly_screen_time().await?;
/// assert_eq!(report.end_date - report.start_date, 7 * 24 * 60 * 60);
/// # Ok(())
/// # }
/// ```
///
/// On a platform without the capability, wire the fallback at the same seam:
///
/// ```
/// use bridge_unsupported::UnsupportedScreenTimeBridge;
/// use core_screentime::ScreenTimeApi;
/// use std::sync::Arc;
///
/// let api = ScreenTimeApi::new(Arc::new(UnsupportedScreenTimeBridge::new()));
/// assert!(!api.is_authorized());
/// ```
#[derive(Clone)]
pub struct ScreenTimeApi {
    bridge: Arc<dyn ScreenTimeBridge>,
    clock: Arc<dyn Clock>,
}

impl ScreenTimeApi {
    /// Wrap a bridge, using the system clock for window computations.
    pub fn new(bridge: Arc<dyn ScreenTimeBridge>) -> Self {
        Self::with_clock(bridge, Arc::new(SystemClock))
    }

    /// Wrap a bridge with an explicit clock.
    pub fn with_clock(bridge: Arc<dyn ScreenTimeBridge>, clock: Arc<dyn Clock>) -> Self {
        Self { bridge, clock }
    }

    /// Run the host's interactive consent flow.
    pub async fn request_authorization(&self) -> Result<()> {
        self.bridge.request_authorization().await
    }

    /// Current authorization status. Synchronous and non-failing.
    pub fn authorization_status(&self) -> AuthorizationStatus {
        self.bridge.authorization_status()
    }

    /// Whether Screen Time access is currently approved.
    pub fn is_authorized(&self) -> bool {
        self.bridge.authorization_status().is_approved()
    }

    /// Screen-time report between two Unix timestamps.
    pub async fn screen_time_report(&self, start_date: i64, end_date: i64) -> Result<UsageReport> {
        self.bridge.screen_time_report(start_date, end_date).await
    }

    /// Report scoped to the current local calendar day.
    pub async fn today_screen_time(&self) -> Result<TodayUsageReport> {
        self.bridge.today_screen_time().await
    }

    /// Report over the fixed trailing seven-day window ending now.
    ///
    /// The window is `7 * 24` hours long, not aligned to calendar weeks.
    pub async fn weekly_screen_time(&self) -> Result<UsageReport> {
        let end_date = self.clock.unix_timestamp();
        let start_date = end_date - WEEK_SECONDS;
        debug!(start_date, end_date, "computed trailing-week window");
        self.bridge.screen_time_report(start_date, end_date).await
    }

    /// Report from the first instant of the current local calendar month to
    /// now.
    pub async fn monthly_screen_time(&self) -> Result<UsageReport> {
        let now = self.clock.now();
        let start_date = time::local_month_start(now).timestamp();
        let end_date = now.timestamp();
        debug!(start_date, end_date, "computed month-to-date window");
        self.bridge.screen_time_report(start_date, end_date).await
    }

    /// Set a time budget for an application.
    pub async fn set_app_time_limit(&self, bundle_id: &BundleId, limit: TimeLimit) -> Result<()> {
        self.bridge.set_app_time_limit(bundle_id, limit).await
    }

    /// Remove an application's time budget.
    pub async fn remove_app_time_limit(&self, bundle_id: &BundleId) -> Result<()> {
        self.bridge.remove_app_time_limit(bundle_id).await
    }

    /// Add an application to the blocked set.
    pub async fn block_application(&self, bundle_id: &BundleId) -> Result<()> {
        self.bridge.block_application(bundle_id).await
    }

    /// Remove an application from the blocked set.
    pub async fn unblock_application(&self, bundle_id: &BundleId) -> Result<()> {
        self.bridge.unblock_application(bundle_id).await
    }

    /// Ordered sequence of installed applications.
    pub async fn installed_applications(&self) -> Result<Vec<InstalledApplication>> {
        self.bridge.installed_applications().await
    }
}
