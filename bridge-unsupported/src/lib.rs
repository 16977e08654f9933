//! # Unsupported-Platform Screen Time Bridge
//!
//! Drop-in substitute for the device bridge on platforms without the
//! parental-control capability (web, unsupported OS versions). Implements the
//! identical [`ScreenTimeBridge`](bridge_traits::bridge::ScreenTimeBridge)
//! surface so calling code is written once and runs unmodified; every
//! operation deterministically fails with one fixed message instead of
//! hanging or surfacing an opaque low-level error.
//!
//! Swapped in at the same seam as the device bridge, never composed with it.

use async_trait::async_trait;
use tracing::debug;

use bridge_traits::authorization::AuthorizationStatus;
use bridge_traits::bridge::ScreenTimeBridge;
use bridge_traits::error::{Result, ScreenTimeError};
use bridge_traits::settings::{BundleId, TimeLimit};
use bridge_traits::usage::{InstalledApplication, TodayUsageReport, UsageReport};

/// The single message every failed operation carries.
pub const UNAVAILABLE_MESSAGE: &str = "Screen Time capability is not available on this platform";

/// Bridge for platforms without the capability.
///
/// Stateless; performs no native calls. The authorization status reads
/// `NotDetermined` synchronously, every other operation fails with
/// [`UNAVAILABLE_MESSAGE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedScreenTimeBridge;

impl UnsupportedScreenTimeBridge {
    pub fn new() -> Self {
        Self
    }

    fn unavailable<T>(operation: &'static str) -> Result<T> {
        debug!(operation, "operation invoked on unsupported platform");
        Err(ScreenTimeError::ModuleUnavailable(
            UNAVAILABLE_MESSAGE.to_string(),
        ))
    }
}

#[async_trait]
impl ScreenTimeBridge for UnsupportedScreenTimeBridge {
    fn authorization_status(&self) -> AuthorizationStatus {
        AuthorizationStatus::NotDetermined
    }

    async fn request_authorization(&self) -> Result<()> {
        Self::unavailable("request_authorization")
    }

    async fn screen_time_report(&self, _start_date: i64, _end_date: i64) -> Result<UsageReport> {
        Self::unavailable("screen_time_report")
    }

    async fn today_screen_time(&self) -> Result<TodayUsageReport> {
        Self::unavailable("today_screen_time")
    }

    async fn set_app_time_limit(&self, _bundle_id: &BundleId, _limit: TimeLimit) -> Result<()> {
        Self::unavailable("set_app_time_limit")
    }

    async fn remove_app_time_limit(&self, _bundle_id: &BundleId) -> Result<()> {
        Self::unavailable("remove_app_time_limit")
    }

    async fn block_application(&self, _bundle_id: &BundleId) -> Result<()> {
        Self::unavailable("block_application")
    }

    async fn unblock_application(&self, _bundle_id: &BundleId) -> Result<()> {
        Self::unavailable("unblock_application")
    }

    async fn installed_applications(&self) -> Result<Vec<InstalledApplication>> {
        Self::unavailable("installed_applications")
    }
}
