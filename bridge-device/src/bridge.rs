//! Device-backed bridge implementation.
//!
//! Every privileged operation follows one template: re-check authorization,
//! invoke the capability handle under a bounded suspend, and map any host
//! failure to the public taxonomy. Mutations of host-owned restriction state
//! are serialized through a single owner so concurrent block/unblock calls
//! cannot clobber each other's read-time snapshot, even though the host
//! store itself is last-write-wins.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use bridge_traits::authorization::{AuthorizationProvider, AuthorizationStatus};
use bridge_traits::availability::Availability;
use bridge_traits::bridge::ScreenTimeBridge;
use bridge_traits::error::{CapabilityResult, Result, ScreenTimeError};
use bridge_traits::settings::{BundleId, ManagedSettingsStore, TimeLimit};
use bridge_traits::time::{self, Clock};
use bridge_traits::usage::{
    DeviceActivitySource, InstalledApplication, TodayUsageReport, UsageReport,
};

use crate::config::DeviceBridgeConfig;

/// Run one host call with an upper bound on its suspend.
///
/// An elapsed deadline and a host failure both map to the calling
/// operation's taxonomy kind; the host error object itself never propagates.
async fn bounded<T>(
    deadline: Duration,
    operation: impl Future<Output = CapabilityResult<T>>,
    wrap: impl Fn(String) -> ScreenTimeError,
) -> Result<T> {
    match timeout(deadline, operation).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(wrap(err.to_string())),
        Err(_) => Err(wrap(format!(
            "host call timed out after {}s",
            deadline.as_secs()
        ))),
    }
}

/// Bridge to the device's parental-control services.
///
/// Composes the injected capability handles; construct with
/// [`DeviceScreenTimeBridge::connect`], which negotiates availability once
/// and caches the outcome for the bridge's lifetime.
pub struct DeviceScreenTimeBridge {
    authorization: Arc<dyn AuthorizationProvider>,
    settings: Arc<dyn ManagedSettingsStore>,
    activity: Arc<dyn DeviceActivitySource>,
    clock: Arc<dyn Clock>,
    operation_timeout: Duration,
    authorization_timeout: Duration,
    /// Single-writer policy for the blocked set and limits map.
    mutation_lock: Mutex<()>,
}

impl std::fmt::Debug for DeviceScreenTimeBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceScreenTimeBridge")
            .field("operation_timeout", &self.operation_timeout)
            .field("authorization_timeout", &self.authorization_timeout)
            .finish_non_exhaustive()
    }
}

impl DeviceScreenTimeBridge {
    /// Negotiate capability availability and construct the bridge.
    ///
    /// Fails with `ModuleUnavailable` when a handle reports the capability
    /// absent, or `MethodUnavailable` when it is linked but missing
    /// operations on this host. No per-call re-probe happens afterwards.
    pub fn connect(config: DeviceBridgeConfig) -> Result<Self> {
        Self::negotiate("authorization service", config.authorization.availability())?;
        Self::negotiate("managed-settings store", config.settings.availability())?;
        Self::negotiate("device-activity source", config.activity.availability())?;
        info!("Screen Time device bridge connected");
        Ok(Self {
            authorization: config.authorization,
            settings: config.settings,
            activity: config.activity,
            clock: config.clock,
            operation_timeout: config.operation_timeout,
            authorization_timeout: config.authorization_timeout,
            mutation_lock: Mutex::new(()),
        })
    }

    fn negotiate(name: &str, availability: Availability) -> Result<()> {
        match availability {
            Availability::Available => Ok(()),
            Availability::ModuleMissing { detail } => Err(ScreenTimeError::ModuleUnavailable(
                format!("{name} is not available on this host: {detail}"),
            )),
            Availability::OperationsMissing { operations, detail } => {
                Err(ScreenTimeError::MethodUnavailable(format!(
                    "{name} is missing operations [{}]: {detail}",
                    operations.join(", ")
                )))
            }
        }
    }

    /// Mandatory short-circuit before every privileged operation.
    ///
    /// The host would also reject an unauthorized call, but failing here
    /// keeps the error uniform and avoids undefined host-side behavior.
    fn ensure_authorized(&self) -> Result<()> {
        let status = self.authorization.status();
        if !status.is_approved() {
            warn!(status = %status, "privileged operation attempted without approval");
            return Err(ScreenTimeError::NotAuthorized);
        }
        Ok(())
    }
}

#[async_trait]
impl ScreenTimeBridge for DeviceScreenTimeBridge {
    fn authorization_status(&self) -> AuthorizationStatus {
        self.authorization.status()
    }

    async fn request_authorization(&self) -> Result<()> {
        match timeout(
            self.authorization_timeout,
            self.authorization.request_authorization(),
        )
        .await
        {
            Ok(Ok(())) => {
                info!("Screen Time authorization granted");
                Ok(())
            }
            Ok(Err(failure)) => {
                warn!(%failure, "Screen Time authorization request failed");
                Err(failure.into())
            }
            Err(_) => Err(ScreenTimeError::Authorization(format!(
                "consent flow timed out after {}s",
                self.authorization_timeout.as_secs()
            ))),
        }
    }

    async fn screen_time_report(&self, start_date: i64, end_date: i64) -> Result<UsageReport> {
        self.ensure_authorized()?;
        let report = bounded(
            self.operation_timeout,
            self.activity.collect_report(start_date, end_date),
            ScreenTimeError::ScreenTime,
        )
        .await?;
        debug!(start_date, end_date, "collected screen time report");
        Ok(report)
    }

    async fn today_screen_time(&self) -> Result<TodayUsageReport> {
        self.ensure_authorized()?;
        let now = self.clock.now();
        let day_start = time::local_day_start(now).timestamp();
        let report = bounded(
            self.operation_timeout,
            self.activity.collect_report(day_start, now.timestamp()),
            ScreenTimeError::ScreenTime,
        )
        .await?;
        Ok(TodayUsageReport {
            total_screen_time: report.total_screen_time,
            date: day_start,
            apps: report.applications,
        })
    }

    async fn set_app_time_limit(&self, bundle_id: &BundleId, limit: TimeLimit) -> Result<()> {
        self.ensure_authorized()?;
        let _guard = self.mutation_lock.lock().await;
        let token = bounded(
            self.operation_timeout,
            self.settings.application_token(bundle_id),
            ScreenTimeError::TimeLimit,
        )
        .await?;
        let mut limits = bounded(
            self.operation_timeout,
            self.settings.application_limits(),
            ScreenTimeError::TimeLimit,
        )
        .await?;
        limits.insert(token, limit.as_duration());
        bounded(
            self.operation_timeout,
            self.settings.set_application_limits(limits),
            ScreenTimeError::TimeLimit,
        )
        .await?;
        debug!(bundle_id = %bundle_id, limit = %limit, "set application time limit");
        Ok(())
    }

    async fn remove_app_time_limit(&self, bundle_id: &BundleId) -> Result<()> {
        self.ensure_authorized()?;
        let _guard = self.mutation_lock.lock().await;
        let token = bounded(
            self.operation_timeout,
            self.settings.application_token(bundle_id),
            ScreenTimeError::RemoveLimit,
        )
        .await?;
        let mut limits = bounded(
            self.operation_timeout,
            self.settings.application_limits(),
            ScreenTimeError::RemoveLimit,
        )
        .await?;
        if limits.remove(&token).is_some() {
            bounded(
                self.operation_timeout,
                self.settings.set_application_limits(limits),
                ScreenTimeError::RemoveLimit,
            )
            .await?;
        }
        let mut blocked = bounded(
            self.operation_timeout,
            self.settings.blocked_applications(),
            ScreenTimeError::RemoveLimit,
        )
        .await?;
        if blocked.remove(&token) {
            bounded(
                self.operation_timeout,
                self.settings.set_blocked_applications(blocked),
                ScreenTimeError::RemoveLimit,
            )
            .await?;
        }
        debug!(bundle_id = %bundle_id, "removed application time limit");
        Ok(())
    }

    async fn block_application(&self, bundle_id: &BundleId) -> Result<()> {
        self.ensure_authorized()?;
        let _guard = self.mutation_lock.lock().await;
        let token = bounded(
            self.operation_timeout,
            self.settings.application_token(bundle_id),
            ScreenTimeError::BlockApp,
        )
        .await?;
        let mut blocked = bounded(
            self.operation_timeout,
            self.settings.blocked_applications(),
            ScreenTimeError::BlockApp,
        )
        .await?;
        if blocked.insert(token) {
            bounded(
                self.operation_timeout,
                self.settings.set_blocked_applications(blocked),
                ScreenTimeError::BlockApp,
            )
            .await?;
            debug!(bundle_id = %bundle_id, "blocked application");
        } else {
            debug!(bundle_id = %bundle_id, "application already blocked");
        }
        Ok(())
    }

    async fn unblock_application(&self, bundle_id: &BundleId) -> Result<()> {
        self.ensure_authorized()?;
        let _guard = self.mutation_lock.lock().await;
        let token = bounded(
            self.operation_timeout,
            self.settings.application_token(bundle_id),
            ScreenTimeError::UnblockApp,
        )
        .await?;
        let mut blocked = bounded(
            self.operation_timeout,
            self.settings.blocked_applications(),
            ScreenTimeError::UnblockApp,
        )
        .await?;
        if blocked.remove(&token) {
            bounded(
                self.operation_timeout,
                self.settings.set_blocked_applications(blocked),
                ScreenTimeError::UnblockApp,
            )
            .await?;
            debug!(bundle_id = %bundle_id, "unblocked application");
        } else {
            debug!(bundle_id = %bundle_id, "application was not blocked");
        }
        Ok(())
    }

    async fn installed_applications(&self) -> Result<Vec<InstalledApplication>> {
        self.ensure_authorized()?;
        bounded(
            self.operation_timeout,
            self.activity.installed_applications(),
            ScreenTimeError::GetApps,
        )
        .await
    }
}
