//! Device bridge configuration.
//!
//! The builder collects the injected capability handles and fails fast with
//! actionable messages when a required handle is missing, before any
//! operation can surface an opaque low-level error.

use std::sync::Arc;
use std::time::Duration;

use bridge_traits::authorization::AuthorizationProvider;
use bridge_traits::error::{Result, ScreenTimeError};
use bridge_traits::settings::ManagedSettingsStore;
use bridge_traits::time::{Clock, SystemClock};
use bridge_traits::usage::DeviceActivitySource;

use crate::activity::PlaceholderActivitySource;

/// Default timeout for host data and mutation calls (30 seconds)
pub(crate) const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for the interactive consent flow (2 minutes)
pub(crate) const DEFAULT_AUTHORIZATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Resolved dependencies and settings for the device bridge.
///
/// Use [`DeviceBridgeConfig::builder`] to construct instances.
pub struct DeviceBridgeConfig {
    pub(crate) authorization: Arc<dyn AuthorizationProvider>,
    pub(crate) settings: Arc<dyn ManagedSettingsStore>,
    pub(crate) activity: Arc<dyn DeviceActivitySource>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) operation_timeout: Duration,
    pub(crate) authorization_timeout: Duration,
}

impl DeviceBridgeConfig {
    pub fn builder() -> DeviceBridgeBuilder {
        DeviceBridgeBuilder::new()
    }
}

impl std::fmt::Debug for DeviceBridgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceBridgeConfig")
            .field("operation_timeout", &self.operation_timeout)
            .field("authorization_timeout", &self.authorization_timeout)
            .finish_non_exhaustive()
    }
}

/// Builder for [`DeviceBridgeConfig`].
///
/// # Examples
///
/// ```
/// use bridge_device::{DeviceBridgeConfig, InMemorySettingsStore, SimulatedAuthorization};
/// use std::sync::Arc;
///
/// let config = DeviceBridgeConfig::builder()
///     .authorization(Arc::new(SimulatedAuthorization::approved()))
///     .settings_store(Arc::new(InMemorySettingsStore::new()))
///     .build()
///     .expect("both required handles were provided");
/// ```
pub struct DeviceBridgeBuilder {
    authorization: Option<Arc<dyn AuthorizationProvider>>,
    settings: Option<Arc<dyn ManagedSettingsStore>>,
    activity: Option<Arc<dyn DeviceActivitySource>>,
    clock: Option<Arc<dyn Clock>>,
    operation_timeout: Duration,
    authorization_timeout: Duration,
}

impl DeviceBridgeBuilder {
    fn new() -> Self {
        Self {
            authorization: None,
            settings: None,
            activity: None,
            clock: None,
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
            authorization_timeout: DEFAULT_AUTHORIZATION_TIMEOUT,
        }
    }

    /// Handle to the host's authorization service. Required.
    pub fn authorization(mut self, authorization: Arc<dyn AuthorizationProvider>) -> Self {
        self.authorization = Some(authorization);
        self
    }

    /// Handle to the host's managed-settings store. Required.
    pub fn settings_store(mut self, settings: Arc<dyn ManagedSettingsStore>) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Handle to the host's device-activity data.
    ///
    /// Defaults to [`PlaceholderActivitySource`] when the host has no
    /// aggregation pipeline.
    pub fn activity_source(mut self, activity: Arc<dyn DeviceActivitySource>) -> Self {
        self.activity = Some(activity);
        self
    }

    /// Time source. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Upper bound on every host data/mutation call.
    pub fn operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = timeout;
        self
    }

    /// Upper bound on the interactive consent flow.
    pub fn authorization_timeout(mut self, timeout: Duration) -> Self {
        self.authorization_timeout = timeout;
        self
    }

    /// Validate required handles and resolve defaults.
    pub fn build(self) -> Result<DeviceBridgeConfig> {
        let authorization = self.authorization.ok_or_else(|| {
            ScreenTimeError::ModuleUnavailable(
                "No authorization service provided. On-device: inject the host's \
                 authorization center adapter. Tests: use SimulatedAuthorization."
                    .to_string(),
            )
        })?;
        let settings = self.settings.ok_or_else(|| {
            ScreenTimeError::ModuleUnavailable(
                "No managed-settings store provided. On-device: inject the host's \
                 managed-settings adapter. Tests: use InMemorySettingsStore."
                    .to_string(),
            )
        })?;
        Ok(DeviceBridgeConfig {
            authorization,
            settings,
            activity: self
                .activity
                .unwrap_or_else(|| Arc::new(PlaceholderActivitySource)),
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            operation_timeout: self.operation_timeout,
            authorization_timeout: self.authorization_timeout,
        })
    }
}

impl Default for DeviceBridgeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
