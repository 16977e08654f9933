//! Managed-settings store abstraction.
//!
//! The store is owned by the host platform and persists restriction state
//! (blocked applications, per-application limits) outside this system's
//! control. Reads return snapshots; writes replace whole collections with
//! last-write-wins semantics at the host.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::time::Duration;

use crate::availability::Availability;
use crate::error::CapabilityResult;

/// Bundle identifier naming an installed application.
///
/// Treated as untrusted external input: never validated for existence here;
/// the host is the source of truth and may reject it.
///
/// # Examples
///
/// ```
/// use bridge_traits::settings::BundleId;
///
/// let bundle = BundleId::new("com.apple.mobilesafari");
/// assert_eq!(bundle.as_str(), "com.apple.mobilesafari");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BundleId(String);

impl BundleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BundleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BundleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for BundleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque host-issued handle representing one application within the
/// managed-settings store.
///
/// Derived from — but not equal to — a bundle identifier, via
/// [`ManagedSettingsStore::application_token`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationToken(String);

impl ApplicationToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-application time budget in whole minutes.
///
/// The semantic unit at the boundary is minutes; conversion to the host's
/// native duration representation happens exactly once, at the store call.
///
/// # Examples
///
/// ```
/// use bridge_traits::settings::TimeLimit;
/// use std::time::Duration;
///
/// let limit = TimeLimit::minutes(90);
/// assert_eq!(limit.as_duration(), Duration::from_secs(5400));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeLimit(u32);

impl TimeLimit {
    pub const fn minutes(minutes: u32) -> Self {
        Self(minutes)
    }

    pub fn as_minutes(&self) -> u32 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.0) * 60)
    }
}

impl fmt::Display for TimeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}min", self.0)
    }
}

/// Handle to the host's managed-settings store.
///
/// All mutating bridge operations are read-modify-write against these
/// collections. The store itself offers no transactional guarantee beyond
/// last-write-wins; serialization of concurrent mutations is the bridge's
/// responsibility, not the store's.
#[async_trait]
pub trait ManagedSettingsStore: Send + Sync {
    /// Availability of the managed-settings store on this host.
    fn availability(&self) -> Availability {
        Availability::Available
    }

    /// Resolve the host token for a bundle identifier.
    ///
    /// The bundle identifier is not validated for existence; the host decides
    /// whether it resolves.
    async fn application_token(&self, bundle_id: &BundleId) -> CapabilityResult<ApplicationToken>;

    /// Snapshot of the currently blocked applications.
    async fn blocked_applications(&self) -> CapabilityResult<HashSet<ApplicationToken>>;

    /// Replace the blocked-applications set.
    async fn set_blocked_applications(
        &self,
        blocked: HashSet<ApplicationToken>,
    ) -> CapabilityResult<()>;

    /// Snapshot of the per-application time limits.
    async fn application_limits(&self)
        -> CapabilityResult<HashMap<ApplicationToken, Duration>>;

    /// Replace the per-application time limits.
    async fn set_application_limits(
        &self,
        limits: HashMap<ApplicationToken, Duration>,
    ) -> CapabilityResult<()>;
}
