//! Authorization state observed from the host's permission subsystem.
//!
//! The status is owned by the host: it mutates only through an explicit
//! authorization request or external user action in system settings. This
//! crate only observes it, and consumers must re-query rather than assume any
//! transition is monotonic.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::availability::Availability;
use crate::error::AuthorizationFailure;

/// Authorization status for Screen Time access.
///
/// `NotDetermined` transitions to `Approved` or `Denied` through the consent
/// flow; the host may reset status outside this system's control, so no
/// transition is assumed terminal.
///
/// # Examples
///
/// ```
/// use bridge_traits::authorization::AuthorizationStatus;
///
/// let status = AuthorizationStatus::from_host_value("approved");
/// assert!(status.is_approved());
///
/// // Unrecognized host values never fail; they map to the catch-all.
/// let status = AuthorizationStatus::from_host_value("provisional");
/// assert_eq!(status, AuthorizationStatus::Unknown);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AuthorizationStatus {
    /// The user has not yet been asked.
    NotDetermined,
    /// The user refused access.
    Denied,
    /// The user granted access.
    Approved,
    /// Catch-all for host values this version does not recognize.
    Unknown,
}

impl AuthorizationStatus {
    /// Wire representation used at the runtime boundary.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorizationStatus::NotDetermined => "notDetermined",
            AuthorizationStatus::Denied => "denied",
            AuthorizationStatus::Approved => "approved",
            AuthorizationStatus::Unknown => "unknown",
        }
    }

    /// Map a raw host value to a status.
    ///
    /// Unrecognized values become [`AuthorizationStatus::Unknown`] so newer
    /// host platforms never break this layer.
    pub fn from_host_value(value: &str) -> Self {
        match value {
            "notDetermined" => AuthorizationStatus::NotDetermined,
            "denied" => AuthorizationStatus::Denied,
            "approved" => AuthorizationStatus::Approved,
            _ => AuthorizationStatus::Unknown,
        }
    }

    pub fn is_approved(&self) -> bool {
        matches!(self, AuthorizationStatus::Approved)
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Handle to the host's authorization service.
///
/// Implemented by the embedding host for the platform that owns the
/// capability, and by test doubles. All privileged bridge operations re-read
/// [`status`](AuthorizationProvider::status) before touching the host.
#[async_trait]
pub trait AuthorizationProvider: Send + Sync {
    /// Availability of the authorization service on this host.
    fn availability(&self) -> Availability {
        Availability::Available
    }

    /// Current authorization status. Synchronous, never blocks, never fails.
    fn status(&self) -> AuthorizationStatus;

    /// Run the host's interactive consent flow.
    ///
    /// Suspends until the user responds or the host reports a definitive
    /// outcome. Approval resolves to `Ok(())`; the three failure kinds are
    /// kept distinct because callers branch on them.
    async fn request_authorization(&self) -> Result<(), AuthorizationFailure>;
}
