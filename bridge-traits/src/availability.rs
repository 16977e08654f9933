//! Capability availability negotiation.
//!
//! Each capability handle reports a typed [`Availability`] instead of being
//! duck-probed per call. The device bridge queries it once at construction
//! and caches the outcome for its lifetime.

/// Result of negotiating one capability with the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// The capability is linked and every required operation is callable.
    Available,

    /// The capability is entirely absent (wrong runtime, not linked).
    ModuleMissing { detail: String },

    /// The capability is linked but some operations are missing on this host
    /// (older platform version, simulator without the entitlement).
    OperationsMissing {
        operations: Vec<String>,
        detail: String,
    },
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }

    /// Convenience constructor for a fully absent capability.
    pub fn module_missing(detail: impl Into<String>) -> Self {
        Availability::ModuleMissing {
            detail: detail.into(),
        }
    }

    /// Convenience constructor for a partially linked capability.
    pub fn operations_missing(
        operations: impl IntoIterator<Item = impl Into<String>>,
        detail: impl Into<String>,
    ) -> Self {
        Availability::OperationsMissing {
            operations: operations.into_iter().map(Into::into).collect(),
            detail: detail.into(),
        }
    }
}
