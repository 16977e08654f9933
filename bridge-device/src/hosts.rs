//! In-process host adapters.
//!
//! Real deployments inject adapters backed by the platform's authorization
//! center and managed-settings store. The stand-ins here implement the same
//! contracts in process memory for development hosts and test suites.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use bridge_traits::authorization::{AuthorizationProvider, AuthorizationStatus};
use bridge_traits::error::{AuthorizationFailure, CapabilityResult};
use bridge_traits::settings::{ApplicationToken, BundleId, ManagedSettingsStore};

/// Scripted outcome of the next consent request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsentDecision {
    Approve,
    Deny,
    Fail(String),
}

/// Authorization provider with a scripted consent flow.
///
/// # Examples
///
/// ```
/// use bridge_device::{ConsentDecision, SimulatedAuthorization};
/// use bridge_traits::authorization::AuthorizationStatus;
///
/// let auth = SimulatedAuthorization::undetermined();
/// auth.set_decision(ConsentDecision::Deny);
/// assert_eq!(auth.status(), AuthorizationStatus::NotDetermined);
/// # use bridge_traits::authorization::AuthorizationProvider;
/// ```
pub struct SimulatedAuthorization {
    status: RwLock<AuthorizationStatus>,
    decision: RwLock<ConsentDecision>,
}

impl SimulatedAuthorization {
    pub fn new(status: AuthorizationStatus) -> Self {
        Self {
            status: RwLock::new(status),
            decision: RwLock::new(ConsentDecision::Approve),
        }
    }

    pub fn approved() -> Self {
        Self::new(AuthorizationStatus::Approved)
    }

    pub fn denied() -> Self {
        Self::new(AuthorizationStatus::Denied)
    }

    pub fn undetermined() -> Self {
        Self::new(AuthorizationStatus::NotDetermined)
    }

    /// Override the observed status, as external user action in system
    /// settings would.
    pub fn set_status(&self, status: AuthorizationStatus) {
        *self.status.write().expect("status lock poisoned") = status;
    }

    /// Script the outcome of subsequent consent requests.
    pub fn set_decision(&self, decision: ConsentDecision) {
        *self.decision.write().expect("decision lock poisoned") = decision;
    }
}

#[async_trait]
impl AuthorizationProvider for SimulatedAuthorization {
    fn status(&self) -> AuthorizationStatus {
        *self.status.read().expect("status lock poisoned")
    }

    async fn request_authorization(&self) -> Result<(), AuthorizationFailure> {
        let decision = self.decision.read().expect("decision lock poisoned").clone();
        match decision {
            ConsentDecision::Approve => {
                self.set_status(AuthorizationStatus::Approved);
                Ok(())
            }
            ConsentDecision::Deny => {
                self.set_status(AuthorizationStatus::Denied);
                Err(AuthorizationFailure::Denied)
            }
            ConsentDecision::Fail(reason) => Err(AuthorizationFailure::Failed(reason)),
        }
    }
}

/// Managed-settings store held in process memory.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    state: Mutex<StoreState>,
}

#[derive(Debug, Default)]
struct StoreState {
    blocked: HashSet<ApplicationToken>,
    limits: HashMap<ApplicationToken, Duration>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token this store derives for a bundle identifier.
    pub fn token_for(bundle_id: &BundleId) -> ApplicationToken {
        ApplicationToken::new(format!("tok:{bundle_id}"))
    }

    /// Snapshot of the blocked set, for assertions.
    pub fn blocked_snapshot(&self) -> HashSet<ApplicationToken> {
        self.state.lock().expect("state lock poisoned").blocked.clone()
    }

    /// Snapshot of the limits map, for assertions.
    pub fn limits_snapshot(&self) -> HashMap<ApplicationToken, Duration> {
        self.state.lock().expect("state lock poisoned").limits.clone()
    }
}

#[async_trait]
impl ManagedSettingsStore for InMemorySettingsStore {
    async fn application_token(
        &self,
        bundle_id: &BundleId,
    ) -> CapabilityResult<ApplicationToken> {
        Ok(Self::token_for(bundle_id))
    }

    async fn blocked_applications(&self) -> CapabilityResult<HashSet<ApplicationToken>> {
        Ok(self.blocked_snapshot())
    }

    async fn set_blocked_applications(
        &self,
        blocked: HashSet<ApplicationToken>,
    ) -> CapabilityResult<()> {
        self.state.lock().expect("state lock poisoned").blocked = blocked;
        Ok(())
    }

    async fn application_limits(
        &self,
    ) -> CapabilityResult<HashMap<ApplicationToken, Duration>> {
        Ok(self.limits_snapshot())
    }

    async fn set_application_limits(
        &self,
        limits: HashMap<ApplicationToken, Duration>,
    ) -> CapabilityResult<()> {
        self.state.lock().expect("state lock poisoned").limits = limits;
        Ok(())
    }
}
