//! # Screen Time Bridge Traits
//!
//! Contracts between calling code and the host platform's
//! parental-control/usage-tracking subsystem.
//!
//! ## Overview
//!
//! This crate defines two layers of seams:
//!
//! - [`ScreenTimeBridge`](bridge::ScreenTimeBridge) — the asynchronous
//!   operation surface callers program against. Implemented by the
//!   device-backed bridge (`bridge-device`) and by the deterministic fallback
//!   for platforms without the capability (`bridge-unsupported`).
//! - The capability handles the device bridge composes, each implemented by
//!   the embedding host:
//!   [`AuthorizationProvider`](authorization::AuthorizationProvider) (the
//!   permission subsystem),
//!   [`ManagedSettingsStore`](settings::ManagedSettingsStore) (host-owned
//!   restriction state), and
//!   [`DeviceActivitySource`](usage::DeviceActivitySource) (usage data).
//!
//! Handles are injected explicitly — there is no global binding to "the one
//! native module" — so fallbacks and test doubles substitute without global
//! mutable state.
//!
//! ## Availability
//!
//! Each capability handle reports a typed
//! [`Availability`](availability::Availability) instead of being duck-probed
//! per call. The device bridge negotiates availability once at construction
//! and fails fast with `ModuleUnavailable` / `MethodUnavailable` rather than
//! letting an operation surface an opaque low-level error later.
//!
//! ## Error Handling
//!
//! The public taxonomy is [`ScreenTimeError`](error::ScreenTimeError); every
//! kind carries a stable wire code for callers that branch on codes. Host
//! adapters return [`CapabilityError`](error::CapabilityError) /
//! [`AuthorizationFailure`](error::AuthorizationFailure) and never leak
//! platform error objects across the boundary.
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync`; handles are shared across async tasks
//! behind `Arc`.

pub mod authorization;
pub mod availability;
pub mod bridge;
pub mod error;
pub mod settings;
pub mod time;
pub mod usage;

pub use error::{
    AuthorizationFailure, CapabilityError, CapabilityResult, Result, ScreenTimeError,
};

// Re-export commonly used types
pub use authorization::{AuthorizationProvider, AuthorizationStatus};
pub use availability::Availability;
pub use bridge::ScreenTimeBridge;
pub use settings::{ApplicationToken, BundleId, ManagedSettingsStore, TimeLimit};
pub use time::{Clock, FixedClock, SystemClock};
pub use usage::{
    ApplicationUsage, CategoryUsage, DeviceActivitySource, InstalledApplication,
    TodayUsageReport, UsageReport,
};
