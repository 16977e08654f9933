//! # Screen Time Core
//!
//! High-level facade over the Screen Time bridge seam.
//!
//! Host applications construct a bridge for their platform — the
//! device-backed implementation from `bridge-device`, or the deterministic
//! fallback from `bridge-unsupported` — and hand it to
//! [`ScreenTimeApi`](api::ScreenTimeApi). The facade adds the derived
//! conveniences (authorization boolean, trailing-week and month-to-date
//! report windows) and passes everything else through unchanged, so calling
//! code never depends on a concrete bridge.
//!
//! Build-time note: on-device, the host application manifest must carry the
//! platform's family-controls, device-activity, and managed-settings
//! entitlements before any privileged operation can succeed. Injecting them
//! is the packaging layer's responsibility; nothing at runtime depends on
//! how it happens.

pub mod api;
pub mod logging;

pub use api::ScreenTimeApi;
pub use logging::{init_logging, LogFormat, LoggingConfig};

// Re-export the contract crate so callers need a single dependency.
pub use bridge_traits::authorization::AuthorizationStatus;
pub use bridge_traits::bridge::ScreenTimeBridge;
pub use bridge_traits::error::{Result, ScreenTimeError};
pub use bridge_traits::settings::{BundleId, TimeLimit};
pub use bridge_traits::usage::{InstalledApplication, TodayUsageReport, UsageReport};
