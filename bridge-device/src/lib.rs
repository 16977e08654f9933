//! # Device Screen Time Bridge
//!
//! Device-backed implementation of the
//! [`ScreenTimeBridge`](bridge_traits::bridge::ScreenTimeBridge) seam.
//!
//! ## Overview
//!
//! [`DeviceScreenTimeBridge`] composes three injected capability handles —
//! the authorization service, the managed-settings store, and the
//! device-activity source — into the asynchronous operation surface calling
//! code programs against. Construction negotiates capability availability
//! once and fails fast; afterwards every privileged operation re-checks
//! authorization, runs the host call under a bounded suspend, and maps host
//! failures into the public taxonomy.
//!
//! Mutations of the blocked-applications set and the limits map are
//! read-modify-write against host-owned collections; the bridge serializes
//! them through a single owner so concurrent mutations cannot clobber each
//! other's snapshots.
//!
//! ## Usage
//!
//! ```
//! use bridge_device::{DeviceBridgeConfig, DeviceScreenTimeBridge};
//! use bridge_device::{InMemorySettingsStore, SimulatedAuthorization};
//! use bridge_traits::bridge::ScreenTimeBridge;
//! use bridge_traits::settings::BundleId;
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> bridge_traits::error::Result<()> {
//! let config = DeviceBridgeConfig::builder()
//!     .authorization(Arc::new(SimulatedAuthorization::approved()))
//!     .settings_store(Arc::new(InMemorySettingsStore::new()))
//!     .build()?;
//! let bridge = DeviceScreenTimeBridge::connect(config)?;
//!
//! bridge.block_application(&BundleId::from("com.test.app")).await?;
//! # Ok(())
//! # }
//! ```

pub mod activity;
pub mod bridge;
pub mod config;
pub mod hosts;

pub use activity::PlaceholderActivitySource;
pub use bridge::DeviceScreenTimeBridge;
pub use config::{DeviceBridgeBuilder, DeviceBridgeConfig};
pub use hosts::{ConsentDecision, InMemorySettingsStore, SimulatedAuthorization};
