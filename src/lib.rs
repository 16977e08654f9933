//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (e.g., `core-screentime`, `bridge-device`,
//! `bridge-unsupported`). Host applications can depend on
//! `screentime-workspace` and enable the documented features without needing
//! to wire each crate individually.
