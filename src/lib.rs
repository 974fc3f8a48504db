//! # Ryzen Tuner
//!
//! A power-table polling and SMU adjustment client for AMD Ryzen mobile SoCs,
//! built on the native `libryzenadj` control library.
//!
//! ## Features
//!
//! - **Table Monitoring**: Periodic refresh and terminal rendering of the
//!   power-management table (pmtable in-place view or ptable copy mode)
//! - **Limit Readjustment**: Monitor-and-correct loop that reapplies a
//!   configured batch of power/thermal limits when the fast limit drifts
//! - **Structured Errors**: Per-command SMU rejections are recovered locally
//!   and never abort the loop; only session initialization is fatal
//! - **Configuration**: TOML/JSON config files with environment overrides
//!
//! ## Modules
//!
//! - [`core`]: Client lifecycle and error types
//! - [`config`]: Unified configuration
//! - [`monitor`]: Table polling and snapshot rendering
//! - [`adjust`]: Monitor-and-correct loop
//! - [`platform`]: Terminal and driver collaborators

pub mod adjust;
pub mod config;
pub mod core;
pub mod monitor;
pub mod platform;

pub use crate::core::{Client, ClientError, ClientResult};
pub use config::ClientConfig;
