//! # Utility Modules
//!
//! Supporting utilities shared by the packet codec.
//!
//! ## Components
//! - **Concat**: single-allocation concatenation of byte slices
//! - **Logging**: structured logging setup
//! - **Metrics**: per-dispatcher atomic counters

pub mod concat;
pub mod logging;
pub mod metrics;

pub use metrics::{Metrics, MetricsSnapshot};
