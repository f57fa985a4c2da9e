//! wf-core: stable foundation for windflow.
//!
//! Contains:
//! - units (uom SI types + constructors at the configuration boundary)
//! - numeric (Real + tolerances + float helpers)
//! - ids (stable compact IDs for turbines and sample points)
//! - timing (wall-clock timers for solve passes)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{WfError, WfResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
