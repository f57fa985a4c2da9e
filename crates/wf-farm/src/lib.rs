//! wf-farm: layout and sample-grid layer for windflow.
//!
//! Provides:
//! - Turbine types and placed turbines (validated, immutable `Farm`)
//! - Incremental farm builder with validation
//! - Wind-aligned coordinate frame for a given wind direction
//! - Sample grids (rotor grids plus arbitrary points) with fixed ownership
//! - Cut-plane point generation for visualisation consumers
//!
//! # Example
//!
//! ```
//! use wf_farm::FarmBuilder;
//! use wf_core::units::m;
//!
//! let mut builder = FarmBuilder::new();
//! let t = builder.add_turbine_type("nrel_5mw", m(126.0), m(90.0));
//! builder.add_turbine("T0", m(0.0), m(0.0), t);
//! builder.add_turbine("T1", m(630.0), m(0.0), t);
//! let farm = builder.build().unwrap();
//!
//! assert_eq!(farm.turbines().len(), 2);
//! ```

pub mod builder;
pub mod error;
pub mod farm;
pub mod frame;
pub mod grid;
pub mod planes;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::FarmBuilder;
pub use error::{FarmError, FarmResult};
pub use farm::{Farm, Turbine, TurbineType};
pub use frame::{Point, WindFrame};
pub use grid::{CaseGrid, GridSpec, PointStatus, RejectReason};
pub use planes::{CutPlane, PlaneKind};
