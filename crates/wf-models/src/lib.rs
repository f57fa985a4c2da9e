//! wf-models: wake physics library for windflow.
//!
//! Provides the interchangeable sub-models the wake solver composes:
//! - Deflection of the wake centerline under yaw (Jimenez, Gauss, none)
//! - Velocity deficit behind a rotor (Jensen cosine, Gauss)
//! - Combination of overlapping deficits (sum of squares, linear, max)
//! - Tabulated performance curves and the turbine operating-state resolver
//!
//! Every model is a closed enum chosen once at configuration time. Evaluation
//! is split in two steps: a per-turbine precomputation (`trajectory`, `wake`)
//! and a cheap per-point evaluation, so the solver can fan points out across
//! threads.
//!
//! # Example
//!
//! ```
//! use wf_models::{AmbientState, DeflectionModel, TurbineState, VelocityDeficitModel};
//!
//! let state = TurbineState { diameter: 126.0, yaw: 0.0, ct: 0.8 };
//! let ambient = AmbientState { turbulence_intensity: 0.06 };
//!
//! let trajectory = DeflectionModel::default().trajectory(&state, &ambient);
//! let wake = VelocityDeficitModel::default().wake(&state, &ambient);
//!
//! let offset = trajectory.offset(630.0);
//! let deficit = wake.deficit(630.0, 0.0 - offset.lateral, 0.0 - offset.vertical);
//! assert!(deficit > 0.0 && deficit < 1.0);
//! ```

pub mod combination;
pub mod common;
pub mod curve;
pub mod deflection;
pub mod error;
pub(crate) mod gauss;
pub mod operating;
pub mod state;
pub mod velocity;

// Re-exports
pub use combination::{CombinationModel, Combined};
pub use common::{CT_MAX, MIN_THRUST_COEFFICIENT};
pub use curve::{PerformanceCurve, TabulatedCurve};
pub use deflection::{
    DeflectionModel, DeflectionTrajectory, GaussDeflectionParams, JimenezParams, Offset,
};
pub use error::{ModelError, ModelResult};
pub use operating::{OperatingState, PowerParams, resolve_operating_state};
pub use state::{AmbientState, TurbineState};
pub use velocity::{GaussVelocityParams, JensenParams, VelocityDeficitModel, WakeProfile, deficit};
