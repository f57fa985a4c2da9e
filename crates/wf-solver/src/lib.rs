//! Wake superposition solver for wind farms.
//!
//! For every flow case (one wind direction and speed) the solver walks the
//! turbines from upstream to downstream. Each turbine resolves its operating
//! state from the velocity already accumulated on its rotor, casts a deflected
//! wake, and that wake is folded into every sample point downstream of it.
//! The per-turbine loop is sequential; the per-point work inside one pass and
//! independent cases run in parallel.

pub mod ambient;
pub mod anomaly;
pub mod arena;
pub mod error;
pub mod planes;
pub mod problem;
pub mod sampling;
pub mod solution;
pub mod solve;

pub use ambient::{AmbientConditions, FlowCase};
pub use anomaly::{Anomaly, AnomalyKind};
pub use arena::{TurbineArena, TurbineRecord};
pub use error::{SolverError, SolverResult};
pub use planes::{PlaneSample, sample_plane};
pub use problem::{WakeModels, WakeProblem};
pub use sampling::GridGuard;
pub use solution::{CaseSolution, PointSample, TurbineSolution};
pub use solve::{solve, solve_case};
