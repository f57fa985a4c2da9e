//! Cut-plane sampling for visualisation.

use crate::error::SolverResult;
use crate::problem::WakeProblem;
use wf_core::Real;
use wf_farm::{CutPlane, PlaneKind, WindFrame};

/// A solved cut plane: `(coordinate₁, coordinate₂, u)` rows, first coordinate
/// varying fastest. Rejected points carry NaN.
#[derive(Debug, Clone)]
pub struct PlaneSample {
    pub plane: CutPlane,
    pub rows: Vec<(Real, Real, Real)>,
}

/// Solve one flow case on an `n1 × n2` plane spanning the farm.
///
/// Goes through the sampling API, so the problem's configured grid is left
/// untouched.
pub fn sample_plane(
    problem: &mut WakeProblem,
    case: usize,
    kind: PlaneKind,
    n1: usize,
    n2: usize,
) -> SolverResult<PlaneSample> {
    let flow = problem.ambient.case(case)?;
    let frame = WindFrame::new(flow.direction_deg)?;
    let plane = CutPlane::around_farm(&problem.farm, frame, kind, n1, n2)?;

    let solution = problem.sample_case(plane.points(), case)?;
    let rows = plane
        .coordinates()
        .into_iter()
        .zip(&solution.points)
        .map(|((a, b), p)| (a, b, p.u.unwrap_or(Real::NAN)))
        .collect();

    Ok(PlaneSample { plane, rows })
}
