//! Sampling the flow at arbitrary points.
//!
//! Sampling temporarily swaps the problem's configured grid for one that adds
//! the requested points. The swap is held by a [`GridGuard`], which puts the
//! configured grid back when dropped, so early returns and panics inside a
//! sampling solve leave the problem as it was.

use crate::error::SolverResult;
use crate::problem::WakeProblem;
use crate::solution::CaseSolution;
use crate::solve::{solve, solve_case};
use std::ops::{Deref, DerefMut};
use wf_farm::{GridSpec, Point};

/// Scoped replacement of a problem's sample grid.
pub struct GridGuard<'a> {
    problem: &'a mut WakeProblem,
    saved: Option<GridSpec>,
}

impl<'a> GridGuard<'a> {
    /// Install `grid` on `problem` until the guard is dropped.
    pub fn install(problem: &'a mut WakeProblem, grid: GridSpec) -> Self {
        let saved = std::mem::replace(&mut problem.grid, grid);
        tracing::debug!(
            points = problem.grid.points.len(),
            "temporary sample grid installed"
        );
        Self {
            problem,
            saved: Some(saved),
        }
    }
}

impl Deref for GridGuard<'_> {
    type Target = WakeProblem;

    fn deref(&self) -> &WakeProblem {
        self.problem
    }
}

impl DerefMut for GridGuard<'_> {
    fn deref_mut(&mut self) -> &mut WakeProblem {
        self.problem
    }
}

impl Drop for GridGuard<'_> {
    fn drop(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.problem.grid = saved;
        }
    }
}

impl WakeProblem {
    /// Solve every case at `points` (world frame) without changing the
    /// configured grid.
    pub fn sample(&mut self, points: Vec<Point>) -> SolverResult<Vec<CaseSolution>> {
        let grid = self.sampling_grid(points);
        let guard = GridGuard::install(self, grid);
        solve(&guard)
    }

    /// Solve one case at `points` (world frame) without changing the
    /// configured grid.
    pub fn sample_case(&mut self, points: Vec<Point>, case: usize) -> SolverResult<CaseSolution> {
        let grid = self.sampling_grid(points);
        let guard = GridGuard::install(self, grid);
        solve_case(&guard, case)
    }

    /// Configured rotor resolution with `points` as the only free points.
    fn sampling_grid(&self, points: Vec<Point>) -> GridSpec {
        GridSpec::rotor(self.grid.points_per_side).with_points(points)
    }
}
