//! Solve results.

use crate::ambient::FlowCase;
use crate::anomaly::Anomaly;
use nalgebra::Vector3;
use wf_core::{Real, TurbineId};
use wf_farm::{Point, PointStatus};

/// Resolved state of one turbine in one case.
#[derive(Debug, Clone, PartialEq)]
pub struct TurbineSolution {
    pub id: TurbineId,
    pub name: String,
    /// Rotor-averaged (cubic mean) inflow speed [m/s]
    pub effective_speed: Real,
    pub thrust_coefficient: Real,
    /// `Ct·cos γ`
    pub effective_thrust: Real,
    pub axial_induction: Real,
    pub power_coefficient: Real,
    /// [W]
    pub power: Real,
}

/// Velocity at one free sample point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSample {
    /// As requested, world frame
    pub position: Point,
    pub status: PointStatus,
    /// Speed along the wind direction; `None` for rejected points
    pub u: Option<Real>,
    /// World-frame velocity vector; `None` for rejected points
    pub velocity: Option<Vector3<Real>>,
}

/// Everything one flow case produced.
#[derive(Debug, Clone)]
pub struct CaseSolution {
    pub case: FlowCase,
    /// In farm order
    pub turbines: Vec<TurbineSolution>,
    /// Free points, in grid-spec order
    pub points: Vec<PointSample>,
    pub anomalies: Vec<Anomaly>,
    /// Wind-frame speed at every grid point, rotor points first
    pub(crate) field: Vec<Real>,
    /// Wall time of the case [s]
    pub elapsed_s: f64,
}

impl CaseSolution {
    /// Sum of turbine powers [W].
    pub fn farm_power(&self) -> Real {
        self.turbines.iter().map(|t| t.power).sum()
    }

    pub fn turbine(&self, id: TurbineId) -> Option<&TurbineSolution> {
        self.turbines.iter().find(|t| t.id == id)
    }

    pub fn turbine_by_name(&self, name: &str) -> Option<&TurbineSolution> {
        self.turbines.iter().find(|t| t.name == name)
    }

    /// Full velocity field over the case grid, rotor points first.
    pub fn field(&self) -> &[Real] {
        &self.field
    }

    /// Free-point speeds; `None` for rejected points.
    pub fn sampled_speeds(&self) -> Vec<Option<Real>> {
        self.points.iter().map(|p| p.u).collect()
    }
}
