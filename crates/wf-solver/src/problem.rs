//! Problem definition for a wake solve.

use crate::ambient::AmbientConditions;
use crate::error::{SolverError, SolverResult};
use std::collections::HashMap;
use wf_core::{Real, TurbineTypeId};
use wf_farm::grid::ROTOR_RADIUS_RATIO;
use wf_farm::{Farm, GridSpec};
use wf_models::{CombinationModel, DeflectionModel, PerformanceCurve, PowerParams, VelocityDeficitModel};

/// Model selection, fixed for a whole solve.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WakeModels {
    pub deflection: DeflectionModel,
    pub velocity: VelocityDeficitModel,
    pub combination: CombinationModel,
    pub power: PowerParams,
}

impl WakeModels {
    pub fn validate(&self) -> SolverResult<()> {
        self.deflection.validate()?;
        self.velocity.validate()?;
        self.power.validate()?;
        Ok(())
    }
}

/// A farm, its ambient conditions, the wake models and where to sample.
///
/// The farm, ambient set and models are read-only during a solve and shared
/// across the cases solved in parallel.
pub struct WakeProblem {
    pub farm: Farm,
    pub ambient: AmbientConditions,
    pub models: WakeModels,

    /// Performance curves indexed by turbine type
    pub curves: HashMap<TurbineTypeId, Box<dyn PerformanceCurve>>,

    /// Configured sample grid
    pub(crate) grid: GridSpec,
}

impl WakeProblem {
    pub fn new(farm: Farm, ambient: AmbientConditions, models: WakeModels) -> Self {
        Self {
            farm,
            ambient,
            models,
            curves: HashMap::new(),
            grid: GridSpec::default(),
        }
    }

    /// Attach the performance curve of a turbine type.
    pub fn add_curve(
        &mut self,
        turbine_type: TurbineTypeId,
        curve: Box<dyn PerformanceCurve>,
    ) -> SolverResult<()> {
        if self.farm.turbine_type(turbine_type).is_none() {
            return Err(SolverError::Configuration {
                what: format!("curve for unknown turbine type {turbine_type}"),
            });
        }
        if self.curves.contains_key(&turbine_type) {
            return Err(SolverError::Configuration {
                what: format!("turbine type {turbine_type} already has a curve"),
            });
        }
        self.curves.insert(turbine_type, curve);
        Ok(())
    }

    pub fn curve(&self, turbine_type: TurbineTypeId) -> Option<&dyn PerformanceCurve> {
        self.curves.get(&turbine_type).map(|c| c.as_ref())
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn set_grid(&mut self, grid: GridSpec) {
        self.grid = grid;
    }

    /// Height the ambient wind speeds refer to.
    pub fn reference_height(&self) -> Real {
        self.ambient.reference_height.unwrap_or_else(|| {
            self.farm
                .turbine_types()
                .first()
                .map_or(0.0, |t| t.hub_height)
        })
    }

    /// Validate problem setup.
    pub fn validate(&self) -> SolverResult<()> {
        self.ambient.validate()?;
        self.models.validate()?;

        let z_ref = self.reference_height();
        if !(z_ref.is_finite() && z_ref > 0.0) {
            return Err(SolverError::Configuration {
                what: format!("reference height {z_ref} must be positive"),
            });
        }

        if self.grid.points_per_side == 0 {
            return Err(SolverError::Configuration {
                what: "rotor grid needs at least one point per side".into(),
            });
        }

        // A single rotor point sits on the hub; larger grids reach down
        if self.grid.points_per_side > 1 {
            for ty in self.farm.turbine_types() {
                let lowest = ty.hub_height - ROTOR_RADIUS_RATIO * ty.rotor_radius();
                if lowest < 0.0 {
                    return Err(SolverError::Configuration {
                        what: format!(
                            "rotor grid of turbine type '{}' reaches {lowest} m below ground",
                            ty.name
                        ),
                    });
                }
            }
        }

        // Every type in use needs a curve
        for turbine in self.farm.turbines() {
            if !self.curves.contains_key(&turbine.turbine_type) {
                return Err(SolverError::Configuration {
                    what: format!(
                        "turbine '{}' uses type {} which has no performance curve",
                        turbine.name, turbine.turbine_type
                    ),
                });
            }
        }

        Ok(())
    }
}
