//! Ambient condition set and flow cases.

use crate::error::{SolverError, SolverResult};
use wf_core::Real;
use wf_core::units::{Density, Length, constants::AIR_DENSITY_KGPM3};

/// Immutable ambient input for a solve.
///
/// Every combination of a wind direction and a wind speed is one flow case;
/// cases are ordered direction-major.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientConditions {
    /// Wind speeds at the reference height [m/s]
    pub wind_speeds: Vec<Real>,
    /// Meteorological wind directions [deg]
    pub wind_directions: Vec<Real>,
    /// Power-law shear exponent
    pub shear_exponent: Real,
    /// Height the wind speeds refer to [m]; `None` uses the first turbine
    /// type's hub height
    pub reference_height: Option<Real>,
    /// Ambient turbulence intensity, as a fraction
    pub turbulence_intensity: Real,
    /// Air density [kg/m³]
    pub air_density: Real,
}

impl AmbientConditions {
    pub fn new(wind_speeds: Vec<Real>, wind_directions: Vec<Real>) -> Self {
        Self {
            wind_speeds,
            wind_directions,
            shear_exponent: 0.12,
            reference_height: None,
            turbulence_intensity: 0.06,
            air_density: AIR_DENSITY_KGPM3,
        }
    }

    /// A single flow case.
    pub fn single(wind_speed: Real, wind_direction: Real) -> Self {
        Self::new(vec![wind_speed], vec![wind_direction])
    }

    pub fn with_shear(mut self, exponent: Real) -> Self {
        self.shear_exponent = exponent;
        self
    }

    pub fn with_turbulence_intensity(mut self, ti: Real) -> Self {
        self.turbulence_intensity = ti;
        self
    }

    pub fn with_reference_height(mut self, height: Length) -> Self {
        self.reference_height = Some(height.value);
        self
    }

    pub fn with_air_density(mut self, density: Density) -> Self {
        self.air_density = density.value;
        self
    }

    pub fn case_count(&self) -> usize {
        self.wind_speeds.len() * self.wind_directions.len()
    }

    /// All flow cases, direction-major.
    pub fn cases(&self) -> Vec<FlowCase> {
        self.wind_directions
            .iter()
            .flat_map(|&d| self.wind_speeds.iter().map(move |&s| (d, s)))
            .enumerate()
            .map(|(index, (direction_deg, wind_speed))| FlowCase {
                index,
                direction_deg,
                wind_speed,
            })
            .collect()
    }

    pub fn case(&self, index: usize) -> SolverResult<FlowCase> {
        let count = self.case_count();
        if index >= count {
            return Err(SolverError::CaseOutOfRange { index, count });
        }
        let n = self.wind_speeds.len();
        Ok(FlowCase {
            index,
            direction_deg: self.wind_directions[index / n],
            wind_speed: self.wind_speeds[index % n],
        })
    }

    pub fn validate(&self) -> SolverResult<()> {
        if self.wind_speeds.is_empty() || self.wind_directions.is_empty() {
            return Err(config("at least one wind speed and one wind direction are required"));
        }
        if let Some(s) = self
            .wind_speeds
            .iter()
            .find(|s| !s.is_finite() || **s < 0.0)
        {
            return Err(config(format!("wind speed {s} must be finite and non-negative")));
        }
        if let Some(d) = self.wind_directions.iter().find(|d| !d.is_finite()) {
            return Err(config(format!("wind direction {d} must be finite")));
        }
        if !self.shear_exponent.is_finite() {
            return Err(config("shear exponent must be finite"));
        }
        if let Some(h) = self.reference_height {
            if !(h.is_finite() && h > 0.0) {
                return Err(config(format!("reference height {h} must be positive")));
            }
        }
        if !(self.turbulence_intensity.is_finite()
            && (0.0..1.0).contains(&self.turbulence_intensity))
        {
            return Err(config(format!(
                "turbulence intensity {} must lie in [0, 1)",
                self.turbulence_intensity
            )));
        }
        if !(self.air_density.is_finite() && self.air_density > 0.0) {
            return Err(config(format!(
                "air density {} must be positive",
                self.air_density
            )));
        }
        Ok(())
    }

    /// Power-law freestream speed at height `z` for a reference speed.
    pub fn sheared_speed(&self, wind_speed: Real, z: Real, reference_height: Real) -> Real {
        if z <= 0.0 {
            return 0.0;
        }
        wind_speed * (z / reference_height).powf(self.shear_exponent)
    }
}

/// One (direction, speed) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowCase {
    pub index: usize,
    pub direction_deg: Real,
    pub wind_speed: Real,
}

fn config(what: impl Into<String>) -> SolverError {
    SolverError::Configuration { what: what.into() }
}
