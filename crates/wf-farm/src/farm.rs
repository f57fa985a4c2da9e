//! Core farm data structures.

use wf_core::units::{radians, Angle, Power};
use wf_core::{Real, TurbineId, TurbineTypeId};

use crate::error::{FarmError, FarmResult};
use crate::frame::Point;
use crate::validate;

/// Rotor and tower geometry shared by every turbine of one model.
///
/// The performance curve of the type is not stored here; the solver problem
/// attaches one per `TurbineTypeId`.
#[derive(Debug, Clone, PartialEq)]
pub struct TurbineType {
    pub id: TurbineTypeId,
    pub name: String,
    /// Rotor diameter [m]
    pub rotor_diameter: Real,
    /// Hub height above ground [m]
    pub hub_height: Real,
}

impl TurbineType {
    pub fn rotor_radius(&self) -> Real {
        0.5 * self.rotor_diameter
    }

    /// Swept rotor area [m²]
    pub fn rotor_area(&self) -> Real {
        std::f64::consts::PI * self.rotor_radius() * self.rotor_radius()
    }
}

/// A placed turbine with its control inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Turbine {
    pub id: TurbineId,
    pub name: String,
    /// Ground position, world frame [m]
    pub x: Real,
    pub y: Real,
    pub turbine_type: TurbineTypeId,
    /// Yaw misalignment relative to the wind [rad], positive counter-clockwise
    pub yaw: Real,
    /// Optional derate cap on electrical power [W]
    pub power_limit: Option<Real>,
}

/// The farm: a validated collection of turbine types and turbines.
///
/// Turbines and types are stored in vectors indexed by their IDs. The farm is
/// shared read-only by every flow case of a solve.
#[derive(Debug, Clone)]
pub struct Farm {
    pub(crate) types: Vec<TurbineType>,
    pub(crate) turbines: Vec<Turbine>,
}

impl Farm {
    /// Return all turbines, in the order they were added.
    pub fn turbines(&self) -> &[Turbine] {
        &self.turbines
    }

    /// Return all turbine types.
    pub fn turbine_types(&self) -> &[TurbineType] {
        &self.types
    }

    /// Get a turbine by ID (returns None if ID out of bounds).
    pub fn turbine(&self, id: TurbineId) -> Option<&Turbine> {
        self.turbines.get(id.slot())
    }

    /// Get a turbine type by ID (returns None if ID out of bounds).
    pub fn turbine_type(&self, id: TurbineTypeId) -> Option<&TurbineType> {
        self.types.get(id.slot())
    }

    /// Geometry of the type a turbine is built from.
    pub fn geometry(&self, id: TurbineId) -> Option<&TurbineType> {
        let turbine = self.turbine(id)?;
        self.turbine_type(turbine.turbine_type)
    }

    /// Hub centre in world coordinates.
    pub fn hub(&self, id: TurbineId) -> Option<Point> {
        let turbine = self.turbine(id)?;
        let geometry = self.turbine_type(turbine.turbine_type)?;
        Some(Point::new(turbine.x, turbine.y, geometry.hub_height))
    }

    /// Change a turbine's yaw between solves.
    pub fn set_yaw(&mut self, id: TurbineId, yaw: Angle) -> FarmResult<()> {
        let yaw = radians(yaw);
        validate::validate_yaw(id, yaw)?;
        let turbine = self
            .turbines
            .get_mut(id.slot())
            .ok_or(FarmError::IdNotFound { what: "turbine" })?;
        turbine.yaw = yaw;
        Ok(())
    }

    /// Cap (or uncap, with `None`) a turbine's electrical power between solves.
    pub fn set_power_limit(&mut self, id: TurbineId, limit: Option<Power>) -> FarmResult<()> {
        let limit = limit.map(|p| p.value);
        validate::validate_power_limit(id, limit)?;
        let turbine = self
            .turbines
            .get_mut(id.slot())
            .ok_or(FarmError::IdNotFound { what: "turbine" })?;
        turbine.power_limit = limit;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_core::Id;

    #[test]
    fn rotor_area_of_unit_type() {
        let t = TurbineType {
            id: Id::from_index(0),
            name: "t".into(),
            rotor_diameter: 2.0,
            hub_height: 10.0,
        };
        assert!((t.rotor_area() - std::f64::consts::PI).abs() < 1e-12);
    }
}
