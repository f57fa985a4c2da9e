//! Incremental farm builder.

use wf_core::units::{radians, Angle, Length, Power};
use wf_core::{TurbineId, TurbineTypeId};

use crate::error::FarmResult;
use crate::farm::{Farm, Turbine, TurbineType};
use crate::validate;

/// Builder for constructing a farm incrementally.
///
/// Use `add_turbine_type` and `add_turbine` to build up the layout,
/// then call `build()` to validate and freeze it into a `Farm`.
#[derive(Debug, Default)]
pub struct FarmBuilder {
    types: Vec<TurbineType>,
    turbines: Vec<Turbine>,
    next_type_id: u32,
    next_turbine_id: u32,
}

impl FarmBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a turbine type and return its ID.
    pub fn add_turbine_type(
        &mut self,
        name: impl Into<String>,
        rotor_diameter: Length,
        hub_height: Length,
    ) -> TurbineTypeId {
        let id = TurbineTypeId::from_index(self.next_type_id);
        self.next_type_id += 1;
        self.types.push(TurbineType {
            id,
            name: name.into(),
            rotor_diameter: rotor_diameter.value,
            hub_height: hub_height.value,
        });
        id
    }

    /// Place a turbine of the given type at a ground position.
    ///
    /// The turbine starts aligned with the wind and without a power limit.
    pub fn add_turbine(
        &mut self,
        name: impl Into<String>,
        x: Length,
        y: Length,
        turbine_type: TurbineTypeId,
    ) -> TurbineId {
        let id = TurbineId::from_index(self.next_turbine_id);
        self.next_turbine_id += 1;
        self.turbines.push(Turbine {
            id,
            name: name.into(),
            x: x.value,
            y: y.value,
            turbine_type,
            yaw: 0.0,
            power_limit: None,
        });
        id
    }

    /// Set a turbine's yaw misalignment. Checked in `build()`.
    pub fn set_yaw(&mut self, id: TurbineId, yaw: Angle) {
        if let Some(turbine) = self.turbines.get_mut(id.slot()) {
            turbine.yaw = radians(yaw);
        }
    }

    /// Derate a turbine. Checked in `build()`.
    pub fn set_power_limit(&mut self, id: TurbineId, limit: Power) {
        if let Some(turbine) = self.turbines.get_mut(id.slot()) {
            turbine.power_limit = Some(limit.value);
        }
    }

    /// Build and validate the farm.
    pub fn build(self) -> FarmResult<Farm> {
        validate::validate_types(&self.types)?;
        validate::validate_turbines(&self.types, &self.turbines)?;

        Ok(Farm {
            types: self.types,
            turbines: self.turbines,
        })
    }
}
