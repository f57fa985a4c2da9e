//! Farm-specific error types.

use wf_core::{TurbineId, TurbineTypeId};

pub type FarmResult<T> = Result<T, FarmError>;

/// Layout and grid configuration errors. All of them are fatal for a solve.
#[derive(Debug, Clone, PartialEq)]
pub enum FarmError {
    /// A farm needs at least one turbine.
    EmptyFarm,

    /// A turbine type has non-physical geometry (zero rotor, negative hub).
    InvalidGeometry {
        turbine_type: TurbineTypeId,
        what: &'static str,
    },

    /// A turbine references a type that was never added.
    UnknownTurbineType {
        turbine: TurbineId,
        turbine_type: TurbineTypeId,
    },

    /// A turbine coordinate or control value is not finite or out of range.
    InvalidTurbine {
        turbine: TurbineId,
        what: &'static str,
    },

    /// Two turbines share the same ground position.
    CoincidentTurbines { first: TurbineId, second: TurbineId },

    /// Rotor-grid points of a turbine end up below the ground plane.
    RotorBelowGround { turbine: TurbineId },

    /// Grid or plane settings are unusable.
    InvalidGrid { what: &'static str },

    /// ID not found.
    IdNotFound { what: &'static str },
}

impl std::fmt::Display for FarmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FarmError::EmptyFarm => write!(f, "Farm has no turbines"),
            FarmError::InvalidGeometry { turbine_type, what } => {
                write!(f, "Turbine type {} has invalid geometry: {}", turbine_type, what)
            }
            FarmError::UnknownTurbineType {
                turbine,
                turbine_type,
            } => {
                write!(
                    f,
                    "Turbine {} refers to non-existent turbine type {}",
                    turbine, turbine_type
                )
            }
            FarmError::InvalidTurbine { turbine, what } => {
                write!(f, "Turbine {} is invalid: {}", turbine, what)
            }
            FarmError::CoincidentTurbines { first, second } => {
                write!(f, "Turbines {} and {} share the same position", first, second)
            }
            FarmError::RotorBelowGround { turbine } => {
                write!(f, "Rotor grid of turbine {} extends below ground", turbine)
            }
            FarmError::InvalidGrid { what } => write!(f, "Invalid grid: {}", what),
            FarmError::IdNotFound { what } => write!(f, "{} not found", what),
        }
    }
}

impl std::error::Error for FarmError {}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_core::Id;

    #[test]
    fn display_names_the_turbine() {
        let err = FarmError::RotorBelowGround {
            turbine: Id::from_index(3),
        };
        assert!(err.to_string().contains("turbine 3"));
    }
}
