//! Wind-aligned coordinate frame.
//!
//! Wind direction follows the meteorological convention: the direction the
//! wind blows *from*, in degrees clockwise from north (+y). A direction of
//! 270° is a westerly, flowing toward +x.
//!
//! In the wind frame `x` points downstream, `y` is cross-stream (to the left
//! looking downstream) and `z` is unchanged height above ground.

use nalgebra::{Point3, Vector3};
use wf_core::Real;

use crate::error::{FarmError, FarmResult};

pub type Point = Point3<Real>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindFrame {
    direction_deg: Real,
    /// Unit flow vector (where the wind goes), world x/y
    fx: Real,
    fy: Real,
}

impl WindFrame {
    pub fn new(direction_deg: Real) -> FarmResult<Self> {
        if !direction_deg.is_finite() {
            return Err(FarmError::InvalidGrid {
                what: "wind direction must be finite",
            });
        }
        let (s, c) = sin_cos_deg(direction_deg);
        Ok(Self {
            direction_deg,
            fx: -s,
            fy: -c,
        })
    }

    pub fn direction_deg(&self) -> Real {
        self.direction_deg
    }

    /// World → wind frame.
    pub fn to_wind(&self, p: &Point) -> Point {
        Point::new(
            p.x * self.fx + p.y * self.fy,
            -p.x * self.fy + p.y * self.fx,
            p.z,
        )
    }

    /// Wind frame → world.
    pub fn to_world(&self, p: &Point) -> Point {
        Point::new(
            p.x * self.fx - p.y * self.fy,
            p.x * self.fy + p.y * self.fx,
            p.z,
        )
    }

    /// World-frame velocity vector of a streamwise speed `u`.
    pub fn world_velocity(&self, u: Real) -> Vector3<Real> {
        Vector3::new(u * self.fx, u * self.fy, 0.0)
    }
}

/// `(sin, cos)` of an angle in degrees, exact on the compass points.
fn sin_cos_deg(angle_deg: Real) -> (Real, Real) {
    let a = angle_deg.rem_euclid(360.0);
    if a == 0.0 {
        (0.0, 1.0)
    } else if a == 90.0 {
        (1.0, 0.0)
    } else if a == 180.0 {
        (0.0, -1.0)
    } else if a == 270.0 {
        (-1.0, 0.0)
    } else {
        a.to_radians().sin_cos()
    }
}
