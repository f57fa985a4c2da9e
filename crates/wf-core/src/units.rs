// wf-core/src/units.rs

use uom::si::f64::{
    Angle as UomAngle, Length as UomLength, MassDensity as UomMassDensity, Power as UomPower,
};

// Public canonical unit types (SI, f64)
pub type Angle = UomAngle;
pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type Power = UomPower;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn deg(v: f64) -> Angle {
    use uom::si::angle::degree;
    Angle::new::<degree>(v)
}

#[inline]
pub fn kgpm3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

#[inline]
pub fn watts(v: f64) -> Power {
    use uom::si::power::watt;
    Power::new::<watt>(v)
}

/// Angle in radians as a bare float, for the model hot paths.
#[inline]
pub fn radians(a: Angle) -> f64 {
    use uom::si::angle::radian;
    a.get::<radian>()
}

pub mod constants {
    /// Sea-level standard air density [kg/m³]
    pub const AIR_DENSITY_KGPM3: f64 = 1.225;
}
