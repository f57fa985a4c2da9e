//! Cut-plane point generation.
//!
//! Planes are laid out in the wind frame around the farm extent and handed to
//! the solver's sampling API as world-frame points.

use wf_core::Real;

use crate::error::{FarmError, FarmResult};
use crate::farm::Farm;
use crate::frame::{Point, WindFrame};

/// Upstream margin in rotor diameters.
const UPSTREAM_MARGIN_D: Real = 2.0;
/// Downstream margin in rotor diameters.
const DOWNSTREAM_MARGIN_D: Real = 10.0;
/// Cross-stream margin in rotor diameters.
const LATERAL_MARGIN_D: Real = 2.0;
/// Vertical extent as a multiple of the tallest hub.
const VERTICAL_EXTENT_HUB: Real = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaneKind {
    /// Parallel to the ground at `height`; axes are (downstream, cross-stream).
    Horizontal { height: Real },
    /// Vertical, along the wind at cross-stream offset `cross_stream`; axes are
    /// (downstream, height).
    Streamwise { cross_stream: Real },
    /// Vertical, across the wind at `downstream`; axes are (cross-stream, height).
    CrossStream { downstream: Real },
}

#[derive(Debug, Clone)]
pub struct CutPlane {
    pub kind: PlaneKind,
    pub frame: WindFrame,
    /// First in-plane axis, wind frame [m]
    pub axis1: Vec<Real>,
    /// Second in-plane axis, wind frame [m]
    pub axis2: Vec<Real>,
}

struct Extent {
    x: (Real, Real),
    y: (Real, Real),
    z: (Real, Real),
}

impl CutPlane {
    /// Build a plane spanning the farm with `n1 × n2` points.
    pub fn around_farm(
        farm: &Farm,
        frame: WindFrame,
        kind: PlaneKind,
        n1: usize,
        n2: usize,
    ) -> FarmResult<Self> {
        if n1 < 2 || n2 < 2 {
            return Err(FarmError::InvalidGrid {
                what: "cut plane needs at least 2 points per axis",
            });
        }
        let offset = match kind {
            PlaneKind::Horizontal { height } => height,
            PlaneKind::Streamwise { cross_stream } => cross_stream,
            PlaneKind::CrossStream { downstream } => downstream,
        };
        if !offset.is_finite() {
            return Err(FarmError::InvalidGrid {
                what: "cut plane offset must be finite",
            });
        }
        if matches!(kind, PlaneKind::Horizontal { height } if height < 0.0) {
            return Err(FarmError::InvalidGrid {
                what: "horizontal plane below ground",
            });
        }

        let extent = farm_extent(farm, &frame)?;
        let (range1, range2) = match kind {
            PlaneKind::Horizontal { .. } => (extent.x, extent.y),
            PlaneKind::Streamwise { .. } => (extent.x, extent.z),
            PlaneKind::CrossStream { .. } => (extent.y, extent.z),
        };

        Ok(Self {
            kind,
            frame,
            axis1: linspace(range1.0, range1.1, n1),
            axis2: linspace(range2.0, range2.1, n2),
        })
    }

    pub fn len(&self) -> usize {
        self.axis1.len() * self.axis2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// In-plane coordinates, `axis1` varying fastest.
    pub fn coordinates(&self) -> Vec<(Real, Real)> {
        self.axis2
            .iter()
            .flat_map(|&b| self.axis1.iter().map(move |&a| (a, b)))
            .collect()
    }

    /// World-frame sample points, same order as `coordinates()`.
    pub fn points(&self) -> Vec<Point> {
        self.coordinates()
            .into_iter()
            .map(|(a, b)| {
                let local = match self.kind {
                    PlaneKind::Horizontal { height } => Point::new(a, b, height),
                    PlaneKind::Streamwise { cross_stream } => Point::new(a, cross_stream, b),
                    PlaneKind::CrossStream { downstream } => Point::new(downstream, a, b),
                };
                self.frame.to_world(&local)
            })
            .collect()
    }
}

fn farm_extent(farm: &Farm, frame: &WindFrame) -> FarmResult<Extent> {
    let mut x = (Real::INFINITY, Real::NEG_INFINITY);
    let mut y = (Real::INFINITY, Real::NEG_INFINITY);
    let mut d_max: Real = 0.0;
    let mut hub_max: Real = 0.0;

    for turbine in farm.turbines() {
        let hub = farm
            .hub(turbine.id)
            .ok_or(FarmError::IdNotFound { what: "turbine" })?;
        let geometry = farm
            .geometry(turbine.id)
            .ok_or(FarmError::IdNotFound {
                what: "turbine type",
            })?;
        let local = frame.to_wind(&hub);
        x = (x.0.min(local.x), x.1.max(local.x));
        y = (y.0.min(local.y), y.1.max(local.y));
        d_max = d_max.max(geometry.rotor_diameter);
        hub_max = hub_max.max(geometry.hub_height);
    }

    if farm.turbines().is_empty() {
        return Err(FarmError::EmptyFarm);
    }

    Ok(Extent {
        x: (x.0 - UPSTREAM_MARGIN_D * d_max, x.1 + DOWNSTREAM_MARGIN_D * d_max),
        y: (y.0 - LATERAL_MARGIN_D * d_max, y.1 + LATERAL_MARGIN_D * d_max),
        z: (0.0, VERTICAL_EXTENT_HUB * hub_max),
    })
}

fn linspace(start: Real, end: Real, n: usize) -> Vec<Real> {
    let step = (end - start) / (n - 1) as Real;
    (0..n)
        .map(|i| if i + 1 == n { end } else { start + step * i as Real })
        .collect()
}
