//! Sample grids.
//!
//! A `GridSpec` is the configured description of where the flow is sampled:
//! a rotor-grid resolution for every turbine plus any number of free points
//! in world coordinates. A `CaseGrid` is that description materialised for
//! one wind direction: all points in the wind frame, rotor points first,
//! with ownership and validity fixed before the solve starts.

use std::ops::Range;
use wf_core::{Real, TurbineId};

use crate::error::{FarmError, FarmResult};
use crate::farm::Farm;
use crate::frame::{Point, WindFrame};

/// Rotor grid half-extent as a fraction of the rotor radius.
pub const ROTOR_RADIUS_RATIO: Real = 0.5;

/// Default rotor grid resolution (3×3).
pub const DEFAULT_POINTS_PER_SIDE: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    /// Rotor grid resolution per side (n×n points per rotor)
    pub points_per_side: usize,
    /// Free sample points, world frame
    pub points: Vec<Point>,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self::rotor(DEFAULT_POINTS_PER_SIDE)
    }
}

impl GridSpec {
    /// Rotor grids only.
    pub fn rotor(points_per_side: usize) -> Self {
        Self {
            points_per_side,
            points: Vec::new(),
        }
    }

    /// Same rotor resolution, with free points appended.
    pub fn with_points(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        self.points.extend(points);
        self
    }
}

/// Why a free sample point was left out of the solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    NonFinite,
    BelowGround,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointStatus {
    Valid,
    Rejected(RejectReason),
}

impl PointStatus {
    pub fn is_valid(self) -> bool {
        matches!(self, PointStatus::Valid)
    }
}

#[derive(Debug, Clone)]
pub struct CaseGrid {
    coords: Vec<Point>,
    owners: Vec<Option<TurbineId>>,
    status: Vec<PointStatus>,
    /// Rotor point range per turbine slot
    rotor_ranges: Vec<Range<usize>>,
    free: Range<usize>,
}

impl CaseGrid {
    /// Materialise `spec` for one wind direction.
    ///
    /// Rotor points are laid out in the plane normal to the wind, centred on
    /// each hub. Free points are rotated into the wind frame; malformed ones
    /// are kept in place but marked rejected.
    pub fn build(farm: &Farm, spec: &GridSpec, frame: &WindFrame) -> FarmResult<Self> {
        let n = spec.points_per_side;
        if n == 0 {
            return Err(FarmError::InvalidGrid {
                what: "rotor grid needs at least one point per side",
            });
        }

        let rotor_count = farm.turbines().len() * n * n;
        let total = rotor_count + spec.points.len();
        let mut coords = Vec::with_capacity(total);
        let mut owners = Vec::with_capacity(total);
        let mut status = Vec::with_capacity(total);
        let mut rotor_ranges = Vec::with_capacity(farm.turbines().len());

        for turbine in farm.turbines() {
            let geometry = farm
                .turbine_type(turbine.turbine_type)
                .ok_or(FarmError::IdNotFound {
                    what: "turbine type",
                })?;
            let hub = frame.to_wind(&Point::new(turbine.x, turbine.y, geometry.hub_height));
            let offsets = rotor_offsets(n, ROTOR_RADIUS_RATIO * geometry.rotor_radius());

            let start = coords.len();
            for &dy in &offsets {
                for &dz in &offsets {
                    let z = hub.z + dz;
                    if z < 0.0 {
                        return Err(FarmError::RotorBelowGround {
                            turbine: turbine.id,
                        });
                    }
                    coords.push(Point::new(hub.x, hub.y + dy, z));
                    owners.push(Some(turbine.id));
                    status.push(PointStatus::Valid);
                }
            }
            rotor_ranges.push(start..coords.len());
        }

        let free_start = coords.len();
        for p in &spec.points {
            let point_status = classify(p);
            let local = if point_status.is_valid() {
                frame.to_wind(p)
            } else {
                *p
            };
            coords.push(local);
            owners.push(None);
            status.push(point_status);
        }

        Ok(Self {
            coords,
            owners,
            status,
            rotor_ranges,
            free: free_start..total,
        })
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// All points, wind frame.
    pub fn coords(&self) -> &[Point] {
        &self.coords
    }

    pub fn owner(&self, index: usize) -> Option<TurbineId> {
        self.owners.get(index).copied().flatten()
    }

    pub fn status(&self) -> &[PointStatus] {
        &self.status
    }

    /// Indices of a turbine's rotor points (empty for unknown IDs).
    pub fn rotor_points(&self, turbine: TurbineId) -> Range<usize> {
        self.rotor_ranges
            .get(turbine.slot())
            .cloned()
            .unwrap_or(0..0)
    }

    /// Indices of the free points, in `GridSpec::points` order.
    pub fn free_points(&self) -> Range<usize> {
        self.free.clone()
    }
}

fn classify(p: &Point) -> PointStatus {
    if !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
        PointStatus::Rejected(RejectReason::NonFinite)
    } else if p.z < 0.0 {
        PointStatus::Rejected(RejectReason::BelowGround)
    } else {
        PointStatus::Valid
    }
}

/// Evenly spaced offsets on `[-half, half]`; a single point sits on the hub.
fn rotor_offsets(n: usize, half: Real) -> Vec<Real> {
    if n == 1 {
        return vec![0.0];
    }
    let step = 2.0 * half / (n - 1) as Real;
    (0..n).map(|i| -half + step * i as Real).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::FarmBuilder;
    use wf_core::units::m;

    fn farm() -> Farm {
        let mut builder = FarmBuilder::new();
        let ty = builder.add_turbine_type("T", m(126.0), m(90.0));
        builder.add_turbine("A", m(0.0), m(0.0), ty);
        builder.add_turbine("B", m(630.0), m(0.0), ty);
        builder.build().unwrap()
    }

    #[test]
    fn rotor_offsets_are_symmetric() {
        let offsets = rotor_offsets(3, 31.5);
        assert_eq!(offsets, vec![-31.5, 0.0, 31.5]);
        assert_eq!(rotor_offsets(1, 31.5), vec![0.0]);
    }

    #[test]
    fn rotor_points_are_owned_and_contiguous() {
        let farm = farm();
        let frame = WindFrame::new(270.0).unwrap();
        let grid = CaseGrid::build(&farm, &GridSpec::rotor(3), &frame).unwrap();

        assert_eq!(grid.len(), 18);
        let b = farm.turbines()[1].id;
        let range = grid.rotor_points(b);
        assert_eq!(range, 9..18);
        for i in range {
            assert_eq!(grid.owner(i), Some(b));
            assert_eq!(grid.coords()[i].x, 630.0);
        }
        assert!(grid.free_points().is_empty());
    }

    #[test]
    fn malformed_free_points_are_rejected_not_fatal() {
        let farm = farm();
        let frame = WindFrame::new(270.0).unwrap();
        let spec = GridSpec::rotor(1).with_points([
            Point::new(100.0, 0.0, 90.0),
            Point::new(Real::NAN, 0.0, 90.0),
            Point::new(100.0, 0.0, -5.0),
        ]);
        let grid = CaseGrid::build(&farm, &spec, &frame).unwrap();

        let free = grid.free_points();
        assert_eq!(free, 2..5);
        assert_eq!(grid.status()[2], PointStatus::Valid);
        assert_eq!(
            grid.status()[3],
            PointStatus::Rejected(RejectReason::NonFinite)
        );
        assert_eq!(
            grid.status()[4],
            PointStatus::Rejected(RejectReason::BelowGround)
        );
        assert_eq!(grid.owner(2), None);
    }

    #[test]
    fn zero_resolution_is_a_configuration_error() {
        let farm = farm();
        let frame = WindFrame::new(270.0).unwrap();
        assert!(matches!(
            CaseGrid::build(&farm, &GridSpec::rotor(0), &frame),
            Err(FarmError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn low_hub_is_rejected() {
        let mut builder = FarmBuilder::new();
        let ty = builder.add_turbine_type("T", m(126.0), m(20.0));
        builder.add_turbine("A", m(0.0), m(0.0), ty);
        let farm = builder.build().unwrap();
        let frame = WindFrame::new(270.0).unwrap();
        assert!(matches!(
            CaseGrid::build(&farm, &GridSpec::rotor(3), &frame),
            Err(FarmError::RotorBelowGround { .. })
        ));
    }
}
