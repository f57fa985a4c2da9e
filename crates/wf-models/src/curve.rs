//! Turbine performance curves.

use crate::common::MIN_THRUST_COEFFICIENT;
use crate::error::{ModelError, ModelResult};
use wf_core::Real;

/// Thrust and power coefficients as pure functions of rotor-averaged speed.
///
/// Implementations must be deterministic; the solver shares one curve across
/// every case it solves in parallel.
pub trait PerformanceCurve: Send + Sync {
    /// Curve name for diagnostics.
    fn name(&self) -> &str;

    /// Thrust coefficient at `speed` [m/s].
    fn thrust_coefficient(&self, speed: Real) -> Real;

    /// Power coefficient at `speed` [m/s].
    fn power_coefficient(&self, speed: Real) -> Real;

    /// Inclusive speed range over which the curve is defined, if bounded.
    fn operating_range(&self) -> Option<(Real, Real)> {
        None
    }
}

/// Piecewise-linear curve over strictly increasing wind speeds.
///
/// Outside `[speeds[0], speeds[n-1]]` (below cut-in, above cut-out) the curve
/// does not extrapolate: thrust is [`MIN_THRUST_COEFFICIENT`] and power is 0.
#[derive(Debug, Clone, PartialEq)]
pub struct TabulatedCurve {
    name: String,
    speeds: Vec<Real>,
    cp: Vec<Real>,
    ct: Vec<Real>,
}

impl TabulatedCurve {
    pub fn new(
        name: impl Into<String>,
        speeds: Vec<Real>,
        cp: Vec<Real>,
        ct: Vec<Real>,
    ) -> ModelResult<Self> {
        if speeds.len() < 2 {
            return Err(ModelError::InvalidCurve {
                what: "curve needs at least two points",
            });
        }
        if cp.len() != speeds.len() || ct.len() != speeds.len() {
            return Err(ModelError::InvalidCurve {
                what: "speed, cp and ct tables differ in length",
            });
        }
        if speeds.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(ModelError::InvalidCurve {
                what: "speeds must be finite and non-negative",
            });
        }
        if speeds.windows(2).any(|w| w[1] <= w[0]) {
            return Err(ModelError::InvalidCurve {
                what: "speeds must be strictly increasing",
            });
        }
        if cp.iter().chain(ct.iter()).any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ModelError::InvalidCurve {
                what: "coefficients must be finite and non-negative",
            });
        }

        if ct.iter().any(|v| *v > 1.0) {
            return Err(ModelError::InvalidCurve {
                what: "thrust coefficients must not exceed 1",
            });
        }

        Ok(Self {
            name: name.into(),
            speeds,
            cp,
            ct,
        })
    }

    pub fn speeds(&self) -> &[Real] {
        &self.speeds
    }

    pub fn cp(&self) -> &[Real] {
        &self.cp
    }

    pub fn ct(&self) -> &[Real] {
        &self.ct
    }

    /// Interpolate `table` at `speed`, or `None` outside the tabulated range.
    fn interpolate(&self, table: &[Real], speed: Real) -> Option<Real> {
        let first = self.speeds[0];
        let last = self.speeds[self.speeds.len() - 1];
        if !(speed >= first && speed <= last) {
            return None;
        }
        if speed == last {
            return table.last().copied();
        }

        // First index with speeds[i] > speed, kept inside [1, n-1].
        let upper = self
            .speeds
            .partition_point(|s| *s <= speed)
            .clamp(1, self.speeds.len() - 1);
        let lower = upper - 1;

        let (s0, s1) = (self.speeds[lower], self.speeds[upper]);
        let t = (speed - s0) / (s1 - s0);
        Some(table[lower] + t * (table[upper] - table[lower]))
    }
}

impl PerformanceCurve for TabulatedCurve {
    fn name(&self) -> &str {
        &self.name
    }

    fn thrust_coefficient(&self, speed: Real) -> Real {
        self.interpolate(&self.ct, speed)
            .unwrap_or(MIN_THRUST_COEFFICIENT)
    }

    fn power_coefficient(&self, speed: Real) -> Real {
        self.interpolate(&self.cp, speed).unwrap_or(0.0)
    }

    fn operating_range(&self) -> Option<(Real, Real)> {
        Some((self.speeds[0], self.speeds[self.speeds.len() - 1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> TabulatedCurve {
        TabulatedCurve::new(
            "test",
            vec![3.0, 5.0, 11.0, 25.0],
            vec![0.0, 0.45, 0.45, 0.05],
            vec![0.9, 0.8, 0.7, 0.05],
        )
        .unwrap()
    }

    #[test]
    fn interpolates_between_points() {
        let c = curve();
        assert!((c.thrust_coefficient(4.0) - 0.85).abs() < 1e-12);
        assert!((c.power_coefficient(8.0) - 0.45).abs() < 1e-12);
        assert!((c.thrust_coefficient(8.0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn exact_at_knots_and_edges() {
        let c = curve();
        assert_eq!(c.thrust_coefficient(3.0), 0.9);
        assert_eq!(c.thrust_coefficient(5.0), 0.8);
        assert_eq!(c.thrust_coefficient(25.0), 0.05);
        assert_eq!(c.power_coefficient(25.0), 0.05);
    }

    #[test]
    fn outside_range_does_not_extrapolate() {
        let c = curve();
        for speed in [0.0, 2.99, 25.01, 40.0, Real::NAN] {
            assert_eq!(c.thrust_coefficient(speed), MIN_THRUST_COEFFICIENT);
            assert_eq!(c.power_coefficient(speed), 0.0);
        }
        assert_eq!(c.operating_range(), Some((3.0, 25.0)));
    }

    #[test]
    fn rejects_bad_tables() {
        let bad = [
            (vec![3.0], vec![0.1], vec![0.1]),
            (vec![3.0, 4.0], vec![0.1], vec![0.1, 0.2]),
            (vec![3.0, 3.0], vec![0.1, 0.2], vec![0.1, 0.2]),
            (vec![5.0, 4.0], vec![0.1, 0.2], vec![0.1, 0.2]),
            (vec![3.0, 4.0], vec![0.1, -0.2], vec![0.1, 0.2]),
            (vec![3.0, Real::NAN], vec![0.1, 0.2], vec![0.1, 0.2]),
            (vec![3.0, 4.0], vec![0.1, 0.2], vec![1.2, 0.8]),
        ];
        for (speeds, cp, ct) in bad {
            assert!(matches!(
                TabulatedCurve::new("bad", speeds, cp, ct),
                Err(ModelError::InvalidCurve { .. })
            ));
        }
    }
}
