//! Sequential wake solver.
//!
//! One flow case runs in four stages:
//! 1. INIT: every valid point starts at the sheared freestream.
//! 2. ORDERED: turbines are sorted by wind-frame `(x, y, z)` so the input
//!    order of the layout never matters.
//! 3. PROCESSING: each turbine, in order, resolves its operating state from
//!    its rotor points, then folds its deflected wake into every point strictly
//!    downstream of its hub (rotor points of other turbines included).
//! 4. DONE: per-turbine records and per-point speeds are collected.
//!
//! Within one turbine's pass every point is independent, so the pass runs
//! data-parallel; the fold itself is applied in turbine order at each point,
//! which keeps repeated solves bit-identical.

use crate::ambient::FlowCase;
use crate::anomaly::{Anomaly, AnomalyKind};
use crate::arena::{TurbineArena, TurbineRecord};
use crate::error::{SolverError, SolverResult};
use crate::problem::WakeProblem;
use crate::solution::{CaseSolution, PointSample, TurbineSolution};
use rayon::prelude::*;
use tracing::{debug, info, info_span};
use wf_core::timing::Timer;
use wf_core::{Real, TurbineId, cubic_mean};
use wf_farm::{CaseGrid, Farm, Point, PointStatus, WindFrame};
use wf_models::{AmbientState, TurbineState, resolve_operating_state};

/// Solve every flow case of the problem.
///
/// Cases run in parallel; results come back in case order.
pub fn solve(problem: &WakeProblem) -> SolverResult<Vec<CaseSolution>> {
    problem.validate()?;

    let cases = problem.ambient.cases();
    info!(
        cases = cases.len(),
        turbines = problem.farm.turbines().len(),
        "solving wake problem"
    );

    cases
        .par_iter()
        .map(|case| run_case(problem, case))
        .collect()
}

/// Solve a single flow case by index.
pub fn solve_case(problem: &WakeProblem, index: usize) -> SolverResult<CaseSolution> {
    problem.validate()?;
    let case = problem.ambient.case(index)?;
    run_case(problem, &case)
}

fn run_case(problem: &WakeProblem, case: &FlowCase) -> SolverResult<CaseSolution> {
    let timer = Timer::start("case");
    let _span = info_span!(
        "case",
        index = case.index,
        direction = case.direction_deg,
        speed = case.wind_speed
    )
    .entered();

    let frame = WindFrame::new(case.direction_deg)?;
    let grid = CaseGrid::build(&problem.farm, problem.grid(), &frame)?;
    let z_ref = problem.reference_height();
    let mut anomalies = Vec::new();

    // INIT
    let freestream: Vec<Real> = grid
        .coords()
        .iter()
        .zip(grid.status())
        .map(|(p, status)| {
            if status.is_valid() {
                problem.ambient.sheared_speed(case.wind_speed, p.z, z_ref)
            } else {
                0.0
            }
        })
        .collect();
    for i in grid.free_points() {
        if let PointStatus::Rejected(reason) = grid.status()[i] {
            let anomaly = Anomaly {
                case: case.index,
                turbine: None,
                point: Some(i),
                kind: AnomalyKind::RejectedPoint { reason },
            };
            anomaly.log();
            anomalies.push(anomaly);
        }
    }
    let mut field = freestream.clone();

    // ORDERED
    let order = downstream_order(&problem.farm, &frame)?;
    let mut arena = TurbineArena::with_capacity(problem.farm.turbines().len());
    let ambient = AmbientState {
        turbulence_intensity: problem.ambient.turbulence_intensity,
    };

    // PROCESSING
    for (rank, &(id, hub)) in order.iter().enumerate() {
        let turbine = problem.farm.turbine(id).ok_or_else(|| missing("turbine", id))?;
        let geometry = problem
            .farm
            .geometry(id)
            .ok_or_else(|| missing("turbine type of", id))?;
        let curve = problem
            .curve(turbine.turbine_type)
            .ok_or_else(|| missing("performance curve of", id))?;

        let inflow = cubic_mean(&field[grid.rotor_points(id)]);
        if !inflow.is_finite() {
            let anomaly = Anomaly {
                case: case.index,
                turbine: Some(id),
                point: None,
                kind: AnomalyKind::NonFiniteInflow { value: inflow },
            };
            anomaly.log();
            anomalies.push(anomaly);
        }

        let operating = resolve_operating_state(
            curve,
            inflow,
            turbine.yaw,
            geometry.rotor_area(),
            problem.ambient.air_density,
            &problem.models.power,
            turbine.power_limit,
        );
        arena.insert(
            id,
            TurbineRecord {
                order: rank,
                hub,
                operating,
                yaw: turbine.yaw,
            },
        )?;

        debug!(
            turbine = %turbine.name,
            rank,
            inflow = operating.inflow_speed,
            ct = operating.ct,
            power = operating.power,
            "turbine resolved"
        );

        let state = TurbineState {
            diameter: geometry.rotor_diameter,
            yaw: turbine.yaw,
            ct: operating.ct,
        };
        let trajectory = problem.models.deflection.trajectory(&state, &ambient);
        let wake = problem.models.velocity.wake(&state, &ambient);
        let combination = problem.models.combination;
        let coords = grid.coords();
        let status = grid.status();

        let pass_anomalies: Vec<Anomaly> = field
            .par_iter_mut()
            .enumerate()
            .filter_map(|(i, velocity)| {
                if !status[i].is_valid() || !(coords[i].x > hub.x) {
                    return None;
                }
                let raw = wake.raw_deficit_at(&coords[i], &hub, &trajectory);
                let (deficit, issue) = checked_deficit(raw);
                let combined = combination.combine(*velocity, freestream[i], deficit);
                *velocity = combined.velocity;

                issue
                    .or(combined.clamped_from.map(|raw| AnomalyKind::VelocityClamped {
                        raw,
                        clamped: combined.velocity,
                    }))
                    .map(|kind| Anomaly {
                        case: case.index,
                        turbine: Some(id),
                        point: Some(i),
                        kind,
                    })
            })
            .collect();

        for anomaly in &pass_anomalies {
            anomaly.log();
        }
        anomalies.extend(pass_anomalies);
    }

    if !arena.is_complete() {
        return Err(SolverError::InvalidState {
            what: format!("case {} left turbines unresolved", case.index),
        });
    }

    // DONE
    let turbines = problem
        .farm
        .turbines()
        .iter()
        .map(|t| {
            let record = arena.get(t.id).ok_or_else(|| missing("record of", t.id))?;
            let op = record.operating;
            Ok(TurbineSolution {
                id: t.id,
                name: t.name.clone(),
                effective_speed: op.inflow_speed,
                thrust_coefficient: op.ct,
                effective_thrust: op.effective_ct,
                axial_induction: op.axial_induction,
                power_coefficient: op.cp,
                power: op.power,
            })
        })
        .collect::<SolverResult<Vec<_>>>()?;

    let points = grid
        .free_points()
        .zip(problem.grid().points.iter())
        .map(|(i, position)| {
            let status = grid.status()[i];
            let u = status.is_valid().then(|| field[i]);
            PointSample {
                position: *position,
                status,
                u,
                velocity: u.map(|u| frame.world_velocity(u)),
            }
        })
        .collect();

    let elapsed_s = timer.stop();
    let solution = CaseSolution {
        case: *case,
        turbines,
        points,
        anomalies,
        field,
        elapsed_s,
    };
    info!(
        farm_power = solution.farm_power(),
        anomalies = solution.anomalies.len(),
        elapsed_s,
        "case solved"
    );
    Ok(solution)
}

/// Turbines with their wind-frame hubs, upstream first.
///
/// Ties in `x` break on `y`, then `z`, so the result does not depend on the
/// layout's input order.
fn downstream_order(farm: &Farm, frame: &WindFrame) -> SolverResult<Vec<(TurbineId, Point)>> {
    let mut order = farm
        .turbines()
        .iter()
        .map(|t| {
            let geometry = farm
                .geometry(t.id)
                .ok_or_else(|| missing("turbine type of", t.id))?;
            let hub = frame.to_wind(&Point::new(t.x, t.y, geometry.hub_height));
            Ok((t.id, hub))
        })
        .collect::<SolverResult<Vec<_>>>()?;

    order.sort_by(|(_, a), (_, b)| {
        a.x.total_cmp(&b.x)
            .then(a.y.total_cmp(&b.y))
            .then(a.z.total_cmp(&b.z))
    });
    Ok(order)
}

/// Deficit to combine, plus the anomaly if the raw value was unusable.
fn checked_deficit(raw: Real) -> (Real, Option<AnomalyKind>) {
    if !raw.is_finite() {
        (0.0, Some(AnomalyKind::NonFiniteDeficit { value: raw }))
    } else if !(0.0..=1.0).contains(&raw) {
        (
            raw.clamp(0.0, 1.0),
            Some(AnomalyKind::DeficitOutOfRange { value: raw }),
        )
    } else {
        (raw, None)
    }
}

fn missing(what: &str, id: TurbineId) -> SolverError {
    SolverError::InvalidState {
        what: format!("{what} {id} not found"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_core::units::m;
    use wf_farm::FarmBuilder;

    #[test]
    fn order_follows_wind_direction() {
        let mut b = FarmBuilder::new();
        let t = b.add_turbine_type("t", m(126.0), m(90.0));
        let west = b.add_turbine("W", m(0.0), m(0.0), t);
        let east = b.add_turbine("E", m(600.0), m(0.0), t);
        let farm = b.build().unwrap();

        let westerly = downstream_order(&farm, &WindFrame::new(270.0).unwrap()).unwrap();
        assert_eq!(westerly[0].0, west);
        assert_eq!(westerly[1].0, east);

        let easterly = downstream_order(&farm, &WindFrame::new(90.0).unwrap()).unwrap();
        assert_eq!(easterly[0].0, east);
    }

    #[test]
    fn ties_break_on_cross_stream() {
        let mut b = FarmBuilder::new();
        let t = b.add_turbine_type("t", m(126.0), m(90.0));
        let north = b.add_turbine("N", m(0.0), m(500.0), t);
        let south = b.add_turbine("S", m(0.0), m(0.0), t);
        let farm = b.build().unwrap();

        let order = downstream_order(&farm, &WindFrame::new(270.0).unwrap()).unwrap();
        assert_eq!(order[0].0, south);
        assert_eq!(order[1].0, north);
    }

    #[test]
    fn degenerate_model_output_is_flagged() {
        use wf_models::{GaussVelocityParams, VelocityDeficitModel};
        let state = TurbineState {
            diameter: 126.0,
            yaw: 0.0,
            ct: 0.8,
        };
        let ambient = AmbientState {
            turbulence_intensity: 0.06,
        };
        let wake = VelocityDeficitModel::Gauss(GaussVelocityParams::default()).wake(&state, &ambient);
        let (deficit, issue) = checked_deficit(wake.raw_deficit(500.0, Real::NAN, 0.0));
        assert_eq!(deficit, 0.0);
        assert!(matches!(issue, Some(AnomalyKind::NonFiniteDeficit { .. })));
    }

    #[test]
    fn deficit_checks() {
        assert_eq!(checked_deficit(0.3), (0.3, None));
        assert_eq!(checked_deficit(Real::NAN).0, 0.0);
        assert!(matches!(
            checked_deficit(1.5),
            (1.0, Some(AnomalyKind::DeficitOutOfRange { .. }))
        ));
    }
}
