//! Per-pass turbine records.
//!
//! The farm stays immutable during a solve. Everything a pass resolves about a
//! turbine (inflow, thrust, power, where its wake sits) lives in a record
//! written once, indexed by turbine id.

use crate::error::{SolverError, SolverResult};
use wf_core::{Real, TurbineId};
use wf_farm::Point;
use wf_models::OperatingState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurbineRecord {
    /// Position in the upstream-to-downstream order
    pub order: usize,
    /// Hub, wind frame
    pub hub: Point,
    pub operating: OperatingState,
    /// Yaw at the time of the pass [rad]
    pub yaw: Real,
}

#[derive(Debug, Clone, Default)]
pub struct TurbineArena {
    records: Vec<Option<TurbineRecord>>,
}

impl TurbineArena {
    pub fn with_capacity(turbines: usize) -> Self {
        Self {
            records: vec![None; turbines],
        }
    }

    /// Store the record of `id`. A turbine is resolved once per pass.
    pub fn insert(&mut self, id: TurbineId, record: TurbineRecord) -> SolverResult<()> {
        let len = self.records.len();
        let slot = self
            .records
            .get_mut(id.slot())
            .ok_or_else(|| SolverError::InvalidState {
                what: format!("turbine {id} outside arena of {len}"),
            })?;
        if slot.is_some() {
            return Err(SolverError::InvalidState {
                what: format!("turbine {id} resolved twice in one pass"),
            });
        }
        *slot = Some(record);
        Ok(())
    }

    pub fn get(&self, id: TurbineId) -> Option<&TurbineRecord> {
        self.records.get(id.slot()).and_then(Option::as_ref)
    }

    pub fn is_complete(&self) -> bool {
        self.records.iter().all(Option::is_some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wf_core::Id;

    fn record(order: usize) -> TurbineRecord {
        TurbineRecord {
            order,
            hub: Point::new(0.0, 0.0, 90.0),
            operating: OperatingState::default(),
            yaw: 0.0,
        }
    }

    #[test]
    fn written_once() {
        let mut arena = TurbineArena::with_capacity(2);
        let id = Id::from_index(1);
        arena.insert(id, record(0)).unwrap();
        assert!(arena.insert(id, record(1)).is_err());
        assert_eq!(arena.get(id).unwrap().order, 0);
        assert!(!arena.is_complete());
        arena.insert(Id::from_index(0), record(1)).unwrap();
        assert!(arena.is_complete());
    }

    #[test]
    fn out_of_range_is_an_error() {
        let mut arena = TurbineArena::with_capacity(1);
        assert!(arena.insert(Id::from_index(3), record(0)).is_err());
        assert!(arena.get(Id::from_index(3)).is_none());
    }
}
