//! Collision-avoidance veto
//!
//! Applied after an arbiter grants a tentative right-of-way. This is a
//! plain bounding-box scan, not a physics model; it exists to keep two
//! vehicles from occupying the same cell of the intersection.

use super::types::Rect;
use super::vehicle::SimVehicle;

/// Per-tick veto preventing a fresh grant from colliding with a moving
/// vehicle
///
/// Two conditions must hold for a grant to stand: no other moving vehicle
/// lies within one footprint of the candidate, and no moving vehicle from
/// a crossing direction is still inside the intersection box. The second
/// condition covers the clearance window after a phase change, when a
/// vehicle granted late in the previous phase has not yet left the box.
#[derive(Debug, Clone, Copy)]
pub struct ProximityGuard {
    width: f32,
    height: f32,
}

impl ProximityGuard {
    pub fn new(vehicle_size: (f32, f32)) -> Self {
        Self {
            width: vehicle_size.0,
            height: vehicle_size.1,
        }
    }

    /// True if the candidate may start moving this tick. A vetoed
    /// candidate stays waiting and is reconsidered next tick.
    pub fn permits(&self, candidate: &SimVehicle, vehicles: &[SimVehicle], region: &Rect) -> bool {
        let clear_of_movers = vehicles
            .iter()
            .filter(|other| other.id != candidate.id && !other.waiting)
            .all(|other| {
                (other.position.x - candidate.position.x).abs() >= self.width
                    || (other.position.y - candidate.position.y).abs() >= self.height
            });

        let box_clear = !vehicles.iter().any(|other| {
            other.id != candidate.id
                && other.direction.conflicts_with(candidate.direction)
                && other.is_crossing(region)
        });

        clear_of_movers && box_clear
    }
}
