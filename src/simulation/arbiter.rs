//! Right-of-way arbitration
//!
//! Two policies share one interface so the world orchestration loop doesn't
//! need to be duplicated per variant: a cyclic traffic light and a
//! first-come-first-served stop sign. Both decide, each tick, which waiting
//! vehicles are cleared to move; the proximity veto is applied afterwards by
//! the world.

use log::debug;

use super::types::{Axis, Lane, Rect};
use super::vehicle::SimVehicle;

/// A named interval of the traffic-light cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightPhase {
    NorthSouthGreen,
    NorthSouthYellow,
    EastWestGreen,
    EastWestYellow,
}

impl LightPhase {
    /// The strict cyclic order of phases
    pub fn next(self) -> LightPhase {
        match self {
            LightPhase::NorthSouthGreen => LightPhase::NorthSouthYellow,
            LightPhase::NorthSouthYellow => LightPhase::EastWestGreen,
            LightPhase::EastWestGreen => LightPhase::EastWestYellow,
            LightPhase::EastWestYellow => LightPhase::NorthSouthGreen,
        }
    }

    /// Index into the phase-duration table
    pub fn index(self) -> usize {
        match self {
            LightPhase::NorthSouthGreen => 0,
            LightPhase::NorthSouthYellow => 1,
            LightPhase::EastWestGreen => 2,
            LightPhase::EastWestYellow => 3,
        }
    }

    /// The axis currently granted green, if any; yellow is not green
    pub fn green_axis(self) -> Option<Axis> {
        match self {
            LightPhase::NorthSouthGreen => Some(Axis::NorthSouth),
            LightPhase::EastWestGreen => Some(Axis::EastWest),
            LightPhase::NorthSouthYellow | LightPhase::EastWestYellow => None,
        }
    }
}

/// What the renderer needs to draw the arbiter's indicators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArbiterVisual {
    /// Active light phase
    Light(LightPhase),
    /// Stop signs on all four approaches
    StopSign,
}

/// The per-tick right-of-way policy
///
/// `tick` advances any internal phase state; `decide` reports whether a
/// candidate may attempt to proceed. Decisions are evaluated against a
/// start-of-tick snapshot of the vehicle collection, so a grant applied
/// mid-loop cannot influence later decisions in the same tick.
pub trait Arbiter {
    fn tick(&mut self, now: f32);

    fn decide(&self, candidate: &SimVehicle, vehicles: &[SimVehicle], region: &Rect) -> bool;

    fn visual(&self) -> ArbiterVisual;
}

/// Cyclic traffic-light controller
#[derive(Debug, Clone)]
pub struct TrafficLightArbiter {
    pub phase: LightPhase,
    pub phase_started_at: f32,
    pub phase_durations: [f32; 4],
}

impl TrafficLightArbiter {
    pub fn new(phase_durations: [f32; 4]) -> Self {
        Self {
            phase: LightPhase::NorthSouthGreen,
            phase_started_at: 0.0,
            phase_durations,
        }
    }
}

impl Arbiter for TrafficLightArbiter {
    /// Advance to the next phase once the configured duration has elapsed.
    /// This is the only mutation path; phases are never skipped or repeated
    /// out of order.
    fn tick(&mut self, now: f32) {
        let elapsed = now - self.phase_started_at;
        if elapsed >= self.phase_durations[self.phase.index()] {
            let from = self.phase;
            self.phase = self.phase.next();
            self.phase_started_at = now;
            debug!("light phase {:?} -> {:?} at {:.2}s", from, self.phase, now);
        }
    }

    fn decide(&self, candidate: &SimVehicle, _vehicles: &[SimVehicle], _region: &Rect) -> bool {
        if candidate.lane != Lane::Inbound {
            return false;
        }
        self.phase.green_axis() == Some(candidate.direction.axis())
    }

    fn visual(&self) -> ArbiterVisual {
        ArbiterVisual::Light(self.phase)
    }
}

/// First-come-first-served stop-sign controller
///
/// No persistent phase; arbitration is purely a function of the current
/// vehicle set and arrival times.
#[derive(Debug, Clone, Copy, Default)]
pub struct StopSignArbiter;

impl StopSignArbiter {
    pub fn new() -> Self {
        Self
    }
}

impl Arbiter for StopSignArbiter {
    fn tick(&mut self, _now: f32) {}

    fn decide(&self, candidate: &SimVehicle, vehicles: &[SimVehicle], region: &Rect) -> bool {
        if candidate.lane != Lane::Inbound || candidate.granted {
            return false;
        }

        // A perpendicular vehicle inside the box blocks every grant
        let conflict_crossing = vehicles.iter().any(|v| {
            v.id != candidate.id
                && v.direction.conflicts_with(candidate.direction)
                && v.is_crossing(region)
        });
        if conflict_crossing {
            return false;
        }

        // Earliest arrival among vehicles queued at the stop line wins;
        // the slice is in insertion order, so ties resolve to the vehicle
        // inserted first
        let head = vehicles
            .iter()
            .filter(|v| v.lane == Lane::Inbound && !v.granted && v.at_intersection(region))
            .min_by_key(|v| v.arrival_time);

        match head {
            Some(v) => v.id == candidate.id,
            None => false,
        }
    }

    fn visual(&self) -> ArbiterVisual {
        ArbiterVisual::StopSign
    }
}
