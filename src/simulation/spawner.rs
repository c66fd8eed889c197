//! Probabilistic vehicle spawning
//!
//! Entry points are fixed by direction and lane; arrivals are stochastic,
//! gated by a fixed probability once per interval.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::config::SimConfig;
use super::types::{Direction, Lane, VehicleId};
use super::vehicle::SimVehicle;

/// Creates new vehicles at fixed-direction entry points on a fixed interval
#[derive(Debug, Clone)]
pub struct SimSpawner {
    interval: f32,
    probability: f32,
    last_spawn: f32,
}

impl SimSpawner {
    pub fn new(interval: f32, probability: f32) -> Self {
        Self {
            interval,
            probability,
            last_spawn: 0.0,
        }
    }

    /// Return zero or one new vehicle for this tick
    ///
    /// No spawn occurs more than once per interval regardless of the
    /// probability draw; a failed draw still consumes the interval.
    pub fn maybe_spawn<R: Rng>(
        &mut self,
        now: f32,
        id: VehicleId,
        config: &SimConfig,
        rng: &mut R,
    ) -> Option<SimVehicle> {
        if now - self.last_spawn < self.interval {
            return None;
        }
        self.last_spawn = now;

        if rng.random::<f32>() >= self.probability {
            return None;
        }

        let direction = *Direction::ALL.choose(rng)?;
        let lane = *Lane::ALL.choose(rng)?;
        Some(SimVehicle::spawn(id, direction, lane, now, config))
    }
}
