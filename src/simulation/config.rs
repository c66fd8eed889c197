//! Static configuration for the simulation
//!
//! All tunable parameters are supplied at world construction and validated
//! there; a malformed configuration is a construction-time failure, not a
//! per-tick error.

use anyhow::{bail, Result};

use super::types::Rect;

/// Which right-of-way policy the world runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArbiterKind {
    /// Cyclic traffic-light phases
    Light,
    /// First-come-first-served stop sign
    StopSign,
}

/// Static parameters of a simulation run
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// The simulated area; vehicles outside it are culled
    pub bounds: Rect,
    /// Width of each road (two lanes); also the side of the intersection box
    pub road_width: f32,
    /// Vehicle footprint as (width, height)
    pub vehicle_size: (f32, f32),
    /// Vehicle speed in units per second
    pub speed: f32,
    /// Minimum time between spawn attempts, in seconds
    pub spawn_interval: f32,
    /// Probability that an eligible spawn attempt produces a vehicle
    pub spawn_probability: f32,
    /// Which arbiter variant governs the intersection
    pub arbiter_kind: ArbiterKind,
    /// Durations of the light phases in seconds:
    /// [NS green, NS yellow, EW green, EW yellow]
    pub light_phase_durations: [f32; 4],
}

impl Default for SimConfig {
    fn default() -> Self {
        // 800x800 world, 100-wide roads, 40x60 cars at 2 px per 60Hz frame
        Self {
            bounds: Rect::new(0.0, 0.0, 800.0, 800.0),
            road_width: 100.0,
            vehicle_size: (40.0, 60.0),
            speed: 120.0,
            spawn_interval: 2.0,
            spawn_probability: 0.7,
            arbiter_kind: ArbiterKind::Light,
            light_phase_durations: [4.0, 1.0, 4.0, 1.0],
        }
    }
}

impl SimConfig {
    /// Check every parameter, reporting the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.bounds.width() <= 0.0 || self.bounds.height() <= 0.0 {
            bail!("bounds must have positive width and height");
        }
        if self.road_width <= 0.0 {
            bail!("road width must be positive");
        }
        if self.road_width > self.bounds.width() || self.road_width > self.bounds.height() {
            bail!("road width must fit inside the bounds");
        }
        let (w, h) = self.vehicle_size;
        if w <= 0.0 || h <= 0.0 {
            bail!("vehicle size must be positive");
        }
        if self.speed <= 0.0 {
            bail!("vehicle speed must be positive");
        }
        if self.spawn_interval <= 0.0 {
            bail!("spawn interval must be positive");
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            bail!("spawn probability must be between 0 and 1");
        }
        if self.light_phase_durations.iter().any(|d| *d <= 0.0) {
            bail!("light phase durations must be positive");
        }
        Ok(())
    }

    /// The square arbitration zone centered in the bounds
    pub fn intersection_region(&self) -> Rect {
        let half = self.road_width / 2.0;
        let cx = self.bounds.center_x();
        let cy = self.bounds.center_y();
        Rect::new(cx - half, cy - half, cx + half, cy + half)
    }

    /// Width of a single lane (each road carries two)
    pub fn lane_width(&self) -> f32 {
        self.road_width / 2.0
    }
}
