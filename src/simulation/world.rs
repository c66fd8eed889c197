//! Main simulation world that ties everything together
//!
//! This is the entry point for running the intersection simulation
//! without any Bevy dependencies.

use anyhow::Result;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::arbiter::{Arbiter, ArbiterVisual, StopSignArbiter, TrafficLightArbiter};
use super::clock::SimClock;
use super::config::{ArbiterKind, SimConfig};
use super::proximity::ProximityGuard;
use super::spawner::SimSpawner;
use super::types::{Axis, Direction, Lane, Rect, SimId, VehicleId};
use super::vehicle::SimVehicle;

/// The main simulation world
///
/// Owns the vehicle collection, the arbiter, the spawner, and the
/// collision guard; everything is mutated only inside `tick`, so the host
/// loop needs no locking.
pub struct SimWorld {
    /// Static parameters supplied at construction
    pub config: SimConfig,

    /// The arbitration zone, derived from the config
    pub region: Rect,

    /// All vehicles, kept in insertion order (FCFS ties and seeded runs
    /// depend on stable iteration)
    pub vehicles: Vec<SimVehicle>,

    /// The right-of-way policy
    arbiter: Box<dyn Arbiter + Send + Sync>,

    /// Probabilistic vehicle source
    spawner: SimSpawner,

    /// Collision-avoidance veto
    guard: ProximityGuard,

    /// Simulated time source
    clock: SimClock,

    /// Next ID to assign
    next_id: usize,

    /// Optional seeded RNG for reproducible simulations
    rng: Option<StdRng>,

    /// Vehicles created since construction
    pub total_spawned: usize,

    /// Vehicles culled after leaving the bounds
    pub total_exited: usize,
}

impl SimWorld {
    fn new_internal(config: SimConfig, rng: Option<StdRng>) -> Result<Self> {
        config.validate()?;

        let arbiter: Box<dyn Arbiter + Send + Sync> = match config.arbiter_kind {
            ArbiterKind::Light => Box::new(TrafficLightArbiter::new(config.light_phase_durations)),
            ArbiterKind::StopSign => Box::new(StopSignArbiter::new()),
        };

        let region = config.intersection_region();
        let spawner = SimSpawner::new(config.spawn_interval, config.spawn_probability);
        let guard = ProximityGuard::new(config.vehicle_size);

        Ok(Self {
            config,
            region,
            vehicles: Vec::new(),
            arbiter,
            spawner,
            guard,
            clock: SimClock::new(),
            next_id: 0,
            rng,
            total_spawned: 0,
            total_exited: 0,
        })
    }

    /// Build a world; fails on a malformed configuration
    pub fn new(config: SimConfig) -> Result<Self> {
        Self::new_internal(config, None)
    }

    /// Build a world with a seeded RNG for reproducible simulations
    pub fn new_with_seed(config: SimConfig, seed: u64) -> Result<Self> {
        Self::new_internal(config, Some(StdRng::seed_from_u64(seed)))
    }

    /// Current simulated time in seconds
    pub fn time(&self) -> f32 {
        self.clock.now()
    }

    /// The arbiter's current visual state, for indicator rendering
    pub fn arbiter_visual(&self) -> ArbiterVisual {
        self.arbiter.visual()
    }

    /// The directions that currently hold right-of-way
    ///
    /// For the light this follows the green axis; for the stop sign it is
    /// derived from the vehicles actually crossing the box.
    pub fn right_of_way(&self) -> Vec<Direction> {
        match self.arbiter.visual() {
            ArbiterVisual::Light(phase) => match phase.green_axis() {
                Some(Axis::NorthSouth) => vec![Direction::North, Direction::South],
                Some(Axis::EastWest) => vec![Direction::East, Direction::West],
                None => Vec::new(),
            },
            ArbiterVisual::StopSign => {
                let mut directions = Vec::new();
                for vehicle in &self.vehicles {
                    if vehicle.lane == Lane::Inbound
                        && vehicle.is_crossing(&self.region)
                        && !directions.contains(&vehicle.direction)
                    {
                        directions.push(vehicle.direction);
                    }
                }
                directions
            }
        }
    }

    fn next_sim_id(&mut self) -> SimId {
        let id = SimId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert a vehicle at its entry point for the given direction and lane
    pub fn spawn_vehicle(&mut self, direction: Direction, lane: Lane) -> VehicleId {
        let id = VehicleId(self.next_sim_id());
        let vehicle = SimVehicle::spawn(id, direction, lane, self.clock.now(), &self.config);
        self.total_spawned += 1;
        self.vehicles.push(vehicle);
        id
    }

    /// Ask the spawner for a vehicle, using the seeded RNG if available
    fn maybe_spawn_vehicle(&mut self, now: f32) -> Option<SimVehicle> {
        let id = VehicleId(SimId(self.next_id));
        let spawned = match &mut self.rng {
            Some(rng) => self.spawner.maybe_spawn(now, id, &self.config, rng),
            None => self
                .spawner
                .maybe_spawn(now, id, &self.config, &mut rand::rng()),
        };
        if spawned.is_some() {
            self.next_id += 1;
        }
        spawned
    }

    /// Main simulation tick
    ///
    /// Fixed order: clock, spawner, arbiter phase update, arbitration plus
    /// proximity veto, movement, cull. A phase transition is visible to
    /// arbitration in the same tick, and arbitration settles before any
    /// position moves.
    pub fn tick(&mut self, delta_secs: f32) {
        let now = self.clock.advance(delta_secs);

        if let Some(vehicle) = self.maybe_spawn_vehicle(now) {
            debug!(
                "spawned {:?} {:?} vehicle {:?} at ({:.0}, {:.0})",
                vehicle.direction, vehicle.lane, vehicle.id.0, vehicle.position.x, vehicle.position.y
            );
            self.total_spawned += 1;
            self.vehicles.push(vehicle);
        }

        self.arbiter.tick(now);

        // Decisions are taken against the state at the start of this step,
        // so a grant applied mid-loop cannot affect later candidates. This
        // also caps the stop sign at one grant per tick.
        let snapshot = self.vehicles.clone();
        for (i, candidate) in snapshot.iter().enumerate() {
            if candidate.lane != Lane::Inbound || candidate.granted {
                continue;
            }
            if !candidate.at_intersection(&self.region) {
                // Still short of the stop line; keep approaching
                self.vehicles[i].waiting = false;
                continue;
            }

            let cleared = self.arbiter.decide(candidate, &snapshot, &self.region)
                && self.guard.permits(candidate, &snapshot, &self.region);

            let vehicle = &mut self.vehicles[i];
            if cleared {
                vehicle.waiting = false;
                vehicle.granted = true;
                debug!(
                    "granted vehicle {:?} ({:?}) at {:.2}s",
                    vehicle.id.0, vehicle.direction, now
                );
            } else {
                vehicle.waiting = true;
            }
        }

        for vehicle in &mut self.vehicles {
            vehicle.advance(delta_secs);
        }

        let before = self.vehicles.len();
        let bounds = self.config.bounds;
        self.vehicles.retain(|v| !v.is_out_of_bounds(&bounds));
        let exited = before - self.vehicles.len();
        if exited > 0 {
            debug!("culled {} vehicle(s) at {:.2}s", exited, now);
            self.total_exited += exited;
        }
    }

    /// Print a summary of the world state
    pub fn print_summary(&self) {
        println!("=== Intersection Simulation Summary ===");
        println!("Time: {:.2}s", self.clock.now());

        let inbound = self
            .vehicles
            .iter()
            .filter(|v| v.lane == Lane::Inbound)
            .count();
        let outbound = self.vehicles.len() - inbound;
        let waiting = self.vehicles.iter().filter(|v| v.waiting).count();
        println!(
            "Vehicles: {} active ({} inbound, {} outbound), {} waiting",
            self.vehicles.len(),
            inbound,
            outbound,
            waiting
        );

        match self.arbiter.visual() {
            ArbiterVisual::Light(phase) => println!("Signal: {:?}", phase),
            ArbiterVisual::StopSign => println!("Signal: stop sign (FCFS)"),
        }
        println!(
            "Total spawned: {}, total exited: {}",
            self.total_spawned, self.total_exited
        );

        if !self.vehicles.is_empty() {
            println!("--- Vehicles ---");
            for vehicle in &self.vehicles {
                println!(
                    "  Vehicle {:?}: {:?} {:?} at ({:.0}, {:.0}){}",
                    vehicle.id.0,
                    vehicle.direction,
                    vehicle.lane,
                    vehicle.position.x,
                    vehicle.position.y,
                    if vehicle.waiting { ", waiting" } else { "" }
                );
            }
        }
    }

    /// Draw a visual map of the world in the terminal
    pub fn draw_map(&self) {
        const COLS: usize = 40;
        const ROWS: usize = 20;

        let bounds = &self.config.bounds;
        let half_road = self.config.road_width / 2.0;
        let mut grid = vec![vec![' '; COLS]; ROWS];

        for (r, row) in grid.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                let wx = bounds.min_x + (c as f32 + 0.5) / COLS as f32 * bounds.width();
                let wy = bounds.min_y + (r as f32 + 0.5) / ROWS as f32 * bounds.height();
                let on_vertical_road = (wx - bounds.center_x()).abs() <= half_road;
                let on_horizontal_road = (wy - bounds.center_y()).abs() <= half_road;
                *cell = match (on_vertical_road, on_horizontal_road) {
                    (true, true) => '+',
                    (true, false) | (false, true) => '.',
                    (false, false) => ' ',
                };
            }
        }

        for vehicle in &self.vehicles {
            let cx = vehicle.position.x + vehicle.width / 2.0;
            let cy = vehicle.position.y + vehicle.height / 2.0;
            if cx < bounds.min_x || cx > bounds.max_x || cy < bounds.min_y || cy > bounds.max_y {
                continue;
            }
            let col = (((cx - bounds.min_x) / bounds.width()) * COLS as f32) as usize;
            let row = (((cy - bounds.min_y) / bounds.height()) * ROWS as f32) as usize;
            grid[row.min(ROWS - 1)][col.min(COLS - 1)] = if vehicle.waiting {
                'o'
            } else {
                vehicle.glyph()
            };
        }

        println!("\n=== Intersection Map ===");
        println!("Legend: .=road, +=intersection, ^v<>=moving vehicle, o=waiting");
        for row in &grid {
            let line: String = row.iter().collect();
            println!("{}", line);
        }
        println!();
    }
}
