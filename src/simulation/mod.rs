//! Standalone intersection simulation module
//!
//! This module contains all the core arbitration and movement logic that can
//! run independently of the Bevy game engine. It can be exercised from the
//! console without needing to boot up the full UI.

mod arbiter;
mod clock;
mod config;
mod proximity;
mod spawner;
mod types;
mod vehicle;
mod world;

// Re-export public types for external use
// These may not be used within this crate but are part of the public API
#[allow(unused_imports)]
pub use arbiter::{
    Arbiter, ArbiterVisual, LightPhase, StopSignArbiter, TrafficLightArbiter,
};
#[allow(unused_imports)]
pub use clock::SimClock;
#[allow(unused_imports)]
pub use config::{ArbiterKind, SimConfig};
#[allow(unused_imports)]
pub use proximity::ProximityGuard;
#[allow(unused_imports)]
pub use spawner::SimSpawner;
#[allow(unused_imports)]
pub use types::{Axis, Direction, Lane, Position, Rect, SimId, VehicleId};
#[allow(unused_imports)]
pub use vehicle::SimVehicle;
pub use world::SimWorld;
