//! UI components and resources for linking Bevy entities to simulation state

use bevy::prelude::*;
use std::collections::HashMap;

use crate::simulation::{Axis, SimConfig, SimWorld, VehicleId};

/// Resource wrapper for the simulation world
#[derive(Resource)]
pub struct SimWorldResource(pub SimWorld);

impl Default for SimWorldResource {
    fn default() -> Self {
        let world = SimWorld::new(SimConfig::default()).expect("default config is valid");
        Self(world)
    }
}

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Marker for entities synced from simulation
#[derive(Component)]
pub struct SimSynced;

/// Links a Bevy entity to a simulation vehicle
#[derive(Component)]
pub struct VehicleLink(pub VehicleId);

/// A signal indicator for one direction-pair
#[derive(Component)]
pub struct SignalIndicator(pub Axis);

/// Resource to track Bevy entities mapped to simulation entities
#[derive(Resource, Default)]
pub struct EntityMappings {
    pub vehicles: HashMap<VehicleId, Entity>,
}

/// Convert a simulation point (y down, origin at the bounds' top-left) to
/// screen space (y up, origin at the bounds' center)
pub fn sim_to_screen(config: &SimConfig, x: f32, y: f32) -> Vec2 {
    Vec2::new(
        x - config.bounds.center_x(),
        config.bounds.center_y() - y,
    )
}
