//! UI module that visualizes the simulation state using Bevy
//!
//! This module is purely for visualization - all simulation logic is in the
//! `simulation` module. The UI reads state from `SimWorld` and renders it as
//! a flat top-down scene with 2D sprites.

mod components;
mod input;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{EntityMappings, SimWorldResource};

use input::handle_input;
use sync::{sync_vehicles, tick_simulation, update_signal_indicators};
use world::setup_scene;

/// Plugin to register all UI systems
pub struct IntersectionSimUIPlugin;

impl Plugin for IntersectionSimUIPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::WHITE))
            .init_resource::<SimWorldResource>()
            .init_resource::<EntityMappings>()
            .add_systems(Startup, setup_scene)
            .add_systems(FixedUpdate, tick_simulation)
            .add_systems(
                Update,
                (sync_vehicles, update_signal_indicators, handle_input),
            );
    }
}
