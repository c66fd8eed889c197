//! Systems for syncing Bevy entities with simulation state

use bevy::prelude::*;
use std::collections::HashSet;

use super::components::{
    sim_to_screen, EntityMappings, SignalIndicator, SimSynced, SimWorldResource, VehicleLink,
};
use crate::simulation::{ArbiterVisual, Axis, LightPhase, VehicleId};

/// System to run simulation tick
pub fn tick_simulation(time: Res<Time>, mut sim_world: ResMut<SimWorldResource>) {
    sim_world.0.tick(time.delta_secs());
}

/// System to sync vehicle sprites from simulation state
pub fn sync_vehicles(
    mut commands: Commands,
    sim_world: Res<SimWorldResource>,
    mut mappings: ResMut<EntityMappings>,
    mut vehicle_query: Query<(Entity, &VehicleLink, &mut Transform)>,
) {
    let world = &sim_world.0;
    let config = &world.config;

    // Update existing vehicles and track which ones still exist
    let mut existing_ids: HashSet<VehicleId> = HashSet::new();

    for (entity, link, mut transform) in vehicle_query.iter_mut() {
        if let Some(vehicle) = world.vehicles.iter().find(|v| v.id == link.0) {
            existing_ids.insert(link.0);
            let center = sim_to_screen(
                config,
                vehicle.position.x + vehicle.width / 2.0,
                vehicle.position.y + vehicle.height / 2.0,
            );
            transform.translation = center.extend(2.0);
        } else {
            // Vehicle no longer exists in simulation, despawn
            commands.entity(entity).despawn();
            mappings.vehicles.remove(&link.0);
        }
    }

    // Spawn sprites for new vehicles
    for vehicle in &world.vehicles {
        if !existing_ids.contains(&vehicle.id) {
            let [r, g, b] = vehicle.color();
            let center = sim_to_screen(
                config,
                vehicle.position.x + vehicle.width / 2.0,
                vehicle.position.y + vehicle.height / 2.0,
            );
            let entity = commands
                .spawn((
                    SimSynced,
                    VehicleLink(vehicle.id),
                    Sprite::from_color(
                        Color::srgb(r, g, b),
                        Vec2::new(vehicle.width, vehicle.height),
                    ),
                    Transform::from_translation(center.extend(2.0)),
                ))
                .id();
            mappings.vehicles.insert(vehicle.id, entity);
        }
    }
}

/// System to recolor the signal indicators from the arbiter's visual state
pub fn update_signal_indicators(
    sim_world: Res<SimWorldResource>,
    mut indicator_query: Query<(&SignalIndicator, &mut Sprite)>,
) {
    let visual = sim_world.0.arbiter_visual();

    for (indicator, mut sprite) in indicator_query.iter_mut() {
        sprite.color = match visual {
            ArbiterVisual::Light(phase) => axis_signal_color(phase, indicator.0),
            // Stop signs on every approach
            ArbiterVisual::StopSign => Color::srgb(0.6, 0.1, 0.1),
        };
    }
}

fn axis_signal_color(phase: LightPhase, axis: Axis) -> Color {
    match (phase, axis) {
        (LightPhase::NorthSouthGreen, Axis::NorthSouth)
        | (LightPhase::EastWestGreen, Axis::EastWest) => Color::srgb(0.0, 1.0, 0.0),
        (LightPhase::NorthSouthYellow, Axis::NorthSouth)
        | (LightPhase::EastWestYellow, Axis::EastWest) => Color::srgb(1.0, 1.0, 0.0),
        _ => Color::srgb(1.0, 0.0, 0.0),
    }
}
