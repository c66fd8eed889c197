//! Scene setup: camera, roads, and signal indicators

use bevy::prelude::*;

use super::components::{sim_to_screen, MainCamera, SignalIndicator, SimWorldResource};
use crate::simulation::Axis;

const INDICATOR_SIZE: f32 = 24.0;
const INDICATOR_OFFSET: f32 = 30.0;

/// Spawn the camera, the road backdrop, and one signal indicator per axis
pub fn setup_scene(mut commands: Commands, sim_world: Res<SimWorldResource>) {
    let config = &sim_world.0.config;
    let bounds = &config.bounds;
    let region = &sim_world.0.region;

    commands.spawn((MainCamera, Camera2d));

    // Roads are two gray bands crossing at the center of the bounds
    let road_color = Color::srgb(0.59, 0.59, 0.59);
    commands.spawn((
        Sprite::from_color(road_color, Vec2::new(bounds.width(), config.road_width)),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));
    commands.spawn((
        Sprite::from_color(road_color, Vec2::new(config.road_width, bounds.height())),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));

    // Indicators sit just outside the region: north-south above it,
    // east-west beside it. Colors are driven per frame by the sync systems.
    let ns_pos = sim_to_screen(config, bounds.center_x(), region.min_y - INDICATOR_OFFSET);
    let ew_pos = sim_to_screen(config, region.max_x + INDICATOR_OFFSET, bounds.center_y());
    let initial = Color::srgb(0.3, 0.3, 0.3);

    commands.spawn((
        SignalIndicator(Axis::NorthSouth),
        Sprite::from_color(initial, Vec2::splat(INDICATOR_SIZE)),
        Transform::from_translation(ns_pos.extend(1.0)),
    ));
    commands.spawn((
        SignalIndicator(Axis::EastWest),
        Sprite::from_color(initial, Vec2::splat(INDICATOR_SIZE)),
        Transform::from_translation(ew_pos.extend(1.0)),
    ));
}
