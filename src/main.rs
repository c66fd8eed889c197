mod simulation;

#[cfg(feature = "ui")]
mod ui;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use simulation::{ArbiterKind, SimConfig, SimWorld};

#[derive(Parser)]
#[command(name = "intersection_sim")]
#[command(about = "Four-way intersection simulation with optional UI")]
struct Cli {
    /// Run with the Bevy game engine UI
    #[arg(long)]
    ui: bool,

    /// Number of simulation ticks to run in headless mode
    #[arg(long, default_value = "2000")]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value = "0.05")]
    delta: f32,

    /// Right-of-way policy at the intersection
    #[arg(long, value_enum, default_value = "light")]
    arbiter: ArbiterArg,

    /// Seed for reproducible vehicle spawning
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ArbiterArg {
    Light,
    StopSign,
}

impl From<ArbiterArg> for ArbiterKind {
    fn from(arg: ArbiterArg) -> Self {
        match arg {
            ArbiterArg::Light => ArbiterKind::Light,
            ArbiterArg::StopSign => ArbiterKind::StopSign,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.ui {
        #[cfg(feature = "ui")]
        {
            run_with_ui(cli.arbiter.into(), cli.seed)?;
        }
        #[cfg(not(feature = "ui"))]
        {
            eprintln!("Error: UI feature is not enabled. Rebuild with --features ui");
            std::process::exit(1);
        }
    } else {
        run_headless(cli.ticks, cli.delta, cli.arbiter.into(), cli.seed)?;
    }

    Ok(())
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(ticks: u32, delta: f32, arbiter_kind: ArbiterKind, seed: Option<u64>) -> Result<()> {
    println!("Running intersection simulation in headless mode...");
    println!("Ticks: {}, Delta: {}s, Arbiter: {:?}", ticks, delta, arbiter_kind);

    // How many ticks equal 1 second of simulation time
    let ticks_per_second = (1.0 / delta).ceil() as u32;

    let config = SimConfig {
        arbiter_kind,
        ..SimConfig::default()
    };
    let mut world = match seed {
        Some(seed) => SimWorld::new_with_seed(config, seed)?,
        None => SimWorld::new(config)?,
    };

    println!("Initial state:");
    world.print_summary();
    world.draw_map();
    println!();

    let mut tick = 0;
    while tick < ticks {
        // Run a second's worth of ticks (or the remaining ticks if fewer)
        let ticks_to_run = ticks_per_second.min(ticks - tick);

        for _ in 0..ticks_to_run {
            tick += 1;
            world.tick(delta);
        }

        println!(
            "--- After tick {} ({:.1}s simulated time) ---",
            tick,
            tick as f32 * delta
        );
        world.print_summary();
        println!();
    }

    println!("=== Final State ===");
    world.print_summary();
    world.draw_map();
    println!(
        "Simulation complete: {} vehicles spawned, {} exited",
        world.total_spawned, world.total_exited
    );

    Ok(())
}

#[cfg(feature = "ui")]
fn run_with_ui(arbiter_kind: ArbiterKind, seed: Option<u64>) -> Result<()> {
    use bevy::log::LogPlugin;
    use bevy::prelude::*;

    use ui::SimWorldResource;

    println!("Starting Intersection Sim UI...");
    println!();
    println!("Controls:");
    println!("  ESC - Exit");
    println!();

    let config = SimConfig {
        arbiter_kind,
        ..SimConfig::default()
    };
    let world = match seed {
        Some(seed) => SimWorld::new_with_seed(config, seed)?,
        None => SimWorld::new(config)?,
    };

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(LogPlugin {
                    filter: "warn,intersection_sim=debug".to_string(),
                    level: bevy::log::Level::DEBUG,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Intersection Sim - Bevy Game".into(),
                        resolution: (900, 900).into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .insert_resource(SimWorldResource(world))
        .add_plugins(ui::IntersectionSimUIPlugin)
        .run();

    Ok(())
}
