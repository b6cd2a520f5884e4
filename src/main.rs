//! Binary entry point: parses the command line and runs the park.

use std::path::PathBuf;

use anyhow::{bail, Context};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use log::info;
use promenade::config::Tuning;
use promenade::{
    dress_avatars_system, init_logging, spawn_legend_system, spawn_world_system,
    toggle_legend_system, ParkPlugin, ParkSettings, PresentationPlugin,
};

/// A small park to stroll around in
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// TOML file overriding the default tuning
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seed for the wandering NPCs
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let tuning = match &args.config {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("failed to load tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    info!("starting park with seed {}", args.seed);

    let exit = App::new()
        .insert_resource(ParkSettings {
            tuning,
            seed: args.seed,
        })
        .insert_resource(ClearColor(Color::srgb(0.62, 0.8, 0.95)))
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .add_plugins((ParkPlugin, PresentationPlugin))
        .add_systems(Startup, (spawn_world_system, spawn_legend_system))
        .add_systems(Update, (dress_avatars_system, toggle_legend_system))
        .run();

    if let AppExit::Error(code) = exit {
        bail!("park exited with code {code}");
    }
    Ok(())
}
