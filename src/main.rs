use bevy::prelude::*;
use clap::Parser;
use darkwood::plugins::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "darkwood")]
#[command(about = "Walk a dark forest. Something walks with you.")]
struct Args {
    /// Seed for the forest layout and target placement
    #[arg(long)]
    seed: Option<u64>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Darkwood".into(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(SettingsPlugin {
            config_path: args.config,
        })
        .add_plugins((
            WorldPlugin { seed },
            ScenePlugin,
            EnvironmentPlugin,
            PlayerPlugin,
            TargetPlugin,
            PursuerPlugin,
        ))
        .run();
}
