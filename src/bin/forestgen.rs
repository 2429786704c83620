use clap::Parser;
use darkwood::config::{load_config, read_config, save_config};
use darkwood::game_logic::collision::Obstacle;
use darkwood::{generate_forest, CollisionIndex, DarkwoodError, DarkwoodResult, ForestConfig};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::path::PathBuf;
use validator::Validate;

#[derive(Parser)]
#[command(name = "forestgen")]
#[command(about = "Generate a Darkwood forest and print a summary of its layout")]
struct Args {
    /// Random seed for reproducible generation
    #[arg(long)]
    seed: Option<u64>,

    /// Override the configured tree count
    #[arg(long)]
    trees: Option<u32>,

    /// Config file; errors in it are reported instead of falling back to defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings (including --trees) to this path as a starting config
    #[arg(long)]
    write_config: Option<PathBuf>,
}

fn main() -> DarkwoodResult<()> {
    let args = Args::parse();

    let mut game_config = match &args.config {
        Some(path) => read_config(path)?,
        None => load_config(None),
    };
    if let Some(trees) = args.trees {
        game_config.settings.tree_count = trees;
    }
    let settings = &game_config.settings;
    let forest_config = ForestConfig::from(settings);

    if let Some(path) = &args.write_config {
        game_config
            .validate()
            .map_err(|errors| DarkwoodError::InvalidConfig {
                reason: errors.to_string(),
            })?;
        save_config(&game_config, path)?;
        println!("Config written to: {}", path.display());
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = Pcg64::seed_from_u64(seed);

    println!("Generating forest:");
    println!("  Seed: {seed}");
    println!("  Trees: {}", forest_config.tree_count);
    println!(
        "  Field: [{0}, {0}) on x and z",
        -forest_config.field_half_extent
    );

    let layout = generate_forest(&forest_config, &mut rng)?;
    let leaf_count = layout.leaf_clusters.len();
    println!("\nLayout summary:");
    println!("  Trees: {}", layout.tree_count());
    println!("  Rocks: {}", layout.rock_count());
    println!("  Leaf clusters: {leaf_count}");

    let index: CollisionIndex = layout.obstacles.into_iter().collect();
    print_bounds(&index);

    let spawn = settings.player_spawn();
    let nearest = index
        .obstacles()
        .iter()
        .map(|obstacle| (obstacle, obstacle.world_position().distance(spawn)))
        .min_by(|a, b| a.1.total_cmp(&b.1));

    match nearest {
        Some((obstacle, distance)) => println!(
            "  Nearest obstacle to spawn {spawn}: {:?} at {} ({distance:.2} units)",
            obstacle.kind, obstacle.position
        ),
        None => println!("  No obstacles generated"),
    }

    if index.would_collide(spawn) {
        println!("  WARNING: spawn point {spawn} is inside an obstacle");
    }

    Ok(())
}

fn print_bounds(index: &CollisionIndex) {
    let mut boxes = index.obstacles().iter().map(|obstacle| obstacle.bounding_box());
    let Some(first) = boxes.next() else {
        return;
    };

    let (min, max) = boxes.fold((first.min, first.max), |(min, max), aabb| {
        (min.min(aabb.min), max.max(aabb.max))
    });
    println!(
        "  Obstacle bounds: ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
        min.x, min.y, min.z, max.x, max.y, max.z
    );
}
