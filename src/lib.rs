pub mod components;
pub mod config;
pub mod game_logic;
pub mod plugins;
pub mod resources;

// Selective re-exports for external consumers

// Plugins - main.rs needs all plugins
pub use plugins::*;

// Game logic - forestgen needs errors and the generator
pub use game_logic::errors::{DarkwoodError, DarkwoodResult};
pub use game_logic::{generate_forest, CollisionIndex, ForestConfig, ForestLayout};
