pub mod environment;
pub mod player;
pub mod pursuer;
pub mod scene;
pub mod settings;
pub mod target;
pub mod world;

pub use environment::*;
pub use player::*;
pub use pursuer::*;
pub use scene::*;
pub use settings::*;
pub use target::*;
pub use world::*;
