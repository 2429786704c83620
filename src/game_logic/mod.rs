pub mod bounds;
pub mod collision;
pub mod errors;
pub mod forest;
pub mod frame;
pub mod movement;
pub mod pursuit;
pub mod visibility;

pub use collision::*;
pub use errors::*;
pub use forest::*;
pub use frame::*;
