mod bearing;
mod direction;
mod position;

pub use bearing::{bearing, distance};
pub use direction::{octant, Direction};
pub use position::Position;
