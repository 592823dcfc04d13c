//! Road Rush: a lane-crossing game.
//!
//! The player hops a square character from the bottom lane to the goal lane,
//! dodging cars on road lanes and walking around rocks and trees on grass
//! lanes. Each crossing advances the level, which brings more frequent and
//! faster traffic.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
