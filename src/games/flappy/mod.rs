//! Sky Hopper: a pipe-flying game.
//!
//! Gravity pulls the bird down every frame and a jump snaps its velocity
//! upward. Pipe pairs scroll in from the right; flying through a gap scores a
//! point, touching a pipe or leaving the field ends the run.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
