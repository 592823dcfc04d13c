//! Engine pieces shared by every game: geometry and the frame scheduler.

pub mod geometry;
pub mod scheduler;

pub use geometry::{collides, Rect};
pub use scheduler::{FrameScheduler, ScheduleState, FRAME_MS, MAX_FEED_MS};
