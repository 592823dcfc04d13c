//! High scores: a top-three leaderboard behind the [`ScoreStore`] trait.

pub mod identity;
pub mod store;
pub mod submit;
pub mod types;

pub use identity::{AnonymousSession, Identity, IdentityProvider};
pub use store::{JsonScoreStore, MemoryScoreStore, ScoreStore, SCORES_FILE};
pub use submit::submit_score;
pub use types::{ScoreEntry, ScoreError, SubmitOutcome, LEADERBOARD_SIZE, MAX_USERNAME_LEN};
