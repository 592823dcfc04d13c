//! Tunable per-game settings.
//!
//! A [`SettingsStore`] hands out raw rows; [`SettingsSnapshot`] decodes them,
//! merges them over [`defaults`] and is then passed by value into a game
//! session.

pub mod defaults;
pub mod snapshot;
pub mod store;
pub mod types;

pub use defaults::{CROSSING_KEY, FLAPPY_KEY, GROUP_KEYS, PORTAL_KEY};
pub use snapshot::SettingsSnapshot;
pub use store::{JsonSettingsStore, MemorySettingsStore, SettingsStore, SETTINGS_FILE};
pub use types::{Rgb, SettingKind, SettingRecord};
