//! Terminal scenes for the portal, one module per screen.

pub mod crossing_scene;
pub mod flappy_scene;
pub mod game_common;
pub mod leaderboard_scene;
pub mod menu_scene;
pub mod settings_scene;
