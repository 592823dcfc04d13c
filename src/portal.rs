//! Portal state: the main menu and the per-game best scores kept across runs.

use crate::utils::persistence::{load_json_or_default, save_json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

pub const BEST_FILE: &str = "best.json";

/// Entries on the portal's main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    RoadRush,
    SkyHopper,
    HighScores,
    Settings,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 5] = [
        MenuItem::RoadRush,
        MenuItem::SkyHopper,
        MenuItem::HighScores,
        MenuItem::Settings,
        MenuItem::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::RoadRush => "Road Rush",
            MenuItem::SkyHopper => "Sky Hopper",
            MenuItem::HighScores => "High Scores",
            MenuItem::Settings => "Settings",
            MenuItem::Quit => "Quit",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MenuItem::RoadRush => "Cross the lanes without getting hit. Each crossing speeds up traffic.",
            MenuItem::SkyHopper => "Flap through the gaps between pipes. One point per pipe.",
            MenuItem::HighScores => "The Sky Hopper top three.",
            MenuItem::Settings => "Current settings for every game.",
            MenuItem::Quit => "Leave the arcade.",
        }
    }
}

#[derive(Debug, Default)]
pub struct PortalMenu {
    pub selected_index: usize,
}

impl PortalMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> MenuItem {
        MenuItem::ALL[self.selected_index.min(MenuItem::ALL.len() - 1)]
    }

    /// Move the cursor up one entry, wrapping to the bottom.
    pub fn navigate_up(&mut self) {
        self.selected_index = if self.selected_index == 0 {
            MenuItem::ALL.len() - 1
        } else {
            self.selected_index - 1
        };
    }

    /// Move the cursor down one entry, wrapping to the top.
    pub fn navigate_down(&mut self) {
        self.selected_index = (self.selected_index + 1) % MenuItem::ALL.len();
    }
}

/// Best score per settings group key, persisted as `best.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BestScores {
    scores: BTreeMap<String, u32>,
}

impl BestScores {
    /// Load from `path`. Missing or unreadable files start empty.
    pub fn load(path: &Path) -> Self {
        load_json_or_default(path)
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        save_json(path, self)
    }

    pub fn get(&self, game_key: &str) -> u32 {
        self.scores.get(game_key).copied().unwrap_or(0)
    }

    /// Keep `score` if it beats the stored best. Returns true if it did.
    pub fn record(&mut self, game_key: &str, score: u32) -> bool {
        let best = self.scores.entry(game_key.to_string()).or_insert(0);
        if score > *best {
            *best = score;
            true
        } else {
            false
        }
    }
}

/// Where the portal keeps its best scores.
pub fn best_scores_path(data_dir: &Path) -> PathBuf {
    data_dir.join(BEST_FILE)
}
