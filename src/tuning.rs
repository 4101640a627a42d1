//! Data-driven game balance
//!
//! Knobs that a designer may want to tweak without touching the simulation.
//! Loaded from JSON; anything missing falls back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Frames between shots while fire is held
    pub player_fire_interval: u32,
    /// Upward speed of player bullets (px/tick)
    pub player_bullet_speed: f32,
    /// Horizontal gap between parallel multishot bullets (px)
    pub multi_shot_spacing: f32,
    /// ScreenShot ability duration (frames)
    pub screen_shot_duration: u32,

    // === Enemies ===
    /// Per-tick probability that an active enemy fires an aimed shot
    pub enemy_fire_chance: f64,

    // === Scoring ===
    pub enemy_kill_score: u64,
    pub boss_defeat_score: u64,

    // === Drops ===
    /// Base drop probability on enemy death
    pub drop_base_chance: f64,
    /// Bonus per full 1000 points of score
    pub drop_chance_per_thousand: f64,
    /// Maximum score bonus
    pub drop_bonus_cap: f64,
    /// Hard ceiling for the final probability
    pub drop_chance_cap: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_fire_interval: 10,
            player_bullet_speed: 8.0,
            multi_shot_spacing: 10.0,
            screen_shot_duration: 180,

            enemy_fire_chance: 0.01,

            enemy_kill_score: 100,
            boss_defeat_score: 1000,

            drop_base_chance: 0.35,
            drop_chance_per_thousand: 0.05,
            drop_bonus_cap: 0.25,
            drop_chance_cap: 0.60,
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Tuning>(json).map(Tuning::sanitized)
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values into ranges the simulation can run with
    pub fn sanitized(mut self) -> Self {
        self.player_fire_interval = self.player_fire_interval.max(1);
        self.player_bullet_speed = self.player_bullet_speed.max(0.1);
        self.multi_shot_spacing = self.multi_shot_spacing.max(0.0);
        self.enemy_fire_chance = self.enemy_fire_chance.clamp(0.0, 1.0);
        self.drop_base_chance = self.drop_base_chance.clamp(0.0, 1.0);
        self.drop_chance_per_thousand = self.drop_chance_per_thousand.max(0.0);
        self.drop_bonus_cap = self.drop_bonus_cap.max(0.0);
        self.drop_chance_cap = self.drop_chance_cap.clamp(0.0, 1.0);
        self
    }
}
