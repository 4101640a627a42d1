//! Difficulty scaling
//!
//! Spawn cadence, population cap and new-enemy stats derived from the level
//! and the elapsed frame count.

use serde::{Deserialize, Serialize};

use crate::consts::ENEMY_BASE_SPEED;

/// Frames between automatic escalation steps (30 s at 60 Hz)
pub const ESCALATION_PERIOD: u64 = 1800;
/// Frames per +1 enemy health
pub const HEALTH_RAMP_PERIOD: u64 = 600;
pub const MIN_SPAWN_INTERVAL: u32 = 20;
pub const MAX_ENEMIES_CAP: usize = 30;
pub const MAX_ENEMY_HEALTH: u32 = 20;

/// Discrete simulation clock, one tick per update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameClock {
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one tick and return the new frame count
    pub fn advance(&mut self) -> u64 {
        self.frames += 1;
        self.frames
    }

    /// Frames elapsed since the run started
    pub fn elapsed(&self) -> u64 {
        self.frames
    }
}

/// Stats for an enemy about to be spawned
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub speed: f32,
    pub health: u32,
}

/// Spawn/scaling policy for regular enemies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyScaler {
    level: u32,
    difficulty: f32,
    spawn_interval: u32,
    max_enemies: usize,
    spawn_timer: u32,
}

impl Default for DifficultyScaler {
    /// Level 1 values
    fn default() -> Self {
        Self {
            level: 1,
            difficulty: 1.0,
            spawn_interval: 55,
            max_enemies: 12,
            spawn_timer: 0,
        }
    }
}

impl DifficultyScaler {
    /// Reconfigure for a level. Levels below 1 are treated as level 1.
    pub fn set_level(&mut self, level: u32) {
        let level = level.max(1);
        self.level = level;
        self.difficulty = 1.0 + (level - 1) as f32 * 0.2;
        self.spawn_interval = 60u32
            .saturating_sub(level.saturating_mul(5))
            .max(MIN_SPAWN_INTERVAL);
        self.max_enemies = (level as usize)
            .saturating_mul(2)
            .saturating_add(10)
            .min(MAX_ENEMIES_CAP);
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn difficulty(&self) -> f32 {
        self.difficulty
    }

    pub fn spawn_interval(&self) -> u32 {
        self.spawn_interval
    }

    pub fn max_enemies(&self) -> usize {
        self.max_enemies
    }

    pub fn spawn_timer(&self) -> u32 {
        self.spawn_timer
    }

    /// Apply the periodic escalation step when `elapsed` lands on a period boundary
    pub fn escalate(&mut self, elapsed: u64) {
        if elapsed == 0 || elapsed % ESCALATION_PERIOD != 0 {
            return;
        }
        self.difficulty += 0.1;
        if self.spawn_interval > MIN_SPAWN_INTERVAL {
            self.spawn_interval = self.spawn_interval.saturating_sub(5).max(MIN_SPAWN_INTERVAL);
        }
        if self.max_enemies < MAX_ENEMIES_CAP {
            self.max_enemies = (self.max_enemies + 2).min(MAX_ENEMIES_CAP);
        }
        log::debug!(
            "Difficulty escalated at frame {}: x{:.1}, interval={}, cap={}",
            elapsed,
            self.difficulty,
            self.spawn_interval,
            self.max_enemies
        );
    }

    /// Health of an enemy spawned at `elapsed` frames
    pub fn enemy_health(&self, elapsed: u64) -> u32 {
        let ramp = (elapsed / HEALTH_RAMP_PERIOD).min(MAX_ENEMY_HEALTH as u64) as u32;
        2u32
            .saturating_add(self.level.saturating_sub(1))
            .saturating_add(ramp)
            .min(MAX_ENEMY_HEALTH)
    }

    /// Stats for an enemy spawned now
    pub fn enemy_stats(&self, elapsed: u64) -> EnemyStats {
        EnemyStats {
            speed: ENEMY_BASE_SPEED * self.difficulty,
            health: self.enemy_health(elapsed),
        }
    }

    /// Advance the spawn timer by one tick and decide whether to spawn.
    ///
    /// The timer counts every tick and only resets when a spawn happens, so
    /// after a stretch at the cap the next free slot is filled immediately.
    pub fn poll_spawn(&mut self, active_enemies: usize, elapsed: u64) -> Option<EnemyStats> {
        self.spawn_timer = self.spawn_timer.saturating_add(1);
        if self.spawn_timer >= self.spawn_interval && active_enemies < self.max_enemies {
            self.spawn_timer = 0;
            Some(self.enemy_stats(elapsed))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_level_one_defaults() {
        let scaler = DifficultyScaler::default();
        assert_eq!(scaler.level(), 1);
        assert_eq!(scaler.spawn_interval(), 55);
        assert_eq!(scaler.max_enemies(), 12);
        assert_eq!(scaler.enemy_health(0), 2);
        assert!((scaler.difficulty() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_set_level_formulas_and_caps() {
        let mut scaler = DifficultyScaler::default();
        scaler.set_level(3);
        assert!((scaler.difficulty() - 1.4).abs() < 1e-6);
        assert_eq!(scaler.spawn_interval(), 45);
        assert_eq!(scaler.max_enemies(), 16);

        scaler.set_level(12);
        assert_eq!(scaler.spawn_interval(), 20);
        assert_eq!(scaler.max_enemies(), 30);
    }

    #[test]
    fn test_level_zero_is_clamped() {
        let mut scaler = DifficultyScaler::default();
        scaler.set_level(0);
        assert_eq!(scaler.level(), 1);
        assert_eq!(scaler.spawn_interval(), 55);
    }

    #[test]
    fn test_default_matches_level_one() {
        let mut configured = DifficultyScaler::default();
        configured.set_level(1);
        let default = DifficultyScaler::default();
        assert_eq!(default.spawn_interval(), configured.spawn_interval());
        assert_eq!(default.max_enemies(), configured.max_enemies());
        assert!((default.difficulty() - configured.difficulty()).abs() < 1e-6);
    }

    #[test]
    fn test_deserialized_level_zero_does_not_panic() {
        let json = r#"{
            "level": 0,
            "difficulty": 1.0,
            "spawn_interval": 55,
            "max_enemies": 12,
            "spawn_timer": 0
        }"#;
        let scaler: DifficultyScaler = serde_json::from_str(json).unwrap();
        assert_eq!(scaler.enemy_health(0), 2);
        assert_eq!(scaler.enemy_stats(600).health, 3);
    }

    #[test]
    fn test_escalation_every_1800_frames() {
        let mut scaler = DifficultyScaler::default();
        scaler.escalate(1799);
        assert_eq!(scaler.spawn_interval(), 55);
        scaler.escalate(1800);
        assert_eq!(scaler.spawn_interval(), 50);
        assert_eq!(scaler.max_enemies(), 14);
        assert!((scaler.difficulty() - 1.1).abs() < 1e-6);

        for step in 2..=20 {
            scaler.escalate(step * ESCALATION_PERIOD);
        }
        assert_eq!(scaler.spawn_interval(), MIN_SPAWN_INTERVAL);
        assert_eq!(scaler.max_enemies(), MAX_ENEMIES_CAP);
    }

    #[test]
    fn test_enemy_stats_scale_with_difficulty() {
        let mut scaler = DifficultyScaler::default();
        scaler.set_level(2);
        let stats = scaler.enemy_stats(1200);
        assert!((stats.speed - 2.4).abs() < 1e-5);
        assert_eq!(stats.health, 2 + 1 + 2);
    }

    #[test]
    fn test_spawn_waits_for_interval() {
        let mut scaler = DifficultyScaler::default();
        for _ in 0..54 {
            assert!(scaler.poll_spawn(0, 0).is_none());
        }
        assert!(scaler.poll_spawn(0, 0).is_some());
        assert_eq!(scaler.spawn_timer(), 0);
    }

    #[test]
    fn test_capped_timer_keeps_counting_then_bursts() {
        let mut scaler = DifficultyScaler::default();
        let cap = scaler.max_enemies();
        // Sit at the cap for well over one interval
        for _ in 0..200 {
            assert!(scaler.poll_spawn(cap, 0).is_none());
        }
        assert_eq!(scaler.spawn_timer(), 200);
        // The moment a slot frees up the spawn fires without a fresh wait
        assert!(scaler.poll_spawn(cap - 1, 0).is_some());
        assert_eq!(scaler.spawn_timer(), 0);
        // ...and then the normal interval applies again
        assert!(scaler.poll_spawn(cap - 1, 0).is_none());
    }

    proptest! {
        #[test]
        fn prop_enemy_health_monotonic_and_capped(
            level in 1u32..40,
            a in 0u64..200_000,
            b in 0u64..200_000,
        ) {
            let mut scaler = DifficultyScaler::default();
            scaler.set_level(level);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(scaler.enemy_health(lo) <= scaler.enemy_health(hi));
            prop_assert!(scaler.enemy_health(hi) <= MAX_ENEMY_HEALTH);
        }
    }
}
