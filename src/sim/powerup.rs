//! Power-up drops
//!
//! Defeated enemies may drop a pickup that falls toward the bottom of the
//! screen. Drop odds improve with score; the category is a weighted draw.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Collider};
use crate::consts::*;
use crate::tuning::Tuning;

/// Cumulative category thresholds for the weighted draw
pub const ATTACK_BOOST_THRESHOLD: f64 = 0.0005;
pub const SCREEN_SHOT_THRESHOLD: f64 = 0.3005;
pub const CLEAR_BULLETS_THRESHOLD: f64 = 0.4005;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// +1 permanent parallel bullet
    MultiShot,
    /// Timed full-field damage on every shot
    ScreenShot,
    /// +1 damage per hit
    AttackBoost,
    /// Wipe all enemy bullets
    ClearBullets,
}

impl PowerUpKind {
    /// Map a uniform roll in [0, 1) to a category
    pub fn from_roll(roll: f64) -> Self {
        if roll < ATTACK_BOOST_THRESHOLD {
            PowerUpKind::AttackBoost
        } else if roll < SCREEN_SHOT_THRESHOLD {
            PowerUpKind::ScreenShot
        } else if roll < CLEAR_BULLETS_THRESHOLD {
            PowerUpKind::ClearBullets
        } else {
            PowerUpKind::MultiShot
        }
    }
}

/// A falling pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub speed: f32,
    pub active: bool,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            pos,
            kind,
            speed: POWERUP_FALL_SPEED,
            active: true,
        }
    }

    pub fn update(&mut self) {
        self.pos.y += self.speed;
        if self.pos.y > SCREEN_HEIGHT {
            self.active = false;
        }
    }
}

impl Collider for PowerUp {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(POWERUP_SIZE))
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// Chance that a kill drops a pickup at the given score
pub fn drop_chance(score: u64, tuning: &Tuning) -> f64 {
    let thousands = (score / 1000) as f64;
    let bonus = (tuning.drop_chance_per_thousand * thousands).min(tuning.drop_bonus_cap);
    (tuning.drop_base_chance + bonus).min(tuning.drop_chance_cap)
}

/// Roll for a drop at `pos`
pub fn roll_drop(pos: Vec2, score: u64, tuning: &Tuning, rng: &mut impl Rng) -> Option<PowerUp> {
    if rng.random::<f64>() < drop_chance(score, tuning) {
        let kind = PowerUpKind::from_roll(rng.random::<f64>());
        Some(PowerUp::new(pos, kind))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_drop_chance_curve() {
        let tuning = Tuning::default();
        assert!((drop_chance(0, &tuning) - 0.35).abs() < 1e-9);
        assert!((drop_chance(999, &tuning) - 0.35).abs() < 1e-9);
        assert!((drop_chance(2000, &tuning) - 0.45).abs() < 1e-9);
        assert!((drop_chance(2999, &tuning) - 0.45).abs() < 1e-9);
        assert!((drop_chance(5000, &tuning) - 0.60).abs() < 1e-9);
        assert!((drop_chance(1_000_000, &tuning) - 0.60).abs() < 1e-9);
    }

    #[test]
    fn test_category_thresholds() {
        assert_eq!(PowerUpKind::from_roll(0.0), PowerUpKind::AttackBoost);
        assert_eq!(PowerUpKind::from_roll(0.000_49), PowerUpKind::AttackBoost);
        assert_eq!(PowerUpKind::from_roll(0.0005), PowerUpKind::ScreenShot);
        assert_eq!(PowerUpKind::from_roll(0.3004), PowerUpKind::ScreenShot);
        assert_eq!(PowerUpKind::from_roll(0.3005), PowerUpKind::ClearBullets);
        assert_eq!(PowerUpKind::from_roll(0.4004), PowerUpKind::ClearBullets);
        assert_eq!(PowerUpKind::from_roll(0.4005), PowerUpKind::MultiShot);
        assert_eq!(PowerUpKind::from_roll(0.9999), PowerUpKind::MultiShot);
    }

    #[test]
    fn test_roll_drop_rate_roughly_matches() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let trials = 20_000;
        let drops = (0..trials)
            .filter(|_| roll_drop(Vec2::ZERO, 2000, &tuning, &mut rng).is_some())
            .count();
        let rate = drops as f64 / trials as f64;
        assert!((rate - 0.45).abs() < 0.02, "rate = {rate}");
    }

    #[test]
    fn test_powerup_falls_off_screen() {
        let mut p = PowerUp::new(Vec2::new(10.0, SCREEN_HEIGHT - 1.0), PowerUpKind::MultiShot);
        p.update();
        assert!(!p.active);
    }
}
