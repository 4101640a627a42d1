//! Barrage - a vertical-scrolling boss-rush shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, patterns, collisions, game state)
//! - `session`: Level/mode orchestration on top of the simulation
//! - `tuning`: Data-driven game balance

pub mod session;
pub mod sim;
pub mod tuning;

pub use session::{GameMode, Session, SessionStatus};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels, origin top-left, y grows downward)
    pub const SCREEN_WIDTH: f32 = 640.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;

    /// Player craft
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;
    pub const PLAYER_SPEED: f32 = 4.0;
    /// Distance of the player's top edge from the bottom of the screen at spawn
    pub const PLAYER_SPAWN_INSET: f32 = 50.0;

    /// Player bullets
    pub const PLAYER_BULLET_WIDTH: f32 = 4.0;
    pub const PLAYER_BULLET_HEIGHT: f32 = 10.0;

    /// Regular enemies
    pub const ENEMY_WIDTH: f32 = 32.0;
    pub const ENEMY_HEIGHT: f32 = 32.0;
    pub const ENEMY_BASE_SPEED: f32 = 2.0;

    /// Enemy/boss bullets (pattern, homing, and the regular enemies' aimed shots)
    pub const PATTERN_BULLET_SIZE: f32 = 6.0;
    pub const HOMING_BULLET_SIZE: f32 = 8.0;
    pub const AIMED_BULLET_SIZE: f32 = 4.0;
    pub const HOMING_BULLET_SPEED: f32 = 3.0;
    pub const AIMED_BULLET_SPEED: f32 = 4.0;

    /// Pickups
    pub const POWERUP_SIZE: f32 = 20.0;
    pub const POWERUP_FALL_SPEED: f32 = 1.5;

    /// Boss entrance
    pub const BOSS_ARENA_Y: f32 = 80.0;
    pub const BOSS_ENTER_SPEED: f32 = 2.0;
}

/// Unit direction for an angle in radians (0 = right, π/2 = down on screen)
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Velocity of magnitude `speed` along `angle`
#[inline]
pub fn velocity_from_angle(angle: f32, speed: f32) -> Vec2 {
    heading(angle) * speed
}
