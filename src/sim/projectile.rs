//! Player and enemy projectiles
//!
//! Player bullets fly straight up. Enemy bullets carry a full velocity
//! vector, bounce off the side and top walls, and only die off the bottom.
//! Homing bullets are steered toward the player every tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Collider};
use crate::consts::*;
use crate::velocity_from_angle;

/// Steering blend toward the player per tick
pub const HOMING_TURN_FACTOR: f32 = 0.1;

/// A bullet fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBullet {
    pub pos: Vec2,
    /// Upward speed (px/tick)
    pub speed: f32,
    pub active: bool,
}

impl PlayerBullet {
    pub fn new(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            speed,
            active: true,
        }
    }

    pub fn update(&mut self) {
        self.pos.y -= self.speed;
        if self.pos.y < -PLAYER_BULLET_HEIGHT {
            self.active = false;
        }
    }
}

impl Collider for PlayerBullet {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(PLAYER_BULLET_WIDTH, PLAYER_BULLET_HEIGHT))
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// Which firing pattern produced an enemy bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternTag {
    /// Regular enemy's random downward shot
    Aimed,
    /// Circle pattern, primary ring
    Ring,
    /// Circle pattern, interleaved second ring (phase 3+)
    RingOffset,
    /// Cross pattern line bullets
    CrossRake,
    /// Cross pattern rotating overlay (phase 3+)
    CrossOverlay,
    /// Homing pattern seekers
    Homing,
    /// Homing pattern non-homing fan (phase 2+)
    Fan,
}

/// A bullet fired by an enemy or boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Square side length
    pub size: f32,
    pub homing: bool,
    pub tag: PatternTag,
    pub active: bool,
}

impl EnemyBullet {
    /// Straight-flying pattern bullet
    pub fn pattern(origin: Vec2, angle: f32, speed: f32, tag: PatternTag) -> Self {
        Self {
            pos: origin,
            vel: velocity_from_angle(angle, speed),
            size: PATTERN_BULLET_SIZE,
            homing: false,
            tag,
            active: true,
        }
    }

    /// Seeker launched along `angle`
    pub fn homing(origin: Vec2, angle: f32) -> Self {
        Self {
            pos: origin,
            vel: velocity_from_angle(angle, HOMING_BULLET_SPEED),
            size: HOMING_BULLET_SIZE,
            homing: true,
            tag: PatternTag::Homing,
            active: true,
        }
    }

    /// A regular enemy's shot, `spread` radians off straight down
    pub fn aimed(origin: Vec2, spread: f32) -> Self {
        Self {
            pos: origin,
            // Measured from the downward axis
            vel: Vec2::new(spread.sin(), spread.cos()) * AIMED_BULLET_SPEED,
            size: AIMED_BULLET_SIZE,
            homing: false,
            tag: PatternTag::Aimed,
            active: true,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.size * 0.5)
    }

    /// Blend velocity toward `target` while keeping its magnitude
    pub fn steer_toward(&mut self, target: Vec2) {
        let to_target = target - self.center();
        let distance = to_target.length();
        let speed = self.vel.length();
        if distance <= f32::EPSILON || speed <= f32::EPSILON {
            return;
        }

        let desired = to_target / distance * speed;
        let blended = self.vel * (1.0 - HOMING_TURN_FACTOR) + desired * HOMING_TURN_FACTOR;
        // Blending two vectors of equal length shortens the result; restore it
        if let Some(dir) = blended.try_normalize() {
            self.vel = dir * speed;
        }
    }

    /// Move one tick and apply wall rules
    pub fn update(&mut self) {
        self.pos += self.vel;

        // Side walls: reflect and clamp so the bullet cannot stick in the wall
        if self.pos.x <= 0.0 || self.pos.x + self.size >= SCREEN_WIDTH {
            self.vel.x = -self.vel.x;
            if self.pos.x <= 0.0 {
                self.pos.x = 0.0;
            } else {
                self.pos.x = SCREEN_WIDTH - self.size;
            }
        }

        // Only the bottom edge removes a bullet
        if self.pos.y > SCREEN_HEIGHT {
            self.active = false;
        }

        if self.pos.y <= 0.0 {
            self.vel.y = -self.vel.y;
            self.pos.y = 0.0;
        }
    }
}

impl Collider for EnemyBullet {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// Horizontal offsets of a parallel volley of `count` bullets
pub fn volley_offsets(count: u32, spacing: f32) -> impl Iterator<Item = f32> {
    let mid = (count.max(1) - 1) as f32 / 2.0;
    (0..count.max(1)).map(move |i| (i as f32 - mid) * spacing)
}
