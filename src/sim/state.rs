//! Game state and core simulation types
//!
//! All state needed to reproduce a run lives here, including the RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::boss::{Boss, BossKind, BossState};
use super::collision::{Aabb, Collider};
use super::difficulty::{DifficultyScaler, EnemyStats, FrameClock};
use super::powerup::{PowerUp, PowerUpKind};
use super::projectile::{EnemyBullet, PatternTag, PlayerBullet};
use crate::consts::*;
use crate::tuning::Tuning;

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub speed: f32,
    /// Permanent MultiShot stacks; each shot fires `multi_shot_count + 1` bullets
    pub multi_shot_count: u32,
    /// Remaining ScreenShot frames (0 = inactive)
    pub screen_shot_ticks: u32,
    /// Damage per hit
    pub attack_power: u32,
    /// Frames since the last shot
    pub fire_cooldown: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT - PLAYER_SPAWN_INSET),
            speed: PLAYER_SPEED,
            multi_shot_count: 0,
            screen_shot_ticks: 0,
            attack_power: 1,
            fire_cooldown: 0,
        }
    }
}

impl Player {
    pub fn size(&self) -> Vec2 {
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size() * 0.5
    }

    pub fn screen_shot_enabled(&self) -> bool {
        self.screen_shot_ticks > 0
    }

    /// Bullets emitted per shot
    pub fn bullets_per_shot(&self) -> u32 {
        self.multi_shot_count.saturating_add(1)
    }

    /// Move by a direction (each axis -1, 0 or 1), staying on screen
    pub fn steer(&mut self, dir: Vec2) {
        self.pos += dir * self.speed;
        self.pos.x = self.pos.x.clamp(0.0, SCREEN_WIDTH - PLAYER_WIDTH);
        self.pos.y = self.pos.y.clamp(0.0, SCREEN_HEIGHT - PLAYER_HEIGHT);
    }

    /// Count down timed abilities
    pub fn tick_abilities(&mut self) {
        if self.screen_shot_ticks > 0 {
            self.screen_shot_ticks -= 1;
            if self.screen_shot_ticks == 0 {
                log::debug!("ScreenShot expired");
            }
        }
    }
}

impl Collider for Player {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size())
    }

    fn is_active(&self) -> bool {
        true
    }
}

/// A regular enemy craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub speed: f32,
    pub health: u32,
    pub max_health: u32,
    pub active: bool,
}

impl Enemy {
    pub fn new(x: f32, stats: EnemyStats) -> Self {
        let health = stats.health.max(1);
        Self {
            pos: Vec2::new(x, -ENEMY_HEIGHT),
            speed: stats.speed,
            health,
            max_health: health,
            active: true,
        }
    }

    pub fn update(&mut self) {
        self.pos.y += self.speed;
        if self.pos.y > SCREEN_HEIGHT {
            self.active = false;
        }
    }

    /// Apply damage. Returns true if this hit destroyed the enemy.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if !self.active {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.active = false;
            return true;
        }
        false
    }

    /// Partly or fully inside the playfield
    pub fn is_on_screen(&self) -> bool {
        self.pos.y + ENEMY_HEIGHT > 0.0 && self.pos.y < SCREEN_HEIGHT
    }
}

impl Collider for Enemy {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT))
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemyDestroyed { pos: Vec2 },
    PowerUpDropped { kind: PowerUpKind, pos: Vec2 },
    PowerUpCollected { kind: PowerUpKind },
    BulletsCleared { count: usize },
    BossArrived { kind: BossKind },
    BossPhaseChanged { phase: u8 },
    BossDefeated { kind: BossKind },
    PlayerKilled,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// The only random source the simulation uses
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub clock: FrameClock,
    pub difficulty: DifficultyScaler,
    pub score: u64,
    /// Terminal flag, set by any lethal collision
    pub game_over: bool,
    pub player: Player,
    /// Registries, insertion ordered
    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<PlayerBullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub powerups: Vec<PowerUp>,
    pub boss: Option<Boss>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning: tuning.sanitized(),
            clock: FrameClock::new(),
            difficulty: DifficultyScaler::default(),
            score: 0,
            game_over: false,
            player: Player::default(),
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            powerups: Vec::new(),
            boss: None,
            events: Vec::new(),
        }
    }

    /// Reconfigure difficulty for `level` and bring in that level's boss.
    /// Levels below 1 are treated as level 1.
    pub fn set_level(&mut self, level: u32) {
        let level = level.max(1);
        self.difficulty.set_level(level);
        self.spawn_boss(BossKind::for_level(level));
        log::info!(
            "Level {}: spawn every {} frames, up to {} enemies",
            level,
            self.difficulty.spawn_interval(),
            self.difficulty.max_enemies()
        );
    }

    /// Replace the current boss with a fresh one
    pub fn spawn_boss(&mut self, kind: BossKind) {
        log::info!("Boss {:?} (type {}) incoming", kind, kind.number());
        self.boss = Some(Boss::new(kind));
    }

    pub fn level(&self) -> u32 {
        self.difficulty.level()
    }

    pub fn elapsed_frames(&self) -> u64 {
        self.clock.elapsed()
    }

    /// True once the current boss has been brought to zero health
    pub fn boss_defeated(&self) -> bool {
        self.boss.as_ref().is_some_and(Boss::is_defeated)
    }

    pub fn active_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.active).count()
    }

    /// Drop every inactive entity from its registry
    pub fn reap(&mut self) {
        self.enemies.retain(|e| e.active);
        self.player_bullets.retain(|b| b.active);
        self.enemy_bullets.retain(|b| b.active);
        self.powerups.retain(|p| p.active);
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            frame: self.clock.elapsed(),
            level: self.level(),
            score: self.score,
            game_over: self.game_over,
            player: self.player.bounds(),
            multi_shot_count: self.player.multi_shot_count,
            screen_shot_ticks: self.player.screen_shot_ticks,
            attack_power: self.player.attack_power,
            enemies: self
                .enemies
                .iter()
                .filter(|e| e.active)
                .map(|e| EnemyView {
                    bounds: e.bounds(),
                    health_ratio: e.health as f32 / e.max_health.max(1) as f32,
                })
                .collect(),
            player_bullets: self
                .player_bullets
                .iter()
                .filter(|b| b.active)
                .map(|b| b.bounds())
                .collect(),
            enemy_bullets: self
                .enemy_bullets
                .iter()
                .filter(|b| b.active)
                .map(|b| EnemyBulletView {
                    bounds: b.bounds(),
                    tag: b.tag,
                    homing: b.homing,
                })
                .collect(),
            powerups: self
                .powerups
                .iter()
                .filter(|p| p.active)
                .map(|p| PowerUpView {
                    bounds: p.bounds(),
                    kind: p.kind,
                })
                .collect(),
            boss: self.boss.as_ref().map(|b| BossView {
                kind: b.kind,
                bounds: b.bounds(),
                state: b.state(),
                health_ratio: b.health_ratio(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub bounds: Aabb,
    pub health_ratio: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyBulletView {
    pub bounds: Aabb,
    pub tag: PatternTag,
    pub homing: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PowerUpView {
    pub bounds: Aabb,
    pub kind: PowerUpKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct BossView {
    pub kind: BossKind,
    pub bounds: Aabb,
    pub state: BossState,
    pub health_ratio: f32,
}

/// Post-tick view of everything a renderer draws
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    pub level: u32,
    pub score: u64,
    pub game_over: bool,
    pub player: Aabb,
    pub multi_shot_count: u32,
    pub screen_shot_ticks: u32,
    pub attack_power: u32,
    pub enemies: Vec<EnemyView>,
    pub player_bullets: Vec<Aabb>,
    pub enemy_bullets: Vec<EnemyBulletView>,
    pub powerups: Vec<PowerUpView>,
    pub boss: Option<BossView>,
}
