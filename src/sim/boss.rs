//! Boss encounter
//!
//! A boss enters from above, then moves and fires according to its
//! archetype while its phase escalates with lost health. The archetype
//! (movement + volley) is fixed when the boss is built.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Collider};
use super::pattern::{self, FireContext, Pattern};
use super::projectile::EnemyBullet;
use crate::consts::*;

pub const BASE_FIRE_INTERVAL: u32 = 30;
pub const MIN_FIRE_INTERVAL: u32 = 10;
/// Frames between velocity re-rolls for the random-walk archetype
pub const RANDOM_WALK_PERIOD: u32 = 180;
/// Top of the random-walk box
pub const RANDOM_WALK_TOP: f32 = 30.0;
pub const MAX_PHASE: u8 = 4;

/// The four boss archetypes, in level order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossKind {
    /// Patrols side to side, fires rings
    Warden,
    /// Patrols with a vertical bob, fires cross rakes
    Lancer,
    /// Shadows the player, fires seekers
    Stalker,
    /// Random-impulse walker, fires any pattern
    Tyrant,
}

impl BossKind {
    /// Boss for a level: levels cycle through the four archetypes
    pub fn for_level(level: u32) -> Self {
        match (level.max(1) - 1) % 4 {
            0 => BossKind::Warden,
            1 => BossKind::Lancer,
            2 => BossKind::Stalker,
            _ => BossKind::Tyrant,
        }
    }

    /// 1-based boss type number
    pub fn number(&self) -> u8 {
        match self {
            BossKind::Warden => 1,
            BossKind::Lancer => 2,
            BossKind::Stalker => 3,
            BossKind::Tyrant => 4,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            BossKind::Warden => BossKind::Lancer,
            BossKind::Lancer => BossKind::Stalker,
            BossKind::Stalker => BossKind::Tyrant,
            BossKind::Tyrant => BossKind::Warden,
        }
    }

    pub fn max_health(&self) -> u32 {
        match self {
            BossKind::Warden => 200,
            BossKind::Lancer => 300,
            BossKind::Stalker => 400,
            BossKind::Tyrant => 500,
        }
    }

    pub fn size(&self) -> Vec2 {
        match self {
            BossKind::Warden => Vec2::new(80.0, 80.0),
            BossKind::Lancer => Vec2::new(100.0, 80.0),
            BossKind::Stalker => Vec2::new(100.0, 100.0),
            BossKind::Tyrant => Vec2::new(120.0, 100.0),
        }
    }

    fn movement(&self) -> Movement {
        match self {
            BossKind::Warden => Movement::Patrol,
            BossKind::Lancer => Movement::Bob {
                period: 30.0,
                amplitude: 40.0,
            },
            BossKind::Stalker => Movement::Pursuit {
                period: 40.0,
                amplitude: 30.0,
            },
            BossKind::Tyrant => Movement::RandomWalk,
        }
    }

    fn volley(&self) -> Volley {
        match self {
            BossKind::Warden => Volley::Fixed(Pattern::Circle),
            BossKind::Lancer => Volley::Fixed(Pattern::Cross),
            BossKind::Stalker => Volley::Fixed(Pattern::Homing),
            BossKind::Tyrant => Volley::Hybrid,
        }
    }
}

/// How a boss moves once it has entered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Movement {
    /// Horizontal bounce
    Patrol,
    /// Horizontal bounce plus sinusoidal height around the arena line
    Bob { period: f32, amplitude: f32 },
    /// Chase the player's x plus sinusoidal height
    Pursuit { period: f32, amplitude: f32 },
    /// Random velocity re-rolled periodically, bouncing in the upper half
    RandomWalk,
}

/// How a boss picks a pattern when its fire timer elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Volley {
    Fixed(Pattern),
    /// Uniformly random pattern per firing event
    Hybrid,
}

impl Volley {
    fn pick(&self, rng: &mut impl Rng) -> Pattern {
        match self {
            Volley::Fixed(p) => *p,
            Volley::Hybrid => Pattern::random(rng),
        }
    }
}

/// Observable lifecycle of a boss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossState {
    Entering,
    Active { phase: u8 },
    Defeated,
}

/// Phase implied by remaining health (thresholds inclusive)
pub fn phase_for_health(health: u32, max_health: u32) -> u8 {
    let (h, m) = (health as u64, max_health.max(1) as u64);
    if h * 4 <= m {
        4
    } else if h * 2 <= m {
        3
    } else if h * 4 <= m * 3 {
        2
    } else {
        1
    }
}

/// Frames between volleys at `phase`
pub fn fire_interval(phase: u8) -> u32 {
    BASE_FIRE_INTERVAL
        .saturating_sub((phase.max(1) as u32 - 1) * 5)
        .max(MIN_FIRE_INTERVAL)
}

/// What happened to the boss during one update
#[derive(Debug, Default)]
pub struct BossUpdate {
    pub bullets: Vec<EnemyBullet>,
    /// New phase, if it changed this tick
    pub phase_changed: Option<u8>,
    /// The boss finished its entrance this tick
    pub arrived: bool,
}

/// The level boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub kind: BossKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub phase: u8,
    pub anim_timer: u32,
    pub shoot_timer: u32,
    /// Frames since the random walk last re-rolled its velocity
    pub pattern_time: u32,
    pub entering: bool,
    movement: Movement,
    volley: Volley,
}

impl Boss {
    /// Spawn a boss just above the screen, horizontally centered
    pub fn new(kind: BossKind) -> Self {
        let size = kind.size();
        let health = kind.max_health();
        Self {
            kind,
            pos: Vec2::new((SCREEN_WIDTH - size.x) / 2.0, -size.y),
            vel: Vec2::new(1.0, 1.0),
            size,
            health,
            max_health: health,
            phase: 1,
            anim_timer: 0,
            shoot_timer: 0,
            pattern_time: 0,
            entering: true,
            movement: kind.movement(),
            volley: kind.volley(),
        }
    }

    pub fn movement(&self) -> Movement {
        self.movement
    }

    pub fn volley(&self) -> Volley {
        self.volley
    }

    pub fn state(&self) -> BossState {
        if self.health == 0 {
            BossState::Defeated
        } else if self.entering {
            BossState::Entering
        } else {
            BossState::Active { phase: self.phase }
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    pub fn health_ratio(&self) -> f32 {
        self.health as f32 / self.max_health.max(1) as f32
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Whether player fire can currently hurt the boss
    pub fn is_vulnerable(&self) -> bool {
        !self.entering && !self.is_defeated()
    }

    /// Apply damage. Returns true if this hit defeated the boss.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if !self.is_vulnerable() {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        self.health == 0
    }

    /// Advance one tick
    pub fn update(&mut self, player_center: Vec2, rng: &mut impl Rng) -> BossUpdate {
        let mut out = BossUpdate::default();
        if self.is_defeated() {
            return out;
        }

        self.anim_timer = self.anim_timer.wrapping_add(1);
        self.pattern_time = self.pattern_time.saturating_add(1);

        if self.entering {
            self.pos.y += BOSS_ENTER_SPEED;
            if self.pos.y >= BOSS_ARENA_Y {
                self.entering = false;
                out.arrived = true;
            }
            return out;
        }

        let phase = phase_for_health(self.health, self.max_health).max(self.phase);
        if phase != self.phase {
            self.phase = phase;
            out.phase_changed = Some(phase);
        }

        self.apply_movement(player_center, rng);

        self.shoot_timer += 1;
        if self.shoot_timer >= fire_interval(self.phase) {
            let ctx = FireContext {
                origin: self.center(),
                target: player_center,
                phase: self.phase,
                anim_timer: self.anim_timer,
            };
            let chosen = self.volley.pick(rng);
            out.bullets = pattern::emit(chosen, &ctx, rng);
            self.shoot_timer = 0;
        }

        out
    }

    fn apply_movement(&mut self, player_center: Vec2, rng: &mut impl Rng) {
        let max_x = SCREEN_WIDTH - self.size.x;
        let t = self.anim_timer as f32;

        match self.movement {
            Movement::Patrol => {
                self.pos.x += self.vel.x;
                self.bounce_x(max_x);
            }
            Movement::Bob { period, amplitude } => {
                self.pos.x += self.vel.x;
                self.bounce_x(max_x);
                self.pos.y = BOSS_ARENA_Y + (t / period).sin() * amplitude;
            }
            Movement::Pursuit { period, amplitude } => {
                let target_x = (player_center.x - self.size.x / 2.0).clamp(0.0, max_x);
                let step = self.vel.x.abs();
                let dx = target_x - self.pos.x;
                if dx.abs() <= step {
                    self.pos.x = target_x;
                } else {
                    self.pos.x += step * dx.signum();
                }
                self.pos.y = BOSS_ARENA_Y + (t / period).sin() * amplitude;
            }
            Movement::RandomWalk => {
                if self.pattern_time >= RANDOM_WALK_PERIOD {
                    self.vel = Vec2::new(
                        rng.random::<f32>() * 4.0 - 2.0,
                        rng.random::<f32>() * 2.0 - 1.0,
                    );
                    self.pattern_time = 0;
                }
                self.pos += self.vel;
                self.bounce_x(max_x);

                let max_y = SCREEN_HEIGHT / 2.0 - self.size.y;
                if self.pos.y <= RANDOM_WALK_TOP {
                    self.pos.y = RANDOM_WALK_TOP;
                    self.vel.y = self.vel.y.abs();
                } else if self.pos.y >= max_y {
                    self.pos.y = max_y;
                    self.vel.y = -self.vel.y.abs();
                }
            }
        }
    }

    fn bounce_x(&mut self, max_x: f32) {
        if self.pos.x <= 0.0 {
            self.pos.x = 0.0;
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x >= max_x {
            self.pos.x = max_x;
            self.vel.x = -self.vel.x.abs();
        }
    }
}

impl Collider for Boss {
    fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    fn is_active(&self) -> bool {
        !self.is_defeated()
    }
}
