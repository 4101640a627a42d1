//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one `tick` = one frame)
//! - Seeded RNG only
//! - Stable iteration order (registries are insertion ordered)
//! - No rendering or platform dependencies

pub mod boss;
pub mod collision;
pub mod difficulty;
pub mod pattern;
pub mod powerup;
pub mod projectile;
pub mod state;
pub mod tick;

pub use boss::{Boss, BossKind, BossState, phase_for_health};
pub use collision::{Aabb, Collider, collides};
pub use difficulty::{DifficultyScaler, FrameClock};
pub use pattern::{FireContext, Pattern};
pub use powerup::{PowerUp, PowerUpKind, drop_chance};
pub use projectile::{EnemyBullet, PatternTag, PlayerBullet};
pub use state::{Enemy, GameEvent, GameState, Player, Snapshot};
pub use tick::{TickInput, apply_powerup, tick};
