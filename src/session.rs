//! Level/mode orchestration
//!
//! The simulation never decides what happens after a boss falls or the
//! player dies; a `Session` watches the post-tick state and makes those
//! calls: advance a level, bring in the next boss, or stop.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{BossKind, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// How a run progresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Reaching the level's score target or defeating its boss advances
    /// to the next level
    #[default]
    Levels,
    /// Level stays put; defeated bosses are replaced by the next archetype
    Endless,
}

impl GameMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "levels" | "level" => Some(GameMode::Levels),
            "endless" => Some(GameMode::Endless),
            _ => None,
        }
    }
}

/// Outcome of one session step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    /// Level target reached or boss defeated in levels mode; the new level
    /// is already set up
    LevelCleared { level: u32 },
    /// Boss defeated in endless mode; the next boss is on its way
    BossReplaced { kind: BossKind },
    GameOver { score: u64 },
}

/// A run of the game in one mode
#[derive(Debug, Clone)]
pub struct Session {
    pub mode: GameMode,
    pub state: GameState,
    /// Score that clears the current level in levels mode
    pub target_score: u64,
    seed: u64,
    tuning: Tuning,
    runs: u32,
}

/// Points per level needed to clear it (level 3 clears at 3000)
pub const TARGET_SCORE_PER_LEVEL: u64 = 1000;

fn target_for(level: u32) -> u64 {
    u64::from(level.max(1)).saturating_mul(TARGET_SCORE_PER_LEVEL)
}

impl Session {
    pub fn new(mode: GameMode, seed: u64, tuning: Tuning) -> Self {
        Self::starting_at(mode, seed, tuning, 1)
    }

    /// Start directly at `level` (level select)
    pub fn starting_at(mode: GameMode, seed: u64, tuning: Tuning, level: u32) -> Self {
        let mut state = GameState::with_tuning(seed, tuning.clone());
        state.set_level(level);
        log::info!("{:?} run started at level {} (seed {})", mode, level.max(1), seed);
        Self {
            mode,
            target_score: target_for(level),
            state,
            seed,
            tuning,
            runs: 1,
        }
    }

    pub fn level(&self) -> u32 {
        self.state.level()
    }

    /// Advance one frame and apply progression rules
    pub fn step(&mut self, input: &TickInput) -> SessionStatus {
        tick(&mut self.state, input);

        if self.state.game_over {
            return SessionStatus::GameOver {
                score: self.state.score,
            };
        }

        match self.mode {
            GameMode::Levels => {
                if !(self.state.boss_defeated() || self.state.score >= self.target_score) {
                    return SessionStatus::Running;
                }
                let level = self.state.level().saturating_add(1);
                self.state.set_level(level);
                self.target_score = target_for(level);
                log::info!("Level {} target: {} points", level, self.target_score);
                SessionStatus::LevelCleared { level }
            }
            GameMode::Endless => {
                if !self.state.boss_defeated() {
                    return SessionStatus::Running;
                }
                let kind = self
                    .state
                    .boss
                    .as_ref()
                    .map(|b| b.kind.next())
                    .unwrap_or(BossKind::Warden);
                self.state.spawn_boss(kind);
                SessionStatus::BossReplaced { kind }
            }
        }
    }

    /// Start over in the same mode with a fresh seed derived from the first
    pub fn restart(&mut self) {
        let seed = self.seed.wrapping_add(self.runs as u64);
        self.runs += 1;
        self.state = GameState::with_tuning(seed, self.tuning.clone());
        self.state.set_level(1);
        self.target_score = target_for(1);
        log::info!("Restarted {:?} run (seed {})", self.mode, seed);
    }
}

/// Radius around the player in which hostiles trigger evasive movement
const DODGE_RADIUS: f32 = 90.0;

/// Demo input: keep firing, dodge nearby threats, otherwise line up under
/// the lowest enemy (or the boss) and grab pickups on the way
pub fn autopilot(state: &GameState) -> TickInput {
    let me = state.player.center();
    let mut input = TickInput {
        fire: true,
        ..Default::default()
    };

    let nearest_threat = state
        .enemy_bullets
        .iter()
        .map(|b| b.center())
        .chain(
            state
                .enemies
                .iter()
                .map(|e| e.pos + Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT) * 0.5),
        )
        .filter(|p| p.y <= me.y + PLAYER_HEIGHT && p.distance(me) < DODGE_RADIUS)
        .min_by(|a, b| a.distance(me).total_cmp(&b.distance(me)));

    if let Some(threat) = nearest_threat {
        let go_left = if threat.x > me.x {
            me.x > PLAYER_WIDTH
        } else {
            me.x > SCREEN_WIDTH - PLAYER_WIDTH
        };
        input.left = go_left;
        input.right = !go_left;
        input.down = threat.y < me.y;
        return input;
    }

    let target_x = state
        .powerups
        .iter()
        .map(|p| p.pos.x + POWERUP_SIZE / 2.0)
        .next()
        .or_else(|| {
            state
                .enemies
                .iter()
                .filter(|e| e.is_on_screen())
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|e| e.pos.x + ENEMY_WIDTH / 2.0)
        })
        .or_else(|| state.boss.as_ref().map(|b| b.center().x));

    if let Some(x) = target_x {
        input.left = x < me.x - PLAYER_SPEED;
        input.right = x > me.x + PLAYER_SPEED;
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::BossState;

    fn quiet() -> Tuning {
        Tuning {
            enemy_fire_chance: 0.0,
            ..Tuning::default()
        }
    }

    fn defeat_boss(session: &mut Session) {
        let boss = session.state.boss.as_mut().unwrap();
        boss.entering = false;
        boss.take_damage(u32::MAX);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(GameMode::parse("Endless"), Some(GameMode::Endless));
        assert_eq!(GameMode::parse("levels"), Some(GameMode::Levels));
        assert_eq!(GameMode::parse("arcade"), None);
    }

    #[test]
    fn test_levels_mode_advances_on_boss_defeat() {
        let mut session = Session::new(GameMode::Levels, 1, quiet());
        assert_eq!(session.level(), 1);
        assert_eq!(session.step(&TickInput::default()), SessionStatus::Running);

        defeat_boss(&mut session);
        let status = session.step(&TickInput::default());
        assert_eq!(status, SessionStatus::LevelCleared { level: 2 });
        assert_eq!(session.level(), 2);
        assert_eq!(session.state.difficulty.spawn_interval(), 50);
        let boss = session.state.boss.as_ref().unwrap();
        assert_eq!(boss.kind, BossKind::Lancer);
        assert_eq!(boss.state(), BossState::Entering);
    }

    #[test]
    fn test_levels_mode_advances_on_target_score() {
        let mut session = Session::new(GameMode::Levels, 5, quiet());
        assert_eq!(session.target_score, 1000);

        session.state.score = 999;
        assert_eq!(session.step(&TickInput::default()), SessionStatus::Running);

        session.state.score = 1000;
        let status = session.step(&TickInput::default());
        assert_eq!(status, SessionStatus::LevelCleared { level: 2 });
        assert_eq!(session.level(), 2);
        assert_eq!(session.target_score, 2000);

        // Score carries over; the next level needs the higher target
        assert_eq!(session.step(&TickInput::default()), SessionStatus::Running);
        assert_eq!(session.level(), 2);
    }

    #[test]
    fn test_endless_mode_ignores_target_score() {
        let mut session = Session::new(GameMode::Endless, 6, quiet());
        session.state.score = 50_000;
        assert_eq!(session.step(&TickInput::default()), SessionStatus::Running);
        assert_eq!(session.level(), 1);
    }

    #[test]
    fn test_endless_mode_rotates_boss() {
        let mut session = Session::new(GameMode::Endless, 2, quiet());
        defeat_boss(&mut session);
        let status = session.step(&TickInput::default());
        assert_eq!(
            status,
            SessionStatus::BossReplaced {
                kind: BossKind::Lancer
            }
        );
        assert_eq!(session.level(), 1);
    }

    #[test]
    fn test_game_over_and_restart() {
        let mut session = Session::new(GameMode::Levels, 3, quiet());
        session.state.game_over = true;
        session.state.score = 700;
        assert_eq!(
            session.step(&TickInput::default()),
            SessionStatus::GameOver { score: 700 }
        );

        session.restart();
        assert_eq!(session.target_score, 1000);
        assert!(!session.state.game_over);
        assert_eq!(session.state.score, 0);
        assert_eq!(session.level(), 1);
        assert_ne!(session.state.seed, 3);
    }

    #[test]
    fn test_autopilot_always_fires_and_dodges() {
        let mut state = GameState::new(4);
        assert!(autopilot(&state).fire);

        // Bullet coming down just right of the player
        let me = state.player.center();
        state.enemy_bullets.push(crate::sim::EnemyBullet::pattern(
            me + Vec2::new(10.0, -40.0),
            std::f32::consts::FRAC_PI_2,
            3.0,
            crate::sim::PatternTag::Fan,
        ));
        let input = autopilot(&state);
        assert!(input.left && !input.right);
    }
}
