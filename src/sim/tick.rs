//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one frame:
//! clock → movement/timers → difficulty/spawning → boss → collisions → reap.

use glam::Vec2;
use rand::Rng;

use super::collision::collides;
use super::powerup::{self, PowerUpKind};
use super::projectile::{EnemyBullet, PlayerBullet, volley_offsets};
use super::state::{Enemy, GameEvent, GameState};
use crate::consts::*;

/// Maximum deviation of a regular enemy's shot from straight down (radians)
pub const AIMED_SPREAD: f32 = std::f32::consts::FRAC_PI_3;

/// Input commands for a single tick, sampled once before the update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Fire held
    pub fire: bool,
}

impl TickInput {
    /// Movement direction, one unit per pressed axis
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| match (neg, pos) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    // Game over is terminal; the orchestrator decides what happens next
    if state.game_over {
        return;
    }

    let elapsed = state.clock.advance();

    update_player(state, input);
    update_enemies(state);
    update_enemy_bullets(state);
    for p in &mut state.powerups {
        p.update();
    }

    state.difficulty.escalate(elapsed);
    let active = state.active_enemy_count();
    if let Some(stats) = state.difficulty.poll_spawn(active, elapsed) {
        let x = state.rng.random_range(0.0..SCREEN_WIDTH - ENEMY_WIDTH);
        state.enemies.push(Enemy::new(x, stats));
        log::trace!("Enemy spawned at x={:.0} (hp {})", x, stats.health);
    }

    update_boss(state);
    resolve_collisions(state);

    state.reap();
}

/// Movement, ability timers, and firing
fn update_player(state: &mut GameState, input: &TickInput) {
    state.player.steer(input.direction());
    state.player.tick_abilities();

    for bullet in &mut state.player_bullets {
        bullet.update();
    }

    state.player.fire_cooldown = state.player.fire_cooldown.saturating_add(1);
    if !(input.fire && state.player.fire_cooldown >= state.tuning.player_fire_interval) {
        return;
    }
    state.player.fire_cooldown = 0;

    let muzzle = Vec2::new(
        state.player.pos.x + PLAYER_WIDTH / 2.0 - PLAYER_BULLET_WIDTH / 2.0,
        state.player.pos.y,
    );
    for dx in volley_offsets(state.player.bullets_per_shot(), state.tuning.multi_shot_spacing) {
        state.player_bullets.push(PlayerBullet::new(
            muzzle + Vec2::new(dx, 0.0),
            state.tuning.player_bullet_speed,
        ));
    }

    if state.player.screen_shot_enabled() {
        screen_shot_sweep(state);
    }
}

/// Full-field hit on every visible enemy and a vulnerable boss
fn screen_shot_sweep(state: &mut GameState) {
    let power = state.player.attack_power;
    let kills: Vec<Vec2> = state
        .enemies
        .iter_mut()
        .filter(|e| e.active && e.is_on_screen())
        .filter_map(|e| e.take_damage(power).then_some(e.pos))
        .collect();
    for pos in kills {
        on_enemy_killed(state, pos);
    }

    let boss_down = state
        .boss
        .as_mut()
        .is_some_and(|boss| boss.take_damage(power));
    if boss_down {
        on_boss_defeated(state);
    }
}

fn update_enemies(state: &mut GameState) {
    for enemy in &mut state.enemies {
        enemy.update();
    }
}

/// Move enemy bullets (steering seekers first), then let enemies fire
fn update_enemy_bullets(state: &mut GameState) {
    let target = state.player.center();
    for bullet in &mut state.enemy_bullets {
        if bullet.homing {
            bullet.steer_toward(target);
        }
        bullet.update();
    }

    let chance = state.tuning.enemy_fire_chance;
    for enemy in state.enemies.iter().filter(|e| e.active) {
        if state.rng.random_bool(chance) {
            let spread = state.rng.random_range(-AIMED_SPREAD..=AIMED_SPREAD);
            let muzzle = Vec2::new(
                enemy.pos.x + ENEMY_WIDTH / 2.0 - AIMED_BULLET_SIZE / 2.0,
                enemy.pos.y + ENEMY_HEIGHT,
            );
            state.enemy_bullets.push(EnemyBullet::aimed(muzzle, spread));
        }
    }
}

fn update_boss(state: &mut GameState) {
    let target = state.player.center();
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    let kind = boss.kind;
    let out = boss.update(target, &mut state.rng);

    if out.arrived {
        log::info!("Boss {:?} entered the arena", kind);
        state.events.push(GameEvent::BossArrived { kind });
    }
    if let Some(phase) = out.phase_changed {
        log::info!("Boss {:?} entered phase {}", kind, phase);
        state.events.push(GameEvent::BossPhaseChanged { phase });
    }
    state.enemy_bullets.extend(out.bullets);
}

/// Resolve every pairing for this tick
fn resolve_collisions(state: &mut GameState) {
    let power = state.player.attack_power;

    // Player bullets vs enemies: each bullet is consumed by its first hit
    let mut kills = Vec::new();
    for bullet in &mut state.player_bullets {
        for enemy in &mut state.enemies {
            if collides(&*bullet, &*enemy) {
                bullet.active = false;
                if enemy.take_damage(power) {
                    kills.push(enemy.pos);
                }
                break;
            }
        }
    }
    for pos in kills {
        on_enemy_killed(state, pos);
    }

    // Player bullets vs boss
    let mut boss_down = false;
    if let Some(boss) = state.boss.as_mut() {
        for bullet in &mut state.player_bullets {
            if boss.is_vulnerable() && collides(&*bullet, &*boss) {
                bullet.active = false;
                boss_down |= boss.take_damage(power);
            }
        }
    }
    if boss_down {
        on_boss_defeated(state);
    }

    // Player vs powerups
    let mut collected = Vec::new();
    for p in &mut state.powerups {
        if collides(&state.player, &*p) {
            p.active = false;
            collected.push(p.kind);
        }
    }
    for kind in collected {
        apply_powerup(state, kind);
    }

    // Anything hostile touching the player ends the run
    let player = &state.player;
    let lethal = state.enemies.iter().any(|e| collides(e, player))
        || state.enemy_bullets.iter().any(|b| collides(b, player))
        || state.boss.as_ref().is_some_and(|b| collides(b, player));
    if lethal {
        state.game_over = true;
        state.events.push(GameEvent::PlayerKilled);
        log::info!(
            "Game over at frame {} with score {}",
            state.clock.elapsed(),
            state.score
        );
    }
}

fn on_enemy_killed(state: &mut GameState, pos: Vec2) {
    state.score += state.tuning.enemy_kill_score;
    state.events.push(GameEvent::EnemyDestroyed { pos });

    if let Some(drop) = powerup::roll_drop(pos, state.score, &state.tuning, &mut state.rng) {
        log::debug!("{:?} dropped at ({:.0}, {:.0})", drop.kind, pos.x, pos.y);
        state.events.push(GameEvent::PowerUpDropped {
            kind: drop.kind,
            pos,
        });
        state.powerups.push(drop);
    }
}

fn on_boss_defeated(state: &mut GameState) {
    let Some(kind) = state.boss.as_ref().map(|b| b.kind) else {
        return;
    };
    state.score += state.tuning.boss_defeat_score;
    state.events.push(GameEvent::BossDefeated { kind });
    log::info!("Boss {:?} defeated, score {}", kind, state.score);
}

/// Apply a collected power-up to the player / field
pub fn apply_powerup(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::MultiShot => {
            state.player.multi_shot_count = state.player.multi_shot_count.saturating_add(1);
        }
        PowerUpKind::ScreenShot => {
            state.player.screen_shot_ticks = state.tuning.screen_shot_duration;
        }
        PowerUpKind::AttackBoost => {
            state.player.attack_power = state.player.attack_power.saturating_add(1);
        }
        PowerUpKind::ClearBullets => {
            let mut count = 0;
            for bullet in state.enemy_bullets.iter_mut().filter(|b| b.active) {
                bullet.active = false;
                count += 1;
            }
            state.events.push(GameEvent::BulletsCleared { count });
        }
    }
    state.events.push(GameEvent::PowerUpCollected { kind });
}
