//! Boss bullet patterns
//!
//! Each pattern turns an origin point and the boss phase into one batch of
//! enemy bullets. Angles are screen-space radians (0 = right, π/2 = down).

use std::f32::consts::{FRAC_PI_3, TAU};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::projectile::{EnemyBullet, PatternTag};

pub const RING_SPEED: f32 = 3.0;
pub const RAKE_BULLETS_PER_LINE: usize = 5;
pub const RAKE_BASE_SPEED: f32 = 2.0;
pub const RAKE_SPEED_STEP: f32 = 0.5;
pub const MAX_CROSS_LINES: usize = 6;
pub const OVERLAY_SPEED: f32 = 3.0;
/// Seeker launch jitter, radians either side of the aim line
pub const HOMING_JITTER: f32 = 0.25;
pub const FAN_ARC: f32 = FRAC_PI_3;
pub const FAN_SPEED: f32 = 2.5;

/// A firing pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    Circle,
    Cross,
    Homing,
}

impl Pattern {
    pub const ALL: [Pattern; 3] = [Pattern::Circle, Pattern::Cross, Pattern::Homing];

    /// Uniform pick among all patterns
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Everything a pattern needs to know about the firing moment
#[derive(Debug, Clone, Copy)]
pub struct FireContext {
    /// Emission point (boss center)
    pub origin: Vec2,
    /// Player center, for aimed patterns
    pub target: Vec2,
    /// Boss phase, 1..=4
    pub phase: u8,
    /// Boss animation timer, drives the rotating overlay
    pub anim_timer: u32,
}

/// Emit one batch of bullets for `pattern`
pub fn emit(pattern: Pattern, ctx: &FireContext, rng: &mut impl Rng) -> Vec<EnemyBullet> {
    match pattern {
        Pattern::Circle => circle(ctx.origin, ctx.phase),
        Pattern::Cross => cross(ctx.origin, ctx.phase, ctx.anim_timer),
        Pattern::Homing => homing(ctx.origin, ctx.target, ctx.phase, rng),
    }
}

/// Bullets per ring at `phase`
pub fn ring_size(phase: u8) -> usize {
    8 + 2 * (phase.max(1) as usize - 1)
}

/// Number of cross lines at `phase`
pub fn cross_lines(phase: u8) -> usize {
    (2 + (phase.max(1) as usize - 1)).min(MAX_CROSS_LINES)
}

/// Evenly spaced ring; phase 3+ adds a second ring offset by half a step
pub fn circle(origin: Vec2, phase: u8) -> Vec<EnemyBullet> {
    let count = ring_size(phase);
    let step = TAU / count as f32;
    let second_ring = phase >= 3;

    let mut bullets = Vec::with_capacity(if second_ring { count * 2 } else { count });
    bullets.extend((0..count).map(|i| {
        EnemyBullet::pattern(origin, i as f32 * step, RING_SPEED, PatternTag::Ring)
    }));
    if second_ring {
        bullets.extend((0..count).map(|i| {
            EnemyBullet::pattern(
                origin,
                i as f32 * step + step / 2.0,
                RING_SPEED,
                PatternTag::RingOffset,
            )
        }));
    }
    bullets
}

/// Lines across the lower half-plane, each a rake of increasingly fast
/// bullets; phase 3+ adds one overlay bullet per line rotated by the
/// animation timer.
pub fn cross(origin: Vec2, phase: u8, anim_timer: u32) -> Vec<EnemyBullet> {
    let lines = cross_lines(phase);
    let step = std::f32::consts::PI / lines as f32;

    let mut bullets = Vec::with_capacity(lines * (RAKE_BULLETS_PER_LINE + 1));
    for line in 0..lines {
        let angle = line as f32 * step;
        for j in 0..RAKE_BULLETS_PER_LINE {
            let speed = RAKE_BASE_SPEED + j as f32 * RAKE_SPEED_STEP;
            bullets.push(EnemyBullet::pattern(origin, angle, speed, PatternTag::CrossRake));
        }
    }

    if phase >= 3 {
        let rotation = ((anim_timer % 360) as f32).to_radians();
        for line in 0..lines {
            let angle = line as f32 * step + rotation;
            bullets.push(EnemyBullet::pattern(
                origin,
                angle,
                OVERLAY_SPEED,
                PatternTag::CrossOverlay,
            ));
        }
    }
    bullets
}

/// Seekers aimed at the player with jitter; phase 2+ adds a fixed fan
pub fn homing(origin: Vec2, target: Vec2, phase: u8, rng: &mut impl Rng) -> Vec<EnemyBullet> {
    let phase = phase.max(1) as usize;
    let to_target = target - origin;
    let aim = to_target.y.atan2(to_target.x);

    let seekers = phase;
    let fan = if phase >= 2 { 3 + (phase - 2) * 2 } else { 0 };

    let mut bullets = Vec::with_capacity(seekers + fan);
    for _ in 0..seekers {
        let jitter = rng.random_range(-HOMING_JITTER..=HOMING_JITTER);
        bullets.push(EnemyBullet::homing(origin, aim + jitter));
    }

    for i in 0..fan {
        let offset = FAN_ARC * (i as f32 / (fan - 1) as f32 - 0.5);
        bullets.push(EnemyBullet::pattern(origin, aim + offset, FAN_SPEED, PatternTag::Fan));
    }
    bullets
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn origin() -> Vec2 {
        Vec2::new(320.0, 120.0)
    }

    fn count_tag(bullets: &[EnemyBullet], tag: PatternTag) -> usize {
        bullets.iter().filter(|b| b.tag == tag).count()
    }

    #[test]
    fn test_circle_phase_one_is_eight() {
        let bullets = circle(origin(), 1);
        assert_eq!(bullets.len(), 8);
        assert!(bullets.iter().all(|b| (b.vel.length() - RING_SPEED).abs() < 1e-4));
    }

    #[test]
    fn test_circle_phase_two_single_ring() {
        let bullets = circle(origin(), 2);
        assert_eq!(bullets.len(), 10);
        assert_eq!(count_tag(&bullets, PatternTag::RingOffset), 0);
    }

    #[test]
    fn test_circle_phase_three_interleaved() {
        let bullets = circle(origin(), 3);
        assert_eq!(count_tag(&bullets, PatternTag::Ring), 12);
        assert_eq!(count_tag(&bullets, PatternTag::RingOffset), 12);

        // First offset bullet sits halfway between the first two ring bullets
        let step = TAU / 12.0;
        let offset = bullets
            .iter()
            .find(|b| b.tag == PatternTag::RingOffset)
            .unwrap();
        let angle = offset.vel.y.atan2(offset.vel.x);
        assert!((angle - step / 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_cross_line_counts() {
        assert_eq!(cross_lines(1), 2);
        assert_eq!(cross_lines(4), 5);
        assert_eq!(cross(origin(), 1, 0).len(), 2 * 5);
        assert_eq!(cross(origin(), 2, 0).len(), 3 * 5);
        // Phase 3: 4 lines of 5 plus one overlay per line
        let phase3 = cross(origin(), 3, 0);
        assert_eq!(phase3.len(), 4 * 5 + 4);
        assert_eq!(count_tag(&phase3, PatternTag::CrossOverlay), 4);
    }

    #[test]
    fn test_cross_rake_speeds() {
        let bullets = cross(origin(), 1, 0);
        let speeds: Vec<f32> = bullets.iter().take(5).map(|b| b.vel.length()).collect();
        for (j, speed) in speeds.iter().enumerate() {
            assert!((speed - (2.0 + 0.5 * j as f32)).abs() < 1e-4);
        }
        // All rake bullets stay within 0..180°
        for b in &bullets {
            assert!(b.vel.y >= -1e-4);
        }
    }

    #[test]
    fn test_cross_overlay_rotates_with_timer() {
        let a = cross(origin(), 3, 0);
        let b = cross(origin(), 3, 90);
        let first_overlay = |v: &[EnemyBullet]| {
            v.iter()
                .find(|x| x.tag == PatternTag::CrossOverlay)
                .map(|x| x.vel)
                .unwrap()
        };
        let va = first_overlay(&a);
        let vb = first_overlay(&b);
        // 0° vs 90°
        assert!((va.x - OVERLAY_SPEED).abs() < 1e-4);
        assert!((vb.y - OVERLAY_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_homing_counts_by_phase() {
        let mut rng = Pcg32::seed_from_u64(7);
        let target = Vec2::new(320.0, 440.0);
        let p1 = homing(origin(), target, 1, &mut rng);
        assert_eq!(p1.len(), 1);
        assert!(p1[0].homing);

        let p2 = homing(origin(), target, 2, &mut rng);
        assert_eq!(count_tag(&p2, PatternTag::Homing), 2);
        assert_eq!(count_tag(&p2, PatternTag::Fan), 3);

        let p4 = homing(origin(), target, 4, &mut rng);
        assert_eq!(count_tag(&p4, PatternTag::Homing), 4);
        assert_eq!(count_tag(&p4, PatternTag::Fan), 7);
    }

    #[test]
    fn test_homing_jitter_and_fan_arc() {
        let mut rng = Pcg32::seed_from_u64(99);
        // Player straight below: aim = π/2
        let target = origin() + Vec2::new(0.0, 300.0);
        let bullets = homing(origin(), target, 3, &mut rng);
        let aim = std::f32::consts::FRAC_PI_2;
        for b in bullets.iter().filter(|b| b.homing) {
            let angle = b.vel.y.atan2(b.vel.x);
            assert!((angle - aim).abs() <= HOMING_JITTER + 1e-4);
        }
        let fan: Vec<f32> = bullets
            .iter()
            .filter(|b| b.tag == PatternTag::Fan)
            .map(|b| b.vel.y.atan2(b.vel.x))
            .collect();
        assert!((fan[0] - (aim - FAN_ARC / 2.0)).abs() < 1e-4);
        assert!((fan[fan.len() - 1] - (aim + FAN_ARC / 2.0)).abs() < 1e-4);
        assert!(!bullets.iter().any(|b| b.tag == PatternTag::Fan && b.homing));
    }

    #[test]
    fn test_seeded_emission_is_reproducible() {
        let ctx = FireContext {
            origin: origin(),
            target: Vec2::new(100.0, 400.0),
            phase: 4,
            anim_timer: 33,
        };
        let mut a = Pcg32::seed_from_u64(1234);
        let mut b = Pcg32::seed_from_u64(1234);
        let va = emit(Pattern::Homing, &ctx, &mut a);
        let vb = emit(Pattern::Homing, &ctx, &mut b);
        assert_eq!(va.len(), vb.len());
        for (x, y) in va.iter().zip(vb.iter()) {
            assert_eq!(x.vel, y.vel);
        }
    }

    #[test]
    fn test_random_pattern_covers_all() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut seen = [false; 3];
        for _ in 0..100 {
            match Pattern::random(&mut rng) {
                Pattern::Circle => seen[0] = true,
                Pattern::Cross => seen[1] = true,
                Pattern::Homing => seen[2] = true,
            }
        }
        assert!(seen.iter().all(|s| *s));
    }
}
