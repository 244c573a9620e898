//! Property-based invariant tests for the particle field.
//!
//! Verifies:
//! 1.  Particle count = clamp(round(w*h/15000), 35, 120) for any surface
//! 2.  Positions stay within the surface modulo a one-frame overshoot
//! 3.  Proximity alpha decreases strictly with distance
//! 4.  No particle link at or beyond 120 logical px; below, alpha follows
//!     (1 − d/120) × 0.35
//! 5.  Pointer links require an active pointer and follow
//!     (1 − d/150) × 0.85 with the wider line width
//! 6.  The same seed always produces the same layout
//! 7.  A resize discards every particle and respawns to the new count
//! 8.  A reduced-motion backdrop performs no setup at all

use glam::Vec2;
use gossamer::field::{
    proximity_alpha, Field, Particle, Surface, LINK_DIST, MAX_SPEED, POINTER_DIST,
};
use gossamer::{Backdrop, Palette, PointerState};
use proptest::prelude::*;

fn surface(w: f32, h: f32) -> Surface {
    Surface::new(w, h, 1.0)
}

fn still(x: f32, y: f32) -> Particle {
    Particle {
        pos: Vec2::new(x, y),
        vel: Vec2::ZERO,
        radius: 1.0,
    }
}

proptest! {
    // 1. Count formula.
    #[test]
    fn count_formula_holds(w in 1.0f32..4000.0, h in 1.0f32..4000.0) {
        let expected = (w * h / 15_000.0).round().clamp(35.0, 120.0) as usize;
        let count = surface(w, h).particle_count();
        prop_assert_eq!(count, expected);
        prop_assert!((35..=120).contains(&count));
    }

    // 2. Bounded positions: reflection may overshoot by at most one frame's
    // velocity, and never accumulates further.
    #[test]
    fn positions_bounded_after_many_ticks(seed in any::<u64>(), ticks in 1usize..240) {
        let mut field = Field::new(surface(640.0, 480.0), Palette::default(), seed);
        let pointer = PointerState::default();
        for _ in 0..ticks {
            field.tick(&pointer);
        }
        for p in field.particles() {
            prop_assert!(p.pos.x >= -MAX_SPEED && p.pos.x <= 640.0 + MAX_SPEED);
            prop_assert!(p.pos.y >= -MAX_SPEED && p.pos.y <= 480.0 + MAX_SPEED);
        }
    }

    // 3. Strict monotonic falloff.
    #[test]
    fn proximity_alpha_monotone(d1 in 0.0f32..120.0, d2 in 0.0f32..120.0) {
        prop_assume!(d2 - d1 > 1e-3);
        prop_assert!(proximity_alpha(d1, LINK_DIST) > proximity_alpha(d2, LINK_DIST));
    }

    // 4. Particle links: existence and alpha.
    #[test]
    fn particle_links_follow_formula(dist in 0.0f32..400.0) {
        let mut field = Field::new(surface(600.0, 600.0), Palette::default(), 0);
        field.set_particles(vec![still(50.0, 300.0), still(50.0 + dist, 300.0)]);
        let frame = field.tick(&PointerState::default());

        if dist < LINK_DIST {
            prop_assert_eq!(frame.links.len(), 1);
            let expected = (1.0 - dist / LINK_DIST) * 0.35;
            prop_assert!((frame.links[0].alpha - expected).abs() < 1e-4);
        } else {
            prop_assert!(frame.links.is_empty());
        }
    }

    // 5. Pointer links: existence, alpha, width.
    #[test]
    fn pointer_links_follow_formula(dist in 0.0f32..300.0) {
        let mut field = Field::new(surface(600.0, 600.0), Palette::default(), 0);
        field.set_particles(vec![still(300.0, 100.0 + dist)]);
        let pointer = PointerState {
            position: Vec2::new(300.0, 100.0),
            active: true,
        };
        let frame = field.tick(&pointer);

        if dist < POINTER_DIST {
            prop_assert_eq!(frame.pointer_links.len(), 1);
            let expected = (1.0 - dist / POINTER_DIST) * 0.85;
            prop_assert!((frame.pointer_links[0].alpha - expected).abs() < 1e-4);
            prop_assert_eq!(frame.pointer_links[0].width, 1.6);
        } else {
            prop_assert!(frame.pointer_links.is_empty());
        }
    }

    // 6. Determinism under a fixed seed.
    #[test]
    fn same_seed_same_layout(seed in any::<u64>()) {
        let a = Field::new(surface(1200.0, 800.0), Palette::default(), seed);
        let b = Field::new(surface(1200.0, 800.0), Palette::default(), seed);
        prop_assert_eq!(a.particles(), b.particles());
    }

    // 7. Resize is a full reset.
    #[test]
    fn resize_discards_everything(seed in any::<u64>()) {
        let mut field = Field::new(surface(1200.0, 800.0), Palette::default(), seed);
        let old: Vec<Vec2> = field.particles().iter().map(|p| p.pos).collect();

        let next = surface(500.0, 900.0);
        field.resize(next);
        prop_assert_eq!(field.particles().len(), next.particle_count());
        for p in field.particles() {
            prop_assert!(p.pos.x >= 0.0 && p.pos.x < 500.0);
            prop_assert!(p.pos.y >= 0.0 && p.pos.y < 900.0);
            prop_assert!(!old.contains(&p.pos));
        }
    }
}

// 8. Reduced motion: run() returns without touching the event loop or GPU.
// This test runs off the main thread, where winit would panic if the guard
// ever let setup proceed.
#[test]
fn reduced_motion_backdrop_is_inert() {
    let backdrop = Backdrop::new().with_reduced_motion(true);
    assert!(backdrop.run().is_ok());
}

#[test]
fn scenario_1200_by_800_spawns_64() {
    let field = Field::new(surface(1200.0, 800.0), Palette::default(), 1);
    assert_eq!(field.particles().len(), 64);
}

#[test]
fn scenario_small_viewport_clamps_to_35() {
    let field = Field::new(surface(100.0, 100.0), Palette::default(), 1);
    assert_eq!(field.particles().len(), 35);
}

#[test]
fn scenario_pointer_at_ten_px() {
    let mut field = Field::new(surface(600.0, 600.0), Palette::default(), 0);
    field.set_particles(vec![still(50.0, 60.0)]);
    let pointer = PointerState {
        position: Vec2::new(50.0, 50.0),
        active: true,
    };
    let frame = field.tick(&pointer);
    assert_eq!(frame.pointer_links.len(), 1);
    assert!((frame.pointer_links[0].alpha - 0.7933).abs() < 1e-3);
}
