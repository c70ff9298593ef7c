// Host-side tests for the particle field: population, ageing, forces, wrap and links.

mod common;

use backdrop_fx::core::constants::*;
use backdrop_fx::core::particles::{
    fade_envelope, spawn_particle, step_particle, wrap_point, History,
};
use backdrop_fx::core::{Engine, FrameInput, ParticleFieldEngine, ParticleParams, Viewport};
use common::{RecordingPainter, FRAME_MS};
use glam::Vec2;
use rand::prelude::*;

fn frame(n: u64, target: Vec2, viewport: Viewport) -> FrameInput {
    FrameInput {
        now_ms: n as f64 * FRAME_MS,
        frame: n,
        elapsed_sec: (n as f64 * FRAME_MS / 1000.0) as f32,
        pointer: Default::default(),
        target,
        pointer_seen: true,
        travel: 0.0,
        local_pointer: Vec2::ZERO,
        viewport,
    }
}

fn particle_at(position: Vec2) -> backdrop_fx::core::particles::Particle {
    let mut rng = StdRng::seed_from_u64(1);
    let mut p = spawn_particle(&mut rng, Viewport::default());
    p.position = position;
    p.velocity = Vec2::ZERO;
    p.age = 100;
    p.max_age = 500;
    p
}

#[test]
fn history_keeps_newest_twenty_oldest_first() {
    let mut h = History::default();
    assert!(h.is_empty());
    for i in 0..25 {
        h.push(Vec2::new(i as f32, 0.0));
    }
    assert_eq!(h.len(), PARTICLE_HISTORY);
    let xs: Vec<f32> = h.iter().map(|p| p.x).collect();
    assert_eq!(xs.first(), Some(&5.0));
    assert_eq!(xs.last(), Some(&24.0));
}

#[test]
fn spawned_particles_sit_in_band() {
    let mut rng = StdRng::seed_from_u64(7);
    let vp = Viewport::new(1024.0, 768.0);
    for _ in 0..500 {
        let p = spawn_particle(&mut rng, vp);
        assert!(vp.contains(p.position));
        assert!((PARTICLE_HUE_MIN..PARTICLE_HUE_MIN + PARTICLE_HUE_SPAN).contains(&p.hue));
        assert!(p.max_age >= PARTICLE_MIN_AGE && p.max_age < PARTICLE_MIN_AGE + PARTICLE_AGE_SPAN);
        assert!(p.size >= PARTICLE_MIN_SIZE);
        assert_eq!(p.age, 0);
    }
}

#[test]
fn population_and_age_hold_every_frame() {
    let vp = Viewport::new(800.0, 600.0);
    let mut engine = ParticleFieldEngine::new(ParticleParams::default(), vp, 42);
    // Long enough for every particle to expire at least once.
    for n in 0..1200 {
        engine.update(&frame(n, Vec2::new(400.0, 300.0), vp));
        assert_eq!(engine.particles().len(), PARTICLE_COUNT);
        for p in engine.particles() {
            assert!(p.age <= p.max_age);
            assert!(p.history.len() <= PARTICLE_HISTORY);
            assert!(p.position.is_finite());
        }
    }
}

#[test]
fn expired_particle_is_replaced_on_next_update() {
    let vp = Viewport::default();
    let mut engine = ParticleFieldEngine::new(ParticleParams::default(), vp, 3);
    {
        let p = &mut engine.particles_mut()[0];
        p.age = p.max_age;
        p.history.push(Vec2::ONE);
    }
    engine.update(&frame(0, Vec2::new(-5000.0, -5000.0), vp));
    let p = &engine.particles()[0];
    assert_eq!(p.age, 1);
    assert_eq!(p.history.len(), 1);
}

#[test]
fn pointer_force_orbits_and_repels() {
    let params = ParticleParams::default();
    let vp = Viewport::new(2000.0, 2000.0);
    let pointer = Vec2::new(1000.0, 1000.0);
    let mut p = particle_at(Vec2::new(1100.0, 1000.0));
    let before = p.position;
    step_particle(&mut p, pointer, vp, &params);

    let force = (400.0 - 100.0) / 400.0;
    // pushed directly away along +x
    assert!((p.position.x - (before.x + force * PARTICLE_REPEL)).abs() < 1e-3);
    // and sideways along the perpendicular
    assert!((p.position.y - before.y).abs() > 1.0);
    assert!(p.size > PARTICLE_MIN_SIZE);
}

#[test]
fn particle_on_pointer_stays_finite() {
    let params = ParticleParams::default();
    let vp = Viewport::default();
    let pointer = Vec2::new(200.0, 200.0);
    let mut p = particle_at(pointer);
    step_particle(&mut p, pointer, vp, &params);
    assert_eq!(p.position, pointer);
    assert!(p.opacity.is_finite() && p.hue.is_finite() && p.size.is_finite());
}

#[test]
fn size_decays_to_floor_away_from_pointer() {
    let params = ParticleParams::default();
    let vp = Viewport::default();
    let mut p = particle_at(Vec2::new(10.0, 10.0));
    p.size = 3.0;
    p.max_age = 10_000;
    for _ in 0..100 {
        step_particle(&mut p, Vec2::new(5000.0, 5000.0), vp, &params);
    }
    assert_eq!(p.size, PARTICLE_MIN_SIZE);
}

#[test]
fn fade_envelope_ramps_both_ends() {
    assert_eq!(fade_envelope(0.9, 0, 400), 0.0);
    assert!((fade_envelope(0.9, 30, 400) - 0.4).abs() < 1e-6);
    assert_eq!(fade_envelope(0.5, 200, 400), 0.5);
    assert!((fade_envelope(0.5, 370, 400) - 0.4).abs() < 1e-6);
    assert_eq!(fade_envelope(0.5, 400, 400), 0.0);
}

#[test]
fn wrap_is_zero_size_and_keeps_velocity() {
    let vp = Viewport::new(800.0, 600.0);
    let mut q = Vec2::new(800.5, 300.0);
    wrap_point(&mut q, vp);
    assert_eq!(q, Vec2::new(0.0, 300.0));
    let mut q = Vec2::new(-0.1, -0.1);
    wrap_point(&mut q, vp);
    assert_eq!(q, Vec2::new(800.0, 600.0));
    // Edges are still inside.
    for edge in [Vec2::ZERO, Vec2::new(800.0, 600.0), Vec2::new(400.0, 0.0)] {
        let mut q = edge;
        wrap_point(&mut q, vp);
        assert_eq!(q, edge);
    }

    let params = ParticleParams::default();
    let mut p = particle_at(Vec2::new(799.0, 300.0));
    p.velocity = Vec2::new(2.0, 0.0);
    step_particle(&mut p, Vec2::new(-5000.0, -5000.0), vp, &params);
    assert_eq!(p.position.x, 0.0);
    assert_eq!(p.velocity, Vec2::new(2.0, 0.0));
}

#[test]
fn links_respect_distance_and_opacity_range() {
    let vp = Viewport::new(800.0, 600.0);
    let mut engine = ParticleFieldEngine::new(ParticleParams::default(), vp, 11);
    for n in 0..120 {
        engine.update(&frame(n, vp.center(), vp));
        for link in engine.links() {
            assert!(link.a < link.b);
            assert!(link.distance < LINK_DISTANCE);
            assert!((0.0..=1.0).contains(&link.opacity));
            assert!(link.width >= 1.0 && link.width <= 4.0);
        }
    }
}

#[test]
fn close_pair_always_links() {
    let vp = Viewport::new(800.0, 600.0);
    let params = ParticleParams {
        population: 2,
        ..ParticleParams::default()
    };
    let mut engine = ParticleFieldEngine::new(params, vp, 5);
    for (i, p) in engine.particles_mut().iter_mut().enumerate() {
        p.position = Vec2::new(100.0 + i as f32 * 10.0, 100.0);
        p.velocity = Vec2::ZERO;
        p.age = 100;
        p.max_age = 700;
    }
    engine.update(&frame(0, Vec2::new(-5000.0, -5000.0), vp));
    assert_eq!(engine.links().len(), 1);
    let link = engine.links()[0];
    assert!((link.distance - 10.0).abs() < 1e-3);
    assert!((link.opacity - (1.0 - 10.0 / LINK_DISTANCE) * LINK_BASE_OPACITY).abs() < 1e-4);
}

#[test]
fn pointer_travel_shifts_hue() {
    let vp = Viewport::default();
    let mut engine = ParticleFieldEngine::new(ParticleParams::default(), vp, 9);
    let mut f = frame(0, vp.center(), vp);
    f.travel = 100.0;
    engine.update(&f);
    assert!((engine.pointer_hue() - 100.0 * PARTICLE_POINTER_HUE_RATE).abs() < 1e-4);
}

#[test]
fn draw_clears_then_paints_finite_output() {
    let vp = Viewport::default();
    let mut engine = ParticleFieldEngine::new(ParticleParams::default(), vp, 21);
    let mut painter = RecordingPainter::default();
    for n in 0..30 {
        engine.update(&frame(n, vp.center(), vp));
        engine.draw(&mut painter);
    }
    assert_eq!(painter.clears, 30);
    assert!(painter.fills >= 30 * PARTICLE_COUNT);
}
