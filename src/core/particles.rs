//! Self-replenishing particle population with a pointer vortex and
//! proximity links.
//!
//! Particles live in a fixed arena sized to the population. Expired slots are
//! respawned in place at the start of each frame, so the population never
//! changes size and nothing is allocated per particle after construction.

use crate::core::color::{wrap_hue, Color, ColorStop};
use crate::core::constants::*;
use crate::core::engine::{Engine, FrameInput};
use crate::core::paint::{Painter, Viewport};
use glam::Vec2;
use rand::prelude::*;

/// Fixed-capacity ring of recent positions, oldest first.
#[derive(Clone, Debug)]
pub struct History {
    points: [Vec2; PARTICLE_HISTORY],
    head: usize,
    len: usize,
}

impl Default for History {
    fn default() -> Self {
        Self {
            points: [Vec2::ZERO; PARTICLE_HISTORY],
            head: 0,
            len: 0,
        }
    }
}

impl History {
    pub fn push(&mut self, p: Vec2) {
        if self.len < PARTICLE_HISTORY {
            self.points[(self.head + self.len) % PARTICLE_HISTORY] = p;
            self.len += 1;
        } else {
            self.points[self.head] = p;
            self.head = (self.head + 1) % PARTICLE_HISTORY;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec2> + '_ {
        (0..self.len).map(move |i| self.points[(self.head + i) % PARTICLE_HISTORY])
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    pub opacity: f32,
    pub age: u32,
    pub max_age: u32,
    pub hue: f32,
    pub saturation: f32,
    pub history: History,
}

impl Particle {
    pub fn is_expired(&self) -> bool {
        self.age >= self.max_age
    }
}

/// A connective line between two particles, recomputed every frame.
#[derive(Clone, Copy, Debug)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
    pub opacity: f32,
    pub width: f32,
    pub hue: f32,
}

#[derive(Clone, Debug)]
pub struct ParticleParams {
    pub population: usize,
    pub influence_radius: f32,
    pub repel: f32,
    pub swirl: f32,
    pub link_distance: f32,
    pub link_pointer_radius: f32,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            population: PARTICLE_COUNT,
            influence_radius: PARTICLE_INFLUENCE_RADIUS,
            repel: PARTICLE_REPEL,
            swirl: PARTICLE_SWIRL,
            link_distance: LINK_DISTANCE,
            link_pointer_radius: LINK_POINTER_RADIUS,
        }
    }
}

pub struct ParticleFieldEngine {
    params: ParticleParams,
    particles: Vec<Particle>,
    links: Vec<Link>,
    rng: StdRng,
    viewport: Viewport,
    pointer: Vec2,
    pointer_hue: f32,
}

impl ParticleFieldEngine {
    pub fn new(params: ParticleParams, viewport: Viewport, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = (0..params.population)
            .map(|_| spawn_particle(&mut rng, viewport))
            .collect();
        Self {
            params,
            particles,
            links: Vec::new(),
            rng,
            viewport,
            pointer: Vec2::ZERO,
            pointer_hue: 0.0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn pointer_hue(&self) -> f32 {
        self.pointer_hue
    }

    /// Overwrite expired slots with fresh particles.
    pub fn replenish(&mut self) {
        for slot in &mut self.particles {
            if slot.is_expired() {
                *slot = spawn_particle(&mut self.rng, self.viewport);
            }
        }
    }

    fn connect(&mut self) {
        self.links.clear();
        let reach = self.params.link_distance;
        let pointer_reach = self.params.link_pointer_radius;
        for i in 0..self.particles.len() {
            let pi = self.particles[i].position;
            for j in (i + 1)..self.particles.len() {
                let pj = self.particles[j].position;
                let distance = pi.distance(pj);
                if distance >= reach {
                    continue;
                }
                let base = (1.0 - distance / reach) * LINK_BASE_OPACITY;
                let nearest = self.pointer.distance(pi).min(self.pointer.distance(pj));
                let boost = (1.0 - nearest / pointer_reach).max(0.0);
                self.links.push(Link {
                    a: i,
                    b: j,
                    distance,
                    opacity: (base + boost * LINK_POINTER_BOOST).clamp(0.0, 1.0),
                    width: 1.0 + boost * 3.0,
                    hue: wrap_hue(self.pointer_hue + distance * 0.5),
                });
            }
        }
    }

    fn draw_particle(&self, p: &mut dyn Painter, particle: &Particle) {
        let distance = self.pointer.distance(particle.position);
        let near = distance < self.params.influence_radius;
        let base_hue = if near { self.pointer_hue } else { particle.hue };
        let shift = if near {
            (self.params.influence_radius - distance) / self.params.influence_radius * 120.0
        } else {
            0.0
        };
        let opacity = particle.opacity;

        let len = particle.history.len();
        if len > 1 {
            let width = particle.size * 0.6;
            let points = particle.history.iter().zip(particle.history.iter().skip(1));
            for (i, (a, b)) in points.enumerate() {
                let alpha = (i as f32 / len as f32) * opacity * 0.5;
                p.stroke_line(a, b, width, Color::hsla(base_hue + i as f32 * 10.0, 100.0, 70.0, alpha));
            }
        }

        let h1 = base_hue + shift;
        let h2 = h1 + 60.0;
        let h3 = h1 + 120.0;
        p.fill_radial(
            particle.position,
            particle.size * 4.0,
            &[
                ColorStop::new(0.0, Color::hsla(h1, 100.0, 80.0, opacity)),
                ColorStop::new(0.3, Color::hsla(h2, 100.0, 70.0, opacity * 0.8)),
                ColorStop::new(0.6, Color::hsla(h3, 90.0, 60.0, opacity * 0.5)),
                ColorStop::new(1.0, Color::hsla(h3, 90.0, 60.0, 0.0)),
            ],
        );
        p.fill_circle(particle.position, particle.size * 0.5, Color::rgba(255, 255, 255, opacity));
        p.stroke_circle(
            particle.position,
            particle.size * 2.5,
            2.0,
            Color::hsla(h1, 100.0, 70.0, opacity * 0.6),
        );
        if near {
            p.stroke_circle(
                particle.position,
                particle.size * 3.5,
                1.0,
                Color::hsla(h2, 100.0, 60.0, opacity * 0.4),
            );
        }
    }
}

pub fn spawn_particle(rng: &mut StdRng, viewport: Viewport) -> Particle {
    Particle {
        position: Vec2::new(
            rng.gen::<f32>() * viewport.width,
            rng.gen::<f32>() * viewport.height,
        ),
        velocity: Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * 0.5,
        size: rng.gen::<f32>() * 4.0 + PARTICLE_MIN_SIZE,
        opacity: rng.gen::<f32>() * 0.5 + 0.2,
        age: 0,
        max_age: PARTICLE_MIN_AGE + rng.gen_range(0..PARTICLE_AGE_SPAN),
        hue: rng.gen::<f32>() * PARTICLE_HUE_SPAN + PARTICLE_HUE_MIN,
        saturation: rng.gen::<f32>() * 30.0 + 70.0,
        history: History::default(),
    }
}

/// Advance one particle by a frame.
pub fn step_particle(particle: &mut Particle, pointer: Vec2, viewport: Viewport, params: &ParticleParams) {
    particle.history.push(particle.position);
    particle.position += particle.velocity;
    particle.age = (particle.age + 1).min(particle.max_age);

    let to_pointer = pointer - particle.position;
    let distance = to_pointer.length();
    let radius = params.influence_radius;
    if distance < radius {
        let force = (radius - distance) / radius;
        // no direction exists at exactly zero distance
        if distance > 0.0 {
            let dir = to_pointer / distance;
            particle.position -= dir * force * params.repel;
            particle.position += dir.perp() * force * params.swirl;
        }
        particle.opacity = (particle.opacity + force * 0.6).min(1.0);
        particle.hue = wrap_hue(particle.hue + force * 5.0);
        particle.size = (particle.size + force * 2.0).min(PARTICLE_MAX_SIZE);
    } else {
        particle.size = (particle.size - PARTICLE_SIZE_DECAY).max(PARTICLE_MIN_SIZE);
    }

    particle.opacity = fade_envelope(particle.opacity, particle.age, particle.max_age);
    wrap_point(&mut particle.position, viewport);
}

/// Ramp in over the first fade window, ramp out over the last.
pub fn fade_envelope(opacity: f32, age: u32, max_age: u32) -> f32 {
    let fade = PARTICLE_FADE_FRAMES as f32;
    if age < PARTICLE_FADE_FRAMES {
        opacity.min(age as f32 / fade * PARTICLE_PEAK_OPACITY)
    } else if age > max_age.saturating_sub(PARTICLE_FADE_FRAMES) {
        (max_age.saturating_sub(age) as f32 / fade * PARTICLE_PEAK_OPACITY).max(0.0)
    } else {
        opacity
    }
}

/// Zero-size toroidal wrap: leaving one edge lands exactly on the other.
pub fn wrap_point(p: &mut Vec2, viewport: Viewport) {
    if viewport.contains(*p) {
        return;
    }
    if p.x < 0.0 {
        p.x = viewport.width;
    } else if p.x > viewport.width {
        p.x = 0.0;
    }
    if p.y < 0.0 {
        p.y = viewport.height;
    } else if p.y > viewport.height {
        p.y = 0.0;
    }
}

impl Engine for ParticleFieldEngine {
    type Surface = dyn Painter;
    const NAME: &'static str = "particles";

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn update(&mut self, frame: &FrameInput) {
        self.viewport = frame.viewport;
        self.pointer = frame.target;
        self.pointer_hue = wrap_hue(self.pointer_hue + frame.travel * PARTICLE_POINTER_HUE_RATE);

        self.replenish();
        for particle in &mut self.particles {
            step_particle(particle, self.pointer, self.viewport, &self.params);
        }
        self.connect();
    }

    fn draw(&mut self, p: &mut Self::Surface) {
        p.set_blur(0.0);
        p.clear();
        for particle in &self.particles {
            self.draw_particle(p, particle);
        }
        for link in &self.links {
            let a = self.particles[link.a].position;
            let b = self.particles[link.b].position;
            p.stroke_gradient_line(
                a,
                b,
                link.width,
                &[
                    ColorStop::new(0.0, Color::hsla(link.hue, 100.0, 70.0, link.opacity)),
                    ColorStop::new(0.5, Color::hsla(link.hue + 60.0, 100.0, 65.0, link.opacity * 0.8)),
                    ColorStop::new(1.0, Color::hsla(link.hue + 120.0, 100.0, 60.0, link.opacity * 0.6)),
                ],
            );
        }
    }
}
