//! The particle field: state, integration, and per-frame geometry.
//!
//! [`Field`] owns everything the backdrop animates (the particle set, the
//! logical surface dimensions, and the spawn RNG) as instance fields, so
//! several fields (or a field under test) can coexist. The three operations
//! mirror the backdrop lifecycle: [`Field::resize`] adopts new surface
//! dimensions, [`Field::rebuild`] re-creates the particle set from scratch,
//! and [`Field::tick`] advances one frame and returns the geometry to draw.
//!
//! `tick` does not touch the GPU. It produces a [`FrameGeometry`] with dot
//! and link lists in logical pixel coordinates that the `gpu` module uploads
//! verbatim. That split keeps every visual rule in this file testable without
//! a window.

use glam::Vec2;

use crate::input::PointerState;
use crate::spawn::SpawnContext;
use crate::visuals::Palette;

/// Logical surface area (in px²) per particle before clamping.
pub const AREA_PER_PARTICLE: f32 = 15_000.0;
/// Lower clamp for the particle count.
pub const MIN_PARTICLES: usize = 35;
/// Upper clamp for the particle count.
pub const MAX_PARTICLES: usize = 120;
/// Maximum distance (logical px) at which two particles are linked.
pub const LINK_DIST: f32 = 120.0;
/// Maximum distance (logical px) at which a particle links to the pointer.
pub const POINTER_DIST: f32 = 150.0;
/// Largest velocity component magnitude, logical px per frame.
pub const MAX_SPEED: f32 = 0.175;
/// Particle radius range, logical px.
pub const RADIUS_RANGE: (f32, f32) = (0.6, 2.0);
/// Device pixel ratio cap; anything denser buys nothing visually.
pub const MAX_DPR: f32 = 2.0;

/// Logical drawing surface dimensions plus the (capped) device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    /// Logical width in CSS-pixel-equivalent units.
    pub width: f32,
    /// Logical height.
    pub height: f32,
    /// Device pixel ratio, capped at [`MAX_DPR`].
    pub dpr: f32,
}

impl Surface {
    /// Create a surface from logical dimensions and a raw scale factor.
    pub fn new(width: f32, height: f32, scale_factor: f64) -> Self {
        Self {
            width,
            height,
            dpr: (scale_factor as f32).min(MAX_DPR),
        }
    }

    /// Create a surface from a window's physical size and scale factor.
    pub fn from_physical(physical_width: u32, physical_height: u32, scale_factor: f64) -> Self {
        Self::new(
            (physical_width as f64 / scale_factor) as f32,
            (physical_height as f64 / scale_factor) as f32,
            scale_factor,
        )
    }

    /// Backing-store size in physical pixels: `logical * dpr`.
    pub fn physical(&self) -> (u32, u32) {
        (
            (self.width * self.dpr).round().max(1.0) as u32,
            (self.height * self.dpr).round().max(1.0) as u32,
        )
    }

    /// Particle count for this surface: `clamp(round(w*h / 15000), 35, 120)`.
    pub fn particle_count(&self) -> usize {
        let raw = (self.width * self.height / AREA_PER_PARTICLE).round();
        raw.clamp(MIN_PARTICLES as f32, MAX_PARTICLES as f32) as usize
    }
}

/// A single particle: position, velocity, and dot radius, all in logical px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// A filled dot to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub center: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

/// A proximity link to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub a: Vec2,
    pub b: Vec2,
    /// Final opacity: `(1 - dist/threshold) * style.max_alpha`.
    pub alpha: f32,
    /// Line width in logical px.
    pub width: f32,
}

/// Everything [`Field::tick`] asks the surface to draw for one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameGeometry {
    pub dots: Vec<Dot>,
    /// Particle-to-particle links, emitted in `i < j` pair order.
    pub links: Vec<Link>,
    /// Particle-to-pointer links, emitted in particle order.
    pub pointer_links: Vec<Link>,
}

/// Linear proximity falloff: 1 at distance zero, 0 at `max_dist` and beyond.
#[inline]
pub fn proximity_alpha(dist: f32, max_dist: f32) -> f32 {
    (1.0 - dist / max_dist).max(0.0)
}

/// The animated particle field.
pub struct Field {
    surface: Surface,
    particles: Vec<Particle>,
    palette: Palette,
    spawn: SpawnContext,
}

impl Field {
    /// Build a field sized to `surface`, spawning from the given seed.
    pub fn new(surface: Surface, palette: Palette, seed: u64) -> Self {
        let mut field = Self {
            surface,
            particles: Vec::new(),
            palette,
            spawn: SpawnContext::new(seed),
        };
        field.rebuild();
        field
    }

    /// Adopt new surface dimensions, discarding every particle.
    ///
    /// Resizing is a full reset: no particle retains its prior position.
    pub fn resize(&mut self, surface: Surface) {
        self.surface = surface;
        self.rebuild();
    }

    /// Discard all particles and spawn a fresh set sized to the surface.
    pub fn rebuild(&mut self) {
        let count = self.surface.particle_count();
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            let pos = self
                .spawn
                .random_in_rect(self.surface.width, self.surface.height);
            let vel = self.spawn.random_velocity(MAX_SPEED);
            let radius = self.spawn.random_radius(RADIUS_RANGE.0, RADIUS_RANGE.1);
            self.particles.push(Particle { pos, vel, radius });
        }
        tracing::debug!(
            count,
            width = self.surface.width,
            height = self.surface.height,
            "rebuilt particle field"
        );
    }

    /// Advance one frame and collect the geometry to draw.
    ///
    /// Integration reflects at the surface edges by flipping the velocity
    /// component without clamping the position, so a particle can sit at most
    /// one frame's velocity outside the surface before it turns around.
    pub fn tick(&mut self, pointer: &PointerState) -> FrameGeometry {
        let (w, h) = (self.surface.width, self.surface.height);
        let mut frame = FrameGeometry {
            dots: Vec::with_capacity(self.particles.len()),
            ..Default::default()
        };

        for p in &mut self.particles {
            p.pos += p.vel;
            if p.pos.x < 0.0 || p.pos.x > w {
                p.vel.x = -p.vel.x;
            }
            if p.pos.y < 0.0 || p.pos.y > h {
                p.vel.y = -p.vel.y;
            }
            frame.dots.push(Dot {
                center: p.pos,
                radius: p.radius,
                alpha: self.palette.dot.a,
            });
        }

        // Unordered pairs, i < j. Order has no visual effect; tests rely on it.
        let style = self.palette.particle_links;
        for i in 0..self.particles.len() {
            for j in (i + 1)..self.particles.len() {
                let (a, b) = (self.particles[i].pos, self.particles[j].pos);
                let dist = a.distance(b);
                if dist < LINK_DIST {
                    frame.links.push(Link {
                        a,
                        b,
                        alpha: proximity_alpha(dist, LINK_DIST) * style.max_alpha,
                        width: style.width,
                    });
                }
            }
        }

        if pointer.active {
            let style = self.palette.pointer_links;
            for p in &self.particles {
                let dist = p.pos.distance(pointer.position);
                if dist < POINTER_DIST {
                    frame.pointer_links.push(Link {
                        a: p.pos,
                        b: pointer.position,
                        alpha: proximity_alpha(dist, POINTER_DIST) * style.max_alpha,
                        width: style.width,
                    });
                }
            }
        }

        frame
    }

    /// The current particle set.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Replace the particle set. Intended for tests and custom spawners; the
    /// next resize discards the replacement like any other set.
    pub fn set_particles(&mut self, particles: Vec<Particle>) {
        self.particles = particles;
    }

    /// The surface the field is currently sized to.
    #[inline]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The palette links and dots are tinted with.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}
