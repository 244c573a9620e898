//! Visual configuration for the backdrop.
//!
//! Colors are plain RGBA with float components in `0.0..=1.0`, matching what
//! the shaders consume directly. The default palette is a cold blue on a
//! near-black surface; hosts can swap it via
//! [`Backdrop::with_palette`](crate::Backdrop::with_palette).

use serde::{Deserialize, Serialize};

/// An RGBA color with float components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Create a color from float components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit components.
    pub const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// The same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Components as a `[r, g, b, a]` array for vertex data.
    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Styling for one class of proximity links.
///
/// `max_alpha` is the opacity at distance zero; opacity falls off linearly to
/// zero at the link threshold. `width` is the line width in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkStyle {
    pub max_alpha: f32,
    pub width: f32,
}

/// Color palette for the backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Fill color for particle dots (alpha included).
    pub dot: Rgba,
    /// Base hue for link lines; per-link alpha comes from proximity.
    pub link: Rgba,
    /// Surface clear color.
    pub clear: Rgba,
    /// Styling for particle-to-particle links.
    pub particle_links: LinkStyle,
    /// Styling for particle-to-pointer links.
    pub pointer_links: LinkStyle,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            dot: Rgba::from_u8(77, 183, 255).with_alpha(0.85),
            link: Rgba::from_u8(77, 183, 255),
            clear: Rgba::new(0.02, 0.02, 0.05, 1.0),
            particle_links: LinkStyle {
                max_alpha: 0.35,
                width: 1.0,
            },
            pointer_links: LinkStyle {
                max_alpha: 0.85,
                width: 1.6,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha_keeps_hue() {
        let c = Rgba::from_u8(77, 183, 255).with_alpha(0.35);
        assert_eq!(c.r, 77.0 / 255.0);
        assert_eq!(c.a, 0.35);
    }

    #[test]
    fn test_default_palette_link_styles() {
        let p = Palette::default();
        assert!(p.pointer_links.max_alpha > p.particle_links.max_alpha);
        assert!(p.pointer_links.width > p.particle_links.width);
    }
}
