//! Core path tracing integrator.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a fixed depth cutoff
//! - Sky gradient background
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction and 8-bit quantization

use crate::{gen_f32, Camera, Color, Hittable, Ray, RenderSettings};
use rand::RngCore;
use strata_math::{unit_vector, Interval};

/// Default maximum ray bounce depth.
pub const MAX_DEPTH: u32 = 50;

/// Lower hit bound; keeps a scattered ray from re-hitting its own origin.
pub const T_MIN: f32 = 0.001;

/// Quantization scale for the red channel.
///
/// Lower than green and blue, which caps red at 245. Kept to stay
/// bit-compatible with existing reference renders.
const RED_SCALE: f32 = 245.99;
/// Quantization scale for the green and blue channels.
const GREEN_BLUE_SCALE: f32 = 255.99;

/// A quantized 8-bit pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }
}

/// Compute the color seen by a ray.
///
/// `depth` counts bounces so far, starting at 0. Once it reaches
/// `max_depth` any further hit contributes black.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    max_depth: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let Some(rec) = world.hit(ray, Interval::from_min(T_MIN)) else {
        return sky_gradient(ray);
    };

    if depth >= max_depth {
        return Color::ZERO;
    }

    match rec.material.scatter(ray, &rec, rng) {
        Some(scatter) => {
            scatter.attenuation * ray_color(&scatter.scattered, world, depth + 1, max_depth, rng)
        }
        None => Color::ZERO,
    }
}

/// Vertical white-to-blue background.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = unit_vector(ray.direction());
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Gamma-correct a linear color and convert it to 8 bits per channel.
pub fn quantize(color: Color) -> Rgb {
    let channel =
        |linear: f32, scale: f32| (scale * Interval::UNIT.clamp(linear_to_gamma(linear))) as u8;
    Rgb([
        channel(color.x, RED_SCALE),
        channel(color.y, GREEN_BLUE_SCALE),
        channel(color.z, GREEN_BLUE_SCALE),
    ])
}

/// Average `samples_per_pixel` jittered rays through pixel (i, j).
///
/// `j` counts rows from the bottom of the image. Returns linear color.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    settings: &RenderSettings,
    rng: &mut dyn RngCore,
) -> Color {
    let width = settings.width as f32;
    let height = settings.height as f32;
    let mut pixel_color = Color::ZERO;

    for _ in 0..settings.samples_per_pixel {
        let u = (i as f32 + gen_f32(rng)) / width;
        let v = (j as f32 + gen_f32(rng)) / height;
        let ray = camera.get_ray(u, v);
        pixel_color += ray_color(&ray, world, 0, settings.max_depth, rng);
    }

    // Average the samples
    pixel_color / settings.samples_per_pixel as f32
}
