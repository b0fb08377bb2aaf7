//! Strata Renderer - banded CPU path tracing of sphere scenes.
//!
//! A Monte Carlo path tracer: every pixel averages many jittered camera
//! rays, each traced recursively through a linear-scan `World` with
//! diffuse, metal and glass scattering. The image is split into horizontal
//! row bands that render in parallel and are stitched back together in
//! top-to-bottom order.
//!
//! # Example
//!
//! ```ignore
//! use strata_renderer::{render, save_ppm, RenderSettings, Scene};
//!
//! let settings = RenderSettings::new().with_resolution(400, 200);
//! let scene = Scene::reference(settings.aspect_ratio());
//! let pixels = render(&scene, &settings)?;
//! save_ppm("picture.ppm", settings.width, settings.height, &pixels)?;
//! ```

mod band;
mod camera;
mod error;
mod hittable;
mod material;
mod ppm;
mod renderer;
mod scene;
mod sphere;

pub use band::{band_seed, partition_rows, render, render_band, RowBand};
pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, Primitive, World};
pub use material::{Color, Material, Scatter};
pub use ppm::{save_ppm, write_ppm};
pub use renderer::{
    linear_to_gamma, quantize, ray_color, render_pixel, sky_gradient, Rgb, MAX_DEPTH, T_MIN,
};
pub use scene::{CameraSettings, RenderSettings, Scene};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from strata_math
pub use strata_math::{Interval, Ray, Vec3};

use rand::{Rng, RngCore};

/// Draw a uniform `f32` in `[0, 1)`.
#[inline]
pub(crate) fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}
