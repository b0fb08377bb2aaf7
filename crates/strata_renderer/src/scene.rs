//! Scene and render configuration.
//!
//! Everything here is plain typed data, fully built before a render starts
//! and never mutated while bands are in flight.

use crate::{Color, Material, RenderError, RenderResult, Sphere, World};
use strata_math::Vec3;

/// Camera placement and projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub view_up: Vec3,
    /// Vertical field of view in degrees
    pub vertical_fov: f32,
    /// Image width / height
    pub aspect_ratio: f32,
}

impl CameraSettings {
    pub fn new(
        look_from: Vec3,
        look_at: Vec3,
        view_up: Vec3,
        vertical_fov: f32,
        aspect_ratio: f32,
    ) -> Self {
        Self {
            look_from,
            look_at,
            view_up,
            vertical_fov,
            aspect_ratio,
        }
    }
}

/// Image and sampling settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Jittered camera rays averaged per pixel
    pub samples_per_pixel: u32,
    /// Worker threads, and the target number of row bands
    pub thread_count: usize,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Base seed; each band derives its own generator from it
    pub seed: u64,
}

impl RenderSettings {
    /// Create settings with the default 400x200 @ 100 spp, 12 threads.
    pub fn new() -> Self {
        Self {
            width: 400,
            height: 200,
            samples_per_pixel: 100,
            thread_count: 12,
            max_depth: crate::MAX_DEPTH,
            seed: 0x5EED,
        }
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set samples per pixel.
    pub fn with_samples(mut self, samples_per_pixel: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self
    }

    /// Set the worker thread count.
    pub fn with_threads(mut self, thread_count: usize) -> Self {
        self.thread_count = thread_count;
        self
    }

    /// Set the recursion cutoff.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the base random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Image width / height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Total number of pixels in the image.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reject settings that cannot produce an image.
    pub fn validate(&self) -> RenderResult<()> {
        let positive = [
            ("width", self.width as usize),
            ("height", self.height as usize),
            ("samples_per_pixel", self.samples_per_pixel as usize),
            ("thread_count", self.thread_count),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(RenderError::InvalidSettings(format!(
                    "{name} must be greater than zero"
                )));
            }
        }
        if u32::try_from(self.thread_count).is_err() {
            return Err(RenderError::InvalidSettings(format!(
                "thread_count {} is too large",
                self.thread_count
            )));
        }
        Ok(())
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// A frozen world plus the camera that looks at it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub world: World,
    pub camera: CameraSettings,
}

impl Scene {
    pub fn new(world: World, camera: CameraSettings) -> Self {
        Self { world, camera }
    }

    /// The reference scene: three small spheres on a large ground sphere.
    ///
    /// Left is a glass ball with a hollow core, center is diffuse blue,
    /// right is fuzzy gold metal, viewed from above-left with a 20 degree
    /// vertical field of view.
    pub fn reference(aspect_ratio: f32) -> Self {
        let world = World::new()
            .with(Sphere::new(
                Vec3::new(0.0, 0.0, -1.0),
                0.5,
                Material::lambertian(Color::new(0.1, 0.2, 0.5)),
            ))
            .with(Sphere::new(
                Vec3::new(0.0, -100.5, -1.0),
                100.0,
                Material::lambertian(Color::new(0.8, 0.8, 0.0)),
            ))
            .with(Sphere::new(
                Vec3::new(1.0, 0.0, -1.0),
                0.5,
                Material::metal(Color::new(0.8, 0.6, 0.2), 0.1),
            ))
            .with(Sphere::new(
                Vec3::new(-1.0, 0.0, -1.0),
                0.5,
                Material::dielectric(1.5),
            ))
            .with(Sphere::new(
                Vec3::new(-1.0, 0.0, -1.0),
                -0.49,
                Material::dielectric(1.5),
            ));

        let camera = CameraSettings::new(
            Vec3::new(-1.0, 2.0, 1.0),
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::Y,
            20.0,
            aspect_ratio,
        );

        Self::new(world, camera)
    }
}
