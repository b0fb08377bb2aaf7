//! Camera for ray generation.

use crate::{CameraSettings, Ray, RenderError, RenderResult};
use strata_math::{try_unit_vector, Vec3};

/// Pinhole camera mapping normalized image coordinates to rays.
///
/// `s` runs left to right and `t` bottom to top, both over [0, 1]. Every
/// ray starts at the eye point; there is no lens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
}

impl Camera {
    /// Build a camera.
    ///
    /// - `vfov`: vertical field of view in degrees, in (0, 180)
    /// - `aspect_ratio`: image width / height
    ///
    /// Fails if the view direction or the right vector cannot be
    /// normalized (`look_from == look_at`, or `view_up` parallel to the view
    /// direction).
    pub fn new(
        look_from: Vec3,
        look_at: Vec3,
        view_up: Vec3,
        vfov: f32,
        aspect_ratio: f32,
    ) -> RenderResult<Self> {
        if !(vfov > 0.0 && vfov < 180.0) {
            return Err(RenderError::InvalidSettings(format!(
                "vertical field of view must be in (0, 180) degrees, got {vfov}"
            )));
        }
        if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
            return Err(RenderError::InvalidSettings(format!(
                "aspect ratio must be positive, got {aspect_ratio}"
            )));
        }

        let half_height = (vfov.to_radians() / 2.0).tan();
        let half_width = aspect_ratio * half_height;

        // Calculate camera basis vectors
        let w = try_unit_vector(look_from - look_at)?;
        let u = try_unit_vector(view_up.cross(w))?;
        let v = w.cross(u);

        let origin = look_from;
        Ok(Self {
            origin,
            lower_left_corner: origin - half_width * u - half_height * v - w,
            horizontal: 2.0 * half_width * u,
            vertical: 2.0 * half_height * v,
            u,
            v,
            w,
        })
    }

    /// Build a camera from its settings block.
    pub fn from_settings(settings: &CameraSettings) -> RenderResult<Self> {
        Self::new(
            settings.look_from,
            settings.look_at,
            settings.view_up,
            settings.vertical_fov,
            settings.aspect_ratio,
        )
    }

    /// Ray from the eye through image-plane point (s, t).
    #[inline]
    pub fn get_ray(&self, s: f32, t: f32) -> Ray {
        Ray::new(
            self.origin,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - self.origin,
        )
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Orthonormal basis (right, up, backward).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }
}
