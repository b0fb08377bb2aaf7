//! Surface scattering models.

use crate::{gen_f32, hittable::HitRecord, Ray};
use rand::RngCore;
use strata_math::{unit_vector, Vec3};

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Outcome of a scattering event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scatter {
    /// Per-channel fraction of the scattered light that survives
    pub attenuation: Color,
    /// Continuation ray leaving the surface
    pub scattered: Ray,
}

/// How light interacts with a surface.
///
/// The set of physical models is fixed, so this is a plain enum matched in
/// `scatter` rather than a trait object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Ideal diffuse reflector.
    Lambertian { albedo: Color },
    /// Specular reflector; `fuzz` in [0, 1] roughens the reflection.
    Metal { albedo: Color, fuzz: f32 },
    /// Clear refractive medium such as glass (1.5) or water (1.33).
    Dielectric { refractive_index: f32 },
}

impl Material {
    /// Create a Lambertian material with the given albedo color.
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Create a Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Create a Dielectric material with the given index of refraction.
    pub fn dielectric(refractive_index: f32) -> Self {
        Material::Dielectric { refractive_index }
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord<'_>,
        rng: &mut dyn RngCore,
    ) -> Option<Scatter> {
        match *self {
            Material::Lambertian { albedo } => {
                let mut scatter_direction = rec.normal + random_in_unit_sphere(rng);

                // Catch degenerate scatter direction
                if scatter_direction.length_squared() < 1e-8 {
                    scatter_direction = rec.normal;
                }

                Some(Scatter {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, scatter_direction),
                })
            }
            Material::Metal { albedo, fuzz } => {
                let reflected = reflect(unit_vector(ray_in.direction()), rec.normal);
                let direction = reflected + fuzz * random_in_unit_sphere(rng);

                // Absorb anything scattered below the surface
                (direction.dot(rec.normal) > 0.0).then(|| Scatter {
                    attenuation: albedo,
                    scattered: Ray::new(rec.p, direction),
                })
            }
            Material::Dielectric { refractive_index } => {
                let direction = ray_in.direction();
                let unit_direction = unit_vector(direction);
                let d_dot_n = unit_direction.dot(rec.normal);

                // Normals face out of the medium, so a positive dot means
                // the ray is leaving it.
                let (outward_normal, ni_over_nt, cosine) = if d_dot_n > 0.0 {
                    (-rec.normal, refractive_index, refractive_index * d_dot_n)
                } else {
                    (rec.normal, 1.0 / refractive_index, -d_dot_n)
                };

                let scattered_direction = match refract(direction, outward_normal, ni_over_nt) {
                    Some(refracted)
                        if gen_f32(rng) >= schlick(cosine.min(1.0), refractive_index) =>
                    {
                        refracted
                    }
                    // Total internal reflection, or the Fresnel coin chose reflection
                    _ => reflect(direction, rec.normal),
                };

                Some(Scatter {
                    attenuation: Color::ONE,
                    scattered: Ray::new(rec.p, scattered_direction),
                })
            }
        }
    }
}

/// Reflect a vector about a normal.
#[inline]
pub(crate) fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract `v` through a surface with normal `n` facing the incoming side.
///
/// Returns `None` on total internal reflection.
#[inline]
pub(crate) fn refract(v: Vec3, n: Vec3, ni_over_nt: f32) -> Option<Vec3> {
    let uv = unit_vector(v);
    let dt = uv.dot(n);
    let discriminant = 1.0 - ni_over_nt * ni_over_nt * (1.0 - dt * dt);
    (discriminant > 0.0).then(|| ni_over_nt * (uv - n * dt) - n * discriminant.sqrt())
}

/// Schlick's approximation for reflectance
#[inline]
pub(crate) fn schlick(cosine: f32, refractive_index: f32) -> f32 {
    let r0 = ((1.0 - refractive_index) / (1.0 + refractive_index)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Uniformly sample a point inside the unit sphere.
pub(crate) fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    // Rejection sampling from the enclosing cube
    loop {
        let p = Vec3::new(
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
