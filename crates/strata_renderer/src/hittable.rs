//! Hittable trait, HitRecord and the World aggregate.

use crate::{Material, Ray, Sphere};
use strata_math::{Interval, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Outward surface normal at the intersection.
    ///
    /// Not flipped to face the ray: a sphere with negative radius has
    /// normals pointing towards its center.
    pub normal: Vec3,
    /// Material of the surface that was hit
    pub material: &'a Material,
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the nearest intersection with `t` strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// Every kind of shape a `World` can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Sphere(Sphere),
}

impl Hittable for Primitive {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Primitive::Sphere(sphere) => sphere.hit(ray, ray_t),
        }
    }
}

impl From<Sphere> for Primitive {
    fn from(sphere: Sphere) -> Self {
        Primitive::Sphere(sphere)
    }
}

/// An ordered collection of primitives, tested exhaustively per query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct World {
    objects: Vec<Primitive>,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the world.
    pub fn add(&mut self, object: impl Into<Primitive>) {
        self.objects.push(object.into());
    }

    /// Builder-style `add`.
    pub fn with(mut self, object: impl Into<Primitive>) -> Self {
        self.add(object);
        self
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the world is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over the objects in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = &Primitive> {
        self.objects.iter()
    }
}

impl<P: Into<Primitive>> FromIterator<P> for World {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Hittable for World {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            // Each accepted hit shrinks the window, so later objects can
            // only win by being strictly closer.
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}
