//! Ray and bounding-sphere primitives
//!
//! Scene objects are approximated by spheres. The ray cast reports the
//! distance to the sphere *centre*, not to its surface, which is all the
//! nearest-target selection needs.

use crate::foundation::math::Vec3;

/// Minimum radius or centre distance treated as non-degenerate
pub const GEOMETRY_EPSILON: f32 = 1e-6;

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Centre-distance ray cast
    ///
    /// Walks the ray as far as the centre is from its origin and measures how
    /// far that point lands from the centre. A miss distance within the
    /// radius counts as a hit and the centre distance is returned.
    ///
    /// Zero radius or a centre sitting on the ray origin never hits.
    pub fn cast(&self, ray: &Ray) -> Option<f32> {
        if self.radius <= GEOMETRY_EPSILON {
            return None;
        }

        let distance = (self.center - ray.origin).norm();
        if distance <= GEOMETRY_EPSILON {
            return None;
        }

        let miss = (self.center - ray.point_at(distance)).norm();
        (miss <= self.radius).then_some(distance)
    }

    /// Whether `point` lies within the radius grown by `margin`
    pub fn contains_with_margin(&self, point: Vec3, margin: f32) -> bool {
        (self.center - point).norm() <= self.radius + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_cast_hits_sphere_ahead() {
        let sphere = BoundingSphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray::new(Vec3::zeros(), Vec3::z());
        let distance = sphere.cast(&ray).unwrap();
        assert_relative_eq!(distance, 5.0, epsilon = EPSILON);
    }

    #[test]
    fn test_cast_misses_perpendicular_ray() {
        let sphere = BoundingSphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray::new(Vec3::zeros(), Vec3::x());
        assert!(sphere.cast(&ray).is_none());
    }

    #[test]
    fn test_cast_reports_centre_distance_for_grazing_hit() {
        let sphere = BoundingSphere::new(Vec3::new(0.5, 0.0, 4.0), 1.0);
        let ray = Ray::new(Vec3::zeros(), Vec3::z());
        let distance = sphere.cast(&ray).unwrap();
        assert_relative_eq!(distance, (0.25_f32 + 16.0).sqrt(), epsilon = EPSILON);
    }

    #[test]
    fn test_degenerate_spheres_never_hit() {
        let ray = Ray::new(Vec3::zeros(), Vec3::z());
        assert!(BoundingSphere::new(Vec3::new(0.0, 0.0, 5.0), 0.0).cast(&ray).is_none());
        assert!(BoundingSphere::new(Vec3::zeros(), 1.0).cast(&ray).is_none());
    }

    #[test]
    fn test_contains_with_margin() {
        let sphere = BoundingSphere::new(Vec3::new(0.0, 0.0, 3.0), 0.5);
        assert!(sphere.contains_with_margin(Vec3::new(0.0, 0.0, 0.5), 2.0));
        assert!(!sphere.contains_with_margin(Vec3::new(0.0, 0.0, 0.4), 2.0));
    }
}
