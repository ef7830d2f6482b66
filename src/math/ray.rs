// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray3f {
    origin: Vector3f,
    dir: Vector3f,
    pub min_t: Float,
    pub max_t: Float
}

impl Ray3f {
    pub fn new(o: Vector3f, d: Vector3f,
               min_t: Option<Float>, max_t: Option<Float>) -> Self {
        Self { origin: o, dir: d.normalize(),
               min_t: min_t.unwrap_or(0.0),
               max_t: max_t.unwrap_or(std::f32::MAX)}
    }

    /// Ray from `from` towards `to`, with `max_t` set to their distance.
    pub fn between(from: Vector3f, to: Vector3f) -> Self {
        let delta = to - from;
        Self::new(from, delta, Some(0.0), Some(delta.norm()))
    }

    pub fn origin(&self) -> Vector3f {
        self.origin
    }

    pub fn dir(&self) -> Vector3f {
        self.dir
    }

    pub fn at(&self, t: Float) -> Vector3f {
        self.origin + self.dir * t
    }

    pub fn test_segment(&self, t: Float) -> bool {
        t >= self.min_t && t <= self.max_t
    }

    /// Axis with the largest absolute direction component. Ties go to the lower axis.
    pub fn dominant_axis(&self) -> usize {
        let a = self.dir.abs();
        if a[0] >= a[1] && a[0] >= a[2] {
            0
        } else if a[1] >= a[2] {
            1
        } else {
            2
        }
    }

    /// Ray parameter where the ray meets the plane `axis == coord`, if it does.
    pub fn plane_intersection(&self, axis: usize, coord: Float) -> Option<Float> {
        let slope = self.dir[axis];
        if slope.abs() < 1e-8 {
            return None;
        }
        Some((coord - self.origin[axis]) / slope)
    }
}

/* Tests for Ray */

#[cfg(test)]
mod tests {
    use super::Vector3f;
    use super::{Ray3f};

    #[test]
    fn test_ray3f() {
        let o = Vector3f::new(0.0, 0.0, 0.0);
        let d = Vector3f::new(1.0, 0.0, 1.0);
        let ray = Ray3f::new(o, d, None, None);
        assert_eq!(o, ray.origin());

        let v1 = ray.at(2.0);
        assert!((v1[0] - std::f32::consts::SQRT_2).abs() < 1e-6);
        assert!((v1[1] - 0.0).abs() < 1e-6);
        assert!((v1[2] - std::f32::consts::SQRT_2).abs() < 1e-6);
        assert!(ray.test_segment(100.0));
    }

    #[test]
    fn test_ray_between() {
        let ray = Ray3f::between(Vector3f::new(1.0, 1.0, -10.0), Vector3f::new(1.0, 1.0, 4.0));
        assert!((ray.max_t - 14.0).abs() < 1e-5);
        assert_eq!(ray.dominant_axis(), 2);
        assert!(ray.test_segment(14.0));
        assert!(!ray.test_segment(14.5));
    }

    #[test]
    fn test_dominant_axis_ties() {
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(1.0, -1.0, 0.5), None, None);
        assert_eq!(ray.dominant_axis(), 0);
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.1, -2.0, 2.0), None, None);
        assert_eq!(ray.dominant_axis(), 1);
    }

    #[test]
    fn test_plane_intersection() {
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, 2.0), None, None);
        let t = ray.plane_intersection(2, 3.0).unwrap();
        assert!((t - 3.0).abs() < 1e-6);
        assert!(ray.plane_intersection(0, 1.0).is_none());
    }
}
