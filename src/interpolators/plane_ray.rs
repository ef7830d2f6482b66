// Copyright @yucwang 2026

use crate::core::error::RayCastError;
use crate::core::plane_sampler::{in_plane_axes, Plane};
use crate::math::constants::{Float, Index3, Vector2f, Vector3f, DEGENERATE_RAY_EPSILON, PLANE_EPSILON};
use crate::math::ray::Ray3f;

/// Where the ray meets one plane of the traversal axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneCrossing {
    pub plane: Plane,
    /// Coordinates along the plane's two in-plane axes.
    pub coord: Vector2f,
    /// Ray parameter of the crossing, in index units from the source.
    pub t: Float,
}

/// Ray from a source to a target in continuous-index space, together with the
/// planes it crosses along its dominant axis, ordered from source to target.
#[derive(Debug, Clone)]
pub struct PlaneRay {
    ray: Ray3f,
    axis: usize,
    crossings: Vec<PlaneCrossing>,
}

impl PlaneRay {
    /// Build the plane traversal for the segment `source -> target` through a
    /// grid of `size` voxels. Only planes inside `[0, size[axis] - 1]` and
    /// between both endpoints (inclusive) are listed.
    pub fn build(source: Vector3f, target: Vector3f, size: Index3) -> Result<Self, RayCastError> {
        let length = (target - source).norm();
        if !length.is_finite() {
            return Err(RayCastError::DegenerateRay(format!(
                "non-finite ray from {:?} to {:?}", source.as_slice(), target.as_slice())));
        }
        if length <= DEGENERATE_RAY_EPSILON {
            return Err(RayCastError::DegenerateRay(format!(
                "focal point and target coincide at {:?}", source.as_slice())));
        }

        let ray = Ray3f::between(source, target);
        let axis = ray.dominant_axis();
        if ray.dir()[axis].abs() <= DEGENERATE_RAY_EPSILON {
            return Err(RayCastError::DegenerateRay(
                "ray direction has no usable component".to_string()));
        }

        let crossings = match plane_range(source[axis], target[axis], size[axis]) {
            Some((first, last)) => {
                let (u, v) = in_plane_axes(axis);
                let indices: Box<dyn Iterator<Item = usize>> = if target[axis] >= source[axis] {
                    Box::new(first..=last)
                } else {
                    Box::new((first..=last).rev())
                };

                indices
                    .filter_map(|k| {
                        let t = ray.plane_intersection(axis, k as Float)?;
                        let p = ray.at(t);
                        Some(PlaneCrossing {
                            plane: Plane::new(axis, k),
                            coord: Vector2f::new(p[u], p[v]),
                            t,
                        })
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        Ok(Self { ray, axis, crossings })
    }

    pub fn ray(&self) -> &Ray3f {
        &self.ray
    }

    pub fn axis(&self) -> usize {
        self.axis
    }

    pub fn crossings(&self) -> &[PlaneCrossing] {
        &self.crossings
    }

    pub fn len(&self) -> usize {
        self.crossings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crossings.is_empty()
    }
}

// Integer plane indices within [min(a, b), max(a, b)] and inside the extent.
fn plane_range(a: Float, b: Float, extent: usize) -> Option<(usize, usize)> {
    if extent == 0 {
        return None;
    }
    let lo = (a.min(b) - PLANE_EPSILON).ceil().max(0.0);
    let hi = (a.max(b) + PLANE_EPSILON).floor().min((extent - 1) as Float);
    if lo > hi {
        return None;
    }
    Some((lo as usize, hi as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_aligned_ray_clips_to_extent() {
        let ray = PlaneRay::build(Vector3f::new(1.0, 1.0, -10.0), Vector3f::new(1.0, 1.0, 4.0), [3, 3, 5]).unwrap();
        assert_eq!(ray.axis(), 2);
        assert_eq!(ray.len(), 5);
        let planes: Vec<usize> = ray.crossings().iter().map(|c| c.plane.index).collect();
        assert_eq!(planes, vec![0, 1, 2, 3, 4]);
        for c in ray.crossings() {
            assert_eq!(c.coord, Vector2f::new(1.0, 1.0));
            assert!(ray.ray().test_segment(c.t));
        }
        assert!((ray.crossings()[0].t - 10.0).abs() < 1e-5);
    }

    #[test]
    fn target_inside_volume_stops_traversal() {
        let ray = PlaneRay::build(Vector3f::new(1.0, 1.0, -10.0), Vector3f::new(1.0, 1.0, 2.5), [3, 3, 5]).unwrap();
        let planes: Vec<usize> = ray.crossings().iter().map(|c| c.plane.index).collect();
        assert_eq!(planes, vec![0, 1, 2]);
    }

    #[test]
    fn reversed_ray_lists_planes_from_source() {
        let ray = PlaneRay::build(Vector3f::new(1.0, 1.0, 10.0), Vector3f::new(1.0, 1.0, 0.0), [3, 3, 5]).unwrap();
        let planes: Vec<usize> = ray.crossings().iter().map(|c| c.plane.index).collect();
        assert_eq!(planes, vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn oblique_ray_in_plane_coordinates() {
        // Dominant x; y climbs 1 per 5 units of x.
        let ray = PlaneRay::build(Vector3f::new(-1.0, 1.0, 1.0), Vector3f::new(4.0, 2.0, 1.0), [5, 3, 3]).unwrap();
        assert_eq!(ray.axis(), 0);
        assert_eq!(ray.len(), 5);
        for (k, c) in ray.crossings().iter().enumerate() {
            assert_eq!(c.plane, Plane::new(0, k));
            let expected_y = 1.0 + (k as Float + 1.0) / 5.0;
            assert!((c.coord.x - expected_y).abs() < 1e-5);
            assert!((c.coord.y - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn dominant_y_uses_x_and_z_in_plane() {
        let ray = PlaneRay::build(Vector3f::new(0.0, -2.0, 0.0), Vector3f::new(1.0, 2.0, 2.0), [4, 4, 4]).unwrap();
        assert_eq!(ray.axis(), 1);
        let c = ray.crossings()[0];
        assert_eq!(c.plane, Plane::new(1, 0));
        assert!((c.coord.x - 0.5).abs() < 1e-5);
        assert!((c.coord.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn coincident_endpoints_are_degenerate() {
        let p = Vector3f::new(1.0, 1.0, -10.0);
        match PlaneRay::build(p, p, [3, 3, 5]) {
            Err(RayCastError::DegenerateRay(_)) => {}
            other => panic!("expected degenerate ray, got {:?}", other),
        }
    }

    #[test]
    fn non_finite_endpoints_are_degenerate() {
        let p = Vector3f::new(1.0, 1.0, -10.0);
        let q = Vector3f::new(Float::NAN, 1.0, 0.0);
        assert!(matches!(PlaneRay::build(p, q, [3, 3, 5]), Err(RayCastError::DegenerateRay(_))));
    }

    #[test]
    fn segment_between_planes_crosses_nothing() {
        let ray = PlaneRay::build(Vector3f::new(1.2, 1.1, -10.0), Vector3f::new(1.7, 1.1, -10.0), [3, 3, 5]).unwrap();
        assert_eq!(ray.axis(), 0);
        assert!(ray.is_empty());
    }

    #[test]
    fn segment_outside_extent_crosses_nothing() {
        let ray = PlaneRay::build(Vector3f::new(1.0, 1.0, -10.0), Vector3f::new(1.0, 1.0, -5.0), [3, 3, 5]).unwrap();
        assert!(ray.is_empty());
        let ray = PlaneRay::build(Vector3f::new(1.0, 1.0, -10.0), Vector3f::new(1.0, 1.0, 4.0), [3, 3, 0]).unwrap();
        assert!(ray.is_empty());
    }
}
