// Copyright @yucwang 2026

use crate::core::computation_node::{generate_node_id, ComputationNode};
use crate::core::error::RayCastError;
use crate::core::image_function::ImageFunction;
use crate::core::plane_sampler::PlaneSampler;
use crate::core::spatial_transform::SpatialTransform;
use crate::core::volume::ImageVolume;
use crate::interpolators::plane_ray::PlaneRay;
use crate::math::constants::{Float, Index3, Vector2f, Vector3f, PLANE_EPSILON};
use std::sync::Arc;

/// Outcome of casting one ray through the volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayIntegral {
    /// Sum of the accepted plane samples.
    pub value: Float,
    /// Dominant axis the planes were taken along.
    pub axis: usize,
    /// Planes between source and target inside the volume extent.
    pub planes: usize,
    /// Samples strictly above the threshold.
    pub accepted: usize,
    /// Crossings that fell outside the plane footprint.
    pub skipped: usize,
}

/// Projective interpolation of a 3-D volume.
///
/// A ray is cast from the focal point through the query point; every plane of
/// voxels it crosses along its dominant axis is sampled with the plane
/// sampler, and samples above the threshold are summed.
///
/// Configure the focal point, transform, plane sampler and threshold first,
/// then evaluate. Evaluation only takes `&self`, so one configured instance can
/// be shared across threads.
pub struct RayCastInterpolator {
    id: String,
    volume: Arc<dyn ImageVolume>,
    transform: Option<Arc<dyn SpatialTransform>>,
    plane_sampler: Option<Arc<dyn PlaneSampler>>,
    focal_point: Vector3f,
    threshold: Float,
}

impl RayCastInterpolator {
    pub fn new(volume: Arc<dyn ImageVolume>) -> Self {
        Self {
            id: generate_node_id("RayCastInterpolator"),
            volume,
            transform: None,
            plane_sampler: None,
            focal_point: Vector3f::zeros(),
            threshold: 0.0,
        }
    }

    pub fn with_transform(mut self, transform: Arc<dyn SpatialTransform>) -> Self {
        self.set_transform(transform);
        self
    }

    pub fn with_plane_sampler(mut self, plane_sampler: Arc<dyn PlaneSampler>) -> Self {
        self.set_plane_sampler(plane_sampler);
        self
    }

    pub fn with_focal_point(mut self, focal_point: Vector3f) -> Self {
        self.set_focal_point(focal_point);
        self
    }

    pub fn with_threshold(mut self, threshold: Float) -> Self {
        self.set_threshold(threshold);
        self
    }

    pub fn volume(&self) -> &Arc<dyn ImageVolume> {
        &self.volume
    }

    pub fn set_volume(&mut self, volume: Arc<dyn ImageVolume>) {
        log::debug!("{}: volume set, size = {:?}.", self.id, volume.size());
        self.volume = volume;
    }

    pub fn transform(&self) -> Option<&Arc<dyn SpatialTransform>> {
        self.transform.as_ref()
    }

    pub fn set_transform(&mut self, transform: Arc<dyn SpatialTransform>) {
        log::debug!("{}: transform set to {}.", self.id, transform.describe());
        self.transform = Some(transform);
    }

    pub fn clear_transform(&mut self) {
        self.transform = None;
    }

    pub fn plane_sampler(&self) -> Option<&Arc<dyn PlaneSampler>> {
        self.plane_sampler.as_ref()
    }

    pub fn set_plane_sampler(&mut self, plane_sampler: Arc<dyn PlaneSampler>) {
        log::debug!("{}: plane sampler set to {}.", self.id, plane_sampler.name());
        self.plane_sampler = Some(plane_sampler);
    }

    pub fn focal_point(&self) -> Vector3f {
        self.focal_point
    }

    pub fn set_focal_point(&mut self, focal_point: Vector3f) {
        log::debug!("{}: focal point set to {:?}.", self.id, focal_point.as_slice());
        self.focal_point = focal_point;
    }

    pub fn threshold(&self) -> Float {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: Float) {
        log::debug!("{}: threshold set to {}.", self.id, threshold);
        self.threshold = threshold;
    }

    /// Cast a ray to a physical point given in the transform's output frame.
    pub fn trace(&self, point: &Vector3f) -> Result<RayIntegral, RayCastError> {
        let transform = self.transform.as_deref().ok_or(RayCastError::Configuration("transform"))?;
        let moved = transform.transform_point(point);
        let index = self.continuous_index(&moved)?;
        self.trace_at_continuous_index(&index)
    }

    /// Cast a ray to a continuous index of the volume.
    pub fn trace_at_continuous_index(&self, index: &Vector3f) -> Result<RayIntegral, RayCastError> {
        let sampler = self.plane_sampler.as_deref().ok_or(RayCastError::Configuration("plane sampler"))?;
        let source = self.continuous_index(&self.focal_point)?;
        let ray = PlaneRay::build(source, *index, self.volume.size())?;
        let integral = self.integrate(&ray, sampler);

        log::trace!(
            "{}: ray to {:?} along axis {}: {} planes, {} accepted, {} skipped, value {}.",
            self.id, index.as_slice(), integral.axis, integral.planes,
            integral.accepted, integral.skipped, integral.value
        );
        Ok(integral)
    }

    fn continuous_index(&self, point: &Vector3f) -> Result<Vector3f, RayCastError> {
        self.volume
            .point_to_continuous_index(point)
            .ok_or_else(|| RayCastError::DegenerateRay("volume direction matrix is not invertible".to_string()))
    }

    fn integrate(&self, ray: &PlaneRay, sampler: &dyn PlaneSampler) -> RayIntegral {
        let size = self.volume.size();
        let mut integral = RayIntegral {
            value: 0.0,
            axis: ray.axis(),
            planes: ray.len(),
            accepted: 0,
            skipped: 0,
        };

        for crossing in ray.crossings() {
            let (nu, nv) = crossing.plane.footprint(size);
            let coord = match clip_to_footprint(crossing.coord, nu, nv) {
                Some(coord) => coord,
                None => {
                    integral.skipped += 1;
                    continue;
                }
            };

            let v = sampler.sample(self.volume.as_ref(), crossing.plane, coord);
            if v > self.threshold {
                integral.value += v;
                integral.accepted += 1;
            }
        }

        integral
    }
}

// Coordinates within PLANE_EPSILON of the footprint are pulled onto its edge.
fn clip_to_footprint(coord: Vector2f, nu: usize, nv: usize) -> Option<Vector2f> {
    if nu == 0 || nv == 0 {
        return None;
    }
    let max_u = (nu - 1) as Float;
    let max_v = (nv - 1) as Float;
    if coord.x < -PLANE_EPSILON || coord.x > max_u + PLANE_EPSILON
        || coord.y < -PLANE_EPSILON || coord.y > max_v + PLANE_EPSILON
        || !coord.x.is_finite() || !coord.y.is_finite() {
        return None;
    }
    Some(Vector2f::new(coord.x.clamp(0.0, max_u), coord.y.clamp(0.0, max_v)))
}

impl ImageFunction for RayCastInterpolator {
    fn evaluate(&self, point: &Vector3f) -> Result<Float, RayCastError> {
        Ok(self.trace(point)?.value)
    }

    fn evaluate_at_continuous_index(&self, index: &Vector3f) -> Result<Float, RayCastError> {
        Ok(self.trace_at_continuous_index(index)?.value)
    }

    // Always true: callers are trusted to stay within the volume.
    fn is_inside_buffer(&self, _point: &Vector3f) -> bool {
        true
    }

    fn is_inside_buffer_continuous_index(&self, _index: &Vector3f) -> bool {
        true
    }

    fn is_inside_buffer_index(&self, _index: &Index3) -> bool {
        true
    }
}

impl ComputationNode for RayCastInterpolator {
    fn id(&self) -> &str {
        &self.id
    }

    fn describe(&self) -> String {
        let size = self.volume.size();
        let transform = match &self.transform {
            Some(t) => t.describe(),
            None => String::from("(none)"),
        };
        let sampler = match &self.plane_sampler {
            Some(s) => s.name().to_string(),
            None => String::from("(none)"),
        };
        format!(
            "RayCastInterpolator [{}]\n  volume: {}x{}x{}\n  focal_point: ({}, {}, {})\n  threshold: {}\n  transform: {}\n  plane_sampler: {}",
            self.id, size[0], size[1], size[2],
            self.focal_point.x, self.focal_point.y, self.focal_point.z,
            self.threshold, transform, sampler
        )
    }
}
