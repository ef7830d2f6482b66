// Copyright @yucwang 2026

use crate::core::plane_sampler::{Plane, PlaneSampler};
use crate::core::volume::ImageVolume;
use crate::math::constants::{Float, Vector2f};

#[derive(Debug, Default, Clone, Copy)]
pub struct NearestPlaneSampler;

impl NearestPlaneSampler {
    pub fn new() -> Self {
        Self
    }
}

impl PlaneSampler for NearestPlaneSampler {
    fn sample(&self, volume: &dyn ImageVolume, plane: Plane, coord: Vector2f) -> Float {
        let (nu, nv) = plane.footprint(volume.size());
        if nu == 0 || nv == 0 {
            return 0.0;
        }

        let a = ((coord.x + 0.5).floor() as isize).clamp(0, nu as isize - 1) as usize;
        let b = ((coord.y + 0.5).floor() as isize).clamp(0, nv as isize - 1) as usize;
        volume.value(plane.voxel(a, b))
    }

    fn name(&self) -> &str {
        "nearest"
    }
}
