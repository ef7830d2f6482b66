// Copyright @yucwang 2026

use crate::core::plane_sampler::{Plane, PlaneSampler};
use crate::core::volume::ImageVolume;
use crate::math::constants::{Float, Vector2f};

/// Bilinear interpolation between the four voxels surrounding `coord`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BilinearPlaneSampler;

impl BilinearPlaneSampler {
    pub fn new() -> Self {
        Self
    }
}

impl PlaneSampler for BilinearPlaneSampler {
    fn sample(&self, volume: &dyn ImageVolume, plane: Plane, coord: Vector2f) -> Float {
        let (nu, nv) = plane.footprint(volume.size());
        if nu == 0 || nv == 0 {
            return 0.0;
        }

        let a = coord.x.clamp(0.0, (nu - 1) as Float);
        let b = coord.y.clamp(0.0, (nv - 1) as Float);

        let a0 = a.floor() as usize;
        let b0 = b.floor() as usize;
        let a1 = (a0 + 1).min(nu - 1);
        let b1 = (b0 + 1).min(nv - 1);

        let ta = a - a0 as Float;
        let tb = b - b0 as Float;

        let c00 = volume.value(plane.voxel(a0, b0));
        let c10 = volume.value(plane.voxel(a1, b0));
        let c01 = volume.value(plane.voxel(a0, b1));
        let c11 = volume.value(plane.voxel(a1, b1));

        let c0 = c00 * (1.0 - ta) + c10 * ta;
        let c1 = c01 * (1.0 - ta) + c11 * ta;

        c0 * (1.0 - tb) + c1 * tb
    }

    fn name(&self) -> &str {
        "bilinear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volumes::grid_image::GridImage;

    fn ramp() -> GridImage {
        GridImage::from_fn([3, 4, 5], |i| (i[0] + 10 * i[1] + 100 * i[2]) as Float)
    }

    #[test]
    fn bilinear_on_voxel_centres() {
        let image = ramp();
        let sampler = BilinearPlaneSampler::new();
        let v = sampler.sample(&image, Plane::new(2, 3), Vector2f::new(2.0, 1.0));
        assert!((v - 312.0).abs() < 1e-4);
        // Last row and column are valid sample positions.
        let v = sampler.sample(&image, Plane::new(2, 4), Vector2f::new(2.0, 3.0));
        assert!((v - 432.0).abs() < 1e-4);
    }

    #[test]
    fn bilinear_midpoints() {
        let image = ramp();
        let sampler = BilinearPlaneSampler::new();
        // Plane x == 1, in-plane axes are (y, z).
        let v = sampler.sample(&image, Plane::new(0, 1), Vector2f::new(0.5, 1.5));
        assert!((v - (1.0 + 5.0 + 150.0)).abs() < 1e-3);
        // Plane y == 2, in-plane axes are (x, z).
        let v = sampler.sample(&image, Plane::new(1, 2), Vector2f::new(1.25, 0.0));
        assert!((v - (1.25 + 20.0)).abs() < 1e-3);
    }

    #[test]
    fn bilinear_clamps_outside() {
        let image = ramp();
        let sampler = BilinearPlaneSampler::new();
        let v = sampler.sample(&image, Plane::new(2, 0), Vector2f::new(-3.0, 9.0));
        assert!((v - 30.0).abs() < 1e-4);
    }
}
