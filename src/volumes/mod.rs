// Copyright @yucwang 2026

pub mod const_image;
pub mod grid_image;

use crate::core::volume::ImageVolume;
use crate::math::constants::Float;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeStats {
    pub min: Float,
    pub max: Float,
    pub mean: Float,
}

/// Value statistics over every voxel, `None` for an empty volume.
pub fn volume_stats(volume: &dyn ImageVolume) -> Option<VolumeStats> {
    let size = volume.size();
    if volume.voxel_count() == 0 {
        return None;
    }

    let mut min = Float::INFINITY;
    let mut max = Float::NEG_INFINITY;
    let mut sum = 0.0f64;
    for z in 0..size[2] {
        for y in 0..size[1] {
            for x in 0..size[0] {
                let v = volume.value([x, y, z]);
                min = min.min(v);
                max = max.max(v);
                sum += v as f64;
            }
        }
    }

    Some(VolumeStats {
        min,
        max,
        mean: (sum / volume.voxel_count() as f64) as Float,
    })
}
