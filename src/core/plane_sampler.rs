// Copyright @yucwang 2026

use crate::core::volume::ImageVolume;
use crate::math::constants::{Float, Index3, Vector2f};

/// One axis-aligned slice of a volume: all voxels with `index[axis] == index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plane {
    pub axis: usize,
    pub index: usize,
}

impl Plane {
    pub fn new(axis: usize, index: usize) -> Self {
        Self { axis, index }
    }

    /// The two in-plane axes in ascending order.
    pub fn in_plane_axes(&self) -> (usize, usize) {
        in_plane_axes(self.axis)
    }

    /// Extent of the plane as `(size[u], size[v])`.
    pub fn footprint(&self, size: Index3) -> (usize, usize) {
        let (u, v) = self.in_plane_axes();
        (size[u], size[v])
    }

    /// 3-D voxel index for in-plane integer coordinates `(a, b)`.
    pub fn voxel(&self, a: usize, b: usize) -> Index3 {
        let (u, v) = self.in_plane_axes();
        let mut index = [0usize; 3];
        index[self.axis] = self.index;
        index[u] = a;
        index[v] = b;
        index
    }
}

pub fn in_plane_axes(axis: usize) -> (usize, usize) {
    match axis {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

/// 2-D interpolation inside a single plane of a volume.
///
/// `coord` is expressed along the plane's in-plane axes and lies within
/// `[0, n_u - 1] x [0, n_v - 1]` when called by the ray caster.
pub trait PlaneSampler: Send + Sync {
    fn sample(&self, volume: &dyn ImageVolume, plane: Plane, coord: Vector2f) -> Float;

    fn name(&self) -> &str;
}
