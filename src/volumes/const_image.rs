// Copyright @yucwang 2026

use crate::core::volume::{check_direction, ImageVolume};
use crate::math::constants::{Float, Index3, Matrix3f, Vector3f};

/// Image whose voxels all hold the same value. Nothing is stored per voxel.
pub struct ConstantImage {
    value: Float,
    size: Index3,
    spacing: Vector3f,
    origin: Vector3f,
    direction: Matrix3f,
}

impl ConstantImage {
    pub fn new(size: Index3, value: Float) -> Self {
        Self {
            value,
            size,
            spacing: Vector3f::new(1.0, 1.0, 1.0),
            origin: Vector3f::zeros(),
            direction: Matrix3f::identity(),
        }
    }

    pub fn with_spacing(mut self, spacing: Vector3f) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn with_origin(mut self, origin: Vector3f) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_direction(mut self, direction: Matrix3f) -> Result<Self, String> {
        check_direction(&direction)?;
        self.direction = direction;
        Ok(self)
    }
}

impl ImageVolume for ConstantImage {
    fn size(&self) -> Index3 {
        self.size
    }

    fn spacing(&self) -> Vector3f {
        self.spacing
    }

    fn origin(&self) -> Vector3f {
        self.origin
    }

    fn direction(&self) -> Matrix3f {
        self.direction
    }

    fn value(&self, _index: Index3) -> Float {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_image_scalar() {
        let image = ConstantImage::new([3, 3, 5], 10.0);
        assert_eq!(image.size(), [3, 3, 5]);
        assert_eq!(image.value([2, 1, 4]), 10.0);
        assert_eq!(image.voxel_count(), 45);
    }

    #[test]
    fn constant_image_geometry() {
        let image = ConstantImage::new([2, 2, 2], 1.0)
            .with_spacing(Vector3f::new(2.0, 2.0, 2.0))
            .with_origin(Vector3f::new(1.0, 0.0, -1.0));
        let p = image.continuous_index_to_point(&Vector3f::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vector3f::new(3.0, 2.0, 1.0));
    }

    #[test]
    fn constant_image_rejects_singular_direction() {
        assert!(ConstantImage::new([3, 3, 5], 10.0).with_direction(Matrix3f::zeros()).is_err());
        let image = ConstantImage::new([3, 3, 5], 10.0)
            .with_direction(Matrix3f::new(0.0, 1.0, 0.0,
                                          1.0, 0.0, 0.0,
                                          0.0, 0.0, 1.0))
            .unwrap();
        assert_eq!(image.direction()[(0, 1)], 1.0);
    }

    #[test]
    fn voxel_count_saturates() {
        let image = ConstantImage::new([usize::MAX, 2, 2], 1.0);
        assert_eq!(image.voxel_count(), usize::MAX);
    }
}
