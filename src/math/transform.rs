// Copyright 2020 @TwoCookingMice

use super::constants::{ Float, Vector3f, Matrix4f };
use crate::core::spatial_transform::SpatialTransform;

use nalgebra as na;

/// Homogeneous affine/projective transform with a cached inverse.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    matrix: Matrix4f,
    inv_matrix: Matrix4f
}

impl Default for Transform {
    fn default() -> Self {
        Self { matrix: Matrix4f::identity(),
               inv_matrix: Matrix4f::identity() }
    }
}

impl Transform {
    pub fn new(matrix: Matrix4f) -> Self {
        Self { matrix: matrix,
               inv_matrix: matrix.try_inverse().unwrap_or(Matrix4f::identity())}
    }

    pub fn translate(offset: Vector3f) -> Self {
        Self::new(Matrix4f::new_translation(&offset))
    }

    pub fn scale(factors: Vector3f) -> Self {
        Self::new(Matrix4f::new_nonuniform_scaling(&factors))
    }

    /// Rotation of `angle_degrees` around `axis` (right handed).
    pub fn rotate(axis: Vector3f, angle_degrees: Float) -> Self {
        if axis.norm() == 0.0 {
            return Self::default();
        }
        let axis = na::Unit::new_normalize(axis);
        let rotation = na::Rotation3::from_axis_angle(&axis, angle_degrees.to_radians());
        Self::new(rotation.to_homogeneous())
    }

    /// `self` applied after `first`.
    pub fn compose(&self, first: &Transform) -> Self {
        Self::new(self.matrix * first.matrix)
    }

    pub fn inverse(&self) -> Self {
        Self { matrix: self.inv_matrix, inv_matrix: self.matrix }
    }

    pub fn matrix(&self) -> &Matrix4f {
        &self.matrix
    }

    pub fn apply_point(&self, p: Vector3f) -> Vector3f {
        project(&self.matrix, p)
    }

    pub fn apply_vector(&self, v: Vector3f) -> Vector3f {
        self.matrix.fixed_slice::<3, 3>(0, 0) * v
    }

    pub fn inv_apply_point(&self, p: Vector3f) -> Vector3f {
        project(&self.inv_matrix, p)
    }

    pub fn inv_apply_vector(&self, v: Vector3f) -> Vector3f {
        self.inv_matrix.fixed_slice::<3, 3>(0, 0) * v
    }
}

fn project(m: &Matrix4f, p: Vector3f) -> Vector3f {
    let h = m * p.push(1.0);
    if h[3] == 0.0 || h[3] == 1.0 {
        Vector3f::new(h[0], h[1], h[2])
    } else {
        Vector3f::new(h[0] / h[3], h[1] / h[3], h[2] / h[3])
    }
}

impl SpatialTransform for Transform {
    fn transform_point(&self, p: &Vector3f) -> Vector3f {
        self.apply_point(*p)
    }

    fn describe(&self) -> String {
        format!("Transform {:?}", self.matrix.as_slice())
    }
}
