/* Copyright 2020 @Yuchen Wong */

use nalgebra as na;

pub type Float = f32;

pub type Vector2f = na::Vector2<Float>;
pub type Vector3f = na::Vector3<Float>;
pub type Matrix3f = na::Matrix3<Float>;
pub type Matrix4f = na::Matrix4<Float>;

/// Integer voxel index, x fastest.
pub type Index3 = [usize; 3];

// Rays shorter than this (in index units) have no usable direction.
pub const DEGENERATE_RAY_EPSILON: Float = 1e-6;
// Snap distance used when rounding plane bounds and footprint edges.
pub const PLANE_EPSILON: Float = 1e-5;
