// Copyright @yucwang 2026

use crate::math::constants::Vector3f;

/// Maps points from the caller's (output) frame into the volume's (input) frame.
pub trait SpatialTransform: Send + Sync {
    fn transform_point(&self, p: &Vector3f) -> Vector3f;

    fn describe(&self) -> String {
        String::from("SpatialTransform")
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct IdentityTransform;

impl SpatialTransform for IdentityTransform {
    fn transform_point(&self, p: &Vector3f) -> Vector3f {
        *p
    }

    fn describe(&self) -> String {
        String::from("IdentityTransform")
    }
}
