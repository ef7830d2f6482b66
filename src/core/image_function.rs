// Copyright @yucwang 2026

use crate::core::error::RayCastError;
use crate::math::constants::{Float, Index3, Vector3f};

/// Scalar function of a volume evaluated at a physical point or a continuous index.
pub trait ImageFunction: Send + Sync {
    /// Evaluate at a point in the caller's physical frame. No bounds checking is done.
    fn evaluate(&self, point: &Vector3f) -> Result<Float, RayCastError>;

    /// Evaluate at a continuous index of the volume. No bounds checking is done.
    fn evaluate_at_continuous_index(&self, index: &Vector3f) -> Result<Float, RayCastError>;

    fn is_inside_buffer(&self, point: &Vector3f) -> bool;
    fn is_inside_buffer_continuous_index(&self, index: &Vector3f) -> bool;
    fn is_inside_buffer_index(&self, index: &Index3) -> bool;
}
