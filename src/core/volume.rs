// Copyright @yucwang 2026

use crate::math::constants::{Float, Index3, Matrix3f, Vector3f};

/// Read-only access to a 3-D scalar grid and its physical geometry.
///
/// Physical point `p` and continuous index `i` relate as
/// `p = origin + direction * (spacing .* i)`.
pub trait ImageVolume: Send + Sync {
    fn size(&self) -> Index3;
    fn spacing(&self) -> Vector3f;
    fn origin(&self) -> Vector3f;
    fn direction(&self) -> Matrix3f;

    /// Voxel value. `index` must be inside `size()`.
    fn value(&self, index: Index3) -> Float;

    /// `None` when the direction matrix is singular.
    fn point_to_continuous_index(&self, p: &Vector3f) -> Option<Vector3f> {
        let inv_dir = self.direction().try_inverse()?;
        let local = inv_dir * (p - self.origin());
        Some(local.component_div(&self.spacing()))
    }

    fn continuous_index_to_point(&self, index: &Vector3f) -> Vector3f {
        self.origin() + self.direction() * index.component_mul(&self.spacing())
    }

    fn voxel_count(&self) -> usize {
        let s = self.size();
        s[0].saturating_mul(s[1]).saturating_mul(s[2])
    }
}

/// Reject direction matrices that cannot map points back to indices.
pub fn check_direction(direction: &Matrix3f) -> Result<(), String> {
    if direction.iter().any(|v| !v.is_finite()) || direction.try_inverse().is_none() {
        return Err(format!("direction matrix is not invertible: {:?}", direction.as_slice()));
    }
    Ok(())
}
