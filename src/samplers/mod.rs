// Copyright @yucwang 2026

pub mod bilinear;
pub mod nearest;

use crate::core::plane_sampler::PlaneSampler;
use std::sync::Arc;

use self::bilinear::BilinearPlaneSampler;
use self::nearest::NearestPlaneSampler;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaneFilterMode {
    Nearest,
    Bilinear,
}

impl Default for PlaneFilterMode {
    fn default() -> Self {
        PlaneFilterMode::Bilinear
    }
}

impl PlaneFilterMode {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "nearest" => Some(PlaneFilterMode::Nearest),
            "bilinear" | "linear" => Some(PlaneFilterMode::Bilinear),
            _ => None,
        }
    }
}

pub fn make_plane_sampler(mode: PlaneFilterMode) -> Arc<dyn PlaneSampler> {
    match mode {
        PlaneFilterMode::Nearest => Arc::new(NearestPlaneSampler::new()),
        PlaneFilterMode::Bilinear => Arc::new(BilinearPlaneSampler::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_filter_modes() {
        assert_eq!(PlaneFilterMode::parse("Bilinear"), Some(PlaneFilterMode::Bilinear));
        assert_eq!(PlaneFilterMode::parse(" nearest "), Some(PlaneFilterMode::Nearest));
        assert_eq!(PlaneFilterMode::parse("cubic"), None);
        assert_eq!(PlaneFilterMode::default(), PlaneFilterMode::Bilinear);
        assert_eq!(make_plane_sampler(PlaneFilterMode::Nearest).name(), "nearest");
    }
}
