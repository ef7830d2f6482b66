// Copyright @yucwang 2026

pub mod plane_ray;
pub mod raycast;
