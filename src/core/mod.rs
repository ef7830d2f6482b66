// Copyright @yucwang 2021

pub mod computation_node;
pub mod config_loader;
pub mod error;
pub mod image_function;
pub mod plane_sampler;
pub mod spatial_transform;
pub mod volume;
