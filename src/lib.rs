// Copyright @yucwang 2021

pub extern crate nalgebra as na;

pub mod core;
pub mod interpolators;
pub mod math;
pub mod samplers;
pub mod volumes;

pub use crate::core::error::RayCastError;
pub use crate::core::image_function::ImageFunction;
pub use crate::interpolators::raycast::{RayCastInterpolator, RayIntegral};
