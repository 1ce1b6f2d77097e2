#![forbid(unsafe_code)]

pub mod catalog;
pub mod model;
pub mod normalize;
pub mod style;
