//! Pixel grid data structures: domains, images, element traits

mod domain;
mod element;
mod image;
mod point;

pub use domain::{Domain, PointScan, UNDEFINED_INDEX};
pub use element::Weight;
pub use image::Image;
pub use point::Point;
