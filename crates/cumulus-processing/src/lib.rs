//! Pre-upload image processing.

pub mod resize;

pub use resize::{resize_image, Fit, ResizeOptions};
