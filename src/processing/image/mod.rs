//! Image conversion pipeline: load, downscale, encode, stage.

mod encode;
mod executor;
mod resize;

pub use encode::encode_surface;
pub use executor::{execute_batch, ImageJob, ImageSource};
pub use resize::apply_resize;
