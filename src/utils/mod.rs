pub mod error;
pub mod formats;
pub mod fs;

pub use error::{ConvertError, ConvertResult, PathError, ValidationError};
pub use formats::{DocumentTarget, ImageFormat, is_supported_image, output_file_name};
pub use fs::{extension, file_name, file_size, unique_path};
