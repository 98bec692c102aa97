//! Conversion result collection and bulk archive download.

pub mod archive;
mod collector;

pub use archive::{build_archive, ARCHIVE_NAME};
pub use collector::{format_reduction, reduction_percent, ResultCollector};
