//! Document conversion pipeline.
//!
//! Routes: rtf/docx/txt → PDF, rtf/docx → TXT, txt → DOCX. Each external
//! collaborator sits behind its own module: `rtf` (legacy renderer), `docx`
//! (extractor/builder), `raster` (page rasterizer), `pdf` (assembler).

pub mod docx;
mod executor;
pub mod layout;
pub mod pdf;
pub mod raster;
mod router;
pub mod rtf;

pub use executor::{execute_batch, DocumentJob};
pub use router::{convert_document, resolve_route, supported_targets, DocumentRoute};
