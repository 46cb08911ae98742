//! Page data extraction.
//!
//! Extraction runs as JavaScript evaluated against the rendered DOM;
//! each extraction is independent so one malformed page structure
//! cannot poison the others.

pub mod extractors;
pub mod js_scripts;
pub mod schema;
pub mod screenshot;

pub use extractors::{extract_links, extract_snapshot};
pub use schema::{PageSection, PageSnapshot, ProjectBlock};
pub use screenshot::{ScreenshotRecord, ScreenshotStore};
