//! Render payload assembly.
//!
//! Turns a stored report, its lab and the lab's report settings into the
//! flat structure the report template consumes. Synchronous and free of
//! I/O; fetching documents and rasterising HTML happen elsewhere.

pub mod branding;
pub mod dates;
pub mod error;
pub mod grouping;
pub mod notes;
pub mod payload;
pub mod verification;

pub use error::ReportError;
pub use grouping::{RenderedRow, TemplateGroup};
pub use payload::{build_render_payload, RenderOptions, RenderPayload};
