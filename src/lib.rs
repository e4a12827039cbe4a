//! # stepreport
//!
//! Paginated test-report PDFs with working cross-references.
//!
//! A report is a cover, a table of contents, a summary table and one block
//! per test step (title, status, screenshot, description), two steps to a
//! page. The table of contents and the summary link to the content pages,
//! which come *after* them, so every page number has to be known before the
//! first row is drawn.
//!
//! That is the job of the page plan: section sizes and the page of every
//! item are computed up front from item counts and per-section capacities.
//! Layout then draws each section straight onto its planned pages, and a
//! verification pass checks that everything landed where the plan said.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]           : Report metadata and test steps
//!       ↓
//!   [layout::budget]  : Page plan: section lengths, page of every item
//!       ↓
//!   [layout]          : Cover, template, TOC, summary, content → draw log
//!       ↓
//!   [layout::verify]  : Placements and links checked against the plan
//!       ↓
//!   [pdf]             : Serialize to PDF bytes
//! ```

pub mod config;
pub mod error;
pub mod font;
pub mod image_loader;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod report;
pub mod style;
pub mod text;

pub use config::{ReportConfig, SectionCapacity, OUTPUT_PATH};
pub use error::ReportError;
pub use image_loader::{FileImageSource, ImageSource};
pub use model::{ReportJob, ReportMeta, StepRecord, StepStatus};
pub use report::{ReportAssembler, ReportLayout};

/// Build a report with the default configuration, reading images from disk.
///
/// This is the primary entry point. Returns the raw bytes of a valid PDF.
pub fn build_report(meta: &ReportMeta, steps: &[StepRecord]) -> Result<Vec<u8>, ReportError> {
    ReportAssembler::<FileImageSource>::default().build(meta, steps)
}

/// Build a report described as JSON (see [`model::ReportJob`]).
pub fn build_report_json(json: &str) -> Result<Vec<u8>, ReportError> {
    let job: ReportJob = serde_json::from_str(json)?;
    ReportAssembler::new(job.config, FileImageSource).build(&job.meta, &job.steps)
}

/// Build a report and write it to `report.pdf` in the working directory.
pub fn write_report(meta: &ReportMeta, steps: &[StepRecord]) -> Result<(), ReportError> {
    let bytes = build_report(meta, steps)?;
    std::fs::write(OUTPUT_PATH, &bytes).map_err(|e| {
        ReportError::SerializationFailure(format!("failed to write {}: {}", OUTPUT_PATH, e))
    })
}
