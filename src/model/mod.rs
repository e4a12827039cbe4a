//! # Report Model
//!
//! The input representation for a report build: the report's metadata and
//! the ordered list of test steps. Both are immutable for the duration of a
//! build and are borrowed, not consumed, by the assembler.
//!
//! A complete job can be supplied as JSON:
//!
//! ```text
//! {
//!   "meta":  { "projectName": "...", "title": "...", ... },
//!   "steps": [ { "title": "...", "description": "...",
//!                "image": "./shots/1.png", "status": "PASSED" } ],
//!   "config": { ... }            <- optional, see ReportConfig
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ReportConfig;

/// Outcome recorded for a test step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StepStatus {
    Done,
    Passed,
    Failed,
}

impl StepStatus {
    /// Capitalized display label ("Passed", not "PASSED").
    pub fn label(&self) -> &'static str {
        match self {
            StepStatus::Done => "Done",
            StepStatus::Passed => "Passed",
            StepStatus::Failed => "Failed",
        }
    }
}

/// One test step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub title: String,
    /// Free text; embedded line breaks are honored when wrapping.
    #[serde(default)]
    pub description: String,
    /// Screenshot reference: a file path or a `data:image/...;base64,` URI.
    pub image: String,
    pub status: StepStatus,
}

/// Report-level metadata shown on the cover and in every page header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    pub project_name: String,
    pub author: String,
    /// Test tool (e.g. "Selenium").
    pub tool: String,
    pub test_case_id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    /// Generation date, already formatted for display.
    pub date: String,
    /// Optional cover logo, same reference forms as [`StepRecord::image`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// A complete report job as read from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportJob {
    pub meta: ReportMeta,
    #[serde(default)]
    pub steps: Vec<StepRecord>,
    #[serde(default)]
    pub config: ReportConfig,
}

/// Page geometry: size and margins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Page size. Defaults to A4.
    #[serde(default = "PageSize::default")]
    pub size: PageSize,

    /// Page margins in points (1/72 inch). The top and bottom margins bound
    /// the area sections draw into; the running header and footer sit
    /// inside them.
    #[serde(default = "default_margin")]
    pub margin: Edges,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            margin: default_margin(),
        }
    }
}

/// 20 mm left/right, 35 mm top/bottom.
fn default_margin() -> Edges {
    Edges::symmetric(crate::style::mm(35.0), crate::style::mm(20.0))
}

impl PageConfig {
    pub fn content_width(&self) -> f64 {
        self.size.dimensions().0 - self.margin.horizontal()
    }

    /// Top edge of the content area, measured from the top of the page.
    pub fn content_top(&self) -> f64 {
        self.margin.top
    }

    /// Bottom edge of the content area, measured from the top of the page.
    pub fn content_bottom(&self) -> f64 {
        self.size.dimensions().1 - self.margin.bottom
    }
}

/// Standard page sizes in points.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Custom {
        width: f64,
        height: f64,
    },
}

impl PageSize {
    /// Returns (width, height) in points.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::A3 => (841.89, 1190.55),
            PageSize::A5 => (419.53, 595.28),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// Edge values (top, right, bottom, left) used for margins.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_json_is_uppercase() {
        let s: StepStatus = serde_json::from_str("\"PASSED\"").unwrap();
        assert_eq!(s, StepStatus::Passed);
        assert_eq!(serde_json::to_string(&StepStatus::Failed).unwrap(), "\"FAILED\"");
        assert!(serde_json::from_str::<StepStatus>("\"passed\"").is_err());
    }

    #[test]
    fn test_status_labels_are_capitalized() {
        assert_eq!(StepStatus::Done.label(), "Done");
        assert_eq!(StepStatus::Passed.label(), "Passed");
        assert_eq!(StepStatus::Failed.label(), "Failed");
    }

    #[test]
    fn test_minimal_job_json() {
        let job: ReportJob = serde_json::from_str(
            r#"{
                "meta": {
                    "projectName": "Kopra SCM",
                    "author": "Automation Team",
                    "tool": "Selenium",
                    "testCaseId": "SCN_001",
                    "title": "Test Automation For Kopra SCM",
                    "date": "31 July 2024"
                },
                "steps": [
                    { "title": "Login", "image": "./login.png", "status": "DONE" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(job.meta.test_case_id, "SCN_001");
        assert_eq!(job.meta.subtitle, "");
        assert!(job.meta.logo.is_none());
        assert_eq!(job.steps.len(), 1);
        assert_eq!(job.steps[0].description, "");
        assert_eq!(job.config.toc.first_page, 41);
    }

    #[test]
    fn test_default_page_geometry() {
        let page = PageConfig::default();
        assert!((page.margin.left - 56.69).abs() < 0.01);
        assert!((page.margin.top - 99.21).abs() < 0.01);
        assert!((page.content_width() - 481.89).abs() < 0.01);
        assert!((page.content_bottom() - 742.68).abs() < 0.01);
    }
}
