//! Report configuration.
//!
//! Capacities are plain inputs: they were tuned against the default fonts
//! and geometry and are not derived from font metrics. The verification
//! pass in [`crate::layout::verify`] rejects a configuration whose
//! capacities no longer fit the page.

use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::model::PageConfig;

/// Content pages always hold this many steps.
pub const CONTENT_ITEMS_PER_PAGE: usize = 2;

/// Where the CLI and [`crate::write_report`] put the finished document.
pub const OUTPUT_PATH: &str = "report.pdf";

/// Items per page for a paginated section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionCapacity {
    /// Capacity of the section's first page, which carries a title block.
    pub first_page: usize,
    /// Capacity of every continuation page.
    pub rest_pages: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportConfig {
    pub page: PageConfig,
    pub toc: SectionCapacity,
    pub summary: SectionCapacity,
    pub toc_row_height: f64,
    pub summary_row_height: f64,
    pub image_max_height: f64,
    pub description_max_lines: usize,
    pub description_line_height: f64,
    /// Gap between the first item's description and the second item.
    pub item_padding: f64,
    /// Left footer text.
    pub footer_label: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            page: PageConfig::default(),
            toc: SectionCapacity {
                first_page: 41,
                rest_pages: 46,
            },
            summary: SectionCapacity {
                first_page: 34,
                rest_pages: 40,
            },
            toc_row_height: 13.5,
            summary_row_height: 14.0,
            image_max_height: 150.0,
            description_max_lines: 5,
            description_line_height: 12.0,
            item_padding: 20.0,
            footer_label: "Confidential".to_string(),
        }
    }
}

impl ReportConfig {
    /// Reject settings no layout can satisfy.
    pub fn validate(&self) -> Result<(), ReportError> {
        for (name, cap) in [("toc", &self.toc), ("summary", &self.summary)] {
            if cap.first_page == 0 || cap.rest_pages == 0 {
                return Err(ReportError::ConfigurationError(format!(
                    "{} capacities must be positive (firstPage={}, restPages={})",
                    name, cap.first_page, cap.rest_pages
                )));
            }
        }
        if self.description_max_lines == 0 {
            return Err(ReportError::ConfigurationError(
                "descriptionMaxLines must be positive".to_string(),
            ));
        }
        for (name, v) in [
            ("tocRowHeight", self.toc_row_height),
            ("summaryRowHeight", self.summary_row_height),
            ("imageMaxHeight", self.image_max_height),
            ("descriptionLineHeight", self.description_line_height),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(ReportError::ConfigurationError(format!(
                    "{} must be a positive number, got {}",
                    name, v
                )));
            }
        }
        if !(self.item_padding.is_finite() && self.item_padding >= 0.0) {
            return Err(ReportError::ConfigurationError(format!(
                "itemPadding must be non-negative, got {}",
                self.item_padding
            )));
        }
        let (w, h) = self.page.size.dimensions();
        if !(w.is_finite() && h.is_finite())
            || self.page.content_width() <= 0.0
            || self.page.content_bottom() <= self.page.content_top()
        {
            return Err(ReportError::ConfigurationError(format!(
                "margins leave no content area on a {:.2}x{:.2} page",
                w, h
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edges, PageSize};

    #[test]
    fn test_default_config_is_valid() {
        assert!(ReportConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut config = ReportConfig::default();
        config.summary.rest_pages = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ReportError::ConfigurationError(_)));
        assert!(err.to_string().contains("summary"));

        let mut config = ReportConfig::default();
        config.toc.first_page = 0;
        assert!(matches!(
            config.validate(),
            Err(ReportError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_zero_description_lines_rejected() {
        let config = ReportConfig {
            description_max_lines: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_row_height_rejected() {
        let config = ReportConfig {
            toc_row_height: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        let config = ReportConfig {
            summary_row_height: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_margins_swallowing_page_rejected() {
        let mut config = ReportConfig::default();
        config.page.size = PageSize::Custom {
            width: 100.0,
            height: 100.0,
        };
        config.page.margin = Edges::symmetric(60.0, 10.0);
        assert!(matches!(
            config.validate(),
            Err(ReportError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ReportConfig =
            serde_json::from_str(r#"{ "toc": { "firstPage": 10, "restPages": 12 } }"#).unwrap();
        assert_eq!(config.toc.first_page, 10);
        assert_eq!(config.toc.rest_pages, 12);
        assert_eq!(config.summary.first_page, 34);
        assert_eq!(config.description_max_lines, 5);
        assert_eq!(config.footer_label, "Confidential");
    }

    #[test]
    fn test_negative_capacity_is_a_parse_error() {
        let result: Result<ReportConfig, _> =
            serde_json::from_str(r#"{ "toc": { "firstPage": -1, "restPages": 12 } }"#);
        assert!(result.is_err());
    }
}
