//! # Report Styling
//!
//! The small, fixed palette of text styles and colors the report uses.
//! Styling is deliberately not configurable: only page arithmetic and
//! link targets are part of the report contract.

use serde::{Deserialize, Serialize};

use crate::model::StepStatus;

/// Millimetres to PDF points.
pub fn mm(v: f64) -> f64 {
    v * 72.0 / 25.4
}

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64, // 0.0 - 1.0
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
    pub const GREY: Color = Color {
        r: 0.4,
        g: 0.4,
        b: 0.4,
    };
    pub const PASSED: Color = Color {
        r: 0.1,
        g: 0.55,
        b: 0.2,
    };
    pub const FAILED: Color = Color {
        r: 0.8,
        g: 0.1,
        b: 0.1,
    };

    /// Status classification: PASSED and FAILED get their own color,
    /// everything else renders in the default text color.
    pub fn for_status(status: StepStatus) -> Self {
        match status {
            StepStatus::Passed => Color::PASSED,
            StepStatus::Failed => Color::FAILED,
            StepStatus::Done => Color::BLACK,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Font selection for a run of text. Resolved against the standard PDF
/// fonts by [`crate::font::FontContext`].
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub family: String,
    pub weight: u32,
    pub italic: bool,
    pub size: f64,
}

impl TextStyle {
    pub fn helvetica(size: f64) -> Self {
        Self {
            family: "Helvetica".to_string(),
            weight: 400,
            italic: false,
            size,
        }
    }

    pub fn times(size: f64) -> Self {
        Self {
            family: "Times".to_string(),
            weight: 400,
            italic: false,
            size,
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = 700;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mm_to_points() {
        assert!((mm(25.4) - 72.0).abs() < 1e-9);
        assert!((mm(210.0) - 595.28).abs() < 0.01);
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(Color::for_status(StepStatus::Passed), Color::PASSED);
        assert_eq!(Color::for_status(StepStatus::Failed), Color::FAILED);
        assert_eq!(Color::for_status(StepStatus::Done), Color::BLACK);
    }

    #[test]
    fn test_text_style_builders() {
        let s = TextStyle::times(10.0).bold().italic();
        assert_eq!(s.family, "Times");
        assert_eq!(s.weight, 700);
        assert!(s.italic);
        assert_eq!(s.size, 10.0);
    }
}
