//! # Report Assembly
//!
//! Runs one build from start to finish:
//!
//! 1. validate the configuration and compute the [`ReportPlan`]
//! 2. cover, then header/footer on every later page
//! 3. table of contents, summary and content pages, in page order
//! 4. check the recorded placements against the plan
//! 5. serialize to PDF
//!
//! Any failure aborts the build; no partial document is produced.

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::image_loader::{FileImageSource, ImageSource};
use crate::layout::verify::verify_layout;
use crate::layout::{ItemPlacement, LayoutPage, ReportPlan, SectionLayoutEngine};
use crate::model::{ReportMeta, StepRecord};
use crate::pdf::PdfWriter;
use crate::text::TextMeasurer;

/// The laid-out document before serialization.
#[derive(Debug)]
pub struct ReportLayout {
    pub plan: ReportPlan,
    pub pages: Vec<LayoutPage>,
    pub placements: Vec<ItemPlacement>,
}

/// Builds reports with one configuration and one image source.
pub struct ReportAssembler<S: ImageSource = FileImageSource> {
    config: ReportConfig,
    images: S,
    measurer: TextMeasurer,
}

impl Default for ReportAssembler<FileImageSource> {
    fn default() -> Self {
        Self::new(ReportConfig::default(), FileImageSource)
    }
}

impl<S: ImageSource> ReportAssembler<S> {
    pub fn new(config: ReportConfig, images: S) -> Self {
        Self {
            config,
            images,
            measurer: TextMeasurer::new(),
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Page plan for a report with `step_count` steps.
    pub fn plan(&self, step_count: usize) -> Result<ReportPlan, ReportError> {
        self.config.validate()?;
        ReportPlan::new(step_count, &self.config)
    }

    /// Lay out every section and verify the result.
    pub fn layout(&self, meta: &ReportMeta, steps: &[StepRecord]) -> Result<ReportLayout, ReportError> {
        let plan = self.plan(steps.len())?;
        let mut engine = SectionLayoutEngine::new(&self.config, &self.measurer);

        engine.layout_cover(meta, &self.images)?;
        engine.layout_template(&plan, meta);
        engine.layout_toc(&plan, steps)?;
        engine.layout_summary(&plan, steps)?;
        engine.layout_content(&plan, steps, &self.images)?;

        let (log, placements) = engine.finish();
        verify_layout(&plan, &self.config, &log, &placements)?;

        let (width, height) = self.config.page.size.dimensions();
        let pages = log.into_pages(plan.total_pages(), width, height)?;
        Ok(ReportLayout {
            plan,
            pages,
            placements,
        })
    }

    /// Build the complete PDF.
    pub fn build(&self, meta: &ReportMeta, steps: &[StepRecord]) -> Result<Vec<u8>, ReportError> {
        let layout = self.layout(meta, steps)?;
        let bytes = PdfWriter::new().write(&layout.pages, meta, self.measurer.fonts())?;
        log::info!(
            "built report for {:?}: {} steps, {} pages, {} bytes",
            meta.test_case_id,
            steps.len(),
            layout.plan.total_pages(),
            bytes.len()
        );
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{DrawCommand, Section};
    use crate::model::StepStatus;

    struct OnePixel;

    impl ImageSource for OnePixel {
        fn read_image_bytes(&self, _src: &str) -> Result<Vec<u8>, ReportError> {
            let img = image::RgbImage::from_pixel(4, 3, image::Rgb([0, 0, 0]));
            let mut png = Vec::new();
            let encoder = image::codecs::png::PngEncoder::new(&mut png);
            image::ImageEncoder::write_image(encoder, img.as_raw(), 4, 3, image::ColorType::Rgb8)
                .map_err(|e| ReportError::MeasurementFailure(e.to_string()))?;
            Ok(png)
        }
    }

    fn steps(n: usize) -> Vec<StepRecord> {
        (0..n)
            .map(|i| StepRecord {
                title: format!("Step {}", i + 1),
                description: format!("Description of step {}", i + 1),
                image: format!("{}.png", i),
                status: StepStatus::Passed,
            })
            .collect()
    }

    #[test]
    fn test_plan_validates_config() {
        let mut config = ReportConfig::default();
        config.toc.first_page = 0;
        let assembler = ReportAssembler::new(config, OnePixel);
        assert!(matches!(
            assembler.plan(3),
            Err(ReportError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_layout_page_count_matches_plan() {
        let assembler = ReportAssembler::new(ReportConfig::default(), OnePixel);
        let layout = assembler.layout(&ReportMeta::default(), &steps(5)).unwrap();
        assert_eq!(layout.pages.len(), layout.plan.total_pages());
        assert_eq!(layout.pages.len(), 6);
        // Cover carries no template; every later page does.
        for (i, page) in layout.pages.iter().enumerate().skip(1) {
            let has_footer = page.commands.iter().any(|c| {
                matches!(c, DrawCommand::Text { text, .. } if text == &format!("Page {} of 6", i + 1))
            });
            assert!(has_footer, "page {} has no footer", i);
        }
    }

    #[test]
    fn test_every_section_is_placed() {
        let assembler = ReportAssembler::new(ReportConfig::default(), OnePixel);
        let layout = assembler.layout(&ReportMeta::default(), &steps(3)).unwrap();
        let count = |section| {
            layout
                .placements
                .iter()
                .filter(|p| p.section == section)
                .count()
        };
        assert_eq!(count(Section::TableOfContents), 5);
        assert_eq!(count(Section::Summary), 3);
        assert_eq!(count(Section::Content), 3);
        assert_eq!(count(Section::Cover), 1);
        // Header and footer on every page after the cover.
        assert_eq!(count(Section::Template), 2 * (layout.plan.total_pages() - 1));
    }

    #[test]
    fn test_build_produces_pdf() {
        let assembler = ReportAssembler::new(ReportConfig::default(), OnePixel);
        let bytes = assembler.build(&ReportMeta::default(), &steps(2)).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
    }
}
