//! Cover page and the running header/footer.
//!
//! The header is a small grid of report metadata at the top of every page
//! after the cover, the footer a rule with the confidentiality label, the
//! project name and the page number.

use super::{DrawCommand, ReportPlan, Section, SectionLayoutEngine};
use crate::error::ReportError;
use crate::image_loader::{decode_image_bytes, read_image_dimensions, ImageSource};
use crate::model::ReportMeta;
use crate::style::{mm, Color, TextStyle};
use crate::text::fit_to_width;

const HEADER_ROW_HEIGHT: f64 = 12.64;
const FOOTER_LINE_WIDTH_MM: f64 = 0.3;
const FOOTER_FONT_SIZE: f64 = 8.0;

/// Template block indices recorded in placements.
pub const HEADER_BLOCK: usize = 0;
pub const FOOTER_BLOCK: usize = 1;

/// Author line of the cover's bottom block.
pub fn author_line(author: &str) -> String {
    format!("{:<18}: {}", "Author", author)
}

pub fn test_case_line(test_case_id: &str) -> String {
    format!("{:<15}: {}", "Test Case Id", test_case_id)
}

/// "Page X of Y" for the zero-based physical `page`.
pub fn page_label(page: usize, total: usize) -> String {
    format!("Page {} of {}", page + 1, total)
}

impl SectionLayoutEngine<'_> {
    /// Draws the cover on page 0. The logo, if any, is read here.
    pub fn layout_cover(&mut self, meta: &ReportMeta, images: &dyn ImageSource) -> Result<(), ReportError> {
        let page = ReportPlan::COVER_PAGE;
        let margin = self.config.page.margin;
        let (page_width, page_height) = (self.page_width(), self.page_height());
        let right = page_width - margin.right;

        if let Some(logo) = meta.logo.as_deref() {
            let bytes = images.read_image_bytes(logo)?;
            read_image_dimensions(&bytes)?;
            let image = decode_image_bytes(&bytes)?;
            let (width, height) = (mm(35.0), mm(10.0));
            self.log.push(
                page,
                DrawCommand::Image {
                    x: right - width,
                    y: margin.top,
                    width,
                    height,
                    image,
                },
            );
        }

        let title_size = 26.0;
        let title_baseline = page_height / 2.5;
        self.text_right(page, right, title_baseline, &meta.title, &TextStyle::times(title_size), Color::BLACK);
        if !meta.subtitle.is_empty() {
            self.text_right(
                page,
                right,
                title_baseline + mm(title_size / 3.0),
                &meta.subtitle,
                &TextStyle::times(14.0).italic(),
                Color::BLACK,
            );
        }

        // Both lines share a left edge, centred on the wider one.
        let style = TextStyle::times(12.0);
        let author = author_line(&meta.author);
        let test_case = test_case_line(&meta.test_case_id);
        let block_width = self
            .measure
            .measure_text(&author, &style)
            .max(self.measure.measure_text(&test_case, &style));
        let x = page_width / 2.0 - block_width / 2.0;
        let bottom = page_height - margin.bottom;
        self.text(page, x, bottom - mm(12.0 / 2.5), author, &style, Color::BLACK);
        self.text(page, x, bottom, test_case, &style, Color::BLACK);
        self.place(Section::Cover, 0, page, 0, margin.top, bottom);
        Ok(())
    }

    /// Draws the header table and footer on every page after the cover.
    pub fn layout_template(&mut self, plan: &ReportPlan, meta: &ReportMeta) {
        let total = plan.total_pages();
        for page in ReportPlan::COVER_PAGE + 1..total {
            self.header_table(page, meta);
            self.footer(page, total, meta);
        }
        log::debug!("template: header and footer on {} page(s)", total.saturating_sub(1));
    }

    fn header_table(&mut self, page: usize, meta: &ReportMeta) {
        let left = self.left();
        let label_width = mm(25.0);
        let value_width = self.content_width() - label_width;
        let padding = mm(2.0);
        let label_style = TextStyle::times(10.0).italic();
        let rows = [
            ("Title", meta.title.as_str(), label_style.clone().bold()),
            ("Author", meta.author.as_str(), label_style.clone()),
            ("Tools", meta.tool.as_str(), label_style.clone()),
            ("Test Case Id", meta.test_case_id.as_str(), label_style.clone()),
            ("Date", meta.date.as_str(), label_style.clone()),
        ];

        let top = mm(10.0);
        let mut y = top;
        for (label, value, value_style) in rows {
            for (x, width) in [(left, label_width), (left + label_width, value_width)] {
                self.log.push(
                    page,
                    DrawCommand::Rect {
                        x,
                        y,
                        width,
                        height: HEADER_ROW_HEIGHT,
                        fill: None,
                        stroke: Some(Color::BLACK),
                    },
                );
            }
            let baseline = y + HEADER_ROW_HEIGHT - 3.3;
            let value = fit_to_width(self.measure, value, value_width - 2.0 * padding, &value_style);
            self.text(page, left + padding, baseline, label, &label_style, Color::BLACK);
            self.text(page, left + label_width + padding, baseline, value, &value_style, Color::BLACK);
            y += HEADER_ROW_HEIGHT;
        }
        self.place(Section::Template, HEADER_BLOCK, page, HEADER_BLOCK, top, y);
    }

    fn footer(&mut self, page: usize, total: usize, meta: &ReportMeta) {
        let (left, right) = (self.left(), self.right());
        let rule_y = self.config.page.content_bottom() + mm(10.0);
        self.line(page, left, rule_y, right, rule_y, mm(FOOTER_LINE_WIDTH_MM));

        let style = TextStyle::times(FOOTER_FONT_SIZE).italic();
        let baseline = rule_y + mm(FOOTER_FONT_SIZE / 2.5 + FOOTER_LINE_WIDTH_MM);
        let padding = mm(2.0);
        let label = self.config.footer_label.clone();
        self.text(page, left + padding, baseline, label, &style, Color::BLACK);
        self.text_centered(page, self.page_width() / 2.0, baseline, &meta.project_name, &style, Color::BLACK);
        self.text_right(page, right - padding, baseline, &page_label(page, total), &style, Color::BLACK);
        self.place(Section::Template, FOOTER_BLOCK, page, FOOTER_BLOCK, rule_y, baseline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReportConfig;
    use crate::text::{TextMeasure, TextMeasurer};

    fn meta() -> ReportMeta {
        ReportMeta {
            project_name: "Kopra SCM".to_string(),
            author: "Automation Team".to_string(),
            tool: "Selenium".to_string(),
            test_case_id: "SCN_001".to_string(),
            title: "Test Automation For Kopra SCM".to_string(),
            subtitle: "Regression run".to_string(),
            date: "31 July 2024".to_string(),
            logo: None,
        }
    }

    struct NoImages;

    impl ImageSource for NoImages {
        fn read_image_bytes(&self, src: &str) -> Result<Vec<u8>, ReportError> {
            Err(ReportError::ResourceNotFound {
                path: src.to_string(),
                reason: "no images".to_string(),
            })
        }
    }

    fn texts_on(engine: &SectionLayoutEngine, page: usize) -> Vec<String> {
        engine
            .log()
            .commands_on(page)
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_author_block_padding() {
        assert_eq!(author_line("QA"), "Author            : QA");
        assert_eq!(test_case_line("SCN_001"), "Test Case Id   : SCN_001");
    }

    #[test]
    fn test_page_label_is_one_based() {
        assert_eq!(page_label(1, 5), "Page 2 of 5");
        assert_eq!(page_label(4, 5), "Page 5 of 5");
    }

    #[test]
    fn test_cover_texts_and_alignment() {
        let config = ReportConfig::default();
        let measurer = TextMeasurer::new();
        let mut engine = SectionLayoutEngine::new(&config, &measurer);
        engine.layout_cover(&meta(), &NoImages).unwrap();

        let texts = texts_on(&engine, 0);
        assert_eq!(texts.len(), 4);
        assert!(texts.contains(&"Test Automation For Kopra SCM".to_string()));

        let right = config.page.size.dimensions().0 - config.page.margin.right;
        let title = engine
            .log()
            .commands_on(0)
            .find_map(|cmd| match cmd {
                DrawCommand::Text { x, text, style, .. } if text.starts_with("Test Automation") => {
                    Some(x + measurer.measure_text(text, style))
                }
                _ => None,
            })
            .unwrap();
        assert!((title - right).abs() < 1e-9);
    }

    #[test]
    fn test_missing_logo_fails_cover() {
        let config = ReportConfig::default();
        let measurer = TextMeasurer::new();
        let mut engine = SectionLayoutEngine::new(&config, &measurer);
        let mut m = meta();
        m.logo = Some("./logo.png".to_string());
        assert!(matches!(
            engine.layout_cover(&m, &NoImages),
            Err(ReportError::ResourceNotFound { .. })
        ));
    }

    #[test]
    fn test_template_on_every_page_but_cover() {
        let config = ReportConfig::default();
        let measurer = TextMeasurer::new();
        let plan = ReportPlan::new(3, &config).unwrap();
        let mut engine = SectionLayoutEngine::new(&config, &measurer);
        engine.layout_template(&plan, &meta());

        assert_eq!(engine.log().commands_on(0).count(), 0);
        for page in 1..plan.total_pages() {
            let texts = texts_on(&engine, page);
            assert!(texts.contains(&"Confidential".to_string()));
            assert!(texts.contains(&"Kopra SCM".to_string()));
            assert!(texts.contains(&"Selenium".to_string()));
            assert!(texts.contains(&page_label(page, plan.total_pages())));
        }
        assert_eq!(engine.log().commands_on(plan.total_pages()).count(), 0);
    }

    #[test]
    fn test_header_and_footer_stay_in_margins() {
        let config = ReportConfig::default();
        let measurer = TextMeasurer::new();
        let plan = ReportPlan::new(1, &config).unwrap();
        let mut engine = SectionLayoutEngine::new(&config, &measurer);
        engine.layout_template(&plan, &meta());

        let blocks: Vec<_> = engine
            .placements()
            .iter()
            .filter(|p| p.section == Section::Template)
            .collect();
        assert_eq!(blocks.len(), 2 * (plan.total_pages() - 1));
        for block in blocks {
            assert_ne!(block.page, ReportPlan::COVER_PAGE);
            match block.item {
                HEADER_BLOCK => assert!(block.bottom <= config.page.content_top()),
                FOOTER_BLOCK => {
                    assert!(block.top >= config.page.content_bottom());
                    assert!(block.bottom < config.page.size.dimensions().1);
                }
                other => panic!("unexpected template block {}", other),
            }
        }
    }
}
