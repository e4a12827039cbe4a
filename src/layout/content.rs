//! Content pages: one block per step, two blocks per page.
//!
//! A block is the step title with its status on the right, the screenshot
//! scaled into the image box, and the description wrapped below the image.
//! Descriptions are capped at a fixed number of lines so that two blocks
//! always share a page.

use super::{DrawCommand, PageCursor, ReportPlan, Section, SectionLayoutEngine};
use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::image_loader::{decode_image_bytes, read_image_dimensions, ImageSource};
use crate::model::StepRecord;
use crate::style::{Color, TextStyle};
use crate::text::fit_to_width;

/// Height of the title line above the image.
pub const ITEM_TITLE_BLOCK: f64 = 18.0;
const STATUS_GAP: f64 = 8.0;

fn description_style() -> TextStyle {
    TextStyle::helvetica(10.0)
}

/// Scale an image of `width_px` x `height_px` into a `max_width` x
/// `max_height` box, preserving its aspect ratio.
pub fn fit_image(width_px: u32, height_px: u32, max_width: f64, max_height: f64) -> Result<(f64, f64), ReportError> {
    if width_px == 0 || height_px == 0 {
        return Err(ReportError::MeasurementFailure(format!(
            "image has zero size ({}x{})",
            width_px, height_px
        )));
    }
    let (w, h) = (width_px as f64, height_px as f64);
    let scale = (max_width / w).min(max_height / h);
    let fitted = (w * scale, h * scale);
    if !(fitted.0.is_finite() && fitted.1.is_finite()) {
        return Err(ReportError::MeasurementFailure(format!(
            "image {}x{} cannot be scaled into {}x{}",
            width_px, height_px, max_width, max_height
        )));
    }
    Ok(fitted)
}

/// Height the description occupies once capped at the configured line count.
pub fn description_height(wrapped_lines: usize, config: &ReportConfig) -> f64 {
    wrapped_lines.min(config.description_max_lines) as f64 * config.description_line_height
}

/// Top of the next block on the page, given where this block's image ends
/// and how many lines its description wrapped to.
pub fn next_item_offset(image_bottom: f64, wrapped_lines: usize, config: &ReportConfig) -> f64 {
    image_bottom + description_height(wrapped_lines, config) + config.item_padding
}

impl SectionLayoutEngine<'_> {
    pub fn layout_content(
        &mut self,
        plan: &ReportPlan,
        steps: &[StepRecord],
        images: &dyn ImageSource,
    ) -> Result<(), ReportError> {
        let top = self.config.page.content_top();
        let mut cursor = PageCursor::new(plan.content_start(), top);

        for (i, step) in steps.iter().enumerate() {
            let page = plan.content_page_of(i);
            if page != cursor.page {
                cursor.turn_to(page, top);
            }
            cursor.y = self.content_item(&cursor, i, step, images)?;
            cursor.items_on_page += 1;
        }

        log::debug!(
            "content: {} steps on {} page(s) from page {}",
            steps.len(),
            plan.content_pages(),
            plan.content_start()
        );
        Ok(())
    }

    /// Lays out one step at the cursor and returns the top of the next block.
    fn content_item(
        &mut self,
        cursor: &PageCursor,
        index: usize,
        step: &StepRecord,
        images: &dyn ImageSource,
    ) -> Result<f64, ReportError> {
        let page = cursor.page;
        let top = cursor.y;
        let (left, right, width) = (self.left(), self.right(), self.content_width());

        // Title and status
        let title_style = TextStyle::helvetica(12.0).bold();
        let status = step.status.label();
        let status_width = self.measure.measure_text(status, &title_style);
        let title = fit_to_width(self.measure, &step.title, width - status_width - STATUS_GAP, &title_style);
        let baseline = top + 12.0;
        self.text(page, left, baseline, title, &title_style, Color::BLACK);
        self.text_right(page, right, baseline, status, &title_style, Color::for_status(step.status));

        // Image, read right before it is placed
        let bytes = images.read_image_bytes(&step.image)?;
        let (w_px, h_px) = read_image_dimensions(&bytes)?;
        let (img_w, img_h) = fit_image(w_px, h_px, width, self.config.image_max_height)?;
        let image = decode_image_bytes(&bytes)?;
        let image_top = top + ITEM_TITLE_BLOCK;
        self.log.push(
            page,
            DrawCommand::Image {
                x: left + (width - img_w) / 2.0,
                y: image_top,
                width: img_w,
                height: img_h,
                image,
            },
        );
        let image_bottom = image_top + img_h;

        // Description, capped
        let style = description_style();
        let wrapped = self.measure.line_count(&step.description, width, &style);
        let max_lines = self.config.description_max_lines;
        if wrapped > max_lines {
            log::warn!(
                "step {} description wraps to {} lines, keeping {}",
                index + 1,
                wrapped,
                max_lines
            );
        }
        if wrapped > 0 {
            let line_height = self.config.description_line_height;
            let lines = self.measure.wrap_text(&step.description, width, &style);
            for (n, line) in lines.into_iter().take(max_lines).enumerate() {
                let baseline = image_bottom + (n + 1) as f64 * line_height - 2.0;
                self.text(page, left, baseline, line, &style, Color::BLACK);
            }
        }

        let bottom = image_bottom + description_height(wrapped, self.config);
        self.place(Section::Content, index, page, cursor.items_on_page, top, bottom);
        Ok(next_item_offset(image_bottom, wrapped, self.config))
    }
}
