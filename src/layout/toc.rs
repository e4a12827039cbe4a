//! Table of contents.
//!
//! Two fixed rows ("Table of Contents", "Document Summary") followed by one
//! row per step. Every row is a dotted-leader line ending in the 1-based
//! page number of its target, and the whole row is a link to that page.

use super::{LinkTarget, PageCursor, ReportPlan, Section, SectionLayoutEngine};
use crate::error::ReportError;
use crate::model::StepRecord;
use crate::style::{Color, TextStyle};
use crate::text::fit_to_width;

/// Space the title block takes on the first TOC page.
pub const TOC_TITLE_BLOCK: f64 = 36.0;
const LEADER_GAP: f64 = 4.0;

pub const TOC_TITLE: &str = "Table of Contents";
pub const SUMMARY_TITLE: &str = "Document Summary";

struct TocRow<'s> {
    title: &'s str,
    target: LinkTarget,
}

fn row_style() -> TextStyle {
    TextStyle::helvetica(10.0)
}

/// Number of leader dots that fit between a title and its page label.
pub fn leader_dot_count(content_width: f64, title_width: f64, label_width: f64, dot_width: f64) -> usize {
    let room = content_width - title_width - label_width - 2.0 * LEADER_GAP;
    if room <= 0.0 || dot_width <= 0.0 {
        return 0;
    }
    (room / dot_width).floor() as usize
}

impl SectionLayoutEngine<'_> {
    pub fn layout_toc(&mut self, plan: &ReportPlan, steps: &[StepRecord]) -> Result<(), ReportError> {
        let mut rows = vec![
            TocRow {
                title: TOC_TITLE,
                target: LinkTarget {
                    page: plan.toc_start(),
                    item: None,
                },
            },
            TocRow {
                title: SUMMARY_TITLE,
                target: LinkTarget {
                    page: plan.summary_start(),
                    item: None,
                },
            },
        ];
        rows.extend(steps.iter().enumerate().map(|(i, step)| TocRow {
            title: step.title.as_str(),
            target: LinkTarget {
                page: plan.content_page_of(i),
                item: Some(i),
            },
        }));

        let top = self.config.page.content_top();
        let mut cursor = PageCursor::new(plan.toc_start(), top + TOC_TITLE_BLOCK);
        self.toc_title_block(plan.toc_start());

        for (index, row) in rows.iter().enumerate() {
            let page = plan.toc.page_of(index);
            if page != cursor.page {
                cursor.turn_to(page, top);
            }
            self.toc_row(&cursor, index, row);
            cursor.y += self.config.toc_row_height;
            cursor.items_on_page += 1;
        }

        log::debug!(
            "table of contents: {} rows on {} page(s) from page {}",
            rows.len(),
            plan.toc_pages(),
            plan.toc_start()
        );
        Ok(())
    }

    fn toc_title_block(&mut self, page: usize) {
        let style = TextStyle::helvetica(16.0).bold();
        let center = self.left() + self.content_width() / 2.0;
        let baseline = self.config.page.content_top() + 20.0;
        self.text_centered(page, center, baseline, TOC_TITLE, &style, Color::BLACK);
    }

    fn toc_row(&mut self, cursor: &PageCursor, index: usize, row: &TocRow) {
        let style = row_style();
        let row_height = self.config.toc_row_height;
        let baseline = cursor.y + row_height - 3.5;
        let label = (row.target.page + 1).to_string();
        let label_width = self.measure.measure_text(&label, &style);

        let title_room = self.content_width() - label_width - 2.0 * LEADER_GAP;
        let title = fit_to_width(self.measure, row.title, title_room, &style);
        if title != row.title {
            log::warn!("TOC title truncated to fit: {:?}", row.title);
        }
        let title_width = self.measure.measure_text(&title, &style);
        let dot_width = self.measure.measure_text(".", &style);
        let dots = leader_dot_count(self.content_width(), title_width, label_width, dot_width);

        let left = self.left();
        let right = self.right();
        self.text(cursor.page, left, baseline, title, &style, Color::BLACK);
        if dots > 0 {
            self.text(
                cursor.page,
                left + title_width + LEADER_GAP,
                baseline,
                ".".repeat(dots),
                &style,
                Color::GREY,
            );
        }
        self.text_right(cursor.page, right, baseline, &label, &style, Color::BLACK);
        self.link(cursor.page, left, cursor.y, self.content_width(), row_height, row.target);
        self.place(
            Section::TableOfContents,
            index,
            cursor.page,
            cursor.items_on_page,
            cursor.y,
            cursor.y + row_height,
        );
    }
}
