//! Document summary: status totals followed by the step table.

use super::{LinkTarget, PageCursor, ReportPlan, Section, SectionLayoutEngine};
use crate::error::ReportError;
use crate::model::{StepRecord, StepStatus};
use crate::style::{Color, TextStyle};
use crate::text::fit_to_width;

use super::toc::SUMMARY_TITLE;

pub const SUMMARY_HEADING_BLOCK: f64 = 28.0;
pub const AGGREGATE_GAP: f64 = 16.0;
const AGGREGATE_WIDTH: f64 = 200.0;
const CELL_PADDING: f64 = 4.0;
const NUMBER_COLUMN: f64 = 36.0;
const STATUS_COLUMN: f64 = 70.0;
const PAGE_COLUMN: f64 = 44.0;

const HEADER_FILL: Color = Color {
    r: 0.9,
    g: 0.9,
    b: 0.9,
};

/// Step counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTotals {
    pub done: usize,
    pub passed: usize,
    pub failed: usize,
}

impl StatusTotals {
    pub fn count(steps: &[StepRecord]) -> Self {
        steps.iter().fold(Self::default(), |mut acc, step| {
            match step.status {
                StepStatus::Done => acc.done += 1,
                StepStatus::Passed => acc.passed += 1,
                StepStatus::Failed => acc.failed += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.done + self.passed + self.failed
    }
}

/// Left edges of the No./Step/Status/Page columns and the step column width.
struct Columns {
    number: f64,
    step: f64,
    step_width: f64,
    status: f64,
    page: f64,
}

impl SectionLayoutEngine<'_> {
    pub fn layout_summary(&mut self, plan: &ReportPlan, steps: &[StepRecord]) -> Result<(), ReportError> {
        let start = plan.summary_start();
        let top = self.config.page.content_top();
        let row_height = self.config.summary_row_height;

        let heading = TextStyle::helvetica(14.0).bold();
        let left = self.left();
        self.text(start, left, top + 18.0, SUMMARY_TITLE, &heading, Color::BLACK);

        let totals = StatusTotals::count(steps);
        let mut y = top + SUMMARY_HEADING_BLOCK;
        y = self.aggregate_table(start, y, &totals);
        y += AGGREGATE_GAP;

        let columns = self.columns();
        let mut cursor = PageCursor::new(start, y);
        self.step_table_header(&mut cursor, &columns);

        for (i, step) in steps.iter().enumerate() {
            let page = plan.summary.page_of(i);
            if page != cursor.page {
                cursor.turn_to(page, top);
                self.step_table_header(&mut cursor, &columns);
            }
            let target = LinkTarget {
                page: plan.content_page_of(i),
                item: Some(i),
            };
            self.step_row(&cursor, &columns, i, step, target);
            self.place(
                Section::Summary,
                i,
                cursor.page,
                cursor.items_on_page,
                cursor.y,
                cursor.y + row_height,
            );
            cursor.y += row_height;
            cursor.items_on_page += 1;
        }

        log::debug!(
            "summary: {} rows on {} page(s) from page {} ({} done, {} passed, {} failed)",
            steps.len(),
            plan.summary_pages(),
            start,
            totals.done,
            totals.passed,
            totals.failed
        );
        Ok(())
    }

    /// Draws the totals table at `y` and returns its bottom edge.
    fn aggregate_table(&mut self, page: usize, y: f64, totals: &StatusTotals) -> f64 {
        let row_height = self.config.summary_row_height;
        let left = self.left();
        let bold = TextStyle::helvetica(10.0).bold();
        let regular = TextStyle::helvetica(10.0);
        let count_right = left + AGGREGATE_WIDTH - CELL_PADDING;

        self.fill_row(page, left, y, AGGREGATE_WIDTH, row_height);
        let baseline = y + row_height - 3.5;
        self.text(page, left + CELL_PADDING, baseline, "Status", &bold, Color::BLACK);
        self.text_right(page, count_right, baseline, "Count", &bold, Color::BLACK);

        let rows = [
            (StepStatus::Done.label(), totals.done, Color::BLACK),
            (StepStatus::Passed.label(), totals.passed, Color::for_status(StepStatus::Passed)),
            (StepStatus::Failed.label(), totals.failed, Color::for_status(StepStatus::Failed)),
            ("Total", totals.total(), Color::BLACK),
        ];
        let mut row_top = y + row_height;
        for (label, count, color) in rows {
            let baseline = row_top + row_height - 3.5;
            self.text(page, left + CELL_PADDING, baseline, label, &regular, color);
            self.text_right(page, count_right, baseline, &count.to_string(), &regular, Color::BLACK);
            row_top += row_height;
            self.line(page, left, row_top, left + AGGREGATE_WIDTH, row_top, 0.5);
        }
        row_top
    }

    fn columns(&self) -> Columns {
        let number = self.left();
        let step = number + NUMBER_COLUMN;
        let page = self.right() - PAGE_COLUMN;
        let status = page - STATUS_COLUMN;
        Columns {
            number,
            step,
            step_width: status - step,
            status,
            page,
        }
    }

    fn step_table_header(&mut self, cursor: &mut PageCursor, columns: &Columns) {
        let row_height = self.config.summary_row_height;
        let bold = TextStyle::helvetica(10.0).bold();
        let baseline = cursor.y + row_height - 3.5;
        let page = cursor.page;
        self.fill_row(page, self.left(), cursor.y, self.content_width(), row_height);
        self.text(page, columns.number + CELL_PADDING, baseline, "No.", &bold, Color::BLACK);
        self.text(page, columns.step + CELL_PADDING, baseline, "Step", &bold, Color::BLACK);
        self.text(page, columns.status + CELL_PADDING, baseline, "Status", &bold, Color::BLACK);
        self.text(page, columns.page + CELL_PADDING, baseline, "Page", &bold, Color::BLACK);
        cursor.y += row_height;
    }

    fn step_row(&mut self, cursor: &PageCursor, columns: &Columns, index: usize, step: &StepRecord, target: LinkTarget) {
        let row_height = self.config.summary_row_height;
        let style = TextStyle::helvetica(10.0);
        let baseline = cursor.y + row_height - 3.5;
        let page = cursor.page;

        let title = fit_to_width(
            self.measure,
            &step.title,
            columns.step_width - 2.0 * CELL_PADDING,
            &style,
        );
        self.text(page, columns.number + CELL_PADDING, baseline, format!("{}.", index + 1), &style, Color::BLACK);
        self.text(page, columns.step + CELL_PADDING, baseline, title, &style, Color::BLACK);
        self.text(
            page,
            columns.status + CELL_PADDING,
            baseline,
            step.status.label(),
            &style,
            Color::for_status(step.status),
        );
        self.text(page, columns.page + CELL_PADDING, baseline, (target.page + 1).to_string(), &style, Color::BLACK);

        let bottom = cursor.y + row_height;
        let (left, right) = (self.left(), self.right());
        self.line(page, left, bottom, right, bottom, 0.5);
        self.link(page, left, cursor.y, self.content_width(), row_height, target);
    }

    fn fill_row(&mut self, page: usize, x: f64, y: f64, width: f64, height: f64) {
        self.log.push(
            page,
            super::DrawCommand::Rect {
                x,
                y,
                width,
                height,
                fill: Some(HEADER_FILL),
                stroke: None,
            },
        );
    }
}
