//! # Page Budgets
//!
//! Closed-form page arithmetic for a paginated section. A section's first
//! page holds `first` items (it also carries the section title), every page
//! after it holds `rest`. Given those two numbers and an item count, the
//! page of every item is known without laying anything out.

use crate::config::{ReportConfig, SectionCapacity, CONTENT_ITEMS_PER_PAGE};
use crate::error::ReportError;

fn check_capacity(first: usize, rest: usize) -> Result<(), ReportError> {
    if first == 0 || rest == 0 {
        return Err(ReportError::ConfigurationError(format!(
            "page capacities must be positive (first={}, rest={})",
            first, rest
        )));
    }
    Ok(())
}

/// Pages a section of `n` items occupies.
///
/// `0` for an empty section, `1` while everything fits on the first page,
/// otherwise one page plus as many continuation pages as the remainder needs.
pub fn pages_needed(n: usize, first: usize, rest: usize) -> Result<usize, ReportError> {
    check_capacity(first, rest)?;
    Ok(match n {
        0 => 0,
        n if n <= first => 1,
        n => 1 + (n - first).div_ceil(rest),
    })
}

/// Physical page of the item at `index` in a section starting at `start`.
pub fn page_index_of(
    index: usize,
    start: usize,
    first: usize,
    rest: usize,
) -> Result<usize, ReportError> {
    check_capacity(first, rest)?;
    Ok(page_of_unchecked(index, start, first, rest))
}

fn page_of_unchecked(index: usize, start: usize, first: usize, rest: usize) -> usize {
    if index < first {
        start
    } else {
        start + 1 + (index - first) / rest
    }
}

/// Page of the `index`-th step on the content pages.
pub fn content_page_index(index: usize, start: usize) -> usize {
    start + index / CONTENT_ITEMS_PER_PAGE
}

/// Page assignment for one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBudget {
    pub first_capacity: usize,
    pub rest_capacity: usize,
    pub total_items: usize,
    pub start_page: usize,
    /// Pages the section occupies even when it has fewer items.
    pub min_pages: usize,
}

impl PageBudget {
    pub fn new(capacity: SectionCapacity, total_items: usize, start_page: usize) -> Result<Self, ReportError> {
        check_capacity(capacity.first_page, capacity.rest_pages)?;
        Ok(Self {
            first_capacity: capacity.first_page,
            rest_capacity: capacity.rest_pages,
            total_items,
            start_page,
            min_pages: 0,
        })
    }

    /// Reserve at least `pages` pages for the section.
    pub fn with_min_pages(mut self, pages: usize) -> Self {
        self.min_pages = pages;
        self
    }

    pub fn page_count(&self) -> usize {
        let needed = match self.total_items {
            0 => 0,
            n if n <= self.first_capacity => 1,
            n => 1 + (n - self.first_capacity).div_ceil(self.rest_capacity),
        };
        needed.max(self.min_pages)
    }

    pub fn page_of(&self, index: usize) -> usize {
        page_of_unchecked(index, self.start_page, self.first_capacity, self.rest_capacity)
    }

    /// Position of the item within its page, from zero.
    pub fn slot_of(&self, index: usize) -> usize {
        if index < self.first_capacity {
            index
        } else {
            (index - self.first_capacity) % self.rest_capacity
        }
    }

    /// First page after the section.
    pub fn end_page(&self) -> usize {
        self.start_page + self.page_count()
    }
}

/// Rows the table of contents lists ahead of the steps.
pub const TOC_FIXED_ROWS: usize = 2;

/// Where every section of a report starts and how long it runs.
///
/// The cover is page 0 and the table of contents always starts on page 1.
/// The summary is given at least one page even with no steps, since it
/// also carries the aggregate status table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPlan {
    pub step_count: usize,
    pub toc: PageBudget,
    pub summary: PageBudget,
    pub content: PageBudget,
}

impl ReportPlan {
    pub const COVER_PAGE: usize = 0;

    pub fn new(step_count: usize, config: &ReportConfig) -> Result<Self, ReportError> {
        let toc = PageBudget::new(config.toc, step_count + TOC_FIXED_ROWS, Self::COVER_PAGE + 1)?;
        let summary = PageBudget::new(config.summary, step_count, toc.end_page())?.with_min_pages(1);
        let content_capacity = SectionCapacity {
            first_page: CONTENT_ITEMS_PER_PAGE,
            rest_pages: CONTENT_ITEMS_PER_PAGE,
        };
        let content = PageBudget::new(content_capacity, step_count, summary.end_page())?;

        let plan = Self {
            step_count,
            toc,
            summary,
            content,
        };
        log::debug!(
            "planned {} steps: toc {}+{}, summary {}+{}, content {}+{}, {} pages",
            step_count,
            plan.toc_start(),
            plan.toc_pages(),
            plan.summary_start(),
            plan.summary_pages(),
            plan.content_start(),
            plan.content_pages(),
            plan.total_pages()
        );
        Ok(plan)
    }

    pub fn toc_start(&self) -> usize {
        self.toc.start_page
    }

    pub fn toc_pages(&self) -> usize {
        self.toc.page_count()
    }

    pub fn summary_start(&self) -> usize {
        self.summary.start_page
    }

    pub fn summary_pages(&self) -> usize {
        self.summary.page_count()
    }

    pub fn content_start(&self) -> usize {
        self.content.start_page
    }

    pub fn content_pages(&self) -> usize {
        self.content.page_count()
    }

    pub fn total_pages(&self) -> usize {
        self.content_start() + self.content_pages()
    }

    /// Page the `index`-th step is drawn on. Both the TOC and the summary
    /// link through this.
    pub fn content_page_of(&self, index: usize) -> usize {
        content_page_index(index, self.content_start())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_pages_needed_basics() {
        assert_eq!(pages_needed(0, 41, 46).unwrap(), 0);
        assert_eq!(pages_needed(1, 41, 46).unwrap(), 1);
        assert_eq!(pages_needed(41, 41, 46).unwrap(), 1);
        assert_eq!(pages_needed(42, 41, 46).unwrap(), 2);
        assert_eq!(pages_needed(100, 41, 46).unwrap(), 3);
    }

    #[test]
    fn test_zero_capacity_is_a_configuration_error() {
        assert!(matches!(
            pages_needed(10, 0, 5),
            Err(ReportError::ConfigurationError(_))
        ));
        assert!(matches!(
            page_index_of(3, 1, 5, 0),
            Err(ReportError::ConfigurationError(_))
        ));
        let cap = SectionCapacity {
            first_page: 3,
            rest_pages: 0,
        };
        assert!(PageBudget::new(cap, 10, 1).is_err());
    }

    #[test]
    fn test_page_count_matches_distinct_pages() {
        for (first, rest) in [(1, 1), (2, 2), (3, 5), (5, 3), (41, 46), (34, 40)] {
            for n in 0..200 {
                let distinct: BTreeSet<usize> = (0..n)
                    .map(|i| page_index_of(i, 0, first, rest).unwrap())
                    .collect();
                assert_eq!(
                    pages_needed(n, first, rest).unwrap(),
                    distinct.len(),
                    "n={} first={} rest={}",
                    n,
                    first,
                    rest
                );
            }
        }
    }

    #[test]
    fn test_page_index_steps_by_at_most_one() {
        for (first, rest) in [(1, 1), (3, 5), (5, 3), (41, 46)] {
            let mut prev = page_index_of(0, 7, first, rest).unwrap();
            assert_eq!(prev, 7);
            for i in 1..300 {
                let cur = page_index_of(i, 7, first, rest).unwrap();
                assert!(cur == prev || cur == prev + 1, "jump at i={}", i);
                prev = cur;
            }
        }
    }

    #[test]
    fn test_exact_division_has_no_trailing_page() {
        for (first, rest) in [(1, 1), (3, 5), (41, 46), (34, 40)] {
            for k in 0..10 {
                assert_eq!(pages_needed(first + k * rest, first, rest).unwrap(), 1 + k);
            }
        }
    }

    #[test]
    fn test_slot_of_restarts_each_page() {
        let cap = SectionCapacity {
            first_page: 3,
            rest_pages: 4,
        };
        let budget = PageBudget::new(cap, 12, 2).unwrap();
        let slots: Vec<usize> = (0..12).map(|i| budget.slot_of(i)).collect();
        assert_eq!(slots, vec![0, 1, 2, 0, 1, 2, 3, 0, 1, 2, 3, 0]);
        let pages: Vec<usize> = (0..12).map(|i| budget.page_of(i)).collect();
        assert_eq!(pages, vec![2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5]);
        assert_eq!(budget.page_count(), 4);
        assert_eq!(budget.end_page(), 6);
    }

    #[test]
    fn test_content_index_is_two_per_page() {
        for i in 0..50 {
            assert_eq!(content_page_index(i, 9), page_index_of(i, 9, 2, 2).unwrap());
        }
        assert_eq!(content_page_index(4, 5), 7);
        assert_eq!(content_page_index(5, 5), 7);
    }

    #[test]
    fn test_plan_with_no_steps() {
        let plan = ReportPlan::new(0, &ReportConfig::default()).unwrap();
        assert_eq!(plan.toc_start(), 1);
        assert_eq!(plan.toc_pages(), 1);
        assert_eq!(plan.summary_start(), 2);
        assert_eq!(plan.summary_pages(), 1);
        assert_eq!(plan.content_start(), 3);
        assert_eq!(plan.content_pages(), 0);
        assert_eq!(plan.total_pages(), 3);
    }

    #[test]
    fn test_empty_summary_budget_keeps_its_page() {
        let plan = ReportPlan::new(0, &ReportConfig::default()).unwrap();
        assert_eq!(plan.summary.page_count(), 1);
        assert_eq!(plan.summary.end_page(), plan.content_start());

        // The minimum only pads; a longer section is unaffected.
        let budget = PageBudget::new(
            SectionCapacity {
                first_page: 2,
                rest_pages: 3,
            },
            9,
            4,
        )
        .unwrap()
        .with_min_pages(1);
        assert_eq!(budget.page_count(), 4);
        assert_eq!(budget.end_page(), 8);
    }

    #[test]
    fn test_plan_with_three_steps() {
        let plan = ReportPlan::new(3, &ReportConfig::default()).unwrap();
        let p = plan.content_start();
        assert_eq!(p, 3);
        let pages: Vec<usize> = (0..3).map(|i| plan.content_page_of(i)).collect();
        assert_eq!(pages, vec![p, p, p + 1]);
        assert_eq!(plan.total_pages(), 5);
    }

    #[test]
    fn test_plan_with_long_sections() {
        // 100 steps: 102 TOC rows need 3 pages, 100 summary rows need 3.
        let plan = ReportPlan::new(100, &ReportConfig::default()).unwrap();
        assert_eq!(plan.toc_pages(), 3);
        assert_eq!(plan.summary_start(), 4);
        assert_eq!(plan.summary_pages(), 3);
        assert_eq!(plan.content_start(), 7);
        assert_eq!(plan.content_pages(), 50);
        assert_eq!(plan.total_pages(), 57);
        assert_eq!(plan.content_page_of(99), 56);
    }

    #[test]
    fn test_plan_starts_are_contiguous() {
        let config = ReportConfig::default();
        for n in [0, 1, 2, 39, 40, 41, 75, 86, 87, 300] {
            let plan = ReportPlan::new(n, &config).unwrap();
            assert_eq!(plan.summary_start(), plan.toc_start() + plan.toc_pages());
            assert_eq!(plan.content_start(), plan.summary_start() + plan.summary_pages());
            if n > 0 {
                assert_eq!(plan.content_page_of(n - 1), plan.total_pages() - 1);
            }
        }
    }
}
