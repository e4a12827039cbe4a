//! Post-layout check of the recorded geometry against the page plan.
//!
//! Layout never corrects itself; if the capacities in the configuration no
//! longer fit the page, the check below fails the build instead of letting
//! a link point at the wrong page.

use std::collections::HashMap;

use super::template::{FOOTER_BLOCK, HEADER_BLOCK};
use super::{DrawCommand, DrawLog, ItemPlacement, ReportPlan, Section};
use crate::config::ReportConfig;
use crate::error::ReportError;

const EPSILON: f64 = 1e-6;

/// Check placements and links against `plan`.
///
/// Fails with [`ReportError::PaginationDrift`] when a row or item runs past
/// the bottom content edge, leaves its planned page range or position on
/// the page, when the header or footer reaches into the content area, when
/// a step lands off its planned content page, when a link targets a page
/// other than the one its step landed on, or when any command addresses a
/// page outside the document.
pub fn verify_layout(
    plan: &ReportPlan,
    config: &ReportConfig,
    log: &DrawLog,
    placements: &[ItemPlacement],
) -> Result<(), ReportError> {
    let content_top = config.page.content_top();
    let bottom_edge = config.page.content_bottom();
    let page_height = config.page.size.dimensions().1;
    let total = plan.total_pages();
    let mut landed: HashMap<usize, usize> = HashMap::new();

    for p in placements {
        let (first, count, budget) = match p.section {
            Section::Cover => (ReportPlan::COVER_PAGE, 1, None),
            Section::Template => (ReportPlan::COVER_PAGE + 1, total.saturating_sub(1), None),
            Section::TableOfContents => (plan.toc_start(), plan.toc_pages(), Some(&plan.toc)),
            Section::Summary => (plan.summary_start(), plan.summary_pages(), Some(&plan.summary)),
            Section::Content => (plan.content_start(), plan.content_pages(), Some(&plan.content)),
        };
        if p.page < first || p.page >= first + count {
            return Err(drift(format!(
                "{:?} item {} landed on page {}, outside pages {}..{}",
                p.section,
                p.item,
                p.page,
                first,
                first + count
            )));
        }

        match (p.section, budget) {
            // Section rows: inside the content area, in their planned slot.
            (_, Some(budget)) => {
                if p.bottom > bottom_edge + EPSILON {
                    return Err(drift(format!(
                        "{:?} item {} on page {} ends at {:.2}, below the content edge at {:.2}",
                        p.section, p.item, p.page, p.bottom, bottom_edge
                    )));
                }
                let planned = budget.slot_of(p.item);
                if p.slot != planned {
                    return Err(drift(format!(
                        "{:?} item {} is number {} on page {} but was planned as number {}",
                        p.section,
                        p.item,
                        p.slot + 1,
                        p.page,
                        planned + 1
                    )));
                }
            }
            // Header and footer: inside the margins, clear of the content area.
            (Section::Template, None) => {
                let clear = match p.item {
                    HEADER_BLOCK => p.bottom <= content_top + EPSILON,
                    FOOTER_BLOCK => p.top + EPSILON >= bottom_edge,
                    _ => false,
                };
                if !clear || p.top < -EPSILON || p.bottom > page_height + EPSILON {
                    return Err(drift(format!(
                        "template block {} on page {} spans {:.2}..{:.2} and overlaps the content area {:.2}..{:.2}",
                        p.item, p.page, p.top, p.bottom, content_top, bottom_edge
                    )));
                }
            }
            (_, None) => {
                if p.bottom > page_height + EPSILON {
                    return Err(drift(format!(
                        "{:?} ends at {:.2}, below the page edge at {:.2}",
                        p.section, p.bottom, page_height
                    )));
                }
            }
        }

        if p.section == Section::Content {
            let planned = plan.content_page_of(p.item);
            if p.page != planned {
                return Err(drift(format!(
                    "step {} landed on page {} but was planned for page {}",
                    p.item, p.page, planned
                )));
            }
            landed.insert(p.item, p.page);
        }
    }

    for (page, command) in log.iter() {
        if *page >= total {
            return Err(drift(format!(
                "command addressed to page {} of a {}-page document",
                page, total
            )));
        }
        if let DrawCommand::Link { target, .. } = command {
            if target.page >= total {
                return Err(drift(format!(
                    "link on page {} targets page {} of a {}-page document",
                    page, target.page, total
                )));
            }
            if let Some(item) = target.item {
                match landed.get(&item) {
                    Some(&actual) if actual == target.page => {}
                    Some(&actual) => {
                        return Err(drift(format!(
                            "link on page {} points step {} at page {}, but it is on page {}",
                            page, item, target.page, actual
                        )))
                    }
                    None => {
                        return Err(drift(format!(
                            "link on page {} points at step {}, which was never placed",
                            page, item
                        )))
                    }
                }
            }
        }
    }

    log::debug!(
        "verified {} placements and {} commands across {} pages",
        placements.len(),
        log.len(),
        total
    );
    Ok(())
}

fn drift(message: String) -> ReportError {
    ReportError::PaginationDrift(message)
}
