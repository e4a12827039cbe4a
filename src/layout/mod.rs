//! # Section Layout
//!
//! Turns a [`ReportPlan`] and the step list into draw commands.
//!
//! ## Pages Are Known Before Anything Is Drawn
//!
//! The table of contents and the summary sit *in front of* the content they
//! point at, so their links must name pages that have not been drawn yet.
//! Rather than rendering, measuring and re-rendering, the page numbers come
//! from [`budget`]: pure arithmetic over item counts and per-section
//! capacities. Each section then walks its items in order and asks the
//! budget which page an item belongs on.
//!
//! ## Every Command Names Its Page
//!
//! There is no "current page" to switch. Every draw decision is recorded as
//! a `(page, command)` pair in a [`DrawLog`], so a section can never draw
//! onto the wrong page because some earlier step left a cursor elsewhere.
//! The PDF writer groups the log per page at the end.
//!
//! ## Trust, But Verify
//!
//! Capacities are inputs, not derived from font metrics. Every placed row
//! and item is recorded as an [`ItemPlacement`], and [`verify`] checks the
//! recorded geometry against the plan before anything is serialized.

pub mod budget;
pub mod content;
pub mod summary;
pub mod template;
pub mod toc;
pub mod verify;

pub use budget::{PageBudget, ReportPlan};

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::image_loader::LoadedImage;
use crate::style::{Color, TextStyle};
use crate::text::TextMeasure;

/// Where a link region jumps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkTarget {
    /// Physical page index of the destination.
    pub page: usize,
    /// Step the link points at, `None` for the fixed TOC rows.
    pub item: Option<usize>,
}

/// A single drawing operation. Coordinates are in points measured from the
/// top-left corner of the page; the PDF writer flips them.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// One line of text; `y` is the baseline.
    Text {
        x: f64,
        y: f64,
        text: String,
        style: TextStyle,
        color: Color,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
        color: Color,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<Color>,
        stroke: Option<Color>,
    },
    Image {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        image: LoadedImage,
    },
    /// Clickable region jumping to another page of the document.
    Link {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        target: LinkTarget,
    },
}

/// Page-addressed command list for one build.
#[derive(Debug, Default)]
pub struct DrawLog {
    commands: Vec<(usize, DrawCommand)>,
}

impl DrawLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, page: usize, command: DrawCommand) {
        self.commands.push((page, command));
    }

    pub fn iter(&self) -> impl Iterator<Item = &(usize, DrawCommand)> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All commands addressed to `page`, in recording order.
    pub fn commands_on(&self, page: usize) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(move |(p, _)| *p == page)
            .map(|(_, cmd)| cmd)
    }

    /// Group the log into `page_count` pages, keeping recording order
    /// within each page.
    pub fn into_pages(
        self,
        page_count: usize,
        width: f64,
        height: f64,
    ) -> Result<Vec<LayoutPage>, ReportError> {
        let mut pages: Vec<LayoutPage> = (0..page_count)
            .map(|_| LayoutPage {
                width,
                height,
                commands: Vec::new(),
            })
            .collect();
        for (page, command) in self.commands {
            let slot = pages.get_mut(page).ok_or_else(|| {
                ReportError::PaginationDrift(format!(
                    "command addressed to page {} of a {}-page document",
                    page, page_count
                ))
            })?;
            slot.commands.push(command);
        }
        Ok(pages)
    }
}

/// A fully laid-out page ready for PDF serialization.
#[derive(Debug, Clone)]
pub struct LayoutPage {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

/// The document sections, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Cover,
    Template,
    TableOfContents,
    Summary,
    Content,
}

/// Position of a section walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageCursor {
    pub page: usize,
    /// Next free vertical offset from the top of the page.
    pub y: f64,
    /// Items already placed on `page`; also the slot of the next one.
    pub items_on_page: usize,
}

impl PageCursor {
    pub fn new(page: usize, y: f64) -> Self {
        Self {
            page,
            y,
            items_on_page: 0,
        }
    }

    /// Move to `page`, starting at `top`.
    pub fn turn_to(&mut self, page: usize, top: f64) {
        self.page = page;
        self.y = top;
        self.items_on_page = 0;
    }
}

/// Where one row or item actually landed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPlacement {
    pub section: Section,
    /// Row index for the TOC (including the two fixed rows), step index for
    /// the summary and content, block index for the cover and template.
    pub item: usize,
    pub page: usize,
    /// Position among the section's items on `page`, from zero.
    pub slot: usize,
    pub top: f64,
    pub bottom: f64,
}

/// Walks the report sections and records their draw commands.
///
/// Each section lives in its own submodule as an `impl` block on this type.
pub struct SectionLayoutEngine<'a> {
    pub(crate) config: &'a ReportConfig,
    pub(crate) measure: &'a dyn TextMeasure,
    pub(crate) log: DrawLog,
    pub(crate) placements: Vec<ItemPlacement>,
}

impl<'a> SectionLayoutEngine<'a> {
    pub fn new(config: &'a ReportConfig, measure: &'a dyn TextMeasure) -> Self {
        Self {
            config,
            measure,
            log: DrawLog::new(),
            placements: Vec::new(),
        }
    }

    pub fn log(&self) -> &DrawLog {
        &self.log
    }

    pub fn placements(&self) -> &[ItemPlacement] {
        &self.placements
    }

    pub fn finish(self) -> (DrawLog, Vec<ItemPlacement>) {
        (self.log, self.placements)
    }

    fn left(&self) -> f64 {
        self.config.page.margin.left
    }

    fn right(&self) -> f64 {
        self.left() + self.content_width()
    }

    fn content_width(&self) -> f64 {
        self.config.page.content_width()
    }

    fn page_width(&self) -> f64 {
        self.config.page.size.dimensions().0
    }

    fn page_height(&self) -> f64 {
        self.config.page.size.dimensions().1
    }

    fn text(&mut self, page: usize, x: f64, y: f64, text: impl Into<String>, style: &TextStyle, color: Color) {
        self.log.push(
            page,
            DrawCommand::Text {
                x,
                y,
                text: text.into(),
                style: style.clone(),
                color,
            },
        );
    }

    /// Text whose right edge sits at `right`.
    fn text_right(&mut self, page: usize, right: f64, y: f64, text: &str, style: &TextStyle, color: Color) {
        let w = self.measure.measure_text(text, style);
        self.text(page, right - w, y, text, style, color);
    }

    /// Text centred on `center`.
    fn text_centered(&mut self, page: usize, center: f64, y: f64, text: &str, style: &TextStyle, color: Color) {
        let w = self.measure.measure_text(text, style);
        self.text(page, center - w / 2.0, y, text, style, color);
    }

    fn line(&mut self, page: usize, x1: f64, y1: f64, x2: f64, y2: f64, width: f64) {
        self.log.push(
            page,
            DrawCommand::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color: Color::BLACK,
            },
        );
    }

    fn link(&mut self, page: usize, x: f64, y: f64, width: f64, height: f64, target: LinkTarget) {
        self.log.push(
            page,
            DrawCommand::Link {
                x,
                y,
                width,
                height,
                target,
            },
        );
    }

    fn place(&mut self, section: Section, item: usize, page: usize, slot: usize, top: f64, bottom: f64) {
        self.placements.push(ItemPlacement {
            section,
            item,
            page,
            slot,
            top,
            bottom,
        });
    }
}
