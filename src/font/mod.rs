//! # Font Management
//!
//! The report is typeset entirely in the standard PDF fonts (Helvetica,
//! Times, Courier), which need no embedding. Measurement uses their AFM
//! advance widths so that wrapping and right-alignment match what a PDF
//! viewer draws.

pub mod metrics;

pub use metrics::StandardFontMetrics;
use std::collections::HashMap;

/// A font registry that maps font family + weight + style to a standard font.
pub struct FontRegistry {
    fonts: HashMap<FontKey, StandardFont>,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct FontKey {
    pub family: String,
    pub weight: u32,
    pub italic: bool,
}

impl FontKey {
    /// Key with the weight snapped to regular (400) or bold (700).
    pub fn snapped(family: &str, weight: u32, italic: bool) -> Self {
        Self {
            family: family.to_string(),
            weight: if weight >= 600 { 700 } else { 400 },
            italic,
        }
    }
}

/// The standard PDF fonts the report can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl StandardFont {
    /// The PDF name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::HelveticaOblique => "Helvetica-Oblique",
            Self::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Self::TimesRoman => "Times-Roman",
            Self::TimesBold => "Times-Bold",
            Self::TimesItalic => "Times-Italic",
            Self::TimesBoldItalic => "Times-BoldItalic",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
            Self::CourierOblique => "Courier-Oblique",
            Self::CourierBoldOblique => "Courier-BoldOblique",
        }
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRegistry {
    pub fn new() -> Self {
        let mut fonts = HashMap::new();

        let standard_mappings = vec![
            (("Helvetica", 400, false), StandardFont::Helvetica),
            (("Helvetica", 700, false), StandardFont::HelveticaBold),
            (("Helvetica", 400, true), StandardFont::HelveticaOblique),
            (("Helvetica", 700, true), StandardFont::HelveticaBoldOblique),
            (("Times", 400, false), StandardFont::TimesRoman),
            (("Times", 700, false), StandardFont::TimesBold),
            (("Times", 400, true), StandardFont::TimesItalic),
            (("Times", 700, true), StandardFont::TimesBoldItalic),
            (("Courier", 400, false), StandardFont::Courier),
            (("Courier", 700, false), StandardFont::CourierBold),
            (("Courier", 400, true), StandardFont::CourierOblique),
            (("Courier", 700, true), StandardFont::CourierBoldOblique),
        ];

        for ((family, weight, italic), font) in standard_mappings {
            fonts.insert(
                FontKey {
                    family: family.to_string(),
                    weight,
                    italic,
                },
                font,
            );
        }

        Self { fonts }
    }

    /// Look up a font, falling back to Helvetica with the same weight/style.
    pub fn resolve(&self, family: &str, weight: u32, italic: bool) -> StandardFont {
        let key = FontKey::snapped(family, weight, italic);
        if let Some(font) = self.fonts.get(&key) {
            return *font;
        }

        match (key.weight >= 700, italic) {
            (false, false) => StandardFont::Helvetica,
            (true, false) => StandardFont::HelveticaBold,
            (false, true) => StandardFont::HelveticaOblique,
            (true, true) => StandardFont::HelveticaBoldOblique,
        }
    }
}

/// Shared font context used by layout and PDF serialization.
pub struct FontContext {
    registry: FontRegistry,
}

impl Default for FontContext {
    fn default() -> Self {
        Self::new()
    }
}

impl FontContext {
    pub fn new() -> Self {
        Self {
            registry: FontRegistry::new(),
        }
    }

    /// Get the advance width of a single character in points.
    pub fn char_width(
        &self,
        ch: char,
        family: &str,
        weight: u32,
        italic: bool,
        font_size: f64,
    ) -> f64 {
        self.registry
            .resolve(family, weight, italic)
            .metrics()
            .char_width(ch, font_size)
    }

    /// Measure the width of a string in points.
    pub fn measure_string(
        &self,
        text: &str,
        family: &str,
        weight: u32,
        italic: bool,
        font_size: f64,
    ) -> f64 {
        self.registry
            .resolve(family, weight, italic)
            .metrics()
            .measure_string(text, font_size, 0.0)
    }

    /// Resolve a font selection to the standard font that will be drawn.
    pub fn resolve(&self, family: &str, weight: u32, italic: bool) -> StandardFont {
        self.registry.resolve(family, weight, italic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_context_helvetica() {
        let ctx = FontContext::new();
        let w = ctx.char_width(' ', "Helvetica", 400, false, 12.0);
        assert!((w - 3.336).abs() < 0.001);
    }

    #[test]
    fn test_font_context_bold_wider() {
        let ctx = FontContext::new();
        let regular = ctx.char_width('b', "Helvetica", 400, false, 12.0);
        let bold = ctx.char_width('b', "Helvetica", 700, false, 12.0);
        assert!(bold > regular, "Bold b should be wider than regular b");
    }

    #[test]
    fn test_font_context_measure_string() {
        let ctx = FontContext::new();
        let w = ctx.measure_string("Hello", "Times", 400, true, 12.0);
        assert!(w > 0.0);
    }

    #[test]
    fn test_font_context_fallback() {
        let ctx = FontContext::new();
        let w1 = ctx.char_width('A', "Helvetica", 400, false, 12.0);
        let w2 = ctx.char_width('A', "UnknownFont", 400, false, 12.0);
        assert!((w1 - w2).abs() < 0.001);
        assert_eq!(
            ctx.resolve("UnknownFont", 700, true),
            StandardFont::HelveticaBoldOblique
        );
    }

    #[test]
    fn test_font_context_weight_resolution() {
        let ctx = FontContext::new();
        assert_eq!(ctx.resolve("Times", 800, false), StandardFont::TimesBold);
        assert_eq!(ctx.resolve("Times", 500, true), StandardFont::TimesItalic);
    }

    #[test]
    fn test_pdf_names() {
        assert_eq!(StandardFont::TimesBoldItalic.pdf_name(), "Times-BoldItalic");
        assert_eq!(StandardFont::HelveticaBold.pdf_name(), "Helvetica-Bold");
    }
}
