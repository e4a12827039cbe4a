//! # Text Layout
//!
//! Line breaking and text measurement against the standard font metrics.
//!
//! Breaking is greedy over UAX#14 break opportunities: mandatory breaks
//! (embedded newlines) always end a line, allowed breaks are taken at the
//! last opportunity that still fits, and a word wider than the whole line
//! is split at the character that overflows.

use crate::font::FontContext;
use crate::style::TextStyle;
use unicode_linebreak::{linebreaks, BreakOpportunity};

/// A line of text after line-breaking.
#[derive(Debug, Clone)]
pub struct BrokenLine {
    /// The text on this line, trailing spaces removed.
    pub text: String,
    /// Total width of the line, trailing spaces excluded.
    pub width: f64,
}

/// Compute UAX#14 break opportunities indexed by char position.
///
/// Returns a vec of length `text.chars().count()`. Each entry is the break
/// opportunity *before* that character position (i.e. "can we break before
/// char[i]?"). Index 0 is always `None` (no break before the first char).
fn compute_break_opportunities(text: &str) -> Vec<Option<BreakOpportunity>> {
    let char_count = text.chars().count();
    let mut result = vec![None; char_count];

    // linebreaks() yields (byte_offset, opportunity) where byte_offset is the
    // position AFTER the break, i.e. the start of the next segment.
    let byte_to_char: Vec<usize> = {
        let mut map = vec![0usize; text.len() + 1];
        let mut char_idx = 0;
        for (byte_idx, _) in text.char_indices() {
            map[byte_idx] = char_idx;
            char_idx += 1;
        }
        map[text.len()] = char_idx;
        map
    };

    for (byte_offset, opp) in linebreaks(text) {
        let char_idx = byte_to_char[byte_offset];
        if char_idx < char_count {
            result[char_idx] = Some(opp);
        }
        // byte_offset == text.len() means "break at end", ignored
    }

    result
}

fn is_newline(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

pub struct TextLayout;

impl Default for TextLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayout {
    pub fn new() -> Self {
        Self
    }

    /// Break a string into lines that fit within `max_width`.
    ///
    /// Always returns at least one line; the empty string yields one empty line.
    pub fn break_into_lines(
        &self,
        font_context: &FontContext,
        text: &str,
        max_width: f64,
        style: &TextStyle,
    ) -> Vec<BrokenLine> {
        if text.is_empty() {
            return vec![BrokenLine {
                text: String::new(),
                width: 0.0,
            }];
        }

        let chars: Vec<char> = text.chars().collect();
        let char_widths = self.measure_chars(font_context, &chars, style);
        let break_opps = compute_break_opportunities(text);

        let mut lines = Vec::new();
        let mut line_start = 0;
        let mut line_width = 0.0;
        let mut last_break_point: Option<usize> = None;

        for (i, &ch) in chars.iter().enumerate() {
            let char_width = char_widths[i];

            // A break *before* char[i] means the previous line may end at char[i-1].
            if i > 0 {
                match break_opps[i] {
                    Some(BreakOpportunity::Mandatory) => {
                        lines.push(self.make_line(&chars[line_start..i], &char_widths[line_start..i]));
                        line_start = i;
                        line_width = 0.0;
                        last_break_point = None;
                    }
                    Some(BreakOpportunity::Allowed) => {
                        last_break_point = Some(i - 1);
                    }
                    None => {}
                }
            }

            if is_newline(ch) {
                continue;
            }

            if line_width + char_width > max_width && line_start < i {
                if let Some(bp) = last_break_point {
                    if bp >= line_start {
                        let break_at = bp + 1;
                        lines.push(self.make_line(
                            &chars[line_start..break_at],
                            &char_widths[line_start..break_at],
                        ));
                        line_start = break_at;
                        line_width = chars[line_start..=i]
                            .iter()
                            .zip(char_widths[line_start..=i].iter())
                            .filter(|(c, _)| !is_newline(**c))
                            .map(|(_, w)| w)
                            .sum();
                        last_break_point = None;
                        continue;
                    }
                }

                // No break opportunity on this line: split the word here.
                lines.push(self.make_line(&chars[line_start..i], &char_widths[line_start..i]));
                line_start = i;
                line_width = char_width;
                last_break_point = None;
                continue;
            }

            line_width += char_width;
        }

        if line_start < chars.len() {
            lines.push(self.make_line(&chars[line_start..], &char_widths[line_start..]));
        }

        lines
    }

    /// Build a line from characters and their widths, dropping line
    /// terminators and trailing spaces.
    fn make_line(&self, chars: &[char], widths: &[f64]) -> BrokenLine {
        let mut kept: Vec<(char, f64)> = chars
            .iter()
            .zip(widths.iter())
            .filter(|(c, _)| !is_newline(**c))
            .map(|(c, w)| (*c, *w))
            .collect();
        while matches!(kept.last(), Some((' ', _))) {
            kept.pop();
        }

        BrokenLine {
            text: kept.iter().map(|(c, _)| *c).collect(),
            width: kept.iter().map(|(_, w)| *w).sum(),
        }
    }

    /// Measure the width of a string on a single line.
    pub fn measure_width(&self, font_context: &FontContext, text: &str, style: &TextStyle) -> f64 {
        font_context.measure_string(text, &style.family, style.weight, style.italic, style.size)
    }

    fn measure_chars(&self, font_context: &FontContext, chars: &[char], style: &TextStyle) -> Vec<f64> {
        chars
            .iter()
            .map(|&ch| {
                font_context.char_width(ch, &style.family, style.weight, style.italic, style.size)
            })
            .collect()
    }
}

const ELLIPSIS: &str = "...";

/// Text measurement as the section layout sees it.
pub trait TextMeasure {
    /// Width of `text` set on a single line.
    fn measure_text(&self, text: &str, style: &TextStyle) -> f64;

    /// Wrap `text` to `max_width`, honoring embedded line breaks.
    fn wrap_text(&self, text: &str, max_width: f64, style: &TextStyle) -> Vec<String>;

    /// Number of lines `text` occupies once wrapped. Empty text takes none.
    fn line_count(&self, text: &str, max_width: f64, style: &TextStyle) -> usize {
        if text.is_empty() {
            0
        } else {
            self.wrap_text(text, max_width, style).len()
        }
    }
}

/// [`TextMeasure`] backed by the standard font metrics.
#[derive(Default)]
pub struct TextMeasurer {
    fonts: FontContext,
    layout: TextLayout,
}

impl TextMeasurer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fonts(&self) -> &FontContext {
        &self.fonts
    }
}

impl TextMeasure for TextMeasurer {
    fn measure_text(&self, text: &str, style: &TextStyle) -> f64 {
        self.layout.measure_width(&self.fonts, text, style)
    }

    fn wrap_text(&self, text: &str, max_width: f64, style: &TextStyle) -> Vec<String> {
        self.layout
            .break_into_lines(&self.fonts, text, max_width, style)
            .into_iter()
            .map(|line| line.text)
            .collect()
    }
}

/// Shorten `text` with a trailing "..." until it fits `max_width`.
/// Returns the text unchanged when it already fits.
///
/// Advance widths are additive, so each character is measured once and the
/// cut point is the longest prefix whose running width leaves room for the
/// ellipsis.
pub fn fit_to_width(measure: &dyn TextMeasure, text: &str, max_width: f64, style: &TextStyle) -> String {
    if measure.measure_text(text, style) <= max_width {
        return text.to_string();
    }
    let room = max_width - measure.measure_text(ELLIPSIS, style);
    if room < 0.0 {
        return String::new();
    }

    let mut buf = [0u8; 4];
    let mut used = 0.0;
    let mut cut = 0;
    for (idx, ch) in text.char_indices() {
        used += measure.measure_text(ch.encode_utf8(&mut buf), style);
        if used > room {
            break;
        }
        cut = idx + ch.len_utf8();
    }
    format!("{}{}", text[..cut].trim_end(), ELLIPSIS)
}
