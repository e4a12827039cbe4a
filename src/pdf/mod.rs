//! # PDF Serializer
//!
//! Takes the laid-out pages and writes a valid PDF file.
//!
//! This is a from-scratch PDF 1.7 writer. The report only needs the
//! standard Type1 fonts, image XObjects and internal link annotations, a
//! subset of the format that is small enough to write by hand.
//!
//! ## PDF Structure (simplified)
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- objects (fonts, pages, content streams, etc.)
//! 2 0 obj ... endobj
//! ...
//! xref                <- cross-reference table (byte offsets of each object)
//! trailer             <- points to the root object
//! %%EOF
//! ```
//!
//! ## Forward Links
//!
//! The table of contents links to pages that come after it. Page object IDs
//! are therefore reserved for every page before any page is written, so a
//! `/Link` annotation can name its destination page object up front.

use std::collections::HashMap;
use std::fmt::Write as FmtWrite; // for write! on String
use std::io::Write as IoWrite; // for write! on Vec<u8>

use crate::error::ReportError;
use crate::font::{FontContext, FontKey, StandardFont};
use crate::image_loader::{ImagePixelData, JpegColorSpace, LoadedImage};
use crate::layout::{DrawCommand, LayoutPage, LinkTarget};
use crate::model::ReportMeta;
use crate::style::TextStyle;
use miniz_oxide::deflate::compress_to_vec_zlib;

#[derive(Default)]
pub struct PdfWriter;

/// Tracks allocated PDF objects during writing.
struct PdfBuilder {
    objects: Vec<PdfObject>,
    /// Standard fonts in resource order (/F0, /F1, ...) with their object IDs.
    font_objects: Vec<(StandardFont, usize)>,
    /// XObject IDs for images, indexed as /Im0, /Im1, ...
    image_objects: Vec<usize>,
    /// Maps (page_index, image position within the page) to /ImN.
    image_index_map: HashMap<(usize, usize), usize>,
}

struct PdfObject {
    data: Vec<u8>,
}

impl PdfBuilder {
    fn reserve(&mut self) -> usize {
        self.objects.push(PdfObject { data: Vec::new() });
        self.objects.len() - 1
    }

    fn push(&mut self, data: Vec<u8>) -> usize {
        self.objects.push(PdfObject { data });
        self.objects.len() - 1
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write laid-out pages to a PDF byte vector.
    pub fn write(&self, pages: &[LayoutPage], meta: &ReportMeta, font_context: &FontContext) -> Result<Vec<u8>, ReportError> {
        let mut builder = PdfBuilder {
            objects: Vec::new(),
            font_objects: Vec::new(),
            image_objects: Vec::new(),
            image_index_map: HashMap::new(),
        };

        // Reserve object IDs:
        // 0 = placeholder (PDF objects are 1-indexed)
        // 1 = Catalog
        // 2 = Pages (page tree root)
        // 3+ = fonts, images, page objects, then content streams and annotations
        builder.reserve();
        builder.reserve();
        builder.reserve();

        self.register_fonts(&mut builder, pages, font_context);
        self.register_images(&mut builder, pages);

        let page_obj_ids: Vec<usize> = pages.iter().map(|_| builder.reserve()).collect();

        for (page_idx, page) in pages.iter().enumerate() {
            let content = self.build_content_stream(page, page_idx, &builder, font_context);
            let compressed = compress_to_vec_zlib(content.as_bytes(), 6);

            let mut content_data: Vec<u8> = Vec::new();
            let _ = write!(
                content_data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            content_data.extend_from_slice(&compressed);
            content_data.extend_from_slice(b"\nendstream");
            let content_obj_id = builder.push(content_data);

            let mut annot_ids = Vec::new();
            for command in &page.commands {
                if let DrawCommand::Link {
                    x,
                    y,
                    width,
                    height,
                    target,
                } = command
                {
                    let dest = Self::link_destination(target, &page_obj_ids)?;
                    let annot = format!(
                        "<< /Type /Annot /Subtype /Link /Rect [{:.2} {:.2} {:.2} {:.2}] \
                         /Border [0 0 0] /Dest [{} 0 R /XYZ null null null] >>",
                        x,
                        page.height - y - height,
                        x + width,
                        page.height - y,
                        dest
                    );
                    annot_ids.push(builder.push(annot.into_bytes()));
                }
            }

            let font_resources = self.build_font_resource_dict(&builder.font_objects);
            let xobject_resources = self.build_xobject_resource_dict(page_idx, &builder);
            let resources = if xobject_resources.is_empty() {
                format!("/Font << {} >>", font_resources)
            } else {
                format!("/Font << {} >> /XObject << {} >>", font_resources, xobject_resources)
            };
            let annots = if annot_ids.is_empty() {
                String::new()
            } else {
                let refs: Vec<String> = annot_ids.iter().map(|id| format!("{} 0 R", id)).collect();
                format!(" /Annots [{}]", refs.join(" "))
            };
            let page_dict = format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Contents {} 0 R /Resources << {} >>{} >>",
                page.width, page.height, content_obj_id, resources, annots
            );
            builder.objects[page_obj_ids[page_idx]].data = page_dict.into_bytes();
        }

        // Write Catalog (object 1)
        builder.objects[1].data = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();

        // Write Pages tree (object 2)
        let kids: String = page_obj_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        builder.objects[2].data = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids,
            page_obj_ids.len()
        )
        .into_bytes();

        // Info dictionary (metadata)
        let mut info = String::from("<< ");
        for (key, value) in [
            ("Title", &meta.title),
            ("Author", &meta.author),
            ("Subject", &meta.subtitle),
            ("Creator", &meta.tool),
        ] {
            if !value.is_empty() {
                let _ = write!(info, "/{} ({}) ", key, Self::encode_text(value));
            }
        }
        let _ = write!(info, "/Producer (stepreport {}) >>", env!("CARGO_PKG_VERSION"));
        let info_obj_id = builder.push(info.into_bytes());

        Ok(self.serialize(&builder, info_obj_id))
    }

    fn link_destination(target: &LinkTarget, page_obj_ids: &[usize]) -> Result<usize, ReportError> {
        page_obj_ids.get(target.page).copied().ok_or_else(|| {
            ReportError::SerializationFailure(format!(
                "link targets page {} but the document has {} pages",
                target.page,
                page_obj_ids.len()
            ))
        })
    }

    /// Build the PDF content stream for a single page.
    fn build_content_stream(
        &self,
        page: &LayoutPage,
        page_idx: usize,
        builder: &PdfBuilder,
        font_context: &FontContext,
    ) -> String {
        let mut stream = String::new();
        let page_height = page.height;
        let mut image_counter = 0usize;

        for command in &page.commands {
            match command {
                DrawCommand::Text {
                    x,
                    y,
                    text,
                    style,
                    color,
                } => {
                    let font_idx = self.font_index(style, &builder.font_objects, font_context);
                    let _ = write!(
                        stream,
                        "BT\n{:.3} {:.3} {:.3} rg\n/F{} {:.1} Tf\n{:.2} {:.2} Td\n({}) Tj\nET\n",
                        color.r,
                        color.g,
                        color.b,
                        font_idx,
                        style.size,
                        x,
                        page_height - y,
                        Self::encode_text(text)
                    );
                }

                DrawCommand::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    width,
                    color,
                } => {
                    let _ = write!(
                        stream,
                        "q\n{:.3} {:.3} {:.3} RG\n{:.2} w\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\nQ\n",
                        color.r,
                        color.g,
                        color.b,
                        width,
                        x1,
                        page_height - y1,
                        x2,
                        page_height - y2
                    );
                }

                DrawCommand::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                    stroke,
                } => {
                    let pdf_y = page_height - y - height;
                    if let Some(bg) = fill {
                        let _ = write!(
                            stream,
                            "q\n{:.3} {:.3} {:.3} rg\n{:.2} {:.2} {:.2} {:.2} re\nf\nQ\n",
                            bg.r, bg.g, bg.b, x, pdf_y, width, height
                        );
                    }
                    if let Some(bc) = stroke {
                        let _ = write!(
                            stream,
                            "q\n{:.3} {:.3} {:.3} RG\n0.5 w\n{:.2} {:.2} {:.2} {:.2} re\nS\nQ\n",
                            bc.r, bc.g, bc.b, x, pdf_y, width, height
                        );
                    }
                }

                DrawCommand::Image {
                    x,
                    y,
                    width,
                    height,
                    ..
                } => {
                    let pdf_y = page_height - y - height;
                    if let Some(&img_idx) = builder.image_index_map.get(&(page_idx, image_counter)) {
                        let _ = write!(
                            stream,
                            "q\n{:.4} 0 0 {:.4} {:.2} {:.2} cm\n/Im{} Do\nQ\n",
                            width, height, x, pdf_y, img_idx
                        );
                    }
                    image_counter += 1;
                }

                // Annotations live in the page dictionary, not the stream.
                DrawCommand::Link { .. } => {}
            }
        }

        stream
    }

    /// Register the standard fonts used across all pages. Several font
    /// selections can resolve to one standard font; each gets one object.
    fn register_fonts(&self, builder: &mut PdfBuilder, pages: &[LayoutPage], font_context: &FontContext) {
        let mut fonts: Vec<StandardFont> = pages
            .iter()
            .flat_map(|page| page.commands.iter())
            .filter_map(|command| match command {
                DrawCommand::Text { style, .. } => {
                    let key = FontKey::snapped(&style.family, style.weight, style.italic);
                    Some(font_context.resolve(&key.family, key.weight, key.italic))
                }
                _ => None,
            })
            .collect();

        // Sort for deterministic ordering, then dedup
        fonts.sort();
        fonts.dedup();

        // Always have at least Helvetica
        if fonts.is_empty() {
            fonts.push(StandardFont::Helvetica);
        }

        for font in fonts {
            let font_dict = format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} \
                 /Encoding /WinAnsiEncoding >>",
                font.pdf_name()
            );
            let obj_id = builder.push(font_dict.into_bytes());
            builder.font_objects.push((font, obj_id));
        }
    }

    /// Walk all pages, create XObject PDF objects for each image,
    /// and populate the image_index_map for content stream reference.
    fn register_images(&self, builder: &mut PdfBuilder, pages: &[LayoutPage]) {
        for (page_idx, page) in pages.iter().enumerate() {
            let images = page.commands.iter().filter_map(|command| match command {
                DrawCommand::Image { image, .. } => Some(image),
                _ => None,
            });
            for (position, image) in images.enumerate() {
                let img_idx = builder.image_objects.len();
                let xobj_id = Self::write_image_xobject(builder, image);
                builder.image_objects.push(xobj_id);
                builder.image_index_map.insert((page_idx, position), img_idx);
            }
        }
    }

    /// Write a single image as one or two XObject PDF objects.
    /// Returns the main XObject ID.
    fn write_image_xobject(builder: &mut PdfBuilder, image: &LoadedImage) -> usize {
        match &image.pixel_data {
            ImagePixelData::Jpeg { data, color_space } => {
                let color_space_str = match color_space {
                    JpegColorSpace::DeviceRGB => "/DeviceRGB",
                    JpegColorSpace::DeviceGray => "/DeviceGray",
                };

                let mut obj_data: Vec<u8> = Vec::new();
                let _ = write!(
                    obj_data,
                    "<< /Type /XObject /Subtype /Image \
                     /Width {} /Height {} \
                     /ColorSpace {} \
                     /BitsPerComponent 8 \
                     /Filter /DCTDecode \
                     /Length {} >>\nstream\n",
                    image.width_px,
                    image.height_px,
                    color_space_str,
                    data.len()
                );
                obj_data.extend_from_slice(data);
                obj_data.extend_from_slice(b"\nendstream");
                builder.push(obj_data)
            }

            ImagePixelData::Decoded { rgb, alpha } => {
                // Write SMask first if alpha channel exists
                let smask_id = alpha.as_ref().map(|alpha_data| {
                    let compressed_alpha = compress_to_vec_zlib(alpha_data, 6);
                    let mut smask_data: Vec<u8> = Vec::new();
                    let _ = write!(
                        smask_data,
                        "<< /Type /XObject /Subtype /Image \
                         /Width {} /Height {} \
                         /ColorSpace /DeviceGray \
                         /BitsPerComponent 8 \
                         /Filter /FlateDecode \
                         /Length {} >>\nstream\n",
                        image.width_px,
                        image.height_px,
                        compressed_alpha.len()
                    );
                    smask_data.extend_from_slice(&compressed_alpha);
                    smask_data.extend_from_slice(b"\nendstream");
                    builder.push(smask_data)
                });

                let compressed_rgb = compress_to_vec_zlib(rgb, 6);
                let smask_ref = smask_id
                    .map(|id| format!(" /SMask {} 0 R", id))
                    .unwrap_or_default();

                let mut obj_data: Vec<u8> = Vec::new();
                let _ = write!(
                    obj_data,
                    "<< /Type /XObject /Subtype /Image \
                     /Width {} /Height {} \
                     /ColorSpace /DeviceRGB \
                     /BitsPerComponent 8 \
                     /Filter /FlateDecode \
                     /Length {}{} >>\nstream\n",
                    image.width_px,
                    image.height_px,
                    compressed_rgb.len(),
                    smask_ref
                );
                obj_data.extend_from_slice(&compressed_rgb);
                obj_data.extend_from_slice(b"\nendstream");
                builder.push(obj_data)
            }
        }
    }

    /// Build the /XObject resource dict entries for a specific page.
    fn build_xobject_resource_dict(&self, page_idx: usize, builder: &PdfBuilder) -> String {
        let mut entries: Vec<(usize, usize)> = builder
            .image_index_map
            .iter()
            .filter(|((pidx, _), _)| *pidx == page_idx)
            .map(|(_, &img_idx)| (img_idx, builder.image_objects[img_idx]))
            .collect();
        entries.sort_by_key(|(idx, _)| *idx);
        entries
            .iter()
            .map(|(idx, obj_id)| format!("/Im{} {} 0 R", idx, obj_id))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn build_font_resource_dict(&self, font_objects: &[(StandardFont, usize)]) -> String {
        font_objects
            .iter()
            .enumerate()
            .map(|(i, (_, obj_id))| format!("/F{} {} 0 R", i, obj_id))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Look up the font index (/F0, /F1, etc.) for a text style.
    fn font_index(&self, style: &TextStyle, font_objects: &[(StandardFont, usize)], font_context: &FontContext) -> usize {
        let font = font_context.resolve(&style.family, style.weight, style.italic);
        font_objects
            .iter()
            .position(|(f, _)| *f == font)
            .unwrap_or(0)
    }

    /// Encode text as the body of a literal string in WinAnsiEncoding.
    /// Characters the encoding lacks become '?'.
    fn encode_text(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for ch in s.chars() {
            let b = Self::unicode_to_winansi(ch).unwrap_or(b'?');
            match b {
                b'\\' => out.push_str("\\\\"),
                b'(' => out.push_str("\\("),
                b')' => out.push_str("\\)"),
                0x20..=0x7E => out.push(b as char),
                _ => {
                    // Octal escape for bytes outside ASCII printable range
                    let _ = write!(out, "\\{:03o}", b);
                }
            }
        }
        out
    }

    /// Map a Unicode codepoint to a WinAnsiEncoding byte value.
    ///
    /// WinAnsiEncoding is based on Windows-1252. Most codepoints in
    /// 0x20..=0x7E and 0xA0..=0xFF map directly. The 0x80..=0x9F range
    /// contains special mappings for smart quotes, bullets, dashes, etc.
    fn unicode_to_winansi(ch: char) -> Option<u8> {
        let cp = ch as u32;
        if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
            return Some(cp as u8);
        }
        match cp {
            0x20AC => Some(0x80), // Euro sign
            0x201A => Some(0x82), // Single low-9 quotation mark
            0x0192 => Some(0x83), // Latin small letter f with hook
            0x201E => Some(0x84), // Double low-9 quotation mark
            0x2026 => Some(0x85), // Horizontal ellipsis
            0x2020 => Some(0x86), // Dagger
            0x2021 => Some(0x87), // Double dagger
            0x02C6 => Some(0x88), // Modifier letter circumflex accent
            0x2030 => Some(0x89), // Per mille sign
            0x0160 => Some(0x8A), // Latin capital letter S with caron
            0x2039 => Some(0x8B), // Single left-pointing angle quotation
            0x0152 => Some(0x8C), // Latin capital ligature OE
            0x017D => Some(0x8E), // Latin capital letter Z with caron
            0x2018 => Some(0x91), // Left single quotation mark
            0x2019 => Some(0x92), // Right single quotation mark
            0x201C => Some(0x93), // Left double quotation mark
            0x201D => Some(0x94), // Right double quotation mark
            0x2022 => Some(0x95), // Bullet
            0x2013 => Some(0x96), // En dash
            0x2014 => Some(0x97), // Em dash
            0x02DC => Some(0x98), // Small tilde
            0x2122 => Some(0x99), // Trade mark sign
            0x0161 => Some(0x9A), // Latin small letter s with caron
            0x203A => Some(0x9B), // Single right-pointing angle quotation
            0x0153 => Some(0x9C), // Latin small ligature oe
            0x017E => Some(0x9E), // Latin small letter z with caron
            0x0178 => Some(0x9F), // Latin capital letter Y with diaeresis
            _ => None,
        }
    }

    /// Serialize all objects into the final PDF byte stream.
    fn serialize(&self, builder: &PdfBuilder, info_obj_id: usize) -> Vec<u8> {
        let mut output: Vec<u8> = Vec::new();
        let mut offsets: Vec<usize> = vec![0; builder.objects.len()];

        // Header
        output.extend_from_slice(b"%PDF-1.7\n");
        output.extend_from_slice(b"%\xe2\xe3\xcf\xd3\n");

        for (i, obj) in builder.objects.iter().enumerate().skip(1) {
            offsets[i] = output.len();
            let header = format!("{} 0 obj\n", i);
            output.extend_from_slice(header.as_bytes());
            output.extend_from_slice(&obj.data);
            output.extend_from_slice(b"\nendobj\n\n");
        }

        let xref_offset = output.len();
        let _ = write!(output, "xref\n0 {}\n", builder.objects.len());
        let _ = write!(output, "0000000000 65535 f \n");
        for offset in offsets.iter().skip(1) {
            let _ = write!(output, "{:010} 00000 n \n", offset);
        }

        let _ = write!(
            output,
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            builder.objects.len(),
            info_obj_id,
            xref_offset
        );

        output
    }
}
