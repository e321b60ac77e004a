//! Export backend — turns already-paginated content into a downloadable,
//! fixed-layout artifact.
#![allow(dead_code)]
//!
//! This is the terminal, impure stage of the pipeline. Implementations
//! receive pages the paginator has laid out and a page geometry; they never
//! re-flow content. Keeping the trait seam here lets pagination be exercised
//! without any rendering backend.

use anyhow::{anyhow, Result};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::render::metrics::{helvetica, PageGeometry};
use crate::render::paginate::{Page, PageBlock};

pub trait ExportBackend: Send + Sync {
    fn export(&self, pages: &[Page], geometry: &PageGeometry) -> Result<Vec<u8>>;
}

// ────────────────────────────────────────────────────────────────────────────
// PDF exporter
// ────────────────────────────────────────────────────────────────────────────

/// PDF exporter over the built-in Helvetica faces. Widths drawn here match
/// the metric table the paginator simulated with.
pub struct PdfExporter;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

impl ExportBackend for PdfExporter {
    fn export(&self, pages: &[Page], geometry: &PageGeometry) -> Result<Vec<u8>> {
        let (doc, first_page, first_layer) = PdfDocument::new(
            "Resume",
            Mm(geometry.page_width_mm),
            Mm(geometry.page_height_mm),
            "content",
        );

        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| anyhow!("failed to load Helvetica: {e}"))?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| anyhow!("failed to load Helvetica Bold: {e}"))?,
            oblique: doc
                .add_builtin_font(BuiltinFont::HelveticaOblique)
                .map_err(|e| anyhow!("failed to load Helvetica Oblique: {e}"))?,
        };

        for (i, page) in pages.iter().enumerate() {
            let (page_idx, layer_idx) = if i == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(
                    Mm(geometry.page_width_mm),
                    Mm(geometry.page_height_mm),
                    "content",
                )
            };
            let layer = doc.get_page(page_idx).get_layer(layer_idx);
            draw_page(&layer, page, geometry, &fonts);
        }

        doc.save_to_bytes()
            .map_err(|e| anyhow!("failed to serialize PDF: {e}"))
    }
}

fn draw_page(layer: &PdfLayerReference, page: &Page, geometry: &PageGeometry, fonts: &Fonts) {
    let metrics = helvetica();
    let body_size = geometry.font_size_pt as f32;
    let width_em = geometry.text_width_em();
    let left_x = geometry.margin_mm;
    let right_edge = geometry.page_width_mm - geometry.margin_mm;
    let line_mm = geometry.line_height_mm();

    // Cursor starts one line below the top margin and walks down the page.
    let mut y = geometry.page_height_mm - geometry.margin_mm - line_mm;

    for block in &page.blocks {
        match block {
            PageBlock::Name(name) => {
                let size = body_size * 1.8;
                let name_mm = geometry.em_to_mm(metrics.measure_str(name)) * 1.8;
                let x = left_x + (right_edge - left_x - name_mm).max(0.0) / 2.0;
                layer.use_text(name.clone(), size, Mm(x), Mm(y), &fonts.bold);
                y -= 2.0 * line_mm;
            }
            PageBlock::Contact(contact) => {
                let contact_mm = geometry.em_to_mm(metrics.measure_str(contact));
                let x = left_x + (right_edge - left_x - contact_mm).max(0.0) / 2.0;
                layer.use_text(contact.clone(), body_size, Mm(x), Mm(y), &fonts.regular);
                y -= line_mm;
            }
            PageBlock::SectionTitle(title) => {
                layer.use_text(
                    title.to_uppercase(),
                    body_size,
                    Mm(left_x),
                    Mm(y),
                    &fonts.bold,
                );
                y -= 2.0 * line_mm;
            }
            PageBlock::SplitRow {
                left,
                right,
                strong,
            } => {
                let font = if *strong { &fonts.bold } else { &fonts.oblique };
                layer.use_text(left.clone(), body_size, Mm(left_x), Mm(y), font);
                let right_mm = geometry.em_to_mm(metrics.measure_str(right));
                layer.use_text(
                    right.clone(),
                    body_size,
                    Mm((right_edge - right_mm).max(left_x)),
                    Mm(y),
                    font,
                );
                y -= line_mm;
            }
            PageBlock::Bullet(text) => {
                let indent = geometry.em_to_mm(2.0);
                for (j, line) in metrics.wrap(text, width_em - 2.0).iter().enumerate() {
                    if j == 0 {
                        layer.use_text("-", body_size, Mm(left_x), Mm(y), &fonts.regular);
                    }
                    layer.use_text(
                        line.clone(),
                        body_size,
                        Mm(left_x + indent),
                        Mm(y),
                        &fonts.regular,
                    );
                    y -= line_mm;
                }
            }
            PageBlock::LabeledRow { label, value } => {
                let text = format!("{label}: {value}");
                for line in metrics.wrap(&text, width_em) {
                    layer.use_text(line, body_size, Mm(left_x), Mm(y), &fonts.regular);
                    y -= line_mm;
                }
            }
            PageBlock::Gap => {
                y -= line_mm;
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
