//! Static font metrics and page geometry for pagination and export.
#![allow(dead_code)]
//!
//! Character widths are in em units (relative to font size) and cover ASCII
//! 0x20..=0x7E, index = (char as usize) - 32. The table is the standard
//! Helvetica AFM widths (/1000), matching the built-in face used by the PDF
//! exporter, so simulated line counts track the exported layout closely.
//! Non-ASCII characters fall back to an average width; the residual error is
//! at the scale of a character or two per line, which whole-entry pagination
//! tolerates.

use serde::{Deserialize, Serialize};

const PT_PER_MM: f32 = 72.0 / 25.4;

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

/// Physical page parameters. Defaults model the print target of the preview:
/// A4 paper with 20 mm margins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub font_size_pt: u8,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
}

/// A4 geometry with the given margin and body font size.
pub fn a4_geometry(margin_mm: f32, font_size_pt: u8) -> PageGeometry {
    PageGeometry {
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        margin_mm,
        font_size_pt,
        line_height: 1.35,
    }
}

impl PageGeometry {
    /// Usable text width in em units at the configured font size.
    pub fn text_width_em(&self) -> f32 {
        (self.page_width_mm - 2.0 * self.margin_mm) * PT_PER_MM / self.font_size_pt as f32
    }

    /// Line slots available on one page.
    pub fn lines_per_page(&self) -> u16 {
        let usable_pt = (self.page_height_mm - 2.0 * self.margin_mm) * PT_PER_MM;
        (usable_pt / self.line_height_pt()).floor() as u16
    }

    pub fn line_height_pt(&self) -> f32 {
        self.font_size_pt as f32 * self.line_height
    }

    pub fn line_height_mm(&self) -> f32 {
        self.line_height_pt() / PT_PER_MM
    }

    /// Converts a width measured in em units to millimeters.
    pub fn em_to_mm(&self, em: f32) -> f32 {
        em * self.font_size_pt as f32 / PT_PER_MM
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

pub struct FontMetricTable {
    widths: [f32; 95],
    /// Fallback for codepoints outside 0x20..=0x7E.
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Greedy word-wrap at `max_width_em`. Returns the printed lines; a blank
    /// string yields a single empty line so callers can still account for it.
    pub fn wrap(&self, text: &str, max_width_em: f32) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return vec![String::new()];
        }

        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in words {
            let word_width = self.measure_str(word);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + self.space_width + word_width > max_width_em {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += self.space_width + word_width;
            }
        }
        lines.push(current);
        lines
    }

    /// Printed line count of `text` when wrapped at `max_width_em`.
    pub fn estimated_lines(&self, text: &str, max_width_em: f32) -> u16 {
        self.wrap(text, max_width_em).len() as u16
    }
}

/// Helvetica — standard AFM widths. The exporter draws with the matching
/// built-in PDF face.
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp    !     "     #     $     %     &     '     (     )     *     +     ,     -     .     /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0     1     2     3     4     5     6     7     8     9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :     ;     <     =     >     ?     @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A     B     C     D     E     F     G     H     I     J     K     L     M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N     O     P     Q     R     S     T     U     V     W     X     Y     Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [     \     ]     ^     _     `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a     b     c     d     e     f     g     h     i     j     k     l     m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n     o     p     q     r     s     t     u     v     w     x     y     z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {     |     }     ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.540,
    space_width: 0.278,
};

pub fn helvetica() -> &'static FontMetricTable {
    &HELVETICA_TABLE
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_is_zero() {
        assert_eq!(helvetica().measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_space_width() {
        let width = helvetica().measure_str(" ");
        assert!((width - 0.278).abs() < 1e-4);
    }

    #[test]
    fn test_measure_str_non_ascii_falls_back_to_average() {
        let metrics = helvetica();
        let width = metrics.measure_str("é");
        assert!((width - metrics.average_char_width).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_empty_text_is_one_blank_line() {
        let lines = helvetica().wrap("", 40.0);
        assert_eq!(lines, vec![String::new()]);
    }

    #[test]
    fn test_wrap_short_text_stays_on_one_line() {
        let lines = helvetica().wrap("Rust engineer", 40.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], "Rust engineer");
    }

    #[test]
    fn test_wrap_long_text_splits_and_preserves_words() {
        let text = "word ".repeat(40);
        let lines = helvetica().wrap(text.trim(), 10.0);
        assert!(lines.len() > 1);
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text.trim());
    }

    #[test]
    fn test_estimated_lines_matches_wrap() {
        let metrics = helvetica();
        let text = "Built a streaming ingestion pipeline handling forty thousand events per second";
        assert_eq!(
            metrics.estimated_lines(text, 20.0) as usize,
            metrics.wrap(text, 20.0).len()
        );
    }

    #[test]
    fn test_a4_geometry_derived_values() {
        let geometry = a4_geometry(20.0, 11);
        // 170 mm of text width at 11pt ≈ 43.8 em
        assert!((geometry.text_width_em() - 43.8).abs() < 0.2);
        // 257 mm of text height at 11pt × 1.35 ≈ 49 lines
        assert_eq!(geometry.lines_per_page(), 49);
    }

    #[test]
    fn test_wider_margins_shrink_the_page() {
        let narrow = a4_geometry(20.0, 11);
        let wide = a4_geometry(40.0, 11);
        assert!(wide.text_width_em() < narrow.text_width_em());
        assert!(wide.lines_per_page() < narrow.lines_per_page());
    }
}
