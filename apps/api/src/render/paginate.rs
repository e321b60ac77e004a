//! Geometry-driven pagination — flows a RenderModel into fixed-size pages.
#![allow(dead_code)]
//!
//! Placement rules, in order of precedence:
//! 1. Entries are atomic. An entry that does not fit in the remaining space
//!    moves wholly to the next page; its rows never split.
//! 2. A section that fits in the remaining space stays on the current page; a
//!    section that does not fit but fits on a fresh page moves there wholly.
//!    Only a section taller than a full page splits, at entry boundaries.
//! 3. A section title is never stranded without its first entry.
//!
//! Costs are measured in line slots using the same greedy word-wrap the PDF
//! exporter draws with, so simulated page breaks track the exported layout.

use serde::Serialize;

use crate::render::metrics::{helvetica, FontMetricTable, PageGeometry};
use crate::render::{EntryRow, HeaderBlock, RenderEntry, RenderModel};

/// Indent reserved for bullet markers, in em units.
const BULLET_INDENT_EM: f32 = 2.0;
/// Line slots for a section title plus its separator rule.
const SECTION_TITLE_COST: u32 = 2;
/// Blank line after every entry.
const ENTRY_GAP: u32 = 1;
/// The header name is drawn at roughly twice the body size.
const NAME_COST: u32 = 2;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// Drawable blocks, in top-to-bottom order, for one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PageBlock {
    Name(String),
    Contact(String),
    SectionTitle(String),
    SplitRow {
        left: String,
        right: String,
        strong: bool,
    },
    Bullet(String),
    LabeledRow {
        label: String,
        value: String,
    },
    /// Inter-entry spacing, one line slot.
    Gap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub blocks: Vec<PageBlock>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

/// Flows the render model into pages of `geometry`'s size. Always returns at
/// least one page; the header opens page one.
pub fn paginate(model: &RenderModel, geometry: &PageGeometry) -> Vec<Page> {
    let metrics = helvetica();
    let width_em = geometry.text_width_em();
    let capacity = geometry.lines_per_page() as u32;

    let mut builder = PageBuilder::new(capacity);

    let (header, header_cost) = header_blocks(&model.header);
    builder.force(header, header_cost);

    for section in &model.sections {
        let entries: Vec<(Vec<PageBlock>, u32)> = section
            .entries
            .iter()
            .map(|entry| entry_blocks(entry, metrics, width_em))
            .collect();
        let section_cost = SECTION_TITLE_COST + entries.iter().map(|(_, c)| c).sum::<u32>();

        if !builder.fits(section_cost) && section_cost <= capacity {
            builder.break_page();
        }

        // Keep the title attached to the first entry even when the section
        // itself is taller than a page and must split.
        let first_cost = entries.first().map(|(_, c)| *c).unwrap_or(0);
        if !builder.fits(SECTION_TITLE_COST + first_cost) {
            builder.break_page();
        }
        builder.force(
            vec![PageBlock::SectionTitle(section.title.to_string())],
            SECTION_TITLE_COST,
        );

        for (blocks, cost) in entries {
            // An entry taller than a full page gains nothing from a break;
            // force it whole and let the page overflow.
            if !builder.fits(cost) && cost <= capacity {
                builder.break_page();
            }
            builder.force(blocks, cost);
        }
    }

    builder.finish()
}

// ────────────────────────────────────────────────────────────────────────────
// Costing
// ────────────────────────────────────────────────────────────────────────────

fn header_blocks(header: &HeaderBlock) -> (Vec<PageBlock>, u32) {
    let mut blocks = vec![PageBlock::Name(header.name.clone())];
    let mut cost = NAME_COST;
    if !header.contact.is_empty() {
        blocks.push(PageBlock::Contact(header.contact.join(" | ")));
        cost += 1;
    }
    blocks.push(PageBlock::Gap);
    cost += ENTRY_GAP;
    (blocks, cost)
}

fn entry_blocks(
    entry: &RenderEntry,
    metrics: &FontMetricTable,
    width_em: f32,
) -> (Vec<PageBlock>, u32) {
    let mut blocks = Vec::with_capacity(entry.rows.len() + 1);
    let mut cost = 0u32;

    for row in &entry.rows {
        match row {
            EntryRow::Split {
                left,
                right,
                strong,
            } => {
                let combined = format!("{left}  {right}");
                cost += u32::from(metrics.estimated_lines(&combined, width_em));
                blocks.push(PageBlock::SplitRow {
                    left: left.clone(),
                    right: right.clone(),
                    strong: *strong,
                });
            }
            EntryRow::Bullet(text) => {
                cost += u32::from(metrics.estimated_lines(text, width_em - BULLET_INDENT_EM));
                blocks.push(PageBlock::Bullet(text.clone()));
            }
            EntryRow::Labeled { label, value } => {
                let combined = format!("{label}: {value}");
                cost += u32::from(metrics.estimated_lines(&combined, width_em));
                blocks.push(PageBlock::LabeledRow {
                    label: label.clone(),
                    value: value.clone(),
                });
            }
        }
    }

    blocks.push(PageBlock::Gap);
    cost += ENTRY_GAP;
    (blocks, cost)
}

// ────────────────────────────────────────────────────────────────────────────
// Page builder
// ────────────────────────────────────────────────────────────────────────────

struct PageBuilder {
    capacity: u32,
    used: u32,
    pages: Vec<Page>,
}

impl PageBuilder {
    fn new(capacity: u32) -> Self {
        PageBuilder {
            capacity,
            used: 0,
            pages: vec![Page::default()],
        }
    }

    fn fits(&self, cost: u32) -> bool {
        self.used + cost <= self.capacity
    }

    /// Places blocks on the current page even when they overflow it — used
    /// after the caller has decided a break would not help (e.g. a single
    /// entry taller than a page).
    fn force(&mut self, blocks: Vec<PageBlock>, cost: u32) {
        let page = self.pages.last_mut().expect("builder always has a page");
        page.blocks.extend(blocks);
        self.used += cost;
    }

    fn break_page(&mut self) {
        if self.used == 0 {
            return;
        }
        // Drop a trailing gap so pages never open with blank space.
        if let Some(page) = self.pages.last_mut() {
            if page.blocks.last() == Some(&PageBlock::Gap) {
                page.blocks.pop();
            }
        }
        self.pages.push(Page::default());
        self.used = 0;
    }

    fn finish(mut self) -> Vec<Page> {
        if let Some(page) = self.pages.last_mut() {
            if page.blocks.last() == Some(&PageBlock::Gap) {
                page.blocks.pop();
            }
        }
        self.pages
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{
        EducationItem, ExperienceItem, GeneratedResume, ProjectItem, SkillsBlock,
    };
    use crate::render::{a4_geometry, render};

    fn small_resume() -> GeneratedResume {
        GeneratedResume {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+44 1234".to_string(),
            linkedin: "linkedin.com/in/ada".to_string(),
            github: "github.com/ada".to_string(),
            education: vec![education("University of London")],
            experience: vec![experience("Analyst", 2)],
            projects: vec![ProjectItem {
                name: "Notes".to_string(),
                tech: "Punched cards".to_string(),
                date: "1843".to_string(),
                description: vec!["Annotated Menabrea's memoir".to_string()],
            }],
            skills: SkillsBlock {
                languages: "English, French".to_string(),
                frameworks: "Analytical Engine".to_string(),
                tools: "Pen".to_string(),
            },
        }
    }

    fn education(institution: &str) -> EducationItem {
        EducationItem {
            degree: "BSc".to_string(),
            institution: institution.to_string(),
            date: "1833".to_string(),
            location: "London".to_string(),
        }
    }

    fn experience(title: &str, bullets: usize) -> ExperienceItem {
        ExperienceItem {
            title: title.to_string(),
            company: "Analytical Engines Ltd".to_string(),
            date: "1837".to_string(),
            location: "London".to_string(),
            description: (0..bullets)
                .map(|i| format!("{title} achievement {i} with measurable results"))
                .collect(),
        }
    }

    /// Geometry small enough to force page breaks without huge fixtures.
    fn short_geometry() -> PageGeometry {
        PageGeometry {
            page_width_mm: 210.0,
            page_height_mm: 120.0,
            margin_mm: 10.0,
            font_size_pt: 11,
            line_height: 1.35,
        }
    }

    fn section_title_pages(pages: &[Page], title: &str) -> Vec<usize> {
        pages
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                p.blocks
                    .iter()
                    .any(|b| matches!(b, PageBlock::SectionTitle(t) if t == title))
            })
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_small_resume_fits_one_page() {
        let pages = paginate(&render(&small_resume()), &a4_geometry(20.0, 11));
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_every_section_on_exactly_one_page() {
        let mut resume = small_resume();
        resume.experience = (0..6).map(|i| experience(&format!("Role {i}"), 3)).collect();
        let pages = paginate(&render(&resume), &short_geometry());
        assert!(pages.len() > 1, "fixture should overflow one short page");

        for title in ["Education", "Experience", "Projects", "Technical Skills"] {
            let on_pages = section_title_pages(&pages, title);
            assert_eq!(on_pages.len(), 1, "section {title} duplicated or dropped");
        }
    }

    #[test]
    fn test_entries_are_atomic_across_page_breaks() {
        let mut resume = small_resume();
        resume.experience = (0..8).map(|i| experience(&format!("Role {i}"), 4)).collect();
        let pages = paginate(&render(&resume), &short_geometry());
        assert!(pages.len() > 1);

        // Every bullet of "Role i" must sit on the same page as its heading.
        for i in 0..8 {
            let marker = format!("Role {i}");
            let holding_pages: Vec<usize> = pages
                .iter()
                .enumerate()
                .filter(|(_, p)| {
                    p.blocks.iter().any(|b| match b {
                        PageBlock::SplitRow { left, .. } => left == &marker,
                        PageBlock::Bullet(text) => text.starts_with(&marker),
                        _ => false,
                    })
                })
                .map(|(idx, _)| idx)
                .collect();
            assert_eq!(
                holding_pages.len(),
                1,
                "entry {marker} split across pages {holding_pages:?}"
            );
        }
    }

    #[test]
    fn test_section_that_fits_a_fresh_page_moves_wholly() {
        // Education (five entries) cannot fit below the header on a short
        // page, but fits a fresh page — it must move there in one piece.
        let mut resume = small_resume();
        resume.education = (0..5)
            .map(|i| education(&format!("University {i}")))
            .collect();
        let pages = paginate(&render(&resume), &short_geometry());
        assert!(pages.len() > 1);

        let education_pages: Vec<usize> = pages
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                p.blocks.iter().any(|b| {
                    matches!(b, PageBlock::SplitRow { left, .. } if left.starts_with("University"))
                })
            })
            .map(|(i, _)| i)
            .collect();
        assert_eq!(
            education_pages,
            vec![1],
            "education should sit wholly on the second page"
        );
        // The first page holds only the header after the move.
        assert!(pages[0]
            .blocks
            .iter()
            .all(|b| !matches!(b, PageBlock::SectionTitle(_))));
    }

    #[test]
    fn test_section_title_never_stranded_at_page_bottom() {
        let mut resume = small_resume();
        resume.experience = (0..10).map(|i| experience(&format!("Role {i}"), 3)).collect();
        let pages = paginate(&render(&resume), &short_geometry());

        for page in &pages {
            if let Some(last) = page.blocks.last() {
                assert!(
                    !matches!(last, PageBlock::SectionTitle(_)),
                    "section title stranded at page bottom"
                );
            }
        }
    }

    #[test]
    fn test_first_page_opens_with_header() {
        let pages = paginate(&render(&small_resume()), &a4_geometry(20.0, 11));
        assert!(matches!(&pages[0].blocks[0], PageBlock::Name(n) if n == "Ada Lovelace"));
        assert!(
            matches!(&pages[0].blocks[1], PageBlock::Contact(c) if c.contains(" | ")),
            "contact line joined with pipes"
        );
    }

    #[test]
    fn test_oversized_single_entry_stays_whole() {
        // One entry taller than the short page: it must still land on a
        // single page (overflow tolerated), never split.
        let mut resume = small_resume();
        resume.experience = vec![experience("Giant", 40)];
        let pages = paginate(&render(&resume), &short_geometry());

        let giant_pages: Vec<usize> = pages
            .iter()
            .enumerate()
            .filter(|(_, p)| {
                p.blocks
                    .iter()
                    .any(|b| matches!(b, PageBlock::Bullet(t) if t.starts_with("Giant")))
            })
            .map(|(i, _)| i)
            .collect();
        assert_eq!(giant_pages.len(), 1);
    }
}
