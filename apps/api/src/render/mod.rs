// Rendering: projects a validated resume into an ordered RenderModel, flows
// it into fixed-size pages, and hands paginated content to an export backend.
// Pagination is pure; only the export backend performs side effects.

pub mod export;
pub mod handlers;
pub mod metrics;
pub mod paginate;

use serde::Serialize;

use crate::models::resume::{
    EducationItem, ExperienceItem, GeneratedResume, ProjectItem, SkillsBlock,
};

pub use metrics::{a4_geometry, PageGeometry};

// ────────────────────────────────────────────────────────────────────────────
// Render model
// ────────────────────────────────────────────────────────────────────────────

/// Display-ready projection of one `GeneratedResume`. Owned by the renderer,
/// rebuilt from scratch on every new result — never patched incrementally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    pub header: HeaderBlock,
    /// Sections in fixed emission order; empty sections are absent entirely.
    pub sections: Vec<RenderSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderBlock {
    pub name: String,
    /// Non-empty contact values, joined with " | " at draw time.
    pub contact: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSection {
    pub title: &'static str,
    pub entries: Vec<RenderEntry>,
}

/// One repeated item within a section. Pagination treats an entry as atomic:
/// its rows always land on the same page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderEntry {
    pub rows: Vec<EntryRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum EntryRow {
    /// Left/right aligned pair on a single line (e.g. institution | location).
    Split {
        left: String,
        right: String,
        strong: bool,
    },
    /// One bullet point.
    Bullet(String),
    /// "Label: value" line (skills rows).
    Labeled { label: String, value: String },
}

pub const EDUCATION_TITLE: &str = "Education";
pub const EXPERIENCE_TITLE: &str = "Experience";
pub const PROJECTS_TITLE: &str = "Projects";
pub const SKILLS_TITLE: &str = "Technical Skills";

// ────────────────────────────────────────────────────────────────────────────
// Projection
// ────────────────────────────────────────────────────────────────────────────

/// Builds the render model for a validated resume.
///
/// Unlike the prompt serializer, sections with no entries are omitted: blank
/// headers in a finished document are undesirable. The skills section is
/// omitted only when all three categories are blank.
pub fn render(resume: &GeneratedResume) -> RenderModel {
    let mut sections = Vec::with_capacity(4);

    if !resume.education.is_empty() {
        sections.push(RenderSection {
            title: EDUCATION_TITLE,
            entries: resume.education.iter().map(education_entry).collect(),
        });
    }
    if !resume.experience.is_empty() {
        sections.push(RenderSection {
            title: EXPERIENCE_TITLE,
            entries: resume.experience.iter().map(experience_entry).collect(),
        });
    }
    if !resume.projects.is_empty() {
        sections.push(RenderSection {
            title: PROJECTS_TITLE,
            entries: resume.projects.iter().map(project_entry).collect(),
        });
    }
    if !skills_blank(&resume.skills) {
        sections.push(RenderSection {
            title: SKILLS_TITLE,
            entries: vec![skills_entry(&resume.skills)],
        });
    }

    RenderModel {
        header: header_block(resume),
        sections,
    }
}

fn header_block(resume: &GeneratedResume) -> HeaderBlock {
    let contact = [
        &resume.email,
        &resume.phone,
        &resume.linkedin,
        &resume.github,
    ]
    .into_iter()
    .filter(|v| !v.is_empty())
    .cloned()
    .collect();

    HeaderBlock {
        name: resume.name.clone(),
        contact,
    }
}

fn education_entry(item: &EducationItem) -> RenderEntry {
    RenderEntry {
        rows: vec![
            EntryRow::Split {
                left: item.institution.clone(),
                right: item.location.clone(),
                strong: true,
            },
            EntryRow::Split {
                left: item.degree.clone(),
                right: item.date.clone(),
                strong: false,
            },
        ],
    }
}

fn experience_entry(item: &ExperienceItem) -> RenderEntry {
    let mut rows = vec![
        EntryRow::Split {
            left: item.title.clone(),
            right: item.date.clone(),
            strong: true,
        },
        EntryRow::Split {
            left: item.company.clone(),
            right: item.location.clone(),
            strong: false,
        },
    ];
    rows.extend(item.description.iter().cloned().map(EntryRow::Bullet));
    RenderEntry { rows }
}

fn project_entry(item: &ProjectItem) -> RenderEntry {
    let heading = if item.tech.is_empty() {
        item.name.clone()
    } else {
        format!("{} | {}", item.name, item.tech)
    };
    let mut rows = vec![EntryRow::Split {
        left: heading,
        right: item.date.clone(),
        strong: true,
    }];
    rows.extend(item.description.iter().cloned().map(EntryRow::Bullet));
    RenderEntry { rows }
}

fn skills_blank(skills: &SkillsBlock) -> bool {
    skills.languages.is_empty() && skills.frameworks.is_empty() && skills.tools.is_empty()
}

fn skills_entry(skills: &SkillsBlock) -> RenderEntry {
    RenderEntry {
        rows: vec![
            EntryRow::Labeled {
                label: "Languages".to_string(),
                value: skills.languages.clone(),
            },
            EntryRow::Labeled {
                label: "Frameworks".to_string(),
                value: skills.frameworks.clone(),
            },
            EntryRow::Labeled {
                label: "Tools".to_string(),
                value: skills.tools.clone(),
            },
        ],
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
