//! Editable resume document — the variable-arity input model.
#![allow(dead_code)]
//!
//! A `Document` holds the user's raw, free-form input before generation:
//! a fixed personal block plus four ordered entry sequences (education,
//! experience, projects, skills). Sequence lengths are unbounded and
//! user-controlled, with one invariant enforced at the mutation boundary:
//! every section always keeps at least one entry.
//!
//! Edit operations are synchronous, never touch the network, and leave the
//! document unchanged when they fail. Every successful mutation bumps the
//! revision counter exposed through `snapshot_id()`, which ties an in-flight
//! generation request to the exact state it was serialized from.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod serializer;

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("section {section:?} must keep at least one entry")]
    InvariantViolation { section: SectionKind },

    #[error("no entry at index {index} in section {section:?} (len {len})")]
    IndexError {
        section: SectionKind,
        index: usize,
        len: usize,
    },

    #[error("field {field:?} does not exist on {section:?} entries")]
    UnknownField {
        section: SectionKind,
        field: EntryField,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Field and section keys
// ────────────────────────────────────────────────────────────────────────────

/// The four repeated sections of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Education,
    Experience,
    Projects,
    Skills,
}

/// Keys of the fixed-shape personal block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    Name,
    Email,
    Phone,
    LinkedIn,
    Github,
    Address,
}

/// Keys of entry fields across all section templates. Which keys are valid
/// depends on the section kind; `set_entry_field` rejects mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryField {
    Institution,
    Degree,
    Title,
    Company,
    Name,
    Tech,
    Category,
    Details,
    Date,
    Location,
    Description,
}

// ────────────────────────────────────────────────────────────────────────────
// Entry templates
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linked_in: String,
    pub github: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    pub date: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub date: String,
    pub location: String,
    /// Free-form text at edit time; the generation service turns it into bullets.
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub tech: String,
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub category: String,
    pub details: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Snapshot id
// ────────────────────────────────────────────────────────────────────────────

/// Identifies the exact document state a generation request was serialized
/// from. Compared against the document's current id to discard stale
/// responses after the user has kept editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotId(u64);

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    revision: u64,
    personal: PersonalInfo,
    education: Vec<EducationEntry>,
    experience: Vec<ExperienceEntry>,
    projects: Vec<ProjectEntry>,
    skills: Vec<SkillEntry>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A fresh document: one blank entry per section. The initial skills
    /// entry is pre-labeled "Languages" to seed the categorization.
    pub fn new() -> Self {
        Document {
            revision: 0,
            personal: PersonalInfo::default(),
            education: vec![EducationEntry::default()],
            experience: vec![ExperienceEntry::default()],
            projects: vec![ProjectEntry::default()],
            skills: vec![SkillEntry {
                category: "Languages".to_string(),
                details: String::new(),
            }],
        }
    }

    pub fn snapshot_id(&self) -> SnapshotId {
        SnapshotId(self.revision)
    }

    pub fn personal(&self) -> &PersonalInfo {
        &self.personal
    }

    pub fn education(&self) -> &[EducationEntry] {
        &self.education
    }

    pub fn experience(&self) -> &[ExperienceEntry] {
        &self.experience
    }

    pub fn projects(&self) -> &[ProjectEntry] {
        &self.projects
    }

    pub fn skills(&self) -> &[SkillEntry] {
        &self.skills
    }

    pub fn entry_count(&self, section: SectionKind) -> usize {
        match section {
            SectionKind::Education => self.education.len(),
            SectionKind::Experience => self.experience.len(),
            SectionKind::Projects => self.projects.len(),
            SectionKind::Skills => self.skills.len(),
        }
    }

    // ── Edit operations ─────────────────────────────────────────────────────

    pub fn set_personal_field(&mut self, field: PersonalField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PersonalField::Name => self.personal.name = value,
            PersonalField::Email => self.personal.email = value,
            PersonalField::Phone => self.personal.phone = value,
            PersonalField::LinkedIn => self.personal.linked_in = value,
            PersonalField::Github => self.personal.github = value,
            PersonalField::Address => self.personal.address = value,
        }
        self.revision += 1;
    }

    /// Sets one field of one entry. Fails with `IndexError` when the index is
    /// out of range and `UnknownField` when the field does not belong to the
    /// section's template.
    pub fn set_entry_field(
        &mut self,
        section: SectionKind,
        index: usize,
        field: EntryField,
        value: impl Into<String>,
    ) -> Result<(), DocumentError> {
        let len = self.entry_count(section);
        if index >= len {
            return Err(DocumentError::IndexError {
                section,
                index,
                len,
            });
        }

        let slot = match section {
            SectionKind::Education => {
                let entry = &mut self.education[index];
                match field {
                    EntryField::Institution => &mut entry.institution,
                    EntryField::Degree => &mut entry.degree,
                    EntryField::Date => &mut entry.date,
                    EntryField::Location => &mut entry.location,
                    other => return Err(DocumentError::UnknownField { section, field: other }),
                }
            }
            SectionKind::Experience => {
                let entry = &mut self.experience[index];
                match field {
                    EntryField::Title => &mut entry.title,
                    EntryField::Company => &mut entry.company,
                    EntryField::Date => &mut entry.date,
                    EntryField::Location => &mut entry.location,
                    EntryField::Description => &mut entry.description,
                    other => return Err(DocumentError::UnknownField { section, field: other }),
                }
            }
            SectionKind::Projects => {
                let entry = &mut self.projects[index];
                match field {
                    EntryField::Name => &mut entry.name,
                    EntryField::Tech => &mut entry.tech,
                    EntryField::Date => &mut entry.date,
                    EntryField::Description => &mut entry.description,
                    other => return Err(DocumentError::UnknownField { section, field: other }),
                }
            }
            SectionKind::Skills => {
                let entry = &mut self.skills[index];
                match field {
                    EntryField::Category => &mut entry.category,
                    EntryField::Details => &mut entry.details,
                    other => return Err(DocumentError::UnknownField { section, field: other }),
                }
            }
        };

        *slot = value.into();
        self.revision += 1;
        Ok(())
    }

    /// Appends a blank entry matching the section's template.
    pub fn add_entry(&mut self, section: SectionKind) {
        match section {
            SectionKind::Education => self.education.push(EducationEntry::default()),
            SectionKind::Experience => self.experience.push(ExperienceEntry::default()),
            SectionKind::Projects => self.projects.push(ProjectEntry::default()),
            SectionKind::Skills => self.skills.push(SkillEntry::default()),
        }
        self.revision += 1;
    }

    /// Removes the entry at `index`. A section is never allowed to become
    /// empty; removal from a single-entry section fails with
    /// `InvariantViolation` and leaves the document untouched.
    pub fn remove_entry(&mut self, section: SectionKind, index: usize) -> Result<(), DocumentError> {
        let len = self.entry_count(section);
        if index >= len {
            return Err(DocumentError::IndexError {
                section,
                index,
                len,
            });
        }
        if len == 1 {
            return Err(DocumentError::InvariantViolation { section });
        }

        match section {
            SectionKind::Education => {
                self.education.remove(index);
            }
            SectionKind::Experience => {
                self.experience.remove(index);
            }
            SectionKind::Projects => {
                self.projects.remove(index);
            }
            SectionKind::Skills => {
                self.skills.remove(index);
            }
        }
        self.revision += 1;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_one_entry_per_section() {
        let doc = Document::new();
        assert_eq!(doc.entry_count(SectionKind::Education), 1);
        assert_eq!(doc.entry_count(SectionKind::Experience), 1);
        assert_eq!(doc.entry_count(SectionKind::Projects), 1);
        assert_eq!(doc.entry_count(SectionKind::Skills), 1);
        assert_eq!(doc.skills()[0].category, "Languages");
    }

    #[test]
    fn test_set_personal_field_updates_value() {
        let mut doc = Document::new();
        doc.set_personal_field(PersonalField::Name, "Ada Lovelace");
        doc.set_personal_field(PersonalField::LinkedIn, "linkedin.com/in/ada");
        assert_eq!(doc.personal().name, "Ada Lovelace");
        assert_eq!(doc.personal().linked_in, "linkedin.com/in/ada");
    }

    #[test]
    fn test_set_entry_field_valid() {
        let mut doc = Document::new();
        doc.set_entry_field(SectionKind::Education, 0, EntryField::Institution, "MIT")
            .unwrap();
        assert_eq!(doc.education()[0].institution, "MIT");
    }

    #[test]
    fn test_set_entry_field_out_of_range_is_index_error() {
        let mut doc = Document::new();
        let err = doc
            .set_entry_field(SectionKind::Projects, 3, EntryField::Name, "x")
            .unwrap_err();
        assert_eq!(
            err,
            DocumentError::IndexError {
                section: SectionKind::Projects,
                index: 3,
                len: 1,
            }
        );
    }

    #[test]
    fn test_set_entry_field_wrong_template_is_unknown_field() {
        let mut doc = Document::new();
        let err = doc
            .set_entry_field(SectionKind::Skills, 0, EntryField::Institution, "x")
            .unwrap_err();
        assert!(matches!(err, DocumentError::UnknownField { .. }));
        // Document unchanged
        assert_eq!(doc.skills()[0].category, "Languages");
    }

    #[test]
    fn test_add_entry_appends_blank_template() {
        let mut doc = Document::new();
        doc.add_entry(SectionKind::Experience);
        assert_eq!(doc.entry_count(SectionKind::Experience), 2);
        assert_eq!(doc.experience()[1], ExperienceEntry::default());
        // Added skill entries are fully blank, unlike the seeded first one
        doc.add_entry(SectionKind::Skills);
        assert_eq!(doc.skills()[1].category, "");
    }

    #[test]
    fn test_remove_last_entry_is_invariant_violation() {
        let mut doc = Document::new();
        doc.set_entry_field(SectionKind::Education, 0, EntryField::Institution, "X")
            .unwrap();
        let before = doc.clone();

        let err = doc.remove_entry(SectionKind::Education, 0).unwrap_err();
        assert_eq!(
            err,
            DocumentError::InvariantViolation {
                section: SectionKind::Education,
            }
        );
        // Section (and document) unchanged, including the revision counter
        assert_eq!(doc, before);
    }

    #[test]
    fn test_remove_entry_from_middle_preserves_order() {
        let mut doc = Document::new();
        doc.add_entry(SectionKind::Projects);
        doc.add_entry(SectionKind::Projects);
        for (i, name) in ["first", "second", "third"].iter().enumerate() {
            doc.set_entry_field(SectionKind::Projects, i, EntryField::Name, *name)
                .unwrap();
        }

        doc.remove_entry(SectionKind::Projects, 1).unwrap();

        assert_eq!(doc.entry_count(SectionKind::Projects), 2);
        assert_eq!(doc.projects()[0].name, "first");
        assert_eq!(doc.projects()[1].name, "third");
    }

    #[test]
    fn test_remove_entry_out_of_range_is_index_error() {
        let mut doc = Document::new();
        doc.add_entry(SectionKind::Skills);
        let err = doc.remove_entry(SectionKind::Skills, 7).unwrap_err();
        assert!(matches!(err, DocumentError::IndexError { len: 2, .. }));
    }

    #[test]
    fn test_successful_edits_advance_snapshot_id() {
        let mut doc = Document::new();
        let s0 = doc.snapshot_id();
        doc.set_personal_field(PersonalField::Email, "a@b.c");
        let s1 = doc.snapshot_id();
        assert_ne!(s0, s1);

        // A failed edit must not advance the snapshot id
        let _ = doc.remove_entry(SectionKind::Education, 0).unwrap_err();
        assert_eq!(doc.snapshot_id(), s1);
    }
}
