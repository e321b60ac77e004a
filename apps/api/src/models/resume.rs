#![allow(dead_code)]

//! Validated generation output — structurally identical to the schema
//! contract. Every field is a concrete type: the validator guarantees
//! presence, so no consumer ever branches on missing-vs-empty.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedResume {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub education: Vec<EducationItem>,
    pub experience: Vec<ExperienceItem>,
    pub projects: Vec<ProjectItem>,
    pub skills: SkillsBlock,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationItem {
    pub degree: String,
    pub institution: String,
    pub date: String,
    pub location: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceItem {
    pub title: String,
    pub company: String,
    pub date: String,
    pub location: String,
    /// Bullet points, one string per bullet. May be empty, never absent.
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectItem {
    pub name: String,
    pub tech: String,
    pub date: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillsBlock {
    pub languages: String,
    pub frameworks: String,
    pub tools: String,
}
