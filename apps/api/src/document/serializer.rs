//! Prompt serialization — turns a document snapshot into a single plain-text
//! prompt for the generation service.
#![allow(dead_code)]
//!
//! The output is pure and deterministic: identical document content always
//! serializes to byte-identical text. Ordering is fixed (Personal, Education,
//! Experience, Projects, Skills) and empty fields render as empty strings
//! rather than being skipped, so sparsely-filled sections keep their position
//! in the prompt.

use super::Document;

/// Serializes a document into the details text sent to the generation service.
pub fn serialize(doc: &Document) -> String {
    let p = doc.personal();
    let personal = format!(
        "Name: {}\nEmail: {}\nPhone: {}\nLinkedIn: {}\nGitHub: {}\nAddress: {}",
        p.name, p.email, p.phone, p.linked_in, p.github, p.address
    );

    let education = doc
        .education()
        .iter()
        .map(|e| {
            format!(
                "- Institution: {}, Degree: {}, Date: {}, Location: {}",
                e.institution, e.degree, e.date, e.location
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let experience = doc
        .experience()
        .iter()
        .map(|e| {
            format!(
                "- Company: {}\n  Title: {}\n  Date: {}\n  Location: {}\n  Description: {}",
                e.company, e.title, e.date, e.location, e.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let projects = doc
        .projects()
        .iter()
        .map(|p| {
            format!(
                "- Project: {}\n  Tech: {}\n  Date: {}\n  Description: {}",
                p.name, p.tech, p.date, p.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let skills = doc
        .skills()
        .iter()
        .map(|s| format!("- {}: {}", s.category, s.details))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Personal Details:\n{personal}\n\nEducation:\n{education}\n\nExperience:\n{experience}\n\nProjects:\n{projects}\n\nSkills:\n{skills}"
    )
}
