// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::{metadata, model::Project};

/// Escapes control characters so that text from the server cannot move the
/// cursor, change colors or otherwise rewrite the terminal.
pub(crate) fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_control() {
            out.extend(c.escape_default());
        } else {
            out.push(c);
        }
    }
    out
}

#[derive(Clone, Debug, PartialEq, Eq, Tabled)]
pub(crate) struct ProjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Technologies")]
    technologies: String,
    #[tabled(rename = "Repository")]
    repository: String,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            id: sanitize(project.id.as_str()),
            title: sanitize(&project.title),
            description: sanitize(&project.description),
            technologies: project
                .technologies
                .iter()
                .map(|tech| sanitize(tech))
                .collect::<Vec<_>>()
                .join(", "),
            repository: project.repository.as_deref().map(sanitize).unwrap_or_default(),
        }
    }
}

pub(crate) fn render_projects(projects: &[Project]) -> String {
    if projects.is_empty() {
        return format!(
            "You have no projects yet.\nRun `{} projects add` to create one.",
            *metadata::CLIENT_NAME
        );
    }

    Table::new(projects.iter().map(ProjectRow::from))
        .with(Style::rounded())
        .with(Modify::new(Columns::new(..)).with(Alignment::left()))
        .to_string()
}
