// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::{Args, Parser, Subcommand};
use log::{debug, info};

use crate::{
    error::{Error, Result},
    form::ProjectForm,
    guard::Page,
    model::ProjectId,
    projects::ProjectsClient,
    prompt,
    storage::Storage,
    transport::Transport,
    ui::Level,
    view,
};

use super::Context;

/// The editable fields of a project. Unset fields keep their current value
/// when editing.
#[derive(Debug, Default, Args)]
pub(crate) struct Fields {
    /// The project title.
    #[arg(long, short)]
    title: Option<String>,

    /// A short description of the project.
    #[arg(long, short)]
    description: Option<String>,

    /// A link to the source repository.
    #[arg(long, short)]
    repository: Option<String>,

    /// Comma-separated list of technologies, e.g. "React, Node".
    #[arg(long)]
    technologies: Option<String>,

    /// Comma-separated list of image URLs.
    #[arg(long)]
    images: Option<String>,
}

impl Fields {
    fn apply(self, base: ProjectForm) -> ProjectForm {
        ProjectForm {
            title: self.title.unwrap_or(base.title),
            description: self.description.unwrap_or(base.description),
            repository: self.repository.unwrap_or(base.repository),
            technologies: self.technologies.unwrap_or(base.technologies),
            images: self.images.unwrap_or(base.images),
        }
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum Action {
    /// List your projects.
    List,
    /// Add a new project.
    Add(Fields),
    /// Change an existing project.
    Edit {
        /// The ID of the project to change.
        #[arg(value_parser = ProjectId::parse)]
        id: ProjectId,

        #[command(flatten)]
        fields: Fields,
    },
    /// Delete a project.
    Delete {
        /// The ID of the project to delete.
        #[arg(value_parser = ProjectId::parse)]
        id: ProjectId,

        /// Do not ask for confirmation.
        #[arg(long, short)]
        yes: bool,
    },
}

/// Manage your portfolio projects.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    #[command(subcommand)]
    action: Action,
}

/// Fetches the full list from the server and prints it.
pub(super) async fn load<T: Transport, S: Storage>(client: &ProjectsClient<T, S>) -> Result<()> {
    let projects = client.list_projects().await?;
    debug!("Loaded {} projects", projects.len());
    println!("{}", view::render_projects(&projects));
    Ok(())
}

/// Saves the editor's contents, creating a project when there is no target
/// and updating the target otherwise. The list is reloaded afterwards.
async fn submit<T: Transport, S: Storage>(
    ctx: &Context<T, S>,
    client: &ProjectsClient<T, S>,
    form: ProjectForm,
    target: Option<ProjectId>,
) -> Result<()> {
    let data = form.into_data()?;

    let message = match target {
        Some(id) => {
            let project = client.update_project(id, data).await?;
            info!("Updated project {}", project.id);
            "Project updated successfully"
        }
        None => {
            let project = client.create_project(data).await?;
            info!("Created project {}", project.id);
            "Project created successfully"
        }
    };

    ctx.ui.notify(Level::Success, message);
    load(client).await
}

#[async_trait]
impl super::Command for Command {
    fn page(&self) -> Option<Page> {
        Some(Page::Projects)
    }

    async fn execute<T: Transport, S: Storage>(self, ctx: &Context<T, S>) -> Result<()> {
        let client = ctx.projects();

        match self.action {
            Action::List => load(&client).await,
            Action::Add(fields) => {
                submit(ctx, &client, fields.apply(ProjectForm::default()), None).await
            }
            Action::Edit { id, fields } => {
                let project = client
                    .list_projects()
                    .await?
                    .into_iter()
                    .find(|project| project.id == id)
                    .ok_or(Error::ProjectNotFound { id })?;
                debug!("Editing project {}", project.id);

                let form = fields.apply(ProjectForm::from(&project));
                submit(ctx, &client, form, Some(project.id)).await
            }
            Action::Delete { id, yes } => {
                if !prompt::confirm(
                    ctx.prompt.as_ref(),
                    "Are you sure you want to delete this project?",
                    yes,
                )
                .await?
                {
                    return Ok(());
                }

                let confirmation = client.delete_project(id).await?;
                if let Some(message) = confirmation.message() {
                    debug!("Server confirmed deletion: {message}");
                }
                ctx.ui.notify(Level::Success, "Project deleted successfully");
                load(&client).await
            }
        }
    }
}
