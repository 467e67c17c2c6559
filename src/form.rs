// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use secrecy::{ExposeSecret as _, SecretString};

use crate::{
    api,
    error::Validation,
    model::{Project, ProjectData},
};

pub(crate) const MIN_NAME_LENGTH: usize = 6;
pub(crate) const MIN_PASSWORD_LENGTH: usize = 6;
pub(crate) const ITSON_ID_LENGTH: usize = 6;

pub(crate) struct LoginForm {
    pub(crate) email: String,
    pub(crate) password: SecretString,
}

impl LoginForm {
    pub(crate) fn validate(self) -> Result<api::Login, Validation> {
        let email = self.email.trim();
        if email.is_empty() || self.password.expose_secret().is_empty() {
            return Err(Validation::MissingFields);
        }

        Ok(api::Login {
            email: email.to_owned(),
            password: self.password,
        })
    }
}

pub(crate) struct RegistrationForm {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password: SecretString,
    pub(crate) itson_id: String,
}

impl RegistrationForm {
    /// Checks run in a fixed order and the first failure wins.
    pub(crate) fn validate(self) -> Result<api::Register, Validation> {
        let name = self.name.trim();
        let email = self.email.trim();
        let itson_id = self.itson_id.trim();
        let password = self.password.expose_secret();

        if name.is_empty() || email.is_empty() || password.is_empty() || itson_id.is_empty() {
            return Err(Validation::MissingFields);
        }
        if name.chars().count() < MIN_NAME_LENGTH {
            return Err(Validation::NameTooShort(MIN_NAME_LENGTH));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(Validation::PasswordTooShort(MIN_PASSWORD_LENGTH));
        }
        if itson_id.len() != ITSON_ID_LENGTH || !itson_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Validation::ItsonId(ITSON_ID_LENGTH));
        }

        Ok(api::Register {
            name: name.to_owned(),
            email: email.to_owned(),
            itson_id: itson_id.to_owned(),
            password: self.password,
        })
    }
}

/// The project editor's fields as the user typed them. List fields are
/// comma separated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ProjectForm {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) repository: String,
    pub(crate) technologies: String,
    pub(crate) images: String,
}

fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

impl ProjectForm {
    pub(crate) fn into_data(self) -> Result<ProjectData, Validation> {
        let title = self.title.trim();
        let description = self.description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(Validation::MissingTitleOrDescription);
        }

        let repository = self.repository.trim();
        Ok(ProjectData {
            title: title.to_owned(),
            description: description.to_owned(),
            repository: (!repository.is_empty()).then(|| repository.to_owned()),
            technologies: split_list(&self.technologies),
            images: split_list(&self.images),
        })
    }
}

impl From<&Project> for ProjectForm {
    /// Prefills the editor with an existing project.
    fn from(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            repository: project.repository.clone().unwrap_or_default(),
            technologies: project.technologies.join(", "),
            images: project.images.join(", "),
        }
    }
}
