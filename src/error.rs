// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{io, result};

use thiserror::Error;

use crate::model::ProjectId;

pub(crate) type Result<T, E = Error> = result::Result<T, E>;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error("IO operation failed: {0}")]
    Io(#[from] io::Error),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON format error: {0}")]
    Json(serde_json::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("{0}")]
    Validation(#[from] Validation),
    #[error("{0}")]
    Authentication(String),
    #[error("session expired, please sign in again")]
    SessionExpired,
    #[error("not signed in")]
    NotSignedIn,
    #[error("{0}")]
    Resource(String),
    #[error(r#"project "{}" not found"#, .id.as_str().escape_default())]
    ProjectNotFound { id: ProjectId },
    #[error("password retrieval error: {0}")]
    Password(#[from] Password),
    #[error("operation cancelled")]
    Cancelled,
}

impl From<pinentry::Error> for Error {
    fn from(value: pinentry::Error) -> Self {
        // LINT: Deliberate fall-through that should catch future cases added to
        // the enum.
        #[allow(
            clippy::wildcard_enum_match_arm,
            clippy::match_wildcard_for_single_variants
        )]
        match value {
            pinentry::Error::Cancelled | pinentry::Error::Timeout => Self::Cancelled,
            pinentry::Error::Io(e) => Self::Io(e),
            _ => Self::Password(Password::Pinentry(value)),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        // LINT: Deliberate fall-through that should catch future cases added to
        // the enum.
        #[allow(clippy::wildcard_enum_match_arm)]
        match value.classify() {
            serde_json::error::Category::Io => Self::Io(value.into()),
            _ => Self::Json(value),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Io(value.into())
    }
}

/// Problems with user input caught before any request is sent.
#[derive(Error, Debug, PartialEq, Eq)]
pub(crate) enum Validation {
    #[error("all fields are required")]
    MissingFields,
    #[error("name must be at least {0} characters long")]
    NameTooShort(usize),
    #[error("password must be at least {0} characters long")]
    PasswordTooShort(usize),
    #[error("ITSON ID must be exactly {0} numeric digits")]
    ItsonId(usize),
    #[error("title and description are required")]
    MissingTitleOrDescription,
    #[error(r#"project ID must not be empty, "." or "..""#)]
    ProjectId,
}

#[derive(Error, Debug)]
pub(crate) enum Password {
    #[error("no password prompt available")]
    NoPrompt,
    #[error("Pinentry implementation error: {0}")]
    Pinentry(pinentry::Error),
}
