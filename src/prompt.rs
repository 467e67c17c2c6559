// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    ffi::OsString,
    io::{self, BufRead as _, Write as _},
    path::Path,
};

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::task;

use crate::{
    error::{self, Result},
    metadata,
};

#[derive(Debug, Clone)]
pub(crate) struct Request {
    description: String,
}

impl Request {
    pub(crate) fn new<D: Into<String>>(description: D) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Asks the user for things that should not be passed on the command line.
/// Each method returns `None` when this prompt is unavailable so that the
/// next one can be tried.
#[async_trait]
pub(crate) trait Prompt: Send + Sync {
    async fn password(&self, req: Request) -> Result<Option<SecretString>>;
    async fn confirm(&self, question: &str) -> Result<Option<bool>>;
}

#[async_trait]
impl<T: Prompt + ?Sized> Prompt for Box<T> {
    async fn password(&self, req: Request) -> Result<Option<SecretString>> {
        (**self).password(req).await
    }

    async fn confirm(&self, question: &str) -> Result<Option<bool>> {
        (**self).confirm(question).await
    }
}

#[async_trait]
impl<T: Prompt> Prompt for Vec<T> {
    async fn password(&self, req: Request) -> Result<Option<SecretString>> {
        for candidate in self {
            if let r @ (Ok(Some(_)) | Err(_)) = candidate.password(req.clone()).await {
                return r;
            }
        }

        Ok(None)
    }

    async fn confirm(&self, question: &str) -> Result<Option<bool>> {
        for candidate in self {
            if let r @ (Ok(Some(_)) | Err(_)) = candidate.confirm(question).await {
                return r;
            }
        }

        Ok(None)
    }
}

/// Asks for a password, failing when no prompt could be shown.
pub(crate) async fn require_password<P: Prompt + ?Sized>(
    prompt: &P,
    req: Request,
) -> Result<SecretString> {
    prompt
        .password(req)
        .await?
        .ok_or_else(|| error::Password::NoPrompt.into())
}

/// Asks a yes/no question. `assume_yes` skips the prompt entirely.
pub(crate) async fn confirm<P: Prompt + ?Sized>(
    prompt: &P,
    question: &str,
    assume_yes: bool,
) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    prompt
        .confirm(question)
        .await?
        .ok_or_else(|| error::Password::NoPrompt.into())
}

pub(crate) struct PinentryPrompt {
    executable: Option<OsString>,
}

impl PinentryPrompt {
    pub(crate) const fn new() -> Self {
        Self { executable: None }
    }

    pub(crate) fn new_with_executable<P: AsRef<Path>>(executable: P) -> Self {
        Self {
            executable: Some(executable.as_ref().as_os_str().into()),
        }
    }
}

#[async_trait]
impl Prompt for PinentryPrompt {
    async fn password(&self, req: Request) -> Result<Option<SecretString>> {
        fn interact<'input>(
            mut input: pinentry::PassphraseInput<'input>,
            title: &'input str,
            description: &'input str,
        ) -> Result<SecretString> {
            _ = input.required("A password is required to continue.");
            _ = input.with_title(title);
            _ = input.with_description(description);
            _ = input.with_prompt("Password");

            Ok(input.interact()?)
        }

        let title = format!("Password - {}", *metadata::CLIENT_DISPLAY_NAME);

        let input = self
            .executable
            .as_ref()
            .and_then(pinentry::PassphraseInput::with_binary)
            .or_else(pinentry::PassphraseInput::with_default_binary)
            .map(|input| task::spawn_blocking(move || interact(input, &title, &req.description)));

        Ok(match input {
            Some(fut) => Some(fut.await??),
            None => None,
        })
    }

    async fn confirm(&self, question: &str) -> Result<Option<bool>> {
        fn interact(mut dialog: pinentry::ConfirmationDialog<'_>, question: &str) -> Result<bool> {
            _ = dialog.with_ok("Yes");
            _ = dialog.with_cancel("No");

            Ok(dialog.confirm(question)?)
        }

        let question = question.to_owned();

        let dialog = self
            .executable
            .as_ref()
            .and_then(pinentry::ConfirmationDialog::with_binary)
            .or_else(pinentry::ConfirmationDialog::with_default_binary)
            .map(|dialog| task::spawn_blocking(move || interact(dialog, &question)));

        Ok(match dialog {
            Some(fut) => Some(fut.await??),
            None => None,
        })
    }
}

/// Falls back to the controlling terminal.
pub(crate) struct TerminalPrompt;

#[async_trait]
impl Prompt for TerminalPrompt {
    async fn password(&self, req: Request) -> Result<Option<SecretString>> {
        Ok(Some(
            task::spawn_blocking(move || {
                rpassword::prompt_password(format!("{}: ", req.description)).map(SecretString::new)
            })
            .await??,
        ))
    }

    async fn confirm(&self, question: &str) -> Result<Option<bool>> {
        let question = question.to_owned();
        Ok(Some(
            task::spawn_blocking(move || -> io::Result<bool> {
                let mut stderr = io::stderr();
                write!(stderr, "{question} [y/N] ")?;
                stderr.flush()?;

                let mut answer = String::new();
                _ = io::stdin().lock().read_line(&mut answer)?;
                Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
            })
            .await??,
        ))
    }
}
