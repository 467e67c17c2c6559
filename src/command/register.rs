// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use secrecy::SecretString;

use crate::{
    error::Result,
    form::RegistrationForm,
    guard::Page,
    metadata,
    prompt::{self, Request},
    storage::Storage,
    transport::Transport,
    ui::Level,
};

use super::Context;

/// Create a new account.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// Your full name (at least 6 characters).
    #[arg(long, short)]
    name: String,

    /// The email address to sign in with.
    #[arg(long, short, env = "FOLIO_EMAIL")]
    email: String,

    /// Your 6-digit ITSON ID.
    #[arg(long, short)]
    itson_id: String,

    /// The password to use (at least 6 characters). When omitted, it is
    /// requested interactively.
    #[arg(long, env = "FOLIO_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[async_trait]
impl super::Command for Command {
    fn page(&self) -> Option<Page> {
        Some(Page::Register)
    }

    async fn execute<T: Transport, S: Storage>(self, ctx: &Context<T, S>) -> Result<()> {
        let password = match self.password {
            Some(password) => SecretString::new(password),
            None => {
                prompt::require_password(ctx.prompt.as_ref(), Request::new("New password")).await?
            }
        };

        _ = ctx
            .auth()
            .register(RegistrationForm {
                name: self.name,
                email: self.email,
                password,
                itson_id: self.itson_id,
            })
            .await?;

        ctx.ui.notify(
            Level::Success,
            &format!(
                "Registration successful. Run `{} login` to sign in.",
                *metadata::CLIENT_NAME
            ),
        );
        Ok(())
    }
}
