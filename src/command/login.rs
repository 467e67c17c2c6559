// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use log::warn;
use secrecy::SecretString;

use crate::{
    error::Result,
    form::LoginForm,
    guard::Page,
    metadata,
    prompt::{self, Request},
    storage::Storage,
    transport::Transport,
    ui::Level,
};

use super::Context;

/// Sign in and keep the session for later commands.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The email address of the account.
    #[arg(long, short, env = "FOLIO_EMAIL")]
    email: String,

    /// The account password. When omitted, it is requested interactively.
    #[arg(long, env = "FOLIO_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[async_trait]
impl super::Command for Command {
    fn page(&self) -> Option<Page> {
        Some(Page::Login)
    }

    async fn execute<T: Transport, S: Storage>(self, ctx: &Context<T, S>) -> Result<()> {
        let password = match self.password {
            Some(password) => SecretString::new(password),
            None => prompt::require_password(ctx.prompt.as_ref(), Request::new("Password")).await?,
        };

        let user = ctx
            .auth()
            .login(LoginForm {
                email: self.email,
                password,
            })
            .await?;

        if !ctx.session.is_persistent().await {
            warn!(
                "The session is only kept in memory and ends when {} exits",
                *metadata::CLIENT_NAME
            );
        }

        ctx.ui.notify(Level::Success, "Signed in successfully");
        ctx.ui.greet(&user.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        command::{
            tests::{context, sign_in},
            Command as _,
        },
        error::{Error, Result},
        testing::{Event, FakeTransport},
    };

    use super::*;

    #[tokio::test]
    async fn signs_in_and_greets() -> Result<()> {
        let (ctx, ui) = context(FakeTransport::default().with_json(
            200,
            &json!({"token": "t0k3n", "user": {"_id": "u1", "name": "Abcdef"}}),
        ));

        Command {
            email: "abc@example.com".to_owned(),
            password: Some("secret".to_owned()),
        }
        .run(&ctx)
        .await?;

        assert!(ctx.session.is_authenticated().await);
        assert_eq!(
            ui.events(),
            [
                Event::Notify(Level::Success, "Signed in successfully".to_owned()),
                Event::Greet("Abcdef".to_owned()),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn already_signed_in_goes_home_without_calling_the_api() -> Result<()> {
        let (ctx, ui) = context(FakeTransport::default());
        sign_in(&ctx).await?;

        Command {
            email: "abc@example.com".to_owned(),
            password: Some("secret".to_owned()),
        }
        .run(&ctx)
        .await?;

        assert_eq!(ui.events(), [Event::Redirect(Page::Home)]);
        assert!(ctx.transport.sent().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn missing_password_without_prompt_fails_before_any_request() {
        let (ctx, _ui) = context(FakeTransport::default());

        let result = Command {
            email: "abc@example.com".to_owned(),
            password: None,
        }
        .run(&ctx)
        .await;

        assert!(matches!(result, Err(Error::Password(_))));
        assert!(ctx.transport.sent().is_empty());
    }
}
