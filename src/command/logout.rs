// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;
use log::info;

use crate::{error::Result, guard::Page, prompt, storage::Storage, transport::Transport, ui::Level};

use super::Context;

/// Sign out and forget the stored session.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// Do not ask for confirmation.
    #[arg(long, short)]
    yes: bool,
}

#[async_trait]
impl super::Command for Command {
    fn page(&self) -> Option<Page> {
        None
    }

    async fn execute<T: Transport, S: Storage>(self, ctx: &Context<T, S>) -> Result<()> {
        if !ctx.session.is_authenticated().await {
            info!("No session to sign out of");
            return Ok(());
        }

        if !prompt::confirm(
            ctx.prompt.as_ref(),
            "Are you sure you want to sign out?",
            self.yes,
        )
        .await?
        {
            return Ok(());
        }

        ctx.session.clear_session().await?;
        ctx.ui.notify(Level::Success, "Signed out");
        Ok(())
    }
}
