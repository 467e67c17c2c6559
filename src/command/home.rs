// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use clap::Parser;

use crate::{error::Result, guard::Page, storage::Storage, transport::Transport};

use super::Context;

/// Greet the signed-in user and show their projects.
#[derive(Debug, Parser)]
pub(crate) struct Command {}

#[async_trait]
impl super::Command for Command {
    fn page(&self) -> Option<Page> {
        Some(Page::Home)
    }

    async fn execute<T: Transport, S: Storage>(self, ctx: &Context<T, S>) -> Result<()> {
        super::projects::load(&ctx.projects()).await
    }
}
