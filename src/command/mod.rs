// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::{
    auth::AuthClient,
    error::{Error, Result},
    guard::{self, Category, Page},
    projects::ProjectsClient,
    prompt::Prompt,
    session::SessionStore,
    storage::Storage,
    transport::Transport,
    ui::Ui,
};

pub(crate) mod home;
pub(crate) mod login;
pub(crate) mod logout;
pub(crate) mod projects;
pub(crate) mod register;

/// Everything a command needs to talk to the user and the API.
pub(crate) struct Context<T, S> {
    pub(crate) transport: Arc<T>,
    pub(crate) session: SessionStore<S>,
    pub(crate) ui: Arc<dyn Ui>,
    pub(crate) prompt: Arc<dyn Prompt>,
    pub(crate) expiry_grace: Duration,
}

impl<T: Transport, S: Storage> Context<T, S> {
    pub(crate) fn auth(&self) -> AuthClient<T, S> {
        AuthClient::new(Arc::clone(&self.transport), self.session.clone())
    }

    pub(crate) fn projects(&self) -> ProjectsClient<T, S> {
        ProjectsClient::new(
            Arc::clone(&self.transport),
            self.session.clone(),
            Arc::clone(&self.ui),
        )
        .with_expiry_grace(self.expiry_grace)
    }
}

#[async_trait]
pub(crate) trait Command: Send + Sized {
    /// The page this command shows, if access to it is guarded.
    fn page(&self) -> Option<Page>;

    async fn execute<T: Transport, S: Storage>(self, ctx: &Context<T, S>) -> Result<()>;

    /// Runs the route guard and, only if it allows, the command itself.
    async fn run<T: Transport, S: Storage>(self, ctx: &Context<T, S>) -> Result<()> {
        if let Some(page) = self.page() {
            if !guard::enter(page, &ctx.session, ctx.ui.as_ref()).await {
                return match page.category() {
                    Category::Protected => Err(Error::NotSignedIn),
                    Category::PublicEntry => Ok(()),
                };
            }
        }

        self.execute(ctx).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use futures_util::lock::Mutex;
    use secrecy::SecretString;

    use crate::{
        error::Result,
        model::User,
        storage::Memory,
        testing::{FakeTransport, RecordingUi},
    };

    use super::*;

    /// Never answers; commands under test must not prompt.
    pub(crate) struct NoPrompt;

    #[async_trait]
    impl Prompt for NoPrompt {
        async fn password(&self, _req: crate::prompt::Request) -> Result<Option<SecretString>> {
            Ok(None)
        }

        async fn confirm(&self, _question: &str) -> Result<Option<bool>> {
            Ok(None)
        }
    }

    pub(crate) fn context(
        transport: FakeTransport,
    ) -> (Context<FakeTransport, Memory>, Arc<RecordingUi>) {
        let ui = Arc::new(RecordingUi::default());
        let shared_ui: Arc<dyn Ui> = ui.clone();
        let ctx = Context {
            transport: Arc::new(transport),
            session: SessionStore::new(Arc::new(Mutex::new(Memory::new()))),
            ui: shared_ui,
            prompt: Arc::new(NoPrompt),
            expiry_grace: Duration::ZERO,
        };
        (ctx, ui)
    }

    pub(crate) async fn sign_in(ctx: &Context<FakeTransport, Memory>) -> Result<()> {
        ctx.session
            .save_session(
                &SecretString::new("t0k3n".to_owned()),
                &User {
                    id: Some("u1".to_owned()),
                    name: "Abcdef".to_owned(),
                    email: None,
                    itson_id: None,
                },
            )
            .await
    }
}
