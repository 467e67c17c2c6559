// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::{sync::Arc, time::Duration};

use log::{debug, info, warn};

use crate::{
    api::{self, Executor, Reply},
    error::{Error, Result},
    guard::Page,
    model::{Confirmation, Project, ProjectData, ProjectId},
    session::SessionStore,
    storage::Storage,
    transport::Transport,
    ui::{Level, Ui},
};

pub(crate) const DEFAULT_EXPIRY_GRACE: Duration = Duration::from_secs(2);

const SESSION_EXPIRED: &str = "Session expired. Please sign in again.";

/// Authenticated access to the projects resource. Nothing is cached; every
/// call goes to the server.
pub(crate) struct ProjectsClient<T, S> {
    transport: Arc<T>,
    session: SessionStore<S>,
    ui: Arc<dyn Ui>,
    expiry_grace: Duration,
}

impl<T: Transport, S: Storage> ProjectsClient<T, S> {
    pub(crate) fn new(transport: Arc<T>, session: SessionStore<S>, ui: Arc<dyn Ui>) -> Self {
        Self {
            transport,
            session,
            ui,
            expiry_grace: DEFAULT_EXPIRY_GRACE,
        }
    }

    /// How long the session-expired notice stays up before the session is
    /// dropped and the user is sent to the login page.
    pub(crate) fn with_expiry_grace(mut self, grace: Duration) -> Self {
        self.expiry_grace = grace;
        self
    }

    async fn call<E: Executor>(&self, call: E) -> Result<E::Response> {
        let token = self.session.token().await;
        if token.is_none() {
            debug!("No token stored; sending the request without credentials");
        }

        match call.execute(self.transport.as_ref(), token).await? {
            Reply::Success(resp) => Ok(resp),
            Reply::Unauthorized { message } => {
                debug!("Server rejected the token: {message}");
                self.expire().await
            }
            Reply::Failure { status, message } => {
                warn!("Request failed with status {status}: {message}");
                Err(Error::Resource(message))
            }
        }
    }

    async fn expire<R>(&self) -> Result<R> {
        self.ui.notify(Level::Error, SESSION_EXPIRED);
        tokio::time::sleep(self.expiry_grace).await;
        match self.session.purge().await {
            Ok(()) => info!("Session expired and was cleared"),
            Err(e) => warn!("Session expired but the store could not be cleared: {e}"),
        }
        self.ui.redirect(Page::Login);
        Err(Error::SessionExpired)
    }

    /// Returns the projects in the order the server lists them.
    pub(crate) async fn list_projects(&self) -> Result<Vec<Project>> {
        self.call(api::ListProjects).await
    }

    pub(crate) async fn create_project(&self, data: ProjectData) -> Result<Project> {
        self.call(api::CreateProject(data)).await
    }

    pub(crate) async fn update_project(&self, id: ProjectId, data: ProjectData) -> Result<Project> {
        self.call(api::UpdateProject { id, data }).await
    }

    pub(crate) async fn delete_project(&self, id: ProjectId) -> Result<Confirmation> {
        self.call(api::DeleteProject { id }).await
    }
}
