// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use futures_util::lock::Mutex;
use log::{debug, warn};
use secrecy::{ExposeSecret as _, SecretString};

use crate::{error::Result, model::User, storage::Storage};

pub(crate) const TOKEN_KEY: &str = "authToken";
pub(crate) const USER_KEY: &str = "currentUser";

/// The single authority on whether the client holds a session and for whom.
pub(crate) struct SessionStore<S> {
    storage: Arc<Mutex<S>>,
}

impl<S> Clone for SessionStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: Storage> SessionStore<S> {
    pub(crate) fn new(storage: Arc<Mutex<S>>) -> Self {
        Self { storage }
    }

    pub(crate) async fn is_persistent(&self) -> bool {
        self.storage.lock().await.is_persistent()
    }

    pub(crate) async fn save_session(&self, token: &SecretString, user: &User) -> Result<()> {
        let user = serde_json::to_string(user)?;
        let mut storage = self.storage.lock().await;
        // The token goes last: it alone decides whether a session exists.
        storage.set(USER_KEY, &user).await?;
        if let Err(e) = storage.set(TOKEN_KEY, token.expose_secret()).await {
            if let Err(cleanup) = storage.remove(USER_KEY).await {
                warn!("Could not remove the user after a failed save: {cleanup}");
            }
            return Err(e);
        }
        debug!("Saved session");
        Ok(())
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.storage.lock().await.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!("Treating the session as absent because {key} could not be read: {e}");
                None
            }
        }
    }

    /// Returns the stored token. Nothing is checked locally; an expired
    /// token is only discovered when the API rejects it.
    pub(crate) async fn token(&self) -> Option<SecretString> {
        self.read(TOKEN_KEY)
            .await
            .filter(|token| !token.is_empty())
            .map(SecretString::new)
    }

    pub(crate) async fn current_user(&self) -> Option<User> {
        let raw = self.read(USER_KEY).await?;
        if raw == "undefined" {
            return None;
        }
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Ignoring unreadable stored user: {e}");
                None
            }
        }
    }

    pub(crate) async fn is_authenticated(&self) -> bool {
        self.token().await.is_some()
    }

    pub(crate) async fn clear_session(&self) -> Result<()> {
        let mut storage = self.storage.lock().await;
        storage.remove(TOKEN_KEY).await?;
        storage.remove(USER_KEY).await?;
        debug!("Cleared session");
        Ok(())
    }

    /// Drops everything in the backing store, not only the session entries.
    pub(crate) async fn purge(&self) -> Result<()> {
        self.storage.lock().await.clear().await
    }
}
