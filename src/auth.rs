// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use log::{info, warn};

use crate::{
    api::{Executor, Reply},
    error::{Error, Result},
    form::{LoginForm, RegistrationForm},
    model::{Authenticated, User},
    session::SessionStore,
    storage::Storage,
    transport::Transport,
};

/// Exchanges credentials for a session. A 401 here means the credentials
/// were wrong, not that a session expired.
pub(crate) struct AuthClient<T, S> {
    transport: Arc<T>,
    session: SessionStore<S>,
}

fn accept(reply: Reply<Authenticated>) -> Result<Authenticated> {
    match reply {
        Reply::Success(authenticated) => Ok(authenticated),
        Reply::Unauthorized { message } | Reply::Failure { message, .. } => {
            warn!("Authentication was rejected: {message}");
            Err(Error::Authentication(message))
        }
    }
}

impl<T: Transport, S: Storage> AuthClient<T, S> {
    pub(crate) fn new(transport: Arc<T>, session: SessionStore<S>) -> Self {
        Self { transport, session }
    }

    /// Creates an account. The new account still has to sign in.
    pub(crate) async fn register(&self, form: RegistrationForm) -> Result<User> {
        let call = form.validate()?;
        let authenticated = accept(call.execute(self.transport.as_ref(), None).await?)?;
        info!("Registered {}", authenticated.user.name);
        Ok(authenticated.user)
    }

    /// Signs in and persists the resulting session.
    pub(crate) async fn login(&self, form: LoginForm) -> Result<User> {
        let call = form.validate()?;
        let authenticated = accept(call.execute(self.transport.as_ref(), None).await?)?;
        self.session
            .save_session(&authenticated.token, &authenticated.user)
            .await?;
        info!("Signed in as {}", authenticated.user.name);
        Ok(authenticated.user)
    }
}

#[cfg(test)]
mod tests {
    use futures_util::lock::Mutex;
    use secrecy::SecretString;
    use serde_json::json;

    use crate::{
        error::{Result, Validation},
        projects::ProjectsClient,
        storage::Memory,
        testing::{FakeTransport, RecordingUi},
        ui::Ui,
    };

    use super::*;

    fn session() -> SessionStore<Memory> {
        SessionStore::new(Arc::new(Mutex::new(Memory::new())))
    }

    fn login_form(password: &str) -> LoginForm {
        LoginForm {
            email: "abc@example.com".to_owned(),
            password: SecretString::new(password.to_owned()),
        }
    }

    #[tokio::test]
    async fn login_persists_session_and_projects_use_its_token() -> Result<()> {
        let transport = Arc::new(
            FakeTransport::default()
                .with_json(
                    200,
                    &json!({
                        "token": "fresh-token",
                        "user": {"_id": "u1", "name": "Abcdef", "email": "abc@example.com"},
                    }),
                )
                .with_json(200, &json!([])),
        );
        let session = session();
        let auth = AuthClient::new(Arc::clone(&transport), session.clone());

        let user = auth.login(login_form("secret")).await?;
        assert_eq!(user.name, "Abcdef");
        assert!(session.is_authenticated().await);
        assert_eq!(session.current_user().await, Some(user));

        let ui: Arc<dyn Ui> = Arc::new(RecordingUi::default());
        let projects = ProjectsClient::new(Arc::clone(&transport), session, ui);
        assert!(projects.list_projects().await?.is_empty());

        let sent = transport.sent();
        assert_eq!(sent[0].path, "/auth/login");
        assert_eq!(sent[0].token, None);
        assert_eq!(
            sent[0].body,
            Some(json!({"email": "abc@example.com", "password": "secret"}))
        );
        assert_eq!(sent[1].path, "/projects");
        assert_eq!(sent[1].token.as_deref(), Some("fresh-token"));
        Ok(())
    }

    #[tokio::test]
    async fn rejected_login_leaves_no_session() -> Result<()> {
        let transport = Arc::new(
            FakeTransport::default()
                .with_json(401, &json!({"message": "Invalid credentials"}))
                .with_raw(500, ""),
        );
        let session = session();
        let auth = AuthClient::new(transport, session.clone());

        match auth.login(login_form("wrong1")).await {
            Err(Error::Authentication(message)) => assert_eq!(message, "Invalid credentials"),
            other => panic!("unexpected result {other:?}"),
        }
        match auth.login(login_form("wrong2")).await {
            Err(Error::Authentication(message)) => assert_eq!(message, "failed to sign in"),
            other => panic!("unexpected result {other:?}"),
        }
        assert!(!session.is_authenticated().await);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_registration_never_reaches_the_server() {
        let transport = Arc::new(FakeTransport::default());
        let auth = AuthClient::new(Arc::clone(&transport), session());

        let result = auth
            .register(RegistrationForm {
                name: "Abcdef".to_owned(),
                email: "abc@example.com".to_owned(),
                password: SecretString::new("secret".to_owned()),
                itson_id: "12a456".to_owned(),
            })
            .await;

        assert!(matches!(
            result,
            Err(Error::Validation(Validation::ItsonId(6)))
        ));
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn registration_does_not_sign_in() -> Result<()> {
        let transport = Arc::new(FakeTransport::default().with_json(
            201,
            &json!({"token": "t", "user": {"_id": "u2", "name": "Abcdef"}}),
        ));
        let session = session();
        let auth = AuthClient::new(transport, session.clone());

        let user = auth
            .register(RegistrationForm {
                name: "Abcdef".to_owned(),
                email: "abc@example.com".to_owned(),
                password: SecretString::new("secret".to_owned()),
                itson_id: "123456".to_owned(),
            })
            .await?;

        assert_eq!(user.id.as_deref(), Some("u2"));
        assert!(!session.is_authenticated().await);
        Ok(())
    }
}
