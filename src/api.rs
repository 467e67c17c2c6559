// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use log::debug;
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret as _, SecretString};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;

use crate::{
    error::Result,
    model::{Authenticated, Confirmation, Project, ProjectData, ProjectId},
    transport::{Request, Response, Transport},
};

/// How the server answered a call, before any policy is applied to it.
#[derive(Debug)]
pub(crate) enum Reply<T> {
    Success(T),
    Unauthorized { message: String },
    Failure { status: StatusCode, message: String },
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Pulls `message` out of an error body when there is one. The body can be
/// anything at all, including empty or not JSON.
fn server_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

fn decode<T: DeserializeOwned>(resp: Response, failure: &str) -> Result<Reply<T>> {
    let message = || server_message(&resp.body).unwrap_or_else(|| failure.to_owned());

    if resp.status == StatusCode::UNAUTHORIZED {
        return Ok(Reply::Unauthorized { message: message() });
    }
    if !resp.status.is_success() {
        return Ok(Reply::Failure {
            status: resp.status,
            message: message(),
        });
    }

    let value = if resp.body.iter().all(u8::is_ascii_whitespace) {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&resp.body)?
    };
    Ok(Reply::Success(serde_json::from_value(value)?))
}

#[async_trait]
pub(crate) trait Executor: Sized + Send {
    type Response: DeserializeOwned + Send;

    /// Shown when the server fails without saying why.
    const FAILURE: &'static str;

    fn into_request(self) -> Result<Request>;

    async fn execute<T: Transport + ?Sized>(
        self,
        transport: &T,
        token: Option<SecretString>,
    ) -> Result<Reply<Self::Response>> {
        let req = self.into_request()?.with_token(token);
        debug!("Calling {} {}", req.method, req.path());
        let resp = transport.send(req).await?;
        decode(resp, Self::FAILURE)
    }
}

pub(crate) struct Login {
    pub(crate) email: String,
    pub(crate) password: SecretString,
}

impl Executor for Login {
    type Response = Authenticated;
    const FAILURE: &'static str = "failed to sign in";

    fn into_request(self) -> Result<Request> {
        Ok(Request::new(Method::POST, ["auth", "login"]).with_body(json!({
            "email": self.email,
            "password": self.password.expose_secret(),
        })))
    }
}

pub(crate) struct Register {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password: SecretString,
    pub(crate) itson_id: String,
}

impl Executor for Register {
    type Response = Authenticated;
    const FAILURE: &'static str = "failed to register user";

    fn into_request(self) -> Result<Request> {
        Ok(Request::new(Method::POST, ["auth", "register"]).with_body(json!({
            "name": self.name,
            "email": self.email,
            "password": self.password.expose_secret(),
            "itsonId": self.itson_id,
        })))
    }
}

pub(crate) struct ListProjects;

impl Executor for ListProjects {
    type Response = Vec<Project>;
    const FAILURE: &'static str = "failed to fetch projects";

    fn into_request(self) -> Result<Request> {
        Ok(Request::new(Method::GET, ["projects"]))
    }
}

pub(crate) struct CreateProject(pub(crate) ProjectData);

impl Executor for CreateProject {
    type Response = Project;
    const FAILURE: &'static str = "failed to create project";

    fn into_request(self) -> Result<Request> {
        Ok(Request::new(Method::POST, ["projects"]).with_body(serde_json::to_value(&self.0)?))
    }
}

pub(crate) struct UpdateProject {
    pub(crate) id: ProjectId,
    pub(crate) data: ProjectData,
}

impl Executor for UpdateProject {
    type Response = Project;
    const FAILURE: &'static str = "failed to update project";

    fn into_request(self) -> Result<Request> {
        Ok(Request::new(Method::PUT, ["projects", self.id.as_str()])
            .with_body(serde_json::to_value(&self.data)?))
    }
}

pub(crate) struct DeleteProject {
    pub(crate) id: ProjectId,
}

impl Executor for DeleteProject {
    type Response = Confirmation;
    const FAILURE: &'static str = "failed to delete project";

    fn into_request(self) -> Result<Request> {
        Ok(Request::new(Method::DELETE, ["projects", self.id.as_str()]))
    }
}
