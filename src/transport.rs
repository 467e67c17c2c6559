// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret as _, SecretString};
use url::Url;

use crate::{
    error::{Error, Result},
    metadata,
};

/// The header the API reads the session token from.
pub(crate) const TOKEN_HEADER: &str = "auth-token";

/// A call relative to the API base. Each segment is sent as exactly one
/// path segment, whatever characters it holds.
#[derive(Debug)]
pub(crate) struct Request {
    pub(crate) method: Method,
    pub(crate) segments: Vec<String>,
    pub(crate) token: Option<SecretString>,
    pub(crate) body: Option<serde_json::Value>,
}

impl Request {
    pub(crate) fn new<I>(method: Method, segments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            token: None,
            body: None,
        }
    }

    pub(crate) fn with_token(mut self, token: Option<SecretString>) -> Self {
        self.token = token;
        self
    }

    pub(crate) fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// The unencoded path, for logs.
    pub(crate) fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

#[derive(Debug)]
pub(crate) struct Response {
    pub(crate) status: StatusCode,
    pub(crate) body: Vec<u8>,
}

#[async_trait]
pub(crate) trait Transport: Send + Sync {
    async fn send(&self, req: Request) -> Result<Response>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&self, req: Request) -> Result<Response> {
        (**self).send(req).await
    }
}

/// Sends requests to the API over HTTPS.
pub(crate) struct Http {
    client: reqwest::Client,
    base: Url,
}

impl Http {
    pub(crate) fn new(base: Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(metadata::USER_AGENT.as_str())
            .timeout(timeout)
            .build()?;
        Ok(Self { client, base })
    }

    fn url(&self, segments: &[String]) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| Error::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?;
            let _ = path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for Http {
    async fn send(&self, req: Request) -> Result<Response> {
        let url = self.url(&req.segments)?;
        debug!("{} {}", req.method, url);

        let mut builder = self.client.request(req.method, url);
        if let Some(token) = req.token.as_ref() {
            builder = builder.header(TOKEN_HEADER, token.expose_secret().as_str());
        }
        if let Some(body) = req.body.as_ref() {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?.to_vec();
        debug!("Received {} ({} bytes)", status, body.len());

        Ok(Response { status, body })
    }
}
