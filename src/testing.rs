// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! Fakes shared by the unit tests.

use std::{collections::VecDeque, io, sync::Mutex};

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use secrecy::ExposeSecret as _;

use crate::{
    error::{Error, Result},
    guard::Page,
    transport::{Request, Response, Transport},
    ui::{Level, Ui},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    Notify(Level, String),
    Greet(String),
    Redirect(Page),
}

#[derive(Default)]
pub(crate) struct RecordingUi {
    events: Mutex<Vec<Event>>,
}

impl RecordingUi {
    #[allow(clippy::unwrap_used)]
    pub(crate) fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    #[allow(clippy::unwrap_used)]
    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl Ui for RecordingUi {
    fn notify(&self, level: Level, message: &str) {
        self.push(Event::Notify(level, message.to_owned()));
    }

    fn greet(&self, name: &str) {
        self.push(Event::Greet(name.to_owned()));
    }

    fn redirect(&self, page: Page) {
        self.push(Event::Redirect(page));
    }
}

/// What the fake transport saw, with the token exposed for assertions.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Sent {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) segments: Vec<String>,
    pub(crate) token: Option<String>,
    pub(crate) body: Option<serde_json::Value>,
}

/// Answers requests from a queue of canned responses.
#[derive(Default)]
pub(crate) struct FakeTransport {
    responses: Mutex<VecDeque<Response>>,
    sent: Mutex<Vec<Sent>>,
}

impl FakeTransport {
    pub(crate) fn with_json(self, status: u16, body: &serde_json::Value) -> Self {
        self.with_raw(status, body.to_string())
    }

    #[allow(clippy::unwrap_used)]
    pub(crate) fn with_raw<B: Into<Vec<u8>>>(self, status: u16, body: B) -> Self {
        self.responses.lock().unwrap().push_back(Response {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.into(),
        });
        self
    }

    #[allow(clippy::unwrap_used)]
    pub(crate) fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    #[allow(clippy::unwrap_used)]
    async fn send(&self, req: Request) -> Result<Response> {
        let path = req.path();
        self.sent.lock().unwrap().push(Sent {
            method: req.method,
            path,
            segments: req.segments,
            token: req.token.map(|t| t.expose_secret().clone()),
            body: req.body,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Io(io::ErrorKind::ConnectionReset.into()))
    }
}
