// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use crate::{guard::Page, metadata, view};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Level {
    Success,
    Error,
}

/// The user-facing side of the client: notices, greetings and navigation.
pub(crate) trait Ui: Send + Sync {
    fn notify(&self, level: Level, message: &str);
    fn greet(&self, name: &str);
    fn redirect(&self, page: Page);
}

/// Writes everything to standard error so that standard output only ever
/// carries rendered data.
pub(crate) struct Terminal;

impl Ui for Terminal {
    fn notify(&self, level: Level, message: &str) {
        let message = view::sanitize(message);
        match level {
            Level::Success => eprintln!("{message}"),
            Level::Error => eprintln!("Error: {message}"),
        }
    }

    fn greet(&self, name: &str) {
        eprintln!("Welcome {}", view::sanitize(name));
    }

    fn redirect(&self, page: Page) {
        match page {
            Page::Login => eprintln!(
                "You are not signed in. Run `{} login` to continue.",
                *metadata::CLIENT_NAME
            ),
            Page::Home | Page::Projects => eprintln!(
                "You are already signed in. Run `{} home` to see your projects.",
                *metadata::CLIENT_NAME
            ),
            Page::Register => eprintln!(
                "Run `{} register` to create an account.",
                *metadata::CLIENT_NAME
            ),
        }
    }
}
