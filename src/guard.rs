// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use inflector::Inflector as _;
use log::debug;

use crate::{session::SessionStore, storage::Storage, ui::Ui};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Category {
    /// Only reachable with a session.
    Protected,
    /// Only useful without a session.
    PublicEntry,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Page {
    Login,
    Register,
    Home,
    Projects,
}

impl Page {
    pub(crate) const fn category(self) -> Category {
        match self {
            Self::Login | Self::Register => Category::PublicEntry,
            Self::Home | Self::Projects => Category::Protected,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format!("{self:?}").to_snake_case())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Decision {
    Render { greeting: Option<String> },
    Redirect(Page),
}

pub(crate) async fn evaluate<S: Storage>(page: Page, session: &SessionStore<S>) -> Decision {
    let authenticated = session.is_authenticated().await;
    match (page.category(), authenticated) {
        (Category::Protected, false) => Decision::Redirect(Page::Login),
        (Category::Protected, true) => Decision::Render {
            greeting: session.current_user().await.map(|user| user.name),
        },
        (Category::PublicEntry, false) => Decision::Render { greeting: None },
        (Category::PublicEntry, true) => Decision::Redirect(Page::Home),
    }
}

/// Runs the guard for `page` before any of its logic. When this returns
/// false the caller must stop immediately; the redirect has already been
/// issued.
pub(crate) async fn enter<S: Storage>(page: Page, session: &SessionStore<S>, ui: &dyn Ui) -> bool {
    match evaluate(page, session).await {
        Decision::Render { greeting } => {
            if let Some(name) = greeting {
                ui.greet(&name);
            }
            true
        }
        Decision::Redirect(target) => {
            debug!("Redirecting from {page} to {target}");
            ui.redirect(target);
            false
        }
    }
}
