// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]

mod api;
mod auth;
mod command;
mod error;
mod form;
mod guard;
mod metadata;
mod model;
mod projects;
mod prompt;
mod session;
mod storage;
#[cfg(test)]
mod testing;
mod transport;
mod ui;
mod view;

use std::{path::PathBuf, process, sync::Arc, time::Duration};

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use error::{Error, Result};
use futures_util::lock::Mutex;
use guard::Page;
use log::{error, warn};
use url::Url;

use command::Context;
use session::SessionStore;
use storage::Storage;
use transport::Transport;

#[derive(Debug, Subcommand)]
enum Command {
    Login(command::login::Command),
    Register(command::register::Command),
    Logout(command::logout::Command),
    Home(command::home::Command),
    Projects(command::projects::Command),
}

#[async_trait]
impl command::Command for Command {
    fn page(&self) -> Option<Page> {
        match self {
            Self::Login(cmd) => command::Command::page(cmd),
            Self::Register(cmd) => command::Command::page(cmd),
            Self::Logout(cmd) => command::Command::page(cmd),
            Self::Home(cmd) => command::Command::page(cmd),
            Self::Projects(cmd) => command::Command::page(cmd),
        }
    }

    async fn execute<T: Transport, S: Storage>(self, ctx: &Context<T, S>) -> Result<()> {
        match self {
            Self::Login(cmd) => command::Command::execute(cmd, ctx).await,
            Self::Register(cmd) => command::Command::execute(cmd, ctx).await,
            Self::Logout(cmd) => command::Command::execute(cmd, ctx).await,
            Self::Home(cmd) => command::Command::execute(cmd, ctx).await,
            Self::Projects(cmd) => command::Command::execute(cmd, ctx).await,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The base URL of the portfolio API.
    #[arg(long, env = "FOLIO_URL", default_value = metadata::DEFAULT_API_URL, value_parser = Url::parse)]
    url: Url,

    /// Give up on a request after this many seconds.
    #[arg(long, env = "FOLIO_TIMEOUT", default_value_t = 30)]
    timeout: u64,

    /// How long to show the session-expired notice before signing out, in
    /// milliseconds.
    #[arg(long, default_value_t = 2000)]
    expiry_grace_ms: u64,

    /// Keep the session in memory only. It ends when the command finishes.
    #[arg(long)]
    no_persist_session: bool,

    /// Where to keep the session. Defaults to a file in the user's data
    /// directory.
    #[arg(long, env = "FOLIO_SESSION_FILE", value_hint = clap::ValueHint::FilePath)]
    session_file: Option<PathBuf>,

    /// The path to the Pinentry program to use for password and
    /// confirmation prompts.
    #[arg(long, value_hint = clap::ValueHint::ExecutablePath)]
    pinentry_program: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

fn get_session_storage(args: &Args) -> Box<dyn Storage> {
    if !args.no_persist_session {
        if let Some(path) = args.session_file.as_ref() {
            return Box::new(storage::File::with_path(path));
        }

        if let Some(file_storage) = storage::File::new("session.json") {
            return Box::new(file_storage);
        }

        warn!("We need to fall back to in-memory session storage because no data directory is available");
    }

    Box::new(storage::Memory::new())
}

async fn run(args: Args) -> Result<()> {
    let prompt: Vec<Box<dyn prompt::Prompt>> = vec![
        Box::new(args.pinentry_program.clone().map_or_else(
            prompt::PinentryPrompt::new,
            prompt::PinentryPrompt::new_with_executable,
        )),
        Box::new(prompt::TerminalPrompt),
    ];

    let ctx = Context {
        transport: Arc::new(transport::Http::new(
            args.url.clone(),
            Duration::from_secs(args.timeout),
        )?),
        session: SessionStore::new(Arc::new(Mutex::new(get_session_storage(&args)))),
        ui: Arc::new(ui::Terminal),
        prompt: Arc::new(prompt),
        expiry_grace: Duration::from_millis(args.expiry_grace_ms),
    };

    command::Command::run(args.command, &ctx).await
}

/// Error text can carry messages from the server, so it goes through the
/// same escaping as everything else shown on the terminal.
fn describe(e: &Error) -> String {
    view::sanitize(&e.to_string())
}

#[tokio::main]
async fn main() {
    let logger_env = env_logger::Env::new()
        .filter_or("FOLIO_LOG", "warn")
        .write_style("FOLIO_LOG_STYLE");
    env_logger::Builder::from_env(logger_env).init();

    match run(Args::parse()).await {
        Ok(()) => {}
        // The user has already been told and sent to the login page.
        Err(Error::SessionExpired | Error::NotSignedIn) => process::exit(1),
        Err(e) => {
            error!("We encountered an error: {}", describe(&e));
            process::exit(1);
        }
    }
}
