// chat_transcript — A terminal chat transcript view
// Copyright (C) 2025  Simon Peter Rothgang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use chat_transcript::Cli;
use chat_transcript::app::{EventEmitter, Host, HostUpdate, TranscriptView, apply_host_update};
use chat_transcript::error::AppError;
use chat_transcript::transcript::{self, TranscriptEntry};
use clap::Parser;
use std::fs::OpenOptions;

const SIMULATED_PROMPT: &str = "Which scopes does a deploy key need?";

#[allow(clippy::exit)]
fn main() {
    if let Err(err) = run() {
        if let Some(app_error) = extract_app_error(&err) {
            eprintln!("{}", app_error.user_message());
            std::process::exit(app_error.exit_code());
        }
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;

    let entries = match cli.transcript.as_deref() {
        Some(path) => transcript::load_transcript(path)?,
        None => transcript::sample_transcript(),
    };
    let buttons = match cli.actions.as_deref() {
        Some(path) => transcript::load_action_buttons(path)?,
        None => transcript::default_action_buttons(),
    };
    tracing::info!(entries = entries.len(), buttons = buttons.len(), "transcript loaded");

    let rt = tokio::runtime::Runtime::new()?;
    let local_set = tokio::task::LocalSet::new();

    rt.block_on(local_set.run_until(async move {
        let (emitter, events_rx) = EventEmitter::channel();
        let mut view = TranscriptView::new(cli.config(), emitter);
        view.set_chat_thread(entries);
        view.set_action_buttons(buttons);
        view.set_disabled(cli.disabled);

        let mut host = Host::new(events_rx, cli.stream_interval());
        if cli.simulate_stream {
            apply_host_update(
                &mut view,
                HostUpdate::UserMessage(TranscriptEntry::user(
                    SIMULATED_PROMPT,
                    chat_transcript::app::stream::clock_timestamp(),
                )),
            );
            host.start_reply(SIMULATED_PROMPT);
        }

        chat_transcript::app::run_tui(&mut view, &mut host).await
    }))
}

fn extract_app_error(err: &anyhow::Error) -> Option<AppError> {
    err.chain().find_map(|cause| cause.downcast_ref::<AppError>().cloned())
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let Some(path) = cli.log_file.as_ref() else {
        if std::env::var_os("RUST_LOG").is_some() {
            eprintln!(
                "RUST_LOG is set, but tracing is disabled without --log-file <PATH>. \
Use --log-file to enable diagnostics."
            );
        }
        return Ok(());
    };

    let directives = cli
        .log_filter
        .clone()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_owned());
    let filter = tracing_subscriber::EnvFilter::try_new(directives.as_str())
        .map_err(|e| anyhow::anyhow!("invalid tracing filter `{directives}`: {e}"))?;

    let mut options = OpenOptions::new();
    options.create(true).write(true);
    if cli.log_append {
        options.append(true);
    } else {
        options.truncate(true);
    }
    let file = options
        .open(path)
        .map_err(|e| anyhow::anyhow!("failed to open log file {}: {e}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {e}"))?;

    tracing::info!(
        target: "diagnostics",
        version = env!("CARGO_PKG_VERSION"),
        log_file = %path.display(),
        log_filter = %directives,
        log_append = cli.log_append,
        "tracing enabled"
    );

    Ok(())
}
