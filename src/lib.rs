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

pub mod app;
pub mod config;
pub mod error;
pub mod transcript;
pub mod ui;

use clap::Parser;
use config::TranscriptConfig;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "chat-transcript", about = "Terminal view of a chat transcript")]
pub struct Cli {
    /// Transcript to show (JSON array of entries). Uses a built-in sample if omitted.
    #[arg(long)]
    pub transcript: Option<PathBuf>,

    /// Action buttons for assistant entries (JSON array)
    #[arg(long)]
    pub actions: Option<PathBuf>,

    /// Author label on assistant entries
    #[arg(long, default_value = "Assistant")]
    pub bot_label: String,

    /// Quiet period before auto-scrolling to the newest content
    #[arg(long, default_value_t = 500)]
    pub scroll_quiet_ms: u64,

    /// Stream a simulated reply after startup
    #[arg(long)]
    pub simulate_stream: bool,

    /// Delay between updates of a simulated reply
    #[arg(long, default_value_t = 650)]
    pub stream_interval_ms: u64,

    /// Start with all controls disabled
    #[arg(long)]
    pub disabled: bool,

    /// Write tracing diagnostics to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Tracing filter directives (falls back to RUST_LOG, then `info`)
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Append to the log file instead of truncating it
    #[arg(long)]
    pub log_append: bool,
}

impl Cli {
    #[must_use]
    pub fn config(&self) -> TranscriptConfig {
        TranscriptConfig::default()
            .with_bot_label(self.bot_label.clone())
            .with_scroll_quiet_period(Duration::from_millis(self.scroll_quiet_ms))
    }

    #[must_use]
    pub fn stream_interval(&self) -> Duration {
        Duration::from_millis(self.stream_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cli = Cli::parse_from(["chat-transcript"]);
        let config = cli.config();
        assert_eq!(config.bot_label, "Assistant");
        assert_eq!(config.scroll_quiet_period, Duration::from_millis(500));
        assert!(!cli.disabled);
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn flags_flow_into_config() {
        let cli = Cli::parse_from([
            "chat-transcript",
            "--bot-label",
            "Helper",
            "--scroll-quiet-ms",
            "120",
            "--disabled",
        ]);
        let config = cli.config();
        assert_eq!(config.bot_label, "Helper");
        assert_eq!(config.scroll_quiet_period, Duration::from_millis(120));
        assert!(cli.disabled);
    }
}
