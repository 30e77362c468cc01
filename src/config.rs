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

use std::time::Duration;

/// Quiet period after the last content-growth signal before auto-scroll fires.
pub const DEFAULT_SCROLL_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Labels and timings the transcript view is configured with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptConfig {
    /// Author label on assistant entries.
    pub bot_label: String,
    pub user_label: String,
    pub copy_label: String,
    pub copied_label: String,
    pub copy_icon: String,
    pub copied_icon: String,
    /// Heading passed to the citation list.
    pub citations_label: String,
    pub followups_label: String,
    pub scroll_quiet_period: Duration,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            bot_label: "Assistant".to_owned(),
            user_label: "You".to_owned(),
            copy_label: "Copy response".to_owned(),
            copied_label: "Copied".to_owned(),
            copy_icon: "\u{2398}".to_owned(),
            copied_icon: "\u{2713}".to_owned(),
            citations_label: "Citations".to_owned(),
            followups_label: "Follow-up questions".to_owned(),
            scroll_quiet_period: DEFAULT_SCROLL_QUIET_PERIOD,
        }
    }
}

impl TranscriptConfig {
    #[must_use]
    pub fn with_bot_label(mut self, label: impl Into<String>) -> Self {
        self.bot_label = label.into();
        self
    }

    #[must_use]
    pub fn with_scroll_quiet_period(mut self, quiet: Duration) -> Self {
        self.scroll_quiet_period = quiet;
        self
    }
}
