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

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("failed to load transcript from {path}: {reason}")]
    TranscriptLoad { path: String, reason: String },
    #[error("failed to load action buttons from {path}: {reason}")]
    ActionsLoad { path: String, reason: String },
    #[error("terminal setup failed: {0}")]
    Terminal(String),
}

impl AppError {
    pub const TRANSCRIPT_LOAD_EXIT_CODE: i32 = 20;
    pub const ACTIONS_LOAD_EXIT_CODE: i32 = 21;
    pub const TERMINAL_EXIT_CODE: i32 = 22;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::TranscriptLoad { .. } => Self::TRANSCRIPT_LOAD_EXIT_CODE,
            Self::ActionsLoad { .. } => Self::ACTIONS_LOAD_EXIT_CODE,
            Self::Terminal(_) => Self::TERMINAL_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::TranscriptLoad { .. } => {
                "Could not read the transcript file. Pass a JSON array of entries to --transcript."
            }
            Self::ActionsLoad { .. } => {
                "Could not read the action button file. Pass a JSON array to --actions."
            }
            Self::Terminal(_) => "The terminal could not be initialized.",
        }
    }
}
