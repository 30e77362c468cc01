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

use serde::{Deserialize, Serialize};
use serde_json::Value;

const LABEL_KEYS: &[&str] = &["label", "title", "text", "id"];

/// Opaque reference to supporting material.
///
/// The payload is never validated or reshaped: it travels to the citation
/// list and back out in click events exactly as the host supplied it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Citation(Value);

impl Citation {
    pub fn new(payload: Value) -> Self {
        Self(payload)
    }

    #[must_use]
    pub fn payload(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_payload(self) -> Value {
        self.0
    }

    /// The `id` field when present, otherwise the compact JSON text.
    #[must_use]
    pub fn id(&self) -> String {
        self.0.get("id").map_or_else(|| self.0.to_string(), scalar_text)
    }

    #[must_use]
    pub fn label(&self) -> String {
        if let Value::String(s) = &self.0 {
            return s.clone();
        }
        LABEL_KEYS
            .iter()
            .find_map(|key| self.0.get(*key))
            .map_or_else(|| self.0.to_string(), scalar_text)
    }
}

impl From<Value> for Citation {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
