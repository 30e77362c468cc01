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

use std::ops::Range;

/// A clickable element of the rendered transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickTarget {
    ActionButton { entry: usize, button: usize },
    CopyResponse { entry: usize },
    Citation { entry: usize, citation: usize },
    Followup { entry: usize, question: usize },
}

/// Clickable span of one visual row, in content coordinates (row 0 is the
/// first row of the transcript, not of the viewport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRegion {
    pub row: usize,
    pub cols: Range<usize>,
    pub target: ClickTarget,
    pub enabled: bool,
}

/// Row/column → target table rebuilt on every layout pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    regions: Vec<HitRegion>,
}

impl HitMap {
    pub fn push(&mut self, region: HitRegion) {
        self.regions.push(region);
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    #[must_use]
    pub fn regions(&self) -> &[HitRegion] {
        &self.regions
    }

    #[must_use]
    pub fn region_at(&self, row: usize, col: usize) -> Option<&HitRegion> {
        self.regions.iter().find(|r| r.row == row && r.cols.contains(&col))
    }

    #[must_use]
    pub fn row_of(&self, target: ClickTarget) -> Option<usize> {
        self.regions.iter().find(|r| r.target == target).map(|r| r.row)
    }

    /// Enabled targets in reading order, once each even when a target
    /// spans several rows.
    fn focus_ring(&self) -> Vec<ClickTarget> {
        let mut ring: Vec<ClickTarget> =
            self.regions.iter().filter(|r| r.enabled).map(|r| r.target).collect();
        ring.dedup();
        ring
    }

    /// Next enabled target after `current` in reading order, wrapping around.
    #[must_use]
    pub fn next_focus(&self, current: Option<ClickTarget>) -> Option<ClickTarget> {
        let enabled = self.focus_ring();
        let pos = current.and_then(|c| enabled.iter().position(|t| *t == c));
        match pos {
            Some(i) => enabled.get((i + 1) % enabled.len()).copied(),
            None => enabled.first().copied(),
        }
    }

    #[must_use]
    pub fn prev_focus(&self, current: Option<ClickTarget>) -> Option<ClickTarget> {
        let enabled = self.focus_ring();
        let pos = current.and_then(|c| enabled.iter().position(|t| *t == c));
        match pos {
            Some(0) | None => enabled.last().copied(),
            Some(i) => enabled.get(i - 1).copied(),
        }
    }
}
