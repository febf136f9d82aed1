// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;

use super::ids::VariationId;

/// A chosen leaf. The label is captured at selection time and never follows later catalog edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedItem {
    variation_id: VariationId,
    label: String,
}

impl SelectedItem {
    pub fn new(variation_id: VariationId, label: impl Into<String>) -> Self {
        Self { variation_id, label: label.into() }
    }

    pub fn variation_id(&self) -> &VariationId {
        &self.variation_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// Ordered set of selected leaves; ids are unique.
///
/// Items are ordered by the first time their id was toggled in this set (until `clear`), so an
/// item that is removed and toggled back in returns to its original slot. The rank table holds
/// one entry per distinct id toggled since the last `clear`.
///
/// Hand-edited output appends a re-added item at the end of the text, while auto composition
/// lists it in its original slot. Such text only matches auto composition again once the user
/// reorders it, so the editing flag stays set until then.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    items: Vec<SelectedItem>,
    first_toggled: HashMap<VariationId, u64>,
    next_rank: u64,
}

impl PartialEq for SelectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for SelectionSet {}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a set from persisted items, keeping the first occurrence of each id.
    pub fn from_items(items: impl IntoIterator<Item = SelectedItem>) -> Self {
        let mut set = Self::new();
        for item in items {
            if !set.contains(item.variation_id()) {
                set.insert_ranked(item);
            }
        }
        set
    }

    pub fn items(&self) -> &[SelectedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, variation_id: &VariationId) -> bool {
        self.items.iter().any(|item| item.variation_id() == variation_id)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(SelectedItem::label)
    }

    pub fn toggle(&mut self, item: SelectedItem) -> ToggleOutcome {
        if self.remove(item.variation_id()) {
            ToggleOutcome::Removed
        } else {
            self.insert_ranked(item);
            ToggleOutcome::Added
        }
    }

    fn rank_of(&mut self, variation_id: &VariationId) -> u64 {
        if let Some(rank) = self.first_toggled.get(variation_id) {
            return *rank;
        }
        let rank = self.next_rank;
        self.next_rank += 1;
        self.first_toggled.insert(variation_id.clone(), rank);
        rank
    }

    fn insert_ranked(&mut self, item: SelectedItem) {
        let rank = self.rank_of(item.variation_id());
        let position = self
            .items
            .iter()
            .position(|existing| {
                self.first_toggled.get(existing.variation_id()).is_some_and(|r| *r > rank)
            })
            .unwrap_or(self.items.len());
        self.items.insert(position, item);
    }

    /// Returns whether an item was removed.
    pub fn remove(&mut self, variation_id: &VariationId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.variation_id() != variation_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.first_toggled.clear();
        self.next_rank = 0;
    }
}
