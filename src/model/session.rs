// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::blocks::BlockList;
use super::catalog::ShapeKind;
use super::cursor::NavCursor;
use super::ids::{CategoryId, SubcategoryId};
use super::selection::SelectionSet;

pub const DEFAULT_DELIMITER: &str = ", ";

/// Separator used by selection-based composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiter {
    text: String,
    newlines: bool,
}

impl Default for Delimiter {
    fn default() -> Self {
        Self { text: DEFAULT_DELIMITER.to_owned(), newlines: false }
    }
}

impl Delimiter {
    pub fn new(text: impl Into<String>, newlines: bool) -> Self {
        Self { text: text.into(), newlines }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn newlines(&self) -> bool {
        self.newlines
    }

    pub fn separator(&self) -> &str {
        if self.newlines {
            "\n"
        } else {
            &self.text
        }
    }
}

/// Which composition path produces the output text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompositionMode {
    /// Block values joined in block order; falls back to the selection when every block is empty.
    #[default]
    Blocks,
    /// Selected labels joined with the configured delimiter.
    Selection,
}

/// How the option query is matched against labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryMode {
    /// Case-insensitive substring.
    #[default]
    Substring,
    /// Case-insensitive regular expression.
    Regex,
}

/// The composed/edited prompt text plus hand-edit tracking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    text: String,
    is_user_editing: bool,
    last_synced_selection_count: usize,
}

impl OutputBuffer {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_user_editing(&self) -> bool {
        self.is_user_editing
    }

    pub fn last_synced_selection_count(&self) -> usize {
        self.last_synced_selection_count
    }

    pub(crate) fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn set_user_editing(&mut self, editing: bool) {
        self.is_user_editing = editing;
    }

    pub(crate) fn set_last_synced_selection_count(&mut self, count: usize) {
        self.last_synced_selection_count = count;
    }
}

/// All mutable state of one prompt-building session.
///
/// The catalog lives in `CatalogStore`; this struct only holds what the user changes while
/// browsing and composing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    active_category_id: Option<CategoryId>,
    subcategory_filter: Option<SubcategoryId>,
    query: String,
    query_mode: QueryMode,
    nav: BTreeMap<CategoryId, NavCursor>,
    selection: SelectionSet,
    delimiter: Delimiter,
    output: OutputBuffer,
    blocks: BlockList,
    composition_mode: CompositionMode,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blocks(mut self, blocks: BlockList) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn active_category_id(&self) -> Option<&CategoryId> {
        self.active_category_id.as_ref()
    }

    pub fn set_active_category_id(&mut self, category_id: Option<CategoryId>) {
        self.active_category_id = category_id;
    }

    pub fn subcategory_filter(&self) -> Option<&SubcategoryId> {
        self.subcategory_filter.as_ref()
    }

    pub fn set_subcategory_filter(&mut self, filter: Option<SubcategoryId>) {
        self.subcategory_filter = filter;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query_mode(&self) -> QueryMode {
        self.query_mode
    }

    pub fn set_query_mode(&mut self, mode: QueryMode) {
        self.query_mode = mode;
    }

    pub fn nav(&self) -> &BTreeMap<CategoryId, NavCursor> {
        &self.nav
    }

    pub fn nav_cursor(&self, category_id: &CategoryId) -> Option<&NavCursor> {
        self.nav.get(category_id)
    }

    /// Returns the cursor for `category_id`, creating a root cursor of the right shape on demand.
    pub fn nav_cursor_mut(
        &mut self,
        category_id: &CategoryId,
        shape: ShapeKind,
    ) -> Option<&mut NavCursor> {
        let root = NavCursor::root_for(shape)?;
        let cursor = self.nav.entry(category_id.clone()).or_insert_with(|| root.clone());
        if cursor.shape() != shape {
            *cursor = root;
        }
        Some(cursor)
    }

    pub fn reset_nav(&mut self, category_id: &CategoryId, shape: ShapeKind) {
        match NavCursor::root_for(shape) {
            Some(root) => {
                self.nav.insert(category_id.clone(), root);
            }
            None => {
                self.nav.remove(category_id);
            }
        }
    }

    pub fn set_nav(&mut self, nav: BTreeMap<CategoryId, NavCursor>) {
        self.nav = nav;
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }

    pub fn delimiter(&self) -> &Delimiter {
        &self.delimiter
    }

    pub fn set_delimiter(&mut self, delimiter: Delimiter) {
        self.delimiter = delimiter;
    }

    pub fn output(&self) -> &OutputBuffer {
        &self.output
    }

    pub(crate) fn output_mut(&mut self) -> &mut OutputBuffer {
        &mut self.output
    }

    pub fn blocks(&self) -> &BlockList {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut BlockList {
        &mut self.blocks
    }

    pub fn composition_mode(&self) -> CompositionMode {
        self.composition_mode
    }

    pub fn set_composition_mode(&mut self, mode: CompositionMode) {
        self.composition_mode = mode;
    }
}
