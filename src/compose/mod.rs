// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Output composition and hand-edit reconciliation.
//!
//! While `is_user_editing` is clear the output always equals [`auto_text`]. Once the user edits
//! the text, newly added selections are appended to whatever is there instead. The flag clears
//! when the output loses focus with text equal (after trimming) to the auto-composed text.
//!
//! Block edits (set, randomize) count as an explicit request for automatic composition: they
//! clear the editing flag and regenerate.

use std::fmt;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::catalog::CatalogStore;
use crate::model::{CompositionMode, Delimiter, SelectedItem, Session};

/// Separator between non-empty block values.
pub const BLOCK_DELIMITER: &str = ", ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    AllBlocksLocked,
    BlockLocked { index: usize },
    BlockOutOfRange { index: usize, len: usize },
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllBlocksLocked => f.write_str("every block is locked"),
            Self::BlockLocked { index } => write!(f, "block {index} is locked"),
            Self::BlockOutOfRange { index, len } => {
                write!(f, "block index {index} out of range (len={len})")
            }
        }
    }
}

impl std::error::Error for ComposeError {}

pub fn selection_text(session: &Session) -> String {
    let labels = session.selection().labels().collect::<Vec<_>>();
    labels.join(session.delimiter().separator())
}

pub fn block_text(session: &Session) -> String {
    let values = session
        .blocks()
        .blocks()
        .iter()
        .filter(|b| b.has_content())
        .map(|b| b.value())
        .collect::<Vec<_>>();
    values.join(BLOCK_DELIMITER)
}

/// What automatic composition would produce for the current session.
pub fn auto_text(session: &Session) -> String {
    if uses_blocks(session) {
        block_text(session)
    } else {
        selection_text(session)
    }
}

fn uses_blocks(session: &Session) -> bool {
    session.composition_mode() == CompositionMode::Blocks && session.blocks().has_content()
}

fn append_separator(session: &Session) -> &str {
    if uses_blocks(session) {
        BLOCK_DELIMITER
    } else {
        session.delimiter().separator()
    }
}

/// Overwrites the output with the auto-composed text and resyncs the baseline.
pub fn regenerate(session: &mut Session) {
    let text = auto_text(session);
    let count = session.selection().len();
    let output = session.output_mut();
    output.set_text(text);
    output.set_last_synced_selection_count(count);
}

/// Reconciles the output after the selection changed. `added` is the item that just joined the
/// selection, if any. While editing it is appended to the text even when the selection order
/// places it earlier (see [`crate::model::SelectionSet`]).
pub fn selection_changed(session: &mut Session, added: Option<&SelectedItem>) {
    if !session.output().is_user_editing() {
        regenerate(session);
        return;
    }

    if let Some(item) = added {
        let separator = append_separator(session).to_owned();
        let output = session.output_mut();
        if output.text().trim().is_empty() {
            output.set_text(item.label());
        } else {
            output.push_str(&separator);
            output.push_str(item.label());
        }
    }
    let count = session.selection().len();
    session.output_mut().set_last_synced_selection_count(count);
}

/// The output surface gained focus.
pub fn begin_edit(session: &mut Session) {
    let count = session.selection().len();
    let output = session.output_mut();
    output.set_user_editing(true);
    output.set_last_synced_selection_count(count);
}

/// The user typed into the output surface.
pub fn edit_output(session: &mut Session, text: impl Into<String>) {
    begin_edit(session);
    session.output_mut().set_text(text);
}

/// The output surface lost focus. Returns whether the editing flag was cleared.
pub fn end_edit(session: &mut Session) -> bool {
    if !session.output().is_user_editing() {
        return false;
    }
    if session.output().text().trim() != auto_text(session).trim() {
        return false;
    }
    let count = session.selection().len();
    let output = session.output_mut();
    output.set_user_editing(false);
    output.set_last_synced_selection_count(count);
    true
}

/// Empties the selection. Hand-edited text is kept.
pub fn clear_selection(session: &mut Session) {
    session.selection_mut().clear();
    if session.output().is_user_editing() {
        session.output_mut().set_last_synced_selection_count(0);
    } else {
        regenerate(session);
    }
}

/// Replaces the output with a suggestion; the result counts as a hand edit.
pub fn apply_suggestion(session: &mut Session, text: impl Into<String>) {
    edit_output(session, text);
}

pub fn set_delimiter(session: &mut Session, delimiter: Delimiter) {
    session.set_delimiter(delimiter);
    if !session.output().is_user_editing() {
        regenerate(session);
    }
}

pub fn set_composition_mode(session: &mut Session, mode: CompositionMode) {
    session.set_composition_mode(mode);
    if !session.output().is_user_editing() {
        regenerate(session);
    }
}

/// After a restore: hand-edit tracking is on iff the stored text differs from auto composition.
pub fn reconcile_restored(session: &mut Session) {
    let editing = session.output().text() != auto_text(session);
    let count = session.selection().len();
    let output = session.output_mut();
    output.set_user_editing(editing);
    output.set_last_synced_selection_count(count);
}

fn finish_block_edit(session: &mut Session) {
    session.output_mut().set_user_editing(false);
    regenerate(session);
}

pub fn set_block_value(
    session: &mut Session,
    index: usize,
    text: impl Into<String>,
) -> Result<(), ComposeError> {
    let len = session.blocks().len();
    let Some(block) = session.blocks_mut().get_mut(index) else {
        return Err(ComposeError::BlockOutOfRange { index, len });
    };
    if block.is_locked() {
        return Err(ComposeError::BlockLocked { index });
    }
    block.set_value(text);
    finish_block_edit(session);
    Ok(())
}

/// Flips the lock of block `index`, returning the new state.
pub fn toggle_lock(session: &mut Session, index: usize) -> Result<bool, ComposeError> {
    let len = session.blocks().len();
    let Some(block) = session.blocks_mut().get_mut(index) else {
        return Err(ComposeError::BlockOutOfRange { index, len });
    };
    let locked = !block.is_locked();
    block.set_locked(locked);
    Ok(locked)
}

/// Draws a random pool label for every unlocked block. Blocks whose pool has no labels keep
/// their value. Returns the number of blocks that received a draw.
pub fn randomize_unlocked<R: Rng + ?Sized>(
    catalog: &CatalogStore,
    session: &mut Session,
    rng: &mut R,
) -> Result<usize, ComposeError> {
    if session.blocks().all_locked() {
        return Err(ComposeError::AllBlocksLocked);
    }

    let mut drawn = 0;
    for index in 0..session.blocks().len() {
        let Some(block) = session.blocks().get(index) else {
            continue;
        };
        if block.is_locked() {
            continue;
        }
        let pool = block
            .pool()
            .iter()
            .flat_map(|category_id| catalog.leaf_labels(category_id))
            .collect::<Vec<_>>();
        let Some(choice) = pool.choose(rng) else {
            continue;
        };
        let choice = choice.clone();
        if let Some(block) = session.blocks_mut().get_mut(index) {
            block.set_value(choice);
            drawn += 1;
        }
    }

    finish_block_edit(session);
    Ok(drawn)
}

#[cfg(test)]
mod tests;
