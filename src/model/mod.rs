// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Catalog types (categories, subcategories, variations, scene modifiers) plus the per-session
//! state the user mutates while composing a prompt.

pub mod blocks;
pub mod catalog;
pub mod cursor;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod selection;
pub mod session;

pub use blocks::{default_block_specs, Block, BlockList, BlockSpec};
pub use catalog::{
    scene_label, Category, CategoryShape, ModifierLevel, SceneModifiers, ShapeKind, Subcategory,
    Variation,
};
pub use cursor::{GenericCursor, NavCursor, SceneCursor};
pub use ids::{CategoryId, Id, IdError, SubcategoryId, VariationId};
pub use selection::{SelectedItem, SelectionSet, ToggleOutcome};
pub use session::{
    CompositionMode, Delimiter, OutputBuffer, QueryMode, Session, DEFAULT_DELIMITER,
};
