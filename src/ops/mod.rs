// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! User commands against the catalog and the session.
//!
//! A batch of ops is applied to copies of the catalog and session and committed only if every
//! op succeeds, so a rejected op never leaves partial state behind. The returned delta tells the
//! caller which records need persisting and which views need refreshing.

use std::fmt;

use rand::Rng;

use crate::catalog::{CatalogError, CatalogStore};
use crate::compose::{self, ComposeError};
use crate::model::{
    CategoryId, CompositionMode, Delimiter, GenericCursor, ModifierLevel, NavCursor, QueryMode,
    SelectedItem, Session, SubcategoryId, ToggleOutcome, VariationId,
};
use crate::navigation::{self, Activation, NavError, OptionNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Nav(NavOp),
    Select(SelectOp),
    Output(OutputOp),
    Block(BlockOp),
    Catalog(CatalogOp),
    Modifier(ModifierOp),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOp {
    SwitchCategory { category_id: CategoryId },
    Activate { node: OptionNode },
    Up,
    SetSubcategoryFilter { filter: Option<SubcategoryId> },
    SetQuery { query: String },
    SetQueryMode { mode: QueryMode },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOp {
    Toggle { item: SelectedItem },
    Remove { variation_id: VariationId },
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputOp {
    Focus,
    Edit { text: String },
    Blur,
    ApplySuggestion { text: String },
    SetDelimiter { delimiter: Delimiter },
    SetMode { mode: CompositionMode },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOp {
    SetValue { index: usize, text: String },
    ToggleLock { index: usize },
    RandomizeUnlocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogOp {
    AddSubcategory { category_id: CategoryId, name: String },
    RemoveSubcategory { category_id: CategoryId, index: usize },
    AddVariation { category_id: CategoryId, sub_index: usize, label: String },
    RemoveVariation { category_id: CategoryId, sub_index: usize, var_index: usize },
    Reset { category_id: CategoryId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModifierOp {
    Add { level: ModifierLevel, value: String },
    Remove { level: ModifierLevel, index: usize },
    Reset,
}

/// Per-op result data the caller may want to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpOutcome {
    Done,
    Activated(Activation),
    Toggled(ToggleOutcome),
    EditingCleared(bool),
    Locked(bool),
    Randomized(usize),
    Added(String),
    Removed(String),
    Reset,
}

impl OpOutcome {
    /// Short confirmation for catalog and modifier edits.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            Self::Added(_) => Some("已添加"),
            Self::Removed(_) => Some("已刪除"),
            Self::Reset => Some("已重置為默認值"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub applied: usize,
    pub outcomes: Vec<OpOutcome>,
    pub delta: Delta,
}

/// Which parts of the state changed. Persistence writes the matching records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Delta {
    pub navigation: bool,
    pub selection: bool,
    pub output: bool,
    pub blocks: bool,
    pub catalog: bool,
    pub modifiers: bool,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether the session snapshot record is dirty.
    pub fn session_dirty(&self) -> bool {
        self.navigation || self.selection || self.output || self.blocks
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    delta: Delta,
}

impl DeltaBuilder {
    fn record_navigation(&mut self) {
        self.delta.navigation = true;
    }

    fn record_selection(&mut self) {
        self.delta.selection = true;
        self.delta.output = true;
    }

    fn record_output(&mut self) {
        self.delta.output = true;
    }

    fn record_blocks(&mut self) {
        self.delta.blocks = true;
        self.delta.output = true;
    }

    fn record_catalog(&mut self) {
        self.delta.catalog = true;
    }

    fn record_modifiers(&mut self) {
        self.delta.modifiers = true;
    }

    fn finish(self) -> Delta {
        self.delta
    }
}

pub fn apply_ops<R: Rng + ?Sized>(
    catalog: &mut CatalogStore,
    session: &mut Session,
    ops: &[Op],
    rng: &mut R,
) -> Result<ApplyResult, ApplyError> {
    if ops.is_empty() {
        return Ok(ApplyResult { applied: 0, outcomes: Vec::new(), delta: Delta::default() });
    }

    let mut next_catalog = catalog.clone();
    let mut next_session = session.clone();
    let mut delta = DeltaBuilder::default();
    let mut outcomes = Vec::with_capacity(ops.len());

    for op in ops {
        let outcome = match op {
            Op::Nav(op) => apply_nav_op(&next_catalog, &mut next_session, op, &mut delta)?,
            Op::Select(op) => apply_select_op(&mut next_session, op, &mut delta),
            Op::Output(op) => apply_output_op(&mut next_session, op, &mut delta),
            Op::Block(op) => {
                apply_block_op(&next_catalog, &mut next_session, op, rng, &mut delta)?
            }
            Op::Catalog(op) => apply_catalog_op(&mut next_catalog, &next_session, op, &mut delta)?,
            Op::Modifier(op) => apply_modifier_op(&mut next_catalog, op, &mut delta)?,
        };
        outcomes.push(outcome);
    }

    *catalog = next_catalog;
    *session = next_session;
    Ok(ApplyResult { applied: ops.len(), outcomes, delta: delta.finish() })
}

pub fn apply_op<R: Rng + ?Sized>(
    catalog: &mut CatalogStore,
    session: &mut Session,
    op: &Op,
    rng: &mut R,
) -> Result<ApplyResult, ApplyError> {
    apply_ops(catalog, session, std::slice::from_ref(op), rng)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    Catalog(CatalogError),
    Nav(NavError),
    Compose(ComposeError),
}

impl ApplyError {
    /// User-facing message for a rejected op.
    pub fn notice(&self) -> String {
        use crate::catalog::{EntryKind, Invariant};

        match self {
            Self::Catalog(CatalogError::InvariantViolation(Invariant::LastSubcategory)) => {
                "至少需要保留一個子分類".to_owned()
            }
            Self::Catalog(CatalogError::InvariantViolation(Invariant::LastModifier(_))) => {
                "至少需要保留一個修飾詞".to_owned()
            }
            Self::Catalog(CatalogError::DuplicateLabel { .. }) => "該選項已存在".to_owned(),
            Self::Catalog(CatalogError::EmptyLabel) => "請輸入名稱".to_owned(),
            Self::Catalog(CatalogError::UnsupportedShape { .. }) => {
                "此類別不支援編輯選項".to_owned()
            }
            Self::Catalog(CatalogError::NotFound { kind: EntryKind::Category, .. })
            | Self::Nav(NavError::NotFound { kind: EntryKind::Category, .. }) => {
                "找不到類別".to_owned()
            }
            Self::Catalog(CatalogError::NotFound { .. }) | Self::Nav(NavError::NotFound { .. }) => {
                "找不到項目".to_owned()
            }
            Self::Nav(NavError::StaleOption { .. }) => "選項已變更，請重新選擇".to_owned(),
            Self::Compose(ComposeError::AllBlocksLocked) => "所有區塊都已鎖定".to_owned(),
            Self::Compose(ComposeError::BlockLocked { .. }) => "區塊已鎖定".to_owned(),
            Self::Compose(ComposeError::BlockOutOfRange { .. }) => "找不到區塊".to_owned(),
        }
    }
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(err) => write!(f, "catalog: {err}"),
            Self::Nav(err) => write!(f, "navigation: {err}"),
            Self::Compose(err) => write!(f, "compose: {err}"),
        }
    }
}

impl std::error::Error for ApplyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Catalog(err) => Some(err),
            Self::Nav(err) => Some(err),
            Self::Compose(err) => Some(err),
        }
    }
}

impl From<CatalogError> for ApplyError {
    fn from(err: CatalogError) -> Self {
        Self::Catalog(err)
    }
}

impl From<NavError> for ApplyError {
    fn from(err: NavError) -> Self {
        Self::Nav(err)
    }
}

impl From<ComposeError> for ApplyError {
    fn from(err: ComposeError) -> Self {
        Self::Compose(err)
    }
}

// Per-group op handlers.
include!("ops_impl.rs");

#[cfg(test)]
mod tests;
