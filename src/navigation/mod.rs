// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-category drill-down.
//!
//! The option list for the active category is derived from the catalog and the session's
//! cursor every time it is needed. A cursor that points at something the catalog no longer has
//! (a removed subcategory, a deleted modifier) is read as the nearest valid ancestor.

use std::borrow::Cow;
use std::fmt;

use crate::catalog::{CatalogStore, EntryKind};
use crate::model::{
    scene_label, Category, CategoryId, CategoryShape, GenericCursor, NavCursor, SceneCursor,
    SceneModifiers, SelectedItem, Session, SubcategoryId, ToggleOutcome, VariationId,
};

pub mod query;

pub use query::LabelMatcher;

pub const HOME_LABEL: &str = "首頁";
pub const MANAGE_CATALOG_LABEL: &str = "管理選項";
pub const MANAGE_MODIFIERS_LABEL: &str = "管理修飾詞";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    NotFound { kind: EntryKind, key: String },
    /// The option is not part of the current listing (the cursor moved or the catalog changed).
    StaleOption { label: String },
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { kind, key } => write!(f, "{kind:?} not found ({key})"),
            Self::StaleOption { label } => write!(f, "option is no longer available: {label}"),
        }
    }
}

impl std::error::Error for NavError {}

/// What a synthetic "manage" node opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManageTarget {
    Catalog(CategoryId),
    SceneModifiers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafOption {
    pub variation_id: VariationId,
    pub label: String,
    pub subcategory_name: Option<String>,
    /// Leaves at the final drill-down depth send the cursor back to root once added.
    pub completes_navigation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionNode {
    Subcategory { subcategory_id: SubcategoryId, name: String },
    SceneType { scene_type: String },
    FirstModifier { scene_type: String, modifier: String },
    Leaf(LeafOption),
    Manage(ManageTarget),
}

impl OptionNode {
    pub fn label(&self) -> Cow<'_, str> {
        match self {
            Self::Subcategory { name, .. } => Cow::Borrowed(name),
            Self::SceneType { scene_type } => Cow::Borrowed(scene_type),
            Self::FirstModifier { scene_type, modifier } => {
                Cow::Owned(scene_label(scene_type, modifier, None))
            }
            Self::Leaf(leaf) => Cow::Borrowed(&leaf.label),
            Self::Manage(ManageTarget::Catalog(_)) => Cow::Borrowed(MANAGE_CATALOG_LABEL),
            Self::Manage(ManageTarget::SceneModifiers) => Cow::Borrowed(MANAGE_MODIFIERS_LABEL),
        }
    }

    pub fn is_manage(&self) -> bool {
        matches!(self, Self::Manage(_))
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    fn matches(&self, matcher: &LabelMatcher) -> bool {
        match self {
            Self::Leaf(LeafOption { label, subcategory_name: Some(sub), .. }) => {
                matcher.is_match(label) || matcher.is_match(sub)
            }
            _ => matcher.is_match(&self.label()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavOption {
    pub node: OptionNode,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionList {
    pub category_id: CategoryId,
    /// 1-based drill-down depth; static categories are always 1.
    pub depth: u8,
    pub options: Vec<NavOption>,
    /// Visible options excluding synthetic manage nodes.
    pub count: usize,
    /// Set when a regex query does not compile; nothing matches in that case.
    pub query_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    Navigated,
    Toggled { item: SelectedItem, outcome: ToggleOutcome, nav_reset: bool },
    OpenManager(ManageTarget),
}

pub fn active_category<'a>(
    catalog: &'a CatalogStore,
    session: &Session,
) -> Result<&'a Category, NavError> {
    let category_id = session
        .active_category_id()
        .or_else(|| catalog.first_category_id())
        .ok_or_else(|| NavError::NotFound {
            kind: EntryKind::Category,
            key: String::new(),
        })?;
    catalog.get_category(category_id).map_err(|_| NavError::NotFound {
        kind: EntryKind::Category,
        key: category_id.to_string(),
    })
}

/// Makes `category_id` active, clears the subcategory filter and resets its cursor.
pub fn switch_category(
    catalog: &CatalogStore,
    session: &mut Session,
    category_id: &CategoryId,
) -> Result<(), NavError> {
    let category = catalog.get_category(category_id).map_err(|_| NavError::NotFound {
        kind: EntryKind::Category,
        key: category_id.to_string(),
    })?;
    let shape = category.shape().kind();
    session.set_active_category_id(Some(category_id.clone()));
    session.set_subcategory_filter(None);
    session.reset_nav(category_id, shape);
    Ok(())
}

pub fn set_subcategory_filter(
    catalog: &CatalogStore,
    session: &mut Session,
    filter: Option<SubcategoryId>,
) -> Result<(), NavError> {
    if let Some(subcategory_id) = &filter {
        let category = active_category(catalog, session)?;
        if category.find_subcategory(subcategory_id).is_none() {
            return Err(NavError::NotFound {
                kind: EntryKind::Subcategory,
                key: subcategory_id.to_string(),
            });
        }
    }
    session.set_subcategory_filter(filter);
    Ok(())
}

/// The session cursor for `category`, clamped to what the catalog still contains.
pub fn effective_cursor(
    category: &Category,
    modifiers: &SceneModifiers,
    session: &Session,
) -> Option<NavCursor> {
    let root = NavCursor::root_for(category.shape().kind())?;
    let Some(cursor) = session.nav_cursor(category.category_id()) else {
        return Some(root);
    };

    let clamped = match cursor {
        NavCursor::Generic(GenericCursor::SubcategorySelected(subcategory_id))
            if category.find_subcategory(subcategory_id).is_some() =>
        {
            cursor.clone()
        }
        NavCursor::Scene(SceneCursor::TypeSelected { scene_type })
            if has_scene_type(category, scene_type) =>
        {
            cursor.clone()
        }
        NavCursor::Scene(SceneCursor::BothSelected { scene_type, first_modifier })
            if has_scene_type(category, scene_type) =>
        {
            if modifiers.first().contains(first_modifier) {
                cursor.clone()
            } else {
                NavCursor::Scene(SceneCursor::TypeSelected { scene_type: scene_type.clone() })
            }
        }
        _ => root,
    };
    if clamped.shape() == category.shape().kind() {
        Some(clamped)
    } else {
        NavCursor::root_for(category.shape().kind())
    }
}

fn has_scene_type(category: &Category, scene_type: &str) -> bool {
    category.scene_types().iter().any(|t| t == scene_type)
}

/// Every option at the current depth, before query filtering.
fn current_nodes(
    category: &Category,
    modifiers: &SceneModifiers,
    session: &Session,
) -> (u8, Vec<OptionNode>) {
    let cursor = effective_cursor(category, modifiers, session);
    let depth = cursor.as_ref().map_or(1, NavCursor::depth);

    let nodes = match (category.shape(), cursor) {
        (CategoryShape::Static, _) => {
            let filter = session
                .subcategory_filter()
                .filter(|id| category.find_subcategory(id).is_some());
            category
                .subcategories()
                .iter()
                .filter(|s| filter.map_or(true, |id| s.subcategory_id() == id))
                .flat_map(|s| {
                    s.variations().iter().map(|v| {
                        OptionNode::Leaf(LeafOption {
                            variation_id: v.variation_id().clone(),
                            label: v.label().to_owned(),
                            subcategory_name: Some(s.name().to_owned()),
                            completes_navigation: false,
                        })
                    })
                })
                .collect()
        }
        (_, Some(NavCursor::Generic(GenericCursor::SubcategorySelected(subcategory_id)))) => {
            category
                .find_subcategory(&subcategory_id)
                .map(|s| {
                    s.variations()
                        .iter()
                        .map(|v| {
                            OptionNode::Leaf(LeafOption {
                                variation_id: v.variation_id().clone(),
                                label: v.label().to_owned(),
                                subcategory_name: None,
                                completes_navigation: true,
                            })
                        })
                        .collect()
                })
                .unwrap_or_default()
        }
        (_, Some(NavCursor::Generic(GenericCursor::Root))) => category
            .subcategories()
            .iter()
            .map(|s| OptionNode::Subcategory {
                subcategory_id: s.subcategory_id().clone(),
                name: s.name().to_owned(),
            })
            .chain(std::iter::once(OptionNode::Manage(ManageTarget::Catalog(
                category.category_id().clone(),
            ))))
            .collect(),
        (_, Some(NavCursor::Scene(SceneCursor::Root))) => category
            .scene_types()
            .iter()
            .map(|t| OptionNode::SceneType { scene_type: t.clone() })
            .chain(std::iter::once(OptionNode::Manage(ManageTarget::SceneModifiers)))
            .collect(),
        (_, Some(NavCursor::Scene(SceneCursor::TypeSelected { scene_type }))) => modifiers
            .first()
            .iter()
            .map(|m| OptionNode::FirstModifier {
                scene_type: scene_type.clone(),
                modifier: m.clone(),
            })
            .collect(),
        (_, Some(NavCursor::Scene(SceneCursor::BothSelected { scene_type, first_modifier }))) => {
            modifiers
                .second()
                .iter()
                .filter_map(|second| {
                    let id = format!("scene-final-{scene_type}-{first_modifier}-{second}");
                    let variation_id = VariationId::new(id).ok()?;
                    Some(OptionNode::Leaf(LeafOption {
                        variation_id,
                        label: scene_label(&scene_type, &first_modifier, Some(second)),
                        subcategory_name: None,
                        completes_navigation: true,
                    }))
                })
                .collect()
        }
        (_, None) => Vec::new(),
    };
    (depth, nodes)
}

/// The option list for the active category, filtered by the session query.
pub fn visible_options(catalog: &CatalogStore, session: &Session) -> Result<OptionList, NavError> {
    let category = active_category(catalog, session)?;
    let (depth, nodes) = current_nodes(category, catalog.scene_modifiers(), session);

    let (matcher, query_error) = match LabelMatcher::new(session.query(), session.query_mode()) {
        Ok(matcher) => (Some(matcher), None),
        Err(err) => (None, Some(err.to_string())),
    };

    let options = nodes
        .into_iter()
        .filter(|node| matcher.as_ref().is_some_and(|m| node.matches(m)))
        .map(|node| {
            let selected = match &node {
                OptionNode::Leaf(leaf) => session.selection().contains(&leaf.variation_id),
                _ => false,
            };
            NavOption { node, selected }
        })
        .collect::<Vec<_>>();
    let count = options.iter().filter(|o| !o.node.is_manage()).count();

    Ok(OptionList {
        category_id: category.category_id().clone(),
        depth,
        options,
        count,
        query_error,
    })
}

/// Runs the click/enter action for `node` in the active category.
///
/// The node must be part of the current unfiltered listing.
pub fn activate(
    catalog: &CatalogStore,
    session: &mut Session,
    node: &OptionNode,
) -> Result<Activation, NavError> {
    let category = active_category(catalog, session)?;
    let category_id = category.category_id().clone();
    let shape = category.shape().kind();
    let (_, nodes) = current_nodes(category, catalog.scene_modifiers(), session);
    if !nodes.contains(node) {
        return Err(NavError::StaleOption { label: node.label().into_owned() });
    }

    let next = match node {
        OptionNode::Manage(target) => return Ok(Activation::OpenManager(target.clone())),
        OptionNode::Leaf(leaf) => {
            let item = SelectedItem::new(leaf.variation_id.clone(), leaf.label.clone());
            let outcome = session.selection_mut().toggle(item.clone());
            let nav_reset = leaf.completes_navigation && outcome == ToggleOutcome::Added;
            if nav_reset {
                session.reset_nav(&category_id, shape);
            }
            return Ok(Activation::Toggled {
                item,
                outcome,
                nav_reset,
            });
        }
        OptionNode::Subcategory { subcategory_id, .. } => {
            NavCursor::Generic(GenericCursor::SubcategorySelected(subcategory_id.clone()))
        }
        OptionNode::SceneType { scene_type } => {
            NavCursor::Scene(SceneCursor::TypeSelected { scene_type: scene_type.clone() })
        }
        OptionNode::FirstModifier { scene_type, modifier } => {
            NavCursor::Scene(SceneCursor::BothSelected {
                scene_type: scene_type.clone(),
                first_modifier: modifier.clone(),
            })
        }
    };
    if let Some(cursor) = session.nav_cursor_mut(&category_id, shape) {
        *cursor = next;
    }
    Ok(Activation::Navigated)
}

/// Moves one level up. For static categories this clears the subcategory filter.
/// Returns whether anything changed.
pub fn navigate_up(catalog: &CatalogStore, session: &mut Session) -> Result<bool, NavError> {
    let category = active_category(catalog, session)?;
    let category_id = category.category_id().clone();
    let shape = category.shape().kind();

    let parent = match effective_cursor(category, catalog.scene_modifiers(), session) {
        None => {
            let had_filter = session.subcategory_filter().is_some();
            session.set_subcategory_filter(None);
            return Ok(had_filter);
        }
        Some(cursor) if cursor.is_root() => return Ok(false),
        Some(NavCursor::Scene(SceneCursor::BothSelected { scene_type, .. })) => {
            NavCursor::Scene(SceneCursor::TypeSelected { scene_type })
        }
        Some(cursor) => match NavCursor::root_for(cursor.shape()) {
            Some(root) => root,
            None => return Ok(false),
        },
    };
    if let Some(cursor) = session.nav_cursor_mut(&category_id, shape) {
        *cursor = parent;
    }
    Ok(true)
}

/// `首頁 ▸ <category> ▸ ...` segments for the active category.
pub fn breadcrumbs(catalog: &CatalogStore, session: &Session) -> Vec<String> {
    let Ok(category) = active_category(catalog, session) else {
        return vec![HOME_LABEL.to_owned()];
    };
    let mut crumbs = vec![HOME_LABEL.to_owned(), category.name().to_owned()];

    match effective_cursor(category, catalog.scene_modifiers(), session) {
        None => {
            if let Some(sub) = session.subcategory_filter().and_then(|id| category.find_subcategory(id))
            {
                crumbs.push(sub.name().to_owned());
            }
        }
        Some(NavCursor::Generic(GenericCursor::SubcategorySelected(subcategory_id))) => {
            if let Some(sub) = category.find_subcategory(&subcategory_id) {
                crumbs.push(sub.name().to_owned());
            }
        }
        Some(NavCursor::Scene(SceneCursor::TypeSelected { scene_type })) => {
            crumbs.push(scene_type);
        }
        Some(NavCursor::Scene(SceneCursor::BothSelected { scene_type, first_modifier })) => {
            crumbs.push(scene_type.clone());
            crumbs.push(scene_label(&scene_type, &first_modifier, None));
        }
        Some(_) => {}
    }
    crumbs
}

#[cfg(test)]
mod tests;
