// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Renderer-facing projection of the app state.
//!
//! [`View`] is a plain snapshot: renderers read it and send [`crate::ops::Op`]s back; they never
//! reach into the catalog or session directly.

use crate::catalog::CatalogStore;
use crate::model::{
    CategoryId, CategoryShape, CompositionMode, Delimiter, QueryMode, SelectedItem, Session,
    SubcategoryId,
};
use crate::navigation::{self, OptionList};

/// Separator used when breadcrumbs are rendered on one line.
pub const BREADCRUMB_SEPARATOR: &str = " ▸ ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTab {
    pub category_id: CategoryId,
    pub icon: String,
    pub name: String,
    pub count: usize,
    pub active: bool,
}

/// Subcategory filter chip; only static categories have these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub subcategory_id: SubcategoryId,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockView {
    pub label: String,
    pub value: String,
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub rev: u64,
    pub categories: Vec<CategoryTab>,
    pub breadcrumbs: Vec<String>,
    pub filters: Vec<FilterChip>,
    /// `None` when the catalog is empty.
    pub options: Option<OptionList>,
    pub selection: Vec<SelectedItem>,
    pub blocks: Vec<BlockView>,
    pub composition_mode: CompositionMode,
    pub delimiter: Delimiter,
    pub output: String,
    pub is_user_editing: bool,
    pub query: String,
    pub query_mode: QueryMode,
    pub notice: Option<String>,
}

impl View {
    pub fn project(catalog: &CatalogStore, session: &Session) -> Self {
        let active = navigation::active_category(catalog, session).ok();
        let active_id = active.map(|category| category.category_id());

        let categories = catalog
            .categories()
            .map(|category| CategoryTab {
                category_id: category.category_id().clone(),
                icon: category.icon().to_owned(),
                name: category.name().to_owned(),
                count: category.option_count(),
                active: Some(category.category_id()) == active_id,
            })
            .collect();

        let filters = match active {
            Some(category) if matches!(category.shape(), CategoryShape::Static) => category
                .subcategories()
                .iter()
                .map(|sub| FilterChip {
                    subcategory_id: sub.subcategory_id().clone(),
                    name: sub.name().to_owned(),
                    active: session.subcategory_filter() == Some(sub.subcategory_id()),
                })
                .collect(),
            _ => Vec::new(),
        };

        let blocks = session
            .blocks()
            .blocks()
            .iter()
            .map(|block| BlockView {
                label: block.label().to_owned(),
                value: block.value().to_owned(),
                locked: block.is_locked(),
            })
            .collect();

        Self {
            rev: 0,
            categories,
            breadcrumbs: navigation::breadcrumbs(catalog, session),
            filters,
            options: navigation::visible_options(catalog, session).ok(),
            selection: session.selection().items().to_vec(),
            blocks,
            composition_mode: session.composition_mode(),
            delimiter: session.delimiter().clone(),
            output: session.output().text().to_owned(),
            is_user_editing: session.output().is_user_editing(),
            query: session.query().to_owned(),
            query_mode: session.query_mode(),
            notice: None,
        }
    }

    pub fn breadcrumb_line(&self) -> String {
        self.breadcrumbs.join(BREADCRUMB_SEPARATOR)
    }

    pub fn active_category(&self) -> Option<&CategoryTab> {
        self.categories.iter().find(|tab| tab.active)
    }
}
