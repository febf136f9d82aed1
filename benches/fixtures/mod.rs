// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Deterministic benchmark catalogs and sessions.

use promptdict::catalog::CatalogStore;
use promptdict::model::{
    Category, CategoryId, CategoryShape, SelectedItem, Session, Subcategory, SubcategoryId,
    Variation, VariationId,
};

#[derive(Debug, Clone, Copy)]
pub struct CatalogSize {
    pub subcategories: usize,
    pub variations: usize,
}

pub const SMALL: CatalogSize = CatalogSize { subcategories: 4, variations: 8 };
pub const MEDIUM: CatalogSize = CatalogSize { subcategories: 16, variations: 40 };
pub const LARGE: CatalogSize = CatalogSize { subcategories: 40, variations: 120 };

fn subcategories(prefix: &str, size: CatalogSize) -> Vec<Subcategory> {
    (0..size.subcategories)
        .map(|s| {
            let variations = (0..size.variations)
                .map(|v| {
                    let id = VariationId::new(format!("{prefix}-{s:03}-{v:04}")).expect("variation id");
                    Variation::new(id, format!("{prefix} option {s}.{v} with detail"))
                })
                .collect();
            Subcategory::new(
                SubcategoryId::new(format!("{prefix}-sub-{s:03}")).expect("subcategory id"),
                format!("{prefix} group {s}"),
            )
            .with_variations(variations)
        })
        .collect()
}

/// One category of every shape, each sized by `size`.
pub fn catalog(size: CatalogSize) -> Vec<Category> {
    let scene_types = (0..size.subcategories).map(|i| format!("scene {i}")).collect();
    vec![
        Category::new(
            CategoryId::new("scenes").expect("category id"),
            "Scenes",
            "🏞️",
            CategoryShape::SceneDynamic { scene_types },
        ),
        Category::new(
            CategoryId::new("environments").expect("category id"),
            "Environments",
            "🌍",
            CategoryShape::GenericDynamic,
        )
        .with_subcategories(subcategories("env", size)),
        Category::new(
            CategoryId::new("lighting").expect("category id"),
            "Lighting",
            "💡",
            CategoryShape::Static,
        )
        .with_subcategories(subcategories("light", size)),
    ]
}

pub fn store(size: CatalogSize) -> CatalogStore {
    CatalogStore::new(catalog(size))
}

/// A session on `category` holding the first `count` static leaves.
pub fn session(store: &CatalogStore, category: &str, count: usize) -> Session {
    let mut session = Session::new();
    session.set_active_category_id(Some(CategoryId::new(category).expect("category id")));

    let lighting = store
        .categories()
        .find(|c| c.category_id().as_str() == "lighting")
        .expect("lighting category");
    let items = lighting
        .subcategories()
        .iter()
        .flat_map(|s| s.variations())
        .take(count)
        .map(|v| SelectedItem::new(v.variation_id().clone(), v.label()));
    for item in items {
        session.selection_mut().toggle(item);
    }
    session
}
