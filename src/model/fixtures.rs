// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::catalog::{Category, CategoryShape, Subcategory, Variation};
use super::ids::{CategoryId, SubcategoryId, VariationId};

fn cid(value: &str) -> CategoryId {
    CategoryId::new(value).expect("category id")
}

fn sid(value: &str) -> SubcategoryId {
    SubcategoryId::new(value).expect("subcategory id")
}

fn var(id: &str, label: &str) -> Variation {
    Variation::new(VariationId::new(id).expect("variation id"), label)
}

/// Small catalog covering every category shape.
pub(crate) fn sample_catalog() -> Vec<Category> {
    vec![
        Category::new(
            cid("scenes"),
            "場景",
            "🏞️",
            CategoryShape::SceneDynamic { scene_types: vec!["森林".to_owned(), "沙漠".to_owned()] },
        ),
        Category::new(cid("environments"), "環境", "🌍", CategoryShape::GenericDynamic)
            .with_subcategories(vec![
                Subcategory::new(sid("water"), "水域")
                    .with_variations(vec![var("env-lake", "湖泊"), var("env-river", "河流")]),
                Subcategory::new(sid("terrain"), "地形")
                    .with_variations(vec![var("env-canyon", "峽谷")]),
            ]),
        Category::new(cid("characters"), "角色", "🧑", CategoryShape::GenericDynamic)
            .with_subcategories(vec![Subcategory::new(sid("people"), "人物")
                .with_variations(vec![var("char-woman", "女性"), var("char-man", "男性")])]),
        Category::new(cid("lighting"), "光線", "💡", CategoryShape::Static).with_subcategories(vec![
            Subcategory::new(sid("natural"), "自然光")
                .with_variations(vec![var("light-golden-hour", "Golden hour")]),
            Subcategory::new(sid("studio"), "攝影棚").with_variations(vec![
                var("light-cinematic", "Cinematic"),
                var("light-rim", "Rim light"),
            ]),
        ]),
    ]
}
