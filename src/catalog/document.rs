// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON catalog documents.
//!
//! A document is an array of categories. `sceneTypes` marks a scene category, `isDynamic` a
//! generic drill-down category, anything else is static. The same category object shape is
//! used when persisting user overrides.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::{
    Category, CategoryId, CategoryShape, IdError, Subcategory, SubcategoryId, Variation,
    VariationId,
};

const DEFAULT_CATALOG_JSON: &str = include_str!("../../data/catalog.json");

#[derive(Debug)]
pub enum CatalogLoadError {
    Io { path: PathBuf, source: std::io::Error },
    Json { path: Option<PathBuf>, source: serde_json::Error },
    InvalidId { field: &'static str, value: String, source: Box<IdError> },
    DuplicateId { field: &'static str, value: String },
}

impl fmt::Display for CatalogLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path: Some(path), source } => {
                write!(f, "json error at {path:?}: {source}")
            }
            Self::Json { path: None, source } => write!(f, "json error: {source}"),
            Self::InvalidId { field, value, source } => {
                write!(f, "invalid id for {field}: {value:?}: {source}")
            }
            Self::DuplicateId { field, value } => write!(f, "duplicate {field}: {value:?}"),
        }
    }
}

impl std::error::Error for CatalogLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidId { source, .. } => Some(source),
            Self::DuplicateId { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CategoryJson {
    id: String,
    name: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    is_dynamic: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    scene_types: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    subcategories: Vec<SubcategoryJson>,
    #[serde(default, skip_serializing_if = "is_zero")]
    id_serial: u64,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SubcategoryJson {
    id: String,
    name: String,
    #[serde(default)]
    variations: Vec<VariationJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct VariationJson {
    id: String,
    label: String,
}

impl CategoryJson {
    pub(crate) fn from_category(category: &Category) -> Self {
        let scene_types = match category.shape() {
            CategoryShape::SceneDynamic { scene_types } => Some(scene_types.clone()),
            CategoryShape::Static | CategoryShape::GenericDynamic => None,
        };
        Self {
            id: category.category_id().to_string(),
            name: category.name().to_owned(),
            icon: category.icon().to_owned(),
            is_dynamic: category.shape().is_dynamic(),
            scene_types,
            subcategories: category
                .subcategories()
                .iter()
                .map(|subcategory| SubcategoryJson {
                    id: subcategory.subcategory_id().to_string(),
                    name: subcategory.name().to_owned(),
                    variations: subcategory
                        .variations()
                        .iter()
                        .map(|variation| VariationJson {
                            id: variation.variation_id().to_string(),
                            label: variation.label().to_owned(),
                        })
                        .collect(),
                })
                .collect(),
            id_serial: category.id_serial(),
        }
    }

    pub(crate) fn into_category(self) -> Result<Category, CatalogLoadError> {
        let category_id = parse_id::<CategoryId>("category id", self.id)?;
        let shape = match self.scene_types {
            Some(scene_types) => CategoryShape::SceneDynamic { scene_types },
            None if self.is_dynamic => CategoryShape::GenericDynamic,
            None => CategoryShape::Static,
        };

        let mut subcategory_ids = BTreeSet::new();
        let mut subcategories = Vec::with_capacity(self.subcategories.len());
        for subcategory in self.subcategories {
            let subcategory_id = parse_id::<SubcategoryId>("subcategory id", subcategory.id)?;
            if !subcategory_ids.insert(subcategory_id.clone()) {
                return Err(CatalogLoadError::DuplicateId {
                    field: "subcategory id",
                    value: subcategory_id.into_string(),
                });
            }
            let variations = subcategory
                .variations
                .into_iter()
                .map(|variation| {
                    parse_id::<VariationId>("variation id", variation.id)
                        .map(|id| Variation::new(id, variation.label))
                })
                .collect::<Result<Vec<_>, _>>()?;
            subcategories
                .push(Subcategory::new(subcategory_id, subcategory.name).with_variations(variations));
        }

        Ok(Category::new(category_id, self.name, self.icon, shape)
            .with_subcategories(subcategories)
            .with_id_serial(self.id_serial))
    }
}

fn parse_id<I>(field: &'static str, value: String) -> Result<I, CatalogLoadError>
where
    I: TryFrom<String, Error = IdError>,
{
    I::try_from(value.clone())
        .map_err(|source| CatalogLoadError::InvalidId { field, value, source: Box::new(source) })
}

/// Parses a catalog document. Category and variation ids must be unique across the document.
pub fn parse_catalog_document(text: &str) -> Result<Vec<Category>, CatalogLoadError> {
    let docs: Vec<CategoryJson> =
        serde_json::from_str(text).map_err(|source| CatalogLoadError::Json { path: None, source })?;

    let mut category_ids = BTreeSet::new();
    let mut variation_ids = BTreeSet::new();
    let mut categories = Vec::with_capacity(docs.len());
    for doc in docs {
        let category = doc.into_category()?;
        if !category_ids.insert(category.category_id().clone()) {
            return Err(CatalogLoadError::DuplicateId {
                field: "category id",
                value: category.category_id().to_string(),
            });
        }
        for variation in category.subcategories().iter().flat_map(Subcategory::variations) {
            if !variation_ids.insert(variation.variation_id().clone()) {
                return Err(CatalogLoadError::DuplicateId {
                    field: "variation id",
                    value: variation.variation_id().to_string(),
                });
            }
        }
        categories.push(category);
    }
    Ok(categories)
}

pub fn load_catalog_document(path: &Path) -> Result<Vec<Category>, CatalogLoadError> {
    let text = fs::read_to_string(path)
        .map_err(|source| CatalogLoadError::Io { path: path.to_path_buf(), source })?;
    parse_catalog_document(&text).map_err(|err| match err {
        CatalogLoadError::Json { path: None, source } => {
            CatalogLoadError::Json { path: Some(path.to_path_buf()), source }
        }
        other => other,
    })
}

/// The catalog bundled with the binary.
pub fn default_catalog() -> Result<Vec<Category>, CatalogLoadError> {
    parse_catalog_document(DEFAULT_CATALOG_JSON)
}
