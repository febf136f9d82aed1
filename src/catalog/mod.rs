// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Catalog store: built-in categories, per-category user overrides, scene modifiers.
//!
//! An override is a full copy of a category that shadows the built-in definition as long as it
//! has at least one subcategory. It is created on the first edit and dropped on reset.

use std::collections::BTreeMap;
use std::fmt;

use crate::model::{
    scene_label, Category, CategoryId, CategoryShape, ModifierLevel, SceneModifiers, Subcategory,
    SubcategoryId, Variation, VariationId,
};

pub mod document;

pub use document::{default_catalog, load_catalog_document, parse_catalog_document};
pub use document::CatalogLoadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Category,
    Subcategory,
    Variation,
    Modifier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invariant {
    LastSubcategory,
    LastModifier(ModifierLevel),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    NotFound { kind: EntryKind, key: String },
    InvariantViolation(Invariant),
    DuplicateLabel { label: String },
    EmptyLabel,
    UnsupportedShape { category_id: CategoryId },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { kind, key } => write!(f, "{kind:?} not found ({key})"),
            Self::InvariantViolation(Invariant::LastSubcategory) => {
                f.write_str("a category must keep at least one subcategory")
            }
            Self::InvariantViolation(Invariant::LastModifier(level)) => {
                write!(f, "the {level:?} modifier list must keep at least one entry")
            }
            Self::DuplicateLabel { label } => write!(f, "label already exists: {label}"),
            Self::EmptyLabel => f.write_str("label must not be empty"),
            Self::UnsupportedShape { category_id } => {
                write!(f, "category {category_id} has no editable subcategories")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// A leaf found by catalog-wide search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub category_id: CategoryId,
    pub subcategory_id: SubcategoryId,
    pub variation_id: VariationId,
    pub label: String,
    pub score: i64,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    builtin: Vec<Category>,
    overrides: BTreeMap<CategoryId, Category>,
    modifiers: Option<SceneModifiers>,
    default_modifiers: SceneModifiers,
}

impl CatalogStore {
    pub fn new(builtin: Vec<Category>) -> Self {
        Self {
            builtin,
            overrides: BTreeMap::new(),
            modifiers: None,
            default_modifiers: SceneModifiers::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.builtin.is_empty()
    }

    pub fn first_category_id(&self) -> Option<&CategoryId> {
        self.builtin.first().map(Category::category_id)
    }

    pub fn contains(&self, category_id: &CategoryId) -> bool {
        self.builtin_category(category_id).is_some()
    }

    /// Effective categories in built-in order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.builtin.iter().map(|builtin| self.effective(builtin))
    }

    pub fn builtin_category(&self, category_id: &CategoryId) -> Option<&Category> {
        self.builtin.iter().find(|c| c.category_id() == category_id)
    }

    pub fn get_category(&self, category_id: &CategoryId) -> Result<&Category, CatalogError> {
        self.builtin_category(category_id).map(|builtin| self.effective(builtin)).ok_or_else(
            || CatalogError::NotFound { kind: EntryKind::Category, key: category_id.to_string() },
        )
    }

    fn effective<'a>(&'a self, builtin: &'a Category) -> &'a Category {
        match self.overrides.get(builtin.category_id()) {
            Some(custom) if !custom.subcategories().is_empty() => custom,
            _ => builtin,
        }
    }

    pub fn has_override(&self, category_id: &CategoryId) -> bool {
        self.overrides.get(category_id).is_some_and(|c| !c.subcategories().is_empty())
    }

    pub fn overrides(&self) -> &BTreeMap<CategoryId, Category> {
        &self.overrides
    }

    /// Installs persisted overrides, dropping entries for categories the catalog does not know
    /// and entries whose shape no longer allows subcategory edits.
    pub fn set_overrides(&mut self, overrides: BTreeMap<CategoryId, Category>) {
        self.overrides = overrides
            .into_iter()
            .filter(|(category_id, _)| {
                self.builtin_category(category_id).is_some_and(|builtin| {
                    !matches!(builtin.shape(), CategoryShape::SceneDynamic { .. })
                })
            })
            .collect();
    }

    fn editable(&self, category_id: &CategoryId) -> Result<&Category, CatalogError> {
        let category = self.get_category(category_id)?;
        if matches!(category.shape(), CategoryShape::SceneDynamic { .. }) {
            return Err(CatalogError::UnsupportedShape { category_id: category_id.clone() });
        }
        Ok(category)
    }

    /// Returns the override for `category_id`, deep-copying the built-in definition first if no
    /// usable override exists yet. Callers validate before calling so a rejected edit never
    /// leaves a fresh override behind.
    fn materialize(&mut self, category_id: &CategoryId) -> Result<&mut Category, CatalogError> {
        let effective = self.editable(category_id)?.clone();
        let slot = self.overrides.entry(category_id.clone()).or_insert_with(|| effective.clone());
        if slot.subcategories().is_empty() {
            let serial = slot.id_serial();
            *slot = effective.with_id_serial(serial);
        }
        Ok(slot)
    }

    pub fn add_subcategory(
        &mut self,
        category_id: &CategoryId,
        name: &str,
    ) -> Result<SubcategoryId, CatalogError> {
        self.add_subcategory_avoiding(category_id, name, |_| false)
    }

    /// Like [`Self::add_subcategory`], but the generated id also skips ids for which `in_use`
    /// holds, such as ids a session still points at after a reset.
    pub fn add_subcategory_avoiding(
        &mut self,
        category_id: &CategoryId,
        name: &str,
        in_use: impl Fn(&SubcategoryId) -> bool,
    ) -> Result<SubcategoryId, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyLabel);
        }
        let (subcategory_id, serial) = next_subcategory_id(self.editable(category_id)?, in_use);

        let category = self.materialize(category_id)?;
        category.bump_id_serial(serial);
        category.subcategories_mut().push(Subcategory::new(subcategory_id.clone(), name));
        Ok(subcategory_id)
    }

    pub fn remove_subcategory(
        &mut self,
        category_id: &CategoryId,
        index: usize,
    ) -> Result<Subcategory, CatalogError> {
        let category = self.editable(category_id)?;
        if index >= category.subcategories().len() {
            return Err(subcategory_index_not_found(category_id, index));
        }
        if category.subcategories().len() <= 1 {
            return Err(CatalogError::InvariantViolation(Invariant::LastSubcategory));
        }

        let category = self.materialize(category_id)?;
        Ok(category.subcategories_mut().remove(index))
    }

    pub fn add_variation(
        &mut self,
        category_id: &CategoryId,
        sub_index: usize,
        label: &str,
    ) -> Result<VariationId, CatalogError> {
        self.add_variation_avoiding(category_id, sub_index, label, |_| false)
    }

    /// Like [`Self::add_variation`], but the generated id also skips ids for which `in_use`
    /// holds, such as still-selected leaves of a category that was reset.
    pub fn add_variation_avoiding(
        &mut self,
        category_id: &CategoryId,
        sub_index: usize,
        label: &str,
        in_use: impl Fn(&VariationId) -> bool,
    ) -> Result<VariationId, CatalogError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(CatalogError::EmptyLabel);
        }
        let category = self.editable(category_id)?;
        let Some(subcategory) = category.subcategories().get(sub_index) else {
            return Err(subcategory_index_not_found(category_id, sub_index));
        };
        if subcategory.has_label(label) {
            return Err(CatalogError::DuplicateLabel { label: label.to_owned() });
        }
        let (variation_id, serial) = next_variation_id(category, in_use);

        let category = self.materialize(category_id)?;
        category.bump_id_serial(serial);
        let Some(subcategory) = category.subcategories_mut().get_mut(sub_index) else {
            return Err(subcategory_index_not_found(category_id, sub_index));
        };
        subcategory.variations_mut().push(Variation::new(variation_id.clone(), label));
        Ok(variation_id)
    }

    pub fn remove_variation(
        &mut self,
        category_id: &CategoryId,
        sub_index: usize,
        var_index: usize,
    ) -> Result<Variation, CatalogError> {
        let category = self.editable(category_id)?;
        let Some(subcategory) = category.subcategories().get(sub_index) else {
            return Err(subcategory_index_not_found(category_id, sub_index));
        };
        if var_index >= subcategory.variations().len() {
            return Err(CatalogError::NotFound {
                kind: EntryKind::Variation,
                key: format!("{category_id}[{sub_index}][{var_index}]"),
            });
        }

        let category = self.materialize(category_id)?;
        let Some(subcategory) = category.subcategories_mut().get_mut(sub_index) else {
            return Err(subcategory_index_not_found(category_id, sub_index));
        };
        Ok(subcategory.variations_mut().remove(var_index))
    }

    /// Drops the override for `category_id`. Returns whether one existed.
    pub fn reset_category(&mut self, category_id: &CategoryId) -> Result<bool, CatalogError> {
        self.get_category(category_id)?;
        Ok(self.overrides.remove(category_id).is_some())
    }

    pub fn scene_modifiers(&self) -> &SceneModifiers {
        self.modifiers.as_ref().unwrap_or(&self.default_modifiers)
    }

    /// The user-saved modifiers, if any differ from the defaults.
    pub fn custom_scene_modifiers(&self) -> Option<&SceneModifiers> {
        self.modifiers.as_ref()
    }

    pub fn save_scene_modifiers(&mut self, modifiers: SceneModifiers) {
        self.modifiers = Some(modifiers);
    }

    pub fn reset_scene_modifiers(&mut self) {
        self.modifiers = None;
    }

    pub fn add_modifier(&mut self, level: ModifierLevel, value: &str) -> Result<(), CatalogError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(CatalogError::EmptyLabel);
        }
        if self.scene_modifiers().list(level).iter().any(|m| m == value) {
            return Err(CatalogError::DuplicateLabel { label: value.to_owned() });
        }
        let mut modifiers = self.scene_modifiers().clone();
        modifiers.list_mut(level).push(value.to_owned());
        self.modifiers = Some(modifiers);
        Ok(())
    }

    pub fn remove_modifier(
        &mut self,
        level: ModifierLevel,
        index: usize,
    ) -> Result<String, CatalogError> {
        let list = self.scene_modifiers().list(level);
        if index >= list.len() {
            return Err(CatalogError::NotFound {
                kind: EntryKind::Modifier,
                key: format!("{level:?}[{index}]"),
            });
        }
        if list.len() <= 1 {
            return Err(CatalogError::InvariantViolation(Invariant::LastModifier(level)));
        }
        let mut modifiers = self.scene_modifiers().clone();
        let removed = modifiers.list_mut(level).remove(index);
        self.modifiers = Some(modifiers);
        Ok(removed)
    }

    /// Every leaf label reachable in `category_id`; scene categories expand to all three-level
    /// combinations. Unknown categories yield nothing.
    pub fn leaf_labels(&self, category_id: &CategoryId) -> Vec<String> {
        let Ok(category) = self.get_category(category_id) else {
            return Vec::new();
        };
        match category.shape() {
            CategoryShape::SceneDynamic { scene_types } => {
                let modifiers = self.scene_modifiers();
                let mut labels = Vec::new();
                for scene_type in scene_types {
                    for first in modifiers.first() {
                        for second in modifiers.second() {
                            labels.push(scene_label(scene_type, first, Some(second)));
                        }
                    }
                }
                labels
            }
            CategoryShape::Static | CategoryShape::GenericDynamic => category
                .subcategories()
                .iter()
                .flat_map(|s| s.variations().iter().map(|v| v.label().to_owned()))
                .collect(),
        }
    }

    /// Fuzzy catalog-wide leaf search, best match first.
    pub fn search(&self, needle: &str, limit: usize) -> Vec<SearchHit> {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut hits = Vec::new();
        for category in self.categories() {
            for subcategory in category.subcategories() {
                for variation in subcategory.variations() {
                    let Some(score) = fuzzy_score(&needle, &variation.label().to_lowercase())
                    else {
                        continue;
                    };
                    hits.push(SearchHit {
                        category_id: category.category_id().clone(),
                        subcategory_id: subcategory.subcategory_id().clone(),
                        variation_id: variation.variation_id().clone(),
                        label: variation.label().to_owned(),
                        score,
                    });
                }
            }
        }

        hits.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.label.cmp(&b.label)));
        hits.truncate(limit);
        hits
    }
}

fn subcategory_index_not_found(category_id: &CategoryId, index: usize) -> CatalogError {
    CatalogError::NotFound { kind: EntryKind::Subcategory, key: format!("{category_id}[{index}]") }
}

/// Generated ids count up from the category's serial and from any numeric suffix already in
/// use, so an id is never handed out twice while its category override lives.
fn next_subcategory_id(
    category: &Category,
    in_use: impl Fn(&SubcategoryId) -> bool,
) -> (SubcategoryId, u64) {
    let taken = category
        .subcategories()
        .iter()
        .map(|s| s.subcategory_id().as_str())
        .collect::<Vec<_>>();
    let highest = taken.iter().filter_map(|id| serial_suffix(id, "sub-")).max().unwrap_or(0);
    let mut n = category.id_serial().max(highest) + 1;
    loop {
        let candidate = format!("sub-{n}");
        if !taken.contains(&candidate.as_str()) {
            if let Ok(id) = SubcategoryId::new(candidate) {
                if !in_use(&id) {
                    return (id, n);
                }
            }
        }
        n += 1;
    }
}

fn next_variation_id(
    category: &Category,
    in_use: impl Fn(&VariationId) -> bool,
) -> (VariationId, u64) {
    let prefix = format!("var-{}-", category.category_id());
    let taken = category
        .subcategories()
        .iter()
        .flat_map(|s| s.variations().iter().map(|v| v.variation_id().as_str()))
        .collect::<Vec<_>>();
    let highest = taken.iter().filter_map(|id| serial_suffix(id, &prefix)).max().unwrap_or(0);
    let mut n = category.id_serial().max(highest) + 1;
    loop {
        let candidate = format!("{prefix}{n}");
        if !taken.contains(&candidate.as_str()) {
            if let Ok(id) = VariationId::new(candidate) {
                if !in_use(&id) {
                    return (id, n);
                }
            }
        }
        n += 1;
    }
}

fn serial_suffix(id: &str, prefix: &str) -> Option<u64> {
    id.strip_prefix(prefix)?.parse().ok()
}

/// Substring matches rank first; otherwise the label must contain the needle as a subsequence.
fn fuzzy_score(needle: &str, haystack: &str) -> Option<i64> {
    let contains = haystack.contains(needle);
    if !contains && !is_subsequence(needle, haystack) {
        return None;
    }

    let ratio = rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars());
    let mut score = (ratio * 1000.0).round() as i64;
    if contains {
        score += 2000;
    }
    if haystack.starts_with(needle) {
        score += 500;
    }
    if haystack == needle {
        score += 1000;
    }
    Some(score)
}

fn is_subsequence(needle: &str, haystack: &str) -> bool {
    let mut hay = haystack.chars();
    needle.chars().all(|ch| hay.any(|h| h == ch))
}
