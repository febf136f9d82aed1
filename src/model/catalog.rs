// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{CategoryId, SubcategoryId, VariationId};

/// A selectable leaf fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variation {
    variation_id: VariationId,
    label: String,
}

impl Variation {
    pub fn new(variation_id: VariationId, label: impl Into<String>) -> Self {
        Self {
            variation_id,
            label: label.into(),
        }
    }

    pub fn variation_id(&self) -> &VariationId {
        &self.variation_id
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subcategory {
    subcategory_id: SubcategoryId,
    name: String,
    variations: Vec<Variation>,
}

impl Subcategory {
    pub fn new(subcategory_id: SubcategoryId, name: impl Into<String>) -> Self {
        Self {
            subcategory_id,
            name: name.into(),
            variations: Vec::new(),
        }
    }

    pub fn with_variations(mut self, variations: Vec<Variation>) -> Self {
        self.variations = variations;
        self
    }

    pub fn subcategory_id(&self) -> &SubcategoryId {
        &self.subcategory_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variations(&self) -> &[Variation] {
        &self.variations
    }

    pub fn variations_mut(&mut self) -> &mut Vec<Variation> {
        &mut self.variations
    }

    pub fn find_variation(&self, variation_id: &VariationId) -> Option<&Variation> {
        self.variations.iter().find(|v| v.variation_id() == variation_id)
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.variations.iter().any(|v| v.label() == label)
    }
}

/// How a category is browsed.
///
/// `Static` categories list every variation at once, `GenericDynamic` ones drill from
/// subcategory into variations, and `SceneDynamic` ones compose a leaf from a scene type and
/// two modifier levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryShape {
    Static,
    GenericDynamic,
    SceneDynamic { scene_types: Vec<String> },
}

impl CategoryShape {
    pub fn is_dynamic(&self) -> bool {
        !matches!(self, Self::Static)
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Static => ShapeKind::Static,
            Self::GenericDynamic => ShapeKind::GenericDynamic,
            Self::SceneDynamic { .. } => ShapeKind::SceneDynamic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Static,
    GenericDynamic,
    SceneDynamic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    category_id: CategoryId,
    name: String,
    icon: String,
    shape: CategoryShape,
    subcategories: Vec<Subcategory>,
    id_serial: u64,
}

impl Category {
    pub fn new(
        category_id: CategoryId,
        name: impl Into<String>,
        icon: impl Into<String>,
        shape: CategoryShape,
    ) -> Self {
        Self {
            category_id,
            name: name.into(),
            icon: icon.into(),
            shape,
            subcategories: Vec::new(),
            id_serial: 0,
        }
    }

    pub fn with_subcategories(mut self, subcategories: Vec<Subcategory>) -> Self {
        self.subcategories = subcategories;
        self
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn shape(&self) -> &CategoryShape {
        &self.shape
    }

    pub fn subcategories(&self) -> &[Subcategory] {
        &self.subcategories
    }

    pub fn subcategories_mut(&mut self) -> &mut Vec<Subcategory> {
        &mut self.subcategories
    }

    /// Highest counter handed out by generated ids in this category. Never decreases, so ids
    /// of removed entries are not issued again.
    pub fn id_serial(&self) -> u64 {
        self.id_serial
    }

    pub fn bump_id_serial(&mut self, serial: u64) {
        self.id_serial = self.id_serial.max(serial);
    }

    pub fn with_id_serial(mut self, serial: u64) -> Self {
        self.bump_id_serial(serial);
        self
    }

    pub fn find_subcategory(&self, subcategory_id: &SubcategoryId) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| s.subcategory_id() == subcategory_id)
    }

    pub fn scene_types(&self) -> &[String] {
        match &self.shape {
            CategoryShape::SceneDynamic { scene_types } => scene_types,
            _ => &[],
        }
    }

    /// Count shown next to the category name: navigable entries for dynamic categories,
    /// total leaves for static ones.
    pub fn option_count(&self) -> usize {
        match &self.shape {
            CategoryShape::Static => self.subcategories.iter().map(|s| s.variations().len()).sum(),
            CategoryShape::GenericDynamic => self.subcategories.len(),
            CategoryShape::SceneDynamic { scene_types } => scene_types.len(),
        }
    }
}

/// Which of the two scene modifier lists an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierLevel {
    First,
    Second,
}

/// User-extensible modifier lists for scene categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneModifiers {
    first: Vec<String>,
    second: Vec<String>,
}

impl Default for SceneModifiers {
    fn default() -> Self {
        Self {
            first: ["史前", "原始", "魔法"].into_iter().map(ToOwned::to_owned).collect(),
            second: ["佈滿苔蘚的", "百花齊放的"].into_iter().map(ToOwned::to_owned).collect(),
        }
    }
}

impl SceneModifiers {
    /// Builds modifier lists, substituting the default for any list that is empty.
    pub fn new(first: Vec<String>, second: Vec<String>) -> Self {
        let defaults = Self::default();
        Self {
            first: if first.is_empty() { defaults.first } else { first },
            second: if second.is_empty() { defaults.second } else { second },
        }
    }

    pub fn first(&self) -> &[String] {
        &self.first
    }

    pub fn second(&self) -> &[String] {
        &self.second
    }

    pub fn list(&self, level: ModifierLevel) -> &[String] {
        match level {
            ModifierLevel::First => &self.first,
            ModifierLevel::Second => &self.second,
        }
    }

    pub(crate) fn list_mut(&mut self, level: ModifierLevel) -> &mut Vec<String> {
        match level {
            ModifierLevel::First => &mut self.first,
            ModifierLevel::Second => &mut self.second,
        }
    }
}

/// Label of a scene option: modifiers are prefixed outermost-first onto the scene type.
pub fn scene_label(scene_type: &str, first: &str, second: Option<&str>) -> String {
    match second {
        Some(second) => format!("{second}{first}{scene_type}"),
        None => format!("{first}{scene_type}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{scene_label, SceneModifiers};

    #[test]
    fn scene_label_concatenates_innermost_last() {
        assert_eq!(scene_label("森林", "史前", None), "史前森林");
        assert_eq!(scene_label("森林", "史前", Some("佈滿苔蘚的")), "佈滿苔蘚的史前森林");
    }

    #[test]
    fn empty_modifier_lists_fall_back_to_defaults() {
        let modifiers = SceneModifiers::new(vec!["x".to_owned()], Vec::new());
        assert_eq!(modifiers.first(), ["x".to_owned()]);
        assert_eq!(modifiers.second(), SceneModifiers::default().second());
    }
}
