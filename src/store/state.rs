// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{KvStore, StoreError};
use crate::catalog::document::CategoryJson;
use crate::model::{
    Category, CategoryId, CompositionMode, Delimiter, GenericCursor, IdError, NavCursor,
    SceneCursor, SceneModifiers, SelectedItem, SelectionSet, Session, SubcategoryId, VariationId,
};

pub const SESSION_KEY: &str = "prompt_dictionary_v1";
pub const MODIFIERS_KEY: &str = "scene_modifiers_v1";
pub const OVERRIDES_KEY: &str = "custom_variations_v1";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SessionJson {
    selected_category_id: Option<String>,
    selected_subcategory_id: String,
    selected: Vec<SelectedJson>,
    delimiter: Option<String>,
    delimiter_newlines: bool,
    dynamic_state: BTreeMap<String, NavStateJson>,
    output_text: String,
    blocks: Vec<BlockJson>,
    composition_mode: Option<CompositionModeJson>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SelectedJson {
    id: String,
    label: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct NavStateJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    scene_type: Option<String>,
    first_modifier: Option<String>,
    second_modifier: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BlockJson {
    label: String,
    #[serde(default)]
    value: String,
    #[serde(default)]
    locked: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum CompositionModeJson {
    Blocks,
    Selection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SceneModifiersJson {
    first_modifiers: Vec<String>,
    second_modifiers: Vec<String>,
}

impl From<CompositionMode> for CompositionModeJson {
    fn from(mode: CompositionMode) -> Self {
        match mode {
            CompositionMode::Blocks => Self::Blocks,
            CompositionMode::Selection => Self::Selection,
        }
    }
}

impl From<CompositionModeJson> for CompositionMode {
    fn from(mode: CompositionModeJson) -> Self {
        match mode {
            CompositionModeJson::Blocks => Self::Blocks,
            CompositionModeJson::Selection => Self::Selection,
        }
    }
}

fn nav_to_json(cursor: &NavCursor) -> NavStateJson {
    match cursor {
        NavCursor::Generic(GenericCursor::Root) | NavCursor::Scene(SceneCursor::Root) => {
            NavStateJson::default()
        }
        NavCursor::Generic(GenericCursor::SubcategorySelected(subcategory_id)) => NavStateJson {
            first_modifier: Some(subcategory_id.to_string()),
            ..NavStateJson::default()
        },
        NavCursor::Scene(SceneCursor::TypeSelected { scene_type }) => NavStateJson {
            scene_type: Some(scene_type.clone()),
            ..NavStateJson::default()
        },
        NavCursor::Scene(SceneCursor::BothSelected { scene_type, first_modifier }) => {
            NavStateJson {
                scene_type: Some(scene_type.clone()),
                first_modifier: Some(first_modifier.clone()),
                second_modifier: None,
            }
        }
    }
}

/// Root cursors are not restored; a missing cursor already reads as root.
fn nav_from_json(state: NavStateJson) -> Option<NavCursor> {
    match (state.scene_type, state.first_modifier) {
        (Some(scene_type), Some(first_modifier)) => {
            Some(NavCursor::Scene(SceneCursor::BothSelected { scene_type, first_modifier }))
        }
        (Some(scene_type), None) => Some(NavCursor::Scene(SceneCursor::TypeSelected { scene_type })),
        (None, Some(first)) => SubcategoryId::new(first)
            .ok()
            .map(|id| NavCursor::Generic(GenericCursor::SubcategorySelected(id))),
        (None, None) => None,
    }
}

fn invalid_id(field: &'static str, value: &str, source: IdError) -> StoreError {
    StoreError::InvalidId { field, value: value.to_owned(), source: Box::new(source) }
}

/// Typed access to the persisted records.
#[derive(Clone)]
pub struct StateStore {
    kv: Arc<dyn KvStore>,
}

impl std::fmt::Debug for StateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore").finish_non_exhaustive()
    }
}

impl StateStore {
    pub fn new(kv: impl KvStore + 'static) -> Self {
        Self { kv: Arc::new(kv) }
    }

    fn read<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(bytes) = self.kv.get(key)? else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StoreError::Json { key: key.to_owned(), source })
    }

    fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|source| StoreError::Json { key: key.to_owned(), source })?;
        self.kv.set(key, &bytes)
    }

    pub fn save_session(&self, session: &Session) -> Result<(), StoreError> {
        let doc = SessionJson {
            selected_category_id: session.active_category_id().map(ToString::to_string),
            selected_subcategory_id: session
                .subcategory_filter()
                .map(ToString::to_string)
                .unwrap_or_default(),
            selected: session
                .selection()
                .items()
                .iter()
                .map(|item| SelectedJson {
                    id: item.variation_id().to_string(),
                    label: item.label().to_owned(),
                })
                .collect(),
            delimiter: Some(session.delimiter().text().to_owned()),
            delimiter_newlines: session.delimiter().newlines(),
            dynamic_state: session
                .nav()
                .iter()
                .map(|(category_id, cursor)| (category_id.to_string(), nav_to_json(cursor)))
                .collect(),
            output_text: session.output().text().to_owned(),
            blocks: session
                .blocks()
                .blocks()
                .iter()
                .map(|block| BlockJson {
                    label: block.label().to_owned(),
                    value: block.value().to_owned(),
                    locked: block.is_locked(),
                })
                .collect(),
            composition_mode: Some(session.composition_mode().into()),
        };
        self.write(SESSION_KEY, &doc)
    }

    /// Loads the session snapshot into a fresh [`Session`].
    ///
    /// Entries that no longer parse (bad ids, unknown block labels) are dropped. Catalog-level
    /// checks such as "does the active category still exist" are left to the caller.
    pub fn load_session(&self) -> Result<Option<Session>, StoreError> {
        let Some(doc) = self.read::<SessionJson>(SESSION_KEY)? else {
            return Ok(None);
        };

        let mut session = Session::new();
        if let Some(category_id) = doc.selected_category_id.as_deref().filter(|s| !s.is_empty()) {
            let category_id = CategoryId::new(category_id)
                .map_err(|source| invalid_id("selectedCategoryId", category_id, source))?;
            session.set_active_category_id(Some(category_id));
        }
        if !doc.selected_subcategory_id.is_empty() {
            session.set_subcategory_filter(SubcategoryId::new(doc.selected_subcategory_id).ok());
        }

        let items = doc.selected.into_iter().filter_map(|item| {
            VariationId::new(item.id).ok().map(|id| SelectedItem::new(id, item.label))
        });
        *session.selection_mut() = SelectionSet::from_items(items);

        let delimiter = Delimiter::new(
            doc.delimiter.unwrap_or_else(|| crate::model::DEFAULT_DELIMITER.to_owned()),
            doc.delimiter_newlines,
        );
        session.set_delimiter(delimiter);

        let nav = doc
            .dynamic_state
            .into_iter()
            .filter_map(|(category_id, state)| {
                let category_id = CategoryId::new(category_id).ok()?;
                Some((category_id, nav_from_json(state)?))
            })
            .collect();
        session.set_nav(nav);

        for block in doc.blocks {
            session.blocks_mut().restore(&block.label, &block.value, block.locked);
        }
        if let Some(mode) = doc.composition_mode {
            session.set_composition_mode(mode.into());
        }
        session.output_mut().set_text(doc.output_text);
        Ok(Some(session))
    }

    /// Like [`Self::load_session`], but a missing or unreadable record is just "no prior session".
    pub fn restore_session(&self) -> Option<Session> {
        match self.load_session() {
            Ok(session) => session,
            Err(err) => {
                log::warn!("ignoring stored session: {err}");
                None
            }
        }
    }

    pub fn clear_session(&self) -> Result<(), StoreError> {
        self.kv.remove(SESSION_KEY)
    }

    pub fn load_scene_modifiers(&self) -> Result<Option<SceneModifiers>, StoreError> {
        Ok(self
            .read::<SceneModifiersJson>(MODIFIERS_KEY)?
            .map(|doc| SceneModifiers::new(doc.first_modifiers, doc.second_modifiers)))
    }

    /// `None` removes the record so the defaults apply again.
    pub fn save_scene_modifiers(&self, modifiers: Option<&SceneModifiers>) -> Result<(), StoreError> {
        match modifiers {
            Some(modifiers) => self.write(
                MODIFIERS_KEY,
                &SceneModifiersJson {
                    first_modifiers: modifiers.first().to_vec(),
                    second_modifiers: modifiers.second().to_vec(),
                },
            ),
            None => self.kv.remove(MODIFIERS_KEY),
        }
    }

    pub fn load_overrides(&self) -> Result<BTreeMap<CategoryId, Category>, StoreError> {
        let Some(doc) = self.read::<BTreeMap<String, CategoryJson>>(OVERRIDES_KEY)? else {
            return Ok(BTreeMap::new());
        };
        let mut overrides = BTreeMap::new();
        for (category_id, category) in doc {
            let category_id = CategoryId::new(category_id.as_str())
                .map_err(|source| invalid_id("category override", &category_id, source))?;
            let category = category.into_category().map_err(|source| StoreError::Catalog {
                key: OVERRIDES_KEY.to_owned(),
                source: Box::new(source),
            })?;
            overrides.insert(category_id, category);
        }
        Ok(overrides)
    }

    pub fn save_overrides(&self, overrides: &BTreeMap<CategoryId, Category>) -> Result<(), StoreError> {
        let doc = overrides
            .iter()
            .map(|(category_id, category)| {
                (category_id.to_string(), CategoryJson::from_category(category))
            })
            .collect::<BTreeMap<_, _>>();
        self.write(OVERRIDES_KEY, &doc)
    }
}
