// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Application root.
//!
//! [`App`] owns the catalog, the session and the optional persistence adapter. Every mutation
//! goes through [`App::apply`], which runs the ops atomically and then writes whichever records
//! the resulting delta marks dirty. Persistence failures are logged and swallowed.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog::CatalogStore;
use crate::compose;
use crate::model::{Category, Session};
use crate::ops::{self, ApplyError, ApplyResult, Delta, Op};
use crate::store::StateStore;
use crate::ui::View;

pub const NOTICE_COPIED: &str = "已複製提示";
pub const NOTICE_NOTHING_TO_COPY: &str = "沒有可複製的內容";
pub const NOTICE_CATALOG_LOAD_FAILED: &str = "載入資料失敗，請重新整理頁面";

pub struct App {
    catalog: CatalogStore,
    session: Session,
    store: Option<StateStore>,
    rng: StdRng,
    notice: Option<String>,
    rev: u64,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("session", &self.session)
            .field("persistent", &self.store.is_some())
            .field("rev", &self.rev)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Builds the app from the built-in catalog, restoring overrides, modifiers and the last
    /// session from `store` when present.
    pub fn new(builtin: Vec<Category>, store: Option<StateStore>) -> Self {
        let mut catalog = CatalogStore::new(builtin);
        let mut restored = None;

        if let Some(store) = &store {
            match store.load_overrides() {
                Ok(overrides) => catalog.set_overrides(overrides),
                Err(err) => log::warn!("ignoring stored catalog overrides: {err}"),
            }
            match store.load_scene_modifiers() {
                Ok(Some(modifiers)) => catalog.save_scene_modifiers(modifiers),
                Ok(None) => {}
                Err(err) => log::warn!("ignoring stored scene modifiers: {err}"),
            }
            restored = store.restore_session();
        }

        let session = match restored {
            Some(mut session) => {
                sanitize_restored(&catalog, &mut session);
                compose::reconcile_restored(&mut session);
                session
            }
            None => {
                let mut session = Session::new();
                session.set_active_category_id(catalog.first_category_id().cloned());
                compose::regenerate(&mut session);
                session
            }
        };

        Self { catalog, session, store, rng: StdRng::from_os_rng(), notice: None, rev: 0 }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    /// Bumped on every applied batch that changed something.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    /// Applies `ops` as one batch. On rejection the state is untouched and the user-facing
    /// message is stored as the current notice.
    pub fn apply(&mut self, ops: &[Op]) -> Result<ApplyResult, ApplyError> {
        let result = match ops::apply_ops(&mut self.catalog, &mut self.session, ops, &mut self.rng)
        {
            Ok(result) => result,
            Err(err) => {
                log::debug!("rejected ops: {err}");
                self.notice = Some(err.notice());
                return Err(err);
            }
        };

        if let Some(notice) = result.outcomes.iter().rev().find_map(|outcome| outcome.notice()) {
            self.notice = Some(notice.to_owned());
        }
        if !result.delta.is_empty() {
            self.rev = self.rev.wrapping_add(1);
        }
        self.persist(result.delta);
        Ok(result)
    }

    pub fn apply_one(&mut self, op: Op) -> Result<ApplyResult, ApplyError> {
        self.apply(std::slice::from_ref(&op))
    }

    fn persist(&self, delta: Delta) {
        let Some(store) = &self.store else {
            return;
        };
        if delta.session_dirty() {
            if let Err(err) = store.save_session(&self.session) {
                log::warn!("failed to save session: {err}");
            }
        }
        if delta.catalog {
            if let Err(err) = store.save_overrides(self.catalog.overrides()) {
                log::warn!("failed to save catalog overrides: {err}");
            }
        }
        if delta.modifiers {
            if let Err(err) = store.save_scene_modifiers(self.catalog.custom_scene_modifiers()) {
                log::warn!("failed to save scene modifiers: {err}");
            }
        }
    }

    /// Text for the clipboard, verbatim. Sets the matching notice either way.
    pub fn copy_output(&mut self) -> Option<String> {
        let text = self.session.output().text();
        if text.trim().is_empty() {
            self.notice = Some(NOTICE_NOTHING_TO_COPY.to_owned());
            return None;
        }
        let text = text.to_owned();
        self.notice = Some(NOTICE_COPIED.to_owned());
        Some(text)
    }

    pub fn view(&self) -> View {
        let mut view = View::project(&self.catalog, &self.session);
        view.rev = self.rev;
        view.notice = self.notice.clone();
        view
    }
}

/// Drops restored references the current catalog no longer has.
fn sanitize_restored(catalog: &CatalogStore, session: &mut Session) {
    let active_known = session.active_category_id().is_some_and(|id| catalog.contains(id));
    if !active_known {
        session.set_active_category_id(catalog.first_category_id().cloned());
        session.set_subcategory_filter(None);
    }

    let filter_known = match (session.active_category_id(), session.subcategory_filter()) {
        (Some(category_id), Some(filter)) => catalog
            .get_category(category_id)
            .is_ok_and(|category| category.find_subcategory(filter).is_some()),
        (_, None) => true,
        (None, Some(_)) => false,
    };
    if !filter_known {
        session.set_subcategory_filter(None);
    }

    let nav = session
        .nav()
        .iter()
        .filter(|(category_id, cursor)| {
            catalog
                .get_category(category_id)
                .is_ok_and(|category| category.shape().kind() == cursor.shape())
        })
        .map(|(category_id, cursor)| (category_id.clone(), cursor.clone()))
        .collect();
    session.set_nav(nav);
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{App, NOTICE_COPIED, NOTICE_NOTHING_TO_COPY};
    use crate::model::fixtures::sample_catalog;
    use crate::model::{CategoryId, ModifierLevel, SelectedItem, VariationId};
    use crate::ops::{CatalogOp, ModifierOp, NavOp, Op, OutputOp, SelectOp};
    use crate::store::{KvStore, MemoryKvStore, StateStore, MODIFIERS_KEY, SESSION_KEY};

    fn app_with(kv: &MemoryKvStore) -> App {
        App::new(sample_catalog(), Some(StateStore::new(kv.clone())))
            .with_rng(StdRng::seed_from_u64(11))
    }

    fn toggle(id: &str, label: &str) -> Op {
        Op::Select(SelectOp::Toggle {
            item: SelectedItem::new(VariationId::new(id).unwrap(), label),
        })
    }

    #[test]
    fn fresh_app_starts_on_the_first_category() {
        let app = App::new(sample_catalog(), None);
        assert_eq!(app.session().active_category_id().map(CategoryId::as_str), Some("scenes"));
        assert!(!app.is_persistent());
        assert_eq!(app.view().breadcrumbs, ["首頁", "場景"]);
    }

    #[test]
    fn selection_survives_a_restart() {
        let kv = MemoryKvStore::new();
        let mut app = app_with(&kv);
        app.apply(&[toggle("a", "A"), toggle("b", "B")]).unwrap();
        assert_eq!(app.rev(), 1);
        drop(app);

        let app = app_with(&kv);
        assert_eq!(app.session().selection().len(), 2);
        assert!(!app.session().output().is_user_editing());
    }

    #[test]
    fn hand_edit_is_detected_after_restart() {
        let kv = MemoryKvStore::new();
        let mut app = app_with(&kv);
        app.apply(&[
            toggle("a", "A"),
            Op::Output(OutputOp::Edit { text: "A, tuned".to_owned() }),
        ])
        .unwrap();

        let app = app_with(&kv);
        assert!(app.session().output().is_user_editing());
        assert_eq!(app.session().output().text(), "A, tuned");
    }

    #[test]
    fn unknown_restored_category_falls_back_to_first() {
        let kv = MemoryKvStore::new();
        kv.set(SESSION_KEY, br#"{"selectedCategoryId":"gone","selectedSubcategoryId":"x"}"#)
            .unwrap();
        let app = app_with(&kv);
        assert_eq!(app.session().active_category_id().map(CategoryId::as_str), Some("scenes"));
        assert!(app.session().subcategory_filter().is_none());
    }

    #[test]
    fn corrupt_records_do_not_block_startup() {
        let kv = MemoryKvStore::new();
        kv.set(SESSION_KEY, b"[").unwrap();
        kv.set(MODIFIERS_KEY, b"nope").unwrap();
        let app = app_with(&kv);
        assert!(app.session().selection().is_empty());
        assert_eq!(app.catalog().scene_modifiers().first().len(), 3);
    }

    #[test]
    fn catalog_and_modifier_edits_persist_independently() {
        let kv = MemoryKvStore::new();
        let mut app = app_with(&kv);
        app.apply(&[
            Op::Catalog(CatalogOp::AddSubcategory {
                category_id: CategoryId::new("environments").unwrap(),
                name: "新分類".to_owned(),
            }),
            Op::Modifier(ModifierOp::Add { level: ModifierLevel::First, value: "未來".to_owned() }),
        ])
        .unwrap();
        assert_eq!(app.notice(), Some("已添加"));
        StateStore::new(kv.clone()).clear_session().unwrap();

        let app = app_with(&kv);
        let env = app.catalog().get_category(&CategoryId::new("environments").unwrap()).unwrap();
        assert_eq!(env.subcategories().len(), 3);
        assert!(app.catalog().scene_modifiers().first().iter().any(|m| m == "未來"));

        let mut app = app;
        app.apply_one(Op::Modifier(ModifierOp::Reset)).unwrap();
        assert!(kv.get(MODIFIERS_KEY).unwrap().is_none());
    }

    #[test]
    fn rejected_batch_sets_notice_and_keeps_state() {
        let mut app = App::new(sample_catalog(), None);
        let before = app.session().clone();
        let err = app
            .apply(&[
                toggle("a", "A"),
                Op::Nav(NavOp::SwitchCategory { category_id: CategoryId::new("nope").unwrap() }),
            ])
            .unwrap_err();
        assert_eq!(app.take_notice(), Some(err.notice()));
        assert_eq!(app.session(), &before);
        assert_eq!(app.rev(), 0);
    }

    #[test]
    fn copy_output_is_verbatim() {
        let mut app = App::new(sample_catalog(), None);
        assert_eq!(app.copy_output(), None);
        assert_eq!(app.notice(), Some(NOTICE_NOTHING_TO_COPY));

        app.apply_one(Op::Output(OutputOp::Edit { text: "  spaced\n".to_owned() })).unwrap();
        assert_eq!(app.copy_output().as_deref(), Some("  spaced\n"));
        assert_eq!(app.view().notice.as_deref(), Some(NOTICE_COPIED));
    }
}
