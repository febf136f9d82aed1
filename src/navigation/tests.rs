// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use super::{
    activate, breadcrumbs, navigate_up, set_subcategory_filter, switch_category,
    visible_options, Activation, ManageTarget, NavError, OptionNode,
};
use crate::catalog::CatalogStore;
use crate::model::fixtures::sample_catalog;
use crate::model::{
    CategoryId, GenericCursor, ModifierLevel, NavCursor, QueryMode, SceneCursor, Session,
    SubcategoryId, ToggleOutcome,
};

struct Ctx {
    catalog: CatalogStore,
    session: Session,
}

impl Ctx {
    fn on(category: &str) -> Self {
        let catalog = CatalogStore::new(sample_catalog());
        let mut session = Session::new();
        switch_category(&catalog, &mut session, &cid(category)).unwrap();
        Self { catalog, session }
    }

    fn labels(&self) -> Vec<String> {
        visible_options(&self.catalog, &self.session)
            .unwrap()
            .options
            .iter()
            .map(|o| o.node.label().into_owned())
            .collect()
    }

    fn node(&self, label: &str) -> OptionNode {
        visible_options(&self.catalog, &self.session)
            .unwrap()
            .options
            .into_iter()
            .map(|o| o.node)
            .find(|n| n.label() == label)
            .unwrap_or_else(|| panic!("no option labelled {label}"))
    }

    fn click(&mut self, label: &str) -> Activation {
        let node = self.node(label);
        activate(&self.catalog, &mut self.session, &node).unwrap()
    }

    fn cursor(&self, category: &str) -> Option<&NavCursor> {
        self.session.nav_cursor(&cid(category))
    }
}

fn cid(value: &str) -> CategoryId {
    CategoryId::new(value).unwrap()
}

#[fixture]
fn scenes() -> Ctx {
    Ctx::on("scenes")
}

#[fixture]
fn environments() -> Ctx {
    Ctx::on("environments")
}

#[fixture]
fn lighting() -> Ctx {
    Ctx::on("lighting")
}

#[rstest]
fn generic_root_lists_subcategories_then_manage(environments: Ctx) {
    assert_eq!(environments.labels(), ["水域", "地形", "管理選項"]);
    let list = visible_options(&environments.catalog, &environments.session).unwrap();
    assert_eq!(list.depth, 1);
    assert_eq!(list.count, 2);
}

#[rstest]
fn generic_leaf_selection_returns_to_root(mut environments: Ctx) {
    assert_eq!(environments.click("水域"), Activation::Navigated);
    assert_eq!(environments.labels(), ["湖泊", "河流"]);

    let Activation::Toggled { item, outcome, nav_reset } = environments.click("湖泊") else {
        panic!("expected toggle");
    };
    assert_eq!(item.variation_id().as_str(), "env-lake");
    assert_eq!(outcome, ToggleOutcome::Added);
    assert!(nav_reset);
    assert_eq!(
        environments.cursor("environments"),
        Some(&NavCursor::Generic(GenericCursor::Root))
    );
    assert!(environments.session.selection().contains(&item.variation_id().clone()));
}

#[rstest]
fn deselecting_a_final_leaf_keeps_the_cursor(mut environments: Ctx) {
    environments.click("水域");
    environments.click("湖泊");
    environments.click("水域");
    let Activation::Toggled { outcome, nav_reset, .. } = environments.click("湖泊") else {
        panic!("expected toggle");
    };
    assert_eq!(outcome, ToggleOutcome::Removed);
    assert!(!nav_reset);
    assert_eq!(
        environments.cursor("environments"),
        Some(&NavCursor::Generic(GenericCursor::SubcategorySelected(
            SubcategoryId::new("water").unwrap()
        )))
    );
    assert!(environments.session.selection().is_empty());
}

#[rstest]
fn scene_drill_down_composes_label_and_resets(mut scenes: Ctx) {
    assert_eq!(scenes.labels(), ["森林", "沙漠", "管理修飾詞"]);
    scenes.click("森林");
    assert_eq!(scenes.labels(), ["史前森林", "原始森林", "魔法森林"]);
    scenes.click("史前森林");
    assert_eq!(scenes.labels(), ["佈滿苔蘚的史前森林", "百花齊放的史前森林"]);
    assert_eq!(breadcrumbs(&scenes.catalog, &scenes.session), ["首頁", "場景", "森林", "史前森林"]);

    let Activation::Toggled { item, nav_reset, .. } = scenes.click("佈滿苔蘚的史前森林") else {
        panic!("expected toggle");
    };
    assert_eq!(item.label(), "佈滿苔蘚的史前森林");
    assert_eq!(item.variation_id().as_str(), "scene-final-森林-史前-佈滿苔蘚的");
    assert!(nav_reset);
    assert_eq!(scenes.cursor("scenes"), Some(&NavCursor::Scene(SceneCursor::Root)));
}

#[rstest]
fn manage_nodes_open_managers(mut scenes: Ctx, mut environments: Ctx) {
    assert_eq!(scenes.click("管理修飾詞"), Activation::OpenManager(ManageTarget::SceneModifiers));
    assert_eq!(
        environments.click("管理選項"),
        Activation::OpenManager(ManageTarget::Catalog(cid("environments")))
    );
}

#[rstest]
fn static_lists_every_leaf_and_honours_filter(mut lighting: Ctx) {
    assert_eq!(lighting.labels(), ["Golden hour", "Cinematic", "Rim light"]);

    set_subcategory_filter(
        &lighting.catalog,
        &mut lighting.session,
        Some(SubcategoryId::new("studio").unwrap()),
    )
    .unwrap();
    assert_eq!(lighting.labels(), ["Cinematic", "Rim light"]);
    assert_eq!(breadcrumbs(&lighting.catalog, &lighting.session), ["首頁", "光線", "攝影棚"]);

    let Activation::Toggled { nav_reset, .. } = lighting.click("Cinematic") else {
        panic!("expected toggle");
    };
    assert!(!nav_reset);
}

#[rstest]
fn unknown_filter_is_rejected(mut lighting: Ctx) {
    let err = set_subcategory_filter(
        &lighting.catalog,
        &mut lighting.session,
        Some(SubcategoryId::new("ghost").unwrap()),
    )
    .unwrap_err();
    assert!(matches!(err, NavError::NotFound { .. }));
    assert!(lighting.session.subcategory_filter().is_none());
}

#[rstest]
#[case("cine", &["Cinematic"])]
#[case("攝影", &["Cinematic", "Rim light"])]
#[case("LIGHT", &["Rim light"])]
fn static_query_matches_label_or_subcategory(
    mut lighting: Ctx,
    #[case] query: &str,
    #[case] expected: &[&str],
) {
    lighting.session.set_query(query);
    assert_eq!(lighting.labels(), expected);
}

#[rstest]
fn generic_query_matches_variation_labels_only(mut environments: Ctx) {
    environments.click("水域");
    environments.session.set_query("水");
    assert!(environments.labels().is_empty());

    environments.session.set_query("湖");
    assert_eq!(environments.labels(), ["湖泊"]);
}

#[rstest]
fn manage_nodes_are_not_counted(mut environments: Ctx) {
    environments.session.set_query("管理");
    let list = visible_options(&environments.catalog, &environments.session).unwrap();
    assert_eq!(list.options.len(), 1);
    assert_eq!(list.count, 0);
}

#[rstest]
fn invalid_regex_matches_nothing(mut lighting: Ctx) {
    lighting.session.set_query_mode(QueryMode::Regex);
    lighting.session.set_query("(");
    let list = visible_options(&lighting.catalog, &lighting.session).unwrap();
    assert!(list.options.is_empty());
    assert!(list.query_error.is_some());

    lighting.session.set_query("^(golden|rim)");
    assert_eq!(lighting.labels(), ["Golden hour", "Rim light"]);
}

#[rstest]
fn switching_category_resets_cursor_and_filter(mut environments: Ctx) {
    environments.click("地形");
    switch_category(&environments.catalog, &mut environments.session, &cid("lighting")).unwrap();
    switch_category(&environments.catalog, &mut environments.session, &cid("environments"))
        .unwrap();
    assert_eq!(
        environments.cursor("environments"),
        Some(&NavCursor::Generic(GenericCursor::Root))
    );

    let err = switch_category(&environments.catalog, &mut environments.session, &cid("ghost"))
        .unwrap_err();
    assert!(matches!(err, NavError::NotFound { .. }));
}

#[rstest]
fn stale_options_are_rejected(mut environments: Ctx) {
    let lake = {
        environments.click("水域");
        environments.node("湖泊")
    };
    navigate_up(&environments.catalog, &mut environments.session).unwrap();
    let err = activate(&environments.catalog, &mut environments.session, &lake).unwrap_err();
    assert_eq!(err, NavError::StaleOption { label: "湖泊".to_owned() });
    assert!(environments.session.selection().is_empty());
}

#[rstest]
fn navigate_up_walks_scene_levels(mut scenes: Ctx) {
    scenes.click("沙漠");
    scenes.click("魔法沙漠");
    assert!(navigate_up(&scenes.catalog, &mut scenes.session).unwrap());
    assert_eq!(
        scenes.cursor("scenes"),
        Some(&NavCursor::Scene(SceneCursor::TypeSelected { scene_type: "沙漠".to_owned() }))
    );
    assert!(navigate_up(&scenes.catalog, &mut scenes.session).unwrap());
    assert!(!navigate_up(&scenes.catalog, &mut scenes.session).unwrap());
}

#[rstest]
fn removed_modifier_clamps_cursor(mut scenes: Ctx) {
    scenes.click("森林");
    scenes.click("魔法森林");
    scenes.catalog.remove_modifier(ModifierLevel::First, 2).unwrap();
    assert_eq!(scenes.labels(), ["史前森林", "原始森林"]);
    assert_eq!(breadcrumbs(&scenes.catalog, &scenes.session), ["首頁", "場景", "森林"]);
}

#[rstest]
fn removed_subcategory_clamps_cursor(mut environments: Ctx) {
    environments.click("水域");
    environments.catalog.remove_subcategory(&cid("environments"), 0).unwrap();
    assert_eq!(environments.labels(), ["地形", "管理選項"]);
}

#[test]
fn empty_catalog_has_no_active_category() {
    let catalog = CatalogStore::new(Vec::new());
    let session = Session::new();
    assert!(matches!(visible_options(&catalog, &session), Err(NavError::NotFound { .. })));
    assert_eq!(breadcrumbs(&catalog, &session), ["首頁"]);
}
