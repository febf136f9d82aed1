// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{
    apply_ops, ApplyError, BlockOp, CatalogOp, Delta, ModifierOp, NavOp, Op, OpOutcome, OutputOp,
    SelectOp,
};
use crate::catalog::{CatalogError, CatalogStore, Invariant};
use crate::model::fixtures::sample_catalog;
use crate::model::{CategoryId, ModifierLevel, SelectedItem, Session, VariationId};
use crate::navigation::{visible_options, Activation, OptionNode};

struct Ctx {
    catalog: CatalogStore,
    session: Session,
    rng: StdRng,
}

impl Ctx {
    fn new() -> Self {
        Self {
            catalog: CatalogStore::new(sample_catalog()),
            session: Session::new(),
            rng: StdRng::seed_from_u64(3),
        }
    }

    fn apply(&mut self, ops: &[Op]) -> Result<super::ApplyResult, ApplyError> {
        apply_ops(&mut self.catalog, &mut self.session, ops, &mut self.rng)
    }

    fn node(&self, label: &str) -> OptionNode {
        visible_options(&self.catalog, &self.session)
            .unwrap()
            .options
            .into_iter()
            .map(|o| o.node)
            .find(|n| n.label() == label)
            .unwrap()
    }
}

fn cid(value: &str) -> CategoryId {
    CategoryId::new(value).unwrap()
}

fn item(id: &str, label: &str) -> SelectedItem {
    SelectedItem::new(VariationId::new(id).unwrap(), label)
}

#[test]
fn empty_batch_is_a_no_op() {
    let mut ctx = Ctx::new();
    let result = ctx.apply(&[]).unwrap();
    assert_eq!(result.applied, 0);
    assert!(result.delta.is_empty());
}

#[test]
fn scene_walk_selects_and_recomposes() {
    let mut ctx = Ctx::new();
    ctx.apply(&[Op::Nav(NavOp::SwitchCategory { category_id: cid("scenes") })]).unwrap();
    for label in ["森林", "史前森林"] {
        let node = ctx.node(label);
        ctx.apply(&[Op::Nav(NavOp::Activate { node })]).unwrap();
    }
    let node = ctx.node("佈滿苔蘚的史前森林");
    let result = ctx.apply(&[Op::Nav(NavOp::Activate { node })]).unwrap();

    let [OpOutcome::Activated(Activation::Toggled { nav_reset: true, .. })] =
        result.outcomes.as_slice()
    else {
        panic!("expected a completed toggle, got {:?}", result.outcomes);
    };
    assert!(result.delta.selection && result.delta.navigation && result.delta.output);
    assert_eq!(ctx.session.output().text(), "佈滿苔蘚的史前森林");
}

#[test]
fn failing_op_rolls_back_the_whole_batch() {
    let mut ctx = Ctx::new();
    let before_session = ctx.session.clone();
    let err = ctx
        .apply(&[
            Op::Select(SelectOp::Toggle { item: item("a", "A") }),
            Op::Catalog(CatalogOp::AddSubcategory {
                category_id: cid("environments"),
                name: "新分類".to_owned(),
            }),
            Op::Catalog(CatalogOp::RemoveSubcategory { category_id: cid("characters"), index: 0 }),
        ])
        .unwrap_err();

    assert_eq!(err, ApplyError::Catalog(CatalogError::InvariantViolation(Invariant::LastSubcategory)));
    assert_eq!(err.notice(), "至少需要保留一個子分類");
    assert_eq!(ctx.session, before_session);
    assert!(!ctx.catalog.has_override(&cid("environments")));
}

#[test]
fn catalog_and_modifier_ops_mark_their_records() {
    let mut ctx = Ctx::new();
    let result = ctx
        .apply(&[Op::Catalog(CatalogOp::AddVariation {
            category_id: cid("environments"),
            sub_index: 0,
            label: "溪流".to_owned(),
        })])
        .unwrap();
    assert_eq!(result.delta, Delta { catalog: true, ..Delta::default() });
    assert_eq!(result.outcomes[0].notice(), Some("已添加"));

    let result = ctx
        .apply(&[Op::Modifier(ModifierOp::Remove { level: ModifierLevel::Second, index: 0 })])
        .unwrap();
    assert_eq!(result.delta, Delta { modifiers: true, ..Delta::default() });
    assert_eq!(result.outcomes, [OpOutcome::Removed("佈滿苔蘚的".to_owned())]);

    let err = ctx
        .apply(&[Op::Modifier(ModifierOp::Remove { level: ModifierLevel::Second, index: 0 })])
        .unwrap_err();
    assert_eq!(err.notice(), "至少需要保留一個修飾詞");
    assert_eq!(ctx.catalog.scene_modifiers().second().len(), 1);
}

#[test]
fn duplicate_variation_is_reported() {
    let mut ctx = Ctx::new();
    let err = ctx
        .apply(&[Op::Catalog(CatalogOp::AddVariation {
            category_id: cid("environments"),
            sub_index: 0,
            label: "湖泊".to_owned(),
        })])
        .unwrap_err();
    assert!(matches!(err, ApplyError::Catalog(CatalogError::DuplicateLabel { .. })));
    assert_eq!(err.notice(), "該選項已存在");
}

#[test]
fn output_edit_cycle() {
    let mut ctx = Ctx::new();
    ctx.apply(&[
        Op::Output(OutputOp::SetMode { mode: crate::model::CompositionMode::Selection }),
        Op::Select(SelectOp::Toggle { item: item("a", "A") }),
        Op::Select(SelectOp::Toggle { item: item("b", "B") }),
        Op::Output(OutputOp::Focus),
        Op::Output(OutputOp::Edit { text: "A, B, custom".to_owned() }),
        Op::Select(SelectOp::Toggle { item: item("c", "C") }),
    ])
    .unwrap();
    assert_eq!(ctx.session.output().text(), "A, B, custom, C");

    let result = ctx.apply(&[Op::Output(OutputOp::Blur)]).unwrap();
    assert_eq!(result.outcomes, [OpOutcome::EditingCleared(false)]);
}

#[test]
fn removing_an_unselected_item_changes_nothing() {
    let mut ctx = Ctx::new();
    let result = ctx
        .apply(&[Op::Select(SelectOp::Remove { variation_id: VariationId::new("x").unwrap() })])
        .unwrap();
    assert!(result.delta.is_empty());
}

#[test]
fn block_ops_report_blocks_and_output() {
    let mut ctx = Ctx::new();
    let result = ctx
        .apply(&[
            Op::Block(BlockOp::SetValue { index: 0, text: "女性".to_owned() }),
            Op::Block(BlockOp::ToggleLock { index: 0 }),
            Op::Block(BlockOp::RandomizeUnlocked),
        ])
        .unwrap();
    assert!(result.delta.blocks && result.delta.output);
    assert!(result.delta.session_dirty());
    assert_eq!(result.outcomes[1], OpOutcome::Locked(true));
    assert!(ctx.session.output().text().starts_with("女性"));
}

#[test]
fn reset_category_does_not_hand_a_selected_id_to_a_new_variation() {
    let mut ctx = Ctx::new();
    let env = cid("environments");
    let result = ctx
        .apply(&[Op::Catalog(CatalogOp::AddVariation {
            category_id: env.clone(),
            sub_index: 1,
            label: "X".to_owned(),
        })])
        .unwrap();
    let [OpOutcome::Added(x_id)] = result.outcomes.as_slice() else {
        panic!("unexpected outcomes: {:?}", result.outcomes);
    };
    let x_id = x_id.clone();
    ctx.apply(&[
        Op::Select(SelectOp::Toggle { item: item(&x_id, "X") }),
        Op::Catalog(CatalogOp::Reset { category_id: env.clone() }),
    ])
    .unwrap();

    let result = ctx
        .apply(&[Op::Catalog(CatalogOp::AddVariation {
            category_id: env,
            sub_index: 1,
            label: "Y".to_owned(),
        })])
        .unwrap();
    let [OpOutcome::Added(y_id)] = result.outcomes.as_slice() else {
        panic!("unexpected outcomes: {:?}", result.outcomes);
    };
    assert_ne!(y_id, &x_id);
    assert!(!ctx.session.selection().contains(&VariationId::new(y_id.as_str()).unwrap()));
    assert_eq!(ctx.session.selection().labels().collect::<Vec<_>>(), ["X"]);
}
