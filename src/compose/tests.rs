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
    apply_suggestion, auto_text, begin_edit, clear_selection, edit_output, end_edit,
    randomize_unlocked, reconcile_restored, selection_changed, set_block_value, set_delimiter,
    toggle_lock, ComposeError,
};
use crate::catalog::CatalogStore;
use crate::model::fixtures::sample_catalog;
use crate::model::{
    BlockList, BlockSpec, CompositionMode, Delimiter, SelectedItem, Session, VariationId,
};

fn item(label: &str) -> SelectedItem {
    SelectedItem::new(VariationId::new(format!("id-{label}")).unwrap(), label)
}

fn select(session: &mut Session, label: &str) {
    let item = item(label);
    session.selection_mut().toggle(item.clone());
    selection_changed(session, Some(&item));
}

fn selection_session() -> Session {
    let mut session = Session::new();
    session.set_composition_mode(CompositionMode::Selection);
    session
}

#[test]
fn blocks_skip_empty_values() {
    let mut session = Session::new().with_blocks(BlockList::from_specs(vec![
        BlockSpec::new("Character", &["characters"]),
        BlockSpec::new("Environment", &["environments"]),
        BlockSpec::new("Lighting", &["lighting"]),
    ]));
    set_block_value(&mut session, 0, "女性").unwrap();
    set_block_value(&mut session, 2, "Cinematic").unwrap();
    assert_eq!(session.output().text(), "女性, Cinematic");
}

#[test]
fn empty_blocks_fall_back_to_selection() {
    let mut session = Session::new();
    select(&mut session, "A");
    select(&mut session, "B");
    assert_eq!(session.output().text(), "A, B");

    set_block_value(&mut session, 1, "湖泊").unwrap();
    assert_eq!(session.output().text(), "湖泊");

    set_block_value(&mut session, 1, "  ").unwrap();
    assert_eq!(session.output().text(), "A, B");
}

#[test]
fn hand_edits_survive_new_selections() {
    let mut session = selection_session();
    select(&mut session, "A");
    select(&mut session, "B");
    assert_eq!(session.output().text(), "A, B");

    edit_output(&mut session, "A, B, custom");
    select(&mut session, "C");
    assert_eq!(session.output().text(), "A, B, custom, C");
    assert_eq!(session.output().last_synced_selection_count(), 3);

    assert!(!end_edit(&mut session));
    assert!(session.output().is_user_editing());
}

#[test]
fn reselected_item_is_appended_while_editing_but_keeps_its_slot() {
    let mut session = selection_session();
    select(&mut session, "A");
    select(&mut session, "B");
    begin_edit(&mut session);

    session.selection_mut().toggle(item("A"));
    selection_changed(&mut session, None);
    edit_output(&mut session, "B");
    select(&mut session, "A");

    assert_eq!(session.output().text(), "B, A");
    assert_eq!(session.selection().labels().collect::<Vec<_>>(), ["A", "B"]);
    assert_eq!(auto_text(&session), "A, B");
    assert!(!end_edit(&mut session));
    assert!(session.output().is_user_editing());
}

#[test]
fn blur_with_auto_text_clears_editing() {
    let mut session = selection_session();
    select(&mut session, "A");
    select(&mut session, "B");
    begin_edit(&mut session);
    edit_output(&mut session, "  A, B \n");
    assert!(end_edit(&mut session));
    assert!(!session.output().is_user_editing());

    select(&mut session, "C");
    assert_eq!(session.output().text(), "A, B, C");
}

#[test]
fn removal_while_editing_keeps_text() {
    let mut session = selection_session();
    select(&mut session, "A");
    select(&mut session, "B");
    edit_output(&mut session, "mine");

    session.selection_mut().remove(&VariationId::new("id-A").unwrap());
    selection_changed(&mut session, None);
    assert_eq!(session.output().text(), "mine");
    assert_eq!(session.output().last_synced_selection_count(), 1);
}

#[test]
fn appending_into_blank_edit_skips_separator() {
    let mut session = selection_session();
    edit_output(&mut session, "   ");
    select(&mut session, "A");
    assert_eq!(session.output().text(), "A");
}

#[test]
fn newline_delimiter_applies_to_appends_and_regeneration() {
    let mut session = selection_session();
    select(&mut session, "A");
    set_delimiter(&mut session, Delimiter::new(" | ", true));
    select(&mut session, "B");
    assert_eq!(session.output().text(), "A\nB");

    set_delimiter(&mut session, Delimiter::new(" | ", false));
    assert_eq!(session.output().text(), "A | B");
}

#[test]
fn delimiter_change_while_editing_keeps_text() {
    let mut session = selection_session();
    select(&mut session, "A");
    select(&mut session, "B");
    edit_output(&mut session, "A, B!");
    set_delimiter(&mut session, Delimiter::new(" / ", false));
    assert_eq!(session.output().text(), "A, B!");
    assert_eq!(auto_text(&session), "A / B");
}

#[test]
fn clear_selection_respects_editing() {
    let mut session = selection_session();
    select(&mut session, "A");
    clear_selection(&mut session);
    assert_eq!(session.output().text(), "");

    select(&mut session, "B");
    edit_output(&mut session, "B and more");
    clear_selection(&mut session);
    assert!(session.selection().is_empty());
    assert_eq!(session.output().text(), "B and more");
    assert_eq!(session.output().last_synced_selection_count(), 0);
}

#[test]
fn suggestion_counts_as_hand_edit() {
    let mut session = selection_session();
    select(&mut session, "A");
    apply_suggestion(&mut session, "a misty forest at dawn");
    assert!(session.output().is_user_editing());
    select(&mut session, "B");
    assert_eq!(session.output().text(), "a misty forest at dawn, B");
}

#[test]
fn restored_text_that_differs_marks_editing() {
    let mut session = selection_session();
    select(&mut session, "A");
    reconcile_restored(&mut session);
    assert!(!session.output().is_user_editing());

    edit_output(&mut session, "A!");
    reconcile_restored(&mut session);
    assert!(session.output().is_user_editing());
}

#[test]
fn block_edit_clears_editing() {
    let mut session = Session::new();
    edit_output(&mut session, "free text");
    set_block_value(&mut session, 0, "女性").unwrap();
    assert!(!session.output().is_user_editing());
    assert_eq!(session.output().text(), "女性");
}

#[test]
fn locked_blocks_reject_edits() {
    let mut session = Session::new();
    assert_eq!(toggle_lock(&mut session, 0), Ok(true));
    assert_eq!(set_block_value(&mut session, 0, "x"), Err(ComposeError::BlockLocked { index: 0 }));
    assert_eq!(toggle_lock(&mut session, 0), Ok(false));
    assert_eq!(
        toggle_lock(&mut session, 42),
        Err(ComposeError::BlockOutOfRange { index: 42, len: 5 })
    );
}

#[test]
fn randomize_fills_unlocked_blocks_from_pools() {
    let catalog = CatalogStore::new(sample_catalog());
    let mut session = Session::new();
    set_block_value(&mut session, 0, "keep me").unwrap();
    toggle_lock(&mut session, 0).unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    let drawn = randomize_unlocked(&catalog, &mut session, &mut rng).unwrap();
    // Camera and Style pools are not in the sample catalog.
    assert_eq!(drawn, 2);

    let blocks = session.blocks().blocks();
    assert_eq!(blocks[0].value(), "keep me");
    let env_pool = catalog
        .leaf_labels(&"scenes".parse().unwrap())
        .into_iter()
        .chain(catalog.leaf_labels(&"environments".parse().unwrap()))
        .collect::<Vec<_>>();
    assert!(env_pool.iter().any(|l| l == blocks[1].value()));
    assert!(catalog.leaf_labels(&"lighting".parse().unwrap()).iter().any(|l| l == blocks[2].value()));
    assert_eq!(blocks[3].value(), "");
    assert!(session.output().text().starts_with("keep me, "));
}

#[test]
fn randomize_with_everything_locked_is_rejected() {
    let catalog = CatalogStore::new(sample_catalog());
    let mut session = Session::new();
    for index in 0..session.blocks().len() {
        toggle_lock(&mut session, index).unwrap();
    }
    let before = session.clone();
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        randomize_unlocked(&catalog, &mut session, &mut rng),
        Err(ComposeError::AllBlocksLocked)
    );
    assert_eq!(session, before);
}
