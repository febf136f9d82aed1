// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Op handlers used by `apply_ops`. They mutate the working copies only.
fn apply_nav_op(
    catalog: &CatalogStore,
    session: &mut Session,
    op: &NavOp,
    delta: &mut DeltaBuilder,
) -> Result<OpOutcome, ApplyError> {
    match op {
        NavOp::SwitchCategory { category_id } => {
            navigation::switch_category(catalog, session, category_id)?;
            delta.record_navigation();
            Ok(OpOutcome::Done)
        }
        NavOp::Activate { node } => {
            let activation = navigation::activate(catalog, session, node)?;
            match &activation {
                Activation::Navigated => delta.record_navigation(),
                Activation::Toggled { item, outcome, nav_reset } => {
                    let added = (*outcome == ToggleOutcome::Added).then_some(item);
                    compose::selection_changed(session, added);
                    delta.record_selection();
                    if *nav_reset {
                        delta.record_navigation();
                    }
                }
                Activation::OpenManager(_) => {}
            }
            Ok(OpOutcome::Activated(activation))
        }
        NavOp::Up => {
            if navigation::navigate_up(catalog, session)? {
                delta.record_navigation();
            }
            Ok(OpOutcome::Done)
        }
        NavOp::SetSubcategoryFilter { filter } => {
            navigation::set_subcategory_filter(catalog, session, filter.clone())?;
            delta.record_navigation();
            Ok(OpOutcome::Done)
        }
        NavOp::SetQuery { query } => {
            session.set_query(query.clone());
            Ok(OpOutcome::Done)
        }
        NavOp::SetQueryMode { mode } => {
            session.set_query_mode(*mode);
            Ok(OpOutcome::Done)
        }
    }
}

fn apply_select_op(session: &mut Session, op: &SelectOp, delta: &mut DeltaBuilder) -> OpOutcome {
    match op {
        SelectOp::Toggle { item } => {
            let outcome = session.selection_mut().toggle(item.clone());
            let added = (outcome == ToggleOutcome::Added).then_some(item);
            compose::selection_changed(session, added);
            delta.record_selection();
            OpOutcome::Toggled(outcome)
        }
        SelectOp::Remove { variation_id } => {
            if session.selection_mut().remove(variation_id) {
                compose::selection_changed(session, None);
                delta.record_selection();
            }
            OpOutcome::Done
        }
        SelectOp::Clear => {
            compose::clear_selection(session);
            delta.record_selection();
            OpOutcome::Done
        }
    }
}

fn apply_output_op(session: &mut Session, op: &OutputOp, delta: &mut DeltaBuilder) -> OpOutcome {
    let outcome = match op {
        OutputOp::Focus => {
            compose::begin_edit(session);
            OpOutcome::Done
        }
        OutputOp::Edit { text } => {
            compose::edit_output(session, text.clone());
            OpOutcome::Done
        }
        OutputOp::Blur => OpOutcome::EditingCleared(compose::end_edit(session)),
        OutputOp::ApplySuggestion { text } => {
            compose::apply_suggestion(session, text.clone());
            OpOutcome::Done
        }
        OutputOp::SetDelimiter { delimiter } => {
            compose::set_delimiter(session, delimiter.clone());
            OpOutcome::Done
        }
        OutputOp::SetMode { mode } => {
            compose::set_composition_mode(session, *mode);
            OpOutcome::Done
        }
    };
    delta.record_output();
    outcome
}

fn apply_block_op<R: Rng + ?Sized>(
    catalog: &CatalogStore,
    session: &mut Session,
    op: &BlockOp,
    rng: &mut R,
    delta: &mut DeltaBuilder,
) -> Result<OpOutcome, ApplyError> {
    let outcome = match op {
        BlockOp::SetValue { index, text } => {
            compose::set_block_value(session, *index, text.clone())?;
            OpOutcome::Done
        }
        BlockOp::ToggleLock { index } => OpOutcome::Locked(compose::toggle_lock(session, *index)?),
        BlockOp::RandomizeUnlocked => {
            OpOutcome::Randomized(compose::randomize_unlocked(catalog, session, rng)?)
        }
    };
    delta.record_blocks();
    Ok(outcome)
}

fn apply_catalog_op(
    catalog: &mut CatalogStore,
    session: &Session,
    op: &CatalogOp,
    delta: &mut DeltaBuilder,
) -> Result<OpOutcome, ApplyError> {
    let outcome = match op {
        CatalogOp::AddSubcategory { category_id, name } => {
            let in_use = |id: &SubcategoryId| session_refers_to(session, id);
            let added = catalog.add_subcategory_avoiding(category_id, name, in_use)?;
            OpOutcome::Added(added.into_string())
        }
        CatalogOp::RemoveSubcategory { category_id, index } => {
            let removed = catalog.remove_subcategory(category_id, *index)?;
            OpOutcome::Removed(removed.name().to_owned())
        }
        CatalogOp::AddVariation { category_id, sub_index, label } => {
            let in_use = |id: &VariationId| session.selection().contains(id);
            let added = catalog.add_variation_avoiding(category_id, *sub_index, label, in_use)?;
            OpOutcome::Added(added.into_string())
        }
        CatalogOp::RemoveVariation { category_id, sub_index, var_index } => {
            let removed = catalog.remove_variation(category_id, *sub_index, *var_index)?;
            OpOutcome::Removed(removed.label().to_owned())
        }
        CatalogOp::Reset { category_id } => {
            catalog.reset_category(category_id)?;
            OpOutcome::Reset
        }
    };
    delta.record_catalog();
    Ok(outcome)
}

fn apply_modifier_op(
    catalog: &mut CatalogStore,
    op: &ModifierOp,
    delta: &mut DeltaBuilder,
) -> Result<OpOutcome, ApplyError> {
    let outcome = match op {
        ModifierOp::Add { level, value } => {
            catalog.add_modifier(*level, value)?;
            OpOutcome::Added(value.trim().to_owned())
        }
        ModifierOp::Remove { level, index } => {
            OpOutcome::Removed(catalog.remove_modifier(*level, *index)?)
        }
        ModifierOp::Reset => {
            catalog.reset_scene_modifiers();
            OpOutcome::Reset
        }
    };
    delta.record_modifiers();
    Ok(outcome)
}

/// Whether a drill-down cursor or the static filter still names `subcategory_id`.
fn session_refers_to(session: &Session, subcategory_id: &SubcategoryId) -> bool {
    session.subcategory_filter() == Some(subcategory_id)
        || session.nav().values().any(|cursor| {
            matches!(
                cursor,
                NavCursor::Generic(GenericCursor::SubcategorySelected(id)) if id == subcategory_id
            )
        })
}
