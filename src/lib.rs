// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Promptdict: a terminal prompt builder over a categorized dictionary of prompt fragments.
//!
//! The catalog, navigation and composition layers are plain data plus pure functions; [`ops`]
//! is the single mutation entry point and [`app`] ties it to persistence. [`tui`] and [`serve`]
//! are the two front-ends.

pub mod app;
pub mod catalog;
pub mod compose;
pub mod config;
pub mod model;
pub mod navigation;
pub mod ops;
pub mod serve;
pub mod store;
pub mod suggest;
pub mod tui;
pub mod ui;
