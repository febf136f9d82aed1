// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crossterm::event::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputEvent {
    Changed,
    Submit,
    Cancel,
    Ignored,
}

/// Single-line text field with the cursor pinned to the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct LineInput {
    text: String,
}

impl LineInput {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn handle(&mut self, code: KeyCode) -> InputEvent {
        match code {
            KeyCode::Char(ch) => {
                self.text.push(ch);
                InputEvent::Changed
            }
            KeyCode::Backspace => {
                if self.text.pop().is_some() {
                    InputEvent::Changed
                } else {
                    InputEvent::Ignored
                }
            }
            KeyCode::Enter => InputEvent::Submit,
            KeyCode::Esc => InputEvent::Cancel,
            _ => InputEvent::Ignored,
        }
    }
}
