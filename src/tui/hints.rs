// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Jump labels for the option list.

/// Home-row first so the most common targets need one keystroke.
pub(crate) const HINT_CHARS: &str = "asdfjklghqwertyuiop";

/// Returns `n` distinct labels of equal width. Duplicate alphabet characters are ignored.
pub(crate) fn jump_labels(n: usize, hint_chars: &str) -> Vec<String> {
    let mut alphabet: Vec<char> = Vec::new();
    for ch in hint_chars.chars() {
        if !alphabet.contains(&ch) {
            alphabet.push(ch);
        }
    }
    if n == 0 || alphabet.is_empty() {
        return Vec::new();
    }

    // Equal widths keep any label from being a prefix of another.
    let k = alphabet.len();
    let mut width = 1usize;
    let mut capacity = k;
    while capacity < n {
        width += 1;
        capacity = capacity.saturating_mul(k);
    }

    (0..n)
        .map(|mut index| {
            let mut chars = vec![alphabet[0]; width];
            for slot in chars.iter_mut().rev() {
                *slot = alphabet[index % k];
                index /= k;
            }
            chars.into_iter().collect()
        })
        .collect()
}

/// Outcome of typing `typed` against `labels`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HintMatch {
    Exact(usize),
    Prefix,
    None,
}

pub(crate) fn match_label(labels: &[String], typed: &str) -> HintMatch {
    if let Some(index) = labels.iter().position(|label| label == typed) {
        return HintMatch::Exact(index);
    }
    if labels.iter().any(|label| label.starts_with(typed)) {
        HintMatch::Prefix
    } else {
        HintMatch::None
    }
}
