// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use regex::{Regex, RegexBuilder};

use crate::model::QueryMode;

/// A compiled option query. Matching is always case-insensitive.
#[derive(Debug, Clone)]
pub enum LabelMatcher {
    Any,
    Substring(String),
    Regex(Regex),
}

impl LabelMatcher {
    /// Blank queries match everything.
    pub fn new(query: &str, mode: QueryMode) -> Result<Self, regex::Error> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Self::Any);
        }
        match mode {
            QueryMode::Substring => Ok(Self::Substring(query.to_lowercase())),
            QueryMode::Regex => {
                let regex = RegexBuilder::new(query).case_insensitive(true).build()?;
                Ok(Self::Regex(regex))
            }
        }
    }

    pub fn is_match(&self, label: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Substring(needle) => label.to_lowercase().contains(needle),
            Self::Regex(regex) => regex.is_match(label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LabelMatcher;
    use crate::model::QueryMode;

    #[test]
    fn substring_mode_folds_case() {
        let matcher = LabelMatcher::new("  CINE ", QueryMode::Substring).expect("matcher");
        assert!(matcher.is_match("Cinematic"));
        assert!(!matcher.is_match("Rim light"));
    }

    #[test]
    fn regex_mode_is_case_insensitive() {
        let matcher = LabelMatcher::new("^rim", QueryMode::Regex).expect("matcher");
        assert!(matcher.is_match("Rim light"));
        assert!(!matcher.is_match("Trim"));
    }

    #[test]
    fn blank_query_matches_everything() {
        let matcher = LabelMatcher::new("   ", QueryMode::Regex).expect("matcher");
        assert!(matcher.is_match(""));
    }

    #[test]
    fn invalid_regex_is_an_error() {
        let err = LabelMatcher::new("(", QueryMode::Regex).expect_err("compile error");
        assert!(err.to_string().to_lowercase().contains("regex"));
    }
}
