// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence.
//!
//! State is kept as three independent JSON records in a key-value store: the session snapshot,
//! the scene modifiers and the catalog overrides. Each can be missing or corrupt without
//! affecting the others.

use std::fmt;
use std::path::PathBuf;

use crate::catalog::CatalogLoadError;
use crate::model::IdError;

pub mod kv;
pub mod state;

pub use kv::{DirKvStore, KvStore, MemoryKvStore, WriteDurability};
pub use state::{StateStore, MODIFIERS_KEY, OVERRIDES_KEY, SESSION_KEY};

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: std::io::Error },
    Json { key: String, source: serde_json::Error },
    InvalidKey { key: String },
    InvalidId { field: &'static str, value: String, source: Box<IdError> },
    Catalog { key: String, source: Box<CatalogLoadError> },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { key, source } => write!(f, "json error in record {key:?}: {source}"),
            Self::InvalidKey { key } => write!(f, "invalid store key: {key:?}"),
            Self::InvalidId { field, value, source } => {
                write!(f, "invalid id for {field}: {value:?}: {source}")
            }
            Self::Catalog { key, source } => {
                write!(f, "invalid catalog data in record {key:?}: {source}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidKey { .. } => None,
            Self::InvalidId { source, .. } => Some(source),
            Self::Catalog { source, .. } => Some(source),
        }
    }
}
