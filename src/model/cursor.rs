// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::catalog::ShapeKind;
use super::ids::SubcategoryId;

/// Drill-down position inside a generic dynamic category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GenericCursor {
    #[default]
    Root,
    SubcategorySelected(SubcategoryId),
}

/// Drill-down position inside a scene category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SceneCursor {
    #[default]
    Root,
    TypeSelected {
        scene_type: String,
    },
    BothSelected {
        scene_type: String,
        first_modifier: String,
    },
}

/// Per-category navigation state. Static categories carry none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCursor {
    Generic(GenericCursor),
    Scene(SceneCursor),
}

impl NavCursor {
    pub fn root_for(shape: ShapeKind) -> Option<Self> {
        match shape {
            ShapeKind::Static => None,
            ShapeKind::GenericDynamic => Some(Self::Generic(GenericCursor::Root)),
            ShapeKind::SceneDynamic => Some(Self::Scene(SceneCursor::Root)),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Self::Generic(GenericCursor::Root) | Self::Scene(SceneCursor::Root))
    }

    /// 1-based depth of the options currently listed.
    pub fn depth(&self) -> u8 {
        match self {
            Self::Generic(GenericCursor::Root) | Self::Scene(SceneCursor::Root) => 1,
            Self::Generic(GenericCursor::SubcategorySelected(_))
            | Self::Scene(SceneCursor::TypeSelected { .. }) => 2,
            Self::Scene(SceneCursor::BothSelected { .. }) => 3,
        }
    }

    pub fn shape(&self) -> ShapeKind {
        match self {
            Self::Generic(_) => ShapeKind::GenericDynamic,
            Self::Scene(_) => ShapeKind::SceneDynamic,
        }
    }
}
