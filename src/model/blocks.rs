// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::CategoryId;

/// Describes one block slot: its label and the categories whose labels feed "randomize".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpec {
    pub label: String,
    pub pool: Vec<CategoryId>,
}

impl BlockSpec {
    pub fn new(label: impl Into<String>, pool: &[&str]) -> Self {
        Self {
            label: label.into(),
            pool: pool.iter().filter_map(|id| CategoryId::new(*id).ok()).collect(),
        }
    }
}

/// The default block set: Character, Environment, Lighting, Camera, Style.
pub fn default_block_specs() -> Vec<BlockSpec> {
    vec![
        BlockSpec::new("Character", &["characters"]),
        BlockSpec::new("Environment", &["scenes", "environments"]),
        BlockSpec::new("Lighting", &["lighting"]),
        BlockSpec::new("Camera", &["camera"]),
        BlockSpec::new("Style", &["styles"]),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    spec: BlockSpec,
    value: String,
    locked: bool,
}

impl Block {
    pub fn new(spec: BlockSpec) -> Self {
        Self { spec, value: String::new(), locked: false }
    }

    pub fn label(&self) -> &str {
        &self.spec.label
    }

    pub fn pool(&self) -> &[CategoryId] {
        &self.spec.pool
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn has_content(&self) -> bool {
        !self.value.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockList {
    blocks: Vec<Block>,
}

impl Default for BlockList {
    fn default() -> Self {
        Self::from_specs(default_block_specs())
    }
}

impl BlockList {
    pub fn from_specs(specs: Vec<BlockSpec>) -> Self {
        Self { blocks: specs.into_iter().map(Block::new).collect() }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Block> {
        self.blocks.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn has_content(&self) -> bool {
        self.blocks.iter().any(Block::has_content)
    }

    pub fn all_locked(&self) -> bool {
        self.blocks.iter().all(Block::is_locked)
    }

    /// Restores persisted values/locks onto blocks with a matching label.
    pub fn restore(&mut self, label: &str, value: &str, locked: bool) -> bool {
        let Some(block) = self.blocks.iter_mut().find(|b| b.label() == label) else {
            return false;
        };
        block.set_value(value);
        block.set_locked(locked);
        true
    }
}
