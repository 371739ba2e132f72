// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Entity handles
//!
//! Entities are lightweight identifiers that tie components together.
//! A handle pairs a reusable slot number with a generation counter so
//! that references left over from a destroyed entity can be detected
//! after the slot is handed out again.

use std::fmt;

/// Reusable slot number identifying an entity independent of its generation
///
/// Slots index directly into the world's generation table and into each
/// store's sparse array, which is why they stay small and dense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(u32);

impl EntityId {
    /// Create a new EntityId from a raw u32 slot number
    pub fn new(id: u32) -> Self {
        EntityId(id)
    }

    /// Get the raw u32 value
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Get the slot as a usize array index
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Entity handle with generational index support for safe slot reuse
///
/// Two handles are equal only when both slot and generation match; a
/// handle captured before its entity was destroyed compares unequal to
/// any later entity occupying the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    id: EntityId,
    generation: u32,
}

impl Entity {
    /// Create a new entity handle with the given slot and generation
    pub fn new(id: u32, generation: u32) -> Self {
        Entity {
            id: EntityId::new(id),
            generation,
        }
    }

    /// Get the entity's slot
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Get the generation number
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}, gen: {})", self.id.0, self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_creation() {
        let entity = Entity::new(42, 1);
        assert_eq!(entity.id().raw(), 42);
        assert_eq!(entity.generation(), 1);
    }

    #[test]
    fn test_entity_equality() {
        let e1 = Entity::new(1, 0);
        let e2 = Entity::new(1, 0);
        let e3 = Entity::new(1, 1);
        assert_eq!(e1, e2);
        assert_ne!(e1, e3);
    }

    #[test]
    fn test_entity_id_index() {
        let id = EntityId::new(7);
        assert_eq!(id.index(), 7usize);
        assert_eq!(format!("{}", id), "Entity(7)");
    }
}
