//! World management
//!
//! The World is the central container for all ECS data: it allocates
//! entity slots, owns every component store through the type registry,
//! and provides the scan and tick-boundary entry points.

use crate::ecs::component::Component;
use crate::ecs::entity::{Entity, EntityId};
use crate::ecs::query::{QueryParam, ReadParam};
use crate::ecs::registry::Registry;
use std::any::TypeId;
use std::collections::HashSet;

/// The main ECS world container
///
/// Entity slots are reused through a free list; each slot carries a
/// generation counter that is bumped on destroy, so handles held across
/// a destroy can never alias the slot's next occupant. All component
/// access resolves through the world's type registry.
///
/// Single-threaded by design: every operation runs to completion on the
/// calling thread and references handed out by lookups stay valid only
/// until the next structural mutation of that component's store.
pub struct World {
    /// Per-slot generation counters; grows, never shrinks
    generations: Vec<u32>,
    /// Reclaimed slots awaiting reuse, last-destroyed-first-reused
    free: Vec<EntityId>,
    /// Per-type component stores
    registry: Registry,
    /// Component types cleared wholesale by [`World::clear_transients`]
    transient: HashSet<TypeId>,
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        World {
            generations: Vec::new(),
            free: Vec::new(),
            registry: Registry::new(),
            transient: HashSet::new(),
        }
    }

    // --- entity lifecycle ---

    /// Create a new entity
    ///
    /// Reuses the most recently destroyed slot when one is available
    /// (its generation is already current from the destroy), otherwise
    /// appends a fresh slot at generation 0. Never fails.
    pub fn create_entity(&mut self) -> Entity {
        if let Some(id) = self.free.pop() {
            Entity::new(id.raw(), self.generations[id.index()])
        } else {
            let id = self.generations.len() as u32;
            self.generations.push(0);
            Entity::new(id, 0)
        }
    }

    /// Destroy an entity
    ///
    /// Stale or out-of-range handles are silently ignored, which makes
    /// double-destroy a no-op. On a live handle: every registered store
    /// drops the slot's value, the slot's generation is bumped (so all
    /// outstanding handles go permanently dead), and the slot joins the
    /// free list.
    pub fn destroy_entity(&mut self, entity: Entity) {
        let slot = entity.id().index();
        if slot >= self.generations.len() || self.generations[slot] != entity.generation() {
            return;
        }
        self.registry.erase_all(entity.id());
        let next = self.generations[slot].wrapping_add(1);
        if next == 0 {
            log::warn!(
                "entity slot {} generation wrapped; stale handles may alias",
                entity.id().raw()
            );
        }
        self.generations[slot] = next;
        self.free.push(entity.id());
    }

    /// Check if an entity handle is still live
    pub fn is_alive(&self, entity: Entity) -> bool {
        let slot = entity.id().index();
        slot < self.generations.len() && self.generations[slot] == entity.generation()
    }

    /// Get the number of live entities
    pub fn entity_count(&self) -> usize {
        self.generations.len() - self.free.len()
    }

    /// Destroy every live entity at once
    ///
    /// All stores are emptied and every live slot's generation is
    /// bumped, so previously held handles stay dead. Slots remain
    /// reusable afterwards.
    pub fn clear(&mut self) {
        self.registry.clear_all();
        let freed: HashSet<EntityId> = self.free.iter().copied().collect();
        for slot in 0..self.generations.len() {
            let id = EntityId::new(slot as u32);
            if !freed.contains(&id) {
                self.generations[slot] = self.generations[slot].wrapping_add(1);
                self.free.push(id);
            }
        }
    }

    // --- per-type component access ---

    /// Attach a component to an entity, replacing any existing value
    ///
    /// The store for `T` is created on first use. Replacing keeps the
    /// store's size and packing unchanged. The returned reference is
    /// valid until the next structural mutation of `T`'s store.
    pub fn add<T: Component>(&mut self, entity: Entity, value: T) -> &mut T {
        self.registry.store_or_default::<T>().insert(entity.id(), value)
    }

    /// Check if an entity currently holds a `T` value
    ///
    /// Read-only path: never registers a store for `T`.
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.registry
            .store::<T>()
            .map_or(false, |store| store.contains(entity.id()))
    }

    /// Get a reference to an entity's `T` value
    ///
    /// Read-only path: never registers a store for `T`.
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.registry.store::<T>().and_then(|store| store.get(entity.id()))
    }

    /// Get a mutable reference to an entity's `T` value
    ///
    /// Never registers a store for `T`: mutating a value the entity
    /// does not have is not a meaningful operation.
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.registry
            .store_mut::<T>()
            .and_then(|store| store.get_mut(entity.id()))
    }

    /// Detach an entity's `T` value; no-op when absent
    pub fn remove<T: Component>(&mut self, entity: Entity) {
        if let Some(store) = self.registry.store_mut::<T>() {
            store.remove(entity.id());
        }
    }

    /// Get the number of stored `T` values across all entities
    ///
    /// Read-only path: 0 for a never-registered type.
    pub fn count<T: Component>(&self) -> usize {
        self.registry.store::<T>().map_or(0, |store| store.len())
    }

    // --- scans ---

    /// Visit every entity holding all of `Q`'s component types
    ///
    /// `Q` is `&T`, `&mut T`, or a tuple of those (up to four); the
    /// first type is the primary and its dense packing drives both the
    /// visit order and the scan cost, so put the rarest component
    /// first. Order is not guaranteed and shifts after removals.
    ///
    /// The primary's store is registered if it never existed (and the
    /// scan then visits nothing); filter stores are never created.
    ///
    /// # Examples
    ///
    /// ```
    /// use ecs_core::ecs::{Component, World};
    ///
    /// struct Position { x: f64 }
    /// impl Component for Position {}
    /// struct Velocity { dx: f64 }
    /// impl Component for Velocity {}
    ///
    /// let mut world = World::new();
    /// let e = world.create_entity();
    /// world.add(e, Position { x: 0.0 });
    /// world.add(e, Velocity { dx: 2.0 });
    ///
    /// world.each::<(&mut Position, &Velocity)>(|_entity, (pos, vel)| {
    ///     pos.x += vel.dx;
    /// });
    /// assert_eq!(world.get::<Position>(e).unwrap().x, 2.0);
    /// ```
    pub fn each<Q: QueryParam>(&mut self, mut visit: impl FnMut(Entity, Q::Item<'_>)) {
        Q::ensure(&mut self.registry);
        let mut column = match Q::take(&mut self.registry) {
            Some(column) => column,
            None => return,
        };
        for id in Q::owners(&column) {
            if Q::contains(&column, id) {
                let entity = Entity::new(id.raw(), self.generations[id.index()]);
                visit(entity, Q::fetch(&mut column, id));
            }
        }
        Q::restore(column, &mut self.registry);
    }

    /// Read-only variant of [`World::each`]
    ///
    /// Takes `&T` parameters only and never registers any store: an
    /// untouched primary simply yields no visits.
    pub fn each_ref<Q: ReadParam>(&self, mut visit: impl FnMut(Entity, Q::Item<'_>)) {
        let owners = match Q::owners(&self.registry) {
            Some(owners) => owners,
            None => return,
        };
        for id in owners {
            if Q::contains(&self.registry, id) {
                let entity = Entity::new(id.raw(), self.generations[id.index()]);
                visit(entity, Q::fetch(&self.registry, id));
            }
        }
    }

    // --- transient ("one-frame") component tracking ---

    /// Mark `T` as transient: its store is emptied wholesale by every
    /// [`World::clear_transients`] call. Idempotent, and independent of
    /// whether any entity currently holds a `T`.
    pub fn mark_transient<T: Component>(&mut self) {
        self.transient.insert(TypeId::of::<T>());
    }

    /// Clear every transient type's store
    ///
    /// Intended to run once per tick, after this tick's transient data
    /// has been consumed. Marked types that never got a store are
    /// silently skipped.
    pub fn clear_transients(&mut self) {
        let mut cleared = 0usize;
        for type_id in &self.transient {
            if self.registry.clear_type(*type_id) {
                cleared += 1;
            }
        }
        if cleared > 0 {
            log::trace!("cleared {cleared} transient component stores");
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }
    impl Component for Position {}

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Velocity {
        dx: f32,
        dy: f32,
    }
    impl Component for Velocity {}

    struct Hit {
        damage: u32,
    }
    impl Component for Hit {}

    #[test]
    fn test_world_entity_lifecycle() {
        let mut world = World::new();

        let e1 = world.create_entity();
        let e2 = world.create_entity();

        assert_eq!(world.entity_count(), 2);
        assert!(world.is_alive(e1));
        assert!(world.is_alive(e2));

        world.destroy_entity(e1);
        assert_eq!(world.entity_count(), 1);
        assert!(!world.is_alive(e1));
        assert!(world.is_alive(e2));
    }

    #[test]
    fn test_slot_reuse_bumps_generation() {
        let mut world = World::new();

        let e1 = world.create_entity();
        world.destroy_entity(e1);
        let e2 = world.create_entity();

        assert_eq!(e2.id(), e1.id());
        assert_eq!(e2.generation(), e1.generation() + 1);
        assert!(!world.is_alive(e1));
        assert!(world.is_alive(e2));
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut world = World::new();

        let e1 = world.create_entity();
        world.destroy_entity(e1);
        world.destroy_entity(e1); // stale: absorbed
        world.destroy_entity(Entity::new(400, 0)); // out of range: absorbed

        assert_eq!(world.entity_count(), 0);
        let e2 = world.create_entity();
        assert_eq!(e2.id(), e1.id());
        assert_eq!(world.entity_count(), 1);
    }

    #[test]
    fn test_add_get_remove() {
        let mut world = World::new();
        let e = world.create_entity();

        world.add(e, Position { x: 1.0, y: 2.0 });
        assert!(world.has::<Position>(e));
        assert_eq!(world.get::<Position>(e), Some(&Position { x: 1.0, y: 2.0 }));

        world.get_mut::<Position>(e).unwrap().x = 5.0;
        assert_eq!(world.get::<Position>(e).unwrap().x, 5.0);

        world.remove::<Position>(e);
        assert!(!world.has::<Position>(e));
        assert_eq!(world.count::<Position>(), 0);
    }

    #[test]
    fn test_add_replaces_existing_value() {
        let mut world = World::new();
        let e = world.create_entity();

        world.add(e, Position { x: 1.0, y: 1.0 });
        world.add(e, Position { x: 9.0, y: 9.0 });

        assert_eq!(world.count::<Position>(), 1);
        assert_eq!(world.get::<Position>(e).unwrap().x, 9.0);
    }

    #[test]
    fn test_read_paths_never_register_a_store() {
        let mut world = World::new();
        let e = world.create_entity();

        assert!(!world.has::<Position>(e));
        assert!(world.get::<Position>(e).is_none());
        assert!(world.get_mut::<Position>(e).is_none());
        world.remove::<Position>(e);
        assert_eq!(world.count::<Position>(), 0);
        world.each_ref::<&Position>(|_, _| panic!("no store, no visits"));
    }

    #[test]
    fn test_destroy_sweeps_all_stores() {
        let mut world = World::new();
        let e = world.create_entity();
        world.add(e, Position { x: 1.0, y: 1.0 });
        world.add(e, Velocity { dx: 0.0, dy: 0.0 });

        world.destroy_entity(e);

        assert_eq!(world.count::<Position>(), 0);
        assert_eq!(world.count::<Velocity>(), 0);

        // The reused slot starts with no leftovers
        let e2 = world.create_entity();
        assert_eq!(e2.id(), e.id());
        assert!(!world.has::<Position>(e2));
        assert!(!world.has::<Velocity>(e2));
    }

    #[test]
    fn test_each_mutates_through_primary() {
        let mut world = World::new();
        for i in 0..3 {
            let e = world.create_entity();
            world.add(e, Position { x: i as f32, y: 0.0 });
        }

        world.each::<&mut Position>(|_, pos| pos.x += 10.0);

        let mut xs: Vec<f32> = Vec::new();
        world.each_ref::<&Position>(|_, pos| xs.push(pos.x));
        xs.sort_by(f32::total_cmp);
        assert_eq!(xs, vec![10.0, 11.0, 12.0]);
    }

    #[test]
    fn test_each_registers_missing_primary_store() {
        let mut world = World::new();

        world.each::<&mut Position>(|_, _| panic!("empty primary"));

        // The mutable path materialized an empty store: no visits, no values
        assert_eq!(world.count::<Position>(), 0);
    }

    #[test]
    fn test_transient_type_cleared_once_per_tick() {
        let mut world = World::new();
        world.mark_transient::<Hit>();
        world.mark_transient::<Hit>(); // idempotent

        let e = world.create_entity();
        world.add(e, Hit { damage: 3 });
        world.add(e, Position { x: 0.0, y: 0.0 });
        assert_eq!(world.get::<Hit>(e).unwrap().damage, 3);

        world.clear_transients();

        assert!(!world.has::<Hit>(e));
        assert!(world.has::<Position>(e));
    }

    #[test]
    fn test_clear_transients_skips_unregistered_types() {
        let mut world = World::new();
        world.mark_transient::<Hit>();
        world.clear_transients();
        assert_eq!(world.count::<Hit>(), 0);
    }

    #[test]
    fn test_world_clear() {
        let mut world = World::new();
        let e1 = world.create_entity();
        let e2 = world.create_entity();
        world.add(e1, Position { x: 1.0, y: 1.0 });
        world.destroy_entity(e2);

        world.clear();

        assert_eq!(world.entity_count(), 0);
        assert!(!world.is_alive(e1));
        assert_eq!(world.count::<Position>(), 0);

        // Slots stay reusable and handles stay distinct
        let e3 = world.create_entity();
        assert!(world.is_alive(e3));
        assert_ne!(e3, e1);
        assert_ne!(e3, e2);
    }
}
