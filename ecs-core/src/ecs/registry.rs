//! Type registry
//!
//! Maps a component type's static identity to its owned, type-erased
//! store. Stores are created lazily on first mutable use of a type;
//! the read-only accessors never create, so pure queries have no side
//! effect of registering an unused type.

use crate::ecs::component::{Component, ErasedStore, SparseSet};
use crate::ecs::entity::EntityId;
use std::any::TypeId;
use std::collections::HashMap;

/// Owner of every component store, keyed by component type identity
///
/// "No such component type" is not a failure state here: the mutable
/// access path materializes an empty store on first use, and the
/// read-only path simply reports absence.
#[derive(Default)]
pub struct Registry {
    stores: HashMap<TypeId, Box<dyn ErasedStore>>,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Registry {
            stores: HashMap::new(),
        }
    }

    /// Get `T`'s store, or `None` if the type was never registered
    pub fn store<T: Component>(&self) -> Option<&SparseSet<T>> {
        self.stores
            .get(&TypeId::of::<T>())
            .map(|store| downcast_ref(store.as_ref()))
    }

    /// Get `T`'s store mutably, or `None` if the type was never registered
    pub fn store_mut<T: Component>(&mut self) -> Option<&mut SparseSet<T>> {
        self.stores
            .get_mut(&TypeId::of::<T>())
            .map(|store| downcast_mut(store.as_mut()))
    }

    /// Get `T`'s store, creating an empty one on first use
    pub fn store_or_default<T: Component>(&mut self) -> &mut SparseSet<T> {
        let store = self
            .stores
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(SparseSet::<T>::new()));
        downcast_mut(store.as_mut())
    }

    /// Register an empty store for `T` if none exists yet
    pub fn ensure<T: Component>(&mut self) {
        self.store_or_default::<T>();
    }

    /// Take `T`'s store out of the registry
    ///
    /// Pairs with [`Registry::restore`]; used by scans that need owned
    /// access to a store while the rest of the registry stays borrowed.
    pub fn take<T: Component>(&mut self) -> Option<SparseSet<T>> {
        let boxed = self.stores.remove(&TypeId::of::<T>())?;
        match boxed.into_any().downcast::<SparseSet<T>>() {
            Ok(store) => Some(*store),
            Err(_) => panic!(
                "store registered under `{}` has the wrong concrete type",
                std::any::type_name::<T>()
            ),
        }
    }

    /// Put back a store taken with [`Registry::take`]
    pub fn restore<T: Component>(&mut self, store: SparseSet<T>) {
        self.stores.insert(TypeId::of::<T>(), Box::new(store));
    }

    /// Erase one slot from every registered store
    ///
    /// The destroy-entity sweep: runs over the type-erased interface so
    /// it reaches types this call site never named.
    pub fn erase_all(&mut self, id: EntityId) {
        for store in self.stores.values_mut() {
            store.erase(id);
        }
    }

    /// Clear every registered store
    pub fn clear_all(&mut self) {
        for store in self.stores.values_mut() {
            store.clear();
        }
    }

    /// Clear the store registered under `type_id`, if any
    ///
    /// Returns whether a store existed to clear.
    pub fn clear_type(&mut self, type_id: TypeId) -> bool {
        match self.stores.get_mut(&type_id) {
            Some(store) => {
                store.clear();
                true
            }
            None => false,
        }
    }
}

fn downcast_ref<T: Component>(store: &dyn ErasedStore) -> &SparseSet<T> {
    store
        .as_any()
        .downcast_ref::<SparseSet<T>>()
        .unwrap_or_else(|| {
            panic!(
                "store registered under `{}` has the wrong concrete type",
                std::any::type_name::<T>()
            )
        })
}

fn downcast_mut<T: Component>(store: &mut dyn ErasedStore) -> &mut SparseSet<T> {
    store
        .as_any_mut()
        .downcast_mut::<SparseSet<T>>()
        .unwrap_or_else(|| {
            panic!(
                "store registered under `{}` has the wrong concrete type",
                std::any::type_name::<T>()
            )
        })
}
