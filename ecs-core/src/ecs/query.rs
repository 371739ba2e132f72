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
//! Filtered iteration over entities by component type
//!
//! A scan names one or more component types; the FIRST type is the
//! *primary* and its dense array drives the walk. Every other type is
//! an O(1) presence filter per visited slot. Order is the primary
//! store's current physical packing: not insertion order, not slot
//! order, and liable to change after any `remove` on that store.
//!
//! Because the primary choice is the literal first type parameter
//! (there is no smallest-store heuristic), callers should put the
//! rarest component first when scanning large worlds.
//!
//! The mutable path takes each named store out of the registry for the
//! duration of the scan and puts it back afterwards. That owned access
//! is what lets a single scan hand out `&mut` references from several
//! stores at once without aliasing, and it means the visitor cannot
//! structurally mutate the world mid-scan; deferred mutation is the
//! only option, enforced by the borrow checker.

use crate::ecs::component::{Component, SparseSet};
use crate::ecs::entity::EntityId;
use crate::ecs::registry::Registry;

/// One parameter of a mutable scan: `&T`, `&mut T`, or a tuple of those
///
/// Tuple impls (up to four parameters) treat their first element as the
/// primary. Used by `World::each`.
pub trait QueryParam {
    /// Store(s) taken out of the registry for the duration of the scan
    type Column;

    /// Reference(s) yielded per visited entity
    type Item<'w>;

    /// Whether every named store currently exists
    fn available(registry: &Registry) -> bool;

    /// Register the primary store if missing
    fn ensure(registry: &mut Registry);

    /// Take the named store(s) out of the registry
    fn take(registry: &mut Registry) -> Option<Self::Column>;

    /// Put back what [`QueryParam::take`] removed
    fn restore(column: Self::Column, registry: &mut Registry);

    /// Snapshot of the primary store's owner slots, in packing order
    fn owners(column: &Self::Column) -> Vec<EntityId>;

    /// Whether every taken store holds a value for the slot
    fn contains(column: &Self::Column, id: EntityId) -> bool;

    /// Yield the reference(s) for a slot that passed [`QueryParam::contains`]
    fn fetch(column: &mut Self::Column, id: EntityId) -> Self::Item<'_>;
}

/// Shared read access to a component during a mutable scan
impl<T: Component> QueryParam for &T {
    type Column = SparseSet<T>;
    type Item<'w> = &'w T;

    fn available(registry: &Registry) -> bool {
        registry.store::<T>().is_some()
    }

    fn ensure(registry: &mut Registry) {
        registry.ensure::<T>();
    }

    fn take(registry: &mut Registry) -> Option<Self::Column> {
        registry.take::<T>()
    }

    fn restore(column: Self::Column, registry: &mut Registry) {
        registry.restore(column);
    }

    fn owners(column: &Self::Column) -> Vec<EntityId> {
        column.owners().to_vec()
    }

    fn contains(column: &Self::Column, id: EntityId) -> bool {
        column.contains(id)
    }

    fn fetch(column: &mut Self::Column, id: EntityId) -> Self::Item<'_> {
        column.get(id).unwrap_or_else(|| {
            panic!(
                "scan fetched `{}` for a slot that failed its presence check",
                std::any::type_name::<T>()
            )
        })
    }
}

/// Exclusive write access to a component during a mutable scan
impl<T: Component> QueryParam for &mut T {
    type Column = SparseSet<T>;
    type Item<'w> = &'w mut T;

    fn available(registry: &Registry) -> bool {
        registry.store::<T>().is_some()
    }

    fn ensure(registry: &mut Registry) {
        registry.ensure::<T>();
    }

    fn take(registry: &mut Registry) -> Option<Self::Column> {
        registry.take::<T>()
    }

    fn restore(column: Self::Column, registry: &mut Registry) {
        registry.restore(column);
    }

    fn owners(column: &Self::Column) -> Vec<EntityId> {
        column.owners().to_vec()
    }

    fn contains(column: &Self::Column, id: EntityId) -> bool {
        column.contains(id)
    }

    fn fetch(column: &mut Self::Column, id: EntityId) -> Self::Item<'_> {
        column.get_mut(id).unwrap_or_else(|| {
            panic!(
                "scan fetched `{}` for a slot that failed its presence check",
                std::any::type_name::<T>()
            )
        })
    }
}

macro_rules! impl_query_param_tuple {
    ($first:ident $(, $rest:ident)*) => {
        impl<$first: QueryParam $(, $rest: QueryParam)*> QueryParam for ($first, $($rest,)*) {
            type Column = ($first::Column, $($rest::Column,)*);
            type Item<'w> = ($first::Item<'w>, $($rest::Item<'w>,)*);

            fn available(registry: &Registry) -> bool {
                $first::available(registry) $(&& $rest::available(registry))*
            }

            fn ensure(registry: &mut Registry) {
                // Only the primary is materialized on demand; a missing
                // filter store just means zero matches.
                $first::ensure(registry);
            }

            #[allow(non_snake_case)]
            fn take(registry: &mut Registry) -> Option<Self::Column> {
                if !Self::available(registry) {
                    return None;
                }
                let $first = match $first::take(registry) {
                    Some(column) => column,
                    None => panic!("scan parameters must name distinct component types"),
                };
                $(
                    let $rest = match $rest::take(registry) {
                        Some(column) => column,
                        None => panic!("scan parameters must name distinct component types"),
                    };
                )*
                Some(($first, $($rest,)*))
            }

            #[allow(non_snake_case)]
            fn restore(column: Self::Column, registry: &mut Registry) {
                let ($first, $($rest,)*) = column;
                $first::restore($first, registry);
                $($rest::restore($rest, registry);)*
            }

            #[allow(non_snake_case)]
            fn owners(column: &Self::Column) -> Vec<EntityId> {
                let ($first, ..) = column;
                $first::owners($first)
            }

            #[allow(non_snake_case)]
            fn contains(column: &Self::Column, id: EntityId) -> bool {
                let ($first, $($rest,)*) = column;
                $first::contains($first, id) $(&& $rest::contains($rest, id))*
            }

            #[allow(non_snake_case)]
            fn fetch(column: &mut Self::Column, id: EntityId) -> Self::Item<'_> {
                let ($first, $($rest,)*) = column;
                ($first::fetch($first, id), $($rest::fetch($rest, id),)*)
            }
        }
    };
}

impl_query_param_tuple!(A);
impl_query_param_tuple!(A, B);
impl_query_param_tuple!(A, B, C);
impl_query_param_tuple!(A, B, C, D);

/// One parameter of a read-only scan: `&T` or a tuple of `&T`
///
/// The read path never creates a store: an untouched primary is treated
/// as empty, and all access goes through shared borrows of the
/// registry. Used by `World::each_ref`.
pub trait ReadParam {
    /// Reference(s) yielded per visited entity
    type Item<'w>;

    /// Snapshot of the primary store's owner slots, or `None` when the
    /// primary was never registered
    fn owners(registry: &Registry) -> Option<Vec<EntityId>>;

    /// Whether every named store holds a value for the slot
    fn contains(registry: &Registry, id: EntityId) -> bool;

    /// Yield the reference(s) for a slot that passed [`ReadParam::contains`]
    fn fetch(registry: &Registry, id: EntityId) -> Self::Item<'_>;
}

/// Shared read access to a component during a read-only scan
impl<T: Component> ReadParam for &T {
    type Item<'w> = &'w T;

    fn owners(registry: &Registry) -> Option<Vec<EntityId>> {
        registry.store::<T>().map(|store| store.owners().to_vec())
    }

    fn contains(registry: &Registry, id: EntityId) -> bool {
        registry.store::<T>().map_or(false, |store| store.contains(id))
    }

    fn fetch(registry: &Registry, id: EntityId) -> Self::Item<'_> {
        registry
            .store::<T>()
            .and_then(|store| store.get(id))
            .unwrap_or_else(|| {
                panic!(
                    "scan fetched `{}` for a slot that failed its presence check",
                    std::any::type_name::<T>()
                )
            })
    }
}

macro_rules! impl_read_param_tuple {
    ($first:ident $(, $rest:ident)*) => {
        impl<$first: ReadParam $(, $rest: ReadParam)*> ReadParam for ($first, $($rest,)*) {
            type Item<'w> = ($first::Item<'w>, $($rest::Item<'w>,)*);

            fn owners(registry: &Registry) -> Option<Vec<EntityId>> {
                $first::owners(registry)
            }

            fn contains(registry: &Registry, id: EntityId) -> bool {
                $first::contains(registry, id) $(&& $rest::contains(registry, id))*
            }

            fn fetch(registry: &Registry, id: EntityId) -> Self::Item<'_> {
                ($first::fetch(registry, id), $($rest::fetch(registry, id),)*)
            }
        }
    };
}

impl_read_param_tuple!(A);
impl_read_param_tuple!(A, B);
impl_read_param_tuple!(A, B, C);
impl_read_param_tuple!(A, B, C, D);
