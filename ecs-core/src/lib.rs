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
//! # ECS Core
//!
//! A sparse-set entity-component storage core: external simulation or
//! rendering code attaches arbitrary typed data ("components") to
//! lightweight entity handles, queries entities by the components they
//! carry, and reuses handle slots safely after destruction.
//!
//! ## Features
//!
//! - **Generational handles**: slot reuse can never resurrect a stale
//!   reference; dead handles fail every liveness check
//! - **Sparse-set stores**: O(1) amortized insert/lookup/remove with
//!   densely packed values for cache-friendly iteration
//! - **Lazy type registry**: a component type's store materializes on
//!   first use; "unknown type" is just an empty store
//! - **Filtered scans**: walk one primary store and filter against any
//!   others in O(1) per candidate
//! - **One-frame components**: mark a type transient and clear all of
//!   its values in one call at each tick boundary
//!
//! ## Example
//!
//! ```rust
//! use ecs_core::ecs::{Component, World};
//!
//! struct Position { x: f64, y: f64 }
//! impl Component for Position {}
//!
//! struct Velocity { dx: f64, dy: f64 }
//! impl Component for Velocity {}
//!
//! let mut world = World::new();
//! let entity = world.create_entity();
//! world.add(entity, Position { x: 0.0, y: 0.0 });
//! world.add(entity, Velocity { dx: 1.0, dy: 0.5 });
//!
//! world.each::<(&mut Position, &Velocity)>(|_entity, (pos, vel)| {
//!     pos.x += vel.dx;
//!     pos.y += vel.dy;
//! });
//!
//! assert_eq!(world.get::<Position>(entity).unwrap().x, 1.0);
//! ```

#![warn(missing_docs)]

/// Entity Component System implementation
pub mod ecs;

pub use ecs::{Entity, World};
