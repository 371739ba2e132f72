//! Entity Component System (ECS) storage core
//!
//! This module provides the foundational storage architecture:
//! - Generational entity handles with safe slot reuse
//! - Sparse-set component stores with cache-friendly packed values
//! - A lazily populated per-type store registry
//! - Filtered scans driven by a primary component type
//! - One-frame ("transient") component types cleared at tick boundaries

mod component;
mod entity;
mod query;
mod registry;
mod world;

pub use component::{Component, ErasedStore, SparseSet};
pub use entity::{Entity, EntityId};
pub use query::{QueryParam, ReadParam};
pub use registry::Registry;
pub use world::World;
