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
//! Basic example demonstrating the storage core
//!
//! This example shows how to create a world, spawn entities, attach
//! components, and run filtered scans over them.

use ecs_core::ecs::{Component, World};

#[derive(Debug)]
struct Position {
    x: f32,
    y: f32,
}
impl Component for Position {}

#[derive(Debug)]
struct Velocity {
    dx: f32,
    dy: f32,
}
impl Component for Velocity {}

fn main() {
    println!("ECS Core - Basic Example");
    println!("========================\n");

    // Create a new world
    let mut world = World::new();
    println!("Created new world");

    // Create some entities
    let entity1 = world.create_entity();
    let entity2 = world.create_entity();
    let entity3 = world.create_entity();

    println!("Created {} entities:", world.entity_count());
    println!("  - {}", entity1);
    println!("  - {}", entity2);
    println!("  - {}", entity3);

    // Attach components; only entity2 gets a velocity
    world.add(entity1, Position { x: 0.0, y: 0.0 });
    world.add(entity2, Position { x: 5.0, y: 5.0 });
    world.add(entity2, Velocity { dx: 1.0, dy: -1.0 });
    world.add(entity3, Position { x: -3.0, y: 2.0 });

    println!(
        "\nAttached {} positions and {} velocities",
        world.count::<Position>(),
        world.count::<Velocity>()
    );

    // A filtered scan visits only the entities holding BOTH types
    println!("\nApplying one movement step:");
    world.each::<(&mut Position, &Velocity)>(|entity, (pos, vel)| {
        pos.x += vel.dx;
        pos.y += vel.dy;
        println!("  {} moved to ({}, {})", entity, pos.x, pos.y);
    });

    // Destroying an entity drops all of its components
    world.destroy_entity(entity2);
    println!("\nDestroyed {}", entity2);
    println!("  alive? {}", world.is_alive(entity2));
    println!("  positions remaining: {}", world.count::<Position>());

    // Its slot is reused with a bumped generation, so the old handle
    // stays dead
    let entity4 = world.create_entity();
    println!("\nCreated {} (reuses the freed slot)", entity4);
    println!("  old handle alive? {}", world.is_alive(entity2));
    println!("  new handle alive? {}", world.is_alive(entity4));

    println!("\nDone.");
}
