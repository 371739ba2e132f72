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
//! One-frame component example
//!
//! Models the tick loop an owning simulation would run: systems produce
//! per-tick event components (here `Contact`), later systems consume
//! them, and the loop clears every transient store at the tick
//! boundary so no event leaks into the next tick.

use ecs_core::ecs::{Component, World};

#[derive(Debug)]
struct Position {
    x: f32,
}
impl Component for Position {}

#[derive(Debug)]
struct Velocity {
    dx: f32,
}
impl Component for Velocity {}

/// Per-tick event: this entity touched the right wall
#[derive(Debug)]
struct Contact {
    wall_x: f32,
}
impl Component for Contact {}

const WALL_X: f32 = 10.0;

fn main() {
    env_logger::init();

    println!("ECS Core - Tick Loop Example");
    println!("============================\n");

    let mut world = World::new();

    // Setup time: contact events never outlive the tick that made them
    world.mark_transient::<Contact>();

    for i in 0..4 {
        let entity = world.create_entity();
        world.add(entity, Position { x: i as f32 * 3.0 });
        world.add(entity, Velocity { dx: 2.0 });
    }

    for tick in 0..3 {
        println!("tick {tick}:");

        // Movement system
        world.each::<(&mut Position, &Velocity)>(|_, (pos, vel)| {
            pos.x += vel.dx;
        });

        // Collision system: emit one-frame Contact events
        let mut contacts = Vec::new();
        world.each_ref::<&Position>(|entity, pos| {
            if pos.x >= WALL_X {
                contacts.push(entity);
            }
        });
        for entity in contacts {
            world.add(entity, Contact { wall_x: WALL_X });
        }

        // Response system: consume this tick's events
        world.each::<(&Contact, &mut Position, &mut Velocity)>(|entity, (contact, pos, vel)| {
            println!("  {} bounced off wall at x={}", entity, contact.wall_x);
            pos.x = contact.wall_x;
            vel.dx = -vel.dx;
        });

        println!("  contacts this tick: {}", world.count::<Contact>());

        // Tick boundary: all transient stores are emptied wholesale
        world.clear_transients();
        assert_eq!(world.count::<Contact>(), 0);
    }

    println!("\nDone.");
}
