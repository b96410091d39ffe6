//! Test helpers.
//!
//! Bevy provides `World::run_system_once` (via the `RunSystemOnce` trait) for quickly
//! executing a system in tests without building a full schedule.
//!
//! Systems that use `Commands` enqueue structural changes; we call `world.flush()`
//! after running so queued commands are applied before assertions.

use bevy::ecs::message::Messages;
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::core::start_run;
use crate::plugins::snapshot::{HudSnapshot, RunEnded};

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// A world holding every run resource, with a freshly started run.
///
/// Pass tunables with a fixed `seed` when the test depends on rolls.
pub fn arena_world(tunables: Tunables) -> World {
    let mut world = World::new();
    world.insert_resource(tunables);
    world.init_resource::<Messages<HudSnapshot>>();
    world.init_resource::<Messages<RunEnded>>();
    start_run(&mut world);
    world
}

/// Tunables with a fixed seed, otherwise default.
pub fn seeded(seed: u64) -> Tunables {
    Tunables { seed: Some(seed), ..default() }
}
