//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime and `Time`.
//! - `TimeUpdateStrategy::ManualDuration` makes every `app.update()` advance
//!   wall time by a fixed step, so tick deltas are exact.
//! - we then call `nightmare_arena::game::configure_headless` to install gameplay plugins.

#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use nightmare_arena::common::tunables::Tunables;
use nightmare_arena::plugins::store::EntityStore;

/// One tick per update, exactly at the dt cap.
pub const STEP: Duration = Duration::from_millis(100);

pub fn app_headless() -> App {
    app_with(Tunables::default(), STEP)
}

/// Headless app with the given tunables and wall-time step. The first update
/// runs `Startup` (the run begins) and a zero-length tick.
pub fn app_with(tunables: Tunables, step: Duration) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(step))
        .insert_resource(tunables);

    nightmare_arena::game::configure_headless(&mut app);
    app.update();
    app
}

/// Tunables with no random waves and a fixed seed, for hand-built scenes.
pub fn quiet(seed: u64) -> Tunables {
    let mut t = Tunables { seed: Some(seed), ..default() };
    t.spawn.base_interval = 1.0e9;
    t.spawn.min_interval = 1.0e9;
    t
}

pub fn tick(app: &mut App, n: usize) {
    for _ in 0..n {
        app.update();
    }
}

pub fn store(app: &App) -> &EntityStore {
    app.world().resource::<EntityStore>()
}

pub fn store_mut(app: &mut App) -> Mut<'_, EntityStore> {
    app.world_mut().resource_mut::<EntityStore>()
}
