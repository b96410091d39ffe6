//! Feature plugins.

use bevy::prelude::*;

pub mod clock;
pub mod combat;
pub mod core;
pub mod input;
pub mod movement;
pub mod progression;
pub mod snapshot;
pub mod spawner;
pub mod store;

// Render-only
pub mod camera;
pub mod draw;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    input::plugin(app);
    movement::plugin(app);
    spawner::plugin(app);
    combat::plugin(app);
    progression::plugin(app);
    snapshot::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
    draw::plugin(app);
    input::keyboard::plugin(app);
    input::touch::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
