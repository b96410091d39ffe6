//! Game composition root.
//!
//! Provides two public configuration functions:
//! - `configure_full`: includes DefaultPlugins (window/render) + game plugins.
//! - `configure_headless`: minimal configuration for integration tests.

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::tunables::Tunables;
use crate::plugins;
use crate::plugins::core::start_run;

// Only compile these imports on Windows.
#[cfg(target_os = "windows")]
use bevy::render::{
    RenderPlugin,
    settings::{Backends, PowerPreference, WgpuSettings},
};

pub fn run(tunables: Tunables) -> AppExit {
    let mut app = App::new();
    app.insert_resource(tunables);
    configure_full(&mut app);
    app.run()
}

/// Full configuration: window sized to the arena, gameplay, and drawing.
///
/// A `Tunables` resource inserted before this call is kept.
pub fn configure_full(app: &mut App) {
    let arena = app.world().get_resource::<Tunables>().map(|t| t.arena.clone()).unwrap_or_default();

    let default_plugins = DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Nightmare Arena".into(),
            resolution: WindowResolution::new(arena.width as u32, arena.height as u32),
            resizable: false,
            ..default()
        }),
        ..default()
    });

    // Windows: force DX12 and prefer the discrete GPU.
    #[cfg(target_os = "windows")]
    let default_plugins = default_plugins.set(RenderPlugin {
        render_creation: WgpuSettings {
            backends: Some(Backends::DX12),
            power_preference: PowerPreference::HighPerformance,
            ..default()
        }
        .into(),
        ..default()
    });

    app.add_plugins(default_plugins);

    configure_game(app);
    plugins::register_render(app);
}

/// Headless configuration for integration tests.
///
/// Notes:
/// - Do NOT add DefaultPlugins.
/// - Do NOT add render-only plugins (camera/draw/keyboard).
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

/// Configuration shared by both full and headless apps: gameplay plugins plus
/// a run started at `Startup`.
fn configure_game(app: &mut App) {
    plugins::register_gameplay(app);
    app.add_systems(Startup, start_run);
}
