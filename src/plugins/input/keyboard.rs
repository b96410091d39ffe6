//! Keyboard input provider (render-only host side).
//!
//! Needs `ButtonInput<KeyCode>`, which only exists with the input plugin from
//! `DefaultPlugins`, so it is registered with the render plugins.

use bevy::prelude::*;

use crate::common::state::RunState;
use crate::plugins::core::{ArenaSystems, start_run};

use super::{Direction, InputFrame};

const BINDINGS: [(KeyCode, Direction); 8] = [
    (KeyCode::KeyW, Direction::Up),
    (KeyCode::ArrowUp, Direction::Up),
    (KeyCode::KeyS, Direction::Down),
    (KeyCode::ArrowDown, Direction::Down),
    (KeyCode::KeyA, Direction::Left),
    (KeyCode::ArrowLeft, Direction::Left),
    (KeyCode::KeyD, Direction::Right),
    (KeyCode::ArrowRight, Direction::Right),
];

pub fn plugin(app: &mut App) {
    app.add_systems(Update, gather_keyboard.before(ArenaSystems::Clock));
}

fn gather_keyboard(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    run: Res<RunState>,
    mut frame: ResMut<InputFrame>,
) {
    frame.held = BINDINGS
        .iter()
        .filter(|(key, _)| keys.pressed(*key))
        .map(|(_, dir)| *dir)
        .collect();

    if keys.just_pressed(KeyCode::Space) {
        frame.switch_target_requested = true;
    }

    if run.phase.is_terminal() && keys.just_pressed(KeyCode::KeyR) {
        commands.queue(|world: &mut World| start_run(world));
    }
}
