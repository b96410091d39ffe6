//! Touch input provider (render-only host side).
//!
//! The screen is split down the middle:
//! - left half: a virtual stick anchored where the finger first lands
//! - right half: a tap requests a target switch
//!
//! `Touches` is fed by the input plugin from `DefaultPlugins`, so this is
//! registered with the render plugins like the keyboard provider.

use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::plugins::core::ArenaSystems;

use super::{InputFrame, Joystick};

/// Drag distance, in logical pixels, that reads as a fully deflected stick.
pub const STICK_RADIUS: f32 = 50.0;

/// The finger currently driving the virtual stick, if any.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct TouchStick {
    finger: Option<u64>,
    origin: Vec2,
}

impl TouchStick {
    #[inline]
    pub fn finger(&self) -> Option<u64> {
        self.finger
    }

    /// Handle a new touch. Returns `true` when it is a switch-target tap.
    ///
    /// A second finger on the left half is ignored while the stick is held.
    pub fn press(&mut self, finger: u64, pos: Vec2, screen_width: f32) -> bool {
        if pos.x >= screen_width * 0.5 {
            return true;
        }
        if self.finger.is_none() {
            self.finger = Some(finger);
            self.origin = pos;
        }
        false
    }

    pub fn release(&mut self, finger: u64) {
        if self.finger == Some(finger) {
            self.finger = None;
        }
    }

    /// Stick reading for the held finger's current position.
    pub fn reading(&self, current: Option<Vec2>) -> Joystick {
        match (self.finger, current) {
            (Some(_), Some(pos)) => {
                let d = (pos - self.origin).clamp_length_max(STICK_RADIUS) / STICK_RADIUS;
                Joystick { active: true, dx: d.x, dy: d.y }
            }
            _ => Joystick::default(),
        }
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<TouchStick>()
        .add_systems(Update, gather_touches.before(ArenaSystems::Clock));
}

fn gather_touches(
    touches: Res<Touches>,
    window: Single<&Window, With<PrimaryWindow>>,
    mut stick: ResMut<TouchStick>,
    mut frame: ResMut<InputFrame>,
) {
    let width = window.width();
    for touch in touches.iter_just_pressed() {
        if stick.press(touch.id(), touch.position(), width) {
            frame.switch_target_requested = true;
        }
    }
    for touch in touches.iter_just_released().chain(touches.iter_just_canceled()) {
        stick.release(touch.id());
    }

    let current = stick.finger().and_then(|id| touches.get_pressed(id)).map(|t| t.position());
    frame.joystick = stick.reading(current);
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 1280.0;

    #[test]
    fn right_half_is_a_tap_and_leaves_the_stick_alone() {
        let mut stick = TouchStick::default();
        assert!(stick.press(1, Vec2::new(900.0, 300.0), WIDTH));
        assert_eq!(stick.finger(), None);
        assert_eq!(stick.reading(None), Joystick::default());
    }

    #[test]
    fn drag_is_clamped_to_the_stick_radius() {
        let mut stick = TouchStick::default();
        assert!(!stick.press(1, Vec2::new(200.0, 400.0), WIDTH));

        let half = stick.reading(Some(Vec2::new(225.0, 400.0)));
        assert_eq!(half, Joystick { active: true, dx: 0.5, dy: 0.0 });

        let far = stick.reading(Some(Vec2::new(200.0, 100.0)));
        assert!(far.active);
        assert!(far.dx.abs() < 1e-6);
        assert!((far.dy + 1.0).abs() < 1e-6, "{far:?}");
    }

    #[test]
    fn second_finger_does_not_steal_the_stick() {
        let mut stick = TouchStick::default();
        stick.press(1, Vec2::new(100.0, 100.0), WIDTH);
        stick.press(2, Vec2::new(300.0, 300.0), WIDTH);
        assert_eq!(stick.finger(), Some(1));

        stick.release(2);
        assert_eq!(stick.finger(), Some(1));
        stick.release(1);
        assert_eq!(stick.finger(), None);
        assert_eq!(stick.reading(Some(Vec2::new(150.0, 100.0))), Joystick::default());
    }

    #[test]
    fn new_press_after_release_re_anchors() {
        let mut stick = TouchStick::default();
        stick.press(1, Vec2::new(100.0, 100.0), WIDTH);
        stick.release(1);
        stick.press(3, Vec2::new(400.0, 500.0), WIDTH);

        assert_eq!(stick.finger(), Some(3));
        assert_eq!(stick.reading(Some(Vec2::new(400.0, 500.0))), Joystick { active: true, dx: 0.0, dy: 0.0 });
    }
}
