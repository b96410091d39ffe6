//! Input aggregation.
//!
//! Pipeline:
//! - host writes `InputFrame` (held keys, joystick, switch request) before the tick
//! - `apply_input` folds it into one `MoveIntent` and services target switching
//!
//! Movement never sees where its intent came from.

use bevy::prelude::*;

use crate::common::state::run_in_progress;
use crate::common::tunables::Tunables;
use crate::plugins::core::ArenaSystems;
use crate::plugins::store::{EntityId, EntityStore};

pub mod keyboard;
pub mod touch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector in arena space (`+y` is down).
    #[inline]
    pub fn unit(self) -> Vec2 {
        match self {
            Self::Up => Vec2::NEG_Y,
            Self::Down => Vec2::Y,
            Self::Left => Vec2::NEG_X,
            Self::Right => Vec2::X,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldDirections {
    pub fn set(&mut self, dir: Direction, held: bool) {
        match dir {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    /// Sum of the held unit vectors. Opposite keys cancel.
    pub fn axis(&self) -> Vec2 {
        [
            (self.up, Direction::Up),
            (self.down, Direction::Down),
            (self.left, Direction::Left),
            (self.right, Direction::Right),
        ]
        .into_iter()
        .filter(|(held, _)| *held)
        .map(|(_, dir)| dir.unit())
        .sum()
    }
}

impl FromIterator<Direction> for HeldDirections {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut held = Self::default();
        for dir in iter {
            held.set(dir, true);
        }
        held
    }
}

/// Analog stick reading, components nominally in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Joystick {
    pub active: bool,
    pub dx: f32,
    pub dy: f32,
}

impl Joystick {
    /// Clamped stick vector, zero when inactive or non-finite.
    pub fn vector(&self) -> Vec2 {
        if !self.active {
            return Vec2::ZERO;
        }
        let axis = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        Vec2::new(axis(self.dx), axis(self.dy))
    }
}

/// Host-provided input for the next tick.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    pub held: HeldDirections,
    pub joystick: Joystick,
    /// One-shot. Cleared once serviced.
    pub switch_target_requested: bool,
}

/// Normalized movement intent, magnitude in `[0, 1]`.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveIntent(pub Vec2);

/// Combine digital and analog input.
///
/// Above unit length the sum is normalized so diagonals and key+stick never
/// exceed full speed; below it the raw magnitude is kept for slow analog walking.
pub fn aggregate_intent(frame: &InputFrame) -> Vec2 {
    let v = frame.held.axis() + frame.joystick.vector();
    let len = v.length();
    if len > 1.0 { v / len } else { v }
}

/// Player-controlled target lock.
///
/// `order` is the ascending-distance ordering captured when the current cycle
/// started; later presses step through it rather than re-sorting, so every
/// in-range hostile is visited exactly once before the cycle wraps. A press
/// while the locked hostile is gone restarts the cycle at the nearest.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct TargetLock {
    target: Option<EntityId>,
    order: Vec<EntityId>,
}

impl TargetLock {
    #[inline]
    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn clear(&mut self) {
        self.target = None;
        self.order.clear();
    }

    /// Advance the lock to the next hostile within `range`.
    pub fn cycle(&mut self, store: &EntityStore, range: f32) {
        let origin = store.player.body.pos;
        let still_valid = |id: EntityId| {
            store
                .hostile(id)
                .is_some_and(|e| e.body.pos.distance_squared(origin) < range * range)
        };

        // A lock on a dead or out-of-range hostile counts as no lock.
        let next = self.target.filter(|cur| still_valid(*cur)).and_then(|cur| {
            let at = self.order.iter().position(|id| *id == cur)?;
            self.order[at + 1..].iter().copied().find(|id| still_valid(*id))
        });

        match next {
            Some(id) => self.target = Some(id),
            None => {
                // Cycle start, stale lock or wrap-around: capture a fresh ordering.
                self.order = store.hostiles_in_range(range);
                self.target = self.order.first().copied();
            }
        }
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<InputFrame>()
        .init_resource::<MoveIntent>()
        .init_resource::<TargetLock>()
        .add_systems(Update, apply_input.in_set(ArenaSystems::Input).run_if(run_in_progress));
}

pub fn apply_input(
    tunables: Res<Tunables>,
    store: Res<EntityStore>,
    mut frame: ResMut<InputFrame>,
    mut intent: ResMut<MoveIntent>,
    mut lock: ResMut<TargetLock>,
) {
    intent.0 = aggregate_intent(&frame);

    if frame.switch_target_requested {
        frame.switch_target_requested = false;
        lock.cycle(&store, tunables.weapon.range);
        debug!("target lock -> {:?}", lock.target());
    }
}
