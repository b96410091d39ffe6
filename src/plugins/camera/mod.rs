//! Camera plugin.
//!
//! The arena is fixed-size and fully visible, so the camera never moves: it
//! sits at the world origin, which [`to_world`] maps to the arena centre.

use bevy::prelude::*;

use crate::common::tunables::ArenaTunables;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera);
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        Transform::from_xyz(0.0, 0.0, 999.0),
    ));
}

/// Arena space (origin top-left, `+y` down) to world space (origin centre, `+y` up).
#[inline]
pub fn to_world(arena: &ArenaTunables, p: Vec2) -> Vec2 {
    Vec2::new(p.x - arena.width * 0.5, arena.height * 0.5 - p.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_corners_map_around_the_origin() {
        let arena = ArenaTunables::default();
        assert_eq!(to_world(&arena, Vec2::ZERO), Vec2::new(-640.0, 360.0));
        assert_eq!(to_world(&arena, arena.center()), Vec2::ZERO);
        assert_eq!(to_world(&arena, arena.size()), Vec2::new(640.0, -360.0));
    }
}
