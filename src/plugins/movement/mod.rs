//! Movement: velocity integration and steering for every mobile entity.
//!
//! - player: intent × speed, clamped inside the walls
//! - zombies: seek the player
//! - boss: descend into the arena, then patrol sideways while homing vertically
//! - projectiles and particles: straight lines, lifetime countdown
//! - items: fall slowly, get pulled in near the player

use bevy::prelude::*;

use crate::common::geometry::{clamp_inside, is_outside};
use crate::common::state::run_in_progress;
use crate::common::tunables::{ArenaTunables, BossTunables, LootTunables, Tunables};
use crate::plugins::clock::SimClock;
use crate::plugins::core::ArenaSystems;
use crate::plugins::input::MoveIntent;
use crate::plugins::store::{Approach, Enemy, EntityStore, Item, Player, Projectile};

pub fn plugin(app: &mut App) {
    app.add_systems(Update, move_entities.in_set(ArenaSystems::Movement).run_if(run_in_progress));
}

pub fn move_entities(
    tunables: Res<Tunables>,
    clock: Res<SimClock>,
    intent: Res<MoveIntent>,
    mut store: ResMut<EntityStore>,
) {
    step(&mut store, intent.0, &tunables, clock.dt());
}

/// Advance every mobile entity by `dt` seconds.
pub fn step(store: &mut EntityStore, intent: Vec2, tunables: &Tunables, dt: f32) {
    let parts = store.parts_mut();

    move_player(parts.player, intent, &tunables.arena, dt);
    let target = parts.player.body.pos;

    for enemy in parts.enemies.iter_mut() {
        seek(enemy, target, dt);
    }
    if let Some(boss) = parts.boss {
        move_boss(boss, target, &tunables.arena, &tunables.boss, dt);
    }
    for p in parts.projectiles.iter_mut() {
        move_projectile(p, &tunables.arena, dt);
    }
    for item in parts.items.iter_mut() {
        move_item(item, target, &tunables.arena, &tunables.loot, dt);
    }
    for p in parts.particles.iter_mut() {
        p.body.pos += p.vel * dt;
        p.life -= dt;
    }
}

pub fn move_player(player: &mut Player, intent: Vec2, arena: &ArenaTunables, dt: f32) {
    player.body.pos += intent * player.speed * dt;
    player.body.pos = clamp_inside(player.body.pos, arena.size(), player.body.half_extents());
}

#[inline]
fn heading(from: Vec2, to: Vec2) -> Vec2 {
    let d = to - from;
    Vec2::from_angle(d.y.atan2(d.x))
}

/// Pure seek: full speed straight at `target`.
pub fn seek(enemy: &mut Enemy, target: Vec2, dt: f32) {
    enemy.body.pos += heading(enemy.body.pos, target) * enemy.speed * dt;
}

pub fn move_boss(boss: &mut Enemy, target: Vec2, arena: &ArenaTunables, tun: &BossTunables, dt: f32) {
    match boss.approach {
        Approach::Entering => {
            boss.body.pos.y += tun.entry_speed * dt;
            if boss.body.pos.y >= tun.entry_y {
                // Open the patrol toward the player's side.
                let dir = if target.x < boss.body.pos.x { -1.0 } else { 1.0 };
                boss.approach = Approach::Engaged { patrol_vx: dir * boss.speed };
            }
        }
        Approach::Engaged { mut patrol_vx } => {
            let half = boss.body.half_extents().x;
            boss.body.pos.x += patrol_vx * dt;
            if boss.body.pos.x - half < 0.0 {
                boss.body.pos.x = half;
                patrol_vx = patrol_vx.abs();
            } else if boss.body.pos.x + half > arena.width {
                boss.body.pos.x = arena.width - half;
                patrol_vx = -patrol_vx.abs();
            }
            boss.approach = Approach::Engaged { patrol_vx };

            boss.body.pos.y += heading(boss.body.pos, target).y * boss.speed * dt;
        }
    }
}

pub fn move_projectile(p: &mut Projectile, arena: &ArenaTunables, dt: f32) {
    p.body.pos += p.vel * dt;
    p.life -= dt;
    if is_outside(p.body.pos, arena.size(), arena.cull_margin) {
        p.life = 0.0;
    }
}

pub fn move_item(item: &mut Item, player: Vec2, arena: &ArenaTunables, loot: &LootTunables, dt: f32) {
    item.life -= dt;
    if item.body.pos.distance(player) < loot.magnet_radius {
        item.body.pos += (player - item.body.pos) * loot.magnet_rate * dt;
    } else {
        item.body.pos.y += loot.fall_speed * dt;
    }
    if item.body.pos.y - item.body.half_extents().y > arena.height {
        item.life = 0.0;
    }
}
