//! Auto-fire: cadence, target resolution and shot patterns.

use bevy::prelude::*;

use crate::common::geometry::Body;
use crate::common::tunables::WeaponTunables;
use crate::plugins::input::TargetLock;
use crate::plugins::store::{EntityId, EntityStore, Player, Projectile, Spawn};

/// Seconds since the last shot. Only a produced shot resets it.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct FireTimer {
    since_last: f32,
}

impl FireTimer {
    pub fn accumulate(&mut self, dt: f32) {
        self.since_last += dt;
    }

    #[inline]
    pub fn ready(&self, interval: f32) -> bool {
        self.since_last > interval
    }

    pub fn reset(&mut self) {
        self.since_last = 0.0;
    }
}

/// Shot interval for `level`, floored at the minimum.
pub fn fire_interval(w: &WeaponTunables, level: u32) -> f32 {
    (w.base_fire_interval - level as f32 * w.fire_interval_step_per_level).max(w.min_fire_interval)
}

/// Pick the hostile to shoot at.
///
/// The lock wins while its target is alive and in range. Otherwise the lock is
/// dropped and the nearest in-range hostile is used without locking it.
pub fn resolve_target(store: &EntityStore, lock: &mut TargetLock, range: f32) -> Option<EntityId> {
    let origin = store.player.body.pos;
    if let Some(id) = lock.target() {
        match store.hostile(id) {
            Some(e) if e.body.pos.distance(origin) < range => return Some(id),
            _ => lock.clear(),
        }
    }
    store.hostiles_in_range(range).first().copied()
}

/// Projectiles for one volley from `player` toward `aim`.
///
/// - level 1: one shot
/// - level 2: two parallel shots, offset sideways
/// - level 3+: a centre shot plus two angled outward
pub fn volley(player: &Player, aim: Vec2, w: &WeaponTunables) -> Vec<Projectile> {
    let origin = player.body.pos;
    let angle = (aim.y - origin.y).atan2(aim.x - origin.x);
    let shot = |offset: Vec2, angle: f32| Projectile {
        id: EntityId(0),
        body: Body::square(origin + offset, w.projectile_size),
        vel: Vec2::from_angle(angle) * w.projectile_speed,
        damage: player.strength as f32,
        life: w.projectile_life,
        spent: false,
    };

    match player.weapon_level {
        0 | 1 => vec![shot(Vec2::ZERO, angle)],
        2 => {
            let side = Vec2::from_angle(angle).perp() * (w.parallel_spacing * 0.5);
            vec![shot(-side, angle), shot(side, angle)]
        }
        _ => vec![
            shot(Vec2::ZERO, angle - w.spread_angle),
            shot(Vec2::ZERO, angle),
            shot(Vec2::ZERO, angle + w.spread_angle),
        ],
    }
}

/// Fire if the timer allows and a target resolves. Returns the spawned ids.
pub fn try_fire(
    store: &mut EntityStore,
    lock: &mut TargetLock,
    timer: &mut FireTimer,
    w: &WeaponTunables,
    dt: f32,
) -> Vec<EntityId> {
    timer.accumulate(dt);
    if !timer.ready(fire_interval(w, store.player.weapon_level)) {
        return Vec::new();
    }
    let Some(aim) = resolve_target(store, lock, w.range).and_then(|id| store.hostile(id)).map(|e| e.body.pos) else {
        return Vec::new();
    };

    timer.reset();
    volley(&store.player, aim, w)
        .into_iter()
        .map(|p| store.spawn(Spawn::Projectile(p)))
        .collect()
}
