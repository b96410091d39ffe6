//! Spawner: zombie waves on a stage-dependent cadence, and the one-off boss.

use bevy::prelude::*;
use rand::Rng;

use crate::common::geometry::Body;
use crate::common::state::{RunState, run_in_progress};
use crate::common::tunables::{ArenaTunables, SpawnTunables, Tunables, ZombieTunables};
use crate::plugins::clock::SimClock;
use crate::plugins::core::{ArenaRng, ArenaSystems};
use crate::plugins::store::{Approach, BossSlotTaken, Enemy, EnemyKind, EntityId, EntityStore, Spawn};

/// Wave cadence in simulation seconds.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct SpawnTimer {
    since_last: f32,
    interval: f32,
}

impl SpawnTimer {
    pub fn new(tunables: &Tunables) -> Self {
        Self { since_last: 0.0, interval: spawn_interval(&tunables.spawn, 1) }
    }

    #[inline]
    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn set_interval(&mut self, interval: f32) {
        self.interval = interval;
    }

    /// Accumulate `dt`; true when a wave is due. The remainder is dropped.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.since_last += dt;
        if self.since_last > self.interval {
            self.since_last = 0.0;
            true
        } else {
            false
        }
    }
}

/// Seconds between waves at `stage`: shrinks linearly, never below the floor.
pub fn spawn_interval(spawn: &SpawnTunables, stage: u32) -> f32 {
    let steps = stage.saturating_sub(1) as f32;
    (spawn.base_interval - steps * spawn.interval_step_per_stage).max(spawn.min_interval)
}

/// Zombies per wave at `stage`.
pub fn wave_size(spawn: &SpawnTunables, stage: u32) -> u32 {
    1 + stage / spawn.stages_per_extra_enemy
}

/// A zombie scaled for `stage`, placed at `pos`.
pub fn zombie(z: &ZombieTunables, stage: u32, pos: Vec2) -> Enemy {
    let s = stage as f32;
    let hp = z.base_hp + s * z.hp_per_stage;
    Enemy {
        id: EntityId(0),
        body: Body::square(pos, z.size),
        hp,
        max_hp: hp,
        damage: z.base_damage + (stage / z.stages_per_damage_step) as f32,
        speed: z.base_speed + s * z.speed_per_stage,
        kind: EnemyKind::Zombie,
        approach: Approach::Engaged { patrol_vx: 0.0 },
    }
}

/// Uniform point on one of the four edges (edge itself uniform), just off-screen.
pub fn edge_point(rng: &mut impl Rng, arena: &ArenaTunables, offset: f32) -> Vec2 {
    match rng.gen_range(0..4) {
        0 => Vec2::new(rng.gen_range(0.0..arena.width), -offset),
        1 => Vec2::new(arena.width + offset, rng.gen_range(0.0..arena.height)),
        2 => Vec2::new(rng.gen_range(0.0..arena.width), arena.height + offset),
        _ => Vec2::new(-offset, rng.gen_range(0.0..arena.height)),
    }
}

/// The boss, centred above the arena. Its stats ignore stage scaling.
pub fn boss(tunables: &Tunables) -> Enemy {
    let b = &tunables.boss;
    Enemy {
        id: EntityId(0),
        body: Body::square(Vec2::new(tunables.arena.width * 0.5, -b.size), b.size),
        hp: b.hp,
        max_hp: b.hp,
        damage: b.damage,
        speed: b.speed,
        kind: EnemyKind::Boss,
        approach: Approach::Entering,
    }
}

/// Spawn one wave for `stage`. Returns the new ids in spawn order.
pub fn spawn_wave(store: &mut EntityStore, rng: &mut impl Rng, tunables: &Tunables, stage: u32) -> Vec<EntityId> {
    (0..wave_size(&tunables.spawn, stage))
        .map(|_| {
            let pos = edge_point(rng, &tunables.arena, tunables.zombie.size);
            store.spawn(Spawn::Enemy(zombie(&tunables.zombie, stage, pos)))
        })
        .collect()
}

/// Fill the boss slot.
pub fn spawn_boss(store: &mut EntityStore, tunables: &Tunables) -> Result<EntityId, BossSlotTaken> {
    let id = store.spawn_boss(boss(tunables))?;
    info!("boss {:?} entering the arena", id);
    Ok(id)
}

pub fn plugin(app: &mut App) {
    app.add_systems(Update, spawn_enemies.in_set(ArenaSystems::Spawn).run_if(run_in_progress));
}

pub fn spawn_enemies(
    tunables: Res<Tunables>,
    clock: Res<SimClock>,
    run: Res<RunState>,
    mut timer: ResMut<SpawnTimer>,
    mut rng: ResMut<ArenaRng>,
    mut store: ResMut<EntityStore>,
) {
    if !timer.tick(clock.dt()) {
        return;
    }
    let ids = spawn_wave(&mut store, &mut rng.0, &tunables, run.stage);
    debug!("stage {}: spawned wave of {}", run.stage, ids.len());
}
