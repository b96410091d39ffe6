//! Progression: elapsed time drives the stage counter, the spawn cadence and
//! the single boss appearance. Terminal transitions are raised by combat.

use bevy::prelude::*;

use crate::common::state::{RunState, run_in_progress};
use crate::common::tunables::{ProgressionTunables, Tunables};
use crate::plugins::clock::SimClock;
use crate::plugins::core::ArenaSystems;
use crate::plugins::spawner::{self, SpawnTimer};
use crate::plugins::store::EntityStore;

pub fn plugin(app: &mut App) {
    app.add_systems(Update, advance_stage.in_set(ArenaSystems::Progression).run_if(run_in_progress));
}

/// Stage for `elapsed` seconds: `min(max, floor(elapsed / len) + 1)`.
pub fn stage_at(p: &ProgressionTunables, elapsed: f32) -> u32 {
    let raw = (elapsed.max(0.0) / p.seconds_per_stage).floor() as u32;
    raw.saturating_add(1).min(p.max_stage)
}

/// What changed during one progression step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageChange {
    pub advanced: bool,
    pub boss_due: bool,
}

/// Add `dt` to the run clock and move the stage forward if due.
///
/// The stage never decreases. `boss_due` is raised on the one step where the
/// final stage is first reached; the caller spawns the boss.
pub fn step(run: &mut RunState, p: &ProgressionTunables, dt: f32) -> StageChange {
    run.elapsed += dt;
    let next = stage_at(p, run.elapsed);
    if next <= run.stage {
        return StageChange::default();
    }
    run.stage = next;
    let boss_due = run.stage >= p.max_stage && !run.boss_spawned;
    if boss_due {
        run.boss_spawned = true;
    }
    StageChange { advanced: true, boss_due }
}

pub fn advance_stage(
    tunables: Res<Tunables>,
    clock: Res<SimClock>,
    mut run: ResMut<RunState>,
    mut timer: ResMut<SpawnTimer>,
    mut store: ResMut<EntityStore>,
) {
    let change = step(&mut run, &tunables.progression, clock.dt());
    if !change.advanced {
        return;
    }

    timer.set_interval(spawner::spawn_interval(&tunables.spawn, run.stage));
    info!("stage {} (spawn every {:.3}s)", run.stage, timer.interval());

    if change.boss_due {
        if let Err(e) = spawner::spawn_boss(&mut store, &tunables) {
            warn!("boss spawn skipped: {:?}", e);
        }
    }
}
