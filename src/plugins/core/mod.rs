//! Core plugin: shared resources, the tick pipeline order, and run lifecycle.
//!
//! ```text
//! Update (one tick per host frame, while attached)
//!   Clock → Input → Movement → Spawn → Combat → Progression → Prune → Publish
//! ```
//!
//! Every simulation set additionally requires `RunPhase::Playing`, checked per
//! system, so a terminal transition inside Combat stops the rest of the tick.
//! Clock and Publish keep running after the run ends so the host still gets the
//! final HUD values and the one-shot run-end message.

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::common::state::{RunState, SimControl, tick_attached};
use crate::common::tunables::Tunables;
use crate::plugins::clock::{self, SimClock};
use crate::plugins::combat::FireTimer;
use crate::plugins::input::{InputFrame, MoveIntent, TargetLock};
use crate::plugins::snapshot::HudPublisher;
use crate::plugins::spawner::SpawnTimer;
use crate::plugins::store::{self, EntityStore};

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArenaSystems {
    Clock,
    Input,
    Movement,
    Spawn,
    Combat,
    Progression,
    Prune,
    Publish,
}

/// Simulation randomness. Seeded from `Tunables::seed` when set.
#[derive(Resource, Debug, Clone)]
pub struct ArenaRng(pub StdRng);

impl ArenaRng {
    pub fn from_tunables(tunables: &Tunables) -> Self {
        match tunables.seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<Tunables>()
        .init_resource::<SimControl>()
        .init_resource::<RunState>();

    app.configure_sets(
        Update,
        (
            ArenaSystems::Clock,
            ArenaSystems::Input,
            ArenaSystems::Movement,
            ArenaSystems::Spawn,
            ArenaSystems::Combat,
            ArenaSystems::Progression,
            ArenaSystems::Prune,
            ArenaSystems::Publish,
        )
            .chain()
            .run_if(tick_attached),
    );

    app.add_systems(Update, clock::tick_clock.in_set(ArenaSystems::Clock));
    app.add_systems(
        Update,
        store::prune_entities
            .in_set(ArenaSystems::Prune)
            .run_if(crate::common::state::run_in_progress),
    );
}

/// Begin a fresh run and attach the tick.
///
/// Resets everything a run owns: a new player at the arena centre, empty
/// collections, stage 1, zero elapsed time, fresh timers and target lock.
/// Tunables are kept; a missing `Tunables` resource is filled with defaults.
pub fn start_run(world: &mut World) {
    let tunables = world.get_resource_or_insert_with(Tunables::default).clone();

    world.insert_resource(EntityStore::new(&tunables));
    world.insert_resource(RunState::default());
    world.insert_resource(SimClock::new(tunables.clock.dt_cap));
    world.insert_resource(SpawnTimer::new(&tunables));
    world.insert_resource(FireTimer::default());
    world.insert_resource(InputFrame::default());
    world.insert_resource(MoveIntent::default());
    world.insert_resource(TargetLock::default());
    world.insert_resource(HudPublisher::default());
    world.insert_resource(ArenaRng::from_tunables(&tunables));
    world.insert_resource(SimControl { attached: true });

    info!(
        "run started: arena {}x{}, {} stages of {}s",
        tunables.arena.width,
        tunables.arena.height,
        tunables.progression.max_stage,
        tunables.progression.seconds_per_stage
    );
}

/// Detach the tick. State is left as-is for the host to read.
pub fn stop_run(world: &mut World) {
    world.insert_resource(SimControl { attached: false });
    info!("run stopped");
}

#[cfg(test)]
mod tests;
