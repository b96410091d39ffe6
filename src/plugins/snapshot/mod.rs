//! Outward state for the UI layer.
//!
//! `HudSnapshot` is throttled by wall time and only written when a field
//! changed. `RunEnded` is written once, on the first tick after the run
//! leaves `Playing`. Both systems run regardless of phase.

use std::time::Duration;

use bevy::prelude::*;

use crate::common::state::{RunPhase, RunState};
use crate::common::tunables::Tunables;
use crate::plugins::core::ArenaSystems;
use crate::plugins::store::{EntityStore, Player};

/// Heads-up display values.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudSnapshot {
    /// Rounded up so a sliver of health never reads as 0.
    pub hp: i32,
    pub max_hp: i32,
    pub strength: u32,
    pub weapon_level: u32,
    pub stage: u32,
    pub score: u32,
}

impl HudSnapshot {
    pub fn capture(player: &Player, run: &RunState) -> Self {
        Self {
            hp: player.hp.max(0.0).ceil() as i32,
            max_hp: player.max_hp.ceil() as i32,
            strength: player.strength,
            weapon_level: player.weapon_level,
            stage: run.stage,
            score: run.score,
        }
    }
}

/// One-shot terminal event for the host.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunEnded {
    pub phase: RunPhase,
    pub final_stage: u32,
    pub final_score: u32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct HudPublisher {
    last_publish: Option<Duration>,
    latest: Option<HudSnapshot>,
    announced: bool,
}

impl HudPublisher {
    /// Last published snapshot, for hosts that poll instead of reading messages.
    #[inline]
    pub fn latest(&self) -> Option<HudSnapshot> {
        self.latest
    }

    /// Offer a snapshot at wall time `now`.
    ///
    /// Returns it back when it should be published: the throttle window since
    /// the previous publish has elapsed and at least one field differs.
    pub fn offer(&mut self, now: Duration, snapshot: HudSnapshot, throttle: Duration) -> Option<HudSnapshot> {
        if let Some(last) = self.last_publish {
            if now.saturating_sub(last) < throttle {
                return None;
            }
        }
        if self.latest == Some(snapshot) {
            return None;
        }
        self.last_publish = Some(now);
        self.latest = Some(snapshot);
        Some(snapshot)
    }

    /// True exactly once per run, the first time it is called after the run ended.
    pub fn announce(&mut self, run: &RunState) -> Option<RunEnded> {
        if self.announced || !run.phase.is_terminal() {
            return None;
        }
        self.announced = true;
        Some(RunEnded { phase: run.phase, final_stage: run.stage, final_score: run.score })
    }
}

pub fn plugin(app: &mut App) {
    app.add_message::<HudSnapshot>()
        .add_message::<RunEnded>()
        .init_resource::<HudPublisher>()
        .add_systems(Update, (publish_hud, announce_run_end).chain().in_set(ArenaSystems::Publish));
}

pub fn publish_hud(
    time: Res<Time<Real>>,
    tunables: Res<Tunables>,
    run: Res<RunState>,
    store: Res<EntityStore>,
    mut publisher: ResMut<HudPublisher>,
    mut out: MessageWriter<HudSnapshot>,
) {
    let throttle = Duration::from_secs_f32(tunables.hud.publish_interval);
    let snapshot = HudSnapshot::capture(&store.player, &run);
    if let Some(s) = publisher.offer(time.elapsed(), snapshot, throttle) {
        out.write(s);
    }
}

pub fn announce_run_end(run: Res<RunState>, mut publisher: ResMut<HudPublisher>, mut out: MessageWriter<RunEnded>) {
    if let Some(ended) = publisher.announce(&run) {
        info!(
            "run ended: {:?} at stage {} with score {}",
            ended.phase, ended.final_stage, ended.final_score
        );
        out.write(ended);
    }
}

#[cfg(test)]
mod tests;
