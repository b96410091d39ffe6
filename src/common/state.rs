//! Run state machine.
//!
//! ```text
//! Playing ──player hp exhausted──▶ GameOver
//!    │
//!    └──────boss killed──────────▶ Won
//! ```
//!
//! Both terminal phases are final for the run; only `start_run` begins a new one.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum RunPhase {
    #[default]
    Playing,
    GameOver,
    Won,
}

impl RunPhase {
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RunState {
    /// Stage ("day") counter, `1..=max_stage`, never decreasing.
    pub stage: u32,
    /// Simulation seconds since the run started.
    pub elapsed: f32,
    pub score: u32,
    pub phase: RunPhase,
    /// Set once the boss has been spawned for this run.
    pub boss_spawned: bool,
}

impl Default for RunState {
    fn default() -> Self {
        Self { stage: 1, elapsed: 0.0, score: 0, phase: RunPhase::Playing, boss_spawned: false }
    }
}

impl RunState {
    /// Leave `Playing` for a terminal phase. Returns false if the run had already ended.
    pub fn finish(&mut self, phase: RunPhase) -> bool {
        debug_assert!(phase.is_terminal());
        if self.phase.is_terminal() {
            return false;
        }
        self.phase = phase;
        true
    }
}

/// Whether the tick pipeline is attached to the host frame callback.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SimControl {
    pub attached: bool,
}

/// Run condition: the tick pipeline is attached.
pub fn tick_attached(control: Res<SimControl>) -> bool {
    control.attached
}

/// Run condition: the current run is still being played.
pub fn run_in_progress(run: Res<RunState>) -> bool {
    run.phase == RunPhase::Playing
}
