//! Simulation clock.
//!
//! Turns host frame timestamps into a bounded delta. A tab that was suspended
//! for a minute resumes with one `dt_cap` step instead of a minute of
//! simulation at once.

use std::time::Duration;

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct SimClock {
    prev: Option<Duration>,
    cap: f32,
    dt: f32,
}

impl SimClock {
    pub fn new(cap: f32) -> Self {
        Self { prev: None, cap, dt: 0.0 }
    }

    /// Record the frame timestamp `now` and return the clamped delta in seconds.
    ///
    /// The first call after construction yields 0, as does a timestamp that
    /// runs backwards.
    pub fn advance(&mut self, now: Duration) -> f32 {
        let dt = match self.prev {
            Some(prev) => now.saturating_sub(prev).as_secs_f32().min(self.cap),
            None => 0.0,
        };
        self.prev = Some(now);
        self.dt = dt;
        dt
    }

    /// Delta of the current tick.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

pub fn tick_clock(time: Res<Time<Real>>, mut clock: ResMut<SimClock>) {
    clock.advance(time.elapsed());
}
