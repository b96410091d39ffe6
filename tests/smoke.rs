mod common;

use bevy::prelude::*;
use nightmare_arena::common::state::{RunPhase, RunState, SimControl};
use nightmare_arena::plugins::core::{start_run, stop_run};
use nightmare_arena::plugins::snapshot::HudPublisher;

#[test]
fn boots_and_ticks() {
    let mut app = common::app_headless();
    common::tick(&mut app, 30);

    let run = app.world().resource::<RunState>();
    assert_eq!(run.phase, RunPhase::Playing);
    assert!((run.elapsed - 3.0).abs() < 1e-3);
    assert!(!common::store(&app).enemies().is_empty(), "waves arrive within three seconds");
    assert!(app.world().resource::<HudPublisher>().latest().is_some());
}

#[test]
fn stopped_run_does_not_advance() {
    let mut app = common::app_headless();
    common::tick(&mut app, 5);
    stop_run(app.world_mut());
    let before = app.world().resource::<RunState>().elapsed;

    common::tick(&mut app, 10);

    assert_eq!(app.world().resource::<RunState>().elapsed, before);
    assert!(!app.world().resource::<SimControl>().attached);
}

#[test]
fn restart_after_game_over() {
    let mut app = common::app_headless();
    common::tick(&mut app, 3);
    common::store_mut(&mut app).player.hp = 0.0;
    app.world_mut().resource_mut::<RunState>().finish(RunPhase::GameOver);
    common::tick(&mut app, 2);

    start_run(app.world_mut());
    common::tick(&mut app, 2);

    let run = app.world().resource::<RunState>();
    assert_eq!(run.phase, RunPhase::Playing);
    assert_eq!(run.stage, 1);
    assert_eq!(common::store(&app).player.hp, 100.0);
}
