use rand::Rng;

use super::*;
use crate::common::state::RunPhase;
use crate::common::test_utils::{arena_world, seeded};
use crate::plugins::spawner;
use crate::plugins::store::Spawn;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<RunState>().is_some());
    assert!(!app.world().resource::<SimControl>().attached);
}

#[test]
fn start_run_resets_everything() {
    let mut world = arena_world(Tunables::default());
    assert!(world.resource::<SimControl>().attached);
    {
        let t = world.resource::<Tunables>().clone();
        let mut store = world.resource_mut::<EntityStore>();
        store.player.hp = 3.0;
        store.spawn(Spawn::Enemy(spawner::zombie(&t.zombie, 5, Vec2::ZERO)));
    }
    {
        let mut run = world.resource_mut::<RunState>();
        run.stage = 40;
        run.score = 120;
        run.finish(RunPhase::GameOver);
    }

    start_run(&mut world);

    let store = world.resource::<EntityStore>();
    assert_eq!(store.player.hp, 100.0);
    assert_eq!(store.player.body.pos, Vec2::new(640.0, 360.0));
    assert!(store.enemies().is_empty());
    assert_eq!(*world.resource::<RunState>(), RunState::default());
}

#[test]
fn stop_run_detaches_the_tick() {
    let mut world = arena_world(Tunables::default());
    stop_run(&mut world);
    assert!(!world.resource::<SimControl>().attached);
}

#[test]
fn seeded_rng_is_reproducible() {
    let t = seeded(42);
    let mut a = ArenaRng::from_tunables(&t);
    let mut b = ArenaRng::from_tunables(&t);
    let xs: Vec<u32> = (0..4).map(|_| a.0.gen_range(0..1000)).collect();
    let ys: Vec<u32> = (0..4).map(|_| b.0.gen_range(0..1000)).collect();
    assert_eq!(xs, ys);
}
