//! End-to-end scenarios through the full tick pipeline.

mod common;

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use nightmare_arena::common::geometry::Body;
use nightmare_arena::common::state::{RunPhase, RunState};
use nightmare_arena::plugins::input::{InputFrame, Joystick};
use nightmare_arena::plugins::snapshot::RunEnded;
use nightmare_arena::plugins::spawner;
use nightmare_arena::plugins::store::{Approach, EntityId, Item, ItemKind, Projectile, Spawn};

fn still_bullet(pos: Vec2, damage: f32) -> Spawn {
    Spawn::Projectile(Projectile {
        id: EntityId(0),
        body: Body::square(pos, 8.0),
        vel: Vec2::ZERO,
        damage,
        life: 2.0,
        spent: false,
    })
}

#[test]
fn heal_pickup_restores_up_to_max() {
    let mut app = common::app_with(common::quiet(1), common::STEP);
    {
        let mut store = common::store_mut(&mut app);
        store.player.hp = 10.0;
        let at = store.player.body.pos;
        store.spawn(Spawn::Item(Item {
            id: EntityId(0),
            body: Body::square(at, 15.0),
            kind: ItemKind::Heal,
            value: 20.0,
            life: 15.0,
            picked: false,
        }));
    }

    common::tick(&mut app, 1);

    let store = common::store(&app);
    assert_eq!(store.player.hp, 30.0);
    assert!(store.items().is_empty());
}

#[test]
fn killing_a_zombie_scores_and_rolls_loot() {
    let mut t = common::quiet(2);
    t.loot.drop_chance = 1.0;
    let mut app = common::app_with(t.clone(), common::STEP);
    let zid = {
        let mut store = common::store_mut(&mut app);
        let at = store.player.body.pos + Vec2::new(100.0, 0.0);
        let mut z = spawner::zombie(&t.zombie, 1, at);
        z.hp = 5.0;
        let zid = store.spawn(Spawn::Enemy(z));
        store.spawn(still_bullet(at, 5.0));
        zid
    };

    common::tick(&mut app, 1);

    let store = common::store(&app);
    assert!(store.hostile(zid).is_none(), "removed in the same tick");
    assert!(store.projectiles().is_empty());
    assert_eq!(store.items().len(), 1, "a certain drop was rolled");
    assert_eq!(app.world().resource::<RunState>().score, 10);
}

#[test]
fn boss_arrives_when_final_stage_is_reached() {
    let mut app = common::app_with(common::quiet(3), common::STEP);
    {
        let mut run = app.world_mut().resource_mut::<RunState>();
        run.stage = 99;
        run.elapsed = 1484.85;
    }

    common::tick(&mut app, 1);
    assert_eq!(app.world().resource::<RunState>().stage, 99);
    assert!(common::store(&app).boss().is_none());

    common::tick(&mut app, 1);
    let run = app.world().resource::<RunState>();
    assert_eq!(run.stage, 100);
    assert!(run.boss_spawned);
    let boss = common::store(&app).boss().map(|b| b.id).expect("boss spawned");

    common::tick(&mut app, 20);
    assert_eq!(app.world().resource::<RunState>().stage, 100);
    assert_eq!(common::store(&app).boss().map(|b| b.id), Some(boss), "still the same, single boss");
}

#[test]
fn boss_death_wins_and_freezes_the_run() {
    let t = common::quiet(4);
    let mut app = common::app_with(t.clone(), common::STEP);
    {
        let mut store = common::store_mut(&mut app);
        let player = store.player.body.pos;
        spawner::spawn_boss(&mut store, &t).expect("slot free");
        let boss = store.boss_mut().expect("boss present");
        boss.hp = 1.0;
        boss.body.pos = Vec2::new(640.0, 200.0);
        boss.approach = Approach::Engaged { patrol_vx: 0.0 };
        store.spawn(still_bullet(Vec2::new(640.0, 200.0), 3.0));
        // Hugging the player: would drain hp if combat kept running.
        store.spawn(Spawn::Enemy(spawner::zombie(&t.zombie, 1, player)));
    }

    common::tick(&mut app, 1);

    let run = app.world().resource::<RunState>().clone();
    assert_eq!(run.phase, RunPhase::Won);
    assert!(common::store(&app).boss().is_none());
    assert_eq!(common::store(&app).player.hp, 100.0);

    let ended: Vec<RunEnded> = app.world_mut().resource_mut::<Messages<RunEnded>>().drain().collect();
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].phase, RunPhase::Won);
    assert_eq!(ended[0].final_score, 10);

    let enemies = common::store(&app).enemies().to_vec();
    common::tick(&mut app, 20);
    assert_eq!(common::store(&app).player.hp, 100.0);
    assert_eq!(common::store(&app).enemies(), enemies.as_slice());
    assert_eq!(*app.world().resource::<RunState>(), run);
    assert!(app.world_mut().resource_mut::<Messages<RunEnded>>().drain().next().is_none(), "announced once");
}

#[test]
fn half_stick_walks_at_half_speed() {
    let mut app = common::app_with(common::quiet(5), common::STEP);
    let start = common::store(&app).player.body.pos;
    app.world_mut().resource_mut::<InputFrame>().joystick = Joystick { active: true, dx: 0.5, dy: 0.0 };

    common::tick(&mut app, 1);

    let moved = common::store(&app).player.body.pos - start;
    // 0.5 * 180 px/s * 0.1 s
    assert!((moved - Vec2::new(9.0, 0.0)).length() < 1e-3, "{moved:?}");
}
