use bevy::ecs::message::Messages;

use super::*;
use crate::common::test_utils::{arena_world, run_system_once};

const THROTTLE: Duration = Duration::from_millis(100);

fn hud(hp: i32, score: u32) -> HudSnapshot {
    HudSnapshot { hp, max_hp: 100, strength: 3, weapon_level: 1, stage: 1, score }
}

#[test]
fn capture_rounds_hp_up() {
    let t = Tunables::default();
    let mut player = Player::new(&t);
    player.hp = 0.2;
    let run = RunState { score: 40, stage: 3, ..default() };

    let s = HudSnapshot::capture(&player, &run);
    assert_eq!(s, HudSnapshot { hp: 1, max_hp: 100, strength: 3, weapon_level: 1, stage: 3, score: 40 });
}

#[test]
fn offer_is_throttled_and_deduplicated() {
    let mut p = HudPublisher::default();
    let t0 = Duration::from_secs(5);

    assert_eq!(p.offer(t0, hud(100, 0), THROTTLE), Some(hud(100, 0)));
    // Inside the window: nothing, even if changed.
    assert_eq!(p.offer(t0 + Duration::from_millis(50), hud(90, 0), THROTTLE), None);
    assert_eq!(p.offer(t0 + Duration::from_millis(50), hud(90, 0), THROTTLE), None);
    // Window over but unchanged: nothing.
    assert_eq!(p.offer(t0 + Duration::from_millis(150), hud(100, 0), THROTTLE), None);
    assert_eq!(p.offer(t0 + Duration::from_millis(160), hud(90, 10), THROTTLE), Some(hud(90, 10)));
    assert_eq!(p.latest(), Some(hud(90, 10)));
}

#[test]
fn run_end_is_announced_once() {
    let mut p = HudPublisher::default();
    let mut run = RunState::default();
    assert!(p.announce(&run).is_none());

    run.finish(RunPhase::GameOver);
    run.score = 70;
    assert_eq!(
        p.announce(&run),
        Some(RunEnded { phase: RunPhase::GameOver, final_stage: 1, final_score: 70 })
    );
    assert!(p.announce(&run).is_none());
}

#[test]
fn systems_write_messages() {
    let mut world = arena_world(Tunables::default());
    world.init_resource::<Time<Real>>();

    run_system_once(&mut world, publish_hud);
    run_system_once(&mut world, publish_hud);
    let published: Vec<HudSnapshot> = world.resource_mut::<Messages<HudSnapshot>>().drain().collect();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].hp, 100);

    world.resource_mut::<RunState>().finish(RunPhase::Won);
    run_system_once(&mut world, announce_run_end);
    run_system_once(&mut world, announce_run_end);
    let ended: Vec<RunEnded> = world.resource_mut::<Messages<RunEnded>>().drain().collect();
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].phase, RunPhase::Won);
}
