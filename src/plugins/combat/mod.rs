//! Targeting and combat.
//!
//! Order within the Combat set:
//! 1. `fire_weapon`: auto-fire at the locked or nearest in-range hostile
//! 2. `resolve_projectile_hits`: hits, kills, score, loot, boss win
//! 3. `apply_contact_damage`: overlap drain on the player, game over
//! 4. `collect_items`: pickup effects
//!
//! Each step re-checks the run phase, so a win or loss ends the tick there.

use bevy::prelude::*;

use crate::common::state::{RunPhase, RunState, run_in_progress};
use crate::common::tunables::Tunables;
use crate::plugins::clock::SimClock;
use crate::plugins::core::{ArenaRng, ArenaSystems};
use crate::plugins::input::TargetLock;
use crate::plugins::store::{EntityStore, Item, ItemKind, Player, Spawn};

pub mod firing;
pub mod hits;

pub use firing::FireTimer;

pub fn plugin(app: &mut App) {
    app.init_resource::<FireTimer>().add_systems(
        Update,
        (
            fire_weapon.run_if(run_in_progress),
            resolve_projectile_hits.run_if(run_in_progress),
            apply_contact_damage.run_if(run_in_progress),
            collect_items.run_if(run_in_progress),
        )
            .chain()
            .in_set(ArenaSystems::Combat),
    );
}

pub fn fire_weapon(
    tunables: Res<Tunables>,
    clock: Res<SimClock>,
    mut timer: ResMut<FireTimer>,
    mut lock: ResMut<TargetLock>,
    mut store: ResMut<EntityStore>,
) {
    firing::try_fire(&mut store, &mut lock, &mut timer, &tunables.weapon, clock.dt());
}

pub fn resolve_projectile_hits(
    tunables: Res<Tunables>,
    mut rng: ResMut<ArenaRng>,
    mut run: ResMut<RunState>,
    mut store: ResMut<EntityStore>,
) {
    let rng = &mut rng.0;
    let report = hits::resolve_hits(&mut store, rng, &tunables.particles);
    if report.hits == 0 {
        return;
    }

    let deaths = report.kills.iter().chain(report.boss_killed.iter());
    for &(_, at) in deaths {
        run.score += tunables.loot.kill_score;
        hits::burst(&mut store, rng, &tunables.particles, at, tunables.particles.death_burst);
        if let Some(item) = hits::roll_loot(rng, &tunables.loot, at) {
            debug!("{:?} dropped at {}", item.kind, at);
            store.spawn(Spawn::Item(item));
        }
    }
    store.remove_dead_enemies();

    if let Some((id, _)) = report.boss_killed {
        store.remove(id);
        if run.finish(RunPhase::Won) {
            info!("boss defeated at stage {}, score {}", run.stage, run.score);
        }
    }
}

/// Drain `damage * dt` from the player for every hostile overlapping it.
/// Returns true when the player is dead afterwards; hp is clamped at 0.
pub fn contact_damage(store: &mut EntityStore, dt: f32) -> bool {
    let player = store.player.body;
    let drain: f32 = store
        .hostiles()
        .filter(|e| !e.is_dead() && e.body.overlaps(&player))
        .map(|e| e.damage * dt)
        .sum();
    store.player.hp -= drain;
    if store.player.is_dead() {
        store.player.hp = 0.0;
        return true;
    }
    false
}

pub fn apply_contact_damage(clock: Res<SimClock>, mut run: ResMut<RunState>, mut store: ResMut<EntityStore>) {
    if contact_damage(&mut store, clock.dt()) && run.finish(RunPhase::GameOver) {
        info!("player died at stage {}, score {}", run.stage, run.score);
    }
}

/// Apply an item's effect to the player.
pub fn apply_item(player: &mut Player, item: &Item) {
    let steps = item.value.max(0.0) as u32;
    match item.kind {
        ItemKind::Heal => player.hp = (player.hp + item.value).min(player.max_hp),
        ItemKind::Strength => player.strength += steps,
        ItemKind::Weapon => player.weapon_level += steps,
    }
}

/// Consume every item overlapping the player. Returns how many were picked up.
pub fn pick_up(store: &mut EntityStore) -> usize {
    let parts = store.parts_mut();
    let mut picked = 0;
    for item in parts.items.iter_mut() {
        if item.picked || item.life <= 0.0 || !item.body.overlaps(&parts.player.body) {
            continue;
        }
        apply_item(parts.player, item);
        item.picked = true;
        picked += 1;
    }
    picked
}

pub fn collect_items(mut store: ResMut<EntityStore>) {
    let picked = pick_up(&mut store);
    if picked > 0 {
        let p = &store.player;
        debug!(
            "picked up {picked}: hp {:.0}/{:.0} str {} weapon {}",
            p.hp, p.max_hp, p.strength, p.weapon_level
        );
    }
}
