//! Projectile hits, kills and their fallout (score, particles, loot).

use bevy::prelude::*;
use rand::Rng;

use crate::common::geometry::Body;
use crate::common::tunables::{LootTunables, ParticleTunables};
use crate::plugins::store::{EntityId, EntityStore, Item, ItemKind, Particle, Spawn};

/// Outcome of one hit pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitReport {
    pub hits: u32,
    /// Zombies killed this pass, in store order, with their death position.
    pub kills: Vec<(EntityId, Vec2)>,
    pub boss_killed: Option<(EntityId, Vec2)>,
}

/// Resolve every live projectile against the hostiles.
///
/// Zombies are tested in store order first; the boss only when no zombie was
/// hit. A projectile lands at most one hit and is marked spent. Hostiles
/// already at `hp <= 0` are skipped. Nothing is removed here.
pub fn resolve_hits(store: &mut EntityStore, rng: &mut impl Rng, particles: &ParticleTunables) -> HitReport {
    let mut report = HitReport::default();
    let mut bursts = Vec::new();
    let parts = store.parts_mut();
    let mut boss = parts.boss;

    for p in parts.projectiles.iter_mut().filter(|p| p.is_live()) {
        let victim = match parts
            .enemies
            .iter_mut()
            .find(|e| !e.is_dead() && p.body.touches_radially(&e.body))
        {
            Some(e) => Some(e),
            None => boss
                .as_deref_mut()
                .filter(|b| !b.is_dead() && p.body.touches_radially(&b.body)),
        };
        let Some(victim) = victim else { continue };

        victim.hp -= p.damage;
        p.spent = true;
        report.hits += 1;
        bursts.push(victim.body.pos);
    }

    report.kills = parts
        .enemies
        .iter()
        .filter(|e| e.is_dead())
        .map(|e| (e.id, e.body.pos))
        .collect();
    report.boss_killed = boss.filter(|b| b.is_dead()).map(|b| (b.id, b.body.pos));

    for at in bursts {
        burst(store, rng, particles, at, particles.hit_burst);
    }
    report
}

/// Scatter `count` particles from `at` in random directions.
pub fn burst(store: &mut EntityStore, rng: &mut impl Rng, tun: &ParticleTunables, at: Vec2, count: u32) {
    for _ in 0..count {
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let speed = rng.gen_range(0.0..=tun.max_speed);
        let size = rng.gen_range(tun.min_size..=tun.max_size);
        store.spawn(Spawn::Particle(Particle {
            id: EntityId(0),
            body: Body::square(at, size),
            vel: Vec2::from_angle(angle) * speed,
            life: tun.life,
        }));
    }
}

/// Roll for a drop. `None` most of the time.
pub fn roll_loot(rng: &mut impl Rng, loot: &LootTunables, at: Vec2) -> Option<Item> {
    if !rng.gen_bool(loot.drop_chance) {
        return None;
    }
    let total = loot.heal_weight + loot.strength_weight + loot.weapon_weight;
    let r = rng.gen_range(0.0f32..1.0) * total;
    let (kind, value) = if r < loot.heal_weight {
        (ItemKind::Heal, loot.heal_value)
    } else if r < loot.heal_weight + loot.strength_weight {
        (ItemKind::Strength, loot.strength_value)
    } else {
        (ItemKind::Weapon, loot.weapon_value)
    };
    Some(Item {
        id: EntityId(0),
        body: Body::square(at, loot.item_size),
        kind,
        value,
        life: loot.item_life,
        picked: false,
    })
}
