//! Entity store: the single owner of every simulated entity.
//!
//! Collections are plain insertion-ordered `Vec`s so iteration is stable and
//! tie-breaks (nearest target, first hit) are deterministic. Ids come from a
//! monotonically increasing counter and are never reused within a run.
//!
//! Systems receive `Res<EntityStore>` / `ResMut<EntityStore>` for the duration
//! of one system run only; nothing outside the store holds entity references
//! across ticks except by [`EntityId`], which may go stale and must be
//! re-resolved.

use bevy::prelude::*;

use crate::common::geometry::Body;
use crate::common::tunables::Tunables;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: EntityId,
    pub body: Body,
    pub hp: f32,
    pub max_hp: f32,
    /// Projectile damage.
    pub strength: u32,
    /// Pixels per second.
    pub speed: f32,
    pub weapon_level: u32,
}

impl Player {
    pub fn new(tunables: &Tunables) -> Self {
        let p = &tunables.player;
        Self {
            id: EntityId(0),
            body: Body::square(tunables.arena.center(), p.size),
            hp: p.max_hp,
            max_hp: p.max_hp,
            strength: p.strength,
            speed: p.speed,
            weapon_level: p.weapon_level.max(1),
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Zombie,
    Boss,
}

/// Boss movement phase. Zombies stay in `Engaged`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Approach {
    Entering,
    Engaged { patrol_vx: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: EntityId,
    pub body: Body,
    pub hp: f32,
    pub max_hp: f32,
    /// Contact damage per second.
    pub damage: f32,
    pub speed: f32,
    pub kind: EnemyKind,
    pub approach: Approach,
}

impl Enemy {
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: EntityId,
    pub body: Body,
    pub vel: Vec2,
    pub damage: f32,
    /// Seconds left before expiry.
    pub life: f32,
    /// Set once the projectile has scored its hit.
    pub spent: bool,
}

impl Projectile {
    #[inline]
    pub fn is_live(&self) -> bool {
        !self.spent && self.life > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Heal,
    Strength,
    Weapon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: EntityId,
    pub body: Body,
    pub kind: ItemKind,
    pub value: f32,
    pub life: f32,
    pub picked: bool,
}

/// Decorative only.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: EntityId,
    pub body: Body,
    pub vel: Vec2,
    pub life: f32,
}

/// A new entity handed to [`EntityStore::spawn`]. The `id` field of the payload
/// is overwritten with a fresh one.
#[derive(Debug, Clone)]
pub enum Spawn {
    Enemy(Enemy),
    Projectile(Projectile),
    Item(Item),
    Particle(Particle),
}

/// Disjoint mutable views over the store, for systems that update several
/// collections in one pass. Slices cannot grow: spawning goes through the store.
pub struct StoreParts<'a> {
    pub player: &'a mut Player,
    pub boss: Option<&'a mut Enemy>,
    pub enemies: &'a mut [Enemy],
    pub projectiles: &'a mut [Projectile],
    pub items: &'a mut [Item],
    pub particles: &'a mut [Particle],
}

/// Rejected spawn: a boss already occupies the boss slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossSlotTaken;

#[derive(Resource, Debug, Clone)]
pub struct EntityStore {
    next_id: u64,
    pub player: Player,
    boss: Option<Enemy>,
    enemies: Vec<Enemy>,
    projectiles: Vec<Projectile>,
    items: Vec<Item>,
    particles: Vec<Particle>,
}

impl EntityStore {
    pub fn new(tunables: &Tunables) -> Self {
        Self {
            // Player owns id 0.
            next_id: 1,
            player: Player::new(tunables),
            boss: None,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            items: Vec::new(),
            particles: Vec::new(),
        }
    }

    #[inline]
    fn alloc_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert a new entity at the end of its collection.
    pub fn spawn(&mut self, spawn: Spawn) -> EntityId {
        let id = self.alloc_id();
        match spawn {
            Spawn::Enemy(mut e) => {
                e.id = id;
                self.enemies.push(e);
            }
            Spawn::Projectile(mut p) => {
                p.id = id;
                self.projectiles.push(p);
            }
            Spawn::Item(mut i) => {
                i.id = id;
                self.items.push(i);
            }
            Spawn::Particle(mut p) => {
                p.id = id;
                self.particles.push(p);
            }
        }
        id
    }

    /// Fill the boss slot. At most one boss exists at any time.
    pub fn spawn_boss(&mut self, mut boss: Enemy) -> Result<EntityId, BossSlotTaken> {
        if self.boss.is_some() {
            return Err(BossSlotTaken);
        }
        let id = self.alloc_id();
        boss.id = id;
        boss.kind = EnemyKind::Boss;
        self.boss = Some(boss);
        Ok(id)
    }

    /// Remove the entity with `id` from whichever collection holds it.
    /// The player cannot be removed. Order of the remaining entries is preserved.
    pub fn remove(&mut self, id: EntityId) -> bool {
        if self.boss.as_ref().is_some_and(|b| b.id == id) {
            self.boss = None;
            return true;
        }
        remove_by_id(&mut self.enemies, id, |e| e.id)
            || remove_by_id(&mut self.projectiles, id, |p| p.id)
            || remove_by_id(&mut self.items, id, |i| i.id)
            || remove_by_id(&mut self.particles, id, |p| p.id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        id == self.player.id
            || self.boss.as_ref().is_some_and(|b| b.id == id)
            || self.enemies.iter().any(|e| e.id == id)
            || self.projectiles.iter().any(|p| p.id == id)
            || self.items.iter().any(|i| i.id == id)
            || self.particles.iter().any(|p| p.id == id)
    }

    #[inline]
    pub fn boss(&self) -> Option<&Enemy> {
        self.boss.as_ref()
    }

    #[inline]
    pub fn boss_mut(&mut self) -> Option<&mut Enemy> {
        self.boss.as_mut()
    }

    #[inline]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    #[inline]
    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    #[inline]
    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    #[inline]
    pub fn projectiles_mut(&mut self) -> &mut [Projectile] {
        &mut self.projectiles
    }

    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn parts_mut(&mut self) -> StoreParts<'_> {
        StoreParts {
            player: &mut self.player,
            boss: self.boss.as_mut(),
            enemies: &mut self.enemies,
            projectiles: &mut self.projectiles,
            items: &mut self.items,
            particles: &mut self.particles,
        }
    }

    /// Zombies in insertion order, then the boss if present.
    pub fn hostiles(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().chain(self.boss.iter())
    }

    pub fn hostile(&self, id: EntityId) -> Option<&Enemy> {
        self.hostiles().find(|e| e.id == id)
    }

    /// Hostile ids within `range` of the player, nearest first. Ties keep store order.
    pub fn hostiles_in_range(&self, range: f32) -> Vec<EntityId> {
        let origin = self.player.body.pos;
        let mut in_range: Vec<(f32, EntityId)> = self
            .hostiles()
            .map(|e| (e.body.pos.distance_squared(origin), e.id))
            .filter(|(d2, _)| *d2 < range * range)
            .collect();
        // Stable sort: equal distances keep insertion order.
        in_range.sort_by(|a, b| a.0.total_cmp(&b.0));
        in_range.into_iter().map(|(_, id)| id).collect()
    }

    /// Drop spent or expired projectiles, consumed or expired items and expired particles.
    pub fn prune(&mut self) {
        self.projectiles.retain(Projectile::is_live);
        self.items.retain(|i| !i.picked && i.life > 0.0);
        self.particles.retain(|p| p.life > 0.0);
    }

    /// Remove zombies with `hp <= 0`. Returns how many were removed.
    pub fn remove_dead_enemies(&mut self) -> usize {
        let before = self.enemies.len();
        self.enemies.retain(|e| !e.is_dead());
        before - self.enemies.len()
    }
}

fn remove_by_id<T>(v: &mut Vec<T>, id: EntityId, key: impl Fn(&T) -> EntityId) -> bool {
    match v.iter().position(|x| key(x) == id) {
        Some(i) => {
            v.remove(i);
            true
        }
        None => false,
    }
}

/// End-of-tick cleanup.
pub fn prune_entities(mut store: ResMut<EntityStore>) {
    store.prune();
}
