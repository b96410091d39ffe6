//! Tunable gameplay constants.
//!
//! Every number the simulation balances around lives here, grouped by the
//! system that reads it. Hosts may override any subset from a JSON file:
//! sections and fields left out keep their defaults.
//!
//! ```json
//! { "seed": 7, "progression": { "seconds_per_stage": 5.0 } }
//! ```

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TunablesError {
    #[error("failed to read tunables from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tunables: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tunable `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tunables {
    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub arena: ArenaTunables,
    pub clock: ClockTunables,
    pub player: PlayerTunables,
    pub zombie: ZombieTunables,
    pub boss: BossTunables,
    pub spawn: SpawnTunables,
    pub weapon: WeaponTunables,
    pub loot: LootTunables,
    pub particles: ParticleTunables,
    pub progression: ProgressionTunables,
    pub hud: HudTunables,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaTunables {
    pub width: f32,
    pub height: f32,
    /// Projectiles further than this outside the arena are culled.
    pub cull_margin: f32,
}

impl Default for ArenaTunables {
    fn default() -> Self {
        Self { width: 1280.0, height: 720.0, cull_margin: 50.0 }
    }
}

impl ArenaTunables {
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockTunables {
    /// Upper bound on one tick's delta, in seconds.
    pub dt_cap: f32,
}

impl Default for ClockTunables {
    fn default() -> Self {
        Self { dt_cap: 0.1 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTunables {
    pub size: f32,
    pub max_hp: f32,
    pub strength: u32,
    pub speed: f32,
    pub weapon_level: u32,
}

impl Default for PlayerTunables {
    fn default() -> Self {
        Self { size: 20.0, max_hp: 100.0, strength: 3, speed: 180.0, weapon_level: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZombieTunables {
    pub size: f32,
    pub base_hp: f32,
    pub hp_per_stage: f32,
    pub base_speed: f32,
    pub speed_per_stage: f32,
    pub base_damage: f32,
    /// Contact damage grows by one every this many stages.
    pub stages_per_damage_step: u32,
}

impl Default for ZombieTunables {
    fn default() -> Self {
        Self {
            size: 24.0,
            base_hp: 10.0,
            hp_per_stage: 2.0,
            base_speed: 50.0,
            speed_per_stage: 0.5,
            base_damage: 5.0,
            stages_per_damage_step: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTunables {
    pub size: f32,
    pub hp: f32,
    pub speed: f32,
    pub damage: f32,
    /// Vertical speed while descending into the arena.
    pub entry_speed: f32,
    /// The boss engages once its centre reaches this `y`.
    pub entry_y: f32,
}

impl Default for BossTunables {
    fn default() -> Self {
        Self { size: 60.0, hp: 5000.0, speed: 80.0, damage: 20.0, entry_speed: 60.0, entry_y: 80.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTunables {
    pub base_interval: f32,
    pub interval_step_per_stage: f32,
    pub min_interval: f32,
    /// One extra enemy per wave every this many stages.
    pub stages_per_extra_enemy: u32,
}

impl Default for SpawnTunables {
    fn default() -> Self {
        Self { base_interval: 1.0, interval_step_per_stage: 0.008, min_interval: 0.1, stages_per_extra_enemy: 20 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTunables {
    pub base_fire_interval: f32,
    pub fire_interval_step_per_level: f32,
    pub min_fire_interval: f32,
    pub range: f32,
    pub projectile_size: f32,
    pub projectile_speed: f32,
    pub projectile_life: f32,
    /// Gap between the two parallel shots at weapon level 2.
    pub parallel_spacing: f32,
    /// Angle of the outer shots at weapon level 3+, in radians.
    pub spread_angle: f32,
}

impl Default for WeaponTunables {
    fn default() -> Self {
        Self {
            base_fire_interval: 0.5,
            fire_interval_step_per_level: 0.05,
            min_fire_interval: 0.1,
            range: 400.0,
            projectile_size: 8.0,
            projectile_speed: 400.0,
            projectile_life: 2.0,
            parallel_spacing: 6.0,
            spread_angle: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LootTunables {
    pub kill_score: u32,
    pub drop_chance: f64,
    /// Relative weights for heal / strength / weapon drops.
    pub heal_weight: f32,
    pub strength_weight: f32,
    pub weapon_weight: f32,
    pub heal_value: f32,
    pub strength_value: f32,
    pub weapon_value: f32,
    pub item_size: f32,
    pub item_life: f32,
    pub fall_speed: f32,
    pub magnet_radius: f32,
    /// Fraction of the remaining distance closed per second inside the magnet radius.
    pub magnet_rate: f32,
}

impl Default for LootTunables {
    fn default() -> Self {
        Self {
            kill_score: 10,
            drop_chance: 0.2,
            heal_weight: 0.6,
            strength_weight: 0.3,
            weapon_weight: 0.1,
            heal_value: 20.0,
            strength_value: 1.0,
            weapon_value: 1.0,
            item_size: 15.0,
            item_life: 15.0,
            fall_speed: 20.0,
            magnet_radius: 100.0,
            magnet_rate: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleTunables {
    pub hit_burst: u32,
    pub death_burst: u32,
    pub life: f32,
    pub max_speed: f32,
    pub min_size: f32,
    pub max_size: f32,
}

impl Default for ParticleTunables {
    fn default() -> Self {
        Self { hit_burst: 3, death_burst: 5, life: 0.5, max_speed: 100.0, min_size: 2.0, max_size: 6.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionTunables {
    pub seconds_per_stage: f32,
    pub max_stage: u32,
}

impl Default for ProgressionTunables {
    fn default() -> Self {
        Self { seconds_per_stage: 15.0, max_stage: 100 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudTunables {
    /// Minimum wall time between two HUD publications, in seconds.
    pub publish_interval: f32,
}

impl Default for HudTunables {
    fn default() -> Self {
        Self { publish_interval: 0.1 }
    }
}

impl Tunables {
    pub fn from_json_str(json: &str) -> Result<Self, TunablesError> {
        let tunables: Self = serde_json::from_str(json)?;
        tunables.validate()?;
        Ok(tunables)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TunablesError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| TunablesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), TunablesError> {
        fn positive(field: &'static str, v: f32) -> Result<(), TunablesError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(TunablesError::Invalid { field, reason: "must be a positive number" })
            }
        }

        positive("arena.width", self.arena.width)?;
        positive("arena.height", self.arena.height)?;
        positive("clock.dt_cap", self.clock.dt_cap)?;
        positive("player.size", self.player.size)?;
        positive("player.max_hp", self.player.max_hp)?;
        positive("player.speed", self.player.speed)?;
        positive("spawn.min_interval", self.spawn.min_interval)?;
        positive("weapon.min_fire_interval", self.weapon.min_fire_interval)?;
        positive("weapon.range", self.weapon.range)?;
        positive("weapon.projectile_speed", self.weapon.projectile_speed)?;
        positive("progression.seconds_per_stage", self.progression.seconds_per_stage)?;
        positive("hud.publish_interval", self.hud.publish_interval)?;

        if self.progression.max_stage == 0 {
            return Err(TunablesError::Invalid { field: "progression.max_stage", reason: "must be at least 1" });
        }
        if self.zombie.stages_per_damage_step == 0 {
            return Err(TunablesError::Invalid { field: "zombie.stages_per_damage_step", reason: "must be at least 1" });
        }
        if self.spawn.stages_per_extra_enemy == 0 {
            return Err(TunablesError::Invalid { field: "spawn.stages_per_extra_enemy", reason: "must be at least 1" });
        }
        if !(0.0..=1.0).contains(&self.loot.drop_chance) {
            return Err(TunablesError::Invalid { field: "loot.drop_chance", reason: "must be within [0, 1]" });
        }
        let p = &self.particles;
        if p.max_speed < 0.0 || p.min_size < 0.0 || p.min_size > p.max_size {
            return Err(TunablesError::Invalid { field: "particles", reason: "sizes and speed must form valid ranges" });
        }
        let weights = [self.loot.heal_weight, self.loot.strength_weight, self.loot.weapon_weight];
        if weights.iter().any(|w| *w < 0.0) || weights.iter().sum::<f32>() <= 0.0 {
            return Err(TunablesError::Invalid { field: "loot.*_weight", reason: "must be non-negative with a positive sum" });
        }
        Ok(())
    }
}
