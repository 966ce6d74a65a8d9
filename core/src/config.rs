//! Immutable tuning shared by the world, systems and adapters.
//!
//! A [`GameConfig`] is built once at startup, either from defaults or from a
//! TOML document, validated, and then passed by reference. Every section
//! carries `#[serde(default)]` so partial documents only override the values
//! they name.

use std::{fs, path::Path};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BossTier, EnemyKind, PickupRarity};

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration from {path}")]
    Io {
        /// Path that failed to load.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration document is not valid TOML for this schema.
    #[error("failed to parse configuration")]
    Parse(#[from] toml::de::Error),
    /// The playfield has no area.
    #[error("playfield must have a positive size (received {width}x{height})")]
    InvalidPlayfield {
        /// Configured width.
        width: f32,
        /// Configured height.
        height: f32,
    },
    /// A knockback-resistance factor lies outside `0.0..=1.0`.
    #[error("knockback resistance `{field}` must lie within 0..=1 (received {value})")]
    ResistanceOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Configured value.
        value: f32,
    },
    /// A cooldown or lifetime that must tick at least once is zero.
    #[error("`{field}` must be at least one tick")]
    ZeroTicks {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A rate that must be positive is zero or negative.
    #[error("`{field}` must be positive")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A boss wave lies beyond the final wave.
    #[error("boss wave {wave} lies beyond the final wave {final_wave}")]
    BossWaveOutOfRange {
        /// Offending boss wave.
        wave: u32,
        /// Configured final wave.
        final_wave: u32,
    },
    /// The final wave must be a boss wave so the campaign can end in victory.
    #[error("final wave {final_wave} is not a boss wave")]
    FinalWaveWithoutBoss {
        /// Configured final wave.
        final_wave: u32,
    },
    /// An enemy speed range is inverted or negative.
    #[error("speed range of {kind:?} enemies is invalid ({min}..={max})")]
    InvalidSpeedRange {
        /// Offending variant.
        kind: EnemyKind,
        /// Configured lower bound.
        min: f32,
        /// Configured upper bound.
        max: f32,
    },
    /// All weights of a weighted draw are zero.
    #[error("weights for `{table}` sum to zero")]
    EmptyWeights {
        /// Name of the weight table.
        table: &'static str,
    },
}

/// Complete tuning for a session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Screen-space playfield and tick rate.
    pub playfield: PlayfieldConfig,
    /// Player body and movement.
    pub player: PlayerTuning,
    /// Regular enemy variants.
    pub enemies: EnemyTable,
    /// Boss tiers.
    pub bosses: BossTable,
    /// Melee attacks and contact interactions.
    pub combat: CombatTuning,
    /// Summonable mount.
    pub mount: MountTuning,
    /// Area cloud attack.
    pub cloud: CloudTuning,
    /// Wave progression.
    pub waves: WaveTuning,
    /// Healing pickups.
    pub pickups: PickupTuning,
    /// Boss portal animation.
    pub portal: PortalTuning,
    /// Victory sequence.
    pub victory: VictoryTuning,
}

impl GameConfig {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Checks the invariants the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let playfield = &self.playfield;
        if playfield.width <= 0.0 || playfield.height <= 0.0 {
            return Err(ConfigError::InvalidPlayfield {
                width: playfield.width,
                height: playfield.height,
            });
        }

        check_resistance("player.knockback_resistance", self.player.knockback_resistance)?;
        for kind in EnemyKind::ALL {
            let tuning = self.enemy(kind);
            check_resistance("enemies.knockback_resistance", tuning.knockback_resistance)?;
            if tuning.speed_min < 0.0 || tuning.speed_min > tuning.speed_max {
                return Err(ConfigError::InvalidSpeedRange {
                    kind,
                    min: tuning.speed_min,
                    max: tuning.speed_max,
                });
            }
        }
        check_resistance(
            "bosses.warden.knockback_resistance",
            self.bosses.warden.knockback_resistance,
        )?;
        check_resistance(
            "bosses.overlord.knockback_resistance",
            self.bosses.overlord.knockback_resistance,
        )?;

        check_ticks("playfield.ticks_per_second", playfield.ticks_per_second)?;
        check_ticks("combat.punch.cooldown_ticks", self.combat.punch.cooldown_ticks)?;
        check_ticks("combat.kick.cooldown_ticks", self.combat.kick.cooldown_ticks)?;
        check_ticks("cloud.cooldown_ticks", self.cloud.cooldown_ticks)?;
        check_ticks("cloud.lifetime_ticks", self.cloud.lifetime_ticks)?;
        check_ticks("mount.lifetime_ticks", self.mount.lifetime_ticks)?;
        check_ticks("bosses.warden.attack_cooldown_ticks", self.bosses.warden.attack_cooldown_ticks)?;
        check_ticks(
            "bosses.overlord.attack_cooldown_ticks",
            self.bosses.overlord.attack_cooldown_ticks,
        )?;
        check_ticks("waves.min_interval_ticks", self.waves.min_interval_ticks)?;
        check_ticks("waves.max_burst", self.waves.max_burst)?;
        if self.portal.growth <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "portal.growth",
            });
        }
        check_ticks("combat.swing_frames", self.combat.swing_frames)?;

        let final_wave = self.waves.final_wave;
        for boss_wave in &self.waves.boss_waves {
            if boss_wave.wave == 0 || boss_wave.wave > final_wave {
                return Err(ConfigError::BossWaveOutOfRange {
                    wave: boss_wave.wave,
                    final_wave,
                });
            }
        }
        if self.boss_for_wave(final_wave).is_none() {
            return Err(ConfigError::FinalWaveWithoutBoss { final_wave });
        }

        let rarity_total: u32 = PickupRarity::ALL
            .iter()
            .map(|rarity| self.pickups.rarity(*rarity).weight)
            .sum();
        if rarity_total == 0 {
            return Err(ConfigError::EmptyWeights { table: "pickups" });
        }

        Ok(())
    }

    /// Boss tier summoned on `wave`, if it is a boss wave.
    #[must_use]
    pub fn boss_for_wave(&self, wave: u32) -> Option<BossTier> {
        self.waves
            .boss_waves
            .iter()
            .find(|boss_wave| boss_wave.wave == wave)
            .map(|boss_wave| boss_wave.tier)
    }

    /// Reports whether `wave` is the last wave of the campaign.
    #[must_use]
    pub const fn is_final_wave(&self, wave: u32) -> bool {
        wave >= self.waves.final_wave
    }

    /// Tuning for an enemy variant.
    #[must_use]
    pub const fn enemy(&self, kind: EnemyKind) -> &EnemyTuning {
        match kind {
            EnemyKind::Basic => &self.enemies.basic,
            EnemyKind::Fast => &self.enemies.fast,
            EnemyKind::Gunner => &self.enemies.gunner,
        }
    }

    /// Tuning for a boss tier.
    #[must_use]
    pub const fn boss(&self, tier: BossTier) -> &BossTuning {
        match tier {
            BossTier::Warden => &self.bosses.warden,
            BossTier::Overlord => &self.bosses.overlord,
        }
    }

    /// Centre of the playfield.
    #[must_use]
    pub fn playfield_centre(&self) -> Vec2 {
        Vec2::new(self.playfield.width * 0.5, self.playfield.height * 0.5)
    }
}

fn check_resistance(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ResistanceOutOfRange { field, value })
    }
}

fn check_ticks(field: &'static str, value: u32) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::ZeroTicks { field })
    } else {
        Ok(())
    }
}

/// Screen-space playfield description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayfieldConfig {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Target tick rate; one tick per rendered frame.
    pub ticks_per_second: u32,
    /// Distance enemies may travel past the edge before they count as escaped.
    pub escape_margin: f32,
}

impl Default for PlayfieldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            ticks_per_second: 60,
            escape_margin: 20.0,
        }
    }
}

/// Player body and movement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Body size in pixels.
    pub size: Vec2,
    /// Spawn position of the top-left corner.
    pub spawn: Vec2,
    /// Maximum and starting health.
    pub max_health: u32,
    /// Top walking speed in pixels per tick.
    pub speed: f32,
    /// Share of the target speed blended into velocity each tick.
    pub acceleration: f32,
    /// Velocity damping applied each tick.
    pub knockback_resistance: f32,
    /// Length of the stained window after projectile hits and escape penalties.
    pub stain_ticks: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            size: Vec2::new(60.0, 80.0),
            spawn: Vec2::new(200.0, 300.0),
            max_health: 100,
            speed: 5.0,
            acceleration: 0.1,
            knockback_resistance: 0.8,
            stain_ticks: 60,
        }
    }
}

/// Per-variant enemy tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTable {
    /// Baseline walker.
    pub basic: EnemyTuning,
    /// Quick walker.
    pub fast: EnemyTuning,
    /// Ranged walker.
    pub gunner: EnemyTuning,
    /// Gunner firing parameters.
    pub gunfire: GunnerTuning,
}

/// Tuning shared by every regular enemy variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// Body size in pixels.
    pub size: Vec2,
    /// Maximum and starting health.
    pub max_health: u32,
    /// Lower bound of the sampled base speed.
    pub speed_min: f32,
    /// Upper bound of the sampled base speed.
    pub speed_max: f32,
    /// Velocity damping applied each tick.
    pub knockback_resistance: f32,
    /// Share of the velocity steered toward the player each tick.
    pub homing: f32,
    /// Colour tag used when no sprite is available.
    pub color: [u8; 3],
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            size: Vec2::new(50.0, 60.0),
            max_health: 30,
            speed_min: 2.0,
            speed_max: 3.0,
            knockback_resistance: 0.9,
            homing: 0.05,
            color: [0xf0, 0xf0, 0xf0],
        }
    }
}

impl Default for EnemyTable {
    fn default() -> Self {
        Self {
            basic: EnemyTuning::default(),
            fast: EnemyTuning {
                size: Vec2::new(40.0, 48.0),
                max_health: 20,
                speed_min: 4.0,
                speed_max: 5.0,
                knockback_resistance: 0.92,
                homing: 0.08,
                color: [0x7f, 0xd6, 0xff],
            },
            gunner: EnemyTuning {
                size: Vec2::new(55.0, 65.0),
                max_health: 40,
                speed_min: 1.5,
                speed_max: 2.0,
                knockback_resistance: 0.85,
                homing: 0.03,
                color: [0xff, 0xb3, 0x47],
            },
            gunfire: GunnerTuning::default(),
        }
    }
}

/// Gunner firing parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GunnerTuning {
    /// Ticks between shots.
    pub reload_ticks: u32,
    /// Maximum distance to the player at which the gunner fires.
    pub range: f32,
    /// Projectile speed in pixels per tick.
    pub projectile_speed: f32,
    /// Projectile lifetime in ticks.
    pub projectile_lifetime: u32,
    /// Damage dealt by a projectile hit.
    pub projectile_damage: u32,
}

impl Default for GunnerTuning {
    fn default() -> Self {
        Self {
            reload_ticks: 90,
            range: 350.0,
            projectile_speed: 5.0,
            projectile_lifetime: 120,
            projectile_damage: 8,
        }
    }
}

/// Per-tier boss tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTable {
    /// Mid-campaign boss.
    pub warden: BossTuning,
    /// Final boss.
    pub overlord: BossTuning,
}

impl Default for BossTable {
    fn default() -> Self {
        Self {
            warden: BossTuning::default(),
            overlord: BossTuning {
                name: "Porcelain Overlord".to_owned(),
                size: Vec2::new(125.0, 150.0),
                visual_scale: 2.5,
                max_health: 400,
                speed: 2.0,
                charge_speed: 10.0,
                projectile_count: 12,
                projectile_damage: 12,
                contact_damage: 7,
                kill_bonus: 2500,
                ..BossTuning::default()
            },
        }
    }
}

/// Tuning for a single boss tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    /// Display name shown on the boss health bar.
    pub name: String,
    /// Body size in pixels.
    pub size: Vec2,
    /// Sprite scale relative to a regular enemy.
    pub visual_scale: f32,
    /// Maximum and starting health.
    pub max_health: u32,
    /// Homing speed in pixels per tick.
    pub speed: f32,
    /// Dash speed of the charge phase.
    pub charge_speed: f32,
    /// Share of the velocity steered toward the player each tick.
    pub homing: f32,
    /// Velocity damping applied each tick.
    pub knockback_resistance: f32,
    /// Ticks between attack phases.
    pub attack_cooldown_ticks: u32,
    /// Projectiles fired by the ranged phase.
    pub projectile_count: u32,
    /// Projectile speed in pixels per tick.
    pub projectile_speed: f32,
    /// Projectile lifetime in ticks.
    pub projectile_lifetime: u32,
    /// Damage dealt by a projectile hit.
    pub projectile_damage: u32,
    /// Damage dealt on body contact.
    pub contact_damage: u32,
    /// Centre distance below which body contact occurs.
    pub contact_radius: f32,
    /// Knockback applied to the player on contact.
    pub contact_knockback: f32,
    /// Score credited when the boss is defeated.
    pub kill_bonus: u64,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            name: "Porcelain Warden".to_owned(),
            size: Vec2::new(100.0, 120.0),
            visual_scale: 2.0,
            max_health: 200,
            speed: 1.5,
            charge_speed: 8.0,
            homing: 0.05,
            knockback_resistance: 0.9,
            attack_cooldown_ticks: 120,
            projectile_count: 8,
            projectile_speed: 4.0,
            projectile_lifetime: 150,
            projectile_damage: 10,
            contact_damage: 5,
            contact_radius: 70.0,
            contact_knockback: 14.0,
            kill_bonus: 1000,
        }
    }
}

/// Tuning of a single melee attack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackTuning {
    /// Ticks before the attack can be used again.
    pub cooldown_ticks: u32,
    /// Half extents of the axis-aligned reach around the player.
    pub reach: Vec2,
    /// Damage dealt to each target in reach.
    pub damage: u32,
    /// Knockback magnitude against regular enemies.
    pub knockback: f32,
    /// Knockback magnitude against bosses.
    pub boss_knockback: f32,
}

impl Default for AttackTuning {
    fn default() -> Self {
        Self {
            cooldown_ticks: 20,
            reach: Vec2::new(120.0, 100.0),
            damage: 15,
            knockback: 40.0,
            boss_knockback: 10.0,
        }
    }
}

/// Melee attacks and contact interactions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    /// Punch tuning.
    pub punch: AttackTuning,
    /// Kick tuning.
    pub kick: AttackTuning,
    /// Frames an attack swing stays visible.
    pub swing_frames: u32,
    /// Hit-flash window applied to struck actors.
    pub hit_flash_ticks: u32,
    /// Score credited for a regular enemy kill.
    pub enemy_kill_bonus: u64,
    /// Mount charge gained per point of melee damage.
    pub charge_per_damage: f32,
    /// Extra damage-equivalent credited to the meter for a melee kill.
    pub kill_charge_bonus: f32,
    /// Damage dealt to the player when an enemy escapes the playfield.
    pub escape_penalty: u32,
    /// Knockback applied to the player on an escape penalty.
    pub escape_knockback: f32,
    /// Centre distance below which an enemy touches the player.
    pub contact_radius: f32,
    /// Damage dealt to the player by enemy contact.
    pub contact_damage: u32,
    /// Knockback applied to the player by enemy contact.
    pub contact_knockback: f32,
    /// Share of the contact knockback returned to the enemy.
    pub contact_rebound: f32,
    /// Centre distance below which a projectile hits the player.
    pub projectile_hit_radius: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            punch: AttackTuning::default(),
            kick: AttackTuning {
                cooldown_ticks: 30,
                reach: Vec2::new(150.0, 100.0),
                damage: 20,
                knockback: 50.0,
                boss_knockback: 12.0,
            },
            swing_frames: 10,
            hit_flash_ticks: 10,
            enemy_kill_bonus: 100,
            charge_per_damage: 0.5,
            kill_charge_bonus: 25.0,
            escape_penalty: 20,
            escape_knockback: 8.0,
            contact_radius: 40.0,
            contact_damage: 3,
            contact_knockback: 12.0,
            contact_rebound: 0.8,
            projectile_hit_radius: 30.0,
        }
    }
}

impl CombatTuning {
    /// Tuning for the requested melee attack.
    #[must_use]
    pub const fn attack(&self, kind: crate::AttackKind) -> &AttackTuning {
        match kind {
            crate::AttackKind::Punch => &self.punch,
            crate::AttackKind::Kick => &self.kick,
        }
    }
}

/// Summonable mount.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountTuning {
    /// Body size in pixels.
    pub size: Vec2,
    /// Speed in pixels per tick.
    pub speed: f32,
    /// Lifetime in ticks.
    pub lifetime_ticks: u32,
    /// Contact damage per hit.
    pub damage: u32,
    /// Centre distance below which the mount touches a target.
    pub contact_radius: f32,
    /// Ticks before the same target can be hit again.
    pub contact_cooldown_ticks: u32,
    /// Meter value required to summon.
    pub max_charge: f32,
}

impl Default for MountTuning {
    fn default() -> Self {
        Self {
            size: Vec2::new(70.0, 60.0),
            speed: 8.0,
            lifetime_ticks: 20 * 60,
            damage: 25,
            contact_radius: 60.0,
            contact_cooldown_ticks: 20,
            max_charge: 100.0,
        }
    }
}

/// Area cloud attack.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudTuning {
    /// Ticks before another cloud can be released.
    pub cooldown_ticks: u32,
    /// Radius at release.
    pub initial_radius: f32,
    /// Radius gained per tick.
    pub growth: f32,
    /// Radius cap.
    pub max_radius: f32,
    /// Lifetime in ticks.
    pub lifetime_ticks: u32,
    /// Damage dealt to each overlapping actor per tick.
    pub damage: u32,
    /// Outward knockback applied per tick.
    pub knockback: f32,
}

impl Default for CloudTuning {
    fn default() -> Self {
        Self {
            cooldown_ticks: 60,
            initial_radius: 10.0,
            growth: 4.0,
            max_radius: 120.0,
            lifetime_ticks: 45,
            damage: 1,
            knockback: 3.0,
        }
    }
}

/// Wave number that summons a boss instead of regular spawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossWave {
    /// Wave number.
    pub wave: u32,
    /// Tier summoned.
    pub tier: BossTier,
}

/// Wave progression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    /// Last wave of the campaign; must be a boss wave.
    pub final_wave: u32,
    /// Waves that summon bosses.
    pub boss_waves: Vec<BossWave>,
    /// Enemies spawned per wave number on regular waves.
    pub enemies_per_wave: u32,
    /// Spawn interval of wave one.
    pub base_interval_ticks: u32,
    /// Interval reduction per wave.
    pub interval_step_ticks: u32,
    /// Interval floor.
    pub min_interval_ticks: u32,
    /// Waves per additional enemy in a burst.
    pub burst_step: u32,
    /// Burst cap.
    pub max_burst: u32,
    /// Length of the wave announcement interstitial.
    pub announcement_ticks: u32,
    /// Minions spawned by a boss summon phase.
    pub minion_count: u32,
    /// Weighted draw of enemy variants.
    pub weights: SpawnWeights,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            final_wave: 10,
            boss_waves: vec![
                BossWave {
                    wave: 5,
                    tier: BossTier::Warden,
                },
                BossWave {
                    wave: 10,
                    tier: BossTier::Overlord,
                },
            ],
            enemies_per_wave: 3,
            base_interval_ticks: 180,
            interval_step_ticks: 15,
            min_interval_ticks: 60,
            burst_step: 3,
            max_burst: 3,
            announcement_ticks: 120,
            minion_count: 2,
            weights: SpawnWeights::default(),
        }
    }
}

/// Weight curves for the enemy variant draw.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnWeights {
    /// Basic weight on wave zero.
    pub basic_base: u32,
    /// Basic weight lost per wave.
    pub basic_step: u32,
    /// Basic weight floor.
    pub basic_floor: u32,
    /// First wave that may spawn fast enemies.
    pub fast_from_wave: u32,
    /// Fast weight per wave number.
    pub fast_step: u32,
    /// First wave that may spawn gunners.
    pub gunner_from_wave: u32,
    /// Gunner weight per wave number.
    pub gunner_step: u32,
}

impl Default for SpawnWeights {
    fn default() -> Self {
        Self {
            basic_base: 100,
            basic_step: 8,
            basic_floor: 20,
            fast_from_wave: 2,
            fast_step: 6,
            gunner_from_wave: 3,
            gunner_step: 5,
        }
    }
}

impl SpawnWeights {
    /// Weight of `kind` on `wave`.
    #[must_use]
    pub fn weight(&self, kind: EnemyKind, wave: u32) -> u32 {
        match kind {
            EnemyKind::Basic => self
                .basic_base
                .saturating_sub(self.basic_step.saturating_mul(wave))
                .max(self.basic_floor),
            EnemyKind::Fast if wave >= self.fast_from_wave => self.fast_step.saturating_mul(wave),
            EnemyKind::Gunner if wave >= self.gunner_from_wave => {
                self.gunner_step.saturating_mul(wave)
            }
            EnemyKind::Fast | EnemyKind::Gunner => 0,
        }
    }
}

/// Heal and draw weight of a pickup rarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RarityTuning {
    /// Relative draw weight.
    pub weight: u32,
    /// Health restored on collection.
    pub heal: u32,
}

/// Healing pickups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupTuning {
    /// Probability that a defeated enemy drops a pickup.
    pub drop_chance: f64,
    /// Ticks before an uncollected pickup vanishes.
    pub lifetime_ticks: u32,
    /// Centre distance below which the player collects a pickup.
    pub collect_radius: f32,
    /// Body size in pixels.
    pub size: Vec2,
    /// Common tier.
    pub common: RarityTuning,
    /// Rare tier.
    pub rare: RarityTuning,
    /// Epic tier.
    pub epic: RarityTuning,
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            drop_chance: 0.25,
            lifetime_ticks: 600,
            collect_radius: 45.0,
            size: Vec2::new(24.0, 24.0),
            common: RarityTuning {
                weight: 70,
                heal: 10,
            },
            rare: RarityTuning {
                weight: 25,
                heal: 25,
            },
            epic: RarityTuning {
                weight: 5,
                heal: 50,
            },
        }
    }
}

impl PickupTuning {
    /// Tuning for a rarity tier.
    #[must_use]
    pub const fn rarity(&self, rarity: PickupRarity) -> RarityTuning {
        match rarity {
            PickupRarity::Common => self.common,
            PickupRarity::Rare => self.rare,
            PickupRarity::Epic => self.epic,
        }
    }
}

/// Boss portal animation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalTuning {
    /// Fully open radius.
    pub max_radius: f32,
    /// Radius change per tick.
    pub growth: f32,
    /// Per-tick probability of emitting a particle.
    pub particle_chance: f64,
    /// Particle lifetime in ticks.
    pub particle_lifetime: u32,
}

impl Default for PortalTuning {
    fn default() -> Self {
        Self {
            max_radius: 100.0,
            growth: 2.0,
            particle_chance: 0.3,
            particle_lifetime: 30,
        }
    }
}

/// Victory sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VictoryTuning {
    /// Length of the opening announcement.
    pub announcement_ticks: u32,
    /// Length of the scripted walk.
    pub walk_ticks: u32,
    /// Top-left corner the player walks to.
    pub destination: Vec2,
}

impl Default for VictoryTuning {
    fn default() -> Self {
        Self {
            announcement_ticks: 180,
            walk_ticks: 240,
            destination: Vec2::new(640.0, 260.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        GameConfig::default()
            .validate()
            .expect("default configuration must be valid");
    }

    #[test]
    fn partial_documents_keep_remaining_defaults() {
        let config = GameConfig::from_toml_str(
            r#"
                [combat.punch]
                damage = 18

                [waves]
                final_wave = 5
                boss_waves = [{ wave = 5, tier = "Overlord" }]
            "#,
        )
        .expect("partial document should parse");

        assert_eq!(config.combat.punch.damage, 18);
        assert_eq!(config.combat.punch.cooldown_ticks, 20);
        assert_eq!(config.combat.kick.damage, 20);
        assert_eq!(config.waves.final_wave, 5);
        assert_eq!(config.boss_for_wave(5), Some(BossTier::Overlord));
        assert_eq!(config.playfield.width, 800.0);
    }

    #[test]
    fn final_wave_must_summon_a_boss() {
        let error = GameConfig::from_toml_str(
            r#"
                [waves]
                final_wave = 7
                boss_waves = [{ wave = 5, tier = "Warden" }]
            "#,
        )
        .expect_err("final wave 7 has no boss");

        assert!(matches!(
            error,
            ConfigError::FinalWaveWithoutBoss { final_wave: 7 }
        ));
    }

    #[test]
    fn resistance_outside_unit_range_is_rejected() {
        let mut config = GameConfig::default();
        config.player.knockback_resistance = 1.5;

        let error = config.validate().expect_err("resistance above one");
        assert!(matches!(error, ConfigError::ResistanceOutOfRange { .. }));
    }

    #[test]
    fn zero_cooldowns_are_rejected() {
        let mut config = GameConfig::default();
        config.combat.kick.cooldown_ticks = 0;

        let error = config.validate().expect_err("zero kick cooldown");
        assert!(matches!(
            error,
            ConfigError::ZeroTicks {
                field: "combat.kick.cooldown_ticks"
            }
        ));
    }

    #[test]
    fn spawn_weights_shift_toward_tougher_variants() {
        let weights = SpawnWeights::default();

        assert_eq!(weights.weight(EnemyKind::Fast, 1), 0);
        assert_eq!(weights.weight(EnemyKind::Gunner, 2), 0);
        assert!(weights.weight(EnemyKind::Basic, 9) < weights.weight(EnemyKind::Basic, 1));
        assert!(weights.weight(EnemyKind::Gunner, 9) > weights.weight(EnemyKind::Gunner, 3));
        assert_eq!(weights.weight(EnemyKind::Basic, 50), weights.basic_floor);
    }

    #[test]
    fn unreadable_file_reports_path() {
        let error = GameConfig::load("definitely/missing/config.toml")
            .expect_err("missing file must fail");
        assert!(error.to_string().contains("definitely/missing/config.toml"));
    }
}
