#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Swamp Brawler engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. The simulation submits [`Command`]
//! values describing desired mutations, the world executes those commands via
//! its `apply` entry point, and then broadcasts [`Event`] values for systems
//! to react to deterministically. Systems consume event streams, query
//! immutable snapshots, and respond exclusively with new command batches.

pub mod config;

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use config::{ConfigError, GameConfig};

/// Canonical title shown on the title screen and the window caption.
pub const GAME_TITLE: &str = "Swamp Brawler";

/// Top-level screen states driven by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenState {
    /// Title card waiting for the start input.
    Title,
    /// Interstitial that announces the upcoming wave.
    WaveAnnouncement,
    /// Portal sequence that summons a boss.
    BossIntro,
    /// Regular gameplay.
    Playing,
    /// Frozen gameplay with a pause overlay.
    Paused,
    /// Terminal defeat screen that accepts a restart.
    GameOver,
    /// Scripted victory sequence after the final boss falls.
    Victory,
}

impl ScreenState {
    /// Reports whether the playfield entities should be drawn in this state.
    #[must_use]
    pub const fn shows_playfield(self) -> bool {
        matches!(
            self,
            Self::Playing | Self::Paused | Self::BossIntro | Self::Victory
        )
    }
}

/// Horizontal direction a character faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Facing toward decreasing x.
    Left,
    /// Facing toward increasing x.
    #[default]
    Right,
}

impl Facing {
    /// Unit sign along the x axis.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Regular enemy variants spawned by the wave director.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Baseline walker.
    Basic,
    /// Fragile but quick walker.
    Fast,
    /// Slow walker that fires aimed projectiles.
    Gunner,
}

impl EnemyKind {
    /// Every enemy kind in draw-table order.
    pub const ALL: [EnemyKind; 3] = [Self::Basic, Self::Fast, Self::Gunner];
}

/// Boss tiers summoned on designated waves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossTier {
    /// Mid-campaign boss.
    Warden,
    /// Final boss.
    Overlord,
}

/// Phases of the boss attack cycle, advanced once per cooldown expiry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossPattern {
    /// Dash toward the player.
    Charge,
    /// Ask the wave director for minions.
    SpawnMinions,
    /// Fire a radial fan of projectiles.
    Ranged,
}

impl BossPattern {
    /// Phase that follows `self` in the cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Charge => Self::SpawnMinions,
            Self::SpawnMinions => Self::Ranged,
            Self::Ranged => Self::Charge,
        }
    }
}

/// Melee attacks available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    /// Short, quick swing.
    Punch,
    /// Longer, slower swing.
    Kick,
}

/// Origin of a damage application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrikeSource {
    /// Player punch.
    Punch,
    /// Player kick.
    Kick,
    /// Area cloud tick.
    Cloud,
    /// Mount contact.
    Mount,
}

impl StrikeSource {
    /// Reports whether damage from this source fills the mount meter.
    #[must_use]
    pub const fn charges_mount(self) -> bool {
        matches!(self, Self::Punch | Self::Kick)
    }
}

impl From<AttackKind> for StrikeSource {
    fn from(kind: AttackKind) -> Self {
        match kind {
            AttackKind::Punch => Self::Punch,
            AttackKind::Kick => Self::Kick,
        }
    }
}

/// Rarity tiers of healing pickups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PickupRarity {
    /// Frequent, small heal.
    Common,
    /// Occasional, medium heal.
    Rare,
    /// Scarce, large heal.
    Epic,
}

impl PickupRarity {
    /// Every rarity in draw-table order.
    pub const ALL: [PickupRarity; 3] = [Self::Common, Self::Rare, Self::Epic];
}

/// Edge of the playfield an enemy enters from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnSide {
    /// Enters moving left.
    Right,
    /// Enters moving down.
    Top,
    /// Enters moving right.
    Left,
    /// Enters moving up.
    Bottom,
}

impl SpawnSide {
    /// Every side in draw order.
    pub const ALL: [SpawnSide; 4] = [Self::Right, Self::Top, Self::Left, Self::Bottom];
}

/// Where a newly requested enemy should appear.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SpawnOrigin {
    /// Just outside the given playfield edge, moving inward.
    Edge(SpawnSide),
    /// At a fixed position with zero initial velocity.
    At(Vec2),
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a hostile projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PickupId(u32);

impl PickupId {
    /// Creates a new pickup identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Anything the player can damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TargetId {
    /// A regular enemy.
    Enemy(EnemyId),
    /// The active boss.
    Boss,
}

/// Actor that fired a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileOwner {
    /// Fired by a gunner enemy.
    Enemy(EnemyId),
    /// Fired by the boss.
    Boss,
}

/// Per-tick input snapshot polled from the host.
///
/// Held flags reflect the key state during the tick, edge flags are only set
/// on the tick the key was pressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Desired movement direction, each axis in `-1.0..=1.0`.
    pub movement: Vec2,
    /// Punch key held.
    pub punch: bool,
    /// Kick key held.
    pub kick: bool,
    /// Cloud key held.
    pub cloud: bool,
    /// Mount summon key held.
    pub summon_mount: bool,
    /// Start or restart pressed this tick.
    pub confirm: bool,
    /// Pause toggle pressed this tick.
    pub pause: bool,
    /// Pointer position in playfield coordinates, if known.
    pub pointer: Option<Vec2>,
    /// Primary pointer button pressed this tick.
    pub click: bool,
}

/// Named sound effects requested by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SoundCue {
    /// Punch swing.
    Punch,
    /// Kick swing.
    Kick,
    /// Cloud release.
    Cloud,
    /// Any damage landing on an enemy or boss.
    Hit,
    /// Player took damage.
    Hurt,
    /// Enemy defeated.
    EnemyDefeated,
    /// Boss attack phase started.
    BossRoar,
    /// Boss defeated.
    BossDefeated,
    /// Pickup collected.
    Pickup,
    /// Mount summoned.
    MountSummon,
    /// Wave announced.
    WaveStart,
    /// Session lost.
    GameOver,
    /// Session won.
    Victory,
}

impl SoundCue {
    /// Every cue, used to resolve sound manifests.
    pub const ALL: [SoundCue; 13] = [
        Self::Punch,
        Self::Kick,
        Self::Cloud,
        Self::Hit,
        Self::Hurt,
        Self::EnemyDefeated,
        Self::BossRoar,
        Self::BossDefeated,
        Self::Pickup,
        Self::MountSummon,
        Self::WaveStart,
        Self::GameOver,
        Self::Victory,
    ];
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances every entity by one tick.
    Tick {
        /// Player movement intent for the tick.
        movement: Vec2,
    },
    /// Starts a melee attack: resets its cooldown and spawns the swing effect.
    BeginAttack {
        /// Attack being performed.
        kind: AttackKind,
    },
    /// Applies damage and knockback to a target.
    Strike {
        /// Target receiving the strike.
        target: TargetId,
        /// Origin of the damage.
        source: StrikeSource,
        /// Damage applied before clamping at zero health.
        damage: u32,
        /// Velocity impulse added to the target.
        impulse: Vec2,
    },
    /// Releases an area cloud at the player's centre.
    ReleaseCloud,
    /// Summons the mount when the meter is full.
    SummonMount,
    /// Resolves body contact between the player and a target.
    Contact {
        /// Target touching the player.
        target: TargetId,
        /// Damage dealt to the player before clamping at zero health.
        damage: u32,
        /// Velocity impulse added to the player.
        impulse: Vec2,
        /// Velocity impulse added to the target.
        rebound: Vec2,
    },
    /// Resolves a hostile projectile hitting the player.
    ProjectileHit {
        /// Projectile that connected.
        projectile: ProjectileId,
    },
    /// Removes a hostile projectile without effect.
    DestroyProjectile {
        /// Projectile to remove.
        projectile: ProjectileId,
    },
    /// Collects a pickup and heals the player.
    CollectPickup {
        /// Pickup to collect.
        pickup: PickupId,
    },
    /// Requests a new enemy.
    SpawnEnemy {
        /// Variant to create.
        kind: EnemyKind,
        /// Placement of the new enemy.
        origin: SpawnOrigin,
    },
    /// Opens the boss portal at the playfield centre.
    OpenPortal {
        /// Boss tier summoned once the portal is fully open.
        tier: BossTier,
    },
    /// Advances the portal animation by one tick.
    AdvancePortal,
    /// Places the player at an absolute position, used by scripted sequences.
    PlacePlayer {
        /// Top-left corner of the player body.
        position: Vec2,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced one tick.
    TimeAdvanced {
        /// Tick index after advancing.
        tick: u64,
    },
    /// A melee attack started.
    AttackStarted {
        /// Attack performed.
        kind: AttackKind,
    },
    /// A target took damage.
    TargetStruck {
        /// Target that was struck.
        target: TargetId,
        /// Origin of the damage.
        source: StrikeSource,
        /// Damage dealt after clamping.
        damage: u32,
        /// Health remaining after the strike.
        remaining: u32,
    },
    /// An enemy was defeated and removed.
    EnemyDefeated {
        /// Identifier of the defeated enemy.
        enemy: EnemyId,
        /// Variant of the defeated enemy.
        kind: EnemyKind,
        /// Score credited for the kill.
        bonus: u64,
    },
    /// The boss was defeated and removed.
    BossDefeated {
        /// Tier of the defeated boss.
        tier: BossTier,
        /// Score credited for the kill.
        bonus: u64,
    },
    /// An enemy left the playfield and penalised the player.
    EnemyEscaped {
        /// Identifier of the escaped enemy.
        enemy: EnemyId,
        /// Damage dealt to the player.
        penalty: u32,
    },
    /// The player took damage.
    PlayerDamaged {
        /// Damage dealt after clamping.
        amount: u32,
        /// Health remaining.
        remaining: u32,
    },
    /// The player was healed.
    PlayerHealed {
        /// Health restored after clamping.
        amount: u32,
        /// Health after healing.
        remaining: u32,
    },
    /// An area cloud was released.
    CloudReleased,
    /// The mount was summoned.
    MountSummoned,
    /// The mount's lifetime elapsed.
    MountExpired,
    /// An enemy entered the world.
    EnemySpawned {
        /// Identifier allocated to the enemy.
        enemy: EnemyId,
        /// Variant spawned.
        kind: EnemyKind,
    },
    /// A hostile projectile was fired.
    ProjectileFired {
        /// Identifier allocated to the projectile.
        projectile: ProjectileId,
        /// Actor that fired it.
        owner: ProjectileOwner,
    },
    /// A hostile projectile was destroyed before expiring.
    ProjectileDestroyed {
        /// Identifier of the destroyed projectile.
        projectile: ProjectileId,
    },
    /// The boss executed an attack phase.
    BossSignaled {
        /// Phase executed.
        pattern: BossPattern,
        /// Top-left corner of the boss at the time of the signal.
        at: Vec2,
    },
    /// The boss portal started opening.
    PortalOpened {
        /// Tier being summoned.
        tier: BossTier,
    },
    /// The boss stepped out of the portal.
    BossSummoned {
        /// Tier summoned.
        tier: BossTier,
    },
    /// The portal collapsed completely.
    PortalClosed,
    /// A defeated enemy dropped a pickup.
    PickupDropped {
        /// Identifier allocated to the pickup.
        pickup: PickupId,
        /// Rarity drawn for the pickup.
        rarity: PickupRarity,
    },
    /// The player collected a pickup.
    PickupCollected {
        /// Identifier of the pickup.
        pickup: PickupId,
        /// Rarity of the pickup.
        rarity: PickupRarity,
    },
    /// The session score changed.
    ScoreChanged {
        /// Score after the change.
        score: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn boss_pattern_cycles_through_three_phases() {
        let start = BossPattern::Charge;
        assert_eq!(start.next(), BossPattern::SpawnMinions);
        assert_eq!(start.next().next(), BossPattern::Ranged);
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn only_melee_strikes_charge_the_mount() {
        assert!(StrikeSource::Punch.charges_mount());
        assert!(StrikeSource::Kick.charges_mount());
        assert!(!StrikeSource::Cloud.charges_mount());
        assert!(!StrikeSource::Mount.charges_mount());
    }

    #[test]
    fn facing_sign_matches_direction() {
        assert_eq!(Facing::Left.sign(), -1.0);
        assert_eq!(Facing::Right.sign(), 1.0);
    }

    #[test]
    fn tick_input_round_trips_through_bincode() {
        let input = TickInput {
            movement: Vec2::new(-1.0, 0.0),
            punch: true,
            pointer: Some(Vec2::new(10.0, 20.0)),
            ..TickInput::default()
        };
        assert_round_trip(&input);
    }

    #[test]
    fn target_ids_order_enemies_before_boss() {
        let mut targets = vec![TargetId::Boss, TargetId::Enemy(EnemyId::new(3))];
        targets.sort();
        assert_eq!(targets[0], TargetId::Enemy(EnemyId::new(3)));
    }
}
