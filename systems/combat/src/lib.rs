#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that resolves melee, cloud, mount, contact, projectile and
//! pickup interactions into world commands.
//!
//! Every decision reads the snapshots captured at the start of the pass. The
//! world applies the resulting commands in order and skips any that address
//! an entity removed earlier in the same batch.

use std::collections::BTreeSet;

use glam::Vec2;
use swamp_brawler_core::{AttackKind, Command, GameConfig, ProjectileId, StrikeSource, TickInput};
use swamp_brawler_world::{
    query::{
        self, CloudView, PickupView, PlayerSnapshot, ProjectileView, TargetKind, TargetSnapshot,
        TargetView,
    },
    World,
};
use tracing::trace;

/// Player actions requested for the current tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionIntents {
    /// Punch requested.
    pub punch: bool,
    /// Kick requested.
    pub kick: bool,
    /// Area cloud requested.
    pub cloud: bool,
    /// Mount summon requested.
    pub summon_mount: bool,
}

impl From<&TickInput> for ActionIntents {
    fn from(input: &TickInput) -> Self {
        Self {
            punch: input.punch,
            kick: input.kick,
            cloud: input.cloud,
            summon_mount: input.summon_mount,
        }
    }
}

/// Immutable copies of everything the resolver reads.
#[derive(Clone, Debug)]
pub struct CombatViews {
    /// Player state.
    pub player: PlayerSnapshot,
    /// Enemies and boss.
    pub targets: TargetView,
    /// Live area clouds.
    pub clouds: CloudView,
    /// Hostile projectiles.
    pub projectiles: ProjectileView,
    /// Uncollected pickups.
    pub pickups: PickupView,
}

impl CombatViews {
    /// Captures the views from the current world state.
    #[must_use]
    pub fn capture(world: &World) -> Self {
        Self {
            player: query::player(world),
            targets: query::target_view(world),
            clouds: query::cloud_view(world),
            projectiles: query::projectile_view(world),
            pickups: query::pickup_view(world),
        }
    }
}

/// Combat resolver that turns snapshots and intents into commands.
#[derive(Debug, Default)]
pub struct Combat {
    scratch: Vec<Command>,
    destroyed: BTreeSet<ProjectileId>,
}

impl Combat {
    /// Creates a new combat resolver with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits the commands resolving one tick of combat.
    pub fn handle(
        &mut self,
        config: &GameConfig,
        intents: ActionIntents,
        views: &CombatViews,
        out: &mut Vec<Command>,
    ) {
        self.scratch.clear();
        self.destroyed.clear();
        let player = &views.player;

        for (kind, requested) in [
            (AttackKind::Punch, intents.punch),
            (AttackKind::Kick, intents.kick),
        ] {
            if requested {
                self.melee(config, kind, player, &views.targets);
            }
        }

        if intents.cloud && player.cloud_cooldown == 0 {
            self.scratch.push(Command::ReleaseCloud);
        }

        self.clouds(config, views);
        self.mount_contact(player, &views.targets);
        self.body_contact(config, player, &views.targets);
        self.projectile_hits(config, player, &views.projectiles);

        for pickup in views.pickups.iter() {
            if pickup.centre.distance(player.centre) < config.pickups.collect_radius {
                self.scratch.push(Command::CollectPickup { pickup: pickup.id });
            }
        }

        if intents.summon_mount && player.can_summon() {
            self.scratch.push(Command::SummonMount);
        }

        if self.scratch.is_empty() {
            return;
        }
        trace!(commands = self.scratch.len(), "combat resolved");
        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }

    fn melee(
        &mut self,
        config: &GameConfig,
        kind: AttackKind,
        player: &PlayerSnapshot,
        targets: &TargetView,
    ) {
        if player.cooldown(kind) > 0 || player.is_mounted() {
            return;
        }
        let tuning = config.combat.attack(kind);
        self.scratch.push(Command::BeginAttack { kind });

        let in_range =
            player_targets(targets).filter(|target| in_reach(player, target, tuning.reach));
        for target in in_range {
            let force = if target.is_boss() {
                tuning.boss_knockback
            } else {
                tuning.knockback
            };
            let heading = (target.centre - player.centre)
                .try_normalize()
                .unwrap_or(Vec2::new(player.facing.sign(), 0.0));
            self.scratch.push(Command::Strike {
                target: target.id,
                source: StrikeSource::from(kind),
                damage: tuning.damage,
                impulse: heading * force,
            });
        }
    }

    fn clouds(&mut self, config: &GameConfig, views: &CombatViews) {
        let tuning = &config.cloud;
        for cloud in views.clouds.iter() {
            for target in views.targets.iter() {
                if !cloud.contains(target.centre) {
                    continue;
                }
                let heading = (target.centre - cloud.centre).normalize_or_zero();
                self.scratch.push(Command::Strike {
                    target: target.id,
                    source: StrikeSource::Cloud,
                    damage: tuning.damage,
                    impulse: heading * tuning.knockback,
                });
            }
            for projectile in views.projectiles.iter() {
                if cloud.contains(projectile.position) && self.destroyed.insert(projectile.id) {
                    self.scratch.push(Command::DestroyProjectile {
                        projectile: projectile.id,
                    });
                }
            }
        }
    }

    fn mount_contact(&mut self, player: &PlayerSnapshot, targets: &TargetView) {
        let Some(mount) = player.mount.as_ref() else {
            return;
        };
        for target in player_targets(targets) {
            let touching = mount.centre.distance(target.centre) < mount.contact_radius;
            if touching && mount.ready_for(target.id) {
                self.scratch.push(Command::Strike {
                    target: target.id,
                    source: StrikeSource::Mount,
                    damage: mount.damage,
                    impulse: Vec2::ZERO,
                });
            }
        }
    }

    fn body_contact(&mut self, config: &GameConfig, player: &PlayerSnapshot, targets: &TargetView) {
        let combat = &config.combat;
        for target in targets.iter() {
            let (radius, damage, knockback) = match target.kind {
                TargetKind::Boss(tier) => {
                    let boss = config.boss(tier);
                    (boss.contact_radius, boss.contact_damage, boss.contact_knockback)
                }
                TargetKind::Enemy(_) => (
                    combat.contact_radius,
                    combat.contact_damage,
                    combat.contact_knockback,
                ),
            };
            let offset = player.centre - target.centre;
            if offset.length() >= radius {
                continue;
            }
            let heading = offset.try_normalize().unwrap_or(Vec2::X);
            self.scratch.push(Command::Contact {
                target: target.id,
                damage,
                impulse: heading * knockback,
                rebound: -heading * knockback * combat.contact_rebound,
            });
        }
    }

    fn projectile_hits(
        &mut self,
        config: &GameConfig,
        player: &PlayerSnapshot,
        projectiles: &ProjectileView,
    ) {
        let radius = config.combat.projectile_hit_radius;
        for projectile in projectiles.iter() {
            if self.destroyed.contains(&projectile.id) {
                continue;
            }
            if projectile.position.distance(player.centre) < radius {
                self.scratch.push(Command::ProjectileHit {
                    projectile: projectile.id,
                });
            }
        }
    }
}

/// Axis-aligned reach test between the top-left corners.
/// Targets the player's own attacks may hit: the boss alone while one is
/// active, every enemy otherwise.
fn player_targets(targets: &TargetView) -> impl Iterator<Item = &TargetSnapshot> + '_ {
    let boss_active = targets.iter().any(TargetSnapshot::is_boss);
    targets
        .iter()
        .filter(move |target| !boss_active || target.is_boss())
}

fn in_reach(player: &PlayerSnapshot, target: &TargetSnapshot, reach: Vec2) -> bool {
    let offset = (target.position - player.position).abs();
    offset.x < reach.x && offset.y < reach.y
}
