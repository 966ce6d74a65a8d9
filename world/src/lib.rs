#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Swamp Brawler.
//!
//! The world owns every entity of a session and mutates them exclusively
//! through [`apply`]. Systems read copies obtained from the [`query`] module,
//! decide, and answer with commands; commands address entities by identifier
//! and are skipped silently when the entity vanished earlier in the batch.

mod actor;
mod effects;
mod enemy;
mod mount;
mod player;
mod projectile;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use swamp_brawler_core::{
    AttackKind, BossPattern, Command, EnemyId, EnemyKind, Event, GameConfig, PickupId,
    PickupRarity, ProjectileId, ProjectileOwner, SpawnOrigin, SpawnSide, StrikeSource, TargetId,
};
use tracing::{debug, info};

use crate::{
    actor::direction,
    effects::{AreaCloud, AttackSwing, Pickup, Portal, PortalStep},
    enemy::{radial_fan, Boss, Enemy},
    mount::Mount,
    player::{Player, PlayerStep},
    projectile::Projectile,
};

/// Represents the authoritative Swamp Brawler world state.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    config: GameConfig,
    rng: ChaCha8Rng,
    tick_index: u64,
    score: u64,
    player: Player,
    enemies: Vec<Enemy>,
    boss: Option<Boss>,
    projectiles: Vec<Projectile>,
    swings: Vec<AttackSwing>,
    clouds: Vec<AreaCloud>,
    portal: Option<Portal>,
    pickups: Vec<Pickup>,
    next_enemy_id: u32,
    next_projectile_id: u32,
    next_pickup_id: u32,
}

impl World {
    /// Creates a fresh session world seeded for deterministic randomness.
    #[must_use]
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        info!(seed, "creating world");
        Self {
            config: config.clone(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick_index: 0,
            score: 0,
            player: Player::new(config),
            enemies: Vec::new(),
            boss: None,
            projectiles: Vec::new(),
            swings: Vec::new(),
            clouds: Vec::new(),
            portal: None,
            pickups: Vec::new(),
            next_enemy_id: 0,
            next_projectile_id: 0,
            next_pickup_id: 0,
        }
    }

    fn bounds(&self) -> Vec2 {
        Vec2::new(self.config.playfield.width, self.config.playfield.height)
    }

    fn allocate_enemy_id(&mut self) -> EnemyId {
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.wrapping_add(1);
        id
    }

    fn allocate_projectile_id(&mut self) -> ProjectileId {
        let id = ProjectileId::new(self.next_projectile_id);
        self.next_projectile_id = self.next_projectile_id.wrapping_add(1);
        id
    }

    fn allocate_pickup_id(&mut self) -> PickupId {
        let id = PickupId::new(self.next_pickup_id);
        self.next_pickup_id = self.next_pickup_id.wrapping_add(1);
        id
    }

    fn fire(&mut self, shot: Shot, out_events: &mut Vec<Event>) {
        let projectile = self.allocate_projectile_id();
        self.projectiles.push(Projectile {
            id: projectile,
            owner: shot.owner,
            position: shot.origin,
            velocity: shot.velocity,
            lifetime: shot.lifetime,
            damage: shot.damage,
        });
        out_events.push(Event::ProjectileFired {
            projectile,
            owner: shot.owner,
        });
    }

    fn spawn_enemy(&mut self, kind: EnemyKind, origin: SpawnOrigin, out_events: &mut Vec<Event>) {
        let tuning = self.config.enemy(kind).clone();
        let bounds = self.bounds();
        let speed = self.rng.gen_range(tuning.speed_min..=tuning.speed_max);
        let base_speed = self.rng.gen_range(tuning.speed_min..=tuning.speed_max);
        let free = (bounds - tuning.size).max(Vec2::ZERO);

        let (position, velocity) = match origin {
            SpawnOrigin::Edge(SpawnSide::Right) => (
                Vec2::new(bounds.x, self.rng.gen_range(0.0..=free.y)),
                Vec2::new(-speed, 0.0),
            ),
            SpawnOrigin::Edge(SpawnSide::Top) => (
                Vec2::new(self.rng.gen_range(0.0..=free.x), -tuning.size.y),
                Vec2::new(0.0, speed),
            ),
            SpawnOrigin::Edge(SpawnSide::Left) => (
                Vec2::new(-tuning.size.x, self.rng.gen_range(0.0..=free.y)),
                Vec2::new(speed, 0.0),
            ),
            SpawnOrigin::Edge(SpawnSide::Bottom) => (
                Vec2::new(self.rng.gen_range(0.0..=free.x), bounds.y),
                Vec2::new(0.0, -speed),
            ),
            SpawnOrigin::At(position) => (position, Vec2::ZERO),
        };

        let id = self.allocate_enemy_id();
        self.enemies.push(Enemy::new(
            id,
            kind,
            position,
            velocity,
            base_speed,
            &tuning,
            &self.config.enemies.gunfire,
        ));
        debug!(enemy = id.get(), ?kind, ?origin, "enemy spawned");
        out_events.push(Event::EnemySpawned { enemy: id, kind });
    }

    fn advance(&mut self, movement: Vec2, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced {
            tick: self.tick_index,
        });

        let bounds = self.bounds();
        if self.player.advance(movement, &self.config, bounds) == PlayerStep::MountExpired {
            debug!("mount expired");
            out_events.push(Event::MountExpired);
        }
        let player_centre = self.player.body.centre();

        let mut shots = Vec::new();
        let gunfire = &self.config.enemies.gunfire;
        for enemy in &mut self.enemies {
            enemy.advance(player_centre);
            if let Some(aim) = enemy.aim(player_centre, gunfire) {
                shots.push(Shot {
                    owner: ProjectileOwner::Enemy(enemy.id),
                    origin: enemy.body.centre(),
                    velocity: aim * gunfire.projectile_speed,
                    lifetime: gunfire.projectile_lifetime,
                    damage: gunfire.projectile_damage,
                });
            }
        }

        let margin = self.config.playfield.escape_margin;
        let mut escaped = Vec::new();
        self.enemies.retain(|enemy| {
            if enemy.body.escaped(bounds, margin) {
                escaped.push((enemy.id, enemy.body.centre()));
                false
            } else {
                true
            }
        });
        for (enemy, centre) in escaped {
            let penalty = self.config.combat.escape_penalty;
            let impulse = direction(centre, self.player.body.centre())
                * self.config.combat.escape_knockback;
            debug!(enemy = enemy.get(), penalty, "enemy escaped");
            out_events.push(Event::EnemyEscaped { enemy, penalty });
            self.damage_player(penalty, impulse, true, out_events);
        }

        if let Some(boss) = self.boss.as_mut() {
            if let Some(pattern) = boss.advance(player_centre) {
                let at = boss.body.position;
                let centre = boss.body.centre();
                debug!(tier = ?boss.tier, ?pattern, "boss attack phase");
                if pattern == BossPattern::Ranged {
                    let tuning = self.config.boss(boss.tier);
                    shots.extend(radial_fan(tuning.projectile_count).map(|heading| Shot {
                        owner: ProjectileOwner::Boss,
                        origin: centre,
                        velocity: heading * tuning.projectile_speed,
                        lifetime: tuning.projectile_lifetime,
                        damage: tuning.projectile_damage,
                    }));
                }
                out_events.push(Event::BossSignaled { pattern, at });
            }
        }

        for shot in shots {
            self.fire(shot, out_events);
        }

        self.projectiles
            .retain_mut(|projectile| projectile.advance(bounds));
        self.swings.retain_mut(AttackSwing::advance);
        let cloud = &self.config.cloud;
        self.clouds.retain_mut(|area| area.advance(cloud));
        for pickup in &mut self.pickups {
            pickup.lifetime = pickup.lifetime.saturating_sub(1);
        }
        self.pickups.retain(|pickup| pickup.lifetime > 0);
    }

    fn begin_attack(&mut self, kind: AttackKind, out_events: &mut Vec<Event>) {
        if self.player.cooldown(kind) > 0 || self.player.mount.is_some() {
            return;
        }
        let combat = &self.config.combat;
        self.player
            .start_cooldown(kind, combat.attack(kind).cooldown_ticks);
        let facing = self.player.facing;
        let reach = Vec2::new(facing.sign() * self.player.body.size.x * 0.5, 0.0);
        self.swings.push(AttackSwing {
            kind,
            position: self.player.body.centre() + reach,
            facing,
            frame: 0,
            frames: combat.swing_frames,
        });
        out_events.push(Event::AttackStarted { kind });
    }

    fn strike(
        &mut self,
        target: TargetId,
        source: StrikeSource,
        damage: u32,
        impulse: Vec2,
        out_events: &mut Vec<Event>,
    ) {
        let flash = self.config.combat.hit_flash_ticks;
        let body = match target {
            TargetId::Enemy(id) => match self.enemies.iter_mut().find(|enemy| enemy.id == id) {
                Some(enemy) => &mut enemy.body,
                None => return,
            },
            TargetId::Boss => match self.boss.as_mut() {
                Some(boss) => &mut boss.body,
                None => return,
            },
        };
        let dealt = body.damage(damage, flash);
        body.apply_knockback(impulse);
        let remaining = body.health;
        let defeated = body.is_dead();
        out_events.push(Event::TargetStruck {
            target,
            source,
            damage: dealt,
            remaining,
        });

        if source == StrikeSource::Mount {
            let cooldown = self.config.mount.contact_cooldown_ticks;
            if let Some(mount) = self.player.mount.as_mut() {
                mount.start_contact_cooldown(target, cooldown);
            }
        }

        if source.charges_mount() {
            let combat = &self.config.combat;
            let mut gained = damage as f32 * combat.charge_per_damage;
            if defeated {
                gained += combat.kill_charge_bonus * combat.charge_per_damage;
            }
            self.player.add_charge(gained, self.config.mount.max_charge);
        }

        if defeated {
            match target {
                TargetId::Enemy(enemy) => self.defeat_enemy(enemy, out_events),
                TargetId::Boss => self.defeat_boss(out_events),
            }
        }
    }

    fn defeat_enemy(&mut self, id: EnemyId, out_events: &mut Vec<Event>) {
        let Some(index) = self.enemies.iter().position(|enemy| enemy.id == id) else {
            return;
        };
        let enemy = self.enemies.remove(index);
        let bonus = self.config.combat.enemy_kill_bonus;
        debug!(enemy = id.get(), kind = ?enemy.kind, "enemy defeated");
        out_events.push(Event::EnemyDefeated {
            enemy: id,
            kind: enemy.kind,
            bonus,
        });
        self.credit(bonus, out_events);
        self.maybe_drop_pickup(enemy.body.centre(), out_events);
    }

    fn defeat_boss(&mut self, out_events: &mut Vec<Event>) {
        let Some(boss) = self.boss.take() else {
            return;
        };
        let bonus = self.config.boss(boss.tier).kill_bonus;
        info!(tier = ?boss.tier, name = %boss.name, "boss defeated");
        out_events.push(Event::BossDefeated {
            tier: boss.tier,
            bonus,
        });
        self.enemies.clear();
        for projectile in self.projectiles.drain(..) {
            out_events.push(Event::ProjectileDestroyed {
                projectile: projectile.id,
            });
        }
        self.credit(bonus, out_events);
    }

    fn credit(&mut self, bonus: u64, out_events: &mut Vec<Event>) {
        self.score = self.score.saturating_add(bonus);
        out_events.push(Event::ScoreChanged { score: self.score });
    }

    fn maybe_drop_pickup(&mut self, centre: Vec2, out_events: &mut Vec<Event>) {
        let tuning = &self.config.pickups;
        if !self.rng.gen_bool(tuning.drop_chance.clamp(0.0, 1.0)) {
            return;
        }
        let total: u32 = PickupRarity::ALL
            .iter()
            .map(|rarity| tuning.rarity(*rarity).weight)
            .sum();
        if total == 0 {
            return;
        }
        let mut roll = self.rng.gen_range(0..total);
        let mut rarity = PickupRarity::Common;
        for candidate in PickupRarity::ALL {
            let weight = tuning.rarity(candidate).weight;
            if roll < weight {
                rarity = candidate;
                break;
            }
            roll -= weight;
        }

        let size = tuning.size;
        let heal = tuning.rarity(rarity).heal;
        let lifetime = tuning.lifetime_ticks;
        let pickup = self.allocate_pickup_id();
        self.pickups.push(Pickup {
            id: pickup,
            rarity,
            position: centre - size * 0.5,
            size,
            heal,
            lifetime,
        });
        debug!(pickup = pickup.get(), ?rarity, "pickup dropped");
        out_events.push(Event::PickupDropped { pickup, rarity });
    }

    fn damage_player(&mut self, amount: u32, impulse: Vec2, stain: bool, out_events: &mut Vec<Event>) {
        let flash = self.config.combat.hit_flash_ticks;
        let dealt = self.player.body.damage(amount, flash);
        self.player.body.apply_knockback(impulse);
        if stain {
            self.player.stained = self.config.player.stain_ticks;
        }
        out_events.push(Event::PlayerDamaged {
            amount: dealt,
            remaining: self.player.body.health,
        });
    }

    fn advance_portal(&mut self, out_events: &mut Vec<Event>) {
        let Some(portal) = self.portal.as_mut() else {
            return;
        };
        match portal.advance(&self.config.portal, &mut self.rng) {
            PortalStep::Animating => {}
            PortalStep::FullyOpen => {
                let tier = portal.tier;
                let centre = portal.centre;
                let tuning = self.config.boss(tier);
                info!(?tier, name = %tuning.name, "boss summoned");
                self.boss = Some(Boss::new(tier, centre, tuning));
                out_events.push(Event::BossSummoned { tier });
            }
            PortalStep::Collapsed => {
                self.portal = None;
                out_events.push(Event::PortalClosed);
            }
        }
    }
}

/// Projectile requested during a tick, fired once entity iteration finished.
struct Shot {
    owner: ProjectileOwner,
    origin: Vec2,
    velocity: Vec2,
    lifetime: u32,
    damage: u32,
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { movement } => world.advance(movement, out_events),
        Command::BeginAttack { kind } => world.begin_attack(kind, out_events),
        Command::Strike {
            target,
            source,
            damage,
            impulse,
        } => world.strike(target, source, damage, impulse, out_events),
        Command::ReleaseCloud => {
            if world.player.cloud_cooldown > 0 {
                return;
            }
            world.player.cloud_cooldown = world.config.cloud.cooldown_ticks;
            world
                .clouds
                .push(AreaCloud::new(world.player.body.centre(), &world.config.cloud));
            out_events.push(Event::CloudReleased);
        }
        Command::SummonMount => {
            let max_charge = world.config.mount.max_charge;
            if world.player.mount.is_some() || world.player.charge < max_charge {
                return;
            }
            world.player.mount = Some(Mount::new(world.player.body.position, &world.config.mount));
            world.player.charge = 0.0;
            world.player.ready_flash = 0;
            info!("mount summoned");
            out_events.push(Event::MountSummoned);
        }
        Command::Contact {
            target,
            damage,
            impulse,
            rebound,
        } => {
            let body = match target {
                TargetId::Enemy(id) => world
                    .enemies
                    .iter_mut()
                    .find(|enemy| enemy.id == id)
                    .map(|enemy| &mut enemy.body),
                TargetId::Boss => world.boss.as_mut().map(|boss| &mut boss.body),
            };
            let Some(body) = body else {
                return;
            };
            body.apply_knockback(rebound);
            world.damage_player(damage, impulse, false, out_events);
        }
        Command::ProjectileHit { projectile } => {
            let Some(index) = world.projectiles.iter().position(|shot| shot.id == projectile) else {
                return;
            };
            let shot = world.projectiles.remove(index);
            out_events.push(Event::ProjectileDestroyed { projectile });
            world.damage_player(shot.damage, Vec2::ZERO, true, out_events);
        }
        Command::DestroyProjectile { projectile } => {
            let Some(index) = world.projectiles.iter().position(|shot| shot.id == projectile) else {
                return;
            };
            let _ = world.projectiles.remove(index);
            out_events.push(Event::ProjectileDestroyed { projectile });
        }
        Command::CollectPickup { pickup } => {
            if world.player.body.is_dead() {
                return;
            }
            let Some(index) = world.pickups.iter().position(|item| item.id == pickup) else {
                return;
            };
            let item = world.pickups.remove(index);
            let amount = world.player.body.heal(item.heal);
            out_events.push(Event::PickupCollected {
                pickup,
                rarity: item.rarity,
            });
            out_events.push(Event::PlayerHealed {
                amount,
                remaining: world.player.body.health,
            });
        }
        Command::SpawnEnemy { kind, origin } => world.spawn_enemy(kind, origin, out_events),
        Command::OpenPortal { tier } => {
            info!(?tier, "portal opening");
            world.portal = Some(Portal::new(tier, world.config.playfield_centre()));
            out_events.push(Event::PortalOpened { tier });
        }
        Command::AdvancePortal => world.advance_portal(out_events),
        Command::PlacePlayer { position } => {
            world.player.body.position = position;
            world.player.body.velocity = Vec2::ZERO;
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::collections::BTreeMap;

    use glam::Vec2;
    use swamp_brawler_core::{
        AttackKind, BossPattern, BossTier, EnemyId, EnemyKind, Facing, GameConfig, PickupId,
        PickupRarity, ProjectileId, ProjectileOwner, TargetId,
    };

    use super::World;
    use crate::effects::PortalPhase;

    /// Provides read-only access to the configuration the world was built from.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Number of ticks simulated since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Score accumulated in this session.
    #[must_use]
    pub fn score(world: &World) -> u64 {
        world.score
    }

    /// Width and height of the playfield.
    #[must_use]
    pub fn playfield(world: &World) -> Vec2 {
        world.bounds()
    }

    /// Number of live regular enemies.
    #[must_use]
    pub fn enemy_count(world: &World) -> usize {
        world.enemies.len()
    }

    /// Reports whether a boss is currently on the playfield.
    #[must_use]
    pub fn boss_active(world: &World) -> bool {
        world.boss.is_some()
    }

    /// Captures the player's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let player = &world.player;
        PlayerSnapshot {
            position: player.body.position,
            centre: player.body.centre(),
            size: player.body.size,
            velocity: player.body.velocity,
            health: player.body.health,
            max_health: player.body.max_health,
            facing: player.facing,
            punch_cooldown: player.punch_cooldown,
            kick_cooldown: player.kick_cooldown,
            cloud_cooldown: player.cloud_cooldown,
            charge: player.charge,
            max_charge: world.config.mount.max_charge,
            stained: player.stained,
            hit_flash: player.body.hit_flash,
            ready_flash: player.ready_flash,
            mount: player.mount.as_ref().map(|mount| MountSnapshot {
                position: mount.position,
                centre: mount.centre(),
                size: mount.size,
                facing: mount.facing,
                lifetime: mount.lifetime,
                damage: mount.damage,
                contact_radius: world.config.mount.contact_radius,
                contact_cooldowns: mount.contacts.clone(),
            }),
        }
    }

    /// Captures every damageable target, enemies in identifier order then the boss.
    #[must_use]
    pub fn target_view(world: &World) -> TargetView {
        let mut snapshots: Vec<TargetSnapshot> = world
            .enemies
            .iter()
            .map(|enemy| TargetSnapshot {
                id: TargetId::Enemy(enemy.id),
                kind: TargetKind::Enemy(enemy.kind),
                position: enemy.body.position,
                centre: enemy.body.centre(),
                size: enemy.body.size,
                health: enemy.body.health,
                max_health: enemy.body.max_health,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        if let Some(boss) = world.boss.as_ref() {
            snapshots.push(TargetSnapshot {
                id: TargetId::Boss,
                kind: TargetKind::Boss(boss.tier),
                position: boss.body.position,
                centre: boss.body.centre(),
                size: boss.body.size,
                health: boss.body.health,
                max_health: boss.body.max_health,
            });
        }
        TargetView { snapshots }
    }

    /// Captures the regular enemies with their presentation details.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        let mut snapshots: Vec<EnemySnapshot> = world
            .enemies
            .iter()
            .map(|enemy| EnemySnapshot {
                id: enemy.id,
                kind: enemy.kind,
                position: enemy.body.position,
                size: enemy.body.size,
                health: enemy.body.health,
                max_health: enemy.body.max_health,
                hit_flash: enemy.body.hit_flash,
                color: enemy.color,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        EnemyView { snapshots }
    }

    /// Captures the active boss, if any.
    #[must_use]
    pub fn boss(world: &World) -> Option<BossSnapshot> {
        world.boss.as_ref().map(|boss| BossSnapshot {
            tier: boss.tier,
            name: boss.name.clone(),
            position: boss.body.position,
            size: boss.body.size,
            health: boss.body.health,
            max_health: boss.body.max_health,
            hit_flash: boss.body.hit_flash,
            visual_scale: boss.visual_scale,
            pattern: boss.pattern,
            cooldown: boss.cooldown,
        })
    }

    /// Captures the live area clouds.
    #[must_use]
    pub fn cloud_view(world: &World) -> CloudView {
        CloudView {
            snapshots: world
                .clouds
                .iter()
                .map(|cloud| CloudSnapshot {
                    centre: cloud.centre,
                    radius: cloud.radius,
                    lifetime: cloud.lifetime,
                    max_lifetime: cloud.max_lifetime,
                })
                .collect(),
        }
    }

    /// Captures the hostile projectiles in flight, ordered by identifier.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        let mut snapshots: Vec<ProjectileSnapshot> = world
            .projectiles
            .iter()
            .map(|projectile| ProjectileSnapshot {
                id: projectile.id,
                owner: projectile.owner,
                position: projectile.position,
                velocity: projectile.velocity,
                damage: projectile.damage,
                lifetime: projectile.lifetime,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        ProjectileView { snapshots }
    }

    /// Captures the uncollected pickups, ordered by identifier.
    #[must_use]
    pub fn pickup_view(world: &World) -> PickupView {
        let mut snapshots: Vec<PickupSnapshot> = world
            .pickups
            .iter()
            .map(|pickup| PickupSnapshot {
                id: pickup.id,
                rarity: pickup.rarity,
                position: pickup.position,
                centre: pickup.centre(),
                size: pickup.size,
                heal: pickup.heal,
                lifetime: pickup.lifetime,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        PickupView { snapshots }
    }

    /// Captures the visible attack swings.
    #[must_use]
    pub fn swings(world: &World) -> Vec<SwingSnapshot> {
        world
            .swings
            .iter()
            .map(|swing| SwingSnapshot {
                kind: swing.kind,
                position: swing.position,
                facing: swing.facing,
                frame: swing.frame,
                frames: swing.frames,
            })
            .collect()
    }

    /// Captures the summoning portal, if one is open.
    #[must_use]
    pub fn portal(world: &World) -> Option<PortalSnapshot> {
        world.portal.as_ref().map(|portal| PortalSnapshot {
            tier: portal.tier,
            centre: portal.centre,
            radius: portal.radius,
            opening: portal.phase == PortalPhase::Opening,
            particles: portal
                .particles
                .iter()
                .map(|particle| ParticleSnapshot {
                    position: particle.position,
                    fade: particle.life as f32 / particle.max_life.max(1) as f32,
                })
                .collect(),
        })
    }

    /// Immutable copy of the player used by systems and renderers.
    #[derive(Clone, Debug, PartialEq)]
    pub struct PlayerSnapshot {
        /// Top-left corner of the body.
        pub position: Vec2,
        /// Centre of the body.
        pub centre: Vec2,
        /// Width and height of the body.
        pub size: Vec2,
        /// Current velocity.
        pub velocity: Vec2,
        /// Current health.
        pub health: u32,
        /// Maximum health.
        pub max_health: u32,
        /// Facing direction.
        pub facing: Facing,
        /// Remaining punch cooldown.
        pub punch_cooldown: u32,
        /// Remaining kick cooldown.
        pub kick_cooldown: u32,
        /// Remaining cloud cooldown.
        pub cloud_cooldown: u32,
        /// Mount meter value.
        pub charge: f32,
        /// Mount meter value required to summon.
        pub max_charge: f32,
        /// Remaining stained window.
        pub stained: u32,
        /// Remaining hit-flash window.
        pub hit_flash: u32,
        /// Phase of the ready pulse, zero while the meter is not full.
        pub ready_flash: u32,
        /// Active mount, if any.
        pub mount: Option<MountSnapshot>,
    }

    impl PlayerSnapshot {
        /// Remaining cooldown of a melee attack.
        #[must_use]
        pub fn cooldown(&self, kind: AttackKind) -> u32 {
            match kind {
                AttackKind::Punch => self.punch_cooldown,
                AttackKind::Kick => self.kick_cooldown,
            }
        }

        /// Reports whether the player currently rides the mount.
        #[must_use]
        pub fn is_mounted(&self) -> bool {
            self.mount.is_some()
        }

        /// Reports whether the meter is full and no mount is out.
        #[must_use]
        pub fn can_summon(&self) -> bool {
            self.mount.is_none() && self.charge >= self.max_charge
        }
    }

    /// Immutable copy of the active mount.
    #[derive(Clone, Debug, PartialEq)]
    pub struct MountSnapshot {
        /// Top-left corner of the body.
        pub position: Vec2,
        /// Centre of the body.
        pub centre: Vec2,
        /// Width and height of the body.
        pub size: Vec2,
        /// Facing direction.
        pub facing: Facing,
        /// Remaining lifetime.
        pub lifetime: u32,
        /// Contact damage.
        pub damage: u32,
        /// Centre distance below which the mount touches a target.
        pub contact_radius: f32,
        /// Targets the mount recently hit, with their remaining cooldown.
        pub contact_cooldowns: BTreeMap<TargetId, u32>,
    }

    impl MountSnapshot {
        /// Reports whether `target` can be hit by the mount this tick.
        #[must_use]
        pub fn ready_for(&self, target: TargetId) -> bool {
            !self.contact_cooldowns.contains_key(&target)
        }
    }

    /// Read-only snapshot of every damageable target.
    #[derive(Clone, Debug, Default)]
    pub struct TargetView {
        snapshots: Vec<TargetSnapshot>,
    }

    impl TargetView {
        /// Creates a new view from the provided snapshots.
        #[must_use]
        pub fn from_snapshots(snapshots: Vec<TargetSnapshot>) -> Self {
            Self { snapshots }
        }

        /// Iterator over the captured targets in deterministic order.
        pub fn iter(&self) -> impl Iterator<Item = &TargetSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<TargetSnapshot> {
            self.snapshots
        }
    }

    /// Variant of a damageable target.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum TargetKind {
        /// A regular enemy of the given variant.
        Enemy(EnemyKind),
        /// The boss of the given tier.
        Boss(BossTier),
    }

    /// Immutable copy of a damageable target.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct TargetSnapshot {
        /// Identifier used to address the target in commands.
        pub id: TargetId,
        /// Variant of the target.
        pub kind: TargetKind,
        /// Top-left corner of the body.
        pub position: Vec2,
        /// Centre of the body.
        pub centre: Vec2,
        /// Width and height of the body.
        pub size: Vec2,
        /// Current health.
        pub health: u32,
        /// Maximum health.
        pub max_health: u32,
    }

    impl TargetSnapshot {
        /// Reports whether the target is the boss.
        #[must_use]
        pub fn is_boss(&self) -> bool {
            matches!(self.kind, TargetKind::Boss(_))
        }
    }

    /// Read-only snapshot of the regular enemies.
    #[derive(Clone, Debug, Default)]
    pub struct EnemyView {
        snapshots: Vec<EnemySnapshot>,
    }

    impl EnemyView {
        /// Iterator over the captured enemies in identifier order.
        pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
            self.snapshots.iter()
        }
    }

    /// Immutable copy of a regular enemy.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct EnemySnapshot {
        /// Identifier of the enemy.
        pub id: EnemyId,
        /// Variant of the enemy.
        pub kind: EnemyKind,
        /// Top-left corner of the body.
        pub position: Vec2,
        /// Width and height of the body.
        pub size: Vec2,
        /// Current health.
        pub health: u32,
        /// Maximum health.
        pub max_health: u32,
        /// Remaining hit-flash window.
        pub hit_flash: u32,
        /// Colour tag of the variant.
        pub color: [u8; 3],
    }

    /// Immutable copy of the active boss.
    #[derive(Clone, Debug, PartialEq)]
    pub struct BossSnapshot {
        /// Tier of the boss.
        pub tier: BossTier,
        /// Display name.
        pub name: String,
        /// Top-left corner of the body.
        pub position: Vec2,
        /// Width and height of the body.
        pub size: Vec2,
        /// Current health.
        pub health: u32,
        /// Maximum health.
        pub max_health: u32,
        /// Remaining hit-flash window.
        pub hit_flash: u32,
        /// Sprite scale relative to a regular enemy.
        pub visual_scale: f32,
        /// Last executed attack phase.
        pub pattern: BossPattern,
        /// Ticks until the next attack phase.
        pub cooldown: u32,
    }

    /// Read-only snapshot of the live area clouds.
    #[derive(Clone, Debug, Default)]
    pub struct CloudView {
        snapshots: Vec<CloudSnapshot>,
    }

    impl CloudView {
        /// Creates a new view from the provided snapshots.
        #[must_use]
        pub fn from_snapshots(snapshots: Vec<CloudSnapshot>) -> Self {
            Self { snapshots }
        }

        /// Iterator over the captured clouds.
        pub fn iter(&self) -> impl Iterator<Item = &CloudSnapshot> {
            self.snapshots.iter()
        }
    }

    /// Immutable copy of an area cloud.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct CloudSnapshot {
        /// Centre of the cloud.
        pub centre: Vec2,
        /// Current radius.
        pub radius: f32,
        /// Remaining lifetime.
        pub lifetime: u32,
        /// Lifetime at release.
        pub max_lifetime: u32,
    }

    impl CloudSnapshot {
        /// Reports whether `point` lies strictly inside the cloud.
        #[must_use]
        pub fn contains(&self, point: Vec2) -> bool {
            point.distance(self.centre) < self.radius
        }
    }

    /// Read-only snapshot of the hostile projectiles.
    #[derive(Clone, Debug, Default)]
    pub struct ProjectileView {
        snapshots: Vec<ProjectileSnapshot>,
    }

    impl ProjectileView {
        /// Creates a new view from the provided snapshots.
        #[must_use]
        pub fn from_snapshots(snapshots: Vec<ProjectileSnapshot>) -> Self {
            Self { snapshots }
        }

        /// Iterator over the captured projectiles in identifier order.
        pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
            self.snapshots.iter()
        }
    }

    /// Immutable copy of a hostile projectile.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct ProjectileSnapshot {
        /// Identifier of the projectile.
        pub id: ProjectileId,
        /// Actor that fired it.
        pub owner: ProjectileOwner,
        /// Centre of the projectile.
        pub position: Vec2,
        /// Velocity per tick.
        pub velocity: Vec2,
        /// Damage on hit.
        pub damage: u32,
        /// Remaining lifetime.
        pub lifetime: u32,
    }

    /// Read-only snapshot of the uncollected pickups.
    #[derive(Clone, Debug, Default)]
    pub struct PickupView {
        snapshots: Vec<PickupSnapshot>,
    }

    impl PickupView {
        /// Creates a new view from the provided snapshots.
        #[must_use]
        pub fn from_snapshots(snapshots: Vec<PickupSnapshot>) -> Self {
            Self { snapshots }
        }

        /// Iterator over the captured pickups in identifier order.
        pub fn iter(&self) -> impl Iterator<Item = &PickupSnapshot> {
            self.snapshots.iter()
        }
    }

    /// Immutable copy of a pickup.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct PickupSnapshot {
        /// Identifier of the pickup.
        pub id: PickupId,
        /// Rarity tier.
        pub rarity: PickupRarity,
        /// Top-left corner.
        pub position: Vec2,
        /// Centre of the pickup.
        pub centre: Vec2,
        /// Width and height.
        pub size: Vec2,
        /// Health restored on collection.
        pub heal: u32,
        /// Remaining lifetime.
        pub lifetime: u32,
    }

    /// Immutable copy of an attack swing.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct SwingSnapshot {
        /// Attack that produced the swing.
        pub kind: AttackKind,
        /// Centre of the swing.
        pub position: Vec2,
        /// Direction the player faced.
        pub facing: Facing,
        /// Frames elapsed.
        pub frame: u32,
        /// Total frames.
        pub frames: u32,
    }

    /// Immutable copy of the summoning portal.
    #[derive(Clone, Debug, PartialEq)]
    pub struct PortalSnapshot {
        /// Tier being summoned.
        pub tier: BossTier,
        /// Centre of the portal.
        pub centre: Vec2,
        /// Current radius.
        pub radius: f32,
        /// Reports whether the portal is still growing.
        pub opening: bool,
        /// Live particles.
        pub particles: Vec<ParticleSnapshot>,
    }

    /// Immutable copy of a portal particle.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct ParticleSnapshot {
        /// Particle centre.
        pub position: Vec2,
        /// Remaining life as a share of the initial life.
        pub fade: f32,
    }
}
