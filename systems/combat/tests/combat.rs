use glam::Vec2;
use swamp_brawler_core::{
    AttackKind, BossTier, Command, EnemyId, EnemyKind, Event, GameConfig, SpawnOrigin,
    StrikeSource, TargetId,
};
use swamp_brawler_system_combat::{ActionIntents, Combat, CombatViews};
use swamp_brawler_world::{self as world, query, World};

fn resolve(world: &mut World, combat: &mut Combat, intents: ActionIntents) -> Vec<Command> {
    let views = CombatViews::capture(world);
    let mut commands = Vec::new();
    combat.handle(query::config(world), intents, &views, &mut commands);
    commands
}

fn apply_all(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

fn tick(world: &mut World, combat: &mut Combat, intents: ActionIntents) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::Tick {
            movement: Vec2::ZERO,
        },
        &mut events,
    );
    let commands = resolve(world, combat, intents);
    events.extend(apply_all(world, commands));
    events
}

fn spawn_at(world: &mut World, kind: EnemyKind, position: Vec2) -> EnemyId {
    let events = apply_all(
        world,
        vec![Command::SpawnEnemy {
            kind,
            origin: SpawnOrigin::At(position),
        }],
    );
    events
        .iter()
        .find_map(|event| match event {
            Event::EnemySpawned { enemy, .. } => Some(*enemy),
            _ => None,
        })
        .expect("enemy spawned")
}

fn summon_boss(world: &mut World, tier: BossTier) {
    let mut commands = vec![Command::OpenPortal { tier }];
    commands.extend(std::iter::repeat(Command::AdvancePortal).take(120));
    let events = apply_all(world, commands);
    assert!(events.contains(&Event::BossSummoned { tier }));
}

fn punch() -> ActionIntents {
    ActionIntents {
        punch: true,
        ..ActionIntents::default()
    }
}

#[test]
fn punch_strikes_targets_in_reach_with_knockback() {
    let mut world = World::new(&GameConfig::default(), 1);
    let mut combat = Combat::new();
    let enemy = spawn_at(&mut world, EnemyKind::Basic, Vec2::new(300.0, 300.0));

    let commands = resolve(&mut world, &mut combat, punch());

    assert_eq!(commands.len(), 2);
    assert_eq!(
        commands[0],
        Command::BeginAttack {
            kind: AttackKind::Punch
        }
    );
    match commands[1] {
        Command::Strike {
            target,
            source,
            damage,
            impulse,
        } => {
            assert_eq!(target, TargetId::Enemy(enemy));
            assert_eq!(source, StrikeSource::Punch);
            assert_eq!(damage, 15);
            assert!((impulse.length() - 40.0).abs() < 1e-3);
            assert!(impulse.x > 0.0, "knockback points away from the player");
        }
        ref other => panic!("unexpected command {other:?}"),
    }

    let events = apply_all(&mut world, commands);
    assert!(events.contains(&Event::TargetStruck {
        target: TargetId::Enemy(enemy),
        source: StrikeSource::Punch,
        damage: 15,
        remaining: 15,
    }));
}

#[test]
fn targets_outside_reach_are_untouched() {
    let mut world = World::new(&GameConfig::default(), 2);
    let mut combat = Combat::new();
    let _ = spawn_at(&mut world, EnemyKind::Basic, Vec2::new(321.0, 300.0));

    let commands = resolve(&mut world, &mut combat, punch());

    assert_eq!(
        commands,
        vec![Command::BeginAttack {
            kind: AttackKind::Punch
        }]
    );
}

#[test]
fn punch_on_cooldown_is_a_noop() {
    let mut world = World::new(&GameConfig::default(), 3);
    let mut combat = Combat::new();
    let enemy = spawn_at(&mut world, EnemyKind::Gunner, Vec2::new(300.0, 300.0));

    let commands = resolve(&mut world, &mut combat, punch());
    let _ = apply_all(&mut world, commands);
    let _ = tick(&mut world, &mut combat, ActionIntents::default());

    let cooldown = query::player(&world).punch_cooldown;
    let health = query::target_view(&world)
        .iter()
        .find(|target| target.id == TargetId::Enemy(enemy))
        .map(|target| target.health);

    let commands = resolve(&mut world, &mut combat, punch());

    assert!(commands.is_empty(), "unexpected commands {commands:?}");
    assert_eq!(cooldown, 19);
    assert_eq!(query::player(&world).punch_cooldown, cooldown);
    assert_eq!(
        query::target_view(&world)
            .iter()
            .find(|target| target.id == TargetId::Enemy(enemy))
            .map(|target| target.health),
        health
    );
}

#[test]
fn attacks_are_disabled_while_mounted() {
    let mut world = World::new(&GameConfig::default(), 4);
    let mut combat = Combat::new();
    let fodder = spawn_at(&mut world, EnemyKind::Basic, Vec2::new(600.0, 100.0));
    let _ = apply_all(
        &mut world,
        vec![
            Command::Strike {
                target: TargetId::Enemy(fodder),
                source: StrikeSource::Kick,
                damage: 200,
                impulse: Vec2::ZERO,
            },
            Command::SummonMount,
        ],
    );
    assert!(query::player(&world).is_mounted());
    let _ = spawn_at(&mut world, EnemyKind::Basic, Vec2::new(320.0, 300.0));

    let commands = resolve(
        &mut world,
        &mut combat,
        ActionIntents {
            punch: true,
            kick: true,
            ..ActionIntents::default()
        },
    );

    assert!(commands
        .iter()
        .all(|command| !matches!(command, Command::BeginAttack { .. })));
    assert!(commands.iter().all(|command| !matches!(
        command,
        Command::Strike {
            source: StrikeSource::Punch | StrikeSource::Kick,
            ..
        }
    )));
}

#[test]
fn summon_resets_meter_and_freezes_it() {
    let mut world = World::new(&GameConfig::default(), 5);
    let mut combat = Combat::new();
    let fodder = spawn_at(&mut world, EnemyKind::Basic, Vec2::new(600.0, 100.0));
    let _ = apply_all(
        &mut world,
        vec![Command::Strike {
            target: TargetId::Enemy(fodder),
            source: StrikeSource::Punch,
            damage: 500,
            impulse: Vec2::ZERO,
        }],
    );
    assert_eq!(query::player(&world).charge, 100.0);

    let commands = resolve(
        &mut world,
        &mut combat,
        ActionIntents {
            summon_mount: true,
            ..ActionIntents::default()
        },
    );
    assert_eq!(commands, vec![Command::SummonMount]);
    let events = apply_all(&mut world, commands);
    assert_eq!(events, vec![Event::MountSummoned]);
    assert_eq!(query::player(&world).charge, 0.0);

    let other = spawn_at(&mut world, EnemyKind::Basic, Vec2::new(600.0, 400.0));
    let _ = apply_all(
        &mut world,
        vec![Command::Strike {
            target: TargetId::Enemy(other),
            source: StrikeSource::Kick,
            damage: 20,
            impulse: Vec2::ZERO,
        }],
    );
    assert_eq!(query::player(&world).charge, 0.0);
}

#[test]
fn mount_contact_respects_per_target_cooldown() {
    let mut world = World::new(&GameConfig::default(), 6);
    let mut combat = Combat::new();
    let fodder = spawn_at(&mut world, EnemyKind::Basic, Vec2::new(600.0, 100.0));
    let _ = apply_all(
        &mut world,
        vec![
            Command::Strike {
                target: TargetId::Enemy(fodder),
                source: StrikeSource::Kick,
                damage: 200,
                impulse: Vec2::ZERO,
            },
            Command::SummonMount,
        ],
    );
    let mount = query::player(&world).mount.expect("mount summoned");
    let tank = spawn_at(&mut world, EnemyKind::Gunner, mount.centre - Vec2::new(27.5, 32.5));

    let first = resolve(&mut world, &mut combat, ActionIntents::default());
    let mount_strike = Command::Strike {
        target: TargetId::Enemy(tank),
        source: StrikeSource::Mount,
        damage: 25,
        impulse: Vec2::ZERO,
    };
    assert!(first.contains(&mount_strike));
    let _ = apply_all(&mut world, first);

    let second = resolve(&mut world, &mut combat, ActionIntents::default());
    assert!(!second.contains(&mount_strike));
}

#[test]
fn strikes_on_targets_removed_earlier_in_the_batch_are_skipped() {
    let mut world = World::new(&GameConfig::default(), 7);
    let mut combat = Combat::new();
    let enemy = spawn_at(&mut world, EnemyKind::Basic, Vec2::new(300.0, 300.0));
    let _ = apply_all(
        &mut world,
        vec![Command::Strike {
            target: TargetId::Enemy(enemy),
            source: StrikeSource::Cloud,
            damage: 15,
            impulse: Vec2::ZERO,
        }],
    );

    let commands = resolve(
        &mut world,
        &mut combat,
        ActionIntents {
            punch: true,
            kick: true,
            ..ActionIntents::default()
        },
    );
    let strikes = commands
        .iter()
        .filter(|command| matches!(command, Command::Strike { .. }))
        .count();
    assert_eq!(strikes, 2, "both attacks target the snapshot");

    let events = apply_all(&mut world, commands);

    let struck = events
        .iter()
        .filter(|event| matches!(event, Event::TargetStruck { .. }))
        .count();
    let defeated = events
        .iter()
        .filter(|event| matches!(event, Event::EnemyDefeated { .. }))
        .count();
    assert_eq!(struck, 1);
    assert_eq!(defeated, 1);
    assert_eq!(query::score(&world), 100);
}

#[test]
fn boss_knockback_is_weaker_than_enemy_knockback() {
    let mut world = World::new(&GameConfig::default(), 8);
    let mut combat = Combat::new();
    summon_boss(&mut world, BossTier::Warden);
    let _ = apply_all(
        &mut world,
        vec![Command::PlacePlayer {
            position: Vec2::new(280.0, 260.0),
        }],
    );

    let commands = resolve(&mut world, &mut combat, punch());

    assert!(commands.contains(&Command::Strike {
        target: TargetId::Boss,
        source: StrikeSource::Punch,
        damage: 15,
        impulse: Vec2::new(10.0, 0.0),
    }));
}

#[test]
fn melee_hits_only_the_boss_while_it_is_active() {
    let mut world = World::new(&GameConfig::default(), 8);
    let mut combat = Combat::new();
    summon_boss(&mut world, BossTier::Warden);
    let _ = apply_all(
        &mut world,
        vec![Command::PlacePlayer {
            position: Vec2::new(280.0, 260.0),
        }],
    );
    let minion = spawn_at(&mut world, EnemyKind::Basic, Vec2::new(300.0, 260.0));

    let commands = resolve(&mut world, &mut combat, punch());

    let struck: Vec<TargetId> = commands
        .iter()
        .filter_map(|command| match command {
            Command::Strike { target, .. } => Some(*target),
            _ => None,
        })
        .collect();
    assert_eq!(struck, vec![TargetId::Boss]);
    assert!(!struck.contains(&TargetId::Enemy(minion)));
}

#[test]
fn mount_ignores_minions_while_a_boss_is_active() {
    let mut world = World::new(&GameConfig::default(), 10);
    let mut combat = Combat::new();
    summon_boss(&mut world, BossTier::Warden);
    let fodder = spawn_at(&mut world, EnemyKind::Basic, Vec2::new(600.0, 100.0));
    let _ = apply_all(
        &mut world,
        vec![
            Command::Strike {
                target: TargetId::Enemy(fodder),
                source: StrikeSource::Kick,
                damage: 200,
                impulse: Vec2::ZERO,
            },
            Command::SummonMount,
        ],
    );
    let mount = query::player(&world).mount.expect("mount summoned");
    let minion = spawn_at(&mut world, EnemyKind::Gunner, mount.centre - Vec2::new(27.5, 32.5));

    let commands = resolve(&mut world, &mut combat, ActionIntents::default());

    assert!(!commands.contains(&Command::Strike {
        target: TargetId::Enemy(minion),
        source: StrikeSource::Mount,
        damage: 25,
        impulse: Vec2::ZERO,
    }));
}

#[test]
fn cloud_tick_finishes_boss_and_credits_once() {
    let mut config = GameConfig::default();
    config.cloud.damage = 10;
    let mut world = World::new(&config, 9);
    let mut combat = Combat::new();
    summon_boss(&mut world, BossTier::Warden);
    let boss = query::boss(&world).expect("boss summoned");
    let boss_centre = boss.position + boss.size * 0.5;
    let player_size = query::player(&world).size;

    let _ = apply_all(
        &mut world,
        vec![
            Command::Strike {
                target: TargetId::Boss,
                source: StrikeSource::Mount,
                damage: boss.max_health - 10,
                impulse: Vec2::ZERO,
            },
            Command::PlacePlayer {
                position: boss_centre - player_size * 0.5,
            },
            Command::ReleaseCloud,
            Command::PlacePlayer {
                position: Vec2::ZERO,
            },
        ],
    );
    assert_eq!(query::boss(&world).map(|boss| boss.health), Some(10));

    let mut events = Vec::new();
    for _ in 0..5 {
        events.extend(tick(&mut world, &mut combat, ActionIntents::default()));
    }

    assert!(!query::boss_active(&world));
    assert_eq!(query::score(&world), 1000);
    let defeats = events
        .iter()
        .filter(|event| matches!(event, Event::BossDefeated { .. }))
        .count();
    assert_eq!(defeats, 1);
}

#[test]
fn cloud_destroys_projectiles_before_they_land() {
    let mut world = World::new(&GameConfig::default(), 10);
    let mut combat = Combat::new();
    let _ = spawn_at(&mut world, EnemyKind::Gunner, Vec2::new(430.0, 300.0));

    let mut fired = false;
    for _ in 0..200 {
        let events = tick(&mut world, &mut combat, ActionIntents::default());
        if events
            .iter()
            .any(|event| matches!(event, Event::ProjectileFired { .. }))
        {
            fired = true;
            break;
        }
    }
    assert!(fired, "gunner never fired");

    let mut events = tick(
        &mut world,
        &mut combat,
        ActionIntents {
            cloud: true,
            ..ActionIntents::default()
        },
    );
    for _ in 0..40 {
        events.extend(tick(&mut world, &mut combat, ActionIntents::default()));
    }

    assert!(events.contains(&Event::CloudReleased));
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::ProjectileDestroyed { .. })));
    assert!(events
        .iter()
        .all(|event| !matches!(event, Event::PlayerDamaged { .. })));
}

#[test]
fn projectile_hit_damages_and_stains_player() {
    let mut world = World::new(&GameConfig::default(), 11);
    let mut combat = Combat::new();
    let _ = spawn_at(&mut world, EnemyKind::Gunner, Vec2::new(430.0, 300.0));

    let mut hit = None;
    for _ in 0..400 {
        let events = tick(&mut world, &mut combat, ActionIntents::default());
        hit = events.iter().find_map(|event| match event {
            Event::PlayerDamaged { amount, remaining } => Some((*amount, *remaining)),
            _ => None,
        });
        if hit.is_some() {
            break;
        }
    }

    assert_eq!(hit, Some((8, 92)));
    assert_eq!(query::player(&world).stained, 60);
    assert_eq!(query::projectile_view(&world).iter().count(), 0);
}

#[test]
fn pickups_heal_up_to_max_health() {
    let mut world = World::new(&GameConfig::default(), 12);
    let mut combat = Combat::new();
    let player = query::player(&world);

    let first = spawn_at(&mut world, EnemyKind::Basic, player.position);
    let _ = apply_all(
        &mut world,
        vec![Command::Contact {
            target: TargetId::Enemy(first),
            damage: 30,
            impulse: Vec2::ZERO,
            rebound: Vec2::ZERO,
        }],
    );
    assert_eq!(query::player(&world).health, 70);

    let mut dropped = None;
    let mut next = Some(first);
    for _ in 0..200 {
        let enemy = match next.take() {
            Some(enemy) => enemy,
            None => spawn_at(&mut world, EnemyKind::Basic, player.position),
        };
        let events = apply_all(
            &mut world,
            vec![Command::Strike {
                target: TargetId::Enemy(enemy),
                source: StrikeSource::Cloud,
                damage: 100,
                impulse: Vec2::ZERO,
            }],
        );
        dropped = events.iter().find_map(|event| match event {
            Event::PickupDropped { pickup, .. } => Some(*pickup),
            _ => None,
        });
        if dropped.is_some() {
            break;
        }
    }
    let pickup = dropped.expect("a pickup eventually drops");
    let heal = query::pickup_view(&world)
        .iter()
        .find(|item| item.id == pickup)
        .map(|item| item.heal)
        .expect("pickup present");

    let commands = resolve(&mut world, &mut combat, ActionIntents::default());
    assert!(commands.contains(&Command::CollectPickup { pickup }));
    let events = apply_all(&mut world, commands);

    assert!(events.contains(&Event::PlayerHealed {
        amount: heal.min(30),
        remaining: 70 + heal.min(30),
    }));
    assert_eq!(query::pickup_view(&world).iter().count(), 0);
}

#[test]
fn enemy_contact_hurts_player_and_pushes_both_apart() {
    let mut world = World::new(&GameConfig::default(), 13);
    let mut combat = Combat::new();
    let player = query::player(&world);
    let enemy = spawn_at(
        &mut world,
        EnemyKind::Basic,
        player.position + Vec2::new(20.0, 0.0),
    );

    let commands = resolve(&mut world, &mut combat, ActionIntents::default());

    let contact = commands
        .iter()
        .find_map(|command| match command {
            Command::Contact {
                target,
                damage,
                impulse,
                rebound,
            } if *target == TargetId::Enemy(enemy) => Some((*damage, *impulse, *rebound)),
            _ => None,
        })
        .expect("contact resolved");
    assert_eq!(contact.0, 3);
    assert!((contact.1.length() - 12.0).abs() < 1e-3);
    assert!((contact.2.length() - 9.6).abs() < 1e-3);
    assert!(contact.1.dot(contact.2) < 0.0);
}
