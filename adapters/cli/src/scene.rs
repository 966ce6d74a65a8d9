//! Translates a simulation snapshot into draw commands.

use glam::Vec2;
use swamp_brawler_core::{
    AttackKind, EnemyKind, Facing, PickupRarity, ProjectileOwner, ScreenState,
};
use swamp_brawler_rendering::{Color, DrawCommand, Scene, SpriteKey, TextAnchor};
use swamp_brawler_simulation::{Simulation, VictoryStage};
use swamp_brawler_world::query;

const HUD_TEXT: Color = Color::WHITE;
const SHADE: Color = Color::new(0.0, 0.0, 0.0, 0.6);
const HEALTH_BACK: Color = Color::new(0.25, 0.05, 0.05, 0.9);
const HEALTH_FILL: Color = Color::new(0.85, 0.15, 0.15, 1.0);
const METER_FILL: Color = Color::new(0.95, 0.8, 0.2, 1.0);
const BOSS_FILL: Color = Color::new(0.6, 0.2, 0.8, 1.0);
const VICTORY_FADE_TICKS: u32 = 30;

/// Rebuilds `scene` from the simulation, keeping its queued sounds.
pub(crate) fn populate(simulation: &Simulation, scene: &mut Scene) {
    scene.commands.clear();
    let playfield = query::playfield(simulation.world());

    scene.sprite(
        SpriteKey::Background,
        Vec2::ZERO,
        playfield,
        false,
        Color::from_rgb_u8(34, 70, 44),
    );

    match simulation.screen() {
        ScreenState::Title => draw_title(scene, playfield),
        ScreenState::WaveAnnouncement => {
            draw_world(simulation, scene);
            draw_hud(simulation, scene, playfield);
            draw_announcement(simulation, scene, playfield);
        }
        ScreenState::BossIntro | ScreenState::Playing => {
            draw_world(simulation, scene);
            draw_hud(simulation, scene, playfield);
        }
        ScreenState::Paused => {
            draw_world(simulation, scene);
            draw_hud(simulation, scene, playfield);
            draw_banner(scene, playfield, "PAUSED", "Press P or click the button to resume");
        }
        ScreenState::GameOver => {
            draw_world(simulation, scene);
            let score = format!("Score {}  |  Press Enter to try again", simulation.score());
            draw_banner(scene, playfield, "THE SWAMP CLAIMS YOU", &score);
        }
        ScreenState::Victory => {
            draw_world(simulation, scene);
            draw_victory(simulation, scene, playfield);
        }
    }
}

fn draw_title(scene: &mut Scene, playfield: Vec2) {
    let centre = playfield * 0.5;
    scene.rect(Vec2::ZERO, playfield, SHADE);
    scene.text("SWAMP BRAWLER", centre - Vec2::new(0.0, 40.0), 64.0, HUD_TEXT, TextAnchor::Centre);
    scene.text("Press Enter to start", centre + Vec2::new(0.0, 20.0), 28.0, HUD_TEXT, TextAnchor::Centre);
    scene.text(
        controls_line(),
        Vec2::new(centre.x, playfield.y - 30.0),
        18.0,
        HUD_TEXT.with_alpha(0.8),
        TextAnchor::Centre,
    );
}

fn draw_announcement(simulation: &Simulation, scene: &mut Scene, playfield: Vec2) {
    let config = simulation.config();
    let wave = simulation.wave();
    let subtitle = match config.boss_for_wave(wave) {
        Some(tier) => format!("{} approaches", config.boss(tier).name),
        None => "Get ready".to_owned(),
    };
    let progress = simulation.announcement_ticks() as f32 / config.waves.announcement_ticks.max(1) as f32;
    let alpha = 1.0 - (progress - 0.75).max(0.0) * 4.0;
    let centre = playfield * 0.5;
    scene.text(
        format!("WAVE {wave}"),
        centre,
        56.0,
        HUD_TEXT.with_alpha(alpha),
        TextAnchor::Centre,
    );
    scene.text(
        subtitle,
        centre + Vec2::new(0.0, 40.0),
        24.0,
        HUD_TEXT.with_alpha(alpha),
        TextAnchor::Centre,
    );
}

fn draw_banner(scene: &mut Scene, playfield: Vec2, title: &str, subtitle: &str) {
    let centre = playfield * 0.5;
    scene.rect(Vec2::ZERO, playfield, SHADE);
    scene.text(title, centre, 48.0, HUD_TEXT, TextAnchor::Centre);
    scene.text(subtitle, centre + Vec2::new(0.0, 40.0), 22.0, HUD_TEXT, TextAnchor::Centre);
}

fn draw_victory(simulation: &Simulation, scene: &mut Scene, playfield: Vec2) {
    let Some(victory) = simulation.victory() else {
        return;
    };
    match victory.stage() {
        VictoryStage::Announcement => {
            let centre = playfield * 0.5;
            let shown = (victory.ticks() + 1).min(VICTORY_FADE_TICKS);
            let fade = shown as f32 / VICTORY_FADE_TICKS as f32;
            scene.text(
                "VICTORY",
                centre,
                64.0,
                METER_FILL.with_alpha(fade),
                TextAnchor::Centre,
            );
            scene.text(
                format!("Score {}", simulation.score()),
                centre + Vec2::new(0.0, 44.0),
                26.0,
                HUD_TEXT.with_alpha(fade),
                TextAnchor::Centre,
            );
        }
        VictoryStage::Walk => {}
        VictoryStage::Finale => draw_banner(
            scene,
            playfield,
            "THE SWAMP IS SAFE",
            &format!("Final score {}  |  Press Enter to play again", simulation.score()),
        ),
    }
}

fn draw_world(simulation: &Simulation, scene: &mut Scene) {
    let world = simulation.world();

    if let Some(portal) = query::portal(world) {
        scene.circle(portal.centre, portal.radius, Color::from_rgb_u8(90, 30, 140).with_alpha(0.7));
        scene.circle(portal.centre, portal.radius * 0.6, Color::from_rgb_u8(20, 0, 40).with_alpha(0.8));
        for particle in &portal.particles {
            scene.circle(
                particle.position,
                3.0,
                Color::from_rgb_u8(200, 140, 255).with_alpha(particle.fade),
            );
        }
    }

    for cloud in query::cloud_view(world).iter() {
        let fade = cloud.lifetime as f32 / cloud.max_lifetime.max(1) as f32;
        scene.circle(cloud.centre, cloud.radius, Color::from_rgb_u8(120, 170, 60).with_alpha(0.5 * fade));
    }

    for pickup in query::pickup_view(world).iter() {
        scene.rect(pickup.position, pickup.size, pickup_color(pickup.rarity));
    }

    for enemy in query::enemy_view(world).iter() {
        let [red, green, blue] = enemy.color;
        let fallback = flash(Color::from_rgb_u8(red, green, blue), enemy.hit_flash);
        scene.sprite(enemy_sprite(enemy.kind), enemy.position, enemy.size, false, fallback);
        if enemy.health < enemy.max_health {
            health_bar(
                scene,
                enemy.position - Vec2::new(0.0, 8.0),
                Vec2::new(enemy.size.x, 4.0),
                enemy.health,
                enemy.max_health,
                HEALTH_FILL,
            );
        }
    }

    if let Some(boss) = query::boss(world) {
        let fallback = flash(Color::from_rgb_u8(200, 200, 210), boss.hit_flash);
        scene.sprite(SpriteKey::Boss, boss.position, boss.size, false, fallback);
    }

    for projectile in query::projectile_view(world).iter() {
        let (radius, color) = match projectile.owner {
            ProjectileOwner::Enemy(_) => (5.0, Color::from_rgb_u8(255, 150, 40)),
            ProjectileOwner::Boss => (8.0, Color::from_rgb_u8(230, 80, 255)),
        };
        scene.circle(projectile.position, radius, color);
    }

    let player = query::player(world);
    if let Some(mount) = &player.mount {
        scene.sprite(
            SpriteKey::Mount,
            mount.position,
            mount.size,
            mount.facing == Facing::Left,
            Color::from_rgb_u8(140, 90, 50),
        );
    }
    let base = if player.stained > 0 {
        Color::from_rgb_u8(120, 140, 60)
    } else {
        Color::from_rgb_u8(70, 130, 220)
    };
    scene.commands.push(DrawCommand::Sprite {
        key: SpriteKey::Player,
        position: player.position,
        size: player.size,
        flip_x: player.facing == Facing::Left,
        tint: if player.hit_flash > 0 {
            Color::from_rgb_u8(255, 120, 120)
        } else {
            Color::WHITE
        },
        fallback: flash(base, player.hit_flash),
    });

    for swing in query::swings(world) {
        let extent = match swing.kind {
            AttackKind::Punch => Vec2::new(40.0, 30.0),
            AttackKind::Kick => Vec2::new(60.0, 40.0),
        };
        let fade = 1.0 - swing.frame as f32 / swing.frames.max(1) as f32;
        scene.outline(swing.position - extent * 0.5, extent, 3.0, HUD_TEXT.with_alpha(fade));
    }
}

fn draw_hud(simulation: &Simulation, scene: &mut Scene, playfield: Vec2) {
    let world = simulation.world();
    let player = query::player(world);

    scene.text("HP", Vec2::new(10.0, 26.0), 20.0, HUD_TEXT, TextAnchor::Left);
    health_bar(
        scene,
        Vec2::new(44.0, 12.0),
        Vec2::new(200.0, 16.0),
        player.health,
        player.max_health,
        HEALTH_FILL,
    );

    let share = if player.max_charge > 0.0 {
        (player.charge / player.max_charge).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let meter_color = if player.ready_flash > 0 && (player.ready_flash / 10) % 2 == 0 {
        METER_FILL.lighten(0.6)
    } else {
        METER_FILL
    };
    scene.text("MOUNT", Vec2::new(10.0, 50.0), 16.0, HUD_TEXT, TextAnchor::Left);
    scene.rect(Vec2::new(64.0, 40.0), Vec2::new(180.0, 10.0), HEALTH_BACK);
    scene.rect(Vec2::new(64.0, 40.0), Vec2::new(180.0 * share, 10.0), meter_color);
    if player.can_summon() {
        scene.text("SPACE!", Vec2::new(250.0, 50.0), 16.0, meter_color, TextAnchor::Left);
    }

    scene.text(
        format!("Wave {}", simulation.wave()),
        Vec2::new(playfield.x * 0.5, 26.0),
        24.0,
        HUD_TEXT,
        TextAnchor::Centre,
    );
    scene.text(
        format!("Score {}", simulation.score()),
        Vec2::new(playfield.x - 200.0, 26.0),
        22.0,
        HUD_TEXT,
        TextAnchor::Left,
    );

    if let Some(boss) = query::boss(world) {
        let width = playfield.x * 0.5;
        let origin = Vec2::new((playfield.x - width) * 0.5, playfield.y - 40.0);
        scene.text(boss.name, origin - Vec2::new(0.0, 6.0), 20.0, HUD_TEXT, TextAnchor::Left);
        health_bar(scene, origin, Vec2::new(width, 14.0), boss.health, boss.max_health, BOSS_FILL);
    }

    scene.text(
        controls_line(),
        Vec2::new(10.0, playfield.y - 8.0),
        14.0,
        HUD_TEXT.with_alpha(0.6),
        TextAnchor::Left,
    );

    let button = simulation.pause_button();
    scene.rect(button.origin, button.size, SHADE);
    scene.outline(button.origin, button.size, 2.0, HUD_TEXT);
    let bar = Vec2::new(button.size.x * 0.15, button.size.y * 0.5);
    let top = button.origin.y + button.size.y * 0.25;
    scene.rect(Vec2::new(button.origin.x + button.size.x * 0.28, top), bar, HUD_TEXT);
    scene.rect(Vec2::new(button.origin.x + button.size.x * 0.57, top), bar, HUD_TEXT);
}

fn health_bar(scene: &mut Scene, origin: Vec2, size: Vec2, health: u32, max_health: u32, fill: Color) {
    let share = if max_health == 0 {
        0.0
    } else {
        (health as f32 / max_health as f32).clamp(0.0, 1.0)
    };
    scene.rect(origin, size, HEALTH_BACK);
    scene.rect(origin, Vec2::new(size.x * share, size.y), fill);
}

fn flash(color: Color, hit_flash: u32) -> Color {
    if hit_flash > 0 {
        Color::WHITE
    } else {
        color
    }
}

fn enemy_sprite(kind: EnemyKind) -> SpriteKey {
    match kind {
        EnemyKind::Basic => SpriteKey::EnemyBasic,
        EnemyKind::Fast => SpriteKey::EnemyFast,
        EnemyKind::Gunner => SpriteKey::EnemyGunner,
    }
}

fn pickup_color(rarity: PickupRarity) -> Color {
    match rarity {
        PickupRarity::Common => Color::from_rgb_u8(90, 200, 90),
        PickupRarity::Rare => Color::from_rgb_u8(80, 140, 255),
        PickupRarity::Epic => Color::from_rgb_u8(230, 120, 255),
    }
}

fn controls_line() -> &'static str {
    "WASD move  Q punch  R kick  E cloud  Space mount  P pause  Esc quit"
}
