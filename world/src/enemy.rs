use std::f32::consts::TAU;

use glam::Vec2;
use swamp_brawler_core::{
    config::{BossTuning, EnemyTuning, GunnerTuning},
    BossPattern, BossTier, EnemyId, EnemyKind,
};

use crate::actor::{direction, Body};

/// Regular hostile walker.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) kind: EnemyKind,
    pub(crate) body: Body,
    pub(crate) base_speed: f32,
    pub(crate) homing: f32,
    pub(crate) color: [u8; 3],
    pub(crate) reload: u32,
}

impl Enemy {
    pub(crate) fn new(
        id: EnemyId,
        kind: EnemyKind,
        position: Vec2,
        velocity: Vec2,
        base_speed: f32,
        tuning: &EnemyTuning,
        gunfire: &GunnerTuning,
    ) -> Self {
        let mut body = Body::new(
            position,
            tuning.size,
            tuning.max_health,
            tuning.knockback_resistance,
        );
        body.velocity = velocity;
        Self {
            id,
            kind,
            body,
            base_speed,
            homing: tuning.homing,
            color: tuning.color,
            reload: match kind {
                EnemyKind::Gunner => gunfire.reload_ticks,
                EnemyKind::Basic | EnemyKind::Fast => 0,
            },
        }
    }

    pub(crate) fn advance(&mut self, player_centre: Vec2) {
        self.body
            .home_toward(player_centre, self.base_speed, self.homing);
        self.body.integrate();
    }

    /// Counts down the reload and returns the aim direction when a shot is due.
    pub(crate) fn aim(&mut self, player_centre: Vec2, gunfire: &GunnerTuning) -> Option<Vec2> {
        if self.kind != EnemyKind::Gunner {
            return None;
        }
        self.reload = self.reload.saturating_sub(1);
        if self.reload > 0 {
            return None;
        }
        let centre = self.body.centre();
        if centre.distance(player_centre) > gunfire.range {
            return None;
        }
        self.reload = gunfire.reload_ticks;
        Some(direction(centre, player_centre))
    }
}

/// Boss bound to the player for the duration of a boss wave.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Boss {
    pub(crate) tier: BossTier,
    pub(crate) name: String,
    pub(crate) body: Body,
    pub(crate) speed: f32,
    pub(crate) charge_speed: f32,
    pub(crate) homing: f32,
    pub(crate) visual_scale: f32,
    pub(crate) pattern: BossPattern,
    pub(crate) cooldown: u32,
    pub(crate) cooldown_ticks: u32,
}

impl Boss {
    /// Creates a boss centred on `centre`. The first executed phase is a charge.
    pub(crate) fn new(tier: BossTier, centre: Vec2, tuning: &BossTuning) -> Self {
        Self {
            tier,
            name: tuning.name.clone(),
            body: Body::new(
                centre - tuning.size * 0.5,
                tuning.size,
                tuning.max_health,
                tuning.knockback_resistance,
            ),
            speed: tuning.speed,
            charge_speed: tuning.charge_speed,
            homing: tuning.homing,
            visual_scale: tuning.visual_scale,
            pattern: BossPattern::Ranged,
            cooldown: tuning.attack_cooldown_ticks,
            cooldown_ticks: tuning.attack_cooldown_ticks,
        }
    }

    /// Moves the boss and returns the phase executed this tick, if any.
    pub(crate) fn advance(&mut self, player_centre: Vec2) -> Option<BossPattern> {
        self.body.home_toward(player_centre, self.speed, self.homing);
        self.body.integrate();

        self.cooldown = self.cooldown.saturating_sub(1);
        if self.cooldown > 0 {
            return None;
        }
        self.pattern = self.pattern.next();
        self.cooldown = self.cooldown_ticks;
        if self.pattern == BossPattern::Charge {
            self.body.velocity = direction(self.body.centre(), player_centre) * self.charge_speed;
        }
        Some(self.pattern)
    }
}

/// Evenly spaced unit vectors of a radial fan.
pub(crate) fn radial_fan(count: u32) -> impl Iterator<Item = Vec2> {
    let step = TAU / count.max(1) as f32;
    (0..count).map(move |index| Vec2::from_angle(step * index as f32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use swamp_brawler_core::GameConfig;

    #[test]
    fn gunner_fires_only_within_range_after_reload() {
        let config = GameConfig::default();
        let gunfire = &config.enemies.gunfire;
        let mut gunner = Enemy::new(
            EnemyId::new(0),
            EnemyKind::Gunner,
            Vec2::new(100.0, 100.0),
            Vec2::ZERO,
            1.5,
            &config.enemies.gunner,
            gunfire,
        );
        gunner.reload = 1;

        let far = Vec2::new(100.0 + gunfire.range * 2.0, 130.0);
        assert_eq!(gunner.aim(far, gunfire), None);
        assert_eq!(gunner.reload, 0);

        let near = gunner.body.centre() + Vec2::new(100.0, 0.0);
        assert_eq!(gunner.aim(near, gunfire), Some(Vec2::X));
        assert_eq!(gunner.reload, gunfire.reload_ticks);
    }

    #[test]
    fn walkers_never_fire() {
        let config = GameConfig::default();
        let mut walker = Enemy::new(
            EnemyId::new(1),
            EnemyKind::Basic,
            Vec2::ZERO,
            Vec2::ZERO,
            2.0,
            &config.enemies.basic,
            &config.enemies.gunfire,
        );
        assert_eq!(walker.aim(Vec2::new(10.0, 10.0), &config.enemies.gunfire), None);
    }

    #[test]
    fn boss_cycles_patterns_starting_with_charge() {
        let config = GameConfig::default();
        let tuning = &config.bosses.warden;
        let mut boss = Boss::new(BossTier::Warden, Vec2::new(400.0, 300.0), tuning);
        let player = Vec2::new(100.0, 300.0);

        let mut executed = Vec::new();
        for _ in 0..tuning.attack_cooldown_ticks * 3 {
            if let Some(pattern) = boss.advance(player) {
                executed.push(pattern);
            }
        }

        assert_eq!(
            executed,
            vec![
                BossPattern::Charge,
                BossPattern::SpawnMinions,
                BossPattern::Ranged
            ]
        );
        assert_eq!(boss.cooldown, tuning.attack_cooldown_ticks);
    }

    #[test]
    fn radial_fan_spreads_evenly() {
        let directions: Vec<Vec2> = radial_fan(4).collect();
        assert_eq!(directions.len(), 4);
        assert!(directions[0].abs_diff_eq(Vec2::X, 1e-5));
        assert!(directions[2].abs_diff_eq(Vec2::NEG_X, 1e-5));
    }
}
