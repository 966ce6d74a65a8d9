use glam::Vec2;
use swamp_brawler_core::{AttackKind, Facing, GameConfig};

use crate::{actor::Body, mount::Mount};

/// Period of the ready pulse shown while the mount meter is full.
const READY_PULSE_TICKS: u32 = 30;

/// Player-controlled brawler.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Player {
    pub(crate) body: Body,
    pub(crate) facing: Facing,
    pub(crate) punch_cooldown: u32,
    pub(crate) kick_cooldown: u32,
    pub(crate) cloud_cooldown: u32,
    pub(crate) charge: f32,
    pub(crate) mount: Option<Mount>,
    pub(crate) stained: u32,
    pub(crate) ready_flash: u32,
}

/// Outcome of a single player step that other entities react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PlayerStep {
    Moved,
    MountExpired,
}

impl Player {
    pub(crate) fn new(config: &GameConfig) -> Self {
        let tuning = &config.player;
        Self {
            body: Body::new(
                tuning.spawn,
                tuning.size,
                tuning.max_health,
                tuning.knockback_resistance,
            ),
            facing: Facing::Right,
            punch_cooldown: 0,
            kick_cooldown: 0,
            cloud_cooldown: 0,
            charge: 0.0,
            mount: None,
            stained: 0,
            ready_flash: 0,
        }
    }

    pub(crate) fn cooldown(&self, kind: AttackKind) -> u32 {
        match kind {
            AttackKind::Punch => self.punch_cooldown,
            AttackKind::Kick => self.kick_cooldown,
        }
    }

    pub(crate) fn start_cooldown(&mut self, kind: AttackKind, ticks: u32) {
        match kind {
            AttackKind::Punch => self.punch_cooldown = ticks,
            AttackKind::Kick => self.kick_cooldown = ticks,
        }
    }

    /// Fills the mount meter unless a mount is already out.
    pub(crate) fn add_charge(&mut self, amount: f32, max_charge: f32) {
        if self.mount.is_some() {
            return;
        }
        self.charge = (self.charge + amount).clamp(0.0, max_charge);
    }

    pub(crate) fn advance(&mut self, movement: Vec2, config: &GameConfig, bounds: Vec2) -> PlayerStep {
        self.punch_cooldown = self.punch_cooldown.saturating_sub(1);
        self.kick_cooldown = self.kick_cooldown.saturating_sub(1);
        self.cloud_cooldown = self.cloud_cooldown.saturating_sub(1);
        self.stained = self.stained.saturating_sub(1);

        if self.mount.is_none() && self.charge >= config.mount.max_charge {
            self.ready_flash = (self.ready_flash + 1) % READY_PULSE_TICKS;
        } else {
            self.ready_flash = 0;
        }

        let movement = movement.clamp(Vec2::NEG_ONE, Vec2::ONE);
        if movement.x < 0.0 {
            self.facing = Facing::Left;
        } else if movement.x > 0.0 {
            self.facing = Facing::Right;
        }

        let speed = self
            .mount
            .as_ref()
            .map_or(config.player.speed, |mount| mount.speed);
        let blend = config.player.acceleration;
        self.body.velocity = self.body.velocity * (1.0 - blend) + movement * speed * blend;
        self.body.integrate();
        self.body.clamp_to(bounds);

        let position = self.body.position;
        let expired = self
            .mount
            .as_mut()
            .is_some_and(|mount| mount.advance(position, bounds));
        if expired {
            self.mount = None;
            return PlayerStep::MountExpired;
        }
        PlayerStep::Moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn movement_accelerates_gradually_and_updates_facing() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        let start = player.body.position;

        let _ = player.advance(Vec2::new(-1.0, 0.0), &config, BOUNDS);

        assert_eq!(player.facing, Facing::Left);
        let moved = start.x - player.body.position.x;
        assert!(moved > 0.0 && moved < config.player.speed);
    }

    #[test]
    fn cooldowns_count_down_to_zero() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        player.start_cooldown(AttackKind::Punch, 1);

        let _ = player.advance(Vec2::ZERO, &config, BOUNDS);
        let _ = player.advance(Vec2::ZERO, &config, BOUNDS);

        assert_eq!(player.cooldown(AttackKind::Punch), 0);
    }

    #[test]
    fn charge_is_clamped_and_frozen_while_mounted() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);

        player.add_charge(250.0, config.mount.max_charge);
        assert_eq!(player.charge, 100.0);

        player.charge = 0.0;
        player.mount = Some(Mount::new(player.body.position, &config.mount));
        player.add_charge(40.0, config.mount.max_charge);
        assert_eq!(player.charge, 0.0);
    }

    #[test]
    fn mount_expiry_is_reported_once() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        let mut mount = Mount::new(player.body.position, &config.mount);
        mount.lifetime = 1;
        player.mount = Some(mount);

        assert_eq!(
            player.advance(Vec2::ZERO, &config, BOUNDS),
            PlayerStep::MountExpired
        );
        assert!(player.mount.is_none());
        assert_eq!(player.advance(Vec2::ZERO, &config, BOUNDS), PlayerStep::Moved);
    }
}
