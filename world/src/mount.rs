use std::collections::BTreeMap;

use glam::Vec2;
use swamp_brawler_core::{config::MountTuning, Facing, TargetId};

/// Summoned companion that tramples enemies near the player.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Mount {
    pub(crate) position: Vec2,
    pub(crate) size: Vec2,
    pub(crate) speed: f32,
    pub(crate) lifetime: u32,
    pub(crate) damage: u32,
    pub(crate) contacts: BTreeMap<TargetId, u32>,
    pub(crate) facing: Facing,
}

impl Mount {
    pub(crate) fn new(position: Vec2, tuning: &MountTuning) -> Self {
        Self {
            position,
            size: tuning.size,
            speed: tuning.speed,
            lifetime: tuning.lifetime_ticks,
            damage: tuning.damage,
            contacts: BTreeMap::new(),
            facing: Facing::Right,
        }
    }

    pub(crate) fn centre(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Moves toward `target` without overshooting and counts down every timer.
    ///
    /// Returns `true` once the lifetime has elapsed.
    pub(crate) fn advance(&mut self, target: Vec2, bounds: Vec2) -> bool {
        let offset = target - self.position;
        let distance = offset.length();
        if distance > f32::EPSILON {
            self.position += offset / distance * distance.min(self.speed);
        }
        if offset.x > 0.0 {
            self.facing = Facing::Right;
        } else if offset.x < 0.0 {
            self.facing = Facing::Left;
        }
        let max = (bounds - self.size).max(Vec2::ZERO);
        self.position = self.position.clamp(Vec2::ZERO, max);

        for remaining in self.contacts.values_mut() {
            *remaining = remaining.saturating_sub(1);
        }
        self.contacts.retain(|_, remaining| *remaining > 0);

        self.lifetime = self.lifetime.saturating_sub(1);
        self.lifetime == 0
    }

    pub(crate) fn start_contact_cooldown(&mut self, target: TargetId, ticks: u32) {
        if ticks > 0 {
            let _ = self.contacts.insert(target, ticks);
        }
    }
}
