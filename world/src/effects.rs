use glam::Vec2;
use rand::Rng;
use swamp_brawler_core::{
    config::{CloudTuning, PortalTuning},
    AttackKind, BossTier, Facing, PickupId, PickupRarity,
};

/// Visible swing left behind by a melee attack.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct AttackSwing {
    pub(crate) kind: AttackKind,
    pub(crate) position: Vec2,
    pub(crate) facing: Facing,
    pub(crate) frame: u32,
    pub(crate) frames: u32,
}

impl AttackSwing {
    pub(crate) fn advance(&mut self) -> bool {
        self.frame = self.frame.saturating_add(1);
        self.frame < self.frames
    }
}

/// Expanding cloud that damages everything inside its radius.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct AreaCloud {
    pub(crate) centre: Vec2,
    pub(crate) radius: f32,
    pub(crate) lifetime: u32,
    pub(crate) max_lifetime: u32,
}

impl AreaCloud {
    pub(crate) fn new(centre: Vec2, tuning: &CloudTuning) -> Self {
        Self {
            centre,
            radius: tuning.initial_radius,
            lifetime: tuning.lifetime_ticks,
            max_lifetime: tuning.lifetime_ticks,
        }
    }

    pub(crate) fn advance(&mut self, tuning: &CloudTuning) -> bool {
        self.radius = (self.radius + tuning.growth).min(tuning.max_radius);
        self.lifetime = self.lifetime.saturating_sub(1);
        self.lifetime > 0
    }
}

/// Direction the portal radius is moving in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PortalPhase {
    Opening,
    Closing,
}

/// Noteworthy moments of the portal animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PortalStep {
    Animating,
    FullyOpen,
    Collapsed,
}

/// Drifting spark emitted from the portal rim.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Particle {
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) life: u32,
    pub(crate) max_life: u32,
}

/// Summoning portal shown while a boss enters the playfield.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Portal {
    pub(crate) tier: BossTier,
    pub(crate) centre: Vec2,
    pub(crate) radius: f32,
    pub(crate) phase: PortalPhase,
    pub(crate) particles: Vec<Particle>,
}

impl Portal {
    pub(crate) fn new(tier: BossTier, centre: Vec2) -> Self {
        Self {
            tier,
            centre,
            radius: 0.0,
            phase: PortalPhase::Opening,
            particles: Vec::new(),
        }
    }

    pub(crate) fn advance<R: Rng>(&mut self, tuning: &PortalTuning, rng: &mut R) -> PortalStep {
        let step = match self.phase {
            PortalPhase::Opening => {
                self.radius = (self.radius + tuning.growth).min(tuning.max_radius);
                if self.radius >= tuning.max_radius {
                    self.phase = PortalPhase::Closing;
                    PortalStep::FullyOpen
                } else {
                    PortalStep::Animating
                }
            }
            PortalPhase::Closing => {
                self.radius = (self.radius - tuning.growth).max(0.0);
                if self.radius <= 0.0 {
                    PortalStep::Collapsed
                } else {
                    PortalStep::Animating
                }
            }
        };

        if rng.gen_bool(tuning.particle_chance.clamp(0.0, 1.0)) {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed = rng.gen_range(1.0..3.0);
            let direction = Vec2::from_angle(angle);
            self.particles.push(Particle {
                position: self.centre + direction * self.radius,
                velocity: direction * speed,
                life: tuning.particle_lifetime,
                max_life: tuning.particle_lifetime,
            });
        }
        for particle in &mut self.particles {
            particle.position += particle.velocity;
            particle.life = particle.life.saturating_sub(1);
        }
        self.particles.retain(|particle| particle.life > 0);

        step
    }
}

/// Healing pickup dropped by a defeated enemy.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Pickup {
    pub(crate) id: PickupId,
    pub(crate) rarity: PickupRarity,
    pub(crate) position: Vec2,
    pub(crate) size: Vec2,
    pub(crate) heal: u32,
    pub(crate) lifetime: u32,
}

impl Pickup {
    pub(crate) fn centre(&self) -> Vec2 {
        self.position + self.size * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn cloud_grows_to_cap_and_expires() {
        let tuning = CloudTuning::default();
        let mut cloud = AreaCloud::new(Vec2::ZERO, &tuning);

        let mut ticks = 0;
        while cloud.advance(&tuning) {
            ticks += 1;
        }

        assert_eq!(cloud.radius, tuning.max_radius);
        assert_eq!(ticks + 1, tuning.lifetime_ticks);
    }

    #[test]
    fn portal_opens_then_collapses() {
        let tuning = PortalTuning::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut portal = Portal::new(BossTier::Warden, Vec2::new(400.0, 300.0));

        let mut steps = Vec::new();
        loop {
            let step = portal.advance(&tuning, &mut rng);
            if step != PortalStep::Animating {
                steps.push(step);
            }
            if step == PortalStep::Collapsed {
                break;
            }
        }

        assert_eq!(steps, vec![PortalStep::FullyOpen, PortalStep::Collapsed]);
        assert_eq!(portal.radius, 0.0);
    }

    #[test]
    fn swing_lasts_its_frame_count() {
        let mut swing = AttackSwing {
            kind: AttackKind::Punch,
            position: Vec2::ZERO,
            facing: Facing::Right,
            frame: 0,
            frames: 3,
        };
        assert!(swing.advance());
        assert!(swing.advance());
        assert!(!swing.advance());
    }
}
