use glam::Vec2;
use swamp_brawler_core::{ProjectileId, ProjectileOwner};

/// Hostile projectile in flight. The position is the projectile centre.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) owner: ProjectileOwner,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) lifetime: u32,
    pub(crate) damage: u32,
}

impl Projectile {
    /// Integrates the projectile and reports whether it is still live.
    pub(crate) fn advance(&mut self, bounds: Vec2) -> bool {
        self.position += self.velocity;
        self.lifetime = self.lifetime.saturating_sub(1);
        self.lifetime > 0
            && self.position.x >= 0.0
            && self.position.y >= 0.0
            && self.position.x <= bounds.x
            && self.position.y <= bounds.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projectile(position: Vec2, velocity: Vec2, lifetime: u32) -> Projectile {
        Projectile {
            id: ProjectileId::new(0),
            owner: ProjectileOwner::Boss,
            position,
            velocity,
            lifetime,
            damage: 10,
        }
    }

    #[test]
    fn expires_after_lifetime() {
        let bounds = Vec2::new(800.0, 600.0);
        let mut shot = projectile(Vec2::new(400.0, 300.0), Vec2::X, 2);
        assert!(shot.advance(bounds));
        assert!(!shot.advance(bounds));
    }

    #[test]
    fn leaving_the_playfield_ends_flight() {
        let bounds = Vec2::new(800.0, 600.0);
        let mut shot = projectile(Vec2::new(798.0, 300.0), Vec2::new(5.0, 0.0), 100);
        assert!(!shot.advance(bounds));
    }
}
