use glam::Vec2;

/// Physical body shared by the player, enemies and bosses.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Body {
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) size: Vec2,
    pub(crate) health: u32,
    pub(crate) max_health: u32,
    pub(crate) resistance: f32,
    pub(crate) hit_flash: u32,
}

impl Body {
    pub(crate) fn new(position: Vec2, size: Vec2, max_health: u32, resistance: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
            health: max_health,
            max_health,
            resistance,
            hit_flash: 0,
        }
    }

    /// Centre of the bounding box.
    pub(crate) fn centre(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Adds an impulse to the velocity without clamping.
    pub(crate) fn apply_knockback(&mut self, impulse: Vec2) {
        self.velocity += impulse;
    }

    /// Removes health, returning the amount actually lost.
    pub(crate) fn damage(&mut self, amount: u32, flash_ticks: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_sub(amount);
        self.hit_flash = flash_ticks;
        before - self.health
    }

    /// Restores health up to the maximum, returning the amount gained.
    pub(crate) fn heal(&mut self, amount: u32) -> u32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.health - before
    }

    pub(crate) fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Blends the velocity toward `target` travelling at `speed`.
    pub(crate) fn home_toward(&mut self, target: Vec2, speed: f32, bias: f32) {
        let offset = target - self.centre();
        if let Some(direction) = offset.try_normalize() {
            self.velocity = self.velocity * (1.0 - bias) + direction * speed * bias;
        }
    }

    /// Applies resistance, integrates the position and counts down the flash.
    pub(crate) fn integrate(&mut self) {
        self.velocity *= self.resistance;
        self.position += self.velocity;
        self.hit_flash = self.hit_flash.saturating_sub(1);
    }

    pub(crate) fn clamp_to(&mut self, bounds: Vec2) {
        let max = (bounds - self.size).max(Vec2::ZERO);
        self.position = self.position.clamp(Vec2::ZERO, max);
    }

    /// Reports whether the body left `bounds` by more than `margin`.
    pub(crate) fn escaped(&self, bounds: Vec2, margin: f32) -> bool {
        let p = self.position;
        p.x < -(self.size.x + margin)
            || p.y < -(self.size.y + margin)
            || p.x > bounds.x + margin
            || p.y > bounds.y + margin
    }
}

/// Unit vector pointing from `from` to `to`, or zero when they coincide.
pub(crate) fn direction(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> Body {
        Body::new(Vec2::new(100.0, 100.0), Vec2::new(50.0, 60.0), 30, 0.9)
    }

    #[test]
    fn damage_saturates_at_zero() {
        let mut body = body();
        assert_eq!(body.damage(20, 10), 20);
        assert_eq!(body.damage(20, 10), 10);
        assert_eq!(body.health, 0);
        assert!(body.is_dead());
        assert_eq!(body.hit_flash, 10);
    }

    #[test]
    fn heal_clamps_at_max_health() {
        let mut body = body();
        let _ = body.damage(5, 0);
        assert_eq!(body.heal(50), 5);
        assert_eq!(body.health, body.max_health);
    }

    #[test]
    fn knockback_is_damped_by_resistance() {
        let mut body = body();
        body.apply_knockback(Vec2::new(10.0, 0.0));
        body.integrate();
        assert_eq!(body.velocity, Vec2::new(9.0, 0.0));
        assert_eq!(body.position, Vec2::new(109.0, 100.0));
    }

    #[test]
    fn clamp_keeps_box_inside_bounds() {
        let mut body = body();
        body.position = Vec2::new(790.0, -5.0);
        body.clamp_to(Vec2::new(800.0, 600.0));
        assert_eq!(body.position, Vec2::new(750.0, 0.0));
    }

    #[test]
    fn escape_requires_clearing_the_margin() {
        let mut body = body();
        let bounds = Vec2::new(800.0, 600.0);
        body.position = Vec2::new(-60.0, 100.0);
        assert!(!body.escaped(bounds, 20.0));
        body.position = Vec2::new(-71.0, 100.0);
        assert!(body.escaped(bounds, 20.0));
        body.position = Vec2::new(821.0, 100.0);
        assert!(body.escaped(bounds, 20.0));
    }
}
