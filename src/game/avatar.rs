// Player avatar: locomotion from a per-frame intent, health, and the
// timestamps that gate attacking (cooldown) and presentation (busy-window,
// damage flash).

use glam::Vec3;

use super::config::AvatarConfig;

/// Normalized per-frame input produced by the external input layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub turn_left: bool,
    pub turn_right: bool,
    pub move_forward: bool,
    pub move_backward: bool,
    pub attack_requested: bool,
}

/// Unit facing vector on the XZ plane. yaw = 0 faces +Z.
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

#[derive(Debug, Clone)]
pub struct AvatarState {
    pub position: Vec3,
    /// Radians, counter-clockwise seen from above.
    pub yaw: f32,
    health: u32,
    tuning: AvatarConfig,
    /// Clock time of the last accepted attack request.
    last_attack_at: Option<f64>,
    busy_until: f64,
    flash_until: f64,
}

impl AvatarState {
    pub fn new(position: Vec3, tuning: AvatarConfig) -> Self {
        Self {
            position,
            yaw: 0.0,
            health: tuning.max_health,
            tuning,
            last_attack_at: None,
            busy_until: f64::NEG_INFINITY,
            flash_until: f64::NEG_INFINITY,
        }
    }

    pub fn health(&self) -> u32 { self.health }
    pub fn max_health(&self) -> u32 { self.tuning.max_health }
    pub fn tuning(&self) -> &AvatarConfig { &self.tuning }
    pub fn is_defeated(&self) -> bool { self.health == 0 }

    pub fn forward(&self) -> Vec3 {
        forward_from_yaw(self.yaw)
    }

    /// Apply one tick of turning and walking.
    ///
    /// Opposite flags are applied independently, so left+right or
    /// forward+backward cancel exactly. Y is never touched.
    /// Speeds are per tick; frame time only advances the world clock in
    /// `World::tick`, so no `dt` is taken here.
    pub fn update(&mut self, intent: &Intent) {
        if intent.turn_left {
            self.yaw += self.tuning.rotate_speed;
        }
        if intent.turn_right {
            self.yaw -= self.tuning.rotate_speed;
        }

        let step = self.forward() * self.tuning.move_speed;
        if intent.move_forward {
            self.position += step;
        }
        if intent.move_backward {
            self.position -= step;
        }
    }

    /// Accept an attack request if the cooldown since the last accepted one
    /// has elapsed. Opens the busy-window on success.
    pub fn try_begin_attack(&mut self, now: f64) -> bool {
        let ready = match self.last_attack_at {
            None => true,
            Some(last) => now - last >= self.tuning.attack_cooldown as f64,
        };
        if ready {
            self.last_attack_at = Some(now);
            self.busy_until = now + self.tuning.attack_action_duration as f64;
        }
        ready
    }

    /// Subtract damage, clamped at zero, and start the damage flash.
    pub fn take_damage(&mut self, amount: u32, now: f64) {
        self.health = self.health.saturating_sub(amount);
        self.flash_until = now + self.tuning.damage_flash_duration as f64;
    }

    /// True while the post-attack busy-window is open.
    pub fn is_attacking(&self, now: f64) -> bool {
        now < self.busy_until
    }

    pub fn is_flashing(&self, now: f64) -> bool {
        now < self.flash_until
    }
}
