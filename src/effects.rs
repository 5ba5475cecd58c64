use crate::powerup::PowerUpKind;

pub const SHIELD_MS: f64 = 5000.0;
pub const MULTIPLIER_MS: f64 = 8000.0;
pub const SLOW_MOTION_MS: f64 = 6000.0;

/// Per-effect millisecond countdowns, decremented inside the frame tick so
/// expiry is deterministic under simulated time. Activating an effect that is
/// already running restarts its countdown; durations never stack.
#[derive(Default)]
pub struct Effects {
    shield: Option<f64>,
    multiplier: Option<f64>,
    slow_motion: Option<f64>,
    /// (game_speed, pipe_spawn_interval) captured when slow motion first
    /// engaged. Restored verbatim on expiry so a mid-change base speed is
    /// never clobbered by a recomputed default.
    pub slow_restore: Option<(f64, f64)>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shield(&self) -> bool {
        self.shield.is_some()
    }

    pub fn multiplier(&self) -> bool {
        self.multiplier.is_some()
    }

    pub fn slow_motion(&self) -> bool {
        self.slow_motion.is_some()
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.slot(kind).is_some()
    }

    /// Remaining time in ms, 0 if inactive. Drives the HUD.
    pub fn remaining_ms(&self, kind: PowerUpKind) -> f64 {
        self.slot(kind).unwrap_or(0.0)
    }

    fn slot(&self, kind: PowerUpKind) -> Option<f64> {
        match kind {
            PowerUpKind::Shield => self.shield,
            PowerUpKind::Multiplier => self.multiplier,
            PowerUpKind::SlowMotion => self.slow_motion,
        }
    }

    fn slot_mut(&mut self, kind: PowerUpKind) -> &mut Option<f64> {
        match kind {
            PowerUpKind::Shield => &mut self.shield,
            PowerUpKind::Multiplier => &mut self.multiplier,
            PowerUpKind::SlowMotion => &mut self.slow_motion,
        }
    }

    /// Start (or restart) the countdown for `kind`.
    pub fn activate(&mut self, kind: PowerUpKind) {
        let duration = match kind {
            PowerUpKind::Shield => SHIELD_MS,
            PowerUpKind::Multiplier => MULTIPLIER_MS,
            PowerUpKind::SlowMotion => SLOW_MOTION_MS,
        };
        *self.slot_mut(kind) = Some(duration);
    }

    /// Advance all countdowns by `dt_ms`, returning the kinds that expired
    /// this frame.
    pub fn tick(&mut self, dt_ms: f64) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for kind in PowerUpKind::ALL {
            let slot = self.slot_mut(kind);
            if let Some(remaining) = slot {
                *remaining -= dt_ms;
                if *remaining <= 0.0 {
                    *slot = None;
                    expired.push(kind);
                }
            }
        }
        expired
    }

    /// Drop every effect and any pending restore. Used on restart so a stale
    /// expiry can never fire into the next run.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
