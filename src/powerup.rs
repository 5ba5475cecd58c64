use crate::pixel::{PixelBuf, Rgb, Viewport, WHITE};
use crate::CANVAS_W;

pub const POWER_UP_SIZE: f64 = 30.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PowerUpKind {
    /// Full invulnerability: collisions are ignored, not merely survived.
    Shield,
    /// Double points per pipe passed.
    Multiplier,
    /// Half scroll speed, doubled pipe spawn interval.
    SlowMotion,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Shield,
        PowerUpKind::Multiplier,
        PowerUpKind::SlowMotion,
    ];

    pub fn color(self) -> Rgb {
        match self {
            PowerUpKind::Shield => Rgb(30, 144, 255),
            PowerUpKind::Multiplier => Rgb(255, 215, 0),
            PowerUpKind::SlowMotion => Rgb(153, 50, 204),
        }
    }
}

/// A collectible floating in a pipe gap. Spawned at the right edge, scrolls
/// left at the same speed as the pipes.
pub struct PowerUp {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
    pub kind: PowerUpKind,
    pub collected: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, speed: f64, y: f64) -> Self {
        Self {
            x: CANVAS_W,
            y,
            speed,
            kind,
            collected: false,
        }
    }

    pub fn size(&self) -> f64 {
        POWER_UP_SIZE
    }

    pub fn update(&mut self) {
        self.x -= self.speed;
    }

    pub fn is_offscreen(&self) -> bool {
        self.x + POWER_UP_SIZE < 0.0
    }

    pub fn draw(&self, buf: &mut PixelBuf, v: Viewport) {
        if self.collected {
            return;
        }
        let cx = v.x(self.x + POWER_UP_SIZE / 2.0);
        let cy = v.y(self.y + POWER_UP_SIZE / 2.0);
        let rx = v.w(POWER_UP_SIZE / 2.0);
        let ry = v.h(POWER_UP_SIZE / 2.0);
        let c = self.kind.color();

        for dy in -ry..=ry {
            for dx in -rx..=rx {
                let nx = dx as f64 / rx.max(1) as f64;
                let ny = dy as f64 / ry.max(1) as f64;
                if nx * nx + ny * ny <= 1.0 {
                    buf.set(cx + dx, cy + dy, c);
                }
            }
        }

        // A small white mark so kinds read differently even at low scale:
        // one dot for shield, two for multiplier, three for slow motion.
        let dots = match self.kind {
            PowerUpKind::Shield => 1,
            PowerUpKind::Multiplier => 2,
            PowerUpKind::SlowMotion => 3,
        };
        let step = (rx / 2).max(1);
        let start = cx - step * (dots - 1) / 2;
        for i in 0..dots {
            buf.set(start + i * step, cy, WHITE);
        }
    }
}
