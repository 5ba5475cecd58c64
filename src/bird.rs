use std::f64::consts::FRAC_PI_4;

use crate::pipe::{PIPE_WIDTH, Pipe};
use crate::pixel::{PixelBuf, Rgb, Viewport, WHITE};
use crate::powerup::PowerUp;
use crate::{CANVAS_H, CANVAS_W};

pub const BIRD_WIDTH: f64 = 40.0;
pub const BIRD_HEIGHT: f64 = 30.0;
pub const GRAVITY: f64 = 0.35;
pub const JUMP_FORCE: f64 = -8.0;

const BODY: Rgb = Rgb(255, 215, 0);
const BODY_HI: Rgb = Rgb(255, 235, 90);
const WING: Rgb = Rgb(255, 165, 0);
const PUPIL: Rgb = Rgb(20, 20, 20);
const BEAK: Rgb = Rgb(225, 75, 35);
const SHIELD_RING: Rgb = Rgb(30, 144, 255);

/// The player avatar. Position is the top-left of a 40x30 bounding box on
/// the logical canvas, matching the collision math below.
pub struct Bird {
    pub x: f64,
    pub y: f64,
    pub velocity: f64,
    pub rotation: f64,
}

impl Bird {
    pub fn new() -> Self {
        Self {
            x: CANVAS_W / 3.0,
            y: CANVAS_H / 2.0,
            velocity: 0.0,
            rotation: 0.0,
        }
    }

    /// A jump replaces the current velocity rather than adding to it, so
    /// mashing the key can't stack into an uncontrollable launch.
    pub fn jump(&mut self) {
        self.velocity = JUMP_FORCE;
    }

    /// One frame of physics: gravity into velocity, velocity into position,
    /// cosmetic rotation, then clamp to the canvas with velocity zeroed.
    pub fn update(&mut self) {
        self.velocity += GRAVITY;
        self.y += self.velocity;

        self.rotation = (self.velocity * 0.1).clamp(-FRAC_PI_4, FRAC_PI_4);

        if self.y < 0.0 {
            self.y = 0.0;
            self.velocity = 0.0;
        }
        if self.y + BIRD_HEIGHT > CANVAS_H {
            self.y = CANVAS_H - BIRD_HEIGHT;
            self.velocity = 0.0;
        }
    }

    /// Axis-aligned box against the pipe's solid parts (everything outside
    /// the gap).
    pub fn collides_with(&self, pipe: &Pipe) -> bool {
        self.x < pipe.x + PIPE_WIDTH
            && self.x + BIRD_WIDTH > pipe.x
            && (self.y < pipe.gap_start || self.y + BIRD_HEIGHT > pipe.gap_end())
    }

    pub fn overlaps(&self, p: &PowerUp) -> bool {
        self.x < p.x + p.size()
            && self.x + BIRD_WIDTH > p.x
            && self.y < p.y + p.size()
            && self.y + BIRD_HEIGHT > p.y
    }

    pub fn on_ground(&self) -> bool {
        self.y + BIRD_HEIGHT >= CANVAS_H
    }

    pub fn draw(&self, buf: &mut PixelBuf, v: Viewport, shielded: bool) {
        let cx = v.x(self.x + BIRD_WIDTH / 2.0);
        let cy = v.y(self.y + BIRD_HEIGHT / 2.0);
        let hw = v.w(BIRD_WIDTH / 2.0);
        let hh = v.h(BIRD_HEIGHT / 2.0);

        // Rotation is rendered as a vertical shear of the head/tail ends.
        let tilt = (self.rotation / FRAC_PI_4 * hh as f64 * 0.6) as i32;

        if shielded {
            let r = (hw as f64 * 1.5) as i32;
            for a in 0..64 {
                let th = a as f64 / 64.0 * std::f64::consts::TAU;
                let px = cx + (th.cos() * r as f64) as i32;
                let py = cy + (th.sin() * r as f64 * v.sy / v.sx) as i32;
                buf.set(px, py, SHIELD_RING);
            }
        }

        // Body ellipse
        for dy in -hh..=hh {
            for dx in -hw..=hw {
                let nx = dx as f64 / hw.max(1) as f64;
                let ny = dy as f64 / hh.max(1) as f64;
                if nx * nx + ny * ny <= 1.0 {
                    let lean = (nx * tilt as f64) as i32;
                    let c = if ny < -0.4 { BODY_HI } else { BODY };
                    buf.set(cx + dx, cy + dy + lean, c);
                }
            }
        }

        // Wing
        let ww = (hw / 2).max(1);
        let wh = (hh * 2 / 3).max(1);
        buf.fill_rect(cx - hw / 2 - ww / 2, cy - wh / 2 + tilt / 2, ww, wh, WING);

        // Eye
        let ex = cx + hw / 2;
        let ey = cy - hh / 2 + tilt / 2;
        buf.fill_rect(ex, ey, (hw / 4).max(1), (hh / 3).max(1), WHITE);
        buf.set(ex + (hw / 4).max(1) - 1, ey, PUPIL);

        // Beak
        let bw = (hw / 2).max(1);
        buf.fill_rect(cx + hw, cy + tilt - 1, bw, (hh / 3).max(1), BEAK);
    }
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}
