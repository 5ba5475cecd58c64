use rand::Rng;

use crate::pixel::{PixelBuf, Rgb, Viewport};
use crate::{CANVAS_H, CANVAS_W};

pub const PIPE_WIDTH: f64 = 60.0;
pub const GAP_HEIGHT: f64 = 200.0;
/// Minimum distance the gap keeps from the top and bottom edges.
const GAP_MARGIN: f64 = 50.0;

const PIPE_L: Rgb = Rgb(32, 150, 80);
const PIPE_M: Rgb = Rgb(46, 204, 113);
const PIPE_HI: Rgb = Rgb(88, 224, 140);
const CAP: Rgb = Rgb(39, 174, 96);
const CAP_DARK: Rgb = Rgb(24, 120, 64);

/// One obstacle: a pipe pair with a vertical gap. `speed` is per-entity so
/// slow motion can rewrite it on live pipes and restore it on expiry.
pub struct Pipe {
    pub x: f64,
    pub speed: f64,
    pub gap_start: f64,
    pub passed: bool,
}

impl Pipe {
    pub fn new(speed: f64, rng: &mut impl Rng) -> Self {
        Self {
            x: CANVAS_W,
            speed,
            gap_start: rng.gen_range(GAP_MARGIN..CANVAS_H - GAP_HEIGHT - GAP_MARGIN),
            passed: false,
        }
    }

    pub fn gap_end(&self) -> f64 {
        self.gap_start + GAP_HEIGHT
    }

    pub fn update(&mut self) {
        self.x -= self.speed;
    }

    pub fn is_offscreen(&self) -> bool {
        self.x + PIPE_WIDTH < 0.0
    }

    pub fn draw(&self, buf: &mut PixelBuf, v: Viewport) {
        let px = v.x(self.x);
        let pw = v.w(PIPE_WIDTH);
        let gap_top = v.y(self.gap_start);
        let gap_bot = v.y(self.gap_end());
        let cap_h = v.h(20.0);
        let cap_extra = v.w(5.0);

        // Bodies, shaded left-to-right
        for dx in 0..pw {
            let c = shade(dx, pw);
            for y in 0..gap_top - cap_h {
                buf.set(px + dx, y, c);
            }
            for y in (gap_bot + cap_h)..buf.h as i32 {
                buf.set(px + dx, y, c);
            }
        }

        // Caps overhang the body on both sides
        for dx in -cap_extra..(pw + cap_extra) {
            for y in (gap_top - cap_h)..gap_top {
                buf.set(px + dx, y, CAP);
            }
            for y in gap_bot..(gap_bot + cap_h) {
                buf.set(px + dx, y, CAP);
            }
            buf.set(px + dx, gap_top - 1, CAP_DARK);
            buf.set(px + dx, gap_bot, CAP_DARK);
        }
    }
}

fn shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 96 {
        Rgb::lerp(PIPE_L, PIPE_HI, (t * 8 / 3).min(256))
    } else {
        Rgb::lerp(PIPE_HI, PIPE_M, ((t - 96) * 8 / 5).min(256))
    }
}
