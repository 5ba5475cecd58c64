use rand::Rng;

use crate::pixel::{PixelBuf, Rgb, Viewport};
use crate::{CANVAS_H, CANVAS_W};

/// Fraction of a theme transition completed per frame.
const TRANSITION_SPEED: f64 = 0.005;
const CLOUD_COUNT: usize = 5;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Theme {
    Day,
    Sunset,
    Night,
}

impl Theme {
    pub fn next(self) -> Theme {
        match self {
            Theme::Day => Theme::Sunset,
            Theme::Sunset => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }

    fn palette(self) -> Palette {
        match self {
            Theme::Day => Palette {
                sky_top: Rgb(135, 206, 235),
                sky_bot: Rgb(224, 246, 255),
                clouds: Rgb(255, 255, 255),
                mountains: Rgb(46, 139, 87),
            },
            Theme::Sunset => Palette {
                sky_top: Rgb(255, 127, 80),
                sky_bot: Rgb(255, 182, 193),
                clouds: Rgb(255, 228, 225),
                mountains: Rgb(74, 74, 74),
            },
            Theme::Night => Palette {
                sky_top: Rgb(25, 25, 112),
                sky_bot: Rgb(0, 0, 51),
                clouds: Rgb(72, 61, 139),
                mountains: Rgb(26, 26, 26),
            },
        }
    }
}

#[derive(Clone, Copy)]
struct Palette {
    sky_top: Rgb,
    sky_bot: Rgb,
    clouds: Rgb,
    mountains: Rgb,
}

impl Palette {
    fn blend(a: Palette, b: Palette, t: f64) -> Palette {
        Palette {
            sky_top: Rgb::mix(a.sky_top, b.sky_top, t),
            sky_bot: Rgb::mix(a.sky_bot, b.sky_bot, t),
            clouds: Rgb::mix(a.clouds, b.clouds, t),
            mountains: Rgb::mix(a.mountains, b.mountains, t),
        }
    }
}

struct Cloud {
    x: f64,
    y: f64,
    width: f64,
    speed: f64,
    opacity: f64,
}

/// Ambient scenery: a cyclic day/sunset/night sky that cross-fades between
/// themes, plus a handful of drifting clouds over a static mountain line.
pub struct Background {
    pub theme: Theme,
    target: Option<Theme>,
    progress: f64,
    clouds: Vec<Cloud>,
}

impl Background {
    pub fn new(rng: &mut impl Rng) -> Self {
        let clouds = (0..CLOUD_COUNT)
            .map(|_| Cloud {
                x: rng.gen_range(0.0..CANVAS_W),
                y: rng.gen_range(0.0..CANVAS_H / 2.0),
                width: rng.gen_range(50.0..150.0),
                speed: rng.gen_range(0.1..0.6),
                opacity: rng.gen_range(0.5..1.0),
            })
            .collect();
        Self {
            theme: Theme::Day,
            target: None,
            progress: 0.0,
            clouds,
        }
    }

    /// Kick off the cross-fade to the next theme in the cycle. Ignored while
    /// a transition is already running.
    pub fn advance_theme(&mut self) {
        if self.target.is_none() {
            self.target = Some(self.theme.next());
            self.progress = 0.0;
        }
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        for cloud in &mut self.clouds {
            cloud.x -= cloud.speed;
            if cloud.x + cloud.width < 0.0 {
                cloud.x = CANVAS_W + cloud.width;
                cloud.y = rng.gen_range(0.0..CANVAS_H / 2.0);
            }
        }

        if let Some(target) = self.target {
            self.progress += TRANSITION_SPEED;
            if self.progress >= 1.0 {
                self.theme = target;
                self.target = None;
                self.progress = 0.0;
            }
        }
    }

    fn palette(&self) -> Palette {
        let current = self.theme.palette();
        match self.target {
            Some(t) => Palette::blend(current, t.palette(), self.progress),
            None => current,
        }
    }

    pub fn draw(&self, buf: &mut PixelBuf, v: Viewport) {
        let pal = self.palette();

        // Vertical sky gradient
        for y in 0..buf.h {
            let t = (y * 256 / buf.h.max(1)) as u16;
            let c = Rgb::lerp(pal.sky_top, pal.sky_bot, t);
            for x in 0..buf.w {
                buf.set(x as i32, y as i32, c);
            }
        }

        // Static layered mountain silhouette along the bottom
        let base = buf.h as i32;
        let far = Rgb::mix(pal.mountains, pal.sky_bot, 0.4);
        for x in 0..buf.w as i32 {
            let fx = x as f64 / v.sx * 0.015;
            let h_far = (fx.sin() * 40.0 + (fx * 2.1).sin() * 20.0 + 80.0).max(0.0);
            let h_near = ((fx * 1.3 + 2.0).sin() * 30.0 + (fx * 3.1).sin() * 12.0 + 50.0).max(0.0);
            for y in (base - v.h(h_far))..base {
                buf.set(x, y, far);
            }
            for y in (base - v.h(h_near))..base {
                buf.set(x, y, pal.mountains);
            }
        }

        // Clouds: four overlapping blobs each, alpha-blended into the sky
        for cloud in &self.clouds {
            let blobs = [
                (0.0, 0.0, 0.3),
                (0.2, -0.1, 0.25),
                (0.4, 0.0, 0.3),
                (0.2, 0.1, 0.25),
            ];
            for (ox, oy, r) in blobs {
                let cx = v.x(cloud.x + cloud.width * ox);
                let cy = v.y(cloud.y + cloud.width * oy);
                let rx = v.w(cloud.width * r);
                let ry = v.h(cloud.width * r);
                for dy in -ry..=ry {
                    for dx in -rx..=rx {
                        let nx = dx as f64 / rx.max(1) as f64;
                        let ny = dy as f64 / ry.max(1) as f64;
                        if nx * nx + ny * ny <= 1.0 {
                            buf.blend(cx + dx, cy + dy, pal.clouds, cloud.opacity);
                        }
                    }
                }
            }
        }
    }
}
