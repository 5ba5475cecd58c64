use rand::Rng;
use rand::seq::SliceRandom;

use crate::background::Background;
use crate::bird::Bird;
use crate::effects::Effects;
use crate::pipe::{GAP_HEIGHT, PIPE_WIDTH, Pipe};
use crate::pixel::{self, PixelBuf, Rgb, Viewport, WHITE};
use crate::powerup::{PowerUp, PowerUpKind};
use crate::CANVAS_W;

pub const BASE_GAME_SPEED: f64 = 3.0;
pub const PIPE_SPAWN_INTERVAL_MS: f64 = 2000.0;
pub const POWER_UP_SPAWN_INTERVAL_MS: f64 = 15000.0;
pub const THEME_INTERVAL_MS: f64 = 30000.0;
pub const MIN_SCORE_FOR_POWER_UPS: u32 = 5;
/// No pipe spawns while the newest one is still within this distance of the
/// right edge; back-to-back pipes would be physically unbeatable.
pub const SPAWN_CLEARANCE: f64 = 200.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    NotStarted,
    Running,
    GameOver,
}

/// Sound cues the simulation emits; the binary drains them and hands them to
/// the audio subsystem, keeping the tick free of I/O.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cue {
    Jump,
    Score,
    GameOver,
}

/// The orchestrator: owns every entity, the score, the effect timers, and
/// the phase machine. `tick` advances one frame with explicit elapsed time
/// and an injected RNG, so the whole simulation runs deterministically under
/// test.
pub struct Game {
    pub phase: Phase,
    pub bird: Bird,
    pub pipes: Vec<Pipe>,
    pub power_ups: Vec<PowerUp>,
    pub background: Background,
    pub effects: Effects,
    pub score: u32,
    pub high_score: u32,
    pub game_speed: f64,
    pub pipe_spawn_interval: f64,
    clock_ms: f64,
    last_theme_update: f64,
    last_pipe_spawn: f64,
    last_power_up_spawn: f64,
    cues: Vec<Cue>,
}

impl Game {
    pub fn new(high_score: u32, rng: &mut impl Rng) -> Self {
        Self {
            phase: Phase::NotStarted,
            bird: Bird::new(),
            pipes: Vec::new(),
            power_ups: Vec::new(),
            background: Background::new(rng),
            effects: Effects::new(),
            score: 0,
            high_score,
            game_speed: BASE_GAME_SPEED,
            pipe_spawn_interval: PIPE_SPAWN_INTERVAL_MS,
            clock_ms: 0.0,
            last_theme_update: 0.0,
            last_pipe_spawn: 0.0,
            last_power_up_spawn: 0.0,
            cues: Vec::new(),
        }
    }

    /// The single "activate" input: starts the game from the title screen,
    /// flaps while running, does nothing on the game-over screen (restart is
    /// its own action).
    pub fn activate(&mut self) {
        match self.phase {
            Phase::NotStarted => self.phase = Phase::Running,
            Phase::Running => {
                self.bird.jump();
                self.cues.push(Cue::Jump);
            }
            Phase::GameOver => {}
        }
    }

    /// GameOver -> Running. Everything mutable resets except the high score
    /// and the background (scenery carries across runs).
    pub fn restart(&mut self) {
        if self.phase != Phase::GameOver {
            return;
        }
        self.bird = Bird::new();
        self.pipes.clear();
        self.power_ups.clear();
        self.score = 0;
        self.game_speed = BASE_GAME_SPEED;
        self.pipe_spawn_interval = PIPE_SPAWN_INTERVAL_MS;
        self.last_pipe_spawn = self.clock_ms;
        self.last_power_up_spawn = self.clock_ms;
        self.effects.reset();
        self.phase = Phase::Running;
    }

    /// Sound cues queued since the last drain.
    pub fn take_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    /// Advance one frame. `dt_ms` is wall-clock time since the previous
    /// frame; physics itself is per-frame, `dt_ms` only drives the spawn
    /// timers, the theme clock, and the effect countdowns.
    pub fn tick(&mut self, dt_ms: f64, rng: &mut impl Rng) {
        self.clock_ms += dt_ms;

        if self.clock_ms - self.last_theme_update > THEME_INTERVAL_MS {
            self.background.advance_theme();
            self.last_theme_update = self.clock_ms;
        }

        // Countdowns run in every phase, like the wall-clock timers they
        // replace; restart clears them outright.
        for kind in self.effects.tick(dt_ms) {
            if kind == PowerUpKind::SlowMotion {
                self.end_slow_motion();
            }
        }

        match self.phase {
            Phase::Running => self.tick_running(rng),
            Phase::NotStarted => self.background.update(rng),
            // The world freezes under the game-over overlay.
            Phase::GameOver => {}
        }
    }

    fn tick_running(&mut self, rng: &mut impl Rng) {
        self.background.update(rng);

        if self.clock_ms - self.last_pipe_spawn > self.pipe_spawn_interval {
            self.spawn_pipe(rng);
            self.last_pipe_spawn = self.clock_ms;
        }
        if self.clock_ms - self.last_power_up_spawn > POWER_UP_SPAWN_INTERVAL_MS {
            self.spawn_power_up(rng);
            self.last_power_up_spawn = self.clock_ms;
        }

        self.update_pipes();
        self.update_power_ups();

        self.bird.update();
        if self.bird.on_ground() && !self.effects.shield() {
            self.game_over();
        }
    }

    /// Spawn at the right edge unless the newest pipe is still too close to
    /// it. The skipped spawn still consumes the timer slot.
    fn spawn_pipe(&mut self, rng: &mut impl Rng) {
        if let Some(last) = self.pipes.last() {
            if last.x > CANVAS_W - SPAWN_CLEARANCE {
                return;
            }
        }
        self.pipes.push(Pipe::new(self.game_speed, rng));
    }

    /// Power-ups only appear once the score gate is met, and only centered
    /// in the gap of a pipe sitting in the 50%-75% band of the canvas, so
    /// collecting one never demands extra risk.
    fn spawn_power_up(&mut self, rng: &mut impl Rng) {
        if self.score < MIN_SCORE_FOR_POWER_UPS {
            return;
        }
        let safe_pipe = self
            .pipes
            .iter()
            .find(|p| p.x > CANVAS_W / 2.0 && p.x < CANVAS_W * 0.75);
        if let Some(pipe) = safe_pipe {
            let y = pipe.gap_start + GAP_HEIGHT / 2.0;
            let kind = *PowerUpKind::ALL.choose(rng).unwrap_or(&PowerUpKind::Shield);
            self.power_ups.push(PowerUp::new(kind, self.game_speed, y));
        }
    }

    fn update_pipes(&mut self) {
        self.pipes.retain(|p| !p.is_offscreen());

        let mut collided = false;
        for pipe in &mut self.pipes {
            pipe.update();

            if !pipe.passed && self.bird.x > pipe.x + PIPE_WIDTH {
                pipe.passed = true;
                let points = if self.effects.multiplier() { 2 } else { 1 };
                self.score += points;
                if self.score > self.high_score {
                    self.high_score = self.score;
                }
                self.cues.push(Cue::Score);
            }

            if self.bird.collides_with(pipe) {
                collided = true;
            }
        }

        // The shield makes the bird invulnerable, not just score-protected.
        if collided && !self.effects.shield() {
            self.game_over();
        }
    }

    fn update_power_ups(&mut self) {
        self.power_ups.retain(|p| !p.is_offscreen());

        let mut activated = Vec::new();
        for p in &mut self.power_ups {
            p.update();
            if !p.collected && self.bird.overlaps(p) {
                p.collected = true;
                activated.push(p.kind);
                // Same cue as scoring; the original reuses it for pickups.
                self.cues.push(Cue::Score);
            }
        }
        for kind in activated {
            self.activate_power_up(kind);
        }
    }

    fn activate_power_up(&mut self, kind: PowerUpKind) {
        // Slow motion mutates global speed exactly once; re-collecting while
        // active only restarts the countdown, so the halving can't compound
        // and expiry restores the true pre-activation values.
        if kind == PowerUpKind::SlowMotion && !self.effects.slow_motion() {
            self.effects.slow_restore = Some((self.game_speed, self.pipe_spawn_interval));
            self.game_speed *= 0.5;
            self.pipe_spawn_interval *= 2.0;
            self.set_entity_speed(self.game_speed);
        }
        self.effects.activate(kind);
    }

    fn end_slow_motion(&mut self) {
        if let Some((speed, interval)) = self.effects.slow_restore.take() {
            self.game_speed = speed;
            self.pipe_spawn_interval = interval;
            self.set_entity_speed(speed);
        }
    }

    fn set_entity_speed(&mut self, speed: f64) {
        for pipe in &mut self.pipes {
            pipe.speed = speed;
        }
        for p in &mut self.power_ups {
            p.speed = speed;
        }
    }

    fn game_over(&mut self) {
        if self.phase == Phase::GameOver {
            return;
        }
        self.phase = Phase::GameOver;
        self.cues.push(Cue::GameOver);
    }

    // ── Drawing ─────────────────────────────────────────────────────────────

    pub fn draw(&self, buf: &mut PixelBuf) {
        let v = Viewport::of(buf);
        self.background.draw(buf, v);

        match self.phase {
            Phase::NotStarted => {
                self.bird.draw(buf, v, false);
                self.draw_title(buf, v);
            }
            Phase::Running | Phase::GameOver => {
                for pipe in &self.pipes {
                    pipe.draw(buf, v);
                }
                for p in &self.power_ups {
                    p.draw(buf, v);
                }
                self.bird.draw(buf, v, self.effects.shield());
                self.draw_hud(buf, v);
                if self.phase == Phase::GameOver {
                    self.draw_game_over(buf, v);
                }
            }
        }
    }

    fn draw_hud(&self, buf: &mut PixelBuf, v: Viewport) {
        let w = buf.w as i32;
        pixel::draw_number(buf, w / 2, 4, self.score, WHITE);
        pixel::draw_number(buf, w - 12, 4, self.high_score, Rgb(255, 215, 0));

        // One row per active effect: a colored swatch plus seconds left.
        let mut row = 0;
        for kind in PowerUpKind::ALL {
            if self.effects.is_active(kind) {
                let y = v.y(60.0 + row as f64 * 25.0);
                let x = v.x(20.0);
                buf.fill_rect(x, y, v.w(10.0), v.h(10.0), kind.color());
                let secs = (self.effects.remaining_ms(kind) / 1000.0).ceil() as u32;
                pixel::draw_number(buf, x + v.w(10.0) + 6, y, secs, WHITE);
                row += 1;
            }
        }
    }

    fn draw_title(&self, buf: &mut PixelBuf, v: Viewport) {
        let cx = buf.w as i32 / 2;
        let cy = buf.h as i32 / 4;
        let char_w = v.w(16.0);
        let char_h = v.h(24.0);

        // "FLAPPY" as big blocky letters
        let letters = 6;
        let total_w = letters * char_w;
        let sx = cx - total_w / 2;
        for i in 0..letters {
            let bx = sx + i * char_w;
            buf.fill_rect(bx, cy, char_w - 1, char_h, Rgb(255, 215, 0));
            buf.fill_rect(bx, cy, char_w - 1, 1, Rgb(255, 235, 90));
        }

        // "SPACE TO FLAP" hint as small blocks
        let msg = "SPACE TO FLAP";
        let msg_w = msg.len() as i32 * 4;
        let msg_x = cx - msg_w / 2;
        let sub_y = cy + char_h + 4;
        for (i, ch) in msg.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            buf.fill_rect(msg_x + i as i32 * 4, sub_y, 3, 3, WHITE);
        }
    }

    fn draw_game_over(&self, buf: &mut PixelBuf, _v: Viewport) {
        let cx = buf.w as i32 / 2;
        let cy = buf.h as i32 / 2;
        let panel_w = (buf.w as i32 / 3).max(30);
        let panel_h = (buf.h as i32 / 4).max(16);

        // Dim the whole scene behind the panel
        for y in 0..buf.h {
            for x in 0..buf.w {
                let c = buf.get(x, y);
                buf.set(x as i32, y as i32, Rgb(c.0 / 2, c.1 / 2, c.2 / 2));
            }
        }

        let px = cx - panel_w / 2;
        let py = cy - panel_h / 2;
        buf.fill_rect(px - 1, py - 1, panel_w + 2, panel_h + 2, pixel::SHADOW);
        buf.fill_rect(px, py, panel_w, panel_h, Rgb(210, 185, 110));
        buf.fill_rect(px + 1, py + 1, panel_w - 2, panel_h - 2, Rgb(220, 195, 120));

        // Final score above, best below
        pixel::draw_number(buf, cx, py + 4, self.score, WHITE);
        pixel::draw_number(buf, cx, py + 12, self.high_score, Rgb(255, 215, 0));

        // "R" restart hint: three small blocks under the panel
        for i in 0..3 {
            buf.fill_rect(cx - 6 + i * 4, py + panel_h + 3, 3, 3, WHITE);
        }
    }
}
