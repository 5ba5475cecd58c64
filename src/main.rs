use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseEventKind},
    execute, terminal,
};
use rand::{SeedableRng, rngs::StdRng};
use std::io::{self, stdout};
use std::time::{Duration, Instant};

use flappy_boost::audio::Audio;
use flappy_boost::game::Game;
use flappy_boost::pixel::PixelBuf;
use flappy_boost::score;

fn main() -> Result<()> {
    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
        EnableMouseCapture,
    )?;

    let cleanup = |out: &mut io::Stdout| -> Result<()> {
        execute!(
            out,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    };

    let (cols, rows) = terminal::size()?;
    let mut buf = PixelBuf::new(cols as usize, rows as usize * 2);

    let mut rng = StdRng::from_entropy();
    let mut saved_high = score::load_high_score();
    let mut game = Game::new(saved_high, &mut rng);
    let mut audio = Audio::new();

    let frame_dur = Duration::from_millis(33); // ~30 fps
    let mut last_frame = Instant::now();

    loop {
        let frame_start = Instant::now();
        let dt_ms = frame_start.duration_since(last_frame).as_secs_f64() * 1000.0;
        last_frame = frame_start;

        // Input
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        cleanup(&mut out)?;
                        return Ok(());
                    }
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => {
                        audio.ensure_started();
                        game.activate();
                    }
                    KeyCode::Char('r') => {
                        game.restart();
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    if let MouseEventKind::Down(_) = mouse.kind {
                        audio.ensure_started();
                        game.activate();
                    }
                }
                Event::Resize(c, r) => {
                    // Only the viewport changes; the simulation keeps its
                    // fixed logical canvas.
                    buf.resize(c as usize, r as usize * 2);
                }
                _ => {}
            }
        }

        // Update
        game.tick(dt_ms, &mut rng);
        for cue in game.take_cues() {
            audio.play(cue);
        }
        if game.high_score > saved_high {
            // A failed write just means the record won't survive this run.
            let _ = score::save_high_score(game.high_score);
            saved_high = game.high_score;
        }

        // Render
        game.draw(&mut buf);
        buf.render(&mut out)?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}
