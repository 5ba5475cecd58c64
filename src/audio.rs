use fundsp::prelude::*;
use rodio::{OutputStream, OutputStreamBuilder, Sink, buffer::SamplesBuffer};

use crate::game::Cue;

const SAMPLE_RATE: u32 = 44100;

/// Fire-and-forget synthesized sound cues. The output stream opens lazily on
/// the first user input (terminals have no autoplay rule, but the original's
/// browser audio-unlock flow is kept); if the device can't be opened the
/// game simply runs silent.
pub struct Audio {
    stream: Option<OutputStream>,
    attempted: bool,
}

impl Audio {
    pub fn new() -> Self {
        Self {
            stream: None,
            attempted: false,
        }
    }

    /// Idempotent: only the first call touches the audio device.
    pub fn ensure_started(&mut self) {
        if !self.attempted {
            self.attempted = true;
            self.stream = OutputStreamBuilder::open_default_stream().ok();
        }
    }

    pub fn play(&self, cue: Cue) {
        let Some(stream) = &self.stream else { return };
        // The original plays plain synth notes: C5 for jump, E5 for score,
        // and a low falling A3 for game over.
        let samples = match cue {
            Cue::Jump => render(
                sine_hz::<f32>(523.25) * lfo(|t: f32| lerp(0.2, 0.0, (t / 0.1).min(1.0))),
                0.1,
            ),
            Cue::Score => render(
                sine_hz::<f32>(659.25) * lfo(|t: f32| lerp(0.2, 0.0, (t / 0.1).min(1.0))),
                0.1,
            ),
            Cue::GameOver => render(
                (lfo(|t: f32| lerp(220.0, 80.0, (t / 0.3).min(1.0))) >> saw())
                    * lfo(|t: f32| lerp(0.15, 0.0, (t / 0.3).min(1.0))),
                0.3,
            ),
        };
        let sink = Sink::connect_new(stream.mixer());
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
        sink.detach(); // Play in background
    }
}

impl Default for Audio {
    fn default() -> Self {
        Self::new()
    }
}

// fundsp units default to 44.1kHz
fn render(mut unit: impl AudioUnit, secs: f64) -> Vec<f32> {
    let n = (SAMPLE_RATE as f64 * secs) as usize;
    (0..n).map(|_| unit.get_mono()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_tones_render_audible_fading_samples() {
        let samples = render(
            sine_hz::<f32>(523.25) * lfo(|t: f32| lerp(0.2, 0.0, (t / 0.1).min(1.0))),
            0.1,
        );
        assert_eq!(samples.len(), 4410);
        let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak > 0.05 && peak <= 0.2);
        // The envelope fades out, so the tail must be quieter than the head.
        let head: f32 = samples[..441].iter().map(|s| s.abs()).sum();
        let tail: f32 = samples[samples.len() - 441..].iter().map(|s| s.abs()).sum();
        assert!(tail < head);
    }

    #[test]
    fn game_over_sweep_renders_without_silence() {
        let samples = render(
            (lfo(|t: f32| lerp(220.0, 80.0, (t / 0.3).min(1.0))) >> saw())
                * lfo(|t: f32| lerp(0.15, 0.0, (t / 0.3).min(1.0))),
            0.3,
        );
        assert_eq!(samples.len(), 13230);
        assert!(samples.iter().any(|s| s.abs() > 0.05));
    }
}
