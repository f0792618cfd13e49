//! Synthesized cue recipes. Each event maps to a fixed set of voices that are
//! rendered to mono `f32` samples ahead of playback.

use crate::audio::FeedbackEvent;
use std::f32::consts::TAU;

pub const SAMPLE_RATE: u32 = 44_100;

/// Floor used by exponential ramps, which cannot reach zero.
const RAMP_FLOOR: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Waveform {
    Sine,
    Triangle,
}

impl Waveform {
    /// Sample at `phase` measured in cycles.
    fn sample(self, phase: f32) -> f32 {
        let x = phase.fract();
        match self {
            Waveform::Sine => (TAU * x).sin(),
            Waveform::Triangle => {
                if x < 0.5 {
                    4.0 * x - 1.0
                } else {
                    3.0 - 4.0 * x
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// Exponential fall from the peak to the ramp floor at the end of the voice.
    Exponential,
    /// Straight line from the peak to silence at the end of the voice.
    Linear,
}

/// One oscillator with a frequency sweep and an attack/release envelope.
/// Times are seconds relative to the start of the recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    pub waveform: Waveform,
    pub start: f32,
    pub duration: f32,
    pub freq_start: f32,
    pub freq_end: f32,
    pub sweep: f32,
    pub peak: f32,
    pub attack: f32,
    pub release: Release,
}

impl Voice {
    fn end(&self) -> f32 {
        self.start + self.duration
    }

    fn frequency_at(&self, t: f32) -> f32 {
        if self.sweep <= 0.0 || t >= self.sweep {
            return self.freq_end;
        }
        exp_ramp(self.freq_start, self.freq_end, t / self.sweep)
    }

    fn gain_at(&self, t: f32) -> f32 {
        if t < 0.0 || t >= self.duration {
            return 0.0;
        }
        if t < self.attack {
            return self.peak * t / self.attack;
        }
        let span = (self.duration - self.attack).max(f32::EPSILON);
        let progress = (t - self.attack) / span;
        match self.release {
            Release::Exponential => exp_ramp(self.peak, RAMP_FLOOR, progress),
            Release::Linear => self.peak * (1.0 - progress),
        }
    }
}

fn exp_ramp(from: f32, to: f32, progress: f32) -> f32 {
    from * (to / from).powf(progress.clamp(0.0, 1.0))
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToneRecipe {
    pub voices: Vec<Voice>,
}

impl ToneRecipe {
    pub fn for_event(event: FeedbackEvent) -> Self {
        match event {
            FeedbackEvent::Correct => Self {
                voices: vec![Voice {
                    waveform: Waveform::Sine,
                    start: 0.0,
                    duration: 0.3,
                    freq_start: 500.0,
                    freq_end: 1000.0,
                    sweep: 0.1,
                    peak: 0.2,
                    attack: 0.05,
                    release: Release::Exponential,
                }],
            },
            FeedbackEvent::Incorrect => Self {
                voices: vec![Voice {
                    waveform: Waveform::Triangle,
                    start: 0.0,
                    duration: 0.4,
                    freq_start: 150.0,
                    freq_end: 80.0,
                    sweep: 0.2,
                    peak: 0.3,
                    attack: 0.05,
                    release: Release::Exponential,
                }],
            },
            FeedbackEvent::LevelUp => Self {
                // C5 E5 G5 C6
                voices: [523.25, 659.25, 783.99, 1046.50]
                    .iter()
                    .enumerate()
                    .map(|(i, &freq)| Voice {
                        waveform: Waveform::Sine,
                        start: i as f32 * 0.1,
                        duration: 0.5,
                        freq_start: freq,
                        freq_end: freq,
                        sweep: 0.0,
                        peak: 0.15,
                        attack: 0.05,
                        release: Release::Exponential,
                    })
                    .collect(),
            },
            FeedbackEvent::Trophy => Self {
                voices: vec![Voice {
                    waveform: Waveform::Sine,
                    start: 0.0,
                    duration: 1.5,
                    freq_start: 440.0,
                    freq_end: 880.0,
                    sweep: 1.5,
                    peak: 0.2,
                    attack: 0.1,
                    release: Release::Linear,
                }],
            },
        }
    }

    pub fn duration(&self) -> f32 {
        self.voices.iter().map(Voice::end).fold(0.0, f32::max)
    }
}

/// Mix every voice of the recipe into one mono buffer.
pub fn render(recipe: &ToneRecipe, sample_rate: u32) -> Vec<f32> {
    let rate = sample_rate as f32;
    let len = (recipe.duration() * rate).ceil() as usize;
    let mut out = vec![0.0_f32; len];

    for voice in &recipe.voices {
        let first = (voice.start * rate) as usize;
        let count = (voice.duration * rate) as usize;
        let mut phase = 0.0_f32;

        for n in 0..count {
            let Some(slot) = out.get_mut(first + n) else {
                break;
            };
            let t = n as f32 / rate;
            *slot += voice.waveform.sample(phase) * voice.gain_at(t);
            phase += voice.frequency_at(t) / rate;
        }
    }

    for sample in &mut out {
        *sample = sample.clamp(-1.0, 1.0);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_durations() {
        let secs = |e| ToneRecipe::for_event(e).duration();
        assert!((secs(FeedbackEvent::Correct) - 0.3).abs() < 1e-6);
        assert!((secs(FeedbackEvent::Incorrect) - 0.4).abs() < 1e-6);
        assert!((secs(FeedbackEvent::LevelUp) - 0.8).abs() < 1e-6);
        assert!((secs(FeedbackEvent::Trophy) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_render_length_matches_duration() {
        let samples = render(&ToneRecipe::for_event(FeedbackEvent::Correct), SAMPLE_RATE);
        assert_eq!(samples.len(), (0.3 * SAMPLE_RATE as f32).ceil() as usize);
    }

    #[test]
    fn test_render_starts_silent_and_stays_bounded() {
        for event in [
            FeedbackEvent::Correct,
            FeedbackEvent::Incorrect,
            FeedbackEvent::LevelUp,
            FeedbackEvent::Trophy,
        ] {
            let samples = render(&ToneRecipe::for_event(event), SAMPLE_RATE);
            assert_eq!(samples[0], 0.0, "{event} should start from silence");
            assert!(samples.iter().all(|s| s.abs() <= 1.0));
            assert!(samples.iter().any(|s| s.abs() > 0.05), "{event} is audible");
        }
    }

    #[test]
    fn test_envelope_shape() {
        let voice = &ToneRecipe::for_event(FeedbackEvent::Correct).voices[0];
        assert_eq!(voice.gain_at(0.0), 0.0);
        assert!((voice.gain_at(0.05) - 0.2).abs() < 1e-4);
        assert!((voice.gain_at(0.2999) - RAMP_FLOOR).abs() < 1e-3);
        assert_eq!(voice.gain_at(0.3), 0.0);

        let trophy = &ToneRecipe::for_event(FeedbackEvent::Trophy).voices[0];
        assert!(trophy.gain_at(1.49) < 0.01);
    }

    #[test]
    fn test_frequency_sweep() {
        let voice = &ToneRecipe::for_event(FeedbackEvent::Incorrect).voices[0];
        assert!((voice.frequency_at(0.0) - 150.0).abs() < 1e-3);
        assert!((voice.frequency_at(0.2) - 80.0).abs() < 1e-3);
        assert!((voice.frequency_at(0.35) - 80.0).abs() < 1e-3);
        let mid = voice.frequency_at(0.1);
        assert!(mid < 150.0 && mid > 80.0);
    }

    #[test]
    fn test_triangle_wave_range() {
        assert_eq!(Waveform::Triangle.sample(0.0), -1.0);
        assert_eq!(Waveform::Triangle.sample(0.5), 1.0);
        assert_eq!(Waveform::Triangle.sample(0.25), 0.0);
    }
}
