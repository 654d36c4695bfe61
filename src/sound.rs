use ggez::audio::{self, SoundSource};
use ggez::Context;
use log::warn;
use std::f32::consts::TAU;

const SAMPLE_RATE: u32 = 22_050;

/// The two one-shot cues. A cue that failed to load stays silent.
pub struct Sounds {
    eat: Option<audio::Source>,
    crash: Option<audio::Source>,
}

impl Sounds {
    pub fn new(ctx: &mut Context) -> Self {
        Sounds {
            eat: load_tone(ctx, "eat", 880.0, 0.08, 0.4),
            crash: load_tone(ctx, "crash", 140.0, 0.3, 0.6),
        }
    }

    pub fn play_eat(&mut self, ctx: &mut Context) {
        play(ctx, self.eat.as_mut());
    }

    pub fn play_crash(&mut self, ctx: &mut Context) {
        play(ctx, self.crash.as_mut());
    }
}

fn load_tone(
    ctx: &mut Context,
    name: &str,
    frequency_hz: f32,
    seconds: f32,
    volume: f32,
) -> Option<audio::Source> {
    let data = audio::SoundData::from_bytes(&sine_wav(frequency_hz, seconds, volume));
    match audio::Source::from_data(ctx, data) {
        Ok(source) => Some(source),
        Err(e) => {
            warn!("sound '{}' unavailable: {}", name, e);
            None
        }
    }
}

fn play(ctx: &mut Context, source: Option<&mut audio::Source>) {
    if let Some(source) = source {
        if let Err(e) = source.play_detached(ctx) {
            warn!("failed to play sound: {}", e);
        }
    }
}

/// A mono 16-bit PCM WAV file holding a sine tone that fades out.
fn sine_wav(frequency_hz: f32, seconds: f32, volume: f32) -> Vec<u8> {
    let samples = (seconds * SAMPLE_RATE as f32) as u32;
    let data_len = samples * 2;
    let mut wav = Vec::with_capacity(44 + data_len as usize);

    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");

    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    wav.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes());
    wav.extend_from_slice(&16u16.to_le_bytes());

    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());

    let amplitude = volume.clamp(0.0, 1.0) * i16::MAX as f32;
    for n in 0..samples {
        let t = n as f32 / SAMPLE_RATE as f32;
        let fade = 1.0 - n as f32 / samples as f32;
        let sample = (amplitude * fade * (TAU * frequency_hz * t).sin()) as i16;
        wav.extend_from_slice(&sample.to_le_bytes());
    }
    wav
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_header() {
        let wav = sine_wav(440.0, 0.1, 0.5);
        let samples = (0.1 * SAMPLE_RATE as f32) as usize;
        assert_eq!(wav.len(), 44 + samples * 2);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(&wav[36..40], b"data");
        let data_len = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
        assert_eq!(data_len as usize, samples * 2);
    }

    #[test]
    fn test_wav_starts_silent() {
        let wav = sine_wav(440.0, 0.05, 1.0);
        assert_eq!(i16::from_le_bytes([wav[44], wav[45]]), 0);
    }
}
