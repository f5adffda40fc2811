//! Synthesised music and sound effects
//!
//! No audio assets ship with the game: the jump effect and the music loop are
//! rendered into sample buffers once at startup and replayed through rodio.

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamBuilder, Sink, Source};
use thiserror::Error;
use tracing::{debug, info};

use super::config::AudioConfig;
use crate::sim::SoundCue;

const SAMPLE_RATE: u32 = 44_100;
const JUMP_DURATION: f32 = 0.15;
/// Seconds per note in the music loop
const NOTE_DURATION: f32 = 0.2;
/// Music loop melody as semitone offsets from A3; `None` is a rest
const MELODY: [Option<i32>; 16] = [
    Some(0),
    Some(7),
    Some(12),
    Some(7),
    Some(3),
    Some(10),
    Some(15),
    None,
    Some(-2),
    Some(5),
    Some(10),
    Some(5),
    Some(0),
    Some(7),
    Some(12),
    None,
];

/// Errors opening the audio device
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to open audio output stream: {0}")]
    Stream(#[from] rodio::StreamError),
}

/// Plays the game's sounds on the default output device
pub struct Audio {
    stream: OutputStream,
    music: Option<Sink>,
    jump_samples: Vec<f32>,
    music_samples: Vec<f32>,
    config: AudioConfig,
}

impl Audio {
    /// Opens the default output device and renders the sound buffers
    pub fn new(config: AudioConfig) -> Result<Self, AudioError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        stream.log_on_drop(false);

        info!(sample_rate = SAMPLE_RATE, "Audio output opened");

        Ok(Self {
            stream,
            music: None,
            jump_samples: jump_samples(SAMPLE_RATE),
            music_samples: music_samples(SAMPLE_RATE),
            config,
        })
    }

    /// Performs a sound request from the session
    pub fn play(&mut self, cue: SoundCue) {
        debug!(?cue, "Sound cue");
        match cue {
            SoundCue::Jump => self.play_jump(),
            SoundCue::MusicStart => self.start_music(),
            SoundCue::MusicStop => self.stop_music(),
        }
    }

    fn play_jump(&self) {
        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.config.effects_volume);
        sink.append(SamplesBuffer::new(1, SAMPLE_RATE, self.jump_samples.clone()));
        sink.detach();
    }

    /// Starts the music loop unless it is already playing
    pub fn start_music(&mut self) {
        if self.music.is_some() {
            return;
        }

        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.config.music_volume);
        sink.append(
            SamplesBuffer::new(1, SAMPLE_RATE, self.music_samples.clone()).repeat_infinite(),
        );
        self.music = Some(sink);
    }

    pub fn stop_music(&mut self) {
        if let Some(sink) = self.music.take() {
            sink.stop();
        }
    }

    /// Sample rate, channel count and sample format of the opened device stream
    pub fn output_format(&self) -> String {
        let config = self.stream.config();
        format!(
            "{} Hz, {} channels, {:?}",
            config.sample_rate(),
            config.channel_count(),
            config.sample_format()
        )
    }
}

/// Short rising chirp
fn jump_samples(sample_rate: u32) -> Vec<f32> {
    let count = (sample_rate as f32 * JUMP_DURATION) as usize;
    let mut phase = 0.0f32;

    (0..count)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            let progress = t / JUMP_DURATION;
            let frequency = 300.0 + 600.0 * progress;
            phase += frequency / sample_rate as f32;
            let envelope = (1.0 - progress).powi(2);
            (phase * std::f32::consts::TAU).sin() * envelope * 0.5
        })
        .collect()
}

/// One pass of the looping square-wave melody
fn music_samples(sample_rate: u32) -> Vec<f32> {
    let per_note = (sample_rate as f32 * NOTE_DURATION) as usize;
    let mut samples = Vec::with_capacity(per_note * MELODY.len());

    for note in MELODY {
        let Some(semitones) = note else {
            samples.extend(std::iter::repeat_n(0.0, per_note));
            continue;
        };

        let frequency = 220.0 * 2f32.powf(semitones as f32 / 12.0);
        for i in 0..per_note {
            let t = i as f32 / sample_rate as f32;
            let square = if (t * frequency).fract() < 0.5 { 1.0 } else { -1.0 };
            // Fade each note out to avoid clicks between notes
            let envelope = 1.0 - i as f32 / per_note as f32;
            samples.push(square * envelope * 0.2);
        }
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_samples_shape() {
        let samples = jump_samples(SAMPLE_RATE);
        assert_eq!(samples.len(), (SAMPLE_RATE as f32 * JUMP_DURATION) as usize);
        assert!(samples.iter().all(|s| s.abs() <= 0.5));
        // Envelope decays to silence
        assert!(samples.last().is_some_and(|s| s.abs() < 0.01));
    }

    #[test]
    fn test_music_loop_length() {
        let samples = music_samples(SAMPLE_RATE);
        let per_note = (SAMPLE_RATE as f32 * NOTE_DURATION) as usize;
        assert_eq!(samples.len(), per_note * MELODY.len());
        assert!(samples.iter().all(|s| s.abs() <= 0.2));

        // Rests are silent
        let rest = &samples[7 * per_note..8 * per_note];
        assert!(rest.iter().all(|&s| s == 0.0));
    }
}
