use std::f32::consts::TAU;
use std::io;

use log::{debug, info};
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};

const SAMPLE_RATE: u32 = 44_100;
const MUSIC_VOLUME: f32 = 0.5;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Track {
    Melody,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cue {
    FoodEaten,
    Eliminated,
    RoundOver,
    WinnerAnnounced,
}

impl Track {
    pub fn name(self) -> &'static str {
        match self {
            Track::Melody => "melody_bgm",
        }
    }

    /// One pass of the track; the music sink repeats it.
    fn samples(self) -> Vec<f32> {
        match self {
            Track::Melody => notes(&[392.0, 523.0, 659.0, 523.0, 440.0, 587.0, 698.0, 587.0], 0.22, 0.08),
        }
    }
}

impl Cue {
    pub fn name(self) -> &'static str {
        match self {
            Cue::FoodEaten => "generating_food",
            Cue::Eliminated => "lose_or_failure",
            Cue::RoundOver => "game_over",
            Cue::WinnerAnnounced => "winner",
        }
    }

    fn samples(self) -> Vec<f32> {
        match self {
            Cue::FoodEaten => sweep(660.0, 990.0, 0.09, 0.2, Wave::Sine),
            Cue::Eliminated => sweep(400.0, 80.0, 0.5, 0.15, Wave::Saw),
            Cue::RoundOver => notes(&[523.0, 392.0, 262.0], 0.3, 0.2),
            Cue::WinnerAnnounced => notes(&[523.0, 659.0, 784.0, 1047.0], 0.15, 0.2),
        }
    }
}

/// Fire-and-forget sound output. Callers treat errors as non-fatal.
pub trait AudioAdapter {
    fn play_loop(&mut self, track: Track) -> io::Result<()>;

    fn stop(&mut self) -> io::Result<()>;

    fn play_once(&mut self, cue: Cue) -> io::Result<()>;
}

/// Plays through the default output device. Music gets its own sink so it
/// can be stopped; cues go out on detached sinks.
pub struct Speaker {
    output: Option<(OutputStream, OutputStreamHandle)>,
    music: Option<Sink>,
}

impl Speaker {
    pub fn open() -> Result<Self, rodio::StreamError> {
        let output = OutputStream::try_default()?;
        Ok(Speaker { output: Some(output), music: None })
    }

    /// Never touches a device; every request is only logged.
    pub fn muted() -> Self {
        Speaker { output: None, music: None }
    }

    fn sink(&self) -> io::Result<Option<Sink>> {
        match &self.output {
            Some((_, handle)) => Sink::try_new(handle)
                .map(Some)
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e)),
            None => Ok(None),
        }
    }
}

impl AudioAdapter for Speaker {
    fn play_loop(&mut self, track: Track) -> io::Result<()> {
        debug!("looping {}", track.name());
        self.stop()?;

        if let Some(sink) = self.sink()? {
            sink.set_volume(MUSIC_VOLUME);
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, track.samples()).repeat_infinite());
            self.music = Some(sink);
        }
        Ok(())
    }

    fn stop(&mut self) -> io::Result<()> {
        if let Some(sink) = self.music.take() {
            debug!("music stopped");
            sink.stop();
        }
        Ok(())
    }

    fn play_once(&mut self, cue: Cue) -> io::Result<()> {
        info!("cue {}", cue.name());

        if let Some(sink) = self.sink()? {
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, cue.samples()));
            sink.detach();
        }
        Ok(())
    }
}

#[derive(Copy, Clone)]
enum Wave {
    Sine,
    Saw,
}

/// A tone gliding from `from` to `to` Hz, fading out over `duration` seconds.
fn sweep(from: f32, to: f32, duration: f32, gain: f32, wave: Wave) -> Vec<f32> {
    let count = (SAMPLE_RATE as f32 * duration) as usize;
    let mut phase = 0.0f32;

    (0..count)
        .map(|i| {
            let t = i as f32 / count as f32;
            let freq = from * (to / from).powf(t);
            phase = (phase + freq / SAMPLE_RATE as f32).fract();

            let value = match wave {
                Wave::Sine => (phase * TAU).sin(),
                Wave::Saw => 2.0 * phase - 1.0,
            };
            value * gain * (1.0 - t)
        })
        .collect()
}

fn notes(freqs: &[f32], note_len: f32, gain: f32) -> Vec<f32> {
    freqs.iter().flat_map(|&freq| sweep(freq, freq, note_len, gain, Wave::Sine)).collect()
}
