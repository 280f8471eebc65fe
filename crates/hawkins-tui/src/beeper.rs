//! Terminal audio.
//!
//! [`TerminalBell`] rings the terminal bell and works everywhere, but every
//! pulse sounds the same length. With the `audio` feature, [`ToneBeeper`]
//! plays real tones of the requested length through the default output
//! device. Both swallow failures: a silent terminal is still a usable one.

use std::{
    io::{self, Write},
    time::Duration,
};

use hawkins_core::Beeper;

/// Rings the ASCII bell on stdout for every pulse.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl Beeper for TerminalBell {
    fn emit(&mut self, duration: Duration) {
        let mut out = io::stdout();
        if let Err(error) = out.write_all(b"\x07").and_then(|()| out.flush()) {
            tracing::debug!(%error, ?duration, "bell failed");
        }
    }
}

/// Oscillator shape.
#[cfg(feature = "audio")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    /// Hard-edged, used for the Morse signal.
    Square,
    /// Soft, used for the alarm.
    Sine,
}

/// Plays a fixed-pitch tone on the default output device.
///
/// Each pulse opens its own stream on a short-lived thread, so `emit` never
/// blocks the event loop.
#[cfg(feature = "audio")]
#[derive(Debug, Clone, Copy)]
pub struct ToneBeeper {
    frequency: f32,
    waveform: Waveform,
    gain: f32,
}

#[cfg(feature = "audio")]
impl ToneBeeper {
    /// 800Hz square wave.
    pub fn signal() -> Self {
        Self { frequency: 800.0, waveform: Waveform::Square, gain: 0.15 }
    }

    /// 400Hz sine wave.
    pub fn alarm() -> Self {
        Self { frequency: 400.0, waveform: Waveform::Sine, gain: 0.1 }
    }

    fn play(self, duration: Duration) -> Result<(), Box<dyn std::error::Error>> {
        use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

        let host = cpal::default_host();
        let device = host.default_output_device().ok_or("no output device")?;
        let supported = device.default_output_config()?;
        let sample_rate = supported.sample_rate() as f32;
        let channels = usize::from(supported.channels());

        let mut phase = 0.0_f32;
        let step = self.frequency / sample_rate;
        let stream = device.build_output_stream(
            &supported.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                for frame in data.chunks_mut(channels) {
                    let sample = self.sample(phase);
                    frame.fill(sample);
                    phase = (phase + step) % 1.0;
                }
            },
            |error| tracing::debug!(%error, "tone stream error"),
            None,
        )?;

        stream.play()?;
        std::thread::sleep(duration);
        Ok(())
    }

    fn sample(self, phase: f32) -> f32 {
        let level = match self.waveform {
            Waveform::Square if phase < 0.5 => 1.0,
            Waveform::Square => -1.0,
            Waveform::Sine => (phase * std::f32::consts::TAU).sin(),
        };
        level * self.gain
    }
}

#[cfg(feature = "audio")]
impl Beeper for ToneBeeper {
    fn emit(&mut self, duration: Duration) {
        let tone = *self;
        std::thread::spawn(move || {
            if let Err(error) = tone.play(duration) {
                tracing::debug!(%error, "tone unavailable");
            }
        });
    }
}

#[cfg(all(test, feature = "audio"))]
mod tests {
    use super::*;

    #[test]
    fn square_wave_flips_at_half_period() {
        let tone = ToneBeeper::signal();
        assert!((tone.sample(0.25) - 0.15).abs() < 1e-6);
        assert!((tone.sample(0.75) + 0.15).abs() < 1e-6);
    }

    #[test]
    fn sine_starts_at_zero() {
        let tone = ToneBeeper::alarm();
        assert!(tone.sample(0.0).abs() < 1e-6);
        assert!((tone.sample(0.25) - 0.1).abs() < 1e-6);
    }
}
