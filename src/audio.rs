//! Audio output
//!
//! The simulation only emits [`Sound`] cues. Anything implementing
//! [`AudioSink`] can play them: Web Audio oscillators in the browser, a
//! logging sink natively.

use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, Sound};

/// Something that can voice sound cues
pub trait AudioSink {
    fn play(&mut self, sound: Sound);

    /// Silence the background drone
    fn stop_music(&mut self) {}
}

/// Route the sound-related events of a drained batch to `sink`
///
/// Leaving play (pause, crash, menu) stops the background drone.
pub fn route_events<S: AudioSink + ?Sized>(events: &[GameEvent], sink: &mut S) {
    for event in events {
        match event {
            GameEvent::PlaySound(sound) => sink.play(*sound),
            GameEvent::StateChanged(phase) if *phase != GamePhase::Playing => sink.stop_music(),
            _ => {}
        }
    }
}

/// Oscillator voice for one cue: (frequency Hz, duration s)
pub fn voice(sound: Sound) -> (f32, f32) {
    match sound {
        Sound::Jump => (200.0, 0.1),
        Sound::Collect => (800.0, 0.2),
        Sound::PowerUp => (400.0, 0.3),
        Sound::Crash => (150.0, 0.5),
        Sound::Background => (220.0, f32::INFINITY),
    }
}

/// Native sink: logs cues instead of playing them
#[derive(Debug, Default)]
pub struct LogAudio {
    pub muted: bool,
    pub played: usize,
}

impl LogAudio {
    pub fn new(settings: &Settings) -> Self {
        Self {
            muted: settings.sfx_gain() <= 0.0,
            played: 0,
        }
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, sound: Sound) {
        if self.muted {
            return;
        }
        self.played += 1;
        let (freq, _) = voice(sound);
        log::trace!("sound {:?} ({} Hz)", sound, freq);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudio;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, voice};
    use crate::settings::Settings;
    use crate::sim::Sound;

    /// Web Audio sink with procedurally generated voices
    pub struct WebAudio {
        ctx: Option<AudioContext>,
        sfx_gain: f32,
        music_gain: f32,
        drone: Option<OscillatorNode>,
    }

    impl WebAudio {
        pub fn new(settings: &Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                sfx_gain: settings.sfx_gain(),
                music_gain: settings.music_gain(),
                drone: None,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short blip with exponential decay
        fn play_blip(&self, ctx: &AudioContext, sound: Sound, osc_type: OscillatorType) {
            let (freq, duration) = voice(sound);
            let Some((osc, gain)) = Self::create_osc(ctx, freq, osc_type) else {
                return;
            };
            let t = ctx.current_time();
            let duration = duration as f64;

            gain.gain().set_value_at_time(0.1 * self.sfx_gain, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + duration)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + duration).ok();
        }

        /// Low sine drone, one at a time
        fn start_drone(&mut self) {
            if self.drone.is_some() || self.music_gain <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };
            let (freq, _) = voice(Sound::Background);
            let Some((osc, gain)) = Self::create_osc(ctx, freq, OscillatorType::Sine) else {
                return;
            };
            gain.gain()
                .set_value_at_time(0.05 * self.music_gain, ctx.current_time())
                .ok();
            osc.start().ok();
            self.drone = Some(osc);
        }
    }

    impl AudioSink for WebAudio {
        fn play(&mut self, sound: Sound) {
            if sound == Sound::Background {
                self.start_drone();
                return;
            }
            if self.sfx_gain <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers suspend the context until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let osc_type = match sound {
                Sound::Jump => OscillatorType::Sine,
                Sound::Collect => OscillatorType::Square,
                Sound::PowerUp => OscillatorType::Sawtooth,
                Sound::Crash => OscillatorType::Triangle,
                Sound::Background => return,
            };
            self.play_blip(ctx, sound, osc_type);
        }

        fn stop_music(&mut self) {
            if let Some(osc) = self.drone.take() {
                osc.stop().ok();
            }
        }
    }
}
