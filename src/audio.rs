//! Sound effects
//!
//! The game only asks for named effects through [`AudioSink`]. On the web
//! they are synthesised with the Web Audio API - no external files needed.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Mac takes a bite of grass
    Bite,
}

impl SoundEffect {
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Bite => "bite",
        }
    }

    /// Sound a simulation event should make, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Bite { .. } => Some(SoundEffect::Bite),
        }
    }
}

/// Fire-and-forget sound playback
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Logs effects instead of playing them (native builds)
#[derive(Debug, Default)]
pub struct LogAudio {
    pub played: u64,
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.played += 1;
        log::debug!("Playing sound '{}'", effect.name());
    }
}

/// Remembers every effect, in order
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub effects: Vec<SoundEffect>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.effects.push(effect);
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioSink, SoundEffect};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: settings.effective_sfx_volume(),
            }
        }

        /// Re-read volume after settings change
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.volume = settings.effective_sfx_volume();
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
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

        /// Bite - two quick crunchy chomps
        fn play_bite(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            for (i, start) in [0.0, 0.09].into_iter().enumerate() {
                let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Square) else {
                    return;
                };
                let t0 = t + start;
                let peak = if i == 0 { 0.3 } else { 0.22 };

                gain.gain().set_value_at_time(vol * peak, t0).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t0 + 0.06)
                    .ok();
                osc.frequency().set_value_at_time(220.0, t0).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(90.0, t0 + 0.06)
                    .ok();

                osc.start_with_when(t0).ok();
                osc.stop_with_when(t0 + 0.08).ok();
            }
        }
    }

    impl AudioSink for AudioManager {
        fn play(&mut self, effect: SoundEffect) {
            let vol = self.volume;
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Bite => self.play_bite(ctx, vol),
            }
        }
    }
}
