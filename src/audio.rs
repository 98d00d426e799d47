//! Audio collaborator
//!
//! The engine only ever talks to the [`AudioController`] capability. Failures
//! inside a controller stay inside it; every call is fire-and-forget.

use std::io::{IsTerminal, Write};

use crate::sim::AudioEffect;

/// Capability the engine uses to request sound
pub trait AudioController {
    fn is_enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);
    fn play(&mut self, effect: AudioEffect);
    /// Unlock output after a user gesture. Idempotent.
    fn prime(&mut self);
}

/// Silent controller for environments without usable output
#[derive(Debug, Clone, Default)]
pub struct NoopAudio {
    enabled: bool,
}

impl NoopAudio {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl AudioController for NoopAudio {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn play(&mut self, _effect: AudioEffect) {}

    fn prime(&mut self) {}
}

/// Terminal bell on impact
pub struct BellAudio<W: Write> {
    out: W,
    enabled: bool,
    primed: bool,
}

impl<W: Write> BellAudio<W> {
    pub fn new(out: W, enabled: bool) -> Self {
        Self {
            out,
            enabled,
            primed: false,
        }
    }

    pub fn is_primed(&self) -> bool {
        self.primed
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioController for BellAudio<W> {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn play(&mut self, effect: AudioEffect) {
        if !self.enabled || !self.primed {
            return;
        }
        // Flap and score would ring every few frames
        if effect != AudioEffect::Hit {
            return;
        }
        if let Err(e) = self.out.write_all(b"\x07").and_then(|_| self.out.flush()) {
            log::warn!("Bell output failed: {e}");
        }
    }

    fn prime(&mut self) {
        self.primed = true;
    }
}

/// Pick a controller for the current process: the bell when stdout is a
/// terminal, silence otherwise
pub fn create_audio_controller(enabled: bool) -> Box<dyn AudioController> {
    let stdout = std::io::stdout();
    if stdout.is_terminal() {
        Box::new(BellAudio::new(stdout, enabled))
    } else {
        log::info!("stdout is not a terminal - audio disabled");
        Box::new(NoopAudio::new(enabled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_requires_prime() {
        let mut audio = BellAudio::new(Vec::new(), true);
        audio.play(AudioEffect::Hit);
        assert!(!audio.is_primed());
        audio.prime();
        audio.play(AudioEffect::Hit);
        assert_eq!(audio.into_inner(), b"\x07".to_vec());
    }

    #[test]
    fn test_bell_only_rings_on_hit() {
        let mut audio = BellAudio::new(Vec::new(), true);
        audio.prime();
        audio.play(AudioEffect::Flap);
        audio.play(AudioEffect::Score);
        assert!(audio.into_inner().is_empty());
    }

    #[test]
    fn test_bell_disabled_is_silent() {
        let mut audio = BellAudio::new(Vec::new(), true);
        audio.prime();
        audio.set_enabled(false);
        assert!(!audio.is_enabled());
        audio.play(AudioEffect::Hit);
        assert!(audio.into_inner().is_empty());
    }

    #[test]
    fn test_noop_tracks_enabled() {
        let mut audio = NoopAudio::new(true);
        audio.prime();
        audio.play(AudioEffect::Hit);
        audio.set_enabled(false);
        assert!(!audio.is_enabled());
    }
}
