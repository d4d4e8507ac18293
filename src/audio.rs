//! Audio cue adapter
//!
//! The engine emits events; this module turns them into sound, or
//! deliberately into nothing. A terminal has exactly one built-in
//! sound, the BEL character, so that is what [`TerminalBell`] uses.
//! [`NullAudio`] is the documented fallback when sound is unwanted or
//! unavailable; audio failure is never allowed to become a game error.

use std::io::Write;

/// A discrete sound cue requested by the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    /// The snake ate food
    Eat,
    /// The round ended
    GameOver,
}

/// Where engine-driven sound requests go
pub trait AudioSink {
    /// Play a one-shot cue
    fn play(&mut self, cue: AudioCue);

    /// Suspend background music, if the sink has any
    fn pause_music(&mut self) {}

    /// Resume background music after a reset
    fn resume_music(&mut self) {}

    /// Mute or unmute the sink
    fn set_enabled(&mut self, enabled: bool);
}

/// Sink that discards everything
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) {}

    fn set_enabled(&mut self, _enabled: bool) {}
}

/// Sink that rings the terminal bell: once for eating, twice for a
/// game over. There is no background music to pause or resume.
pub struct TerminalBell {
    enabled: bool,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl AudioSink for TerminalBell {
    fn play(&mut self, cue: AudioCue) {
        if !self.enabled {
            return;
        }

        let bell: &[u8] = match cue {
            AudioCue::Eat => b"\x07",
            AudioCue::GameOver => b"\x07\x07",
        };

        // Stderr owns the terminal while the TUI runs; a write failure
        // here just means no beep.
        let mut stderr = std::io::stderr();
        let _ = stderr.write_all(bell);
        let _ = stderr.flush();
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_audio_accepts_everything() {
        let mut sink = NullAudio;
        sink.play(AudioCue::Eat);
        sink.play(AudioCue::GameOver);
        sink.pause_music();
        sink.resume_music();
        sink.set_enabled(false);
    }

    #[test]
    fn test_bell_respects_mute() {
        let mut bell = TerminalBell::new(false);
        // Muted play must be a no-op (and must not panic without a tty).
        bell.play(AudioCue::Eat);

        bell.set_enabled(true);
        bell.set_enabled(false);
        bell.play(AudioCue::GameOver);
    }
}
