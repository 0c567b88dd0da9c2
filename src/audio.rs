//! Audio cue abstraction
//!
//! The simulation core only *triggers* audio; producing sound belongs
//! to the presentation layer. Implementations receive discrete cues and
//! a single loopable background track, at most one track at a time.

/// Short one-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Balloon popped (game over)
    Pop,
    ShieldGet,
    ShieldHit,
    MultiplierGet,
    SweeperGet,
}

/// Loopable background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    BalloonGroove,
}

/// Sink for cue triggers and background-music control.
///
/// `play_music` replaces whatever track is currently playing; the sink
/// never has two background tracks running at once. Implementations
/// must not fail: a sink that cannot play simply drops the request.
pub trait AudioSink {
    fn cue(&mut self, cue: Cue);
    fn play_music(&mut self, track: Track);
    fn stop_music(&mut self);
}

/// Silent sink for headless runs and tests; logs at debug level
#[derive(Debug, Default)]
pub struct NullAudio {
    current: Option<Track>,
}

impl NullAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track currently "playing", if any
    pub fn current_track(&self) -> Option<Track> {
        self.current
    }
}

impl AudioSink for NullAudio {
    fn cue(&mut self, cue: Cue) {
        log::debug!("audio cue: {cue:?}");
    }

    fn play_music(&mut self, track: Track) {
        log::debug!("music start: {track:?}");
        self.current = Some(track);
    }

    fn stop_music(&mut self) {
        if let Some(track) = self.current.take() {
            log::debug!("music stop: {track:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_audio_keeps_one_track() {
        let mut audio = NullAudio::new();
        audio.play_music(Track::BalloonGroove);
        audio.play_music(Track::BalloonGroove);
        assert_eq!(audio.current_track(), Some(Track::BalloonGroove));
        audio.stop_music();
        assert_eq!(audio.current_track(), None);
    }
}
