//! Process-wide background audio session.
//!
//! The site plays one persistent background track across pages. Rather than
//! letting every page keep its own idea of the player, a single session
//! object is created at app start, lives for the life of the process, and is
//! handed to anything that needs playback control. State changes only through
//! the defined transitions: play, pause, toggle mute.

use parking_lot::RwLock;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlaybackStatus {
    pub playing: bool,
    pub muted: bool,
}

#[derive(Debug, Default)]
pub struct PlaybackSession {
    inner: RwLock<State>,
}

#[derive(Debug)]
struct State {
    playing: bool,
    muted: bool,
}

impl Default for State {
    fn default() -> Self {
        // Autoplay policies force the track to start paused and muted until
        // the user interacts.
        Self {
            playing: false,
            muted: true,
        }
    }
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> PlaybackStatus {
        let state = self.inner.read();
        PlaybackStatus {
            playing: state.playing,
            muted: state.muted,
        }
    }

    /// Start playback. Also unmutes: a deliberate play gesture means the
    /// user wants to hear the track.
    pub fn play(&self) -> PlaybackStatus {
        let mut state = self.inner.write();
        state.playing = true;
        state.muted = false;
        PlaybackStatus {
            playing: state.playing,
            muted: state.muted,
        }
    }

    pub fn pause(&self) -> PlaybackStatus {
        let mut state = self.inner.write();
        state.playing = false;
        PlaybackStatus {
            playing: state.playing,
            muted: state.muted,
        }
    }

    pub fn toggle_mute(&self) -> PlaybackStatus {
        let mut state = self.inner.write();
        state.muted = !state.muted;
        PlaybackStatus {
            playing: state.playing,
            muted: state.muted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_starts_paused_and_muted() {
        let session = PlaybackSession::new();
        let status = session.status();
        assert!(!status.playing);
        assert!(status.muted);
    }

    #[test]
    fn play_unmutes() {
        let session = PlaybackSession::new();
        let status = session.play();
        assert!(status.playing);
        assert!(!status.muted);
    }

    #[test]
    fn pause_keeps_mute_state() {
        let session = PlaybackSession::new();
        session.play();
        let status = session.pause();
        assert!(!status.playing);
        assert!(!status.muted);
    }

    #[test]
    fn toggle_mute_flips() {
        let session = PlaybackSession::new();
        assert!(!session.toggle_mute().muted);
        assert!(session.toggle_mute().muted);
    }
}
