//! Platform-agnostic media output trait
//!
//! Abstracts the audio-rendering handle (an `<audio>` element in browsers, a
//! simulated clock in the terminal host).

use crate::error::PlayRejection;
use crate::types::PlayToken;
use std::time::Duration;

/// Single audio-rendering handle
///
/// Commands are fire-and-forget. The output reports what actually happened by
/// feeding [`MediaEvent`]s back into
/// [`PlaybackController::handle_media_event`](crate::PlaybackController::handle_media_event).
pub trait MediaOutput {
    /// Point the output at a new source
    fn set_source(&mut self, uri: &str);

    /// Load the current source, resetting the position to zero
    fn load(&mut self);

    /// Request playback start
    ///
    /// Must eventually deliver exactly one [`MediaEvent::PlaySettled`] carrying
    /// `token`, and must not call back into the controller synchronously.
    fn play(&mut self, token: PlayToken);

    /// Pause playback
    fn pause(&mut self);

    /// Current playback position
    fn position(&self) -> Duration;

    /// Move the playback position
    fn seek(&mut self, position: Duration);

    /// Total duration, `None` until known
    fn duration(&self) -> Option<Duration>;

    /// Current playback rate
    fn playback_rate(&self) -> f64;

    /// Change the playback rate
    fn set_playback_rate(&mut self, rate: f64);
}

/// Lifecycle events reported by a media output
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Playback started
    Play,

    /// Playback paused
    Pause,

    /// Position advanced
    TimeUpdate,

    /// Source played to the end
    Ended,

    /// A play request resolved or was rejected
    PlaySettled {
        /// Token of the request
        token: PlayToken,
        /// Outcome
        outcome: Result<(), PlayRejection>,
    },
}

/// In-memory output for unit tests
///
/// Records commands; play requests stay pending until the test settles them.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct DummyOutput {
    pub source: Option<String>,
    pub loads: usize,
    pub play_requests: Vec<PlayToken>,
    pub pauses: usize,
    pub position: Duration,
    pub duration: Option<Duration>,
    pub rate: f64,
}

#[cfg(test)]
impl MediaOutput for DummyOutput {
    fn set_source(&mut self, uri: &str) {
        self.source = Some(uri.to_string());
    }

    fn load(&mut self) {
        self.loads += 1;
        self.position = Duration::ZERO;
        self.rate = 1.0;
    }

    fn play(&mut self, token: PlayToken) {
        self.play_requests.push(token);
    }

    fn pause(&mut self) {
        self.pauses += 1;
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn seek(&mut self, position: Duration) {
        self.position = position;
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn playback_rate(&self) -> f64 {
        self.rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rate = rate;
    }
}
