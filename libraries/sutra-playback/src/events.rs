//! Playback Events
//!
//! Events are queued by the controller and drained by the host, which turns
//! them into callbacks (browser) or log lines (terminal).

use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// A new track was selected
    TrackChanged {
        /// Selected catalog index
        index: usize,
        /// Previously selected index (if any)
        previous: Option<usize>,
    },

    /// Confirmed play/pause state changed
    StateChanged {
        /// Whether the output is playing
        playing: bool,
    },

    /// A play request for the current track was rejected
    PlayRejected {
        /// Catalog index of the rejected request
        index: usize,
        /// Human-readable reason
        reason: String,
    },

    /// Playback rate changed
    RateChanged {
        /// New rate
        rate: f64,
    },
}
