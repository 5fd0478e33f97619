//! OS media session integration (lock screen, hardware keys)

use crate::types::{Artwork, RemoteCommand};
use serde::{Deserialize, Serialize};

/// Metadata published on every track change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NowPlaying {
    /// Track title
    pub title: String,

    /// Artist line
    pub artist: String,

    /// Album line
    pub album: String,

    /// Artwork list
    pub artwork: Vec<Artwork>,
}

/// Optional OS-level now-playing surface
///
/// Remote commands flow back through
/// [`PlaybackController::handle_remote`](crate::PlaybackController::handle_remote).
pub trait MediaSession {
    /// Publish now-playing metadata
    fn publish(&mut self, now_playing: &NowPlaying);

    /// Route the given remote commands to the controller
    fn register_remote_commands(&mut self, commands: &[RemoteCommand]);
}
