//! Core types for playback control

use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};

/// Controller state
///
/// A single instance lives inside [`PlaybackController`](crate::PlaybackController)
/// and is only changed by its operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Selected catalog index (`None` until the first selection)
    pub current_index: Option<usize>,

    /// Last confirmed play/pause state of the media output
    pub is_playing: bool,

    /// Index into [`PlaybackConfig::rates`]
    pub rate_index: usize,
}

/// Handle for one play request
///
/// Tokens compare equal only for the same request: the generation increases
/// with every request, so a settlement for a superseded request never matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayToken {
    /// Catalog index the request was issued for
    pub index: usize,

    /// Request sequence number
    pub generation: u64,
}

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards the end of the catalog
    Next,

    /// Towards the start of the catalog
    Previous,
}

impl Direction {
    /// Target index with wraparound
    ///
    /// Next from the last track (or from no selection) is 0; previous from the
    /// first track (or from no selection) is the last track. `None` for an
    /// empty catalog.
    pub fn target(self, current: Option<usize>, len: usize) -> Option<usize> {
        let last = len.checked_sub(1)?;
        let target = match (self, current) {
            (Direction::Next, Some(index)) if index < last => index + 1,
            (Direction::Next, _) => 0,
            (Direction::Previous, Some(index)) if index > 0 && index <= last => index - 1,
            (Direction::Previous, _) => last,
        };
        Some(target)
    }
}

/// Glyph shown on the play/pause control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportGlyph {
    /// Output is paused; the control offers "play"
    Paused,

    /// Output is playing; the control offers "pause"
    Playing,
}

impl TransportGlyph {
    /// Glyph for a playing flag
    pub fn for_playing(is_playing: bool) -> Self {
        if is_playing {
            Self::Playing
        } else {
            Self::Paused
        }
    }

    /// Text rendered on the control
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Paused => "▶",
            Self::Playing => "⏸",
        }
    }
}

/// Transport commands delivered by the OS media session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteCommand {
    /// Resume playback
    Play,

    /// Pause playback
    Pause,

    /// Previous track
    PreviousTrack,

    /// Next track
    NextTrack,
}

impl RemoteCommand {
    /// Every command the controller registers
    pub const ALL: [RemoteCommand; 4] = [
        RemoteCommand::Play,
        RemoteCommand::Pause,
        RemoteCommand::PreviousTrack,
        RemoteCommand::NextTrack,
    ];

    /// Media Session action name
    pub fn action_name(self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::PreviousTrack => "previoustrack",
            Self::NextTrack => "nexttrack",
        }
    }

    /// Parse a Media Session action name
    pub fn from_action_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.action_name() == name)
    }
}

/// Resolved text panel contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPanelContent {
    /// Panel heading
    pub title: String,

    /// Panel body
    pub body: String,
}

impl TextPanelContent {
    /// Create panel contents
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Artwork entry published to the media session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    /// Image URL
    pub src: String,

    /// Size hint (e.g. `256x256`)
    #[serde(default)]
    pub sizes: String,

    /// MIME type (e.g. `image/png`)
    #[serde(default, rename = "type")]
    pub mime_type: String,
}

/// Static now-playing fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Artist shown on lock screens
    #[serde(default = "default_artist")]
    pub artist: String,

    /// Album shown on lock screens
    #[serde(default = "default_album")]
    pub album: String,

    /// Artwork list
    #[serde(default)]
    pub artwork: Vec<Artwork>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            artist: default_artist(),
            album: default_album(),
            artwork: Vec::new(),
        }
    }
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Playback rates cycled by the speed control (default: 1.0, 1.25, 1.5)
    #[serde(default = "default_rates")]
    pub rates: Vec<f64>,

    /// Text shown when a track has no text entry
    #[serde(default = "default_fallback_text")]
    pub fallback_text: TextPanelContent,

    /// Media session metadata
    #[serde(default)]
    pub session: SessionSettings,
}

impl PlaybackConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.rates.is_empty() {
            return Err(PlaybackError::InvalidConfig(
                "at least one playback rate is required".to_string(),
            ));
        }

        if let Some(rate) = self.rates.iter().find(|r| !r.is_finite() || **r <= 0.0) {
            return Err(PlaybackError::InvalidConfig(format!(
                "playback rate must be a positive number, got {rate}"
            )));
        }

        Ok(())
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            rates: default_rates(),
            fallback_text: default_fallback_text(),
            session: SessionSettings::default(),
        }
    }
}

// Default values
fn default_rates() -> Vec<f64> {
    vec![1.0, 1.25, 1.5]
}

fn default_fallback_text() -> TextPanelContent {
    TextPanelContent::new(
        "No text available",
        "There is no accompanying text for this recording yet.",
    )
}

fn default_artist() -> String {
    "Sutra Player".to_string()
}

fn default_album() -> String {
    "Recitations".to_string()
}

/// Label for a playback rate (`1x`, `1.25x`)
pub fn rate_label(rate: f64) -> String {
    format!("{rate}x")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert_eq!(config.rates, vec![1.0, 1.25, 1.5]);
        assert_eq!(config.fallback_text.title, "No text available");
        assert!(config.session.artwork.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_rates_are_invalid() {
        let config = PlaybackConfig {
            rates: vec![],
            ..PlaybackConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PlaybackError::InvalidConfig(_))
        ));
    }

    #[test]
    fn non_positive_rates_are_invalid() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = PlaybackConfig {
                rates: vec![1.0, bad],
                ..PlaybackConfig::default()
            };
            assert!(config.validate().is_err(), "rate {bad} accepted");
        }
    }

    #[test]
    fn partial_config_uses_defaults() {
        let config: PlaybackConfig = serde_json::from_str(r#"{"rates": [0.75, 1.0]}"#).unwrap();
        assert_eq!(config.rates, vec![0.75, 1.0]);
        assert_eq!(config.session.artist, "Sutra Player");
    }

    #[test]
    fn next_wraps_to_start() {
        assert_eq!(Direction::Next.target(Some(0), 3), Some(1));
        assert_eq!(Direction::Next.target(Some(2), 3), Some(0));
        assert_eq!(Direction::Next.target(None, 3), Some(0));
    }

    #[test]
    fn previous_wraps_to_end() {
        assert_eq!(Direction::Previous.target(Some(2), 3), Some(1));
        assert_eq!(Direction::Previous.target(Some(0), 3), Some(2));
        assert_eq!(Direction::Previous.target(None, 3), Some(2));
    }

    #[test]
    fn empty_catalog_has_no_target() {
        assert_eq!(Direction::Next.target(None, 0), None);
        assert_eq!(Direction::Previous.target(Some(0), 0), None);
    }

    #[test]
    fn single_track_wraps_onto_itself() {
        assert_eq!(Direction::Next.target(Some(0), 1), Some(0));
        assert_eq!(Direction::Previous.target(Some(0), 1), Some(0));
    }

    #[test]
    fn glyph_symbols() {
        assert_eq!(TransportGlyph::for_playing(true).symbol(), "⏸");
        assert_eq!(TransportGlyph::for_playing(false).symbol(), "▶");
    }

    #[test]
    fn remote_command_action_names_round_trip() {
        for cmd in RemoteCommand::ALL {
            let name = cmd.action_name();
            assert_eq!(RemoteCommand::from_action_name(name), Some(cmd));
        }
        assert_eq!(RemoteCommand::from_action_name("seekto"), None);
    }

    #[test]
    fn rate_labels() {
        assert_eq!(rate_label(1.0), "1x");
        assert_eq!(rate_label(1.25), "1.25x");
        assert_eq!(rate_label(1.5), "1.5x");
    }
}
