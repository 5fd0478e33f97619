//! WASM-side configuration

use crate::types::PlaybackConfig;
use serde::{Deserialize, Serialize};

/// Where the player finds its page elements
///
/// Every field has a default matching the stock page markup; JavaScript only
/// passes the ones it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DomBindings {
    /// `<audio>` element id (required on the page)
    pub audio_id: String,

    /// Selector matching the track cards, in catalog order
    pub track_selector: String,

    /// Selector of the title inside a card
    pub title_selector: String,

    /// Selector of the subtitle inside a card
    pub subtitle_selector: String,

    /// Card attribute holding the source URI
    pub source_attribute: String,

    /// Card attribute holding the text panel key
    pub text_key_attribute: String,

    /// Class toggled on the active card
    pub active_class: String,

    pub player_title_id: String,
    pub player_subtitle_id: String,
    pub play_pause_id: String,
    pub previous_id: String,
    pub next_id: String,
    pub progress_id: String,
    pub current_time_id: String,
    pub duration_id: String,
    pub rate_id: String,
    pub text_title_id: String,
    pub text_body_id: String,
}

impl Default for DomBindings {
    fn default() -> Self {
        Self {
            audio_id: "audio".to_string(),
            track_selector: ".track".to_string(),
            title_selector: ".track-title".to_string(),
            subtitle_selector: ".track-desc".to_string(),
            source_attribute: "data-src".to_string(),
            text_key_attribute: "data-sutra-id".to_string(),
            active_class: "active".to_string(),
            player_title_id: "playerTitle".to_string(),
            player_subtitle_id: "playerSub".to_string(),
            play_pause_id: "playPauseBtn".to_string(),
            previous_id: "prevBtn".to_string(),
            next_id: "nextBtn".to_string(),
            progress_id: "progress".to_string(),
            current_time_id: "currentTime".to_string(),
            duration_id: "duration".to_string(),
            rate_id: "speedBtn".to_string(),
            text_title_id: "sutraTitle".to_string(),
            text_body_id: "sutraText".to_string(),
        }
    }
}

/// Options accepted by the `WasmPlayer` constructor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerOptions {
    /// Page bindings
    #[serde(default)]
    pub dom: DomBindings,

    /// Controller configuration
    #[serde(default)]
    pub playback: PlaybackConfig,
}
