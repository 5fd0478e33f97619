/// Track descriptor domain type
use serde::{Deserialize, Serialize};

/// One playable entry of the track catalog
///
/// Descriptors carry no identifier of their own: a track is addressed by its
/// position in the [`Catalog`](crate::Catalog).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDescriptor {
    /// URI handed to the media output
    #[serde(alias = "src")]
    pub source_uri: String,

    /// Display title
    pub title: String,

    /// Display subtitle (reciter, description, ...)
    #[serde(default, alias = "description")]
    pub subtitle: String,

    /// Key into the text library (optional)
    #[serde(default, alias = "text_key")]
    pub text_panel_key: Option<String>,
}

impl TrackDescriptor {
    /// Create a descriptor with an empty subtitle and no text panel
    pub fn new(source_uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            source_uri: source_uri.into(),
            title: title.into(),
            subtitle: String::new(),
            text_panel_key: None,
        }
    }

    /// Set the subtitle
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Set the text panel key
    #[must_use]
    pub fn with_text_key(mut self, key: impl Into<String>) -> Self {
        self.text_panel_key = Some(key.into());
        self
    }

    /// Whether the descriptor has a source to play
    ///
    /// Cards scraped from a page may lack a source attribute; those stay in
    /// the catalog (so indices line up with the page) but cannot be selected.
    pub fn is_playable(&self) -> bool {
        !self.source_uri.trim().is_empty()
    }

    /// Text panel key, ignoring blank values
    pub fn text_key(&self) -> Option<&str> {
        self.text_panel_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_source_is_not_playable() {
        assert!(TrackDescriptor::new("a.mp3", "A").is_playable());
        assert!(!TrackDescriptor::new("", "A").is_playable());
        assert!(!TrackDescriptor::new("   ", "A").is_playable());
    }

    #[test]
    fn blank_text_key_reads_as_none() {
        let track = TrackDescriptor::new("a.mp3", "A").with_text_key("  ");
        assert_eq!(track.text_key(), None);

        let track = TrackDescriptor::new("a.mp3", "A").with_text_key("heart");
        assert_eq!(track.text_key(), Some("heart"));
    }

    #[test]
    fn deserializes_short_field_names() {
        let track: TrackDescriptor =
            serde_json::from_str(r#"{"src": "a.mp3", "title": "A", "text_key": "heart"}"#)
                .unwrap();

        assert_eq!(track.source_uri, "a.mp3");
        assert_eq!(track.subtitle, "");
        assert_eq!(track.text_key(), Some("heart"));
    }
}
