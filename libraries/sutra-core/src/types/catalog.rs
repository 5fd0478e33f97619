/// Ordered track catalog with its text library
use super::{TextLibrary, TextPanelEntry, TrackDescriptor};
use crate::error::{CoreError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// On-disk catalog encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl CatalogFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Ok(Self::Json),
            "toml" => Ok(Self::Toml),
            _ => Err(CoreError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Serialized catalog layout shared by both formats
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tracks: Vec<TrackDescriptor>,

    #[serde(default)]
    texts: Vec<TextPanelEntry>,
}

/// Ordered sequence of tracks plus the text entries they reference
///
/// The catalog is immutable once built; positions are the only track identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    tracks: Vec<TrackDescriptor>,
    texts: TextLibrary,
}

impl Catalog {
    /// Create a catalog from tracks and a text library
    pub fn new(tracks: Vec<TrackDescriptor>, texts: TextLibrary) -> Self {
        Self { tracks, texts }
    }

    /// Parse a JSON catalog
    pub fn from_json_str(input: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(input)?;
        Self::from_file(file)
    }

    /// Parse a TOML catalog
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(input)?;
        Self::from_file(file)
    }

    /// Parse a catalog in the given format
    pub fn parse(input: &str, format: CatalogFormat) -> Result<Self> {
        match format {
            CatalogFormat::Json => Self::from_json_str(input),
            CatalogFormat::Toml => Self::from_toml_str(input),
        }
    }

    /// Load a catalog file, choosing the format by extension
    pub fn load(path: &Path) -> Result<Self> {
        let format = CatalogFormat::from_path(path)?;
        let input = std::fs::read_to_string(path)?;
        let catalog = Self::parse(&input, format)?;

        debug!(
            path = %path.display(),
            tracks = catalog.len(),
            texts = catalog.texts.len(),
            "Loaded catalog"
        );

        Ok(catalog)
    }

    fn from_file(file: CatalogFile) -> Result<Self> {
        let texts = TextLibrary::from_entries(file.texts)?;
        Ok(Self::new(file.tracks, texts))
    }

    /// Track at `index`, if any
    pub fn track(&self, index: usize) -> Option<&TrackDescriptor> {
        self.tracks.get(index)
    }

    /// All tracks in catalog order
    pub fn tracks(&self) -> &[TrackDescriptor] {
        &self.tracks
    }

    /// Text library
    pub fn texts(&self) -> &TextLibrary {
        &self.texts
    }

    /// Text entry referenced by the track at `index`
    ///
    /// `None` when the index is out of range, the track has no key, or the key
    /// has no entry.
    pub fn text_for(&self, index: usize) -> Option<&TextPanelEntry> {
        let key = self.track(index)?.text_key()?;
        self.texts.get(key)
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the catalog has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Index of the last track
    pub fn last_index(&self) -> Option<usize> {
        self.tracks.len().checked_sub(1)
    }

    /// Tracks that reference a missing text entry, as `(index, key)` pairs
    pub fn dangling_text_keys(&self) -> Vec<(usize, &str)> {
        self.tracks
            .iter()
            .enumerate()
            .filter_map(|(index, track)| {
                let key = track.text_key()?;
                self.texts.get(key).is_none().then_some((index, key))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOML_CATALOG: &str = r#"
        [[tracks]]
        source_uri = "audio/heart.mp3"
        title = "Heart Sutra"
        subtitle = "Morning recitation"
        text_panel_key = "heart"

        [[tracks]]
        src = "audio/bell.mp3"
        title = "Evening Bell"

        [[texts]]
        key = "heart"
        title = "Heart Sutra"
        body = "Form is emptiness"
    "#;

    #[test]
    fn parse_toml_catalog() {
        let catalog = Catalog::from_toml_str(TOML_CATALOG).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.track(0).unwrap().subtitle, "Morning recitation");
        assert_eq!(catalog.track(1).unwrap().source_uri, "audio/bell.mp3");
        assert_eq!(catalog.text_for(0).unwrap().body, "Form is emptiness");
        assert!(catalog.text_for(1).is_none());
        assert!(catalog.text_for(2).is_none());
    }

    #[test]
    fn empty_input_is_an_empty_catalog() {
        let catalog = Catalog::from_json_str("{}").unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.last_index(), None);
    }

    #[test]
    fn last_index_tracks_length() {
        let catalog = Catalog::from_toml_str(TOML_CATALOG).unwrap();
        assert_eq!(catalog.last_index(), Some(1));
    }

    #[test]
    fn dangling_keys_are_reported() {
        let catalog = Catalog::new(
            vec![
                TrackDescriptor::new("a.mp3", "A").with_text_key("heart"),
                TrackDescriptor::new("b.mp3", "B").with_text_key("lotus"),
            ],
            TextLibrary::from_entries(vec![TextPanelEntry::new("heart", "Heart", "")]).unwrap(),
        );

        assert_eq!(catalog.dangling_text_keys(), vec![(1, "lotus")]);
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            CatalogFormat::from_path(Path::new("catalog.JSON")).unwrap(),
            CatalogFormat::Json
        );
        assert_eq!(
            CatalogFormat::from_path(Path::new("dir/catalog.toml")).unwrap(),
            CatalogFormat::Toml
        );
        assert!(matches!(
            CatalogFormat::from_path(Path::new("catalog.yaml")),
            Err(CoreError::UnsupportedFormat(_))
        ));
    }
}
