//! Error types for playback control

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

/// Why a play request did not start playback
///
/// Rejections are recovered locally (the transport reverts to paused); they
/// are carried as values so hosts can report them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayRejection {
    /// Environment policy refused playback (e.g. autoplay without a gesture)
    #[error("playback not allowed")]
    NotAllowed,

    /// Source could not be decoded or fetched
    #[error("source not supported")]
    NotSupported,

    /// Request was interrupted by a newer load or pause
    #[error("play request aborted")]
    Aborted,

    /// Any other failure
    #[error("{0}")]
    Other(String),
}

impl PlayRejection {
    /// Map a DOMException name onto a rejection
    pub fn from_dom_name(name: &str, message: &str) -> Self {
        match name {
            "NotAllowedError" => Self::NotAllowed,
            "NotSupportedError" => Self::NotSupported,
            "AbortError" => Self::Aborted,
            _ if message.is_empty() => Self::Other(name.to_string()),
            _ => Self::Other(format!("{name}: {message}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_names_map_to_rejections() {
        assert_eq!(
            PlayRejection::from_dom_name("NotAllowedError", "user gesture required"),
            PlayRejection::NotAllowed
        );
        assert_eq!(
            PlayRejection::from_dom_name("NotSupportedError", ""),
            PlayRejection::NotSupported
        );
        assert_eq!(
            PlayRejection::from_dom_name("AbortError", "interrupted"),
            PlayRejection::Aborted
        );
        assert_eq!(
            PlayRejection::from_dom_name("NetworkError", "offline"),
            PlayRejection::Other("NetworkError: offline".to_string())
        );
        assert_eq!(
            PlayRejection::from_dom_name("Weird", ""),
            PlayRejection::Other("Weird".to_string())
        );
    }
}
