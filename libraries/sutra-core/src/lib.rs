//! Sutra Player Core
//!
//! Platform-agnostic domain types shared by every Sutra Player host.
//!
//! The core crate defines:
//! - **Track Catalog**: the ordered list of [`TrackDescriptor`]s a player
//!   navigates by index
//! - **Text Panel**: [`TextPanelEntry`] lookup for the material shown next to
//!   the current track
//! - **Error Handling**: unified [`CoreError`] and [`Result`] types
//!
//! # Example
//!
//! ```rust
//! use sutra_core::Catalog;
//!
//! let json = r#"{
//!     "tracks": [
//!         { "source_uri": "audio/heart.mp3", "title": "Heart Sutra", "text_panel_key": "heart" },
//!         { "source_uri": "audio/bell.mp3", "title": "Evening Bell" }
//!     ],
//!     "texts": [
//!         { "key": "heart", "title": "Heart Sutra", "body": "Form is emptiness..." }
//!     ]
//! }"#;
//!
//! let catalog = Catalog::from_json_str(json).unwrap();
//! assert_eq!(catalog.len(), 2);
//! assert!(catalog.text_for(0).is_some());
//! assert!(catalog.text_for(1).is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Error types
pub mod error;
/// Catalog, track and text types
pub mod types;

pub use error::{CoreError, Result};
pub use types::{Catalog, CatalogFormat, TextLibrary, TextPanelEntry, TrackDescriptor};
