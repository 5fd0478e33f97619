//! Sutra Player - Playback Control
//!
//! Platform-agnostic playlist playback control for Sutra Player.
//!
//! This crate provides:
//! - Track selection by catalog index, with wraparound next/previous
//! - Continuous loop playback (the last track is followed by the first)
//! - Play/pause decided on confirmed media state, not on issued commands
//! - Stale play-request filtering via [`PlayToken`]s
//! - Seek by fraction, guarded against unknown durations
//! - Playback rate cycling
//! - Text panel resolution with a configurable fallback
//! - Optional OS media session publishing and remote commands
//!
//! # Architecture
//!
//! `sutra-playback` knows nothing about the DOM or audio hardware. The host
//! supplies three seams:
//! - [`MediaOutput`] - the audio element (or a simulation of it)
//! - [`PlayerView`] - cards, transport bar, time labels, text panel
//! - [`MediaSession`] - lock-screen metadata and remote commands (optional)
//!
//! Browser bindings live behind the `wasm` feature.
//!
//! # Example: Basic Control
//!
//! ```rust
//! use sutra_core::{Catalog, TrackDescriptor, TextLibrary};
//! use sutra_playback::{MediaEvent, NullView, PlaybackConfig, PlaybackController};
//! # use sutra_playback::{MediaOutput, PlayToken};
//! # use std::time::Duration;
//! # #[derive(Default)]
//! # struct Silent { position: Duration }
//! # impl MediaOutput for Silent {
//! #     fn set_source(&mut self, _uri: &str) {}
//! #     fn load(&mut self) { self.position = Duration::ZERO; }
//! #     fn play(&mut self, _token: PlayToken) {}
//! #     fn pause(&mut self) {}
//! #     fn position(&self) -> Duration { self.position }
//! #     fn seek(&mut self, position: Duration) { self.position = position; }
//! #     fn duration(&self) -> Option<Duration> { Some(Duration::from_secs(60)) }
//! #     fn playback_rate(&self) -> f64 { 1.0 }
//! #     fn set_playback_rate(&mut self, _rate: f64) {}
//! # }
//!
//! let catalog = Catalog::new(
//!     vec![
//!         TrackDescriptor::new("heart.mp3", "Heart Sutra"),
//!         TrackDescriptor::new("bell.mp3", "Evening Bell"),
//!     ],
//!     TextLibrary::new(),
//! );
//!
//! let mut controller =
//!     PlaybackController::new(catalog, PlaybackConfig::default(), Silent::default(), NullView)
//!         .unwrap();
//!
//! // Select the first track; the output answers asynchronously
//! let token = controller.select_track(0).unwrap();
//! controller.handle_media_event(MediaEvent::PlaySettled { token, outcome: Ok(()) });
//! assert!(controller.is_playing());
//!
//! // Jump halfway through
//! assert_eq!(controller.seek(0.5), Some(Duration::from_secs(30)));
//! ```

mod clock;
mod controller;
mod error;
mod events;
mod output;
mod session;
pub mod types;
mod view;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use clock::{format_clock, known_duration, ProgressDisplay};
pub use controller::PlaybackController;
pub use error::{PlayRejection, PlaybackError, Result};
pub use events::PlaybackEvent;
pub use output::{MediaEvent, MediaOutput};
pub use session::{MediaSession, NowPlaying};
pub use types::{
    rate_label, Artwork, Direction, PlayToken, PlaybackConfig, PlaybackState, RemoteCommand,
    SessionSettings, TextPanelContent, TransportGlyph,
};
pub use view::{NullView, PlayerView};
