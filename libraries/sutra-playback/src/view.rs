//! UI surface written by the controller

use crate::clock::ProgressDisplay;
use crate::types::{TextPanelContent, TransportGlyph};

/// Visible player surface
///
/// The controller only writes; user input reaches the controller through its
/// operations.
pub trait PlayerView {
    /// Highlight the card at `index` and clear every other card
    fn render_active_track(&mut self, index: Option<usize>);

    /// Show the selected track's title and subtitle
    fn render_now_playing(&mut self, title: &str, subtitle: &str);

    /// Update the play/pause control
    fn render_glyph(&mut self, glyph: TransportGlyph);

    /// Update elapsed/total labels and the seek bar
    fn render_progress(&mut self, progress: &ProgressDisplay);

    /// Replace the text panel contents
    fn render_text_panel(&mut self, panel: &TextPanelContent);

    /// Update the speed control label
    fn render_rate(&mut self, label: &str);
}

/// View that discards every update
///
/// For hosts that only need the controller's state and events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl PlayerView for NullView {
    fn render_active_track(&mut self, _index: Option<usize>) {}
    fn render_now_playing(&mut self, _title: &str, _subtitle: &str) {}
    fn render_glyph(&mut self, _glyph: TransportGlyph) {}
    fn render_progress(&mut self, _progress: &ProgressDisplay) {}
    fn render_text_panel(&mut self, _panel: &TextPanelContent) {}
    fn render_rate(&mut self, _label: &str) {}
}
