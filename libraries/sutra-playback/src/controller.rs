//! Playback controller - core orchestration
//!
//! Keeps the current-track pointer consistent across the media output, the
//! player view and the optional media session.

use crate::{
    clock::ProgressDisplay,
    error::{PlayRejection, Result},
    events::PlaybackEvent,
    output::{MediaEvent, MediaOutput},
    session::{MediaSession, NowPlaying},
    types::{
        rate_label, Direction, PlayToken, PlaybackConfig, PlaybackState, RemoteCommand,
        TextPanelContent, TransportGlyph,
    },
    view::PlayerView,
};
use std::time::Duration;
use sutra_core::{Catalog, TrackDescriptor};
use tracing::{debug, info, warn};

/// Central playback control
///
/// Owns the single [`PlaybackState`], the media output and the view. Every
/// user action and every media lifecycle event goes through one of its
/// methods; nothing else mutates the state.
///
/// Play requests are asynchronous. Each one is tagged with a [`PlayToken`] and
/// only the settlement of the outstanding request for the live track is
/// applied, so a late answer for a track the user already left is dropped.
pub struct PlaybackController<O: MediaOutput, V: PlayerView> {
    catalog: Catalog,
    config: PlaybackConfig,
    state: PlaybackState,

    output: O,
    view: V,
    session: Option<Box<dyn MediaSession>>,

    // Outstanding play request (if any)
    pending_play: Option<PlayToken>,
    generation: u64,

    // Event queue for host synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<O: MediaOutput, V: PlayerView> PlaybackController<O, V> {
    /// Create a controller and render the initial view
    pub fn new(catalog: Catalog, config: PlaybackConfig, output: O, view: V) -> Result<Self> {
        config.validate()?;

        let mut controller = Self {
            catalog,
            config,
            state: PlaybackState::default(),
            output,
            view,
            session: None,
            pending_play: None,
            generation: 0,
            pending_events: Vec::new(),
        };
        controller.sync();

        let tracks = controller.catalog.len();
        debug!(tracks, "Playback controller ready");
        Ok(controller)
    }

    /// Attach a media session
    #[must_use]
    pub fn with_media_session(mut self, session: Box<dyn MediaSession>) -> Self {
        self.session = Some(session);
        self
    }

    /// Replace (or remove) the media session
    pub fn set_media_session(&mut self, session: Option<Box<dyn MediaSession>>) {
        self.session = session;
    }

    /// Push the whole state to the view and the output rate
    fn sync(&mut self) {
        let rate = self.current_rate();
        self.output.set_playback_rate(rate);

        self.view.render_active_track(self.state.current_index);
        self.view
            .render_glyph(TransportGlyph::for_playing(self.state.is_playing));
        self.view.render_rate(&rate_label(rate));
        self.view.render_progress(&ProgressDisplay::empty());
    }

    // ===== Transport =====

    /// Select and start the track at `index`
    ///
    /// Out-of-range indices and tracks without a source are ignored. Returns
    /// the token of the issued play request.
    pub fn select_track(&mut self, index: usize) -> Option<PlayToken> {
        let Some(track) = self
            .catalog
            .track(index)
            .filter(|track| track.is_playable())
            .cloned()
        else {
            let tracks = self.catalog.len();
            debug!(index, tracks, "Ignoring unavailable track");
            return None;
        };

        let previous = self.state.current_index.replace(index);

        let panel = self.text_panel_for(index, &track);
        self.view.render_text_panel(&panel);

        self.output.set_source(&track.source_uri);
        self.view.render_now_playing(&track.title, &track.subtitle);
        self.view.render_active_track(Some(index));
        self.publish_now_playing(&track);

        // Loading resets position and, on real media elements, the rate
        self.output.load();
        self.output.set_playback_rate(self.current_rate());
        self.view.render_progress(&ProgressDisplay::empty());

        info!(index, title = %track.title, "Selected track");
        self.emit(PlaybackEvent::TrackChanged { index, previous });

        Some(self.request_play(index))
    }

    /// Toggle between play and pause
    ///
    /// Starts the first track when nothing was selected yet. Decides on the
    /// last confirmed state, not on the last command.
    pub fn toggle_play_pause(&mut self) -> Option<PlayToken> {
        match self.state.current_index {
            None => self.select_track(0),
            Some(_) if self.state.is_playing => {
                self.output.pause();
                None
            }
            Some(index) => Some(self.request_play(index)),
        }
    }

    /// Resume the current track (or start the first one)
    pub fn play(&mut self) -> Option<PlayToken> {
        match self.state.current_index {
            None => self.select_track(0),
            Some(_) if self.state.is_playing => None,
            Some(index) => Some(self.request_play(index)),
        }
    }

    /// Ask the output to pause
    pub fn pause(&mut self) {
        if self.state.current_index.is_some() {
            self.output.pause();
        }
    }

    /// Card click: pause the playing track, otherwise (re)start `index`
    pub fn activate_track(&mut self, index: usize) -> Option<PlayToken> {
        if self.state.current_index == Some(index) && self.state.is_playing {
            self.output.pause();
            return None;
        }
        self.select_track(index)
    }

    /// Move to the next or previous track, wrapping at both ends
    pub fn advance(&mut self, direction: Direction) -> Option<PlayToken> {
        let target = direction.target(self.state.current_index, self.catalog.len())?;
        self.select_track(target)
    }

    /// Continue with the next track, looping back to the first
    pub fn on_track_ended(&mut self) -> Option<PlayToken> {
        debug!(index = ?self.state.current_index, "Track ended");
        self.advance(Direction::Next)
    }

    /// Seek to a fraction of the current track
    ///
    /// No-op while the duration is unknown. Returns the new position.
    pub fn seek(&mut self, fraction: f64) -> Option<Duration> {
        if fraction.is_nan() {
            return None;
        }

        let Some(duration) = self.known_duration() else {
            debug!(fraction, "Ignoring seek while duration is unknown");
            return None;
        };

        let position = duration.mul_f64(fraction.clamp(0.0, 1.0));
        self.output.seek(position);
        self.view
            .render_progress(&ProgressDisplay::new(position, Some(duration)));

        Some(position)
    }

    /// Step to the next playback rate and apply it immediately
    pub fn cycle_playback_rate(&mut self) -> f64 {
        self.state.rate_index = (self.state.rate_index + 1) % self.config.rates.len();

        let rate = self.current_rate();
        self.output.set_playback_rate(rate);
        self.view.render_rate(&rate_label(rate));
        self.emit(PlaybackEvent::RateChanged { rate });

        rate
    }

    /// Handle a command from the OS media session
    pub fn handle_remote(&mut self, command: RemoteCommand) {
        debug!(?command, "Remote command");
        match command {
            RemoteCommand::Play => {
                self.play();
            }
            RemoteCommand::Pause => self.pause(),
            RemoteCommand::PreviousTrack => {
                self.advance(Direction::Previous);
            }
            RemoteCommand::NextTrack => {
                self.advance(Direction::Next);
            }
        }
    }

    // ===== Media lifecycle =====

    /// Dispatch a lifecycle event reported by the media output
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Play => self.set_playing(true),
            MediaEvent::Pause => self.set_playing(false),
            MediaEvent::TimeUpdate => self.on_time_update(),
            MediaEvent::Ended => {
                self.on_track_ended();
            }
            MediaEvent::PlaySettled { token, outcome } => self.on_play_settled(token, outcome),
        }
    }

    /// Refresh the time labels and seek bar from the output clock
    pub fn on_time_update(&mut self) {
        let display = ProgressDisplay::new(self.output.position(), self.known_duration());
        self.view.render_progress(&display);
    }

    /// Apply the outcome of a play request
    ///
    /// Settlements for anything but the outstanding request of the live track
    /// are ignored. An aborted request (the user paused or the source changed
    /// before playback began) reverts to paused without a `PlayRejected` event.
    pub fn on_play_settled(
        &mut self,
        token: PlayToken,
        outcome: std::result::Result<(), PlayRejection>,
    ) {
        if self.pending_play != Some(token) || self.state.current_index != Some(token.index) {
            debug!(?token, "Ignoring settlement of superseded play request");
            return;
        }
        self.pending_play = None;

        match outcome {
            Ok(()) => self.set_playing(true),
            Err(PlayRejection::Aborted) => {
                debug!(index = token.index, "Play request aborted");
                self.set_playing(false);
            }
            Err(rejection) => {
                warn!(index = token.index, %rejection, "Play request rejected");
                self.set_playing(false);
                self.emit(PlaybackEvent::PlayRejected {
                    index: token.index,
                    reason: rejection.to_string(),
                });
            }
        }
    }

    // ===== State Queries =====

    /// Snapshot of the controller state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Selected catalog index
    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index
    }

    /// Selected track
    pub fn current_track(&self) -> Option<&TrackDescriptor> {
        self.catalog.track(self.state.current_index?)
    }

    /// Last confirmed play state
    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    /// Active playback rate
    pub fn current_rate(&self) -> f64 {
        self.config
            .rates
            .get(self.state.rate_index)
            .copied()
            .unwrap_or(1.0)
    }

    /// Outstanding play request
    pub fn pending_play(&self) -> Option<PlayToken> {
        self.pending_play
    }

    /// Track catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Controller configuration
    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Text panel contents for the selected track (fallback when none)
    pub fn current_text_panel(&self) -> TextPanelContent {
        match (self.state.current_index, self.current_track()) {
            (Some(index), Some(track)) => self.text_panel_for(index, track),
            _ => self.config.fallback_text.clone(),
        }
    }

    /// Media output
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Mutable media output (host wiring only; bypassing the controller
    /// desynchronizes the state)
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Player view
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable player view
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    // ===== Events =====

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn request_play(&mut self, index: usize) -> PlayToken {
        self.generation += 1;
        let token = PlayToken {
            index,
            generation: self.generation,
        };

        self.pending_play = Some(token);
        self.output.play(token);
        token
    }

    fn set_playing(&mut self, playing: bool) {
        let changed = self.state.is_playing != playing;
        self.state.is_playing = playing;
        self.view.render_glyph(TransportGlyph::for_playing(playing));

        if changed {
            self.emit(PlaybackEvent::StateChanged { playing });
        }
    }

    fn known_duration(&self) -> Option<Duration> {
        self.output
            .duration()
            .filter(|duration| !duration.is_zero())
    }

    fn text_panel_for(&self, index: usize, track: &TrackDescriptor) -> TextPanelContent {
        match self.catalog.text_for(index) {
            Some(entry) if entry.title.is_empty() => {
                TextPanelContent::new(track.title.clone(), entry.body.clone())
            }
            Some(entry) => TextPanelContent::new(entry.title.clone(), entry.body.clone()),
            None => self.config.fallback_text.clone(),
        }
    }

    fn publish_now_playing(&mut self, track: &TrackDescriptor) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let settings = &self.config.session;
        session.publish(&NowPlaying {
            title: track.title.clone(),
            artist: settings.artist.clone(),
            album: settings.album.clone(),
            artwork: settings.artwork.clone(),
        });
        session.register_remote_commands(&RemoteCommand::ALL);
    }

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::DummyOutput;
    use sutra_core::{TextLibrary, TextPanelEntry};

    #[derive(Debug, Default)]
    struct RecordingView {
        active: Option<usize>,
        glyph: Option<TransportGlyph>,
        panel: Option<TextPanelContent>,
        rate: String,
        progress: Option<ProgressDisplay>,
        now_playing: Option<(String, String)>,
    }

    impl PlayerView for RecordingView {
        fn render_active_track(&mut self, index: Option<usize>) {
            self.active = index;
        }
        fn render_now_playing(&mut self, title: &str, subtitle: &str) {
            self.now_playing = Some((title.to_string(), subtitle.to_string()));
        }
        fn render_glyph(&mut self, glyph: TransportGlyph) {
            self.glyph = Some(glyph);
        }
        fn render_progress(&mut self, progress: &ProgressDisplay) {
            self.progress = Some(progress.clone());
        }
        fn render_text_panel(&mut self, panel: &TextPanelContent) {
            self.panel = Some(panel.clone());
        }
        fn render_rate(&mut self, label: &str) {
            self.rate = label.to_string();
        }
    }

    fn create_controller() -> PlaybackController<DummyOutput, RecordingView> {
        let catalog = Catalog::new(
            vec![
                TrackDescriptor::new("a.mp3", "A")
                    .with_subtitle("first")
                    .with_text_key("a"),
                TrackDescriptor::new("b.mp3", "B"),
                TrackDescriptor::new("c.mp3", "C").with_text_key("untitled"),
            ],
            TextLibrary::from_entries(vec![
                TextPanelEntry::new("a", "Text A", "Body A"),
                TextPanelEntry::new("untitled", "", "Body C"),
            ])
            .unwrap(),
        );
        PlaybackController::new(
            catalog,
            PlaybackConfig::default(),
            DummyOutput::default(),
            RecordingView::default(),
        )
        .unwrap()
    }

    #[test]
    fn create_controller_renders_initial_view() {
        let controller = create_controller();
        assert_eq!(controller.current_index(), None);
        assert!(!controller.is_playing());
        assert_eq!(controller.view().glyph, Some(TransportGlyph::Paused));
        assert_eq!(controller.view().rate, "1x");
        assert_eq!(controller.output().rate, 1.0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = PlaybackConfig {
            rates: vec![],
            ..PlaybackConfig::default()
        };
        let result = PlaybackController::new(
            Catalog::default(),
            config,
            DummyOutput::default(),
            RecordingView::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn select_track_loads_and_requests_play() {
        let mut controller = create_controller();
        let token = controller.select_track(0).unwrap();

        assert_eq!(token.index, 0);
        assert_eq!(controller.output().source.as_deref(), Some("a.mp3"));
        assert_eq!(controller.output().loads, 1);
        assert_eq!(controller.output().play_requests, vec![token]);
        assert_eq!(controller.view().active, Some(0));
        assert_eq!(
            controller.view().now_playing,
            Some(("A".to_string(), "first".to_string()))
        );
        assert_eq!(
            controller.view().panel,
            Some(TextPanelContent::new("Text A", "Body A"))
        );
        // Not confirmed yet
        assert!(!controller.is_playing());
    }

    #[test]
    fn entry_without_title_uses_track_title() {
        let mut controller = create_controller();
        controller.select_track(2);
        assert_eq!(
            controller.view().panel,
            Some(TextPanelContent::new("C", "Body C"))
        );
    }

    #[test]
    fn rate_survives_track_change() {
        let mut controller = create_controller();
        controller.cycle_playback_rate();
        controller.select_track(1);
        assert_eq!(controller.output().rate, 1.25);
    }

    #[test]
    fn settled_play_confirms_playing() {
        let mut controller = create_controller();
        let token = controller.select_track(0).unwrap();

        controller.on_play_settled(token, Ok(()));

        assert!(controller.is_playing());
        assert_eq!(controller.pending_play(), None);
        assert_eq!(controller.view().glyph, Some(TransportGlyph::Playing));
    }

    #[test]
    fn toggle_pauses_only_when_confirmed_playing() {
        let mut controller = create_controller();
        let first = controller.toggle_play_pause().unwrap();
        assert_eq!(first.index, 0);

        // Still unconfirmed: toggling requests play again
        let second = controller.toggle_play_pause().unwrap();
        assert_ne!(first, second);
        assert_eq!(controller.output().pauses, 0);

        controller.handle_media_event(MediaEvent::Play);
        assert_eq!(controller.toggle_play_pause(), None);
        assert_eq!(controller.output().pauses, 1);
    }

    #[test]
    fn time_update_without_duration() {
        let mut controller = create_controller();
        controller.output_mut().position = Duration::from_secs(7);

        controller.on_time_update();

        let progress = controller.view().progress.clone().unwrap();
        assert_eq!(progress.elapsed, "0:07");
        assert_eq!(progress.fraction, None);
    }

    #[test]
    fn seek_ignores_zero_duration() {
        let mut controller = create_controller();
        controller.output_mut().duration = Some(Duration::ZERO);
        assert_eq!(controller.seek(0.5), None);
    }

    #[test]
    fn events_are_drained() {
        let mut controller = create_controller();
        let token = controller.select_track(1).unwrap();
        controller.on_play_settled(token, Ok(()));

        assert!(controller.has_pending_events());
        let events = controller.drain_events();
        assert_eq!(
            events,
            vec![
                PlaybackEvent::TrackChanged {
                    index: 1,
                    previous: None
                },
                PlaybackEvent::StateChanged { playing: true },
            ]
        );
        assert!(!controller.has_pending_events());
    }
}
