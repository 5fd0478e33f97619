/// Simulated media element
///
/// Behaves like a browser `<audio>` element with a fixed track length: play
/// requests settle later, the clock only moves on `advance`, and reaching the
/// end reports `pause` then `ended`. Lifecycle events queue up until drained.
use crate::config::{AutoplayPolicy, SimulationSettings};
use std::collections::VecDeque;
use std::time::Duration;
use sutra_playback::{MediaEvent, MediaOutput, PlayRejection, PlayToken};
use tracing::debug;

#[derive(Debug)]
pub struct SimulatedOutput {
    track_length: Duration,
    autoplay: AutoplayPolicy,
    source: Option<String>,
    position: Duration,
    duration: Option<Duration>,
    rate: f64,
    playing: bool,
    play_requests: usize,
    events: VecDeque<MediaEvent>,
}

impl SimulatedOutput {
    pub fn new(settings: &SimulationSettings) -> Self {
        Self {
            track_length: settings.track_length(),
            autoplay: settings.autoplay,
            source: None,
            position: Duration::ZERO,
            duration: None,
            rate: 1.0,
            playing: false,
            play_requests: 0,
            events: VecDeque::new(),
        }
    }

    /// Take every queued lifecycle event, oldest first
    pub fn drain_events(&mut self) -> Vec<MediaEvent> {
        self.events.drain(..).collect()
    }

    /// Advance the clock by `elapsed` wall time, scaled by the rate
    pub fn advance(&mut self, elapsed: Duration) {
        if !self.playing {
            return;
        }

        let Some(duration) = self.duration else {
            return;
        };

        // Anything past the end just ends the track
        let step = Duration::try_from_secs_f64(elapsed.as_secs_f64() * self.rate)
            .unwrap_or(duration);
        self.position = self.position.saturating_add(step).min(duration);
        self.events.push_back(MediaEvent::TimeUpdate);

        if self.position >= duration {
            self.finish();
        }
    }

    /// Jump to the end of the current track
    pub fn skip_to_end(&mut self) {
        if let Some(duration) = self.duration {
            self.position = duration;
            self.events.push_back(MediaEvent::TimeUpdate);
            self.finish();
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    fn finish(&mut self) {
        if self.playing {
            self.playing = false;
            self.events.push_back(MediaEvent::Pause);
        }
        self.events.push_back(MediaEvent::Ended);
    }

    fn allows_play(&self) -> bool {
        match self.autoplay {
            AutoplayPolicy::Allow => true,
            AutoplayPolicy::Deny => false,
            AutoplayPolicy::DenyFirst => self.play_requests > 1,
        }
    }
}

impl MediaOutput for SimulatedOutput {
    fn set_source(&mut self, uri: &str) {
        self.source = Some(uri.to_string());
    }

    fn load(&mut self) {
        // Loading stops playback without a pause event and resets the rate
        self.playing = false;
        self.position = Duration::ZERO;
        self.rate = 1.0;
        self.duration = self.source.as_ref().map(|_| self.track_length);
    }

    fn play(&mut self, token: PlayToken) {
        self.play_requests += 1;

        let outcome = if self.source.is_none() {
            Err(PlayRejection::NotSupported)
        } else if self.allows_play() {
            Ok(())
        } else {
            Err(PlayRejection::NotAllowed)
        };

        debug!(?token, ?outcome, "Simulated play request");

        if outcome.is_ok() && !self.playing {
            self.playing = true;
            self.events.push_back(MediaEvent::Play);
        }
        self.events.push_back(MediaEvent::PlaySettled { token, outcome });
    }

    fn pause(&mut self) {
        if self.playing {
            self.playing = false;
            self.events.push_back(MediaEvent::Pause);
        }
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn seek(&mut self, position: Duration) {
        self.position = match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        };
        self.events.push_back(MediaEvent::TimeUpdate);
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn playback_rate(&self) -> f64 {
        self.rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rate = rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output_with(autoplay: AutoplayPolicy) -> SimulatedOutput {
        let settings = SimulationSettings {
            track_length_secs: 10.0,
            tick_secs: 1.0,
            autoplay,
        };
        let mut output = SimulatedOutput::new(&settings);
        output.set_source("a.mp3");
        output.load();
        output
    }

    fn token() -> PlayToken {
        PlayToken {
            index: 0,
            generation: 1,
        }
    }

    #[test]
    fn play_queues_play_then_settlement() {
        let mut output = output_with(AutoplayPolicy::Allow);
        output.play(token());

        assert_eq!(
            output.drain_events(),
            vec![
                MediaEvent::Play,
                MediaEvent::PlaySettled {
                    token: token(),
                    outcome: Ok(())
                },
            ]
        );
        assert!(output.is_playing());
        assert!(output.drain_events().is_empty());
    }

    #[test]
    fn denied_play_only_settles() {
        let mut output = output_with(AutoplayPolicy::Deny);
        output.play(token());

        assert_eq!(
            output.drain_events(),
            vec![MediaEvent::PlaySettled {
                token: token(),
                outcome: Err(PlayRejection::NotAllowed)
            }]
        );
        assert!(!output.is_playing());
    }

    #[test]
    fn deny_first_allows_later_requests() {
        let mut output = output_with(AutoplayPolicy::DenyFirst);
        output.play(token());
        output.play(token());

        let events = output.drain_events();
        assert!(matches!(
            events[0],
            MediaEvent::PlaySettled {
                outcome: Err(PlayRejection::NotAllowed),
                ..
            }
        ));
        assert_eq!(events[1], MediaEvent::Play);
        assert!(output.is_playing());
    }

    #[test]
    fn advance_scales_with_rate_and_ends() {
        let mut output = output_with(AutoplayPolicy::Allow);
        output.set_playback_rate(2.0);
        output.play(token());
        output.drain_events();

        output.advance(Duration::from_secs(3));
        assert_eq!(output.position(), Duration::from_secs(6));

        output.advance(Duration::from_secs(3));
        assert_eq!(output.position(), Duration::from_secs(10));
        assert_eq!(
            output.drain_events(),
            vec![
                MediaEvent::TimeUpdate,
                MediaEvent::TimeUpdate,
                MediaEvent::Pause,
                MediaEvent::Ended
            ]
        );
    }

    #[test]
    fn huge_advance_ends_the_track() {
        let mut output = output_with(AutoplayPolicy::Allow);
        output.set_playback_rate(1.5);
        output.play(token());
        output.drain_events();

        output.advance(Duration::MAX);

        assert_eq!(output.position(), Duration::from_secs(10));
        assert_eq!(output.drain_events().last(), Some(&MediaEvent::Ended));
    }

    #[test]
    fn clock_holds_while_paused() {
        let mut output = output_with(AutoplayPolicy::Allow);
        output.advance(Duration::from_secs(5));

        assert_eq!(output.position(), Duration::ZERO);
        assert!(output.drain_events().is_empty());
    }

    #[test]
    fn load_resets_clock_and_rate() {
        let mut output = output_with(AutoplayPolicy::Allow);
        output.set_playback_rate(1.5);
        output.seek(Duration::from_secs(4));

        output.load();

        assert_eq!(output.position(), Duration::ZERO);
        assert_eq!(output.playback_rate(), 1.0);
        assert_eq!(output.duration(), Some(Duration::from_secs(10)));
    }

    #[test]
    fn seek_clamps_to_duration() {
        let mut output = output_with(AutoplayPolicy::Allow);
        output.seek(Duration::from_secs(60));
        assert_eq!(output.position(), Duration::from_secs(10));
    }

    #[test]
    fn duration_unknown_without_source() {
        let settings = SimulationSettings::default();
        let mut output = SimulatedOutput::new(&settings);
        output.load();

        assert_eq!(output.duration(), None);
        output.play(token());
        assert_eq!(
            output.drain_events(),
            vec![MediaEvent::PlaySettled {
                token: token(),
                outcome: Err(PlayRejection::NotSupported)
            }]
        );
    }
}
