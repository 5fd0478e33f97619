/// Command session driving the playback controller
use crate::command::{Command, HELP};
use crate::config::CliConfig;
use crate::error::Result;
use crate::simulated::SimulatedOutput;
use crate::terminal::TerminalView;
use std::io::{BufRead, Write};
use std::time::Duration;
use sutra_core::Catalog;
use sutra_playback::{format_clock, rate_label, Direction, MediaOutput, PlaybackController};
use tracing::{debug, warn};

/// Upper bound on event rounds per command; ended-then-next chains settle in a few
const MAX_PUMP_ROUNDS: usize = 32;

pub struct Session {
    controller: PlaybackController<SimulatedOutput, TerminalView>,
    tick: Duration,
}

/// What the session loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl Session {
    pub fn new(catalog: Catalog, config: &CliConfig) -> Result<Self> {
        let output = SimulatedOutput::new(&config.simulation);
        let view = TerminalView::new();
        let controller = PlaybackController::new(catalog, config.playback.clone(), output, view)?;

        let mut session = Self {
            controller,
            tick: config.simulation.tick(),
        };
        // Initial render is not interesting in a transcript
        session.controller.view_mut().take_lines();
        Ok(session)
    }

    pub fn controller(&self) -> &PlaybackController<SimulatedOutput, TerminalView> {
        &self.controller
    }

    /// Run one command and return the lines it produced
    pub fn execute(&mut self, command: Command) -> (Flow, Vec<String>) {
        debug!(?command, "Executing");
        let mut lines = Vec::new();

        match command {
            Command::Select(index) => {
                if self.controller.select_track(index).is_none() {
                    lines.push(format!("no playable track #{index}"));
                }
            }
            Command::Click(index) => {
                self.controller.activate_track(index);
            }
            Command::Toggle => {
                self.controller.toggle_play_pause();
            }
            Command::Play => {
                self.controller.play();
            }
            Command::Pause => self.controller.pause(),
            Command::Next => {
                self.controller.advance(Direction::Next);
            }
            Command::Previous => {
                self.controller.advance(Direction::Previous);
            }
            Command::Seek(fraction) => {
                if self.controller.seek(fraction).is_none() {
                    lines.push("seek ignored: duration unknown".to_string());
                }
            }
            Command::Rate => {
                self.controller.cycle_playback_rate();
            }
            Command::Tick(elapsed) => {
                let elapsed = elapsed.unwrap_or(self.tick);
                self.controller.output_mut().advance(elapsed);
            }
            Command::End => self.controller.output_mut().skip_to_end(),
            Command::Remote(remote) => self.controller.handle_remote(remote),
            Command::Status => lines.extend(self.status()),
            Command::Help => lines.extend(HELP.lines().map(str::to_string)),
            Command::Quit => return (Flow::Quit, lines),
        }

        self.pump();
        lines.extend(self.controller.view_mut().take_lines());
        lines.extend(self.controller.drain_events().iter().map(|event| {
            let payload = serde_json::to_string(event)
                .unwrap_or_else(|_| format!("{event:?}"));
            format!("event: {payload}")
        }));

        (Flow::Continue, lines)
    }

    /// Read commands until `quit` or end of input, writing results to `out`
    ///
    /// Malformed lines are reported and skipped. Blank lines and `#` comments
    /// are ignored.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W, echo: bool) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if echo {
                writeln!(out, "> {line}")?;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    warn!("{e}");
                    writeln!(out, "error: {e}")?;
                    continue;
                }
            };

            let (flow, lines) = self.execute(command);
            for line in lines {
                writeln!(out, "{line}")?;
            }
            out.flush()?;

            if flow == Flow::Quit {
                break;
            }
        }

        Ok(())
    }

    /// Feed queued media events back into the controller until none remain
    fn pump(&mut self) {
        for _ in 0..MAX_PUMP_ROUNDS {
            let events = self.controller.output_mut().drain_events();
            if events.is_empty() {
                return;
            }
            for event in events {
                self.controller.handle_media_event(event);
            }
        }
        warn!("Media events still pending after {MAX_PUMP_ROUNDS} rounds");
    }

    fn status(&self) -> Vec<String> {
        let controller = &self.controller;
        let track = match (controller.current_index(), controller.current_track()) {
            (Some(index), Some(track)) => format!("track: #{index} {}", track.title),
            _ => "track: none".to_string(),
        };
        let output = controller.output();
        let total = output.duration().map_or(0.0, |d| d.as_secs_f64());

        vec![
            track,
            format!("playing: {}", controller.is_playing()),
            format!("speed: {}", rate_label(controller.current_rate())),
            format!(
                "time: {} / {}",
                format_clock(output.position().as_secs_f64()),
                format_clock(total)
            ),
            format!("tracks: {}", controller.catalog().len()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sutra_core::{TextLibrary, TrackDescriptor};

    fn session() -> Session {
        let catalog = Catalog::new(
            vec![
                TrackDescriptor::new("a.mp3", "A"),
                TrackDescriptor::new("b.mp3", "B"),
            ],
            TextLibrary::new(),
        );
        Session::new(catalog, &CliConfig::default()).unwrap()
    }

    #[test]
    fn select_settles_within_the_command() {
        let mut session = session();
        let (flow, lines) = session.execute(Command::Select(1));

        assert_eq!(flow, Flow::Continue);
        assert!(session.controller().is_playing());
        assert!(lines.contains(&"active: #1".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("event: {\"type\":\"trackChanged\"")));
        assert!(lines.iter().any(|l| l == "event: {\"type\":\"stateChanged\",\"playing\":true}"));
    }

    #[test]
    fn end_of_last_track_wraps_to_first() {
        let mut session = session();
        session.execute(Command::Select(1));
        session.execute(Command::End);

        assert_eq!(session.controller().current_index(), Some(0));
        assert!(session.controller().is_playing());
    }

    #[test]
    fn unplayable_index_is_reported() {
        let mut session = session();
        let (_, lines) = session.execute(Command::Select(7));
        assert_eq!(lines, vec!["no playable track #7"]);
    }

    #[test]
    fn quit_stops_without_output() {
        let mut session = session();
        assert_eq!(session.execute(Command::Quit), (Flow::Quit, vec![]));
    }
}
