/// Session command parsing
use crate::error::{CliError, Result};
use std::str::FromStr;
use std::time::Duration;
use sutra_playback::RemoteCommand;

/// One line of the command session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `select N`: play catalog entry N
    Select(usize),
    /// `click N`: card click on entry N (pauses it when it is playing)
    Click(usize),
    Toggle,
    Play,
    Pause,
    Next,
    Previous,
    /// `seek F`: jump to fraction F of the track
    Seek(f64),
    Rate,
    /// `tick [SECS]`: let the simulated clock run
    Tick(Option<Duration>),
    /// `end`: jump to the end of the track
    End,
    Remote(RemoteCommand),
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  select N      play track N
  click N       click card N (pauses the playing track)
  toggle        play/pause
  play | pause  remote-style play or pause
  next | prev   skip forward or back (wraps)
  seek F        jump to fraction F (0.0 - 1.0)
  rate          cycle playback speed
  tick [SECS]   advance the clock
  end           jump to the end of the track
  remote CMD    media session action (play, pause, previoustrack, nexttrack)
  status        show player state
  help          show this help
  quit          leave the session";

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CliError::Command("empty command".to_string()));
        };
        let argument = words.next();

        if let Some(extra) = words.next() {
            return Err(CliError::Command(format!("unexpected argument '{extra}'")));
        }

        let command = match (name.to_ascii_lowercase().as_str(), argument) {
            ("select", Some(arg)) => Command::Select(parse_index(arg)?),
            ("click", Some(arg)) => Command::Click(parse_index(arg)?),
            ("toggle", None) => Command::Toggle,
            ("play", None) => Command::Play,
            ("pause", None) => Command::Pause,
            ("next", None) => Command::Next,
            ("prev" | "previous", None) => Command::Previous,
            ("seek", Some(arg)) => Command::Seek(parse_number(arg)?),
            ("rate" | "speed", None) => Command::Rate,
            ("tick", arg) => Command::Tick(arg.map(parse_tick).transpose()?),
            ("end", None) => Command::End,
            ("remote", Some(arg)) => Command::Remote(parse_remote(arg)?),
            ("status", None) => Command::Status,
            ("help" | "?", None) => Command::Help,
            ("quit" | "exit", None) => Command::Quit,
            ("select" | "click" | "seek" | "remote", None) => {
                return Err(CliError::Command(format!("'{name}' needs an argument")));
            }
            (_, Some(arg)) if is_known(name) => {
                return Err(CliError::Command(format!(
                    "'{name}' takes no argument, got '{arg}'"
                )));
            }
            _ => return Err(CliError::Command(format!("unknown command '{name}'"))),
        };

        Ok(command)
    }
}

fn is_known(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "toggle"
            | "play"
            | "pause"
            | "next"
            | "prev"
            | "previous"
            | "rate"
            | "speed"
            | "end"
            | "status"
            | "help"
            | "?"
            | "quit"
            | "exit"
    )
}

fn parse_index(arg: &str) -> Result<usize> {
    arg.parse()
        .map_err(|_| CliError::Command(format!("'{arg}' is not a track index")))
}

fn parse_number(arg: &str) -> Result<f64> {
    arg.parse()
        .map_err(|_| CliError::Command(format!("'{arg}' is not a number")))
}

fn parse_tick(arg: &str) -> Result<Duration> {
    let secs = parse_number(arg)?;
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|tick| !tick.is_zero())
        .ok_or_else(|| CliError::Command(format!("tick needs a positive duration, got '{arg}'")))
}

fn parse_remote(arg: &str) -> Result<RemoteCommand> {
    let action = match arg.to_ascii_lowercase().as_str() {
        "prev" | "previous" => "previoustrack".to_string(),
        "next" => "nexttrack".to_string(),
        other => other.to_string(),
    };

    RemoteCommand::from_action_name(&action)
        .ok_or_else(|| CliError::Command(format!("unknown remote action '{arg}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!("select 2".parse::<Command>().unwrap(), Command::Select(2));
        assert_eq!("click 0".parse::<Command>().unwrap(), Command::Click(0));
        assert_eq!("seek 0.25".parse::<Command>().unwrap(), Command::Seek(0.25));
        assert_eq!("tick".parse::<Command>().unwrap(), Command::Tick(None));
        assert_eq!(
            "tick 2.5".parse::<Command>().unwrap(),
            Command::Tick(Some(Duration::from_millis(2500)))
        );
    }

    #[test]
    fn parses_aliases_and_case() {
        assert_eq!("PREV".parse::<Command>().unwrap(), Command::Previous);
        assert_eq!("speed".parse::<Command>().unwrap(), Command::Rate);
        assert_eq!("  quit  ".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn parses_remote_actions() {
        assert_eq!(
            "remote nexttrack".parse::<Command>().unwrap(),
            Command::Remote(RemoteCommand::NextTrack)
        );
        assert_eq!(
            "remote prev".parse::<Command>().unwrap(),
            Command::Remote(RemoteCommand::PreviousTrack)
        );
        assert!("remote stop".parse::<Command>().is_err());
    }

    #[test]
    fn rejects_malformed_lines() {
        let lines = [
            "",
            "select",
            "select x",
            "select -1",
            "toggle 3",
            "tick 0",
            "tick -2",
            "tick NaN",
            "tick 1e20",
            "dance",
            "seek 1 2",
        ];
        for line in lines {
            assert!(
                matches!(line.parse::<Command>(), Err(CliError::Command(_))),
                "accepted {line:?}"
            );
        }
    }
}
