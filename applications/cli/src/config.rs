/// Terminal host configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use sutra_playback::PlaybackConfig;

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "sutra.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default = "default_simulation")]
    pub simulation: SimulationSettings,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSettings {
    /// Length reported for every simulated track
    #[serde(default = "default_track_length_secs")]
    pub track_length_secs: f64,

    /// Clock advance for a bare `tick`
    #[serde(default = "default_tick_secs")]
    pub tick_secs: f64,

    /// How the simulated element answers play requests
    #[serde(default)]
    pub autoplay: AutoplayPolicy,
}

/// Answer of the simulated element to play requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AutoplayPolicy {
    /// Every request succeeds
    #[default]
    Allow,

    /// Every request is refused with `NotAllowedError`
    Deny,

    /// Only the first request is refused, like a page before any user gesture
    DenyFirst,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `sutra.toml` in the working
    /// directory is read when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                let file = config::File::from(path.to_path_buf()).required(true);
                settings = settings.add_source(file);
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (SUTRA_SIMULATION__TICK_SECS=5)
        settings = settings.add_source(
            config::Environment::with_prefix("SUTRA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.playback
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;

        let simulation = &self.simulation;
        if positive_duration(simulation.track_length_secs).is_none() {
            return Err(CliError::Config(format!(
                "track length must be a positive number of seconds, got {}",
                simulation.track_length_secs
            )));
        }

        if positive_duration(simulation.tick_secs).is_none() {
            return Err(CliError::Config(format!(
                "tick must be a positive number of seconds, got {}",
                simulation.tick_secs
            )));
        }

        Ok(())
    }
}

impl SimulationSettings {
    /// Track length; zero when the setting is not a representable duration
    pub fn track_length(&self) -> Duration {
        let length = positive_duration(self.track_length_secs);
        length.unwrap_or_default()
    }

    /// Default tick; zero when the setting is not a representable duration
    pub fn tick(&self) -> Duration {
        positive_duration(self.tick_secs).unwrap_or_default()
    }
}

/// Seconds as a non-zero `Duration`, or `None` when negative, NaN or too large
fn positive_duration(secs: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(secs)
        .ok()
        .filter(|duration| !duration.is_zero())
}

// Default values
fn default_simulation() -> SimulationSettings {
    SimulationSettings {
        track_length_secs: default_track_length_secs(),
        tick_secs: default_tick_secs(),
        autoplay: AutoplayPolicy::default(),
    }
}

fn default_track_length_secs() -> f64 {
    180.0
}

fn default_tick_secs() -> f64 {
    1.0
}

fn default_logging() -> LoggingSettings {
    LoggingSettings {
        filter: default_log_filter(),
    }
}

fn default_log_filter() -> String {
    "sutra_cli=info,sutra_playback=info,sutra_core=info".to_string()
}

impl Default for SimulationSettings {
    fn default() -> Self {
        default_simulation()
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            simulation: default_simulation(),
            logging: default_logging(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CliConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.simulation.track_length(), Duration::from_secs(180));
        assert_eq!(config.simulation.tick(), Duration::from_secs(1));
        assert_eq!(config.simulation.autoplay, AutoplayPolicy::Allow);
    }

    #[test]
    fn rejects_non_positive_tick() {
        let mut config = CliConfig::default();
        config.simulation.tick_secs = 0.0;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn rejects_nan_track_length() {
        let mut config = CliConfig::default();
        config.simulation.track_length_secs = f64::NAN;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn rejects_durations_too_large_to_represent() {
        let mut config = CliConfig::default();
        config.simulation.track_length_secs = 1e20;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));

        let mut config = CliConfig::default();
        config.simulation.tick_secs = f64::INFINITY;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn rejects_empty_rates() {
        let mut config = CliConfig::default();
        config.playback.rates.clear();
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }
}
