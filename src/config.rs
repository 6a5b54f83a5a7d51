use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Result};
use clap::Parser;
use log::LevelFilter;

use crate::game::Timings;
use crate::session::SessionConfig;

/// Two-player snake for one keyboard. Player 1 steers with WASD, player 2
/// with the arrow keys.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Options {
    /// Milliseconds between ticks at the start of the round.
    #[arg(
        long = "tick-ms",
        value_name = "MILLISECONDS",
        default_value_t = 100,
        value_parser = clap::value_parser!(u64).range(1..=60_000)
    )]
    pub tick_ms: u64,
    /// How much shorter the tick gets every time either snake eats.
    #[arg(
        long = "speed-step-ms",
        value_name = "MILLISECONDS",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(0..=1_000)
    )]
    pub speed_step_ms: u64,
    /// The tick never gets shorter than this.
    #[arg(
        long = "min-tick-ms",
        value_name = "MILLISECONDS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..=60_000)
    )]
    pub min_tick_ms: u64,
    /// Seed for food placement, for repeatable rounds.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
    /// Play without sound. No audio device is opened.
    #[arg(long)]
    pub mute: bool,
    /// Skip the pauses after eliminations and at the end of the round.
    #[arg(long)]
    pub no_pauses: bool,
    /// Where to write the log. The terminal itself is taken by the game.
    #[arg(long, value_name = "PATH", default_value = "snake_duel.log")]
    pub log_file: PathBuf,
    /// off, error, warn, info, debug or trace.
    #[arg(long, value_name = "LEVEL", default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl Options {
    pub fn session_config(&self) -> Result<SessionConfig> {
        ensure!(
            self.min_tick_ms <= self.tick_ms,
            "--min-tick-ms ({}) must not exceed --tick-ms ({})",
            self.min_tick_ms,
            self.tick_ms
        );

        Ok(SessionConfig {
            tick_interval: Duration::from_millis(self.tick_ms),
            speed_step: Duration::from_millis(self.speed_step_ms),
            min_interval: Duration::from_millis(self.min_tick_ms),
        })
    }

    pub fn timings(&self) -> Timings {
        if self.no_pauses {
            Timings::none()
        } else {
            Timings::standard()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_standard_game() {
        let options = Options::try_parse_from(["snake_duel"]).unwrap();
        assert_eq!(options.session_config().unwrap(), SessionConfig::default());
        assert_eq!(options.timings(), Timings::standard());
        assert_eq!(options.log_level, LevelFilter::Info);
        assert!(!options.mute);
    }

    #[test]
    fn custom_speeds() {
        let options = Options::try_parse_from([
            "snake_duel",
            "--tick-ms",
            "80",
            "--speed-step-ms",
            "2",
            "--min-tick-ms",
            "40",
            "--seed",
            "9",
            "--no-pauses",
            "--log-level",
            "debug",
        ])
        .unwrap();

        let config = options.session_config().unwrap();
        assert_eq!(config.tick_interval, Duration::from_millis(80));
        assert_eq!(config.speed_step, Duration::from_millis(2));
        assert_eq!(config.min_interval, Duration::from_millis(40));
        assert_eq!(options.seed, Some(9));
        assert_eq!(options.timings(), Timings::none());
        assert_eq!(options.log_level, LevelFilter::Debug);
    }

    #[test]
    fn rejects_bad_intervals() {
        assert!(Options::try_parse_from(["snake_duel", "--tick-ms", "0"]).is_err());

        let options = Options::try_parse_from(["snake_duel", "--tick-ms", "20"]).unwrap();
        assert!(options.session_config().is_err());
    }
}
