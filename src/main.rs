mod audio;
mod config;
mod food;
mod game;
mod geometry;
mod input;
mod player;
mod render;
mod session;
mod snake;
mod term;

use std::fs::File;
use std::io;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::{error, info};
use rand::{rngs::StdRng, SeedableRng};
use simplelog::{Config, WriteLogger};

use crate::audio::Speaker;
use crate::config::Options;
use crate::game::{Exit, SnakeGame};
use crate::session::Session;
use crate::term::{TermManager, MIN_SIZE};

fn main() -> Result<()> {
    let options = Options::parse();
    let session_config = options.session_config()?;

    let log_file = File::create(&options.log_file)
        .with_context(|| format!("creating log file {}", options.log_file.display()))?;
    WriteLogger::init(options.log_level, Config::default(), log_file).context("initializing logger")?;

    info!("Starting snake duel: {:?}", session_config);

    let rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(session_config, rng);

    let speaker = if options.mute {
        Speaker::muted()
    } else {
        Speaker::open().context("opening audio output (use --mute to play without sound)")?
    };

    let mut term = TermManager::new().context("reading terminal size")?;
    let (width, height) = term.size();
    ensure!(
        width >= MIN_SIZE.0 && height >= MIN_SIZE.1,
        "terminal is {}x{}, need at least {}x{}",
        width,
        height,
        MIN_SIZE.0,
        MIN_SIZE.1
    );
    term.setup().context("setting up terminal")?;

    let mut game = SnakeGame::new(term, speaker, options.timings());
    let played = game.play(&mut session);

    // Restore the terminal whatever happened in the round
    let restored = game.screen_mut().restore();

    match settle(played, restored)? {
        Exit::Finished(outcome) => info!("finished: {:?}", outcome),
        Exit::Quit => info!("quit before the end of the round"),
    }

    Ok(())
}

/// A failed round is the error worth reporting; a terminal that would not
/// restore on top of it is only logged.
fn settle(played: io::Result<Exit>, restored: io::Result<()>) -> Result<Exit> {
    if let Err(e) = &restored {
        error!("could not restore terminal: {}", e);
    }

    let exit = played.context("running the game")?;
    restored.context("restoring terminal")?;
    Ok(exit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Outcome;

    fn broken(what: &str) -> io::Error {
        io::Error::new(io::ErrorKind::Other, what.to_string())
    }

    #[test]
    fn clean_round() {
        let exit = settle(Ok(Exit::Quit), Ok(())).unwrap();
        assert_eq!(exit, Exit::Quit);
    }

    #[test]
    fn round_error_wins_over_restore_error() {
        let err = settle(Err(broken("draw failed")), Err(broken("restore failed"))).unwrap_err();
        assert_eq!(err.to_string(), "running the game");
        assert_eq!(err.root_cause().to_string(), "draw failed");
    }

    #[test]
    fn restore_error_after_good_round() {
        let err = settle(Ok(Exit::Finished(Outcome::Draw)), Err(broken("restore failed"))).unwrap_err();
        assert_eq!(err.to_string(), "restoring terminal");
    }
}
