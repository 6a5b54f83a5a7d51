use std::{io, thread::sleep, time::{Duration, Instant}};

use log::{info, warn};
use rand::Rng;

use crate::audio::{AudioAdapter, Cue, Track};
use crate::input::{Command, InputSource};
use crate::render::{Renderer, StyleHint};
use crate::session::{Event, Outcome, Session, SessionState};

const POLL_INTERVAL_MS: u64 = 5;

/// Presentation pauses around eliminations and the end of the round.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Timings {
    pub after_elimination: Duration,
    pub after_clear: Duration,
    pub game_over: Duration,
    pub result: Duration,
}

impl Timings {
    pub fn standard() -> Self {
        Timings {
            after_elimination: Duration::from_secs(2),
            after_clear: Duration::from_secs(1),
            game_over: Duration::from_secs(4),
            result: Duration::from_secs(5),
        }
    }

    pub fn none() -> Self {
        Timings {
            after_elimination: Duration::ZERO,
            after_clear: Duration::ZERO,
            game_over: Duration::ZERO,
            result: Duration::ZERO,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Exit {
    Finished(Outcome),
    Quit,
}

/// Drives a session in real time: feeds it input, ticks it at its current
/// interval and presents what happened.
pub struct SnakeGame<S, A> {
    screen: S,
    audio: A,
    timings: Timings,
    paused: bool,
}

impl<S, A> SnakeGame<S, A>
where
    S: Renderer + InputSource,
    A: AudioAdapter,
{
    pub fn new(screen: S, audio: A, timings: Timings) -> Self {
        SnakeGame { screen, audio, timings, paused: false }
    }

    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    pub fn play<R: Rng>(&mut self, session: &mut Session<R>) -> io::Result<Exit> {
        info!("round started");
        self.play_loop(Track::Melody);
        self.screen.clear_all()?;
        self.screen.draw_actors(&session.frame())?;

        let mut last_tick = Instant::now();

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            for command in self.screen.poll_commands()? {
                match command {
                    Command::Quit => {
                        info!("quit requested");
                        return Ok(Exit::Quit);
                    }
                    Command::TogglePause => {
                        self.toggle_pause(session)?;
                        last_tick = Instant::now();
                    }
                    Command::Steer(side, heading) if !self.paused => {
                        session.set_heading(side, heading);
                    }
                    Command::Steer(..) => {}
                }
            }

            if self.paused || last_tick.elapsed() < session.tick_interval() {
                continue;
            }
            last_tick = Instant::now();

            let events = session.tick();
            self.screen.draw_actors(&session.frame())?;

            for event in events {
                match event {
                    Event::FoodEaten(_) => self.play_once(Cue::FoodEaten),
                    Event::Eliminated(..) => {
                        self.play_once(Cue::Eliminated);
                        sleep(self.timings.after_elimination);
                        self.play_loop(Track::Melody);
                        last_tick = Instant::now();
                    }
                    Event::RoundOver(_) => {}
                }
            }

            if let SessionState::Ending(_) = session.state() {
                self.game_over()?;
                if let Some(outcome) = session.finish() {
                    self.announce(session, outcome)?;
                    return Ok(Exit::Finished(outcome));
                }
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn game_over(&mut self) -> io::Result<()> {
        self.stop();
        self.screen.clear_all()?;
        sleep(self.timings.after_clear);

        self.play_once(Cue::RoundOver);
        self.screen.show_text("GAME OVER", StyleHint::Banner)?;
        sleep(self.timings.game_over);
        self.screen.clear_all()
    }

    fn announce<R: Rng>(&mut self, session: &Session<R>, outcome: Outcome) -> io::Result<()> {
        let message = match outcome {
            Outcome::Winner(side) => format!("{} WINS!", session.player(side).name()),
            Outcome::Draw => "IT'S A DRAW!".to_string(),
        };
        info!("{}", message);

        self.play_once(Cue::WinnerAnnounced);
        self.screen.show_text(&message, StyleHint::Announcement)?;
        sleep(self.timings.result);
        Ok(())
    }

    fn toggle_pause<R: Rng>(&mut self, session: &Session<R>) -> io::Result<()> {
        self.paused = !self.paused;

        if self.paused {
            self.screen.show_text("Paused\nPress Esc to resume\nor Ctrl+C to quit", StyleHint::Notice)
        } else {
            self.screen.draw_actors(&session.frame())
        }
    }

    // Sound is never worth ending the round over

    fn play_loop(&mut self, track: Track) {
        if let Err(e) = self.audio.play_loop(track) {
            warn!("could not play {}: {}", track.name(), e);
        }
    }

    fn play_once(&mut self, cue: Cue) {
        if let Err(e) = self.audio.play_once(cue) {
            warn!("could not play {}: {}", cue.name(), e);
        }
    }

    fn stop(&mut self) {
        if let Err(e) = self.audio.stop() {
            warn!("could not stop music: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Frame;
    use crate::session::{SessionConfig, Side};
    use crate::snake::Heading;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct FakeScreen {
        script: VecDeque<Vec<Command>>,
        frames: Vec<Frame>,
        texts: Vec<(String, StyleHint)>,
        clears: usize,
    }

    impl Renderer for FakeScreen {
        fn draw_actors(&mut self, frame: &Frame) -> io::Result<()> {
            self.frames.push(frame.clone());
            Ok(())
        }

        fn clear_all(&mut self) -> io::Result<()> {
            self.clears += 1;
            Ok(())
        }

        fn show_text(&mut self, message: &str, style: StyleHint) -> io::Result<()> {
            self.texts.push((message.to_string(), style));
            Ok(())
        }
    }

    impl InputSource for FakeScreen {
        fn poll_commands(&mut self) -> io::Result<Vec<Command>> {
            Ok(self.script.pop_front().unwrap_or_default())
        }
    }

    /// Fails every request, like a machine without a sound device.
    #[derive(Default)]
    struct BrokenAudio {
        attempts: Vec<String>,
    }

    impl AudioAdapter for BrokenAudio {
        fn play_loop(&mut self, track: Track) -> io::Result<()> {
            self.attempts.push(format!("loop {}", track.name()));
            Err(io::Error::new(io::ErrorKind::NotFound, "no device"))
        }

        fn stop(&mut self) -> io::Result<()> {
            self.attempts.push("stop".to_string());
            Err(io::Error::new(io::ErrorKind::NotFound, "no device"))
        }

        fn play_once(&mut self, cue: Cue) -> io::Result<()> {
            self.attempts.push(format!("once {}", cue.name()));
            Err(io::Error::new(io::ErrorKind::NotFound, "no device"))
        }
    }

    fn fast_session() -> Session<ChaCha8Rng> {
        let config = SessionConfig {
            tick_interval: Duration::from_millis(1),
            speed_step: Duration::ZERO,
            min_interval: Duration::from_millis(1),
        };
        Session::new(config, ChaCha8Rng::seed_from_u64(11))
    }

    fn game(script: Vec<Vec<Command>>) -> SnakeGame<FakeScreen, BrokenAudio> {
        let screen = FakeScreen { script: script.into(), ..FakeScreen::default() };
        SnakeGame::new(screen, BrokenAudio::default(), Timings::none())
    }

    #[test]
    fn quit_leaves_immediately() {
        let mut session = fast_session();
        let mut game = game(vec![vec![Command::Quit]]);

        assert_eq!(game.play(&mut session).unwrap(), Exit::Quit);
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn round_plays_out_to_a_draw() {
        let mut session = fast_session();
        let mut game = game(vec![vec![
            Command::Steer(Side::One, Heading::Left),
            Command::Steer(Side::Two, Heading::Right),
        ]]);

        let exit = game.play(&mut session).unwrap();

        assert_eq!(exit, Exit::Finished(Outcome::Draw));
        assert_eq!(session.state(), SessionState::Terminated(Outcome::Draw));

        let screen = &game.screen;
        let texts: Vec<&str> = screen.texts.iter().map(|(text, _)| text.as_str()).collect();
        assert_eq!(texts, vec!["GAME OVER", "IT'S A DRAW!"]);
        assert_eq!(screen.texts[1].1, StyleHint::Announcement);
        assert!(screen.frames.iter().all(|frame| frame.food == session.food()));
        assert!(!screen.frames.last().unwrap().actors[0].alive);

        // Audio kept failing and the round still finished
        let attempts = &game.audio.attempts;
        assert_eq!(attempts.first().map(String::as_str), Some("loop melody_bgm"));
        assert_eq!(attempts.iter().filter(|a| *a == "once lose_or_failure").count(), 2);
        assert_eq!(
            &attempts[attempts.len() - 3..],
            &["stop".to_string(), "once game_over".to_string(), "once winner".to_string()]
        );
    }

    /// Draws the opening frame, then loses the display.
    struct LostDisplay {
        draws: usize,
    }

    impl Renderer for LostDisplay {
        fn draw_actors(&mut self, _frame: &Frame) -> io::Result<()> {
            self.draws += 1;
            if self.draws > 1 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "display gone"));
            }
            Ok(())
        }

        fn clear_all(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn show_text(&mut self, _message: &str, _style: StyleHint) -> io::Result<()> {
            Ok(())
        }
    }

    impl InputSource for LostDisplay {
        fn poll_commands(&mut self) -> io::Result<Vec<Command>> {
            Ok(vec![])
        }
    }

    #[test]
    fn failed_draw_ends_the_round_with_an_error() {
        let mut session = fast_session();
        let mut game = SnakeGame::new(LostDisplay { draws: 0 }, BrokenAudio::default(), Timings::none());

        let err = game.play(&mut session).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(game.screen.draws, 2);
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn steering_is_ignored_while_paused() {
        let mut session = fast_session();
        let mut game = game(vec![
            vec![Command::TogglePause],
            vec![Command::Steer(Side::One, Heading::Up)],
            vec![],
            vec![Command::TogglePause],
            vec![Command::Quit],
        ]);

        assert_eq!(game.play(&mut session).unwrap(), Exit::Quit);
        assert_eq!(session.snake(Side::One).heading(), Heading::Stopped);
        assert!(game.screen.texts[0].0.starts_with("Paused"));
        assert_eq!(game.screen.texts[0].1, StyleHint::Notice);
    }
}
