//! The round itself: two snakes, two players, one food item and the rules
//! that tie them together, advanced one tick at a time.

use std::time::Duration;

use log::{debug, info};
use rand::Rng;

use crate::food::Food;
use crate::geometry::{Position, FIELD};
use crate::player::Player;
use crate::render::{ActorView, Frame};
use crate::snake::{Heading, Snake};

pub const START_ONE: Position = Position { x: -200.0, y: 0.0 };
pub const START_TWO: Position = Position { x: 200.0, y: 0.0 };

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    pub fn other(self) -> Side {
        match self {
            Side::One => Side::Two,
            Side::Two => Side::One,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::One => 0,
            Side::Two => 1,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cause {
    Boundary,
    SelfCollision,
    Opponent,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Winner(Side),
    Draw,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Running,
    /// A terminal condition was met; waiting for the presentation to finish.
    Ending(Outcome),
    Terminated(Outcome),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    FoodEaten(Side),
    Eliminated(Side, Cause),
    RoundOver(Outcome),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub tick_interval: Duration,
    pub speed_step: Duration,
    pub min_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            tick_interval: Duration::from_millis(100),
            speed_step: Duration::from_millis(5),
            min_interval: Duration::from_millis(30),
        }
    }
}

pub struct Session<R> {
    snakes: [Snake; 2],
    players: [Player; 2],
    food: Food,
    tick_interval: Duration,
    config: SessionConfig,
    state: SessionState,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(config: SessionConfig, rng: R) -> Self {
        Session {
            snakes: [Snake::new(START_ONE), Snake::new(START_TWO)],
            players: [Player::new("PLAYER 1"), Player::new("PLAYER 2")],
            food: Food::new(),
            tick_interval: config.tick_interval,
            config,
            state: SessionState::Running,
            rng,
        }
    }

    pub fn snake(&self, side: Side) -> &Snake {
        &self.snakes[side.index()]
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    pub fn food(&self) -> Position {
        self.food.position()
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Applied immediately; the last request before a tick wins. Reversals
    /// and requests for eliminated snakes are ignored.
    pub fn set_heading(&mut self, side: Side, heading: Heading) -> bool {
        if self.state != SessionState::Running {
            return false;
        }

        let snake = &mut self.snakes[side.index()];
        if !snake.is_alive() {
            return false;
        }

        let applied = snake.set_heading(heading);
        debug!("{:?} heading {:?} (applied: {})", side, heading, applied);
        applied
    }

    /// One simulation step. Both snakes move first, then every collision is
    /// judged against the same post-move positions so that a head-on crash
    /// takes out both snakes.
    pub fn tick(&mut self) -> Vec<Event> {
        let mut events = vec![];
        if self.state != SessionState::Running {
            return events;
        }

        for snake in self.snakes.iter_mut().filter(|s| s.is_alive()) {
            snake.advance();
        }

        let crashes: Vec<(Side, Cause)> = Side::BOTH
            .iter()
            .filter_map(|&side| self.collision(side).map(|cause| (side, cause)))
            .collect();

        for (side, cause) in crashes {
            self.snakes[side.index()].eliminate();
            info!("{} eliminated: {:?}", self.player(side).name(), cause);
            events.push(Event::Eliminated(side, cause));
        }

        for side in Side::BOTH {
            let snake = self.snake(side);
            if snake.is_alive() && snake.head().touches(self.food.position()) {
                self.eat(side);
                events.push(Event::FoodEaten(side));
            }
        }

        if let Some(outcome) = self.terminal_outcome() {
            info!("round over: {:?}", outcome);
            self.state = SessionState::Ending(outcome);
            events.push(Event::RoundOver(outcome));
        }

        events
    }

    /// Moves an ending round to Terminated. Yields the outcome exactly once.
    pub fn finish(&mut self) -> Option<Outcome> {
        match self.state {
            SessionState::Ending(outcome) => {
                self.state = SessionState::Terminated(outcome);
                Some(outcome)
            }
            _ => None,
        }
    }

    pub fn frame(&self) -> Frame {
        let view = |side: Side| {
            let snake = self.snake(side);
            ActorView {
                segments: snake.segments().collect(),
                heading: snake.heading(),
                alive: snake.is_alive(),
                label: self.player(side).label(),
            }
        };

        Frame { actors: [view(Side::One), view(Side::Two)], food: self.food.position() }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn collision(&self, side: Side) -> Option<Cause> {
        let snake = self.snake(side);
        if !snake.is_alive() {
            return None;
        }

        let head = snake.head();
        let opponent = self.snake(side.other());

        if !FIELD.contains(head) {
            Some(Cause::Boundary)
        } else if snake.body().iter().any(|part| head.touches(*part)) {
            Some(Cause::SelfCollision)
        } else if opponent.is_alive() && opponent.segments().any(|part| head.touches(part)) {
            Some(Cause::Opponent)
        } else {
            None
        }
    }

    fn eat(&mut self, side: Side) {
        let food = self.food.generate(&mut self.rng);
        self.snakes[side.index()].grow();
        self.players[side.index()].award_food();

        self.tick_interval = self
            .tick_interval
            .saturating_sub(self.config.speed_step)
            .max(self.config.min_interval);

        info!("{} ate, food now at ({}, {})", self.player(side).label(), food.x, food.y);
        debug!("tick interval {:?}", self.tick_interval);
    }

    // A snake that is eliminated while ahead or level does not end the round.
    fn terminal_outcome(&self) -> Option<Outcome> {
        let (alive1, alive2) = (self.snakes[0].is_alive(), self.snakes[1].is_alive());
        let (score1, score2) = (self.players[0].score(), self.players[1].score());

        let over = (!alive1 && !alive2) || (!alive1 && score1 < score2) || (!alive2 && score2 < score1);
        if !over {
            return None;
        }

        Some(if score1 > score2 {
            Outcome::Winner(Side::One)
        } else if score2 > score1 {
            Outcome::Winner(Side::Two)
        } else {
            Outcome::Draw
        })
    }
}
