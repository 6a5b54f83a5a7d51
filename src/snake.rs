use crate::geometry::{Position, OFF_FIELD, STEP};
use Heading::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
    Stopped,
}

impl Heading {
    pub fn opposite(self) -> Heading {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
            Stopped => Stopped,
        }
    }

    fn delta(self) -> (f64, f64) {
        match self {
            Up => (0.0, STEP),
            Down => (0.0, -STEP),
            Left => (-STEP, 0.0),
            Right => (STEP, 0.0),
            Stopped => (0.0, 0.0),
        }
    }
}

/// An actor. Body segments are ordered head to tail; each one sits where its
/// predecessor was on some earlier tick.
#[derive(Clone, Debug)]
pub struct Snake {
    head: Position,
    heading: Heading,
    body: Vec<Position>,
    alive: bool,
}

impl Snake {
    pub fn new(start: Position) -> Self {
        Snake { head: start, heading: Stopped, body: vec![], alive: true }
    }

    pub fn head(&self) -> Position {
        self.head
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Head first, then the body.
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    /// Moves the body up the chain, then the head one step. No-op when stopped.
    pub fn advance(&mut self) {
        if self.heading == Stopped {
            return;
        }

        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }
        if let Some(first) = self.body.first_mut() {
            *first = self.head;
        }

        let (dx, dy) = self.heading.delta();
        self.head = self.head.offset(dx, dy);
    }

    /// Appends a segment on top of the head; it separates on the next ticks.
    pub fn grow(&mut self) {
        self.body.push(self.head);
    }

    /// Returns whether the heading was applied. Reversals are ignored.
    pub fn set_heading(&mut self, requested: Heading) -> bool {
        if requested == Stopped || requested == self.heading.opposite() {
            return false;
        }
        self.heading = requested;
        true
    }

    pub fn eliminate(&mut self) {
        self.alive = false;
        self.head = OFF_FIELD;
        self.heading = Stopped;
        self.body.clear();
    }

    #[cfg(test)]
    pub fn place(&mut self, head: Position, heading: Heading, body: Vec<Position>) {
        self.head = head;
        self.heading = heading;
        self.body = body;
    }
}
