use std::io;

use crate::geometry::Position;
use crate::snake::Heading;

/// What one snake looks like this tick.
#[derive(Clone, Debug, PartialEq)]
pub struct ActorView {
    /// Head first.
    pub segments: Vec<Position>,
    pub heading: Heading,
    pub alive: bool,
    pub label: String,
}

/// Everything a renderer needs to draw one tick. Player one comes first.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub actors: [ActorView; 2],
    pub food: Position,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StyleHint {
    /// Short status overlays, e.g. the pause box.
    Notice,
    /// "GAME OVER".
    Banner,
    /// The final result.
    Announcement,
}

pub trait Renderer {
    fn draw_actors(&mut self, frame: &Frame) -> io::Result<()>;

    fn clear_all(&mut self) -> io::Result<()>;

    fn show_text(&mut self, message: &str, style: StyleHint) -> io::Result<()>;
}
