use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};

use crate::geometry::{Bounds, Position, FIELD};
use crate::input::{command_for, Command, InputSource};
use crate::render::{ActorView, Frame, Renderer, StyleHint};
use crate::snake::Heading;

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

/// Smallest terminal the field can be drawn in.
pub const MIN_SIZE: Coords = (20, 8);

const BODY_CHARS: [char; 2] = ['█', '▓'];
const FOOD_CHAR: char = 'O';
const BANNER_PAD: TermInt = 2;

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<char>,
    current_msg: Option<Message>,
}

struct Message {
    top_left: Coords,
    width: TermInt,
    height: TermInt,
}

impl TermManager {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let screen = vec![' '; width as usize * height as usize];
        Ok(TermManager { width, height, stdout: stdout(), screen, current_msg: None })
    }

    pub fn size(&self) -> Coords {
        (self.width, self.height)
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide, cursor::DisableBlinking)?;
        terminal::enable_raw_mode()
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_borders(&mut self) -> io::Result<()> {
        let (end_x, end_y) = (self.width - 1, self.height - 1);

        for x in 0..self.width {
            let ch = if x == 0 || x == end_x { '+' } else { '-' };
            self.print_at((x, 1), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in 2..end_y {
            self.print_at((0, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        Ok(())
    }

    fn draw_scoreboard(&mut self, left: &str, right: &str) -> io::Result<()> {
        let width = self.width as usize;
        let gap = width.saturating_sub(left.chars().count() + right.chars().count() + 2).max(1);
        let line = format!(" {}{}{} ", left, " ".repeat(gap), right);

        for (x, ch) in line.chars().take(width).enumerate() {
            self.print_at((x as TermInt, 0), ch)?;
        }

        Ok(())
    }

    fn show_message(&mut self, lines: &[&str], pad: TermInt) -> io::Result<()> {
        if self.has_message() {
            self.hide_message()?;
        }

        let longest = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0) as TermInt;
        let msg_height = (lines.len() as TermInt + 2).min(self.height);
        let msg_width = (longest + 2 * pad).min(self.width);
        let center = (self.width / 2, self.height / 2);
        let top_left = (center.0 - msg_width / 2, center.1 - msg_height / 2);

        for y in [top_left.1, top_left.1 + msg_height - 1] {
            for x_diff in 0..msg_width {
                self.print_at_no_save((top_left.0 + x_diff, y), ' ')?;
            }
        }

        for (i, line) in lines.iter().enumerate().take(msg_height as usize - 2) {
            let padded_line = format!("{:^width$}", line, width = msg_width as usize);
            let y = top_left.1 + i as TermInt + 1;
            for (x_diff, ch) in padded_line.chars().take(msg_width as usize).enumerate() {
                self.print_at_no_save((top_left.0 + x_diff as TermInt, y), ch)?;
            }
        }

        self.current_msg = Some(Message { top_left, width: msg_width, height: msg_height });
        self.flush()
    }

    fn hide_message(&mut self) -> io::Result<()> {
        let msg = match self.current_msg.take() {
            Some(msg) => msg,
            None => return Ok(()),
        };

        // Put back what the message covered
        for y_diff in 0..msg.height {
            for x_diff in 0..msg.width {
                let (x, y) = (msg.top_left.0 + x_diff, msg.top_left.1 + y_diff);
                let ch = self.screen[self.width as usize * y as usize + x as usize];
                self.print_at_no_save((x, y), ch)?;
            }
        }

        Ok(())
    }

    fn has_message(&self) -> bool {
        self.current_msg.is_some()
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> io::Result<()> {
        self.screen[self.width as usize * pos.1 as usize + pos.0 as usize] = ch;
        self.print_at_no_save(pos, ch)
    }

    fn print_if_changed(&mut self, pos: Coords, ch: char) -> io::Result<()> {
        if self.screen[self.width as usize * pos.1 as usize + pos.0 as usize] == ch {
            return Ok(());
        }
        self.print_at(pos, ch)
    }

    // Messages go straight to the terminal so the buffer keeps what is underneath
    fn print_at_no_save(&mut self, pos: Coords, ch: char) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

impl Renderer for TermManager {
    fn draw_actors(&mut self, frame: &Frame) -> io::Result<()> {
        self.hide_message()?;

        let grid = Grid::new(FIELD, self.width, self.height);
        let mut cells = vec![' '; grid.cols as usize * grid.rows as usize];

        if let Some((x, y)) = grid.cell(frame.food) {
            cells[grid.index(x, y)] = FOOD_CHAR;
        }
        for (actor, body_char) in frame.actors.iter().zip(BODY_CHARS) {
            paint_actor(&grid, &mut cells, actor, body_char);
        }

        for y in 0..grid.rows {
            for x in 0..grid.cols {
                let ch = cells[grid.index(x, y)];
                self.print_if_changed((grid.left + x, grid.top + y), ch)?;
            }
        }

        self.draw_scoreboard(&frame.actors[0].label, &frame.actors[1].label)?;
        self.flush()
    }

    fn clear_all(&mut self) -> io::Result<()> {
        self.current_msg = None;
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = vec![' '; self.width as usize * self.height as usize];
        self.draw_borders()?;
        self.flush()
    }

    fn show_text(&mut self, message: &str, style: StyleHint) -> io::Result<()> {
        let lines: Vec<&str> = message.lines().collect();
        let pad = match style {
            StyleHint::Notice => 1,
            StyleHint::Banner | StyleHint::Announcement => BANNER_PAD,
        };
        self.show_message(&lines, pad)
    }
}

impl InputSource for TermManager {
    fn poll_commands(&mut self) -> io::Result<Vec<Command>> {
        let mut commands = vec![];

        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                commands.extend(command_for(&ev));
            }
        }

        Ok(commands)
    }
}

fn paint_actor(grid: &Grid, cells: &mut [char], actor: &ActorView, body_char: char) {
    if !actor.alive {
        return;
    }

    // Tail first so the head ends up on top
    for pos in actor.segments.iter().skip(1).rev() {
        if let Some((x, y)) = grid.cell(*pos) {
            cells[grid.index(x, y)] = body_char;
        }
    }
    if let Some((x, y)) = actor.segments.first().and_then(|head| grid.cell(*head)) {
        cells[grid.index(x, y)] = head_char(actor.heading);
    }
}

fn head_char(heading: Heading) -> char {
    match heading {
        Heading::Up => '^',
        Heading::Down => 'v',
        Heading::Left => '<',
        Heading::Right => '>',
        Heading::Stopped => '@',
    }
}

/// Maps field coordinates onto the terminal cells inside the border. Row 0
/// holds the scoreboard, row 1 the top border.
struct Grid {
    field: Bounds,
    left: TermInt,
    top: TermInt,
    cols: TermInt,
    rows: TermInt,
}

impl Grid {
    fn new(field: Bounds, width: TermInt, height: TermInt) -> Self {
        Grid { field, left: 1, top: 2, cols: width.saturating_sub(2).max(1), rows: height.saturating_sub(3).max(1) }
    }

    fn cell(&self, pos: Position) -> Option<Coords> {
        if !self.field.contains(pos) {
            return None;
        }

        let fx = (pos.x - self.field.min_x) / self.field.width();
        let fy = (self.field.max_y - pos.y) / self.field.height();
        let x = (fx * (self.cols - 1) as f64).round() as TermInt;
        let y = (fy * (self.rows - 1) as f64).round() as TermInt;
        Some((x, y))
    }

    fn index(&self, x: TermInt, y: TermInt) -> usize {
        self.cols as usize * y as usize + x as usize
    }
}
