use rand::Rng;

use crate::geometry::{Bounds, Position, FOOD_AREA};

pub const FIRST_FOOD: Position = Position { x: 0.0, y: 150.0 };

/// The single food item on the field.
#[derive(Clone, Debug)]
pub struct Food {
    position: Position,
    area: Bounds,
}

impl Food {
    pub fn new() -> Self {
        Food { position: FIRST_FOOD, area: FOOD_AREA }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Moves the food to a random whole-unit spot in its area, never the
    /// spot it just left.
    pub fn generate<R: Rng>(&mut self, rng: &mut R) -> Position {
        loop {
            let x = rng.gen_range(self.area.min_x as i32..=self.area.max_x as i32);
            let y = rng.gen_range(self.area.min_y as i32..=self.area.max_y as i32);
            let next = Position::new(x as f64, y as f64);

            if next != self.position {
                self.position = next;
                return next;
            }
        }
    }
}
