/// Distance below which two points are considered touching.
pub const COLLISION_RADIUS: f64 = 10.0;

/// One grid unit: the distance a head travels per tick.
pub const STEP: f64 = 10.0;

/// Where eliminated actors are parked, far outside the visible field.
pub const OFF_FIELD: Position = Position { x: 1000.0, y: 1000.0 };

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    pub fn distance(&self, other: Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Strictly closer than the collision radius.
    pub fn touches(&self, other: Position) -> bool {
        self.distance(other) < COLLISION_RADIUS
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned rectangle, bounds inclusive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.min_x && pos.x <= self.max_x && pos.y >= self.min_y && pos.y <= self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// The play field. The top edge sits lower than the bottom one is deep to
/// leave room for the scoreboard.
pub const FIELD: Bounds = Bounds { min_x: -435.0, max_x: 435.0, min_y: -300.0, max_y: 275.0 };

/// Where food may appear. Stays clear of the top edge of the field.
pub const FOOD_AREA: Bounds = Bounds { min_x: -435.0, max_x: 435.0, min_y: -300.0, max_y: 265.0 };

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_is_strict() {
        let a = Position::new(0.0, 0.0);
        assert!(!a.touches(Position::new(10.0, 0.0)));
        assert!(!a.touches(Position::new(6.0, 8.0)));
        assert!(a.touches(Position::new(0.0, 9.9)));
        assert!(a.touches(a));
    }

    #[test]
    fn field_edges_are_inside() {
        assert!(FIELD.contains(Position::new(-435.0, 0.0)));
        assert!(FIELD.contains(Position::new(435.0, 275.0)));
        assert!(FIELD.contains(Position::new(0.0, -300.0)));
        assert!(!FIELD.contains(Position::new(-445.0, 0.0)));
        assert!(!FIELD.contains(Position::new(0.0, 285.0)));
        assert!(!FIELD.contains(OFF_FIELD));
    }

    #[test]
    fn food_area_fits_in_field() {
        assert!(FIELD.contains(Position::new(FOOD_AREA.min_x, FOOD_AREA.min_y)));
        assert!(FIELD.contains(Position::new(FOOD_AREA.max_x, FOOD_AREA.max_y)));
        assert_eq!(FIELD.width(), 870.0);
        assert_eq!(FIELD.height(), 575.0);
    }
}
