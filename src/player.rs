pub const POINTS_PER_FOOD: u32 = 10;

#[derive(Clone, Debug)]
pub struct Player {
    name: String,
    score: u32,
}

impl Player {
    pub fn new(name: &str) -> Self {
        Player { name: name.to_string(), score: 0 }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn award_food(&mut self) {
        self.score += POINTS_PER_FOOD;
    }

    /// Scoreboard line, e.g. `PLAYER 1: 30`.
    pub fn label(&self) -> String {
        format!("{}: {}", self.name, self.score)
    }
}
