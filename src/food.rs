use rand::{seq::SliceRandom, Rng};

use crate::{config::GameConfig, snake::Snake, Coords};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Food {
    pos: Option<Coords>,
}

impl Food {
    /// Not placed yet
    pub fn new() -> Self {
        Food { pos: None }
    }

    pub fn at(pos: Coords) -> Self {
        Food { pos: Some(pos) }
    }

    pub fn position(&self) -> Option<Coords> {
        self.pos
    }

    /// Move the food to a random cell the snake does not cover.
    ///
    /// Random probing gives up after one attempt per cell and falls back to
    /// picking among the free cells, so a nearly full board still resolves
    /// quickly. Returns `None`, leaving the food where it was, when the snake
    /// covers the whole board.
    pub fn spawn<R: Rng>(&mut self, snake: &Snake, config: &GameConfig, rng: &mut R) -> Option<Coords> {
        if config.cell_count() == 0 {
            return None;
        }

        for _ in 0..config.cell_count() {
            let pos = (rng.gen_range(0..config.width), rng.gen_range(0..config.height));
            if !snake.occupies(pos) {
                self.pos = Some(pos);
                return self.pos;
            }
        }

        let choices: Vec<Coords> = (0..config.height)
            .flat_map(|y| (0..config.width).map(move |x| (x, y)))
            .filter(|pos| !snake.occupies(*pos))
            .collect();

        let res = choices.choose(rng).copied();
        if res.is_some() {
            self.pos = res;
        }
        res
    }
}
