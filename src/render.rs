use std::io;

use rand::Rng;

use crate::game::{GameSummary, SnakeGame};
use crate::Coords;

pub const WALL_CHAR: char = '*';
pub const SNAKE_BODY_CHAR: char = 'o';
pub const FOOD_CHAR: char = 'F';
pub const EMPTY_CHAR: char = ' ';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
    /// Carries the direction glyph
    Head(char),
    Body,
    Food,
}

impl Cell {
    pub fn glyph(&self) -> char {
        match self {
            Cell::Empty => EMPTY_CHAR,
            Cell::Wall => WALL_CHAR,
            Cell::Head(ch) => *ch,
            Cell::Body => SNAKE_BODY_CHAR,
            Cell::Food => FOOD_CHAR,
        }
    }
}

/// A full screen's worth of game: the board including its wall border,
/// followed by status lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub rows: Vec<Vec<Cell>>,
    pub status: Vec<String>,
}

impl Frame {
    pub fn capture<R: Rng>(game: &SnakeGame<R>) -> Self {
        let config = game.config();
        let (width, height) = (config.width as usize + 2, config.height as usize + 2);

        let mut rows = vec![vec![Cell::Empty; width]; height];
        for (y, row) in rows.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    *cell = Cell::Wall;
                }
            }
        }

        // Board cell (x, y) lives at row y + 1, column x + 1
        let mut put = |pos: Coords, cell: Cell| {
            if config.contains(pos) {
                rows[pos.1 as usize + 1][pos.0 as usize + 1] = cell;
            }
        };

        if let Some(food) = game.food().position() {
            put(food, Cell::Food);
        }

        let snake = game.snake();
        for pos in snake.body().iter().skip(1) {
            put(*pos, Cell::Body);
        }
        put(snake.head(), Cell::Head(snake.head_char()));

        let mut status = vec![
            format!("Score: {}  High Score: {}", game.score(), game.high_score()),
            String::new(),
            "Press X to end the game".to_string(),
        ];
        if game.is_paused() {
            status.push(String::new());
            status.push("PAUSED - Press P to resume".to_string());
        }

        Frame { rows, status }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.iter().map(Cell::glyph).collect()).collect()
    }
}

/// Something that can show frames and the end-of-game summary.
pub trait Renderer {
    /// Redraw everything in place.
    fn draw(&mut self, frame: &Frame) -> io::Result<()>;

    fn show_summary(&mut self, summary: &GameSummary) -> io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::food::Food;
    use crate::input::Command;
    use crate::snake::{Direction, Snake};
    use rand::{rngs::StdRng, SeedableRng};

    fn game(snake: Snake, food: Coords) -> SnakeGame<StdRng> {
        SnakeGame::from_parts(GameConfig::default(), snake, Food::at(food), 40, StdRng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn test_frame_is_bordered() {
        let frame = Frame::capture(&game(Snake::new((10, 5), 3, Direction::Right), (0, 0)));
        assert_eq!(frame.width(), 22);
        assert_eq!(frame.height(), 12);

        let lines = frame.lines();
        assert_eq!(lines[0], "*".repeat(22));
        assert_eq!(lines[11], "*".repeat(22));
        for line in &lines[1..11] {
            assert!(line.starts_with('*') && line.ends_with('*'));
        }
    }

    #[test]
    fn test_snake_and_food_cells() {
        let frame = Frame::capture(&game(Snake::new((10, 5), 3, Direction::Right), (0, 0)));

        assert_eq!(frame.rows[6][11], Cell::Head('>'));
        assert_eq!(frame.rows[6][10], Cell::Body);
        assert_eq!(frame.rows[6][9], Cell::Body);
        assert_eq!(frame.rows[6][8], Cell::Empty);
        assert_eq!(frame.rows[1][1], Cell::Food);
        assert_eq!(frame.lines()[6], format!("*{}oo>{}*", " ".repeat(8), " ".repeat(9)));
    }

    #[test]
    fn test_status_lines() {
        let mut game = game(Snake::new((10, 5), 3, Direction::Right), (0, 0));
        let frame = Frame::capture(&game);
        assert_eq!(frame.status[0], "Score: 0  High Score: 40");
        assert!(!frame.status.iter().any(|line| line.contains("PAUSED")));

        game.handle(Command::TogglePause);
        let frame = Frame::capture(&game);
        assert_eq!(frame.status.last().unwrap(), "PAUSED - Press P to resume");
    }

    #[test]
    fn test_head_off_grid_is_not_drawn() {
        let mut game = game(Snake::new((19, 5), 3, Direction::Right), (0, 0));
        game.step();
        assert!(game.is_over());

        let frame = Frame::capture(&game);
        assert_eq!(frame.rows[6][21], Cell::Wall);
        assert_eq!(frame.rows[6][20], Cell::Body);
    }
}
