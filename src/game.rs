use std::time::Duration;

use log::{debug, info};
use rand::{rngs::ThreadRng, Rng};

use crate::config::{ConfigError, GameConfig, INITIAL_SNAKE_LENGTH};
use crate::food::Food;
use crate::input::Command;
use crate::snake::{Direction, Snake};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfCollision,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Crashed(Collision),
    Quit,
    /// The snake covers the board, there is nowhere left to put food
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Paused,
    Over(Outcome),
}

/// What a single `step` did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInfo {
    pub moved: bool,
    pub ate_food: bool,
    pub collision: Option<Collision>,
}

/// Final numbers of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub outcome: Outcome,
    pub score: u32,
    pub high_score: u32,
    pub new_high_score: bool,
    /// False when a new high score could not be written out
    pub persisted: bool,
}

/// State of one game session. Pure logic, no I/O: the engine feeds it
/// commands and calls `step` once per running tick.
pub struct SnakeGame<R = ThreadRng> {
    config: GameConfig,
    snake: Snake,
    food: Food,
    score: u32,
    high_score: u32,
    status: Status,
    tick_delay: u64,
    pending_turn: Option<Direction>,
    rng: R,
}

impl SnakeGame<ThreadRng> {
    pub fn new(config: GameConfig, high_score: u32) -> Result<Self, ConfigError> {
        SnakeGame::new_with_rng(config, high_score, rand::thread_rng())
    }
}

impl<R: Rng> SnakeGame<R> {
    /// Fresh game: snake centred and facing right, food placed randomly.
    pub fn new_with_rng(config: GameConfig, high_score: u32, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let center = (config.width / 2, config.height / 2);
        let snake = Snake::new(center, INITIAL_SNAKE_LENGTH, Direction::Right);
        let mut game = SnakeGame::assemble(config, snake, Food::new(), high_score, rng);

        if game.food.spawn(&game.snake, &game.config, &mut game.rng).is_none() {
            game.end(Outcome::Won);
        }

        Ok(game)
    }

    /// Game from an explicit snake and food, for scripted setups.
    pub fn from_parts(config: GameConfig, snake: Snake, food: Food, high_score: u32, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(SnakeGame::assemble(config, snake, food, high_score, rng))
    }

    fn assemble(config: GameConfig, snake: Snake, food: Food, high_score: u32, rng: R) -> Self {
        SnakeGame {
            config,
            snake,
            food,
            score: 0,
            high_score,
            status: Status::Running,
            tick_delay: config.initial_delay,
            pending_turn: None,
            rng,
        }
    }

    pub fn handle(&mut self, command: Command) {
        if self.is_over() {
            return;
        }

        match command {
            Command::Turn(dir) => self.pending_turn = Some(dir),
            Command::TogglePause => self.toggle_pause(),
            Command::Quit => self.end(Outcome::Quit),
        }
    }

    fn toggle_pause(&mut self) {
        self.status = match self.status {
            Status::Running => Status::Paused,
            Status::Paused => Status::Running,
            over => over,
        };
        debug!("Pause toggled, now {:?}", self.status);
    }

    /// Advance the snake one cell. Does nothing unless running.
    ///
    /// The snake moves first and collisions are judged on the moved body, so
    /// stepping into the cell the tail just left is fine unless the snake is
    /// growing this move.
    pub fn step(&mut self) -> StepInfo {
        let mut info = StepInfo::default();
        if self.status != Status::Running {
            return info;
        }

        if let Some(dir) = self.pending_turn.take() {
            self.snake.set_direction(dir);
        }

        let head = self.snake.move_step();
        info.moved = true;

        let collision = if !self.config.contains(head) {
            Some(Collision::Wall)
        } else if self.snake.bites_itself() {
            Some(Collision::SelfCollision)
        } else {
            None
        };

        if let Some(collision) = collision {
            info.collision = Some(collision);
            self.end(Outcome::Crashed(collision));
            return info;
        }

        if self.food.position() == Some(head) {
            info.ate_food = true;
            self.eat();
        }

        info
    }

    fn eat(&mut self) {
        self.snake.grow();
        let respawned = self.food.spawn(&self.snake, &self.config, &mut self.rng);

        self.score += self.config.score_reward;
        self.tick_delay = self.tick_delay.saturating_sub(self.config.speed_step).max(self.config.min_delay);
        debug!("Food eaten, score {} delay {}ms", self.score, self.tick_delay);

        if respawned.is_none() {
            self.end(Outcome::Won);
        }
    }

    fn end(&mut self, outcome: Outcome) {
        if !self.is_over() {
            info!("Game over ({:?}) with score {}", outcome, self.score);
            self.status = Status::Over(outcome);
        }
    }

    /// Raise the high score to the current score if it beats it. Returns
    /// whether it changed.
    pub fn settle_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }

    /// How long to wait before the next tick.
    pub fn wait(&self) -> Duration {
        match self.status {
            Status::Paused => Duration::from_millis(self.config.pause_delay),
            _ => Duration::from_millis(self.tick_delay),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            Status::Over(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, Status::Over(_))
    }

    pub fn is_paused(&self) -> bool {
        self.status == Status::Paused
    }

    pub fn tick_delay(&self) -> u64 {
        self.tick_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Coords;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn seeded(config: GameConfig) -> SnakeGame<StdRng> {
        SnakeGame::new_with_rng(config, 0, StdRng::seed_from_u64(42)).unwrap()
    }

    fn scripted(snake: Snake, food: Coords) -> SnakeGame<StdRng> {
        SnakeGame::from_parts(GameConfig::default(), snake, Food::at(food), 0, StdRng::seed_from_u64(7)).unwrap()
    }

    #[test]
    fn test_new_game() {
        let game = seeded(GameConfig::default());
        assert_eq!(game.status(), Status::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.tick_delay(), 200);
        assert_eq!(game.snake().body(), &[(10, 5), (9, 5), (8, 5)]);
        assert_eq!(game.snake().get_direction(), Direction::Right);

        let food = game.food().position().unwrap();
        assert!(!game.snake().occupies(food));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let res = SnakeGame::new_with_rng(GameConfig::new(2, 2), 0, StdRng::seed_from_u64(1));
        assert!(matches!(res, Err(ConfigError::GridTooSmall { .. })));
    }

    #[test]
    fn test_wall_collision() {
        let mut game = scripted(Snake::new((19, 5), 3, Direction::Right), (0, 0));
        let info = game.step();

        assert_eq!(info.collision, Some(Collision::Wall));
        assert_eq!(game.snake().head(), (20, 5));
        assert_eq!(game.status(), Status::Over(Outcome::Crashed(Collision::Wall)));
    }

    #[test]
    fn test_wall_collision_at_top() {
        let mut game = scripted(Snake::new((3, 0), 3, Direction::Right), (9, 9));
        game.handle(Command::Turn(Direction::Up));
        game.step();
        assert_eq!(game.outcome(), Some(Outcome::Crashed(Collision::Wall)));
    }

    #[test]
    fn test_self_collision() {
        let body = vec![(5, 5), (5, 6), (4, 6), (4, 5), (4, 4)];
        let mut game = scripted(Snake::from_body(body, Direction::Up).unwrap(), (0, 0));

        game.handle(Command::Turn(Direction::Left));
        let info = game.step();

        assert_eq!(info.collision, Some(Collision::SelfCollision));
        assert!(game.is_over());
    }

    #[test]
    fn test_chasing_tail_is_safe() {
        let body = vec![(5, 5), (5, 6), (4, 6), (4, 5)];
        let mut game = scripted(Snake::from_body(body, Direction::Up).unwrap(), (0, 0));

        game.handle(Command::Turn(Direction::Left));
        game.step();

        assert_eq!(game.status(), Status::Running);
        assert_eq!(game.snake().head(), (4, 5));
    }

    #[test]
    fn test_food_consumption() {
        let mut game = scripted(Snake::new((10, 5), 3, Direction::Right), (11, 5));
        let info = game.step();

        assert!(info.ate_food);
        assert_eq!(game.score(), 10);
        assert_eq!(game.tick_delay(), 195);
        assert_eq!(game.snake().len(), 3);
        assert!(game.snake().is_growing());

        let food = game.food().position().unwrap();
        assert!(!game.snake().occupies(food));

        game.step();
        assert_eq!(game.snake().len(), 4);
    }

    #[test]
    fn test_delay_floor() {
        let config = GameConfig { initial_delay: 52, min_delay: 50, ..Default::default() };
        let snake = Snake::new((2, 5), 3, Direction::Right);
        let mut game = SnakeGame::from_parts(config, snake, Food::at((3, 5)), 0, StdRng::seed_from_u64(5)).unwrap();

        game.step();
        assert_eq!(game.tick_delay(), 50);
    }

    #[test]
    fn test_delay_stays_at_floor() {
        let config = GameConfig { initial_delay: 50, ..Default::default() };
        let snake = Snake::new((2, 5), 3, Direction::Right);
        let mut game = SnakeGame::from_parts(config, snake, Food::at((3, 5)), 0, StdRng::seed_from_u64(5)).unwrap();

        game.step();
        assert_eq!(game.score(), 10);
        assert_eq!(game.tick_delay(), 50);
    }

    #[test]
    fn test_reversal_ignored_in_step() {
        let mut game = scripted(Snake::new((10, 5), 3, Direction::Right), (0, 0));
        game.handle(Command::Turn(Direction::Left));
        game.step();

        assert_eq!(game.snake().head(), (11, 5));
        assert_eq!(game.status(), Status::Running);
    }

    #[test]
    fn test_pause_skips_movement() {
        let mut game = scripted(Snake::new((10, 5), 3, Direction::Right), (0, 0));
        game.handle(Command::TogglePause);
        assert!(game.is_paused());
        assert_eq!(game.wait(), Duration::from_millis(100));

        let info = game.step();
        assert!(!info.moved);
        assert_eq!(game.snake().head(), (10, 5));

        game.handle(Command::TogglePause);
        assert_eq!(game.wait(), Duration::from_millis(200));
        game.step();
        assert_eq!(game.snake().head(), (11, 5));
    }

    #[test]
    fn test_turn_while_paused_applies_after_resume() {
        let mut game = scripted(Snake::new((10, 5), 3, Direction::Right), (0, 0));
        game.handle(Command::TogglePause);
        game.handle(Command::Turn(Direction::Down));
        game.step();
        game.handle(Command::TogglePause);
        game.step();

        assert_eq!(game.snake().head(), (10, 6));
    }

    #[test]
    fn test_quit_is_terminal() {
        let mut game = scripted(Snake::new((10, 5), 3, Direction::Right), (0, 0));
        game.handle(Command::TogglePause);
        game.handle(Command::Quit);
        assert_eq!(game.status(), Status::Over(Outcome::Quit));

        game.handle(Command::TogglePause);
        assert_eq!(game.status(), Status::Over(Outcome::Quit));
        assert!(!game.step().moved);
    }

    #[test]
    fn test_full_board_is_a_win() {
        let config = GameConfig::new(4, 1);
        let mut snake = Snake::new((2, 0), 3, Direction::Right);
        snake.grow();
        let mut game = SnakeGame::from_parts(config, snake, Food::at((3, 0)), 0, StdRng::seed_from_u64(11)).unwrap();

        let info = game.step();
        assert!(info.ate_food);
        assert_eq!(game.score(), 10);
        assert_eq!(game.status(), Status::Over(Outcome::Won));
    }

    #[test]
    fn test_high_score_settles_only_upwards() {
        let mut game = SnakeGame::from_parts(
            GameConfig::default(),
            Snake::new((10, 5), 3, Direction::Right),
            Food::at((11, 5)),
            30,
            StdRng::seed_from_u64(2),
        )
        .unwrap();

        game.step();
        assert!(!game.settle_high_score());
        assert_eq!(game.high_score(), 30);

        let mut game = scripted(Snake::new((10, 5), 3, Direction::Right), (11, 5));
        game.step();
        assert!(game.settle_high_score());
        assert_eq!(game.high_score(), 10);
    }

    #[test]
    fn test_invariants_hold_during_random_play() {
        let mut rng = StdRng::seed_from_u64(99);
        let dirs = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

        for seed in 0..20 {
            let mut game = SnakeGame::new_with_rng(GameConfig::default(), 0, StdRng::seed_from_u64(seed)).unwrap();
            let mut last_delay = game.tick_delay();

            for _ in 0..400 {
                if game.is_over() {
                    break;
                }
                game.handle(Command::Turn(dirs[rng.gen_range(0..4)]));
                let info = game.step();

                assert!(game.snake().len() >= 1);
                assert!(game.tick_delay() <= last_delay);
                assert!(game.tick_delay() >= game.config().min_delay);
                last_delay = game.tick_delay();

                if game.status() == Status::Running {
                    let unique: HashSet<_> = game.snake().body().iter().collect();
                    assert_eq!(unique.len(), game.snake().len());
                }
                if info.ate_food {
                    let food = game.food().position().unwrap();
                    assert!(!game.snake().occupies(food));
                }
            }
        }
    }
}
