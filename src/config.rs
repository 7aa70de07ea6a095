use thiserror::Error;

/// Width of the play area in cells
pub const GRID_WIDTH: i32 = 20;
/// Height of the play area in cells
pub const GRID_HEIGHT: i32 = 10;
/// Milliseconds between ticks at the start of a game
pub const INITIAL_DELAY_MS: u64 = 200;
/// The tick delay never drops below this
pub const MIN_DELAY_MS: u64 = 50;
/// How much each eaten food shortens the tick delay
pub const SPEED_STEP_MS: u64 = 5;
/// Wait between ticks while paused
pub const PAUSE_DELAY_MS: u64 = 100;
/// Points per food
pub const SCORE_REWARD: u32 = 10;
/// Segments of a freshly spawned snake
pub const INITIAL_SNAKE_LENGTH: usize = 3;

pub const HIGH_SCORE_FILE: &str = "highscore.txt";

/// Tunables of a game session. `Default` gives the classic 20x10 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub initial_delay: u64,
    pub min_delay: u64,
    pub speed_step: u64,
    pub score_reward: u32,
    pub pause_delay: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("a {width}x{height} grid cannot fit the starting snake")]
    GridTooSmall { width: i32, height: i32 },
    #[error("minimum delay {min}ms is above the initial delay {initial}ms")]
    DelayRange { initial: u64, min: u64 },
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            initial_delay: INITIAL_DELAY_MS,
            min_delay: MIN_DELAY_MS,
            speed_step: SPEED_STEP_MS,
            score_reward: SCORE_REWARD,
            pause_delay: PAUSE_DELAY_MS,
        }
    }
}

impl GameConfig {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height, ..Default::default() }
    }

    /// The snake starts at the centre with its body trailing left, so the
    /// left half of the board has to hold everything behind the head.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let behind_head = INITIAL_SNAKE_LENGTH as i32 - 1;
        if self.height < 1 || self.width / 2 < behind_head {
            return Err(ConfigError::GridTooSmall { width: self.width, height: self.height });
        }

        if self.min_delay > self.initial_delay {
            return Err(ConfigError::DelayRange { initial: self.initial_delay, min: self.min_delay });
        }

        Ok(())
    }

    pub fn contains(&self, (x, y): crate::Coords) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }
}
