//! Terminal snake.
//!
//! The game logic (`snake`, `food`, `game`) has no I/O. `engine` drives it
//! through four collaborator traits, and `term`, `clock` and `highscore`
//! provide the real implementations used by the binary.

pub mod clock;
pub mod config;
pub mod engine;
pub mod food;
pub mod game;
pub mod highscore;
pub mod input;
pub mod render;
pub mod snake;
pub mod term;

/// A cell on the grid. Signed so a head that left the grid is still representable.
pub type Coords = (i32, i32);

pub use config::{ConfigError, GameConfig};
pub use engine::GameEngine;
pub use game::{Collision, GameSummary, Outcome, SnakeGame, Status};
pub use snake::{Direction, Snake};
