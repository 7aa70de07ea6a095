use std::io;

use log::{debug, info};
use rand::{rngs::ThreadRng, Rng};

use crate::clock::Clock;
use crate::config::{ConfigError, GameConfig};
use crate::game::{GameSummary, Outcome, SnakeGame};
use crate::highscore::HighScoreStore;
use crate::input::InputSource;
use crate::render::{Frame, Renderer};

/// Runs a game against its collaborators: every tick polls one input,
/// updates the game if it is running, redraws, then waits.
pub struct GameEngine<I, D, C, S, R = ThreadRng> {
    game: SnakeGame<R>,
    input: I,
    renderer: D,
    clock: C,
    store: S,
}

impl<I, D, C, S> GameEngine<I, D, C, S, ThreadRng>
where
    I: InputSource,
    D: Renderer,
    C: Clock,
    S: HighScoreStore,
{
    pub fn new(config: GameConfig, input: I, renderer: D, clock: C, store: S) -> Result<Self, ConfigError> {
        GameEngine::with_rng(config, rand::thread_rng(), input, renderer, clock, store)
    }
}

impl<I, D, C, S, R> GameEngine<I, D, C, S, R>
where
    I: InputSource,
    D: Renderer,
    C: Clock,
    S: HighScoreStore,
    R: Rng,
{
    /// New game with the high score taken from `store`.
    pub fn with_rng(config: GameConfig, rng: R, input: I, renderer: D, clock: C, store: S) -> Result<Self, ConfigError> {
        let game = SnakeGame::new_with_rng(config, store.load(), rng)?;
        Ok(GameEngine::from_game(game, input, renderer, clock, store))
    }

    /// Drive an already built game.
    pub fn from_game(game: SnakeGame<R>, input: I, renderer: D, clock: C, store: S) -> Self {
        GameEngine { game, input, renderer, clock, store }
    }

    /// Play until the game is over, then settle the high score and show the
    /// summary. Only terminal I/O errors end the loop early.
    pub fn run(&mut self) -> io::Result<GameSummary> {
        info!(
            "Starting a {}x{} game, high score {}",
            self.game.config().width,
            self.game.config().height,
            self.game.high_score()
        );

        while !self.game.is_over() {
            self.tick()?;
        }

        let summary = self.finish();
        self.renderer.show_summary(&summary)?;
        Ok(summary)
    }

    /// One pass of input, update, render and wait. Nothing happens once the
    /// game is over.
    pub fn tick(&mut self) -> io::Result<()> {
        if self.game.is_over() {
            return Ok(());
        }

        if let Some(command) = self.input.poll_command()? {
            debug!("Command {:?}", command);
            self.game.handle(command);
        }

        self.game.step();
        self.renderer.draw(&Frame::capture(&self.game))?;

        if !self.game.is_over() {
            self.clock.sleep(self.game.wait());
        }

        Ok(())
    }

    fn finish(&mut self) -> GameSummary {
        let new_high_score = self.game.settle_high_score();
        let persisted = !new_high_score || self.store.save(self.game.high_score()).is_ok();

        if new_high_score {
            info!("New high score {}", self.game.high_score());
        }

        GameSummary {
            outcome: self.game.outcome().unwrap_or(Outcome::Quit),
            score: self.game.score(),
            high_score: self.game.high_score(),
            new_high_score,
            persisted,
        }
    }

    pub fn game(&self) -> &SnakeGame<R> {
        &self.game
    }

    pub fn renderer(&self) -> &D {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut D {
        &mut self.renderer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
