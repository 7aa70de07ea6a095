use std::{thread::sleep, time::Duration};

/// Paces the game loop.
pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

/// Blocks the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadClock;

impl Clock for ThreadClock {
    fn sleep(&mut self, duration: Duration) {
        sleep(duration);
    }
}
