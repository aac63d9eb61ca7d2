//! The two periodic processes of a round, multiplexed on one task.
//!
//! Movement re-arms itself from the round's current tick interval after every
//! move; spawning runs on a fixed period. Both fire immediately when armed.
//! A round that is over is never advanced: callers stop polling
//! [`RoundTimers::next`] and arm fresh timers on restart.

use std::time::Duration;

use rand::Rng;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::game::{Round, RoundSummary, ScoreStore, StepResult, TileSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Due {
    Move,
    Spawn,
}

pub struct RoundTimers {
    next_move: Instant,
    spawn: Interval,
}

impl RoundTimers {
    /// Must be called inside a tokio runtime
    pub fn arm(apple_delay: Duration) -> Self {
        let mut spawn = time::interval(apple_delay);
        spawn.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            next_move: Instant::now(),
            spawn,
        }
    }

    pub fn schedule_move(&mut self, after: Duration) {
        self.next_move = Instant::now() + after;
    }

    /// Waits for whichever timer fires first. A move and a spawn due at the
    /// same instant resolve move first.
    pub async fn next(&mut self) -> Due {
        tokio::select! {
            biased;
            _ = time::sleep_until(self.next_move) => Due::Move,
            _ = self.spawn.tick() => Due::Spawn,
        }
    }

    /// Runs the handler for `due` against `round`, re-arming the move timer
    /// after a move.
    pub fn fire<S, T, R>(&mut self, round: &mut Round<S, T, R>, due: Due) -> Option<StepResult>
    where
        S: ScoreStore,
        T: TileSink,
        R: Rng,
    {
        match due {
            Due::Move => {
                let result = round.advance();
                self.schedule_move(round.tick_interval());
                Some(result)
            }
            Due::Spawn => {
                round.spawn_apple();
                None
            }
        }
    }
}

/// Drives a round with no input until it ends
pub async fn run_to_game_over<S, T, R>(round: &mut Round<S, T, R>) -> RoundSummary
where
    S: ScoreStore,
    T: TileSink,
    R: Rng,
{
    let mut timers = RoundTimers::arm(round.apple_interval());
    while round.is_running() {
        let due = timers.next().await;
        timers.fire(round, due);
    }

    round.summary()
}
