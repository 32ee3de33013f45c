//! Absolute time control: a fixed budget per side, no byo-yomi.

use std::time::Duration;

use log::debug;

use super::clock::Timer;
use crate::board::Color;
use crate::events::ListenerRegistry;

/// Default tick period.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(1000);

/// Each side has `main_time` for the whole game. Every tick while running
/// takes one period from the side to move; reaching zero fires the timeout
/// listeners once and stops the clock.
#[derive(Debug)]
pub struct AbsoluteTimer {
    /// Remaining time, indexed by `Color::raw()` (black, white).
    remaining: [Duration; 2],
    period: Duration,
    running: bool,
    turn: Color,
    timed_out: Option<Color>,
    turn_listeners: ListenerRegistry<Color>,
    timeout_listeners: ListenerRegistry<Color>,
}

impl AbsoluteTimer {
    /// Create a paused timer giving each side `main_time`. Black moves first.
    pub fn new(main_time: Duration) -> Self {
        Self {
            remaining: [main_time; 2],
            period: DEFAULT_PERIOD,
            running: false,
            turn: Color::Black,
            timed_out: None,
            turn_listeners: ListenerRegistry::new(),
            timeout_listeners: ListenerRegistry::new(),
        }
    }

    /// Set the tick period.
    #[must_use]
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Set the side to move first (e.g. white after handicap stones).
    #[must_use]
    pub fn with_first_turn(mut self, color: Color) -> Self {
        self.set_turn_silently(color);
        self
    }

    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time remaining for `color`.
    #[must_use]
    pub fn remaining(&self, color: Color) -> Duration {
        self.remaining[slot(color)]
    }

    /// Listeners called with the new side to move.
    pub fn turn_listeners(&mut self) -> &mut ListenerRegistry<Color> {
        &mut self.turn_listeners
    }

    /// Listeners called with the side that ran out of time.
    pub fn timeout_listeners(&mut self) -> &mut ListenerRegistry<Color> {
        &mut self.timeout_listeners
    }
}

fn slot(color: Color) -> usize {
    match color {
        Color::White => 1,
        _ => 0,
    }
}

impl Timer for AbsoluteTimer {
    fn start(&mut self) {
        if self.timed_out.is_none() {
            self.running = true;
        }
    }

    fn pause(&mut self) {
        self.running = false;
    }

    fn tick(&mut self) {
        if !self.running {
            return;
        }
        let turn = self.turn;
        let left = &mut self.remaining[slot(turn)];
        *left = left.saturating_sub(self.period);
        if left.is_zero() {
            debug!("{} ran out of time", turn);
            self.running = false;
            self.timed_out = Some(turn);
            self.timeout_listeners.dispatch(&turn);
        }
    }

    fn time_left(&self) -> Duration {
        self.remaining(self.turn)
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn timed_out(&self) -> Option<Color> {
        self.timed_out
    }

    fn on_turn_change(&mut self, color: Color) {
        self.turn_listeners.dispatch(&color);
    }

    fn turn(&self) -> Color {
        self.turn
    }

    fn set_turn_silently(&mut self, color: Color) {
        debug_assert!(color.is_stone(), "turn must be a stone color");
        if color.is_stone() {
            self.turn = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_ticks_only_while_running() {
        let mut timer = AbsoluteTimer::new(secs(10));
        timer.tick();
        assert_eq!(timer.time_left(), secs(10));

        timer.start();
        timer.tick();
        timer.tick();
        assert_eq!(timer.time_left(), secs(8));

        timer.pause();
        timer.tick();
        assert_eq!(timer.time_left(), secs(8));
    }

    #[test]
    fn test_ticks_charge_side_to_move() {
        let mut timer = AbsoluteTimer::new(secs(10)).with_period(Duration::from_millis(500));
        timer.start();
        timer.tick();
        timer.next();
        timer.tick();
        timer.tick();

        assert_eq!(timer.turn(), Color::White);
        assert_eq!(timer.remaining(Color::Black), Duration::from_millis(9500));
        assert_eq!(timer.remaining(Color::White), secs(9));
    }

    #[test]
    fn test_turn_listeners_fire_on_change_only() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut timer = AbsoluteTimer::new(secs(10));
        let sink = Arc::clone(&seen);
        timer
            .turn_listeners()
            .register(move |c: &Color| sink.lock().unwrap().push(*c));

        timer.set_turn(Color::Black);
        timer.next();
        timer.next();
        timer.set_turn_silently(Color::White);

        assert_eq!(*seen.lock().unwrap(), vec![Color::White, Color::Black]);
        assert_eq!(timer.turn(), Color::White);
    }

    #[test]
    fn test_timeout_fires_once() {
        let fired = Arc::new(Mutex::new(Vec::new()));
        let mut timer = AbsoluteTimer::new(secs(2)).with_first_turn(Color::White);
        let sink = Arc::clone(&fired);
        timer
            .timeout_listeners()
            .register(move |c: &Color| sink.lock().unwrap().push(*c));

        timer.start();
        for _ in 0..5 {
            timer.tick();
        }

        assert_eq!(*fired.lock().unwrap(), vec![Color::White]);
        assert_eq!(timer.timed_out(), Some(Color::White));
        assert!(!timer.is_running());
        assert_eq!(timer.time_left(), Duration::ZERO);

        timer.start();
        assert!(!timer.is_running());
    }

    #[test]
    fn test_zero_budget_waits_for_start() {
        let mut timer = AbsoluteTimer::new(Duration::ZERO);
        timer.tick();
        assert_eq!(timer.timed_out(), None);

        timer.start();
        timer.tick();
        assert_eq!(timer.timed_out(), Some(Color::Black));
    }
}
