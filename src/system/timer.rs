//! Redraw timer
//!
//! While the face is interactive it redraws once per second, with ticks
//! aligned to wall-clock second boundaries so the seconds digit flips on
//! time. The timer runs if and only if the face is visible and not ambient.

use embassy_time::Duration;

use crate::fmt::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerState {
    Stopped,
    /// Next tick is due at `deadline_ms` (wall-clock ms)
    Running { deadline_ms: u64 },
}

/// Delay from `now_ms` to the next multiple of `rate`
pub fn delay_to_next_tick(now_ms: u64, rate: Duration) -> Duration {
    let rate_ms = rate.as_millis().max(1);
    Duration::from_millis(rate_ms - now_ms % rate_ms)
}

pub struct UpdateTimer {
    rate: Duration,
    state: TimerState,
}

impl UpdateTimer {
    pub fn new(rate: Duration) -> Self {
        Self {
            rate,
            state: TimerState::Stopped,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    /// Wall-clock time of the next tick, if any
    pub fn deadline_ms(&self) -> Option<u64> {
        match self.state {
            TimerState::Stopped => None,
            TimerState::Running { deadline_ms } => Some(deadline_ms),
        }
    }

    /// Start or stop the timer.
    ///
    /// Any pending tick is dropped. Starting schedules a tick at `now_ms`
    /// so the first redraw happens right away.
    pub fn update(&mut self, should_run: bool, now_ms: u64) {
        let was_running = self.is_running();
        self.state = if should_run {
            TimerState::Running { deadline_ms: now_ms }
        } else {
            TimerState::Stopped
        };
        if was_running != should_run {
            debug!("Update timer running: {}", should_run);
        }
    }

    /// Consume a tick at `now_ms`.
    ///
    /// Returns the delay until the following tick, or `None` if the timer
    /// is stopped and no tick may be delivered.
    pub fn tick(&mut self, now_ms: u64) -> Option<Duration> {
        match self.state {
            TimerState::Stopped => None,
            TimerState::Running { .. } => {
                let delay = delay_to_next_tick(now_ms, self.rate);
                self.state = TimerState::Running {
                    deadline_ms: now_ms + delay.as_millis(),
                };
                Some(delay)
            }
        }
    }

    /// Stop without logging a transition, used on teardown
    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_millis(1000);

    #[test]
    fn test_delay_aligns_to_second() {
        assert_eq!(delay_to_next_tick(10_250, SECOND).as_millis(), 750);
        assert_eq!(delay_to_next_tick(10_999, SECOND).as_millis(), 1);
        assert_eq!(delay_to_next_tick(10_000, SECOND).as_millis(), 1000);
    }

    #[test]
    fn test_stopped_timer_delivers_no_tick() {
        let mut timer = UpdateTimer::new(SECOND);
        assert_eq!(timer.tick(5_000), None);
        assert_eq!(timer.deadline_ms(), None);
    }

    #[test]
    fn test_start_schedules_immediate_tick() {
        let mut timer = UpdateTimer::new(SECOND);
        timer.update(true, 42_123);
        assert_eq!(timer.state(), TimerState::Running { deadline_ms: 42_123 });
    }

    #[test]
    fn test_ticks_land_on_second_boundaries() {
        let mut timer = UpdateTimer::new(SECOND);
        timer.update(true, 1_337);

        let mut now = 1_337;
        for expected in [2_000, 3_000, 4_000, 5_000] {
            let delay = timer.tick(now).unwrap();
            now += delay.as_millis();
            assert_eq!(now, expected);
            assert_eq!(timer.deadline_ms(), Some(expected));
        }
    }

    #[test]
    fn test_late_tick_realigns() {
        let mut timer = UpdateTimer::new(SECOND);
        timer.update(true, 0);
        timer.tick(0);
        // Delivered 130ms late
        assert_eq!(timer.tick(1_130).unwrap().as_millis(), 870);
        assert_eq!(timer.deadline_ms(), Some(2_000));
    }

    #[test]
    fn test_stop_clears_deadline() {
        let mut timer = UpdateTimer::new(SECOND);
        timer.update(true, 0);
        timer.update(false, 10);
        assert!(!timer.is_running());
        assert_eq!(timer.tick(20), None);
    }
}
