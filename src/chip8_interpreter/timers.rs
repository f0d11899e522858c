//! Delay and sound timers.
use std::time::{Duration, Instant};

use crate::chip8_interpreter::config::{TIMER_FREQUENCY, TIMER_RELOAD_VALUE};
use crate::chip8_interpreter::quirks::Chip8Quirks;
use crate::chip8_interpreter::state::MachineState;

/// Advance both timers by one 60Hz period.
///
/// `sound_callback` fires once when the sound timer runs out.
pub fn tick_timers(
    state: &mut MachineState,
    quirks: Chip8Quirks,
    mut sound_callback: Option<&mut dyn FnMut()>,
) {
    if state.delay_timer > 0 {
        state.delay_timer -= 1;
        if state.delay_timer == 0 && quirks.timer_reload {
            state.delay_timer = TIMER_RELOAD_VALUE;
        }
    }

    if state.sound_timer > 0 {
        state.sound_timer -= 1;
        if state.sound_timer == 0 {
            if let Some(callback) = sound_callback.as_mut() {
                callback();
            }
            if quirks.timer_reload {
                state.sound_timer = TIMER_RELOAD_VALUE;
            }
        }
    }
}

/// Converts wall-clock time into a count of timer periods.
///
/// The remainder of a partial period is carried over to the next poll, so the
/// long-run rate stays at 60Hz even when the caller polls irregularly.
#[derive(Debug, Clone)]
pub struct TimerPacer {
    last_poll: Instant,
    carry: Duration,
    period: Duration,
}

impl TimerPacer {
    /// Ticks reported after a stall, e.g. the window being dragged. Anything beyond is dropped.
    pub const MAX_CATCH_UP: u32 = 6;

    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            last_poll: start,
            carry: Duration::ZERO,
            period: Duration::from_secs(1) / TIMER_FREQUENCY,
        }
    }

    pub fn due_ticks(&mut self) -> u32 {
        self.due_ticks_at(Instant::now())
    }

    pub fn due_ticks_at(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last_poll) + self.carry;
        self.last_poll = now;

        let ticks = (elapsed.as_nanos() / self.period.as_nanos()) as u32;
        if ticks > Self::MAX_CATCH_UP {
            self.carry = Duration::ZERO;
            return Self::MAX_CATCH_UP;
        }

        self.carry = elapsed - self.period * ticks;
        ticks
    }
}

impl Default for TimerPacer {
    fn default() -> Self {
        Self::new()
    }
}
