//! Frame-driven timers
//!
//! Timers here are advanced by the frame loop with the elapsed time instead
//! of running on their own clock. A timer reports how many times it fired
//! during one advance, so the caller stays in control of what each fire does.
//!
//! Both timers are cancellable: after [`RepeatingTimer::cancel`] or
//! [`DelayTimer::cancel`] no further fires are reported, whatever the
//! elapsed time.

/// Timer that fires every `period` seconds until cancelled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepeatingTimer {
    period: f32,
    accumulated: f32,
    active: bool,
}

impl RepeatingTimer {
    /// Create a running timer. Non-positive periods are clamped to a
    /// millisecond so a tick can never loop forever.
    pub fn new(period: f32) -> Self {
        Self {
            period: period.max(0.001),
            accumulated: 0.0,
            active: true,
        }
    }

    /// A timer that is already stopped.
    pub fn stopped(period: f32) -> Self {
        Self {
            active: false,
            ..Self::new(period)
        }
    }

    pub fn period(&self) -> f32 {
        self.period
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Restart from zero accumulated time.
    pub fn restart(&mut self) {
        self.accumulated = 0.0;
        self.active = true;
    }

    /// Stop the timer. Safe to call on a stopped timer.
    pub fn cancel(&mut self) {
        self.active = false;
        self.accumulated = 0.0;
    }

    /// Advance by `dt` seconds and return the number of periods completed.
    pub fn tick(&mut self, dt: f32) -> u32 {
        if !self.active || dt <= 0.0 {
            return 0;
        }
        self.accumulated += dt;
        let mut fires = 0;
        while self.accumulated >= self.period {
            self.accumulated -= self.period;
            fires += 1;
        }
        fires
    }
}

/// One-shot timer that fires once after `delay` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayTimer {
    remaining: f32,
    active: bool,
}

impl DelayTimer {
    pub fn new(delay: f32) -> Self {
        Self {
            remaining: delay.max(0.0),
            active: true,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Seconds left before the timer fires (0 once fired or cancelled).
    pub fn remaining(&self) -> f32 {
        if self.active { self.remaining } else { 0.0 }
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    /// Advance by `dt`; returns `true` exactly once, on the tick the delay elapses.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.remaining -= dt.max(0.0);
        if self.remaining <= 0.0 {
            self.active = false;
            self.remaining = 0.0;
            return true;
        }
        false
    }
}
