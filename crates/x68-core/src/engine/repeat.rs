//! Key repeat timer.
//!
//! The X68000 keyboard, not the host, generates repeats: while a key is
//! held the keyboard re-sends its make byte at the host-configured cadence.
//! This is a two-state machine — Idle (nothing held) and Armed (one held
//! scan code plus a countdown).  The original hardware repeats a single key
//! only; a newer make simply takes over (last-key-wins), with no queue of
//! held keys.

use crate::protocol::keyboard::KeyEvent;

/// Tracks the currently held key and the time remaining until its next
/// synthetic make.
#[derive(Debug, Default)]
pub struct RepeatTimer {
    held: Option<u8>,
    countdown_ms: i32,
}

impl RepeatTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one non-modifier key transition into the state machine.
    ///
    /// A make arms the timer for that scan code with the configured delay
    /// (overwriting any previously held key).  A break disarms only if it
    /// matches the held scan code — releasing some *other* key leaves the
    /// repeat untouched.
    pub fn observe(&mut self, event: KeyEvent, delay_ms: u16) {
        if event.is_make() {
            self.held = Some(event.scan);
            self.countdown_ms = i32::from(delay_ms);
        } else if self.held == Some(event.scan) {
            self.held = None;
            self.countdown_ms = 0;
        }
    }

    /// Advances the countdown by `elapsed_ms`.
    ///
    /// Returns the held scan code when the countdown expires; the timer
    /// re-arms itself with `interval_ms` and stays Armed.  At most one
    /// repeat fires per tick regardless of how much time elapsed — the
    /// host cannot consume faster than the poll cadence anyway.
    pub fn tick(&mut self, elapsed_ms: u32, interval_ms: u16) -> Option<u8> {
        let held = self.held?;
        self.countdown_ms -= elapsed_ms.min(i32::MAX as u32) as i32;
        if self.countdown_ms <= 0 {
            self.countdown_ms = i32::from(interval_ms);
            Some(held)
        } else {
            None
        }
    }

    /// Currently held scan code, if Armed.
    pub fn held(&self) -> Option<u8> {
        self.held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: u16 = 500;
    const INTERVAL: u16 = 110;

    #[test]
    fn test_idle_timer_never_fires() {
        let mut timer = RepeatTimer::new();
        assert_eq!(timer.tick(10_000, INTERVAL), None);
    }

    #[test]
    fn test_no_repeat_before_delay_elapses() {
        let mut timer = RepeatTimer::new();
        timer.observe(KeyEvent::make(0x1e), DELAY);
        for _ in 0..49 {
            assert_eq!(timer.tick(10, INTERVAL), None);
        }
        // 490 ms elapsed so far; the 500 ms boundary fires on the next tick.
        assert_eq!(timer.tick(10, INTERVAL), Some(0x1e));
    }

    #[test]
    fn test_repeats_continue_at_interval() {
        let mut timer = RepeatTimer::new();
        timer.observe(KeyEvent::make(0x1e), DELAY);
        assert_eq!(timer.tick(500, INTERVAL), Some(0x1e));
        assert_eq!(timer.tick(100, INTERVAL), None);
        assert_eq!(timer.tick(10, INTERVAL), Some(0x1e));
        assert_eq!(timer.tick(110, INTERVAL), Some(0x1e));
    }

    #[test]
    fn test_break_of_held_key_disarms() {
        let mut timer = RepeatTimer::new();
        timer.observe(KeyEvent::make(0x1e), DELAY);
        timer.observe(KeyEvent::brk(0x1e), DELAY);
        assert_eq!(timer.held(), None);
        assert_eq!(timer.tick(10_000, INTERVAL), None);
    }

    #[test]
    fn test_break_of_other_key_leaves_timer_armed() {
        let mut timer = RepeatTimer::new();
        timer.observe(KeyEvent::make(0x1e), DELAY);
        timer.observe(KeyEvent::brk(0x2e), DELAY);
        assert_eq!(timer.held(), Some(0x1e));
        assert_eq!(timer.tick(500, INTERVAL), Some(0x1e));
    }

    #[test]
    fn test_newer_make_overwrites_held_key() {
        let mut timer = RepeatTimer::new();
        timer.observe(KeyEvent::make(0x1e), DELAY);
        timer.tick(400, INTERVAL);
        // New key resets the countdown to the full delay.
        timer.observe(KeyEvent::make(0x2e), DELAY);
        assert_eq!(timer.tick(400, INTERVAL), None);
        assert_eq!(timer.tick(100, INTERVAL), Some(0x2e));
    }

    #[test]
    fn test_releasing_superseded_key_keeps_repeat() {
        let mut timer = RepeatTimer::new();
        timer.observe(KeyEvent::make(0x1e), DELAY);
        timer.observe(KeyEvent::make(0x2e), DELAY);
        // The break of the superseded key must not cancel the new repeat.
        timer.observe(KeyEvent::brk(0x1e), DELAY);
        assert_eq!(timer.held(), Some(0x2e));
    }
}
