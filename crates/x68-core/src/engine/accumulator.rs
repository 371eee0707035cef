//! Mouse motion accumulator.
//!
//! HID mouse reports arrive at whatever rate the device polls; the X68000
//! host asks for a packet on its own schedule (the mouse-request line).
//! Between requests every report's deltas are summed at full `i32` width so
//! nothing is lost, and the button state is *replaced* (not OR'd) so the
//! packet reflects the buttons as of the latest report.

use crate::keymap::hid::MouseReport;
use crate::protocol::mouse::MousePacket;

/// Accumulated motion and latched button state between transmits.
#[derive(Debug, Default)]
pub struct MouseAccumulator {
    dx: i32,
    dy: i32,
    left: bool,
    right: bool,
}

impl MouseAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one mouse report into the accumulated state.
    pub fn accumulate(&mut self, report: &MouseReport) {
        self.dx += report.dx as i32;
        self.dy += report.dy as i32;
        self.left = report.left_button();
        self.right = report.right_button();
    }

    /// Builds the wire packet for the current state and resets the motion
    /// counters.  Button state is retained until the next report replaces it.
    ///
    /// Must only be called once the transmit is actually going ahead — an
    /// inhibited attempt must not drain, so motion keeps accumulating.
    pub fn drain(&mut self) -> MousePacket {
        let packet = MousePacket::from_accumulated(self.dx, self.dy, self.left, self.right);
        self.dx = 0;
        self.dy = 0;
        packet
    }

    /// Accumulated horizontal motion since the last drain.
    pub fn dx(&self) -> i32 {
        self.dx
    }

    /// Accumulated vertical motion since the last drain.
    pub fn dy(&self) -> i32 {
        self.dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deltas_sum_across_reports() {
        let mut acc = MouseAccumulator::new();
        acc.accumulate(&MouseReport::new(0, 10, -5));
        acc.accumulate(&MouseReport::new(0, 7, -5));
        assert_eq!(acc.dx(), 17);
        assert_eq!(acc.dy(), -10);
    }

    #[test]
    fn test_accumulation_is_unbounded_before_drain() {
        let mut acc = MouseAccumulator::new();
        for _ in 0..10 {
            acc.accumulate(&MouseReport::new(0, 127, 127));
        }
        assert_eq!(acc.dx(), 1270);
        assert_eq!(acc.dy(), 1270);
    }

    #[test]
    fn test_buttons_replaced_not_ored() {
        let mut acc = MouseAccumulator::new();
        acc.accumulate(&MouseReport::new(MouseReport::BUTTON_LEFT, 0, 0));
        acc.accumulate(&MouseReport::new(MouseReport::BUTTON_RIGHT, 0, 0));
        let packet = acc.drain();
        assert!(!packet.left_button);
        assert!(packet.right_button);
    }

    #[test]
    fn test_drain_resets_motion_but_keeps_buttons() {
        let mut acc = MouseAccumulator::new();
        acc.accumulate(&MouseReport::new(MouseReport::BUTTON_LEFT, 20, 30));
        let first = acc.drain();
        assert_eq!(first.dx, 20);
        assert!(first.left_button);

        let second = acc.drain();
        assert_eq!(second.dx, 0);
        assert_eq!(second.dy, 0);
        assert!(second.left_button, "buttons persist until the next report");
    }

    #[test]
    fn test_overflow_flags_set_from_accumulated_total() {
        let mut acc = MouseAccumulator::new();
        acc.accumulate(&MouseReport::new(0, 100, 0));
        acc.accumulate(&MouseReport::new(0, 100, 0));
        let packet = acc.drain();
        assert!(packet.x_overflow_positive);
        assert_eq!(packet.dx, (200i32 as i8)); // -56 after wrap
    }
}
