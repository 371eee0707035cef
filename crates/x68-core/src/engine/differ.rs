//! Keyboard report differencer.
//!
//! Boot-protocol keyboards report *state* (what is held right now), while
//! the X68000 wire wants *transitions* (make/break bytes).  The differencer
//! bridges the two: it keeps the previously seen report and, for each new
//! one, emits exactly the minimal transition set implied by the symmetric
//! difference of the two snapshots.
//!
//! Emission order is significant and fixed:
//!
//! 1. Modifier transitions, bit 0 through bit 7 of the modifier mask.
//! 2. Breaks — keys present in the previous report but absent from the new
//!    one, in previous-report slot order.
//! 3. Makes — keys present in the new report but absent from the previous
//!    one, in new-report slot order.
//!
//! All breaks before all makes matches what legacy hosts expect during key
//! rollover: a key swapped within one report boundary is seen released
//! before its replacement is pressed.

use crate::keymap::hid::KeyboardReport;
use crate::keymap::x68k::{modifier_scan, usage_to_scan};
use crate::protocol::keyboard::KeyEvent;

/// One key transition produced by the differencer.
///
/// `is_modifier` distinguishes modifier-mask transitions from key-slot
/// transitions; only the latter participate in auto-repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChange {
    pub event: KeyEvent,
    pub is_modifier: bool,
}

/// Stateful differencer holding the previous keyboard snapshot.
#[derive(Debug, Default)]
pub struct ReportDiffer {
    previous: KeyboardReport,
}

impl ReportDiffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diffs `new` against the stored snapshot, emitting each transition in
    /// the documented order.
    ///
    /// Usage codes 0x00–0x03 (empty slot and rollover/error markers) never
    /// produce events.  Usages with no X68000 scan code are dropped here,
    /// before they reach the wire or the repeat timer.  The stored snapshot
    /// is replaced only after every event has been emitted.
    pub fn diff(&mut self, new: &KeyboardReport, mut emit: impl FnMut(KeyChange)) {
        let changed = self.previous.modifiers.changed_bits(new.modifiers);
        for bit in 0..8u8 {
            if changed & (1 << bit) != 0 {
                let scan = modifier_scan(bit);
                let event = if new.modifiers.is_set(bit) {
                    KeyEvent::make(scan)
                } else {
                    KeyEvent::brk(scan)
                };
                emit(KeyChange {
                    event,
                    is_modifier: true,
                });
            }
        }

        for &usage in &self.previous.keycodes {
            if KeyboardReport::is_reportable_usage(usage) && !new.contains(usage) {
                if let Some(scan) = usage_to_scan(usage) {
                    emit(KeyChange {
                        event: KeyEvent::brk(scan),
                        is_modifier: false,
                    });
                }
            }
        }

        for &usage in &new.keycodes {
            if KeyboardReport::is_reportable_usage(usage) && !self.previous.contains(usage) {
                if let Some(scan) = usage_to_scan(usage) {
                    emit(KeyChange {
                        event: KeyEvent::make(scan),
                        is_modifier: false,
                    });
                }
            }
        }

        self.previous = *new;
    }

    /// The most recently stored snapshot.
    pub fn previous(&self) -> &KeyboardReport {
        &self.previous
    }
}
