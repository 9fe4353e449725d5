//! Debounced event latches for the two operator buttons.
//!
//! Each latch has a single writer and a single reader: the edge interrupt
//! only ever sets the pending flag through [`InputLatches::on_edge`], and
//! the active mode only reads-and-clears it through
//! [`ButtonSource::poll_and_clear`]. Bounced edges are dropped silently,
//! never reported.

use crate::timebase::elapsed_ms;

/// Minimum spacing between accepted edges of one button.
pub const DEBOUNCE_MS: u32 = 300;

/// The two physical operator buttons.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    /// Red button: cycles through candidates.
    Select = 0,
    /// Blue button: confirms a candidate, or aborts the running mode.
    Confirm = 1,
}

/// Read side of the latches, as seen by the mode logic.
pub trait ButtonSource {
    /// Returns whether an accepted press is pending and clears it.
    fn poll_and_clear(&mut self, id: ButtonId) -> bool;

    /// Drops a stale pending event without reporting it.
    fn clear(&mut self, id: ButtonId);
}

#[derive(Clone, Copy, Default)]
struct Latch {
    pending: bool,
    last_accept_ms: u32,
    accepted_any: bool,
}

/// One pending-event latch per button, plus the per-button debounce clock.
pub struct InputLatches {
    latches: [Latch; 2],
}

impl InputLatches {
    pub const fn new() -> Self {
        InputLatches {
            latches: [Latch {
                pending: false,
                last_accept_ms: 0,
                accepted_any: false,
            }; 2],
        }
    }

    /// Records an edge from the hardware interrupt.
    ///
    /// The edge is accepted only if at least [`DEBOUNCE_MS`] elapsed since
    /// the last accepted edge of the same button; the first edge after
    /// boot is always accepted. Only sets state, never clears it.
    pub fn on_edge(&mut self, id: ButtonId, now_ms: u32) {
        let latch = &mut self.latches[id as usize];
        if latch.accepted_any && elapsed_ms(now_ms, latch.last_accept_ms) < DEBOUNCE_MS {
            return;
        }
        latch.pending = true;
        latch.last_accept_ms = now_ms;
        latch.accepted_any = true;
    }
}

impl ButtonSource for InputLatches {
    fn poll_and_clear(&mut self, id: ButtonId) -> bool {
        let latch = &mut self.latches[id as usize];
        let pending = latch.pending;
        latch.pending = false;
        pending
    }

    fn clear(&mut self, id: ButtonId) {
        self.latches[id as usize].pending = false;
    }
}
