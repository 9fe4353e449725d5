//! Track power relay, switching the rails over to the external supply.

use hal::gpio::Pin;

use rollbench_algo::ports::PowerRelay;

use super::pinout;

/// The relay coil is wired active low: driving the pin low energizes it.
pub struct TrackRelay {
    pin: Pin,
}

impl TrackRelay {
    /// Claims the relay pin, de-energized.
    pub fn new() -> Self {
        let mut pin = pinout::panel::RELAY.init();
        pin.set_high();
        TrackRelay { pin }
    }
}

impl PowerRelay for TrackRelay {
    fn enable(&mut self, on: bool) {
        if on {
            self.pin.set_low();
        } else {
            self.pin.set_high();
        }
    }
}
