use hal::gpio::{Pin, PinMode, Port};

pub mod bridge;
pub mod panel;

/// Represents the definition of a GPIO pin.
pub struct PinDef {
    /// The port to which the pin belongs (e.g., Port::A, Port::B).
    port: Port,
    /// The pin number within the port.
    pin: u8,
    /// The mode of the pin (e.g., Output, Input, Alternate function).
    mode: PinMode,
}

impl PinDef {
    pub fn new(port: Port, pin: u8, mode: PinMode) -> PinDef {
        PinDef { port, pin, mode }
    }

    /// Converts the PinDef struct to a Pin struct. Useful for predefined pin configurations.
    /// # Example
    /// ```
    /// let mut relay = panel::RELAY.init();
    /// relay.set_high();
    /// ```
    pub fn init(&self) -> Pin {
        Pin::new(self.port, self.pin, self.mode)
    }
}
