//! Pin assignments for the operator panel: buttons, pot, display bus, relay.
use super::PinDef;
use super::{PinMode, Port};

/// Red button, cycles candidates (EXTI line 15)
pub const BTN_SELECT: PinDef = PinDef {
    port: Port::A,
    pin: 15,
    mode: PinMode::Input,
};

/// Blue button, confirms and aborts (EXTI line 3)
pub const BTN_CONFIRM: PinDef = PinDef {
    port: Port::B,
    pin: 3,
    mode: PinMode::Input,
};

/// Operator throttle pot, ADC1 channel 2
pub const THROTTLE: PinDef = PinDef {
    port: Port::A,
    pin: 1,
    mode: PinMode::Analog,
};

/// Track power relay coil (active low)
pub const RELAY: PinDef = PinDef {
    port: Port::B,
    pin: 5,
    mode: PinMode::Output,
};

/// Display bus clock, I2C1 SCL
pub const DISPLAY_SCL: PinDef = PinDef {
    port: Port::B,
    pin: 8,
    mode: PinMode::Alt(4),
};

/// Display bus data, I2C1 SDA
pub const DISPLAY_SDA: PinDef = PinDef {
    port: Port::B,
    pin: 9,
    mode: PinMode::Alt(4),
};
