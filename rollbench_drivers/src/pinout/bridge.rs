//! Pin assignments for the motor H-bridge.
use super::PinDef;
use super::{PinMode, Port};

/// Direction input 1 of the bridge
pub const IN1: PinDef = PinDef {
    port: Port::B,
    pin: 0,
    mode: PinMode::Output,
};

/// Direction input 2 of the bridge
pub const IN2: PinDef = PinDef {
    port: Port::B,
    pin: 1,
    mode: PinMode::Output,
};

/// Enable pin of the bridge, driven by TIM2 channel 1
pub const ENABLE_PWM: PinDef = PinDef {
    port: Port::A,
    pin: 0,
    mode: PinMode::Alt(1),
};
