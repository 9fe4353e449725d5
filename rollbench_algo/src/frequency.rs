//! Fixed table of PWM carrier presets for the motor bridge.

/// Number of selectable presets.
pub const FREQUENCY_COUNT: u8 = 7;

/// One of the seven PWM carrier presets, identified by its 1-based
/// position in the selection order.
///
/// The table runs from the fastest carrier down to the slowest; the slow
/// end is the boot default.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrequencyChoice {
    Hz31372 = 1,
    Hz3921 = 2,
    Hz980 = 3,
    Hz490 = 4,
    Hz245 = 5,
    Hz122 = 6,
    Hz30 = 7,
}

impl FrequencyChoice {
    /// Preset selected at boot.
    pub const DEFAULT: Self = FrequencyChoice::Hz30;

    /// 1-based position in the selection order.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The next preset in selection order, wrapping back to the first.
    pub const fn next(self) -> Self {
        match self {
            FrequencyChoice::Hz31372 => FrequencyChoice::Hz3921,
            FrequencyChoice::Hz3921 => FrequencyChoice::Hz980,
            FrequencyChoice::Hz980 => FrequencyChoice::Hz490,
            FrequencyChoice::Hz490 => FrequencyChoice::Hz245,
            FrequencyChoice::Hz245 => FrequencyChoice::Hz122,
            FrequencyChoice::Hz122 => FrequencyChoice::Hz30,
            FrequencyChoice::Hz30 => FrequencyChoice::Hz31372,
        }
    }

    /// Label shown on the frequency rows of the display.
    pub const fn label(self) -> &'static str {
        match self {
            FrequencyChoice::Hz31372 => "31372.55 Hz",
            FrequencyChoice::Hz3921 => "3921.16 Hz",
            FrequencyChoice::Hz980 => "980.39 Hz",
            FrequencyChoice::Hz490 => "490.20 Hz",
            FrequencyChoice::Hz245 => "245.10 Hz",
            FrequencyChoice::Hz122 => "122.55 Hz",
            FrequencyChoice::Hz30 => "30.64 Hz",
        }
    }

    /// Carrier frequency in hertz.
    pub const fn hertz(self) -> f32 {
        match self {
            FrequencyChoice::Hz31372 => 31372.55,
            FrequencyChoice::Hz3921 => 3921.16,
            FrequencyChoice::Hz980 => 980.39,
            FrequencyChoice::Hz490 => 490.20,
            FrequencyChoice::Hz245 => 245.10,
            FrequencyChoice::Hz122 => 122.55,
            FrequencyChoice::Hz30 => 30.64,
        }
    }
}
