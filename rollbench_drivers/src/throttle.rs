//! Operator throttle pot on ADC1.

use hal::{
    adc::{Adc, AdcDevice, Align, InputType, SampleTime},
    clocks::Clocks,
    pac::ADC1,
};

use super::pinout;

/// ADC channel the throttle pot is wired to (PA1).
const THROTTLE_CH: u8 = 2;

pub struct Throttle {
    adc: Adc<ADC1>,
}

impl Throttle {
    pub fn new(adc1: ADC1, clock_cfg: &Clocks) -> Self {
        pinout::panel::THROTTLE.init();

        let mut adc = Adc::new_adc1(
            adc1,
            AdcDevice::One,
            Default::default(),
            clock_cfg.systick(),
        );
        adc.set_input_type(THROTTLE_CH, InputType::SingleEnded);
        adc.set_sample_time(THROTTLE_CH, SampleTime::T2);
        adc.set_align(Align::Right);

        Throttle { adc }
    }

    /// One-shot reading scaled to the 0..=1023 range of the speed mapper.
    pub fn sample(&mut self) -> u16 {
        self.adc.read(THROTTLE_CH) >> 2
    }
}
