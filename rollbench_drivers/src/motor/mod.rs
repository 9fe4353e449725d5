//! H-bridge motor output: PWM on the enable pin plus two direction pins.

use hal::{
    clocks::Clocks,
    pac::TIM2,
    timer::{Alignment, CountDir, OutputCompare, TimChannel, Timer, TimerConfig, UpdateReqSrc},
};

use hal::gpio::Pin;

use rollbench_algo::ports::{MotorDrive, PwmFrequency};
use rollbench_algo::{FrequencyChoice, Speed, MAX_SPEED};

use super::pinout;

pub struct MotorPwm {
    tim: Timer<TIM2>,
    in1: Pin,
    in2: Pin,
}

impl MotorPwm {
    /// Sets up TIM2 at the given carrier preset. Center-aligned counting
    /// keeps the bridge on phase-correct PWM.
    pub fn new(tim2: TIM2, clock_cfg: &Clocks, choice: FrequencyChoice) -> Self {
        let mut timer_cfg = TimerConfig::default();
        timer_cfg.one_pulse_mode = false;
        timer_cfg.update_request_source = UpdateReqSrc::Any;
        timer_cfg.auto_reload_preload = true;
        timer_cfg.alignment = Alignment::Center1;
        timer_cfg.direction = CountDir::Up;

        let timer = Timer::new_tim2(tim2, choice.hertz(), timer_cfg, clock_cfg);

        MotorPwm {
            tim: timer,
            in1: pinout::bridge::IN1.init(),
            in2: pinout::bridge::IN2.init(),
        }
    }

    /// Enables the PWM output and parks the bridge stopped, forward.
    pub fn begin(&mut self) {
        self.tim
            .enable_pwm_output(TimChannel::C1, OutputCompare::Pwm1, 0.0);
        pinout::bridge::ENABLE_PWM.init();
        self.tim.enable();

        self.in1.set_low();
        self.in2.set_high();
    }

    fn magnitude_to_duty(speed: Speed, period: u32) -> u32 {
        let mag = speed.unsigned_abs().min(MAX_SPEED as u16) as u32;
        mag * period / MAX_SPEED as u32
    }
}

impl MotorDrive for MotorPwm {
    fn command(&mut self, speed: Speed) {
        let reverse = speed < 0;
        if reverse {
            self.in1.set_high();
            self.in2.set_low();
        } else {
            self.in1.set_low();
            self.in2.set_high();
        }

        let period = self.tim.get_max_duty();
        self.tim
            .set_duty(TimChannel::C1, Self::magnitude_to_duty(speed, period));
    }
}

impl PwmFrequency for MotorPwm {
    fn apply(&mut self, choice: FrequencyChoice) {
        // duty registers scale with the period, so a retune mid-command
        // is picked up on the next speed command
        self.tim.set_freq(choice.hertz()).ok();
    }
}
