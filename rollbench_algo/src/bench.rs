//! Top-level operating-mode state machine tying the operator controls to
//! the bench outputs.
//!
//! `Bench` owns the display, motor, and relay capabilities plus the
//! persistent PWM preset, and is ticked once per control pass for the
//! lifetime of the process. Every blocking wait of the panel (mode
//! selection, dwell notices, manual tracking) is expressed as a state
//! polled against the millisecond clock, so the loop stays responsive to
//! the buttons at all times.

use core::fmt::Write;

use heapless::String;

use crate::buttons::{ButtonId, ButtonSource};
use crate::frequency::FrequencyChoice;
use crate::ports::{MotorDrive, PowerRelay, PwmFrequency, TextDisplay};
use crate::ramp::SpeedRamp;
use crate::runin::{RunInSequencer, RunOutcome};
use crate::speed::{raw_to_speed, speed_to_percent, Speed};
use crate::timebase::deadline_passed;

/// Version string shown on the boot splash.
pub const FIRMWARE_VERSION: &str = "1.0";

/// How long the boot splash and end-of-mode notices stay up.
const NOTICE_MS: u32 = 500;

/// Ramp pacing into and out of manual mode.
const MANUAL_RAMP_STEP_MS: u32 = 1;

/// Pot magnitudes at or below this render as stopped (no arrow).
const ARROW_DEADBAND: Speed = 3;

/// The four operator-selectable modes, in selection order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    Manual = 1,
    RunIn = 2,
    SelectFrequency = 3,
    ExternalPower = 4,
}

impl OperatingMode {
    /// The next mode in selection order, wrapping back to the first.
    pub const fn next(self) -> Self {
        match self {
            OperatingMode::Manual => OperatingMode::RunIn,
            OperatingMode::RunIn => OperatingMode::SelectFrequency,
            OperatingMode::SelectFrequency => OperatingMode::ExternalPower,
            OperatingMode::ExternalPower => OperatingMode::Manual,
        }
    }

    /// Candidate name shown in the selection loop.
    pub const fn label(self) -> &'static str {
        match self {
            OperatingMode::Manual => "manual PWM",
            OperatingMode::RunIn => "run-in program",
            OperatingMode::SelectFrequency => "set PWM freq.",
            OperatingMode::ExternalPower => "external supply",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum BenchMode {
    Splash,
    ModeSelect,
    Manual,
    RunIn,
    FrequencySelect,
    ExternalPower,
    Notice,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ManualStage {
    RampIn,
    Track,
    RampOut,
}

/// Owns the bench peripherals and the mode state machine.
///
/// `M` is the motor output; the same object carries both the speed
/// command and the carrier-preset capability since both live on the
/// bridge PWM timer.
pub struct Bench<D, M, R> {
    display: D,
    motor: M,
    relay: R,

    /// Committed PWM preset; persists across mode changes.
    frequency: FrequencyChoice,

    mode: BenchMode,
    mode_candidate: OperatingMode,
    freq_candidate: FrequencyChoice,
    manual_stage: ManualStage,
    manual_ramp: SpeedRamp,
    runin: RunInSequencer,
    notice_deadline_ms: u32,
}

impl<D, M, R> Bench<D, M, R>
where
    D: TextDisplay,
    M: MotorDrive + PwmFrequency,
    R: PowerRelay,
{
    /// Draws the boot splash and parks the state machine behind it.
    pub fn new(display: D, motor: M, relay: R, now_ms: u32) -> Self {
        let mut bench = Bench {
            display,
            motor,
            relay,
            frequency: FrequencyChoice::DEFAULT,
            mode: BenchMode::Splash,
            mode_candidate: OperatingMode::Manual,
            freq_candidate: FrequencyChoice::DEFAULT,
            manual_stage: ManualStage::Track,
            manual_ramp: SpeedRamp::new(0, 0, MANUAL_RAMP_STEP_MS, now_ms),
            runin: RunInSequencer::new(),
            notice_deadline_ms: now_ms.wrapping_add(NOTICE_MS),
        };
        bench.display.clear();
        bench.display.write(0, "rolling road");
        bench.display.write(1, "speed control");
        bench.display.write(2, FIRMWARE_VERSION);
        bench.display.flush();
        bench
    }

    /// The committed PWM preset.
    pub fn frequency(&self) -> FrequencyChoice {
        self.frequency
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn motor(&self) -> &M {
        &self.motor
    }

    pub fn relay(&self) -> &R {
        &self.relay
    }

    /// One control pass: `throttle_raw` is the fresh pot sample, the
    /// latches hand over any accepted button presses.
    pub fn tick(&mut self, now_ms: u32, throttle_raw: u16, buttons: &mut impl ButtonSource) {
        match self.mode {
            BenchMode::Splash | BenchMode::Notice => {
                if deadline_passed(now_ms, self.notice_deadline_ms) {
                    self.enter_mode_select(buttons);
                }
            }
            BenchMode::ModeSelect => self.tick_mode_select(now_ms, throttle_raw, buttons),
            BenchMode::Manual => self.tick_manual(now_ms, throttle_raw, buttons),
            BenchMode::RunIn => self.tick_runin(now_ms, buttons),
            BenchMode::FrequencySelect => self.tick_frequency_select(now_ms, buttons),
            BenchMode::ExternalPower => self.tick_external_power(now_ms, buttons),
        }
    }

    fn enter_mode_select(&mut self, buttons: &mut impl ButtonSource) {
        self.display.clear();
        self.display.write(0, "select mode:");
        self.display.write(1, "red: next");
        self.display.write(2, "blue: confirm");
        self.display.flush();
        buttons.clear(ButtonId::Select);
        buttons.clear(ButtonId::Confirm);
        self.mode_candidate = OperatingMode::Manual;
        self.mode = BenchMode::ModeSelect;
    }

    fn tick_mode_select(
        &mut self,
        now_ms: u32,
        throttle_raw: u16,
        buttons: &mut impl ButtonSource,
    ) {
        if buttons.poll_and_clear(ButtonId::Select) {
            self.mode_candidate = self.mode_candidate.next();
        }
        self.display.write(5, self.mode_candidate.label());
        self.display.flush();

        if buttons.poll_and_clear(ButtonId::Confirm) {
            #[cfg(feature = "defmt")]
            defmt::info!("mode: {}", self.mode_candidate.label());
            match self.mode_candidate {
                OperatingMode::Manual => self.enter_manual(now_ms, throttle_raw),
                OperatingMode::RunIn => self.enter_runin(buttons),
                OperatingMode::SelectFrequency => self.enter_frequency_select(),
                OperatingMode::ExternalPower => self.enter_external_power(),
            }
        }
    }

    fn enter_manual(&mut self, now_ms: u32, throttle_raw: u16) {
        self.display.clear();
        self.display.write(0, "rolling road");
        self.display.write(1, "manual PWM");
        self.display.write(2, self.frequency.label());
        self.display.flush();
        // ease in from standstill to wherever the pot already sits
        let target = raw_to_speed(throttle_raw);
        self.manual_ramp = SpeedRamp::new(0, target, MANUAL_RAMP_STEP_MS, now_ms);
        self.manual_stage = ManualStage::RampIn;
        self.mode = BenchMode::Manual;
        self.output_speed(0);
    }

    fn tick_manual(&mut self, now_ms: u32, throttle_raw: u16, buttons: &mut impl ButtonSource) {
        match self.manual_stage {
            ManualStage::RampIn => {
                let speed = self.manual_ramp.tick(now_ms);
                self.output_speed(speed);
                if self.manual_ramp.is_done() {
                    self.manual_stage = ManualStage::Track;
                }
            }
            ManualStage::Track => {
                let speed = raw_to_speed(throttle_raw);
                self.output_speed(speed);
                if buttons.poll_and_clear(ButtonId::Confirm) {
                    self.manual_ramp = SpeedRamp::new(speed, 0, MANUAL_RAMP_STEP_MS, now_ms);
                    self.manual_stage = ManualStage::RampOut;
                }
            }
            ManualStage::RampOut => {
                let speed = self.manual_ramp.tick(now_ms);
                self.output_speed(speed);
                if self.manual_ramp.is_done() {
                    self.motor.command(0);
                    self.enter_mode_select(buttons);
                }
            }
        }
    }

    fn enter_runin(&mut self, buttons: &mut impl ButtonSource) {
        self.display.clear();
        self.display.write(0, "rolling road");
        self.display.write(1, "run-in program");
        let mut line: String<16> = String::new();
        let _ = write!(line, "PWM {}", self.frequency.label());
        self.display.write(2, &line);
        self.display.flush();
        buttons.clear(ButtonId::Confirm);
        self.runin = RunInSequencer::new();
        self.mode = BenchMode::RunIn;
    }

    fn tick_runin(&mut self, now_ms: u32, buttons: &mut impl ButtonSource) {
        let abort = buttons.poll_and_clear(ButtonId::Confirm);
        let speed = self.runin.tick(now_ms, abort);

        if self.runin.is_holding() {
            let mut line: String<16> = String::new();
            let _ = write!(
                line,
                "t: {}s, {}#{}",
                self.runin.remaining_secs(now_ms),
                self.runin.step(),
                self.runin.steps_total()
            );
            self.display.write(4, &line);
        }
        self.output_speed(speed);

        if self.runin.is_done() {
            self.motor.command(0);
            let text = match self.runin.outcome() {
                Some(RunOutcome::Aborted) => "ABORTED",
                _ => "done",
            };
            self.display.write(3, text);
            self.display.flush();
            self.begin_notice(now_ms);
        }
    }

    fn enter_frequency_select(&mut self) {
        self.display.clear();
        self.display.write(0, "select");
        self.display.write(1, "PWM frequency");
        self.display.write(2, "red: next");
        self.display.write(3, "blue: confirm");
        self.display.flush();
        self.freq_candidate = self.frequency;
        self.mode = BenchMode::FrequencySelect;
    }

    fn tick_frequency_select(&mut self, now_ms: u32, buttons: &mut impl ButtonSource) {
        if buttons.poll_and_clear(ButtonId::Select) {
            self.freq_candidate = self.freq_candidate.next();
        }
        let mut line: String<16> = String::new();
        let _ = write!(line, "{}: {}", self.freq_candidate.index(), self.freq_candidate.label());
        self.display.write(5, &line);
        self.display.flush();

        if buttons.poll_and_clear(ButtonId::Confirm) {
            self.frequency = self.freq_candidate;
            self.motor.apply(self.frequency);
            #[cfg(feature = "defmt")]
            defmt::info!(
                "PWM preset {}: {}",
                self.frequency.index(),
                self.frequency.label()
            );
            self.display.write(6, "applied");
            self.display.flush();
            self.begin_notice(now_ms);
        }
    }

    fn enter_external_power(&mut self) {
        self.display.clear();
        self.display.write(0, "rolling road");
        self.display.write(1, "external");
        self.display.write(2, "supply");
        self.display.flush();
        self.relay.enable(true);
        self.mode = BenchMode::ExternalPower;
    }

    fn tick_external_power(&mut self, now_ms: u32, buttons: &mut impl ButtonSource) {
        self.display.write(5, "active");
        self.display.flush();
        if buttons.poll_and_clear(ButtonId::Confirm) {
            self.relay.enable(false);
            self.display.write(5, "ended");
            self.display.flush();
            self.begin_notice(now_ms);
        }
    }

    fn begin_notice(&mut self, now_ms: u32) {
        self.notice_deadline_ms = now_ms.wrapping_add(NOTICE_MS);
        self.mode = BenchMode::Notice;
    }

    /// Commands the motor and refreshes the speed rows, mirroring the
    /// motor state on the panel every pass.
    fn output_speed(&mut self, speed: Speed) {
        let mut line: String<16> = String::new();
        let _ = write!(line, " speed: {}%", speed_to_percent(speed));
        self.display.write(5, &line);

        let arrow = if speed > ARROW_DEADBAND {
            "  -------->>>>"
        } else if speed < -ARROW_DEADBAND {
            "  <<<<--------"
        } else {
            "  ------------"
        };
        self.display.write(7, arrow);
        self.display.flush();
        self.motor.command(speed);
    }
}
