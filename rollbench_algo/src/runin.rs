//! Automated run-in: ramp/dwell/reverse cycles over a rising speed table.

use crate::ramp::SpeedRamp;
use crate::speed::Speed;
use crate::timebase::deadline_passed;

/// Hold magnitudes driven in order; each is held forward, then reversed.
pub const RUNIN_SPEEDS: [Speed; 5] = [50, 60, 70, 80, 90];

/// Counted steps across a full run: one per directional hold.
pub const RUNIN_STEPS: u8 = RUNIN_SPEEDS.len() as u8 * 2;

/// Dwell at each hold target.
pub const RUNIN_DWELL_SECS: u32 = 300;

/// Ramp pacing between hold targets.
pub const RUNIN_RAMP_STEP_MS: u32 = 100;

/// Fast wind-down pacing after an abort.
const ABORT_RAMP_STEP_MS: u32 = 1;

/// What a finished run reports.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunOutcome {
    Completed,
    Aborted,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum RunPhase {
    Idle,
    RampForward,
    HoldForward,
    RampReverse,
    HoldReverse,
    RampToZero,
    Done,
}

/// Drives the run-in table one tick at a time.
///
/// For each table entry the motor ramps to the forward target, dwells,
/// ramps through zero to the reverse target and dwells again; the step
/// counter advances when each directional ramp begins, 10 steps across
/// the table. An abort request observed in any ramp or hold phase leaves
/// the table immediately and winds the speed down to zero; the finished
/// run always ends stopped.
pub struct RunInSequencer {
    phase: RunPhase,
    entry: usize,
    steps_done: u8,
    speed: Speed,
    ramp: SpeedRamp,
    hold_deadline_ms: u32,
    outcome: Option<RunOutcome>,
}

impl RunInSequencer {
    pub fn new() -> Self {
        RunInSequencer {
            phase: RunPhase::Idle,
            entry: 0,
            steps_done: 0,
            speed: 0,
            ramp: SpeedRamp::new(0, 0, RUNIN_RAMP_STEP_MS, 0),
            hold_deadline_ms: 0,
            outcome: None,
        }
    }

    /// One scheduler pass. `abort` is the consumed state of the abort
    /// button for this pass; returns the speed to command.
    pub fn tick(&mut self, now_ms: u32, abort: bool) -> Speed {
        if abort && self.abortable() {
            self.begin_wind_down(now_ms, RunOutcome::Aborted);
        }

        match self.phase {
            RunPhase::Idle => {
                self.begin_forward_ramp(now_ms);
            }
            RunPhase::RampForward | RunPhase::RampReverse => {
                self.speed = self.ramp.tick(now_ms);
                if self.ramp.is_done() {
                    self.hold_deadline_ms = now_ms.wrapping_add(RUNIN_DWELL_SECS * 1000);
                    self.phase = if self.phase == RunPhase::RampForward {
                        RunPhase::HoldForward
                    } else {
                        RunPhase::HoldReverse
                    };
                }
            }
            RunPhase::HoldForward => {
                if deadline_passed(now_ms, self.hold_deadline_ms) {
                    self.begin_reverse_ramp(now_ms);
                }
            }
            RunPhase::HoldReverse => {
                if deadline_passed(now_ms, self.hold_deadline_ms) {
                    self.entry += 1;
                    if self.entry < RUNIN_SPEEDS.len() {
                        self.begin_forward_ramp(now_ms);
                    } else {
                        self.begin_wind_down(now_ms, RunOutcome::Completed);
                    }
                }
            }
            RunPhase::RampToZero => {
                self.speed = self.ramp.tick(now_ms);
                if self.ramp.is_done() {
                    self.phase = RunPhase::Done;
                    #[cfg(feature = "defmt")]
                    defmt::info!("run-in finished: {}", self.outcome);
                }
            }
            RunPhase::Done => {
                self.speed = 0;
            }
        }
        self.speed
    }

    fn abortable(&self) -> bool {
        matches!(
            self.phase,
            RunPhase::RampForward
                | RunPhase::HoldForward
                | RunPhase::RampReverse
                | RunPhase::HoldReverse
        )
    }

    fn begin_forward_ramp(&mut self, now_ms: u32) {
        self.steps_done += 1;
        let target = RUNIN_SPEEDS[self.entry];
        self.ramp = SpeedRamp::new(self.speed, target, RUNIN_RAMP_STEP_MS, now_ms);
        self.phase = RunPhase::RampForward;
        #[cfg(feature = "defmt")]
        defmt::info!(
            "run-in step {}/{}: toward {}",
            self.steps_done,
            RUNIN_STEPS,
            target
        );
    }

    fn begin_reverse_ramp(&mut self, now_ms: u32) {
        self.steps_done += 1;
        let target = -RUNIN_SPEEDS[self.entry];
        self.ramp = SpeedRamp::new(self.speed, target, RUNIN_RAMP_STEP_MS, now_ms);
        self.phase = RunPhase::RampReverse;
        #[cfg(feature = "defmt")]
        defmt::info!(
            "run-in step {}/{}: toward {}",
            self.steps_done,
            RUNIN_STEPS,
            target
        );
    }

    fn begin_wind_down(&mut self, now_ms: u32, outcome: RunOutcome) {
        let step_ms = match outcome {
            RunOutcome::Aborted => ABORT_RAMP_STEP_MS,
            RunOutcome::Completed => RUNIN_RAMP_STEP_MS,
        };
        self.ramp = SpeedRamp::new(self.speed, 0, step_ms, now_ms);
        self.outcome = Some(outcome);
        self.phase = RunPhase::RampToZero;
    }

    /// Speed currently commanded.
    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// 1-based step counter, 0 before the first ramp begins.
    pub fn step(&self) -> u8 {
        self.steps_done
    }

    pub fn steps_total(&self) -> u8 {
        RUNIN_STEPS
    }

    /// True while dwelling at a hold target.
    pub fn is_holding(&self) -> bool {
        matches!(self.phase, RunPhase::HoldForward | RunPhase::HoldReverse)
    }

    /// Whole seconds left in the current hold, 0 outside holds.
    pub fn remaining_secs(&self, now_ms: u32) -> u32 {
        if !self.is_holding() || deadline_passed(now_ms, self.hold_deadline_ms) {
            return 0;
        }
        self.hold_deadline_ms.wrapping_sub(now_ms) / 1000
    }

    pub fn is_done(&self) -> bool {
        self.phase == RunPhase::Done
    }

    /// Set once the wind-down begins; `None` while the table is running.
    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }
}
