//! Time-stepped transitions between commanded speeds.

use crate::speed::Speed;
use crate::timebase::deadline_passed;

/// Steps a commanded speed from a start value toward a target, one unit
/// per time step.
///
/// The step direction is fixed once, at construction. With a unit step
/// between integer endpoints the target is reached exactly, never
/// overshot. [`SpeedRamp::tick`] returns the current speed on every pass,
/// whether or not a step just occurred, so the caller can keep refreshing
/// the motor and display while waiting for the next step boundary.
///
/// A ramp always runs to completion; callers that must bail out early
/// race their own exit condition against `tick` on each pass.
pub struct SpeedRamp {
    current: Speed,
    target: Speed,
    step: Speed,
    step_ms: u32,
    next_step_ms: u32,
}

impl SpeedRamp {
    pub fn new(from: Speed, to: Speed, step_ms: u32, now_ms: u32) -> Self {
        let step = if from >= to { -1 } else { 1 };
        SpeedRamp {
            current: from,
            target: to,
            step,
            step_ms,
            next_step_ms: now_ms.wrapping_add(step_ms),
        }
    }

    /// Advances at most one unit once the step deadline has passed and
    /// returns the speed to command on this pass.
    pub fn tick(&mut self, now_ms: u32) -> Speed {
        if !self.is_done() && deadline_passed(now_ms, self.next_step_ms) {
            self.current += self.step;
            self.next_step_ms = now_ms.wrapping_add(self.step_ms);
        }
        self.current
    }

    pub fn current(&self) -> Speed {
        self.current
    }

    pub fn is_done(&self) -> bool {
        self.current == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Drives the ramp at a 1 ms tick and records the speed whenever it
    /// changes.
    fn run_to_completion(ramp: &mut SpeedRamp, start_ms: u32) -> Vec<Speed> {
        let mut seen = vec![ramp.current()];
        let mut now = start_ms;
        while !ramp.is_done() {
            now = now.wrapping_add(1);
            let speed = ramp.tick(now);
            if speed != *seen.last().unwrap() {
                seen.push(speed);
            }
        }
        seen
    }

    #[test]
    fn rising_ramp_visits_every_value_in_order() {
        let mut ramp = SpeedRamp::new(0, 90, 1, 0);
        let seen = run_to_completion(&mut ramp, 0);
        let expected: Vec<Speed> = (0..=90).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn falling_ramp_passes_through_zero() {
        let mut ramp = SpeedRamp::new(90, -90, 1, 0);
        let seen = run_to_completion(&mut ramp, 0);
        let expected: Vec<Speed> = (-90..=90).rev().collect();
        assert_eq!(seen, expected);
        assert!(seen.contains(&0));
    }

    #[test]
    fn tick_reports_current_speed_between_steps() {
        let mut ramp = SpeedRamp::new(0, 5, 10, 0);
        // no deadline passed yet: same value on every pass, no step
        assert_eq!(ramp.tick(1), 0);
        assert_eq!(ramp.tick(5), 0);
        assert_eq!(ramp.tick(10), 1);
        assert_eq!(ramp.tick(11), 1);
    }

    #[test]
    fn one_step_per_pass_even_when_late() {
        let mut ramp = SpeedRamp::new(0, 10, 1, 0);
        // a late pass still advances a single unit
        assert_eq!(ramp.tick(500), 1);
        assert_eq!(ramp.tick(501), 2);
    }

    #[test]
    fn equal_endpoints_are_done_immediately() {
        let mut ramp = SpeedRamp::new(40, 40, 1, 0);
        assert!(ramp.is_done());
        assert_eq!(ramp.tick(100), 40);
    }

    #[test]
    fn step_deadline_survives_counter_wrap() {
        let start = u32::MAX - 2;
        let mut ramp = SpeedRamp::new(0, 3, 2, start);
        assert_eq!(ramp.tick(start.wrapping_add(1)), 0);
        assert_eq!(ramp.tick(start.wrapping_add(2)), 1);
        assert_eq!(ramp.tick(start.wrapping_add(4)), 2);
        assert_eq!(ramp.tick(start.wrapping_add(6)), 3);
        assert!(ramp.is_done());
    }
}
