#![no_std]
#![no_main]

use cortex_m::delay::Delay;
use cortex_m_rt::entry; // The runtime

use hal::{self, clocks::Clocks, pac};

use defmt_rtt as _;
// global logger
use panic_probe as _;

use rollbench_algo::ports::MotorDrive;
use rollbench_algo::FrequencyChoice;
use rollbench_drivers::motor::MotorPwm;

/// Bridge check: sweeps the motor forward to full speed, back through
/// zero to full reverse, and home again. Watch the direction change at
/// the zero crossings.
#[entry]
fn main() -> ! {
    // Set up CPU peripherals
    let cp = cortex_m::Peripherals::take().unwrap();
    // Set up microcontroller peripherals
    let dp = pac::Peripherals::take().unwrap();

    let clock_cfg = Clocks::default();
    clock_cfg.setup().unwrap();

    let mut delay = Delay::new(cp.SYST, clock_cfg.systick());

    let mut motor = MotorPwm::new(dp.TIM2, &clock_cfg, FrequencyChoice::DEFAULT);
    motor.begin();

    defmt::info!("motor check: sweeping the bridge");

    loop {
        for speed in (0i16..=127)
            .chain((-127i16..=127).rev())
            .chain(-127i16..=0)
        {
            motor.command(speed);
            delay.delay_ms(20);
        }
        defmt::info!("sweep complete");
        delay.delay_ms(1_000);
    }
}

// same panicking *behavior* as `panic-probe` but doesn't print a panic message
// this prevents the panic message being printed *twice* when `defmt::panic` is invoked
#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}
