#![no_std]
#![no_main]

use cortex_m::delay::Delay;
use cortex_m_rt::entry; // The runtime

use hal::{self, clocks::Clocks, gpio::Pull, pac};

use defmt_rtt as _;
// global logger
use panic_probe as _;

use rollbench_drivers::pinout;

/// Wiring check for the two panel buttons: polls the raw levels and logs
/// every change. Bounce shows up here on purpose; the debounce lives in
/// the control core, not in the pins.
#[entry]
fn main() -> ! {
    // Set up CPU peripherals
    let cp = cortex_m::Peripherals::take().unwrap();
    // Set up microcontroller peripherals
    let _dp = pac::Peripherals::take().unwrap();

    let clock_cfg = Clocks::default();
    clock_cfg.setup().unwrap();

    let mut delay = Delay::new(cp.SYST, clock_cfg.systick());

    let mut select = pinout::panel::BTN_SELECT.init();
    select.pull(Pull::Up);
    let mut confirm = pinout::panel::BTN_CONFIRM.init();
    confirm.pull(Pull::Up);

    defmt::info!("buttons check: press away");

    let mut select_was = false;
    let mut confirm_was = false;
    loop {
        let select_now = select.is_low();
        if select_now != select_was {
            defmt::info!("select (red): {}", select_now);
            select_was = select_now;
        }

        let confirm_now = confirm.is_low();
        if confirm_now != confirm_was {
            defmt::info!("confirm (blue): {}", confirm_now);
            confirm_was = confirm_now;
        }

        delay.delay_ms(10);
    }
}

// same panicking *behavior* as `panic-probe` but doesn't print a panic message
// this prevents the panic message being printed *twice* when `defmt::panic` is invoked
#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}
