#![no_std]
#![no_main]

use cortex_m::delay::Delay;
use cortex_m_rt::entry; // The runtime

use hal::{self, clocks::Clocks, i2c::I2c, pac};

use defmt_rtt as _;
// global logger
use panic_probe as _;

use rollbench_algo::ports::TextDisplay;
use rollbench_drivers::{display::Terminal, pinout};

/// Panel check: fills the text grid, then alternates the bottom row so a
/// stuck bus is obvious at a glance.
#[entry]
fn main() -> ! {
    // Set up CPU peripherals
    let cp = cortex_m::Peripherals::take().unwrap();
    // Set up microcontroller peripherals
    let dp = pac::Peripherals::take().unwrap();

    let clock_cfg = Clocks::default();
    clock_cfg.setup().unwrap();

    let mut delay = Delay::new(cp.SYST, clock_cfg.systick());

    pinout::panel::DISPLAY_SCL.init();
    pinout::panel::DISPLAY_SDA.init();
    let i2c = I2c::new(dp.I2C1, Default::default(), &clock_cfg);
    let mut panel = Terminal::new(i2c);

    panel.write(0, "display check");
    panel.write(1, "0123456789abcdef");
    panel.write(2, "row 2");
    panel.write(7, "row 7");
    panel.flush();

    defmt::info!("display check: grid drawn");

    let mut tock = false;
    loop {
        panel.write(5, if tock { "tock" } else { "tick" });
        panel.flush();
        tock = !tock;
        delay.delay_ms(500);
    }
}

// same panicking *behavior* as `panic-probe` but doesn't print a panic message
// this prevents the panic message being printed *twice* when `defmt::panic` is invoked
#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}
