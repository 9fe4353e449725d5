#![no_main]
#![no_std]

use defmt_rtt as _;
use panic_probe as _;

use hal::{
    self,
    clocks::Clocks,
    gpio::{Edge, Pull},
    i2c::I2c,
    pac,
    timer::{Timer, TimerInterrupt},
};

use rtic_monotonics::systick::prelude::*;

use rollbench_algo::{Bench, ButtonId, FrequencyChoice, InputLatches};
use rollbench_drivers::{
    display::Terminal, motor::MotorPwm, pinout, relay::TrackRelay, throttle::Throttle,
};

use cortex_m;

// 1 kHz systick gives the millisecond timebase the control core runs on
systick_monotonic!(Mono, 1_000);

/// Control-loop rate driving the bench state machine.
const TICK_RATE_HZ: f32 = 1_000.0;

fn now_ms() -> u32 {
    Mono::now().ticks() as u32
}

#[rtic::app(device = pac, peripherals = true)]
mod app {
    use super::*;

    #[shared]
    struct Shared {
        // written by the button edge interrupts, read-and-cleared by the
        // control tick; the lock covers the multi-word latch state
        inputs: InputLatches,
    }

    #[local]
    struct Local {
        bench: Bench<Terminal, MotorPwm, TrackRelay>,
        throttle: Throttle,
        tick_timer: Timer<pac::TIM3>,
    }

    #[init]
    fn init(cx: init::Context) -> (Shared, Local) {
        let dp = cx.device;
        let clock_cfg = Clocks::default();
        clock_cfg.setup().unwrap();

        Mono::start(cx.core.SYST, clock_cfg.sysclk());

        defmt::debug!(
            "SYSTEM: Clock frequency is {} MHz",
            clock_cfg.sysclk() / 1_000_000
        );

        init_button_pins();

        // Display bus and panel
        pinout::panel::DISPLAY_SCL.init();
        pinout::panel::DISPLAY_SDA.init();
        let i2c = I2c::new(dp.I2C1, Default::default(), &clock_cfg);
        let display = Terminal::new(i2c);

        // Motor bridge at the boot-default carrier preset
        let mut motor = MotorPwm::new(dp.TIM2, &clock_cfg, FrequencyChoice::DEFAULT);
        motor.begin();

        let relay = TrackRelay::new();
        let throttle = Throttle::new(dp.ADC1, &clock_cfg);

        let bench = Bench::new(display, motor, relay, now_ms());

        // Control tick driving the bench state machine
        let mut tick_timer = Timer::new_tim3(dp.TIM3, TICK_RATE_HZ, Default::default(), &clock_cfg);
        tick_timer.enable_interrupt(TimerInterrupt::Update);
        tick_timer.enable();

        (
            Shared {
                inputs: InputLatches::new(),
            },
            Local {
                bench,
                throttle,
                tick_timer,
            },
        )
    }

    fn init_button_pins() {
        let mut btn_select = pinout::panel::BTN_SELECT.init();
        btn_select.pull(Pull::Up);
        btn_select.enable_interrupt(Edge::Falling);

        let mut btn_confirm = pinout::panel::BTN_CONFIRM.init();
        btn_confirm.pull(Pull::Up);
        btn_confirm.enable_interrupt(Edge::Falling);
    }

    #[idle]
    fn idle(_cx: idle::Context) -> ! {
        loop {
            cortex_m::asm::wfi();
        }
    }

    #[task(binds = TIM3, local = [bench, throttle, tick_timer], shared = [inputs])]
    fn control_tick(mut cx: control_tick::Context) {
        cx.local.tick_timer.clear_interrupt(TimerInterrupt::Update);

        let now = now_ms();
        let raw = cx.local.throttle.sample();
        let bench = cx.local.bench;
        cx.shared.inputs.lock(|inputs| bench.tick(now, raw, inputs));
    }

    #[task(binds = EXTI15_10, shared = [inputs])]
    fn select_pressed(mut cx: select_pressed::Context) {
        hal::gpio::clear_exti_interrupt(15);
        let now = now_ms();
        cx.shared
            .inputs
            .lock(|inputs| inputs.on_edge(ButtonId::Select, now));
    }

    #[task(binds = EXTI3, shared = [inputs])]
    fn confirm_pressed(mut cx: confirm_pressed::Context) {
        hal::gpio::clear_exti_interrupt(3);
        let now = now_ms();
        cx.shared
            .inputs
            .lock(|inputs| inputs.on_edge(ButtonId::Confirm, now));
    }
}

// same panicking *behavior* as `panic-probe` but doesn't print a panic message
// this prevents the panic message being printed *twice* when `defmt::panic` is invoked
#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}
