//! SSD1306 panel in terminal mode behind the `TextDisplay` capability.
//!
//! Terminal mode gives the 8-row by 16-column character grid the control
//! core writes to; nothing above this module knows about pixels.

use core::fmt::Write;

use hal::{i2c::I2c, pac::I2C1};
use ssd1306::{mode::TerminalMode, prelude::*, I2CDisplayInterface, Ssd1306};

use rollbench_algo::ports::{TextDisplay, DISPLAY_COLS};

pub struct Terminal {
    panel: Ssd1306<I2CInterface<I2c<I2C1>>, DisplaySize128x64, TerminalMode>,
}

impl Terminal {
    pub fn new(i2c: I2c<I2C1>) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let mut panel = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_terminal_mode();
        let _ = panel.init();
        let _ = panel.clear();
        Terminal { panel }
    }
}

impl TextDisplay for Terminal {
    fn write(&mut self, row: u8, text: &str) {
        let _ = self.panel.set_position(0, row);
        let _ = self.panel.write_str(text);
        // pad out the row so stale characters never survive a rewrite
        let mut col = text.len() as u8;
        while col < DISPLAY_COLS {
            let _ = self.panel.write_str(" ");
            col += 1;
        }
    }

    fn clear(&mut self) {
        let _ = self.panel.clear();
    }

    fn flush(&mut self) {
        // terminal mode pushes every character as it is written
    }
}
