//! Physical parallel-bus layer: register select, Enable strobe, and data
//! presentation for 4-bit and 8-bit wiring.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::output_array::OutputArray;

/// Pins and pulse-delay primitive for one HD44780 bus.
///
/// `N` is the number of wired data lines and fixes the transfer width at
/// compile time: 4 (`D4..D7`) or 8 (`D0..D7`). The RW pin is optional;
/// when wired it is held low, selecting write mode.
pub struct LcdBus<P: OutputPin, D: DelayNs, const N: usize> {
    rs: P,
    rw: Option<P>,
    enable: P,
    data: OutputArray<P, N>,
    delay: D,
}

impl<P: OutputPin, D: DelayNs, const N: usize> LcdBus<P, D, N> {
    pub fn new(rs: P, rw: Option<P>, enable: P, data: [P; N], delay: D) -> Self {
        const {
            assert!(N == 4 || N == 8, "HD44780 buses are 4 or 8 data lines wide");
        }
        Self {
            rs,
            rw,
            enable,
            data: OutputArray::new(data),
            delay,
        }
    }

    pub(crate) const fn is_eight_bit() -> bool {
        N == 8
    }

    /// Drive RW (when wired) and Enable to their resting low levels.
    pub(crate) fn rest(&mut self) {
        if let Some(rw) = self.rw.as_mut() {
            let _ = rw.set_low();
        }
        let _ = self.enable.set_low();
    }

    /// Select the instruction (`false`) or data (`true`) register.
    pub(crate) fn select_register(&mut self, data: bool) {
        let _ = if data {
            self.rs.set_high()
        } else {
            self.rs.set_low()
        };
        if let Some(rw) = self.rw.as_mut() {
            let _ = rw.set_low();
        }
    }

    /// Strobe Enable to latch the presented bits into the controller.
    ///
    /// Both holds must exceed 450 ns.
    fn pulse_enable(&mut self) {
        let _ = self.enable.set_low();
        self.delay.delay_us(1);
        let _ = self.enable.set_high();
        self.delay.delay_us(1);
        let _ = self.enable.set_low();
    }

    /// Present one full value: a single strobe on 8 data lines, high then
    /// low nibble on 4.
    pub(crate) fn write_value(&mut self, value: u8) {
        if Self::is_eight_bit() {
            self.data.set_from_bits(value);
            self.pulse_enable();
        } else {
            self.data.set_from_bits(value >> 4);
            self.pulse_enable();
            self.data.set_from_bits(value & 0x0F);
            self.pulse_enable();
        }
    }

    /// Present a reset pattern as one strobe regardless of bus width; only
    /// the pattern's high nibble reaches the top data lines.
    pub(crate) fn write_reset_pattern(&mut self, value: u8) {
        if Self::is_eight_bit() {
            self.data.set_from_bits(value);
        } else {
            self.data.set_from_bits(value >> 4);
        }
        self.pulse_enable();
    }
}
