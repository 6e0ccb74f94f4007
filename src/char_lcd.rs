//! Queued command pipeline for HD44780-compatible character LCDs (e.g., 16x2, 20x2, 20x4).
//!
//! Every public operation enqueues primitive transactions and returns
//! immediately; [`CharLcd::poll`] executes at most one transaction per call
//! and reports the controller's settle time, so the hosting loop never
//! stalls on the LCD.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::bus::LcdBus;
use crate::clock::Clock;
use crate::commands;
use crate::queue::{Token, TokenQueue};
use crate::timing;
use crate::{Error, Result};

/// Queue bytes needed by `create_char`: one command plus eight data tokens.
const CREATE_CHAR_FOOTPRINT: usize = 18;
/// Row-offset table length; row requests beyond it clamp to the last entry.
const MAX_ROWS: usize = 4;

/// Character font selected at `begin` time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    #[default]
    Dots5x8,
    /// Taller font; only honored by single-row configurations.
    Dots5x10,
}

/// Outcome of one [`CharLcd::poll`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Poll {
    /// Queue drained; no further poll is needed until new work is enqueued.
    Idle,
    /// Microseconds to wait before the next poll can execute another
    /// transaction. Polling earlier is safe and re-reports the remainder.
    Wait(u64),
}

#[derive(Debug, Clone, Copy)]
enum State {
    Ready,
    WaitExecution { until: u64 },
}

/// A queued, poll-driven HD44780 driver.
///
/// `N` is the data-bus width (4 or 8, fixed by the [`LcdBus`]); `CAP` is
/// the transaction-queue capacity in bytes.
pub struct CharLcd<P, D, C, const N: usize, const CAP: usize = 64>
where
    P: OutputPin,
    D: DelayNs,
    C: Clock,
{
    bus: LcdBus<P, D, N>,
    clock: C,
    queue: TokenQueue<CAP>,
    state: State,
    display_function: u8,
    display_control: u8,
    display_mode: u8,
    num_rows: u8,
    row_offsets: [u8; MAX_ROWS],
}

impl<P, D, C, const N: usize, const CAP: usize> CharLcd<P, D, C, N, CAP>
where
    P: OutputPin,
    D: DelayNs,
    C: Clock,
{
    /// Take ownership of the bus; call [`begin`](Self::begin) before use.
    #[must_use]
    pub fn new(bus: LcdBus<P, D, N>, clock: C) -> Self {
        let display_function = if LcdBus::<P, D, N>::is_eight_bit() {
            commands::EIGHT_BIT_MODE
        } else {
            0
        };
        Self {
            bus,
            clock,
            queue: TokenQueue::new(),
            state: State::Ready,
            display_function,
            display_control: 0,
            display_mode: 0,
            num_rows: 1,
            row_offsets: [0x00, 0x40, 0x10, 0x50],
        }
    }

    /// (Re)configure for a `cols` x `rows` panel with the 5x8 font and
    /// install the power-on reset sequence.
    pub fn begin(&mut self, cols: u8, rows: u8) -> Result<()> {
        self.begin_with_font(cols, rows, Font::default())
    }

    /// Like [`begin`](Self::begin) with an explicit font choice.
    ///
    /// The controller's power-on state cannot be assumed (a host reset does
    /// not reset the LCD), so this clears the queue and replaces its
    /// contents wholesale with the documented reset dance; any in-flight
    /// operation is invalidated.
    pub fn begin_with_font(&mut self, cols: u8, rows: u8, font: Font) -> Result<()> {
        // bus width is fixed at construction; line count and font are
        // chosen per begin
        let mut function = self.display_function & commands::EIGHT_BIT_MODE;
        if rows > 1 {
            function |= commands::TWO_LINE;
        }
        // some single-row panels support a 10-pixel-high font
        if font == Font::Dots5x10 && rows == 1 {
            function |= commands::DOTS_5X10;
        }
        self.bus.rest();

        let control = commands::DISPLAY_ON;
        let mode = commands::ENTRY_LEFT;

        // 4 or 5 operand-less reset tokens plus 4 two-byte commands
        let footprint = if LcdBus::<P, D, N>::is_eight_bit() { 12 } else { 13 };

        critical_section::with(|_| {
            self.queue.clear();
            if self.queue.free() < footprint {
                return Err(Error::QueueFull);
            }
            self.queue.push(Token::InitDelay)?;
            self.queue.push(Token::Init30Slow)?;
            self.queue.push(Token::Init30)?;
            self.queue.push(Token::Init30)?;
            if !LcdBus::<P, D, N>::is_eight_bit() {
                self.queue.push(Token::Init20)?;
            }
            // set bus width, line count, font
            self.queue.push(Token::Cmd(commands::FUNCTION_SET | function))?;
            // display on, cursor off, blink off
            self.queue.push(Token::Cmd(commands::DISPLAY_CONTROL | control))?;
            self.queue.push(Token::Cmd(commands::CLEAR_DISPLAY))?;
            // left-to-right, no shift
            self.queue.push(Token::Cmd(commands::ENTRY_MODE_SET | mode))?;
            Ok(())
        })?;

        #[cfg(feature = "defmt")]
        defmt::debug!("reset sequence installed for {=u8}x{=u8} panel", cols, rows);

        // mirrors commit only once the whole sequence is queued
        self.display_function = function;
        self.display_control = control;
        self.display_mode = mode;
        self.num_rows = rows;
        self.row_offsets = [0x00, 0x40, cols, 0x40_u8.wrapping_add(cols)];
        Ok(())
    }

    /// Override the DDRAM base address of each row, for nonstandard glass.
    pub fn set_row_offsets(&mut self, offsets: [u8; MAX_ROWS]) {
        self.row_offsets = offsets;
    }

    /// Clear the display and reset the cursor position to zero.
    pub fn clear(&mut self) -> Result<()> {
        self.command(commands::CLEAR_DISPLAY)
    }

    /// Reset cursor position and display shift to the origin.
    pub fn home(&mut self) -> Result<()> {
        self.command(commands::RETURN_HOME)
    }

    /// Move the cursor to `col` on `row`; rows past the configured count
    /// clamp to the last valid row.
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<()> {
        let mut row = row.min(MAX_ROWS as u8 - 1);
        if row >= self.num_rows {
            row = self.num_rows.saturating_sub(1);
        }
        let offset = self.row_offsets[row as usize];
        self.command(commands::SET_DDRAM_ADDR | col.wrapping_add(offset))
    }

    /// Turn the display output on.
    pub fn display_on(&mut self) -> Result<()> {
        self.set_display_control(self.display_control | commands::DISPLAY_ON)
    }

    /// Turn the display output off (quickly; DDRAM is untouched).
    pub fn display_off(&mut self) -> Result<()> {
        self.set_display_control(self.display_control & !commands::DISPLAY_ON)
    }

    /// Show the underline cursor.
    pub fn cursor_on(&mut self) -> Result<()> {
        self.set_display_control(self.display_control | commands::CURSOR_ON)
    }

    /// Hide the underline cursor.
    pub fn cursor_off(&mut self) -> Result<()> {
        self.set_display_control(self.display_control & !commands::CURSOR_ON)
    }

    /// Blink the character cell at the cursor.
    pub fn blink_on(&mut self) -> Result<()> {
        self.set_display_control(self.display_control | commands::BLINK_ON)
    }

    /// Stop blinking the cursor cell.
    pub fn blink_off(&mut self) -> Result<()> {
        self.set_display_control(self.display_control & !commands::BLINK_ON)
    }

    /// Scroll the display window left without changing DDRAM.
    pub fn scroll_left(&mut self) -> Result<()> {
        self.command(commands::CURSOR_SHIFT | commands::DISPLAY_MOVE)
    }

    /// Scroll the display window right without changing DDRAM.
    pub fn scroll_right(&mut self) -> Result<()> {
        self.command(commands::CURSOR_SHIFT | commands::DISPLAY_MOVE | commands::MOVE_RIGHT)
    }

    /// Text flows left to right from the cursor.
    pub fn left_to_right(&mut self) -> Result<()> {
        self.set_display_mode(self.display_mode | commands::ENTRY_LEFT)
    }

    /// Text flows right to left from the cursor.
    pub fn right_to_left(&mut self) -> Result<()> {
        self.set_display_mode(self.display_mode & !commands::ENTRY_LEFT)
    }

    /// Shift the display on every write, right-justifying from the cursor.
    pub fn autoscroll_on(&mut self) -> Result<()> {
        self.set_display_mode(self.display_mode | commands::ENTRY_SHIFT_INCREMENT)
    }

    /// Stop shifting the display on writes.
    pub fn autoscroll_off(&mut self) -> Result<()> {
        self.set_display_mode(self.display_mode & !commands::ENTRY_SHIFT_INCREMENT)
    }

    /// Fill one of the eight CGRAM glyph slots (rows top to bottom, low 5
    /// bits of each byte). Enqueues all nine transactions or none.
    pub fn create_char(&mut self, slot: u8, bitmap: [u8; 8]) -> Result<()> {
        let slot = slot & 0x7; // we only have 8 slots, 0-7
        critical_section::with(|_| {
            if self.queue.free() < CREATE_CHAR_FOOTPRINT {
                return Err(Error::QueueFull);
            }
            self.queue
                .push(Token::Cmd(commands::SET_CGRAM_ADDR | (slot << 3)))?;
            for byte in bitmap {
                self.queue.push(Token::Write(byte))?;
            }
            Ok(())
        })
    }

    /// Enqueue a raw instruction-register write.
    pub fn command(&mut self, opcode: u8) -> Result<()> {
        critical_section::with(|_| self.queue.push(Token::Cmd(opcode)))
    }

    /// Accept one byte for the data register, returning how many were taken
    /// (0 under backpressure, 1 otherwise); nothing is dropped silently.
    pub fn write(&mut self, byte: u8) -> usize {
        match critical_section::with(|_| self.queue.push(Token::Write(byte))) {
            Ok(()) => 1,
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("transaction queue full, byte not accepted");
                0
            }
        }
    }

    /// Write bytes until the queue pushes back; returns how many were
    /// accepted.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        let mut accepted = 0;
        for &byte in bytes {
            if self.write(byte) == 0 {
                break;
            }
            accepted += 1;
        }
        accepted
    }

    /// Write a string's bytes until the queue pushes back; returns how many
    /// were accepted.
    pub fn write_str(&mut self, text: &str) -> usize {
        self.write_bytes(text.as_bytes())
    }

    /// Execute at most one queued transaction.
    ///
    /// Returns [`Poll::Wait`] with the microseconds to wait before the next
    /// call can execute, or [`Poll::Idle`] once the queue has drained.
    /// Polling earlier than the hint is safe (the remaining wait is
    /// re-reported); polling later only delays subsequent updates.
    pub fn poll(&mut self) -> Poll {
        let now = self.clock.now_micros();
        if let State::WaitExecution { until } = self.state {
            let remaining = until.saturating_sub(now);
            if remaining > 0 {
                return Poll::Wait(remaining);
            }
            self.state = State::Ready;
        }
        // Producers may run from interrupt context; only the dequeue itself
        // needs them held off.
        let Some(token) = critical_section::with(|_| self.queue.pop()) else {
            return Poll::Idle;
        };
        let settle = timing::with_margin(self.execute(token));
        self.state = State::WaitExecution { until: now + settle };
        Poll::Wait(settle)
    }

    /// Block until the queue has fully drained.
    ///
    /// Degrades the pipeline to the classic synchronous driver by
    /// re-polling until [`Poll::Idle`].
    pub fn flush(&mut self) {
        while !matches!(self.poll(), Poll::Idle) {}
    }

    /// Drive one token onto the bus and return its base settle delay.
    fn execute(&mut self, token: Token) -> u64 {
        match token {
            // the power-on settle must precede any signaling
            Token::InitDelay => {}
            Token::Init30Slow | Token::Init30 => {
                self.bus.select_register(false);
                self.bus.write_reset_pattern(0x30);
            }
            Token::Init20 => {
                self.bus.select_register(false);
                self.bus.write_reset_pattern(0x20);
            }
            Token::Cmd(opcode) => {
                self.bus.select_register(false);
                self.bus.write_value(opcode);
            }
            Token::Write(byte) => {
                self.bus.select_register(true);
                self.bus.write_value(byte);
            }
        }
        timing::settle_delay(token)
    }

    fn set_display_control(&mut self, control: u8) -> Result<()> {
        self.command(commands::DISPLAY_CONTROL | control)?;
        self.display_control = control;
        Ok(())
    }

    fn set_display_mode(&mut self, mode: u8) -> Result<()> {
        self.command(commands::ENTRY_MODE_SET | mode)?;
        self.display_mode = mode;
        Ok(())
    }
}
