//! Non-blocking driver for HD44780-compatible character LCDs.
//!
//! High-level operations (clear, cursor moves, character output, custom
//! glyphs) are decomposed into primitive bus transactions and buffered in a
//! bounded queue. [`CharLcd::poll`] executes at most one transaction per
//! call and returns how long the controller needs before the next one, so a
//! cooperative loop can interleave LCD updates with other work instead of
//! busy-waiting out the chip's settle times.
#![no_std]

mod bus;
mod char_lcd;
mod clock;
pub mod commands;
mod error;
mod output_array;
mod queue;
pub mod timing;

// Re-export commonly used items
pub use bus::LcdBus;
pub use char_lcd::{CharLcd, Font, Poll};
pub use clock::Clock;
#[cfg(feature = "embassy-time")]
pub use clock::EmbassyClock;
pub use error::{Error, Result};
pub use output_array::OutputArray;
pub use queue::{Token, TokenQueue};
