//! Controller settle delays.
//!
//! Base values come from the HD44780 datasheet; [`with_margin`] widens them
//! uniformly to tolerate parts that settle slower than the datasheet
//! promises. Keeping the lookup and the margin separate lets each be
//! checked on its own.

use crate::commands;
use crate::queue::Token;

/// Settle after the power-on delay token and the first reset pattern.
pub const SETTLE_RESET_SLOW_US: u64 = 4_000;
/// Settle after the remaining reset patterns.
pub const SETTLE_RESET_US: u64 = 100;
/// Settle after a data-register write.
pub const SETTLE_WRITE_US: u64 = 41;
/// Settle after `CLEAR_DISPLAY` and `RETURN_HOME`.
pub const SETTLE_CLEAR_HOME_US: u64 = 1_520;
/// Settle after every other instruction. Also the fallback for opcodes the
/// encoder never produces: conservative rather than zero.
pub const SETTLE_CMD_US: u64 = 37;

/// Base settle delay for one executed token, in microseconds.
#[must_use]
pub const fn settle_delay(token: Token) -> u64 {
    match token {
        Token::InitDelay | Token::Init30Slow => SETTLE_RESET_SLOW_US,
        Token::Init30 | Token::Init20 => SETTLE_RESET_US,
        Token::Write(_) => SETTLE_WRITE_US,
        Token::Cmd(commands::CLEAR_DISPLAY | commands::RETURN_HOME) => SETTLE_CLEAR_HOME_US,
        Token::Cmd(_) => SETTLE_CMD_US,
    }
}

/// Apply the uniform safety margin: +12.5%, rounded up past zero.
#[must_use]
pub const fn with_margin(micros: u64) -> u64 {
    micros + micros / 8 + 1
}
