//! HD44780 instruction opcodes and flag masks.

/// Clear the entire display and reset the DDRAM address.
pub const CLEAR_DISPLAY: u8 = 0x01;
/// Return cursor and display shift to the origin.
pub const RETURN_HOME: u8 = 0x02;
pub const ENTRY_MODE_SET: u8 = 0x04;
pub const DISPLAY_CONTROL: u8 = 0x08;
pub const CURSOR_SHIFT: u8 = 0x10;
pub const FUNCTION_SET: u8 = 0x20;
pub const SET_CGRAM_ADDR: u8 = 0x40;
pub const SET_DDRAM_ADDR: u8 = 0x80;

// Entry-mode flags
pub const ENTRY_LEFT: u8 = 0x02;
pub const ENTRY_SHIFT_INCREMENT: u8 = 0x01;

// Display-control flags
pub const DISPLAY_ON: u8 = 0x04;
pub const CURSOR_ON: u8 = 0x02;
pub const BLINK_ON: u8 = 0x01;

// Cursor/display-shift flags
pub const DISPLAY_MOVE: u8 = 0x08;
pub const MOVE_RIGHT: u8 = 0x04;

// Function-set flags
pub const EIGHT_BIT_MODE: u8 = 0x10;
pub const TWO_LINE: u8 = 0x08;
pub const DOTS_5X10: u8 = 0x04;
