//! HD44780 command definitions
//!
//! This module defines the instruction opcodes and flag bits understood by the
//! HD44780 character LCD controller. Every instruction is a single byte sent
//! with RS low; in 4-bit mode it travels as two nibbles, high nibble first.
//!
//! ## Command Structure
//!
//! The opcode is the highest set bit of the byte. The bits below it are flags
//! belonging to that instruction:
//!
//! | Opcode | Instruction         | Flag bits              |
//! |--------|---------------------|------------------------|
//! | `0x01` | Clear display       | -                      |
//! | `0x02` | Return home         | -                      |
//! | `0x04` | Entry mode set      | I/D, S                 |
//! | `0x08` | Display control     | D, C, B                |
//! | `0x10` | Cursor/display shift| S/C, R/L               |
//! | `0x20` | Function set        | DL, N, F               |
//! | `0x40` | Set CGRAM address   | 6-bit address          |
//! | `0x80` | Set DDRAM address   | 7-bit address          |
//!
//! ## Example
//!
//! ```
//! use lcd595::command;
//!
//! // Display on, cursor on, no blink
//! let byte = command::DISPLAY_CONTROL | command::DISPLAY_ON | command::CURSOR_ON;
//! assert_eq!(byte, 0x0E);
//! ```

// Instructions

/// Clear display command (0x01)
///
/// Writes spaces to all of DDRAM and returns the cursor home. Long running,
/// see [`crate::protocol::timing::LONG_COMMAND_US`].
pub const CLEAR_DISPLAY: u8 = 0x01;

/// Return home command (0x02)
///
/// Resets the address counter and undoes any display shift. Long running.
pub const RETURN_HOME: u8 = 0x02;

/// Entry mode set command (0x04)
///
/// Combine with [`ENTRY_LEFT`] and [`ENTRY_SHIFT_INCREMENT`].
pub const ENTRY_MODE_SET: u8 = 0x04;

/// Display on/off control command (0x08)
///
/// Combine with [`DISPLAY_ON`], [`CURSOR_ON`] and [`BLINK_ON`].
pub const DISPLAY_CONTROL: u8 = 0x08;

/// Cursor or display shift command (0x10)
///
/// Combine with [`DISPLAY_MOVE`] and [`MOVE_RIGHT`].
pub const CURSOR_SHIFT: u8 = 0x10;

/// Function set command (0x20)
///
/// Combine with [`EIGHT_BIT_MODE`], [`TWO_LINE`] and [`FONT_5X10`].
pub const FUNCTION_SET: u8 = 0x20;

/// Set CGRAM address command (0x40)
///
/// Lower 6 bits select the byte in character generator RAM. Glyph slot `n`
/// starts at `n << 3`.
pub const SET_CGRAM_ADDR: u8 = 0x40;

/// Set DDRAM address command (0x80)
///
/// Lower 7 bits select the character position in display data RAM.
pub const SET_DDRAM_ADDR: u8 = 0x80;

// Entry mode flags

/// Text flows left to right (I/D = 1, address increments)
pub const ENTRY_LEFT: u8 = 0x02;
/// Shift the display on each write (S = 1)
pub const ENTRY_SHIFT_INCREMENT: u8 = 0x01;

// Display control flags

/// Display on (D = 1)
pub const DISPLAY_ON: u8 = 0x04;
/// Underline cursor on (C = 1)
pub const CURSOR_ON: u8 = 0x02;
/// Blinking block cursor on (B = 1)
pub const BLINK_ON: u8 = 0x01;

// Cursor/display shift flags

/// Shift the whole display instead of the cursor (S/C = 1)
pub const DISPLAY_MOVE: u8 = 0x08;
/// Shift to the right (R/L = 1)
pub const MOVE_RIGHT: u8 = 0x04;

// Function set flags

/// 8-bit interface (DL = 1)
///
/// Never set by this driver: the shift register only carries a nibble.
pub const EIGHT_BIT_MODE: u8 = 0x10;
/// Two display lines (N = 1)
pub const TWO_LINE: u8 = 0x08;
/// 5x10 dot font (F = 1), only valid with one display line
pub const FONT_5X10: u8 = 0x04;

// Initialisation nibbles

/// Nibble sent three times to force 8-bit mode from an unknown state
pub const SYNC_NIBBLE: u8 = 0x03;

/// Nibble that switches the controller into 4-bit mode
pub const FOUR_BIT_NIBBLE: u8 = 0x02;
