//! Display mode flag groups
//!
//! The HD44780 keeps its configuration in three independent registers: the
//! function set, the display on/off control and the entry mode. Each one is
//! written as a single command byte made of an opcode and flag bits, and there
//! is no way to change one flag without resending the whole byte.
//!
//! Each group is modelled here as a small struct of named fields with a pure
//! `command()` that composes the byte. The driver caches these structs and
//! resends them in full whenever one field changes.
//!
//! ## Example
//!
//! ```
//! use lcd595::{DisplayControl, EntryMode, TextDirection};
//!
//! let control = DisplayControl { display: true, cursor: false, blink: true };
//! assert_eq!(control.command(), 0x0D);
//!
//! let entry = EntryMode { direction: TextDirection::RightToLeft, autoscroll: false };
//! assert_eq!(entry.command(), 0x04);
//! ```

use crate::command::{
    BLINK_ON, CURSOR_ON, CURSOR_SHIFT, DISPLAY_CONTROL, DISPLAY_MOVE, DISPLAY_ON, ENTRY_LEFT,
    ENTRY_MODE_SET, ENTRY_SHIFT_INCREMENT, FONT_5X10, FUNCTION_SET, MOVE_RIGHT, TWO_LINE,
};

/// Number of display lines as seen by the controller
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Lines {
    /// Single line (N = 0)
    #[default]
    One,
    /// Two lines (N = 1); four-line panels also run in this mode
    Two,
}

/// Character font height
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Font {
    /// 5x8 dots
    #[default]
    Dots5x8,
    /// 5x10 dots, only available on single-line displays
    Dots5x10,
}

/// Function set register
///
/// The interface width is fixed to 4 bits because the shift register only
/// carries a nibble, so the DL bit is never set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FunctionSet {
    /// Line mode
    pub lines: Lines,
    /// Font height
    pub font: Font,
}

impl FunctionSet {
    /// Derive the function set for a requested line count and font
    ///
    /// Any count above one selects two-line mode. The 5x10 font is dropped
    /// when more than one line is requested, since the controller cannot
    /// combine them.
    ///
    /// ```
    /// use lcd595::{Font, FunctionSet, Lines};
    ///
    /// let f = FunctionSet::for_lines(4, Font::Dots5x10);
    /// assert_eq!(f.lines, Lines::Two);
    /// assert_eq!(f.font, Font::Dots5x8);
    /// ```
    pub fn for_lines(lines: u8, font: Font) -> Self {
        let lines = if lines > 1 { Lines::Two } else { Lines::One };
        let font = match (font, lines) {
            (Font::Dots5x10, Lines::One) => Font::Dots5x10,
            _ => Font::Dots5x8,
        };
        Self { lines, font }
    }

    /// Compose the function set command byte
    pub fn command(&self) -> u8 {
        let mut byte = FUNCTION_SET;
        if self.lines == Lines::Two {
            byte |= TWO_LINE;
        }
        if self.font == Font::Dots5x10 {
            byte |= FONT_5X10;
        }
        byte
    }
}

/// Display on/off control register
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DisplayControl {
    /// Display output enabled
    pub display: bool,
    /// Underline cursor visible
    pub cursor: bool,
    /// Blinking block cursor
    pub blink: bool,
}

impl DisplayControl {
    /// State committed by initialisation: display on, no cursor, no blink
    pub const INITIAL: Self = Self {
        display: true,
        cursor: false,
        blink: false,
    };

    /// Compose the display control command byte
    pub fn command(&self) -> u8 {
        let mut byte = DISPLAY_CONTROL;
        if self.display {
            byte |= DISPLAY_ON;
        }
        if self.cursor {
            byte |= CURSOR_ON;
        }
        if self.blink {
            byte |= BLINK_ON;
        }
        byte
    }
}

/// Direction text flows in after each write
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TextDirection {
    /// Address counter increments
    #[default]
    LeftToRight,
    /// Address counter decrements
    RightToLeft,
}

/// Entry mode register
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntryMode {
    /// Text direction (I/D bit)
    pub direction: TextDirection,
    /// Shift the display on each write instead of moving the cursor (S bit)
    pub autoscroll: bool,
}

impl EntryMode {
    /// State committed by initialisation: left to right, no autoscroll
    pub const INITIAL: Self = Self {
        direction: TextDirection::LeftToRight,
        autoscroll: false,
    };

    /// Compose the entry mode command byte
    pub fn command(&self) -> u8 {
        let mut byte = ENTRY_MODE_SET;
        if self.direction == TextDirection::LeftToRight {
            byte |= ENTRY_LEFT;
        }
        if self.autoscroll {
            byte |= ENTRY_SHIFT_INCREMENT;
        }
        byte
    }
}

impl Default for EntryMode {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// What a shift command moves
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShiftTarget {
    /// Move the cursor only
    Cursor,
    /// Move the whole display, DDRAM contents are untouched
    Display,
}

/// Direction of a shift command
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShiftDirection {
    /// Towards lower addresses
    Left,
    /// Towards higher addresses
    Right,
}

/// Cursor or display shift command
///
/// Stateless: the controller does not remember it, so nothing is cached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shift {
    /// Cursor or display
    pub target: ShiftTarget,
    /// Left or right
    pub direction: ShiftDirection,
}

impl Shift {
    /// Compose the shift command byte
    pub fn command(&self) -> u8 {
        let mut byte = CURSOR_SHIFT;
        if self.target == ShiftTarget::Display {
            byte |= DISPLAY_MOVE;
        }
        if self.direction == ShiftDirection::Right {
            byte |= MOVE_RIGHT;
        }
        byte
    }
}
