//! Character LCD operations

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::command::{CLEAR_DISPLAY, RETURN_HOME, SET_CGRAM_ADDR, SET_DDRAM_ADDR};
use crate::config::{Geometry, MAX_ROWS};
use crate::error::Error;
use crate::interface::LcdInterface;
use crate::mode::{
    DisplayControl, EntryMode, Font, FunctionSet, Shift, ShiftDirection, ShiftTarget,
    TextDirection,
};
use crate::protocol::{Mode, Transaction, timing};

type LcdResult<T, I> = core::result::Result<T, Error<<I as LcdInterface>::Error>>;

/// Number of custom glyph slots in CGRAM
pub const GLYPH_SLOTS: u8 = 8;

/// Row patterns of one 5x8 custom glyph, top row first, low 5 bits used
pub type Glyph = [u8; 8];

/// HD44780 character LCD driver
///
/// Owns the bus and the delay, and caches the controller's mode registers so
/// that single flags can be toggled. Call [`Lcd::begin`] before anything
/// else.
pub struct Lcd<I, D> {
    /// Hardware interface
    interface: I,
    /// Blocking delay used for all protocol timing
    delay: D,
    /// Columns, lines and DDRAM row table
    geometry: Geometry,
    /// Cached function set register
    function: FunctionSet,
    /// Cached display control register
    control: DisplayControl,
    /// Cached entry mode register
    entry: EntryMode,
}

impl<I, D> Lcd<I, D>
where
    I: LcdInterface,
    D: DelayNs,
{
    /// Create a new Lcd instance
    ///
    /// Nothing is sent until [`Lcd::begin`].
    pub fn new(interface: I, delay: D) -> Self {
        Self {
            interface,
            delay,
            geometry: Geometry::default(),
            function: FunctionSet::default(),
            control: DisplayControl::INITIAL,
            entry: EntryMode::INITIAL,
        }
    }

    /// Give back the interface and the delay
    pub fn release(self) -> (I, D) {
        (self.interface, self.delay)
    }

    /// Open a transaction on the bus
    ///
    /// The returned guard borrows the driver mutably, so no other transfer
    /// can start until it is dropped. Raw transfers made through it bypass
    /// the cached mode registers.
    pub fn transaction(&mut self) -> Transaction<'_, I, D> {
        Transaction::new(&mut self.interface, &mut self.delay)
    }

    /// Initialise the controller
    ///
    /// Waits for the LCD supply to settle, forces 4-bit mode, then commits the
    /// function set, display on (no cursor, no blink), clears the display and
    /// sets left-to-right entry without autoscroll. The row table is reset to
    /// the default for `columns`.
    ///
    /// Safe to call again to re-initialise.
    ///
    /// # Arguments
    ///
    /// * `columns` - Characters per row
    /// * `lines` - Number of rows
    /// * `font` - Character height, 5x10 only applies to one-line displays
    pub fn begin(&mut self, columns: u8, lines: u8, font: Font) -> LcdResult<(), I> {
        debug!("Initialising {}x{} LCD, font {:?}", columns, lines, font);

        self.geometry = Geometry::new(columns, lines);
        self.function = FunctionSet::for_lines(lines, font);
        self.control = DisplayControl::INITIAL;
        self.entry = EntryMode::INITIAL;

        let function = self.function.command();
        let control = self.control.command();
        let entry = self.entry.command();

        let mut tx = self.transaction();
        tx.wait_us(timing::POWER_ON_US);
        tx.synchronize()?;
        tx.command(function)?;
        tx.command(control)?;
        tx.command(CLEAR_DISPLAY)?;
        tx.wait_us(timing::LONG_COMMAND_US);
        tx.command(entry)?;
        Ok(())
    }

    /// Override the DDRAM base address of each row
    ///
    /// For panels whose rows are not laid out as `0x00, 0x40, cols, 0x40 + cols`.
    /// Reset by [`Lcd::begin`].
    pub fn set_row_offsets(&mut self, offsets: [u8; MAX_ROWS]) {
        debug!("Row offsets: {:02x?}", offsets);
        self.geometry.row_offsets = offsets;
    }

    /// Send a raw command byte
    pub fn command(&mut self, value: u8) -> LcdResult<(), I> {
        self.transaction().command(value)
    }

    /// Write one byte to DDRAM or CGRAM at the current address
    ///
    /// Returns the number of bytes accepted, always 1.
    pub fn write_byte(&mut self, value: u8) -> LcdResult<usize, I> {
        self.transaction().data(value)?;
        Ok(1)
    }

    /// Write a sequence of bytes
    ///
    /// Returns the number of bytes written.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> LcdResult<usize, I> {
        let mut tx = self.transaction();
        for &byte in bytes {
            tx.data(byte)?;
        }
        Ok(bytes.len())
    }

    /// Write a string as raw bytes
    ///
    /// No character set translation: ASCII maps directly onto the HD44780
    /// ROM, other bytes show whatever glyph the ROM variant has there.
    pub fn print(&mut self, text: &str) -> LcdResult<usize, I> {
        self.write_bytes(text.as_bytes())
    }

    /// Clear the display and return the cursor home
    pub fn clear(&mut self) -> LcdResult<(), I> {
        self.long_command(CLEAR_DISPLAY)
    }

    /// Return the cursor home and undo any display shift
    pub fn home(&mut self) -> LcdResult<(), I> {
        self.long_command(RETURN_HOME)
    }

    /// Move the cursor
    ///
    /// Rows past the last one are clamped to the last row.
    pub fn set_cursor(&mut self, column: u8, row: u8) -> LcdResult<(), I> {
        let address = self.geometry.row_address(column, row);
        self.command(SET_DDRAM_ADDR | address)
    }

    /// Turn the display output on
    pub fn display_on(&mut self) -> LcdResult<(), I> {
        self.update_control(|c| c.display = true)
    }

    /// Turn the display output off, DDRAM is kept
    pub fn display_off(&mut self) -> LcdResult<(), I> {
        self.update_control(|c| c.display = false)
    }

    /// Show the underline cursor
    pub fn cursor_on(&mut self) -> LcdResult<(), I> {
        self.update_control(|c| c.cursor = true)
    }

    /// Hide the underline cursor
    pub fn cursor_off(&mut self) -> LcdResult<(), I> {
        self.update_control(|c| c.cursor = false)
    }

    /// Blink the block cursor
    pub fn blink_on(&mut self) -> LcdResult<(), I> {
        self.update_control(|c| c.blink = true)
    }

    /// Stop blinking the block cursor
    pub fn blink_off(&mut self) -> LcdResult<(), I> {
        self.update_control(|c| c.blink = false)
    }

    /// Shift the whole display one position left
    pub fn scroll_left(&mut self) -> LcdResult<(), I> {
        self.shift(ShiftTarget::Display, ShiftDirection::Left)
    }

    /// Shift the whole display one position right
    pub fn scroll_right(&mut self) -> LcdResult<(), I> {
        self.shift(ShiftTarget::Display, ShiftDirection::Right)
    }

    /// Move the cursor one position left without writing
    pub fn move_cursor_left(&mut self) -> LcdResult<(), I> {
        self.shift(ShiftTarget::Cursor, ShiftDirection::Left)
    }

    /// Move the cursor one position right without writing
    pub fn move_cursor_right(&mut self) -> LcdResult<(), I> {
        self.shift(ShiftTarget::Cursor, ShiftDirection::Right)
    }

    /// Text flows left to right
    pub fn left_to_right(&mut self) -> LcdResult<(), I> {
        self.update_entry(|e| e.direction = TextDirection::LeftToRight)
    }

    /// Text flows right to left
    pub fn right_to_left(&mut self) -> LcdResult<(), I> {
        self.update_entry(|e| e.direction = TextDirection::RightToLeft)
    }

    /// Shift the display on each write, keeping the cursor in place
    pub fn autoscroll_on(&mut self) -> LcdResult<(), I> {
        self.update_entry(|e| e.autoscroll = true)
    }

    /// Move the cursor on each write
    pub fn autoscroll_off(&mut self) -> LcdResult<(), I> {
        self.update_entry(|e| e.autoscroll = false)
    }

    /// Program one of the eight custom glyphs
    ///
    /// `slot` is masked to `0..8`, so slot 8 is slot 0 again. Afterwards the
    /// address counter points into CGRAM: call [`Lcd::set_cursor`] or
    /// [`Lcd::home`] before writing text. Print the glyph with
    /// `write_byte(slot)`.
    pub fn create_char(&mut self, slot: u8, glyph: &Glyph) -> LcdResult<(), I> {
        let slot = slot & (GLYPH_SLOTS - 1);
        let mut tx = self.transaction();
        tx.command(SET_CGRAM_ADDR | (slot << 3))?;
        for &row in glyph {
            tx.data(row)?;
        }
        Ok(())
    }

    /// Get the display geometry
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Get the cached function set register
    pub fn function_set(&self) -> FunctionSet {
        self.function
    }

    /// Get the cached display control register
    pub fn display_control(&self) -> DisplayControl {
        self.control
    }

    /// Get the cached entry mode register
    pub fn entry_mode(&self) -> EntryMode {
        self.entry
    }

    fn long_command(&mut self, value: u8) -> LcdResult<(), I> {
        let mut tx = self.transaction();
        tx.command(value)?;
        tx.wait_us(timing::LONG_COMMAND_US);
        Ok(())
    }

    fn shift(&mut self, target: ShiftTarget, direction: ShiftDirection) -> LcdResult<(), I> {
        self.command(Shift { target, direction }.command())
    }

    /// Apply a change to the cached control register, then send it in full
    fn update_control(&mut self, change: impl FnOnce(&mut DisplayControl)) -> LcdResult<(), I> {
        change(&mut self.control);
        let byte = self.control.command();
        self.transaction().send_byte(byte, Mode::Command)
    }

    /// Apply a change to the cached entry mode register, then send it in full
    fn update_entry(&mut self, change: impl FnOnce(&mut EntryMode)) -> LcdResult<(), I> {
        change(&mut self.entry);
        let byte = self.entry.command();
        self.transaction().send_byte(byte, Mode::Command)
    }
}
