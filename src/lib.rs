//! HD44780 Character LCD Driver over a 74HC595 Shift Register
//!
//! A driver for HD44780-compatible character LCDs whose data and control lines
//! are wired to the parallel outputs of a 74HC595, so the whole display takes
//! only three GPIO pins.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - 4-bit bus emulation over the shift register, with configurable output
//!   assignment for RS, EN and D4..D7
//! - Power-on synchronisation that recovers the controller from any state
//! - Cursor, blink, scroll, text direction and autoscroll control
//! - Eight programmable custom glyphs
//! - `core::fmt::Write` and `embedded-io` (with `io` feature) byte sinks
//!
//! ## Wiring
//!
//! ```text
//!  LCD              74HC595                 MCU
//!                   STCP (12) ------------- latch
//!                   SHCP (11) ------------- clock
//!                   DS   (14) ------------- data
//!  D4..D7 --------- Q3..Q6
//!  RS     --------- Q1
//!  EN     --------- Q2
//!  RW, VSS -------- GND, /OE
//!  VDD ------------ VCC, /MR
//! ```
//!
//! The output assignment above is [`BitLayout::default`]; other wirings are
//! described with [`Builder`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use lcd595::{BitLayout, Font, Lcd, ShiftRegister};
//!
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let data = MockPin;
//! # let clock = MockPin;
//! # let latch = MockPin;
//! # let delay = MockDelay;
//! let interface = ShiftRegister::new(data, clock, latch, BitLayout::default());
//! let mut lcd = Lcd::new(interface, delay);
//!
//! if lcd.begin(16, 2, Font::Dots5x8).is_err() {
//!     return;
//! }
//! let _ = lcd.print("hello");
//! let _ = lcd.set_cursor(0, 1);
//! let _ = lcd.print("world");
//! let _ = lcd.blink_on();
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// HD44780 command definitions
pub mod command;
/// Bit layout, geometry and builder
pub mod config;
/// Character LCD operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Byte-sink trait implementations
pub mod io;
/// Display mode flag groups
pub mod mode;
/// 4-bit bus protocol and timing
pub mod protocol;

pub use config::{
    BitLayout, Builder, DEFAULT_DATA_BIT, DEFAULT_EN_BIT, DEFAULT_RS_BIT, Geometry, MAX_ROWS,
};
pub use display::{GLYPH_SLOTS, Glyph, Lcd};
pub use error::{BitRole, BuilderError, Error};
pub use interface::{InterfaceError, LcdInterface, ShiftRegister};
pub use mode::{
    DisplayControl, EntryMode, Font, FunctionSet, Lines, Shift, ShiftDirection, ShiftTarget,
    TextDirection,
};
pub use protocol::{Mode, Transaction};
