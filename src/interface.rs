//! Hardware interface abstraction
//!
//! This module provides the [`LcdInterface`] trait and the [`ShiftRegister`]
//! struct that drives the LCD bus through a 74HC595.
//!
//! ## Hardware Requirements
//!
//! Three GPIO outputs:
//! - **DS**: serial data into the shift register
//! - **SHCP**: shift clock, one rising edge per bit
//! - **STCP**: latch (storage register) clock, copies the shifted byte to
//!   the parallel outputs on its rising edge
//!
//! The LCD's RS, EN and D4..D7 lines hang off the parallel outputs as
//! described by a [`BitLayout`]. R/W is tied to ground.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::digital::OutputPin;
//! use lcd595::{BitLayout, LcdInterface, ShiftRegister};
//! # use core::convert::Infallible;
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! let mut interface = ShiftRegister::new(MockPin, MockPin, MockPin, BitLayout::default());
//!
//! // Present nibble 0x3 in command mode with EN high
//! let _ = interface.emit(false, true, 0x3);
//! ```

use core::fmt::Debug;
use embedded_hal::digital::OutputPin;
use log::trace;

use crate::config::BitLayout;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Trait for the parallel-equivalent LCD bus
///
/// One call presents a complete bus state (RS, EN and four data lines) to
/// the controller. The protocol engine builds enable pulses out of three
/// consecutive calls.
///
/// ## Implementing
///
/// For most cases, use the provided [`ShiftRegister`]. Implement this trait
/// yourself for other port expanders or for direct GPIO wiring.
pub trait LcdInterface {
    /// Error type for interface operations
    type Error: Debug;

    /// Present one bus state to the LCD
    ///
    /// The implementation must change all six lines at once, or at least
    /// never let EN rise before RS and data are stable.
    ///
    /// # Arguments
    ///
    /// * `register_select` - RS level (false = command, true = data)
    /// * `enable` - EN level
    /// * `nibble` - D4..D7, only the low four bits are used
    fn emit(
        &mut self,
        register_select: bool,
        enable: bool,
        nibble: u8,
    ) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Tells which of the three transport lines failed.
#[derive(Debug)]
pub enum InterfaceError<PinErr> {
    /// Serial data pin error
    Data(PinErr),
    /// Shift clock pin error
    ShiftClock(PinErr),
    /// Latch clock pin error
    LatchClock(PinErr),
}

impl<PinErr: Debug> core::fmt::Display for InterfaceError<PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Data(e) => write!(f, "Data pin error: {e:?}"),
            Self::ShiftClock(e) => write!(f, "Shift clock pin error: {e:?}"),
            Self::LatchClock(e) => write!(f, "Latch clock pin error: {e:?}"),
        }
    }
}

impl<PinErr: Debug> core::error::Error for InterfaceError<PinErr> {}

/// 74HC595 interface implementation
///
/// Implements [`LcdInterface`] for three embedded-hal v1.0 output pins.
///
/// ## Type Parameters
///
/// * `DS` - Serial data pin implementing [`OutputPin`]
/// * `SHCP` - Shift clock pin implementing [`OutputPin`]
/// * `STCP` - Latch clock pin implementing [`OutputPin`]
///
/// The shift clock is expected to idle low.
pub struct ShiftRegister<DS, SHCP, STCP> {
    /// Serial data input (DS)
    data: DS,
    /// Shift register clock (SHCP)
    shift_clock: SHCP,
    /// Storage register clock (STCP)
    latch_clock: STCP,
    /// Where RS, EN and the data nibble sit in the shifted byte
    layout: BitLayout,
}

impl<DS, SHCP, STCP, PinErr> ShiftRegister<DS, SHCP, STCP>
where
    DS: OutputPin<Error = PinErr>,
    SHCP: OutputPin<Error = PinErr>,
    STCP: OutputPin<Error = PinErr>,
{
    /// Create a new ShiftRegister
    ///
    /// # Arguments
    ///
    /// * `data` - Serial data pin (DS)
    /// * `shift_clock` - Shift clock pin (SHCP)
    /// * `latch_clock` - Latch clock pin (STCP)
    /// * `layout` - Output assignment, see [`crate::Builder`]
    pub fn new(data: DS, shift_clock: SHCP, latch_clock: STCP, layout: BitLayout) -> Self {
        Self {
            data,
            shift_clock,
            latch_clock,
            layout,
        }
    }

    /// Get the bit layout
    pub fn layout(&self) -> BitLayout {
        self.layout
    }

    /// Give back the pins
    pub fn release(self) -> (DS, SHCP, STCP) {
        (self.data, self.shift_clock, self.latch_clock)
    }

    /// Shift a byte out MSB first, one clock pulse per bit
    ///
    /// Does not touch the latch.
    fn shift_out(&mut self, byte: u8) -> InterfaceResult<(), InterfaceError<PinErr>> {
        for i in (0..8).rev() {
            if byte & (1 << i) != 0 {
                self.data.set_high().map_err(InterfaceError::Data)?;
            } else {
                self.data.set_low().map_err(InterfaceError::Data)?;
            }
            self.shift_clock
                .set_high()
                .map_err(InterfaceError::ShiftClock)?;
            self.shift_clock
                .set_low()
                .map_err(InterfaceError::ShiftClock)?;
        }
        Ok(())
    }
}

impl<DS, SHCP, STCP, PinErr> LcdInterface for ShiftRegister<DS, SHCP, STCP>
where
    DS: OutputPin<Error = PinErr>,
    SHCP: OutputPin<Error = PinErr>,
    STCP: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<PinErr>;

    fn emit(
        &mut self,
        register_select: bool,
        enable: bool,
        nibble: u8,
    ) -> InterfaceResult<(), Self::Error> {
        let byte = self.layout.compose(register_select, enable, nibble);
        trace!("Shifting out: {:08b}", byte);

        // Outputs hold the previous byte until the latch rises again
        self.latch_clock
            .set_low()
            .map_err(InterfaceError::LatchClock)?;
        self.shift_out(byte)?;
        self.latch_clock
            .set_high()
            .map_err(InterfaceError::LatchClock)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use embedded_hal::digital::ErrorType;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum Line {
        Data,
        Shift,
        Latch,
    }

    type Log = Rc<RefCell<Vec<(Line, bool)>>>;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct MockError;

    impl embedded_hal::digital::Error for MockError {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    struct MockPin {
        line: Line,
        log: Log,
        fail: bool,
    }

    impl MockPin {
        fn new(line: Line, log: &Log) -> Self {
            Self {
                line,
                log: Rc::clone(log),
                fail: false,
            }
        }
    }

    impl ErrorType for MockPin {
        type Error = MockError;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            self.log.borrow_mut().push((self.line, false));
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            if self.fail {
                return Err(MockError);
            }
            self.log.borrow_mut().push((self.line, true));
            Ok(())
        }
    }

    fn test_interface(log: &Log) -> ShiftRegister<MockPin, MockPin, MockPin> {
        ShiftRegister::new(
            MockPin::new(Line::Data, log),
            MockPin::new(Line::Shift, log),
            MockPin::new(Line::Latch, log),
            BitLayout::default(),
        )
    }

    /// Reconstruct the byte clocked in, from data levels at each rising SHCP edge
    fn clocked_bits(events: &[(Line, bool)]) -> Vec<bool> {
        let mut data = false;
        let mut bits = Vec::new();
        for &(line, level) in events {
            match line {
                Line::Data => data = level,
                Line::Shift if level => bits.push(data),
                _ => {}
            }
        }
        bits
    }

    #[test]
    fn test_emit_shifts_msb_first() {
        let log: Log = Rc::default();
        let mut interface = test_interface(&log);
        interface.emit(true, false, 0b1001).unwrap();

        let expected = BitLayout::default().compose(true, false, 0b1001);
        let bits = clocked_bits(&log.borrow());
        assert_eq!(bits.len(), 8);
        let byte = bits.iter().fold(0u8, |acc, &b| (acc << 1) | u8::from(b));
        assert_eq!(byte, expected);
    }

    #[test]
    fn test_emit_latch_stays_low_while_shifting() {
        let log: Log = Rc::default();
        let mut interface = test_interface(&log);
        interface.emit(false, true, 0xA).unwrap();

        let events = log.borrow();
        let latch: Vec<_> = events
            .iter()
            .enumerate()
            .filter(|(_, (line, _))| *line == Line::Latch)
            .collect();
        // Exactly one low then one high, bracketing every shift event
        assert_eq!(latch.len(), 2);
        assert_eq!(latch[0].0, 0);
        assert!(!(latch[0].1).1);
        assert_eq!(latch[1].0, events.len() - 1);
        assert!((latch[1].1).1);
    }

    #[test]
    fn test_emit_one_clock_pulse_per_bit() {
        let log: Log = Rc::default();
        let mut interface = test_interface(&log);
        interface.emit(false, false, 0).unwrap();

        let events = log.borrow();
        let rising = events
            .iter()
            .filter(|&&(line, level)| line == Line::Shift && level)
            .count();
        let falling = events
            .iter()
            .filter(|&&(line, level)| line == Line::Shift && !level)
            .count();
        assert_eq!(rising, 8);
        assert_eq!(falling, 8);
        // Shift clock idles low after the transfer
        let last_shift = events.iter().rev().find(|(line, _)| *line == Line::Shift);
        assert_eq!(last_shift, Some(&(Line::Shift, false)));
    }

    #[test]
    fn test_emit_reports_failing_line() {
        let log: Log = Rc::default();
        let mut interface = test_interface(&log);
        interface.latch_clock.fail = true;
        assert!(matches!(
            interface.emit(false, false, 0),
            Err(InterfaceError::LatchClock(MockError))
        ));

        interface.latch_clock.fail = false;
        interface.data.fail = true;
        assert!(matches!(
            interface.emit(false, false, 0),
            Err(InterfaceError::Data(MockError))
        ));
    }

    #[test]
    fn test_release_returns_pins() {
        let log: Log = Rc::default();
        let interface = test_interface(&log);
        assert_eq!(interface.layout(), BitLayout::default());
        let (data, shift, latch) = interface.release();
        assert_eq!(data.line, Line::Data);
        assert_eq!(shift.line, Line::Shift);
        assert_eq!(latch.line, Line::Latch);
    }
}
