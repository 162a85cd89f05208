//! Byte-sink adapters
//!
//! [`Lcd`] is a plain write-only byte stream. Implementing the standard sink
//! traits lets any formatting or streaming layer drive it:
//!
//! - [`core::fmt::Write`], always available, for `write!` and `writeln!`
//! - [`embedded_io::Write`] (requires `io` feature)
//!
//! Bytes are sent as-is. Newlines are not interpreted: position the cursor
//! with [`Lcd::set_cursor`] instead.
//!
//! ## Example
//!
//! ```rust,no_run
//! use core::fmt::Write;
//! use embedded_hal::delay::DelayNs;
//! use lcd595::{Font, Lcd, LcdInterface};
//! # use core::convert::Infallible;
//! # struct MockBus;
//! # impl LcdInterface for MockBus {
//! #     type Error = Infallible;
//! #     fn emit(&mut self, _rs: bool, _en: bool, _nibble: u8) -> Result<(), Infallible> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! let mut lcd = Lcd::new(MockBus, MockDelay);
//! let _ = lcd.begin(16, 2, Font::Dots5x8);
//! let _ = write!(lcd, "T={}C", 21);
//! ```

use embedded_hal::delay::DelayNs;

use crate::display::Lcd;
use crate::interface::LcdInterface;

impl<I, D> core::fmt::Write for Lcd<I, D>
where
    I: LcdInterface,
    D: DelayNs,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.print(s).map(|_| ()).map_err(|_| core::fmt::Error)
    }
}

#[cfg(feature = "io")]
impl<I, D> embedded_io::ErrorType for Lcd<I, D>
where
    I: LcdInterface,
    D: DelayNs,
{
    type Error = crate::error::Error<I::Error>;
}

#[cfg(feature = "io")]
impl<I, D> embedded_io::Write for Lcd<I, D>
where
    I: LcdInterface,
    D: DelayNs,
{
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.write_bytes(buf)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Font;
    use crate::protocol::Mode;
    use crate::protocol::tests::{Event, MockDelay, MockInterface, bytes, latched, mocks};
    use alloc::vec::Vec;
    use embedded_hal::digital::{ErrorType, OutputPin};

    fn data_bytes(events: &[Event]) -> Vec<u8> {
        bytes(&latched(events))
            .into_iter()
            .filter(|&(mode, _)| mode == Mode::Data)
            .map(|(_, value)| value)
            .collect()
    }

    fn test_lcd() -> (crate::protocol::tests::Log, Lcd<MockInterface, MockDelay>) {
        let (log, interface, delay) = mocks();
        let mut lcd = Lcd::new(interface, delay);
        lcd.begin(16, 2, Font::Dots5x8).unwrap();
        log.borrow_mut().clear();
        (log, lcd)
    }

    #[test]
    fn test_fmt_write() {
        use core::fmt::Write;

        let (log, mut lcd) = test_lcd();
        write!(lcd, "{}:{:02}", 7, 5).unwrap();
        assert_eq!(data_bytes(&log.borrow()), b"7:05");
    }

    #[cfg(feature = "io")]
    #[test]
    fn test_embedded_io_write_all() {
        let (log, mut lcd) = test_lcd();
        embedded_io::Write::write_all(&mut lcd, b"abc").unwrap();
        embedded_io::Write::flush(&mut lcd).unwrap();
        assert_eq!(data_bytes(&log.borrow()), b"abc");
    }

    #[cfg(feature = "io")]
    #[test]
    fn test_embedded_io_write_accepts_whole_buffer() {
        let (_log, mut lcd) = test_lcd();
        assert_eq!(embedded_io::Write::write(&mut lcd, b"hello").unwrap(), 5);
    }

    #[derive(Debug)]
    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = embedded_hal::digital::ErrorKind;
    }

    impl OutputPin for BrokenPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(embedded_hal::digital::ErrorKind::Other)
        }
    }

    #[test]
    fn test_fmt_write_reports_pin_failure() {
        use core::fmt::Write;

        let interface = crate::interface::ShiftRegister::new(
            BrokenPin,
            BrokenPin,
            BrokenPin,
            crate::config::BitLayout::default(),
        );
        let (_log, _interface, delay) = mocks();
        let mut lcd = Lcd::new(interface, delay);
        assert!(write!(lcd, "x").is_err());
    }
}
