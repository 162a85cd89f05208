//! HD44780 4-bit bus protocol
//!
//! Builds enable pulses and byte transfers on top of an [`LcdInterface`], and
//! runs the power-on synchronisation handshake.
//!
//! Every transfer is made of several bus states separated by delays. A
//! transfer interrupted half way leaves the controller holding part of a
//! byte, so all sequences run inside a [`Transaction`]. The transaction
//! mutably borrows the interface and the delay for its whole lifetime: while
//! one is open no other transfer can be started on the same bus.
//!
//! ## Nibble transfer
//!
//! ```text
//!         setup    pulse     settle
//! EN  ____|‾‾‾‾‾‾‾‾|_____________________
//!     ^ RS/data    ^ EN rises  ^ EN falls, instruction executes
//! ```

use embedded_hal::delay::DelayNs;
use log::trace;

use crate::command::{FOUR_BIT_NIBBLE, SYNC_NIBBLE};
use crate::error::Error;
use crate::interface::LcdInterface;

/// Minimum waits, in microseconds
///
/// Each value is at or above the HD44780 datasheet minimum. Shortening them
/// leaves the controller behaviour undefined.
pub mod timing {
    /// RS and data setup before EN rises
    pub const ENABLE_SETUP_US: u32 = 1;
    /// EN high time (datasheet: > 450ns)
    pub const ENABLE_PULSE_US: u32 = 1;
    /// Execution time of an ordinary instruction (datasheet: > 37µs)
    pub const SETTLE_US: u32 = 100;
    /// Wait after each of the first two sync nibbles (datasheet: > 4.1ms)
    pub const SYNC_US: u32 = 4_500;
    /// Wait after the third sync nibble (datasheet: > 100µs)
    pub const SYNC_FINAL_US: u32 = 150;
    /// Execution time of clear display and return home (datasheet: 1.52ms)
    pub const LONG_COMMAND_US: u32 = 2_000;
    /// Wait after power-up before the first instruction (datasheet: > 40ms)
    pub const POWER_ON_US: u32 = 50_000;
}

/// Register selected for a transfer
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    /// Instruction register (RS low)
    Command,
    /// Data register (RS high)
    Data,
}

impl Mode {
    /// RS line level for this mode
    pub fn register_select(self) -> bool {
        self == Self::Data
    }
}

/// Exclusive access to the bus for one multi-step sequence
///
/// Obtained from [`Lcd::transaction`](crate::Lcd::transaction). Every step
/// blocks until its delays complete.
pub struct Transaction<'a, I, D> {
    interface: &'a mut I,
    delay: &'a mut D,
}

impl<'a, I, D> Transaction<'a, I, D>
where
    I: LcdInterface,
    D: DelayNs,
{
    pub(crate) fn new(interface: &'a mut I, delay: &'a mut D) -> Self {
        Self { interface, delay }
    }

    fn emit(&mut self, mode: Mode, enable: bool, nibble: u8) -> Result<(), Error<I::Error>> {
        self.interface
            .emit(mode.register_select(), enable, nibble)
            .map_err(Error::Interface)
    }

    /// Send the low four bits of `value` with one enable pulse
    pub fn send_nibble(&mut self, value: u8, mode: Mode) -> Result<(), Error<I::Error>> {
        self.emit(mode, false, value)?;
        self.delay.delay_us(timing::ENABLE_SETUP_US);
        self.emit(mode, true, value)?;
        self.delay.delay_us(timing::ENABLE_PULSE_US);
        self.emit(mode, false, value)?;
        self.delay.delay_us(timing::SETTLE_US);
        Ok(())
    }

    /// Send a full byte as two nibbles, high nibble first
    pub fn send_byte(&mut self, value: u8, mode: Mode) -> Result<(), Error<I::Error>> {
        trace!("Sending byte: {:08b}, mode: {:?}", value, mode);
        self.send_nibble(value >> 4, mode)?;
        self.send_nibble(value & 0x0F, mode)
    }

    /// Send a command byte
    pub fn command(&mut self, value: u8) -> Result<(), Error<I::Error>> {
        self.send_byte(value, Mode::Command)
    }

    /// Send a data byte
    pub fn data(&mut self, value: u8) -> Result<(), Error<I::Error>> {
        self.send_byte(value, Mode::Data)
    }

    /// Block for at least `us` microseconds
    pub fn wait_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }

    /// Force the controller into 4-bit mode from any state
    ///
    /// The controller may be in 8-bit mode, or in 4-bit mode half way through
    /// a byte, since an MCU reset does not reset the LCD. Three `0x3` nibbles
    /// land it in 8-bit mode whatever the starting point, then `0x2` selects
    /// 4-bit mode. The waits must not be shortened.
    pub fn synchronize(&mut self) -> Result<(), Error<I::Error>> {
        self.send_nibble(SYNC_NIBBLE, Mode::Command)?;
        self.wait_us(timing::SYNC_US);

        self.send_nibble(SYNC_NIBBLE, Mode::Command)?;
        self.wait_us(timing::SYNC_US);

        self.send_nibble(SYNC_NIBBLE, Mode::Command)?;
        self.wait_us(timing::SYNC_FINAL_US);

        self.send_nibble(FOUR_BIT_NIBBLE, Mode::Command)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    /// One observable step on the bus
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub(crate) enum Event {
        Emit { rs: bool, en: bool, nibble: u8 },
        Delay(u32),
    }

    pub(crate) type Log = Rc<RefCell<Vec<Event>>>;

    #[derive(Debug)]
    pub(crate) struct MockInterface {
        pub(crate) log: Log,
    }

    impl LcdInterface for MockInterface {
        type Error = core::convert::Infallible;

        fn emit(&mut self, rs: bool, en: bool, nibble: u8) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::Emit {
                rs,
                en,
                nibble: nibble & 0x0F,
            });
            Ok(())
        }
    }

    pub(crate) struct MockDelay {
        pub(crate) log: Log,
    }

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.log.borrow_mut().push(Event::Delay(ns));
        }
    }

    pub(crate) fn mocks() -> (Log, MockInterface, MockDelay) {
        let log: Log = Rc::default();
        let interface = MockInterface {
            log: Rc::clone(&log),
        };
        let delay = MockDelay {
            log: Rc::clone(&log),
        };
        (log, interface, delay)
    }

    /// Nibbles latched by the controller, i.e. the state present while EN is high
    pub(crate) fn latched(events: &[Event]) -> Vec<(Mode, u8)> {
        events
            .iter()
            .filter_map(|event| match *event {
                Event::Emit {
                    rs,
                    en: true,
                    nibble,
                } => Some((if rs { Mode::Data } else { Mode::Command }, nibble)),
                _ => None,
            })
            .collect()
    }

    /// Bytes reassembled from pairs of latched nibbles
    pub(crate) fn bytes(nibbles: &[(Mode, u8)]) -> Vec<(Mode, u8)> {
        nibbles
            .chunks(2)
            .map(|pair| (pair[0].0, (pair[0].1 << 4) | pair[1].1))
            .collect()
    }

    const US: u32 = 1_000;

    #[test]
    fn test_send_nibble_pulse_shape() {
        let (log, mut interface, mut delay) = mocks();
        Transaction::new(&mut interface, &mut delay)
            .send_nibble(0x5, Mode::Data)
            .unwrap();

        assert_eq!(
            *log.borrow(),
            [
                Event::Emit {
                    rs: true,
                    en: false,
                    nibble: 0x5
                },
                Event::Delay(timing::ENABLE_SETUP_US * US),
                Event::Emit {
                    rs: true,
                    en: true,
                    nibble: 0x5
                },
                Event::Delay(timing::ENABLE_PULSE_US * US),
                Event::Emit {
                    rs: true,
                    en: false,
                    nibble: 0x5
                },
                Event::Delay(timing::SETTLE_US * US),
            ]
        );
    }

    #[test]
    fn test_send_byte_is_two_nibbles_high_first() {
        for value in [0x00u8, 0x41, 0x9C, 0xFF] {
            for mode in [Mode::Command, Mode::Data] {
                let (log, mut interface, mut delay) = mocks();
                Transaction::new(&mut interface, &mut delay)
                    .send_byte(value, mode)
                    .unwrap();

                let events = log.borrow();
                assert_eq!(latched(&events), [(mode, value >> 4), (mode, value & 0x0F)]);
                let emits = events
                    .iter()
                    .filter(|e| matches!(e, Event::Emit { .. }))
                    .count();
                assert_eq!(emits, 6);
            }
        }
    }

    #[test]
    fn test_enable_never_rises_with_changing_data() {
        let (log, mut interface, mut delay) = mocks();
        Transaction::new(&mut interface, &mut delay)
            .send_byte(0xA5, Mode::Data)
            .unwrap();

        let emits: Vec<_> = log
            .borrow()
            .iter()
            .filter_map(|e| match *e {
                Event::Emit { rs, en, nibble } => Some((rs, en, nibble)),
                Event::Delay(_) => None,
            })
            .collect();
        for window in emits.windows(2) {
            let (prev, next) = (window[0], window[1]);
            if next.1 && !prev.1 {
                // Rising edge: RS and data already presented by the previous state
                assert_eq!((prev.0, prev.2), (next.0, next.2));
            }
        }
    }

    #[test]
    fn test_synchronize_sequence_and_waits() {
        let (log, mut interface, mut delay) = mocks();
        Transaction::new(&mut interface, &mut delay)
            .synchronize()
            .unwrap();

        let events = log.borrow();
        assert_eq!(
            latched(&events),
            [
                (Mode::Command, 0x3),
                (Mode::Command, 0x3),
                (Mode::Command, 0x3),
                (Mode::Command, 0x2),
            ]
        );

        // Total wait between the falling EN of each nibble and the next one
        let mut gaps = Vec::new();
        let mut total = 0u32;
        let mut seen_pulse = false;
        for event in events.iter() {
            match *event {
                Event::Emit { en: true, .. } => {
                    if seen_pulse {
                        gaps.push(total);
                    }
                    seen_pulse = true;
                    total = 0;
                }
                Event::Delay(ns) => total += ns,
                Event::Emit { .. } => {}
            }
        }
        assert_eq!(gaps.len(), 3);
        assert!(gaps[0] >= 4_500 * US);
        assert!(gaps[1] >= 4_500 * US);
        assert!(gaps[2] >= 150 * US);
    }

    #[test]
    fn test_mode_register_select() {
        assert!(!Mode::Command.register_select());
        assert!(Mode::Data.register_select());
    }
}
