//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Invalid shift-register bit layout
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level pin errors
//!
//! The display is write-only, so nothing the controller does can be reported
//! back. The only runtime failures are GPIO errors from the HAL. Out-of-range
//! arguments (cursor rows, glyph slots) are clamped or masked instead.
//!
//! ## Example
//!
//! ```
//! use lcd595::{Builder, BuilderError};
//!
//! // Enable bit placed inside the data nibble
//! let result = Builder::new().enable_bit(4).build();
//! assert!(matches!(result, Err(BuilderError::Overlap { .. })));
//! ```

/// Errors that can occur when interacting with the display
///
/// Generic over the interface error type to preserve the specific pin error.
#[derive(Debug)]
pub enum Error<E> {
    /// Interface error (GPIO)
    ///
    /// Wraps the underlying hardware error from the
    /// [`LcdInterface`](crate::interface::LcdInterface) implementation.
    Interface(E),
}

impl<E: core::fmt::Debug> core::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
        }
    }
}

impl<E: core::fmt::Debug> core::error::Error for Error<E> {}

#[cfg(feature = "io")]
impl<E: core::fmt::Debug> embedded_io::Error for Error<E> {
    fn kind(&self) -> embedded_io::ErrorKind {
        embedded_io::ErrorKind::Other
    }
}

/// Role of a bit inside the shifted byte, used in [`BuilderError`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BitRole {
    /// Register-select (RS) line
    RegisterSelect,
    /// Enable (EN) line
    Enable,
    /// Lowest of the four data lines (D4)
    Data,
}

impl core::fmt::Display for BitRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::RegisterSelect => write!(f, "RS"),
            Self::Enable => write!(f, "EN"),
            Self::Data => write!(f, "data"),
        }
    }
}

/// Errors that can occur when building the bit layout
///
/// These errors occur during the builder pattern before the interface is created.
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// A bit index does not fit in the shifted byte
    ///
    /// RS and EN must be in `0..=7`; the data nibble base must be in `0..=4`
    /// so all four data bits fit.
    FieldOutOfRange {
        /// Which field was out of range
        role: BitRole,
        /// Requested bit index
        bit: u8,
    },
    /// Two fields claim the same output bit
    Overlap {
        /// First field
        first: BitRole,
        /// Second field
        second: BitRole,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::FieldOutOfRange { role, bit } => {
                write!(f, "{role} bit {bit} does not fit in the shift register")
            }
            Self::Overlap { first, second } => {
                write!(f, "{first} and {second} bits overlap")
            }
        }
    }
}

impl core::error::Error for BuilderError {}
