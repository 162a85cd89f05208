//! Configuration types and builder
//!
//! - [`BitLayout`] says which shift-register outputs carry RS, EN and the data
//!   nibble. Built once with [`Builder`] and fixed for the interface lifetime.
//! - [`Geometry`] holds the column/line count and the DDRAM row table set up by
//!   [`Lcd::begin`](crate::Lcd::begin).

pub use crate::error::{BitRole, BuilderError};

/// Default RS output (Q1)
pub const DEFAULT_RS_BIT: u8 = 1;
/// Default EN output (Q2)
pub const DEFAULT_EN_BIT: u8 = 2;
/// Default lowest data output (Q3, carrying D4; D7 lands on Q6)
pub const DEFAULT_DATA_BIT: u8 = 3;

/// Number of entries in the DDRAM row table
pub const MAX_ROWS: usize = 4;

/// Positions of the LCD lines inside the shifted byte
///
/// Bit `n` of the composed byte appears on shift-register output `Qn`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BitLayout {
    rs_bit: u8,
    en_bit: u8,
    data_bit: u8,
}

impl Default for BitLayout {
    fn default() -> Self {
        Self {
            rs_bit: DEFAULT_RS_BIT,
            en_bit: DEFAULT_EN_BIT,
            data_bit: DEFAULT_DATA_BIT,
        }
    }
}

impl BitLayout {
    /// Register-select bit index
    pub fn rs_bit(&self) -> u8 {
        self.rs_bit
    }

    /// Enable bit index
    pub fn en_bit(&self) -> u8 {
        self.en_bit
    }

    /// Index of the lowest of the four data bits
    pub fn data_bit(&self) -> u8 {
        self.data_bit
    }

    /// Compose the byte to shift out for one bus state
    ///
    /// Only the low four bits of `nibble` are used.
    ///
    /// ```
    /// use lcd595::BitLayout;
    ///
    /// let layout = BitLayout::default();
    /// // nibble 0b1010 on Q3..Q6, RS on Q1, EN on Q2
    /// assert_eq!(layout.compose(true, true, 0b1010), 0b0101_0110);
    /// assert_eq!(layout.compose(false, false, 0xFF), 0b0111_1000);
    /// ```
    pub fn compose(&self, register_select: bool, enable: bool, nibble: u8) -> u8 {
        let mut byte = (nibble & 0x0F) << self.data_bit;
        if register_select {
            byte |= 1 << self.rs_bit;
        }
        if enable {
            byte |= 1 << self.en_bit;
        }
        byte
    }

    fn data_mask(&self) -> u8 {
        0x0F << self.data_bit
    }
}

/// Builder for the shift-register bit layout
///
/// # Example
///
/// ```
/// use lcd595::Builder;
///
/// // RS on Q0, EN on Q1, D4..D7 on Q4..Q7
/// let layout = match Builder::new().register_select_bit(0).enable_bit(1).data_bit(4).build() {
///     Ok(layout) => layout,
///     Err(_) => return,
/// };
/// assert_eq!(layout.compose(true, false, 0x1), 0x11);
/// ```
#[must_use]
#[derive(Debug)]
pub struct Builder {
    /// Register-select output
    rs_bit: u8,
    /// Enable output
    en_bit: u8,
    /// Lowest data output
    data_bit: u8,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            rs_bit: DEFAULT_RS_BIT,
            en_bit: DEFAULT_EN_BIT,
            data_bit: DEFAULT_DATA_BIT,
        }
    }
}

impl Builder {
    /// Create a new Builder with the default wiring
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the register-select output
    pub fn register_select_bit(mut self, bit: u8) -> Self {
        self.rs_bit = bit;
        self
    }

    /// Set the enable output
    pub fn enable_bit(mut self, bit: u8) -> Self {
        self.en_bit = bit;
        self
    }

    /// Set the output carrying D4; D5..D7 follow on the next three outputs
    pub fn data_bit(mut self, bit: u8) -> Self {
        self.data_bit = bit;
        self
    }

    /// Build the layout
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::FieldOutOfRange` if a field does not fit in the
    /// byte, and `BuilderError::Overlap` if two fields share an output.
    pub fn build(self) -> Result<BitLayout, BuilderError> {
        if self.rs_bit > 7 {
            return Err(BuilderError::FieldOutOfRange {
                role: BitRole::RegisterSelect,
                bit: self.rs_bit,
            });
        }
        if self.en_bit > 7 {
            return Err(BuilderError::FieldOutOfRange {
                role: BitRole::Enable,
                bit: self.en_bit,
            });
        }
        if self.data_bit > 4 {
            return Err(BuilderError::FieldOutOfRange {
                role: BitRole::Data,
                bit: self.data_bit,
            });
        }

        let layout = BitLayout {
            rs_bit: self.rs_bit,
            en_bit: self.en_bit,
            data_bit: self.data_bit,
        };
        let data = layout.data_mask();

        if self.rs_bit == self.en_bit {
            return Err(BuilderError::Overlap {
                first: BitRole::RegisterSelect,
                second: BitRole::Enable,
            });
        }
        if data & (1 << self.rs_bit) != 0 {
            return Err(BuilderError::Overlap {
                first: BitRole::RegisterSelect,
                second: BitRole::Data,
            });
        }
        if data & (1 << self.en_bit) != 0 {
            return Err(BuilderError::Overlap {
                first: BitRole::Enable,
                second: BitRole::Data,
            });
        }

        Ok(layout)
    }
}

/// Display geometry
///
/// The row table holds the DDRAM address of the first character of each row.
/// The default table assumes the common two-row interleaving (`0x00`, `0x40`)
/// and places rows 2 and 3 one line length further on. Four-line panels
/// with a different address scheme must override it with
/// [`Lcd::set_row_offsets`](crate::Lcd::set_row_offsets).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Characters per row
    pub columns: u8,
    /// Number of rows requested at initialisation
    pub lines: u8,
    /// DDRAM base address of each row
    pub row_offsets: [u8; MAX_ROWS],
}

impl Geometry {
    /// Create a geometry with the default row table
    ///
    /// ```
    /// use lcd595::Geometry;
    ///
    /// let g = Geometry::new(20, 4);
    /// assert_eq!(g.row_offsets, [0x00, 0x40, 0x14, 0x54]);
    /// ```
    pub fn new(columns: u8, lines: u8) -> Self {
        Self {
            columns,
            lines,
            row_offsets: Self::default_row_offsets(columns),
        }
    }

    /// Default DDRAM row table for a column count
    pub fn default_row_offsets(columns: u8) -> [u8; MAX_ROWS] {
        [
            0x00,
            0x40,
            columns,
            0x40u8.wrapping_add(columns),
        ]
    }

    /// Last row index that can be addressed
    ///
    /// Bounded by both the configured line count and the row table size.
    /// A zero line count still addresses row 0.
    pub fn max_row(&self) -> u8 {
        self.lines.min(MAX_ROWS as u8).saturating_sub(1)
    }

    /// DDRAM address of a character position, with the row clamped
    ///
    /// ```
    /// use lcd595::Geometry;
    ///
    /// let g = Geometry::new(16, 2);
    /// assert_eq!(g.row_address(3, 1), 0x43);
    /// // Row 7 does not exist on a two-line display: clamped to row 1
    /// assert_eq!(g.row_address(3, 7), 0x43);
    /// ```
    pub fn row_address(&self, column: u8, row: u8) -> u8 {
        let row = row.min(self.max_row());
        column.wrapping_add(self.row_offsets[row as usize])
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(16, 1)
    }
}
