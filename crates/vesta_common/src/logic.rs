//! Single-bit values: two-state `bit` and nine-state IEEE 1164 `std_logic`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A two-state VHDL `bit` value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum BitLiteral {
    /// `'0'`.
    Low,
    /// `'1'`.
    High,
}

impl BitLiteral {
    /// Converts a character to a [`BitLiteral`]. Accepts `'0'` and `'1'`.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(BitLiteral::Low),
            '1' => Some(BitLiteral::High),
            _ => None,
        }
    }

    /// Returns the character this value is written as.
    pub fn as_char(self) -> char {
        match self {
            BitLiteral::Low => '0',
            BitLiteral::High => '1',
        }
    }
}

impl fmt::Display for BitLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A nine-state IEEE 1164 `std_logic` value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum LogicLiteral {
    /// `'U'`: uninitialized.
    Uninitialized,
    /// `'X'`: forcing unknown.
    Unknown,
    /// `'0'`: forcing low.
    Low,
    /// `'1'`: forcing high.
    High,
    /// `'Z'`: high impedance.
    HighImpedance,
    /// `'W'`: weak unknown.
    WeakSignal,
    /// `'L'`: weak low.
    WeakLow,
    /// `'H'`: weak high.
    WeakHigh,
    /// `'-'`: don't care.
    DontCare,
}

impl LogicLiteral {
    /// Converts a character to a [`LogicLiteral`].
    ///
    /// Letters are accepted in either case and always written back uppercase.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'U' => Some(LogicLiteral::Uninitialized),
            'X' => Some(LogicLiteral::Unknown),
            '0' => Some(LogicLiteral::Low),
            '1' => Some(LogicLiteral::High),
            'Z' => Some(LogicLiteral::HighImpedance),
            'W' => Some(LogicLiteral::WeakSignal),
            'L' => Some(LogicLiteral::WeakLow),
            'H' => Some(LogicLiteral::WeakHigh),
            '-' => Some(LogicLiteral::DontCare),
            _ => None,
        }
    }

    /// Returns the character this value is written as.
    pub fn as_char(self) -> char {
        match self {
            LogicLiteral::Uninitialized => 'U',
            LogicLiteral::Unknown => 'X',
            LogicLiteral::Low => '0',
            LogicLiteral::High => '1',
            LogicLiteral::HighImpedance => 'Z',
            LogicLiteral::WeakSignal => 'W',
            LogicLiteral::WeakLow => 'L',
            LogicLiteral::WeakHigh => 'H',
            LogicLiteral::DontCare => '-',
        }
    }

    /// Returns the equivalent [`BitLiteral`] for `'0'` and `'1'`.
    pub fn as_bit(self) -> Option<BitLiteral> {
        match self {
            LogicLiteral::Low => Some(BitLiteral::Low),
            LogicLiteral::High => Some(BitLiteral::High),
            _ => None,
        }
    }
}

impl From<BitLiteral> for LogicLiteral {
    fn from(bit: BitLiteral) -> Self {
        match bit {
            BitLiteral::Low => LogicLiteral::Low,
            BitLiteral::High => LogicLiteral::High,
        }
    }
}

impl fmt::Display for LogicLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
