//! Types needed in multiple modules

use serde::{Deserialize, Serialize};

/// Enumeration of binary symbol values
#[derive(Clone, Eq, Hash, PartialEq, Debug, Copy, Deserialize, Serialize)]
pub enum Bit {
    /// Binary symbol `0`
    Zero = 0,
    /// Binary symbol `1`
    One = 1,
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        bit as u8
    }
}

impl std::ops::BitXor for Bit {
    type Output = Bit;

    fn bitxor(self, rhs: Bit) -> Bit {
        Bit::from(self != rhs)
    }
}

impl std::ops::BitXorAssign for Bit {
    fn bitxor_assign(&mut self, rhs: Bit) {
        *self = *self ^ rhs;
    }
}

/// Custom error type
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Invalid input error
    #[error("{0}")]
    InvalidInput(String),
    /// Invalid code configuration (block length, frozen map or message length)
    #[error("{0}")]
    InvalidConfiguration(String),
    /// File read/write error
    #[error("{0}")]
    FileReadWriteError(#[from] std::io::Error),
    /// Serde read/write error
    #[error("{0}")]
    SerdeReadWriteError(#[from] serde_json::Error),
}
