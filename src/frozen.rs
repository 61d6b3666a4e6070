//! Frozen maps and the frozen-set provider contract
//!
//! A [`FrozenMap`] tags each of the `N` positions of a polar code as either carrying an
//! information bit or being frozen to a known value. The encoders only depend on this partition;
//! how it was chosen (e.g., by ranking bit-channel reliabilities) is the business of a
//! [`FrozenSetProvider`].

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{kernel, Bit, Error};

/// Role of a single position of a polar code
#[derive(Clone, Eq, Hash, PartialEq, Debug, Copy, Deserialize, Serialize)]
pub enum FrozenBit {
    /// Position carries an information bit
    Info,
    /// Position is frozen to the given value
    Frozen(Bit),
}

/// Partition of the positions of a polar code into information and frozen positions
#[derive(Clone, Eq, PartialEq, Debug, Deserialize, Serialize)]
#[serde(try_from = "Vec<FrozenBit>", into = "Vec<FrozenBit>")]
pub struct FrozenMap {
    /// Role of each position
    entries: Vec<FrozenBit>,
}

impl FrozenMap {
    /// Returns frozen map with given role for each position.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of entries is not a power of `2`.
    ///
    /// # Examples
    ///
    /// ```
    /// use polar::{Bit, FrozenBit, FrozenMap};
    /// use FrozenBit::{Frozen, Info};
    ///
    /// let frozen_map = FrozenMap::new(&[Frozen(Bit::Zero), Info, Frozen(Bit::Zero), Info])?;
    /// assert_eq!(frozen_map.info_positions(), [1, 3]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(entries: &[FrozenBit]) -> Result<Self, Error> {
        kernel::num_stages(entries.len())?;
        Ok(Self {
            entries: entries.to_vec(),
        })
    }

    /// Returns frozen map in which the given positions are frozen to `Zero` and all others carry
    /// information bits.
    ///
    /// # Errors
    ///
    /// Returns an error if `block_length` is not a power of `2`, or if any position is repeated
    /// or not less than `block_length`.
    ///
    /// # Examples
    ///
    /// ```
    /// use polar::FrozenMap;
    ///
    /// let frozen_map = FrozenMap::from_frozen_positions(8, &[0, 2, 4])?;
    /// assert_eq!(frozen_map.num_info_bits(), 5);
    /// assert_eq!(frozen_map.info_positions(), [1, 3, 5, 6, 7]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_frozen_positions(
        block_length: usize,
        frozen_positions: &[usize],
    ) -> Result<Self, Error> {
        kernel::num_stages(block_length)?;
        let mut entries = vec![FrozenBit::Info; block_length];
        for &pos in frozen_positions {
            match entries.get(pos).copied() {
                Some(FrozenBit::Info) => entries[pos] = FrozenBit::Frozen(Bit::Zero),
                Some(FrozenBit::Frozen(_)) => {
                    return Err(Error::InvalidConfiguration(format!(
                        "Frozen position {pos} is repeated"
                    )))
                }
                None => {
                    return Err(Error::InvalidConfiguration(format!(
                        "Frozen position {pos} is out of range for block length {block_length}"
                    )))
                }
            }
        }
        Ok(Self { entries })
    }

    /// Returns block length.
    #[must_use]
    pub fn block_length(&self) -> usize {
        self.entries.len()
    }

    /// Returns number of information positions.
    #[must_use]
    pub fn num_info_bits(&self) -> usize {
        self.entries
            .iter()
            .filter(|&&entry| entry == FrozenBit::Info)
            .count()
    }

    /// Returns number of frozen positions.
    #[must_use]
    pub fn num_frozen_bits(&self) -> usize {
        self.block_length() - self.num_info_bits()
    }

    /// Returns role of each position.
    #[must_use]
    pub fn entries(&self) -> &[FrozenBit] {
        &self.entries
    }

    /// Returns role of given position.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not less than the block length.
    #[must_use]
    pub fn get(&self, pos: usize) -> FrozenBit {
        self.entries[pos]
    }

    /// Returns information positions in increasing order.
    #[must_use]
    pub fn info_positions(&self) -> Vec<usize> {
        self.entries
            .iter()
            .positions(|&entry| entry == FrozenBit::Info)
            .collect()
    }

    /// Returns frozen positions in increasing order.
    #[must_use]
    pub fn frozen_positions(&self) -> Vec<usize> {
        self.entries
            .iter()
            .positions(|&entry| entry != FrozenBit::Info)
            .collect()
    }

    /// Checks that this frozen map describes a code with given block length and number of
    /// information bits.
    ///
    /// # Errors
    ///
    /// Returns an error if the block length differs from `block_length`, or if the number of
    /// information positions differs from `num_info_bits` (equivalently, if the number of frozen
    /// positions differs from `block_length - num_info_bits`).
    pub fn check(&self, block_length: usize, num_info_bits: usize) -> Result<(), Error> {
        if self.block_length() != block_length {
            return Err(Error::InvalidConfiguration(format!(
                "Expected frozen map of length {block_length} (found {})",
                self.block_length()
            )));
        }
        if self.num_info_bits() != num_info_bits {
            return Err(Error::InvalidConfiguration(format!(
                "Expected {num_info_bits} information positions (found {})",
                self.num_info_bits()
            )));
        }
        Ok(())
    }

    /// Checks that the number of information bits matches the number of information positions.
    ///
    /// # Errors
    ///
    /// Returns an error if `info_bits.len()` is not equal to the number of information positions.
    pub fn check_info_bits(&self, info_bits: &[Bit]) -> Result<(), Error> {
        let num_info_bits = self.num_info_bits();
        if info_bits.len() == num_info_bits {
            Ok(())
        } else {
            Err(Error::InvalidConfiguration(format!(
                "Expected {num_info_bits} information bits (found {})",
                info_bits.len()
            )))
        }
    }
}

impl TryFrom<Vec<FrozenBit>> for FrozenMap {
    type Error = Error;

    fn try_from(entries: Vec<FrozenBit>) -> Result<Self, Error> {
        kernel::num_stages(entries.len())?;
        Ok(Self { entries })
    }
}

impl From<FrozenMap> for Vec<FrozenBit> {
    fn from(frozen_map: FrozenMap) -> Self {
        frozen_map.entries
    }
}

/// Source of frozen maps for given block length and number of information bits
pub trait FrozenSetProvider {
    /// Returns frozen map for a code with given block length and number of information bits.
    ///
    /// Implementations must be deterministic: repeated calls with the same arguments must return
    /// equal frozen maps.
    ///
    /// # Errors
    ///
    /// Returns an error if no frozen map can be provided for the given parameters.
    fn frozen_map(&self, block_length: usize, num_info_bits: usize) -> Result<FrozenMap, Error>;
}

/// A fixed frozen map provides itself, provided its parameters match the requested ones.
impl FrozenSetProvider for FrozenMap {
    fn frozen_map(&self, block_length: usize, num_info_bits: usize) -> Result<FrozenMap, Error> {
        self.check(block_length, num_info_bits)?;
        Ok(self.clone())
    }
}
