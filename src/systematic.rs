//! Systematic polar encoder
//!
//! The encoder finds the unique codeword `x = u · G` whose bits at the information positions equal
//! the information bits and whose transform-domain vector `u` holds the frozen values at the
//! frozen positions (Vangala, Hong & Viterbo, "Efficient algorithms for systematic polar
//! encoding", 2015). It works on a table with one row per position and one column per stage
//! boundary, where column `0` is the transform-domain vector `u` and column `n` is the codeword
//! `x`. Each information row is known in column `n` and is computed backward to column `0`; each
//! frozen row is known in column `0` and is computed forward to column `n`. Either way, row `i`
//! only depends on rows with higher indices, so processing rows in decreasing order computes the
//! whole table in `O(N log N)` time.

use crate::{kernel, Bit, Error, FrozenBit, FrozenMap};

/// Output of the systematic polar encoder
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct SystematicCodeword {
    /// Code bits, which hold the information bits at the information positions
    pub code_bits: Vec<Bit>,
    /// Transform-domain bits, which hold the frozen values at the frozen positions (the code bits
    /// are the polar transform of these bits)
    pub transform_bits: Vec<Bit>,
}

/// Table of partial transforms, with `N` rows and `n + 1` columns
#[derive(Debug)]
struct StageTable {
    /// Number of transform stages
    num_stages: usize,
    /// Entries in row-major order
    bits: Vec<Bit>,
}

impl StageTable {
    /// Returns all-zero table for given block length and number of stages.
    fn new(block_length: usize, num_stages: usize) -> Self {
        Self {
            num_stages,
            bits: vec![Bit::Zero; block_length * (num_stages + 1)],
        }
    }

    /// Returns entry in given row and column.
    fn get(&self, row: usize, col: usize) -> Bit {
        self.bits[row * (self.num_stages + 1) + col]
    }

    /// Sets entry in given row and column.
    fn set(&mut self, row: usize, col: usize, bit: Bit) {
        self.bits[row * (self.num_stages + 1) + col] = bit;
    }

    /// Returns given column.
    fn column(&self, col: usize) -> Vec<Bit> {
        self.bits
            .iter()
            .skip(col)
            .step_by(self.num_stages + 1)
            .copied()
            .collect()
    }

    /// Returns row combined with given row at given stage, or `None` if the given row is the
    /// lower half of its butterfly.
    ///
    /// Bit `stage` of `row` (counting from the MSB) selects the butterfly half; the partner row,
    /// if any, is `row + 2^(n - stage - 1)`, which is always a higher index.
    fn partner(&self, row: usize, stage: usize) -> Option<usize> {
        let offset = 1 << (self.num_stages - stage - 1);
        if row & offset == 0 {
            Some(row + offset)
        } else {
            None
        }
    }

    /// Computes an information row from column `n` back to column `0`.
    fn propagate_backward(&mut self, row: usize) {
        for stage in (0 .. self.num_stages).rev() {
            let mut bit = self.get(row, stage + 1);
            if let Some(partner) = self.partner(row, stage) {
                bit ^= self.get(partner, stage + 1);
            }
            self.set(row, stage, bit);
        }
    }

    /// Computes a frozen row from column `0` forward to column `n`.
    fn propagate_forward(&mut self, row: usize) {
        for stage in 0 .. self.num_stages {
            let mut bit = self.get(row, stage);
            if let Some(partner) = self.partner(row, stage) {
                bit ^= self.get(partner, stage);
            }
            self.set(row, stage + 1, bit);
        }
    }
}

/// Returns output of systematic polar encoder for given information bits.
///
/// # Parameters
///
/// - `info_bits`: Information bits to be encoded, in increasing order of information position.
///
/// - `block_length`: Block length `N` of the code. Must be a power of `2`.
///
/// - `frozen_map`: Frozen map of the code. Must have length `block_length`.
///
/// # Returns
///
/// - `codeword`: Code bits (holding `info_bits` at the information positions) together with the
///   transform-domain bits (holding the frozen values at the frozen positions).
///
/// # Errors
///
/// Returns an error if `block_length` is not a power of `2`, if the length of `frozen_map` is not
/// equal to `block_length`, or if the number of information bits is not equal to the number of
/// information positions in `frozen_map`.
///
/// # Examples
/// ```
/// use polar::{systematic_encoder, Bit, FrozenMap};
/// use Bit::{One, Zero};
///
/// let frozen_map = FrozenMap::from_frozen_positions(8, &[0, 2, 4])?;
/// let info_bits = [One, Zero, One, One, Zero];
/// let codeword = systematic_encoder(&info_bits, 8, &frozen_map)?;
/// assert_eq!(
///     codeword.code_bits,
///     [Zero, One, One, Zero, Zero, One, One, Zero]
/// );
/// assert_eq!(
///     codeword.transform_bits,
///     [Zero, Zero, Zero, Zero, Zero, One, One, Zero]
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn systematic_encoder(
    info_bits: &[Bit],
    block_length: usize,
    frozen_map: &FrozenMap,
) -> Result<SystematicCodeword, Error> {
    let num_stages = kernel::num_stages(block_length)?;
    check_block_length(block_length, frozen_map)?;
    let input = crate::encoder::transform_input(info_bits, frozen_map)?;
    let mut table = StageTable::new(block_length, num_stages);
    for (row, &bit) in input.iter().enumerate() {
        table.set(row, num_stages, bit);
    }
    for row in (0 .. block_length).rev() {
        match frozen_map.get(row) {
            FrozenBit::Info => table.propagate_backward(row),
            FrozenBit::Frozen(bit) => {
                table.set(row, 0, bit);
                table.propagate_forward(row);
            }
        }
    }
    Ok(SystematicCodeword {
        code_bits: table.column(num_stages),
        transform_bits: table.column(0),
    })
}

/// Returns code bits from systematic polar encoder, computed by applying the generator matrix
/// twice.
///
/// The input vector of the non-systematic encoder is multiplied by the generator matrix, the
/// frozen positions of the result are reset to their frozen values, and the result is multiplied
/// by the generator matrix once more. This takes `O(N^2)` time and memory, and is meant only as a
/// reference for [`systematic_encoder`].
///
/// # Errors
///
/// Returns an error if the number of information bits is not equal to the number of information
/// positions in `frozen_map`.
pub fn systematic_matrix_encoder(
    info_bits: &[Bit],
    frozen_map: &FrozenMap,
) -> Result<Vec<Bit>, Error> {
    let generator = kernel::generator_matrix(kernel::num_stages(frozen_map.block_length())?);
    let mut bits = generator.vec_mul(&crate::encoder::transform_input(info_bits, frozen_map)?)?;
    reset_frozen_bits(&mut bits, frozen_map);
    generator.vec_mul(&bits)
}

/// Returns code bits from systematic polar encoder, computed by applying the polar transform
/// twice.
///
/// Same construction as [`systematic_matrix_encoder`], but in `O(N log N)` time.
///
/// # Errors
///
/// Returns an error if the number of information bits is not equal to the number of information
/// positions in `frozen_map`.
pub fn systematic_transform_encoder(
    info_bits: &[Bit],
    frozen_map: &FrozenMap,
) -> Result<Vec<Bit>, Error> {
    let mut bits = crate::encoder::encoder(info_bits, frozen_map)?;
    reset_frozen_bits(&mut bits, frozen_map);
    kernel::transform(&mut bits)?;
    Ok(bits)
}

/// Checks that the frozen map has the given block length.
fn check_block_length(block_length: usize, frozen_map: &FrozenMap) -> Result<(), Error> {
    if frozen_map.block_length() == block_length {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration(format!(
            "For block length {block_length}, expected frozen map of the same length (found {})",
            frozen_map.block_length()
        )))
    }
}

/// Sets the frozen positions of `bits` to their frozen values.
fn reset_frozen_bits(bits: &mut [Bit], frozen_map: &FrozenMap) {
    for (bit, &entry) in bits.iter_mut().zip(frozen_map.entries()) {
        if let FrozenBit::Frozen(frozen_bit) = entry {
            *bit = frozen_bit;
        }
    }
}
