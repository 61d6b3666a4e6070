//! Algebraic properties of systematic polar codes
//!
//! For a code with information positions `A` and frozen positions `F`, the systematic generator
//! matrix is `Gs = (G_AA)^-1 · G_A`, where `G_A` holds the rows of the generator matrix `G` at the
//! positions in `A` and `G_AA` holds the columns of `G_A` at the positions in `A`. The columns of
//! `Gs` at the information positions form an identity matrix, and its columns at the frozen
//! positions form the parity matrix `P`. Reordering the columns as `[A, F]` gives the generator
//! `[I | P]` and the parity-check matrix `H = [P^T | I]`.
//!
//! # Examples
//!
//! ```
//! use polar::cache::GeneratorCache;
//! use polar::{verifier, FrozenMap};
//!
//! let mut generators = GeneratorCache::new();
//! let frozen_map = FrozenMap::from_frozen_positions(8, &[0, 2, 4])?;
//! let gs = verifier::systematic_generator_matrix(&frozen_map, &mut generators)?;
//! let p = verifier::parity_matrix(&gs, &frozen_map)?;
//! let h = verifier::parity_check_matrix(&p)?;
//! assert_eq!(h.rank(), 3);
//! assert!(verifier::is_orthogonal(&verifier::systematic_form_generator(&p)?, &h)?);
//! assert_eq!(verifier::min_distance_from_parity(&p), Some(2));
//! assert_eq!(verifier::min_distance_exhaustive(&frozen_map)?, 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeMap;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cache::GeneratorCache;
use crate::{kernel, systematic_encoder, utils, Bit, BitMatrix, Error, FrozenMap};

/// Largest number of information bits for which all codewords may be enumerated
pub const MAX_ENUMERABLE_INFO_BITS: usize = 24;

/// Summary of the algebraic properties of a code
#[derive(Clone, Eq, PartialEq, Debug, Copy, Deserialize, Serialize)]
pub struct CodeProperties {
    /// Rank of the parity-check matrix (equals the number of frozen bits for a valid code)
    pub parity_check_rank: usize,
    /// Whether the systematic-form generator is orthogonal to the parity-check matrix
    pub is_orthogonal: bool,
    /// One plus the minimum row weight of the parity matrix
    pub min_distance_from_parity: Option<usize>,
    /// Minimum non-zero codeword weight, if the codewords were few enough to enumerate
    pub min_distance_exhaustive: Option<usize>,
}

impl CodeProperties {
    /// Returns algebraic properties of the code with given frozen map.
    ///
    /// The exhaustive minimum distance is only computed if the number of information bits is
    /// between `1` and `max_info_bits_for_enumeration` (and at most
    /// [`MAX_ENUMERABLE_INFO_BITS`]). Generator matrices are taken from (and added to) the
    /// given cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the block length of `frozen_map` is not a power of `2`.
    pub fn new(
        frozen_map: &FrozenMap,
        max_info_bits_for_enumeration: usize,
        generators: &mut GeneratorCache,
    ) -> Result<Self, Error> {
        let gs = systematic_generator_matrix(frozen_map, generators)?;
        let p = parity_matrix(&gs, frozen_map)?;
        let h = parity_check_matrix(&p)?;
        let num_info_bits = frozen_map.num_info_bits();
        let min_distance_exhaustive = if num_info_bits > 0
            && num_info_bits <= max_info_bits_for_enumeration.min(MAX_ENUMERABLE_INFO_BITS)
        {
            Some(min_distance_exhaustive(frozen_map)?)
        } else {
            None
        };
        Ok(Self {
            parity_check_rank: h.rank(),
            is_orthogonal: is_orthogonal(&systematic_form_generator(&p)?, &h)?,
            min_distance_from_parity: min_distance_from_parity(&p),
            min_distance_exhaustive,
        })
    }
}

/// Returns systematic generator matrix `Gs` (of size `K x N`) for given frozen map.
///
/// For any information bits `u`, the product `u · Gs` is the codeword from the systematic encoder
/// with all frozen values set to `Zero`. The generator matrix is taken from `generators`, and
/// computed only if it is not cached yet.
///
/// # Errors
///
/// Returns an error if the block length of `frozen_map` is not a power of `2`.
pub fn systematic_generator_matrix(
    frozen_map: &FrozenMap,
    generators: &mut GeneratorCache,
) -> Result<BitMatrix, Error> {
    let num_stages = kernel::num_stages(frozen_map.block_length())?;
    let info_positions = frozen_map.info_positions();
    let info_rows = generators
        .generator_matrix(num_stages)
        .select_rows(&info_positions);
    // Lower triangular with unit diagonal, hence always invertible
    let inverse = info_rows
        .select_columns(&info_positions)
        .inverse()
        .ok_or_else(|| {
            Error::InvalidConfiguration(
                "Generator submatrix on information positions is singular".to_string(),
            )
        })?;
    inverse.mul(&info_rows)
}

/// Returns parity matrix `P` (of size `K x (N-K)`), i.e., the columns of the systematic generator
/// matrix at the frozen positions.
///
/// # Errors
///
/// Returns an error if `gs` is not of size `K x N` for the code with given frozen map.
pub fn parity_matrix(gs: &BitMatrix, frozen_map: &FrozenMap) -> Result<BitMatrix, Error> {
    if gs.num_rows() != frozen_map.num_info_bits() || gs.num_cols() != frozen_map.block_length() {
        return Err(Error::InvalidInput(format!(
            "Expected {}x{} systematic generator matrix (found {}x{})",
            frozen_map.num_info_bits(),
            frozen_map.block_length(),
            gs.num_rows(),
            gs.num_cols()
        )));
    }
    Ok(gs.select_columns(&frozen_map.frozen_positions()))
}

/// Returns parity-check matrix `H = [P^T | I]` for given parity matrix `P`.
///
/// # Errors
///
/// Never returns an error for a well-formed parity matrix; the result type only propagates
/// matrix dimension checks.
pub fn parity_check_matrix(p: &BitMatrix) -> Result<BitMatrix, Error> {
    p.transpose().hstack(&BitMatrix::identity(p.num_cols()))
}

/// Returns systematic-form generator matrix `[I | P]` for given parity matrix `P`.
///
/// # Errors
///
/// Never returns an error for a well-formed parity matrix; the result type only propagates
/// matrix dimension checks.
pub fn systematic_form_generator(p: &BitMatrix) -> Result<BitMatrix, Error> {
    BitMatrix::identity(p.num_rows()).hstack(p)
}

/// Returns `true` if `g · h^T = 0 (mod 2)`.
///
/// # Errors
///
/// Returns an error if `g` and `h` have different numbers of columns.
pub fn is_orthogonal(g: &BitMatrix, h: &BitMatrix) -> Result<bool, Error> {
    Ok(g.mul(&h.transpose())?.is_zero())
}

/// Returns one plus the minimum row weight of parity matrix `P`, or `None` if `P` has no rows.
///
/// Each row of the systematic generator holds a single one at the information positions, so
/// this is the minimum weight among the rows of the systematic generator.
#[must_use]
pub fn min_distance_from_parity(p: &BitMatrix) -> Option<usize> {
    p.row_weights().into_iter().min().map(|weight| weight + 1)
}

/// Returns number of codewords of each Hamming weight, found by enumerating all `2^K` codewords
/// of the systematic encoder (with all frozen values set to `Zero`).
///
/// # Errors
///
/// Returns an error if the number of information bits is `0` or exceeds
/// [`MAX_ENUMERABLE_INFO_BITS`], or if the block length of `frozen_map` is not a power of `2`.
pub fn weight_distribution(frozen_map: &FrozenMap) -> Result<BTreeMap<usize, u64>, Error> {
    let block_length = frozen_map.block_length();
    let num_info_bits = frozen_map.num_info_bits();
    if num_info_bits == 0 || num_info_bits > MAX_ENUMERABLE_INFO_BITS {
        return Err(Error::InvalidConfiguration(format!(
            "Cannot enumerate codewords for {num_info_bits} information bits (must be in the \
             range [1, {MAX_ENUMERABLE_INFO_BITS}])"
        )));
    }
    let linear_map =
        FrozenMap::from_frozen_positions(block_length, &frozen_map.frozen_positions())?;
    debug!(
        "Enumerating {} codewords of ({block_length}, {num_info_bits}) code",
        1u64 << num_info_bits
    );
    (0 .. 1u64 << num_info_bits)
        .into_par_iter()
        .try_fold(
            BTreeMap::new,
            |mut weights: BTreeMap<usize, u64>, index| -> Result<BTreeMap<usize, u64>, Error> {
                let info_bits = bits_from_index(index, num_info_bits);
                let codeword = systematic_encoder(&info_bits, block_length, &linear_map)?;
                *weights
                    .entry(utils::hamming_weight(&codeword.code_bits))
                    .or_insert(0) += 1;
                Ok(weights)
            },
        )
        .try_reduce(BTreeMap::new, |mut weights, other| {
            for (weight, count) in other {
                *weights.entry(weight).or_insert(0) += count;
            }
            Ok(weights)
        })
}

/// Returns minimum non-zero Hamming weight among all codewords of the systematic encoder (with
/// all frozen values set to `Zero`).
///
/// # Errors
///
/// Returns an error if the number of information bits is `0` or exceeds
/// [`MAX_ENUMERABLE_INFO_BITS`], or if the block length of `frozen_map` is not a power of `2`.
pub fn min_distance_exhaustive(frozen_map: &FrozenMap) -> Result<usize, Error> {
    weight_distribution(frozen_map)?
        .into_keys()
        .find(|&weight| weight > 0)
        .ok_or_else(|| Error::InvalidConfiguration("Code has no non-zero codewords".to_string()))
}

/// Returns the `num_bits`-bit binary representation of an index, MSB first.
fn bits_from_index(index: u64, num_bits: usize) -> Vec<Bit> {
    (0 .. num_bits)
        .rev()
        .map(|k| Bit::from((index >> k) & 1 == 1))
        .collect()
}
