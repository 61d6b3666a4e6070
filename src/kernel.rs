//! Polarizing kernel and the polar transform
//!
//! The generator matrix of a polar code of length `N = 2^n` is the `n`-fold Kronecker power of
//! the kernel `[[1, 0], [1, 1]]`. It is lower triangular in natural bit order, and since the
//! kernel is its own inverse over GF(2), so is every Kronecker power of it. The
//! [`generator_matrix`] function materializes this matrix (for reference and verification only),
//! while [`transform`] applies it to a vector in `O(N log N)` time without building it.

use crate::{Bit, BitMatrix, Error};

/// Returns number of transform stages `n` for a block length `N = 2^n`.
///
/// # Errors
///
/// Returns an error if `block_length` is not a power of `2`.
///
/// # Examples
///
/// ```
/// use polar::kernel;
///
/// assert_eq!(kernel::num_stages(64)?, 6);
/// assert!(kernel::num_stages(48).is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn num_stages(block_length: usize) -> Result<usize, Error> {
    if block_length.is_power_of_two() {
        Ok(block_length.trailing_zeros() as usize)
    } else {
        Err(Error::InvalidConfiguration(format!(
            "Block length must be a power of 2 (found {block_length})"
        )))
    }
}

/// Returns the `2 x 2` polarizing kernel `[[1, 0], [1, 1]]`.
#[must_use]
pub fn polarizing_kernel() -> BitMatrix {
    let mut kernel = BitMatrix::identity(2);
    kernel.set(1, 0, Bit::One);
    kernel
}

/// Returns generator matrix of size `2^num_stages x 2^num_stages`.
///
/// The matrix is built as `G(0) = [1]` and `G(k) = F ⊗ G(k-1)` for `k = 1, 2, ..., num_stages`,
/// where `F` is the polarizing kernel.
///
/// # Examples
///
/// ```
/// use polar::{kernel, BitMatrix};
///
/// let generator = kernel::generator_matrix(2);
/// assert_eq!(generator.to_string(), "1000\n1100\n1010\n1111");
/// assert_eq!(generator.mul(&generator)?, BitMatrix::identity(4));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn generator_matrix(num_stages: usize) -> BitMatrix {
    let kernel = polarizing_kernel();
    (0 .. num_stages).fold(BitMatrix::identity(1), |generator, _| kernel.kron(&generator))
}

/// Applies the polar transform in place, i.e., replaces `bits` with `bits · G (mod 2)`.
///
/// # Errors
///
/// Returns an error if `bits.len()` is not a power of `2`.
///
/// # Examples
///
/// ```
/// use polar::{kernel, Bit};
/// use Bit::{One, Zero};
///
/// let mut bits = [Zero, One, Zero, Zero, Zero, One, One, Zero];
/// kernel::transform(&mut bits)?;
/// assert_eq!(bits, [One, Zero, One, Zero, Zero, One, One, Zero]);
/// kernel::transform(&mut bits)?;
/// assert_eq!(bits, [Zero, One, Zero, Zero, Zero, One, One, Zero]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn transform(bits: &mut [Bit]) -> Result<(), Error> {
    num_stages(bits.len())?;
    let mut half_len = 1;
    while half_len < bits.len() {
        for block in bits.chunks_exact_mut(2 * half_len) {
            let (left, right) = block.split_at_mut(half_len);
            for (left_bit, &right_bit) in left.iter_mut().zip(right.iter()) {
                *left_bit ^= right_bit;
            }
        }
        half_len <<= 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests_of_functions {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::utils;
    use Bit::{One, Zero};

    #[test]
    fn test_num_stages() {
        // Invalid input
        assert!(num_stages(0).is_err());
        assert!(num_stages(3).is_err());
        assert!(num_stages(12).is_err());
        // Valid input
        assert_eq!(num_stages(1).unwrap(), 0);
        assert_eq!(num_stages(2).unwrap(), 1);
        assert_eq!(num_stages(1024).unwrap(), 10);
    }

    #[test]
    fn test_polarizing_kernel() {
        assert_eq!(polarizing_kernel().to_string(), "10\n11");
    }

    #[test]
    fn test_generator_matrix() {
        assert_eq!(generator_matrix(0), BitMatrix::identity(1));
        assert_eq!(generator_matrix(1), polarizing_kernel());
        let generator = generator_matrix(3);
        assert_eq!(generator.num_rows(), 8);
        assert_eq!(generator.row(5).to_vec(), [One, One, Zero, Zero, One, One, Zero, Zero]);
        // Entry (i, j) is one iff the binary representation of j is covered by that of i
        for i in 0 .. 8 {
            for j in 0 .. 8 {
                assert_eq!(generator.get(i, j), Bit::from(j & !i == 0));
            }
        }
    }

    #[test]
    fn test_generator_matrix_is_self_inverse() {
        for num_stages in 0 .. 7 {
            let generator = generator_matrix(num_stages);
            assert_eq!(
                generator.mul(&generator).unwrap(),
                BitMatrix::identity(1 << num_stages)
            );
        }
    }

    #[test]
    fn test_transform() {
        // Invalid input
        assert!(transform(&mut [Zero, One, One]).is_err());
        assert!(transform(&mut []).is_err());
        // Valid input
        let mut rng = StdRng::seed_from_u64(11);
        for num_stages in 0 .. 8 {
            let generator = generator_matrix(num_stages);
            for _ in 0 .. 10 {
                let bits = utils::random_bits_with(1 << num_stages, &mut rng);
                let mut transformed = bits.clone();
                transform(&mut transformed).unwrap();
                assert_eq!(transformed, generator.vec_mul(&bits).unwrap());
            }
        }
    }
}
