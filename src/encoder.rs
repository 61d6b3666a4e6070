//! Non-systematic polar encoder
//!
//! The information bits are placed at the information positions of a length-`N` vector, the
//! frozen values at the frozen positions, and the resulting vector is multiplied by the generator
//! matrix. The [`encoder`] function does this with the `O(N log N)` polar transform, while
//! [`matrix_encoder`] multiplies by the materialized `N x N` generator matrix and is only meant as
//! a reference.

use crate::{kernel, Bit, Error, FrozenBit, FrozenMap};

/// Returns input to the polar transform for given information bits.
///
/// # Parameters
///
/// - `info_bits`: Information bits, in increasing order of information position.
///
/// - `frozen_map`: Frozen map of the code.
///
/// # Returns
///
/// - `bits`: Vector holding the information bits at the information positions and the frozen
///   values at the frozen positions.
///
/// # Errors
///
/// Returns an error if the number of information bits is not equal to the number of information
/// positions in `frozen_map`.
pub fn transform_input(info_bits: &[Bit], frozen_map: &FrozenMap) -> Result<Vec<Bit>, Error> {
    frozen_map.check_info_bits(info_bits)?;
    let mut bits: Vec<Bit> = frozen_map
        .entries()
        .iter()
        .map(|&entry| match entry {
            FrozenBit::Info => Bit::Zero,
            FrozenBit::Frozen(bit) => bit,
        })
        .collect();
    for (&pos, &bit) in frozen_map.info_positions().iter().zip(info_bits) {
        bits[pos] = bit;
    }
    Ok(bits)
}

/// Returns code bits from non-systematic polar encoder for given information bits.
///
/// # Parameters
///
/// - `info_bits`: Information bits to be encoded, in increasing order of information position.
///
/// - `frozen_map`: Frozen map of the code.
///
/// # Returns
///
/// - `code_bits`: Code bits from the non-systematic polar encoder.
///
/// # Errors
///
/// Returns an error if the number of information bits is not equal to the number of information
/// positions in `frozen_map`.
///
/// # Examples
/// ```
/// use polar::{encoder, Bit, FrozenMap};
/// use Bit::{One, Zero};
///
/// let frozen_map = FrozenMap::from_frozen_positions(8, &[0, 2, 4])?;
/// let info_bits = [One, Zero, One, One, Zero];
/// let code_bits = encoder(&info_bits, &frozen_map)?;
/// assert_eq!(code_bits, [One, Zero, One, Zero, Zero, One, One, Zero]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn encoder(info_bits: &[Bit], frozen_map: &FrozenMap) -> Result<Vec<Bit>, Error> {
    let mut code_bits = transform_input(info_bits, frozen_map)?;
    kernel::transform(&mut code_bits)?;
    Ok(code_bits)
}

/// Returns code bits from non-systematic polar encoder, computed by multiplication with the
/// generator matrix.
///
/// This takes `O(N^2)` time and memory, and is meant only as a reference for [`encoder`].
///
/// # Errors
///
/// Returns an error if the number of information bits is not equal to the number of information
/// positions in `frozen_map`.
pub fn matrix_encoder(info_bits: &[Bit], frozen_map: &FrozenMap) -> Result<Vec<Bit>, Error> {
    let generator = kernel::generator_matrix(kernel::num_stages(frozen_map.block_length())?);
    generator.vec_mul(&transform_input(info_bits, frozen_map)?)
}

#[cfg(test)]
mod tests_of_functions {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::{utils, BecConstruction, FrozenSetProvider};
    use Bit::{One, Zero};
    use FrozenBit::{Frozen, Info};

    #[test]
    fn test_transform_input() {
        let frozen_map = FrozenMap::new(&[Frozen(One), Info, Frozen(Zero), Info]).unwrap();
        // Invalid input
        assert!(transform_input(&[One], &frozen_map).is_err());
        assert!(transform_input(&[One, One, One], &frozen_map).is_err());
        // Valid input
        assert_eq!(
            transform_input(&[Zero, One], &frozen_map).unwrap(),
            [One, Zero, Zero, One]
        );
    }

    #[test]
    fn test_encoder() {
        let frozen_map = FrozenMap::from_frozen_positions(8, &[0, 2, 4]).unwrap();
        // Invalid input
        assert!(encoder(&[One, Zero, One, One], &frozen_map).is_err());
        // Valid input
        let code_bits = encoder(&[One, Zero, One, One, Zero], &frozen_map).unwrap();
        assert_eq!(code_bits, [One, Zero, One, Zero, Zero, One, One, Zero]);
    }

    #[test]
    fn test_matrix_encoder() {
        let frozen_map = FrozenMap::from_frozen_positions(8, &[0, 2, 4]).unwrap();
        // Invalid input
        assert!(matrix_encoder(&[One, Zero, One, One, Zero, One], &frozen_map).is_err());
        // Valid input
        let code_bits = matrix_encoder(&[One, Zero, One, One, Zero], &frozen_map).unwrap();
        assert_eq!(code_bits, [One, Zero, One, Zero, Zero, One, One, Zero]);
    }

    #[test]
    fn test_encoder_matches_matrix_encoder() {
        let mut rng = StdRng::seed_from_u64(3);
        let construction = BecConstruction::new(1.0).unwrap();
        for (block_length, num_info_bits) in [(2, 1), (16, 7), (64, 40), (128, 64)] {
            let frozen_map = construction.frozen_map(block_length, num_info_bits).unwrap();
            for _ in 0 .. 20 {
                let info_bits = utils::random_bits_with(num_info_bits, &mut rng);
                assert_eq!(
                    encoder(&info_bits, &frozen_map).unwrap(),
                    matrix_encoder(&info_bits, &frozen_map).unwrap()
                );
            }
        }
    }
}
