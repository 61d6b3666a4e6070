//! # Some useful functions for working with bit sequences
//!
//! The [`random_bits`] function returns a given number of random bits (and [`random_bits_with`]
//! does the same with a caller-supplied random number generator); the [`error_count`] function
//! returns the number of errors in a sequence with respect to a reference sequence; the
//! [`hamming_weight`] function counts the ones in a sequence; and the [`pack_bits`] and
//! [`unpack_bits`] functions convert between bits and bytes (most significant bit first).
//!
//! # Examples
//!
//! The code below illustrates the usage of the functions in this module.
//! ```
//! use polar::utils;
//!
//! let num_bits = 12;
//! let bits = utils::random_bits(num_bits);
//! let bytes = utils::pack_bits(&bits);
//! assert_eq!(bytes.len(), 2);
//! let bits_hat = utils::unpack_bits(&bytes, num_bits)?;
//! assert_eq!(utils::error_count(&bits_hat, &bits), 0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use rand::Rng;

use crate::{Bit, Error};

/// Returns given number of random bits.
///
/// # Parameters
///
/// - `num_bits`: Number of random bits to be generated.
///
/// # Returns
///
/// - `bits`: Random bits.
#[must_use]
pub fn random_bits(num_bits: usize) -> Vec<Bit> {
    random_bits_with(num_bits, &mut rand::rng())
}

/// Returns given number of random bits drawn from a given random number generator.
///
/// # Parameters
///
/// - `num_bits`: Number of random bits to be generated.
///
/// - `rng`: Random number generator to be used.
///
/// # Returns
///
/// - `bits`: Random bits.
pub fn random_bits_with<R: Rng>(num_bits: usize, rng: &mut R) -> Vec<Bit> {
    (0 .. num_bits)
        .map(|_| Bit::from(rng.random_bool(0.5)))
        .collect()
}

/// Returns number of errors in a sequence with respect to a reference sequence.
///
/// # Parameters
///
/// - `seq`: Sequence in which errors must be counted.
///
/// - `ref_seq`: Reference sequence to which the given sequence is compared.
///
/// # Returns
///
/// - `err_count`: Number of positions in which the two sequences differ. If they are of different
///   lengths, then the longer sequence is effectively truncated to the length of the shorter one.
pub fn error_count<T: PartialEq>(seq: &[T], ref_seq: &[T]) -> usize {
    ref_seq
        .iter()
        .zip(seq.iter())
        .filter(|&(x, y)| x != y)
        .count()
}

/// Returns number of ones in a bit sequence.
#[must_use]
pub fn hamming_weight(bits: &[Bit]) -> usize {
    bits.iter().filter(|&&bit| bit == Bit::One).count()
}

/// Returns bytes obtained by packing bits eight to a byte, most significant bit first.
///
/// # Parameters
///
/// - `bits`: Bits to be packed. If the number of bits is not a multiple of `8`, then the last
///   byte is padded with zeros in its least significant positions.
///
/// # Returns
///
/// - `bytes`: Packed bytes.
#[must_use]
pub fn pack_bits(bits: &[Bit]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |byte, (k, &bit)| byte | (u8::from(bit) << (7 - k)))
        })
        .collect()
}

/// Returns bits obtained by unpacking bytes, most significant bit first.
///
/// # Parameters
///
/// - `bytes`: Bytes to be unpacked.
///
/// - `num_bits`: Number of bits to be returned (any remaining padding bits are ignored).
///
/// # Returns
///
/// - `bits`: Unpacked bits.
///
/// # Errors
///
/// Returns an error if `bytes` holds fewer than `num_bits` bits.
pub fn unpack_bits(bytes: &[u8], num_bits: usize) -> Result<Vec<Bit>, Error> {
    if 8 * bytes.len() < num_bits {
        return Err(Error::InvalidInput(format!(
            "Cannot unpack {num_bits} bits from {} bytes",
            bytes.len()
        )));
    }
    Ok((0 .. num_bits)
        .map(|k| Bit::from((bytes[k / 8] >> (7 - k % 8)) & 1 == 1))
        .collect())
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use Bit::{One, Zero};

    #[test]
    fn test_random_bits() {
        let num_bits = 0;
        assert!(random_bits(num_bits).is_empty());
        let num_bits = 10000;
        let bits = random_bits(num_bits);
        let num_zeros = bits.iter().filter(|&b| *b == Zero).count();
        let num_ones = bits.iter().filter(|&b| *b == One).count();
        assert!(num_zeros > 9 * num_bits / 20 && num_ones > 9 * num_bits / 20);
    }

    #[test]
    fn test_random_bits_with() {
        let bits = random_bits_with(64, &mut StdRng::seed_from_u64(7));
        assert_eq!(bits.len(), 64);
        assert_eq!(bits, random_bits_with(64, &mut StdRng::seed_from_u64(7)));
    }

    #[test]
    fn test_error_count() {
        assert_eq!(error_count(&[], &[One, Zero]), 0);
        assert_eq!(error_count(&[One, Zero], &[]), 0);
        // Longer `seq`
        let ref_seq = [One, Zero, Zero, One, One, One, Zero, Zero];
        let seq = [One, One, Zero, Zero, One, One, Zero, Zero, Zero, One];
        assert_eq!(error_count(&seq, &ref_seq), 2);
        // Shorter `seq`
        let ref_seq = [One, Zero, Zero, One, One, One, Zero, Zero, Zero, One];
        let seq = [One, One, Zero, Zero, One, One, Zero, Zero];
        assert_eq!(error_count(&seq, &ref_seq), 2);
    }

    #[test]
    fn test_hamming_weight() {
        assert_eq!(hamming_weight(&[]), 0);
        assert_eq!(hamming_weight(&[One, Zero, One, One]), 3);
    }

    #[test]
    fn test_pack_bits() {
        assert!(pack_bits(&[]).is_empty());
        let bits = [One, Zero, One, One, Zero, Zero, One, Zero, One, One];
        assert_eq!(pack_bits(&bits), [0b1011_0010, 0b1100_0000]);
    }

    #[test]
    fn test_unpack_bits() {
        // Invalid input
        assert!(unpack_bits(&[0xff], 9).is_err());
        // Valid input
        assert_eq!(
            unpack_bits(&[0b1011_0010, 0b1100_0000], 10).unwrap(),
            [One, Zero, One, One, Zero, Zero, One, Zero, One, One]
        );
        assert_eq!(unpack_bits(&[0x80], 1).unwrap(), [One]);
    }
}
