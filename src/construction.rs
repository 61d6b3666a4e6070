//! Reference frozen-set construction for a binary erasure channel (BEC)
//!
//! The reliability of each synthetic bit-channel is measured by its Bhattacharyya parameter,
//! tracked in the log domain. Starting from a BEC whose erasure probability is derived from the
//! design SNR and the code rate, one polarization step maps a channel with parameter `Z` to a
//! worse channel with parameter `2Z - Z^2` (lower index) and a better channel with parameter
//! `Z^2` (higher index). The `K` channels with the smallest parameters carry information bits and
//! the remaining ones are frozen to `Zero`.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{kernel, Bit, Error, FrozenBit, FrozenMap, FrozenSetProvider};

/// Frozen-set construction based on Bhattacharyya parameters of a BEC at a given design SNR
#[derive(Clone, PartialEq, Debug, Copy, Deserialize, Serialize)]
pub struct BecConstruction {
    /// Design SNR (dB)
    design_snr_db: f64,
}

impl BecConstruction {
    /// Returns BEC construction for given design SNR.
    ///
    /// # Parameters
    ///
    /// - `design_snr_db`: Design signal-to-noise ratio (dB).
    ///
    /// # Errors
    ///
    /// Returns an error if `design_snr_db` is not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use polar::{BecConstruction, FrozenSetProvider};
    ///
    /// let construction = BecConstruction::new(0.0)?;
    /// let frozen_map = construction.frozen_map(8, 4)?;
    /// assert_eq!(frozen_map.frozen_positions(), [0, 1, 2, 4]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(design_snr_db: f64) -> Result<Self, Error> {
        if design_snr_db.is_finite() {
            Ok(Self { design_snr_db })
        } else {
            Err(Error::InvalidConfiguration(format!(
                "Design SNR must be finite (found {design_snr_db})"
            )))
        }
    }

    /// Returns design SNR (dB).
    #[must_use]
    pub fn design_snr_db(&self) -> f64 {
        self.design_snr_db
    }

    /// Returns natural logarithm of the Bhattacharyya parameter of each bit-channel.
    ///
    /// # Errors
    ///
    /// Returns an error if `block_length` is not a power of `2` or if `num_info_bits` exceeds
    /// `block_length`.
    #[allow(clippy::cast_precision_loss)]
    pub fn log_bhattacharyya(
        &self,
        block_length: usize,
        num_info_bits: usize,
    ) -> Result<Vec<f64>, Error> {
        let num_stages = kernel::num_stages(block_length)?;
        if num_info_bits > block_length {
            return Err(Error::InvalidConfiguration(format!(
                "Number of information bits ({num_info_bits}) exceeds block length \
                 ({block_length})"
            )));
        }
        let code_rate = num_info_bits as f64 / block_length as f64;
        let mut log_z = vec![0.0; block_length];
        log_z[0] = -code_rate * 10f64.powf(0.1 * self.design_snr_db);
        for level in (0 .. num_stages).rev() {
            let half_len = 1 << level;
            for start in (0 .. block_length).step_by(2 * half_len) {
                let t = log_z[start];
                log_z[start] = log_domain_diff(std::f64::consts::LN_2 + t, 2.0 * t);
                log_z[start + half_len] = 2.0 * t;
            }
        }
        Ok(log_z)
    }
}

impl FrozenSetProvider for BecConstruction {
    fn frozen_map(&self, block_length: usize, num_info_bits: usize) -> Result<FrozenMap, Error> {
        let log_z = self.log_bhattacharyya(block_length, num_info_bits)?;
        // Stable sort, so that ties are broken in favor of the lower index
        let mut order: Vec<usize> = (0 .. block_length).collect();
        order.sort_by(|&a, &b| log_z[a].total_cmp(&log_z[b]));
        let mut entries = vec![FrozenBit::Frozen(Bit::Zero); block_length];
        for &pos in &order[.. num_info_bits] {
            entries[pos] = FrozenBit::Info;
        }
        let frozen_map = FrozenMap::new(&entries)?;
        debug!(
            "BEC construction ({block_length}, {num_info_bits}) at {} dB: frozen positions {:?}",
            self.design_snr_db,
            frozen_map.frozen_positions()
        );
        Ok(frozen_map)
    }
}

/// Returns `ln(e^x - e^y)` for `x > y`.
fn log_domain_diff(x: f64, y: f64) -> f64 {
    x + (-(y - x).exp()).ln_1p()
}

#[cfg(test)]
mod tests_of_bec_construction {
    use float_eq::assert_float_eq;

    use super::*;

    #[test]
    fn test_new() {
        // Invalid input
        assert!(BecConstruction::new(f64::NAN).is_err());
        assert!(BecConstruction::new(f64::INFINITY).is_err());
        // Valid input
        let construction = BecConstruction::new(-1.5).unwrap();
        assert_float_eq!(construction.design_snr_db(), -1.5, abs <= 1e-12);
    }

    #[test]
    fn test_log_bhattacharyya() {
        let construction = BecConstruction::new(0.0).unwrap();
        // Invalid input
        assert!(construction.log_bhattacharyya(6, 3).is_err());
        assert!(construction.log_bhattacharyya(8, 9).is_err());
        // Valid input
        assert_float_eq!(
            construction.log_bhattacharyya(2, 1).unwrap(),
            [-0.168_203_434_248_813_8, -1.0].to_vec(),
            abs_all <= 1e-9
        );
        assert_float_eq!(
            construction.log_bhattacharyya(4, 2).unwrap(),
            [
                -0.024_260_573_024_445_8,
                -0.336_406_868_497_627_6,
                -0.510_119_874_355_25,
                -2.0
            ]
            .to_vec(),
            abs_all <= 1e-9
        );
        assert_float_eq!(
            construction.log_bhattacharyya(4, 0).unwrap(),
            [0.0, 0.0, 0.0, 0.0].to_vec(),
            abs_all <= 1e-12
        );
    }

    #[test]
    fn test_frozen_map() {
        let construction = BecConstruction::new(0.0).unwrap();
        assert_eq!(construction.frozen_map(4, 2).unwrap().frozen_positions(), [0, 1]);
        assert_eq!(
            construction.frozen_map(8, 5).unwrap().frozen_positions(),
            [0, 1, 2]
        );
        assert_eq!(
            construction.frozen_map(16, 8).unwrap().frozen_positions(),
            [0, 1, 2, 3, 4, 5, 6, 8]
        );
        assert_eq!(
            construction.frozen_map(32, 16).unwrap().info_positions(),
            [11, 13, 14, 15, 19, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31]
        );
        assert_eq!(
            construction.frozen_map(64, 32).unwrap().info_positions(),
            [
                15, 23, 26, 27, 28, 29, 30, 31, 38, 39, 41, 42, 43, 44, 45, 46, 47, 49, 50, 51, 52,
                53, 54, 55, 56, 57, 58, 59, 60, 61, 62, 63
            ]
        );
        // Degenerate rates
        assert_eq!(construction.frozen_map(8, 0).unwrap().num_frozen_bits(), 8);
        assert_eq!(construction.frozen_map(8, 8).unwrap().num_frozen_bits(), 0);
    }

    #[test]
    fn test_frozen_map_is_deterministic() {
        let construction = BecConstruction::new(2.0).unwrap();
        for num_stages in 1 .. 9 {
            let block_length = 1 << num_stages;
            let num_info_bits = block_length / 2;
            let frozen_map = construction.frozen_map(block_length, num_info_bits).unwrap();
            assert!(frozen_map.check(block_length, num_info_bits).is_ok());
            assert_eq!(
                frozen_map,
                construction.frozen_map(block_length, num_info_bits).unwrap()
            );
        }
    }

    #[test]
    fn test_log_domain_diff() {
        assert_float_eq!(
            log_domain_diff(1.0, 0.0),
            (1f64.exp() - 1.0).ln(),
            abs <= 1e-12
        );
        assert_float_eq!(log_domain_diff(0.0, -1e3), 0.0, abs <= 1e-12);
    }
}
