//! Simulator to check systematic polar codes over a sweep of configurations
//!
//! Each configuration names a block length, a number of information bits and a design SNR for the
//! BEC frozen-set construction. For every configuration, random messages are encoded with the
//! systematic encoder and each codeword is checked for the systematic property and against the
//! double-transform reference. Algebraic properties of the code (rank of the parity-check matrix,
//! minimum distance) are computed when the code is small enough. Results are saved to a JSON file.

use std::fs::File;
use std::io::BufWriter;

use log::{info, warn};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cache::{FrozenMapCache, GeneratorCache};
use crate::verifier::CodeProperties;
use crate::{
    systematic_encoder, systematic_transform_encoder, utils, Bit, BecConstruction, Error,
    FrozenBit, FrozenMap,
};

/// Largest block length for which algebraic properties of the code are computed
pub const MAX_BLOCK_LENGTH_FOR_PROPERTIES: usize = 256;

/// Largest number of information bits for which all codewords are enumerated
pub const MAX_INFO_BITS_FOR_ENUMERATION: usize = 16;

/// Parameters for a systematic polar code check
#[derive(Clone, PartialEq, Debug, Copy, Deserialize, Serialize)]
pub struct SimParams {
    /// Block length (must be a power of `2`)
    pub block_length: usize,
    /// Number of information bits per block
    pub num_info_bits: usize,
    /// Design SNR (dB) for the BEC frozen-set construction
    pub design_snr_db: f64,
    /// Number of random messages to be encoded
    pub num_messages: u32,
}

impl SimParams {
    /// Prints simulation parameters.
    fn print(&self) {
        info!(
            "N = {}, K = {}, design SNR = {} dB, {} messages",
            self.block_length, self.num_info_bits, self.design_snr_db, self.num_messages
        );
    }
}

/// Results from a systematic polar code check
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct SimResults {
    /// Simulation parameters
    pub params: SimParams,
    /// Frozen positions chosen by the BEC construction
    pub frozen_positions: Vec<usize>,
    /// Number of messages whose codeword did not reproduce the message at the information
    /// positions (or whose transform-domain vector did not hold the frozen values)
    pub num_systematic_failures: u32,
    /// Number of messages whose codeword differed from the double-transform reference
    pub num_reference_mismatches: u32,
    /// Total number of codeword bits that differed from the double-transform reference
    pub num_reference_bit_errors: usize,
    /// Algebraic properties of the code, if the block length is small enough
    pub properties: Option<CodeProperties>,
}

impl SimResults {
    /// Returns `true` if every message passed every check, and the algebraic properties (if
    /// computed) are those of a valid code. The minimum distance found by enumerating codewords
    /// must agree with that found from the parity matrix.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.num_systematic_failures == 0
            && self.num_reference_mismatches == 0
            && self.properties.map_or(true, |properties| {
                properties.is_orthogonal
                    && properties.parity_check_rank
                        == self.params.block_length - self.params.num_info_bits
                    && properties
                        .min_distance_exhaustive
                        .map_or(true, |d| Some(d) == properties.min_distance_from_parity)
            })
    }

    /// Prints summary of results.
    fn print(&self) {
        let distance = self
            .properties
            .and_then(|properties| properties.min_distance_from_parity)
            .map_or_else(|| "not computed".to_string(), |d| d.to_string());
        if self.all_passed() {
            info!(
                "All {} messages passed (minimum distance {distance})",
                self.params.num_messages
            );
        } else {
            warn!(
                "{} systematic failures and {} reference mismatches ({} bit errors) in {} messages",
                self.num_systematic_failures,
                self.num_reference_mismatches,
                self.num_reference_bit_errors,
                self.params.num_messages
            );
            if let Some(properties) = self.properties {
                warn!(
                    "Parity-check rank {}, orthogonal: {}, minimum distance {:?} (parity) vs. \
                     {:?} (enumeration)",
                    properties.parity_check_rank,
                    properties.is_orthogonal,
                    properties.min_distance_from_parity,
                    properties.min_distance_exhaustive
                );
            }
        }
    }
}

/// Runs checks of systematic polar codes, and saves results to a JSON file.
///
/// # Parameters
///
/// - `all_params`: Parameters for each configuration to be checked.
///
/// - `rng`: Random number generator for the messages.
///
/// - `json_filename`: Name of the JSON file to which results must be written.
///
/// # Returns
///
/// - `all_results`: Results for each configuration.
///
/// # Errors
///
/// Returns an error if any configuration is invalid, or if the results cannot be written to the
/// JSON file.
pub fn run_sims<R: Rng>(
    all_params: &[SimParams],
    rng: &mut R,
    json_filename: &str,
) -> Result<Vec<SimResults>, Error> {
    let mut caches: Vec<FrozenMapCache<BecConstruction>> = Vec::new();
    let mut generators = GeneratorCache::new();
    let mut all_results = Vec::with_capacity(all_params.len());
    for params in all_params {
        check_sim_params(params)?;
        params.print();
        let construction = BecConstruction::new(params.design_snr_db)?;
        let cache_index = match caches
            .iter()
            .position(|cache| cache.provider() == &construction)
        {
            Some(index) => index,
            None => {
                caches.push(FrozenMapCache::new(construction));
                caches.len() - 1
            }
        };
        let frozen_map =
            caches[cache_index].frozen_map(params.block_length, params.num_info_bits)?;
        let results = run_sim(params, frozen_map, &mut generators, rng)?;
        results.print();
        all_results.push(results);
    }
    save_results(&all_results, json_filename)?;
    Ok(all_results)
}

/// Runs checks for a single configuration with a given frozen map.
fn run_sim<R: Rng>(
    params: &SimParams,
    frozen_map: &FrozenMap,
    generators: &mut GeneratorCache,
    rng: &mut R,
) -> Result<SimResults, Error> {
    let messages: Vec<Vec<Bit>> = (0 .. params.num_messages)
        .map(|_| utils::random_bits_with(params.num_info_bits, rng))
        .collect();
    let outcomes = messages
        .par_iter()
        .map(|info_bits| check_message(info_bits, frozen_map))
        .collect::<Result<Vec<(bool, usize)>, Error>>()?;
    let properties = if params.block_length <= MAX_BLOCK_LENGTH_FOR_PROPERTIES {
        Some(CodeProperties::new(frozen_map, MAX_INFO_BITS_FOR_ENUMERATION, generators)?)
    } else {
        None
    };
    Ok(SimResults {
        params: *params,
        frozen_positions: frozen_map.frozen_positions(),
        num_systematic_failures: count_true(outcomes.iter().map(|&(systematic, _)| !systematic)),
        num_reference_mismatches: count_true(outcomes.iter().map(|&(_, errors)| errors > 0)),
        num_reference_bit_errors: outcomes.iter().map(|&(_, errors)| errors).sum(),
        properties,
    })
}

/// Encodes a message and returns whether the codeword is systematic, and the number of codeword
/// bits that differ from the double-transform reference.
fn check_message(info_bits: &[Bit], frozen_map: &FrozenMap) -> Result<(bool, usize), Error> {
    let codeword = systematic_encoder(info_bits, frozen_map.block_length(), frozen_map)?;
    let info_positions = frozen_map.info_positions();
    let is_systematic = info_positions
        .iter()
        .zip(info_bits)
        .all(|(&pos, &bit)| codeword.code_bits[pos] == bit)
        && frozen_map
            .entries()
            .iter()
            .zip(&codeword.transform_bits)
            .all(|(&entry, &bit)| match entry {
                FrozenBit::Info => true,
                FrozenBit::Frozen(frozen_bit) => bit == frozen_bit,
            });
    let reference = systematic_transform_encoder(info_bits, frozen_map)?;
    Ok((is_systematic, utils::error_count(&codeword.code_bits, &reference)))
}

/// Returns number of `true` values.
fn count_true(flags: impl Iterator<Item = bool>) -> u32 {
    flags.fold(0, |count, flag| count + u32::from(flag))
}

/// Saves results to a JSON file.
fn save_results(all_results: &[SimResults], json_filename: &str) -> Result<(), Error> {
    let writer = BufWriter::new(File::create(json_filename)?);
    serde_json::to_writer_pretty(writer, all_results)?;
    info!("Results saved to {json_filename}");
    Ok(())
}

/// Checks validity of simulation parameters.
fn check_sim_params(params: &SimParams) -> Result<(), Error> {
    if params.num_info_bits > params.block_length {
        return Err(Error::InvalidInput(format!(
            "Number of information bits ({}) exceeds block length ({})",
            params.num_info_bits, params.block_length
        )));
    }
    if params.num_messages == 0 {
        return Err(Error::InvalidInput(
            "Number of messages cannot be zero".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests_of_functions {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::FrozenSetProvider;

    fn params_for_test() -> SimParams {
        SimParams {
            block_length: 64,
            num_info_bits: 32,
            design_snr_db: -1.59,
            num_messages: 100,
        }
    }

    #[test]
    fn test_check_sim_params() {
        // Invalid input
        let mut params = params_for_test();
        params.num_info_bits = 65;
        assert!(check_sim_params(&params).is_err());
        let mut params = params_for_test();
        params.num_messages = 0;
        assert!(check_sim_params(&params).is_err());
        // Valid input
        assert!(check_sim_params(&params_for_test()).is_ok());
    }

    #[test]
    fn test_check_message() {
        let frozen_map = FrozenMap::from_frozen_positions(8, &[0, 2, 4]).unwrap();
        // Invalid input
        assert!(check_message(&[Bit::One], &frozen_map).is_err());
        // Valid input
        let info_bits = [Bit::One, Bit::Zero, Bit::One, Bit::One, Bit::Zero];
        assert_eq!(check_message(&info_bits, &frozen_map).unwrap(), (true, 0));
    }

    fn results_for_test() -> SimResults {
        SimResults {
            params: SimParams {
                block_length: 8,
                num_info_bits: 5,
                design_snr_db: 0.0,
                num_messages: 10,
            },
            frozen_positions: vec![0, 2, 4],
            num_systematic_failures: 0,
            num_reference_mismatches: 0,
            num_reference_bit_errors: 0,
            properties: Some(CodeProperties {
                parity_check_rank: 3,
                is_orthogonal: true,
                min_distance_from_parity: Some(2),
                min_distance_exhaustive: Some(2),
            }),
        }
    }

    #[test]
    fn test_all_passed() {
        assert!(results_for_test().all_passed());
        let mut results = results_for_test();
        results.properties = None;
        assert!(results.all_passed());
        let mut results = results_for_test();
        results.num_reference_mismatches = 1;
        results.num_reference_bit_errors = 3;
        assert!(!results.all_passed());
        let mut results = results_for_test();
        results.num_systematic_failures = 1;
        assert!(!results.all_passed());
        let mut results = results_for_test();
        results.properties.as_mut().unwrap().parity_check_rank = 2;
        assert!(!results.all_passed());
        let mut results = results_for_test();
        results.properties.as_mut().unwrap().is_orthogonal = false;
        assert!(!results.all_passed());
    }

    #[test]
    fn test_all_passed_needs_consistent_min_distance() {
        let mut results = results_for_test();
        results.properties.as_mut().unwrap().min_distance_exhaustive = Some(1);
        assert!(!results.all_passed());
        results.properties.as_mut().unwrap().min_distance_exhaustive = Some(3);
        assert!(!results.all_passed());
        results.properties.as_mut().unwrap().min_distance_from_parity = None;
        assert!(!results.all_passed());
        results.properties.as_mut().unwrap().min_distance_exhaustive = None;
        assert!(results.all_passed());
    }

    #[test]
    fn test_count_true() {
        assert_eq!(count_true([true, false, true].into_iter()), 2);
        assert_eq!(count_true(std::iter::empty()), 0);
    }

    #[test]
    fn test_run_sim() {
        let params = params_for_test();
        let frozen_map = BecConstruction::new(params.design_snr_db)
            .unwrap()
            .frozen_map(params.block_length, params.num_info_bits)
            .unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mut generators = GeneratorCache::new();
        let results = run_sim(&params, &frozen_map, &mut generators, &mut rng).unwrap();
        assert_eq!(results.num_systematic_failures, 0);
        assert_eq!(results.num_reference_mismatches, 0);
        assert_eq!(results.num_reference_bit_errors, 0);
        assert_eq!(generators.len(), 1);
        assert_eq!(results.frozen_positions, frozen_map.frozen_positions());
        let properties = results.properties.unwrap();
        assert_eq!(properties.parity_check_rank, 32);
        assert!(properties.is_orthogonal);
        assert_eq!(properties.min_distance_exhaustive, None);
        assert!(results.all_passed());
    }

    #[test]
    fn test_run_sims() {
        let json_filename = std::env::temp_dir()
            .join(format!("polar_sim_results_{}.json", std::process::id()))
            .to_string_lossy()
            .to_string();
        let all_params = [
            SimParams {
                block_length: 16,
                num_info_bits: 8,
                design_snr_db: 0.0,
                num_messages: 10,
            },
            SimParams {
                block_length: 512,
                num_info_bits: 256,
                design_snr_db: 0.0,
                num_messages: 10,
            },
        ];
        let mut rng = StdRng::seed_from_u64(7);
        let all_results = run_sims(&all_params, &mut rng, &json_filename).unwrap();
        assert_eq!(all_results.len(), 2);
        assert!(all_results.iter().all(SimResults::all_passed));
        let properties = all_results[0].properties.unwrap();
        assert_eq!(properties.min_distance_from_parity, Some(4));
        assert_eq!(properties.min_distance_exhaustive, Some(4));
        assert!(all_results[1].properties.is_none());
        let saved: Vec<SimResults> =
            serde_json::from_reader(File::open(&json_filename).unwrap()).unwrap();
        assert_eq!(saved, all_results);
        std::fs::remove_file(&json_filename).unwrap();
        // Invalid input
        let mut invalid_params = all_params;
        invalid_params[1].block_length = 500;
        assert!(run_sims(&invalid_params, &mut rng, &json_filename).is_err());
    }
}
