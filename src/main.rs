//! This crate checks the systematic polar encoder over a sweep of design SNR values. For each
//! configuration, the frozen set is chosen by the BEC construction, random messages are encoded,
//! and each codeword is checked for the systematic property and against a reference encoder.
//! Parameters are specified on the command line, and results are saved to a JSON file.
//!
//! Build the executable with `cargo build --release` and then run `./target/release/polar -h` for
//! help on the command-line interface. Set `RUST_LOG=info` (or `debug`) to see progress messages.

#![warn(
    clippy::complexity,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_allocation,
    unused_import_braces,
    unused_qualifications
)]

use anyhow::Result;
use clap::{crate_name, crate_version, value_parser, Arg, ArgMatches, Command};
use polar::sim;
use std::time::Instant;

/// Main function
fn main() -> Result<()> {
    env_logger::init();
    let timer = Instant::now();
    let mut rng = rand::rng();
    let matches = command_line_parser().get_matches();
    let json_filename = &json_filename_from_matches(&matches);
    let all_results = sim::run_sims(&all_sim_params(&matches), &mut rng, json_filename)?;
    let num_failed = all_results
        .iter()
        .filter(|results| !results.all_passed())
        .count();
    if num_failed > 0 {
        anyhow::bail!("{num_failed} of {} configurations failed", all_results.len());
    }
    eprintln!("Elapsed time: {:.3?}", timer.elapsed());
    Ok(())
}

/// Returns command line parser.
fn command_line_parser() -> Command {
    Command::new(crate_name!())
        .version(crate_version!())
        .about("Checks the systematic polar encoder over a sweep of design SNR values")
        .arg(block_length())
        .arg(num_info_bits())
        .arg(first_design_snr_db())
        .arg(design_snr_step_db())
        .arg(num_design_snr())
        .arg(num_messages())
        .arg(json_filename())
}

/// Returns argument for block length.
fn block_length() -> Arg {
    Arg::new("block_length")
        .short('n')
        .value_parser(value_parser!(usize))
        .default_value("64")
        .help("Block length (power of 2)")
}

/// Returns argument for number of information bits per block.
fn num_info_bits() -> Arg {
    Arg::new("num_info_bits")
        .short('k')
        .value_parser(value_parser!(usize))
        .default_value("32")
        .help("Number of information bits per block")
}

/// Returns argument for first design SNR (dB).
fn first_design_snr_db() -> Arg {
    Arg::new("first_design_snr_db")
        .short('d')
        .value_parser(value_parser!(f64))
        .allow_negative_numbers(true)
        .default_value("0.0")
        .help("First design SNR (dB)")
}

/// Returns argument for design SNR step (dB).
fn design_snr_step_db() -> Arg {
    Arg::new("design_snr_step_db")
        .short('p')
        .value_parser(value_parser!(f64))
        .allow_negative_numbers(true)
        .default_value("1.0")
        .help("Design SNR step (dB)")
}

/// Returns argument for number of design SNR values.
fn num_design_snr() -> Arg {
    Arg::new("num_design_snr")
        .short('s')
        .value_parser(value_parser!(u32))
        .default_value("1")
        .help("Number of design SNR values")
}

/// Returns argument for number of random messages per configuration.
fn num_messages() -> Arg {
    Arg::new("num_messages")
        .short('m')
        .value_parser(value_parser!(u32))
        .default_value("1000")
        .help("Number of random messages per configuration")
}

/// Returns argument for name of JSON file to which results must be saved.
fn json_filename() -> Arg {
    Arg::new("json_filename")
        .short('f')
        .default_value("results.json")
        .help("Name of JSON file to which results must be saved")
}

/// Returns simulation parameters based on command-line arguments.
fn all_sim_params(matches: &ArgMatches) -> Vec<sim::SimParams> {
    // OK to unwrap: All command-line arguments have default values, so an error cannot occur
    // in any of the associated functions called below.
    all_design_snr_db_from_matches(matches)
        .into_iter()
        .map(|design_snr_db| sim::SimParams {
            block_length: block_length_from_matches(matches),
            num_info_bits: num_info_bits_from_matches(matches),
            design_snr_db,
            num_messages: num_messages_from_matches(matches),
        })
        .collect()
}

/// Returns block length.
fn block_length_from_matches(matches: &ArgMatches) -> usize {
    *matches.get_one("block_length").unwrap()
}

/// Returns number of information bits per block.
fn num_info_bits_from_matches(matches: &ArgMatches) -> usize {
    *matches.get_one("num_info_bits").unwrap()
}

/// Returns all design SNR (dB) values.
fn all_design_snr_db_from_matches(matches: &ArgMatches) -> Vec<f64> {
    let first_design_snr_db: f64 = *matches.get_one("first_design_snr_db").unwrap();
    let design_snr_step_db: f64 = *matches.get_one("design_snr_step_db").unwrap();
    let num_design_snr: u32 = *matches.get_one("num_design_snr").unwrap();
    (0 .. num_design_snr)
        .map(|n| first_design_snr_db + design_snr_step_db * f64::from(n))
        .collect()
}

/// Returns number of random messages per configuration.
fn num_messages_from_matches(matches: &ArgMatches) -> u32 {
    *matches.get_one("num_messages").unwrap()
}

/// Returns name of JSON file to which simulation results must be saved.
fn json_filename_from_matches(matches: &ArgMatches) -> String {
    matches
        .get_one::<String>("json_filename")
        .unwrap()
        .to_string()
}
