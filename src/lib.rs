//! This crate implements encoding functionality for polar codes, with emphasis on systematic
//! encoding. A polar code of block length `N = 2^n` multiplies a length-`N` vector by the `n`-fold
//! Kronecker power of the kernel `[[1, 0], [1, 1]]`; a frozen map decides which positions of that
//! vector carry information bits and which are frozen to known values.
//!
//! The systematic encoder returns the codeword whose bits at the information positions equal the
//! information bits, in `O(N log N)` time. Reference encoders based on explicit generator matrices,
//! a BEC-based frozen-set construction, and checks of the algebraic properties of the resulting
//! codes (parity-check matrix, rank, minimum distance) are also provided.
//!
//! # Examples
//!
//! ```
//! use polar::{systematic_encoder, Bit, BecConstruction, FrozenSetProvider};
//!
//! let (block_length, num_info_bits) = (64, 32);
//! let frozen_map = BecConstruction::new(0.0)?.frozen_map(block_length, num_info_bits)?;
//! let info_bits = polar::utils::random_bits(num_info_bits);
//! let codeword = systematic_encoder(&info_bits, block_length, &frozen_map)?;
//! let systematic_bits: Vec<Bit> = frozen_map
//!     .info_positions()
//!     .into_iter()
//!     .map(|pos| codeword.code_bits[pos])
//!     .collect();
//! assert_eq!(systematic_bits, info_bits);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

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

pub mod cache;
mod common;
mod construction;
mod encoder;
mod frozen;
pub mod kernel;
mod matrix;
pub mod sim;
mod systematic;
pub mod utils;
pub mod verifier;

pub use common::{Bit, Error};
pub use construction::BecConstruction;
pub use encoder::{encoder, matrix_encoder, transform_input};
pub use frozen::{FrozenBit, FrozenMap, FrozenSetProvider};
pub use matrix::BitMatrix;
pub use systematic::{
    systematic_encoder, systematic_matrix_encoder, systematic_transform_encoder,
    SystematicCodeword,
};
