//! Reed-Solomon Error Correction Module
//!
//! This module provides the systematic Reed-Solomon codec used for NAND block ECC.
//! The NAND code works over Galois Field GF(2^10) and corrects up to four symbols.
//!
//! - [`galois`]: log/antilog tables for GF(2^m)
//! - [`generator`]: generator polynomial with roots `alpha^1 .. alpha^2t`
//! - [`encoder`]: LFSR parity computation
//! - [`decoder`]: syndromes, Berlekamp-Massey, Chien search and Forney correction
//! - [`codec`]: the [`ReedSolomon`] bundle tying them together

pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod galois;
pub mod generator;

pub use codec::{CodeParameters, ReedSolomon};
pub use decoder::{ErrorCorrection, ErrorLocation, ErrorLocator, Syndromes};
pub use galois::FieldContext;
pub use generator::GeneratorPolynomial;
