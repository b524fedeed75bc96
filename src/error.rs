//! Error types for ECC operations

use std::path::PathBuf;
use thiserror::Error;

/// Why a received block could not be corrected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UncorrectableReason {
    /// Berlekamp-Massey produced a locator with more roots than the code can fix
    #[error("error locator degree {degree} exceeds correction capability {capability}")]
    LocatorDegree { degree: usize, capability: usize },

    /// Chien search found a different number of roots than the locator degree
    #[error("found {roots} roots for an error locator of degree {degree}")]
    RootCountMismatch { roots: usize, degree: usize },

    /// Formal derivative of the locator vanished at an error location
    #[error("error locator derivative is zero at position {position}")]
    ZeroDerivative { position: usize },

    /// Correction landed in the implicit zero padding of a shortened code
    #[error("correction at symbol {position} falls outside the data block")]
    OutsideBlock { position: usize },

    /// Corrected data symbol is not a byte
    #[error("corrected symbol {value:#x} at position {position} does not fit in a byte")]
    SymbolOverflow { position: usize, value: u16 },
}

/// Errors that can occur while encoding or correcting blocks
#[derive(Debug, Error)]
pub enum EccError {
    /// Input symbol is not an element of the field
    #[error("Symbol {value:#x} at position {position} is not an element of GF(2^{symbol_bits})")]
    InvalidSymbol {
        position: usize,
        value: u16,
        symbol_bits: u32,
    },

    /// Error pattern exceeds the correction capability of the code
    #[error("Uncorrectable block: {0}")]
    Uncorrectable(UncorrectableReason),

    /// Code or block parameters are unusable
    #[error("Invalid code parameters: {0}")]
    InvalidParameters(String),

    /// Block slice has the wrong length
    #[error("Block length mismatch: got {actual} bytes, expected {expected}")]
    BlockLength { actual: usize, expected: usize },

    /// ECC slice has the wrong length
    #[error("ECC length mismatch: got {actual} bytes, expected {expected}")]
    EccLength { actual: usize, expected: usize },

    /// Failed to read or write an image or ECC file
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl EccError {
    pub fn is_uncorrectable(&self) -> bool {
        matches!(self, EccError::Uncorrectable(_))
    }
}

impl From<UncorrectableReason> for EccError {
    fn from(reason: UncorrectableReason) -> Self {
        EccError::Uncorrectable(reason)
    }
}

/// Type alias for Result with EccError
pub type Result<T> = std::result::Result<T, EccError>;
