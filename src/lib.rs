//! Reed-Solomon ECC for NAND flash
//!
//! Every 512-byte block gets 10 bytes of parity from a shortened RS(1023, 1015) code
//! over GF(2^10), correcting up to four 10-bit symbols per block. The parity layout
//! matches what existing flash controllers write to the out-of-band area.
//!
//! ```
//! let mut block = [0x5Au8; 512];
//! let stored = nandecc::compute_ecc(&block).unwrap();
//!
//! block[17] ^= 0x04;
//! let computed = nandecc::compute_ecc(&block).unwrap();
//! assert_eq!(nandecc::correct(&mut block, &stored, &computed).unwrap(), 1);
//! assert_eq!(block, [0x5Au8; 512]);
//! ```

pub mod args;
pub mod config;
pub mod domain;
pub mod ecc;
pub mod error;
pub mod image;
pub mod reed_solomon;
pub mod reporters;

pub use args::parse_args;
pub use domain::{EccCode, FieldElement, LogIndex};
pub use ecc::{compute_ecc, correct, BlockCodec, ECC_CHUNK_SIZE, ECC_SIZE};
pub use error::{EccError, Result, UncorrectableReason};
pub use reed_solomon::{CodeParameters, ReedSolomon};
