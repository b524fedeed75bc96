//! Configuration for block ECC operations

use crate::ecc::{BlockCodec, ECC_CHUNK_SIZE};
use crate::error::{EccError, Result};
use crate::reed_solomon::CodeParameters;

fn parse_count(value: &str, what: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|_| EccError::InvalidParameters(format!("{} {:?} is not a number", what, value)))
}

/// Configuration for encoding and correcting images
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EccConfig {
    /// Reed-Solomon code shape
    pub code: CodeParameters,
    /// Bytes per ECC block
    pub block_size: usize,
    /// Number of threads for computation (0 = auto-detect)
    pub threads: usize,
    /// Whether to process blocks in parallel (false = single-threaded)
    pub parallel: bool,
}

impl Default for EccConfig {
    fn default() -> Self {
        Self {
            code: CodeParameters::NAND,
            block_size: ECC_CHUNK_SIZE,
            threads: 0, // Auto-detect CPU cores
            parallel: true,
        }
    }
}

impl EccConfig {
    pub fn new(threads: usize, parallel: bool) -> Self {
        Self {
            threads,
            parallel,
            ..Self::default()
        }
    }

    pub fn from_args(matches: &clap::ArgMatches) -> Result<Self> {
        let threads = match matches.get_one::<String>("threads") {
            Some(s) => parse_count(s, "thread count")?,
            None => 0,
        };
        let parallel = !matches.get_flag("no-parallel");

        let block_size = match matches.get_one::<String>("block-size") {
            Some(s) => parse_count(s, "block size")?,
            None => ECC_CHUNK_SIZE,
        };

        Ok(Self {
            block_size,
            ..Self::new(threads, parallel)
        })
    }

    /// Get effective thread count (auto-detect if 0)
    pub fn effective_threads(&self) -> usize {
        match (self.parallel, self.threads) {
            (false, _) => 1, // Sequential mode always uses single thread
            (true, 0) => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4), // Auto-detect CPU cores
            (true, n) => n,  // Use specified thread count
        }
    }

    /// Block codec for this configuration, reusing the shared NAND tables when possible
    pub fn block_codec(&self) -> Result<BlockCodec> {
        if self.code == CodeParameters::NAND && self.block_size == ECC_CHUNK_SIZE {
            return Ok(BlockCodec::nand().clone());
        }
        BlockCodec::new(self.code, self.block_size)
    }
}
