//! Block ECC over whole images
//!
//! An image is cut into `block_size` chunks, each with its own ECC entry. The ECC
//! entries are stored back to back in a sidecar stream, so block `i` owns bytes
//! `i * ecc_len .. (i + 1) * ecc_len`. A trailing partial chunk is treated as if it
//! were padded with 0xFF, the way erased flash reads.
//!
//! Blocks are independent, so both directions run on a rayon pool sized by
//! [`EccConfig::effective_threads`]. The codec tables are shared read-only.

use crate::config::EccConfig;
use crate::domain::EccCode;
use crate::ecc::BlockCodec;
use crate::error::{EccError, Result, UncorrectableReason};
use crate::reporters::ImageReporter;
use log::{debug, warn};
use rayon::prelude::*;
use std::borrow::Cow;
use std::fmt;
use std::path::Path;

/// Outcome of correcting every block of an image
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectionSummary {
    pub blocks: usize,
    pub clean_blocks: usize,
    pub corrected_blocks: usize,
    pub corrected_symbols: usize,
    /// Indices of blocks that were left as read
    pub uncorrectable: Vec<usize>,
}

impl CorrectionSummary {
    pub fn is_success(&self) -> bool {
        self.uncorrectable.is_empty()
    }
}

impl fmt::Display for CorrectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} blocks: {} clean, {} corrected ({} symbols), {} uncorrectable",
            self.blocks,
            self.clean_blocks,
            self.corrected_blocks,
            self.corrected_symbols,
            self.uncorrectable.len()
        )
    }
}

/// Number of ECC blocks covering `len` bytes
pub fn block_count(len: usize, block_size: usize) -> usize {
    len.div_ceil(block_size)
}

fn thread_pool(config: &EccConfig) -> Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.effective_threads())
        .build()
        .map_err(|e| EccError::InvalidParameters(format!("thread pool: {}", e)))
}

fn padded(chunk: &[u8], block_size: usize) -> Cow<'_, [u8]> {
    if chunk.len() == block_size {
        Cow::Borrowed(chunk)
    } else {
        let mut block = vec![0xFF; block_size];
        block[..chunk.len()].copy_from_slice(chunk);
        Cow::Owned(block)
    }
}

/// Compute the sidecar ECC stream for `image`
pub fn compute_image_ecc(codec: &BlockCodec, image: &[u8], config: &EccConfig) -> Result<Vec<u8>> {
    let block_size = codec.block_size();
    let pool = thread_pool(config)?;

    let codes: Vec<EccCode> = pool.install(|| {
        image
            .par_chunks(block_size)
            .map(|chunk| codec.compute(&padded(chunk, block_size)))
            .collect::<Result<Vec<_>>>()
    })?;

    debug!(
        "computed ECC for {} blocks of {} bytes",
        codes.len(),
        block_size
    );
    Ok(codes
        .iter()
        .flat_map(|code| code.as_bytes().iter().copied())
        .collect())
}

fn correct_chunk(codec: &BlockCodec, chunk: &mut [u8], stored: &[u8]) -> Result<usize> {
    let stored = EccCode::from_slice(stored);
    let mut block = padded(chunk, codec.block_size()).into_owned();
    let computed = codec.compute(&block)?;
    let corrected = codec.correct(&mut block, &stored, &computed)?;
    if corrected > 0 {
        let len = chunk.len();
        // Padding is known to be 0xFF; a correction there is a miscorrection
        if let Some(offset) = block[len..].iter().position(|&b| b != 0xFF) {
            return Err(UncorrectableReason::OutsideBlock {
                position: len + offset,
            }
            .into());
        }
        chunk.copy_from_slice(&block[..len]);
    }
    Ok(corrected)
}

/// Correct every block of `image` in place against the sidecar ECC stream
///
/// Uncorrectable blocks are left as read and listed in the summary; any other
/// failure aborts the whole operation.
pub fn correct_image<R: ImageReporter>(
    codec: &BlockCodec,
    image: &mut [u8],
    ecc: &[u8],
    config: &EccConfig,
    reporter: &R,
) -> Result<CorrectionSummary> {
    let block_size = codec.block_size();
    let ecc_len = codec.ecc_len();
    let blocks = block_count(image.len(), block_size);
    if ecc.len() != blocks * ecc_len {
        return Err(EccError::EccLength {
            actual: ecc.len(),
            expected: blocks * ecc_len,
        });
    }

    reporter.report_start("Correcting", blocks, config.parallel);
    let pool = thread_pool(config)?;
    let outcomes: Vec<Result<usize>> = pool.install(|| {
        image
            .par_chunks_mut(block_size)
            .zip(ecc.par_chunks(ecc_len))
            .map(|(chunk, stored)| correct_chunk(codec, chunk, stored))
            .collect()
    });

    let mut summary = CorrectionSummary {
        blocks,
        ..CorrectionSummary::default()
    };
    for (index, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(0) => summary.clean_blocks += 1,
            Ok(symbols) => {
                summary.corrected_blocks += 1;
                summary.corrected_symbols += symbols;
                reporter.report_block_corrected(index, symbols);
            }
            Err(e) if e.is_uncorrectable() => {
                warn!("block {}: {}", index, e);
                reporter.report_block_uncorrectable(index, &e.to_string());
                summary.uncorrectable.push(index);
            }
            Err(e) => return Err(e),
        }
    }

    reporter.report_summary(&summary);
    Ok(summary)
}

/// Read a whole file, tagging failures with its path
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| EccError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a whole file, tagging failures with its path
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data).map_err(|source| EccError::Io {
        path: path.to_path_buf(),
        source,
    })
}
