//! Progress and output reporting for image ECC operations
//!
//! This module provides traits and implementations for reporting progress and results
//! while encoding or correcting an image. It allows the core logic to be decoupled
//! from output formatting.

mod console;
mod silent;

pub use console::ConsoleImageReporter;
pub use silent::SilentImageReporter;

use crate::image::CorrectionSummary;

/// Base trait for all reporters
///
/// Provides common functionality that all reporters should have, regardless of
/// the specific operation (encoding, correction)
pub trait Reporter: Send + Sync {
    /// Report successful completion of an operation
    fn report_complete(&self, message: &str);
}

/// Trait for reporting block-level image processing
///
/// Extends the base Reporter trait with per-block events
pub trait ImageReporter: Reporter {
    /// Report starting an operation over `blocks` blocks
    fn report_start(&self, operation: &str, blocks: usize, parallel: bool);

    /// Report that a block had symbols corrected
    fn report_block_corrected(&self, block: usize, symbols: usize);

    /// Report that a block could not be corrected
    fn report_block_uncorrectable(&self, block: usize, error: &str);

    /// Report final correction results summary
    fn report_summary(&self, summary: &CorrectionSummary);
}
