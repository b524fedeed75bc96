//! Silent reporter for image operations
//!
//! Provides a no-output implementation for testing or when quiet operation is desired.

use super::{ImageReporter, Reporter};
use crate::image::CorrectionSummary;

/// Silent implementation for image operations
#[derive(Default)]
pub struct SilentImageReporter;

impl SilentImageReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for SilentImageReporter {
    fn report_complete(&self, _message: &str) {}
}

impl ImageReporter for SilentImageReporter {
    fn report_start(&self, _operation: &str, _blocks: usize, _parallel: bool) {}
    fn report_block_corrected(&self, _block: usize, _symbols: usize) {}
    fn report_block_uncorrectable(&self, _block: usize, _error: &str) {}
    fn report_summary(&self, _summary: &CorrectionSummary) {}
}
