//! Console reporter for image operations

use super::{ImageReporter, Reporter};
use crate::image::CorrectionSummary;

/// Console implementation for image operations
#[derive(Default)]
pub struct ConsoleImageReporter;

impl ConsoleImageReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for ConsoleImageReporter {
    fn report_complete(&self, message: &str) {
        println!("{}", message);
    }
}

impl ImageReporter for ConsoleImageReporter {
    fn report_start(&self, operation: &str, blocks: usize, parallel: bool) {
        println!(
            "{} {} blocks ({})...",
            operation,
            blocks,
            if parallel { "parallel" } else { "sequential" }
        );
    }

    fn report_block_corrected(&self, block: usize, symbols: usize) {
        println!("Block {}: corrected {} symbol(s)", block, symbols);
    }

    fn report_block_uncorrectable(&self, block: usize, error: &str) {
        eprintln!("Block {}: {}", block, error);
    }

    fn report_summary(&self, summary: &CorrectionSummary) {
        println!("{}", summary);
        if summary.is_success() {
            println!("All blocks are readable.");
        } else {
            println!(
                "{} block(s) could not be corrected and must be discarded.",
                summary.uncorrectable.len()
            );
        }
    }
}
