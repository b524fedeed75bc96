//! Block ECC: 512-byte NAND blocks protected by 10 bytes of Reed-Solomon parity
//!
//! ## Shortened code
//!
//! A block of `block_size` bytes becomes the first `block_size` data symbols of a
//! full-length codeword. The remaining `k - block_size` data symbols are implicit
//! zeros that are never stored, followed by the `2t` parity symbols. For the NAND
//! code that is 512 data symbols, 503 zero symbols, then 8 parity symbols.
//!
//! ## On-media layout
//!
//! Parity symbols are packed as a little-endian bitstream, `m` bits per symbol. For
//! 10-bit symbols that gives two 5-byte groups of four symbols each:
//!
//! ```text
//! byte 0: s0[7:0]
//! byte 1: s1[5:0] s0[9:8]
//! byte 2: s2[3:0] s1[9:6]
//! byte 3: s3[1:0] s2[9:4]
//! byte 4: s3[9:2]
//! bytes 5..10: same for s4..s7
//! ```

use crate::domain::EccCode;
use crate::error::{EccError, Result, UncorrectableReason};
use crate::reed_solomon::{CodeParameters, ReedSolomon};
use log::debug;
use std::borrow::Cow;
use std::sync::OnceLock;

/// Bytes of data protected by one ECC entry
pub const ECC_CHUNK_SIZE: usize = 512;

/// Bytes of packed parity per ECC entry
pub const ECC_SIZE: usize = 10;

/// Number of bytes needed for `count` symbols of `bits` bits
pub fn packed_len(count: usize, bits: u32) -> usize {
    (count * bits as usize).div_ceil(8)
}

/// Pack symbols into `out` as a little-endian bitstream; unused trailing bits are zero
pub fn pack_symbols(symbols: &[u16], bits: u32, out: &mut [u8]) {
    out.fill(0);
    let mask = (1u32 << bits) - 1;
    let mut acc = 0u32;
    let mut acc_bits = 0u32;
    let mut bytes = out.iter_mut();

    for &symbol in symbols {
        acc |= (symbol as u32 & mask) << acc_bits;
        acc_bits += bits;
        while acc_bits >= 8 {
            if let Some(byte) = bytes.next() {
                *byte = acc as u8;
            }
            acc >>= 8;
            acc_bits -= 8;
        }
    }
    if acc_bits > 0 {
        if let Some(byte) = bytes.next() {
            *byte = acc as u8;
        }
    }
}

/// Inverse of [`pack_symbols`]; missing bytes read as zero
pub fn unpack_symbols(bytes: &[u8], bits: u32, count: usize) -> Vec<u16> {
    let mask = (1u32 << bits) - 1;
    let mut symbols = Vec::with_capacity(count);
    let mut acc = 0u32;
    let mut acc_bits = 0u32;
    let mut input = bytes.iter().copied();

    while symbols.len() < count {
        while acc_bits < bits {
            acc |= (input.next().unwrap_or(0) as u32) << acc_bits;
            acc_bits += 8;
        }
        symbols.push((acc & mask) as u16);
        acc >>= bits;
        acc_bits -= bits;
    }
    symbols
}

/// Reed-Solomon ECC for fixed-size byte blocks
#[derive(Debug, Clone)]
pub struct BlockCodec {
    codec: Cow<'static, ReedSolomon>,
    block_size: usize,
}

static NAND_BLOCK_CODEC: OnceLock<BlockCodec> = OnceLock::new();

impl BlockCodec {
    /// Codec for `block_size`-byte blocks under an arbitrary code
    pub fn new(params: CodeParameters, block_size: usize) -> Result<Self> {
        let codec = ReedSolomon::new(params)?;
        Self::with_codec(Cow::Owned(codec), block_size)
    }

    fn with_codec(codec: Cow<'static, ReedSolomon>, block_size: usize) -> Result<Self> {
        if block_size == 0 || block_size > codec.k() {
            return Err(EccError::InvalidParameters(format!(
                "block of {} bytes does not fit in {} data symbols",
                block_size,
                codec.k()
            )));
        }
        Ok(BlockCodec { codec, block_size })
    }

    /// The 512-byte NAND codec, sharing the process-wide [`ReedSolomon::nand`] tables
    pub fn nand() -> &'static BlockCodec {
        NAND_BLOCK_CODEC.get_or_init(|| BlockCodec {
            codec: Cow::Borrowed(ReedSolomon::nand()),
            block_size: ECC_CHUNK_SIZE,
        })
    }

    pub fn reed_solomon(&self) -> &ReedSolomon {
        &self.codec
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Packed parity length in bytes
    pub fn ecc_len(&self) -> usize {
        packed_len(self.codec.parity_len(), self.symbol_bits())
    }

    fn symbol_bits(&self) -> u32 {
        self.codec.params().symbol_bits
    }

    fn check_block(&self, len: usize) -> Result<()> {
        if len != self.block_size {
            return Err(EccError::BlockLength {
                actual: len,
                expected: self.block_size,
            });
        }
        Ok(())
    }

    fn check_ecc(&self, ecc: &EccCode) -> Result<()> {
        if ecc.len() != self.ecc_len() {
            return Err(EccError::EccLength {
                actual: ecc.len(),
                expected: self.ecc_len(),
            });
        }
        Ok(())
    }

    /// Block bytes followed by zero padding up to `k` data symbols
    fn data_symbols(&self, block: &[u8]) -> Vec<u16> {
        let mut symbols = vec![0u16; self.codec.k()];
        for (symbol, &byte) in symbols.iter_mut().zip(block) {
            *symbol = byte as u16;
        }
        symbols
    }

    /// Compute the packed parity of one block
    pub fn compute(&self, block: &[u8]) -> Result<EccCode> {
        self.check_block(block.len())?;
        let parity = self.codec.encode(&self.data_symbols(block))?;

        let mut ecc = EccCode::zeroed(self.ecc_len());
        pack_symbols(&parity, self.symbol_bits(), ecc.as_mut_bytes());
        Ok(ecc)
    }

    /// Correct `block` against the ECC stored with it
    ///
    /// `computed` is the ECC of `block` as read; when it matches `stored` nothing is
    /// decoded. Returns the number of corrected symbols, counting corrected parity
    /// symbols too. `block` is only modified on success.
    pub fn correct(&self, block: &mut [u8], stored: &EccCode, computed: &EccCode) -> Result<usize> {
        self.check_block(block.len())?;
        self.check_ecc(stored)?;
        self.check_ecc(computed)?;

        if stored == computed {
            return Ok(0);
        }
        if stored.is_erased() && block.iter().all(|&b| b == 0xFF) {
            debug!("erased block, nothing to correct");
            return Ok(0);
        }

        let k = self.codec.k();
        let mut codeword = self.data_symbols(block);
        codeword.extend(unpack_symbols(
            stored.as_bytes(),
            self.symbol_bits(),
            self.codec.parity_len(),
        ));

        let corrected = self.codec.decode(&mut codeword)?;
        if corrected > self.codec.t() {
            return Err(UncorrectableReason::LocatorDegree {
                degree: corrected,
                capability: self.codec.t(),
            }
            .into());
        }

        // A valid correction never touches the implicit padding or leaves a non-byte
        if let Some(position) = (block.len()..k).find(|&p| codeword[p] != 0) {
            return Err(UncorrectableReason::OutsideBlock { position }.into());
        }
        if let Some(position) = codeword[..block.len()].iter().position(|&s| s > 0xFF) {
            return Err(UncorrectableReason::SymbolOverflow {
                position,
                value: codeword[position],
            }
            .into());
        }

        for (byte, &symbol) in block.iter_mut().zip(&codeword) {
            *byte = symbol as u8;
        }
        debug!("corrected {} symbol(s)", corrected);
        Ok(corrected)
    }
}

/// Calculate the 10-byte Reed-Solomon ECC for a 512-byte block
pub fn compute_ecc(data: &[u8; ECC_CHUNK_SIZE]) -> Result<[u8; ECC_SIZE]> {
    let code = BlockCodec::nand().compute(data)?;
    let mut ecc = [0u8; ECC_SIZE];
    ecc.copy_from_slice(code.as_bytes());
    Ok(ecc)
}

/// Detect and correct symbol errors in a 512-byte block using its stored ECC
///
/// `stored_ecc` was read from the out-of-band area, `computed_ecc` is
/// [`compute_ecc`] of `data` as read. Returns the number of corrected symbols.
pub fn correct(
    data: &mut [u8; ECC_CHUNK_SIZE],
    stored_ecc: &[u8; ECC_SIZE],
    computed_ecc: &[u8; ECC_SIZE],
) -> Result<usize> {
    BlockCodec::nand().correct(
        data,
        &EccCode::from(*stored_ecc),
        &EccCode::from(*computed_ecc),
    )
}
