//! Reed-Solomon codec over GF(2^m)
//!
//! [`ReedSolomon`] bundles the field tables and the generator polynomial for one set of
//! [`CodeParameters`]. Both are built once in [`ReedSolomon::new`] and never change, so
//! one instance can be shared by reference across threads.
//!
//! The NAND code (GF(2^10), `t = 4`, `n = 1023`, `k = 1015`) has a process-wide instance
//! behind [`ReedSolomon::nand`], initialised on first use through `OnceLock`.

use super::decoder;
use super::encoder::encode_parity;
use super::galois::{FieldContext, MAX_SYMBOL_BITS};
use super::generator::GeneratorPolynomial;
use crate::domain::FieldElement;
use crate::error::{EccError, Result};
use log::debug;
use std::sync::OnceLock;

/// Shape of a Reed-Solomon code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CodeParameters {
    /// Symbol width `m`
    pub symbol_bits: u32,
    /// Primitive polynomial as a bit mask, bit `i` = coefficient of `x^i`
    pub primitive_polynomial: u32,
    /// Correctable symbol errors `t`
    pub correctable: usize,
}

impl CodeParameters {
    /// GF(2^10) with `1 + x^3 + x^10`, four correctable symbols
    pub const NAND: CodeParameters = CodeParameters {
        symbol_bits: 10,
        primitive_polynomial: 0x409,
        correctable: 4,
    };

    /// Validate the shape of a code; primitivity is checked when the tables are built
    pub fn new(symbol_bits: u32, primitive_polynomial: u32, correctable: usize) -> Result<Self> {
        let params = CodeParameters {
            symbol_bits,
            primitive_polynomial,
            correctable,
        };
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> Result<()> {
        if !(2..=MAX_SYMBOL_BITS).contains(&self.symbol_bits) {
            return Err(EccError::InvalidParameters(format!(
                "symbol width {} is outside 2..={}",
                self.symbol_bits, MAX_SYMBOL_BITS
            )));
        }
        let degree = 31 - self.primitive_polynomial.leading_zeros().min(31);
        if self.primitive_polynomial == 0 || degree != self.symbol_bits {
            return Err(EccError::InvalidParameters(format!(
                "polynomial {:#x} does not have degree {}",
                self.primitive_polynomial, self.symbol_bits
            )));
        }
        if self.correctable == 0 || 2 * self.correctable >= self.code_length() {
            return Err(EccError::InvalidParameters(format!(
                "cannot correct {} symbols with code length {}",
                self.correctable,
                self.code_length()
            )));
        }
        Ok(())
    }

    /// The `m + 1` binary coefficients of the primitive polynomial, lowest first
    pub fn coefficients(&self) -> Vec<u8> {
        (0..=self.symbol_bits)
            .map(|i| ((self.primitive_polynomial >> i) & 1) as u8)
            .collect()
    }

    /// `n = 2^m - 1`
    pub fn code_length(&self) -> usize {
        (1usize << self.symbol_bits) - 1
    }

    /// `2t`
    pub fn parity_symbols(&self) -> usize {
        2 * self.correctable
    }

    /// `k = n - 2t`
    pub fn data_symbols(&self) -> usize {
        self.code_length() - self.parity_symbols()
    }
}

impl Default for CodeParameters {
    fn default() -> Self {
        CodeParameters::NAND
    }
}

/// Systematic Reed-Solomon encoder/decoder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReedSolomon {
    params: CodeParameters,
    field: FieldContext,
    generator: GeneratorPolynomial,
}

static NAND_CODEC: OnceLock<ReedSolomon> = OnceLock::new();

impl ReedSolomon {
    /// Build field tables, then the generator polynomial
    pub fn new(params: CodeParameters) -> Result<Self> {
        params.validate()?;
        let field = FieldContext::new(params.symbol_bits, &params.coefficients())?;
        let generator = GeneratorPolynomial::new(&field, params.parity_symbols());
        debug!(
            "RS({}, {}) over GF(2^{}) ready, poly {:#x}",
            params.code_length(),
            params.data_symbols(),
            params.symbol_bits,
            params.primitive_polynomial
        );
        Ok(ReedSolomon {
            params,
            field,
            generator,
        })
    }

    /// Shared NAND codec, built exactly once per process
    pub fn nand() -> &'static ReedSolomon {
        NAND_CODEC.get_or_init(|| {
            ReedSolomon::new(CodeParameters::NAND).expect("NAND code parameters are valid")
        })
    }

    pub fn params(&self) -> &CodeParameters {
        &self.params
    }

    pub fn field(&self) -> &FieldContext {
        &self.field
    }

    pub fn generator(&self) -> &GeneratorPolynomial {
        &self.generator
    }

    /// Codeword length `n`
    pub fn n(&self) -> usize {
        self.params.code_length()
    }

    /// Data symbols per codeword `k`
    pub fn k(&self) -> usize {
        self.params.data_symbols()
    }

    /// Correctable symbols `t`
    pub fn t(&self) -> usize {
        self.params.correctable
    }

    pub fn parity_len(&self) -> usize {
        self.params.parity_symbols()
    }

    /// Compute `2t` parity symbols for exactly `k` data symbols
    ///
    /// The codeword is `data` followed by the returned parity.
    pub fn encode(&self, data: &[u16]) -> Result<Vec<u16>> {
        if data.len() != self.k() {
            return Err(EccError::BlockLength {
                actual: data.len(),
                expected: self.k(),
            });
        }
        self.field.check_symbols(data)?;

        let data: Vec<FieldElement> = data.iter().map(|&v| FieldElement::new(v)).collect();
        let parity = encode_parity(&self.field, &self.generator, &data);
        Ok(parity.into_iter().map(u16::from).collect())
    }

    /// Correct a full `n`-symbol codeword in place, returning the corrected count
    ///
    /// `codeword` is only written when decoding succeeds.
    pub fn decode(&self, codeword: &mut [u16]) -> Result<usize> {
        if codeword.len() != self.n() {
            return Err(EccError::BlockLength {
                actual: codeword.len(),
                expected: self.n(),
            });
        }
        self.field.check_symbols(codeword)?;

        let mut received: Vec<FieldElement> =
            codeword.iter().map(|&v| FieldElement::new(v)).collect();
        let corrected = decoder::decode(&self.field, &mut received, self.parity_len())?;

        if corrected > 0 {
            for (dst, src) in codeword.iter_mut().zip(&received) {
                *dst = src.value();
            }
        }
        Ok(corrected)
    }
}
