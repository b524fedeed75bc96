//! Galois Field GF(2^m) arithmetic for Reed-Solomon ECC
//!
//! ## Representations
//!
//! Every nonzero element has two interchangeable forms:
//!
//! - **Polynomial form** ([`FieldElement`]): the bit pattern of the element as a polynomial
//!   over GF(2) reduced by the primitive polynomial. Addition is XOR.
//! - **Log form** ([`LogIndex`]): the exponent `i` of `alpha^i`, where `alpha = x` is the
//!   primitive element. Multiplication is addition of exponents modulo `n = 2^m - 1`.
//!
//! Zero has no logarithm; [`FieldContext::log`] returns `None` for it.
//!
//! ## NAND Field
//!
//! The NAND ECC uses GF(2^10) generated by `p(x) = 1 + x^3 + x^10` (mask 0x409).
//! Tables are immutable once built and shared read-only between threads.

use crate::domain::{FieldElement, LogIndex};
use crate::error::{EccError, Result};

/// Largest supported symbol width; symbols are stored in `u16`
pub const MAX_SYMBOL_BITS: u32 = 16;

/// Log/antilog lookup tables for one GF(2^m)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldContext {
    symbol_bits: u32,
    /// alpha_to[i] = alpha^i in polynomial form, i in [0, n)
    alpha_to: Vec<FieldElement>,
    /// index_of[v] = log(v), None for v == 0
    index_of: Vec<Option<LogIndex>>,
}

impl FieldContext {
    /// Build the tables from the `m + 1` binary coefficients of a primitive polynomial
    ///
    /// `primitive[i]` is the coefficient of `x^i`. The polynomial must have degree
    /// exactly `m` and generate every nonzero element; anything else is rejected.
    pub fn new(symbol_bits: u32, primitive: &[u8]) -> Result<Self> {
        if !(2..=MAX_SYMBOL_BITS).contains(&symbol_bits) {
            return Err(EccError::InvalidParameters(format!(
                "symbol width {} is outside 2..={}",
                symbol_bits, MAX_SYMBOL_BITS
            )));
        }
        let m = symbol_bits as usize;
        if primitive.len() != m + 1 {
            return Err(EccError::InvalidParameters(format!(
                "primitive polynomial for GF(2^{}) needs {} coefficients, got {}",
                m,
                m + 1,
                primitive.len()
            )));
        }
        if primitive[m] == 0 || primitive[0] == 0 {
            return Err(EccError::InvalidParameters(format!(
                "polynomial {:?} is not primitive for GF(2^{})",
                primitive, m
            )));
        }

        let order = (1usize << m) - 1;
        let mut alpha_to = vec![FieldElement::ZERO; order];
        let mut index_of: Vec<Option<LogIndex>> = vec![None; order + 1];

        let mut record = |exponent: usize, value: u32| -> Result<()> {
            let slot = &mut index_of[value as usize];
            if value == 0 || slot.is_some() {
                return Err(EccError::InvalidParameters(format!(
                    "polynomial {:?} is not primitive for GF(2^{}): alpha^{} repeats",
                    primitive, m, exponent
                )));
            }
            *slot = Some(LogIndex::new(exponent as u16));
            alpha_to[exponent] = FieldElement::new(value as u16);
            Ok(())
        };

        // alpha^0 .. alpha^(m-1) are single bits; alpha^m is the reduction of x^m
        let mut mask = 1u32;
        let mut reduction = 0u32;
        for (i, &coefficient) in primitive.iter().enumerate().take(m) {
            record(i, mask)?;
            if coefficient != 0 {
                reduction ^= mask;
            }
            mask <<= 1;
        }
        record(m, reduction)?;

        // Successors by doubling, folding the overflowing top bit back in
        mask >>= 1;
        let mut previous = reduction;
        for i in (m + 1)..order {
            let next = if previous >= mask {
                reduction ^ ((previous ^ mask) << 1)
            } else {
                previous << 1
            };
            record(i, next)?;
            previous = next;
        }

        Ok(FieldContext {
            symbol_bits,
            alpha_to,
            index_of,
        })
    }

    /// Symbol width `m`
    pub fn symbol_bits(&self) -> u32 {
        self.symbol_bits
    }

    /// Number of field elements, `2^m`
    pub fn field_size(&self) -> usize {
        self.index_of.len()
    }

    /// Multiplicative order `n = 2^m - 1`, also the full code length
    pub fn order(&self) -> usize {
        self.alpha_to.len()
    }

    /// Accept `value` as a field element if it fits in `m` bits
    #[inline]
    pub fn element(&self, value: u16) -> Option<FieldElement> {
        ((value as usize) < self.field_size()).then(|| FieldElement::new(value))
    }

    /// Validate a whole symbol slice, reporting the first out-of-field value
    pub fn check_symbols(&self, symbols: &[u16]) -> Result<()> {
        match symbols
            .iter()
            .position(|&value| self.element(value).is_none())
        {
            Some(position) => Err(EccError::InvalidSymbol {
                position,
                value: symbols[position],
                symbol_bits: self.symbol_bits,
            }),
            None => Ok(()),
        }
    }

    /// Log form -> polynomial form
    #[inline]
    pub fn exp(&self, index: LogIndex) -> FieldElement {
        self.alpha_to[index.exponent()]
    }

    /// Polynomial form -> log form, `None` for zero
    #[inline]
    pub fn log(&self, element: FieldElement) -> Option<LogIndex> {
        self.index_of[element.value() as usize]
    }

    /// Reduce an arbitrary exponent modulo `n`
    #[inline]
    pub fn log_index(&self, exponent: usize) -> LogIndex {
        LogIndex::new((exponent % self.order()) as u16)
    }

    /// `alpha^exponent` for any exponent
    #[inline]
    pub fn alpha_pow(&self, exponent: usize) -> FieldElement {
        self.alpha_to[exponent % self.order()]
    }

    /// Inverse in log form: `-i mod n`
    #[inline]
    pub fn log_inverse(&self, index: LogIndex) -> LogIndex {
        self.log_index(self.order() - index.exponent())
    }

    /// Multiply two elements in polynomial form
    #[inline]
    pub fn mul(&self, a: FieldElement, b: FieldElement) -> FieldElement {
        match (self.log(a), self.log(b)) {
            (Some(la), Some(lb)) => self.alpha_pow(la.exponent() + lb.exponent()),
            _ => FieldElement::ZERO,
        }
    }

    /// Divide in polynomial form; `None` when dividing by zero
    #[inline]
    pub fn div(&self, a: FieldElement, b: FieldElement) -> Option<FieldElement> {
        let lb = self.log(b)?;
        Some(match self.log(a) {
            Some(la) => self.alpha_pow(la.exponent() + self.order() - lb.exponent()),
            None => FieldElement::ZERO,
        })
    }

    /// Multiplicative inverse; `None` for zero
    #[inline]
    pub fn inverse(&self, a: FieldElement) -> Option<FieldElement> {
        self.log(a).map(|la| self.exp(self.log_inverse(la)))
    }
}
