//! Core domain types for the NAND ECC codec
//!
//! This module contains type-safe wrappers for Galois field values and packed ECC bytes.
//! These newtypes prevent common mistakes by making it impossible to mix the two
//! representations of a field element at compile time.
//!
//! ## Type Safety Benefits
//!
//! - **FieldElement, LogIndex**: Prevents mixing polynomial-form values (added with XOR)
//!   with log-form exponents (multiplied by adding modulo the field order)
//! - **`Option<LogIndex>`**: The logarithm of zero does not exist, so it is `None`
//!   instead of a reserved integer that could accidentally take part in arithmetic
//! - **EccCode**: Prevents mixing packed parity bytes with block data
//!
//! Conversions between `FieldElement` and `LogIndex` need the field tables and live on
//! [`crate::reed_solomon::FieldContext`].

use smallvec::SmallVec;
use std::ops::{BitXor, BitXorAssign};

/// Field element in polynomial form: bit `i` is the coefficient of `x^i`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldElement(u16);

impl FieldElement {
    pub const ZERO: FieldElement = FieldElement(0);
    pub const ONE: FieldElement = FieldElement(1);

    pub fn new(value: u16) -> Self {
        FieldElement(value)
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// Addition and subtraction are both XOR in GF(2^m)
impl BitXor for FieldElement {
    type Output = FieldElement;

    fn bitxor(self, rhs: FieldElement) -> FieldElement {
        FieldElement(self.0 ^ rhs.0)
    }
}

impl BitXorAssign for FieldElement {
    fn bitxor_assign(&mut self, rhs: FieldElement) {
        self.0 ^= rhs.0;
    }
}

impl From<FieldElement> for u16 {
    fn from(element: FieldElement) -> Self {
        element.0
    }
}

impl std::fmt::Display for FieldElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Field element in log form: the exponent `i` of `alpha^i`, always in `[0, n)`
///
/// Only [`crate::reed_solomon::FieldContext`] creates these, so the exponent is
/// guaranteed to be reduced modulo the field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogIndex(u16);

impl LogIndex {
    pub(crate) fn new(exponent: u16) -> Self {
        LogIndex(exponent)
    }

    pub fn exponent(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for LogIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "a^{}", self.0)
    }
}

/// Packed parity symbols of one block, as stored in the out-of-band area
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct EccCode(SmallVec<[u8; 16]>);

impl EccCode {
    pub fn from_slice(bytes: &[u8]) -> Self {
        EccCode(SmallVec::from_slice(bytes))
    }

    pub fn zeroed(len: usize) -> Self {
        EccCode(SmallVec::from_elem(0, len))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every byte reads back as erased flash (0xFF)
    pub fn is_erased(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|&b| b == 0xFF)
    }
}

impl From<[u8; 10]> for EccCode {
    fn from(bytes: [u8; 10]) -> Self {
        EccCode::from_slice(&bytes)
    }
}

impl AsRef<[u8]> for EccCode {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq<[u8]> for EccCode {
    fn eq(&self, other: &[u8]) -> bool {
        self.0.as_slice() == other
    }
}

impl std::fmt::Display for EccCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}
