//! Reed-Solomon generator polynomial
//!
//! `g(x) = (x + alpha^1)(x + alpha^2)...(x + alpha^2t)`, built once per code and kept
//! in log form so the encoder can multiply by adding exponents.

use super::galois::FieldContext;
use crate::domain::{FieldElement, LogIndex};

/// Generator polynomial with coefficients in log form, lowest degree first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorPolynomial {
    coefficients: Vec<Option<LogIndex>>,
}

impl GeneratorPolynomial {
    /// Multiply out `(x + alpha^i)` for `i = 1..=parity_symbols`
    pub fn new(field: &FieldContext, parity_symbols: usize) -> Self {
        let mut g = vec![FieldElement::ZERO; parity_symbols + 1];

        // g(x) = x + alpha^1
        g[0] = field.alpha_pow(1);
        g[1] = FieldElement::ONE;

        for i in 2..=parity_symbols {
            g[i] = FieldElement::ONE;
            for j in (1..i).rev() {
                g[j] = match field.log(g[j]) {
                    Some(lj) => g[j - 1] ^ field.alpha_pow(lj.exponent() + i),
                    None => g[j - 1],
                };
            }
            // Product of nonzero roots, never zero
            g[0] = field
                .log(g[0])
                .map_or(FieldElement::ZERO, |l0| field.alpha_pow(l0.exponent() + i));
        }

        GeneratorPolynomial {
            coefficients: g.into_iter().map(|c| field.log(c)).collect(),
        }
    }

    /// Degree, equal to the number of parity symbols
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Coefficient of `x^j` in log form
    #[inline]
    pub fn coefficient(&self, j: usize) -> Option<LogIndex> {
        self.coefficients[j]
    }

    pub fn coefficients(&self) -> &[Option<LogIndex>] {
        &self.coefficients
    }

    /// Coefficients converted back to polynomial form
    pub fn to_elements(&self, field: &FieldContext) -> Vec<FieldElement> {
        self.coefficients
            .iter()
            .map(|c| c.map_or(FieldElement::ZERO, |l| field.exp(l)))
            .collect()
    }

    /// Evaluate `g(x)` with Horner's rule
    pub fn evaluate(&self, field: &FieldContext, x: FieldElement) -> FieldElement {
        self.to_elements(field)
            .iter()
            .rev()
            .fold(FieldElement::ZERO, |acc, &c| field.mul(acc, x) ^ c)
    }
}
