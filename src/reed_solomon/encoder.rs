//! Systematic Reed-Solomon encoding
//!
//! Parity is the remainder `data(x) * x^(2t) mod g(x)`, computed with a linear
//! feedback shift register whose taps are the generator coefficients.
//! `data[i]` is the coefficient of `x^i`, so the highest index is fed first.

use super::galois::FieldContext;
use super::generator::GeneratorPolynomial;
use crate::domain::FieldElement;

/// Compute the parity register for already validated data symbols
///
/// Returns `generator.degree()` parity symbols in polynomial form; `parity[j]` is
/// the coefficient of `x^j` in the remainder.
pub fn encode_parity(
    field: &FieldContext,
    generator: &GeneratorPolynomial,
    data: &[FieldElement],
) -> Vec<FieldElement> {
    let parity_len = generator.degree();
    let mut bb = vec![FieldElement::ZERO; parity_len];

    for &symbol in data.iter().rev() {
        let feedback = field.log(symbol ^ bb[parity_len - 1]);
        match feedback {
            Some(feedback) => {
                for j in (1..parity_len).rev() {
                    bb[j] = match generator.coefficient(j) {
                        Some(gj) => bb[j - 1] ^ field.alpha_pow(gj.exponent() + feedback.exponent()),
                        None => bb[j - 1],
                    };
                }
                bb[0] = generator
                    .coefficient(0)
                    .map_or(FieldElement::ZERO, |g0| {
                        field.alpha_pow(g0.exponent() + feedback.exponent())
                    });
            }
            None => {
                // Zero feedback: plain shift
                bb.copy_within(0..parity_len - 1, 1);
                bb[0] = FieldElement::ZERO;
            }
        }
    }

    bb
}
