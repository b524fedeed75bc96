//! Reed-Solomon decoding: syndromes, Berlekamp-Massey, Chien search, Forney
//!
//! The received word is a full-length codeword of `n = 2^m - 1` symbols where
//! `received[j]` is the coefficient of `x^j`. Syndromes are taken at the generator
//! roots `alpha^1 .. alpha^2t`.
//!
//! Decoding stops at the BCH bound: more than `t` errors are either reported as
//! uncorrectable or, when they happen to form another codeword, not detected at all.

use super::galois::FieldContext;
use crate::domain::{FieldElement, LogIndex};
use crate::error::{Result, UncorrectableReason};
use log::trace;
use smallvec::SmallVec;

/// Syndromes `S_1 .. S_2t` in log form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syndromes {
    values: Vec<Option<LogIndex>>,
}

impl Syndromes {
    /// Evaluate the received polynomial at `alpha^1 .. alpha^count`
    pub fn compute(field: &FieldContext, received: &[FieldElement], count: usize) -> Self {
        let logs: Vec<Option<LogIndex>> = received.iter().map(|&r| field.log(r)).collect();

        let values = (1..=count)
            .map(|i| {
                let sum = logs
                    .iter()
                    .enumerate()
                    .filter_map(|(j, l)| l.map(|l| field.alpha_pow(l.exponent() + i * j)))
                    .fold(FieldElement::ZERO, |acc, term| acc ^ term);
                field.log(sum)
            })
            .collect();

        Syndromes { values }
    }

    /// All syndromes vanish: the word is a codeword
    pub fn is_zero(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `S_i` for `i` in `1..=len()`
    #[inline]
    pub fn get(&self, i: usize) -> Option<LogIndex> {
        self.values[i - 1]
    }

    pub fn to_elements(&self, field: &FieldContext) -> Vec<FieldElement> {
        self.values
            .iter()
            .map(|s| s.map_or(FieldElement::ZERO, |l| field.exp(l)))
            .collect()
    }
}

/// Error-locator polynomial `lambda(x)` in log form, lowest degree first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLocator {
    coefficients: Vec<Option<LogIndex>>,
    degree: usize,
}

impl ErrorLocator {
    /// Run exactly `2t` Berlekamp-Massey iterations over the syndromes
    pub fn berlekamp_massey(field: &FieldContext, syndromes: &Syndromes) -> Self {
        let parity = syndromes.len();
        let order = field.order();

        // lambda in polynomial form, B and T alongside it
        let mut lambda = vec![FieldElement::ZERO; parity + 1];
        lambda[0] = FieldElement::ONE;
        let mut b: Vec<Option<LogIndex>> = lambda.iter().map(|&c| field.log(c)).collect();
        let mut t = vec![FieldElement::ZERO; parity + 1];
        let mut length = 0usize;

        for r in 1..=parity {
            let mut discrepancy = FieldElement::ZERO;
            for i in 0..r {
                if let (Some(li), Some(s)) = (field.log(lambda[i]), syndromes.get(r - i)) {
                    discrepancy ^= field.alpha_pow(li.exponent() + s.exponent());
                }
            }

            let Some(discrepancy) = field.log(discrepancy) else {
                // B(x) <- x * B(x)
                shift_up(&mut b);
                continue;
            };

            // T(x) <- lambda(x) - discrepancy * x * B(x)
            t[0] = lambda[0];
            for i in 0..parity {
                t[i + 1] = match b[i] {
                    Some(bi) => lambda[i + 1] ^ field.alpha_pow(discrepancy.exponent() + bi.exponent()),
                    None => lambda[i + 1],
                };
            }

            if 2 * length < r {
                length = r - length;
                // B(x) <- lambda(x) / discrepancy
                b = lambda
                    .iter()
                    .map(|&c| {
                        field
                            .log(c)
                            .map(|lc| field.log_index(lc.exponent() + order - discrepancy.exponent()))
                    })
                    .collect();
            } else {
                shift_up(&mut b);
            }

            std::mem::swap(&mut lambda, &mut t);
        }

        let coefficients: Vec<Option<LogIndex>> = lambda.iter().map(|&c| field.log(c)).collect();
        let degree = coefficients.iter().rposition(Option::is_some).unwrap_or(0);
        trace!("error locator degree {} after {} steps (length {})", degree, parity, length);

        ErrorLocator {
            coefficients,
            degree,
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    #[inline]
    pub fn coefficient(&self, j: usize) -> Option<LogIndex> {
        self.coefficients.get(j).copied().flatten()
    }

    pub fn coefficients(&self) -> &[Option<LogIndex>] {
        &self.coefficients
    }

    /// Evaluate `lambda(x)` with Horner's rule
    pub fn evaluate(&self, field: &FieldContext, x: FieldElement) -> FieldElement {
        self.coefficients[..=self.degree]
            .iter()
            .rev()
            .fold(FieldElement::ZERO, |acc, c| {
                field.mul(acc, x) ^ c.map_or(FieldElement::ZERO, |l| field.exp(l))
            })
    }
}

fn shift_up(poly: &mut [Option<LogIndex>]) {
    let len = poly.len();
    poly.copy_within(0..len - 1, 1);
    poly[0] = None;
}

/// A root `alpha^root` of the locator and the symbol position it points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorLocation {
    /// Log of the root, i.e. of the inverse error locator
    pub root: LogIndex,
    /// Codeword index of the erroneous symbol, `n - root`
    pub position: usize,
}

/// Value to XOR into one symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCorrection {
    pub position: usize,
    pub magnitude: FieldElement,
}

/// Find all roots of the locator by trying `alpha^1 .. alpha^n`
///
/// Each nonzero coefficient's exponent advances by its own degree per step, so the
/// running sum is `lambda(alpha^i)`.
pub fn chien_search(
    field: &FieldContext,
    locator: &ErrorLocator,
) -> Result<SmallVec<[ErrorLocation; 8]>> {
    let order = field.order();
    let degree = locator.degree();
    let constant = locator
        .coefficient(0)
        .map_or(FieldElement::ZERO, |l| field.exp(l));
    let mut reg: SmallVec<[Option<LogIndex>; 16]> =
        SmallVec::from_slice(&locator.coefficients()[..=degree]);
    let mut found = SmallVec::new();

    for i in 1..=order {
        let mut q = constant;
        for (j, slot) in reg.iter_mut().enumerate().skip(1).rev() {
            if let Some(rj) = *slot {
                let next = field.log_index(rj.exponent() + j);
                *slot = Some(next);
                q ^= field.exp(next);
            }
        }
        if q.is_zero() {
            found.push(ErrorLocation {
                root: field.log_index(i),
                position: order - i,
            });
        }
    }

    if found.len() != degree {
        return Err(UncorrectableReason::RootCountMismatch {
            roots: found.len(),
            degree,
        }
        .into());
    }
    Ok(found)
}

/// Error evaluator `omega(x) = S(x) * lambda(x) mod x^2t` in log form
pub fn error_evaluator(
    field: &FieldContext,
    syndromes: &Syndromes,
    locator: &ErrorLocator,
) -> Vec<Option<LogIndex>> {
    (0..syndromes.len())
        .map(|i| {
            let mut acc = FieldElement::ZERO;
            for j in 0..=locator.degree().min(i) {
                if let (Some(s), Some(l)) = (syndromes.get(i + 1 - j), locator.coefficient(j)) {
                    acc ^= field.alpha_pow(s.exponent() + l.exponent());
                }
            }
            field.log(acc)
        })
        .collect()
}

/// Forney's formula: `e = omega(X^-1) / lambda'(X^-1)` for each located error
///
/// In characteristic 2 the formal derivative keeps only odd-degree terms.
pub fn forney(
    field: &FieldContext,
    syndromes: &Syndromes,
    locator: &ErrorLocator,
    locations: &[ErrorLocation],
) -> Result<SmallVec<[ErrorCorrection; 8]>> {
    let omega = error_evaluator(field, syndromes, locator);
    let order = field.order();
    let top = locator.degree().min(syndromes.len() - 1) & !1;

    let mut corrections = SmallVec::new();
    for location in locations {
        let root = location.root.exponent();

        let numerator = omega
            .iter()
            .enumerate()
            .filter_map(|(i, w)| w.map(|w| field.alpha_pow(w.exponent() + i * root)))
            .fold(FieldElement::ZERO, |acc, term| acc ^ term);

        let denominator = (0..=top)
            .step_by(2)
            .filter_map(|i| {
                locator
                    .coefficient(i + 1)
                    .map(|l| field.alpha_pow(l.exponent() + i * root))
            })
            .fold(FieldElement::ZERO, |acc, term| acc ^ term);

        let Some(denominator) = field.log(denominator) else {
            return Err(UncorrectableReason::ZeroDerivative {
                position: location.position,
            }
            .into());
        };

        let magnitude = field.log(numerator).map_or(FieldElement::ZERO, |num| {
            field.alpha_pow(num.exponent() + order - denominator.exponent())
        });

        corrections.push(ErrorCorrection {
            position: location.position,
            magnitude,
        });
    }

    Ok(corrections)
}

/// Correct up to `parity_symbols / 2` symbol errors in place
///
/// Returns the number of corrected symbols. `received` must be a full codeword of
/// `field.order()` symbols. On error `received` is left untouched.
pub fn decode(
    field: &FieldContext,
    received: &mut [FieldElement],
    parity_symbols: usize,
) -> Result<usize> {
    let capability = parity_symbols / 2;

    let syndromes = Syndromes::compute(field, received, parity_symbols);
    if syndromes.is_zero() {
        return Ok(0);
    }
    trace!("syndromes: {:?}", syndromes.to_elements(field));

    let locator = ErrorLocator::berlekamp_massey(field, &syndromes);
    let degree = locator.degree();
    if degree == 0 || degree > capability {
        return Err(UncorrectableReason::LocatorDegree { degree, capability }.into());
    }

    let locations = chien_search(field, &locator)?;
    let corrections = forney(field, &syndromes, &locator, &locations)?;

    for correction in &corrections {
        trace!(
            "symbol {} ^= {}",
            correction.position,
            correction.magnitude
        );
        received[correction.position] ^= correction.magnitude;
    }

    Ok(corrections.len())
}
