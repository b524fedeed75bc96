//! Galois Field (GF(2^m)) Table Tests
//!
//! Tests for table construction, the two element representations and
//! the arithmetic built on top of them.

use nandecc::reed_solomon::{CodeParameters, FieldContext, ReedSolomon};
use nandecc::FieldElement;

const NAND_POLY: [u8; 11] = [1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1];

// ============================================================================
// Table Construction
// ============================================================================

#[test]
fn test_every_nonzero_element_appears_once() {
    let gf = FieldContext::new(10, &NAND_POLY).unwrap();
    let mut seen = vec![false; gf.field_size()];

    for i in 0..gf.order() {
        let value = gf.alpha_pow(i).value() as usize;
        assert!(!seen[value], "alpha^{} repeats an earlier power", i);
        seen[value] = true;
    }

    assert!(!seen[0]);
    assert!(seen[1..].iter().all(|&s| s));
}

#[test]
fn test_table_construction_is_idempotent() {
    let first = FieldContext::new(10, &NAND_POLY).unwrap();
    let second = FieldContext::new(10, &NAND_POLY).unwrap();
    assert_eq!(first, second);

    let codec_a = ReedSolomon::new(CodeParameters::NAND).unwrap();
    let codec_b = ReedSolomon::new(CodeParameters::NAND).unwrap();
    assert_eq!(codec_a, codec_b);
    assert_eq!(&codec_a, ReedSolomon::nand());
}

#[test]
fn test_shared_instance_initialises_once_across_threads() {
    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(|| ReedSolomon::nand() as *const ReedSolomon as usize))
        .collect();
    let addresses: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_other_standard_fields_build() {
    // x^8 + x^4 + x^3 + x^2 + 1
    let gf8 = FieldContext::new(8, &[1, 0, 1, 1, 1, 0, 0, 0, 1]).unwrap();
    assert_eq!(gf8.order(), 255);
    assert_eq!(gf8.alpha_pow(8).value(), 0x1D);

    // x^16 + x^12 + x^3 + x + 1
    let params = CodeParameters::new(16, 0x1100B, 2).unwrap();
    let gf16 = FieldContext::new(16, &params.coefficients()).unwrap();
    assert_eq!(gf16.order(), 65535);
    assert_eq!(gf16.alpha_pow(16).value(), 0x100B);
}

// ============================================================================
// Representations
// ============================================================================

#[test]
fn test_log_of_zero_does_not_exist() {
    let gf = FieldContext::new(10, &NAND_POLY).unwrap();
    assert_eq!(gf.log(FieldElement::ZERO), None);
    assert_eq!(gf.log(FieldElement::ONE).map(|l| l.exponent()), Some(0));
}

#[test]
fn test_log_index_reduces_modulo_order() {
    let gf = FieldContext::new(10, &NAND_POLY).unwrap();
    assert_eq!(gf.log_index(1023).exponent(), 0);
    assert_eq!(gf.log_index(1024 + 5).exponent(), 6);
    assert_eq!(gf.exp(gf.log_index(2046 + 3)), gf.alpha_pow(3));
}

#[test]
fn test_element_bounds_are_field_size() {
    let gf = FieldContext::new(10, &NAND_POLY).unwrap();
    assert!(gf.element(1023).is_some());
    assert!(gf.element(1024).is_none());
    assert!(gf.element(u16::MAX).is_none());
}

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn test_distributive_law() {
    let gf = FieldContext::new(10, &NAND_POLY).unwrap();
    for a in (0u16..1024).step_by(61) {
        for b in (0u16..1024).step_by(67) {
            for c in (0u16..1024).step_by(71) {
                let (a, b, c) = (FieldElement::new(a), FieldElement::new(b), FieldElement::new(c));
                assert_eq!(gf.mul(a, b ^ c), gf.mul(a, b) ^ gf.mul(a, c));
            }
        }
    }
}

#[test]
fn test_multiplication_by_alpha_is_shift_and_reduce() {
    let gf = FieldContext::new(10, &NAND_POLY).unwrap();
    let alpha = gf.alpha_pow(1);
    for v in 1u16..1024 {
        let shifted = (v as u32) << 1;
        let expected = if shifted & 0x400 != 0 {
            (shifted ^ 0x409) as u16
        } else {
            shifted as u16
        };
        assert_eq!(gf.mul(FieldElement::new(v), alpha).value(), expected);
    }
}
