//! Decoder stage tests: syndromes, Berlekamp-Massey, Chien search, Forney

use nandecc::reed_solomon::decoder::{chien_search, error_evaluator, forney};
use nandecc::reed_solomon::{ErrorLocator, ReedSolomon, Syndromes};
use nandecc::FieldElement;

/// Zero codeword with the given errors applied
fn corrupted_zero_word(errors: &[(usize, u16)]) -> Vec<FieldElement> {
    let mut word = vec![FieldElement::ZERO; 1023];
    for &(position, value) in errors {
        word[position] ^= FieldElement::new(value);
    }
    word
}

#[test]
fn test_syndromes_of_single_error() {
    let rs = ReedSolomon::nand();
    let gf = rs.field();
    let word = corrupted_zero_word(&[(42, 0x123)]);
    let syndromes = Syndromes::compute(gf, &word, 8);

    assert_eq!(syndromes.len(), 8);
    for i in 1..=8 {
        let expected = gf.mul(FieldElement::new(0x123), gf.alpha_pow(42 * i));
        assert_eq!(syndromes.get(i).map(|l| gf.exp(l)), Some(expected));
    }
}

#[test]
fn test_zero_word_has_zero_syndromes() {
    let rs = ReedSolomon::nand();
    let syndromes = Syndromes::compute(rs.field(), &corrupted_zero_word(&[]), 8);
    assert!(syndromes.is_zero());
    assert!(syndromes.to_elements(rs.field()).iter().all(|s| s.is_zero()));
}

#[test]
fn test_locator_degree_tracks_error_count() {
    let rs = ReedSolomon::nand();
    let gf = rs.field();
    let errors = [(3usize, 0x011u16), (250, 0x3F0), (600, 0x001), (1000, 0x2A5)];

    for count in 1..=4 {
        let word = corrupted_zero_word(&errors[..count]);
        let syndromes = Syndromes::compute(gf, &word, 8);
        let locator = ErrorLocator::berlekamp_massey(gf, &syndromes);
        assert_eq!(locator.degree(), count);

        // lambda(X_j^-1) = 0 for every error locator X_j = alpha^position
        for &(position, _) in &errors[..count] {
            let inverse = gf.alpha_pow(gf.order() - position);
            assert!(locator.evaluate(gf, inverse).is_zero());
        }
    }
}

#[test]
fn test_chien_and_forney_recover_positions_and_values() {
    let rs = ReedSolomon::nand();
    let gf = rs.field();
    let errors = [(0usize, 0x155u16), (511, 0x0FF), (1014, 0x300)];
    let word = corrupted_zero_word(&errors);

    let syndromes = Syndromes::compute(gf, &word, 8);
    let locator = ErrorLocator::berlekamp_massey(gf, &syndromes);
    let locations = chien_search(gf, &locator).unwrap();

    let mut positions: Vec<usize> = locations.iter().map(|l| l.position).collect();
    positions.sort_unstable();
    assert_eq!(positions, vec![0, 511, 1014]);

    let corrections = forney(gf, &syndromes, &locator, &locations).unwrap();
    for &(position, value) in &errors {
        let found = corrections
            .iter()
            .find(|c| c.position == position)
            .expect("every located error gets a correction");
        assert_eq!(found.magnitude, FieldElement::new(value));
    }
}

#[test]
fn test_error_evaluator_has_degree_below_error_count() {
    let rs = ReedSolomon::nand();
    let gf = rs.field();
    let word = corrupted_zero_word(&[(10, 1), (20, 2)]);
    let syndromes = Syndromes::compute(gf, &word, 8);
    let locator = ErrorLocator::berlekamp_massey(gf, &syndromes);

    let omega = error_evaluator(gf, &syndromes, &locator);
    assert_eq!(omega.len(), 8);
    assert!(omega[2..].iter().all(Option::is_none));
}

#[test]
fn test_error_at_last_position() {
    let rs = ReedSolomon::nand();
    let gf = rs.field();
    // Position 0 corresponds to the root alpha^n = alpha^0
    let word = corrupted_zero_word(&[(0, 0x3FF)]);
    let syndromes = Syndromes::compute(gf, &word, 8);
    let locator = ErrorLocator::berlekamp_massey(gf, &syndromes);
    let locations = chien_search(gf, &locator).unwrap();
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].position, 0);
    assert_eq!(locations[0].root.exponent(), 0);
}
