//! Encode/decode tests through `ReedSolomon`

use nandecc::reed_solomon::{CodeParameters, ReedSolomon};
use nandecc::{EccError, UncorrectableReason};

fn nand_data(seed: u16) -> Vec<u16> {
    let rs = ReedSolomon::nand();
    (0..rs.k() as u16)
        .map(|i| i.wrapping_mul(113).wrapping_add(seed) % 1024)
        .collect()
}

fn codeword(rs: &ReedSolomon, data: &[u16]) -> Vec<u16> {
    let parity = rs.encode(data).unwrap();
    data.iter().copied().chain(parity).collect()
}

// ============================================================================
// Systematic Encoding
// ============================================================================

#[test]
fn test_codeword_starts_with_data() {
    let rs = ReedSolomon::nand();
    let data = nand_data(1);
    let word = codeword(rs, &data);

    assert_eq!(word.len(), 1023);
    assert_eq!(&word[..rs.k()], &data[..]);
    assert!(word[rs.k()..].iter().all(|&p| p < 1024));
}

#[test]
fn test_encoding_is_deterministic() {
    let rs = ReedSolomon::nand();
    let data = nand_data(2);
    assert_eq!(rs.encode(&data).unwrap(), rs.encode(&data).unwrap());
}

#[test]
fn test_all_ones_symbols_are_valid() {
    let rs = ReedSolomon::nand();
    let data = vec![1023u16; rs.k()];
    let mut word = codeword(rs, &data);
    assert_eq!(rs.decode(&mut word).unwrap(), 0);
}

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_decode_corrects_each_error_count_up_to_t() {
    let rs = ReedSolomon::nand();
    let original = codeword(rs, &nand_data(3));
    let positions = [5usize, 400, 777, 1020];
    let errors = [0x001u16, 0x3FF, 0x200, 0x0AA];

    for count in 1..=4 {
        let mut word = original.clone();
        for i in 0..count {
            word[positions[i]] ^= errors[i];
        }
        assert_eq!(rs.decode(&mut word).unwrap(), count);
        assert_eq!(word, original);
    }
}

#[test]
fn test_decode_rejects_out_of_field_symbol() {
    let rs = ReedSolomon::nand();
    let mut word = codeword(rs, &nand_data(4));
    word[12] = 1024;
    let before = word.clone();

    assert!(matches!(
        rs.decode(&mut word),
        Err(EccError::InvalidSymbol { position: 12, value: 1024, symbol_bits: 10 })
    ));
    assert_eq!(word, before);
}

#[test]
fn test_small_code_single_errors_exhaustive() {
    // GF(16) with x^4 + x + 1, t = 2: RS(15, 11)
    let rs = ReedSolomon::new(CodeParameters::new(4, 0x13, 2).unwrap()).unwrap();
    let data: Vec<u16> = (0..11).map(|i| (i * 5 + 3) % 16).collect();
    let original = codeword(&rs, &data);

    for position in 0..15 {
        for error in 1u16..16 {
            let mut word = original.clone();
            word[position] ^= error;
            assert_eq!(rs.decode(&mut word).unwrap(), 1);
            assert_eq!(word, original, "position {} error {}", position, error);
        }
    }
}

#[test]
fn test_small_code_double_errors_exhaustive() {
    let rs = ReedSolomon::new(CodeParameters::new(4, 0x13, 2).unwrap()).unwrap();
    let data: Vec<u16> = (0..11).map(|i| (i * 7 + 1) % 16).collect();
    let original = codeword(&rs, &data);

    for first in 0..15 {
        for second in (first + 1)..15 {
            let mut word = original.clone();
            word[first] ^= 0x9;
            word[second] ^= 0x6;
            assert_eq!(rs.decode(&mut word).unwrap(), 2);
            assert_eq!(word, original);
        }
    }
}

#[test]
fn test_small_code_three_errors_are_never_miscounted() {
    let rs = ReedSolomon::new(CodeParameters::new(4, 0x13, 2).unwrap()).unwrap();
    let data: Vec<u16> = (0..11).map(|i| (i * 3 + 2) % 16).collect();
    let original = codeword(&rs, &data);

    for first in 0..13 {
        let mut word = original.clone();
        word[first] ^= 0x1;
        word[first + 1] ^= 0x2;
        word[first + 2] ^= 0x4;
        let before = word.clone();

        match rs.decode(&mut word) {
            Ok(count) => {
                assert!(count <= 2);
                assert_ne!(word, original);
            }
            Err(EccError::Uncorrectable(reason)) => {
                assert!(matches!(
                    reason,
                    UncorrectableReason::LocatorDegree { .. }
                        | UncorrectableReason::RootCountMismatch { .. }
                        | UncorrectableReason::ZeroDerivative { .. }
                ));
                assert_eq!(word, before);
            }
            Err(other) => panic!("unexpected error: {}", other),
        }
    }
}

#[test]
fn test_gf256_code_with_eight_correctable() {
    let rs = ReedSolomon::new(CodeParameters::new(8, 0x11D, 8).unwrap()).unwrap();
    assert_eq!((rs.n(), rs.k(), rs.t()), (255, 239, 8));

    let data: Vec<u16> = (0..239).map(|i| (i * 29 + 7) % 256).collect();
    let original = codeword(&rs, &data);
    let mut word = original.clone();
    for i in 0..8 {
        word[i * 31] ^= (i as u16 + 1) * 17;
    }

    assert_eq!(rs.decode(&mut word).unwrap(), 8);
    assert_eq!(word, original);
}
