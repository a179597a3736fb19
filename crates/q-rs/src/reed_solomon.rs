//! Reed-Solomon error-correction encoding over GF(2^8) (S4.4).

use crate::bit_buffer::BitBuffer;
use crate::gf256::{exp, Polynomial};

/// Builds the degree-`t` generator polynomial
/// `g_t(x) = product_{i=0..t-1} (x - alpha^i)` (subtraction = addition over GF(2)).
///
/// Panics if `t < 2` (the generator is undefined for smaller degrees; this
/// crate's Version-1 capacity table never requests fewer than 7 EC code-words,
/// S6.2).
pub fn generator_polynomial(t: usize) -> Polynomial {
    assert!(t >= 2, "generator degree must be at least 2");
    let mut g = Polynomial::monomial(1, 0);
    let x = Polynomial::monomial(1, 1);
    for i in 0..t {
        let root = Polynomial::monomial(exp(i as u8), 0);
        g = g.mul(&x.add(&root));
    }
    g
}

/// Appends `t` Reed-Solomon check bytes to the data code-words carried by `data`.
///
/// `data` must already be fully written (its position equals its declared
/// length, a multiple of 8). Returns a new buffer of length
/// `(data.position()/8 + t) * 8` bits: the original data bytes followed by the
/// `t` check bytes (S4.4).
pub fn encode(data: &BitBuffer, t: usize) -> BitBuffer {
    let m = Polynomial::from_bit_buffer(data);
    let f = m.mul(&Polynomial::monomial(1, t));
    let g = generator_polynomial(t);
    let r = f.remainder(&g);

    let data_bytes = data.position() / 8;
    let mut out = BitBuffer::new((data_bytes + t) * 8);
    for i in 0..data_bytes {
        out.append_byte(data.byte_at(i));
    }
    // r has degree < t; pad the low end with zero coefficients so the check
    // bytes always number exactly t, reading from degree t-1 down to 0.
    let mut desc = r.coeffs_desc();
    while desc.len() < t {
        desc.insert(0, 0);
    }
    for &byte in &desc[desc.len() - t..] {
        out.append_byte(byte);
    }
    out
}

#[cfg(test)]
mod should {
    use super::*;

    fn buffer_of(bytes: &[u8]) -> BitBuffer {
        let mut bb = BitBuffer::new(bytes.len() * 8);
        for &b in bytes {
            bb.append_byte(b);
        }
        bb
    }

    #[test]
    fn reproduce_published_generator_degree_10() {
        let g = generator_polynomial(10);
        let expected_low_to_high = [193u8, 157, 113, 95, 94, 199, 111, 159, 194, 216, 1];
        for (degree, &c) in expected_low_to_high.iter().enumerate() {
            assert_eq!(g.coeff(degree), c, "coefficient at degree {degree}");
        }
    }

    #[test]
    fn reproduce_published_vector_t5() {
        let data = buffer_of(&[0x40, 0x18, 0xAC, 0xC3, 0x00]);
        let encoded = encode(&data, 5);
        let expected_check = [0x86u8, 0x0D, 0x22, 0xAE, 0x30];
        for (i, &c) in expected_check.iter().enumerate() {
            assert_eq!(encoded.byte_at(5 + i), c, "check byte {i}");
        }
        assert_eq!(encoded.position(), (5 + 5) * 8);
    }

    #[test]
    fn reproduce_published_vector_t10() {
        let data = buffer_of(&[
            0x10, 0x20, 0x0C, 0x56, 0x61, 0x80, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11,
            0xEC, 0x11,
        ]);
        let encoded = encode(&data, 10);
        let expected_check = [
            0xA5u8, 0x24, 0xD4, 0xC1, 0xED, 0x36, 0xC7, 0x87, 0x2C, 0x55,
        ];
        for (i, &c) in expected_check.iter().enumerate() {
            assert_eq!(encoded.byte_at(16 + i), c, "check byte {i}");
        }
    }

    #[test]
    fn prefix_of_output_equals_input_data() {
        let data = buffer_of(&[0x11, 0x22, 0x33, 0x44]);
        let encoded = encode(&data, 7);
        for i in 0..4 {
            assert_eq!(encoded.byte_at(i), data.byte_at(i));
        }
    }

    #[test]
    fn full_polynomial_is_divisible_by_generator() {
        let data = buffer_of(&[0x40, 0x18, 0xAC, 0xC3, 0x00]);
        let encoded = encode(&data, 5);
        let full = Polynomial::from_bit_buffer(&encoded);
        let g = generator_polynomial(5);
        assert_eq!(full.remainder(&g), Polynomial::zero());
    }

    #[test]
    #[should_panic]
    fn reject_degree_below_two() {
        generator_polynomial(1);
    }
}
