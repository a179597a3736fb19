//! Frames a text payload into the data code-words of a Version-1, 8-bit byte
//! mode symbol, then hands the result to the Reed-Solomon step (S4.5).

use crate::bit_buffer::BitBuffer;
use crate::code_ecc::{CodeEcc, CHAR_COUNT_BITS, MODE_EIGHT_BITS};
use crate::error::QrError;
use crate::reed_solomon;

const PAD_BYTES: [u8; 2] = [0b1110_1100, 0b0001_0001];

/// Returns the full code-word stream (data code-words followed by EC
/// code-words) for `text` at the given error correction level, or
/// `QrError::CapacityExceeded` if `text` does not fit the Version-1 byte
/// capacity of that level.
pub fn encode(ecl: CodeEcc, text: &str) -> Result<BitBuffer, QrError> {
    let info = ecl.info();
    let len = text.chars().count();
    if len > info.src_cap {
        return Err(QrError::CapacityExceeded {
            len,
            cap: info.src_cap,
        });
    }

    let mut bb = BitBuffer::new(info.data_codewords * 8);

    bb.append_int(MODE_EIGHT_BITS, 4);
    bb.append_int(len as u32, CHAR_COUNT_BITS);
    for c in text.chars() {
        bb.append_byte(c as u32 as u8);
    }

    append_terminator(&mut bb);
    append_byte_alignment(&mut bb);
    append_fill_pattern(&mut bb);

    Ok(reed_solomon::encode(&bb, info.ec_codewords()))
}

fn append_terminator(bb: &mut BitBuffer) {
    let remaining = bb.len() - bb.position();
    if remaining == 0 {
        return;
    }
    let zeros = remaining.min(4);
    bb.append_int(0, zeros as u8);
}

fn append_byte_alignment(bb: &mut BitBuffer) {
    let zeros = (8 - bb.position() % 8) % 8;
    bb.append_int(0, zeros as u8);
}

fn append_fill_pattern(bb: &mut BitBuffer) {
    let mut i = 0usize;
    while bb.position() < bb.len() {
        bb.append_byte(PAD_BYTES[i % 2]);
        i += 1;
    }
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn reproduce_published_vector_hello_world_m() {
        let out = encode(CodeEcc::Medium, "Hello, World!").unwrap();
        let expected = [
            0x40u8, 0xD4, 0x86, 0x56, 0xC6, 0xC6, 0xF2, 0xC2, 0x05, 0x76, 0xF7, 0x26, 0xC6, 0x42,
            0x10, 0xEC,
        ];
        for (i, &b) in expected.iter().enumerate() {
            assert_eq!(out.byte_at(i), b, "byte {i}");
        }
    }

    #[test]
    fn output_length_equals_total_codewords_times_8() {
        for ecl in [CodeEcc::Low, CodeEcc::Medium, CodeEcc::Quartile, CodeEcc::High] {
            let out = encode(ecl, "hi").unwrap();
            assert_eq!(out.position(), ecl.info().total_codewords * 8);
        }
    }

    #[test]
    fn accept_text_exactly_at_capacity() {
        let text = "x".repeat(CodeEcc::High.info().src_cap);
        assert!(encode(CodeEcc::High, &text).is_ok());
    }

    #[test]
    fn reject_text_one_over_capacity() {
        let text = "x".repeat(CodeEcc::High.info().src_cap + 1);
        let err = encode(CodeEcc::High, &text).unwrap_err();
        match err {
            QrError::CapacityExceeded { len, cap } => {
                assert_eq!(len, CodeEcc::High.info().src_cap + 1);
                assert_eq!(cap, CodeEcc::High.info().src_cap);
            }
        }
    }

    #[test]
    fn accept_rune_count_at_capacity_even_when_byte_length_exceeds_it() {
        // "é" is 2 UTF-8 bytes but 1 rune; capacity is measured in runes.
        let text = "é".repeat(CodeEcc::Low.info().src_cap);
        assert!(encode(CodeEcc::Low, &text).is_ok());
    }

    #[test]
    fn terminator_truncates_when_remaining_is_less_than_four_bits() {
        let mut bb = BitBuffer::new(10);
        bb.append_int(0, 8); // position = 8, remaining = 2
        append_terminator(&mut bb);
        assert_eq!(bb.position(), 10, "terminator truncates to the 2 remaining bits");

        append_byte_alignment(&mut bb);
        assert_eq!(bb.position(), 16, "alignment pads up to the next byte boundary");
    }

    #[test]
    fn accept_empty_payload() {
        let out = encode(CodeEcc::Low, "").unwrap();
        assert_eq!(out.position(), CodeEcc::Low.info().data_codewords * 8);
        // mode (4) + char count (8) = 12 bits of header, then terminator fills
        // the rest of the first byte, then alternating fill bytes.
        assert_eq!(out.byte_at(0), 0b0100_0000);
    }
}
