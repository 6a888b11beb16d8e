//! Bit-level packing of coefficients and message encode/decode.

use crate::{compress::compress_coeff, Error, Polynomial, Ring};

/// Bytes needed to pack `count` values of `width` bits.
#[inline]
#[must_use]
pub const fn packed_len(count: usize, width: u32) -> usize {
    (count * width as usize).div_ceil(8)
}

/// Append `values` to `out`, `width` bits each, LSB-first.
///
/// Bits above `width` in each value are ignored.
pub fn pack_bits(values: impl IntoIterator<Item = u32>, width: u32, out: &mut Vec<u8>) {
    debug_assert!((1..=32).contains(&width));
    let mask = if width == 32 { u32::MAX } else { (1u32 << width) - 1 };
    let mut acc: u64 = 0;
    let mut acc_bits: u32 = 0;
    for v in values {
        acc |= ((v & mask) as u64) << acc_bits;
        acc_bits += width;
        while acc_bits >= 8 {
            out.push(acc as u8);
            acc >>= 8;
            acc_bits -= 8;
        }
    }
    if acc_bits > 0 {
        out.push(acc as u8);
    }
}

/// Read `count` LSB-first `width`-bit values from `bytes`.
///
/// `bytes` must be exactly [`packed_len`]`(count, width)` long.
pub fn unpack_bits(bytes: &[u8], width: u32, count: usize) -> Result<Vec<u32>, Error> {
    debug_assert!((1..=32).contains(&width));
    let expected = packed_len(count, width);
    if bytes.len() != expected {
        return Err(Error::LengthMismatch {
            expected,
            actual: bytes.len(),
        });
    }
    let mask = if width == 32 { u64::from(u32::MAX) } else { (1u64 << width) - 1 };
    let mut values = Vec::with_capacity(count);
    let mut acc: u64 = 0;
    let mut acc_bits: u32 = 0;
    let mut iter = bytes.iter();
    while values.len() < count {
        while acc_bits < width {
            // Length was checked above, so the stream cannot run dry here.
            let byte = iter.next().copied().unwrap_or(0);
            acc |= (byte as u64) << acc_bits;
            acc_bits += 8;
        }
        values.push((acc & mask) as u32);
        acc >>= width;
        acc_bits -= width;
    }
    Ok(values)
}

/// Map an `n`-bit message (LSB-first, `n / 8` bytes) onto `R_q`: bit 0 becomes
/// `0`, bit 1 becomes `floor(q / 2)`.
pub fn message_to_poly(ring: &Ring, msg: &[u8]) -> Result<Polynomial, Error> {
    let n = ring.degree();
    let expected = n.div_ceil(8);
    if msg.len() != expected {
        return Err(Error::LengthMismatch {
            expected,
            actual: msg.len(),
        });
    }
    let half = ring.modulus() / 2;
    Ok(Polynomial(
        (0..n)
            .map(|i| {
                let bit = ((msg[i / 8] >> (i % 8)) & 1) as u32;
                // 0 or all-ones; avoids a data-dependent branch on message bits.
                bit.wrapping_neg() & half
            })
            .collect(),
    ))
}

/// Decode each coefficient to the nearer of `0` and `floor(q / 2)`.
#[must_use]
pub fn poly_to_message(ring: &Ring, p: &Polynomial) -> Vec<u8> {
    debug_assert!(ring.contains(p));
    let m = ring.reducer();
    let mut msg = vec![0u8; ring.degree().div_ceil(8)];
    for (i, &c) in p.0.iter().enumerate() {
        msg[i / 8] |= (compress_coeff(c, 1, m) as u8) << (i % 8);
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_bit_layout_matches_fips_byte_encode() {
        let mut out = Vec::new();
        pack_bits([0xABC, 0x123], 12, &mut out);
        assert_eq!(out, [0xBC, 0x3A, 0x12]);
        assert_eq!(unpack_bits(&out, 12, 2).unwrap(), [0xABC, 0x123]);
    }

    #[test]
    fn pack_unpack_odd_widths() {
        for width in [1u32, 3, 4, 5, 10, 11, 12, 13] {
            let values: Vec<u32> = (0..37u32).map(|i| i.wrapping_mul(2_654_435_761) & ((1 << width) - 1)).collect();
            let mut out = Vec::new();
            pack_bits(values.iter().copied(), width, &mut out);
            assert_eq!(out.len(), packed_len(values.len(), width), "width={width}");
            assert_eq!(unpack_bits(&out, width, values.len()).unwrap(), values, "width={width}");
        }
    }

    #[test]
    fn pack_masks_high_bits() {
        let mut out = Vec::new();
        pack_bits([0xFF], 4, &mut out);
        assert_eq!(out, [0x0F]);
    }

    #[test]
    fn unpack_rejects_wrong_length() {
        assert!(unpack_bits(&[0u8; 5], 10, 4).is_ok());
        assert_eq!(
            unpack_bits(&[0u8; 4], 10, 4),
            Err(Error::LengthMismatch {
                expected: 5,
                actual: 4
            })
        );
    }

    #[test]
    fn message_roundtrip() {
        let ring = Ring::new(256, 3329).unwrap();
        let msg: Vec<u8> = (0..32).map(|i| (i * 37) as u8).collect();
        let p = message_to_poly(&ring, &msg).unwrap();
        for (i, &c) in p.coeffs().iter().enumerate() {
            let bit = (msg[i / 8] >> (i % 8)) & 1;
            assert_eq!(c, if bit == 1 { 1664 } else { 0 });
        }
        assert_eq!(poly_to_message(&ring, &p), msg);
    }

    #[test]
    fn message_decoding_tolerates_noise() {
        let ring = Ring::new(8, 3329).unwrap();
        let p = ring.from_coeffs(&[0, 800, 3329 - 800, 1664, 1664 + 800, 1664 - 800, 900, 2400]).unwrap();
        // Bits: 0 0 0 1 1 1 1 1 -> 0b1111_1000
        assert_eq!(poly_to_message(&ring, &p), [0b1111_1000]);
    }

    #[test]
    fn message_length_checked() {
        let ring = Ring::new(256, 3329).unwrap();
        assert_eq!(
            message_to_poly(&ring, &[0u8; 31]),
            Err(Error::LengthMismatch {
                expected: 32,
                actual: 31
            })
        );
    }
}
