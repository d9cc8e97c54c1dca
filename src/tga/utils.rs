//! Byte and bit-field conversion helpers shared by the TGA parser and resolver.

/// 5-bit channel value expanded to 8 bits, `round(v / 31 * 255)`.
pub(crate) const EXPAND_5_TO_8: [u8; 32] = build_expand_5();

const fn build_expand_5() -> [u8; 32] {
    let mut table = [0u8; 32];
    let mut v = 0;
    while v < 32 {
        // (255v + 15) / 31 never lands on a .5 boundary, so this is exact rounding.
        table[v] = ((v as u32 * 255 + 15) / 31) as u8;
        v += 1;
    }
    table
}

/// Expand a 5-bit field to 8 bits. Bits above the low five are ignored.
#[inline]
pub fn expand_5_to_8(field: u16) -> u8 {
    EXPAND_5_TO_8[usize::from(field & 0x1F)]
}

/// Split a little-endian 1-5-5-5 value into expanded (R, G, B).
#[inline]
pub(crate) fn split_555(value: u16) -> [u8; 3] {
    [
        expand_5_to_8(value >> 10),
        expand_5_to_8(value >> 5),
        expand_5_to_8(value),
    ]
}

#[inline]
pub(crate) fn u16_le(data: &[u8], offset: usize) -> Option<u16> {
    let bytes = data.get(offset..offset.checked_add(2)?)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

#[inline]
pub(crate) fn u32_le(data: &[u8], offset: usize) -> Option<u32> {
    let bytes = data.get(offset..offset.checked_add(4)?)?;
    Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

/// Bytes needed to hold `bits`; 15-bit depths live in a 16-bit container.
#[inline]
pub(crate) fn depth_to_bytes(bits: u8) -> usize {
    usize::from(bits).div_ceil(8)
}

/// Read a fixed-width, NUL-padded text field.
///
/// Stops at the first NUL, trims trailing spaces, and replaces invalid UTF-8.
pub(crate) fn fixed_str(field: &[u8]) -> alloc::string::String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    let text = alloc::string::String::from_utf8_lossy(&field[..end]);
    alloc::string::String::from(text.trim_end_matches(' '))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_bit_expansion_matches_rounding() {
        assert_eq!(expand_5_to_8(0), 0);
        assert_eq!(expand_5_to_8(15), 123);
        assert_eq!(expand_5_to_8(31), 255);
        for v in 0..32u16 {
            let expected = (f64::from(v) / 31.0 * 255.0 + 0.5) as u8;
            assert_eq!(expand_5_to_8(v), expected, "field {v}");
        }
    }

    #[test]
    fn split_555_field_positions() {
        // R=31, G=0, B=15
        let value = (31 << 10) | 15;
        assert_eq!(split_555(value), [255, 0, 123]);
        // High attribute bit is ignored.
        assert_eq!(split_555(value | 0x8000), [255, 0, 123]);
    }

    #[test]
    fn fifteen_bit_depth_uses_two_bytes() {
        assert_eq!(depth_to_bytes(8), 1);
        assert_eq!(depth_to_bytes(15), 2);
        assert_eq!(depth_to_bytes(16), 2);
        assert_eq!(depth_to_bytes(24), 3);
        assert_eq!(depth_to_bytes(32), 4);
    }

    #[test]
    fn fixed_str_stops_at_nul() {
        assert_eq!(fixed_str(b"Jane Doe  \0garbage"), "Jane Doe");
        assert_eq!(fixed_str(b"\0\0\0"), "");
        assert_eq!(fixed_str(b"full"), "full");
    }

    #[test]
    fn le_readers_bounds_check() {
        let data = [0x34, 0x12, 0x78, 0x56];
        assert_eq!(u16_le(&data, 0), Some(0x1234));
        assert_eq!(u32_le(&data, 0), Some(0x5678_1234));
        assert_eq!(u16_le(&data, 3), None);
        assert_eq!(u32_le(&data, usize::MAX), None);
    }
}
