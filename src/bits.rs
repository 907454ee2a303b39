//! Bit-level accessors shared by the report decoders.

/// Little-endian 16-bit load.
#[inline]
pub fn read_axis16_le(bytes: [u8; 2]) -> u16 {
    u16::from_le_bytes(bytes)
}

/// Tests one bit of `byte`, MSB first: index 0 is bit 7, index 7 is bit 0.
///
/// Indices outside `0..=7` read as `false` rather than failing.
#[inline]
pub fn read_bit(byte: u8, index: usize) -> bool {
    if index > 7 {
        return false;
    }
    (byte >> (7 - index)) & 1 == 1
}
