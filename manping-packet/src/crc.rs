//! Ethernet frame check sequence
//!
//! The FCS is the reflected CRC-32 (taps `0xEDB88320`) computed one bit at
//! a time, least significant bit first. Bytes are pulled out of the word
//! buffer most significant byte first, and stream bytes 14 and 15 are left
//! out: in the word layout they are the two alignment bytes after the
//! EtherType that put the IPv4 header on a word boundary, and they never
//! reach the wire.
//!
//! The transmit peripheral takes the FCS as a word whose bytes are in the
//! opposite order from the natural CRC register, so the result is
//! byte-reversed before it is returned.

/// Reflected CRC-32 polynomial
pub const CRC32_TAPS: u32 = 0xEDB8_8320;

/// Stream bytes excluded from the FCS
pub const SKIPPED_BYTES: std::ops::Range<usize> = 14..16;

/// Register conditioning applied around the bit loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrcMode {
    /// Preset to all ones, invert the final value
    #[default]
    Standard,
    /// Start from zero and skip the final inversion. Debugging only; the
    /// result is not a valid FCS.
    NonInverting,
}

/// Byte `index` of the big-endian stream held in `words`
#[inline]
pub fn stream_byte(words: &[u32], index: usize) -> u8 {
    (words[index / 4] >> (24 - 8 * (index % 4))) as u8
}

/// Computes the frame check sequence over the first `byte_length` bytes
///
/// Bytes past the end of `words` are never read, so any `byte_length` is
/// accepted.
///
/// # Examples
///
/// ```
/// use manping_packet::crc::compute_frame_crc32;
///
/// // "123456789" has the well-known CRC-32 0xCBF43926
/// let words = [0x3132_3334, 0x3536_3738, 0x3900_0000];
/// assert_eq!(compute_frame_crc32(&words, 9), 0x2639_F4CB);
/// ```
pub fn compute_frame_crc32(frame_words: &[u32], byte_length: usize) -> u32 {
    compute_frame_crc32_with(frame_words, byte_length, CrcMode::Standard)
}

/// [`compute_frame_crc32`] with explicit register conditioning
pub fn compute_frame_crc32_with(frame_words: &[u32], byte_length: usize, mode: CrcMode) -> u32 {
    let mut crc = match mode {
        CrcMode::Standard => 0xFFFF_FFFF,
        CrcMode::NonInverting => 0,
    };

    let length = byte_length.min(frame_words.len() * 4);
    for index in (0..length).filter(|i| !SKIPPED_BYTES.contains(i)) {
        crc = update(crc, stream_byte(frame_words, index));
    }

    if mode == CrcMode::Standard {
        crc ^= 0xFFFF_FFFF;
    }

    crc.swap_bytes()
}

fn update(mut crc: u32, mut byte: u8) -> u32 {
    for _ in 0..8 {
        if (crc ^ u32::from(byte)) & 1 != 0 {
            crc = (crc >> 1) ^ CRC32_TAPS;
        } else {
            crc >>= 1;
        }
        byte >>= 1;
    }
    crc
}
