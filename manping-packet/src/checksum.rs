//! Ones-complement checksums over 32-bit frame words
//!
//! Every header in the frame is word aligned, so the sums here walk whole
//! `u32` words and add the high and low 16-bit halves of each one. This is
//! the same arithmetic as the RFC 1071 Internet checksum over the
//! big-endian byte image of those words.

/// Folded ones-complement sum of the 16-bit halves of `words`
///
/// The halves are summed into a 64-bit accumulator, which is folded by
/// adding its upper bits back into the low 16 until nothing is left above
/// them. The result is *not* complemented.
///
/// # Examples
///
/// ```
/// use manping_packet::checksum::ones_complement_sum;
///
/// assert_eq!(ones_complement_sum(&[0x0001_0002]), 0x0003);
/// assert_eq!(ones_complement_sum(&[0xFFFF_0001]), 0x0001);
/// ```
pub fn ones_complement_sum(words: &[u32]) -> u16 {
    let mut sum = words
        .iter()
        .fold(0u64, |acc, &word| {
            acc + u64::from(word >> 16) + u64::from(word & 0xFFFF)
        });

    while (sum >> 16) != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }

    sum as u16
}

/// Number of 32-bit words in an IPv4 header, read from its first word
pub fn header_word_count(first_word: u32) -> usize {
    ((first_word >> 24) & 0x0F) as usize
}

/// Calculates the IPv4 header checksum
///
/// `frame_words` starts at the first header word; only the first
/// `header_word_count` words are summed. The checksum field (low half of
/// the third header word) must already be zero.
pub fn ipv4_header_checksum(frame_words: &[u32], header_word_count: usize) -> u16 {
    let end = header_word_count.min(frame_words.len());
    ones_complement_sum(&frame_words[..end]) ^ 0xFFFF
}

/// Checks a header that already carries its checksum
///
/// With the true checksum in place the folded sum is exactly `0xFFFF`.
pub fn verify_ipv4_header(frame_words: &[u32], header_word_count: usize) -> bool {
    let end = header_word_count.min(frame_words.len());
    ones_complement_sum(&frame_words[..end]) == 0xFFFF
}

/// Checks an ICMP message that already carries its checksum
pub fn verify_icmp(message_words: &[u32]) -> bool {
    ones_complement_sum(message_words) == 0xFFFF
}
