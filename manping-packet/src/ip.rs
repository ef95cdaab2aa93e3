//! IPv4 header words
//!
//! A 20-byte header with no options, laid out as five big-endian words.

use std::net::Ipv4Addr;

/// Header length in 32-bit words
pub const HEADER_WORDS: usize = 5;

/// Index of the word holding the header checksum (low half)
pub const CHECKSUM_WORD: usize = 2;

/// IP protocol number for ICMP
pub const PROTOCOL_ICMP: u8 = 1;

/// Time to live used for every frame
pub const DEFAULT_TTL: u8 = 0x80;

/// IPv4 header fields that vary between frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Header {
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
    pub identification: u16,
    /// Header plus IP payload, in bytes
    pub total_length: u16,
    pub ttl: u8,
    pub protocol: u8,
}

impl Ipv4Header {
    /// ICMP header with the default TTL
    pub fn icmp(
        source: Ipv4Addr,
        destination: Ipv4Addr,
        identification: u16,
        total_length: u16,
    ) -> Self {
        Ipv4Header {
            source,
            destination,
            identification,
            total_length,
            ttl: DEFAULT_TTL,
            protocol: PROTOCOL_ICMP,
        }
    }

    /// Header words with a zero checksum field
    ///
    /// Version 4, IHL 5, type of service 0, no flags and fragment offset 0.
    pub fn to_words(&self) -> [u32; HEADER_WORDS] {
        let version_ihl = 0x40 | HEADER_WORDS as u32;
        [
            (version_ihl << 24) | u32::from(self.total_length),
            u32::from(self.identification) << 16,
            (u32::from(self.ttl) << 24) | (u32::from(self.protocol) << 16),
            u32::from(self.source),
            u32::from(self.destination),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icmp_header_words() {
        let header = Ipv4Header::icmp(
            Ipv4Addr::new(10, 0, 0, 3),
            Ipv4Addr::new(10, 0, 0, 2),
            0xB3FE,
            28,
        );
        assert_eq!(
            header.to_words(),
            [0x4500_001C, 0xB3FE_0000, 0x8001_0000, 0x0A00_0003, 0x0A00_0002]
        );
    }

    #[test]
    fn test_checksum_field_starts_clear() {
        let header = Ipv4Header::icmp(Ipv4Addr::BROADCAST, Ipv4Addr::BROADCAST, 0xFFFF, 0xFFFF);
        assert_eq!(header.to_words()[CHECKSUM_WORD] & 0xFFFF, 0);
    }
}
