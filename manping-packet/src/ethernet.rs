//! Ethernet II header words
//!
//! The header is 14 bytes, which leaves the IPv4 header two bytes short of
//! a word boundary. The software-MAC layout pads it with a second copy of
//! the EtherType so the network words start at word 4; those two bytes are
//! excluded from the FCS (see [`crate::crc`]).

use manping_core::MacAddr;

/// IPv4 EtherType
pub const ETHERTYPE_IPV4: u16 = 0x0800;

/// Ethernet header size on the wire (dst + src + type)
pub const HEADER_SIZE: usize = 14;

/// Destination and source MAC packed into three big-endian words
pub fn mac_words(destination: MacAddr, source: MacAddr) -> [u32; 3] {
    let d = destination.0;
    let s = source.0;
    [
        u32::from_be_bytes([d[0], d[1], d[2], d[3]]),
        u32::from_be_bytes([d[4], d[5], s[0], s[1]]),
        u32::from_be_bytes([s[2], s[3], s[4], s[5]]),
    ]
}

/// EtherType followed by its alignment copy
pub fn ethertype_word(ethertype: u16) -> u32 {
    (u32::from(ethertype) << 16) | u32::from(ethertype)
}

/// Destination MAC and EtherType, for frames whose source MAC is inserted
/// by the transmit hardware
pub fn destination_words(destination: MacAddr, ethertype: u16) -> [u32; 2] {
    let d = destination.0;
    let [t0, t1] = ethertype.to_be_bytes();
    [
        u32::from_be_bytes([d[0], d[1], d[2], d[3]]),
        u32::from_be_bytes([d[4], d[5], t0, t1]),
    ]
}

/// Source-MAC configuration register pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacRegisters {
    /// First two MAC bytes in the low half
    pub hi: u32,
    /// Last four MAC bytes
    pub lo: u32,
}

impl From<MacAddr> for MacRegisters {
    fn from(mac: MacAddr) -> Self {
        let m = mac.0;
        MacRegisters {
            hi: u32::from(u16::from_be_bytes([m[0], m[1]])),
            lo: u32::from_be_bytes([m[2], m[3], m[4], m[5]]),
        }
    }
}
