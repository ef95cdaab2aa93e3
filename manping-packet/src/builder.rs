//! Echo-request frame assembly
//!
//! Two layout paths share one set of network words (IPv4 header, ICMP
//! header and padding, checksums already patched):
//!
//! ```text
//! software MAC                     hardware MAC
//!  0  dst[0..4]                     0  dst[0..4]
//!  1  dst[4..6] src[0..2]           1  dst[4..6] ethertype
//!  2  src[2..6]                     2-12  network words
//!  3  ethertype ethertype          13  FCS (software CRC only)
//!  4-14  network words
//! 15  FCS (software CRC only)
//! ```
//!
//! The FCS is always computed over the software-MAC image, because that is
//! what reaches the wire once the hardware has inserted the source MAC.

use crate::checksum::{header_word_count, ipv4_header_checksum, ones_complement_sum};
use crate::crc::compute_frame_crc32;
use crate::ethernet::{self, MacRegisters, ETHERTYPE_IPV4};
use crate::frame::{Frame, FrameVariant, Transmission, TxCommand};
use crate::icmp::{self, EchoRequest};
use crate::ip::{self, Ipv4Header};
use manping_core::MacAddr;
use std::net::Ipv4Addr;
use tracing::debug;

/// Zero words that pad the frame out after the ICMP header
pub const PADDING_WORDS: usize = 4;

/// IPv4 header, ICMP header and padding
pub const NETWORK_WORDS: usize = ip::HEADER_WORDS + icmp::HEADER_WORDS + PADDING_WORDS;

/// IPv4 total length: header plus an echo request without data
const IP_TOTAL_LENGTH: u16 = ((ip::HEADER_WORDS + icmp::HEADER_WORDS) * 4) as u16;

/// Bytes covered by the FCS in the software-MAC image
const SOFTWARE_MAC_BYTES: usize = ethernet::HEADER_SIZE + 2 + NETWORK_WORDS * 4;

/// Bytes ahead of the FCS in the hardware-MAC buffer
const HARDWARE_MAC_BYTES: usize = 8 + NETWORK_WORDS * 4;

/// The fields normally filled from a random source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSeed {
    /// IPv4 identification
    pub identification: u16,
    /// ICMP identifier (high half) and sequence number (low half)
    pub echo: u32,
}

impl FrameSeed {
    pub fn new(identification: u16, echo: u32) -> Self {
        FrameSeed {
            identification,
            echo,
        }
    }

    /// Draw both fields from the thread-local generator
    pub fn random() -> Self {
        FrameSeed {
            identification: rand::random(),
            echo: rand::random(),
        }
    }
}

/// Builder for a single echo-request frame
///
/// # Examples
///
/// ```
/// use manping_core::MacAddr;
/// use manping_packet::{FrameBuilder, FrameVariant};
/// use std::net::Ipv4Addr;
///
/// let tx = FrameBuilder::new(
///     MacAddr::new([0x00, 0x12, 0x34, 0x56, 0x78, 0x90]),
///     MacAddr::new([0x00, 0x0a, 0xe6, 0xf0, 0x05, 0xa3]),
///     Ipv4Addr::new(10, 0, 0, 3),
///     Ipv4Addr::new(10, 0, 0, 2),
/// )
/// .build(FrameVariant::SoftwareMacSoftwareCrc);
///
/// assert_eq!(tx.frame.words().len(), 16);
/// assert_eq!(tx.frame.words()[3], 0x0800_0800);
/// assert_eq!(tx.command.word_count(), tx.frame.word_count());
/// ```
#[derive(Debug, Clone)]
pub struct FrameBuilder {
    src_mac: MacAddr,
    dst_mac: MacAddr,
    src_ip: Ipv4Addr,
    dst_ip: Ipv4Addr,
    seed: FrameSeed,
}

impl FrameBuilder {
    /// Create a builder with a zero seed
    pub fn new(src_mac: MacAddr, dst_mac: MacAddr, src_ip: Ipv4Addr, dst_ip: Ipv4Addr) -> Self {
        FrameBuilder {
            src_mac,
            dst_mac,
            src_ip,
            dst_ip,
            seed: FrameSeed::default(),
        }
    }

    /// Set the identification and echo fields
    pub fn seed(mut self, seed: FrameSeed) -> Self {
        self.seed = seed;
        self
    }

    /// Build the frame and command for `variant`
    pub fn build(&self, variant: FrameVariant) -> Transmission {
        let network = self.network_words();
        let image = software_mac_layout(self.dst_mac, self.src_mac, &network);

        let fcs = (!variant.hardware_crc())
            .then(|| compute_frame_crc32(&image, SOFTWARE_MAC_BYTES));

        let frame = if variant.hardware_mac() {
            hardware_mac_layout(self.dst_mac, &network, fcs, variant)
        } else {
            let mut words = image;
            words.extend(fcs);
            Frame::new(words, SOFTWARE_MAC_BYTES, variant)
        };

        let command = TxCommand::for_variant(variant, frame.word_count());
        let mac_registers = variant.hardware_mac().then(|| MacRegisters::from(self.src_mac));

        debug!(
            variant = %variant,
            words = frame.words().len(),
            transmit = frame.word_count(),
            command = %command,
            fcs = ?fcs.map(|v| format!("{v:#010x}")),
            "built echo request"
        );

        let transmission = Transmission {
            frame,
            command,
            mac_registers,
        };
        debug_assert!(
            transmission.verify().is_ok(),
            "frame self-check failed: {:?}",
            transmission.verify()
        );
        transmission
    }

    /// IPv4 header, ICMP header and padding with both checksums patched
    fn network_words(&self) -> [u32; NETWORK_WORDS] {
        let mut words = [0u32; NETWORK_WORDS];

        let header = Ipv4Header::icmp(
            self.src_ip,
            self.dst_ip,
            self.seed.identification,
            IP_TOTAL_LENGTH,
        );
        words[..ip::HEADER_WORDS].copy_from_slice(&header.to_words());
        let checksum = ipv4_header_checksum(&words, header_word_count(words[0]));
        words[ip::CHECKSUM_WORD] |= u32::from(checksum);

        let icmp_range = ip::HEADER_WORDS..ip::HEADER_WORDS + icmp::HEADER_WORDS;
        words[icmp_range.clone()].copy_from_slice(&EchoRequest::new(self.seed.echo).to_words());
        patch_checksum(&mut words[icmp_range], icmp::CHECKSUM_WORD);

        words
    }
}

/// Build a frame in one call
pub fn build_frame(
    variant: FrameVariant,
    src_mac: MacAddr,
    dst_mac: MacAddr,
    src_ip: Ipv4Addr,
    dst_ip: Ipv4Addr,
    seed: FrameSeed,
) -> Transmission {
    FrameBuilder::new(src_mac, dst_mac, src_ip, dst_ip)
        .seed(seed)
        .build(variant)
}

/// Clear the checksum field in the low half of `region[field_word]`, then
/// store the folded sum XORed with 0xFFFF.
///
/// Used for the ICMP message; the IPv4 header goes through
/// `ipv4_header_checksum`, which reads its extent from the IHL.
fn patch_checksum(region: &mut [u32], field_word: usize) {
    region[field_word] &= 0xFFFF_0000;
    let folded = ones_complement_sum(region);
    region[field_word] |= u32::from(folded ^ 0xFFFF);
}

/// Software-MAC image without the FCS
fn software_mac_layout(dst: MacAddr, src: MacAddr, network: &[u32; NETWORK_WORDS]) -> Vec<u32> {
    let mut words = Vec::with_capacity(4 + NETWORK_WORDS + 1);
    words.extend_from_slice(&ethernet::mac_words(dst, src));
    words.push(ethernet::ethertype_word(ETHERTYPE_IPV4));
    words.extend_from_slice(network);
    words
}

/// Hardware-MAC buffer: destination and EtherType only, no source MAC
fn hardware_mac_layout(
    dst: MacAddr,
    network: &[u32; NETWORK_WORDS],
    fcs: Option<u32>,
    variant: FrameVariant,
) -> Frame {
    let mut words = Vec::with_capacity(2 + NETWORK_WORDS + 1);
    words.extend_from_slice(&ethernet::destination_words(dst, ETHERTYPE_IPV4));
    words.extend_from_slice(network);
    words.extend(fcs);
    Frame::new(words, HARDWARE_MAC_BYTES, variant)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(NETWORK_WORDS, 11);
        assert_eq!(IP_TOTAL_LENGTH, 28);
        assert_eq!(SOFTWARE_MAC_BYTES, 60);
        assert_eq!(HARDWARE_MAC_BYTES, 52);
    }

    #[test]
    fn test_patch_checksum_clears_stale_value() {
        let mut region = [0x4500_001C, 0, 0x8001_FFFF, 0x0A00_0003, 0x0A00_0002];
        patch_checksum(&mut region, 2);
        assert_eq!(region[2], 0x8001_26DD);
        assert_eq!(ones_complement_sum(&region), 0xFFFF);
    }

    #[test]
    fn test_header_checksum_matches_checksum_engine() {
        let builder = FrameBuilder::new(
            MacAddr::zero(),
            MacAddr::zero(),
            Ipv4Addr::new(192, 168, 10, 22),
            Ipv4Addr::new(192, 168, 10, 1),
        )
        .seed(FrameSeed::new(0x1234, 0));
        let network = builder.network_words();

        let mut header = [0u32; ip::HEADER_WORDS];
        header.copy_from_slice(&network[..ip::HEADER_WORDS]);
        let stored = header[ip::CHECKSUM_WORD] & 0xFFFF;
        header[ip::CHECKSUM_WORD] &= 0xFFFF_0000;

        assert_eq!(stored, u32::from(ipv4_header_checksum(&header, 5)));
        assert_eq!(ones_complement_sum(&network[..ip::HEADER_WORDS]), 0xFFFF);
    }

    #[test]
    fn test_seed_fields_reach_the_frame() {
        let tx = FrameBuilder::new(
            MacAddr::zero(),
            MacAddr::zero(),
            Ipv4Addr::new(10, 0, 0, 3),
            Ipv4Addr::new(10, 0, 0, 2),
        )
        .seed(FrameSeed::new(0xB3FE, 0x001C_894D))
        .build(FrameVariant::SoftwareMacHardwareCrc);

        assert_eq!(tx.frame.ipv4_header()[1], 0xB3FE_0000);
        assert_eq!(tx.frame.ipv4_header()[2], 0x8001_72DE);
        assert_eq!(tx.frame.icmp_message(), &[0x0800_6E96, 0x001C_894D]);
    }

    #[test]
    fn test_random_seed_still_verifies() {
        let builder = FrameBuilder::new(
            MacAddr::new([0xD2, 0xD8, 0x28, 0xE8, 0xB0, 0x96]),
            MacAddr::new([0xC8, 0x3A, 0x35, 0xD2, 0x07, 0xB1]),
            Ipv4Addr::new(192, 168, 10, 22),
            Ipv4Addr::new(192, 168, 10, 1),
        );
        for _ in 0..32 {
            let seeded = builder.clone().seed(FrameSeed::random());
            for variant in FrameVariant::ALL {
                assert!(seeded.build(variant).verify().is_ok());
            }
        }
    }
}
