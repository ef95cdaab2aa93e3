//! Built frames and the transmit command that accompanies them

use crate::checksum::{header_word_count, verify_icmp, verify_ipv4_header};
use crate::crc::compute_frame_crc32;
use crate::ethernet::{ethertype_word, MacRegisters};
use crate::{icmp, ip};
use bytes::{BufMut, BytesMut};
use manping_core::{Error, Result};
use std::fmt;

/// Which parts of the frame the transmit hardware fills in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameVariant {
    /// Both MAC addresses and the FCS are written by software
    SoftwareMacSoftwareCrc,
    /// MAC addresses by software, FCS appended by hardware
    SoftwareMacHardwareCrc,
    /// Source MAC inserted by hardware, FCS written by software
    HardwareMacSoftwareCrc,
    /// Source MAC and FCS both supplied by hardware
    HardwareMacHardwareCrc,
}

impl FrameVariant {
    /// Every variant
    pub const ALL: [FrameVariant; 4] = [
        FrameVariant::SoftwareMacSoftwareCrc,
        FrameVariant::SoftwareMacHardwareCrc,
        FrameVariant::HardwareMacSoftwareCrc,
        FrameVariant::HardwareMacHardwareCrc,
    ];

    /// Select a variant from the two offload switches
    pub fn from_offload(hardware_mac: bool, hardware_crc: bool) -> Self {
        match (hardware_mac, hardware_crc) {
            (false, false) => FrameVariant::SoftwareMacSoftwareCrc,
            (false, true) => FrameVariant::SoftwareMacHardwareCrc,
            (true, false) => FrameVariant::HardwareMacSoftwareCrc,
            (true, true) => FrameVariant::HardwareMacHardwareCrc,
        }
    }

    /// Source MAC is programmed into the MAC registers instead of the buffer
    pub fn hardware_mac(self) -> bool {
        matches!(
            self,
            FrameVariant::HardwareMacSoftwareCrc | FrameVariant::HardwareMacHardwareCrc
        )
    }

    /// FCS is appended by the transmit hardware
    pub fn hardware_crc(self) -> bool {
        matches!(
            self,
            FrameVariant::SoftwareMacHardwareCrc | FrameVariant::HardwareMacHardwareCrc
        )
    }

    /// Number of words loaded into the transmit buffer
    pub fn word_count(self) -> usize {
        match self {
            FrameVariant::SoftwareMacSoftwareCrc => 12,
            FrameVariant::SoftwareMacHardwareCrc => 11,
            FrameVariant::HardwareMacSoftwareCrc => 14,
            FrameVariant::HardwareMacHardwareCrc => 9,
        }
    }

    /// Word offset of the IPv4 header in this variant's layout
    pub fn network_offset(self) -> usize {
        if self.hardware_mac() {
            2
        } else {
            4
        }
    }
}

impl fmt::Display for FrameVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mac = if self.hardware_mac() { "hw" } else { "sw" };
        let crc = if self.hardware_crc() { "hw" } else { "sw" };
        write!(f, "{mac}-mac/{crc}-crc")
    }
}

/// Value written to the transmit command register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxCommand(pub u32);

impl TxCommand {
    /// Start transmission
    pub const TXGO: u32 = 0x0_4000;
    /// Hardware must not append its own FCS
    pub const NOHWCRC: u32 = 0x0_8000;
    /// Hardware must not insert the source MAC
    pub const NOHWMAC: u32 = 0x1_0000;
    /// Network interface held in reset
    pub const NETRESET: u32 = 0x2_0000;

    const LENGTH_SHIFT: u32 = 2;
    const LENGTH_MASK: u32 = 0xFFF;

    /// Command that transmits `variant` with `word_count` buffer words
    pub fn for_variant(variant: FrameVariant, word_count: usize) -> Self {
        let length = (word_count as u32 & Self::LENGTH_MASK) << Self::LENGTH_SHIFT;
        let mut bits = Self::TXGO | length;
        if !variant.hardware_mac() {
            bits |= Self::NOHWMAC;
        }
        if !variant.hardware_crc() {
            bits |= Self::NOHWCRC;
        }
        TxCommand(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn is_set(self, flag: u32) -> bool {
        self.0 & flag == flag
    }

    /// Word-count field
    pub fn word_count(self) -> usize {
        ((self.0 >> Self::LENGTH_SHIFT) & Self::LENGTH_MASK) as usize
    }
}

impl fmt::Display for TxCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Frame laid out as big-endian 32-bit words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    words: Vec<u32>,
    byte_length: usize,
    variant: FrameVariant,
}

impl Frame {
    pub(crate) fn new(words: Vec<u32>, byte_length: usize, variant: FrameVariant) -> Self {
        Frame {
            words,
            byte_length,
            variant,
        }
    }

    /// Full layout, including any FCS word
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Bytes covered by the FCS, excluding the FCS itself
    pub fn byte_length(&self) -> usize {
        self.byte_length
    }

    pub fn variant(&self) -> FrameVariant {
        self.variant
    }

    /// Number of words loaded into the transmit buffer
    pub fn word_count(&self) -> usize {
        self.variant.word_count().min(self.words.len())
    }

    /// The words handed to the transmit buffer
    pub fn transmit_words(&self) -> &[u32] {
        &self.words[..self.word_count()]
    }

    /// Software-computed FCS, if this variant carries one
    pub fn fcs(&self) -> Option<u32> {
        if self.variant.hardware_crc() {
            None
        } else {
            self.words.last().copied()
        }
    }

    /// IPv4 header words
    pub fn ipv4_header(&self) -> &[u32] {
        let start = self.variant.network_offset();
        &self.words[start..start + ip::HEADER_WORDS]
    }

    /// ICMP message words
    pub fn icmp_message(&self) -> &[u32] {
        let start = self.variant.network_offset() + ip::HEADER_WORDS;
        &self.words[start..start + icmp::HEADER_WORDS]
    }

    /// Transmitted words as a byte stream
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = BytesMut::with_capacity(self.word_count() * 4);
        for &word in self.transmit_words() {
            buffer.put_u32(word);
        }
        buffer.to_vec()
    }

    /// Self-check of the IPv4 and ICMP checksums
    ///
    /// Both must fold to `0xFFFF` with their checksum fields in place. A
    /// failure means the layout code is wrong, not the input.
    pub fn verify_checksums(&self) -> Result<()> {
        let header = self.ipv4_header();
        if !verify_ipv4_header(header, header_word_count(header[0])) {
            return Err(Error::consistency(format!(
                "IPv4 header checksum does not fold to 0xffff ({})",
                self.variant
            )));
        }
        if !verify_icmp(self.icmp_message()) {
            return Err(Error::consistency(format!(
                "ICMP checksum does not fold to 0xffff ({})",
                self.variant
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, word) in self.words.iter().enumerate() {
            let marker = if index < self.word_count() { ' ' } else { '-' };
            writeln!(f, "\t{marker}{index:2}: 0x{word:08x}")?;
        }
        Ok(())
    }
}

/// Everything needed to transmit one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    pub frame: Frame,
    pub command: TxCommand,
    /// Source MAC registers, present when the hardware inserts the MAC
    pub mac_registers: Option<MacRegisters>,
}

impl Transmission {
    /// Debug verification hook
    ///
    /// Checks both checksums and recomputes the FCS over the wire image.
    /// For hardware-MAC frames the wire image is rebuilt from the MAC
    /// registers, since the source MAC is not in the buffer.
    pub fn verify(&self) -> Result<()> {
        self.frame.verify_checksums()?;

        if self.command.word_count() != self.frame.word_count() {
            return Err(Error::consistency(format!(
                "command word count {} does not match {} buffer words",
                self.command.word_count(),
                self.frame.word_count()
            )));
        }

        let Some(fcs) = self.frame.fcs() else {
            return Ok(());
        };

        let words = self.frame.words();
        let body = &words[..words.len() - 1];
        let expected = match (self.frame.variant.hardware_mac(), self.mac_registers) {
            (false, _) => compute_frame_crc32(body, self.frame.byte_length),
            (true, Some(regs)) => {
                let mut image = vec![
                    body[0],
                    (body[1] & 0xFFFF_0000) | (regs.hi & 0xFFFF),
                    regs.lo,
                    ethertype_word(body[1] as u16),
                ];
                image.extend_from_slice(&body[self.frame.variant.network_offset()..]);
                compute_frame_crc32(&image, image.len() * 4)
            }
            (true, None) => {
                return Err(Error::consistency(
                    "hardware-MAC frame without MAC registers",
                ))
            }
        };

        if fcs != expected {
            return Err(Error::consistency(format!(
                "FCS 0x{fcs:08x} does not match recomputed 0x{expected:08x}"
            )));
        }
        Ok(())
    }
}
