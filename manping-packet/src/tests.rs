//! End-to-end frame scenarios
//!
//! Pinned word images for every layout variant, built from the same
//! address pair so a change to any layout or checksum rule shows up as a
//! word-level diff.

#[cfg(test)]
mod scenario_tests {
    use crate::builder::{build_frame, FrameSeed};
    use crate::crc::compute_frame_crc32;
    use crate::frame::{FrameVariant, TxCommand};
    use crate::transmit::Transmitter;
    use manping_core::{parse_ipv4, parse_mac, Register, SimulatedBus};

    const FCS: u32 = 0x7236_F0DA;

    const SOFTWARE_MAC_IMAGE: [u32; 15] = [
        0x000A_E6F0,
        0x05A3_0012,
        0x3456_7890,
        0x0800_0800,
        0x4500_001C,
        0x0000_0000,
        0x8001_26DD,
        0x0A00_0003,
        0x0A00_0002,
        0x0800_F7FF,
        0x0000_0000,
        0x0000_0000,
        0x0000_0000,
        0x0000_0000,
        0x0000_0000,
    ];

    fn build(variant: FrameVariant) -> crate::frame::Transmission {
        build_frame(
            variant,
            parse_mac("00:12:34:56:78:90").unwrap(),
            parse_mac("00:0a:e6:f0:05:a3").unwrap(),
            parse_ipv4("10.0.0.3").unwrap(),
            parse_ipv4("10.0.0.2").unwrap(),
            FrameSeed::default(),
        )
    }

    #[test]
    fn test_software_mac_software_crc() {
        let tx = build(FrameVariant::SoftwareMacSoftwareCrc);
        let words = tx.frame.words();

        assert_eq!(words.len(), 16);
        assert_eq!(words[3], 0x0800_0800);
        assert_eq!(&words[..15], &SOFTWARE_MAC_IMAGE);
        assert_eq!(words[15], FCS);
        assert_eq!(tx.frame.fcs(), Some(FCS));
        assert_eq!(tx.frame.byte_length(), 60);
        assert_eq!(tx.frame.word_count(), 12);
        assert_eq!(tx.command.bits(), 0x1_C030);
        assert!(tx.mac_registers.is_none());
    }

    #[test]
    fn test_software_mac_hardware_crc() {
        let tx = build(FrameVariant::SoftwareMacHardwareCrc);

        assert_eq!(tx.frame.words(), &SOFTWARE_MAC_IMAGE);
        assert_eq!(tx.frame.fcs(), None);
        assert_eq!(tx.frame.word_count(), 11);
        assert_eq!(tx.command.bits(), 0x1_402C);
        assert!(!tx.command.is_set(TxCommand::NOHWCRC));
    }

    #[test]
    fn test_hardware_mac_software_crc() {
        let tx = build(FrameVariant::HardwareMacSoftwareCrc);
        let words = tx.frame.words();

        assert_eq!(words.len(), 14);
        assert_eq!(&words[..2], &[0x000A_E6F0, 0x05A3_0800]);
        assert_eq!(&words[2..13], &SOFTWARE_MAC_IMAGE[4..]);
        // Same FCS as the software-MAC frame: the wire image is identical
        assert_eq!(words[13], FCS);
        assert_eq!(tx.frame.byte_length(), 52);
        assert_eq!(tx.frame.word_count(), 14);
        assert_eq!(tx.command.bits(), 0xC038);

        let regs = tx.mac_registers.unwrap();
        assert_eq!((regs.hi, regs.lo), (0x0012, 0x3456_7890));
    }

    #[test]
    fn test_hardware_mac_hardware_crc() {
        let tx = build(FrameVariant::HardwareMacHardwareCrc);

        assert_eq!(tx.frame.words().len(), 13);
        assert_eq!(tx.frame.fcs(), None);
        assert_eq!(tx.frame.word_count(), 9);
        assert_eq!(tx.command.bits(), 0x4024);
        assert!(tx.mac_registers.is_some());
    }

    #[test]
    fn test_word_counts_are_distinct() {
        let mut counts: Vec<usize> = FrameVariant::ALL
            .iter()
            .map(|&v| build(v).frame.word_count())
            .collect();
        counts.sort_unstable();
        assert_eq!(counts, vec![9, 11, 12, 14]);
    }

    #[test]
    fn test_every_variant_passes_self_check() {
        for variant in FrameVariant::ALL {
            let tx = build(variant);
            assert!(tx.verify().is_ok(), "{variant}");
            assert_eq!(tx.command.word_count(), tx.frame.word_count(), "{variant}");
        }
    }

    #[test]
    fn test_corrupted_fcs_fails_self_check() {
        let mut tx = build(FrameVariant::SoftwareMacSoftwareCrc);
        let mut words = tx.frame.words().to_vec();
        words[15] ^= 1;
        tx.frame = crate::frame::Frame::new(words, 60, FrameVariant::SoftwareMacSoftwareCrc);
        assert!(tx.verify().is_err());
    }

    #[test]
    fn test_fcs_matches_direct_computation() {
        let tx = build(FrameVariant::SoftwareMacSoftwareCrc);
        let words = tx.frame.words();
        assert_eq!(compute_frame_crc32(&words[..15], 60), words[15]);
    }

    #[test]
    fn test_build_and_transmit() {
        let tx = build(FrameVariant::HardwareMacHardwareCrc);
        let mut transmitter = Transmitter::new(SimulatedBus::new());
        transmitter.send(&tx).unwrap();

        let bus = transmitter.into_inner();
        assert_eq!(bus.tx_buffer(), &tx.frame.words()[..9]);
        assert_eq!(bus.peek(Register::NetTxCmd), 0x4024);
        assert_eq!(bus.peek(Register::NetMacLo), 0x3456_7890);
    }
}
