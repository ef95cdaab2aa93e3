//! Example: Building an echo-request frame in every layout
//!
//! Prints the word image, command word and FCS for each combination of
//! hardware MAC insertion and hardware CRC.

use manping_core::{parse_ipv4, parse_mac};
use manping_packet::{FrameBuilder, FrameSeed, FrameVariant};

fn main() {
    let builder = FrameBuilder::new(
        parse_mac("00:12:34:56:78:90").expect("valid source MAC"),
        parse_mac("00:0a:e6:f0:05:a3").expect("valid destination MAC"),
        parse_ipv4("10.0.0.3").expect("valid source IP"),
        parse_ipv4("10.0.0.2").expect("valid destination IP"),
    )
    .seed(FrameSeed::new(0xB3FE, 0x001C_894D));

    for variant in FrameVariant::ALL {
        let tx = builder.build(variant);

        println!("{variant}: {} of {} words", tx.frame.word_count(), tx.frame.words().len());
        print!("{}", tx.frame);
        println!("\tcommand: {}", tx.command);
        if let Some(fcs) = tx.frame.fcs() {
            println!("\tFCS:     0x{fcs:08x}");
        }
        if let Some(regs) = tx.mac_registers {
            println!("\tMAC:     0x{:04x}:0x{:08x}", regs.hi, regs.lo);
        }
        println!();
    }
}
