//! CLI interface for manping
//!
//! This crate provides the command-line interface: argument parsing, the
//! positional address convention, and the build-then-transmit sequence.

pub mod args;

pub use args::{Cli, USAGE};

use manping_core::{parse_ipv4, parse_mac, MacAddr, RegisterBus, Result};
use manping_packet::{FrameBuilder, Transmission, Transmitter};
use std::net::Ipv4Addr;
use tracing::{debug, info, warn};

/// The four addresses an echo request is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    pub src_mac: MacAddr,
    pub dst_mac: MacAddr,
    pub src_ip: Ipv4Addr,
    pub dst_ip: Ipv4Addr,
}

impl Default for Endpoints {
    /// The bench setup: a fixed test host and a made-up source on its subnet
    fn default() -> Self {
        Endpoints {
            src_mac: MacAddr::new([0xD2, 0xD8, 0x28, 0xE8, 0xB0, 0x96]),
            dst_mac: MacAddr::new([0xC8, 0x3A, 0x35, 0xD2, 0x07, 0xB1]),
            src_ip: Ipv4Addr::new(192, 168, 10, 22),
            dst_ip: Ipv4Addr::new(192, 168, 10, 1),
        }
    }
}

impl Endpoints {
    /// Apply positional addresses over the defaults
    ///
    /// Leading arguments containing ':' are the destination then source
    /// MAC; the following arguments containing '.' are the destination then
    /// source IP. Either group may be absent or stop after one entry.
    pub fn from_args(addresses: &[String]) -> Result<Self> {
        let mut endpoints = Endpoints::default();
        let mut args = addresses.iter().peekable();

        if let Some(text) = args.next_if(|a| a.contains(':')) {
            endpoints.dst_mac = parse_mac(text)?;
            if let Some(text) = args.next_if(|a| a.contains(':')) {
                endpoints.src_mac = parse_mac(text)?;
            }
        }
        if let Some(text) = args.next_if(|a| a.contains('.')) {
            endpoints.dst_ip = parse_ipv4(text)?;
            if let Some(text) = args.next_if(|a| a.contains('.')) {
                endpoints.src_ip = parse_ipv4(text)?;
            }
        }

        for extra in args {
            warn!(argument = %extra, "ignoring unrecognized argument");
        }

        Ok(endpoints)
    }
}

/// Bring the interface up, build the frame and transmit it on `bus`
pub fn run<B: RegisterBus>(cli: &Cli, bus: B) -> Result<(Transmission, B)> {
    let endpoints = Endpoints::from_args(&cli.addresses)?;

    let mut transmitter = Transmitter::new(bus);
    transmitter.release_reset()?;
    transmitter.clear_scope()?;

    println!("Building packet");
    println!("From {:>15} [{}]", endpoints.src_ip, endpoints.src_mac);
    println!("To   {:>15} [{}]", endpoints.dst_ip, endpoints.dst_mac);

    let variant = cli.variant();
    let transmission = FrameBuilder::new(
        endpoints.src_mac,
        endpoints.dst_mac,
        endpoints.src_ip,
        endpoints.dst_ip,
    )
    .seed(cli.seed())
    .build(variant);
    info!(variant = %variant, "frame built");

    println!("Packet:");
    print!("{}", transmission.frame);
    if let Some(fcs) = transmission.frame.fcs() {
        println!("\tCRC: 0x{fcs:08x}");
    }

    let wire = transmission.frame.to_bytes();
    debug!(bytes = wire.len(), image = %hex_dump(&wire), "transmit buffer");

    transmitter.send(&transmission)?;
    Ok((transmission, transmitter.into_inner()))
}

/// Bytes as contiguous lowercase hex
fn hex_dump(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use manping_core::{Error, Register, SimulatedBus};
    use manping_packet::TxCommand;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_arguments_keeps_defaults() {
        assert_eq!(Endpoints::from_args(&[]).unwrap(), Endpoints::default());
    }

    #[test]
    fn test_full_address_set() {
        let endpoints = Endpoints::from_args(&strings(&[
            "00:0a:e6:f0:05:a3",
            "00:12:34:56:78:90",
            "10.0.0.2",
            "10.0.0.3",
        ]))
        .unwrap();

        assert_eq!(endpoints.dst_mac.octets(), [0x00, 0x0A, 0xE6, 0xF0, 0x05, 0xA3]);
        assert_eq!(endpoints.src_mac.octets(), [0x00, 0x12, 0x34, 0x56, 0x78, 0x90]);
        assert_eq!(endpoints.dst_ip, Ipv4Addr::new(10, 0, 0, 2));
        assert_eq!(endpoints.src_ip, Ipv4Addr::new(10, 0, 0, 3));
    }

    #[test]
    fn test_ip_only() {
        let endpoints = Endpoints::from_args(&strings(&["10.0.0.2"])).unwrap();
        assert_eq!(endpoints.dst_ip, Ipv4Addr::new(10, 0, 0, 2));
        assert_eq!(endpoints.src_ip, Endpoints::default().src_ip);
        assert_eq!(endpoints.dst_mac, Endpoints::default().dst_mac);
    }

    #[test]
    fn test_bad_source_mac_is_reported() {
        let err = Endpoints::from_args(&strings(&["00:0a:e6:f0:05:a3", "00:123:4:5:6:7"]))
            .unwrap_err();
        assert!(matches!(err, Error::AddressFormat { field: 2, .. }));
        assert_eq!(err.offending_input(), Some("00:123:4:5:6:7"));
    }

    #[test]
    fn test_bad_ip_is_reported() {
        let err = Endpoints::from_args(&strings(&["10.0.0"])).unwrap_err();
        assert_eq!(err.offending_input(), Some("10.0.0"));
    }

    #[test]
    fn test_run_releases_reset_and_transmits() {
        let cli = Cli::try_parse_from(["manping", "--sw-crc", "--ident", "0", "--echo", "0"])
            .unwrap();
        let bus = SimulatedBus::new()
            .with_register(Register::NetTxCmd, TxCommand::NETRESET)
            .with_register(Register::NetScope, 0x0050_0000);

        let (tx, bus) = run(&cli, bus).unwrap();

        assert_eq!(bus.tx_buffer().len(), 12);
        assert_eq!(bus.tx_buffer(), tx.frame.transmit_words());
        assert_eq!(bus.peek(Register::NetTxCmd), tx.command.bits());
        assert!(!TxCommand(bus.peek(Register::NetTxCmd)).is_set(TxCommand::NETRESET));
        assert_eq!(bus.peek(Register::NetScope), 0);
        assert!(tx.verify().is_ok());
    }

    #[test]
    fn test_hex_dump_of_transmit_buffer() {
        assert_eq!(hex_dump(&[0x00, 0x0A, 0xE6, 0xFF]), "000ae6ff");

        let cli = Cli::try_parse_from(["manping", "--ident", "0", "--echo", "0"]).unwrap();
        let (tx, _) = run(&cli, SimulatedBus::new()).unwrap();
        let dump = hex_dump(&tx.frame.to_bytes());
        assert_eq!(dump.len(), tx.frame.word_count() * 8);
        assert!(dump.starts_with("c83a35d207b1d2d8"));
    }

    #[test]
    fn test_run_rejects_bad_address_before_bus_access() {
        let cli = Cli::try_parse_from(["manping", "zz:zz"]).unwrap();
        let mut bus = SimulatedBus::new();
        assert!(run(&cli, &mut bus).is_err());
        assert!(bus.log().is_empty());
    }
}
