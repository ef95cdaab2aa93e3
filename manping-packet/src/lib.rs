//! Frame assembly for manual ICMP echo requests
//!
//! This crate builds a byte-exact Ethernet II / IPv4 / ICMP echo-request
//! frame as a sequence of 32-bit words, ready to be loaded into the
//! transmit buffer of a network peripheral:
//!
//! - [`checksum`] - ones-complement sums over header words
//! - [`crc`] - the frame check sequence in the peripheral's byte order
//! - [`ethernet`], [`ip`], [`icmp`] - header word layouts
//! - [`builder`] - software-MAC and hardware-MAC frame layouts
//! - [`frame`] - the built frame, its variant and the transmit command
//! - [`transmit`] - loading a frame over a register bus
//!
//! # Quick Start
//!
//! ```rust
//! use manping_core::{parse_ipv4, parse_mac, Register, SimulatedBus};
//! use manping_packet::{FrameBuilder, FrameSeed, FrameVariant, Transmitter};
//!
//! let tx = FrameBuilder::new(
//!     parse_mac("d2:d8:28:e8:b0:96").unwrap(),
//!     parse_mac("c8:3a:35:d2:07:b1").unwrap(),
//!     parse_ipv4("192.168.10.22").unwrap(),
//!     parse_ipv4("192.168.10.1").unwrap(),
//! )
//! .seed(FrameSeed::random())
//! .build(FrameVariant::SoftwareMacHardwareCrc);
//!
//! let mut transmitter = Transmitter::new(SimulatedBus::new());
//! transmitter.send(&tx).unwrap();
//! assert_eq!(transmitter.bus().tx_buffer().len(), 11);
//! ```

pub mod builder;
pub mod checksum;
pub mod crc;
pub mod ethernet;
pub mod frame;
pub mod icmp;
pub mod ip;
pub mod transmit;

mod tests;

// Re-export commonly used types for convenience
pub use builder::{build_frame, FrameBuilder, FrameSeed};
pub use checksum::{ipv4_header_checksum, ones_complement_sum};
pub use crc::compute_frame_crc32;
pub use ethernet::MacRegisters;
pub use frame::{Frame, FrameVariant, Transmission, TxCommand};
pub use transmit::Transmitter;
