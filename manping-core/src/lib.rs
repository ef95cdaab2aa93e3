//! manping core library
//!
//! This crate provides the error type, address types and parsing, and the
//! register bus abstraction shared by the frame builder and the CLI.

pub mod address;
pub mod error;
pub mod interface;
pub mod types;

// Re-export commonly used types
pub use address::{parse_ipv4, parse_mac};
pub use error::{AddressFault, AddressKind, Error, Result};
pub use interface::{BusOp, Register, RegisterBus, SimulatedBus};
pub use types::MacAddr;
