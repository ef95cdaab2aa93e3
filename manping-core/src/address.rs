//! Textual address parsing
//!
//! MAC addresses are six colon-separated hexadecimal fields and IPv4
//! addresses four dot-separated decimal fields. Both are scanned left to
//! right one field at a time: the field's value is read from the leading
//! run of digits, then the next separator is located and the width of the
//! token in front of it is checked. The final field runs to the end of the
//! string and is held to the same width.
//!
//! The parser bounds token *width*, not value. A field is masked to its
//! low 8 bits, so `"999"` in an IPv4 address yields `231`. Non-digit
//! characters simply end the number (`"zz"` reads as `0`).

use crate::error::{AddressFault, AddressKind, Error, Result};
use crate::types::MacAddr;
use std::net::Ipv4Addr;

/// Widest token accepted for a MAC field
const MAC_FIELD_WIDTH: usize = 2;

/// Widest token accepted for an IPv4 field
const IPV4_FIELD_WIDTH: usize = 3;

/// Parse a colon-separated MAC address such as `00:0a:e6:f0:05:a3`
///
/// # Examples
///
/// ```
/// use manping_core::address::parse_mac;
///
/// let mac = parse_mac("AA:BB:CC:DD:EE:FF").unwrap();
/// assert_eq!(mac.octets(), [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
/// assert!(parse_mac("AA:BB:CC:DD:EE").is_err());
/// ```
pub fn parse_mac(input: &str) -> Result<MacAddr> {
    let bytes = scan_fields::<6>(input, ':', 16, MAC_FIELD_WIDTH, AddressKind::Mac)?;
    Ok(MacAddr(bytes))
}

/// Parse a dot-separated IPv4 address such as `192.168.10.1`
///
/// # Examples
///
/// ```
/// use manping_core::address::parse_ipv4;
/// use std::net::Ipv4Addr;
///
/// assert_eq!(parse_ipv4("10.0.0.2").unwrap(), Ipv4Addr::new(10, 0, 0, 2));
/// assert!(parse_ipv4("1234.0.0.2").is_err());
/// ```
pub fn parse_ipv4(input: &str) -> Result<Ipv4Addr> {
    let bytes = scan_fields::<4>(input, '.', 10, IPV4_FIELD_WIDTH, AddressKind::Ipv4)?;
    Ok(Ipv4Addr::from(bytes))
}

fn scan_fields<const N: usize>(
    input: &str,
    separator: char,
    radix: u32,
    max_width: usize,
    kind: AddressKind,
) -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    let mut rest = input;

    for (index, byte) in bytes.iter_mut().enumerate() {
        *byte = leading_value(rest, radix);

        let width = if index == N - 1 {
            rest.len()
        } else {
            rest.find(separator).ok_or_else(|| {
                Error::address(kind, input, index + 1, AddressFault::MissingSeparator)
            })?
        };
        if width > max_width {
            return Err(Error::address(
                kind,
                input,
                index + 1,
                AddressFault::FieldTooLong { len: width },
            ));
        }

        if index < N - 1 {
            rest = &rest[width + separator.len_utf8()..];
        }
    }

    Ok(bytes)
}

/// Value of the leading digit run, saturating on overflow, masked to a byte
///
/// Only bare digits count: leading whitespace, a sign or a `0x` prefix ends
/// the run at once, so `" 5"` reads as `0`.
fn leading_value(field: &str, radix: u32) -> u8 {
    let value = field
        .chars()
        .map_while(|c| c.to_digit(radix))
        .fold(0u64, |acc, digit| {
            acc.saturating_mul(u64::from(radix))
                .saturating_add(u64::from(digit))
        });

    (value & 0xFF) as u8
}
