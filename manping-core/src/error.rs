//! Error types for manping

use std::fmt;
use thiserror::Error;

/// Result type alias for manping operations
pub type Result<T> = std::result::Result<T, Error>;

/// Which kind of address a parse failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// Colon-separated hexadecimal Ethernet address
    Mac,
    /// Dot-separated decimal IPv4 address
    Ipv4,
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressKind::Mac => write!(f, "MAC"),
            AddressKind::Ipv4 => write!(f, "IPv4"),
        }
    }
}

/// What was wrong with a single address field
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFault {
    /// The separator that should follow this field is absent
    #[error("is not followed by a separator")]
    MissingSeparator,

    /// The field token is wider than the address format allows
    #[error("is {len} characters wide")]
    FieldTooLong { len: usize },
}

/// Main error type for manping
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed MAC or IPv4 address text
    #[error("could not comprehend {kind} address '{input}': field {field} {fault}")]
    AddressFormat {
        kind: AddressKind,
        input: String,
        /// 1-based index of the failing field
        field: usize,
        fault: AddressFault,
    },

    /// Register bus transport failure
    #[error("Register bus error: {0}")]
    Bus(String),

    /// A built frame failed its own checksum or FCS self-check
    #[error("Frame consistency check failed: {0}")]
    Consistency(String),
}

impl Error {
    /// Create an address format error
    pub fn address<S: Into<String>>(
        kind: AddressKind,
        input: S,
        field: usize,
        fault: AddressFault,
    ) -> Self {
        Error::AddressFormat {
            kind,
            input: input.into(),
            field,
            fault,
        }
    }

    /// Create a bus error with a custom message
    pub fn bus<S: Into<String>>(msg: S) -> Self {
        Error::Bus(msg.into())
    }

    /// Create a consistency error with a custom message
    pub fn consistency<S: Into<String>>(msg: S) -> Self {
        Error::Consistency(msg.into())
    }

    /// The offending input text, if this is an address error
    pub fn offending_input(&self) -> Option<&str> {
        match self {
            Error::AddressFormat { input, .. } => Some(input),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_error_message() {
        let err = Error::address(
            AddressKind::Mac,
            "00:123:00:00:00:00",
            2,
            AddressFault::FieldTooLong { len: 3 },
        );
        assert_eq!(
            err.to_string(),
            "could not comprehend MAC address '00:123:00:00:00:00': field 2 is 3 characters wide"
        );
        assert_eq!(err.offending_input(), Some("00:123:00:00:00:00"));
    }

    #[test]
    fn test_bus_error_has_no_input() {
        let err = Error::bus("link down");
        assert_eq!(err.to_string(), "Register bus error: link down");
        assert!(err.offending_input().is_none());
    }
}
