//! ICMP echo request header words

/// ICMP echo request type
pub const ECHO_REQUEST: u8 = 8;

/// ICMP header length in 32-bit words
pub const HEADER_WORDS: usize = 2;

/// Index of the word holding the ICMP checksum (low half)
pub const CHECKSUM_WORD: usize = 0;

/// Echo request with no data
///
/// `rest` is the identifier in the high half and the sequence number in
/// the low half.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoRequest {
    pub rest: u32,
}

impl EchoRequest {
    pub fn new(rest: u32) -> Self {
        EchoRequest { rest }
    }

    pub fn identifier(&self) -> u16 {
        (self.rest >> 16) as u16
    }

    pub fn sequence(&self) -> u16 {
        self.rest as u16
    }

    /// Header words with a zero checksum field
    pub fn to_words(&self) -> [u32; HEADER_WORDS] {
        [u32::from(ECHO_REQUEST) << 24, self.rest]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_request_words() {
        let echo = EchoRequest::new(0x001C_894D);
        assert_eq!(echo.to_words(), [0x0800_0000, 0x001C_894D]);
        assert_eq!(echo.identifier(), 0x001C);
        assert_eq!(echo.sequence(), 0x894D);
    }
}
