//! Register bus to the network peripheral
//!
//! The peripheral is driven entirely through 32-bit registers: a transmit
//! buffer loaded with one bulk write, a transmit command register, the
//! source-MAC configuration pair, and the network scope control.

use crate::Result;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Peripheral registers used by manping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    /// Transmit command and status
    NetTxCmd,
    /// Transmit buffer, loaded from word offset 0
    NetTxBuf,
    /// High 16 bits of the hardware source MAC
    NetMacHi,
    /// Low 32 bits of the hardware source MAC
    NetMacLo,
    /// Network scope trigger and delay control
    NetScope,
}

impl Register {
    /// Register name as it appears in the peripheral documentation
    pub fn name(self) -> &'static str {
        match self {
            Register::NetTxCmd => "R_NET_TXCMD",
            Register::NetTxBuf => "R_NET_TXBUF",
            Register::NetMacHi => "R_NET_MACHI",
            Register::NetMacLo => "R_NET_MACLO",
            Register::NetScope => "R_NETSCOPE",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Access to the peripheral's register file
pub trait RegisterBus {
    /// Write `words` to consecutive locations starting at `register`
    fn write_bulk(&mut self, register: Register, words: &[u32]) -> Result<()>;

    /// Write a single register
    fn write_register(&mut self, register: Register, value: u32) -> Result<()>;

    /// Read a single register
    fn read_register(&mut self, register: Register) -> Result<u32>;
}

impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    fn write_bulk(&mut self, register: Register, words: &[u32]) -> Result<()> {
        (**self).write_bulk(register, words)
    }

    fn write_register(&mut self, register: Register, value: u32) -> Result<()> {
        (**self).write_register(register, value)
    }

    fn read_register(&mut self, register: Register) -> Result<u32> {
        (**self).read_register(register)
    }
}

/// One recorded bus access
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusOp {
    Bulk { register: Register, words: Vec<u32> },
    Write { register: Register, value: u32 },
    Read { register: Register, value: u32 },
}

/// In-memory register file that records every access
///
/// Used for dry runs and tests. Registers read as zero until written or
/// preset with [`SimulatedBus::with_register`].
#[derive(Debug, Default)]
pub struct SimulatedBus {
    registers: HashMap<Register, u32>,
    tx_buffer: Vec<u32>,
    log: Vec<BusOp>,
}

impl SimulatedBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset a register value
    pub fn with_register(mut self, register: Register, value: u32) -> Self {
        self.registers.insert(register, value);
        self
    }

    /// Current value of a register without recording a read
    pub fn peek(&self, register: Register) -> u32 {
        self.registers.get(&register).copied().unwrap_or(0)
    }

    /// Contents of the transmit buffer
    pub fn tx_buffer(&self) -> &[u32] {
        &self.tx_buffer
    }

    /// Every access in the order it happened
    pub fn log(&self) -> &[BusOp] {
        &self.log
    }
}

impl RegisterBus for SimulatedBus {
    fn write_bulk(&mut self, register: Register, words: &[u32]) -> Result<()> {
        trace!(register = %register, words = words.len(), "bulk write");
        if register == Register::NetTxBuf {
            self.tx_buffer.clear();
            self.tx_buffer.extend_from_slice(words);
        } else if let Some(&last) = words.last() {
            self.registers.insert(register, last);
        }
        self.log.push(BusOp::Bulk {
            register,
            words: words.to_vec(),
        });
        Ok(())
    }

    fn write_register(&mut self, register: Register, value: u32) -> Result<()> {
        trace!(register = %register, value = format_args!("{value:#010x}"), "register write");
        self.registers.insert(register, value);
        self.log.push(BusOp::Write { register, value });
        Ok(())
    }

    fn read_register(&mut self, register: Register) -> Result<u32> {
        let value = self.peek(register);
        trace!(register = %register, value = format_args!("{value:#010x}"), "register read");
        self.log.push(BusOp::Read { register, value });
        Ok(value)
    }
}
