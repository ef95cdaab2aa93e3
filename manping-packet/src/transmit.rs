//! Handing built frames to the peripheral
//!
//! The transmitter owns the bus handle. A frame is always complete before
//! the first write; each send is the MAC registers (hardware-MAC frames
//! only), one bulk load of the transmit buffer, then one command write.

use crate::frame::{Transmission, TxCommand};
use manping_core::{Register, RegisterBus, Result};
use tracing::{debug, info};

/// Drives the transmit side of the peripheral over a register bus
#[derive(Debug)]
pub struct Transmitter<B> {
    bus: B,
}

impl<B: RegisterBus> Transmitter<B> {
    pub fn new(bus: B) -> Self {
        Transmitter { bus }
    }

    /// Take the network interface out of reset if it is held there
    ///
    /// Returns whether the reset bit had to be cleared.
    pub fn release_reset(&mut self) -> Result<bool> {
        let status = self.bus.read_register(Register::NetTxCmd)?;
        if status & TxCommand::NETRESET == 0 {
            return Ok(false);
        }

        self.bus
            .write_register(Register::NetTxCmd, status & !TxCommand::NETRESET)?;
        info!(status = format_args!("{status:#010x}"), "released network reset");
        Ok(true)
    }

    /// Rearm the network scope with its trigger delay
    ///
    /// The delay is `2^n - 32`, with `n` read from bits 20..24 of the scope
    /// register.
    pub fn clear_scope(&mut self) -> Result<u32> {
        let scope = self.bus.read_register(Register::NetScope)?;
        let exponent = (scope >> 20) & 0x0F;
        let delay = (1u32 << exponent).wrapping_sub(32);
        self.bus.write_register(Register::NetScope, delay)?;
        debug!(exponent, delay = delay as i32, "cleared network scope");
        Ok(delay)
    }

    /// Load and start one frame
    pub fn send(&mut self, transmission: &Transmission) -> Result<()> {
        if let Some(regs) = transmission.mac_registers {
            self.bus.write_register(Register::NetMacHi, regs.hi)?;
            self.bus.write_register(Register::NetMacLo, regs.lo)?;
        }

        let words = transmission.frame.transmit_words();
        self.bus.write_bulk(Register::NetTxBuf, words)?;
        self.bus
            .write_register(Register::NetTxCmd, transmission.command.bits())?;

        info!(
            variant = %transmission.frame.variant(),
            words = words.len(),
            command = %transmission.command,
            "frame transmitted"
        );
        Ok(())
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Give the bus handle back
    pub fn into_inner(self) -> B {
        self.bus
    }
}
