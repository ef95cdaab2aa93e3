//! CLI argument parsing

use clap::Parser;
use manping_packet::{FrameSeed, FrameVariant};

/// One-line usage shown when an address cannot be understood
pub const USAGE: &str =
    "USAGE: manping EN:RX:xx:xx:xx:xx AR:TY:EN:TX:xx:xx de.st.ip.x ar.ty.ip.x";

#[derive(Parser, Debug)]
#[command(name = "manping")]
#[command(
    version,
    about = "Build an ICMP echo request by hand and load it into the network transmitter",
    long_about = None
)]
pub struct Cli {
    /// Destination MAC, source MAC, destination IP, source IP.
    /// Arguments with ':' are MACs and arguments with '.' are IPs; each
    /// group is optional and its destination comes first.
    #[arg(value_name = "ADDRESS")]
    pub addresses: Vec<String>,

    /// Let the hardware insert the source MAC
    #[arg(long)]
    pub hw_mac: bool,

    /// Compute the FCS in software instead of letting the hardware append it
    #[arg(long)]
    pub sw_crc: bool,

    /// IPv4 identification (random when omitted)
    #[arg(long, value_name = "ID", value_parser = parse_number::<u16>)]
    pub ident: Option<u16>,

    /// ICMP identifier and sequence as one 32-bit word (random when omitted)
    #[arg(long, value_name = "WORD", value_parser = parse_number::<u32>)]
    pub echo: Option<u32>,

    /// Verbose output (-v, -vv, -vvv for increasing verbosity)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Layout selected by the offload switches
    pub fn variant(&self) -> FrameVariant {
        FrameVariant::from_offload(self.hw_mac, !self.sw_crc)
    }

    /// Seed with any fixed fields applied over random ones
    pub fn seed(&self) -> FrameSeed {
        let random = FrameSeed::random();
        FrameSeed::new(
            self.ident.unwrap_or(random.identification),
            self.echo.unwrap_or(random.echo),
        )
    }
}

/// Decimal or `0x`-prefixed hexadecimal
fn parse_number<T>(text: &str) -> Result<T, String>
where
    T: TryFrom<u64>,
{
    let value = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => text.parse::<u64>(),
    }
    .map_err(|e| format!("'{text}' is not a number: {e}"))?;

    T::try_from(value).map_err(|_| format!("'{text}' is out of range"))
}
