//! manping: load a hand-built ICMP echo request into the network transmitter

use manping_cli::{run, Cli, USAGE};
use manping_core::SimulatedBus;
use std::process::ExitCode;
use tracing::{debug, Level};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    // No hardware transport is wired in; every access lands in memory
    let bus = SimulatedBus::new();

    match run(&cli, bus) {
        Ok((_, bus)) => {
            debug!(accesses = bus.log().len(), "register bus session complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            match err.offending_input() {
                Some(input) => {
                    println!("{USAGE}");
                    eprintln!("ERR: could not comprehend address, {input}");
                }
                None => eprintln!("ERR: {err}"),
            }
            ExitCode::FAILURE
        }
    }
}
