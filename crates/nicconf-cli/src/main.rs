//! nicconf: configure a NIC modem over its serial port
//!
//! Shows the region menu, then wakes the device, applies the chosen profile,
//! saves, restarts and prints whatever the device reports afterwards.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

use nicconf_core::menu::{menu_lines, MenuChoice};
use nicconf_core::prelude::*;
use nicconf_core::protocol::list_ports;

const BUILD_ID: &str = env!("NICCONF_BUILD_ID");

#[derive(Parser, Debug)]
#[command(name = "nicconf", version = BUILD_ID, about)]
struct Args {
    /// Serial port the modem is attached to
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate
    #[arg(short, long, default_value_t = nicconf_core::protocol::DEFAULT_BAUD_RATE)]
    baud: u32,

    /// Read timeout in milliseconds
    #[arg(long, default_value_t = nicconf_core::protocol::DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Length of one protocol time unit in milliseconds (at least 1)
    #[arg(
        long,
        default_value_t = SessionTiming::default().unit_ms,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    time_unit_ms: u64,

    /// Read and log device output after each wake
    #[arg(long)]
    drain_after_wake: bool,

    /// Menu option to run instead of prompting
    #[arg(short, long)]
    choice: Option<String>,

    /// Print the session outcome as JSON
    #[arg(long)]
    json: bool,

    /// List serial ports and exit
    #[arg(long)]
    list_ports: bool,
}

impl Args {
    fn connection_config(&self) -> ConnectionConfig {
        let defaults = ConnectionConfig::default();
        ConnectionConfig {
            port_name: self.port.clone().unwrap_or(defaults.port_name),
            baud_rate: self.baud,
            timeout_ms: self.timeout_ms,
            timing: SessionTiming {
                unit_ms: self.time_unit_ms,
            },
            drain_after_wake: self.drain_after_wake,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_ports() {
    let ports = list_ports();
    if ports.is_empty() {
        println!("No serial ports found");
    }
    for port in ports {
        match port.product {
            Some(product) => println!("{} ({})", port.name, product),
            None => println!("{}", port.name),
        }
    }
}

fn prompt_choice() -> Result<String> {
    println!("   NIC AUTOMATION v{}   ", nicconf_core::VERSION);
    for line in menu_lines() {
        println!("{line}");
    }
    print!("\nSelect the region to configure (1-4): ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .context("failed to read menu selection")?;
    Ok(input)
}

fn report(outcome: &SessionOutcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    if outcome.is_silent() {
        println!("\nThe device sent no response after verification.");
    } else {
        println!("\nDEVICE RESPONSE:\n{}", outcome.response);
    }
    println!("\nProcess finished! Check the responses above.");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging();

    if args.list_ports {
        print_ports();
        return Ok(());
    }

    let input = match &args.choice {
        Some(choice) => choice.clone(),
        None => prompt_choice()?,
    };

    let choice = match MenuChoice::parse(&input) {
        Ok(choice) => choice,
        Err(e) => {
            eprintln!("{e}");
            return Ok(());
        }
    };
    if choice == MenuChoice::Exit {
        println!("Exiting...");
        return Ok(());
    }

    let config = args.connection_config();
    tracing::debug!("connection config: {:?}", config);

    match run_choice(choice, &config, SerialTransport::open, SystemClock) {
        Ok(Some(outcome)) => report(&outcome, args.json),
        Ok(None) => Ok(()),
        Err(e @ ProtocolError::OpenFailed { .. }) => {
            eprintln!("{e}");
            eprintln!("Check that no other terminal program is holding the port.");
            Err(e).context("could not start configuration session")
        }
        Err(e) => {
            eprintln!("An error occurred during configuration: {e}");
            eprintln!("Serial connection closed.");
            Err(e).context("configuration session failed")
        }
    }
}
