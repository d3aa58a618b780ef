//! NIC Wake Probe
//!
//! Checks the serial wiring to a NIC modem without changing its configuration:
//! wakes the device, asks for its firmware version and prints what comes back.
//! Nothing is saved and the device is not restarted.
//!
//! Usage:
//!   cargo run --example wake_probe -- [OPTIONS] [PORT]
//!
//! Options:
//!   --baud RATE       Baud rate (default: 9600)
//!   --unit MS         Length of one settle unit in ms (default: 1000)

use nicconf_core::prelude::*;
use nicconf_core::protocol::decode_response;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut config = ConnectionConfig::default();
    config.drain_after_wake = true;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--baud" | "-b" => {
                i += 1;
                if i < args.len() {
                    config.baud_rate = args[i].parse().unwrap_or(config.baud_rate);
                }
            }
            "--unit" | "-u" => {
                i += 1;
                if i < args.len() {
                    config.timing.unit_ms = args[i].parse().unwrap_or(config.timing.unit_ms);
                }
            }
            arg if !arg.starts_with('-') => {
                config.port_name = arg.to_string();
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
            }
        }
        i += 1;
    }

    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    println!("Port:      {}", config.port_name);
    println!("Baud rate: {}", config.baud_rate);
    println!();

    let transport = match SerialTransport::open(&config) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to open port: {}", e);
            eprintln!("Make sure the port exists and you have permission (dialout group)");
            return;
        }
    };

    let mut driver = Driver::new(transport, SystemClock, &config);
    let result = driver
        .wake()
        .and_then(|_| driver.send_line("$vers"))
        .and_then(|_| driver.read_buffered());
    driver.close();

    match result {
        Ok(bytes) if bytes.is_empty() => println!("No response from device"),
        Ok(bytes) => println!("Device replied:\n{}", decode_response(&bytes)),
        Err(e) => eprintln!("Probe failed: {}", e),
    }
}
