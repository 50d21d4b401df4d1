//! Shipping records to a local collector
//!
//! Binds a UDP socket on loopback to play the collector, points the client at
//! it, and prints what arrives.
//!
//! Run with: cargo run --example udp_shipping

use rust_syslog_client::prelude::*;
use rust_syslog_client::{info, syslog_line, warn};
use std::net::UdpSocket;
use std::time::Duration;

fn drain(collector: &UdpSocket) {
    let mut buf = [0u8; 2048];
    while let Ok((n, _)) = collector.recv_from(&mut buf) {
        println!("   received: {}", String::from_utf8_lossy(&buf[..n]));
    }
}

fn main() -> Result<()> {
    println!("=== Rust Syslog Client - UDP Shipping Example ===\n");

    let collector = UdpSocket::bind("127.0.0.1:0")?;
    collector.set_read_timeout(Some(Duration::from_millis(200)))?;
    let port = collector.local_addr()?.port();

    let logger = SyslogLogger::builder()
        .app_name("demo")
        .facility(Facility::LOG_LOCAL0)
        .min_level(LogLevel::Debug)
        .fallback_sink(ConsoleSink::with_colors(true))
        .build()?;

    println!("1. Before configure, messages go to the console:");
    logger.log(LogLevel::Info, "boot", "   no collector yet");

    println!("\n2. Complete messages:");
    logger.configure("127.0.0.1", port)?;
    info!(logger, "net", "link up on port {}", port);
    warn!(logger, "disk", "usage at {}%", 91);
    logger.log(LogLevel::Verbose, "noise", "filtered by the minimum level");
    drain(&collector);

    println!("\n3. Fragments reassembled into lines:");
    syslog_line!(logger, LogLevel::Info, "shell", "copying ");
    syslog_line!(logger, LogLevel::Info, "shell", "{} files", 12);
    syslog_line!(logger, LogLevel::Info, "shell", "... done\r\nnext line");
    logger.flush_line();
    drain(&collector);

    let stats = logger.stats()?;
    println!("\n4. Delivery counters: sent={} failed={}", stats.sent, stats.failed);
    println!("   as JSON: {}", serde_json::to_string(&stats)?);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
