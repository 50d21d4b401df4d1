//! The datagram transport seam
//!
//! A [`NetworkStack`] hands out [`DatagramSocket`] handles and owns the core
//! lock that serializes access to its internal structures. That lock is not
//! the logger's: other consumers of the same stack take it too, so it is held
//! only across open, send and release.
//!
//! Sends are fire-and-forget. Each failure is reported once; nothing here
//! retries.

pub mod console;
pub mod udp;

pub use console::{ConsoleSink, FallbackSink};
pub use udp::UdpStack;

use crate::core::error::{LoggerError, Result};
use crate::core::lock::BoundedMutex;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;

/// An open, bound, connectionless socket. Dropping it releases the handle.
pub trait DatagramSocket: Send {
    fn send_to(&mut self, payload: &[u8], destination: SocketAddr) -> io::Result<usize>;
}

/// Operations every network stack must support.
pub trait NetworkStack: Send + Sync {
    /// Lock guarding the stack's internal structures
    fn core_lock(&self) -> &BoundedMutex<()>;

    /// Create a socket bound to an ephemeral local port, suitable for
    /// reaching `destination`.
    fn open(&self, destination: SocketAddr) -> io::Result<Box<dyn DatagramSocket>>;
}

/// Open a new handle under the core lock.
pub fn open_handle(
    stack: &dyn NetworkStack,
    destination: SocketAddr,
    timeout: Duration,
) -> Result<Box<dyn DatagramSocket>> {
    let _core = stack.core_lock().acquire(timeout)?;
    stack
        .open(destination)
        .map_err(|err| LoggerError::transport_alloc(format!("cannot bind socket for {}", destination), err))
}

/// Release `handle` under the core lock.
///
/// If the lock can't be had in time the handle is handed back so the caller
/// keeps exactly one owner for it.
pub fn release_handle(
    stack: &dyn NetworkStack,
    handle: Box<dyn DatagramSocket>,
    timeout: Duration,
) -> std::result::Result<(), (Box<dyn DatagramSocket>, LoggerError)> {
    match stack.core_lock().acquire(timeout) {
        Ok(_core) => {
            drop(handle);
            Ok(())
        }
        Err(err) => Err((handle, err)),
    }
}

/// Send one rendered record as a single datagram.
///
/// Under the core lock: allocate a buffer of exactly the record's length,
/// copy the record in, send, free.
pub fn send_record(
    stack: &dyn NetworkStack,
    socket: &mut dyn DatagramSocket,
    record: &str,
    destination: SocketAddr,
    timeout: Duration,
) -> Result<()> {
    let _core = stack.core_lock().acquire(timeout)?;

    let mut payload: Vec<u8> = Vec::new();
    payload
        .try_reserve_exact(record.len())
        .map_err(|err| LoggerError::send(format!("cannot allocate {} bytes: {}", record.len(), err)))?;
    payload.extend_from_slice(record.as_bytes());
    if payload.len() != record.len() {
        return Err(LoggerError::send("short copy into transport buffer"));
    }

    let written = socket
        .send_to(&payload, destination)
        .map_err(LoggerError::SendIo)?;
    if written != payload.len() {
        return Err(LoggerError::send(format!(
            "datagram truncated: {} of {} bytes sent",
            written,
            payload.len()
        )));
    }
    Ok(())
}
