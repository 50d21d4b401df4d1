//! UDP network stack backed by `std::net`.

use super::{DatagramSocket, NetworkStack};
use crate::core::lock::BoundedMutex;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::sync::Arc;

impl DatagramSocket for UdpSocket {
    fn send_to(&mut self, payload: &[u8], destination: SocketAddr) -> io::Result<usize> {
        UdpSocket::send_to(self, payload, destination)
    }
}

/// Sending syslog records via UDP datagrams.
///
/// # Example
///
/// ```
/// use rust_syslog_client::transport::{NetworkStack, UdpStack};
///
/// let stack = UdpStack::new();
/// let socket = stack.open("127.0.0.1:514".parse().unwrap());
/// assert!(socket.is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct UdpStack {
    core: Arc<BoundedMutex<()>>,
}

impl UdpStack {
    pub fn new() -> Self {
        Self::with_core_lock(Arc::new(BoundedMutex::new("network stack", ())))
    }

    /// Share a core lock with other consumers of the same stack.
    pub fn with_core_lock(core: Arc<BoundedMutex<()>>) -> Self {
        Self { core }
    }
}

impl Default for UdpStack {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkStack for UdpStack {
    fn core_lock(&self) -> &BoundedMutex<()> {
        &self.core
    }

    fn open(&self, destination: SocketAddr) -> io::Result<Box<dyn DatagramSocket>> {
        // Bind to any available port on the matching address family
        let local: SocketAddr = match destination {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        let socket = UdpSocket::bind(local)?;
        Ok(Box::new(socket))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_loopback_datagram() {
        let collector = UdpSocket::bind("127.0.0.1:0").unwrap();
        collector
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();
        let dest = collector.local_addr().unwrap();

        let stack = UdpStack::new();
        let mut socket = stack.open(dest).unwrap();
        assert_eq!(socket.send_to(b"<14>ping", dest).unwrap(), 8);

        let mut buf = [0u8; 64];
        let (n, _) = collector.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"<14>ping");
    }

    #[test]
    fn test_shared_core_lock() {
        let core = Arc::new(BoundedMutex::new("network stack", ()));
        let a = UdpStack::with_core_lock(Arc::clone(&core));
        let _held = core.acquire(Duration::from_millis(10)).unwrap();
        assert!(a.core_lock().acquire(Duration::from_millis(5)).is_err());
    }
}
