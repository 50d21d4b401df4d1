//! The syslog client context
//!
//! [`SyslogLogger`] owns everything the client needs: configuration, the
//! transport handle, delivery counters and the line accumulator. It is built
//! once, up front, and shared by reference (or `Arc`) with every caller.
//!
//! Three locks are involved, always taken in this order and always with a
//! bounded wait:
//!
//! 1. the line-buffer lock (only on the [`SyslogLogger::log_line`] path),
//! 2. the state lock,
//! 3. the network stack's core lock, owned by the [`NetworkStack`].

use super::{
    config::{LoggerConfig, DEFAULT_MAX_RECORD_SIZE},
    error::{LoggerError, Result},
    facility::Facility,
    fixed_str::{floor_char_boundary, FixedString},
    formatter::{Rfc3164Formatter, MIN_RECORD_CAPACITY},
    line_buffer::{LineAccumulator, DEFAULT_LINE_CAPACITY, MIN_LINE_CAPACITY},
    lock::{BoundedMutex, DEFAULT_LOCK_TIMEOUT},
    log_level::LogLevel,
    metrics::{DeliveryMetrics, Stats},
    timestamp::{SystemClock, TimestampProvider},
};
use crate::transport::{self, ConsoleSink, DatagramSocket, FallbackSink, NetworkStack, UdpStack};
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::Duration;

/// Longest hostname kept in records
pub const HOSTNAME_CAPACITY: usize = 63;

/// Longest application name kept in records
pub const APP_NAME_CAPACITY: usize = 47;

/// Longest message produced by [`SyslogLogger::log_fmt`]
pub const MAX_FORMATTED_MESSAGE: usize = 511;

/// Longest fragment produced by [`SyslogLogger::log_line_fmt`]
pub const MAX_FORMATTED_FRAGMENT: usize = 255;

/// Hostname used when the system one is unusable
pub const FALLBACK_HOSTNAME: &str = "localhost";

/// How a successful [`SyslogLogger::try_log`] was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Handed to the transport
    Sent,
    /// Below the minimum level; dropped without touching the counters
    Suppressed,
    /// No transport bound; written to the fallback sink
    Fallback,
}

struct BoundTransport {
    socket: Box<dyn DatagramSocket>,
    destination: SocketAddr,
}

struct LoggerState {
    facility: Facility,
    hostname: FixedString,
    app_name: FixedString,
    transport: Option<BoundTransport>,
}

pub struct SyslogLogger {
    state: BoundedMutex<LoggerState>,
    line: BoundedMutex<LineAccumulator>,
    /// Mirrors `state.transport.is_some()` for lock-free checks
    configured: AtomicBool,
    /// Set by the first successful bind; never cleared
    ever_bound: AtomicBool,
    /// Written under the state lock; read as one atomic snapshot
    min_level: AtomicU8,
    metrics: DeliveryMetrics,
    stack: Box<dyn NetworkStack>,
    clock: Box<dyn TimestampProvider>,
    sink: Box<dyn FallbackSink>,
    lock_timeout: Duration,
    max_record_size: usize,
}

impl SyslogLogger {
    /// Create a builder for SyslogLogger
    ///
    /// # Example
    /// ```
    /// use rust_syslog_client::prelude::*;
    ///
    /// let logger = SyslogLogger::builder()
    ///     .facility(Facility::LOG_LOCAL0)
    ///     .hostname("pump-3")
    ///     .app_name("ctrl")
    ///     .min_level(LogLevel::Info)
    ///     .build()
    ///     .unwrap();
    /// assert!(!logger.is_configured());
    /// ```
    #[must_use]
    pub fn builder() -> SyslogLoggerBuilder {
        SyslogLoggerBuilder::new()
    }

    /// Build a client from `config`, binding a transport if `config.server` is set.
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        let mut builder = Self::builder()
            .facility(config.facility)
            .app_name(config.app_name.clone())
            .min_level(config.min_level)
            .lock_timeout(config.lock_timeout())
            .max_record_size(config.max_record_size)
            .line_capacity(config.line_capacity);
        if let Some(hostname) = &config.hostname {
            builder = builder.hostname(hostname.clone());
        }

        let logger = builder.build()?;
        if let Some(server) = &config.server {
            logger.configure(server, config.port)?;
        }
        Ok(logger)
    }

    /// Point the client at a collector.
    ///
    /// Safe to call repeatedly: any existing handle is released before the new
    /// one is opened, so exactly one handle is live afterwards. On error the
    /// previous configuration is either untouched (validation and state-lock
    /// failures) or cleanly unbound (open/bind failures).
    pub fn configure(&self, address: &str, port: u16) -> Result<()> {
        match self.bind(address, port) {
            Ok(destination) => {
                self.sink.write_line(
                    LogLevel::Info,
                    &format!("[SYSLOG INFO] syslog initialized: {}", destination),
                );
                Ok(())
            }
            Err(err) => {
                self.sink.write_line(
                    LogLevel::Error,
                    &format!("[SYSLOG ERROR] configure({}, {}) failed: {}", address, port, err),
                );
                Err(err)
            }
        }
    }

    fn bind(&self, address: &str, port: u16) -> Result<SocketAddr> {
        if port == 0 {
            return Err(LoggerError::config("port", "must be in 1..=65535"));
        }
        let ip: IpAddr = address.trim().parse().map_err(|_| {
            LoggerError::config("address", format!("'{}' is not an IP address", address))
        })?;
        let destination = SocketAddr::new(ip, port);

        let mut state = self.state.acquire(self.lock_timeout)?;

        if let Some(old) = state.transport.take() {
            self.configured.store(false, Ordering::Release);
            if let Err((socket, err)) =
                transport::release_handle(self.stack.as_ref(), old.socket, self.lock_timeout)
            {
                state.transport = Some(BoundTransport {
                    socket,
                    destination: old.destination,
                });
                self.configured.store(true, Ordering::Release);
                return Err(err);
            }
        }

        let socket = transport::open_handle(self.stack.as_ref(), destination, self.lock_timeout)?;
        state.transport = Some(BoundTransport {
            socket,
            destination,
        });
        self.configured.store(true, Ordering::Release);
        self.ever_bound.store(true, Ordering::Release);
        Ok(destination)
    }

    /// Whether a transport handle is currently bound.
    #[inline]
    pub fn is_configured(&self) -> bool {
        self.configured.load(Ordering::Acquire)
    }

    /// Where records currently go, if anywhere.
    pub fn destination(&self) -> Result<Option<SocketAddr>> {
        let state = self.state.acquire(self.lock_timeout)?;
        Ok(state.transport.as_ref().map(|t| t.destination))
    }

    /// Set the minimum level. It is stored right away but only filters once
    /// a transport has been bound.
    pub fn set_min_level(&self, level: LogLevel) -> Result<()> {
        let _state = self.state.acquire(self.lock_timeout)?;
        self.min_level.store(level as u8, Ordering::Release);
        Ok(())
    }

    /// The level filter in effect: [`LogLevel::Verbose`] until the first
    /// successful [`configure`](Self::configure).
    pub fn min_level(&self) -> LogLevel {
        if !self.ever_bound.load(Ordering::Acquire) {
            return LogLevel::Verbose;
        }
        LogLevel::try_from(self.min_level.load(Ordering::Acquire)).unwrap_or(LogLevel::Verbose)
    }

    pub fn stats(&self) -> Result<Stats> {
        let _state = self.state.acquire(self.lock_timeout)?;
        Ok(self.metrics.snapshot())
    }

    pub fn reset_stats(&self) -> Result<()> {
        let _state = self.state.acquire(self.lock_timeout)?;
        self.metrics.reset();
        Ok(())
    }

    /// Send one complete message.
    ///
    /// Without a bound transport every message goes to the fallback sink,
    /// unfiltered. Otherwise suppressed messages are successes, and lock
    /// timeouts, format errors and send errors count as failed and are returned.
    pub fn try_log(&self, level: LogLevel, tag: &str, message: &str) -> Result<Delivery> {
        if !self.is_configured() {
            self.sink.write_line(level, message);
            return Ok(Delivery::Fallback);
        }
        if level.is_suppressed_by(self.min_level()) {
            return Ok(Delivery::Suppressed);
        }

        let mut state = match self.state.acquire(self.lock_timeout) {
            Ok(state) => state,
            Err(err) => return Err(self.count_failure(err)),
        };

        // Reconfiguration may have unbound us while we waited
        if state.transport.is_none() {
            drop(state);
            self.metrics.record_failed();
            self.sink.write_line(level, message);
            return Ok(Delivery::Fallback);
        }

        match self.send_locked(&mut state, level, tag, message) {
            Ok(()) => {
                self.metrics.record_sent();
                Ok(Delivery::Sent)
            }
            Err(err) => Err(self.count_failure(err)),
        }
    }

    fn count_failure(&self, err: LoggerError) -> LoggerError {
        if err.is_delivery_failure() {
            self.metrics.record_failed();
        }
        err
    }

    fn send_locked(&self, state: &mut LoggerState, level: LogLevel, tag: &str, message: &str) -> Result<()> {
        let timestamp = self.clock.timestamp();
        let record = Rfc3164Formatter::new(state.facility, state.hostname.as_str(), state.app_name.as_str())
            .format(level, &timestamp, Some(tag), Some(message), self.max_record_size)?;

        let bound = state
            .transport
            .as_mut()
            .ok_or_else(|| LoggerError::send("no transport handle bound"))?;
        transport::send_record(
            self.stack.as_ref(),
            bound.socket.as_mut(),
            &record,
            bound.destination,
            self.lock_timeout,
        )
    }

    /// Send one complete message; `true` unless delivery failed.
    #[inline]
    pub fn log(&self, level: LogLevel, tag: &str, message: &str) -> bool {
        self.try_log(level, tag, message).is_ok()
    }

    /// [`log`](Self::log) with `format!`-style arguments, truncated to
    /// [`MAX_FORMATTED_MESSAGE`] bytes.
    pub fn log_fmt(&self, level: LogLevel, tag: &str, args: fmt::Arguments<'_>) -> bool {
        let message = render_truncated(args, MAX_FORMATTED_MESSAGE);
        self.log(level, tag, &message)
    }

    /// Feed a text fragment through the line accumulator.
    ///
    /// Every line completed by this fragment is sent as its own record; an
    /// unterminated tail waits for a later fragment or [`flush_line`](Self::flush_line).
    /// Returns `false` if the line-buffer lock could not be taken (nothing is
    /// changed then) or if any record failed.
    pub fn log_line(&self, level: LogLevel, tag: &str, text: &str) -> bool {
        let mut line = match self.line.acquire(self.lock_timeout) {
            Ok(line) => line,
            Err(_) => return false,
        };
        line.feed(level, tag, text, &mut |lvl, tag, msg| self.log(lvl, tag, msg))
    }

    /// [`log_line`](Self::log_line) with `format!`-style arguments, truncated
    /// to [`MAX_FORMATTED_FRAGMENT`] bytes.
    pub fn log_line_fmt(&self, level: LogLevel, tag: &str, args: fmt::Arguments<'_>) -> bool {
        let fragment = render_truncated(args, MAX_FORMATTED_FRAGMENT);
        self.log_line(level, tag, &fragment)
    }

    /// Send any partially assembled line now.
    pub fn flush_line(&self) -> bool {
        let mut line = match self.line.acquire(self.lock_timeout) {
            Ok(line) => line,
            Err(_) => return false,
        };
        line.flush(&mut |lvl, tag, msg| self.log(lvl, tag, msg))
    }

    /// The partially assembled line as `(level, tag, text)`, if any.
    pub fn pending_line(&self) -> Result<Option<(LogLevel, String, String)>> {
        let line = self.line.acquire(self.lock_timeout)?;
        Ok(line
            .pending()
            .map(|(level, tag, text)| (level, tag.to_string(), text.to_string())))
    }
}

impl Drop for SyslogLogger {
    fn drop(&mut self) {
        self.flush_line();

        let bound = self.state.get_mut().transport.take();
        if let Some(bound) = bound {
            // Teardown: the handle goes away whether or not the core lock was free
            let _ = transport::release_handle(self.stack.as_ref(), bound.socket, self.lock_timeout);
        }
    }
}

fn render_truncated(args: fmt::Arguments<'_>, max: usize) -> String {
    let mut rendered = args.to_string();
    rendered.truncate(floor_char_boundary(&rendered, max));
    rendered
}

/// Strip anything from the first `.` on.
fn strip_domain(hostname: &str) -> &str {
    hostname.split('.').next().unwrap_or(hostname)
}

fn is_record_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b > b' ' && b < 0x7f)
}

fn system_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .map(|name| strip_domain(&name).to_string())
        .filter(|name| is_record_identifier(name))
        .unwrap_or_else(|| FALLBACK_HOSTNAME.to_string())
}

/// Builder for constructing SyslogLogger with a fluent API
///
/// All locks are created by [`build`](Self::build), before the client can be
/// shared.
pub struct SyslogLoggerBuilder {
    facility: Facility,
    hostname: Option<String>,
    app_name: String,
    min_level: LogLevel,
    lock_timeout: Duration,
    max_record_size: usize,
    line_capacity: usize,
    stack: Option<Box<dyn NetworkStack>>,
    clock: Option<Box<dyn TimestampProvider>>,
    sink: Option<Box<dyn FallbackSink>>,
}

impl SyslogLoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            facility: Facility::LOG_USER,
            hostname: None,
            app_name: "logger".to_string(),
            min_level: LogLevel::Verbose,
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
            max_record_size: DEFAULT_MAX_RECORD_SIZE,
            line_capacity: DEFAULT_LINE_CAPACITY,
            stack: None,
            clock: None,
            sink: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn facility(mut self, facility: Facility) -> Self {
        self.facility = facility;
        self
    }

    /// Set the HOSTNAME field. Defaults to the system hostname without its
    /// domain.
    #[must_use = "builder methods return a new value"]
    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Bound on every lock wait. Default: 100 ms.
    #[must_use = "builder methods return a new value"]
    pub fn lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Record buffer size, terminator included. Default: 1024.
    #[must_use = "builder methods return a new value"]
    pub fn max_record_size(mut self, size: usize) -> Self {
        self.max_record_size = size;
        self
    }

    /// Longest line the accumulator holds before chunking. Must leave room
    /// for the record header within `max_record_size`.
    #[must_use = "builder methods return a new value"]
    pub fn line_capacity(mut self, capacity: usize) -> Self {
        self.line_capacity = capacity;
        self
    }

    /// Defaults to [`UdpStack`].
    #[must_use = "builder methods return a new value"]
    pub fn network_stack<N: NetworkStack + 'static>(mut self, stack: N) -> Self {
        self.stack = Some(Box::new(stack));
        self
    }

    /// Defaults to local time from [`SystemClock`].
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_provider<T: TimestampProvider + 'static>(mut self, clock: T) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Defaults to [`ConsoleSink`].
    #[must_use = "builder methods return a new value"]
    pub fn fallback_sink<S: FallbackSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Build the SyslogLogger
    pub fn build(self) -> Result<SyslogLogger> {
        if self.max_record_size < MIN_RECORD_CAPACITY {
            return Err(LoggerError::config(
                "max_record_size",
                format!("must be at least {}", MIN_RECORD_CAPACITY),
            ));
        }
        if self.line_capacity < MIN_LINE_CAPACITY || self.line_capacity >= self.max_record_size {
            return Err(LoggerError::config(
                "line_capacity",
                format!(
                    "must be in {}..{}",
                    MIN_LINE_CAPACITY, self.max_record_size
                ),
            ));
        }

        let hostname = match self.hostname {
            Some(hostname) => hostname,
            None => system_hostname(),
        };
        if !is_record_identifier(&hostname) {
            return Err(LoggerError::config(
                "hostname",
                format!("{:?} must be non-empty printable ASCII without spaces", hostname),
            ));
        }
        if !is_record_identifier(&self.app_name) || self.app_name.contains('[') {
            return Err(LoggerError::config(
                "app_name",
                format!(
                    "{:?} must be non-empty printable ASCII without spaces or '['",
                    self.app_name
                ),
            ));
        }

        Ok(SyslogLogger {
            state: BoundedMutex::new(
                "state",
                LoggerState {
                    facility: self.facility,
                    hostname: FixedString::truncated(&hostname, HOSTNAME_CAPACITY),
                    app_name: FixedString::truncated(&self.app_name, APP_NAME_CAPACITY),
                    transport: None,
                },
            ),
            line: BoundedMutex::new("line buffer", LineAccumulator::new(self.line_capacity)),
            configured: AtomicBool::new(false),
            ever_bound: AtomicBool::new(false),
            min_level: AtomicU8::new(self.min_level as u8),
            metrics: DeliveryMetrics::new(),
            stack: self.stack.unwrap_or_else(|| Box::new(UdpStack::new())),
            clock: self.clock.unwrap_or_else(|| Box::new(SystemClock::local())),
            sink: self.sink.unwrap_or_else(|| Box::new(ConsoleSink::new())),
            lock_timeout: self.lock_timeout,
            max_record_size: self.max_record_size,
        })
    }
}

impl Default for SyslogLoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
