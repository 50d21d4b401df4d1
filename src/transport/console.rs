//! Local fallback output
//!
//! When no collector is configured, messages still go somewhere: a
//! [`FallbackSink`] writes them synchronously and never fails. The sink also
//! receives the client's own diagnostics.

use crate::core::LogLevel;
#[cfg(feature = "console")]
use colored::Colorize;

/// Synchronous, always-succeeding local line output.
pub trait FallbackSink: Send + Sync {
    fn write_line(&self, level: LogLevel, line: &str);
}

/// Writes to stdout, routing errors to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink {
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { use_colors: false }
    }

    /// Colour lines by level. Ignored without the `console` feature.
    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    #[cfg(feature = "console")]
    fn render(&self, level: LogLevel, line: &str) -> String {
        if self.use_colors {
            line.color(level.color_code()).to_string()
        } else {
            line.to_string()
        }
    }

    #[cfg(not(feature = "console"))]
    fn render(&self, _level: LogLevel, line: &str) -> String {
        line.to_string()
    }
}

impl FallbackSink for ConsoleSink {
    fn write_line(&self, level: LogLevel, line: &str) {
        let output = self.render(level, line);
        match level {
            LogLevel::Error => eprintln!("{}", output),
            _ => println!("{}", output),
        }
    }
}
