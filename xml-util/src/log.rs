//! Logging seam for the formatter
//!
//! Operations that degrade instead of failing report what went wrong
//! through a [`LogSink`]. The default sink forwards to `tracing`.

use std::error::Error as StdError;
use std::sync::Mutex;

/// Logging capability consumed for error and warning reporting
pub trait LogSink {
    /// Report a failure along with its cause
    fn error(&self, message: &str, context: &str, cause: &(dyn StdError + 'static));

    /// Report a condition that did not involve an error value
    fn warn(&self, message: &str, context: &str);
}

impl<L: LogSink + ?Sized> LogSink for &L {
    fn error(&self, message: &str, context: &str, cause: &(dyn StdError + 'static)) {
        (**self).error(message, context, cause)
    }

    fn warn(&self, message: &str, context: &str) {
        (**self).warn(message, context)
    }
}

/// Sink that emits `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl LogSink for TracingLog {
    fn error(&self, message: &str, context: &str, cause: &(dyn StdError + 'static)) {
        tracing::error!(context = context, error = %cause, "{}", message);
    }

    fn warn(&self, message: &str, context: &str) {
        tracing::warn!(context = context, "{}", message);
    }
}

/// Severity of a recorded entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warn,
}

/// One entry captured by [`MemoryLog`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Level,
    pub message: String,
    pub context: String,
    pub cause: Option<String>,
}

/// Sink that keeps every entry in memory
///
/// Useful when the caller wants to inspect what a best-effort operation
/// reported instead of routing it to a subscriber.
#[derive(Debug, Default)]
pub struct MemoryLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the entries recorded so far
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    /// Number of entries at the given level
    pub fn count(&self, level: Level) -> usize {
        self.lock().iter().filter(|e| e.level == level).count()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<LogEntry>> {
        // A panic while holding the lock cannot leave the Vec half-written
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, entry: LogEntry) {
        self.lock().push(entry);
    }
}

impl LogSink for MemoryLog {
    fn error(&self, message: &str, context: &str, cause: &(dyn StdError + 'static)) {
        self.push(LogEntry {
            level: Level::Error,
            message: message.to_string(),
            context: context.to_string(),
            cause: Some(cause.to_string()),
        });
    }

    fn warn(&self, message: &str, context: &str) {
        self.push(LogEntry {
            level: Level::Warn,
            message: message.to_string(),
            context: context.to_string(),
            cause: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_log_records_levels() {
        let log = MemoryLog::new();
        let cause = std::io::Error::other("disk full");
        log.warn("careful", "ctx");
        log.error("failed", "ctx", &cause);

        assert_eq!(log.count(Level::Warn), 1);
        assert_eq!(log.count(Level::Error), 1);
        let entries = log.entries();
        assert_eq!(entries[1].cause.as_deref(), Some("disk full"));
        assert_eq!(entries[0].context, "ctx");
    }

    #[test]
    fn sink_by_reference() {
        let log = MemoryLog::new();
        let by_ref = &log;
        by_ref.warn("via reference", "ctx");
        assert_eq!(log.count(Level::Warn), 1);
    }
}
