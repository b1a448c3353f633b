use crate::log::log_level::LogLevel;

/// Capability to absorb log messages; cloneable handles and a no-op sink
/// implement it so every module can log without owning the logger.
pub trait LogSink: Send + Sync {
    fn log(&self, level: LogLevel, msg: &str, target: &'static str);
}
