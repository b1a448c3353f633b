use crate::config::Config;
use crate::log::{log_level::LogLevel, log_msg::LogMsg, logger_handle::LoggerHandle};

use std::{
    fs::{self, OpenOptions},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    sync::mpsc,
    thread,
    time::{SystemTime, UNIX_EPOCH},
};

// -----------------------------------------------------------------------------
// COMPILE-TIME CONFIGURATION
// -----------------------------------------------------------------------------

/// Flush to disk every 20 lines when debugging (to see crashes near real-time).
#[cfg(feature = "log-debug")]
const FLUSH_BATCH_SIZE: u32 = 20;

/// Flush to disk every 200 lines otherwise (a transfer session logs little).
#[cfg(not(feature = "log-debug"))]
const FLUSH_BATCH_SIZE: u32 = 200;

// -----------------------------------------------------------------------------

/// Bounded, non-blocking logger writing to a per-process log file.
///
/// Producer threads call `try_log` through a [`LoggerHandle`]; a dedicated
/// background thread drains the bounded channel, writes to disk, and flushes
/// in batches. The protocol loop is never slowed by disk I/O.
pub struct Logger {
    handle: LoggerHandle,
    _thread: Option<thread::JoinHandle<()>>,
    file_path: PathBuf,
}

impl Logger {
    /// Start the logger, resolving the directory and filename prefix from
    /// the `[logging]` section (`log_path`, `log_filename`); defaults to a
    /// `logs/` directory next to the executable.
    #[must_use]
    pub fn start(cap: usize, config: &Config) -> Self {
        let app_name = config.get_non_empty("logging", "log_filename").unwrap_or("usblink");
        let dir = match config.get_non_empty("logging", "log_path") {
            Some(dir_str) => expand_path(dir_str),
            None => exe_dir_fallback_cwd().join("logs"),
        };
        Self::start_in_dir(dir, app_name, cap)
    }

    /// Start the logger in a specific directory, creating it if missing.
    /// The filename is unique per process: `<app>-<ts>-pid<pid>.log`.
    pub fn start_in_dir<D: AsRef<Path>>(dir: D, app_name: &str, cap: usize) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let _ = fs::create_dir_all(&dir);

        let fname = format!(
            "{}-{}-pid{}.log",
            app_name,
            timestamp_for_filename(),
            std::process::id()
        );
        let file_path = dir.join(&fname);

        let (tx, rx) = mpsc::sync_channel::<LogMsg>(cap);
        let file_path_clone = file_path.clone();

        let _thread = thread::Builder::new()
            .name("logger-worker".into())
            .spawn(move || {
                // Try the target file, then a temp fallback, then a sink.
                let writer: Box<dyn Write + Send> = if let Ok(f) = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&file_path_clone)
                {
                    Box::new(f)
                } else {
                    let fallback = std::env::temp_dir().join("usblink-fallback.log");
                    match OpenOptions::new().create(true).append(true).open(&fallback) {
                        Ok(f) => Box::new(f),
                        Err(_) => Box::new(io::sink()),
                    }
                };

                let mut out: BufWriter<Box<dyn Write + Send>> = BufWriter::new(writer);
                let mut lines_written: u32 = 0;

                while let Ok(m) = rx.recv() {
                    let _ = writeln!(&mut out, "[{}] {} {} | {}", m.level.as_str(), m.ts_ms, m.target, m.text);
                    lines_written = lines_written.wrapping_add(1);

                    // Warnings and errors hit disk immediately; the rest in
                    // batches.
                    let urgent = matches!(m.level, LogLevel::Warn | LogLevel::Error);
                    if urgent || lines_written.is_multiple_of(FLUSH_BATCH_SIZE) {
                        let _ = out.flush();
                    }
                }

                let _ = out.flush();
            })
            .ok();

        Self {
            handle: LoggerHandle { tx },
            _thread,
            file_path,
        }
    }

    /// Cloneable handle for passing the logging capability around.
    #[must_use]
    pub fn handle(&self) -> LoggerHandle {
        self.handle.clone()
    }

    /// Path of the active log file.
    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

/// The directory holding the executable, or the working directory on error.
fn exe_dir_fallback_cwd() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// `YYYYMMDD_HHMMSS` timestamp for filenames, no external date crate.
fn timestamp_for_filename() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let (year, mon, day, hour, min, sec) = unix_to_utc(secs);
    format!("{year:04}{mon:02}{day:02}_{hour:02}{min:02}{sec:02}")
}

/// Civil-time conversion of a UNIX timestamp to UTC date components.
fn unix_to_utc(mut s: u64) -> (i64, u64, u64, u64, u64, u64) {
    let sec = s % 60;
    s /= 60;
    let min = s % 60;
    s /= 60;
    let hour = s % 24;
    s /= 24;

    let z = s as i64 + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097); // [0, 146096]
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // [0, 365]
    let mp = (5 * doy + 2) / 153; // [0, 11]
    let d = (doy - (153 * mp + 2) / 5 + 1) as u64; // [1, 31]
    let m = (mp + if mp < 10 { 3 } else { -9 }) as u64; // [1, 12]
    let year = y + i64::from(m <= 2);

    (year, m, d, hour, min, sec)
}

/// Expand a leading `~` to the user's home directory.
fn expand_path(path_str: &str) -> PathBuf {
    if let Some(rest) = path_str.strip_prefix("~") {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .ok()
            .map(PathBuf::from);
        if let Some(mut home_path) = home {
            if rest.is_empty() {
                return home_path;
            }
            if let Some(tail) = rest.strip_prefix('/').or_else(|| rest.strip_prefix('\\')) {
                home_path.push(tail);
                return home_path;
            }
        }
    }
    PathBuf::from(path_str)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::log::log_level::LogLevel;
    use std::time::Duration;

    #[test]
    fn unix_to_utc_known_dates() {
        assert_eq!(unix_to_utc(0), (1970, 1, 1, 0, 0, 0));
        // 2020-02-29T12:34:56Z, a leap day.
        assert_eq!(unix_to_utc(1_582_979_696), (2020, 2, 29, 12, 34, 56));
    }

    #[test]
    fn writes_through_handle_to_file() {
        let tmp_dir = std::env::temp_dir().join("usblink_logger_test");
        let logger = Logger::start_in_dir(&tmp_dir, "test", 16);
        logger
            .handle()
            .try_log(LogLevel::Info, "hello log", module_path!())
            .expect("enqueue failed");

        // Dropping the logger closes the channel; the worker drains the
        // queue and flushes on exit.
        let path = logger.file_path().to_path_buf();
        drop(logger);

        let mut content = String::new();
        for _ in 0..50 {
            std::thread::sleep(Duration::from_millis(10));
            content = fs::read_to_string(&path).unwrap_or_default();
            if content.contains("hello log") {
                break;
            }
        }
        assert!(content.contains("hello log"), "log line never flushed: {content:?}");

        let _ = fs::remove_dir_all(tmp_dir);
    }
}
