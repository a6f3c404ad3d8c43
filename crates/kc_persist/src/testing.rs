//! Log capture for tests.
//!
//! A single global logger is installed on first use. Records are kept per
//! thread, and the test harness runs every test on its own thread, so tests
//! only ever see their own records.

use std::cell::RefCell;
use std::string::{String, ToString};
use std::sync::Once;
use std::vec::Vec;

use log::{Level, LevelFilter, Log, Metadata, Record};

static LOGGER_SETUP: Once = Once::new();

std::thread_local! {
    static RECORDS: RefCell<Option<Vec<(Level, String)>>> = const { RefCell::new(None) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        RECORDS.with_borrow_mut(|records| {
            if let Some(records) = records {
                records.push((record.level(), record.args().to_string()));
            }
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

/// Collects the records logged by the current thread until dropped.
pub(crate) struct CapturedLogs(());

impl CapturedLogs {
    pub fn start() -> Self {
        LOGGER_SETUP.call_once(|| {
            if log::set_logger(&LOGGER).is_ok() {
                log::set_max_level(LevelFilter::Trace);
            }
        });
        RECORDS.with_borrow_mut(|records| *records = Some(Vec::new()));
        Self(())
    }

    /// Records logged so far at exactly `level`.
    pub fn at(&self, level: Level) -> Vec<String> {
        RECORDS.with_borrow(|records| {
            records
                .iter()
                .flatten()
                .filter(|(l, _)| *l == level)
                .map(|(_, message)| message.clone())
                .collect()
        })
    }

    /// Returns `true` if a record at `level` contains `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.at(level).iter().any(|message| message.contains(needle))
    }
}

impl Drop for CapturedLogs {
    fn drop(&mut self) {
        RECORDS.with_borrow_mut(|records| *records = None);
    }
}
