mod common;

use std::sync::Mutex;

use common::*;
use log::{LevelFilter, Log, Metadata, Record};
use topic_sync::{RowMismatchPolicy, run};

/// Keeps every formatted log line so the test can inspect them.
struct RecordingLogger {
    lines: Mutex<Vec<String>>,
}

impl Log for RecordingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.lines.lock().unwrap().push(record.args().to_string());
    }

    fn flush(&self) {}
}

static LOGGER: RecordingLogger = RecordingLogger {
    lines: Mutex::new(Vec::new()),
};

#[tokio::test]
async fn test_credentials_and_tokens_stay_out_of_logs() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let portal = healthy_portal();
    run(&portal, &config(RowMismatchPolicy::Warn), &topics())
        .await
        .unwrap();

    let lines = LOGGER.lines.lock().unwrap();
    assert!(lines.iter().any(|line| line.starts_with("Authenticated against")));
    for secret in ["lecturer", "secret", "session-token", "CfDJ8token"] {
        assert!(
            lines.iter().all(|line| !line.contains(secret)),
            "{secret:?} leaked into the log"
        );
    }
}
