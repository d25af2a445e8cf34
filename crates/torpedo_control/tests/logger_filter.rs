//! Logger level filter
//!
//! Sink глобальный — поэтому отдельный test binary с единственным тестом.

use std::sync::{Arc, Mutex};

use torpedo_control::logger::{
    log, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter,
};

/// Sink, который складывает строки в общий буфер
struct CaptureLogger {
    lines: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl LogPrinter for CaptureLogger {
    fn log(&self, level: LogLevel, message: &str) {
        self.lines
            .lock()
            .expect("capture buffer")
            .push((level, message.to_string()));
    }
}

#[test]
fn test_lines_below_level_are_dropped() {
    let lines = Arc::new(Mutex::new(Vec::new()));
    set_logger(Box::new(CaptureLogger {
        lines: Arc::clone(&lines),
    }));
    set_log_level(LogLevel::Warning);

    log("bay selection trace");
    log_info("volley fired");
    log_warning("primary bay misfired");

    let captured = lines.lock().expect("capture buffer");
    assert_eq!(captured.len(), 1, "only warning must pass: {:?}", *captured);
    assert_eq!(captured[0].0, LogLevel::Warning);
    assert!(captured[0].1.ends_with("primary bay misfired"));
}
