//! Diagnostics emitted by targeting primitives, captured through the `log` facade

use log::{Level, LevelFilter, Log, Metadata, Record};
use serde_json::json;
use std::sync::{Mutex, Once};
use vane_targeting::*;

struct Captured {
    level: Level,
    target: String,
    message: String,
}

struct CaptureLogger {
    records: Mutex<Vec<Captured>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records.lock().unwrap().push(Captured {
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

static INSTALL: Once = Once::new();

fn install() {
    INSTALL.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
        vane_log::set_format(vane_log::Format::Facade);
        vane_log::set_level(vane_log::Level::Warn);
    });
}

// Tests run in parallel, so each one looks for its own distinctive text.
fn warned(needle: &str) -> bool {
    LOGGER.records.lock().unwrap().iter().any(|record| {
        record.level == Level::Warn
            && record.target == "vane::targeting"
            && record.message.contains(needle)
    })
}

#[test]
fn test_type_mismatch_names_type_and_field() {
    install();

    assert_eq!(json_bool(&json!("true"), "FeatureRule", "force"), None);
    assert!(warned("Invalid JSON data type for FeatureRule.force: string"));
}

#[test]
fn test_null_optional_float_is_reported() {
    install();

    assert_eq!(json_maybe_float(&json!(null), "Experiment", "hashVersion"), None);
    assert!(warned("Experiment.hashVersion: null"));
}

#[test]
fn test_successful_extraction_is_silent() {
    install();

    assert_eq!(json_float(&json!(0.5), "Experiment", "silentCoverage"), Some(0.5));
    assert!(!warned("silentCoverage"));
}

#[test]
fn test_malformed_pattern_is_reported() {
    install();

    let page = Url::parse("https://example.com/pricing").unwrap();
    assert!(!eval_simple_url_target(&page, "bro ken.example.com/pricing"));
    assert!(warned("bro ken.example.com/pricing"));
}

#[test]
fn test_malformed_query_is_reported() {
    install();

    let page = Url::parse("https://example.com/?first=1;second=2").unwrap();
    assert!(!eval_simple_url_target(&page, "example.com"));
    assert!(warned("first=1;second=2"));
}

#[test]
fn test_invalid_regex_target_is_reported() {
    install();

    assert!(url_regex("(unclosed-group").is_none());
    assert!(warned("(unclosed-group"));
}
