//! Tests for the logger module

use crate::config::Mode;
use crate::logger::error::LoggerError;
use crate::logger::line::LineLogger;
use crate::logger::resolver::LogFileResolver;
use crate::logger::stamp::Clock;
use crate::logger::writer::{ErrorCallback, HourlyFileWriter, RecoveryStrategy};
use jiff::civil::{DateTime, date};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Resolver rooted entirely inside `dir`
fn resolver_in(dir: &Path) -> LogFileResolver {
    LogFileResolver::new("gin")
        .with_working_dir(dir)
        .with_executable_dir(dir)
}

/// Clock whose time the test can move
fn manual_clock(start: DateTime) -> (Clock, Arc<Mutex<DateTime>>) {
    let now = Arc::new(Mutex::new(start));
    let handle = now.clone();
    let clock: Clock = Arc::new(move || *handle.lock().unwrap());
    (clock, now)
}

#[cfg(test)]
mod resolver_tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_executable_directory_contains_binary() {
        let dir = LogFileResolver::default()
            .resolve_executable_directory()
            .expect("test binary location should resolve");
        let exe = std::env::current_exe().unwrap();

        assert!(dir.is_absolute());
        assert_eq!(exe.parent(), Some(dir.as_path()));
    }

    #[test]
    fn test_executable_directory_override() {
        let resolver = LogFileResolver::default().with_executable_dir("/srv/app");
        assert_eq!(
            resolver.resolve_executable_directory().unwrap(),
            Path::new("/srv/app")
        );
    }

    #[test]
    fn test_build_path_layout() {
        let resolver = LogFileResolver::new("gin");
        let at = date(2024, 3, 5).at(14, 7, 9, 0);

        let path = resolver.build_log_file_path(at, Path::new("/opt/svc")).unwrap();
        assert_eq!(path, Path::new("/opt/svc/Log/2024-03-05T14:00.gin.log"));
    }

    #[test]
    fn test_build_path_custom_suffix_and_dir() {
        let resolver = LogFileResolver::new("api").with_dir_name("logs");
        let at = date(2024, 3, 5).at(9, 0, 0, 0);

        let path = resolver.build_log_file_path(at, Path::new("/opt/svc")).unwrap();
        assert_eq!(path, Path::new("/opt/svc/logs/2024-03-05T09:00.api.log"));
    }

    #[test]
    fn test_build_path_rejects_empty_name() {
        let resolver = LogFileResolver::new("").with_bucket_format("");
        let at = date(2024, 3, 5).at(14, 0, 0, 0);

        let result = resolver.build_log_file_path(at, Path::new("/opt/svc"));
        assert!(matches!(result, Err(LoggerError::EmptyFileName)));
    }

    #[test]
    fn test_empty_bucket_rejected_even_with_suffix() {
        let resolver = LogFileResolver::new("gin").with_bucket_format("");
        let at = date(2024, 3, 5).at(14, 0, 0, 0);

        assert!(matches!(
            resolver.build_log_file_path(at, Path::new("/opt/svc")),
            Err(LoggerError::EmptyFileName)
        ));
    }

    #[test]
    fn test_bucket_key_zeroes_minutes() {
        let resolver = LogFileResolver::default();
        let last = date(2024, 12, 31).at(23, 59, 59, 999_999_999);
        let midnight = date(2025, 1, 1).at(0, 0, 0, 0);

        assert_eq!(resolver.bucket_key(last).unwrap(), "2024-12-31T23:00");
        assert_eq!(resolver.bucket_key(midnight).unwrap(), "2025-01-01T00:00");
    }

    #[test]
    fn test_offset_in_bucket_format_is_an_error() {
        let resolver = LogFileResolver::new("gin").with_bucket_format("%z");
        let at = date(2024, 3, 5).at(14, 0, 0, 0);

        assert!(matches!(
            resolver.build_log_file_path(at, Path::new("/opt/svc")),
            Err(LoggerError::BucketFormatFailed { .. })
        ));
    }

    #[test]
    fn test_ensure_log_directory_creates_then_is_idempotent() {
        let tmp = tempdir().unwrap();
        let resolver = resolver_in(tmp.path());
        let log_dir = tmp.path().join("Log");

        assert!(!log_dir.exists());
        resolver.ensure_log_directory().unwrap();
        assert!(log_dir.is_dir());

        resolver.ensure_log_directory().unwrap();
        resolver.ensure_log_directory().unwrap();
        assert!(log_dir.is_dir());
    }

    #[test]
    fn test_ensure_log_directory_reports_other_failures() {
        let tmp = tempdir().unwrap();
        let resolver = LogFileResolver::default().with_working_dir(tmp.path().join("missing/nested"));

        let result = resolver.ensure_log_directory();
        assert!(matches!(
            result,
            Err(LoggerError::DirectoryCreateFailed { .. })
        ));
    }

    #[test]
    fn test_open_or_create_new_file_is_empty_and_writable() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("fresh.gin.log");

        let mut file = LogFileResolver::open_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);

        file.write_all(b"first\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "first\n");
    }

    #[test]
    fn test_open_or_create_twice_preserves_content() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("same.gin.log");

        let mut first = LogFileResolver::open_or_create(&path).unwrap();
        first.write_all(b"one\n").unwrap();

        let mut second = LogFileResolver::open_or_create(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\n");

        second.write_all(b"two\n").unwrap();
        first.write_all(b"three\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\nthree\n");
    }

    #[test]
    fn test_open_or_create_missing_parent_fails() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("no-such-dir").join("x.log");

        let result = LogFileResolver::open_or_create(&path);
        assert!(matches!(result, Err(LoggerError::OpenFailed { .. })));
    }

    #[test]
    fn test_open_current_runs_whole_chain() {
        let tmp = tempdir().unwrap();
        let resolver = resolver_in(tmp.path());
        let at = date(2024, 3, 5).at(14, 30, 0, 0);

        let log = resolver.open_current(at).unwrap();
        assert_eq!(log.bucket, "2024-03-05T14:00");
        assert_eq!(log.path, tmp.path().join("Log/2024-03-05T14:00.gin.log"));
        assert!(log.path.exists());
    }

    #[test]
    fn test_open_current_stops_at_directory_failure() {
        let tmp = tempdir().unwrap();
        let resolver = LogFileResolver::default()
            .with_working_dir(tmp.path().join("missing/nested"))
            .with_executable_dir(tmp.path());

        let result = resolver.open_current(date(2024, 3, 5).at(14, 0, 0, 0));
        assert!(matches!(
            result,
            Err(LoggerError::DirectoryCreateFailed { .. })
        ));
        assert!(!tmp.path().join("Log").exists());
    }
}

#[cfg(test)]
mod bucket_property_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_hour_start() -> impl Strategy<Value = DateTime> {
        (2000i16..2100, 1i8..=12, 1i8..=28, 0i8..24)
            .prop_map(|(y, mo, d, h)| date(y, mo, d).at(h, 0, 0, 0))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Two instants inside one clock hour share a file
        #[test]
        fn property_same_hour_same_file(
            hour_start in arb_hour_start(),
            m1 in 0i8..60, s1 in 0i8..60,
            m2 in 0i8..60, s2 in 0i8..60
        ) {
            let resolver = LogFileResolver::default();
            let t1 = hour_start.with().minute(m1).second(s1).build().unwrap();
            let t2 = hour_start.with().minute(m2).second(s2).build().unwrap();
            let base = Path::new("/opt/svc");

            prop_assert_eq!(
                resolver.build_log_file_path(t1, base).unwrap(),
                resolver.build_log_file_path(t2, base).unwrap()
            );
        }

        /// Instants in different clock hours never share a file
        #[test]
        fn property_different_hours_different_files(
            a in arb_hour_start(),
            b in arb_hour_start(),
            minute in 0i8..60
        ) {
            prop_assume!(a != b);

            let resolver = LogFileResolver::default();
            let t1 = a.with().minute(minute).build().unwrap();
            let t2 = b.with().minute(minute).build().unwrap();
            let base = Path::new("/opt/svc");

            prop_assert_ne!(
                resolver.build_log_file_path(t1, base).unwrap(),
                resolver.build_log_file_path(t2, base).unwrap()
            );
        }
    }
}

#[cfg(test)]
mod writer_tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    #[test]
    fn test_writer_appends_to_current_hour() {
        let tmp = tempdir().unwrap();
        let (clock, _now) = manual_clock(date(2024, 3, 5).at(14, 1, 0, 0));
        let writer = HourlyFileWriter::with_clock(resolver_in(tmp.path()), clock).unwrap();

        writer.make_writer().write_all(b"a\n").unwrap();
        writer.make_writer().write_all(b"b\n").unwrap();

        let path = tmp.path().join("Log/2024-03-05T14:00.gin.log");
        assert_eq!(writer.current_path(), Some(path.clone()));
        assert_eq!(fs::read_to_string(path).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_writer_switches_file_on_hour_change() {
        let tmp = tempdir().unwrap();
        let (clock, now) = manual_clock(date(2024, 3, 5).at(14, 59, 59, 0));
        let writer = HourlyFileWriter::with_clock(resolver_in(tmp.path()), clock).unwrap();

        writer.make_writer().write_all(b"before\n").unwrap();
        *now.lock().unwrap() = date(2024, 3, 5).at(15, 0, 0, 0);
        writer.make_writer().write_all(b"after\n").unwrap();

        let first = tmp.path().join("Log/2024-03-05T14:00.gin.log");
        let second = tmp.path().join("Log/2024-03-05T15:00.gin.log");
        assert_eq!(fs::read_to_string(first).unwrap(), "before\n");
        assert_eq!(fs::read_to_string(&second).unwrap(), "after\n");
        assert_eq!(writer.current_path(), Some(second));
    }

    #[test]
    fn test_writer_keeps_existing_content() {
        let tmp = tempdir().unwrap();
        fs::create_dir(tmp.path().join("Log")).unwrap();
        let path = tmp.path().join("Log/2024-03-05T14:00.gin.log");
        fs::write(&path, "earlier run\n").unwrap();

        let (clock, _now) = manual_clock(date(2024, 3, 5).at(14, 20, 0, 0));
        let writer = HourlyFileWriter::with_clock(resolver_in(tmp.path()), clock).unwrap();
        writer.make_writer().write_all(b"this run\n").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "earlier run\nthis run\n");
    }

    #[test]
    fn test_silent_drop_skips_failed_hour_and_resumes() {
        let tmp = tempdir().unwrap();
        let (clock, now) = manual_clock(date(2024, 3, 5).at(14, 0, 0, 0));
        let failures = Arc::new(AtomicUsize::new(0));
        let counter = failures.clone();
        let callback: ErrorCallback = Arc::new(move |_: &std::io::Error| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let writer = HourlyFileWriter::with_clock(resolver_in(tmp.path()), clock)
            .unwrap()
            .with_recovery(RecoveryStrategy::SilentDrop, Some(callback));
        writer.make_writer().write_all(b"kept\n").unwrap();

        // Blocking the next hour's path with a directory makes the reopen fail
        fs::create_dir(tmp.path().join("Log/2024-03-05T15:00.gin.log")).unwrap();
        *now.lock().unwrap() = date(2024, 3, 5).at(15, 5, 0, 0);

        let written = writer.make_writer().write(b"dropped\n").unwrap();
        assert_eq!(written, 8);
        writer.make_writer().write_all(b"dropped too\n").unwrap();
        assert_eq!(failures.load(Ordering::SeqCst), 1);
        assert!(writer.is_degraded());

        let previous = tmp.path().join("Log/2024-03-05T14:00.gin.log");
        assert_eq!(fs::read_to_string(&previous).unwrap(), "kept\n");

        *now.lock().unwrap() = date(2024, 3, 5).at(16, 0, 1, 0);
        writer.make_writer().write_all(b"resumed\n").unwrap();

        let next = tmp.path().join("Log/2024-03-05T16:00.gin.log");
        assert_eq!(fs::read_to_string(&next).unwrap(), "resumed\n");
        assert!(!writer.is_degraded());
    }

    #[test]
    fn test_fallback_reopens_at_next_hour() {
        let tmp = tempdir().unwrap();
        let (clock, now) = manual_clock(date(2024, 3, 5).at(14, 0, 0, 0));
        let writer = HourlyFileWriter::with_clock(resolver_in(tmp.path()), clock).unwrap();

        let blocker = tmp.path().join("Log/2024-03-05T15:00.gin.log");
        fs::create_dir(&blocker).unwrap();
        *now.lock().unwrap() = date(2024, 3, 5).at(15, 5, 0, 0);

        writer.make_writer().write_all(b"to stderr\n").unwrap();
        assert!(writer.is_degraded());

        // The failed hour stays on stderr even once the path is free again
        fs::remove_dir(&blocker).unwrap();
        *now.lock().unwrap() = date(2024, 3, 5).at(15, 30, 0, 0);
        writer.make_writer().write_all(b"still stderr\n").unwrap();
        assert!(writer.is_degraded());
        assert!(!blocker.exists());

        *now.lock().unwrap() = date(2024, 3, 5).at(16, 5, 0, 0);
        writer.make_writer().write_all(b"back\n").unwrap();

        let next = tmp.path().join("Log/2024-03-05T16:00.gin.log");
        assert_eq!(fs::read_to_string(&next).unwrap(), "back\n");
        assert_eq!(writer.current_path(), Some(next));
        assert!(!writer.is_degraded());
    }

    #[test]
    fn test_unrenderable_bucket_format_fails_setup() {
        let tmp = tempdir().unwrap();
        let (clock, _now) = manual_clock(date(2024, 3, 5).at(14, 0, 0, 0));
        let resolver = resolver_in(tmp.path()).with_bucket_format("%Y-%m-%dT%H%z");

        let result = HourlyFileWriter::with_clock(resolver, clock);
        assert!(matches!(
            result,
            Err(LoggerError::BucketFormatFailed { .. })
        ));
    }
}

#[cfg(test)]
mod setup_tests {
    use super::*;
    use crate::logger::{LoggerConfig, SetupFailurePolicy, open_sink, setup_log_sink};
    use tempfile::tempdir;

    fn broken_resolver(tmp: &Path) -> LogFileResolver {
        LogFileResolver::default()
            .with_working_dir(tmp.join("missing/nested"))
            .with_executable_dir(tmp)
    }

    #[test]
    fn test_abort_policy_propagates() {
        let tmp = tempdir().unwrap();
        let result = open_sink(broken_resolver(tmp.path()), SetupFailurePolicy::Abort);
        assert!(matches!(
            result,
            Err(LoggerError::DirectoryCreateFailed { .. })
        ));
    }

    #[test]
    fn test_console_only_policy_degrades() {
        let tmp = tempdir().unwrap();
        let result = open_sink(broken_resolver(tmp.path()), SetupFailurePolicy::ConsoleOnly);
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_open_sink_success() {
        let tmp = tempdir().unwrap();
        let sink = open_sink(resolver_in(tmp.path()), SetupFailurePolicy::Abort).unwrap();
        assert!(sink.is_some());
        assert!(tmp.path().join("Log").is_dir());
    }

    #[test]
    fn test_disabled_file_output_has_no_sink() {
        let mut config = LoggerConfig::default();
        config.file.enabled = false;
        assert!(setup_log_sink(&config).unwrap().is_none());
    }
}

#[cfg(test)]
mod line_logger_tests {
    use super::*;
    use crate::logger::line::LineFormat;
    use tempfile::tempdir;

    #[test]
    fn test_lines_land_in_hourly_file() {
        let tmp = tempdir().unwrap();
        let (clock, _now) = manual_clock(date(2024, 3, 5).at(14, 7, 9, 0));
        let sink = HourlyFileWriter::with_clock(resolver_in(tmp.path()), clock.clone()).unwrap();

        let logger = LineLogger::new(Mode::Production)
            .with_clock(clock)
            .with_sink(Some(sink));
        logger.log(&["Error on bind: ", "boom"]);
        logger.log(&[String::from("second")]);

        let content = fs::read_to_string(tmp.path().join("Log/2024-03-05T14:00.gin.log")).unwrap();
        assert_eq!(
            content,
            "{'dateStamp':'2024-03-05 14:07:09','message':'Error on bind: boom'}\n\
             {'dateStamp':'2024-03-05 14:07:09','message':'second'}\n"
        );
    }

    #[test]
    fn test_file_sink_active_follows_writer_state() {
        let tmp = tempdir().unwrap();
        let (clock, now) = manual_clock(date(2024, 3, 5).at(14, 0, 0, 0));
        let sink = HourlyFileWriter::with_clock(resolver_in(tmp.path()), clock.clone())
            .unwrap()
            .with_recovery(RecoveryStrategy::SilentDrop, None);
        let logger = LineLogger::new(Mode::Production)
            .with_clock(clock)
            .with_sink(Some(sink));
        assert!(logger.file_sink_active());

        fs::create_dir(tmp.path().join("Log/2024-03-05T15:00.gin.log")).unwrap();
        *now.lock().unwrap() = date(2024, 3, 5).at(15, 0, 0, 0);
        logger.log(&["lost"]);
        assert!(!logger.file_sink_active());

        *now.lock().unwrap() = date(2024, 3, 5).at(16, 0, 0, 0);
        logger.log(&["found"]);
        assert!(logger.file_sink_active());
        assert!(!LineLogger::new(Mode::Test).file_sink_active());
    }

    #[test]
    fn test_json_lines_in_file() {
        let tmp = tempdir().unwrap();
        let (clock, _now) = manual_clock(date(2024, 3, 5).at(14, 7, 9, 0));
        let sink = HourlyFileWriter::with_clock(resolver_in(tmp.path()), clock.clone()).unwrap();

        let logger = LineLogger::new(Mode::Test)
            .with_clock(clock)
            .with_format(LineFormat::Json)
            .with_sink(Some(sink));
        logger.log(&["ok"]);

        let content = fs::read_to_string(tmp.path().join("Log/2024-03-05T14:00.gin.log")).unwrap();
        assert_eq!(content, "{\"dateStamp\":\"2024-03-05 14:07:09\",\"message\":\"ok\"}\n");
    }

    #[test]
    fn test_concurrent_lines_stay_whole() {
        let tmp = tempdir().unwrap();
        let (clock, _now) = manual_clock(date(2024, 3, 5).at(14, 0, 0, 0));
        let sink = HourlyFileWriter::with_clock(resolver_in(tmp.path()), clock.clone()).unwrap();
        let logger = LineLogger::new(Mode::Production)
            .with_clock(clock)
            .with_sink(Some(sink));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let logger = logger.clone();
                std::thread::spawn(move || {
                    for i in 0..50 {
                        logger.log(&[format!("thread {} ", t), format!("line {}", i)]);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let content = fs::read_to_string(tmp.path().join("Log/2024-03-05T14:00.gin.log")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 400);
        for line in lines {
            assert!(line.starts_with("{'dateStamp':'2024-03-05 14:00:00','message':'thread "));
            assert!(line.ends_with("'}"));
        }
    }
}
