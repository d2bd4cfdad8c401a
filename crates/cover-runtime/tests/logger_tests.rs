use cover_runtime::SessionLogger;
use log::{Level, LevelFilter, Log, Record};

fn emit(logger: &SessionLogger, level: Level, message: &str) {
    logger.log(
        &Record::builder()
            .level(level)
            .target("cover_core::export")
            .args(format_args!("{}", message))
            .build(),
    );
}

#[test]
fn test_keeps_only_recent_entries() {
    let logger = SessionLogger::new(3);
    for i in 0..5 {
        emit(&logger, Level::Info, &format!("message {}", i));
    }

    let entries = logger.entries();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].message, "message 2");
    assert_eq!(logger.latest_message().as_deref(), Some("message 4"));
    assert_eq!(entries[0].target, "cover_core::export");
}

#[test]
fn test_level_filter() {
    let logger = SessionLogger::new(10);
    emit(&logger, Level::Debug, "hidden");
    assert!(logger.entries().is_empty());

    let verbose = SessionLogger::new(10).with_level(LevelFilter::Debug);
    emit(&verbose, Level::Debug, "shown");
    emit(&verbose, Level::Trace, "still hidden");
    assert_eq!(verbose.entries().len(), 1);
}

#[test]
fn test_warnings_and_clear() {
    let logger = SessionLogger::new(10).with_echo(Level::Error);
    emit(&logger, Level::Info, "Export phase: Composite");
    emit(&logger, Level::Warn, "Skipping image that failed to decode");

    let warnings = logger.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].level, Level::Warn);

    // clones share the same buffer
    let handle = logger.clone();
    handle.clear();
    assert!(logger.entries().is_empty());
    assert_eq!(logger.latest_message(), None);
}
