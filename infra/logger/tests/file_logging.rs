use rebreak_logger::{LevelFilter, Logger};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn file_logging_writes_filtered_json_lines() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let logger = Logger::builder()
        .name("integration-file-logging")
        .console(false)
        .level(LevelFilter::INFO)
        .env_filter("file_logging=debug,noisy=off")
        .path(&log_dir)
        .rotation(Logger::parse_rotation("never")?)
        .max_files(2)
        .json()
        .init()?;
    assert!(logger.has_file_output());

    tracing::info!(tablet = "1200", "breakpoints resolved");
    tracing::debug!(mobile = "600", "boundary rewritten");
    tracing::info!(target: "noisy", "should be filtered out");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_files: Vec<_> = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .collect();
    assert_eq!(log_files.len(), 1, "a non-rotating appender writes a single file");
    assert_eq!(log_files[0].file_name().and_then(|name| name.to_str()), Some("integration-file-logging.log"));

    let contents = fs::read_to_string(&log_files[0])?;
    let line = contents.lines().next().expect("at least one log line");
    assert!(line.starts_with('{'), "file output should be JSON: {line}");
    assert!(contents.contains("breakpoints resolved"));
    assert!(contents.contains("boundary rewritten"));
    assert!(!contents.contains("should be filtered out"));

    Ok(())
}
