use stromvarsler::config::LoggingConfig;
use stromvarsler::logging::init_logging;

#[test]
fn file_logging_creates_rolled_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = LoggingConfig {
        level: "debug".to_string(),
        file: dir.path().join("stromvarsler.log").to_string_lossy().to_string(),
        backup_count: 2,
        console_output: false,
        file_output: true,
        json_format: true,
    };

    init_logging(&cfg).unwrap();
    tracing::info!("hello from the test");
    // Second call is a no-op
    init_logging(&cfg).unwrap();

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    assert!(
        names.iter().any(|n| n.starts_with("stromvarsler")),
        "no log file in {:?}",
        names
    );
}
