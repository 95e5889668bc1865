use fleetdash::config::LoggingConfig;
use fleetdash::logger;
use log::{Level, Log, Record};

fn temp_log(name: &str) -> std::path::PathBuf {
    std::env::temp_dir()
        .join(format!("fleetdash-test-{}", std::process::id()))
        .join(name)
}

#[test]
fn test_disabled_logging_installs_nothing() {
    let config = LoggingConfig::default();
    assert!(!config.enabled);
    assert_eq!(logger::init(&config).unwrap(), None);
}

#[test]
fn test_level_parsing() {
    let mut config = LoggingConfig::default();
    assert_eq!(config.level_filter().unwrap(), log::LevelFilter::Info);

    config.level = "TRACE".to_string();
    assert_eq!(config.level_filter().unwrap(), log::LevelFilter::Trace);

    config.level = "verbose".to_string();
    assert!(config.level_filter().is_err());
}

#[test]
fn test_dispatch_writes_formatted_records() {
    let path = temp_log("dispatch.log");
    let config = LoggingConfig {
        enabled: true,
        level: "debug".to_string(),
    };

    let (level, log) = logger::build_dispatch(&config, &path).unwrap().into_log();
    assert_eq!(level, log::LevelFilter::Debug);

    log.log(
        &Record::builder()
            .args(format_args!("Fetch #1 page 1"))
            .level(Level::Debug)
            .target("fleetdash::orchestrator")
            .build(),
    );
    log.log(
        &Record::builder()
            .args(format_args!("connection pool noise"))
            .level(Level::Debug)
            .target("hyper")
            .build(),
    );
    log.flush();

    let content = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert!(content.contains("DEBUG fleetdash::orchestrator] Fetch #1 page 1"));
    assert!(!content.contains("connection pool noise"));
}

#[test]
fn test_log_file_path() {
    let path = logger::get_log_file_path().unwrap();
    assert!(path.ends_with("fleetdash/fleetdash.log"));
}
