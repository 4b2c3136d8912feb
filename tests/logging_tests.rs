use battleship_sim::{init_logging, parse_level, LOG_ENV};
use log::LevelFilter;

#[test]
fn test_level_parsing() {
    assert_eq!(LOG_ENV, "BATTLESHIP_SIM_LOG");
    assert_eq!(parse_level(None), LevelFilter::Info);
    assert_eq!(parse_level(Some("debug")), LevelFilter::Debug);
    assert_eq!(parse_level(Some(" TRACE ")), LevelFilter::Trace);
    assert_eq!(parse_level(Some("off")), LevelFilter::Off);
    assert_eq!(parse_level(Some("loud")), LevelFilter::Info);
    assert_eq!(parse_level(Some("")), LevelFilter::Info);
}

#[test]
fn test_logger_installs_once() {
    assert!(init_logging());
    assert!(!init_logging());
    log::info!("logger installed");
}
