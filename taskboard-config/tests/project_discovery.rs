//! End-to-end configuration loading from the current directory

use serial_test::serial;
use std::fs;
use taskboard_config::{load_configuration, WeekStart, CONFIG_DIR_NAME};
use tempfile::TempDir;

#[test]
#[serial]
fn test_project_config_discovered_from_cwd() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join(CONFIG_DIR_NAME);
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("taskboard.yaml"),
        "seed_position: 1024.0\nweek_start: monday\n",
    )
    .unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp.path()).unwrap();
    let result = load_configuration();
    std::env::set_current_dir(original_dir).unwrap();

    let config = result.unwrap();
    assert_eq!(config.seed_position, 1024.0);
    assert_eq!(config.week_start, WeekStart::Monday);
}

#[test]
#[serial]
fn test_env_override_applies_without_files() {
    let temp = TempDir::new().unwrap();

    let original_dir = std::env::current_dir().unwrap();
    std::env::set_current_dir(temp.path()).unwrap();
    std::env::set_var("TASKBOARD_WEEK_START", "monday");
    let result = load_configuration();
    std::env::remove_var("TASKBOARD_WEEK_START");
    std::env::set_current_dir(original_dir).unwrap();

    assert_eq!(result.unwrap().week_start, WeekStart::Monday);
}
