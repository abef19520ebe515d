// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证配置读取、默认值回退、快照恢复
// ==========================================

mod test_helpers;

use duty_rota::config::{config_keys, ConfigManager, RotationConfigReader, RotationSettings};
use duty_rota::{AlertWindow, RotationPolicy};
use std::sync::{Arc, Mutex};
use test_helpers::{create_test_db, insert_test_config, open_test_connection};

#[tokio::test]
async fn test_config_manager_creation() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    let config_manager = ConfigManager::new(&db_path);
    assert!(
        config_manager.is_ok(),
        "ConfigManager should be created successfully"
    );
}

#[tokio::test]
async fn test_missing_config_uses_defaults() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    let settings = config_manager.load_settings().await.unwrap();

    assert_eq!(settings, RotationSettings::default());
    assert_eq!(settings.policy, RotationPolicy::GroupCycle);
    assert_eq!(settings.start_day_offset, 1);
    assert_eq!(settings.menu_days, 4);
    assert_eq!(settings.lookup_days, 30);
    assert_eq!(settings.alert_window, AlertWindow::new(30, 60));
    assert_eq!(settings.poll_interval_seconds, 60);
    assert_eq!(settings.roster_path, "eleves.xlsx");
    assert_eq!(settings.notices_path, "alertes.xlsx");
    assert!(!settings.poll_may_miss_alerts());
}

#[tokio::test]
async fn test_stored_config_is_read() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_test_config(
        &conn,
        &[
            (config_keys::ROTATION_POLICY, "member_fairness"),
            (config_keys::GROUP_START_OFFSET, "2"),
            (config_keys::START_DAY_OFFSET, "0"),
            (config_keys::MENU_DAYS, "7"),
            (config_keys::ALERT_LEAD_MINUTES, "15"),
            (config_keys::ALERT_WINDOW_SECONDS, "30"),
            (config_keys::POLL_INTERVAL_SECONDS, "45"),
            (config_keys::ROSTER_PATH, "  data/roster.csv "),
        ],
    )
    .expect("Failed to insert test config");

    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");
    let settings = config_manager.load_settings().await.unwrap();

    assert_eq!(settings.policy, RotationPolicy::MemberFairness);
    assert_eq!(settings.group_start_offset, 2);
    assert_eq!(settings.start_day_offset, 0);
    assert_eq!(settings.menu_days, 7);
    assert_eq!(settings.alert_window, AlertWindow::new(15, 30));
    assert_eq!(settings.poll_interval_seconds, 45);
    assert_eq!(settings.roster_path, "data/roster.csv");
    assert!(settings.poll_may_miss_alerts());
}

#[tokio::test]
async fn test_malformed_values_fall_back_to_defaults() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_test_config(
        &conn,
        &[
            (config_keys::GROUP_START_OFFSET, "-1"),
            (config_keys::LOOKUP_DAYS, "thirty"),
            (config_keys::ALERT_WINDOW_SECONDS, "0"),
            (config_keys::POLL_INTERVAL_SECONDS, "0"),
            (config_keys::ROTATION_POLICY, "weekly"),
        ],
    )
    .expect("Failed to insert test config");

    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    assert_eq!(config_manager.get_group_start_offset().await.unwrap(), 0);
    assert_eq!(config_manager.get_lookup_days().await.unwrap(), 30);
    assert_eq!(
        config_manager.get_alert_window().await.unwrap(),
        AlertWindow::new(30, 60)
    );
    assert_eq!(config_manager.get_poll_interval_seconds().await.unwrap(), 1);
    assert_eq!(
        config_manager.get_rotation_policy().await.unwrap(),
        RotationPolicy::GroupCycle
    );
}

#[tokio::test]
async fn test_set_value_and_snapshot_restore() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    config_manager
        .set_config_value(config_keys::ROTATION_POLICY, "b")
        .unwrap();
    config_manager
        .set_config_value(config_keys::MENU_DAYS, "2")
        .unwrap();
    let snapshot = config_manager.get_config_snapshot().unwrap();

    config_manager
        .set_config_value(config_keys::ROTATION_POLICY, "a")
        .unwrap();
    assert_eq!(
        config_manager.get_rotation_policy().await.unwrap(),
        RotationPolicy::GroupCycle
    );

    let restored = config_manager.restore_config_from_snapshot(&snapshot).unwrap();
    assert_eq!(restored, 2);
    assert_eq!(
        config_manager.get_rotation_policy().await.unwrap(),
        RotationPolicy::MemberFairness
    );
    assert_eq!(config_manager.get_menu_days().await.unwrap(), 2);
}

#[tokio::test]
async fn test_from_shared_connection() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");

    let config_manager = ConfigManager::from_connection(Arc::new(Mutex::new(conn)))
        .expect("Failed to create ConfigManager");
    config_manager.ensure_schema().unwrap();

    config_manager
        .set_config_value(config_keys::NOTICES_PATH, "notes.csv")
        .unwrap();
    assert_eq!(config_manager.get_notices_path().await.unwrap(), "notes.csv");
}
