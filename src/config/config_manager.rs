// ==========================================
// 岗亭值勤轮换系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// 规则: 配置缺失 → 默认值；配置值格式错误 → 默认值 + 告警日志
// ==========================================

use crate::config::rotation_config_trait::RotationConfigReader;
use crate::db::{configure_sqlite_connection, init_config_schema, open_sqlite_connection};
use crate::engine::query::AlertWindow;
use crate::engine::strategy::RotationPolicy;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例（配置表不存在时自动创建）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        init_config_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            configure_sqlite_connection(&conn_guard)?;
            init_config_schema(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 确保配置表存在（幂等）
    pub fn ensure_schema(&self) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        init_config_schema(&conn)?;
        Ok(())
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;

        debug!(key = %key, value = %value, "配置已更新");
        Ok(())
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_config_value(key)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string()))
    }

    /// 读取并解析配置值；解析失败时回退默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> Result<T, Box<dyn Error>>
    where
        T: FromStr + Display,
    {
        let raw = match self.get_config_value(key)? {
            Some(v) if !v.trim().is_empty() => v,
            _ => return Ok(default),
        };

        match raw.trim().parse::<T>() {
            Ok(value) => Ok(value),
            Err(_) => {
                warn!(key = %key, value = %raw, default = %default, "配置值格式错误，使用默认值");
                Ok(default)
            }
        }
    }

    /// 读取并解析配置值；解析失败或超出范围时回退默认值
    fn get_bounded_or_default<T>(
        &self,
        key: &str,
        default: T,
        range: RangeInclusive<T>,
    ) -> Result<T, Box<dyn Error>>
    where
        T: FromStr + Display + PartialOrd + Copy,
    {
        let value = self.get_parsed_or_default(key, default)?;
        if range.contains(&value) {
            return Ok(value);
        }

        warn!(
            key = %key,
            value = %value,
            min = %range.start(),
            max = %range.end(),
            default = %default,
            "配置值超出范围，使用默认值"
        );
        Ok(default)
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn.prepare(
            "SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&json!(config_map))?)
    }

    /// 从配置快照恢复配置
    ///
    /// # 返回
    /// - Ok(usize): 恢复的配置项数量
    pub fn restore_config_from_snapshot(
        &self,
        snapshot_json: &str,
    ) -> Result<usize, Box<dyn Error>> {
        let config_map: BTreeMap<String, String> = serde_json::from_str(snapshot_json)?;

        let mut conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        let tx = conn.transaction()?;

        let mut count = 0;
        for (key, value) in config_map.iter() {
            count += tx.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
                 ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
                params![key, value],
            )?;
        }

        tx.commit()?;
        Ok(count)
    }
}

// ==========================================
// RotationConfigReader Trait 实现
// ==========================================
#[async_trait]
impl RotationConfigReader for ConfigManager {
    // ===== 轮换配置 =====

    async fn get_rotation_policy(&self) -> Result<RotationPolicy, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::ROTATION_POLICY, "group_cycle")?;
        match value.parse::<RotationPolicy>() {
            Ok(policy) => Ok(policy),
            Err(e) => {
                warn!(value = %value, error = %e, "轮换策略配置无效，使用 group_cycle");
                Ok(RotationPolicy::GroupCycle)
            }
        }
    }

    async fn get_group_start_offset(&self) -> Result<usize, Box<dyn Error>> {
        self.get_parsed_or_default(config_keys::GROUP_START_OFFSET, 0usize)
    }

    // ===== 排班范围配置 =====

    async fn get_start_day_offset(&self) -> Result<i64, Box<dyn Error>> {
        let max = i64::from(limits::MAX_HORIZON_DAYS);
        self.get_bounded_or_default(config_keys::START_DAY_OFFSET, 1i64, -max..=max)
    }

    async fn get_menu_days(&self) -> Result<u32, Box<dyn Error>> {
        self.get_bounded_or_default(config_keys::MENU_DAYS, 4u32, 1..=limits::MAX_HORIZON_DAYS)
    }

    async fn get_lookup_days(&self) -> Result<u32, Box<dyn Error>> {
        self.get_bounded_or_default(config_keys::LOOKUP_DAYS, 30u32, 1..=limits::MAX_HORIZON_DAYS)
    }

    // ===== 提醒配置 =====

    async fn get_alert_window(&self) -> Result<AlertWindow, Box<dyn Error>> {
        let defaults = AlertWindow::default();
        let lead_minutes = self.get_bounded_or_default(
            config_keys::ALERT_LEAD_MINUTES,
            defaults.lead_minutes,
            0..=limits::MAX_ALERT_LEAD_MINUTES,
        )?;
        let width_seconds = self.get_bounded_or_default(
            config_keys::ALERT_WINDOW_SECONDS,
            defaults.width_seconds,
            1..=limits::MAX_SECONDS,
        )?;

        Ok(AlertWindow::new(lead_minutes, width_seconds))
    }

    async fn get_poll_interval_seconds(&self) -> Result<u64, Box<dyn Error>> {
        let value = self.get_bounded_or_default(
            config_keys::POLL_INTERVAL_SECONDS,
            60u64,
            0..=limits::MAX_SECONDS as u64,
        )?;
        Ok(value.max(1))
    }

    // ===== 数据源配置 =====

    async fn get_roster_path(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::ROSTER_PATH, "eleves.xlsx")
    }

    async fn get_notices_path(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::NOTICES_PATH, "alertes.xlsx")
    }
}

// ==========================================
// 配置取值范围
// ==========================================
pub mod limits {
    /// 排班天数 / 起始日偏移上限
    pub const MAX_HORIZON_DAYS: u32 = 366;
    /// 提醒提前量上限（一天）
    pub const MAX_ALERT_LEAD_MINUTES: i64 = 24 * 60;
    /// 提醒窗口 / 轮询间隔上限（一天）
    pub const MAX_SECONDS: i64 = 24 * 60 * 60;
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 轮换
    pub const ROTATION_POLICY: &str = "rotation.policy";
    pub const GROUP_START_OFFSET: &str = "rotation.group_start_offset";

    // 排班范围
    pub const START_DAY_OFFSET: &str = "schedule.start_day_offset";
    pub const MENU_DAYS: &str = "schedule.menu_days";
    pub const LOOKUP_DAYS: &str = "schedule.lookup_days";

    // 提醒
    pub const ALERT_LEAD_MINUTES: &str = "alert.lead_minutes";
    pub const ALERT_WINDOW_SECONDS: &str = "alert.window_seconds";
    pub const POLL_INTERVAL_SECONDS: &str = "alert.poll_interval_seconds";

    // 数据源
    pub const ROSTER_PATH: &str = "roster.path";
    pub const NOTICES_PATH: &str = "notices.path";
}
