use crate::engine::query::AlertWindow;
use crate::engine::strategy::RotationPolicy;
use serde::{Deserialize, Serialize};

/// 轮换运行参数（由 config_kv 汇总而来）
///
/// 存储位置：config_kv（scope_id='global'），键见 `config_keys`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationSettings {
    /// 岗亭轮换策略
    pub policy: RotationPolicy,

    /// 上线时已处于轮换中的组偏移
    pub group_start_offset: usize,

    /// 排班锚点 = (今天 + N 天) 06:00
    pub start_day_offset: i64,

    /// 排班视图天数
    pub menu_days: u32,

    /// 当前时段/提醒查询所用天数
    pub lookup_days: u32,

    /// 提醒窗口
    pub alert_window: AlertWindow,

    /// 提醒轮询间隔（秒）
    pub poll_interval_seconds: u64,

    /// 名册表格路径
    pub roster_path: String,

    /// 通知表格路径
    pub notices_path: String,
}

impl Default for RotationSettings {
    fn default() -> Self {
        Self {
            policy: RotationPolicy::GroupCycle,
            group_start_offset: 0,
            start_day_offset: 1,
            menu_days: 4,
            lookup_days: 30,
            alert_window: AlertWindow::default(),
            poll_interval_seconds: 60,
            roster_path: "eleves.xlsx".to_string(),
            notices_path: "alertes.xlsx".to_string(),
        }
    }
}

impl RotationSettings {
    /// 轮询间隔是否可能漏掉提醒窗口（间隔 > 窗口宽度）
    pub fn poll_may_miss_alerts(&self) -> bool {
        self.poll_interval_seconds as i64 > self.alert_window.width_seconds
    }
}
