// ==========================================
// 岗亭值勤轮换系统 - 轮换配置读取 Trait
// ==========================================
// 职责: 定义排班/提醒所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::settings::RotationSettings;
use crate::engine::query::AlertWindow;
use crate::engine::strategy::RotationPolicy;
use async_trait::async_trait;
use std::error::Error;

// ==========================================
// RotationConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait RotationConfigReader: Send + Sync {
    // ===== 轮换配置 =====

    /// 获取岗亭轮换策略
    ///
    /// # 默认值
    /// - group_cycle
    async fn get_rotation_policy(&self) -> Result<RotationPolicy, Box<dyn Error>>;

    /// 获取组起始偏移（上线时已处于轮换中的组）
    ///
    /// # 默认值
    /// - 0
    async fn get_group_start_offset(&self) -> Result<usize, Box<dyn Error>>;

    // ===== 排班范围配置 =====

    /// 获取排班锚点的天数偏移（0 = 今天，1 = 明天）
    ///
    /// # 默认值
    /// - 1
    async fn get_start_day_offset(&self) -> Result<i64, Box<dyn Error>>;

    /// 获取排班视图天数
    ///
    /// # 默认值
    /// - 4
    async fn get_menu_days(&self) -> Result<u32, Box<dyn Error>>;

    /// 获取当前时段/提醒查询天数
    ///
    /// # 默认值
    /// - 30
    async fn get_lookup_days(&self) -> Result<u32, Box<dyn Error>>;

    // ===== 提醒配置 =====

    /// 获取提醒窗口（提前分钟数 + 窗口秒数）
    ///
    /// # 默认值
    /// - 30 分钟 / 60 秒
    async fn get_alert_window(&self) -> Result<AlertWindow, Box<dyn Error>>;

    /// 获取提醒轮询间隔（秒）
    ///
    /// # 默认值
    /// - 60
    async fn get_poll_interval_seconds(&self) -> Result<u64, Box<dyn Error>>;

    // ===== 数据源配置 =====

    /// 获取名册表格路径
    ///
    /// # 默认值
    /// - eleves.xlsx
    async fn get_roster_path(&self) -> Result<String, Box<dyn Error>>;

    /// 获取通知表格路径
    ///
    /// # 默认值
    /// - alertes.xlsx
    async fn get_notices_path(&self) -> Result<String, Box<dyn Error>>;

    /// 汇总全部配置
    async fn load_settings(&self) -> Result<RotationSettings, Box<dyn Error>> {
        let policy = self.get_rotation_policy().await?;
        let group_start_offset = self.get_group_start_offset().await?;
        let start_day_offset = self.get_start_day_offset().await?;
        let menu_days = self.get_menu_days().await?;
        let lookup_days = self.get_lookup_days().await?;
        let alert_window = self.get_alert_window().await?;
        let poll_interval_seconds = self.get_poll_interval_seconds().await?;
        let roster_path = self.get_roster_path().await?;
        let notices_path = self.get_notices_path().await?;

        Ok(RotationSettings {
            policy,
            group_start_offset,
            start_day_offset,
            menu_days,
            lookup_days,
            alert_window,
            poll_interval_seconds,
            roster_path,
            notices_path,
        })
    }
}
