// ==========================================
// 岗亭值勤轮换系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::Arc;

use crate::api::DutyApi;
use crate::config::{ConfigManager, RotationConfigReader, RotationSettings};
use crate::importer::{SpreadsheetNoticeSource, SpreadsheetRosterSource};

/// 应用状态
///
/// 包含配置管理器和查询API实例
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 启动时加载的运行参数
    pub settings: RotationSettings,

    /// 值勤查询API
    pub duty_api: Arc<DutyApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 配置数据库文件路径
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    pub async fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let config_manager = Arc::new(
            ConfigManager::new(&db_path).map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        let settings = config_manager
            .load_settings()
            .await
            .map_err(|e| format!("无法加载配置: {}", e))?;

        if settings.poll_may_miss_alerts() {
            tracing::warn!(
                poll_interval_seconds = settings.poll_interval_seconds,
                window_seconds = settings.alert_window.width_seconds,
                "轮询间隔大于提醒窗口，可能漏掉提醒"
            );
        }

        let duty_api = Arc::new(DutyApi::new(
            Arc::new(SpreadsheetRosterSource::new(&settings.roster_path)),
            Arc::new(SpreadsheetNoticeSource::new(&settings.notices_path)),
            settings.clone(),
        ));

        tracing::info!(
            policy = %settings.policy,
            roster = %settings.roster_path,
            "AppState初始化完成"
        );

        Ok(Self {
            db_path,
            config_manager,
            settings,
            duty_api,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先级: 环境变量 DUTY_ROTA_DB_PATH → 用户数据目录 → 当前目录
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("DUTY_ROTA_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./duty_rota.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("duty-rota");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("duty_rota.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }

    #[tokio::test]
    async fn test_app_state_with_default_settings() {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap().to_string();

        let state = AppState::new(db_path).await.unwrap();

        assert_eq!(state.settings, RotationSettings::default());
        assert_eq!(state.duty_api.settings().menu_days, 4);
    }
}
