// ==========================================
// 岗亭值勤轮换系统 - 配置层
// ==========================================
// 职责: 轮换/排班/提醒参数管理
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod rotation_config_trait;
pub mod settings;

// 重导出核心配置管理器
pub use config_manager::{config_keys, limits, ConfigManager};
pub use rotation_config_trait::RotationConfigReader;
pub use settings::RotationSettings;
