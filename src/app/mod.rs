// ==========================================
// 岗亭值勤轮换系统 - 应用层
// ==========================================
// 职责: 组装配置与查询API，提供提醒轮询
// ==========================================

pub mod alert_poller;
pub mod state;

// 重导出
pub use alert_poller::AlertPoller;
pub use state::{get_default_db_path, AppState};
