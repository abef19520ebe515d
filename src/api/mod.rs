// ==========================================
// 岗亭值勤轮换系统 - API 层
// ==========================================
// 职责: 提供值勤查询接口,供命令行与提醒轮询调用
// ==========================================

pub mod duty_api;
pub mod error;

// 重导出核心类型
pub use duty_api::{
    AlertCheckView, CurrentShiftView, DutyApi, MemberDutyView, MemberView, PersonnelView,
    RosterReport, SlotView,
};
pub use error::{ApiError, ApiResult};
