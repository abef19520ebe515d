// ==========================================
// 岗亭值勤轮换系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite（配置）+ 表格名册
// 系统定位: 值勤轮换排班与提醒
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 名册构建、时段网格、轮换分派、查询
pub mod engine;

// 导入层 - 外部表格数据
pub mod importer;

// 配置层 - 轮换参数
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 查询接口
pub mod api;

// 应用层 - 状态组装与提醒轮询
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DiagnosticLevel, PostId};

// 领域实体
pub use domain::{
    AlertCheck, Assignment, Member, MemberKey, MemberRecord, Notice, Roster, RosterBuild,
    RosterDiagnostic, Schedule, Slot, SlotFrame,
};

// 引擎
pub use engine::{
    AlertAudience, AlertWindow, AlternationState, RotationEngine, RotationPolicy,
    ScheduleOrchestrator, ScheduleRequest,
};

// 配置
pub use config::{ConfigManager, RotationConfigReader, RotationSettings};

// API
pub use api::{ApiError, ApiResult, DutyApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "岗亭值勤轮换系统";
