// ==========================================
// 岗亭值勤轮换系统 - 引擎层
// ==========================================
// 职责: 名册构建、时段网格、轮换分派、排班查询
// 红线: 引擎不做 I/O，不因数据形态问题报错（只退化为更小/空的输出）
// ==========================================

pub mod orchestrator;
pub mod query;
pub mod roster_builder;
pub mod rotation;
pub mod slot_generator;
pub mod strategy;

// 重导出核心引擎
pub use orchestrator::{ScheduleOrchestrator, ScheduleRequest, ScheduleResult};
pub use query::{
    alert_due, find_current_or_next, find_member_upcoming, locate_slot, AlertAudience,
    AlertWindow, SlotLookup,
};
pub use roster_builder::{build_roster, parse_group, GroupParse};
pub use rotation::{AlternationState, GroupTurn, RotationEngine};
pub use slot_generator::{generate_slots, schedule_anchor};
pub use strategy::RotationPolicy;
