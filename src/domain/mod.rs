// ==========================================
// 岗亭值勤轮换系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod member;
pub mod notice;
pub mod roster;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use member::{find_member, Member, MemberKey, MemberRecord};
pub use notice::Notice;
pub use roster::{DiagnosticKind, Roster, RosterBuild, RosterDiagnostic};
pub use schedule::{
    AlertCheck, Assignment, Schedule, Slot, SlotFrame, FIRST_SLOT_HOUR, SLOTS_PER_DAY, SLOT_HOURS,
};
pub use types::{DiagnosticLevel, PostId};
