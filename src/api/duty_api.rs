// ==========================================
// 岗亭值勤轮换系统 - 值勤查询 API
// ==========================================
// 职责: 排班视图、当前时段、值勤提醒、成员值勤、人员与通知
// 规则: 名册每次调用重新加载；加载失败按空名册处理（记录告警）
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::config::RotationSettings;
use crate::domain::member::MemberRecord;
use crate::domain::notice::Notice;
use crate::domain::schedule::{AlertCheck, Schedule, Slot};
use crate::domain::types::PostId;
use crate::engine::orchestrator::{ScheduleOrchestrator, ScheduleRequest};
use crate::engine::roster_builder::build_roster;
use crate::engine::slot_generator::schedule_anchor;
use crate::importer::roster_importer_trait::{NoticeSource, RosterSource};

mod personnel;
mod schedule_queries;

pub use personnel::{PersonnelView, RosterReport};

/// 时段显示格式: "Tue 10/02 06:00 - 08:00"
pub const SLOT_DISPLAY_START: &str = "%a %d/%m %H:%M";
pub const SLOT_DISPLAY_END: &str = "%H:%M";

// ==========================================
// 视图对象
// ==========================================

/// 时段内的成员
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberView {
    pub name: String,
    pub post: PostId,
    pub on_duty: bool,
}

/// 时段视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub index: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub display: String,
    pub group: u32,
    pub cycle: usize,
    pub active_post: PostId,
    pub members: Vec<MemberView>,
}

impl From<&Slot> for SlotView {
    fn from(slot: &Slot) -> Self {
        Self {
            index: slot.index,
            start: slot.start,
            end: slot.end,
            display: format!(
                "{} - {}",
                slot.start.format(SLOT_DISPLAY_START),
                slot.end.format(SLOT_DISPLAY_END)
            ),
            group: slot.group,
            cycle: slot.cycle,
            active_post: slot.active_post.clone(),
            members: slot
                .assignments
                .iter()
                .map(|a| MemberView {
                    name: a.member.name(),
                    post: a.post.clone(),
                    on_duty: a.on_duty,
                })
                .collect(),
        }
    }
}

/// 当前时段（is_active=false 表示没有时段包含 now，返回的是排班表第一个时段）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentShiftView {
    pub slot: SlotView,
    pub is_active: bool,
}

/// 值勤提醒
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertCheckView {
    pub should_alert: bool,
    pub slot: Option<SlotView>,
    pub alert_time: Option<NaiveDateTime>,
}

impl From<AlertCheck> for AlertCheckView {
    fn from(check: AlertCheck) -> Self {
        Self {
            should_alert: check.should_alert,
            slot: check.slot.as_ref().map(SlotView::from),
            alert_time: check.alert_time,
        }
    }
}

/// 成员的一次值勤
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDutyView {
    pub slot: SlotView,
    pub post: PostId,
    pub on_duty: bool,
}

// ==========================================
// DutyApi - 值勤查询 API
// ==========================================

/// 值勤查询API
///
/// 所有查询都是显式输入（名册、配置、now）的纯函数
pub struct DutyApi {
    roster_source: Arc<dyn RosterSource>,
    notice_source: Arc<dyn NoticeSource>,
    settings: RotationSettings,
    orchestrator: ScheduleOrchestrator,
}

impl DutyApi {
    /// 创建新的DutyApi实例
    pub fn new(
        roster_source: Arc<dyn RosterSource>,
        notice_source: Arc<dyn NoticeSource>,
        settings: RotationSettings,
    ) -> Self {
        Self {
            roster_source,
            notice_source,
            settings,
            orchestrator: ScheduleOrchestrator::new(),
        }
    }

    pub fn settings(&self) -> &RotationSettings {
        &self.settings
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    /// 加载名册记录；失败时返回空列表
    fn load_records(&self) -> Vec<MemberRecord> {
        match self.roster_source.load_records() {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "名册加载失败，按空名册处理");
                Vec::new()
            }
        }
    }

    /// 加载通知；失败时返回空列表
    fn load_notices(&self) -> Vec<Notice> {
        match self.notice_source.load_notices() {
            Ok(notices) => notices,
            Err(e) => {
                warn!(error = %e, "通知加载失败，按无通知处理");
                Vec::new()
            }
        }
    }

    /// 从锚点 (今天 + start_day_offset) 06:00 起生成 days 天的排班表
    fn schedule_for(&self, now: NaiveDateTime, days: u32) -> Schedule {
        let Some(anchor) = schedule_anchor(now, self.settings.start_day_offset) else {
            warn!(
                start_day_offset = self.settings.start_day_offset,
                "排班锚点超出日期范围，按空排班处理"
            );
            return Schedule::empty();
        };

        let records = self.load_records();
        let build = build_roster(&records);

        let request = ScheduleRequest::new(anchor, days)
            .with_offset(self.settings.group_start_offset)
            .with_policy(self.settings.policy);

        self.orchestrator.generate_schedule(&build.roster, &request)
    }
}
