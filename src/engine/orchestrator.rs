// ==========================================
// 岗亭值勤轮换系统 - 引擎编排器
// ==========================================
// 用途: 名册构建 → 时段网格 → 轮换分派
// 纯计算: 相同输入得到结构相同的排班表，调用之间不保留状态
// ==========================================

use crate::domain::member::MemberRecord;
use crate::domain::roster::{Roster, RosterBuild};
use crate::domain::schedule::Schedule;
use crate::engine::roster_builder::build_roster;
use crate::engine::rotation::RotationEngine;
use crate::engine::slot_generator::generate_slots;
use crate::engine::strategy::RotationPolicy;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// ==========================================
// ScheduleRequest - 排班参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub start_date: NaiveDate,
    pub days: u32,
    pub group_start_offset: usize,
    pub policy: RotationPolicy,
}

impl ScheduleRequest {
    pub fn new(start_date: NaiveDate, days: u32) -> Self {
        Self {
            start_date,
            days,
            group_start_offset: 0,
            policy: RotationPolicy::default(),
        }
    }

    pub fn with_offset(mut self, group_start_offset: usize) -> Self {
        self.group_start_offset = group_start_offset;
        self
    }

    pub fn with_policy(mut self, policy: RotationPolicy) -> Self {
        self.policy = policy;
        self
    }
}

// ==========================================
// ScheduleResult - 排班结果
// ==========================================
#[derive(Debug, Clone)]
pub struct ScheduleResult {
    pub build: RosterBuild,
    pub schedule: Schedule,
}

// ==========================================
// ScheduleOrchestrator - 引擎编排器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleOrchestrator;

impl ScheduleOrchestrator {
    pub fn new() -> Self {
        Self
    }

    /// 生成排班表
    ///
    /// # 规则
    /// - 名册为空或无可轮换组 → 空排班表
    /// - 否则长度 = days × 6
    pub fn generate_schedule(&self, roster: &Roster, request: &ScheduleRequest) -> Schedule {
        if roster.is_empty() {
            debug!("名册为空，返回空排班表");
            return Schedule::empty();
        }

        let frames = generate_slots(request.start_date, request.days);
        let engine = RotationEngine::new(roster, request.group_start_offset, request.policy);
        let (schedule, state) = engine.assign(&frames);

        info!(
            start_date = %request.start_date,
            days = request.days,
            policy = %request.policy,
            group_start_offset = request.group_start_offset,
            groups = engine.group_ids().len(),
            slots = schedule.len(),
            tracked_members = state.tracked_members(),
            "排班生成完成"
        );

        schedule
    }

    /// 从原始记录生成排班表（同时返回名册诊断）
    pub fn generate_from_records(
        &self,
        records: &[MemberRecord],
        request: &ScheduleRequest,
    ) -> ScheduleResult {
        let build = build_roster(records);
        let schedule = self.generate_schedule(&build.roster, request);
        ScheduleResult { build, schedule }
    }
}
