// ==========================================
// 岗亭值勤轮换系统 - 排班领域模型
// ==========================================
// 职责: 时段网格、值勤时段、成员分派、排班表
// 红线: 排班表生成后不可变（只读查询）
// ==========================================

use crate::domain::member::{Member, MemberKey};
use crate::domain::types::PostId;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// 每日第一个时段的开始小时
pub const FIRST_SLOT_HOUR: u32 = 6;

/// 时段长度（小时）
pub const SLOT_HOURS: i64 = 2;

/// 每日时段数（06:00 - 18:00）
pub const SLOTS_PER_DAY: usize = 6;

// ==========================================
// SlotFrame - 时段网格（未分派）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotFrame {
    pub index: usize, // 0 起始的全局序号 = day * 6 + hour_offset
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl SlotFrame {
    pub fn contains(&self, now: NaiveDateTime) -> bool {
        self.start <= now && now < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

// ==========================================
// Assignment - 成员分派
// ==========================================
// on_duty = (post == slot.active_post)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub member: Member,
    pub post: PostId,
    pub on_duty: bool,
}

// ==========================================
// Slot - 值勤时段
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub index: usize,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub group: u32,
    pub cycle: usize,         // 已完成的全组轮次（0 起始）
    pub active_post: PostId,
    pub assignments: Vec<Assignment>,
}

impl Slot {
    pub fn contains(&self, now: NaiveDateTime) -> bool {
        self.start <= now && now < self.end
    }

    pub fn assignment_for(&self, key: &MemberKey) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.member.matches(key))
    }

    pub fn has_member(&self, key: &MemberKey) -> bool {
        self.assignment_for(key).is_some()
    }
}

// ==========================================
// Schedule - 排班表
// ==========================================
// 按 start 升序；长度 = days × 6
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    slots: Vec<Slot>,
}

impl Schedule {
    pub fn new(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn first(&self) -> Option<&Slot> {
        self.slots.first()
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Slot;
    type IntoIter = std::slice::Iter<'a, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}

// ==========================================
// AlertCheck - 值勤提醒判定结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertCheck {
    pub should_alert: bool,
    pub slot: Option<Slot>,
    pub alert_time: Option<NaiveDateTime>,
}

impl AlertCheck {
    pub fn none() -> Self {
        Self {
            should_alert: false,
            slot: None,
            alert_time: None,
        }
    }
}
