// ==========================================
// 岗亭值勤轮换系统 - 排班查询
// ==========================================
// 职责: 当前/下一时段、成员值勤列表、值勤提醒窗口
// 只读: 所有查询不修改排班表；未命中返回 None/空，不报错
// ==========================================

use crate::domain::member::MemberKey;
use crate::domain::schedule::{AlertCheck, Assignment, Schedule, Slot};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// 当前时段查询
// ==========================================

/// 时段定位结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotLookup<'a> {
    /// now 落在该时段内
    Active(&'a Slot),
    /// 没有时段包含 now，回退到排班表第一个时段
    Fallback(&'a Slot),
}

impl<'a> SlotLookup<'a> {
    pub fn slot(&self) -> &'a Slot {
        match *self {
            SlotLookup::Active(slot) | SlotLookup::Fallback(slot) => slot,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SlotLookup::Active(_))
    }
}

/// 定位 now 所在时段
///
/// # 返回
/// - Active: 第一个满足 start ≤ now < end 的时段
/// - Fallback: 无匹配时的第一个时段
/// - None: 排班表为空
pub fn locate_slot(schedule: &Schedule, now: NaiveDateTime) -> Option<SlotLookup<'_>> {
    schedule
        .iter()
        .find(|slot| slot.contains(now))
        .map(SlotLookup::Active)
        .or_else(|| schedule.first().map(SlotLookup::Fallback))
}

/// 当前时段，无匹配时回退到第一个时段
pub fn find_current_or_next(schedule: &Schedule, now: NaiveDateTime) -> Option<&Slot> {
    locate_slot(schedule, now).map(|lookup| lookup.slot())
}

// ==========================================
// 成员值勤查询
// ==========================================

/// 成员出现的全部时段（排班表顺序）
pub fn find_member_upcoming<'a>(
    schedule: &'a Schedule,
    member: &MemberKey,
) -> Vec<(&'a Slot, &'a Assignment)> {
    schedule
        .iter()
        .flat_map(|slot| {
            slot.assignments
                .iter()
                .filter(move |a| a.member.matches(member))
                .map(move |a| (slot, a))
        })
        .collect()
}

// ==========================================
// 值勤提醒
// ==========================================

/// 提醒窗口: [start - lead, start - lead + width)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertWindow {
    pub lead_minutes: i64,
    pub width_seconds: i64,
}

impl Default for AlertWindow {
    fn default() -> Self {
        Self {
            lead_minutes: 30,
            width_seconds: 60,
        }
    }
}

impl AlertWindow {
    pub fn new(lead_minutes: i64, width_seconds: i64) -> Self {
        Self {
            lead_minutes,
            width_seconds,
        }
    }

    /// 提醒时刻；超出时间范围时为 None
    pub fn alert_time(&self, slot_start: NaiveDateTime) -> Option<NaiveDateTime> {
        Duration::try_minutes(self.lead_minutes)
            .and_then(|lead| slot_start.checked_sub_signed(lead))
    }

    /// 窗口无法表示时不命中
    pub fn contains(&self, slot_start: NaiveDateTime, now: NaiveDateTime) -> bool {
        let Some(alert_time) = self.alert_time(slot_start) else {
            return false;
        };
        let window_end = Duration::try_seconds(self.width_seconds)
            .and_then(|width| alert_time.checked_add_signed(width));

        match window_end {
            Some(end) => alert_time <= now && now < end,
            None => false,
        }
    }
}

/// 提醒对象
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertAudience {
    /// 不按成员过滤
    Anyone,
    /// 只对包含该成员的时段提醒
    Member(MemberKey),
    /// 未识别身份: 永不提醒
    Anonymous,
}

impl From<Option<MemberKey>> for AlertAudience {
    fn from(identity: Option<MemberKey>) -> Self {
        match identity {
            Some(key) => AlertAudience::Member(key),
            None => AlertAudience::Anonymous,
        }
    }
}

/// 值勤提醒判定
///
/// 只返回排班表顺序中第一个命中的时段。
/// 窗口宽度默认 60 秒，调用方轮询间隔超过窗口宽度可能漏掉提醒。
pub fn alert_due(
    schedule: &Schedule,
    now: NaiveDateTime,
    window: &AlertWindow,
    audience: &AlertAudience,
) -> AlertCheck {
    let member = match audience {
        AlertAudience::Anonymous => return AlertCheck::none(),
        AlertAudience::Anyone => None,
        AlertAudience::Member(key) => Some(key),
    };

    schedule
        .iter()
        .filter(|slot| window.contains(slot.start, now))
        .find(|slot| member.map_or(true, |key| slot.has_member(key)))
        .map(|slot| AlertCheck {
            should_alert: true,
            slot: Some(slot.clone()),
            alert_time: window.alert_time(slot.start),
        })
        .unwrap_or_else(AlertCheck::none)
}
