// ==========================================
// 岗亭值勤轮换系统 - 时段网格生成
// ==========================================
// 规则: 每日 06:00 起 6 个 2 小时时段（至 18:00），共 days 天
// 18:00 → 次日 06:00 之间无时段
// 时段序号只由生成顺序决定，与当前时间无关
// ==========================================

use crate::domain::schedule::{SlotFrame, FIRST_SLOT_HOUR, SLOTS_PER_DAY, SLOT_HOURS};
use chrono::{Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// 预分配上限（天）
const MAX_PREALLOCATED_DAYS: u32 = 366;

/// 生成时段网格
///
/// # 参数
/// - `start_date`: 起始日期（时间部分忽略）
/// - `days`: 天数
///
/// # 返回
/// days × 6 个时段，按开始时间升序；日期超出可表示范围时提前截止
pub fn generate_slots(start_date: NaiveDate, days: u32) -> Vec<SlotFrame> {
    let mut frames = Vec::with_capacity((days.min(MAX_PREALLOCATED_DAYS) as usize) * SLOTS_PER_DAY);

    for day in 0..days {
        let Some(date) = start_date.checked_add_days(Days::new(u64::from(day))) else {
            break;
        };
        for hour_offset in 0..SLOTS_PER_DAY {
            let hour = FIRST_SLOT_HOUR + (hour_offset as u32) * (SLOT_HOURS as u32);
            let midnight = date.and_time(NaiveTime::MIN);
            let Some(start) = midnight.checked_add_signed(Duration::hours(hour as i64)) else {
                return frames;
            };
            let Some(end) = start.checked_add_signed(Duration::hours(SLOT_HOURS)) else {
                return frames;
            };
            frames.push(SlotFrame {
                index: day as usize * SLOTS_PER_DAY + hour_offset,
                start,
                end,
            });
        }
    }

    frames
}

/// 排班锚点: (today + offset_days) 06:00
///
/// # 返回
/// - None: 偏移后的日期超出可表示范围
pub fn schedule_anchor(now: NaiveDateTime, offset_days: i64) -> Option<NaiveDate> {
    let days = Days::new(offset_days.unsigned_abs());
    if offset_days >= 0 {
        now.date().checked_add_days(days)
    } else {
        now.date().checked_sub_days(days)
    }
}
