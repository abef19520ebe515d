use super::*;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::member::MemberKey;
use crate::engine::query::{alert_due, find_member_upcoming, locate_slot, AlertAudience};
use tracing::debug;

impl DutyApi {
    // ==========================================
    // 排班视图
    // ==========================================

    /// 排班视图（menu_days 天）
    ///
    /// # 返回
    /// - 名册为空时返回空列表
    pub fn planning(&self, now: NaiveDateTime) -> Vec<SlotView> {
        let schedule = self.schedule_for(now, self.settings.menu_days);
        schedule.iter().map(SlotView::from).collect()
    }

    // ==========================================
    // 当前时段
    // ==========================================

    /// 当前时段，无匹配时回退到第一个时段（lookup_days 天）
    ///
    /// # 返回
    /// - Some(view): is_active 区分"正在进行"与"回退"
    /// - None: 排班表为空
    pub fn current_shift(&self, now: NaiveDateTime) -> Option<CurrentShiftView> {
        let schedule = self.schedule_for(now, self.settings.lookup_days);

        locate_slot(&schedule, now).map(|lookup| CurrentShiftView {
            slot: SlotView::from(lookup.slot()),
            is_active: lookup.is_active(),
        })
    }

    // ==========================================
    // 值勤提醒
    // ==========================================

    /// 成员值勤提醒；identity 为 None 时永不提醒
    pub fn alert_check(&self, now: NaiveDateTime, identity: Option<MemberKey>) -> AlertCheckView {
        self.alert_check_for(now, &AlertAudience::from(identity))
    }

    /// 按提醒对象判定（AlertAudience::Anyone 用于岗亭值班终端）
    pub fn alert_check_for(&self, now: NaiveDateTime, audience: &AlertAudience) -> AlertCheckView {
        if *audience == AlertAudience::Anonymous {
            return AlertCheckView::from(AlertCheck::none());
        }

        let schedule = self.schedule_for(now, self.settings.lookup_days);
        let check = alert_due(&schedule, now, &self.settings.alert_window, audience);

        debug!(
            now = %now,
            should_alert = check.should_alert,
            slots = schedule.len(),
            "值勤提醒判定"
        );

        AlertCheckView::from(check)
    }

    // ==========================================
    // 成员值勤
    // ==========================================

    /// 成员在 lookup_days 天内的全部值勤（排班表顺序）
    pub fn member_duties(
        &self,
        now: NaiveDateTime,
        identity: &MemberKey,
    ) -> ApiResult<Vec<MemberDutyView>> {
        if identity.first_name.is_empty() || identity.last_name.is_empty() {
            return Err(ApiError::InvalidInput("姓名不能为空".to_string()));
        }

        let schedule = self.schedule_for(now, self.settings.lookup_days);

        Ok(find_member_upcoming(&schedule, identity)
            .into_iter()
            .map(|(slot, assignment)| MemberDutyView {
                slot: SlotView::from(slot),
                post: assignment.post.clone(),
                on_duty: assignment.on_duty,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::{StaticNoticeSource, StaticRosterSource};
    use chrono::NaiveDate;

    fn api() -> DutyApi {
        let records = vec![
            MemberRecord::new("Alice", "Martin", "1", "Nord"),
            MemberRecord::new("Bob", "Durand", "1", "Sud"),
            MemberRecord::new("Carol", "Petit", "2", "Nord"),
        ];
        DutyApi::new(
            Arc::new(StaticRosterSource::new(records)),
            Arc::new(StaticNoticeSource::default()),
            RotationSettings::default(),
        )
    }

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_planning_starts_tomorrow() {
        let slots = api().planning(at(9, 20, 0));

        assert_eq!(slots.len(), 4 * 6);
        assert_eq!(slots[0].start, at(10, 6, 0));
        assert_eq!(slots[0].display, "Tue 10/02 06:00 - 08:00");
    }

    #[test]
    fn test_current_shift_fallback_and_active() {
        let api = api();

        let fallback = api.current_shift(at(9, 20, 0)).unwrap();
        assert!(!fallback.is_active);
        assert_eq!(fallback.slot.index, 0);

        // 锚点为 now 次日：当天查询永远落不进排班表
        let same_day = api.current_shift(at(10, 7, 0)).unwrap();
        assert!(!same_day.is_active);
    }

    #[test]
    fn test_anonymous_never_alerts() {
        let view = api().alert_check(at(10, 5, 30), None);
        assert!(!view.should_alert);
        assert!(view.slot.is_none());
    }

    #[test]
    fn test_member_duties_rejects_blank() {
        let result = api().member_duties(at(9, 20, 0), &MemberKey::new(" ", "Martin"));
        assert!(matches!(result, Err(ApiError::InvalidInput(_))));
    }
}
