// ==========================================
// 岗亭值勤轮换系统 - 轮换引擎
// ==========================================
// 职责: 时段 → 值勤组（组轮换）+ 组内在岗岗亭与成员岗亭（岗亭轮换）
// 输入: Roster + 时段网格 + 起始偏移 + 轮换策略
// 输出: 排班表 + 最终交替状态
// ==========================================
// 组轮换（所有策略共用）:
//   group_index = (i + offset) mod G
//   cycle       = i div G
// GroupCycle:
//   active_post = posts_in_group[cycle mod P]，成员岗亭 = 固定岗亭
// MemberFairness:
//   active_post = 偶数时段 North / 奇数时段 South
//   成员岗亭    = 首次出场为固定岗亭，之后每次出场交替
// 红线: MemberFairness 的交替状态跨时段传递，必须从第 0 个时段顺序折叠
// ==========================================

use crate::domain::member::{Member, MemberKey};
use crate::domain::roster::Roster;
use crate::domain::schedule::{Assignment, Schedule, Slot, SlotFrame};
use crate::domain::types::PostId;
use crate::engine::strategy::RotationPolicy;
use std::collections::HashMap;

// ==========================================
// GroupTurn - 组轮换结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupTurn {
    pub group: u32,
    pub cycle: usize,
}

/// 计算时段对应的值勤组
///
/// # 返回
/// - None: 没有可轮换的组
pub fn group_for_slot(group_ids: &[u32], index: usize, offset: usize) -> Option<GroupTurn> {
    if group_ids.is_empty() {
        return None;
    }

    let count = group_ids.len();
    Some(GroupTurn {
        group: group_ids[(index + offset % count) % count],
        cycle: index / count,
    })
}

/// 按时段奇偶决定在岗岗亭（MemberFairness）
pub fn parity_active_post(index: usize) -> PostId {
    if index % 2 == 0 {
        PostId::North
    } else {
        PostId::South
    }
}

/// 按组轮次决定在岗岗亭（GroupCycle）
pub fn cycle_active_post(posts_in_group: &[PostId], cycle: usize) -> Option<PostId> {
    if posts_in_group.is_empty() {
        return None;
    }
    Some(posts_in_group[cycle % posts_in_group.len()].clone())
}

// ==========================================
// AlternationState - 成员交替状态
// ==========================================
// 每个成员最近一次分派的岗亭；初始为空
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlternationState {
    last_post: HashMap<MemberKey, PostId>,
}

impl AlternationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 推进成员的交替状态，返回本次分派的岗亭
    ///
    /// - 首次出场: 固定岗亭
    /// - 之后: 上一次岗亭的交替岗亭
    pub fn advance(&mut self, member: &Member) -> PostId {
        let next = match self.last_post.get(&member.key()) {
            None => member.home_post.clone(),
            Some(previous) => previous.alternate(),
        };
        self.last_post.insert(member.key(), next.clone());
        next
    }

    pub fn last_post(&self, key: &MemberKey) -> Option<&PostId> {
        self.last_post.get(key)
    }

    pub fn tracked_members(&self) -> usize {
        self.last_post.len()
    }
}

// ==========================================
// RotationEngine - 轮换引擎
// ==========================================
/// 轮换引擎
/// 无内部可变状态：交替状态作为折叠参数显式传递
pub struct RotationEngine<'a> {
    roster: &'a Roster,
    group_ids: Vec<u32>,
    group_start_offset: usize,
    policy: RotationPolicy,
}

impl<'a> RotationEngine<'a> {
    pub fn new(roster: &'a Roster, group_start_offset: usize, policy: RotationPolicy) -> Self {
        Self {
            group_ids: roster.group_ids(),
            roster,
            group_start_offset,
            policy,
        }
    }

    pub fn policy(&self) -> RotationPolicy {
        self.policy
    }

    pub fn group_ids(&self) -> &[u32] {
        &self.group_ids
    }

    pub fn turn_for(&self, index: usize) -> Option<GroupTurn> {
        group_for_slot(&self.group_ids, index, self.group_start_offset)
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 顺序折叠全部时段
    ///
    /// # 返回
    /// (排班表, 最终交替状态)
    pub fn assign(&self, frames: &[SlotFrame]) -> (Schedule, AlternationState) {
        self.assign_from(frames, AlternationState::new())
    }

    /// 从给定交替状态开始折叠
    pub fn assign_from(
        &self,
        frames: &[SlotFrame],
        initial: AlternationState,
    ) -> (Schedule, AlternationState) {
        let (slots, state) = frames.iter().fold(
            (Vec::with_capacity(frames.len()), initial),
            |(mut slots, state), frame| {
                let (state, slot) = self.step(state, frame);
                slots.extend(slot);
                (slots, state)
            },
        );

        (Schedule::new(slots), state)
    }

    /// 折叠单步: (状态, 时段) → (新状态, 分派后的时段)
    ///
    /// 没有可轮换的组时返回 None，状态不变
    pub fn step(
        &self,
        state: AlternationState,
        frame: &SlotFrame,
    ) -> (AlternationState, Option<Slot>) {
        match self.policy {
            RotationPolicy::GroupCycle => (state, self.assign_group_cycle(frame)),
            RotationPolicy::MemberFairness => self.assign_member_fairness(state, frame),
        }
    }

    /// GroupCycle: 单个时段可独立计算
    pub fn assign_group_cycle(&self, frame: &SlotFrame) -> Option<Slot> {
        let turn = self.turn_for(frame.index)?;
        let posts = self.roster.posts_in_group(turn.group);
        let active_post = cycle_active_post(&posts, turn.cycle)?;

        let assignments = self
            .roster
            .members_of(turn.group)
            .into_iter()
            .map(|member| Assignment {
                on_duty: member.home_post == active_post,
                post: member.home_post.clone(),
                member: member.clone(),
            })
            .collect();

        Some(build_slot(frame, turn, active_post, assignments))
    }

    /// MemberFairness: 依赖前序时段的交替状态
    pub fn assign_member_fairness(
        &self,
        mut state: AlternationState,
        frame: &SlotFrame,
    ) -> (AlternationState, Option<Slot>) {
        let turn = match self.turn_for(frame.index) {
            Some(turn) => turn,
            None => return (state, None),
        };
        let active_post = parity_active_post(frame.index);

        let assignments = self
            .roster
            .members_of(turn.group)
            .into_iter()
            .map(|member| {
                let post = state.advance(member);
                Assignment {
                    on_duty: post == active_post,
                    post,
                    member: member.clone(),
                }
            })
            .collect();

        let slot = build_slot(frame, turn, active_post, assignments);
        (state, Some(slot))
    }
}

fn build_slot(
    frame: &SlotFrame,
    turn: GroupTurn,
    active_post: PostId,
    assignments: Vec<Assignment>,
) -> Slot {
    Slot {
        index: frame.index,
        start: frame.start,
        end: frame.end,
        group: turn.group,
        cycle: turn.cycle,
        active_post,
        assignments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::slot_generator::generate_slots;
    use chrono::NaiveDate;

    fn member(first: &str, group: u32, post: PostId) -> Member {
        Member {
            first_name: first.to_string(),
            last_name: "Test".to_string(),
            group,
            home_post: post,
            phone: None,
        }
    }

    fn frames(days: u32) -> Vec<SlotFrame> {
        generate_slots(NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(), days)
    }

    #[test]
    fn test_group_for_slot_with_offset() {
        let ids = [1, 2, 3];
        assert_eq!(group_for_slot(&ids, 0, 0).map(|t| t.group), Some(1));
        assert_eq!(group_for_slot(&ids, 0, 1).map(|t| t.group), Some(2));
        assert_eq!(group_for_slot(&ids, 0, 2).map(|t| t.group), Some(3));
        assert_eq!(group_for_slot(&ids, 4, 2).map(|t| t.group), Some(1));
        assert_eq!(group_for_slot(&ids, 4, 2).map(|t| t.cycle), Some(1));
        assert_eq!(group_for_slot(&[], 0, 0), None);
    }

    #[test]
    fn test_large_offset_wraps() {
        let ids = [1, 2];
        assert_eq!(
            group_for_slot(&ids, 3, 7).map(|t| t.group),
            group_for_slot(&ids, 3, 1).map(|t| t.group)
        );
    }

    #[test]
    fn test_advance_first_home_then_alternate() {
        let mut state = AlternationState::new();
        let alice = member("Alice", 1, PostId::South);

        assert_eq!(state.advance(&alice), PostId::South);
        assert_eq!(state.advance(&alice), PostId::North);
        assert_eq!(state.advance(&alice), PostId::South);
        assert_eq!(state.last_post(&alice.key()), Some(&PostId::South));
        assert_eq!(state.tracked_members(), 1);
    }

    #[test]
    fn test_fairness_step_in_isolation() {
        let mut roster = Roster::new();
        roster.add_member(member("Alice", 1, PostId::North));
        let engine = RotationEngine::new(&roster, 0, RotationPolicy::MemberFairness);
        let grid = frames(1);

        let (state, slot0) = engine.step(AlternationState::new(), &grid[0]);
        let (_, slot1) = engine.step(state, &grid[1]);

        let slot0 = slot0.unwrap();
        let slot1 = slot1.unwrap();
        assert_eq!(slot0.assignments[0].post, PostId::North);
        assert!(slot0.assignments[0].on_duty);
        assert_eq!(slot1.active_post, PostId::South);
        assert_eq!(slot1.assignments[0].post, PostId::South);
        assert!(slot1.assignments[0].on_duty);
    }

    #[test]
    fn test_empty_roster_gives_empty_schedule() {
        let roster = Roster::new();
        for policy in [RotationPolicy::GroupCycle, RotationPolicy::MemberFairness] {
            let engine = RotationEngine::new(&roster, 0, policy);
            let (schedule, state) = engine.assign(&frames(2));
            assert!(schedule.is_empty());
            assert_eq!(state.tracked_members(), 0);
        }
    }

    #[test]
    fn test_group_cycle_single_post_always_on_duty() {
        let mut roster = Roster::new();
        roster.add_member(member("Carol", 1, PostId::North));
        let engine = RotationEngine::new(&roster, 0, RotationPolicy::GroupCycle);

        let (schedule, _) = engine.assign(&frames(1));

        assert_eq!(schedule.len(), 6);
        assert!(schedule
            .iter()
            .all(|slot| slot.active_post == PostId::North && slot.assignments[0].on_duty));
    }
}
