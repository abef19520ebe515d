// ==========================================
// 岗亭值勤轮换系统 - 名册领域模型
// ==========================================
// 职责: 值勤组 → 岗亭 → 成员 的分组结构 + 构建诊断
// 红线: 组内成员保持源文件顺序（公平轮换的初始状态依赖此顺序）
// ==========================================

use crate::domain::member::Member;
use crate::domain::types::{DiagnosticLevel, PostId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Roster - 名册
// ==========================================
// 组号升序（BTreeMap），岗亭按 PostId 排序，成员按插入顺序
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    groups: BTreeMap<u32, BTreeMap<PostId, Vec<Member>>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入成员（按成员自身的 group / home_post 归组）
    pub fn add_member(&mut self, member: Member) {
        self.groups
            .entry(member.group)
            .or_default()
            .entry(member.home_post.clone())
            .or_default()
            .push(member);
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// 可参与轮换的组号（升序）
    pub fn group_ids(&self) -> Vec<u32> {
        self.groups.keys().copied().collect()
    }

    /// 组内出现的岗亭（升序去重）
    pub fn posts_in_group(&self, group: u32) -> Vec<PostId> {
        self.groups
            .get(&group)
            .map(|posts| posts.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// 组内成员（岗亭升序，岗亭内保持插入顺序）
    pub fn members_of(&self, group: u32) -> Vec<&Member> {
        self.groups
            .get(&group)
            .map(|posts| posts.values().flatten().collect())
            .unwrap_or_default()
    }

    pub fn members_at(&self, group: u32, post: &PostId) -> &[Member] {
        self.groups
            .get(&group)
            .and_then(|posts| posts.get(post))
            .map(|members| members.as_slice())
            .unwrap_or(&[])
    }

    pub fn member_count(&self) -> usize {
        self.groups
            .values()
            .flat_map(|posts| posts.values())
            .map(|members| members.len())
            .sum()
    }
}

// ==========================================
// 名册构建诊断
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticKind {
    GroupZero,                     // 组号为 0：正常过滤（不参与轮换）
    GroupMissing,                  // 组号缺失：排除
    GroupMalformed { raw: String }, // 组号无法解析：排除
    PostDefaulted,                 // 岗亭为空：默认 North
    NameBlank,                     // 姓名为空：保留
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterDiagnostic {
    pub row_number: usize,
    pub member_name: String,
    pub kind: DiagnosticKind,
    pub level: DiagnosticLevel,
}

impl RosterDiagnostic {
    pub fn new(row_number: usize, member_name: String, kind: DiagnosticKind) -> Self {
        let level = match kind {
            DiagnosticKind::GroupZero | DiagnosticKind::PostDefaulted => DiagnosticLevel::Info,
            DiagnosticKind::GroupMissing
            | DiagnosticKind::GroupMalformed { .. }
            | DiagnosticKind::NameBlank => DiagnosticLevel::Warning,
        };

        Self {
            row_number,
            member_name,
            kind,
            level,
        }
    }

    /// 是否为数据质量问题（区别于 group=0 的正常过滤）
    pub fn is_data_quality_issue(&self) -> bool {
        self.level == DiagnosticLevel::Warning
    }

    /// 该记录是否被排除在轮换之外
    pub fn excludes_member(&self) -> bool {
        matches!(
            self.kind,
            DiagnosticKind::GroupZero
                | DiagnosticKind::GroupMissing
                | DiagnosticKind::GroupMalformed { .. }
        )
    }
}

// ==========================================
// RosterBuild - 名册构建结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterBuild {
    pub roster: Roster,
    pub diagnostics: Vec<RosterDiagnostic>,
}

impl RosterBuild {
    pub fn excluded_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.excludes_member())
            .count()
    }

    pub fn data_quality_issues(&self) -> Vec<&RosterDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.is_data_quality_issue())
            .collect()
    }
}
