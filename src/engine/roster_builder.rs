// ==========================================
// 岗亭值勤轮换系统 - 名册构建
// ==========================================
// 输入: 原始成员记录（源文件顺序）
// 输出: Roster + 诊断列表
// 规则:
// - 组号无法解析/缺失 → 排除（Warning）
// - 组号为 0 → 排除（Info，正常过滤）
// - 岗亭为空 → 默认 North
// - 同名记录不去重，保持插入顺序
// ==========================================

use crate::domain::member::{Member, MemberRecord};
use crate::domain::roster::{DiagnosticKind, Roster, RosterBuild, RosterDiagnostic};
use crate::domain::types::PostId;
use tracing::debug;

/// 组号解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupParse {
    Eligible(u32),
    Zero,
    Missing,
    Malformed(String),
}

/// 解析组号
///
/// 接受整数文本，以及小数部分为 0 的浮点文本（表格常见的 "2.0"）
pub fn parse_group(raw: Option<&str>) -> GroupParse {
    let value = match raw.map(str::trim) {
        None | Some("") => return GroupParse::Missing,
        Some(v) => v,
    };

    let parsed: Option<i64> = value.parse::<i64>().ok().or_else(|| {
        value
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i64)
    });

    match parsed {
        Some(0) => GroupParse::Zero,
        Some(g) if g > 0 && g <= u32::MAX as i64 => GroupParse::Eligible(g as u32),
        _ => GroupParse::Malformed(value.to_string()),
    }
}

/// 构建名册
pub fn build_roster(records: &[MemberRecord]) -> RosterBuild {
    let mut roster = Roster::new();
    let mut diagnostics = Vec::new();

    for record in records {
        let name = record.display_name();

        let group = match parse_group(record.group_raw.as_deref()) {
            GroupParse::Eligible(g) => g,
            GroupParse::Zero => {
                diagnostics.push(RosterDiagnostic::new(
                    record.row_number,
                    name,
                    DiagnosticKind::GroupZero,
                ));
                continue;
            }
            GroupParse::Missing => {
                diagnostics.push(RosterDiagnostic::new(
                    record.row_number,
                    name,
                    DiagnosticKind::GroupMissing,
                ));
                continue;
            }
            GroupParse::Malformed(raw) => {
                diagnostics.push(RosterDiagnostic::new(
                    record.row_number,
                    name,
                    DiagnosticKind::GroupMalformed { raw },
                ));
                continue;
            }
        };

        if name.is_empty() {
            diagnostics.push(RosterDiagnostic::new(
                record.row_number,
                name.clone(),
                DiagnosticKind::NameBlank,
            ));
        }

        let home_post = match record.post_raw.as_deref().and_then(PostId::parse) {
            Some(post) => post,
            None => {
                diagnostics.push(RosterDiagnostic::new(
                    record.row_number,
                    name.clone(),
                    DiagnosticKind::PostDefaulted,
                ));
                PostId::North
            }
        };

        roster.add_member(Member {
            first_name: record.first_name.trim().to_string(),
            last_name: record.last_name.trim().to_string(),
            group,
            home_post,
            phone: record.phone.clone(),
        });
    }

    debug!(
        records = records.len(),
        members = roster.member_count(),
        groups = roster.group_ids().len(),
        diagnostics = diagnostics.len(),
        "名册构建完成"
    );

    RosterBuild { roster, diagnostics }
}
