use super::*;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::member::{find_member, MemberKey};
use crate::domain::roster::RosterDiagnostic;
use crate::importer::notice_importer::notices_for;

/// 人员列表项（包含 group=0 的成员）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonnelView {
    pub first_name: String,
    pub last_name: String,
    pub group: String, // 原始组号文本
}

/// 名册诊断报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterReport {
    pub total_records: usize,
    pub rotating_members: usize,
    pub group_ids: Vec<u32>,
    pub excluded: usize,
    pub data_quality_issues: usize,
    pub diagnostics: Vec<RosterDiagnostic>,
}

impl DutyApi {
    // ==========================================
    // 身份识别
    // ==========================================

    /// 按 (姓, 名) 识别成员（TRIM + 忽略大小写，覆盖全部记录）
    ///
    /// # 返回
    /// - Ok(MemberRecord): 第一条匹配记录
    /// - Err(NotFound): 名册中无此人
    pub fn identify(&self, last_name: &str, first_name: &str) -> ApiResult<MemberRecord> {
        if last_name.trim().is_empty() || first_name.trim().is_empty() {
            return Err(ApiError::InvalidInput("姓名不能为空".to_string()));
        }

        let key = MemberKey::new(first_name, last_name);
        let records = self.load_records();

        find_member(&records, &key)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("成员 {} 不在名册中", key)))
    }

    // ==========================================
    // 人员列表
    // ==========================================

    pub fn personnel(&self) -> Vec<PersonnelView> {
        self.load_records()
            .into_iter()
            .map(|record| PersonnelView {
                first_name: record.first_name.trim().to_string(),
                last_name: record.last_name.trim().to_string(),
                group: record.group_raw.unwrap_or_default(),
            })
            .collect()
    }

    // ==========================================
    // 成员通知
    // ==========================================

    /// 按姓氏筛选通知
    pub fn notices(&self, last_name: &str) -> Vec<Notice> {
        notices_for(&self.load_notices(), last_name)
    }

    // ==========================================
    // 名册诊断
    // ==========================================

    pub fn roster_report(&self) -> RosterReport {
        let records = self.load_records();
        let build = build_roster(&records);

        RosterReport {
            total_records: records.len(),
            rotating_members: build.roster.member_count(),
            group_ids: build.roster.group_ids(),
            excluded: build.excluded_count(),
            data_quality_issues: build.data_quality_issues().len(),
            diagnostics: build.diagnostics,
        }
    }
}
