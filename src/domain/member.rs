// ==========================================
// 岗亭值勤轮换系统 - 成员领域模型
// ==========================================
// 职责: 原始成员记录、规范化成员、成员身份键
// ==========================================

use crate::domain::types::PostId;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// MemberRecord - 原始成员记录
// ==========================================
// 来源: 名册表格（Noms / Prenoms / Groupe / Guerite / telephone）
// 所有字段保持原样（仅 TRIM），类型解析在 Roster 构建阶段完成
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub last_name: String,          // Noms
    pub first_name: String,         // Prenoms
    pub group_raw: Option<String>,  // Groupe（原始文本）
    pub post_raw: Option<String>,   // Guerite（原始文本）
    pub phone: Option<String>,      // telephone

    // ===== 元信息 =====
    pub row_number: usize,          // 源文件数据行号（表头下一行为 1，空白行也计数）
}

impl MemberRecord {
    pub fn new(first_name: &str, last_name: &str, group: &str, post: &str) -> Self {
        Self {
            last_name: last_name.to_string(),
            first_name: first_name.to_string(),
            group_raw: Some(group.to_string()),
            post_raw: Some(post.to_string()),
            phone: None,
            row_number: 0,
        }
    }

    /// 显示名称: "名 姓"
    pub fn display_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }

    pub fn key(&self) -> MemberKey {
        MemberKey::new(&self.first_name, &self.last_name)
    }
}

// ==========================================
// MemberKey - 成员身份键
// ==========================================
// 身份 = 规范化 (名, 姓)：TRIM + 小写
// 不强制唯一：同名记录共享同一个身份键
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberKey {
    pub first_name: String,
    pub last_name: String,
}

impl MemberKey {
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            first_name: first_name.trim().to_lowercase(),
            last_name: last_name.trim().to_lowercase(),
        }
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", join_name(&self.first_name, &self.last_name))
    }
}

// ==========================================
// Member - 参与轮换的成员
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub first_name: String,
    pub last_name: String,
    pub group: u32,          // 值勤组（≥1）
    pub home_post: PostId,   // 固定岗亭
    pub phone: Option<String>,
}

impl Member {
    pub fn name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }

    pub fn key(&self) -> MemberKey {
        MemberKey::new(&self.first_name, &self.last_name)
    }

    pub fn matches(&self, key: &MemberKey) -> bool {
        self.key() == *key
    }
}

/// 按身份键查找原始记录（包含 group=0 的记录，返回第一条匹配）
pub fn find_member<'a>(records: &'a [MemberRecord], key: &MemberKey) -> Option<&'a MemberRecord> {
    records.iter().find(|record| record.key() == *key)
}

fn join_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name.trim(), last_name.trim())
        .trim()
        .to_string()
}
