// ==========================================
// 岗亭值勤轮换系统 - 领域类型定义
// ==========================================
// 职责: 岗亭标识、诊断等级等基础类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ==========================================
// 岗亭 (Post / Guérite)
// ==========================================
// 开放枚举: 北/南两个固定岗亭 + 其他命名岗亭
// 排序: 按名册中的岗亭名称（Nord / Sud / 原名）字典序，"Est" < "Nord" < "Sud"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum PostId {
    North,
    South,
    Other(String),
}

impl PostId {
    /// 解析岗亭名称
    ///
    /// # 返回
    /// - None: 空白（调用方决定默认值）
    /// - Some(PostId): 识别到的岗亭；未识别的非空名称保留为 Other
    pub fn parse(raw: &str) -> Option<PostId> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        match trimmed.to_lowercase().as_str() {
            "nord" | "north" | "n" => Some(PostId::North),
            "sud" | "south" | "s" => Some(PostId::South),
            _ => Some(PostId::Other(trimmed.to_string())),
        }
    }

    /// 交替岗亭（成员公平轮换使用）
    ///
    /// North ↔ South；其他岗亭交替到 North
    pub fn alternate(&self) -> PostId {
        match self {
            PostId::North => PostId::South,
            PostId::South => PostId::North,
            PostId::Other(_) => PostId::North,
        }
    }

    /// 名册中的岗亭名称（排序键）
    pub fn roster_name(&self) -> &str {
        match self {
            PostId::North => "Nord",
            PostId::South => "Sud",
            PostId::Other(name) => name.as_str(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            PostId::North => 0,
            PostId::South => 1,
            PostId::Other(_) => 2,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PostId::North => "NORTH",
            PostId::South => "SOUTH",
            PostId::Other(name) => name.as_str(),
        }
    }
}

impl Ord for PostId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.roster_name()
            .cmp(other.roster_name())
            .then_with(|| self.rank().cmp(&other.rank()))
    }
}

impl PartialOrd for PostId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for PostId {
    fn default() -> Self {
        PostId::North
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<PostId> for String {
    fn from(post: PostId) -> Self {
        post.as_str().to_string()
    }
}

impl From<String> for PostId {
    fn from(raw: String) -> Self {
        PostId::parse(&raw).unwrap_or_default()
    }
}

// ==========================================
// 诊断等级 (Diagnostic Level)
// ==========================================
// 顺序: Info < Warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticLevel {
    Info,    // 正常过滤/默认值
    Warning, // 数据质量问题
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "INFO"),
            DiagnosticLevel::Warning => write!(f, "WARNING"),
        }
    }
}
