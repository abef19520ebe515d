// ==========================================
// 岗亭值勤轮换系统 - 轮换策略定义
// ==========================================
// 用途：
// - 在生成排班时选择岗亭轮换方式；
// - 组轮换（时段 → 值勤组）对所有策略相同。

use serde::{Deserialize, Serialize};

/// 岗亭轮换策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationPolicy {
    /// 按组轮次切换在岗岗亭，成员始终在固定岗亭
    GroupCycle,
    /// 按时段奇偶切换在岗岗亭，成员每次出场交替岗亭
    MemberFairness,
}

impl RotationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RotationPolicy::GroupCycle => "group_cycle",
            RotationPolicy::MemberFairness => "member_fairness",
        }
    }
}

impl Default for RotationPolicy {
    fn default() -> Self {
        RotationPolicy::GroupCycle
    }
}

impl std::str::FromStr for RotationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "group_cycle" | "group-cycle" | "a" => Ok(RotationPolicy::GroupCycle),
            "member_fairness" | "member-fairness" | "b" => Ok(RotationPolicy::MemberFairness),
            other => Err(format!("未知轮换策略: {}", other)),
        }
    }
}

impl std::fmt::Display for RotationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
