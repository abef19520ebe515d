// ==========================================
// 岗亭值勤轮换系统 - 成员通知模型
// ==========================================
// 来源: 通知表格（Noms / Prenoms / Message / Date / Type）
// 缺失列按空白处理
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub last_name: String,
    pub first_name: String,
    pub message: String,
    pub date: String, // 原始文本，不做解析
    pub kind: String, // Type
}

impl Notice {
    /// 按姓氏匹配（TRIM + 忽略大小写）
    pub fn is_for(&self, last_name: &str) -> bool {
        let wanted = last_name.trim().to_lowercase();
        !wanted.is_empty() && self.last_name.trim().to_lowercase() == wanted
    }
}
