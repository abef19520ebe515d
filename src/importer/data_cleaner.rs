// ==========================================
// 岗亭值勤轮换系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 电话号码标准化
// ==========================================

pub struct DataCleaner;

impl DataCleaner {
    /// 空白 → None
    pub fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 清洗电话号码
    ///
    /// 表格中的电话常被读成浮点数（"612345678.0"），此处去掉 ".0" 尾巴；
    /// "nan" / "none" 视为缺失
    pub fn clean_phone(&self, value: Option<&str>) -> Option<String> {
        let value = self.normalize_null(value)?;

        match value.to_lowercase().as_str() {
            "nan" | "none" | "null" => return None,
            _ => {}
        }

        match value.strip_suffix(".0") {
            Some(digits) if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
                Some(digits.to_string())
            }
            _ => Some(value),
        }
    }
}
