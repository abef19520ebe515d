// ==========================================
// 岗亭值勤轮换系统 - 名册导入 Trait
// ==========================================
// 职责: 定义名册导入接口（不包含实现）
// ==========================================

use crate::domain::member::MemberRecord;
use crate::domain::notice::Notice;
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

/// 原始行: 表头 → 单元格文本（已 TRIM）
pub type RawRow = HashMap<String, String>;

/// 带源行号的数据行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// 数据行号: 表头下第一行为 1，空白行也计数
    pub row_number: usize,
    pub cells: RawRow,
}

/// 解析后的工作表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<SourceRow>,
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: ExcelParser, CsvParser
pub trait FileParser: Send + Sync {
    /// 解析文件为表头 + 原始行列表
    ///
    /// # 返回
    /// - Ok(RawSheet): 数据行（跳过完全空白的行，保留源行号）
    /// - Err: 文件不存在、格式不支持、解析失败
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<RawSheet>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 源字段 → 标准字段映射（阶段 1）
// 实现者: FieldMapper
pub trait FieldMapper: Send + Sync {
    /// 校验名册表头
    ///
    /// # 返回
    /// - Err(MissingColumn): 表头中没有任何分组列别名
    fn check_member_headers(&self, headers: &[String]) -> ImportResult<()>;

    /// 映射名册行
    ///
    /// # 参数
    /// - row: 原始行
    /// - row_number: 数据行号（从 1 开始，含空白行）
    fn map_to_member_record(&self, row: &RawRow, row_number: usize) -> MemberRecord;

    /// 映射通知行（缺失列按空白处理）
    fn map_to_notice(&self, row: &RawRow) -> Notice;
}

// ==========================================
// RosterSource Trait
// ==========================================
// 用途: 名册数据来源（每次查询重新加载，不做缓存）
// 实现者: SpreadsheetRosterSource, StaticRosterSource
pub trait RosterSource: Send + Sync {
    /// 加载原始成员记录（包含 group=0 的记录）
    fn load_records(&self) -> ImportResult<Vec<MemberRecord>>;
}

// ==========================================
// NoticeSource Trait
// ==========================================
pub trait NoticeSource: Send + Sync {
    fn load_notices(&self) -> ImportResult<Vec<Notice>>;
}
