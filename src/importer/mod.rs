// ==========================================
// 岗亭值勤轮换系统 - 导入层
// ==========================================
// 职责: 外部表格数据导入，生成名册记录与成员通知
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod notice_importer;
pub mod roster_importer;
pub mod roster_importer_trait;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use notice_importer::{notices_for, SpreadsheetNoticeSource, StaticNoticeSource};
pub use roster_importer::{
    RosterImport, RosterImporter, SpreadsheetRosterSource, StaticRosterSource,
};

// 重导出 Trait 接口
pub use roster_importer_trait::{
    FieldMapper, FileParser, NoticeSource, RawRow, RawSheet, RosterSource, SourceRow,
};
