// ==========================================
// 岗亭值勤轮换系统 - 名册导入器
// ==========================================
// 职责: 整合导入流程，从表格文件到名册
// 流程: 解析 → 映射 → 名册构建（诊断）
// ==========================================

use crate::domain::member::MemberRecord;
use crate::domain::roster::RosterBuild;
use crate::engine::roster_builder::build_roster;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::roster_importer_trait::{FieldMapper, FileParser, RosterSource};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// RosterImport - 导入结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct RosterImport {
    pub batch_id: String,
    pub source: String,
    pub records: Vec<MemberRecord>,
    pub build: RosterBuild,
}

// ==========================================
// RosterImporter - 名册导入器
// ==========================================
pub struct RosterImporter {
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
}

impl RosterImporter {
    pub fn new(file_parser: Box<dyn FileParser>, field_mapper: Box<dyn FieldMapper>) -> Self {
        Self {
            file_parser,
            field_mapper,
        }
    }

    /// 读取原始成员记录
    ///
    /// # 返回
    /// - Err(MissingColumn): 表头没有分组列
    pub fn read_records(&self, file_path: &Path) -> ImportResult<Vec<MemberRecord>> {
        let sheet = self.file_parser.parse_to_raw_records(file_path)?;
        self.field_mapper.check_member_headers(&sheet.headers)?;

        let records: Vec<MemberRecord> = sheet
            .rows
            .iter()
            .map(|row| self.field_mapper.map_to_member_record(&row.cells, row.row_number))
            .collect();

        debug!(
            file_path = %file_path.display(),
            rows = records.len(),
            "名册文件解析完成"
        );

        Ok(records)
    }

    /// 导入名册（解析 + 构建 + 诊断）
    #[instrument(skip(self, file_path), fields(file_path = %file_path.display()))]
    pub fn import(&self, file_path: &Path) -> ImportResult<RosterImport> {
        let batch_id = Uuid::new_v4().to_string();
        info!(batch_id = %batch_id, "开始导入名册");

        let records = self.read_records(file_path)?;
        let build = build_roster(&records);

        for issue in build.data_quality_issues() {
            warn!(
                batch_id = %batch_id,
                row = issue.row_number,
                member = %issue.member_name,
                kind = ?issue.kind,
                "名册数据质量问题"
            );
        }

        info!(
            batch_id = %batch_id,
            records = records.len(),
            members = build.roster.member_count(),
            excluded = build.excluded_count(),
            "名册导入完成"
        );

        Ok(RosterImport {
            batch_id,
            source: file_path.display().to_string(),
            records,
            build,
        })
    }
}

impl Default for RosterImporter {
    fn default() -> Self {
        Self::new(Box::new(UniversalFileParser), Box::new(FieldMapperImpl::new()))
    }
}

// ==========================================
// SpreadsheetRosterSource - 表格名册来源
// ==========================================
pub struct SpreadsheetRosterSource {
    path: PathBuf,
    importer: RosterImporter,
}

impl SpreadsheetRosterSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            importer: RosterImporter::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RosterSource for SpreadsheetRosterSource {
    fn load_records(&self) -> ImportResult<Vec<MemberRecord>> {
        self.importer.read_records(&self.path)
    }
}

// ==========================================
// StaticRosterSource - 内存名册来源
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct StaticRosterSource {
    records: Vec<MemberRecord>,
}

impl StaticRosterSource {
    pub fn new(records: Vec<MemberRecord>) -> Self {
        Self { records }
    }
}

impl RosterSource for StaticRosterSource {
    fn load_records(&self) -> ImportResult<Vec<MemberRecord>> {
        Ok(self.records.clone())
    }
}
