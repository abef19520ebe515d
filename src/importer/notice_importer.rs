// ==========================================
// 岗亭值勤轮换系统 - 通知导入器
// ==========================================
// 通知表格: Noms / Prenoms / Message / Date / Type
// ==========================================

use crate::domain::notice::Notice;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::roster_importer_trait::{FieldMapper, FileParser, NoticeSource};
use std::path::PathBuf;

pub struct SpreadsheetNoticeSource {
    path: PathBuf,
    file_parser: UniversalFileParser,
    field_mapper: FieldMapperImpl,
}

impl SpreadsheetNoticeSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            file_parser: UniversalFileParser,
            field_mapper: FieldMapperImpl::new(),
        }
    }
}

impl NoticeSource for SpreadsheetNoticeSource {
    fn load_notices(&self) -> ImportResult<Vec<Notice>> {
        let sheet = self.file_parser.parse_to_raw_records(&self.path)?;
        Ok(sheet
            .rows
            .iter()
            .map(|row| self.field_mapper.map_to_notice(&row.cells))
            .collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticNoticeSource {
    notices: Vec<Notice>,
}

impl StaticNoticeSource {
    pub fn new(notices: Vec<Notice>) -> Self {
        Self { notices }
    }
}

impl NoticeSource for StaticNoticeSource {
    fn load_notices(&self) -> ImportResult<Vec<Notice>> {
        Ok(self.notices.clone())
    }
}

/// 按姓氏筛选通知
pub fn notices_for(notices: &[Notice], last_name: &str) -> Vec<Notice> {
    notices
        .iter()
        .filter(|n| n.is_for(last_name))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_load_and_filter_notices() {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(temp_file, "Noms,Prenoms,Message").unwrap();
        writeln!(temp_file, "Martin,Alice,Relève avancée").unwrap();
        writeln!(temp_file, "Durand,Bob,Tenue").unwrap();

        let notices = SpreadsheetNoticeSource::new(temp_file.path())
            .load_notices()
            .unwrap();
        let mine = notices_for(&notices, " martin ");

        assert_eq!(notices.len(), 2);
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].message, "Relève avancée");
        assert_eq!(mine[0].kind, "");
    }
}
