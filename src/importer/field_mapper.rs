// ==========================================
// 岗亭值勤轮换系统 - 字段映射器实现
// ==========================================
// 职责: 源字段 → 标准字段映射（支持列名别名）
// 名册列: Noms / Prenoms / Groupe / Guerite / telephone
// 通知列: Noms / Prenoms / Message / Date / Type
// ==========================================

use crate::domain::member::MemberRecord;
use crate::domain::notice::Notice;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::roster_importer_trait::{FieldMapper as FieldMapperTrait, RawRow};

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 标准字段的列名别名
    fn aliases(key: &str) -> &'static [&'static str] {
        match key {
            "Noms" => &["Noms", "Nom", "NOM", "last_name"],
            "Prenoms" => &["Prenoms", "Prénoms", "Prenom", "Prénom", "first_name"],
            "Groupe" => &["Groupe", "Group", "GROUPE", "group"],
            "Guerite" => &["Guerite", "Guérite", "GUERITE", "Post", "post"],
            "telephone" => &["telephone", "Telephone", "Téléphone", "phone"],
            _ => &[],
        }
    }

    /// 提取字段（返回 Option），支持多个可能的列名（别名）
    fn get_string(&self, row: &RawRow, key: &str) -> Option<String> {
        Self::aliases(key)
            .iter()
            .chain(std::iter::once(&key))
            .find_map(|alias| self.cleaner.normalize_null(row.get(*alias).map(String::as_str)))
    }

    fn get_text(&self, row: &RawRow, key: &str) -> String {
        self.get_string(row, key).unwrap_or_default()
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMapperTrait for FieldMapper {
    fn check_member_headers(&self, headers: &[String]) -> ImportResult<()> {
        let has_group = headers
            .iter()
            .any(|h| Self::aliases("Groupe").contains(&h.as_str()));

        if has_group {
            Ok(())
        } else {
            Err(ImportError::MissingColumn("Groupe".to_string()))
        }
    }

    fn map_to_member_record(&self, row: &RawRow, row_number: usize) -> MemberRecord {
        MemberRecord {
            last_name: self.get_text(row, "Noms"),
            first_name: self.get_text(row, "Prenoms"),
            group_raw: self.get_string(row, "Groupe"),
            post_raw: self.get_string(row, "Guerite"),
            phone: self
                .cleaner
                .clean_phone(self.get_string(row, "telephone").as_deref()),
            row_number,
        }
    }

    fn map_to_notice(&self, row: &RawRow) -> Notice {
        Notice {
            last_name: self.get_text(row, "Noms"),
            first_name: self.get_text(row, "Prenoms"),
            message: self.get_text(row, "Message"),
            date: self.get_text(row, "Date"),
            kind: self.get_text(row, "Type"),
        }
    }
}
