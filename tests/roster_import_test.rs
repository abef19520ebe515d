// ==========================================
// 名册导入集成测试
// ==========================================
// 测试目标: CSV / Excel 名册 → 记录 → 名册 + 诊断；通知表格
// ==========================================

mod test_helpers;

use duty_rota::domain::roster::DiagnosticKind;
use duty_rota::importer::{
    notices_for, ExcelParser, FileParser, ImportError, NoticeSource, RosterImporter, RosterSource,
    SpreadsheetNoticeSource, SpreadsheetRosterSource,
};
use duty_rota::{DiagnosticLevel, MemberKey, PostId};
use std::path::Path;
use test_helpers::{write_csv, write_roster_csv};

#[test]
fn test_import_full_roster() {
    let file = write_roster_csv(&[
        "Martin,Alice,1,Nord,612345678.0",
        "Durand,Bob,1,Sud,",
        "Petit,Carol,2.0,,0698765432",
        "Zero,Dan,0,Nord,",
        "Roux,Eve,deux,Sud,",
        "Blanc,Fay,,Nord,",
        ",,3,Sud,",
    ])
    .unwrap();

    let import = RosterImporter::default().import(file.path()).unwrap();
    let roster = &import.build.roster;

    assert_eq!(import.records.len(), 7);
    assert_eq!(import.records[0].phone.as_deref(), Some("612345678"));
    assert_eq!(import.records[0].row_number, 1);
    assert_eq!(import.records[6].row_number, 7);

    assert_eq!(roster.group_ids(), vec![1, 2, 3]);
    assert_eq!(roster.member_count(), 4);
    assert_eq!(roster.members_at(2, &PostId::North).len(), 1);

    let kinds: Vec<&DiagnosticKind> = import.build.diagnostics.iter().map(|d| &d.kind).collect();
    assert!(kinds.contains(&&DiagnosticKind::PostDefaulted));
    assert!(kinds.contains(&&DiagnosticKind::GroupZero));
    assert!(kinds.contains(&&DiagnosticKind::GroupMalformed {
        raw: "deux".to_string()
    }));
    assert!(kinds.contains(&&DiagnosticKind::GroupMissing));
    assert!(kinds.contains(&&DiagnosticKind::NameBlank));

    // group=0 是正常过滤，不算数据质量问题
    assert_eq!(import.build.excluded_count(), 3);
    assert_eq!(import.build.data_quality_issues().len(), 3);
    assert!(import
        .build
        .diagnostics
        .iter()
        .filter(|d| d.kind == DiagnosticKind::GroupZero)
        .all(|d| d.level == DiagnosticLevel::Info));
}

#[test]
fn test_header_aliases() {
    let file = write_csv(
        "Nom,Prénom,Group,Guérite,Téléphone",
        &["Martin,Alice,1,sud,0612345678"],
    )
    .unwrap();

    let records = SpreadsheetRosterSource::new(file.path()).load_records().unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].key(), MemberKey::new("alice", "martin"));
    assert_eq!(records[0].group_raw.as_deref(), Some("1"));
    assert_eq!(records[0].post_raw.as_deref(), Some("sud"));
    assert_eq!(records[0].phone.as_deref(), Some("0612345678"));
}

#[test]
fn test_duplicate_records_are_kept_in_order() {
    let file = write_roster_csv(&["Martin,Alice,1,Nord,", "Martin,Alice,1,Nord,"]).unwrap();

    let import = RosterImporter::default().import(file.path()).unwrap();
    assert_eq!(import.build.roster.members_at(1, &PostId::North).len(), 2);
}

#[test]
fn test_missing_and_unsupported_files() {
    let missing = SpreadsheetRosterSource::new("/nonexistent/eleves.xlsx").load_records();
    assert!(matches!(missing, Err(ImportError::FileNotFound(_))));

    let txt = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    let unsupported = RosterImporter::default().import(txt.path());
    assert!(matches!(unsupported, Err(ImportError::UnsupportedFormat(_))));
}

#[test]
fn test_notice_sheet_with_missing_columns() {
    let file = write_csv(
        "Noms,Message,Date",
        &[
            "Martin,Relève à 06:00,2026-02-10",
            " martin ,Tenue de pluie,",
            "Durand,Badge,2026-02-11",
        ],
    )
    .unwrap();

    let notices = SpreadsheetNoticeSource::new(file.path()).load_notices().unwrap();
    assert_eq!(notices.len(), 3);
    assert_eq!(notices[0].first_name, "");
    assert_eq!(notices[0].kind, "");

    let mine = notices_for(&notices, "MARTIN");
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[1].message, "Tenue de pluie");
    assert!(notices_for(&notices, "").is_empty());
}

#[test]
fn test_diagnostics_point_at_source_rows() {
    let file = write_roster_csv(&[
        "Martin,Alice,1,Nord,",
        ",,,,",
        "Roux,Eve,abc,Sud,",
        "",
        "Blanc,Fay,,Nord,",
    ])
    .unwrap();

    let import = RosterImporter::default().import(file.path()).unwrap();

    let rows: Vec<usize> = import.records.iter().map(|r| r.row_number).collect();
    assert_eq!(rows, vec![1, 3, 5]);

    let malformed = import
        .build
        .diagnostics
        .iter()
        .find(|d| matches!(d.kind, DiagnosticKind::GroupMalformed { .. }))
        .unwrap();
    assert_eq!(malformed.row_number, 3);

    let missing = import
        .build
        .diagnostics
        .iter()
        .find(|d| d.kind == DiagnosticKind::GroupMissing)
        .unwrap();
    assert_eq!(missing.row_number, 5);
}

#[test]
fn test_roster_without_group_column_is_rejected() {
    let file = write_csv("Noms,Prenoms,Guerite", &["Martin,Alice,Nord"]).unwrap();

    let result = SpreadsheetRosterSource::new(file.path()).load_records();
    assert!(matches!(result, Err(ImportError::MissingColumn(col)) if col == "Groupe"));
}

// ==========================================
// Excel 名册
// ==========================================

const ROSTER_XLSX: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/roster.xlsx");

#[test]
fn test_excel_parser_reads_first_sheet() {
    let sheet = ExcelParser
        .parse_to_raw_records(Path::new(ROSTER_XLSX))
        .unwrap();

    assert_eq!(
        sheet.headers,
        vec!["Noms", "Prenoms", "Groupe", "Guerite", "telephone"]
    );
    // 第 3 行完全空白: 跳过但计入行号
    let rows: Vec<usize> = sheet.rows.iter().map(|r| r.row_number).collect();
    assert_eq!(rows, vec![1, 2, 4, 5, 6]);
}

#[test]
fn test_excel_roster_numeric_cells() {
    let import = RosterImporter::default()
        .import(Path::new(ROSTER_XLSX))
        .unwrap();
    let records = &import.records;

    // 数值单元格: 分组 1 / 电话 612345678
    assert_eq!(records[0].key(), MemberKey::new("Alice", "Martin"));
    assert_eq!(records[0].group_raw.as_deref(), Some("1"));
    assert_eq!(records[0].phone.as_deref(), Some("612345678"));
    assert_eq!(records[1].phone, None);

    // 文本单元格 "2.0" 与前导零电话
    assert_eq!(records[2].group_raw.as_deref(), Some("2.0"));
    assert_eq!(records[2].phone.as_deref(), Some("0698765432"));
    assert_eq!(records[2].row_number, 4);

    let roster = &import.build.roster;
    assert_eq!(roster.group_ids(), vec![1, 2]);
    assert_eq!(roster.members_at(1, &PostId::North).len(), 1);
    assert_eq!(roster.members_at(1, &PostId::South).len(), 1);
    assert_eq!(roster.members_at(2, &PostId::North).len(), 1);
    assert_eq!(roster.member_count(), 3);

    let malformed = import
        .build
        .diagnostics
        .iter()
        .find(|d| matches!(d.kind, DiagnosticKind::GroupMalformed { .. }))
        .unwrap();
    assert_eq!(malformed.row_number, 6);
    assert!(import
        .build
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::PostDefaulted && d.row_number == 4));
}
