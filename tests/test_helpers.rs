// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的数据库初始化、名册文件与测试数据生成
// ==========================================

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use duty_rota::db::{init_config_schema, open_sqlite_connection};
use duty_rota::MemberRecord;
use rusqlite::{params, Connection};
use std::error::Error;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

pub const ROSTER_HEADER: &str = "Noms,Prenoms,Groupe,Guerite,telephone";

/// 初始化测试日志（可重复调用）
pub fn init_logging() {
    duty_rota::logging::init_test();
}

/// 创建临时测试数据库并初始化配置表
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    init_logging();
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_config_schema(&conn)?;

    Ok((temp_file, db_path))
}

pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    Ok(open_sqlite_connection(db_path)?)
}

/// 写入 global 配置项
pub fn insert_test_config(
    conn: &Connection,
    entries: &[(&str, &str)],
) -> Result<(), Box<dyn Error>> {
    for (key, value) in entries {
        conn.execute(
            "INSERT OR REPLACE INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)",
            params![key, value],
        )?;
    }
    Ok(())
}

/// 写入 CSV 名册（自动加表头）
pub fn write_roster_csv(rows: &[&str]) -> Result<NamedTempFile, Box<dyn Error>> {
    write_csv(ROSTER_HEADER, rows)
}

pub fn write_csv(header: &str, rows: &[&str]) -> Result<NamedTempFile, Box<dyn Error>> {
    init_logging();
    let mut temp_file = Builder::new().suffix(".csv").tempfile()?;
    writeln!(temp_file, "{}", header)?;
    for row in rows {
        writeln!(temp_file, "{}", row)?;
    }
    temp_file.flush()?;
    Ok(temp_file)
}

/// 标准三人名册: Alice(1/North), Bob(1/South), Carol(2/North)
pub fn sample_records() -> Vec<MemberRecord> {
    vec![
        MemberRecord::new("Alice", "Martin", "1", "Nord"),
        MemberRecord::new("Bob", "Durand", "1", "Sud"),
        MemberRecord::new("Carol", "Petit", "2", "Nord"),
    ]
}

/// 2026-02-xx 的本地时间
pub fn feb(day: u32, hour: u32, minute: u32, second: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 2, day)
        .unwrap()
        .and_hms_opt(hour, minute, second)
        .unwrap()
}

pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()
}
