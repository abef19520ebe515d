// ==========================================
// 岗亭值勤轮换系统 - 命令行入口
// ==========================================
// 输出: 查询结果以 JSON 写到 stdout，日志写到 stderr
// ==========================================

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use serde::Serialize;

use duty_rota::app::{get_default_db_path, AlertPoller, AppState};
use duty_rota::{logging, AlertAudience, MemberKey};

/// 岗亭值勤轮换：排班、当前时段、值勤提醒
#[derive(Parser, Debug)]
#[command(name = "duty-rota", version, about)]
struct Cli {
    /// 配置数据库路径（默认: DUTY_ROTA_DB_PATH 或用户数据目录）
    #[arg(long)]
    db: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 排班视图（menu_days 天）
    Planning,
    /// 当前时段（无匹配时为第一个时段）
    Current,
    /// 值勤提醒判定；不带姓名时对所有时段判定
    Alert {
        #[arg(requires = "last_name")]
        first_name: Option<String>,
        last_name: Option<String>,
    },
    /// 成员值勤列表
    Duties { first_name: String, last_name: String },
    /// 人员列表
    Personnel,
    /// 成员通知
    Notices { last_name: String },
    /// 名册诊断报告
    Report,
    /// 持续轮询值勤提醒，Ctrl-C 停止
    Watch {
        #[arg(requires = "last_name")]
        first_name: Option<String>,
        last_name: Option<String>,
    },
    /// 查看全部配置
    ConfigShow,
    /// 写入配置项
    ConfigSet { key: String, value: String },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// 两个姓名都给出时按成员过滤，都不给出时不过滤（只给一个由 clap 拒绝）
fn audience_of(first_name: Option<String>, last_name: Option<String>) -> AlertAudience {
    match (first_name, last_name) {
        (Some(first), Some(last)) => AlertAudience::Member(MemberKey::new(&first, &last)),
        _ => AlertAudience::Anyone,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let cli = Cli::parse();

    let db_path = cli.db.unwrap_or_else(get_default_db_path);
    tracing::info!(version = duty_rota::VERSION, db_path = %db_path, "{}", duty_rota::APP_NAME);

    let state = AppState::new(db_path)
        .await
        .map_err(anyhow::Error::msg)
        .context("无法初始化AppState")?;
    let api = state.duty_api.clone();
    let now = Local::now().naive_local();

    match cli.command {
        Command::Planning => print_json(&api.planning(now))?,
        Command::Current => print_json(&api.current_shift(now))?,
        Command::Alert {
            first_name,
            last_name,
        } => print_json(&api.alert_check_for(now, &audience_of(first_name, last_name)))?,
        Command::Duties {
            first_name,
            last_name,
        } => {
            let identity = MemberKey::new(&first_name, &last_name);
            print_json(&api.member_duties(now, &identity)?)?
        }
        Command::Personnel => print_json(&api.personnel())?,
        Command::Notices { last_name } => print_json(&api.notices(&last_name))?,
        Command::Report => print_json(&api.roster_report())?,
        Command::Watch {
            first_name,
            last_name,
        } => {
            let poller = AlertPoller::new(
                api,
                audience_of(first_name, last_name),
                state.settings.poll_interval_seconds,
            );
            let fired = poller.run().await;
            print_json(&serde_json::json!({ "alerts_fired": fired }))?
        }
        Command::ConfigShow => {
            let snapshot = state
                .config_manager
                .get_config_snapshot()
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;
            let value: serde_json::Value = serde_json::from_str(&snapshot)?;
            print_json(&serde_json::json!({ "stored": value, "effective": state.settings }))?
        }
        Command::ConfigSet { key, value } => {
            state
                .config_manager
                .set_config_value(&key, &value)
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;
            print_json(&serde_json::json!({ "key": key, "value": value }))?
        }
    }

    Ok(())
}
