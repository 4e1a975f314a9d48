// ==========================================
// 临床轮转排班系统 - 命令行入口
// ==========================================
// 用法:
//   rotation-aps <workbook.xlsx> <YYYY-MM-DD> [config.json]
//   rotation-aps <stations.csv> <roster.csv> <YYYY-MM-DD> [config.json]
// 输出: 导入摘要 + 再平衡报告（JSON，stdout）；日志输出到 stderr
// ==========================================

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use rotation_aps::api::RebalanceApi;
use rotation_aps::config::ConfigManager;
use rotation_aps::logging;
use std::path::{Path, PathBuf};

/// 命令行参数
struct CliArgs {
    input: PathBuf,
    roster: Option<PathBuf>,
    date: NaiveDate,
    config: Option<PathBuf>,
}

fn usage() -> String {
    format!(
        "{} v{}\n用法:\n  rotation-aps <workbook.xlsx> <YYYY-MM-DD> [config.json]\n  rotation-aps <stations.csv> <roster.csv> <YYYY-MM-DD> [config.json]",
        rotation_aps::APP_NAME,
        rotation_aps::VERSION
    )
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let Some(input) = args.first() else {
        bail!("缺少输入文件\n{}", usage());
    };
    let input = PathBuf::from(input);

    // CSV 模式需要第二个文件（名册）
    let (roster, rest) = if is_csv(&input) {
        let Some(roster) = args.get(1) else {
            bail!("CSV 模式缺少名册文件\n{}", usage());
        };
        (Some(PathBuf::from(roster)), &args[2..])
    } else {
        (None, &args[1..])
    };

    let Some(date_text) = rest.first() else {
        bail!("缺少目标日期\n{}", usage());
    };
    let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d")
        .with_context(|| format!("日期格式错误（期望 YYYY-MM-DD）: {}", date_text))?;

    if rest.len() > 2 {
        bail!("参数过多\n{}", usage());
    }

    Ok(CliArgs {
        input,
        roster,
        date,
        config: rest.get(1).map(PathBuf::from),
    })
}

fn run(cli: CliArgs) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ConfigManager::from_json_file(path)
            .with_context(|| format!("加载配置失败: {}", path.display()))?,
        None => ConfigManager::new(),
    };
    let api = RebalanceApi::new(&config)?;

    let imported = match &cli.roster {
        Some(roster) => api.import_csv(&cli.input, roster)?,
        None => api.import_workbook(&cli.input)?,
    };

    let available = imported.snapshot.available_dates();
    if !available.contains(&cli.date) {
        tracing::warn!(
            date = %cli.date,
            available = ?available,
            "目标日期不在站点表中"
        );
    }

    let report = api.rebalance(&imported.snapshot, cli.date)?;

    let output = serde_json::json!({
        "batch_id": imported.batch_id,
        "dq_summary": imported.dq_report.summary,
        "available_dates": available,
        "report": report,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() -> Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", usage());
        return Ok(());
    }

    tracing::info!("{} v{}", rotation_aps::APP_NAME, rotation_aps::VERSION);
    let cli = parse_args(&args)?;
    run(cli)
}
