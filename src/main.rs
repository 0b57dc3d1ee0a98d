// ==========================================
// 社区花名册 - 命令行入口
// ==========================================
// 用法: community-roster <文件.xlsx|文件.xls> [--report] [--config <路径>]
// 输出: 社区数据（或 --report 时的数据质量报告）JSON 到 stdout
// 未识别到社区时，--report 仍输出本次质量报告，退出码非零
// ==========================================

use anyhow::{bail, Context, Result};
use community_roster::{logging, ApiError, AppState};
use std::path::PathBuf;

const CLI_SESSION: &str = "cli";

struct CliArgs {
    file: PathBuf,
    report: bool,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<CliArgs> {
    let mut file = None;
    let mut report = false;
    let mut config = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--report" => report = true,
            "--config" => {
                let path = args.next().context("--config 需要指定路径")?;
                config = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                println!("用法: community-roster <文件.xlsx|文件.xls> [--report] [--config <路径>]");
                std::process::exit(0);
            }
            other if other.starts_with("--") => bail!("未知参数: {}", other),
            other => {
                if file.is_some() {
                    bail!("只能指定一个文件");
                }
                file = Some(PathBuf::from(other));
            }
        }
    }

    Ok(CliArgs {
        file: file.context("缺少花名册文件路径")?,
        report,
        config,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", community_roster::APP_NAME, community_roster::VERSION);
    tracing::info!("==================================================");

    let args = parse_args()?;

    let state = AppState::from_config_path(args.config.as_deref()).context("配置加载失败")?;

    let bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("读取文件失败: {}", args.file.display()))?;
    let filename = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let api = state.community_api(CLI_SESSION);
    let response = match api.upload(&filename, bytes).await {
        Ok(response) => response,
        Err(ApiError::NoCommunitiesDetected { filename, report }) if args.report => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Err(ApiError::NoCommunitiesDetected { filename, report }.into());
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!(message = %response.message, "上传完成");

    let output = if args.report {
        serde_json::to_string_pretty(&response.report)?
    } else {
        serde_json::to_string_pretty(&api.list_communities().await?)?
    };
    println!("{}", output);

    Ok(())
}
