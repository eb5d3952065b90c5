use anyhow::{Context, Result};
use clap::Parser;
use file_selector::{config::AppConfig, entry::local, logging, EventResolver};
use std::path::PathBuf;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "file-selector")]
#[command(about = "模拟拖入本地文件 / 文件夹，输出解析后的文件列表（JSON）", long_about = None)]
struct CliArgs {
    /// 配置文件路径（TOML），不指定时使用默认配置
    #[arg(short, long)]
    config: Option<String>,

    /// 要拖入的文件或文件夹
    #[arg(required = true, value_name = "PATH")]
    paths: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => AppConfig::load_from_file(path)
            .await
            .with_context(|| format!("加载配置文件失败: {}", path))?,
        None => AppConfig::default(),
    };

    // 初始化日志系统（必须保持 _log_guard 存活）
    let _log_guard = logging::init_logging(&config.log);

    info!("模拟拖入 {} 个路径", args.paths.len());
    let event = local::drop_event(&args.paths, &config.scan)
        .await
        .context("构造 drop 事件失败")?;

    let selection = EventResolver::new()
        .resolve(event)
        .await
        .context("解析 drop 事件失败")?;

    let files = selection.into_files().unwrap_or_default();
    println!("{}", serde_json::to_string_pretty(&files)?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let parsed =
            CliArgs::try_parse_from(["file-selector", "-c", "app.toml", "a", "b/c"]).unwrap();
        assert_eq!(parsed.config.as_deref(), Some("app.toml"));
        assert_eq!(parsed.paths, vec![PathBuf::from("a"), PathBuf::from("b/c")]);
    }

    #[test]
    fn test_parse_long_config_with_equals() {
        let parsed = CliArgs::try_parse_from(["file-selector", "--config=app.toml", "a"]).unwrap();
        assert_eq!(parsed.config.as_deref(), Some("app.toml"));
        assert_eq!(parsed.paths, vec![PathBuf::from("a")]);
    }

    #[test]
    fn test_parse_requires_paths() {
        assert!(CliArgs::try_parse_from(["file-selector"]).is_err());
        assert!(CliArgs::try_parse_from(["file-selector", "--config"]).is_err());
    }

    #[test]
    fn test_help_is_not_a_failure() {
        let err = CliArgs::try_parse_from(["file-selector", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
