// src/main.rs

use clap::{CommandFactory, FromArgMatches};
use colored::*;
use fs_dl::{
    cli::Cli, config::AppConfig, constants, error::AppError, logging, run_from_cli, symbols, ui,
};
use std::{env, path::PathBuf, sync::Arc, time::Duration};

#[tokio::main]
async fn main() {
    // 为 Windows 终端启用 ANSI 颜色支持。
    #[cfg(windows)]
    {
        colored::control::set_virtual_terminal(true).ok();
    }
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("\n{} 用户强制中断程序。", "[!]".yellow());
            tokio::time::sleep(Duration::from_millis(100)).await;
            std::process::exit(130);
        }
    });

    let bin_name = env::var("CARGO_BIN_NAME").unwrap_or_else(|_| "fs-dl".to_string());
    let after_help = format!(
        "示例:\n  # 交互式输入课程链接\n  {bin}\n\n  # 下载指定课程到 ./cursos\n  {bin} --url \"https://escuelafullstack.com/slides/...\" -o cursos\n\n  # 使用其他位置的 Cookie 文件\n  {bin} --url \"https://...\" --cookies ~/Downloads/cookies.json",
        bin = bin_name
    );
    let cmd = Cli::command().after_help(after_help);
    let args = match Cli::from_arg_matches(&cmd.get_matches()) {
        Ok(args) => Arc::new(args),
        Err(e) => e.exit(),
    };

    // 先确定日志目录再初始化日志，配置加载失败也会写入日志文件
    let config = AppConfig::new(&args);
    let log_dir = config
        .as_ref()
        .map_or_else(|_| PathBuf::from(constants::DEFAULT_LOG_DIR), |c| c.log_dir.clone());

    let logging_enabled = match logging::init_logger(args.log_level, &log_dir) {
        Ok(path) => {
            if let Some(path) = path {
                log::info!("日志文件: {}", path.display());
            }
            args.log_level != fs_dl::cli::LogLevel::Off
        }
        Err(e) => {
            eprintln!("{} 日志系统初始化失败: {}", *symbols::WARN, e);
            false
        }
    };

    let config = match config {
        Ok(config) => Arc::new(config),
        Err(e) => {
            report_error(&format!("加载配置失败: {}", e), logging_enabled);
            std::process::exit(1);
        }
    };
    if let (true, Some(path)) = (config.config_created, &config.config_path) {
        log::info!("配置文件 {:?} 不存在，已创建默认配置。", path);
    }

    ui::print_header("FS-Downloader");

    if let Err(e) = run_from_cli(args, config).await {
        report_error(&format!("程序执行出错: {}", e), logging_enabled);
        if matches!(e, AppError::CookieFileMissing(_)) {
            ui::box_message(
                "如何导出 Cookie",
                constants::HELP_COOKIES_GUIDE
                    .lines()
                    .collect::<Vec<_>>()
                    .as_slice(),
                |s| s.cyan(),
            );
        }
        std::process::exit(1);
    }
}

fn report_error(message: &str, logging_enabled: bool) {
    if logging_enabled {
        log::error!("{}", message);
    } else {
        eprintln!("\n{} {}", *symbols::ERROR, message.red());
    }
}
