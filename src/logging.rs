// src/logging.rs

use crate::{cli::LogLevel, constants, error::*};
use fern::colors::{Color, ColoredLevelConfig};
use log::{LevelFilter, warn};
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

fn open_log_file(log_dir: &Path, file_name: &str) -> Option<(File, PathBuf)> {
    let primary = log_dir.join(file_name);
    if let Err(e) = fs::create_dir_all(log_dir) {
        eprintln!("警告: 无法创建日志目录 {:?}: {}", log_dir, e);
    }
    match fern::log_file(&primary) {
        Ok(file) => Some((file, primary)),
        Err(e) => {
            eprintln!("警告: 无法打开日志文件 {:?}: {}。将尝试使用临时目录。", primary, e);
            let fallback = std::env::temp_dir().join(format!("{}-{}", clap::crate_name!(), file_name));
            match fern::log_file(&fallback) {
                Ok(file) => Some((file, fallback)),
                Err(e_fb) => {
                    eprintln!("错误: 无法创建备用日志文件 {:?}: {}。日志将只输出到控制台。", fallback, e_fb);
                    None
                }
            }
        }
    }
}

/// 初始化控制台 (彩色) 与本次运行的日志文件 (无颜色)，返回日志文件路径。
pub fn init_logger(level: LogLevel, log_dir: &Path) -> AppResult<Option<PathBuf>> {
    if level == LogLevel::Off {
        return Ok(None);
    }
    let filter = level.to_filter();

    let colors = ColoredLevelConfig::new()
        .info(Color::White)
        .warn(Color::Yellow)
        .error(Color::Red)
        .debug(Color::Cyan)
        .trace(Color::BrightBlack);
    let console = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{}] [{}]: {}",
                chrono::Local::now().format("%d-%m-%Y %H:%M:%S"),
                colors.color(record.level()),
                message
            ))
        })
        .chain(std::io::stderr());

    let file_name = format!(
        "{}.log",
        chrono::Local::now().format(constants::LOG_FILE_TIME_FORMAT)
    );
    let log_file = open_log_file(log_dir, &file_name);

    let mut dispatch = fern::Dispatch::new()
        .level(filter)
        .level_for("html5ever", LevelFilter::Warn)
        .level_for("selectors", LevelFilter::Warn)
        .level_for("hyper_util", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .chain(console);

    let log_path = match log_file {
        Some((file, path)) => {
            let file_dispatch = fern::Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!(
                        "[{}] [{:<5}] [{}:{}] - {}",
                        chrono::Local::now().format("%d-%m-%Y %H:%M:%S%.3f"),
                        record.level(),
                        record.target(),
                        record.line().unwrap_or(0),
                        message
                    ))
                })
                .chain(file);
            dispatch = dispatch.chain(file_dispatch);
            Some(path)
        }
        None => None,
    };

    dispatch
        .apply()
        .map_err(|e| AppError::Other(anyhow::Error::new(e)))?;

    if log_path.is_none() {
        warn!("本次运行没有日志文件");
    }
    Ok(log_path)
}
