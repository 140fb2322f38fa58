// src/lib.rs

pub mod cli;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod session;
pub mod symbols;
pub mod ui;
pub mod utils;

use crate::{
    cli::Cli,
    config::AppConfig,
    error::{AppError, AppResult},
    fetcher::ContentFetcher,
    pipeline::{CoursePipeline, RunReport},
    session::HttpSession,
};
use colored::*;
use log::{debug, info};
use std::sync::Arc;

/// 库的公共入口点，由 `main.rs` 调用
pub async fn run_from_cli(args: Arc<Cli>, config: Arc<AppConfig>) -> AppResult<RunReport> {
    debug!("CLI 参数: {:?}", args);
    debug!("加载的应用配置: {:?}", config);

    let input = match &args.url {
        Some(url) => url.clone(),
        None => ui::prompt("请输入课程链接", None).map_err(|_| AppError::UserInterrupt)?,
    };

    // 链接校验与 Cookie 检查都发生在任何网络访问之前
    let course_url = pipeline::validate_course_url(&input, &config.site_origin)?;
    info!("课程链接: {}", course_url);
    let session = HttpSession::establish(&config)?;

    let pipeline = CoursePipeline::new(
        config.clone(),
        Box::new(session),
        Box::new(ContentFetcher::new(&config)),
    );
    let report = pipeline.run(&course_url).await?;

    report.print_report();
    if !report.did_all_succeed() {
        println!(
            "\n{} {}",
            *symbols::WARN,
            "部分章节处理失败，详情请查看日志文件。".yellow()
        );
    }
    Ok(report)
}
