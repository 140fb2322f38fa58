// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Cookie 文件 '{}' 不存在，请先导出已登录会话的 Cookie", .0.display())]
    CookieFileMissing(PathBuf),
    #[error("课程链接 '{url}' 不属于站点 {origin}")]
    CourseUrlRejected { url: String, origin: String },
    #[error("页面中未找到任何课程模块 (可能是 Cookie 已失效或链接不是课程页面)")]
    EmptyStructure,
    #[error("路径过长，无法在 '{}' 下放置文件名", .0.display())]
    PathTooLong(PathBuf),
    #[error("无法启动下载工具: {0}")]
    DownloadTool(String),
    #[error("网络请求失败: {0}")]
    Network(#[from] reqwest::Error),
    #[error("网络中间件错误: {0}")]
    NetworkMiddleware(#[from] reqwest_middleware::Error),
    #[error("I/O 错误: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),
    #[error("URL 解析错误: {0}")]
    Url(#[from] url::ParseError),
    #[error("用户中断")]
    UserInterrupt,
    #[error("未知错误: {0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// 前置条件失败：立即终止整个运行
    pub fn is_fatal_precondition(&self) -> bool {
        matches!(
            self,
            AppError::CookieFileMissing(_)
                | AppError::CourseUrlRejected { .. }
                | AppError::EmptyStructure
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
