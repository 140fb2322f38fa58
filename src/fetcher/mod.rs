// src/fetcher/mod.rs

mod external;
mod resources;

pub use external::ExternalTool;
pub use resources::{render_resource_list, write_resource_list};

use crate::{
    config::AppConfig,
    constants,
    error::*,
    models::{ContentDescriptor, RunOutcome},
};
use async_trait::async_trait;
use log::info;
use std::path::Path;

/// 将解析出的章节内容保存到目标目录。
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn fetch(
        &self,
        descriptor: &ContentDescriptor,
        target_dir: &Path,
        stem: &str,
    ) -> AppResult<RunOutcome>;
}

/// 视频交给外部下载工具，资源链接直接写成文本文件。
pub struct ContentFetcher {
    tool: ExternalTool,
}

impl ContentFetcher {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            tool: ExternalTool::from_config(config),
        }
    }

    pub fn with_tool(tool: ExternalTool) -> Self {
        Self { tool }
    }

    pub fn tool(&self) -> &ExternalTool {
        &self.tool
    }
}

#[async_trait]
impl Downloader for ContentFetcher {
    async fn fetch(
        &self,
        descriptor: &ContentDescriptor,
        target_dir: &Path,
        stem: &str,
    ) -> AppResult<RunOutcome> {
        match descriptor {
            ContentDescriptor::Video { stream_url } => {
                info!("找到视频，开始下载: {}", stem);
                self.tool.download(stream_url, target_dir, stem).await
            }
            ContentDescriptor::ResourceLinks(links) => {
                let path = write_resource_list(links, target_dir, stem)?;
                info!("资源链接已保存到 '{}'", path.display());
                Ok(RunOutcome::ResourcesSaved)
            }
            ContentDescriptor::None => Ok(RunOutcome::Skipped(constants::NO_CONTENT_REASON.to_string())),
        }
    }
}
