// src/session/mod.rs

pub mod cookies;

use crate::{client::RobustClient, config::AppConfig, error::*};
use async_trait::async_trait;
use log::{debug, info};
use std::time::Duration;

/// 渲染一个页面并返回稳定后的 HTML。
#[async_trait]
pub trait PageRenderer: Send + Sync {
    async fn render(&self, url: &str) -> AppResult<String>;

    /// 释放会话持有的资源。每次运行结束时都会调用一次。
    async fn close(&self) {}
}

/// 使用导出的 Cookie 进行认证的 HTTP 会话
pub struct HttpSession {
    http_client: RobustClient,
    settle_delay: Duration,
}

impl HttpSession {
    /// 加载 Cookie 文件并建立会话。Cookie 文件缺失时在任何网络访问之前失败。
    pub fn establish(config: &AppConfig) -> AppResult<Self> {
        let records = cookies::load_cookies(&config.cookies_file)?;
        let jar = cookies::build_cookie_jar(&records, &config.site_origin);
        let http_client = RobustClient::new(config, jar)?;
        info!("会话已建立: {}", config.origin_str());
        Ok(Self {
            http_client,
            settle_delay: config.settle_delay,
        })
    }
}

#[async_trait]
impl PageRenderer for HttpSession {
    async fn render(&self, url: &str) -> AppResult<String> {
        debug!("加载页面: {}", url);
        let html = self.http_client.get_text(url).await?;
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }
        Ok(html)
    }

    async fn close(&self) {
        info!("关闭会话");
    }
}
