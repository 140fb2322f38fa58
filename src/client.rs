// src/client.rs

use crate::{config::AppConfig, error::*};
use log::debug;
use reqwest::{IntoUrl, Response, cookie::Jar};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::sync::Arc;

/// 带 Cookie 存储和瞬时错误重试的 HTTP 客户端
#[derive(Clone)]
pub struct RobustClient {
    pub client: ClientWithMiddleware,
}

impl RobustClient {
    pub fn new(config: &AppConfig, cookie_jar: Arc<Jar>) -> AppResult<Self> {
        let retry_policy =
            ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(
            reqwest::Client::builder()
                .user_agent(config.user_agent.clone())
                .connect_timeout(config.connect_timeout)
                .timeout(config.timeout)
                .cookie_provider(cookie_jar)
                .build()?,
        )
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build();

        Ok(Self { client })
    }

    pub async fn get<T: IntoUrl>(&self, url: T) -> AppResult<Response> {
        let res = self.client.get(url).send().await?;
        Ok(res.error_for_status()?)
    }

    pub async fn get_text<T: IntoUrl>(&self, url: T) -> AppResult<String> {
        let res = self.get(url).await?;
        debug!("GET {} -> {}", res.url(), res.status());
        Ok(res.text().await?)
    }
}
