// src/config.rs

pub mod file;

use self::file::{default_config_path, load_or_create_external_config};
use crate::{cli::Cli, constants, error::AppResult};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NetworkConfig {
    pub connect_timeout_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloaderConfig {
    pub program: String,
    /// 传给 `--downloader` 的后端，留空则使用工具自带的下载器
    #[serde(default)]
    pub backend: String,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            program: constants::DEFAULT_DOWNLOAD_TOOL.into(),
            backend: constants::DEFAULT_DOWNLOAD_BACKEND.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalConfig {
    #[serde(default = "default_site_origin")]
    pub site_origin: String,
    #[serde(default = "default_settle_delay_secs")]
    pub settle_delay_secs: u64,
    #[serde(default = "default_path_limit")]
    pub path_limit: usize,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub downloader: DownloaderConfig,
}

// --- serde default 辅助函数 ---
fn default_site_origin() -> String {
    constants::DEFAULT_SITE_ORIGIN.to_string()
}

fn default_settle_delay_secs() -> u64 {
    constants::DEFAULT_SETTLE_DELAY_SECS
}

fn default_path_limit() -> usize {
    constants::DEFAULT_PATH_LIMIT
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(constants::DEFAULT_LOG_DIR)
}

impl Default for ExternalConfig {
    fn default() -> Self {
        Self {
            site_origin: default_site_origin(),
            settle_delay_secs: default_settle_delay_secs(),
            path_limit: default_path_limit(),
            log_dir: default_log_dir(),
            network: NetworkConfig {
                connect_timeout_secs: Some(10),
                timeout_secs: Some(60),
                max_retries: Some(3),
            },
            downloader: DownloaderConfig::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub site_origin: Url,
    pub cookies_file: PathBuf,
    pub output_dir: PathBuf,
    pub log_dir: PathBuf,
    pub settle_delay: Duration,
    pub path_limit: usize,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub timeout: Duration,
    pub max_retries: u32,
    pub downloader_program: String,
    pub downloader_backend: String,
    /// 本次运行读取的配置文件，以及它是否刚被创建
    pub config_path: Option<PathBuf>,
    pub config_created: bool,
}

impl AppConfig {
    pub fn new(args: &Cli) -> AppResult<Self> {
        let config_path = match &args.config {
            Some(path) => path.clone(),
            None => default_config_path()?,
        };
        let config_created = !config_path.is_file();
        let external_config = load_or_create_external_config(&config_path)?;
        let mut config = Self::from_external(external_config, args)?;
        config.config_path = Some(config_path);
        config.config_created = config_created;
        Ok(config)
    }

    /// 合并配置文件与命令行参数，命令行优先
    pub fn from_external(external: ExternalConfig, args: &Cli) -> AppResult<Self> {
        let site_origin = Url::parse(&external.site_origin)?;
        Ok(Self {
            site_origin,
            cookies_file: args.cookies.clone(),
            output_dir: args.output.clone(),
            log_dir: external.log_dir,
            settle_delay: Duration::from_secs(
                args.settle_secs.unwrap_or(external.settle_delay_secs),
            ),
            path_limit: args.path_limit.unwrap_or(external.path_limit),
            user_agent: constants::USER_AGENT.into(),
            connect_timeout: Duration::from_secs(
                external.network.connect_timeout_secs.unwrap_or(10),
            ),
            timeout: Duration::from_secs(external.network.timeout_secs.unwrap_or(60)),
            max_retries: external.network.max_retries.unwrap_or(3),
            downloader_program: external.downloader.program,
            downloader_backend: external.downloader.backend,
            config_path: None,
            config_created: false,
        })
    }

    /// 站点根地址，不带末尾斜杠，用于前缀比较和 Referer
    pub fn origin_str(&self) -> &str {
        self.site_origin.as_str().trim_end_matches('/')
    }
}

#[cfg(feature = "testing")]
impl Default for AppConfig {
    fn default() -> Self {
        Self {
            site_origin: Url::parse(constants::DEFAULT_SITE_ORIGIN).unwrap(),
            cookies_file: PathBuf::from(constants::DEFAULT_COOKIES_FILE),
            output_dir: PathBuf::from(constants::DEFAULT_OUTPUT_DIR),
            log_dir: PathBuf::from(constants::DEFAULT_LOG_DIR),
            settle_delay: Duration::ZERO,
            path_limit: constants::DEFAULT_PATH_LIMIT,
            user_agent: "test-agent/1.0".to_string(),
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(15),
            max_retries: 0,
            downloader_program: constants::DEFAULT_DOWNLOAD_TOOL.to_string(),
            downloader_backend: constants::DEFAULT_DOWNLOAD_BACKEND.to_string(),
            config_path: None,
            config_created: false,
        }
    }
}
