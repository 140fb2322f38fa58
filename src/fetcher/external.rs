// src/fetcher/external.rs

use crate::{config::AppConfig, error::*, models::RunOutcome};
use log::{debug, error, info};
use std::{ffi::OsString, path::Path, process::Stdio};
use tokio::process::Command;

/// 外部视频下载工具 (默认 yt-dlp) 的调用方式
#[derive(Debug, Clone)]
pub struct ExternalTool {
    program: String,
    backend: String,
    referer: String,
}

impl ExternalTool {
    pub fn new(program: &str, backend: &str, site_origin: &str) -> Self {
        Self {
            program: program.to_string(),
            backend: backend.to_string(),
            referer: format!("{}/", site_origin.trim_end_matches('/')),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.downloader_program,
            &config.downloader_backend,
            config.origin_str(),
        )
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn video_command_args(&self, stream_url: &str, target_dir: &Path, stem: &str) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--add-headers".into(),
            format!("Referer: {}", self.referer).into(),
        ];
        if !self.backend.is_empty() {
            args.push("--downloader".into());
            args.push(self.backend.clone().into());
        }
        args.push("-P".into());
        args.push(target_dir.as_os_str().to_os_string());
        args.push("-o".into());
        args.push(format!("{}.%(ext)s", stem).into());
        args.push(stream_url.into());
        args
    }

    /// 阻塞等待工具退出；非零退出码记为失败，stderr 写入日志。
    pub async fn download(&self, stream_url: &str, target_dir: &Path, stem: &str) -> AppResult<RunOutcome> {
        let args = self.video_command_args(stream_url, target_dir, stem);
        debug!("执行: {} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| AppError::DownloadTool(format!("{}: {}", self.program, e)))?;

        if output.status.success() {
            info!("视频 '{}' 下载完成", stem);
            return Ok(RunOutcome::Downloaded);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        error!("{} 下载 '{}' 失败，输出:\n{}", self.program, stem, stderr.trim_end());
        let code = output
            .status
            .code()
            .map_or_else(|| "signal".to_string(), |c| c.to_string());
        let last_line = stderr.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or("");
        Ok(RunOutcome::Failed(format!(
            "下载工具退出 (code {}): {}",
            code,
            last_line.trim()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn test_video_command_args() {
        let tool = ExternalTool::new("yt-dlp", "aria2c", "https://escuelafullstack.com/");
        let args = tool.video_command_args("X", Path::new("out/01-Intro"), "01-Bienvenida");
        assert_eq!(
            as_strings(args),
            vec![
                "--add-headers",
                "Referer: https://escuelafullstack.com/",
                "--downloader",
                "aria2c",
                "-P",
                "out/01-Intro",
                "-o",
                "01-Bienvenida.%(ext)s",
                "X",
            ]
        );
    }

    #[test]
    fn test_empty_backend_is_omitted() {
        let tool = ExternalTool::new("yt-dlp", "", "https://escuelafullstack.com");
        let args = as_strings(tool.video_command_args("X", Path::new("d"), "s"));
        assert!(!args.iter().any(|a| a == "--downloader"));
        assert_eq!(args[1], "Referer: https://escuelafullstack.com/");
    }
}
