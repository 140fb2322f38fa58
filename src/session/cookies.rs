// src/session/cookies.rs

use crate::error::*;
use anyhow::Context;
use log::{debug, info, warn};
use reqwest::cookie::{CookieStore, Jar};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, sync::Arc};
use url::Url;

const VALID_SAME_SITE: [&str; 3] = ["Strict", "Lax", "None"];
const DEFAULT_SAME_SITE: &str = "Lax";

/// 浏览器扩展导出的单条 Cookie 记录
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieRecord {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub secure: Option<bool>,
    #[serde(default)]
    pub http_only: Option<bool>,
    #[serde(default)]
    pub same_site: Option<String>,
}

impl CookieRecord {
    /// 缺失或无法识别的 sameSite 一律视为 `Lax`
    pub fn normalized_same_site(&self) -> &str {
        match self.same_site.as_deref() {
            Some(value) if VALID_SAME_SITE.contains(&value) => value,
            _ => DEFAULT_SAME_SITE,
        }
    }

    /// 生成可以写入 Cookie 存储的 `Set-Cookie` 形式字符串。
    /// 域名与站点主机相同时按 host-only Cookie 处理。
    pub fn to_set_cookie(&self, origin: &Url) -> String {
        let mut parts = vec![format!("{}={}", self.name, self.value)];

        let domain = self.domain.trim_start_matches('.');
        if !domain.is_empty() && Some(domain) != origin.host_str() {
            parts.push(format!("Domain={}", self.domain));
        }
        parts.push(format!("Path={}", self.path.as_deref().unwrap_or("/")));
        parts.push(format!("SameSite={}", self.normalized_same_site()));
        if self.secure == Some(true) {
            parts.push("Secure".to_string());
        }
        if self.http_only == Some(true) {
            parts.push("HttpOnly".to_string());
        }
        parts.join("; ")
    }

    /// 这条 Cookie 应当被发送到的地址：其域名 (或站点主机) 加上其路径
    fn scope_url(&self, origin: &Url) -> Option<Url> {
        let mut url = origin.clone();
        let domain = self.domain.trim_start_matches('.');
        if !domain.is_empty() {
            url.set_host(Some(domain)).ok()?;
        }
        if self.secure == Some(true) {
            url.set_scheme("https").ok()?;
        }
        url.set_path(self.path.as_deref().unwrap_or("/"));
        Some(url)
    }
}

/// Cookie 存储会静默丢弃不接受的 Cookie，写入后需要回读确认
fn is_stored(jar: &Jar, cookie: &CookieRecord, origin: &Url) -> bool {
    let Some(url) = cookie.scope_url(origin) else {
        return false;
    };
    let prefix = format!("{}=", cookie.name);
    jar.cookies(&url)
        .and_then(|header| header.to_str().map(str::to_owned).ok())
        .is_some_and(|header| header.split("; ").any(|pair| pair.starts_with(&prefix)))
}

pub fn load_cookies(path: &Path) -> AppResult<Vec<CookieRecord>> {
    if !path.is_file() {
        return Err(AppError::CookieFileMissing(path.to_path_buf()));
    }
    info!("从 '{}' 加载 Cookie", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("读取 Cookie 文件 '{}' 失败", path.display()))?;
    let cookies: Vec<CookieRecord> = serde_json::from_str(&content)
        .with_context(|| format!("解析 Cookie 文件 '{}' 失败", path.display()))?;
    Ok(cookies)
}

pub fn build_cookie_jar(cookies: &[CookieRecord], origin: &Url) -> Arc<Jar> {
    let jar = Jar::default();
    let mut added = 0;
    for cookie in cookies {
        if cookie.name.trim().is_empty() {
            warn!("跳过无名称的 Cookie (domain: '{}')", cookie.domain);
            continue;
        }
        let header = cookie.to_set_cookie(origin);
        debug!("添加 Cookie '{}' (SameSite={})", cookie.name, cookie.normalized_same_site());
        jar.add_cookie_str(&header, origin);
        if is_stored(&jar, cookie, origin) {
            added += 1;
        } else {
            warn!(
                "Cookie '{}' (domain: '{}') 未被接受，已跳过",
                cookie.name, cookie.domain
            );
        }
    }
    info!("已加载 {}/{} 个 Cookie", added, cookies.len());
    Arc::new(jar)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(same_site: Option<&str>) -> CookieRecord {
        CookieRecord {
            name: "session_id".into(),
            value: "abc".into(),
            domain: ".escuelafullstack.com".into(),
            path: None,
            secure: Some(true),
            http_only: None,
            same_site: same_site.map(String::from),
        }
    }

    #[test]
    fn test_same_site_normalization() {
        assert_eq!(record(None).normalized_same_site(), "Lax");
        assert_eq!(record(Some("no_restriction")).normalized_same_site(), "Lax");
        assert_eq!(record(Some("lax")).normalized_same_site(), "Lax");
        assert_eq!(record(Some("Strict")).normalized_same_site(), "Strict");
        assert_eq!(record(Some("None")).normalized_same_site(), "None");
    }

    #[test]
    fn test_set_cookie_string() {
        let origin = Url::parse("https://escuelafullstack.com").unwrap();
        assert_eq!(
            record(Some("unspecified")).to_set_cookie(&origin),
            "session_id=abc; Path=/; SameSite=Lax; Secure"
        );

        let mut other = record(Some("Strict"));
        other.domain = ".cdn.example.com".into();
        other.path = Some("/slides".into());
        other.http_only = Some(true);
        assert_eq!(
            other.to_set_cookie(&origin),
            "session_id=abc; Domain=.cdn.example.com; Path=/slides; SameSite=Strict; Secure; HttpOnly"
        );
    }

    #[test]
    fn test_parse_browser_export() {
        let json = r#"[
            { "name": "session_id", "value": "abc", "domain": "escuelafullstack.com",
              "hostOnly": true, "httpOnly": true, "sameSite": null, "expirationDate": 1790000000.5 },
            { "name": "frontend_lang", "value": "es_ES", "domain": ".escuelafullstack.com", "sameSite": "lax" }
        ]"#;
        let cookies: Vec<CookieRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies[0].http_only, Some(true));
        assert_eq!(cookies[0].normalized_same_site(), "Lax");
        assert_eq!(cookies[1].same_site.as_deref(), Some("lax"));
    }

    #[test]
    fn test_jar_keeps_only_cookies_for_the_site() {
        let origin = Url::parse("https://escuelafullstack.com").unwrap();
        let mut www = record(None);
        www.name = "www_session".into();
        www.domain = "www.escuelafullstack.com".into();
        let mut foreign = record(None);
        foreign.name = "tracker".into();
        foreign.domain = ".example.com".into();
        let cookies = vec![record(None), www.clone(), foreign.clone()];

        let jar = build_cookie_jar(&cookies, &origin);

        assert!(is_stored(&jar, &cookies[0], &origin));
        assert!(!is_stored(&jar, &www, &origin));
        assert!(!is_stored(&jar, &foreign, &origin));

        let sent = jar.cookies(&origin).unwrap();
        assert_eq!(sent.to_str().unwrap(), "session_id=abc");
    }

    #[test]
    fn test_missing_cookie_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cookies.json");
        let err = load_cookies(&path).unwrap_err();
        assert!(matches!(err, AppError::CookieFileMissing(_)));
        assert!(err.is_fatal_precondition());
    }
}
