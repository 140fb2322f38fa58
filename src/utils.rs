// src/utils.rs

use regex::Regex;
use std::{
    path::{MAIN_SEPARATOR, Path, PathBuf},
    sync::LazyLock,
    time::Duration,
};

static ILLEGAL_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).unwrap());

/// 将非法路径字符替换为 `_` 并去除首尾空白。
pub fn sanitize_name(name: &str) -> String {
    ILLEGAL_CHARS_RE.replace_all(name, "_").trim().to_string()
}

/// 目录在词法意义上的绝对路径。不解析符号链接，文件实际写入的路径就是预算的依据。
fn absolute_dir(base_dir: &Path) -> PathBuf {
    match std::path::absolute(base_dir) {
        Ok(path) => dunce::simplified(&path).to_path_buf(),
        Err(_) => base_dir.to_path_buf(),
    }
}

/// 保证 `base_dir/name` 的绝对路径不超过 `limit` 个字符。
///
/// 预算不足时按字符截断 `name` 并去掉末尾空白；若基础目录本身已经超出限制，
/// 返回空字符串，由调用方将其作为错误处理。
pub fn fit_to_path_budget(name: &str, base_dir: &Path, limit: usize) -> String {
    let mut base = absolute_dir(base_dir).to_string_lossy().into_owned();
    if !base.ends_with(MAIN_SEPARATOR) {
        base.push(MAIN_SEPARATOR);
    }
    let base_len = base.chars().count();

    if base_len + name.chars().count() <= limit {
        return name.to_string();
    }

    let budget = limit.saturating_sub(base_len);
    let truncated: String = name.chars().take(budget).collect();
    truncated.trim_end().to_string()
}

/// 带两位序号前缀的名称，例如 `03-Introducción`
pub fn numbered_name(index: usize, title: &str) -> String {
    format!("{:02}-{}", index + 1, title)
}

pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let (hours, rem) = (total / 3600, total % 3600);
    let (minutes, seconds) = (rem / 60, rem % 60);
    format!("{}h {}m {}s", hours, minutes, seconds)
}

pub fn truncate_text(text: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut end_pos = 0;
    for (i, c) in text.char_indices() {
        width += if c.is_ascii() { 1 } else { 2 };
        if width > max_width.saturating_sub(3) {
            end_pos = i;
            break;
        }
    }
    if end_pos == 0 { text.to_string() } else { format!("{}...", &text[..end_pos]) }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ILLEGAL: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

    #[test]
    fn test_sanitize_name() {
        // 每个非法字符都替换为下划线
        assert_eq!(sanitize_name(r#"a<b>c:d"e/f\g|h?i*j"#), "a_b_c_d_e_f_g_h_i_j");

        // 首尾空白被去除，中间空白保留
        assert_eq!(sanitize_name("  Clase 1:  Intro  "), "Clase 1_  Intro");

        // 非 ASCII 字符保持不变
        assert_eq!(sanitize_name("Introducción ¿qué?"), "Introducción ¿qué_");

        assert_eq!(sanitize_name(""), "");
    }

    #[test]
    fn test_sanitize_name_is_idempotent_and_clean() {
        let samples = [
            "Módulo 1: Fundamentos",
            " <script>alert(1)</script> ",
            "a/b\\c",
            "???",
            "  \t ",
            "ok",
        ];
        for sample in samples {
            let once = sanitize_name(sample);
            assert!(!once.contains(ILLEGAL), "'{}' 仍含非法字符", once);
            assert_eq!(sanitize_name(&once), once);
        }
    }

    #[test]
    fn test_fit_to_path_budget_keeps_short_names() {
        let base = std::env::temp_dir();
        assert_eq!(fit_to_path_budget("01-Intro", &base, 4096), "01-Intro");
    }

    #[test]
    fn test_fit_to_path_budget_truncates_to_limit() {
        let base = std::env::temp_dir();
        let base_len = absolute_dir(&base).to_string_lossy().chars().count() + 1;
        let name = "01-Un capítulo con un título extremadamente largo que no cabe";

        for extra in [1usize, 5, 10, 20] {
            let limit = base_len + extra;
            let fitted = fit_to_path_budget(name, &base, limit);
            assert!(fitted.chars().count() <= extra);
            let joined = absolute_dir(&base).join(&fitted);
            assert!(joined.to_string_lossy().chars().count() <= limit);
        }
    }

    #[test]
    fn test_fit_to_path_budget_trims_cut_whitespace() {
        let base = std::env::temp_dir();
        let base_len = absolute_dir(&base).to_string_lossy().chars().count() + 1;
        // 截断点正好落在空格之后
        let fitted = fit_to_path_budget("abc def", &base, base_len + 4);
        assert_eq!(fitted, "abc");
    }

    #[test]
    fn test_fit_to_path_budget_never_underflows() {
        let base = std::env::temp_dir();
        assert_eq!(fit_to_path_budget("01-Intro", &base, 1), "");
        assert_eq!(fit_to_path_budget("01-Intro", &base, 0), "");
    }

    #[test]
    fn test_fit_to_path_budget_with_missing_directory() {
        let base = std::env::temp_dir().join("fs-dl-does-not-exist").join("01-Modulo");
        assert_eq!(fit_to_path_budget("01-Intro", &base, 4096), "01-Intro");
        assert_eq!(fit_to_path_budget("01-Intro", &base, 1), "");
    }

    #[cfg(unix)]
    #[test]
    fn test_fit_to_path_budget_measures_symlink_path_not_target() {
        let root = tempfile::tempdir().unwrap();
        let target = root.path().join("t");
        std::fs::create_dir_all(&target).unwrap();
        let link = root
            .path()
            .join("un-enlace-simbolico-con-un-nombre-bastante-largo-para-la-prueba");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let link_len = link.to_string_lossy().chars().count();
        let limit = link_len + 20;
        let name = format!("01-{}", "x".repeat(100));
        let fitted = fit_to_path_budget(&name, &link, limit);

        assert!(!fitted.is_empty());
        let joined = link.join(&fitted);
        assert!(joined.to_string_lossy().chars().count() <= limit);
    }

    #[test]
    fn test_numbered_name_and_elapsed() {
        assert_eq!(numbered_name(0, "Intro"), "01-Intro");
        assert_eq!(numbered_name(11, "Cierre"), "12-Cierre");
        assert_eq!(numbered_name(99, "X"), "100-X");
        assert_eq!(format_elapsed(Duration::from_secs(3723)), "1h 2m 3s");
        assert_eq!(format_elapsed(Duration::from_millis(999)), "0h 0m 0s");
    }
}
