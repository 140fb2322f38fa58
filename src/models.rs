// src/models.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// 课程中单个可下载的章节
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    #[serde(rename = "module")]
    pub title: String,
    pub chapters: Vec<Chapter>,
}

/// 完整的课程大纲，序列化为 `[{ "module": .., "chapters": [..] }]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseStructure {
    pub modules: Vec<Module>,
}

impl CourseStructure {
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn chapter_count(&self) -> usize {
        self.modules.iter().map(|m| m.chapters.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLink {
    pub name: String,
    pub url: String,
}

/// 章节页面解析后的内容类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentDescriptor {
    Video { stream_url: String },
    ResourceLinks(Vec<ResourceLink>),
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Downloaded,
    ResourcesSaved,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Downloaded,
    ResourcesSaved,
    Skipped(String),
    Failed(String),
}

impl RunOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            RunOutcome::Downloaded => OutcomeKind::Downloaded,
            RunOutcome::ResourcesSaved => OutcomeKind::ResourcesSaved,
            RunOutcome::Skipped(_) => OutcomeKind::Skipped,
            RunOutcome::Failed(_) => OutcomeKind::Failed,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            RunOutcome::Skipped(reason) | RunOutcome::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Downloaded => write!(f, "视频已下载"),
            RunOutcome::ResourcesSaved => write!(f, "资源链接已保存"),
            RunOutcome::Skipped(reason) => write!(f, "已跳过: {}", reason),
            RunOutcome::Failed(reason) => write!(f, "失败: {}", reason),
        }
    }
}

/// 报告中记录的单个章节结果
#[derive(Debug, Clone)]
pub struct ChapterRecord {
    pub module_index: usize,
    pub chapter_index: usize,
    pub label: String,
    pub outcome: RunOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_snapshot_shape() {
        let structure = CourseStructure {
            modules: vec![Module {
                title: "Fundamentos".into(),
                chapters: vec![Chapter {
                    title: "Bienvenida".into(),
                    url: "https://escuelafullstack.com/slides/slide/bienvenida-1".into(),
                }],
            }],
        };

        let json = serde_json::to_value(&structure).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {
                    "module": "Fundamentos",
                    "chapters": [
                        { "title": "Bienvenida", "url": "https://escuelafullstack.com/slides/slide/bienvenida-1" }
                    ]
                }
            ])
        );

        // 字段顺序：module 在 chapters 之前
        let text = serde_json::to_string(&structure).unwrap();
        assert!(text.find("\"module\"").unwrap() < text.find("\"chapters\"").unwrap());
    }

    #[test]
    fn test_outcome_kind_and_reason() {
        assert_eq!(RunOutcome::Downloaded.kind(), OutcomeKind::Downloaded);
        assert_eq!(RunOutcome::Skipped("x".into()).reason(), Some("x"));
        assert_eq!(RunOutcome::ResourcesSaved.reason(), None);
        assert_eq!(RunOutcome::Failed("boom".into()).to_string(), "失败: boom");
    }
}
