// src/extractor/structure.rs

use super::utils::{has_class, link_label, stripped_text};
use crate::{
    constants::{self, markup},
    error::*,
    models::{Chapter, CourseStructure, Module},
    utils,
};
use log::{debug, info, warn};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

static MODULE_CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(markup::MODULE_CONTAINER).unwrap());
static MODULE_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(markup::MODULE_TITLE).unwrap());
static CHAPTER_LIST: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(markup::CHAPTER_LIST).unwrap());
static CHAPTER_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(markup::CHAPTER_ITEM).unwrap());
static CHAPTER_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(markup::CHAPTER_LINK).unwrap());

/// 从课程主页的 HTML 中解析出 模块 → 章节 的层级结构。
///
/// 缺失的可选元素只会导致对应条目被降级或忽略，只有整页找不到任何模块时才返回错误。
pub struct StructureExtractor {
    origin: Url,
}

impl StructureExtractor {
    pub fn new(origin: Url) -> Self {
        Self { origin }
    }

    pub fn extract(&self, html: &str) -> AppResult<CourseStructure> {
        let document = Html::parse_document(html);
        let modules: Vec<Module> = document
            .select(&MODULE_CONTAINER)
            .map(|container| self.parse_module(container))
            .collect();

        if modules.is_empty() {
            warn!("课程页面中没有找到任何模块容器");
            return Err(AppError::EmptyStructure);
        }
        Ok(CourseStructure { modules })
    }

    fn parse_module(&self, container: ElementRef<'_>) -> Module {
        let title = container
            .select(&MODULE_TITLE)
            .next()
            .map(|span| utils::sanitize_name(&stripped_text(span)))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| {
                debug!("模块缺少标题元素，使用占位标题");
                constants::UNTITLED_MODULE.to_string()
            });

        let chapters: Vec<Chapter> = container
            .select(&CHAPTER_LIST)
            .next()
            .map(|list| {
                list.select(&CHAPTER_ITEM)
                    .filter_map(|item| self.parse_chapter(item))
                    .collect()
            })
            .unwrap_or_default();

        info!("找到模块: '{}'，包含 {} 个章节", title, chapters.len());
        Module { title, chapters }
    }

    fn parse_chapter(&self, item: ElementRef<'_>) -> Option<Chapter> {
        if has_class(item, markup::NOT_EDITABLE_CLASS) || has_class(item, markup::EMPTY_LIST_CLASS) {
            return None;
        }

        // 没有链接的条目是未解锁或不可用的章节
        let link = item.select(&CHAPTER_LINK).next()?;
        let href = link.value().attr("href")?;

        let url = match self.origin.join(href) {
            Ok(url) => url,
            Err(e) => {
                warn!("无法解析章节链接 '{}': {}", href, e);
                return None;
            }
        };

        let title = Some(utils::sanitize_name(&link_label(link)))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| constants::UNTITLED_CHAPTER.to_string());

        Some(Chapter {
            title,
            url: url.to_string(),
        })
    }
}
