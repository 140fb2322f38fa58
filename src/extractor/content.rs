// src/extractor/content.rs

use super::utils::link_label;
use crate::{
    constants::markup,
    models::{ContentDescriptor, ResourceLink},
};
use log::debug;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static VIDEO_SOURCE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(markup::VIDEO_SOURCE).unwrap());
static RESOURCE_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(markup::RESOURCE_LINK).unwrap());

/// 判断章节页面包含的是视频还是资源链接。视频优先。
#[derive(Debug, Default, Clone, Copy)]
pub struct ContentResolver;

impl ContentResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, html: &str) -> ContentDescriptor {
        let document = Html::parse_document(html);

        let video_src = document
            .select(&VIDEO_SOURCE)
            .filter_map(|source| source.value().attr("src"))
            .map(str::trim)
            .find(|src| !src.is_empty());
        if let Some(src) = video_src {
            debug!("找到 MP4 视频源: {}", src);
            return ContentDescriptor::Video {
                stream_url: src.to_string(),
            };
        }

        let links: Vec<ResourceLink> = document
            .select(&RESOURCE_LINK)
            .filter_map(|anchor| {
                anchor.value().attr("href").map(|href| ResourceLink {
                    name: link_label(anchor),
                    url: href.to_string(),
                })
            })
            .collect();
        if !links.is_empty() {
            debug!("找到 {} 个资源链接", links.len());
            return ContentDescriptor::ResourceLinks(links);
        }

        ContentDescriptor::None
    }
}
