// src/extractor/utils.rs

use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

pub(super) static FIRST_SPAN: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span").unwrap());

/// 逐个去除文本节点首尾空白后直接拼接，忽略空节点
pub(super) fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// 链接的显示名称：优先取第一个 `span`，否则取整个元素的文本
pub(super) fn link_label(anchor: ElementRef<'_>) -> String {
    anchor
        .select(&FIRST_SPAN)
        .next()
        .map(stripped_text)
        .unwrap_or_else(|| stripped_text(anchor))
}

pub(super) fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn first<'a>(doc: &'a Html, css: &str) -> ElementRef<'a> {
        doc.select(&Selector::parse(css).unwrap()).next().unwrap()
    }

    #[test]
    fn test_stripped_text_joins_trimmed_nodes() {
        let doc = Html::parse_fragment("<div>  Clase <b> 1 </b>\n  <i></i> Intro </div>");
        assert_eq!(stripped_text(first(&doc, "div")), "Clase1Intro");
    }

    #[test]
    fn test_link_label_prefers_span() {
        let doc = Html::parse_fragment(
            r#"<a href="/x"><i class="fa"></i><span> Slides </span><small>pdf</small></a><a id="b" href="/y"> Ejercicio </a>"#,
        );
        assert_eq!(link_label(first(&doc, "a")), "Slides");
        assert_eq!(link_label(first(&doc, "a#b")), "Ejercicio");
    }

    #[test]
    fn test_has_class() {
        let doc = Html::parse_fragment(r#"<li class="o_wslides_slides_list_slide o_not_editable"></li>"#);
        let li = first(&doc, "li");
        assert!(has_class(li, "o_not_editable"));
        assert!(!has_class(li, "o_not"));
    }
}
