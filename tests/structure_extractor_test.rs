// tests/structure_extractor_test.rs

use fs_dl::{
    error::AppResult,
    extractor::{ContentResolver, StructureExtractor},
    models::{ContentDescriptor, ResourceLink},
};
use std::fs;
use url::Url;

fn extractor() -> StructureExtractor {
    StructureExtractor::new(Url::parse("https://escuelafullstack.com").unwrap())
}

#[test]
fn test_course_page_fixture() -> AppResult<()> {
    let html = fs::read_to_string("tests/fixtures/course_page.html").expect("无法读取课程页面样例");

    let structure = extractor().extract(&html)?;

    // 两个模块，顺序与页面一致
    let titles: Vec<_> = structure.modules.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Módulo 1_ Fundamentos", "Módulo 2_ Ramas"]);

    // 第一个模块的 3 个条目中有一个标记为 o_not_editable
    let first = &structure.modules[0];
    assert_eq!(first.chapters.len(), 2);
    assert_eq!(first.chapters[0].title, "Bienvenida");
    assert_eq!(first.chapters[0].url, "https://escuelafullstack.com/slides/slide/bienvenida-101");
    assert_eq!(first.chapters[1].title, "¿Qué es Git_");
    assert_eq!(first.chapters[1].url, "https://escuelafullstack.com/slides/slide/que-es-git-103");

    // 无链接的锁定章节与空列表占位符被忽略
    let second = &structure.modules[1];
    assert_eq!(second.chapters.len(), 1);
    assert_eq!(second.chapters[0].title, "Crear ramas");

    assert_eq!(structure.chapter_count(), 3);
    Ok(())
}

#[test]
fn test_chapter_fixtures_resolve() {
    let resolver = ContentResolver::new();

    let video = fs::read_to_string("tests/fixtures/chapter_video.html").unwrap();
    assert_eq!(
        resolver.resolve(&video),
        ContentDescriptor::Video {
            stream_url: "https://media.escuelafullstack.com/videos/bienvenida.mp4".into()
        }
    );

    let resources = fs::read_to_string("tests/fixtures/chapter_resources.html").unwrap();
    assert_eq!(
        resolver.resolve(&resources),
        ContentDescriptor::ResourceLinks(vec![
            ResourceLink {
                name: "Slides".into(),
                url: "https://escuelafullstack.com/web/content/70".into()
            },
            ResourceLink {
                name: "Exercise".into(),
                url: "https://github.com/escuelafullstack/ejercicio-git".into()
            },
        ])
    );
}
