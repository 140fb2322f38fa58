// src/pipeline/mod.rs

mod report;

pub use report::{OutcomeCounts, RunReport};

use crate::{
    config::AppConfig,
    constants,
    error::*,
    extractor::{ContentResolver, StructureExtractor},
    fetcher::Downloader,
    models::{Chapter, ContentDescriptor, CourseStructure, Module, RunOutcome},
    session::PageRenderer,
    ui, utils,
};
use futures::FutureExt;
use log::{debug, error, info, warn};
use std::{
    any::Any,
    fs,
    panic::AssertUnwindSafe,
    path::{Path, PathBuf},
    sync::Arc,
};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Init,
    Authenticated,
    StructureExtracted,
    StructurePersisted,
    ProcessingChapters,
    Completed,
}

fn enter(stage: PipelineStage) {
    debug!("进入阶段: {:?}", stage);
}

/// 校验课程链接属于站点根地址。
pub fn validate_course_url(input: &str, origin: &Url) -> AppResult<Url> {
    let input = input.trim();
    let origin_str = origin.as_str().trim_end_matches('/');
    let rejected = || AppError::CourseUrlRejected {
        url: input.to_string(),
        origin: origin_str.to_string(),
    };

    let url = Url::parse(input).map_err(|_| rejected())?;
    if url.origin() != origin.origin() || !input.starts_with(origin_str) {
        return Err(rejected());
    }
    Ok(url)
}

/// 课程目录名：URL 路径的最后一个非空片段
pub fn course_slug(course_url: &Url) -> String {
    course_url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(utils::sanitize_name)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| constants::FALLBACK_COURSE_SLUG.to_string())
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "未知的内部错误".to_string()
    }
}

/// 驱动整个下载流程：解析课程结构 → 保存结构快照 → 逐章节解析并下载。
///
/// 章节按模块、章节顺序依次处理，单个章节的任何错误只会记录为该章节失败。
pub struct CoursePipeline {
    config: Arc<AppConfig>,
    renderer: Box<dyn PageRenderer>,
    downloader: Box<dyn Downloader>,
    extractor: StructureExtractor,
    resolver: ContentResolver,
}

impl CoursePipeline {
    pub fn new(
        config: Arc<AppConfig>,
        renderer: Box<dyn PageRenderer>,
        downloader: Box<dyn Downloader>,
    ) -> Self {
        let extractor = StructureExtractor::new(config.site_origin.clone());
        Self {
            config,
            renderer,
            downloader,
            extractor,
            resolver: ContentResolver::new(),
        }
    }

    /// 运行完整流程。无论成功与否，返回前都会关闭会话。
    pub async fn run(&self, course_url: &Url) -> AppResult<RunReport> {
        let result = self.run_stages(course_url).await;
        self.renderer.close().await;
        result
    }

    async fn run_stages(&self, course_url: &Url) -> AppResult<RunReport> {
        enter(PipelineStage::Init);
        let mut report = RunReport::start();
        enter(PipelineStage::Authenticated);

        let structure = self.extract_structure(course_url).await?;
        enter(PipelineStage::StructureExtracted);

        let course_dir = self.persist_structure(course_url, &structure)?;
        enter(PipelineStage::StructurePersisted);

        enter(PipelineStage::ProcessingChapters);
        let total = structure.chapter_count();
        let mut position = 0;
        for (module_index, module) in structure.modules.iter().enumerate() {
            self.process_module(module_index, module, &course_dir, total, &mut position, &mut report)
                .await;
        }

        report.finish();
        enter(PipelineStage::Completed);
        Ok(report)
    }

    pub async fn extract_structure(&self, course_url: &Url) -> AppResult<CourseStructure> {
        info!("获取课程结构: {}", course_url);
        let html = self.renderer.render(course_url.as_str()).await?;
        let structure = self.extractor.extract(&html)?;
        info!(
            "共解析到 {} 个模块，{} 个章节",
            structure.modules.len(),
            structure.chapter_count()
        );
        Ok(structure)
    }

    /// 在任何下载开始之前写入 `<slug>/<slug>.json`
    pub fn persist_structure(&self, course_url: &Url, structure: &CourseStructure) -> AppResult<PathBuf> {
        let slug = course_slug(course_url);
        let course_dir = self.config.output_dir.join(&slug);
        fs::create_dir_all(&course_dir)?;

        let snapshot_path = course_dir.join(format!("{}.json", slug));
        fs::write(&snapshot_path, serde_json::to_string_pretty(structure)?)?;
        info!("课程结构已保存到 '{}'", snapshot_path.display());
        Ok(course_dir)
    }

    async fn process_module(
        &self,
        module_index: usize,
        module: &Module,
        course_dir: &Path,
        total: usize,
        position: &mut usize,
        report: &mut RunReport,
    ) {
        let module_dir = match self.prepare_module_dir(module_index, module, course_dir) {
            Ok(dir) => dir,
            Err(e) => {
                error!("无法创建模块 '{}' 的目录: {}", module.title, e);
                for (chapter_index, chapter) in module.chapters.iter().enumerate() {
                    *position += 1;
                    let label = format!("{}/{}", module.title, chapter.title);
                    report.record(module_index, chapter_index, &label, RunOutcome::Failed(e.to_string()));
                }
                return;
            }
        };

        for (chapter_index, chapter) in module.chapters.iter().enumerate() {
            *position += 1;
            ui::print_sub_header(&format!(
                "[{}/{}] {}",
                position,
                total,
                utils::truncate_text(&chapter.title, 60)
            ));
            let label = format!("{}/{}", module.title, chapter.title);

            let attempt = AssertUnwindSafe(self.process_chapter(chapter_index, chapter, &module_dir))
                .catch_unwind()
                .await;
            let outcome = match attempt {
                Ok(Ok(outcome)) => outcome,
                Ok(Err(e)) => RunOutcome::Failed(e.to_string()),
                Err(payload) => RunOutcome::Failed(panic_message(payload)),
            };
            report.record(module_index, chapter_index, &label, outcome);
        }
    }

    fn prepare_module_dir(&self, module_index: usize, module: &Module, course_dir: &Path) -> AppResult<PathBuf> {
        let dir_name = utils::fit_to_path_budget(
            &utils::numbered_name(module_index, &module.title),
            course_dir,
            self.config.path_limit,
        );
        if dir_name.is_empty() {
            return Err(AppError::PathTooLong(course_dir.to_path_buf()));
        }
        let module_dir = course_dir.join(dir_name);
        fs::create_dir_all(&module_dir)?;
        info!("模块目录: '{}'", module_dir.display());
        Ok(module_dir)
    }

    async fn process_chapter(&self, chapter_index: usize, chapter: &Chapter, module_dir: &Path) -> AppResult<RunOutcome> {
        info!("处理章节: {}", chapter.title);
        let stem = utils::fit_to_path_budget(
            &utils::numbered_name(chapter_index, &chapter.title),
            module_dir,
            self.config.path_limit,
        );
        if stem.is_empty() {
            return Err(AppError::PathTooLong(module_dir.to_path_buf()));
        }

        let html = self.renderer.render(&chapter.url).await?;
        let descriptor = self.resolver.resolve(&html);
        if descriptor == ContentDescriptor::None {
            warn!("章节 '{}' 中没有视频或资源", chapter.title);
        }
        self.downloader.fetch(&descriptor, module_dir, &stem).await
    }
}
