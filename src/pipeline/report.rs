// src/pipeline/report.rs

use crate::{
    models::{ChapterRecord, OutcomeKind, RunOutcome},
    symbols, ui, utils,
};
use colored::*;
use log::{error, info, warn};
use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub total: usize,
    pub downloaded: usize,
    pub resources_saved: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// 按章节追加记录运行结果，结束时输出汇总
#[derive(Debug)]
pub struct RunReport {
    records: Vec<ChapterRecord>,
    started: Instant,
    elapsed: Option<Duration>,
}

impl Default for RunReport {
    fn default() -> Self {
        Self::start()
    }
}

impl RunReport {
    pub fn start() -> Self {
        Self {
            records: Vec::new(),
            started: Instant::now(),
            elapsed: None,
        }
    }

    pub fn record(&mut self, module_index: usize, chapter_index: usize, label: &str, outcome: RunOutcome) {
        match &outcome {
            RunOutcome::Downloaded | RunOutcome::ResourcesSaved => {
                info!("章节 '{}': {}", label, outcome)
            }
            RunOutcome::Skipped(_) => warn!("章节 '{}': {}", label, outcome),
            RunOutcome::Failed(_) => error!("章节 '{}': {}", label, outcome),
        }
        self.records.push(ChapterRecord {
            module_index,
            chapter_index,
            label: label.to_string(),
            outcome,
        });
    }

    pub fn finish(&mut self) {
        self.elapsed = Some(self.started.elapsed());
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed.unwrap_or_else(|| self.started.elapsed())
    }

    pub fn records(&self) -> &[ChapterRecord] {
        &self.records
    }

    pub fn counts(&self) -> OutcomeCounts {
        let mut counts = OutcomeCounts {
            total: self.records.len(),
            ..Default::default()
        };
        for record in &self.records {
            match record.outcome.kind() {
                OutcomeKind::Downloaded => counts.downloaded += 1,
                OutcomeKind::ResourcesSaved => counts.resources_saved += 1,
                OutcomeKind::Skipped => counts.skipped += 1,
                OutcomeKind::Failed => counts.failed += 1,
            }
        }
        counts
    }

    pub fn did_all_succeed(&self) -> bool {
        self.counts().failed == 0
    }

    fn reasons_of(&self, kind: OutcomeKind) -> Vec<(String, String)> {
        self.records
            .iter()
            .filter(|r| r.outcome.kind() == kind)
            .map(|r| {
                (
                    r.label.clone(),
                    r.outcome.reason().unwrap_or_default().to_string(),
                )
            })
            .collect()
    }

    pub fn print_report(&self) {
        let counts = self.counts();
        let elapsed = utils::format_elapsed(self.elapsed());
        info!(
            "运行报告: Total={}, Downloaded={}, Resources={}, Skipped={}, Failed={}, Elapsed={}",
            counts.total,
            counts.downloaded,
            counts.resources_saved,
            counts.skipped,
            counts.failed,
            elapsed
        );

        let skipped = self.reasons_of(OutcomeKind::Skipped);
        let failed = self.reasons_of(OutcomeKind::Failed);
        if !skipped.is_empty() || !failed.is_empty() {
            ui::print_sub_header("章节详情报告");
            if !skipped.is_empty() {
                println!("\n{} 跳过的章节 ({}个):", *symbols::SKIP, counts.skipped);
                print_grouped_report(&skipped, |s| s.cyan());
            }
            if !failed.is_empty() {
                println!("\n{} 失败的章节 ({}个):", *symbols::ERROR, counts.failed);
                print_grouped_report(&failed, |s| s.red());
            }
        }

        ui::print_sub_header("任务总结");
        if counts.total > 0 && counts.failed == 0 {
            println!(
                "{} 所有 {} 个章节均已处理 ({} 个已跳过)。",
                *symbols::OK,
                counts.total,
                counts.skipped
            );
        }
        println!(
            "{} | {} | {} | {}",
            format!("视频: {}", counts.downloaded).green(),
            format!("资源: {}", counts.resources_saved).green(),
            format!("跳过: {}", counts.skipped).yellow(),
            format!("失败: {}", counts.failed).red()
        );
        println!("{} 总耗时 {}。", *symbols::INFO, elapsed);
    }
}

fn print_grouped_report(items: &[(String, String)], color_fn: fn(ColoredString) -> ColoredString) {
    let mut grouped: HashMap<&String, Vec<&String>> = HashMap::new();
    for (label, reason) in items {
        grouped.entry(reason).or_default().push(label);
    }
    let mut sorted_reasons: Vec<_> = grouped.keys().copied().collect();
    sorted_reasons.sort();
    for reason in sorted_reasons {
        println!("  - {}", color_fn(format!("原因: {}", reason).into()));
        // 同一原因下保持章节的处理顺序
        for label in &grouped[reason] {
            println!("    - {}", label);
        }
    }
}
