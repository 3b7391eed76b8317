// 進捗報告の具象実装

use crate::core::{ClassifySummary, ProgressReporter};
use std::path::Path;

/// tracing へ進捗を流す実装
///
/// 進捗は `interval` 枚ごとにだけ出力する。
#[derive(Debug, Clone)]
pub struct LogProgressReporter {
    interval: usize,
}

impl LogProgressReporter {
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
        }
    }

    pub fn interval(&self) -> usize {
        self.interval
    }

    fn should_report(&self, processed: usize) -> bool {
        processed > 0 && processed % self.interval == 0
    }
}

impl Default for LogProgressReporter {
    fn default() -> Self {
        Self::new(100)
    }
}

impl ProgressReporter for LogProgressReporter {
    fn report_started(&self, root: &Path, label: Option<String>) {
        tracing::info!(
            root = %root.display(),
            label = label.as_deref().unwrap_or("-"),
            "画像の仕分けを開始"
        );
    }

    fn report_progress(&self, processed: usize) {
        if self.should_report(processed) {
            tracing::info!(processed, "仕分け中");
        }
    }

    fn report_error(&self, path: &Path, error: &str) {
        tracing::warn!(path = %path.display(), error, "画像を処理できません");
    }

    fn report_completed(&self, summary: &ClassifySummary) {
        tracing::info!(
            processed = summary.processed,
            pc = summary.pc,
            mobile = summary.mobile,
            errors = summary.errors,
            "画像の仕分け完了"
        );
    }
}

/// 何もしない進捗報告実装（テスト用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ProgressReporter for NoOpProgressReporter {
    fn report_started(&self, _root: &Path, _label: Option<String>) {}

    fn report_progress(&self, _processed: usize) {}

    fn report_error(&self, _path: &Path, _error: &str) {}

    fn report_completed(&self, _summary: &ClassifySummary) {}
}
