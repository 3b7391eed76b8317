// 号数ごとの処理サイクル
//
// 解凍 → 空ディレクトリ削除 → 画像の仕分け → アーカイブのディレクトリ削除 を
// カタログのラベル順に1件ずつ実行する。1件の失敗は後続に影響しない。

use crate::catalog::ArchiveCatalog;
use crate::cleanup;
use crate::config::TriageConfig;
use crate::core::{
    ArchiveEntry, ArchiveExtractor, Category, ClassifySummary, ImageProbe, PlacementCounters,
    ProgressReporter, TriageError, TriageResult,
};
use crate::file_scanner::ImageWalker;
use crate::fs_ops;
use crate::placement::PlacementResolver;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 1件のアーカイブがどこまで進んだか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryState {
    Discovered,
    Extracting,
    Extracted,
    ExtractFailed,
    Classifying,
    Classified,
    ArchiveRemoved,
}

/// 1件のアーカイブの処理結果
#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    pub label: String,
    pub archive: PathBuf,
    pub state: EntryState,
    pub images: ClassifySummary,
    pub error: Option<String>,
}

impl EntryReport {
    fn discovered(entry: &ArchiveEntry) -> Self {
        Self {
            label: entry.issue_label.clone(),
            archive: entry.path.clone(),
            state: EntryState::Discovered,
            images: ClassifySummary::default(),
            error: None,
        }
    }

    fn is_failed(&self) -> bool {
        self.state == EntryState::ExtractFailed || self.error.is_some()
    }
}

/// バッチ全体の結果（`--report` で JSON 出力する）
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub dry_run: bool,
    pub interrupted: bool,
    pub entries_total: usize,
    pub entries_completed: usize,
    pub entries_failed: usize,
    pub images: ClassifySummary,
    /// ラベルを抽出できずにカタログから除外されたパス
    pub dropped: Vec<PathBuf>,
    pub entries: Vec<EntryReport>,
}

impl RunSummary {
    fn new(catalog: &ArchiveCatalog, dry_run: bool) -> Self {
        let now = Utc::now();
        Self {
            started_at: now,
            finished_at: now,
            dry_run,
            interrupted: false,
            entries_total: catalog.len(),
            entries_completed: 0,
            entries_failed: 0,
            images: ClassifySummary::default(),
            dropped: catalog.dropped().to_vec(),
            entries: Vec::new(),
        }
    }

    fn record(&mut self, report: EntryReport) {
        self.images.absorb(&report.images);
        if report.is_failed() {
            self.entries_failed += 1;
        } else if report.state == EntryState::ArchiveRemoved {
            self.entries_completed += 1;
        }
        self.entries.push(report);
    }

    /// JSON で保存する
    pub fn save(&self, path: &Path) -> TriageResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| TriageError::io(path, std::io::Error::other(e)))?;
        fs::write(path, json).map_err(|source| TriageError::io(path, source))
    }
}

/// アーカイブ単位の処理を順に実行する
pub struct Orchestrator<E, P, R>
where
    E: ArchiveExtractor,
    P: ImageProbe,
    R: ProgressReporter,
{
    config: TriageConfig,
    extensions: Vec<String>,
    extractor: E,
    probe: P,
    reporter: R,
    resolver: PlacementResolver,
    cancel: Arc<AtomicBool>,
}

impl<E, P, R> Orchestrator<E, P, R>
where
    E: ArchiveExtractor,
    P: ImageProbe,
    R: ProgressReporter,
{
    pub fn new(config: TriageConfig, extractor: E, probe: P, reporter: R) -> Self {
        let resolver = PlacementResolver::new(&config.pc_dir, &config.mobile_dir)
            .with_max_collision_attempts(config.max_collision_attempts);
        Self {
            extensions: config.normalized_extensions(),
            config,
            extractor,
            probe,
            reporter,
            resolver,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 外部（Ctrl-C ハンドラなど）と共有する中断フラグを使う
    pub fn with_cancel_flag(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// 出力ディレクトリを作成する。失敗はバッチ全体の失敗
    pub fn prepare(&self) -> TriageResult<()> {
        for dir in [&self.config.mobile_dir, &self.config.pc_dir] {
            fs::create_dir_all(dir).map_err(|source| TriageError::io(dir, source))?;
        }
        Ok(())
    }

    /// カタログの全アーカイブを処理する
    pub fn run(&self, catalog: &ArchiveCatalog) -> TriageResult<RunSummary> {
        self.prepare()?;
        let mut summary = RunSummary::new(catalog, false);

        for (label, entry) in catalog.iter() {
            if self.is_cancelled() {
                tracing::warn!(label = %label, "中断されたため残りのアーカイブを処理しません");
                break;
            }
            summary.record(self.process_entry(entry));
        }

        summary.interrupted = self.is_cancelled();
        summary.finished_at = Utc::now();
        tracing::info!(
            total = summary.entries_total,
            completed = summary.entries_completed,
            failed = summary.entries_failed,
            images = summary.images.processed,
            image_errors = summary.images.errors,
            interrupted = summary.interrupted,
            "バッチ処理完了"
        );
        Ok(summary)
    }

    /// 何も変更せずに処理対象だけを返す
    pub fn dry_run(&self, catalog: &ArchiveCatalog) -> RunSummary {
        let mut summary = RunSummary::new(catalog, true);
        for (label, entry) in catalog.iter() {
            tracing::info!(label = %label, archive = %entry.path.display(), "処理対象");
            summary.entries.push(EntryReport::discovered(entry));
        }
        summary.finished_at = Utc::now();
        summary
    }

    /// 1件のアーカイブを処理する。失敗は `EntryReport` に記録して返す
    pub fn process_entry(&self, entry: &ArchiveEntry) -> EntryReport {
        let mut report = EntryReport::discovered(entry);
        let label = entry.issue_label.as_str();

        report.state = EntryState::Extracting;
        tracing::info!(label = %label, archive = %entry.path.display(), "解凍開始");
        let extracted = self
            .extractor
            .extract(&entry.path, &self.config.password, None)
            .and_then(|result| result.into_result(&entry.path));
        if let Err(e) = extracted {
            tracing::error!(label = %label, error = %e, "解凍に失敗したためこのアーカイブをスキップします");
            report.state = EntryState::ExtractFailed;
            report.error = Some(e.to_string());
            return report;
        }
        report.state = EntryState::Extracted;

        if self.config.clean_empty_dirs {
            cleanup::prune_empty_dirs(&self.config.input_dir, &self.output_dirs());
        }

        report.state = EntryState::Classifying;
        report.images = self.classify_dir(&entry.containing_directory, Some(label));
        if self.is_cancelled() {
            report.error = Some(TriageError::Interrupted.to_string());
            return report;
        }
        report.state = EntryState::Classified;

        // 1枚も移動できていなければ、解凍した画像を残すためディレクトリを消さない
        let placed = report.images.pc + report.images.mobile;
        if placed == 0 && report.images.errors > 0 {
            tracing::warn!(
                label = %label,
                errors = report.images.errors,
                "画像を1枚も移動できなかったためアーカイブのディレクトリを残します"
            );
            report.error = Some(format!(
                "画像を1枚も移動できませんでした ({} 件のエラー): {}",
                report.images.errors,
                entry.containing_directory.display()
            ));
            return report;
        }

        if cleanup::remove_archive_dir(&entry.path) {
            report.state = EntryState::ArchiveRemoved;
        } else {
            report.error = Some(format!(
                "アーカイブのディレクトリを削除できません: {}",
                entry.containing_directory.display()
            ));
        }
        report
    }

    fn output_dirs(&self) -> [PathBuf; 2] {
        [self.config.mobile_dir.clone(), self.config.pc_dir.clone()]
    }

    /// `root` 配下の画像を向きで仕分けて出力ディレクトリへ移動する
    ///
    /// 連番カウンタはこの呼び出しの中だけで使う。
    pub fn classify_dir(&self, root: &Path, label: Option<&str>) -> ClassifySummary {
        let mut summary = ClassifySummary::default();
        let mut counters = PlacementCounters::new();
        self.reporter.report_started(root, label.map(str::to_string));

        let walker =
            ImageWalker::new(root, &self.extensions, &self.probe).excluding(self.output_dirs());

        for candidate in walker {
            if self.is_cancelled() {
                tracing::warn!(root = %root.display(), "中断されたため仕分けを打ち切ります");
                break;
            }
            summary.processed += 1;

            let placed = candidate.and_then(|candidate| {
                let destination = self.resolver.resolve(&candidate, &mut counters, label)?;
                let target = destination.path();
                fs_ops::move_file(&candidate.source_path, &target)?;
                tracing::debug!(
                    from = %candidate.source_path.display(),
                    to = %target.display(),
                    "移動"
                );
                Ok(destination.category)
            });

            match placed {
                Ok(Category::Pc) => summary.pc += 1,
                Ok(Category::Mobile) => summary.mobile += 1,
                Err(e) => {
                    summary.errors += 1;
                    self.reporter
                        .report_error(e.path().unwrap_or(root), &e.to_string());
                }
            }
            self.reporter.report_progress(summary.processed);
        }

        self.reporter.report_completed(&summary);
        summary
    }
}
