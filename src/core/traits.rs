// パイプラインの差し替え可能な境界となるトレイト定義

use super::error::TriageResult;
use super::types::{ClassifySummary, ExtractionResult};
use mockall::automock;
use std::path::{Path, PathBuf};

/// 分割アーカイブの解凍を抽象化するトレイト
#[automock]
pub trait ArchiveExtractor {
    /// アーカイブを解凍する
    ///
    /// 前提条件の違反やプロセスの起動失敗は `Err`、プロセスが終了した場合は
    /// 終了コードに関わらず `Ok(ExtractionResult)` を返す。
    /// `dest` が `None` の場合はアーカイブと同じディレクトリに展開する。
    fn extract(
        &self,
        archive: &Path,
        password: &str,
        dest: Option<PathBuf>,
    ) -> TriageResult<ExtractionResult>;
}

/// 画像の寸法読み取りを抽象化するトレイト
#[automock]
pub trait ImageProbe {
    /// (幅, 高さ) を返す。デコーダのハンドルは呼び出し内で破棄される
    fn dimensions(&self, path: &Path) -> TriageResult<(u32, u32)>;
}

/// 進捗報告の抽象化トレイト
#[automock]
pub trait ProgressReporter {
    /// 仕分けパス開始時の報告
    fn report_started(&self, root: &Path, label: Option<String>);

    /// 進捗更新の報告
    fn report_progress(&self, processed: usize);

    /// 1件単位のエラー報告
    fn report_error(&self, path: &Path, error: &str);

    /// 仕分けパス完了時の報告
    fn report_completed(&self, summary: &ClassifySummary);
}

impl<T: ArchiveExtractor + ?Sized> ArchiveExtractor for Box<T> {
    fn extract(
        &self,
        archive: &Path,
        password: &str,
        dest: Option<PathBuf>,
    ) -> TriageResult<ExtractionResult> {
        self.as_ref().extract(archive, password, dest)
    }
}

impl<T: ProgressReporter + ?Sized> ProgressReporter for Box<T> {
    fn report_started(&self, root: &Path, label: Option<String>) {
        self.as_ref().report_started(root, label)
    }

    fn report_progress(&self, processed: usize) {
        self.as_ref().report_progress(processed)
    }

    fn report_error(&self, path: &Path, error: &str) {
        self.as_ref().report_error(path, error)
    }

    fn report_completed(&self, summary: &ClassifySummary) {
        self.as_ref().report_completed(summary)
    }
}
