// 単体で使う掃除ユーティリティ
//
// - サイズが一致するファイルの削除（既知のプレースホルダー画像など）
// - 仕分け済みファイル（`mobile_*` / `pc_*`）の一括削除

use crate::fs_ops;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 掃除の集計
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepSummary {
    pub scanned: usize,
    pub matched: Vec<PathBuf>,
    pub deleted: usize,
    pub errors: usize,
}

/// バイト数が `size` と完全一致するファイルを削除する
///
/// 内容は比較しないため、同じサイズの別ファイルも削除される。
/// `dry_run` なら一覧を返すだけで削除しない。
pub fn sweep_by_size(dir: &Path, size: u64, dry_run: bool) -> SweepSummary {
    let mut summary = SweepSummary::default();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "ディレクトリを走査できません");
                summary.errors += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        summary.scanned += 1;

        let len = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                tracing::warn!(path = %entry.path().display(), error = %e, "ファイルサイズを取得できません");
                summary.errors += 1;
                continue;
            }
        };
        if len == size {
            summary.matched.push(entry.into_path());
        }
    }

    if !dry_run {
        delete_all(&mut summary);
    }
    tracing::info!(
        scanned = summary.scanned,
        matched = summary.matched.len(),
        deleted = summary.deleted,
        errors = summary.errors,
        "サイズ一致ファイルの掃除完了"
    );
    summary
}

/// `dir` 直下で `prefix` から始まるファイルを削除する
pub fn purge_prefixed(dir: &Path, prefix: &str, dry_run: bool) -> SweepSummary {
    let mut summary = SweepSummary::default();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "ディレクトリを走査できません");
                summary.errors += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        summary.scanned += 1;
        if entry.file_name().to_string_lossy().starts_with(prefix) {
            summary.matched.push(entry.into_path());
        }
    }

    if !dry_run {
        delete_all(&mut summary);
    }
    tracing::info!(
        dir = %dir.display(),
        prefix,
        deleted = summary.deleted,
        errors = summary.errors,
        "仕分け済みファイルの削除完了"
    );
    summary
}

fn delete_all(summary: &mut SweepSummary) {
    for path in &summary.matched {
        match fs_ops::delete_file(path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "削除");
                summary.deleted += 1;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "削除できません");
                summary.errors += 1;
            }
        }
    }
}
