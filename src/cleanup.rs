use crate::fs_ops;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 空ディレクトリ削除の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneSummary {
    pub removed: usize,
    pub errors: usize,
}

/// `root` 配下の空ディレクトリを下の階層から順に削除する
///
/// 子を先に評価するので、空ディレクトリだけを含む親も削除される。
/// `root` 自身と、`keep` に含まれるディレクトリおよびその祖先は削除しない。
/// 削除に失敗しても続行する。
pub fn prune_empty_dirs(root: &Path, keep: &[PathBuf]) -> PruneSummary {
    let mut summary = PruneSummary::default();
    let keep: Vec<PathBuf> = keep
        .iter()
        .map(|dir| dir.canonicalize().unwrap_or_else(|_| dir.clone()))
        .collect();

    for entry in WalkDir::new(root).min_depth(1).contents_first(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "ディレクトリを走査できません");
                summary.errors += 1;
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let path = entry.path();
        if is_kept(path, &keep) {
            continue;
        }
        let is_empty = match fs::read_dir(path) {
            Ok(mut listing) => listing.next().is_none(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ディレクトリを読めません");
                summary.errors += 1;
                continue;
            }
        };
        if !is_empty {
            continue;
        }

        match fs::remove_dir(path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "空ディレクトリを削除");
                summary.removed += 1;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "空ディレクトリを削除できません");
                summary.errors += 1;
            }
        }
    }

    tracing::info!(removed = summary.removed, root = %root.display(), "空ディレクトリの掃除完了");
    summary
}

/// `path` が `keep` のいずれかと同じか、その祖先であるか
fn is_kept(path: &Path, keep: &[PathBuf]) -> bool {
    if keep.is_empty() {
        return false;
    }
    let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    keep.iter().any(|dir| dir.starts_with(&path))
}

/// アーカイブのあるディレクトリを丸ごと削除する。失敗はログに残すだけ
pub fn remove_archive_dir(archive: &Path) -> bool {
    let Some(dir) = archive.parent().filter(|p| !p.as_os_str().is_empty()) else {
        tracing::warn!(path = %archive.display(), "アーカイブの親ディレクトリを特定できません");
        return false;
    };

    match fs_ops::delete_tree(dir) {
        Ok(()) => {
            tracing::info!(path = %dir.display(), "アーカイブのディレクトリを削除");
            true
        }
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "アーカイブのディレクトリを削除できません");
            false
        }
    }
}
