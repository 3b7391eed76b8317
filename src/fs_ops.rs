// 権限エラー時に一度だけ再試行するファイル操作
//
// Windows では読み取り専用属性が付いたファイルの削除・移動が権限エラーになる。
// 属性を外してから一度だけやり直し、それでも失敗したら呼び出し側に返す。

use crate::core::{TriageError, TriageResult};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// ファイルを移動する。別デバイス間ではコピーしてから元を削除する
pub fn move_file(src: &Path, dst: &Path) -> TriageResult<()> {
    retry_on_permission(src, || rename_or_copy(src, dst), || clear_readonly(src))
}

/// ファイルを削除する
pub fn delete_file(path: &Path) -> TriageResult<()> {
    retry_on_permission(path, || fs::remove_file(path), || clear_readonly(path))
}

/// ディレクトリを中身ごと削除する
///
/// 権限エラーの場合は配下すべての読み取り専用属性を外してから一度だけ再試行する。
pub fn delete_tree(dir: &Path) -> TriageResult<()> {
    retry_on_permission(
        dir,
        || fs::remove_dir_all(dir),
        || {
            for entry in WalkDir::new(dir).into_iter().filter_map(Result::ok) {
                if let Err(e) = clear_readonly(entry.path()) {
                    tracing::debug!(path = %entry.path().display(), error = %e, "属性を変更できません");
                }
            }
            Ok(())
        },
    )
}

/// `op` が権限エラーになったら `clear` を実行して一度だけやり直す
///
/// 2回目の失敗は再試行せずにそのまま返す。権限エラー以外は即座に返す。
fn retry_on_permission<T>(
    path: &Path,
    mut op: impl FnMut() -> io::Result<T>,
    clear: impl FnOnce() -> io::Result<()>,
) -> TriageResult<T> {
    match op() {
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            tracing::debug!(path = %path.display(), "権限エラーのため読み取り専用属性を外して再試行");
            clear().map_err(|source| TriageError::io(path, source))?;
            op().map_err(|source| TriageError::io(path, source))
        }
        other => other.map_err(|source| TriageError::io(path, source)),
    }
}

/// 所有者の書き込み権限を付ける（Windows では読み取り専用属性を外す）
pub fn clear_readonly(path: &Path) -> io::Result<()> {
    let mut permissions = fs::symlink_metadata(path)?.permissions();
    if !permissions.readonly() {
        return Ok(());
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        permissions.set_mode(permissions.mode() | 0o200);
    }
    #[cfg(not(unix))]
    {
        #[allow(clippy::permissions_set_readonly_false)]
        permissions.set_readonly(false);
    }
    fs::set_permissions(path, permissions)
}

fn rename_or_copy(src: &Path, dst: &Path) -> io::Result<()> {
    match fs::rename(src, dst) {
        Err(e) if is_cross_device(&e) => {
            fs::copy(src, dst)?;
            fs::remove_file(src)
        }
        other => other,
    }
}

fn is_cross_device(error: &io::Error) -> bool {
    // EXDEV (unix) / ERROR_NOT_SAME_DEVICE (windows)
    #[cfg(unix)]
    const CROSS_DEVICE: i32 = 18;
    #[cfg(not(unix))]
    const CROSS_DEVICE: i32 = 17;
    error.raw_os_error() == Some(CROSS_DEVICE)
}
