use crate::core::{ImageCandidate, ImageProbe, TriageError, TriageResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// ディレクトリを再帰的に走査し、画像ファイルの寸法を読み取るイテレータ
///
/// 同じ構成のディレクトリであれば毎回同じ順序で返す（ファイル名順）。
/// 開けなかった画像や読めなかったエントリは `Err` として返し、走査は続行する。
pub struct ImageWalker<'a, P: ImageProbe> {
    entries: walkdir::IntoIter,
    extensions: Vec<String>,
    excluded: Vec<PathBuf>,
    probe: &'a P,
}

impl<'a, P: ImageProbe> ImageWalker<'a, P> {
    pub fn new(root: &Path, extensions: &[String], probe: &'a P) -> Self {
        Self {
            entries: WalkDir::new(root).sort_by_file_name().into_iter(),
            extensions: extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            excluded: Vec::new(),
            probe,
        }
    }

    /// 走査しないディレクトリ（走査対象内に出力先がある場合など）
    pub fn excluding(mut self, dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        self.excluded
            .extend(dirs.into_iter().map(|dir| dir.canonicalize().unwrap_or(dir)));
        self
    }

    fn is_excluded(&self, path: &Path) -> bool {
        if self.excluded.is_empty() {
            return false;
        }
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.excluded.iter().any(|dir| *dir == path)
    }
}

impl<P: ImageProbe> Iterator for ImageWalker<'_, P> {
    type Item = TriageResult<ImageCandidate>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(walk_error(e))),
            };

            if entry.file_type().is_dir() {
                if entry.depth() > 0 && self.is_excluded(entry.path()) {
                    self.entries.skip_current_dir();
                }
                continue;
            }
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(extension) = FileScanner::image_extension(entry.path(), &self.extensions)
            else {
                continue;
            };

            let path = entry.into_path();
            return Some(self.probe.dimensions(&path).map(|(width, height)| ImageCandidate {
                source_path: path,
                extension,
                width,
                height,
            }));
        }
    }
}

fn walk_error(error: walkdir::Error) -> TriageError {
    let path = error.path().map(Path::to_path_buf).unwrap_or_default();
    let source = error
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
    TriageError::io(path, source)
}

pub struct FileScanner;

impl FileScanner {
    /// 対象拡張子であれば小文字化した拡張子を返す
    pub fn image_extension(path: &Path, extensions: &[String]) -> Option<String> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        Self::is_image_extension(&ext, extensions).then_some(ext)
    }

    fn is_image_extension(extension: &str, extensions: &[String]) -> bool {
        extensions.iter().any(|e| e == extension)
    }
}
