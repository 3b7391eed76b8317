use crate::core::{ArchiveEntry, TriageError, TriageResult};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

static ISSUE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:No\.)?(\d{3,4})").expect("valid issue label pattern"));

/// 入力ディレクトリ内の分割アーカイブ一覧（号数ラベル → アーカイブ）
#[derive(Debug, Default, Clone)]
pub struct ArchiveCatalog {
    entries: BTreeMap<String, ArchiveEntry>,
    dropped: Vec<PathBuf>,
    overwritten: usize,
}

impl ArchiveCatalog {
    /// `root` 以下から `volume_suffix` で終わるファイルを探す
    ///
    /// `recursive` が false の場合は `<root>/*/*<suffix>` の1階層のみ。
    pub fn scan(root: &Path, volume_suffix: &str, recursive: bool) -> TriageResult<Self> {
        if !root.is_dir() {
            return Err(TriageError::FilesystemError {
                path: root.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "input directory does not exist",
                ),
            });
        }

        let walker = if recursive {
            WalkDir::new(root).min_depth(1)
        } else {
            WalkDir::new(root).min_depth(2).max_depth(2)
        };

        let mut catalog = Self::default();
        for entry in walker.sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "アーカイブ探索中にエントリを読めませんでした");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if !name.ends_with(volume_suffix) {
                continue;
            }
            catalog.insert(root, entry.path(), volume_suffix);
        }

        tracing::info!(
            found = catalog.len(),
            dropped = catalog.dropped.len(),
            root = %root.display(),
            "分割アーカイブの探索完了"
        );
        Ok(catalog)
    }

    fn insert(&mut self, root: &Path, path: &Path, volume_suffix: &str) {
        let relative = path.strip_prefix(root).unwrap_or(path);
        let Some(label) = extract_issue_label(relative, volume_suffix) else {
            tracing::warn!(path = %path.display(), "号数ラベルを抽出できないためスキップします");
            self.dropped.push(path.to_path_buf());
            return;
        };

        let entry = ArchiveEntry::new(path, label.clone());
        if let Some(previous) = self.entries.insert(label.clone(), entry) {
            tracing::warn!(
                label = %label,
                previous = %previous.path.display(),
                current = %path.display(),
                "号数ラベルが重複しているため後のアーカイブで上書きします"
            );
            self.overwritten += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&ArchiveEntry> {
        self.entries.get(label)
    }

    /// ラベル順に列挙する
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ArchiveEntry)> {
        self.entries.iter()
    }

    /// ラベルを抽出できずに除外されたパス
    pub fn dropped(&self) -> &[PathBuf] {
        &self.dropped
    }

    /// ラベル重複で上書きされた件数
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }

    pub fn into_entries(self) -> Vec<ArchiveEntry> {
        self.entries.into_values().collect()
    }
}

impl FromIterator<ArchiveEntry> for ArchiveCatalog {
    fn from_iter<I: IntoIterator<Item = ArchiveEntry>>(iter: I) -> Self {
        let mut catalog = Self::default();
        for entry in iter {
            if catalog
                .entries
                .insert(entry.issue_label.clone(), entry)
                .is_some()
            {
                catalog.overwritten += 1;
            }
        }
        catalog
    }
}

/// パスから号数ラベルを取り出す
///
/// 接尾辞（`.7z.001` の `001` など）を除いた上で最初に現れる3〜4桁の数字を使い、
/// 4桁にゼロ埋めする。`No.` の接頭辞はラベルに含めない。
pub fn extract_issue_label(path: &Path, volume_suffix: &str) -> Option<String> {
    let text = path.to_string_lossy();
    let text = text.strip_suffix(volume_suffix).unwrap_or(&text);
    let digits = ISSUE_LABEL.captures(text)?.get(1)?.as_str();
    Some(format!("{digits:0>4}"))
}
