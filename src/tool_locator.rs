use crate::config::ToolConfig;
use crate::core::{TriageError, TriageResult};
use std::path::{Path, PathBuf};

/// 外部解凍ツールの実行ファイルを探す
///
/// 探索順: PATH → 設定された候補パス → 実行中プログラムと同じディレクトリ。
#[derive(Debug, Clone)]
pub struct ToolLocator {
    executable: String,
    search_paths: Vec<PathBuf>,
    program_dir: Option<PathBuf>,
}

impl ToolLocator {
    pub fn new(executable: impl Into<String>, search_paths: Vec<PathBuf>) -> Self {
        let program_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        Self {
            executable: executable.into(),
            search_paths,
            program_dir,
        }
    }

    pub fn from_config(config: &ToolConfig) -> Self {
        Self::new(config.executable.clone(), config.search_paths.clone())
    }

    /// 3番目の探索先を差し替える
    pub fn with_program_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.program_dir = dir;
        self
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn locate(&self) -> TriageResult<PathBuf> {
        if let Ok(path) = which::which(&self.executable) {
            if path.exists() {
                tracing::debug!(path = %path.display(), "PATHから解凍ツールを発見");
                return Ok(path);
            }
        }

        if let Some(path) = self.search_paths.iter().find(|p| p.is_file()) {
            tracing::debug!(path = %path.display(), "既知のインストール先から解凍ツールを発見");
            return Ok(absolute(path));
        }

        if let Some(dir) = &self.program_dir {
            let path = dir.join(&self.executable);
            if path.is_file() {
                tracing::debug!(path = %path.display(), "プログラムと同じディレクトリから解凍ツールを発見");
                return Ok(absolute(&path));
            }
        }

        Err(TriageError::ToolNotFound {
            executable: self.executable.clone(),
        })
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
